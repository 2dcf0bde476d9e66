//! # Map Module
//!
//! World data for the viewer: torus addressing over a fixed-size window
//! (`coords`), procedural terrain (`generator`), and the incremental
//! wrap-around cache that ties them together (`cache`).

pub mod cache;
pub mod coords;
pub mod generator;

pub use cache::MapCache;
pub use coords::{MAP_SIZE, RENDER_LIMIT};
pub use generator::TerrainGenerator;

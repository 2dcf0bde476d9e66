//! # Geometry Module
//!
//! Everything between block values and GPU triangles: the corner-mask shape
//! catalog (`shape`), the vertex format (`vertex`), and the mesher that walks
//! voxels and emits shaded faces (`mesher`).

pub mod mesher;
pub mod shape;
pub mod vertex;

pub use mesher::{block_color, MeshBuilder};
pub use vertex::Vertex;

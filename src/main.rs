//! # Arena Voxel Application Entry Point
//!
//! This is the main entry point for the voxel world viewer. It simply calls
//! into the library's `run()` function to initialize and start the viewer.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release
//! ```

fn main() {
    arena_voxel::run();
}

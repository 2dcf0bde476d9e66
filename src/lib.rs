#![warn(missing_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Arena Voxel
//!
//! A real-time voxel world viewer built with Rust and WGPU.
//!
//! The viewer procedurally generates block terrain around a moving observer,
//! keeps a fixed-size wrap-around window of that terrain in memory, and turns
//! per-voxel corner masks into a closed catalog of renderable solids (cubes,
//! prisms, pyramids, anti-pyramids).
//!
//! ## Key Modules
//!
//! * `application_state` - Application lifecycle, window, and input management
//! * `engine_state` - Per-frame orchestration: player, map refresh, rendering
//! * `map` - The wrap-around voxel cache and the terrain generator behind it
//! * `geometry` - Corner-mask shape catalog and the triangle mesher
//! * `rendering` - Camera math, textures, and the WGPU pipeline
//!
//! ## Usage
//!
//! ```rust,no_run
//! fn main() {
//!     arena_voxel::run();
//! }
//! ```

use application_state::{
    graphics_resources_builder::{GraphicsBuilder, MaybeGraphics},
    ApplicationState,
};

use log::info;
use winit::event_loop::EventLoop;

pub mod application_state;
pub mod engine_state;
pub mod geometry;
pub mod map;
pub mod rendering;

/// Initializes logging and runs the viewer until the window closes.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");
    let event_loop = EventLoop::with_user_event().build().unwrap();

    let mut state =
        ApplicationState::new(MaybeGraphics::Builder(GraphicsBuilder::new(
            event_loop.create_proxy(),
        )));

    let _ = event_loop.run_app(&mut state);
}

//! # Engine State Module
//!
//! The core state container tying the subsystems together:
//!
//! * `EngineState` - owns the world map, the player, and the renderer
//! * `player` - movement, collision, and mouse look
//!
//! Each frame flows through `frame` (input, movement, map refresh, mesh
//! rebuild) and `render` (draw the rebuilt mesh), with `diagnostics_title`
//! exposing position and timing figures for the window title.

use std::time::Duration;

use wgpu::{Device, Queue, Surface, SurfaceConfiguration};
use winit::dpi::PhysicalSize;

use crate::application_state::input_manager::MovementIntent;
use crate::map::{MapCache, TerrainGenerator};
use crate::rendering::WorldRenderer;

pub mod player;

use player::Player;

/// Longest frame delta the simulation will integrate, in seconds. Stalls
/// longer than this (window drags, debugger pauses) advance time by the cap
/// instead of teleporting the player.
const MAX_FRAME_SECONDS: f32 = 0.5;

/// The main state container for the viewer.
///
/// Maintains the GPU surface, the world map cache, the player, and the
/// renderer, and coordinates their interactions once per frame.
pub struct EngineState {
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    device: Device,
    queue: Queue,
    renderer: WorldRenderer,
    map: MapCache,
    player: Player,
}

impl EngineState {
    /// Creates a new engine state with all subsystems initialized.
    ///
    /// # Arguments
    /// * `surface` - The configured window surface
    /// * `surface_config` - The surface configuration in effect
    /// * `device` - The WebGPU device
    /// * `queue` - The WebGPU queue
    pub fn new(
        surface: Surface<'static>,
        surface_config: SurfaceConfiguration,
        device: Device,
        queue: Queue,
    ) -> Self {
        let renderer = WorldRenderer::new(&device, &queue, &surface_config);
        let map = MapCache::new(TerrainGenerator::new());

        Self {
            surface,
            surface_config,
            device,
            queue,
            renderer,
            map,
            player: Player::new(),
        }
    }

    /// Advances the simulation by one frame.
    ///
    /// Applies look and movement input, re-centers the map on the player, and
    /// rebuilds the frame's mesh.
    ///
    /// # Arguments
    /// * `intent` - The frame's gathered movement and look input
    /// * `dt` - Wall-clock time since the previous frame
    pub fn frame(&mut self, intent: MovementIntent, dt: Duration) {
        let dt = dt.as_secs_f32().min(MAX_FRAME_SECONDS);

        self.player.look(intent.mouse_delta);
        self.player.advance(&self.map, &intent, dt);
        self.map.refresh(self.player.position());
        self.renderer.rebuild_mesh(&self.map, self.player.position());
    }

    /// Draws the most recently rebuilt mesh to the surface.
    pub fn render(&mut self) {
        self.renderer
            .render(&self.surface, &self.device, &self.queue, &self.player.camera);
    }

    /// Handles window resize by reconfiguring the surface and the renderer's
    /// size-dependent resources.
    ///
    /// # Arguments
    /// * `size` - The new window size in physical pixels
    pub fn resize_surface(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.renderer.resize(&self.device, &self.surface_config);
    }

    /// The diagnostics line shown in the window title: player position, mesh
    /// rebuild time, and map refresh time.
    pub fn diagnostics_title(&self) -> String {
        let position = self.player.position();
        format!(
            "position: {:.1} {:.1} {:.1}, blocks: {:.0}ms, map: {:.0}",
            position.x,
            position.y,
            position.z,
            self.renderer.last_mesh_build().as_secs_f64() * 1000.0,
            self.map.last_refresh().as_secs_f64() * 1000.0,
        )
    }
}

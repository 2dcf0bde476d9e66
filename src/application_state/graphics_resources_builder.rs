//! # Graphics Resources Builder
//!
//! This module handles the creation of the graphics resources required by the
//! viewer: the window, the WebGPU surface and device, and the surface
//! configuration. Initialization runs through winit's deferred flow: a
//! `GraphicsBuilder` is armed before the event loop starts and delivers the
//! finished `Graphics` back through a user event.

use std::future::Future;
use std::sync::Arc;

use wgpu::{Adapter, Device, Features, Instance, Queue, Surface, SurfaceConfiguration};
use winit::{
    event_loop::{ActiveEventLoop, EventLoopProxy},
    window::{CursorGrabMode, Window},
};

/// Contains all graphics-related resources required by the application.
///
/// Created once during startup and consumed by the engine state when the
/// application transitions to its running state.
#[derive(Default)]
pub struct Graphics {
    pub window: Option<Arc<Window>>,
    #[allow(dead_code)]
    pub instance: Option<Instance>,
    pub surface: Option<Surface<'static>>,
    pub surface_config: Option<SurfaceConfiguration>,
    #[allow(dead_code)]
    pub adapter: Option<Adapter>,
    pub device: Option<Device>,
    pub queue: Option<Queue>,
}

/// Asynchronously creates and initializes all required graphics resources.
///
/// Creates the window with a captured, hidden cursor for mouse look, then
/// sets up the surface, adapter, and device.
///
/// # Arguments
/// * `event_loop` - The active event loop used to create the window and surface
///
/// # Returns
/// A `Future` that resolves to the initialized `Graphics` when complete
fn create_graphics(event_loop: &ActiveEventLoop) -> impl Future<Output = Graphics> + 'static {
    let window_attrs = Window::default_attributes().with_title("Arena");
    let window = Arc::new(event_loop.create_window(window_attrs).unwrap());

    // Mouse look wants raw deltas; lock the cursor where supported, confine
    // it where locking is not available.
    if window.set_cursor_grab(CursorGrabMode::Locked).is_err() {
        let _ = window.set_cursor_grab(CursorGrabMode::Confined);
    }
    window.set_cursor_visible(false);

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        flags: wgpu::InstanceFlags::empty(),
        backend_options: wgpu::BackendOptions::from_env_or_default(),
    });

    let surface = instance.create_surface(window.clone()).unwrap();

    async move {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap();

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: Features::empty(),
                required_limits: wgpu::Limits::default(),
                label: None,
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .unwrap();

        let size = window.inner_size();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);

        Graphics {
            window: Some(window),
            instance: Some(instance),
            surface: Some(surface),
            surface_config: Some(surface_config),
            adapter: Some(adapter),
            device: Some(device),
            queue: Some(queue),
        }
    }
}

/// Helper struct for managing the asynchronous initialization of graphics
/// resources.
pub struct GraphicsBuilder {
    event_loop_proxy: Option<EventLoopProxy<Graphics>>,
}

/// Represents the possible states of the graphics initialization process.
pub enum MaybeGraphics {
    /// State during asynchronous graphics initialization
    Builder(GraphicsBuilder),

    /// State when graphics resources are fully initialized and ready for use
    Graphics(Graphics),

    /// State after graphics resources have been moved to another owner
    Moved,
}

impl GraphicsBuilder {
    /// Creates a new GraphicsBuilder with the specified event loop proxy.
    ///
    /// # Arguments
    /// * `event_loop_proxy` - Used to send the initialized graphics resources back to the main thread
    pub fn new(event_loop_proxy: EventLoopProxy<Graphics>) -> Self {
        Self {
            event_loop_proxy: Some(event_loop_proxy),
        }
    }

    /// Initiates the graphics initialization process.
    ///
    /// Blocks on resource creation and sends the result back to the event
    /// loop as a user event.
    ///
    /// # Arguments
    /// * `event_loop` - The active event loop used to create the graphics context
    ///
    /// # Panics
    /// Panics if sending the finished graphics to the event loop fails
    pub fn build_and_send(&mut self, event_loop: &ActiveEventLoop) {
        let Some(event_loop_proxy) = self.event_loop_proxy.take() else {
            // event_loop_proxy is already spent - we already constructed Graphics
            return;
        };

        let gfx = pollster::block_on(create_graphics(event_loop));
        assert!(event_loop_proxy.send_event(gfx).is_ok());
    }
}

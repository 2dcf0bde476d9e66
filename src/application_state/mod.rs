//! # Application State Management
//!
//! This module handles the application's state management, including:
//! - Window and graphics initialization
//! - Input handling
//! - Application lifecycle events
//! - State transitions between initialization and running states

pub mod graphics_resources_builder;
pub mod input_manager;

use std::sync::Arc;
use std::time::Instant;

use graphics_resources_builder::{Graphics, MaybeGraphics};
use input_manager::InputManager;

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::engine_state::EngineState;

/// The main application state container that manages the application's lifecycle.
///
/// Holds the graphics initialization state and, once initialization has
/// completed, the running application state. Implements `ApplicationHandler`
/// to handle window and device events.
pub struct ApplicationState {
    /// The current graphics state, which may be initializing, ready, or consumed
    pub graphics: MaybeGraphics,

    /// The initialized application state, if the application has started
    pub state: Option<InitializedApplicationState>,
}

/// Represents the fully initialized and running state of the application.
pub struct InitializedApplicationState {
    /// The core engine state: world, player, and renderer
    pub engine_state: EngineState,

    /// Handle to the application window
    pub window: Arc<Window>,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// Timestamp of the last frame for delta time calculations
    pub last_wait_time: Instant,
}

impl ApplicationState {
    /// Creates an application state waiting on the given graphics builder.
    pub fn new(graphics: MaybeGraphics) -> Self {
        Self {
            graphics,
            state: None,
        }
    }

    /// Transitions the application from initialization to the running state by
    /// handing the graphics resources to a fresh engine state.
    fn initialize_application_state(&mut self) {
        if let MaybeGraphics::Graphics(gfx) = &mut self.graphics {
            let taken_gfx = std::mem::take(gfx);
            let window = taken_gfx.window.expect("Window is missing");
            let engine_state = EngineState::new(
                taken_gfx.surface.expect("Surface is missing"),
                taken_gfx
                    .surface_config
                    .expect("Surface configuration is missing"),
                taken_gfx.device.expect("Device is missing"),
                taken_gfx.queue.expect("Queue is missing"),
            );

            self.state = Some(InitializedApplicationState {
                engine_state,
                window,
                input_manager: InputManager::new(),
                last_wait_time: Instant::now(),
            });

            self.graphics = MaybeGraphics::Moved;
        }
    }
}

impl ApplicationHandler<Graphics> for ApplicationState {
    /// Handles window-related events such as resize, focus changes, and input events.
    ///
    /// # Arguments
    /// * `event_loop` - Reference to the active event loop
    /// * `_window_id` - ID of the window that generated the event
    /// * `event` - The window event to process
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(state) = &mut self.state {
            let input_manager = &mut state.input_manager;
            let engine_state = &mut state.engine_state;

            input_manager.intake_input(&event);

            match event {
                WindowEvent::Resized(size) => {
                    engine_state.resize_surface(size);
                }
                WindowEvent::Focused(is_focused) => {
                    if !is_focused {
                        input_manager.reset_inputs();
                    }
                }
                WindowEvent::RedrawRequested => {
                    engine_state.render();
                }
                WindowEvent::CloseRequested
                | WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            state: ElementState::Pressed,
                            physical_key: PhysicalKey::Code(KeyCode::Escape),
                            ..
                        },
                    ..
                } => event_loop.exit(),
                _ => (),
            }
        } else if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
        }
    }

    /// Handles device-level input events such as raw mouse motion.
    ///
    /// # Arguments
    /// * `_event_loop` - Reference to the active event loop
    /// * `_device_id` - ID of the device that generated the event
    /// * `event` - The device event to process
    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(state) = &mut self.state {
            if let DeviceEvent::MouseMotion { delta } = event {
                state.input_manager.intake_mouse_motion(delta);
            }
        }
    }

    /// Called when the application is resumed after being suspended.
    ///
    /// Triggers the graphics initialization process if the application is
    /// still waiting on its builder.
    ///
    /// # Arguments
    /// * `event_loop` - Reference to the active event loop
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let MaybeGraphics::Builder(builder) = &mut self.graphics {
            builder.build_and_send(event_loop);
        }
    }

    /// Handles the graphics initialization user event and transitions the
    /// application to the running state.
    ///
    /// # Arguments
    /// * `_event_loop` - Reference to the active event loop
    /// * `graphics` - The initialized graphics resources
    fn user_event(&mut self, _event_loop: &ActiveEventLoop, graphics: Graphics) {
        self.graphics = MaybeGraphics::Graphics(graphics);
        self.initialize_application_state();
    }

    /// Called before the event loop goes to sleep.
    ///
    /// Advances the simulation by one frame: applies the gathered input,
    /// refreshes the world around the player, updates the diagnostics in the
    /// window title, and requests the next redraw.
    ///
    /// # Arguments
    /// * `_event_loop` - Reference to the active event loop
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            let now = Instant::now();
            let wait_dt = now - state.last_wait_time;
            state.last_wait_time = now;

            let intent = state.input_manager.take_intent();
            state.engine_state.frame(intent, wait_dt);

            state.window.set_title(&state.engine_state.diagnostics_title());
            state.window.request_redraw();
        }
    }
}

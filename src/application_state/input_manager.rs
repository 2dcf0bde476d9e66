//! # Input Manager
//!
//! This module handles input processing for the application, including:
//! - Keyboard input state tracking
//! - Mouse motion accumulation
//! - Per-frame movement intent extraction

use std::collections::HashMap;

use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

const KEY_CODES: [KeyCode; 6] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::KeyQ,
    KeyCode::KeyE,
];

/// The movement and look input gathered for one frame.
///
/// Key flags are level-triggered (held keys keep their flag set every frame);
/// the mouse delta is the accumulated motion since the previous frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MovementIntent {
    /// Strafe left (A)
    pub left: bool,
    /// Strafe right (D)
    pub right: bool,
    /// Move along the view direction (W)
    pub forward: bool,
    /// Move against the view direction (S)
    pub backward: bool,
    /// Rise along world Z (Q)
    pub up: bool,
    /// Descend along world Z (E)
    pub down: bool,
    /// Accumulated mouse motion in pixels
    pub mouse_delta: (f64, f64),
}

/// Manages the state of all input devices and processes input events.
pub struct InputManager {
    /// Current held state of all tracked keyboard keys
    keyboard_inputs: HashMap<KeyCode, bool>,
    /// Mouse motion accumulated since the last frame
    mouse_delta: (f64, f64),
}

impl InputManager {
    /// Creates a new InputManager with all tracked keys released.
    pub fn new() -> Self {
        let mut keyboard_inputs = HashMap::new();
        for key_code in KEY_CODES {
            keyboard_inputs.insert(key_code, false);
        }

        Self {
            keyboard_inputs,
            mouse_delta: (0.0, 0.0),
        }
    }

    /// Processes a window event and updates internal input state.
    ///
    /// # Arguments
    /// * `event` - The window event to process
    pub fn intake_input(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    state,
                    physical_key: PhysicalKey::Code(key),
                    ..
                },
            ..
        } = event
        {
            if let Some(key_state) = self.keyboard_inputs.get_mut(key) {
                *key_state = *state == ElementState::Pressed;
            }
        }
    }

    /// Accumulates raw mouse movement.
    ///
    /// # Arguments
    /// * `delta` - The (x, y) delta of mouse movement since the last event
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        self.mouse_delta.0 += delta.0;
        self.mouse_delta.1 += delta.1;
    }

    /// Returns the frame's movement intent and resets the mouse accumulator.
    ///
    /// Key flags reflect the current held state and are left in place so held
    /// keys keep producing movement on subsequent frames.
    pub fn take_intent(&mut self) -> MovementIntent {
        let held = |key| self.keyboard_inputs.get(&key).copied().unwrap_or(false);
        let intent = MovementIntent {
            left: held(KeyCode::KeyA),
            right: held(KeyCode::KeyD),
            forward: held(KeyCode::KeyW),
            backward: held(KeyCode::KeyS),
            up: held(KeyCode::KeyQ),
            down: held(KeyCode::KeyE),
            mouse_delta: self.mouse_delta,
        };
        self.mouse_delta = (0.0, 0.0);
        intent
    }

    /// Resets all input states to their default values.
    ///
    /// This is typically called when the window loses focus to prevent
    /// stuck keys.
    pub fn reset_inputs(&mut self) {
        for state in self.keyboard_inputs.values_mut() {
            *state = false;
        }
        self.mouse_delta = (0.0, 0.0);
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_motion_accumulates_until_taken() {
        let mut manager = InputManager::new();
        manager.intake_mouse_motion((3.0, -1.0));
        manager.intake_mouse_motion((2.0, 4.0));

        let intent = manager.take_intent();
        assert_eq!(intent.mouse_delta, (5.0, 3.0));

        // Taking the intent drains the accumulator.
        assert_eq!(manager.take_intent().mouse_delta, (0.0, 0.0));
    }

    #[test]
    fn held_keys_persist_across_frames() {
        let mut manager = InputManager::new();
        manager.keyboard_inputs.insert(KeyCode::KeyW, true);
        assert!(manager.take_intent().forward);
        assert!(manager.take_intent().forward);

        manager.reset_inputs();
        assert!(!manager.take_intent().forward);
    }
}

//! # Player
//!
//! The observer walking the world: owns the camera, integrates movement
//! against the collision query, and applies mouse look.

use cgmath::{InnerSpace, Point3, Rad, Vector3, Zero};

use crate::application_state::input_manager::MovementIntent;
use crate::map::MapCache;
use crate::rendering::camera::Camera;

/// Movement speed in voxels per second.
const MOVE_SPEED: f32 = 5.0;
/// Number of substeps one frame's movement is divided into for collision.
const COLLISION_SUBSTEPS: u32 = 100;
/// Where the player starts, floating above the spawn terrain.
const SPAWN_POSITION: Point3<f32> = Point3::new(0.0, 0.0, 20.0);

/// The player: a camera plus the movement rules that drive it.
pub struct Player {
    /// The first-person camera carrying position and orientation.
    pub camera: Camera,
}

impl Player {
    /// Creates a player at the spawn position looking level along +Y.
    pub fn new() -> Self {
        Self {
            camera: Camera::new(SPAWN_POSITION, Rad(0.0), Rad(0.0)),
        }
    }

    /// Current world position.
    pub fn position(&self) -> Point3<f32> {
        self.camera.position
    }

    /// Applies accumulated mouse motion to the view direction.
    pub fn look(&mut self, delta: (f64, f64)) {
        if delta.0 != 0.0 || delta.1 != 0.0 {
            self.camera.apply_look(delta.0, delta.1);
        }
    }

    /// Integrates one frame of movement with collision against the map.
    ///
    /// The frame's travel is split into substeps; each substep advances the
    /// position and the first one that collides is undone, stopping the
    /// remainder of the frame's movement at the contact.
    pub fn advance(&mut self, map: &MapCache, intent: &MovementIntent, dt: f32) {
        let (right, forward) = self.camera.movement_basis();

        let mut dir: Vector3<f32> = Vector3::zero();
        if intent.left {
            dir -= right;
        }
        if intent.right {
            dir += right;
        }
        if intent.forward {
            dir += forward;
        }
        if intent.backward {
            dir -= forward;
        }
        if intent.up {
            dir.z += 1.0;
        }
        if intent.down {
            dir.z -= 1.0;
        }

        if dir.is_zero() {
            return;
        }
        let dir = dir.normalize();

        let step = dir * MOVE_SPEED * dt / COLLISION_SUBSTEPS as f32;
        for _ in 0..COLLISION_SUBSTEPS {
            self.camera.position += step;
            if map.sphere_collides(self.camera.position) {
                self.camera.position -= step;
                break;
            }
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

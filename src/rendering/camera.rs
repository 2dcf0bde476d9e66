//! # Camera Implementation
//!
//! First-person camera for a Z-up world, including:
//! - View and projection matrix construction
//! - Mouse-look integration with pitch clamping
//! - The yaw/pitch movement basis used by the player integrator
//! - GPU uniform packing

use cgmath::*;
use std::f32::consts::FRAC_PI_2;

/// Transformation matrix to convert from OpenGL's coordinate system to WGPU's.
///
/// WGPU clip space runs Z from 0 to 1 where OpenGL runs -1 to 1; this matrix
/// rescales and shifts Z accordingly.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,  // Scale Z from [-1,1] to [-0.5,0.5]
    0.0, 0.0, 0.5, 1.0,  // Translate Z from [-0.5,0.5] to [0,1]
);

/// Vertical field of view.
const FOV_Y: Deg<f32> = Deg(65.0);
/// Near clipping plane distance.
const Z_NEAR: f32 = 0.03;
/// Far clipping plane distance.
const Z_FAR: f32 = 100.0;
/// Radians of rotation per pixel of mouse travel.
const LOOK_SENSITIVITY: f32 = 1.0 / 100.0;

/// Represents a first-person camera in a Z-up world.
///
/// Yaw 0 / pitch 0 looks along +Y with +Z overhead; yaw turns left about the
/// world Z axis and pitch tilts toward +Z.
#[derive(Debug)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Rotation about the world Z axis in radians
    pub yaw: Rad<f32>,
    /// Tilt toward the world Z axis in radians
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial position in world space
    /// * `yaw` - Initial rotation about the world Z axis
    /// * `pitch` - Initial tilt toward the world Z axis
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        }
    }

    /// Applies a mouse delta in pixels to the orientation.
    ///
    /// Positive `delta_x` turns right, positive `delta_y` tilts down. Pitch is
    /// clamped so the view never passes the vertical.
    pub fn apply_look(&mut self, delta_x: f64, delta_y: f64) {
        self.yaw += Rad(delta_x as f32 * LOOK_SENSITIVITY);
        self.pitch += Rad(delta_y as f32 * LOOK_SENSITIVITY);

        if self.pitch < -Rad(FRAC_PI_2) {
            self.pitch = -Rad(FRAC_PI_2);
        } else if self.pitch > Rad(FRAC_PI_2) {
            self.pitch = Rad(FRAC_PI_2);
        }
    }

    /// Calculates the view matrix for this camera.
    ///
    /// Built from the inverse camera transform: translate to the camera, lift
    /// the Z-up world into the Y-up eye convention, then undo yaw and pitch.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_x(self.pitch)
            * Matrix4::from_angle_y(self.yaw)
            * Matrix4::from_angle_x(-Rad(FRAC_PI_2))
            * Matrix4::from_translation(Point3::origin() - self.position)
    }

    /// The camera-relative movement basis.
    ///
    /// # Returns
    /// `(right, forward)` unit vectors: `right` stays level regardless of
    /// pitch, `forward` follows the view direction up and down.
    pub fn movement_basis(&self) -> (Vector3<f32>, Vector3<f32>) {
        let m = Matrix3::from_angle_z(-self.yaw) * Matrix3::from_angle_x(-self.pitch);
        (m.x, m.y)
    }
}

/// Represents a camera's projection matrix and related parameters.
#[derive(Debug)]
pub struct Projection {
    /// Aspect ratio (width / height)
    aspect: f32,
}

impl Projection {
    /// Creates a new projection for the given viewport size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            aspect: width as f32 / height as f32,
        }
    }

    /// Updates the projection's aspect ratio for viewport resizing.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    /// Calculates the projection matrix.
    ///
    /// Combines the perspective projection with the OpenGL to WGPU coordinate
    /// system transform.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(FOV_Y, self.aspect, Z_NEAR, Z_FAR)
    }
}

/// GPU-friendly representation of camera data for shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Creates a new camera uniform with an identity matrix.
    pub fn new() -> Self {
        Self {
            view_proj: cgmath::Matrix4::identity().into(),
        }
    }

    /// Updates the view-projection matrix from the current camera state.
    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(actual: Vector3<f32>, expected: Vector3<f32>) {
        assert!(
            (actual - expected).magnitude() < 1e-5,
            "{actual:?} vs {expected:?}"
        );
    }

    #[test]
    fn level_view_looks_along_positive_y() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        let view = camera.calc_matrix();

        // A point ahead on +Y lands in front of the eye (negative view Z).
        let ahead = view * Vector4::new(0.0, 5.0, 0.0, 1.0);
        assert!(ahead.z < 0.0);
        assert!(ahead.x.abs() < 1e-5 && ahead.y.abs() < 1e-5);

        // A point overhead on +Z maps to view up.
        let overhead = view * Vector4::new(0.0, 0.0, 5.0, 1.0);
        assert!(overhead.y > 0.0);
        assert!(overhead.x.abs() < 1e-5 && overhead.z.abs() < 1e-5);
    }

    #[test]
    fn movement_basis_at_rest() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        let (right, forward) = camera.movement_basis();
        assert_vec_close(right, Vector3::new(1.0, 0.0, 0.0));
        assert_vec_close(forward, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn yaw_turns_the_basis_right() {
        // A quarter turn right faces +X; right then points along -Y.
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(FRAC_PI_2), Rad(0.0));
        let (right, forward) = camera.movement_basis();
        assert_vec_close(right, Vector3::new(0.0, -1.0, 0.0));
        assert_vec_close(forward, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn pitch_tilts_forward_but_not_right() {
        // Full positive pitch looks straight down.
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(FRAC_PI_2));
        let (right, forward) = camera.movement_basis();
        assert_vec_close(right, Vector3::new(1.0, 0.0, 0.0));
        assert_vec_close(forward, Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn look_is_clamped_at_the_vertical() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        camera.apply_look(0.0, 10_000.0);
        assert_eq!(camera.pitch, Rad(FRAC_PI_2));
        camera.apply_look(0.0, -10_000.0);
        assert_eq!(camera.pitch, -Rad(FRAC_PI_2));
    }

    #[test]
    fn look_sensitivity_is_per_pixel() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        camera.apply_look(50.0, 0.0);
        assert!((camera.yaw.0 - 0.5).abs() < 1e-6);
    }
}

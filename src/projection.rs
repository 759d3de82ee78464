//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for the
//! perspective parameters (FOV, aspect ratio, near/far planes). It generates
//! the projection matrix and maps normalized device coordinates to pixels.

use crate::camera::RenderCamera;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// Distance from the eye to the near clip plane.
pub const NEAR_PLANE: f64 = 0.001;
/// Distance from the eye to the far plane of the projection matrix.
pub const FAR_PLANE: f64 = 1000.0;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f64,
    /// Aspect ratio (width / height).
    aspect_ratio: f64,
    /// Near clipping plane distance.
    z_near: f64,
    /// Far clipping plane distance.
    z_far: f64,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near clipping plane distance (must be > 0)
    /// * `z_far` - Far clipping plane distance (must be > z_near)
    pub fn new(fov_y: f64, aspect_ratio: f64, z_near: f64, z_far: f64) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Creates a projection from degrees instead of radians.
    pub fn from_degrees(fov_y_degrees: f64, aspect_ratio: f64, z_near: f64, z_far: f64) -> Self {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    /// The projection a camera renders with, using the standard clip planes.
    pub fn for_camera(camera: &RenderCamera) -> Self {
        Self::from_degrees(camera.fov_y, camera.aspect_ratio, NEAR_PLANE, FAR_PLANE)
    }

    /// Generates the left-handed perspective projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_lh(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }
}

/// Maps normalized device coordinates to pixel coordinates.
///
/// NDC `y = +1` is the top of the screen. `y_shear` shifts the image
/// vertically by a fraction of the screen height. `z` passes through.
#[inline]
pub fn ndc_to_screen(ndc: Vec3, y_shear: f64, width: f64, height: f64) -> Vec3 {
    Vec3::new(
        (ndc.x * 0.5 + 0.5) * width,
        ((0.5 + y_shear) - ndc.y * 0.5) * height,
        ndc.z,
    )
}

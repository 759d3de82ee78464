//! Per-frame render camera.
//!
//! # Coordinate System
//!
//! Uses a **left-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward
//!
//! # Chunked eye position
//!
//! The eye is stored as an integer chunk coordinate on the horizontal plane
//! plus a local offset inside that chunk, so the game world can grow far from
//! the origin without the caller accumulating precision loss in one big
//! float. [`RenderCamera::eye`] folds both into a world position.

use crate::math::vec3::Vec3;

/// Chunk side length in world units.
pub const CHUNK_DIM: i32 = 64;

/// Integer chunk coordinate on the XZ plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// World position of a point given relative to this chunk's origin.
    pub fn to_world(self, point: Vec3) -> Vec3 {
        Vec3::new(
            f64::from(self.x) * f64::from(CHUNK_DIM) + point.x,
            point.y,
            f64::from(self.z) * f64::from(CHUNK_DIM) + point.z,
        )
    }
}

/// Camera parameters for one frame. Rebuilt by the caller each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCamera {
    pub chunk: ChunkCoord,
    /// Eye offset inside `chunk`.
    pub point: Vec3,
    pub forward: Vec3,
    /// `forward` scaled by the zoom factor `1 / tan(fov_y / 2)`.
    pub forward_scaled: Vec3,
    pub right: Vec3,
    /// `right` scaled by the aspect ratio.
    pub right_scaled: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f64,
    /// Width divided by height.
    pub aspect_ratio: f64,
    /// Vertical lookaround shear, as a fraction of the screen height.
    pub y_shear: f64,
}

impl RenderCamera {
    /// Builds the camera basis from a forward direction and the world up axis.
    ///
    /// # Panics
    /// Panics if `forward` is (nearly) vertical, since the basis would be
    /// undefined.
    pub fn new(chunk: ChunkCoord, point: Vec3, forward: Vec3, fov_y: f64, aspect_ratio: f64) -> Self {
        let forward = forward.normalize();
        let right = Vec3::UP.cross(forward);
        assert!(
            right.magnitude() > 1e-9,
            "camera forward {forward:?} must not be vertical"
        );
        let right = right.normalize();
        let up = forward.cross(right).normalize();

        let zoom = fov_to_zoom(fov_y);
        Self {
            chunk,
            point,
            forward,
            forward_scaled: forward * zoom,
            right,
            right_scaled: right * aspect_ratio,
            up,
            fov_y,
            aspect_ratio,
            y_shear: 0.0,
        }
    }

    /// Builds a first-person camera from yaw and pitch in radians.
    ///
    /// - **Yaw**: rotation around Y (positive = look right, 0 = +Z)
    /// - **Pitch**: rotation around X (positive = look up), clamped to ±89°
    pub fn from_angles(
        chunk: ChunkCoord,
        point: Vec3,
        yaw: f64,
        pitch: f64,
        fov_y: f64,
        aspect_ratio: f64,
    ) -> Self {
        let limit = 89.0_f64.to_radians();
        let pitch = pitch.clamp(-limit, limit);
        let forward = Vec3::new(
            yaw.sin() * pitch.cos(),
            pitch.sin(),
            yaw.cos() * pitch.cos(),
        );
        Self::new(chunk, point, forward, fov_y, aspect_ratio)
    }

    /// Sets the vertical shear applied when projecting to the screen.
    pub fn with_y_shear(mut self, y_shear: f64) -> Self {
        self.y_shear = y_shear;
        self
    }

    /// Eye position in world space.
    pub fn eye(&self) -> Vec3 {
        self.chunk.to_world(self.point)
    }

    /// Normalized view ray through a point on the screen.
    ///
    /// `(0, 0)` is the top-left corner and `(1, 1)` the bottom-right.
    pub fn pixel_direction(&self, x_percent: f64, y_percent: f64) -> Vec3 {
        let top_left = self.forward_scaled - self.right_scaled + self.up;
        (top_left + self.right_scaled * (x_percent * 2.0) - self.up * (y_percent * 2.0)).normalize()
    }
}

/// Converts a vertical field of view in degrees to a zoom factor.
pub fn fov_to_zoom(fov_y: f64) -> f64 {
    1.0 / (fov_y.to_radians() * 0.5).tan()
}

/// World-space ray through a screen point for a camera looking along
/// `direction`.
///
/// # Panics
/// Panics if `direction` is vertical.
pub fn screen_point_to_ray(
    x_percent: f64,
    y_percent: f64,
    direction: Vec3,
    fov_y: f64,
    aspect_ratio: f64,
) -> Vec3 {
    RenderCamera::new(ChunkCoord::default(), Vec3::ZERO, direction, fov_y, aspect_ratio)
        .pixel_direction(x_percent, y_percent)
}

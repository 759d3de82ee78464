//! Back-face culling and view-frustum clipping for whole triangle lists.

use super::plane::Plane;
use super::triangle::clip_triangle;
use crate::camera::RenderCamera;
use crate::math::vec3::Vec3;
use crate::math::EPSILON;
use crate::projection::NEAR_PLANE;
use crate::triangle::RenderTriangle;

/// The five world-space clip planes of a camera.
///
/// There is no far plane: the caller only submits geometry within view
/// distance.
#[derive(Clone, Copy, Debug)]
pub struct Frustum {
    eye: Vec3,
    planes: [Plane; 5],
}

impl Frustum {
    pub fn from_camera(camera: &RenderCamera) -> Self {
        let eye = camera.eye();

        // Edge directions pointing away from the eye.
        let left_dir = (camera.forward_scaled - camera.right_scaled).normalize();
        let right_dir = (camera.forward_scaled + camera.right_scaled).normalize();
        let bottom_dir = (camera.forward_scaled - camera.up).normalize();
        let top_dir = (camera.forward_scaled + camera.up).normalize();

        // Normals pointing into the frustum volume.
        let inward = |normal: Vec3| {
            let normal = normal.normalize();
            if normal.dot(camera.forward) < 0.0 {
                -normal
            } else {
                normal
            }
        };
        let left_normal = inward(camera.up.cross(left_dir));
        let right_normal = inward(right_dir.cross(camera.up));
        let bottom_normal = inward(bottom_dir.cross(camera.right));
        let top_normal = inward(camera.right.cross(top_dir));

        Self {
            eye,
            planes: [
                Plane::new(eye + camera.forward * NEAR_PLANE, camera.forward),
                Plane::new(eye, left_normal),
                Plane::new(eye, right_normal),
                Plane::new(eye, bottom_normal),
                Plane::new(eye, top_normal),
            ],
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Near, left, right, bottom, top.
    pub fn planes(&self) -> &[Plane; 5] {
        &self.planes
    }

    /// Whether the point is on or inside every plane.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.contains(point))
    }

    /// Whether the triangle faces away from the eye (or is nearly edge-on).
    #[inline]
    pub fn is_back_facing(&self, triangle: &RenderTriangle) -> bool {
        (self.eye - triangle.v0).dot(triangle.normal) < EPSILON
    }
}

/// Reusable per-class buffers for culling and clipping.
///
/// Cleared every frame but never shrunk, so steady-state frames do not
/// allocate.
#[derive(Debug, Default)]
pub struct ClipScratch {
    clip_list: Vec<RenderTriangle>,
    visible: Vec<RenderTriangle>,
    submitted: usize,
}

impl ClipScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles given to the last `process` call.
    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// Back-face culls and clips `triangles`, replacing the visible list.
    pub fn process(&mut self, triangles: &[RenderTriangle], frustum: &Frustum) -> &[RenderTriangle] {
        let eye = frustum.eye();
        self.visible.clear();
        self.submitted = triangles.len();

        for triangle in triangles {
            if frustum.is_back_facing(triangle) {
                continue;
            }

            self.clip_list.clear();
            self.clip_list.push(*triangle);
            for plane in frustum.planes() {
                let count = self.clip_list.len();
                for i in 0..count {
                    let result = clip_triangle(&self.clip_list[i], eye, plane);
                    result.push_into(&mut self.clip_list);
                }
                self.clip_list.drain(..count);

                if self.clip_list.is_empty() {
                    break;
                }
            }

            self.visible.extend_from_slice(&self.clip_list);
        }

        &self.visible
    }

    /// Forgets the last frame's results.
    pub fn clear(&mut self) {
        self.clip_list.clear();
        self.visible.clear();
        self.submitted = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::ChunkCoord;
    use crate::math::vec2::Vec2;
    use crate::pool::ObjectMaterialId;

    fn camera() -> RenderCamera {
        RenderCamera::new(ChunkCoord::default(), Vec3::ZERO, Vec3::FORWARD, 90.0, 1.0)
    }

    fn triangle(vertices: [Vec3; 3]) -> RenderTriangle {
        RenderTriangle::new(
            vertices,
            [Vec2::new(0.0, 1.0), Vec2::new(0.5, 0.0), Vec2::new(1.0, 1.0)],
            ObjectMaterialId(0),
            0.0,
        )
    }

    fn inside_triangle() -> RenderTriangle {
        triangle([
            Vec3::new(-1.0, -1.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
            Vec3::new(1.0, -1.0, 5.0),
        ])
    }

    #[test]
    fn planes_point_into_the_frustum() {
        let frustum = Frustum::from_camera(&camera());
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, 1.0)));
        assert!(frustum.contains_point(Vec3::new(0.9, -0.9, 1.0)));
        assert!(!frustum.contains_point(Vec3::new(1.1, 0.0, 1.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 1.1, 1.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn planes_follow_chunked_eye() {
        let mut camera = camera();
        camera.chunk = ChunkCoord::new(1, 1);
        let frustum = Frustum::from_camera(&camera);
        assert!(frustum.contains_point(Vec3::new(64.0, 0.0, 70.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn visible_triangle_passes_unchanged() {
        let mut scratch = ClipScratch::new();
        let frustum = Frustum::from_camera(&camera());
        let visible = scratch.process(&[inside_triangle()], &frustum);
        assert_eq!(visible, &[inside_triangle()]);
        assert_eq!(scratch.submitted(), 1);
    }

    #[test]
    fn back_facing_triangle_is_culled() {
        let mut scratch = ClipScratch::new();
        let frustum = Frustum::from_camera(&camera());
        let back = inside_triangle().reversed();
        let back = triangle(back.vertices());
        assert!(scratch.process(&[back], &frustum).is_empty());
    }

    #[test]
    fn culling_uses_the_stored_normal() {
        let frustum = Frustum::from_camera(&camera());
        let facing = inside_triangle();
        let away = RenderTriangle::with_normal(
            facing.vertices(),
            facing.uvs(),
            Vec3::FORWARD,
            facing.material,
            facing.fade_percent,
        );
        assert!(!frustum.is_back_facing(&facing));
        assert!(frustum.is_back_facing(&away));
    }

    #[test]
    fn triangle_behind_the_eye_is_rejected() {
        let mut scratch = ClipScratch::new();
        let frustum = Frustum::from_camera(&camera());
        let behind = triangle([
            Vec3::new(-1.0, -1.0, -5.0),
            Vec3::new(1.0, -1.0, -5.0),
            Vec3::new(0.0, 1.0, -5.0),
        ]);
        assert!(!frustum.is_back_facing(&behind));
        assert!(scratch.process(&[behind], &frustum).is_empty());
    }

    #[test]
    fn straddling_triangle_is_clipped_into_the_frustum() {
        let mut scratch = ClipScratch::new();
        let frustum = Frustum::from_camera(&camera());
        // Wider than the view at z = 2 on both sides.
        let wide = triangle([
            Vec3::new(-10.0, -1.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
            Vec3::new(10.0, -1.0, 2.0),
        ]);

        let visible = scratch.process(&[wide], &frustum).to_vec();
        assert!(!visible.is_empty());
        for clipped in &visible {
            for vertex in clipped.vertices() {
                for plane in frustum.planes() {
                    assert!(plane.signed_distance(vertex) >= -1e-9);
                }
            }
            assert!((frustum.eye() - clipped.v0).dot(clipped.winding_normal()) >= 0.0);
        }
    }

    #[test]
    fn scratch_is_reused_between_frames() {
        let mut scratch = ClipScratch::new();
        let frustum = Frustum::from_camera(&camera());
        let visible = scratch.process(&[inside_triangle(), inside_triangle()], &frustum);
        assert_eq!(visible.len(), 2);

        assert!(scratch.process(&[], &frustum).is_empty());
        assert_eq!(scratch.submitted(), 0);
    }
}

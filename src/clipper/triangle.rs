//! Clipping a single triangle against a single plane.

use super::plane::Plane;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::EPSILON;
use crate::triangle::RenderTriangle;

/// Output of clipping one triangle against one plane. Never allocates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClipResult {
    /// Completely outside.
    Empty,
    /// Completely inside (the input unchanged), or one vertex inside.
    One(RenderTriangle),
    /// Two vertices inside; the quad is split in two.
    Two(RenderTriangle, RenderTriangle),
}

impl ClipResult {
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::One(_) => 1,
            Self::Two(..) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Appends the resulting triangles to `out`.
    #[inline]
    pub fn push_into(self, out: &mut Vec<RenderTriangle>) {
        match self {
            Self::Empty => {}
            Self::One(a) => out.push(a),
            Self::Two(a, b) => {
                out.push(a);
                out.push(b);
            }
        }
    }
}

/// Where the edge from `inside` towards `outside` crosses the plane, with the
/// UV interpolated by world-space distance along the edge.
fn clip_edge(plane: &Plane, inside: (Vec3, Vec2), outside: (Vec3, Vec2)) -> (Vec3, Vec2) {
    let (inside_point, inside_uv) = inside;
    let (outside_point, outside_uv) = outside;

    // The endpoints are on opposite sides, so the ray is never parallel.
    let direction = (outside_point - inside_point).normalize();
    let point = plane
        .ray_intersection(inside_point, direction)
        .unwrap_or(inside_point);

    let edge_length = inside_point.distance(outside_point);
    let clipped_length = inside_point.distance(point);
    let uv = inside_uv.lerp(outside_uv, clipped_length / edge_length);
    (point, uv)
}

/// Keeps the winding of a generated triangle facing the eye.
fn face_eye(triangle: RenderTriangle, eye: Vec3) -> RenderTriangle {
    if (eye - triangle.v0).dot(triangle.winding_normal()) >= EPSILON {
        triangle
    } else {
        triangle.reversed()
    }
}

/// Clips `triangle` against `plane`.
///
/// Vertices with a signed distance `>= 0` are inside. New vertices lie on the
/// plane; their UVs are interpolated from the retained vertex by the ratio of
/// 3D edge lengths. Generated triangles are re-wound to face `eye`.
pub fn clip_triangle(triangle: &RenderTriangle, eye: Vec3, plane: &Plane) -> ClipResult {
    let vertices = triangle.vertices();
    let uvs = triangle.uvs();

    let mut inside = [(Vec3::ZERO, Vec2::ZERO); 3];
    let mut outside = [(Vec3::ZERO, Vec2::ZERO); 3];
    let mut inside_count = 0;
    let mut outside_count = 0;

    for (&vertex, &uv) in vertices.iter().zip(uvs.iter()) {
        if plane.contains(vertex) {
            inside[inside_count] = (vertex, uv);
            inside_count += 1;
        } else {
            outside[outside_count] = (vertex, uv);
            outside_count += 1;
        }
    }

    match inside_count {
        0 => ClipResult::Empty,
        3 => ClipResult::One(*triangle),
        1 => {
            let (inside_point, inside_uv) = inside[0];
            let (new_point0, new_uv0) = clip_edge(plane, inside[0], outside[0]);
            let (new_point1, new_uv1) = clip_edge(plane, inside[0], outside[1]);

            let clipped = RenderTriangle {
                v0: inside_point,
                v1: new_point0,
                v2: new_point1,
                uv0: inside_uv,
                uv1: new_uv0,
                uv2: new_uv1,
                ..*triangle
            };
            ClipResult::One(face_eye(clipped, eye))
        }
        2 => {
            let (inside_point0, inside_uv0) = inside[0];
            let (inside_point1, inside_uv1) = inside[1];
            let (new_point0, new_uv0) = clip_edge(plane, inside[0], outside[0]);
            let (new_point1, new_uv1) = clip_edge(plane, inside[1], outside[0]);

            let first = RenderTriangle {
                v0: inside_point0,
                v1: inside_point1,
                v2: new_point0,
                uv0: inside_uv0,
                uv1: inside_uv1,
                uv2: new_uv0,
                ..*triangle
            };
            let second = RenderTriangle {
                v0: inside_point1,
                v1: new_point0,
                v2: new_point1,
                uv0: inside_uv1,
                uv1: new_uv0,
                uv2: new_uv1,
                ..*triangle
            };
            ClipResult::Two(face_eye(first, eye), face_eye(second, eye))
        }
        _ => unreachable!("unhandled triangle clip case (inside: {inside_count}, outside: {outside_count})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::ObjectMaterialId;
    use approx::assert_relative_eq;

    fn eye() -> Vec3 {
        Vec3::ZERO
    }

    /// Facing the eye at the origin, spanning x in [-1, 1] at z = 5.
    fn facing_triangle() -> RenderTriangle {
        RenderTriangle::new(
            [
                Vec3::new(-1.0, 0.0, 5.0),
                Vec3::new(0.0, 1.0, 5.0),
                Vec3::new(1.0, 0.0, 5.0),
            ],
            [Vec2::new(0.0, 1.0), Vec2::new(0.5, 0.0), Vec2::new(1.0, 1.0)],
            ObjectMaterialId(3),
            0.25,
        )
    }

    fn assert_faces_eye(triangle: &RenderTriangle) {
        assert!((eye() - triangle.v0).dot(triangle.winding_normal()) >= 0.0);
    }

    #[test]
    fn fully_inside_passes_through_unchanged() {
        let triangle = facing_triangle();
        let plane = Plane::new(Vec3::new(0.0, 0.0, 1.0), Vec3::FORWARD);
        assert_eq!(clip_triangle(&triangle, eye(), &plane), ClipResult::One(triangle));
    }

    #[test]
    fn fully_outside_is_discarded() {
        let plane = Plane::new(Vec3::new(0.0, 0.0, 10.0), Vec3::FORWARD);
        let result = clip_triangle(&facing_triangle(), eye(), &plane);
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
    }

    #[test]
    fn one_inside_vertex_yields_one_triangle() {
        // Keep x >= 0.5: only the vertex at x = 1 survives.
        let plane = Plane::new(Vec3::new(0.5, 0.0, 0.0), Vec3::RIGHT);
        let ClipResult::One(clipped) = clip_triangle(&facing_triangle(), eye(), &plane) else {
            panic!("expected a single triangle");
        };

        for vertex in clipped.vertices() {
            assert!(plane.signed_distance(vertex) >= -1e-9);
        }
        assert_faces_eye(&clipped);
        assert_eq!(clipped.material, ObjectMaterialId(3));
        assert_relative_eq!(clipped.fade_percent, 0.25);
    }

    #[test]
    fn two_inside_vertices_yield_two_triangles() {
        // Keep y <= 0.5: the apex is cut off.
        let plane = Plane::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let result = clip_triangle(&facing_triangle(), eye(), &plane);
        let ClipResult::Two(first, second) = result else {
            panic!("expected two triangles, got {result:?}");
        };

        for triangle in [first, second] {
            for vertex in triangle.vertices() {
                assert!(plane.signed_distance(vertex) >= -1e-9);
            }
            assert_faces_eye(&triangle);
        }
    }

    #[test]
    fn clipped_uvs_follow_world_distance() {
        // Cut halfway up the left edge: from (-1, 0) uv (0, 1) to (0, 1) uv (0.5, 0).
        let plane = Plane::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let mut out = Vec::new();
        clip_triangle(&facing_triangle(), eye(), &plane).push_into(&mut out);

        let midpoint = Vec3::new(-0.5, 0.5, 5.0);
        let (vertex, uv) = out
            .iter()
            .flat_map(|t| t.vertices().into_iter().zip(t.uvs()))
            .find(|(v, _)| v.distance(midpoint) < 1e-9)
            .expect("clip vertex on the left edge");
        assert_relative_eq!(vertex.x, -0.5, epsilon = 1e-9);
        assert_relative_eq!(uv.x, 0.25, epsilon = 1e-9);
        assert_relative_eq!(uv.y, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn winding_is_corrected_for_back_wound_output() {
        // Same geometry wound the other way: the generated triangle would face
        // away from the eye, so it has to be reversed.
        let mut triangle = facing_triangle();
        triangle.v0 = Vec3::new(1.0, 0.0, 5.0);
        triangle.v2 = Vec3::new(-1.0, 0.0, 5.0);
        let plane = Plane::new(Vec3::new(0.5, 0.0, 0.0), Vec3::RIGHT);

        let ClipResult::One(clipped) = clip_triangle(&triangle, eye(), &plane) else {
            panic!("expected a single triangle");
        };
        assert_faces_eye(&clipped);
    }
}

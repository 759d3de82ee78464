//! Clipping planes.

use crate::math::vec3::Vec3;

/// A plane defined by a point on the plane and its normal vector.
/// The normal points toward the "inside" (visible) half-space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal }
    }

    /// Returns the signed distance from a point to this plane.
    /// Positive = inside (same side as normal), Negative = outside.
    #[inline]
    pub fn signed_distance(&self, position: Vec3) -> f64 {
        (position - self.point).dot(self.normal)
    }

    /// Points on the plane count as inside.
    #[inline]
    pub fn contains(&self, position: Vec3) -> bool {
        self.signed_distance(position) >= 0.0
    }

    /// Intersection of the ray `origin + direction * t` with the plane.
    ///
    /// Returns `None` when the ray is parallel to the plane.
    pub fn ray_intersection(&self, origin: Vec3, direction: Vec3) -> Option<Vec3> {
        let denominator = direction.dot(self.normal);
        if denominator == 0.0 {
            return None;
        }

        let t = (self.point - origin).dot(self.normal) / denominator;
        Some(origin + direction * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn signed_distance_is_positive_on_normal_side() {
        let plane = Plane::new(Vec3::new(0.0, 0.0, 1.0), Vec3::FORWARD);
        assert_relative_eq!(plane.signed_distance(Vec3::new(5.0, 3.0, 4.0)), 3.0);
        assert!(plane.signed_distance(Vec3::ZERO) < 0.0);
        assert!(plane.contains(Vec3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn ray_hits_plane() {
        let plane = Plane::new(Vec3::new(0.0, 2.0, 0.0), Vec3::UP);
        let hit = plane
            .ray_intersection(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0).normalize())
            .unwrap();
        assert_relative_eq!(hit.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(hit.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_ray_misses() {
        let plane = Plane::new(Vec3::ZERO, Vec3::UP);
        assert_eq!(plane.ray_intersection(Vec3::UP, Vec3::RIGHT), None);
    }
}

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::pool::ObjectMaterialId;

/// A world-space triangle submitted for one frame. Vertices and UVs are stored
/// by value; the renderer never keeps triangles past the frame they were
/// submitted in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderTriangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub uv0: Vec2,
    pub uv1: Vec2,
    pub uv2: Vec2,
    /// Face normal used for back-face culling.
    pub normal: Vec3,
    pub material: ObjectMaterialId,
    /// 0 = shade by distance to the player light, >0 = fixed shading value.
    pub fade_percent: f64,
}

impl RenderTriangle {
    /// Builds a triangle whose normal follows its winding:
    /// `(v1 - v0) × (v2 - v0)`, normalized.
    pub fn new(
        [v0, v1, v2]: [Vec3; 3],
        [uv0, uv1, uv2]: [Vec2; 3],
        material: ObjectMaterialId,
        fade_percent: f64,
    ) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize();
        Self::with_normal([v0, v1, v2], [uv0, uv1, uv2], normal, material, fade_percent)
    }

    /// Builds a triangle with a caller-supplied face normal.
    pub fn with_normal(
        [v0, v1, v2]: [Vec3; 3],
        [uv0, uv1, uv2]: [Vec2; 3],
        normal: Vec3,
        material: ObjectMaterialId,
        fade_percent: f64,
    ) -> Self {
        Self {
            v0,
            v1,
            v2,
            uv0,
            uv1,
            uv2,
            normal,
            material,
            fade_percent,
        }
    }

    /// Unnormalized normal implied by the vertex winding.
    #[inline]
    pub fn winding_normal(&self) -> Vec3 {
        (self.v1 - self.v0).cross(self.v2 - self.v0)
    }

    /// Same triangle with the vertex and UV order reversed.
    pub fn reversed(&self) -> Self {
        Self {
            v0: self.v2,
            v2: self.v0,
            uv0: self.uv2,
            uv2: self.uv0,
            ..*self
        }
    }

    #[inline]
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    #[inline]
    pub fn uvs(&self) -> [Vec2; 3] {
        [self.uv0, self.uv1, self.uv2]
    }
}

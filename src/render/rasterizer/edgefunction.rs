//! Edge function-based triangle rasterization.
//!
//! This module implements triangle rasterization using the edge function
//! algorithm. Each pixel center in the triangle's screen-space bounding box is
//! tested against the three edge equations.
//!
//! # Edge Function
//!
//! For an edge from point A to point B, the edge function at point P is:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! A pixel is inside when all three edge functions share the sign of the
//! triangle's signed area. Zero counts as inside, so pixels on a shared edge
//! are covered by both neighbours and the depth test picks one.
//!
//! # Perspective Correction
//!
//! Screen-space barycentrics are not linear in world space. Depth is
//! recovered as `1 / Σ(λ / z)` and UVs as `Σ(λ · uv / z) / Σ(λ / z)`, where
//! `z` is each vertex's view-space depth.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use super::shader::PixelShader;
use super::{lower_bounded_pixel, upper_bounded_pixel};
use crate::light::{shading_percent, PaletteLighting};
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::render::framebuffer::FrameBuffer;

/// A triangle after projection, carrying what the pixel loop needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTriangle {
    /// Pixel-space positions.
    pub points: [Vec2; 3],
    /// `1 / z` of each vertex's view-space depth.
    pub z_recip: [f64; 3],
    /// Each vertex UV divided by its view-space depth.
    pub uv_over_z: [Vec2; 3],
    /// World-space positions, for distance shading.
    pub world: [Vec3; 3],
    pub fade_percent: f64,
}

impl ScreenTriangle {
    /// Builds from pixel positions, view-space depths and UVs.
    pub fn new(
        points: [Vec2; 3],
        view_z: [f64; 3],
        uvs: [Vec2; 3],
        world: [Vec3; 3],
        fade_percent: f64,
    ) -> Self {
        let z_recip = view_z.map(|z| 1.0 / z);
        Self {
            points,
            z_recip,
            uv_over_z: [uvs[0] * z_recip[0], uvs[1] * z_recip[1], uvs[2] * z_recip[2]],
            world,
            fade_percent,
        }
    }

    /// Perspective-correct depth at barycentric `lambda`.
    #[inline]
    pub fn depth(&self, lambda: [f64; 3]) -> f64 {
        1.0 / self.z_recip_sum(lambda)
    }

    /// Perspective-correct UV at barycentric `lambda`.
    #[inline]
    pub fn uv(&self, lambda: [f64; 3]) -> Vec2 {
        let [u, v, w] = lambda;
        let [a, b, c] = self.uv_over_z;
        (a * u + b * v + c * w) * (1.0 / self.z_recip_sum(lambda))
    }

    /// Screen-space interpolation of the world position.
    #[inline]
    pub fn world_point(&self, lambda: [f64; 3]) -> Vec3 {
        let [u, v, w] = lambda;
        let [a, b, c] = self.world;
        a * u + b * v + c * w
    }

    #[inline]
    fn z_recip_sum(&self, [u, v, w]: [f64; 3]) -> f64 {
        u * self.z_recip[0] + v * self.z_recip[1] + w * self.z_recip[2]
    }
}

/// Computes the edge function value for point P relative to edge (A -> B).
///
/// Positive when P is on one side of AB, negative on the other, zero on the
/// edge.
#[inline]
fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f64 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Barycentric weights relative to `origin`, precomputed from the two edges
/// leaving it.
struct Barycentric {
    origin: Vec2,
    edge0: Vec2,
    edge1: Vec2,
    dot00: f64,
    dot01: f64,
    dot11: f64,
    inv_denominator: f64,
}

impl Barycentric {
    fn new([p0, p1, p2]: [Vec2; 3]) -> Option<Self> {
        let edge0 = p1 - p0;
        let edge1 = p2 - p0;
        let dot00 = edge0.dot(edge0);
        let dot01 = edge0.dot(edge1);
        let dot11 = edge1.dot(edge1);
        let denominator = dot00 * dot11 - dot01 * dot01;
        if denominator == 0.0 {
            return None;
        }

        Some(Self {
            origin: p0,
            edge0,
            edge1,
            dot00,
            dot01,
            dot11,
            inv_denominator: 1.0 / denominator,
        })
    }

    /// `[u, v, w]` with `u + v + w = 1`.
    #[inline]
    fn at(&self, p: Vec2) -> [f64; 3] {
        let offset = p - self.origin;
        let dot20 = offset.dot(self.edge0);
        let dot21 = offset.dot(self.edge1);
        let v = (self.dot11 * dot20 - self.dot01 * dot21) * self.inv_denominator;
        let w = (self.dot00 * dot21 - self.dot01 * dot20) * self.inv_denominator;
        [1.0 - v - w, v, w]
    }
}

/// Rasterize a triangle using the provided pixel shader.
///
/// This handles all the common rasterization logic:
/// - Bounding box computation and clipping
/// - Edge function evaluation for either winding
/// - Barycentric coordinates, depth and UV
/// - Strict depth testing
/// - Light table shading
///
/// The shader is called for each covered pixel that passes the depth test.
/// A discarded pixel writes neither color nor depth.
///
/// Returns the number of pixels written.
pub fn rasterize_with_shader<S: PixelShader>(
    triangle: &ScreenTriangle,
    shader: &S,
    lighting: &PaletteLighting,
    eye_xz: Vec2,
    buffer: &mut FrameBuffer,
) -> usize {
    let [p0, p1, p2] = triangle.points;

    // ─────────────────────────────────────────────────────────────────────
    // Step 1: Compute bounding box
    // ─────────────────────────────────────────────────────────────────────
    let width = buffer.width();
    let height = buffer.height();
    let x_start = lower_bounded_pixel(p0.x.min(p1.x).min(p2.x), width);
    let x_end = upper_bounded_pixel(p0.x.max(p1.x).max(p2.x), width);
    let y_start = lower_bounded_pixel(p0.y.min(p1.y).min(p2.y), height);
    let y_end = upper_bounded_pixel(p0.y.max(p1.y).max(p2.y), height);
    if x_start >= x_end || y_start >= y_end {
        return 0;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Step 2: Compute signed area (2x triangle area)
    // ─────────────────────────────────────────────────────────────────────
    let area = edge_function(p0, p1, p2);
    if area == 0.0 || !area.is_finite() {
        return 0;
    }
    let Some(barycentric) = Barycentric::new(triangle.points) else {
        return 0;
    };

    // ─────────────────────────────────────────────────────────────────────
    // Step 3: Iterate over all pixels in bounding box
    // ─────────────────────────────────────────────────────────────────────
    let mut written = 0;
    for y in y_start..y_end {
        for x in x_start..x_end {
            // Sample at pixel center
            let p = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);

            let e0 = edge_function(p1, p2, p);
            let e1 = edge_function(p2, p0, p);
            let e2 = edge_function(p0, p1, p);
            let inside = if area > 0.0 {
                e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0
            } else {
                e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0
            };
            if !inside {
                continue;
            }

            let lambda = barycentric.at(p);
            let depth = triangle.depth(lambda);
            let index = y as usize * width as usize + x as usize;
            if !buffer.depth_test(index, depth) {
                continue;
            }

            let uv = triangle.uv(lambda);
            let Some(texel) = shader.shade(uv.x, uv.y) else {
                continue;
            };

            let shading = shading_percent(
                triangle.fade_percent,
                triangle.world_point(lambda).xz(),
                eye_xz,
            );
            buffer.write(index, depth, lighting.color(texel, shading));
            written += 1;
        }
    }

    written
}

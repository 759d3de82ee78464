//! Triangle rasterization.
//!
//! [`RasterContext`] projects clipped world-space triangles to the screen and
//! [`rasterize_triangles`] resolves each triangle's material, picks a
//! [`PixelShader`](shader::PixelShader) for it and hands it to the edge
//! function rasterizer.

pub mod edgefunction;
pub mod shader;

pub use edgefunction::{rasterize_with_shader, ScreenTriangle};
pub use shader::{AlphaTestShader, LayeredTextureShader, PixelShader, SingleTextureShader};

use super::framebuffer::FrameBuffer;
use crate::camera::RenderCamera;
use crate::light::PaletteLighting;
use crate::material::ObjectMaterial;
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec4::Vec4;
use crate::pool::{ObjectMaterialId, ObjectTextureId, Pool};
use crate::projection::{ndc_to_screen, Projection};
use crate::texture::{ObjectTexture, TexelGrid};
use crate::triangle::RenderTriangle;

/// First pixel whose center is at or right of `value`, clamped to `[0, dim]`.
#[inline]
pub fn lower_bounded_pixel(value: f64, dim: u32) -> i32 {
    ((value - 0.5).ceil() as i64).clamp(0, dim as i64) as i32
}

/// One past the last pixel whose center is at or left of `value`, clamped to
/// `[0, dim]`.
#[inline]
pub fn upper_bounded_pixel(value: f64, dim: u32) -> i32 {
    ((value + 0.5).floor() as i64).clamp(0, dim as i64) as i32
}

/// Per-pass rasterization counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Triangles handed to the pixel loop.
    pub triangles_drawn: usize,
    /// Triangles dropped because their material or textures were missing.
    pub skipped_triangles: usize,
    pub pixels_written: usize,
}

impl std::ops::AddAssign for RasterStats {
    fn add_assign(&mut self, rhs: Self) {
        self.triangles_drawn += rhs.triangles_drawn;
        self.skipped_triangles += rhs.skipped_triangles;
        self.pixels_written += rhs.pixels_written;
    }
}

/// Camera-dependent transform state shared by every triangle in a frame.
pub struct RasterContext {
    view: Mat4,
    projection: Mat4,
    eye_xz: Vec2,
    y_shear: f64,
    width: f64,
    height: f64,
}

impl RasterContext {
    pub fn new(camera: &RenderCamera, width: u32, height: u32) -> Self {
        let eye = camera.eye();
        Self {
            view: Mat4::view(eye, camera.forward, camera.right, camera.up),
            projection: Projection::for_camera(camera).matrix(),
            eye_xz: eye.xz(),
            y_shear: camera.y_shear,
            width: width as f64,
            height: height as f64,
        }
    }

    pub fn eye_xz(&self) -> Vec2 {
        self.eye_xz
    }

    /// World space → view → clip → NDC → pixels.
    ///
    /// The triangle must already be clipped against the near plane, so every
    /// view-space depth is positive.
    pub fn project(&self, triangle: &RenderTriangle) -> ScreenTriangle {
        let world = triangle.vertices();
        let mut points = [Vec2::ZERO; 3];
        let mut view_z = [0.0; 3];
        for (i, vertex) in world.iter().enumerate() {
            let view = self.view * Vec4::from(*vertex);
            let clip = self.projection * view;
            let screen = ndc_to_screen(clip.to_ndc(), self.y_shear, self.width, self.height);
            points[i] = Vec2::new(screen.x, screen.y);
            view_z[i] = view.z;
        }

        ScreenTriangle::new(points, view_z, triangle.uvs(), world, triangle.fade_percent)
    }
}

/// Object pools the rasterizer reads materials and textures from.
pub struct MaterialSource<'a> {
    pub materials: &'a Pool<ObjectMaterialId, ObjectMaterial>,
    pub textures: &'a Pool<ObjectTextureId, ObjectTexture>,
}

impl MaterialSource<'_> {
    fn grid(&self, id: ObjectTextureId) -> Option<&TexelGrid> {
        self.textures.get(id)?.as_texels8()
    }
}

/// Rasterizes already culled and clipped triangles in order.
///
/// With `alpha_test`, pixels whose final texel is 0 are discarded.
pub fn rasterize_triangles(
    triangles: &[RenderTriangle],
    source: &MaterialSource,
    lighting: &PaletteLighting,
    context: &RasterContext,
    alpha_test: bool,
    buffer: &mut FrameBuffer,
) -> RasterStats {
    let mut stats = RasterStats::default();
    let eye_xz = context.eye_xz();

    for triangle in triangles {
        let Some(material) = source.materials.get(triangle.material) else {
            stats.skipped_triangles += 1;
            continue;
        };
        let Some(base) = source.grid(material.base()) else {
            stats.skipped_triangles += 1;
            continue;
        };
        let layer = match material.layer() {
            Some(id) => match source.grid(id) {
                Some(grid) => Some(grid),
                None => {
                    stats.skipped_triangles += 1;
                    continue;
                }
            },
            None => None,
        };

        let screen = context.project(triangle);
        let written = match (layer, alpha_test) {
            (None, false) => rasterize_with_shader(
                &screen,
                &SingleTextureShader::new(base),
                lighting,
                eye_xz,
                buffer,
            ),
            (None, true) => rasterize_with_shader(
                &screen,
                &AlphaTestShader(SingleTextureShader::new(base)),
                lighting,
                eye_xz,
                buffer,
            ),
            (Some(layer), false) => rasterize_with_shader(
                &screen,
                &LayeredTextureShader::new(base, layer),
                lighting,
                eye_xz,
                buffer,
            ),
            (Some(layer), true) => rasterize_with_shader(
                &screen,
                &AlphaTestShader(LayeredTextureShader::new(base, layer)),
                lighting,
                eye_xz,
                buffer,
            ),
        };

        stats.triangles_drawn += 1;
        stats.pixels_written += written;
    }

    stats
}

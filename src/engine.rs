//! Core rendering engine.
//!
//! [`SoftwareRenderer`] is the main entry point. It owns the resource pools,
//! the depth buffer and the per-class clipping scratch, and runs the frame
//! pipeline: clear, cull and clip each triangle class, then rasterize it.
//!
//! # Lifecycle
//!
//! ```text
//! new() ──init()──▶ initialized ──resize()──▶ initialized ──shutdown()──▶ new()
//! ```
//!
//! Resource calls work in any state. Frame and debug draws require an
//! initialized renderer.

use crate::buffers::{AttributeBuffer, IndexBuffer, VertexBuffer};
use crate::camera::{self, RenderCamera};
use crate::clipper::{ClipScratch, Frustum};
use crate::colors;
use crate::error::{RenderError, Result};
use crate::light::{LightTable, PaletteLighting};
use crate::material::ObjectMaterial;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::pool::{
    AttributeBufferId, IndexBufferId, ObjectMaterialId, ObjectTextureId, Pool, PoolId, PoolLimits,
    VertexBufferId,
};
use crate::profiler::ProfilerData;
use crate::render::{rasterize_triangles, MaterialSource, RasterContext, RasterStats, RenderTarget};
use crate::settings::{RenderFrameSettings, RenderInitSettings};
use crate::texture::{LockedTexture, ObjectTexture, TexelGrid, TextureAsset};
use crate::triangle::RenderTriangle;

/// The three triangle lists of a frame, drawn in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleClass {
    OpaqueVoxels,
    AlphaTestedVoxels,
    Entities,
}

impl TriangleClass {
    pub const ALL: [TriangleClass; 3] = [
        TriangleClass::OpaqueVoxels,
        TriangleClass::AlphaTestedVoxels,
        TriangleClass::Entities,
    ];

    /// Whether texel 0 is discarded for this class.
    pub fn alpha_test(self) -> bool {
        !matches!(self, TriangleClass::OpaqueVoxels)
    }
}

fn pool_exhausted<I: PoolId>() -> RenderError {
    log::error!("Couldn't allocate {} ID.", I::KIND);
    RenderError::PoolExhausted { pool: I::KIND }
}

fn invalid_handle<I: PoolId>(id: I) -> RenderError {
    log::error!("Invalid {} ID {:?}.", I::KIND, id);
    RenderError::InvalidHandle {
        kind: I::KIND,
        id: id.index(),
    }
}

/// Overwrites `dst` with `src` if their lengths agree.
fn populate<I: PoolId, T: Copy>(id: I, dst: &mut [T], src: &[T]) -> Result<()> {
    if dst.len() != src.len() {
        log::error!(
            "Mismatched {} sizes for ID {:?}: {} != {}.",
            I::KIND,
            id,
            src.len(),
            dst.len()
        );
        return Err(RenderError::SizeMismatch {
            kind: I::KIND,
            id: id.index(),
            expected: dst.len(),
            actual: src.len(),
        });
    }

    dst.copy_from_slice(src);
    Ok(())
}

fn free_slot<I: PoolId, T>(pool: &mut Pool<I, T>, id: I) {
    if pool.free(id).is_none() {
        log::warn!("Tried to free unallocated {} ID {:?}.", I::KIND, id);
    }
}

fn expect_texels8(
    textures: &Pool<ObjectTextureId, ObjectTexture>,
    id: ObjectTextureId,
) -> Result<&TexelGrid> {
    let texture = textures.get(id).ok_or_else(|| invalid_handle(id))?;
    texture.as_texels8().ok_or_else(|| {
        log::error!("Object texture ID {id} is not an 8-bit texture.");
        RenderError::UnexpectedTextureKind {
            id: id.index(),
            expected: "8-bit",
        }
    })
}

fn expect_palette(
    textures: &Pool<ObjectTextureId, ObjectTexture>,
    id: ObjectTextureId,
) -> Result<&[u32]> {
    let texture = textures.get(id).ok_or_else(|| invalid_handle(id))?;
    texture.as_palette().ok_or_else(|| {
        log::error!("Object texture ID {id} is not a palette texture.");
        RenderError::UnexpectedTextureKind {
            id: id.index(),
            expected: "palette",
        }
    })
}

pub struct SoftwareRenderer {
    vertex_buffers: Pool<VertexBufferId, VertexBuffer>,
    attribute_buffers: Pool<AttributeBufferId, AttributeBuffer>,
    index_buffers: Pool<IndexBufferId, IndexBuffer>,
    textures: Pool<ObjectTextureId, ObjectTexture>,
    materials: Pool<ObjectMaterialId, ObjectMaterial>,
    target: Option<RenderTarget>,
    /// One per [`TriangleClass`], in draw order.
    scratch: [ClipScratch; 3],
    profiler: ProfilerData,
    last_stats: RasterStats,
}

impl SoftwareRenderer {
    pub fn new() -> Self {
        Self::with_limits(PoolLimits::default())
    }

    /// Renderer whose pools each hold at most `limits.max_slots` resources.
    pub fn with_limits(limits: PoolLimits) -> Self {
        Self {
            vertex_buffers: Pool::new(limits),
            attribute_buffers: Pool::new(limits),
            index_buffers: Pool::new(limits),
            textures: Pool::new(limits),
            materials: Pool::new(limits),
            target: None,
            scratch: Default::default(),
            profiler: ProfilerData::default(),
            last_stats: RasterStats::default(),
        }
    }

    /// Allocates the depth buffer.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn init(&mut self, settings: &RenderInitSettings) {
        log::debug!("Initializing software renderer at {}x{}.", settings.width, settings.height);
        self.target = Some(RenderTarget::new(settings.width, settings.height));
    }

    pub fn is_initialized(&self) -> bool {
        self.target.is_some()
    }

    /// Reallocates the depth buffer; every depth becomes `+inf`.
    ///
    /// # Panics
    /// Panics if the renderer is not initialized or a dimension is zero.
    pub fn resize(&mut self, width: u32, height: u32) {
        let Some(target) = self.target.as_mut() else {
            panic!("renderer must be initialized before resizing");
        };
        target.resize(width, height);
    }

    /// Drops the depth buffer and every pooled resource.
    pub fn shutdown(&mut self) {
        self.target = None;
        self.vertex_buffers.clear();
        self.attribute_buffers.clear();
        self.index_buffers.clear();
        self.textures.clear();
        self.materials.clear();
        for scratch in &mut self.scratch {
            scratch.clear();
        }
        self.profiler = ProfilerData::default();
        self.last_stats = RasterStats::default();
    }

    /// `(width, height)` of the render target, if initialized.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.target.as_ref().map(|t| (t.width(), t.height()))
    }

    /// Depth of every pixel from the last frame; empty when uninitialized.
    pub fn depth_buffer(&self) -> &[f64] {
        self.target
            .as_ref()
            .map(RenderTarget::depth_buffer)
            .unwrap_or(&[])
    }

    // ─────────────────────────────────────────────────────────────────────
    // Geometry buffers
    // ─────────────────────────────────────────────────────────────────────

    pub fn try_create_vertex_buffer(
        &mut self,
        vertex_count: usize,
        components_per_vertex: usize,
    ) -> Result<VertexBufferId> {
        let buffer = VertexBuffer::new(vertex_count, components_per_vertex);
        self.vertex_buffers
            .try_alloc(buffer)
            .ok_or_else(pool_exhausted::<VertexBufferId>)
    }

    pub fn try_create_attribute_buffer(
        &mut self,
        vertex_count: usize,
        components_per_vertex: usize,
    ) -> Result<AttributeBufferId> {
        let buffer = AttributeBuffer::new(vertex_count, components_per_vertex);
        self.attribute_buffers
            .try_alloc(buffer)
            .ok_or_else(pool_exhausted::<AttributeBufferId>)
    }

    pub fn try_create_index_buffer(&mut self, index_count: usize) -> Result<IndexBufferId> {
        let buffer = IndexBuffer::new(index_count);
        self.index_buffers
            .try_alloc(buffer)
            .ok_or_else(pool_exhausted::<IndexBufferId>)
    }

    pub fn populate_vertex_buffer(&mut self, id: VertexBufferId, vertices: &[f64]) -> Result<()> {
        let buffer = self.vertex_buffers.get_mut(id).ok_or_else(|| invalid_handle(id))?;
        populate(id, &mut buffer.vertices, vertices)
    }

    pub fn populate_attribute_buffer(
        &mut self,
        id: AttributeBufferId,
        attributes: &[f64],
    ) -> Result<()> {
        let buffer = self
            .attribute_buffers
            .get_mut(id)
            .ok_or_else(|| invalid_handle(id))?;
        populate(id, &mut buffer.attributes, attributes)
    }

    pub fn populate_index_buffer(&mut self, id: IndexBufferId, indices: &[i32]) -> Result<()> {
        let buffer = self.index_buffers.get_mut(id).ok_or_else(|| invalid_handle(id))?;
        populate(id, &mut buffer.indices, indices)
    }

    pub fn vertex_buffer(&self, id: VertexBufferId) -> Option<&[f64]> {
        self.vertex_buffers.get(id).map(|b| b.vertices.as_slice())
    }

    pub fn attribute_buffer(&self, id: AttributeBufferId) -> Option<&[f64]> {
        self.attribute_buffers.get(id).map(|b| b.attributes.as_slice())
    }

    pub fn index_buffer(&self, id: IndexBufferId) -> Option<&[i32]> {
        self.index_buffers.get(id).map(|b| b.indices.as_slice())
    }

    pub fn free_vertex_buffer(&mut self, id: VertexBufferId) {
        free_slot(&mut self.vertex_buffers, id);
    }

    pub fn free_attribute_buffer(&mut self, id: AttributeBufferId) {
        free_slot(&mut self.attribute_buffers, id);
    }

    pub fn free_index_buffer(&mut self, id: IndexBufferId) {
        free_slot(&mut self.index_buffers, id);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Textures and materials
    // ─────────────────────────────────────────────────────────────────────

    /// Zero-filled texture. A palette texture holds `width * height` colors.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn try_create_object_texture(
        &mut self,
        width: u32,
        height: u32,
        is_palette: bool,
    ) -> Result<ObjectTextureId> {
        let texture = if is_palette {
            assert!(
                width > 0 && height > 0,
                "texture dimensions must be positive (got {width}x{height})"
            );
            ObjectTexture::palette(width as usize * height as usize)
        } else {
            ObjectTexture::texels8(width, height)
        };

        self.textures
            .try_alloc(texture)
            .ok_or_else(pool_exhausted::<ObjectTextureId>)
    }

    /// Copies a decoded asset into a new 8-bit texture.
    ///
    /// True-color assets are rejected without allocating a slot.
    ///
    /// # Panics
    /// Panics if a paletted asset's texel count doesn't match its dimensions.
    pub fn try_create_object_texture_from_asset(
        &mut self,
        asset: &TextureAsset,
    ) -> Result<ObjectTextureId> {
        match asset {
            TextureAsset::Paletted {
                width,
                height,
                texels,
            } => {
                let mut grid = TexelGrid::new(*width, *height);
                assert_eq!(
                    texels.len(),
                    grid.texels().len(),
                    "texture asset texel count doesn't match {width}x{height}"
                );
                grid.texels_mut().copy_from_slice(texels);
                self.textures
                    .try_alloc(ObjectTexture::Texels8(grid))
                    .ok_or_else(pool_exhausted::<ObjectTextureId>)
            }
            TextureAsset::TrueColor { width, height, .. } => {
                log::warn!("True color texture (dimensions {width}x{height}) not supported.");
                Err(RenderError::UnsupportedTextureFormat {
                    width: *width,
                    height: *height,
                })
            }
        }
    }

    /// Material sampling a single 8-bit texture.
    pub fn try_create_object_material(&mut self, base: ObjectTextureId) -> Result<ObjectMaterialId> {
        expect_texels8(&self.textures, base)?;
        self.materials
            .try_alloc(ObjectMaterial::Single(base))
            .ok_or_else(pool_exhausted::<ObjectMaterialId>)
    }

    /// Material sampling `layer` over `base`.
    pub fn try_create_object_material_layered(
        &mut self,
        base: ObjectTextureId,
        layer: ObjectTextureId,
    ) -> Result<ObjectMaterialId> {
        expect_texels8(&self.textures, base)?;
        expect_texels8(&self.textures, layer)?;
        self.materials
            .try_alloc(ObjectMaterial::Layered { base, layer })
            .ok_or_else(pool_exhausted::<ObjectMaterialId>)
    }

    /// Frees a texture. Materials referencing it are left dangling and are
    /// skipped when drawn.
    pub fn free_object_texture(&mut self, id: ObjectTextureId) {
        free_slot(&mut self.textures, id);
    }

    pub fn free_object_material(&mut self, id: ObjectMaterialId) {
        free_slot(&mut self.materials, id);
    }

    /// Mutable access to a texture's texels or palette colors.
    pub fn lock_object_texture(&mut self, id: ObjectTextureId) -> Result<LockedTexture<'_>> {
        self.textures
            .get_mut(id)
            .map(ObjectTexture::lock)
            .ok_or_else(|| invalid_handle(id))
    }

    /// Ends a [`lock_object_texture`](Self::lock_object_texture). Writes are
    /// already visible, so this does nothing.
    pub fn unlock_object_texture(&mut self, _id: ObjectTextureId) {}

    pub fn try_get_object_texture_dims(&self, id: ObjectTextureId) -> Option<(u32, u32)> {
        self.textures.get(id).map(ObjectTexture::dimensions)
    }

    pub fn try_get_object_material_textures(&self, id: ObjectMaterialId) -> Option<ObjectMaterial> {
        self.materials.get(id).copied()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────

    /// Whether a UV on an entity's billboard counts as a hit.
    ///
    /// Pixel-perfect selection looks at the texel under `uv` and returns
    /// `None` when `uv` falls outside the texture. Otherwise any UV inside
    /// `[0, 1]²` is a hit.
    pub fn try_get_entity_selection_data(
        &self,
        uv: Vec2,
        texture: ObjectTextureId,
        pixel_perfect: bool,
    ) -> Option<bool> {
        if !pixel_perfect {
            return Some((0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y));
        }

        let grid = self.textures.get(texture)?.as_texels8()?;
        let x = (uv.x * grid.width() as f64) as i64;
        let y = (uv.y * grid.height() as f64) as i64;
        grid.get(x, y).map(|texel| texel != 0)
    }

    /// World-space ray through a screen point, for picking.
    pub fn screen_point_to_ray(
        &self,
        x_percent: f64,
        y_percent: f64,
        direction: Vec3,
        fov_y: f64,
        aspect_ratio: f64,
    ) -> Vec3 {
        camera::screen_point_to_ray(x_percent, y_percent, direction, fov_y, aspect_ratio)
    }

    pub fn profiler_data(&self) -> ProfilerData {
        self.profiler
    }

    /// Rasterization counters summed over the last frame's passes.
    pub fn last_frame_stats(&self) -> RasterStats {
        self.last_stats
    }

    // ─────────────────────────────────────────────────────────────────────
    // Frames
    // ─────────────────────────────────────────────────────────────────────

    /// Renders one frame into `output`.
    ///
    /// Clears to `settings.clear_color`, then draws opaque voxels, alpha-tested
    /// voxels and entities in that order against one depth buffer.
    ///
    /// # Errors
    /// Fails without touching `output` if the palette or light table handle is
    /// missing or of the wrong kind.
    ///
    /// # Panics
    /// Panics if the renderer is not initialized or `output` is not exactly
    /// `width * height` pixels.
    pub fn submit_frame(
        &mut self,
        camera: &RenderCamera,
        opaque_voxels: &[RenderTriangle],
        alpha_tested_voxels: &[RenderTriangle],
        entities: &[RenderTriangle],
        settings: &RenderFrameSettings,
        output: &mut [u32],
    ) -> Result<()> {
        let palette = expect_palette(&self.textures, settings.palette)?;
        let light_table = expect_texels8(&self.textures, settings.light_table)?;
        let lighting = PaletteLighting::new(palette, LightTable::new(light_table));

        let Some(target) = self.target.as_mut() else {
            panic!("renderer must be initialized before submitting frames");
        };
        assert_eq!(
            output.len(),
            target.pixel_count(),
            "output buffer doesn't match {}x{}",
            target.width(),
            target.height()
        );

        let (width, height) = (target.width(), target.height());
        let frustum = Frustum::from_camera(camera);
        let context = RasterContext::new(camera, width, height);
        let source = MaterialSource {
            materials: &self.materials,
            textures: &self.textures,
        };

        let mut buffer = target.as_framebuffer(output);
        buffer.clear(settings.clear_color);

        let lists = [opaque_voxels, alpha_tested_voxels, entities];
        let mut stats = RasterStats::default();
        let mut submitted = 0;
        let mut visible = 0;
        for ((class, triangles), scratch) in TriangleClass::ALL
            .into_iter()
            .zip(lists)
            .zip(self.scratch.iter_mut())
        {
            let clipped = scratch.process(triangles, &frustum);
            visible += clipped.len();
            stats += rasterize_triangles(
                clipped,
                &source,
                &lighting,
                &context,
                class.alpha_test(),
                &mut buffer,
            );
            submitted += scratch.submitted();
        }

        if stats.skipped_triangles > 0 {
            log::warn!(
                "Skipped {} triangle(s) with unresolved materials.",
                stats.skipped_triangles
            );
        }

        self.profiler = ProfilerData {
            width,
            height,
            thread_count: 1,
            potentially_visible_triangles: submitted,
            visible_triangles: visible,
            visible_lights: 0,
        };
        self.last_stats = stats;
        log::debug!("Frame: {}, {} pixel(s) written.", self.profiler, stats.pixels_written);
        Ok(())
    }

    /// Presentation is done by the caller with the buffer it passed in.
    pub fn present(&mut self) {}

    /// Fills `output` with each pixel's view direction as RGB, negative
    /// components clamped to zero.
    ///
    /// # Panics
    /// Panics if the renderer is not initialized or `output` is the wrong size.
    pub fn draw_debug_rgb(&mut self, camera: &RenderCamera, output: &mut [u32]) {
        let Some(target) = self.target.as_mut() else {
            panic!("renderer must be initialized before drawing");
        };
        assert_eq!(
            output.len(),
            target.pixel_count(),
            "output buffer doesn't match {}x{}",
            target.width(),
            target.height()
        );

        let (width, height) = (target.width(), target.height());
        let mut buffer = target.as_framebuffer(output);
        let channel = |value: f64| (value.max(0.0) * 255.0) as u8;
        for y in 0..height {
            let y_percent = (f64::from(y) + 0.5) / f64::from(height);
            for x in 0..width {
                let x_percent = (f64::from(x) + 0.5) / f64::from(width);
                let direction = camera.pixel_direction(x_percent, y_percent);
                let color = colors::rgb(channel(direction.x), channel(direction.y), channel(direction.z));
                buffer.set_pixel(x, y, color);
            }
        }
    }
}

impl Default for SoftwareRenderer {
    fn default() -> Self {
        Self::new()
    }
}

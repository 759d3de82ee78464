//! A CPU-based software rasterizer with palette lighting.
//!
//! Each frame the caller hands over world-space triangle lists and a camera.
//! The renderer back-face culls and frustum clips them, rasterizes them with
//! perspective-correct texturing into a depth-tested buffer, and shades every
//! pixel through a light table and palette. All rendering is done on the CPU
//! into a caller-owned ARGB buffer; presenting it is up to the caller.
//!
//! # Quick Start
//!
//! ```ignore
//! use palettized::prelude::*;
//!
//! let mut renderer = SoftwareRenderer::new();
//! renderer.init(&RenderInitSettings::new(320, 200));
//! let palette = renderer.try_create_object_texture(256, 1, true)?;
//! let light_table = renderer.try_create_object_texture(256, 13, false)?;
//! // ... fill textures, create materials, build triangles ...
//! let mut output = vec![0u32; 320 * 200];
//! renderer.submit_frame(&camera, &opaque, &alpha_tested, &entities,
//!     &RenderFrameSettings::new(palette, light_table), &mut output)?;
//! ```

// Public API - exposed to library consumers
pub mod buffers;
pub mod camera;
pub mod clipper;
pub mod colors;
pub mod engine;
pub mod error;
pub mod light;
pub mod material;
pub mod math;
pub mod pool;
pub mod profiler;
pub mod projection;
pub mod render;
pub mod settings;
pub mod texture;
pub mod triangle;

// Re-export commonly needed types at crate root for convenience
pub use engine::{SoftwareRenderer, TriangleClass};
pub use error::{RenderError, Result};
pub use projection::Projection;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use palettized::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{ChunkCoord, RenderCamera, CHUNK_DIM};

    // Engine
    pub use crate::engine::{SoftwareRenderer, TriangleClass};
    pub use crate::error::{RenderError, Result};
    pub use crate::profiler::ProfilerData;
    pub use crate::settings::{RenderFrameSettings, RenderInitSettings};

    // Resources
    pub use crate::material::ObjectMaterial;
    pub use crate::pool::{
        AttributeBufferId, IndexBufferId, ObjectMaterialId, ObjectTextureId, PoolLimits,
        VertexBufferId,
    };
    pub use crate::texture::{LockedTexture, ObjectTexture, TextureAsset};
    pub use crate::triangle::RenderTriangle;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::clipper::{ClipScratch, Frustum};
    pub use crate::light::{LightTable, PaletteLighting};
    pub use crate::render::rasterizer::{rasterize_with_shader, SingleTextureShader};
    pub use crate::render::{FrameBuffer, ScreenTriangle};
    pub use crate::texture::TexelGrid;
}

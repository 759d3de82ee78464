//! Pixel pipeline: frame buffer views, the owned depth target and the
//! rasterizer.

pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{
    rasterize_triangles, MaterialSource, PixelShader, RasterContext, RasterStats, ScreenTriangle,
};
pub use renderer::RenderTarget;

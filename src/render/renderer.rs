//! Render target owned by the renderer.
//!
//! The color buffer belongs to the caller and is borrowed once per frame;
//! [`RenderTarget`] owns the matching depth buffer and its dimensions.

use super::framebuffer::FrameBuffer;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderTarget {
    depth_buffer: Vec<f64>,
    width: u32,
    height: u32,
}

impl RenderTarget {
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "render target dimensions must be positive (got {width}x{height})"
        );
        Self {
            depth_buffer: vec![f64::INFINITY; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Reallocate the depth buffer for new dimensions. Contents are reset.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels the caller's color buffer must hold.
    pub fn pixel_count(&self) -> usize {
        self.depth_buffer.len()
    }

    pub fn depth_buffer(&self) -> &[f64] {
        &self.depth_buffer
    }

    /// Pair the caller's color buffer with the depth buffer.
    pub fn as_framebuffer<'a>(&'a mut self, color_buffer: &'a mut [u32]) -> FrameBuffer<'a> {
        FrameBuffer::new(color_buffer, &mut self.depth_buffer, self.width, self.height)
    }
}

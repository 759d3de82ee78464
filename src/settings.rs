//! Renderer configuration.

use crate::colors;
use crate::pool::ObjectTextureId;

/// Settings applied by [`SoftwareRenderer::init`](crate::engine::SoftwareRenderer::init).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderInitSettings {
    pub width: u32,
    pub height: u32,
}

impl RenderInitSettings {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for RenderInitSettings {
    fn default() -> Self {
        Self::new(320, 200)
    }
}

/// Per-frame inputs that are not geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderFrameSettings {
    /// A palette texture mapping shaded indices to ARGB.
    pub palette: ObjectTextureId,
    /// An 8-bit texture: texels per light level wide, one row per level.
    pub light_table: ObjectTextureId,
    pub clear_color: u32,
}

impl RenderFrameSettings {
    pub fn new(palette: ObjectTextureId, light_table: ObjectTextureId) -> Self {
        Self {
            palette,
            light_table,
            clear_color: colors::BLACK,
        }
    }

    pub fn with_clear_color(mut self, clear_color: u32) -> Self {
        self.clear_color = clear_color;
        self
    }
}

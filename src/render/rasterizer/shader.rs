//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer handles coverage, depth and perspective-correct UV
//! interpolation. A shader only turns an interpolated UV into an 8-bit palette
//! index, or rejects the pixel. Lighting is applied afterwards through the
//! light table, the same way for every shader.
//!
//! One shader is picked per triangle from its material and the pass's alpha
//! test flag, so the per-pixel loop is monomorphized for each combination.

use crate::texture::TexelGrid;

/// Texel source for one triangle.
pub trait PixelShader {
    /// Palette index at `(u, v)`, or `None` to discard the pixel.
    fn shade(&self, u: f64, v: f64) -> Option<u8>;
}

/// Samples one texture.
pub struct SingleTextureShader<'a> {
    texture: &'a TexelGrid,
}

impl<'a> SingleTextureShader<'a> {
    pub fn new(texture: &'a TexelGrid) -> Self {
        Self { texture }
    }
}

impl PixelShader for SingleTextureShader<'_> {
    #[inline]
    fn shade(&self, u: f64, v: f64) -> Option<u8> {
        Some(self.texture.sample(u, v))
    }
}

/// Samples the layer texture and falls through to the base where the layer
/// texel is 0.
pub struct LayeredTextureShader<'a> {
    base: &'a TexelGrid,
    layer: &'a TexelGrid,
}

impl<'a> LayeredTextureShader<'a> {
    pub fn new(base: &'a TexelGrid, layer: &'a TexelGrid) -> Self {
        Self { base, layer }
    }
}

impl PixelShader for LayeredTextureShader<'_> {
    #[inline]
    fn shade(&self, u: f64, v: f64) -> Option<u8> {
        match self.layer.sample(u, v) {
            0 => Some(self.base.sample(u, v)),
            texel => Some(texel),
        }
    }
}

/// Discards pixels whose final texel is 0.
pub struct AlphaTestShader<S>(pub S);

impl<S: PixelShader> PixelShader for AlphaTestShader<S> {
    #[inline]
    fn shade(&self, u: f64, v: f64) -> Option<u8> {
        self.0.shade(u, v).filter(|&texel| texel != 0)
    }
}

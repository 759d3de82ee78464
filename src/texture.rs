//! Object textures and decoded texture assets.
//!
//! An object texture is either a grid of 8-bit palette indices or a flat
//! table of 32-bit ARGB colors (a palette). The two are variants of one enum,
//! so a pool slot can never hold both or neither.

use image::DynamicImage;

use crate::colors;

/// Width × height grid of 8-bit palette indices, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TexelGrid {
    width: u32,
    height: u32,
    texels: Vec<u8>,
}

impl TexelGrid {
    /// Creates a zero-filled grid.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "texture dimensions must be positive (got {width}x{height})"
        );
        Self {
            width,
            height,
            texels: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn texels(&self) -> &[u8] {
        &self.texels
    }

    pub fn texels_mut(&mut self) -> &mut [u8] {
        &mut self.texels
    }

    /// Texel at integer coordinates, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.texels[(y as usize * self.width as usize) + x as usize])
    }

    /// Nearest texel for a UV coordinate.
    ///
    /// Coordinates outside `[0, 1)` are clamped to the border texel; there is
    /// no wrapping.
    #[inline]
    pub fn sample(&self, u: f64, v: f64) -> u8 {
        let x = ((u * self.width as f64) as i64).clamp(0, self.width as i64 - 1) as usize;
        let y = ((v * self.height as f64) as i64).clamp(0, self.height as i64 - 1) as usize;
        self.texels[x + y * self.width as usize]
    }
}

/// A texture owned by the renderer's texture pool.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectTexture {
    /// 8-bit palette indices.
    Texels8(TexelGrid),
    /// 32-bit ARGB colors indexed by palette index.
    Palette(Vec<u32>),
}

impl ObjectTexture {
    pub fn texels8(width: u32, height: u32) -> Self {
        Self::Texels8(TexelGrid::new(width, height))
    }

    /// Zero-filled palette with `count` entries.
    pub fn palette(count: usize) -> Self {
        assert!(count > 0, "palette must have at least one entry");
        Self::Palette(vec![0; count])
    }

    pub fn as_texels8(&self) -> Option<&TexelGrid> {
        match self {
            Self::Texels8(grid) => Some(grid),
            Self::Palette(_) => None,
        }
    }

    pub fn as_palette(&self) -> Option<&[u32]> {
        match self {
            Self::Palette(colors) => Some(colors),
            Self::Texels8(_) => None,
        }
    }

    /// `(width, height)`; palettes report `(entry_count, 1)`.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Texels8(grid) => (grid.width, grid.height),
            Self::Palette(colors) => (colors.len() as u32, 1),
        }
    }

    /// Mutable view of the raw storage.
    pub fn lock(&mut self) -> LockedTexture<'_> {
        match self {
            Self::Texels8(grid) => LockedTexture::Texels8(&mut grid.texels),
            Self::Palette(colors) => LockedTexture::Palette(colors),
        }
    }
}

/// Writable access to a texture's storage while it is locked.
#[derive(Debug)]
pub enum LockedTexture<'a> {
    Texels8(&'a mut [u8]),
    Palette(&'a mut [u32]),
}

/// A decoded texture handed over by the asset layer.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureAsset {
    Paletted {
        width: u32,
        height: u32,
        texels: Vec<u8>,
    },
    TrueColor {
        width: u32,
        height: u32,
        texels: Vec<u32>,
    },
}

impl TextureAsset {
    /// Converts a decoded image.
    ///
    /// Single-channel 8-bit images are treated as palette indices; everything
    /// else becomes true color (ARGB).
    pub fn from_image(image: &DynamicImage) -> Self {
        match image {
            DynamicImage::ImageLuma8(gray) => Self::Paletted {
                width: gray.width(),
                height: gray.height(),
                texels: gray.as_raw().clone(),
            },
            other => {
                let rgba = other.to_rgba8();
                let (width, height) = rgba.dimensions();
                let texels = rgba.pixels().map(|p| colors::from_rgba_bytes(p.0)).collect();
                Self::TrueColor {
                    width,
                    height,
                    texels,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba, RgbaImage};

    fn gradient_grid() -> TexelGrid {
        let mut grid = TexelGrid::new(4, 2);
        for (i, texel) in grid.texels_mut().iter_mut().enumerate() {
            *texel = i as u8;
        }
        grid
    }

    #[test]
    fn sample_picks_nearest_texel() {
        let grid = gradient_grid();
        assert_eq!(grid.sample(0.0, 0.0), 0);
        assert_eq!(grid.sample(0.3, 0.0), 1);
        assert_eq!(grid.sample(0.99, 0.75), 7);
    }

    #[test]
    fn sample_clamps_instead_of_wrapping() {
        let grid = gradient_grid();
        assert_eq!(grid.sample(1.5, 0.0), 3);
        assert_eq!(grid.sample(-0.5, 2.0), 4);
        assert_eq!(grid.sample(1.0, 1.0), 7);
    }

    #[test]
    fn get_rejects_out_of_bounds() {
        let grid = gradient_grid();
        assert_eq!(grid.get(3, 1), Some(7));
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.get(-1, 0), None);
    }

    #[test]
    fn variants_are_exclusive() {
        let texture = ObjectTexture::texels8(2, 2);
        assert!(texture.as_texels8().is_some());
        assert!(texture.as_palette().is_none());

        let palette = ObjectTexture::palette(256);
        assert!(palette.as_texels8().is_none());
        assert_eq!(palette.dimensions(), (256, 1));
    }

    #[test]
    fn lock_exposes_storage() {
        let mut texture = ObjectTexture::palette(4);
        if let LockedTexture::Palette(colors) = texture.lock() {
            colors[2] = 0xFF00FF00;
        }
        assert_eq!(texture.as_palette().unwrap()[2], 0xFF00FF00);
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn zero_sized_grid_panics() {
        TexelGrid::new(0, 4);
    }

    #[test]
    fn luma_images_become_paletted_assets() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 2, Luma([9])));
        let asset = TextureAsset::from_image(&image);
        assert_eq!(
            asset,
            TextureAsset::Paletted {
                width: 3,
                height: 2,
                texels: vec![9; 6],
            }
        );
    }

    #[test]
    fn rgba_images_become_true_color_assets() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 255])));
        match TextureAsset::from_image(&image) {
            TextureAsset::TrueColor { texels, .. } => assert_eq!(texels, vec![0xFF010203]),
            other => panic!("expected true color, got {other:?}"),
        }
    }
}

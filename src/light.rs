//! Palette lighting through a light table.
//!
//! Surfaces are lit by a single light carried by the player: brightness falls
//! off with horizontal distance from the eye. A shading percent in `[0, 1]`
//! selects one row of the light table, and that row remaps the surface's
//! palette index to a darker (or brighter) one.

use crate::colors;
use crate::math::vec2::Vec2;
use crate::texture::TexelGrid;

/// Horizontal distance at which the player light has fully faded.
pub const PLAYER_LIGHT_DISTANCE: f64 = 3.0;

/// Shading percent for a surface point.
///
/// A positive `fade_percent` overrides distance shading entirely.
#[inline]
pub fn shading_percent(fade_percent: f64, point_xz: Vec2, eye_xz: Vec2) -> f64 {
    if fade_percent > 0.0 {
        fade_percent
    } else {
        let distance = (point_xz - eye_xz).magnitude();
        (distance / PLAYER_LIGHT_DISTANCE).clamp(0.0, 1.0)
    }
}

/// A row of the light table, plus how far the shading value was past it.
///
/// Rows are not blended, so `fraction` is informational.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightLevel {
    pub index: usize,
    pub fraction: f64,
}

impl LightLevel {
    /// # Panics
    /// Panics if `level_count` is zero.
    #[inline]
    pub fn from_shading(shading_percent: f64, level_count: usize) -> Self {
        assert!(level_count > 0, "light table must have at least one level");
        let value = shading_percent * level_count as f64;
        let index = (value as i64).clamp(0, level_count as i64 - 1) as usize;
        Self {
            index,
            fraction: value - value.floor(),
        }
    }
}

/// Borrowed view of an 8-bit light table texture.
///
/// The width is the number of palette indices per level and the height is the
/// number of levels.
#[derive(Debug, Clone, Copy)]
pub struct LightTable<'a> {
    texels: &'a [u8],
    texels_per_level: usize,
    level_count: usize,
}

impl<'a> LightTable<'a> {
    pub fn new(grid: &'a TexelGrid) -> Self {
        Self {
            texels: grid.texels(),
            texels_per_level: grid.width() as usize,
            level_count: grid.height() as usize,
        }
    }

    pub fn level_count(&self) -> usize {
        self.level_count
    }

    pub fn texels_per_level(&self) -> usize {
        self.texels_per_level
    }

    /// Shaded palette index, or `None` if `texel` is past the end of a row.
    #[inline]
    pub fn lookup(&self, texel: u8, level: LightLevel) -> Option<u8> {
        let texel = texel as usize;
        if texel >= self.texels_per_level {
            return None;
        }
        self.texels
            .get(texel + level.index * self.texels_per_level)
            .copied()
    }
}

/// Palette plus light table for one frame.
#[derive(Debug, Clone, Copy)]
pub struct PaletteLighting<'a> {
    palette: &'a [u32],
    light_table: LightTable<'a>,
}

impl<'a> PaletteLighting<'a> {
    pub fn new(palette: &'a [u32], light_table: LightTable<'a>) -> Self {
        Self {
            palette,
            light_table,
        }
    }

    /// Final ARGB color for a texel at a shading percent.
    ///
    /// Indices outside the light table or palette resolve to black.
    #[inline]
    pub fn color(&self, texel: u8, shading_percent: f64) -> u32 {
        let level = LightLevel::from_shading(shading_percent, self.light_table.level_count());
        self.light_table
            .lookup(texel, level)
            .and_then(|index| self.palette.get(index as usize))
            .copied()
            .unwrap_or(colors::BLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 4 texels per level, 4 levels; level `n` maps texel `t` to `t + 4n`.
    fn light_table() -> TexelGrid {
        let mut grid = TexelGrid::new(4, 4);
        for (i, texel) in grid.texels_mut().iter_mut().enumerate() {
            *texel = i as u8;
        }
        grid
    }

    #[test]
    fn fade_overrides_distance() {
        let far = Vec2::new(100.0, 0.0);
        assert_relative_eq!(shading_percent(0.25, far, Vec2::ZERO), 0.25);
    }

    #[test]
    fn distance_shading_is_clamped() {
        assert_relative_eq!(shading_percent(0.0, Vec2::new(1.5, 0.0), Vec2::ZERO), 0.5);
        assert_relative_eq!(shading_percent(0.0, Vec2::new(0.0, 30.0), Vec2::ZERO), 1.0);
        assert_relative_eq!(shading_percent(0.0, Vec2::ZERO, Vec2::ZERO), 0.0);
    }

    #[test]
    fn light_levels_are_hard_bands() {
        let level = LightLevel::from_shading(0.6, 4);
        assert_eq!(level.index, 2);
        assert_relative_eq!(level.fraction, 0.4, epsilon = 1e-12);

        assert_eq!(LightLevel::from_shading(0.0, 4).index, 0);
        assert_eq!(LightLevel::from_shading(1.0, 4).index, 3);
        assert_eq!(LightLevel::from_shading(7.5, 4).index, 3);
    }

    #[test]
    fn color_goes_through_light_table_then_palette() {
        let table = light_table();
        let palette: Vec<u32> = (0..16).map(|i| 0xFF000000 | i).collect();
        let lighting = PaletteLighting::new(&palette, LightTable::new(&table));

        assert_eq!(lighting.color(1, 0.0), 0xFF000001);
        assert_eq!(lighting.color(1, 0.5), 0xFF000009);
        assert_eq!(lighting.color(3, 1.0), 0xFF00000F);
    }

    #[test]
    fn out_of_range_texels_resolve_to_black() {
        let table = light_table();
        let palette = vec![0xFFFFFFFF; 4];
        let lighting = PaletteLighting::new(&palette, LightTable::new(&table));

        assert_eq!(lighting.color(200, 0.0), colors::BLACK);
        // Row 3 maps into indices 12..16, past the short palette.
        assert_eq!(lighting.color(0, 1.0), colors::BLACK);
    }
}

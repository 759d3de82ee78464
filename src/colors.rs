//! Packed 32-bit ARGB color helpers.

pub const BLACK: u32 = 0xFF000000;

/// Pack 8-bit channels into an ARGB word.
#[inline]
pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Opaque color from 8-bit RGB channels.
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    argb(0xFF, r, g, b)
}

/// Convert an RGBA byte quadruple (as stored by `image`) to ARGB.
#[inline]
pub fn from_rgba_bytes([r, g, b, a]: [u8; 4]) -> u32 {
    argb(a, r, g, b)
}

/// Convert an ARGB word back to RGBA bytes.
#[inline]
pub fn to_rgba_bytes(color: u32) -> [u8; 4] {
    let a = (color >> 24) as u8;
    let r = (color >> 16) as u8;
    let g = (color >> 8) as u8;
    let b = color as u8;
    [r, g, b, a]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_round_trip_preserves_channels() {
        let color = argb(0x80, 0x12, 0x34, 0x56);
        assert_eq!(to_rgba_bytes(color), [0x12, 0x34, 0x56, 0x80]);
        assert_eq!(from_rgba_bytes([0x12, 0x34, 0x56, 0x80]), color);
    }

    #[test]
    fn black_is_opaque() {
        assert_eq!(rgb(0, 0, 0), BLACK);
    }
}

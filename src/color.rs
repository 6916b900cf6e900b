//! Packed `0xAARRGGBB` color words: alpha in the top byte, `0x00` fully
//! transparent, `0xFF` fully opaque.

pub const TRANSPARENT: u32 = 0x0000_0000;
pub const OPAQUE_BLACK: u32 = 0xFF00_0000;
pub const OPAQUE_WHITE: u32 = 0xFFFF_FFFF;

#[inline]
pub fn pack(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Alpha byte of a packed color.
#[inline]
pub fn alpha(color: u32) -> u8 {
    (color >> 24) as u8
}

/// The RGB bits with alpha masked off.
#[inline]
pub fn rgb(color: u32) -> u32 {
    color & 0x00FF_FFFF
}

/// Replace the alpha byte, leaving RGB untouched.
#[inline]
pub fn with_alpha(color: u32, alpha: u8) -> u32 {
    (u32::from(alpha) << 24) | rgb(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_and_extract_round_trip() {
        let c = pack(0x80, 0x12, 0x34, 0x56);
        assert_eq!(c, 0x8012_3456);
        assert_eq!(alpha(c), 0x80);
        assert_eq!(rgb(c), 0x0012_3456);
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        assert_eq!(with_alpha(0x0012_3456, 0xFF), 0xFF12_3456);
        assert_eq!(with_alpha(OPAQUE_WHITE, 0x00), 0x00FF_FFFF);
    }

    #[test]
    fn named_constants() {
        assert_eq!(alpha(OPAQUE_BLACK), 0xFF);
        assert_eq!(rgb(OPAQUE_BLACK), 0);
        assert_eq!(alpha(TRANSPARENT), 0);
    }
}

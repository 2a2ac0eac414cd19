// src/math/color.rs
//! Packed RGBA helpers.
//!
//! Colors are packed as `0xRRGGBBAA`. Blending runs on two channels at a time
//! in fixed point so palette tables come out bit-identical on every platform.

pub const COL32_WHITE: u32 = 0xFFFF_FFFF;

/// Packs four 8-bit channels into `0xRRGGBBAA`.
#[inline]
pub const fn col32(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32)
}

/// Packs an opaque color from a `0xRRGGBB` literal.
#[inline]
pub const fn rgb_hex(hex: u32) -> u32 {
    col32((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 0xFF)
}

/// Mixes `a` and `b` by `s` in `[0, 256]` (`0` yields `a`, `256` yields `b`).
///
/// Bytes 0/2 and 1/3 are blended in parallel: each lane holds at most
/// `255 * 256`, so lanes never carry into each other.
#[inline]
pub fn mix_u32(a: u32, b: u32, s: u32) -> u32 {
    let s = s.min(256);
    let af = 256 - s;
    let bf = s;
    let al = a & 0x00FF_00FF;
    let ah = (a & 0xFF00_FF00) >> 8;
    let bl = b & 0x00FF_00FF;
    let bh = (b & 0xFF00_FF00) >> 8;
    let ml = al * af + bl * bf;
    let mh = ah * af + bh * bf;
    (mh & 0xFF00_FF00) | ((ml & 0xFF00_FF00) >> 8)
}

/// Scales the alpha channel of `col` by `alpha` in `[0, 1]`.
#[inline]
pub fn alpha_u32(col: u32, alpha: f32) -> u32 {
    let a = ((col & 0xFF) as f32 * alpha.clamp(0.0, 1.0)).round() as u32;
    (col & 0xFFFF_FF00) | a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_endpoints() {
        let a = 0x1234_5678;
        let b = 0x9ABC_DEF0;
        assert_eq!(mix_u32(a, b, 0), a);
        assert_eq!(mix_u32(a, b, 256), b);
    }

    #[test]
    fn test_mix_red_blue_midpoint() {
        assert_eq!(mix_u32(0xFF00_00FF, 0x0000_FFFF, 128), 0x7F00_7FFF);
    }

    #[test]
    fn test_mix_keeps_opaque_alpha() {
        for s in [0, 1, 17, 128, 254, 255] {
            assert_eq!(mix_u32(0xFF00_00FF, 0x00FF_00FF, s) & 0xFF, 0xFF);
        }
    }

    #[test]
    fn test_alpha_scaling() {
        assert_eq!(alpha_u32(COL32_WHITE, 0.0), 0xFFFF_FF00);
        assert_eq!(alpha_u32(COL32_WHITE, 1.0), COL32_WHITE);
        assert_eq!(alpha_u32(col32(10, 20, 30, 200), 0.5), col32(10, 20, 30, 100));
    }

    #[test]
    fn test_rgb_hex_is_opaque() {
        assert_eq!(rgb_hex(0x4C72B0), 0x4C72_B0FF);
        assert_eq!(rgb_hex(0x000000), col32(0, 0, 0, 255));
    }
}

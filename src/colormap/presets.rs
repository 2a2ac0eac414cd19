// src/colormap/presets.rs
//! Built-in palettes registered on every new context.

use super::table::{ColormapId, ColormapTable};
use crate::math::rgb_hex;

pub const DEEP: ColormapId = ColormapId(0);
pub const DARK: ColormapId = ColormapId(1);
pub const PASTEL: ColormapId = ColormapId(2);
pub const PAIRED: ColormapId = ColormapId(3);
pub const VIRIDIS: ColormapId = ColormapId(4);
pub const PLASMA: ColormapId = ColormapId(5);
pub const HOT: ColormapId = ColormapId(6);
pub const COOL: ColormapId = ColormapId(7);
pub const PINK: ColormapId = ColormapId(8);
pub const JET: ColormapId = ColormapId(9);
pub const GREYS: ColormapId = ColormapId(10);

const fn opaque<const N: usize>(hex: [u32; N]) -> [u32; N] {
    let mut out = [0u32; N];
    let mut i = 0;
    while i < N {
        out[i] = rgb_hex(hex[i]);
        i += 1;
    }
    out
}

const DEEP_KEYS: [u32; 10] = opaque([
    0x4C72B0, 0xDD8452, 0x55A868, 0xC44E52, 0x8172B3, 0x937860, 0xDA8BC3, 0x8C8C8C, 0xCCB974,
    0x64B5CD,
]);
const DARK_KEYS: [u32; 9] = opaque([
    0xE41A1C, 0x377EB8, 0x4DAF4A, 0x984EA3, 0xFF7F00, 0xFFFF33, 0xA65628, 0xF781BF, 0x999999,
]);
const PASTEL_KEYS: [u32; 9] = opaque([
    0xFBB4AE, 0xB3CDE3, 0xCCEBC5, 0xDECBE4, 0xFED9A6, 0xFFFFCC, 0xE5D8BD, 0xFDDAEC, 0xF2F2F2,
]);
const PAIRED_KEYS: [u32; 12] = opaque([
    0xA6CEE3, 0x1F78B4, 0xB2DF8A, 0x33A02C, 0xFB9A99, 0xE31A1C, 0xFDBF6F, 0xFF7F00, 0xCAB2D6,
    0x6A3D9A, 0xFFFF99, 0xB15928,
]);
const VIRIDIS_KEYS: [u32; 10] = opaque([
    0x440154, 0x482878, 0x3E4A89, 0x31688E, 0x26828E, 0x1F9E89, 0x35B779, 0x6DCD59, 0xB4DE2C,
    0xFDE725,
]);
const PLASMA_KEYS: [u32; 10] = opaque([
    0x0D0887, 0x47039F, 0x7301A8, 0x9C179E, 0xBD3786, 0xD8576B, 0xED7953, 0xFA9E3B, 0xFDC926,
    0xF0F921,
]);
const HOT_KEYS: [u32; 5] = opaque([0x000000, 0xB40000, 0xFF5A00, 0xFFFF3C, 0xFFFFFF]);
const COOL_KEYS: [u32; 2] = opaque([0x00FFFF, 0xFF00FF]);
const PINK_KEYS: [u32; 5] = opaque([0x1E0000, 0xA86565, 0xD2B48C, 0xE8E8B4, 0xFFFFFF]);
const JET_KEYS: [u32; 9] = opaque([
    0x00007F, 0x0000FF, 0x007FFF, 0x00FFFF, 0x7FFF7F, 0xFFFF00, 0xFF7F00, 0xFF0000, 0x7F0000,
]);
const GREYS_KEYS: [u32; 2] = opaque([0x000000, 0xFFFFFF]);

/// Name, keys and qualitative flag of every built-in map, in id order.
pub const BUILTIN: [(&str, &[u32], bool); 11] = [
    ("Deep", &DEEP_KEYS, true),
    ("Dark", &DARK_KEYS, true),
    ("Pastel", &PASTEL_KEYS, true),
    ("Paired", &PAIRED_KEYS, true),
    ("Viridis", &VIRIDIS_KEYS, false),
    ("Plasma", &PLASMA_KEYS, false),
    ("Hot", &HOT_KEYS, false),
    ("Cool", &COOL_KEYS, false),
    ("Pink", &PINK_KEYS, false),
    ("Jet", &JET_KEYS, false),
    ("Greys", &GREYS_KEYS, false),
];

/// Registers the built-in maps into an empty table so their ids match the
/// constants above.
pub fn register_builtin(table: &mut ColormapTable) {
    debug_assert_eq!(table.count(), 0);
    for (name, keys, qual) in BUILTIN {
        table.append(name, keys, qual);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_match_constants() {
        let mut table = ColormapTable::new();
        register_builtin(&mut table);
        assert_eq!(table.count(), BUILTIN.len());
        assert_eq!(table.get_index("Deep"), Some(DEEP));
        assert_eq!(table.get_index("Viridis"), Some(VIRIDIS));
        assert_eq!(table.get_index("Greys"), Some(GREYS));
        assert!(table.is_qual(PAIRED));
        assert!(!table.is_qual(JET));
    }

    #[test]
    fn test_builtin_tables() {
        let mut table = ColormapTable::new();
        register_builtin(&mut table);
        assert_eq!(table.get_table_size(GREYS), 256);
        assert_eq!(table.lerp_table(GREYS, 0.0), 0x0000_00FF);
        assert_eq!(table.lerp_table(GREYS, 1.0), 0xFFFF_FFFF);
        assert_eq!(table.get_table_size(VIRIDIS), 255 * 9 + 1);
        assert_eq!(table.get_table_size(DEEP), 10);
    }
}

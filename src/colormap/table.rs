// src/colormap/table.rs
//! Colormap registry: sparse key colors expanded into dense lookup tables.
//!
//! Qualitative maps use their keys as the table. Continuous maps get 255
//! fixed-point blends per key segment plus the final key, so a map with `k`
//! keys owns exactly `255 * (k - 1) + 1` entries and both ends reproduce the
//! first and last keys bit for bit.

use crate::host::hash_str;
use crate::math::mix_u32;
use anyhow::{bail, Result};
use hashbrown::HashMap;
use nohash_hasher::BuildNoHashHasher;
use smallvec::SmallVec;

/// Blended samples emitted between two adjacent keys.
pub const SAMPLES_PER_SEGMENT: usize = 255;

/// Stable index of a registered colormap. Indices are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColormapId(pub(crate) usize);

impl ColormapId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Colormap {
    name: String,
    keys: SmallVec<[u32; 12]>,
    table: Vec<u32>,
    qual: bool,
}

impl Colormap {
    fn rebuild(&mut self) {
        build_table(&self.keys, self.qual, &mut self.table);
    }
}

/// Expands `keys` into `table`, reusing its allocation.
pub fn build_table(keys: &[u32], qual: bool, table: &mut Vec<u32>) {
    table.clear();
    if qual {
        table.extend_from_slice(keys);
        return;
    }
    let Some(&last) = keys.last() else {
        return;
    };
    table.reserve(SAMPLES_PER_SEGMENT * (keys.len() - 1) + 1);
    for pair in keys.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        table.extend((0..SAMPLES_PER_SEGMENT as u32).map(|s| mix_u32(a, b, s)));
    }
    table.push(last);
}

/// All registered colormaps, indexed by [`ColormapId`] and by name hash.
///
/// # Panics
/// Accessors taking a [`ColormapId`] index directly; passing an id issued by
/// a different table may panic.
#[derive(Debug, Default)]
pub struct ColormapTable {
    maps: Vec<Colormap>,
    by_name: HashMap<u32, ColormapId, BuildNoHashHasher<u32>>,
}

impl ColormapTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a colormap and builds its table.
    ///
    /// Fails when the name (by hash) is already taken or `keys` is empty; the
    /// registry is left untouched in both cases.
    pub fn try_append(&mut self, name: &str, keys: &[u32], qual: bool) -> Result<ColormapId> {
        let hash = hash_str(name);
        if self.by_name.contains_key(&hash) {
            bail!("colormap '{}' is already registered", name);
        }
        if keys.is_empty() {
            bail!("colormap '{}' needs at least one key color", name);
        }

        let id = ColormapId(self.maps.len());
        let mut map = Colormap {
            name: name.to_owned(),
            keys: SmallVec::from_slice(keys),
            table: Vec::new(),
            qual,
        };
        map.rebuild();
        log::debug!(
            "colormap '{}' -> #{} ({} keys, {} entries, qual={})",
            name,
            id.0,
            keys.len(),
            map.table.len(),
            qual
        );
        self.maps.push(map);
        self.by_name.insert(hash, id);
        Ok(id)
    }

    /// Like [`try_append`](Self::try_append) but returns `None` as the
    /// not-found sentinel instead of an error.
    pub fn append(&mut self, name: &str, keys: &[u32], qual: bool) -> Option<ColormapId> {
        match self.try_append(name, keys, qual) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("{e}");
                None
            }
        }
    }

    /// Replaces one key and rebuilds that colormap's table only.
    pub fn set_key_color(&mut self, cmap: ColormapId, key: usize, color: u32) -> Result<()> {
        let Some(map) = self.maps.get_mut(cmap.0) else {
            bail!("unknown colormap #{}", cmap.0);
        };
        let Some(slot) = map.keys.get_mut(key) else {
            bail!("colormap '{}' has no key {}", map.name, key);
        };
        *slot = color;
        map.rebuild();
        Ok(())
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.maps.len()
    }

    pub fn get_index(&self, name: &str) -> Option<ColormapId> {
        self.by_name.get(&hash_str(name)).copied()
    }

    pub fn get_name(&self, cmap: ColormapId) -> Option<&str> {
        self.maps.get(cmap.0).map(|m| m.name.as_str())
    }

    #[inline]
    pub fn is_qual(&self, cmap: ColormapId) -> bool {
        self.maps[cmap.0].qual
    }

    #[inline]
    pub fn get_keys(&self, cmap: ColormapId) -> &[u32] {
        &self.maps[cmap.0].keys
    }

    #[inline]
    pub fn get_key_count(&self, cmap: ColormapId) -> usize {
        self.maps[cmap.0].keys.len()
    }

    #[inline]
    pub fn get_key_color(&self, cmap: ColormapId, key: usize) -> u32 {
        self.maps[cmap.0].keys[key]
    }

    #[inline]
    pub fn get_table(&self, cmap: ColormapId) -> &[u32] {
        &self.maps[cmap.0].table
    }

    #[inline]
    pub fn get_table_size(&self, cmap: ColormapId) -> usize {
        self.maps[cmap.0].table.len()
    }

    #[inline]
    pub fn get_table_color(&self, cmap: ColormapId, idx: usize) -> u32 {
        self.maps[cmap.0].table[idx]
    }

    /// Looks up the table color at normalized position `t` (clamped to `[0, 1]`).
    ///
    /// Qualitative maps pick the bucket `floor(size * t)`; continuous maps
    /// pick the nearest precomputed sample `round((size - 1) * t)`.
    pub fn lerp_table(&self, cmap: ColormapId, t: f32) -> u32 {
        let map = &self.maps[cmap.0];
        let size = map.table.len();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let idx = if map.qual {
            ((size as f32 * t) as usize).min(size - 1)
        } else {
            ((size - 1) as f32 * t + 0.5) as usize
        };
        map.table[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0xFF00_00FF;
    const GREEN: u32 = 0x00FF_00FF;
    const BLUE: u32 = 0x0000_FFFF;

    #[test]
    fn test_continuous_table_size_and_ends() {
        let mut cm = ColormapTable::new();
        for k in 1..6 {
            let keys: Vec<u32> = (0..k).map(|i| 0x1020_3000 | (i as u32 * 40)).collect();
            let id = cm.append(&format!("ramp{k}"), &keys, false).unwrap();
            let table = cm.get_table(id);
            assert_eq!(table.len(), 255 * (k - 1) + 1);
            assert_eq!(table[0], keys[0]);
            assert_eq!(table[table.len() - 1], keys[k - 1]);
        }
    }

    #[test]
    fn test_qualitative_table_is_keys() {
        let mut cm = ColormapTable::new();
        let keys = [RED, GREEN, BLUE, 0x1234_56FF];
        let id = cm.append("Q", &keys, true).unwrap();
        assert_eq!(cm.get_table_size(id), 4);
        assert_eq!(cm.get_table(id), &keys);
        assert!(cm.is_qual(id));
    }

    #[test]
    fn test_red_blue_example() {
        let mut cm = ColormapTable::new();
        let id = cm.append("RB", &[RED, BLUE], false).unwrap();
        assert_eq!(cm.get_table_size(id), 256);
        assert_eq!(cm.lerp_table(id, 0.5), cm.get_table_color(id, 128));
        assert_eq!(cm.lerp_table(id, 0.5), 0x7F00_7FFF);
    }

    #[test]
    fn test_lerp_ends_both_kinds() {
        let mut cm = ColormapTable::new();
        let keys = [RED, GREEN, BLUE];
        let c = cm.append("C", &keys, false).unwrap();
        let q = cm.append("Q", &keys, true).unwrap();
        for id in [c, q] {
            assert_eq!(cm.lerp_table(id, 0.0), RED);
            let last = cm.get_table_color(id, cm.get_table_size(id) - 1);
            assert_eq!(cm.lerp_table(id, 1.0), last);
        }
    }

    #[test]
    fn test_qualitative_buckets() {
        let mut cm = ColormapTable::new();
        let q = cm.append("Q", &[RED, GREEN, BLUE], true).unwrap();
        assert_eq!(cm.lerp_table(q, 0.30), RED);
        assert_eq!(cm.lerp_table(q, 0.34), GREEN);
        assert_eq!(cm.lerp_table(q, 0.99), BLUE);
        assert_eq!(cm.lerp_table(q, 2.0), BLUE);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut cm = ColormapTable::new();
        assert!(cm.append("Viridis", &[RED, BLUE], false).is_some());
        assert!(cm.append("Viridis", &[GREEN], true).is_none());
        assert_eq!(cm.count(), 1);
        assert!(cm.try_append("Viridis", &[GREEN], true).is_err());
        assert_eq!(cm.get_keys(ColormapId(0)), &[RED, BLUE]);
    }

    #[test]
    fn test_empty_keys_rejected() {
        let mut cm = ColormapTable::new();
        assert!(cm.append("empty", &[], false).is_none());
        assert_eq!(cm.count(), 0);
        assert!(cm.get_index("empty").is_none());
    }

    #[test]
    fn test_set_key_color_rebuilds_one_map() {
        let mut cm = ColormapTable::new();
        let a = cm.append("A", &[RED, BLUE], false).unwrap();
        let b = cm.append("B", &[GREEN, BLUE], false).unwrap();
        let b_before = cm.get_table(b).to_vec();

        cm.set_key_color(a, 1, GREEN).unwrap();
        assert_eq!(cm.get_key_color(a, 1), GREEN);
        assert_eq!(cm.get_table_size(a), 256);
        assert_eq!(cm.get_table_color(a, 255), GREEN);
        assert_eq!(cm.get_table(b), b_before.as_slice());

        assert!(cm.set_key_color(a, 2, RED).is_err());
        assert!(cm.set_key_color(ColormapId(9), 0, RED).is_err());
    }

    #[test]
    fn test_name_lookup() {
        let mut cm = ColormapTable::new();
        let id = cm.append("Jet", &[RED, BLUE], false).unwrap();
        assert_eq!(cm.get_index("Jet"), Some(id));
        assert_eq!(cm.get_name(id), Some("Jet"));
        assert_eq!(cm.get_index("jet"), None);
    }
}

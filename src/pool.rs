// src/pool.rs
//! Slot arena addressed by a pre-hashed 32-bit key.
//!
//! Slots never move once created, so an index handed out stays valid for the
//! lifetime of the pool (removal is not supported; it would need tombstones).

use hashbrown::HashMap;
use nohash_hasher::BuildNoHashHasher;
use std::ops::{Index, IndexMut};

#[derive(Debug)]
pub struct Pool<T> {
    slots: Vec<T>,
    map: HashMap<u32, usize, BuildNoHashHasher<u32>>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            map: HashMap::with_hasher(BuildNoHashHasher::default()),
        }
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn index_of(&self, key: u32) -> Option<usize> {
        self.map.get(&key).copied()
    }

    pub fn get_by_key(&self, key: u32) -> Option<&T> {
        self.index_of(key).map(|i| &self.slots[i])
    }

    pub fn get_by_key_mut(&mut self, key: u32) -> Option<&mut T> {
        let idx = self.index_of(key)?;
        Some(&mut self.slots[idx])
    }

    #[inline]
    pub fn get_by_index(&self, idx: usize) -> Option<&T> {
        self.slots.get(idx)
    }

    #[inline]
    pub fn get_by_index_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.slots.get_mut(idx)
    }

    /// Returns the slot index for `key`, creating the slot with `make` on
    /// first use. The flag is true when the slot was just created.
    pub fn get_or_insert_with(&mut self, key: u32, make: impl FnOnce() -> T) -> (usize, bool) {
        if let Some(idx) = self.index_of(key) {
            return (idx, false);
        }
        let idx = self.slots.len();
        self.slots.push(make());
        self.map.insert(key, idx);
        (idx, true)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.map.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }
}

impl<T> Index<usize> for Pool<T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: usize) -> &T {
        &self.slots[idx]
    }
}

impl<T> IndexMut<usize> for Pool<T> {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut T {
        &mut self.slots[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_insert_is_stable() {
        let mut pool: Pool<String> = Pool::new();
        let (a, fresh_a) = pool.get_or_insert_with(0xDEAD, || "a".into());
        let (b, fresh_b) = pool.get_or_insert_with(0xBEEF, || "b".into());
        let (a2, fresh_a2) = pool.get_or_insert_with(0xDEAD, || "never".into());
        assert!(fresh_a && fresh_b && !fresh_a2);
        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_eq!(pool.get_by_key(0xDEAD).map(String::as_str), Some("a"));
        assert_eq!(pool.get_by_index(b).map(String::as_str), Some("b"));
        pool[b].push('!');
        assert_eq!(pool[b], "b!");
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut pool: Pool<u8> = Pool::new();
        pool.get_or_insert_with(1, || 1);
        pool.clear();
        assert!(pool.is_empty());
        assert!(pool.get_by_key(1).is_none());
        if let Some(v) = pool.get_by_key_mut(1) {
            *v = 2;
        }
        assert_eq!(pool.index_of(1), None);
    }
}

// src/host.rs
//! Services borrowed from the host GUI toolkit.
//!
//! The core never measures text or hashes labels on its own terms; it asks the
//! [`Host`] so ids and label sizes agree with whatever the toolkit renders.

use glam::Vec2;

/// Stable 32-bit hash of a label (CRC-32 of its UTF-8 bytes).
#[inline]
pub fn hash_str(text: &str) -> u32 {
    crc32fast::hash(text.as_bytes())
}

/// Part of a label shown to the user: everything before the first `##`.
pub fn display_label(label: &str) -> &str {
    match label.find("##") {
        Some(pos) => &label[..pos],
        None => label,
    }
}

pub trait Host {
    /// Size in pixels of `text` rendered with the current font.
    fn calc_text_size(&self, text: &str) -> Vec2;

    /// Identity hash of a label. Must be stable across frames.
    fn hash_str(&self, text: &str) -> u32 {
        hash_str(text)
    }
}

/// Fixed-advance metrics for running without a toolkit (tests, offline layout).
#[derive(Debug, Clone, Copy)]
pub struct HeadlessHost {
    pub glyph_advance: f32,
    pub line_height: f32,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self {
            glyph_advance: 7.0,
            line_height: 13.0,
        }
    }
}

impl Host for HeadlessHost {
    fn calc_text_size(&self, text: &str) -> Vec2 {
        if text.is_empty() {
            return Vec2::ZERO;
        }
        let mut lines = 0usize;
        let mut widest = 0usize;
        for line in text.split('\n') {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        Vec2::new(widest as f32 * self.glyph_advance, lines as f32 * self.line_height)
    }
}

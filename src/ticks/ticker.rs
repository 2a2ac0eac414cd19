// src/ticks/ticker.rs
//! Tick storage for one axis.
//!
//! Ticks are appended during a single tick pass and never edited afterwards.
//! Their labels live back to back in one text buffer that is cleared, not
//! freed, between frames.

use super::formatter::Formatter;
use crate::host::Host;
use glam::Vec2;
use std::fmt;
use std::rc::Rc;

/// Capacity of a formatter's output buffer, including the terminator slot.
pub const LABEL_MAX_SIZE: usize = 32;

/// Fixed-capacity UTF-8 buffer handed to formatters.
///
/// Writes past capacity are dropped at a character boundary; overflowing is
/// never an error. One byte is always kept for a trailing NUL.
#[derive(Clone, Copy)]
pub struct LabelBuf<const N: usize = LABEL_MAX_SIZE> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> Default for LabelBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LabelBuf<N> {
    pub const fn new() -> Self {
        Self { bytes: [0; N], len: 0 }
    }

    /// Bytes of text the buffer can hold.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N.saturating_sub(1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
        if N > 0 {
            self.bytes[0] = 0;
        }
    }

    /// Appends as much of `s` as fits; returns the number of bytes taken.
    pub fn push_str(&mut self, s: &str) -> usize {
        let room = self.capacity() - self.len;
        let mut take = s.len().min(room);
        while !s.is_char_boundary(take) {
            take -= 1;
        }
        self.bytes[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        if self.len < N {
            self.bytes[self.len] = 0;
        }
        take
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len]).unwrap_or("")
    }
}

impl<const N: usize> fmt::Write for LabelBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for LabelBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LabelBuf").field(&self.as_str()).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub plot_pos: f32,
    pub major: bool,
    pub show_label: bool,
    pub label_size: Vec2,
    text_offset: Option<usize>,
    text_len: usize,
    /// Insertion order within the owning ticker.
    pub idx: usize,
}

impl Tick {
    pub fn new(value: f32, major: bool, show_label: bool) -> Self {
        Self {
            plot_pos: value,
            major,
            show_label,
            label_size: Vec2::ZERO,
            text_offset: None,
            text_len: 0,
            idx: 0,
        }
    }

    #[inline]
    pub fn has_label(&self) -> bool {
        self.text_offset.is_some()
    }
}

pub struct Ticker {
    ticks: Vec<Tick>,
    text: String,
    host: Rc<dyn Host>,
}

impl fmt::Debug for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticker")
            .field("ticks", &self.ticks)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

impl Ticker {
    pub fn new(host: Rc<dyn Host>) -> Self {
        Self {
            ticks: Vec::new(),
            text: String::new(),
            host,
        }
    }

    /// Appends a tick labelled with `label` (copied into the text buffer).
    pub fn add_tick_label(&mut self, value: f32, major: bool, show_label: bool, label: &str) -> &Tick {
        let mut tick = Tick::new(value, major, show_label);
        if show_label {
            self.attach_text(&mut tick, label);
        }
        self.add_tick(tick)
    }

    /// Appends a tick whose label is produced by `formatter` into a bounded
    /// buffer; output past [`LABEL_MAX_SIZE`] is truncated.
    pub fn add_tick_formatted(
        &mut self,
        value: f32,
        major: bool,
        show_label: bool,
        formatter: &dyn Formatter,
    ) -> &Tick {
        let mut tick = Tick::new(value, major, show_label);
        if show_label {
            let mut buf: LabelBuf = LabelBuf::new();
            formatter.format(tick.plot_pos, &mut buf);
            self.attach_text(&mut tick, buf.as_str());
        }
        self.add_tick(tick)
    }

    pub fn add_tick(&mut self, mut tick: Tick) -> &Tick {
        tick.idx = self.ticks.len();
        self.ticks.push(tick);
        &self.ticks[tick.idx]
    }

    fn attach_text(&mut self, tick: &mut Tick, label: &str) {
        tick.text_offset = Some(self.text.len());
        tick.text_len = label.len();
        self.text.push_str(label);
        tick.label_size = self.host.calc_text_size(label);
    }

    /// Label of the tick at `idx`, empty when it has none.
    pub fn get_text(&self, idx: usize) -> &str {
        self.ticks.get(idx).map_or("", |t| self.text_of(t))
    }

    pub fn text_of(&self, tick: &Tick) -> &str {
        match tick.text_offset {
            Some(off) => &self.text[off..off + tick.text_len],
            None => "",
        }
    }

    /// Drops all ticks and labels, keeping allocations for the next pass.
    pub fn reset(&mut self) {
        self.ticks.clear();
        self.text.clear();
    }

    #[inline]
    pub fn tick_count(&self) -> usize {
        self.ticks.len()
    }

    #[inline]
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }
}

// src/item.rs
//! Plot items, the legend built from them, and per-item style overrides.

use crate::host::display_label;
use crate::math::{alpha_u32, COL32_WHITE};
use crate::pool::Pool;
use crate::style::Style;
use std::ops::Range as Span;

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: u32,
    pub color: u32,
    pub show: bool,
    pub legend_hovered: bool,
}

impl Item {
    fn new(id: u32) -> Self {
        Self {
            id,
            color: COL32_WHITE,
            show: true,
            legend_hovered: false,
        }
    }
}

/// Legend entries for the current frame, in submission order.
#[derive(Debug, Default)]
pub struct Legend {
    indices: Vec<usize>,
    spans: Vec<Span<usize>>,
    labels: String,
    pub hovered: bool,
    pub held: bool,
}

impl Legend {
    pub fn reset(&mut self) {
        self.indices.clear();
        self.spans.clear();
        self.labels.clear();
    }

    fn push(&mut self, item_index: usize, label: &str) {
        let start = self.labels.len();
        self.labels.push_str(label);
        self.indices.push(item_index);
        self.spans.push(start..self.labels.len());
    }
}

/// Items of one plot plus the cursor into the colormap for automatic colors.
#[derive(Debug, Default)]
pub struct ItemGroup {
    pool: Pool<Item>,
    pub legend: Legend,
    pub colormap_idx: usize,
}

impl ItemGroup {
    #[inline]
    pub fn item_count(&self) -> usize {
        self.pool.len()
    }

    pub fn get_item(&self, id: u32) -> Option<&Item> {
        self.pool.get_by_key(id)
    }

    pub fn get_item_by_index(&self, idx: usize) -> Option<&Item> {
        self.pool.get_by_index(idx)
    }

    pub fn get_item_by_index_mut(&mut self, idx: usize) -> Option<&mut Item> {
        self.pool.get_by_index_mut(idx)
    }

    /// Slot index of the item with `id`, created on first use.
    pub fn get_or_add_item(&mut self, id: u32) -> (usize, bool) {
        self.pool.get_or_insert_with(id, || Item::new(id))
    }

    /// Lists the item in this frame's legend unless its label is hidden
    /// (`##...`) or it is already listed. Hidden items stay listed.
    pub fn add_legend_entry(&mut self, idx: usize, label: &str) {
        let shown = display_label(label);
        if !shown.is_empty() && !self.legend.indices.contains(&idx) {
            self.legend.push(idx, shown);
        }
    }

    #[inline]
    pub fn legend_count(&self) -> usize {
        self.legend.indices.len()
    }

    pub fn legend_item(&self, i: usize) -> Option<&Item> {
        let idx = *self.legend.indices.get(i)?;
        self.pool.get_by_index(idx)
    }

    pub fn legend_label(&self, i: usize) -> &str {
        self.legend
            .spans
            .get(i)
            .map_or("", |span| &self.legend.labels[span.clone()])
    }

    /// Drops all items and legend entries.
    pub fn reset(&mut self) {
        self.pool.clear();
        self.legend.reset();
        self.colormap_idx = 0;
    }
}

/// Overrides for the next item; `None` means "derive automatically".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NextItemData {
    pub line_color: Option<u32>,
    pub fill_color: Option<u32>,
    pub marker_outline: Option<u32>,
    pub marker_fill: Option<u32>,
    pub line_weight: Option<f32>,
    pub marker_size: Option<f32>,
    pub marker_weight: Option<f32>,
    pub fill_alpha: Option<f32>,
    pub hidden: bool,
}

impl NextItemData {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Fully resolved style of the item being submitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemStyle {
    pub line_color: u32,
    pub fill_color: u32,
    pub marker_outline: u32,
    pub marker_fill: u32,
    pub line_weight: f32,
    pub marker_size: f32,
    pub marker_weight: f32,
}

impl ItemStyle {
    pub fn resolve(next: &NextItemData, item: &Item, style: &Style) -> Self {
        let line_color = next.line_color.unwrap_or(item.color);
        let fill_alpha = next.fill_alpha.unwrap_or(style.fill_alpha);
        Self {
            line_color,
            fill_color: alpha_u32(next.fill_color.unwrap_or(line_color), fill_alpha),
            marker_outline: next.marker_outline.unwrap_or(line_color),
            marker_fill: alpha_u32(next.marker_fill.unwrap_or(line_color), fill_alpha),
            line_weight: next.line_weight.unwrap_or(style.line_weight),
            marker_size: next.marker_size.unwrap_or(style.marker_size),
            marker_weight: next.marker_weight.unwrap_or(style.marker_weight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_and_legend() {
        let mut group = ItemGroup::default();
        let (a, fresh) = group.get_or_add_item(11);
        assert!(fresh);
        group.add_legend_entry(a, "Sine##left");
        let (b, _) = group.get_or_add_item(22);
        group.add_legend_entry(b, "##hidden");
        let (a2, fresh) = group.get_or_add_item(11);
        assert_eq!((a2, fresh), (a, false));
        group.add_legend_entry(a2, "Sine##left");

        assert_eq!(group.item_count(), 2);
        assert_eq!(group.legend_count(), 1);
        assert_eq!(group.legend_label(0), "Sine");
        assert_eq!(group.legend_item(0).map(|i| i.id), Some(11));
        assert_eq!(group.legend_label(5), "");

        group.legend.reset();
        assert_eq!(group.legend_count(), 0);
        assert_eq!(group.item_count(), 2);

        group.reset();
        assert_eq!(group.item_count(), 0);
    }

    #[test]
    fn test_item_style_resolution() {
        let item = Item {
            color: 0x1122_33FF,
            ..Item::new(1)
        };
        let style = Style {
            fill_alpha: 0.5,
            ..Style::default()
        };

        let auto = ItemStyle::resolve(&NextItemData::default(), &item, &style);
        assert_eq!(auto.line_color, 0x1122_33FF);
        assert_eq!(auto.marker_outline, 0x1122_33FF);
        assert_eq!(auto.marker_fill, 0x1122_3380);
        assert_eq!(auto.fill_color, 0x1122_3380);
        assert_eq!(auto.line_weight, style.line_weight);

        let next = NextItemData {
            line_color: Some(0xFF00_00FF),
            line_weight: Some(3.0),
            ..NextItemData::default()
        };
        let custom = ItemStyle::resolve(&next, &item, &style);
        assert_eq!(custom.line_color, 0xFF00_00FF);
        assert_eq!(custom.marker_outline, 0xFF00_00FF);
        assert_eq!(custom.line_weight, 3.0);
    }
}

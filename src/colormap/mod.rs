// src/colormap/mod.rs
//! Colormap storage and the built-in palettes.

pub mod presets;
pub mod table;

pub use table::{build_table, ColormapId, ColormapTable, SAMPLES_PER_SEGMENT};

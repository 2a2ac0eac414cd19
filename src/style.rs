// src/style.rs
//! Defaults applied to items when nothing more specific was requested.

use crate::colormap::{presets, ColormapId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub line_weight: f32,
    pub marker_size: f32,
    pub marker_weight: f32,
    /// Alpha multiplier for filled regions and marker fills.
    pub fill_alpha: f32,
    /// Colormap used for automatic item colors and colormap sampling.
    pub colormap: ColormapId,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            line_weight: 1.0,
            marker_size: 4.0,
            marker_weight: 1.0,
            fill_alpha: 1.0,
            colormap: presets::DEEP,
        }
    }
}

// src/math/mod.rs
//! Numeric building blocks for the plot core.
//!
//! This module provides:
//! - Packed RGBA blending used by colormap tables
//! - Range, ray and rectangle value types used by the transforms

pub mod color;
pub mod geometry;

pub use self::color::{alpha_u32, col32, mix_u32, rgb_hex, COL32_WHITE};
pub use self::geometry::{almost_equal, Point, Range, Ray, Rect};

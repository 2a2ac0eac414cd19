// src/lib.rs
//! Computational core for immediate-mode 3D plots.
//!
//! This library provides the per-plot coordinate state (axis ranges, fit and
//! box orientation), the data -> NDC -> pixel transforms and their inverse
//! picking rays, tick generation through pluggable locators and formatters,
//! and colormap lookup tables built from sparse color keys.
//!
//! Drawing, layout and input belong to the host toolkit, which plugs in text
//! measurement and label hashing through [`Host`].

pub mod axis;
pub mod colormap;
pub mod context;
pub mod host;
pub mod item;
pub mod math;
pub mod plot;
pub mod pool;
pub mod registry;
pub mod style;
pub mod ticks;

pub use axis::{Axis, AxisFlags, AxisState};
pub use colormap::{presets, ColormapId, ColormapTable};
pub use context::Context;
pub use host::{HeadlessHost, Host};
pub use item::{Item, ItemStyle};
pub use math::{Point, Range, Ray, Rect};
pub use plot::{box_rotation, Condition, PlotState};
pub use registry::PlotRegistry;
pub use style::Style;
pub use ticks::{DefaultFormatter, Formatter, LabelBuf, Locator, PrintfFormatter, Ticker};

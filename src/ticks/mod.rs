// src/ticks/mod.rs
//! Tick generation: storage, label formatting and placement.
//!
//! - [`Ticker`] collects ticks and their label text for one axis
//! - [`Formatter`] turns a value into a bounded label
//! - [`Locator`] decides where ticks go for a range

pub mod formatter;
pub mod locator;
pub mod ticker;

pub use formatter::{DefaultFormatter, Formatter, PrintfFormatter};
pub use locator::{locator_default, nice_num, Locator};
pub use ticker::{LabelBuf, Tick, Ticker, LABEL_MAX_SIZE};

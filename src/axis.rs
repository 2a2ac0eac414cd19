// src/axis.rs
//! Per-axis state: range, fit accumulator, ticks and their strategies.

use crate::host::Host;
use crate::math::{almost_equal, Range};
use crate::ticks::{locator_default, DefaultFormatter, Formatter, Locator, Ticker};
use std::fmt;
use std::rc::Rc;

/// Smallest span used when converting to and from NDC. A collapsed range
/// (`min == max`) divides by this instead of zero.
pub const MIN_NDC_SPAN: f32 = f32::EPSILON;

/// Half-width of the symmetric NDC interval an axis maps onto.
pub const NDC_HALF_EXTENT: f32 = 0.5;

/// Largest NDC magnitude handed out. Values far outside a collapsed range
/// saturate here so rotation and projection stay finite.
pub const NDC_SATURATION: f32 = 1.0e18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Display and behaviour switches for one axis. All off by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisFlags {
    pub no_label: bool,
    pub no_grid_lines: bool,
    pub no_tick_marks: bool,
    pub no_tick_labels: bool,
    /// Fitting never moves the lower end.
    pub lock_min: bool,
    /// Fitting never moves the upper end.
    pub lock_max: bool,
    /// Opt out of the automatic per-frame fit.
    pub no_auto_fit: bool,
}

impl AxisFlags {
    pub fn locked() -> Self {
        Self {
            lock_min: true,
            lock_max: true,
            ..Self::default()
        }
    }

    pub fn no_decorations() -> Self {
        Self {
            no_label: true,
            no_grid_lines: true,
            no_tick_marks: true,
            no_tick_labels: true,
            ..Self::default()
        }
    }
}

pub struct AxisState {
    pub flags: AxisFlags,
    range: Range,
    label: Option<String>,
    pub ticker: Ticker,
    formatter: Rc<dyn Formatter>,
    locator: Locator,
    /// Set when explicit limits were given; keeps auto-fit off for this axis.
    pub(crate) pinned: bool,
    pub fit_this_frame: bool,
    fit_extents: Range,
}

impl fmt::Debug for AxisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisState")
            .field("flags", &self.flags)
            .field("range", &self.range)
            .field("label", &self.label)
            .field("fit_this_frame", &self.fit_this_frame)
            .field("fit_extents", &self.fit_extents)
            .finish_non_exhaustive()
    }
}

impl AxisState {
    pub fn new(host: Rc<dyn Host>) -> Self {
        Self {
            flags: AxisFlags::default(),
            range: Range::default(),
            label: None,
            ticker: Ticker::new(host),
            formatter: Rc::new(DefaultFormatter),
            locator: locator_default,
            pinned: false,
            fit_this_frame: true,
            fit_extents: Range::EMPTY,
        }
    }

    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Sets the range, swapping reversed ends. Non-finite input is ignored.
    pub fn set_range(&mut self, min: f32, max: f32) {
        if !min.is_finite() || !max.is_finite() {
            log::warn!("ignoring non-finite axis range [{}, {}]", min, max);
            return;
        }
        self.range = Range::ordered(min, max);
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: Option<&str>) {
        self.label = label.filter(|l| !l.is_empty()).map(str::to_owned);
    }

    pub fn has_label(&self) -> bool {
        self.label.is_some() && !self.flags.no_label
    }

    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    pub fn set_formatter(&mut self, formatter: Rc<dyn Formatter>) {
        self.formatter = formatter;
    }

    pub fn locator(&self) -> Locator {
        self.locator
    }

    pub fn set_locator(&mut self, locator: Locator) {
        self.locator = locator;
    }

    #[inline]
    pub fn fit_extents(&self) -> Range {
        self.fit_extents
    }

    /// Widens the fit accumulator to include `value`.
    #[inline]
    pub fn extend_fit(&mut self, value: f32) {
        self.fit_extents.extend(value);
    }

    /// Moves the range onto the accumulated extents if any finite value was
    /// seen, then reseeds the accumulator either way.
    pub fn apply_fit(&mut self) {
        let fit = self.fit_extents;
        if fit.is_finite_span() {
            let min = if self.flags.lock_min { self.range.min } else { fit.min };
            let max = if self.flags.lock_max { self.range.max } else { fit.max };
            let mut range = Range::ordered(min, max);
            if almost_equal(range.min as f64, range.max as f64, 2) {
                range.min -= NDC_HALF_EXTENT;
                range.max += NDC_HALF_EXTENT;
            }
            self.range = range;
        }
        self.reset_fit();
    }

    /// Reseeds the accumulator to `[+inf, -inf]`.
    #[inline]
    pub fn reset_fit(&mut self) {
        self.fit_extents = Range::EMPTY;
    }

    /// Span used by the NDC maps, never smaller than [`MIN_NDC_SPAN`].
    #[inline]
    pub fn ndc_span(&self) -> f32 {
        let span = self.range.size();
        if span < MIN_NDC_SPAN {
            MIN_NDC_SPAN
        } else {
            span
        }
    }

    /// Maps `[min, max]` onto `[-0.5, 0.5]`, the range center onto 0.
    /// The result saturates at [`NDC_SATURATION`].
    #[inline]
    pub fn plot_to_ndc(&self, value: f32) -> f32 {
        let ndc = (value - self.range.center()) / self.ndc_span();
        ndc.clamp(-NDC_SATURATION, NDC_SATURATION)
    }

    #[inline]
    pub fn ndc_to_plot(&self, value: f32) -> f32 {
        let plot = self.range.center() + value * self.ndc_span();
        plot.clamp(f32::MIN, f32::MAX)
    }

    /// Rebuilds the ticks for the current range.
    pub fn update_ticks(&mut self) {
        self.ticker.reset();
        let locate = self.locator;
        locate(&mut self.ticker, self.range, self.formatter.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;
    use crate::ticks::LabelBuf;
    use std::fmt::Write;

    fn axis() -> AxisState {
        AxisState::new(Rc::new(HeadlessHost::default()))
    }

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn test_defaults() {
        let a = axis();
        assert_eq!(a.range(), Range::new(0.0, 1.0));
        assert_eq!(a.fit_extents(), Range::EMPTY);
        assert!(a.fit_this_frame);
        assert!(!a.has_label());
    }

    #[test]
    fn test_set_range_normalizes() {
        let mut a = axis();
        a.set_range(5.0, -5.0);
        assert_eq!(a.range(), Range::new(-5.0, 5.0));
        a.set_range(f32::NAN, 1.0);
        assert_eq!(a.range(), Range::new(-5.0, 5.0));
    }

    #[test]
    fn test_ndc_round_trip() {
        let mut a = axis();
        a.set_range(-3.0, 17.0);
        assert_close(a.plot_to_ndc(-3.0), -0.5);
        assert_close(a.plot_to_ndc(17.0), 0.5);
        assert_close(a.plot_to_ndc(7.0), 0.0);
        for i in 0..=10 {
            let x = -0.5 + i as f32 * 0.1;
            assert_close(a.plot_to_ndc(a.ndc_to_plot(x)), x);
        }
    }

    #[test]
    fn test_degenerate_range_stays_finite() {
        let mut a = axis();
        a.set_range(2.0, 2.0);
        assert_eq!(a.plot_to_ndc(2.0), 0.0);
        assert_eq!(a.ndc_to_plot(0.0), 2.0);
        for v in [3.0, -1.0e32, 1.0e32, f32::MAX, f32::INFINITY] {
            let ndc = a.plot_to_ndc(v);
            assert!(ndc.is_finite() && ndc.abs() <= NDC_SATURATION, "{v} -> {ndc}");
        }
        assert!(a.ndc_to_plot(NDC_SATURATION).is_finite());
        assert!(a.ndc_to_plot(0.25).is_finite());
    }

    #[test]
    fn test_apply_fit_replaces_range_and_reseeds() {
        let mut a = axis();
        a.extend_fit(4.0);
        a.extend_fit(-2.0);
        a.extend_fit(1.0);
        a.apply_fit();
        assert_eq!(a.range(), Range::new(-2.0, 4.0));
        assert_eq!(a.fit_extents(), Range::EMPTY);

        // nothing observed since: the second fit keeps the range
        a.apply_fit();
        assert_eq!(a.range(), Range::new(-2.0, 4.0));
    }

    #[test]
    fn test_apply_fit_without_data_is_noop() {
        let mut a = axis();
        a.set_range(10.0, 20.0);
        a.extend_fit(f32::INFINITY);
        a.apply_fit();
        assert_eq!(a.range(), Range::new(10.0, 20.0));
    }

    #[test]
    fn test_single_point_fit_is_widened() {
        let mut a = axis();
        a.extend_fit(3.0);
        a.apply_fit();
        assert_eq!(a.range(), Range::new(2.5, 3.5));
    }

    #[test]
    fn test_locked_ends_survive_fit() {
        let mut a = axis();
        a.set_range(0.0, 100.0);
        a.flags.lock_min = true;
        a.extend_fit(20.0);
        a.extend_fit(50.0);
        a.apply_fit();
        assert_eq!(a.range(), Range::new(0.0, 50.0));

        a.flags = AxisFlags::locked();
        a.extend_fit(-1.0);
        a.apply_fit();
        assert_eq!(a.range(), Range::new(0.0, 50.0));
    }

    #[test]
    fn test_update_ticks_uses_formatter() {
        let mut a = axis();
        a.set_range(0.0, 10.0);
        a.set_formatter(Rc::new(|v: f32, buf: &mut LabelBuf| {
            buf.clear();
            let _ = write!(buf, "{}s", v);
            buf.len()
        }));
        a.update_ticks();
        assert_eq!(a.ticker.get_text(0), "0s");
        let first = a.ticker.tick_count();
        a.update_ticks();
        assert_eq!(a.ticker.tick_count(), first);
    }

    #[test]
    fn test_label_and_flags() {
        let mut a = axis();
        a.set_label(Some("Depth"));
        assert!(a.has_label());
        a.flags = AxisFlags::no_decorations();
        assert!(!a.has_label());
        a.set_label(Some(""));
        assert_eq!(a.label(), None);
    }
}

// src/ticks/locator.rs
//! Tick placement strategies.

use super::formatter::Formatter;
use super::ticker::Ticker;
use crate::math::Range;

/// Fills `ticker` with ticks for `range`, labelling them with `formatter`.
///
/// Invoked once per axis per frame, after the axis range is final.
pub type Locator = fn(&mut Ticker, Range, &dyn Formatter);

/// Major intervals the default locator aims for across a range.
const MAJOR_INTERVALS: f64 = 2.0;
/// Minor subdivisions of each major interval.
const MINOR_DIVISIONS: usize = 5;

/// Snaps `x` to the 1-2-5 ladder times a power of ten.
///
/// With `round` the nearest step is chosen, otherwise the next step up.
pub fn nice_num(x: f64, round: bool) -> f64 {
    let expv = x.log10().floor();
    let pow10 = 10f64.powf(expv);
    let f = x / pow10;
    let nf = if round {
        if f < 1.5 {
            1.0
        } else if f < 3.0 {
            2.0
        } else if f < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if f <= 1.0 {
        1.0
    } else if f <= 2.0 {
        2.0
    } else if f <= 5.0 {
        5.0
    } else {
        10.0
    };
    nf * pow10
}

/// Evenly spaced labelled majors on a "nice" step with unlabelled minors in
/// between. Ends of the range are included whenever they land on a step.
pub fn locator_default(ticker: &mut Ticker, range: Range, formatter: &dyn Formatter) {
    let (min, max) = (range.min as f64, range.max as f64);
    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return;
    }

    let nice_range = nice_num(span * 0.99, false);
    let interval = nice_num(nice_range / MAJOR_INTERVALS, true);
    let first = (min / interval).floor() as i64;
    let last = (max / interval).ceil() as i64;

    for k in first..=last {
        let mut major = k as f64 * interval;
        // keep labels from printing things like -1.4e-17 instead of 0
        if major - interval < 0.0 && major + interval > 0.0 {
            major = 0.0;
        }
        if major >= min && major <= max {
            ticker.add_tick_formatted(major as f32, true, true, formatter);
        }
        for i in 1..MINOR_DIVISIONS {
            let minor = major + i as f64 * interval / MINOR_DIVISIONS as f64;
            if minor >= min && minor <= max {
                ticker.add_tick_formatted(minor as f32, false, false, formatter);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;
    use crate::ticks::formatter::DefaultFormatter;
    use std::rc::Rc;

    fn run(range: Range) -> Ticker {
        let mut ticker = Ticker::new(Rc::new(HeadlessHost::default()));
        locator_default(&mut ticker, range, &DefaultFormatter);
        ticker
    }

    #[test]
    fn test_nice_num_ladder() {
        assert_eq!(nice_num(9.9, false), 10.0);
        assert_eq!(nice_num(5.0, true), 5.0);
        assert_eq!(nice_num(2.4, true), 2.0);
        assert_eq!(nice_num(1.2, false), 2.0);
        assert!((nice_num(0.024, true) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_default_locator_zero_to_ten() {
        let t = run(Range::new(0.0, 10.0));
        let majors: Vec<f32> = t.ticks().iter().filter(|t| t.major).map(|t| t.plot_pos).collect();
        assert_eq!(majors, vec![0.0, 5.0, 10.0]);

        let all: Vec<f32> = t.ticks().iter().map(|t| t.plot_pos).collect();
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(all.first(), Some(&0.0));
        assert_eq!(all.last(), Some(&10.0));
        assert_eq!(t.tick_count(), 11);

        assert_eq!(t.get_text(0), "0");
        assert_eq!(t.get_text(5), "5");
        assert_eq!(t.get_text(10), "10");
        assert!(t.ticks().iter().filter(|t| !t.major).all(|t| !t.has_label()));
    }

    #[test]
    fn test_default_locator_fractional_range() {
        let t = run(Range::new(-0.5, 0.5));
        let majors: Vec<&str> = t
            .ticks()
            .iter()
            .filter(|t| t.major)
            .map(|tick| t.text_of(tick))
            .collect();
        assert_eq!(majors, vec!["-0.5", "0", "0.5"]);
    }

    #[test]
    fn test_default_locator_ticks_inside_range() {
        let range = Range::new(0.13, 7.9);
        let t = run(range);
        assert!(t.tick_count() > 0);
        assert!(t.ticks().iter().all(|tick| range.contains(tick.plot_pos)));
    }

    #[test]
    fn test_default_locator_degenerate_range() {
        assert_eq!(run(Range::new(2.0, 2.0)).tick_count(), 0);
        assert_eq!(run(Range::new(0.0, f32::INFINITY)).tick_count(), 0);
        assert_eq!(run(Range::EMPTY).tick_count(), 0);
    }
}

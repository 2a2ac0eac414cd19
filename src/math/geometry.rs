// src/math/geometry.rs
//! Small value types shared by the axis and plot transforms.

use glam::{Vec2, Vec3};

/// A data-space point.
pub type Point = Vec3;

/// Closed interval `[min, max]` on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Default for Range {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl Range {
    /// Seed value of a fit accumulator: widened by the first extend.
    pub const EMPTY: Range = Range {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Builds a range, swapping the ends if they arrive reversed.
    pub fn ordered(a: f32, b: f32) -> Self {
        if a <= b {
            Self::new(a, b)
        } else {
            Self::new(b, a)
        }
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> f32 {
        0.5 * (self.min + self.max)
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Widens the range to include `value`. Non-finite values are ignored.
    #[inline]
    pub fn extend(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// True once at least one finite value has been folded in.
    #[inline]
    pub fn is_finite_span(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// A ray with an unnormalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point reached after `t` steps of `direction` (in its own length units).
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned screen rectangle in pixels (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min, min + size)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.y >= self.min.y && p.x < self.max.x && p.y < self.max.y
    }
}

/// Compares two values within `ulp` units in the last place.
#[inline]
pub fn almost_equal(v1: f64, v2: f64, ulp: u32) -> bool {
    (v1 - v2).abs() < f64::EPSILON * (v1 + v2).abs() * ulp as f64 || (v1 - v2).abs() < f64::MIN_POSITIVE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_extend_from_empty() {
        let mut r = Range::EMPTY;
        assert!(!r.is_finite_span());
        r.extend(3.0);
        assert_eq!(r, Range::new(3.0, 3.0));
        r.extend(-1.0);
        r.extend(f32::NAN);
        assert_eq!(r, Range::new(-1.0, 3.0));
        assert!(r.is_finite_span());
    }

    #[test]
    fn test_range_ordered() {
        assert_eq!(Range::ordered(4.0, -2.0), Range::new(-2.0, 4.0));
        assert_eq!(Range::ordered(-2.0, 4.0).center(), 1.0);
    }

    #[test]
    fn test_rect_metrics() {
        let r = Rect::from_min_size(Vec2::new(10.0, 20.0), Vec2::new(100.0, 50.0));
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
        assert_eq!(r.center(), Vec2::new(60.0, 45.0));
        assert!(r.contains(Vec2::new(10.0, 20.0)));
        assert!(!r.contains(Vec2::new(110.0, 20.0)));
    }

    #[test]
    fn test_almost_equal() {
        assert!(almost_equal(1.0, 1.0 + f64::EPSILON, 2));
        assert!(!almost_equal(1.0, 1.001, 2));
        assert!(almost_equal(0.0, 0.0, 2));
    }
}

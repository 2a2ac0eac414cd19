// src/plot.rs
//! Per-plot state and the 3-D coordinate pipeline.
//!
//! Coordinates pass through three spaces:
//! - plot space: raw data values on the X/Y/Z axes
//! - NDC: each axis normalized onto `[-0.5, 0.5]` around the box center,
//!   then rotated by the plot orientation
//! - pixels: an orthographic projection of NDC onto the plot rectangle
//!   (screen y grows downward)
//!
//! Picking goes the other way: a pixel becomes a ray in NDC, which is mapped
//! back into plot space without normalizing its direction.

use crate::axis::{Axis, AxisFlags, AxisState};
use crate::host::{display_label, Host};
use crate::item::ItemGroup;
use crate::math::{Point, Ray, Rect};
use crate::ticks::{Formatter, Locator};
use glam::{Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::rc::Rc;

/// NDC extent mapped onto the shorter side of the plot rectangle. Leaves room
/// for the rotated unit cube, whose diagonal is about 1.73.
pub const VIEW_SPAN: f32 = 1.8;

/// When a setup value is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Condition {
    /// Only on the frame the plot is created.
    #[default]
    Once,
    /// Every frame it is called.
    Always,
}

/// Pixels per NDC unit for `rect`.
#[inline]
fn zoom_for(rect: &Rect) -> f32 {
    let zoom = rect.width().min(rect.height()) / VIEW_SPAN;
    if zoom > 0.0 {
        zoom
    } else {
        1.0
    }
}

/// Projects an NDC point onto `rect`; depth is dropped.
pub fn ndc_to_pixel_in(ndc: Vec3, rect: &Rect) -> Vec2 {
    let zoom = zoom_for(rect);
    let center = rect.center();
    Vec2::new(center.x + ndc.x * zoom, center.y - ndc.y * zoom)
}

/// Ray through pixel `pix` looking into the screen.
///
/// The origin sits on the view plane `z = 0` through the box center and the
/// direction is `(0, 0, -1)`.
pub fn pixel_to_ndc_ray_in(pix: Vec2, rect: &Rect) -> Ray {
    let zoom = zoom_for(rect);
    let center = rect.center();
    let origin = Vec3::new((pix.x - center.x) / zoom, -(pix.y - center.y) / zoom, 0.0);
    Ray::new(origin, Vec3::NEG_Z)
}

/// Orientation with Z up on screen, tilted by `elevation` and spun by
/// `azimuth` (both degrees).
pub fn box_rotation(elevation_deg: f32, azimuth_deg: f32) -> Quat {
    let azimuth = Quat::from_rotation_z(azimuth_deg.to_radians());
    let z_up = Quat::from_rotation_x(-FRAC_PI_2);
    let elevation = Quat::from_rotation_x(elevation_deg.to_radians());
    (elevation * z_up * azimuth).normalize()
}

pub struct PlotState {
    pub id: u32,
    title: String,
    pub plot_rect: Rect,
    rotation: Quat,
    axes: [AxisState; 3],
    setup_locked: bool,
    /// Auto-fit every frame; individual axes can still opt out.
    pub auto_fit: bool,
    fit_requested: bool,
    fit_this_frame: bool,
    just_created: bool,
    pub hovered: bool,
    pub held: bool,
    pub items: ItemGroup,
    host: Rc<dyn Host>,
}

impl fmt::Debug for PlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotState")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("plot_rect", &self.plot_rect)
            .field("rotation", &self.rotation)
            .field("axes", &self.axes)
            .field("setup_locked", &self.setup_locked)
            .field("fit_this_frame", &self.fit_this_frame)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl PlotState {
    pub fn new(id: u32, label: &str, host: Rc<dyn Host>) -> Self {
        Self {
            id,
            title: display_label(label).to_owned(),
            plot_rect: Rect::default(),
            rotation: Quat::IDENTITY,
            axes: [
                AxisState::new(host.clone()),
                AxisState::new(host.clone()),
                AxisState::new(host.clone()),
            ],
            setup_locked: false,
            auto_fit: true,
            fit_requested: false,
            fit_this_frame: true,
            just_created: true,
            hovered: false,
            held: false,
            items: ItemGroup::default(),
            host,
        }
    }

    /// Restores every default; the identity and title are kept.
    pub fn reset(&mut self) {
        let title = std::mem::take(&mut self.title);
        *self = Self::new(self.id, &title, self.host.clone());
        log::debug!("plot {:#010x} reset", self.id);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn axis(&self, axis: Axis) -> &AxisState {
        &self.axes[axis.index()]
    }

    #[inline]
    pub fn axes(&self) -> &[AxisState; 3] {
        &self.axes
    }

    #[inline]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    #[inline]
    pub fn is_setup_locked(&self) -> bool {
        self.setup_locked
    }

    #[inline]
    pub fn just_created(&self) -> bool {
        self.just_created
    }

    #[inline]
    pub fn fit_this_frame(&self) -> bool {
        self.fit_this_frame
    }

    /// Fits all axes once, even with auto-fit off. The request is taken by the
    /// next setup lock, so one made after this frame's lock fits next frame.
    pub fn request_fit(&mut self) {
        self.fit_requested = true;
    }

    // ---------------------------------------------------------------------
    // Frame lifecycle
    // ---------------------------------------------------------------------

    /// Reopens setup for a new frame drawn into `rect`.
    pub fn begin_frame(&mut self, rect: Rect) {
        self.setup_locked = false;
        self.plot_rect = rect;
        self.items.legend.reset();
    }

    /// Ends setup: decides which axes fit this frame and builds their ticks.
    pub fn setup_lock(&mut self) {
        if self.setup_locked {
            return;
        }
        self.setup_locked = true;

        // a request made after this point waits for the next frame
        let requested = std::mem::take(&mut self.fit_requested);
        let mut any = false;
        for axis in &mut self.axes {
            axis.fit_this_frame = requested
                || (self.auto_fit && !axis.flags.no_auto_fit && !axis.pinned);
            any |= axis.fit_this_frame;
            axis.update_ticks();
        }
        self.fit_this_frame = any;
    }

    /// Applies the fit gathered during this frame and reseeds accumulators.
    pub fn end_frame(&mut self) {
        self.setup_lock();
        if self.fit_this_frame {
            for axis in &mut self.axes {
                if axis.fit_this_frame {
                    axis.apply_fit();
                } else {
                    axis.reset_fit();
                }
            }
            log::debug!(
                "plot {:#010x} fit -> min {:?} max {:?}",
                self.id,
                self.range_min(),
                self.range_max()
            );
        } else {
            for axis in &mut self.axes {
                axis.reset_fit();
            }
        }
        self.just_created = false;
    }

    // ---------------------------------------------------------------------
    // Setup (rejected once locked)
    // ---------------------------------------------------------------------

    fn setup_allowed(&self, what: &str) -> bool {
        if self.setup_locked {
            log::warn!("plot '{}': {} ignored after setup lock", self.title, what);
            return false;
        }
        true
    }

    pub fn setup_axis(&mut self, axis: Axis, label: Option<&str>, flags: AxisFlags) {
        if !self.setup_allowed("setup_axis") {
            return;
        }
        let a = &mut self.axes[axis.index()];
        a.set_label(label);
        a.flags = flags;
    }

    /// Sets explicit limits. Axes given limits stop auto-fitting.
    pub fn setup_axis_limits(&mut self, axis: Axis, min: f32, max: f32, cond: Condition) {
        if !self.setup_allowed("setup_axis_limits") {
            return;
        }
        if cond == Condition::Once && !self.just_created {
            return;
        }
        let a = &mut self.axes[axis.index()];
        a.set_range(min, max);
        a.pinned = true;
    }

    pub fn setup_axis_format(&mut self, axis: Axis, formatter: Rc<dyn Formatter>) {
        if !self.setup_allowed("setup_axis_format") {
            return;
        }
        self.axes[axis.index()].set_formatter(formatter);
    }

    pub fn setup_axis_locator(&mut self, axis: Axis, locator: Locator) {
        if !self.setup_allowed("setup_axis_locator") {
            return;
        }
        self.axes[axis.index()].set_locator(locator);
    }

    /// Sets all three ranges from two opposite corners.
    pub fn set_range(&mut self, min: Point, max: Point) {
        if !self.setup_allowed("set_range") {
            return;
        }
        for axis in Axis::ALL {
            let i = axis.index();
            self.axes[i].set_range(min[i], max[i]);
        }
    }

    /// Sets the box orientation. Non-finite or zero quaternions are ignored.
    pub fn setup_box_rotation(&mut self, rotation: Quat, cond: Condition) {
        if !self.setup_allowed("setup_box_rotation") {
            return;
        }
        if cond == Condition::Once && !self.just_created {
            return;
        }
        if !rotation.is_finite() || rotation.length_squared() < f32::EPSILON {
            log::warn!("plot '{}': ignoring degenerate rotation {:?}", self.title, rotation);
            return;
        }
        self.rotation = rotation.normalize();
    }

    // ---------------------------------------------------------------------
    // Fitting
    // ---------------------------------------------------------------------

    /// Folds `point` into the fit of every axis fitting this frame.
    pub fn extend_fit(&mut self, point: Point) {
        if !self.fit_this_frame {
            return;
        }
        for axis in Axis::ALL {
            let a = &mut self.axes[axis.index()];
            if a.fit_this_frame {
                a.extend_fit(point[axis.index()]);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Range queries
    // ---------------------------------------------------------------------

    pub fn range_min(&self) -> Point {
        Vec3::new(
            self.axes[0].range().min,
            self.axes[1].range().min,
            self.axes[2].range().min,
        )
    }

    pub fn range_max(&self) -> Point {
        Vec3::new(
            self.axes[0].range().max,
            self.axes[1].range().max,
            self.axes[2].range().max,
        )
    }

    pub fn range_center(&self) -> Point {
        (self.range_min() + self.range_max()) * 0.5
    }

    fn ndc_spans(&self) -> Vec3 {
        Vec3::new(
            self.axes[0].ndc_span(),
            self.axes[1].ndc_span(),
            self.axes[2].ndc_span(),
        )
    }

    // ---------------------------------------------------------------------
    // Transforms
    // ---------------------------------------------------------------------

    /// Plot space to rotated NDC.
    pub fn point_to_ndc(&self, point: Point) -> Vec3 {
        let normalized = Vec3::new(
            self.axes[0].plot_to_ndc(point.x),
            self.axes[1].plot_to_ndc(point.y),
            self.axes[2].plot_to_ndc(point.z),
        );
        self.rotation * normalized
    }

    /// Rotated NDC back to plot space.
    pub fn ndc_to_point(&self, ndc: Vec3) -> Point {
        let n = self.rotation.conjugate() * ndc;
        Vec3::new(
            self.axes[0].ndc_to_plot(n.x),
            self.axes[1].ndc_to_plot(n.y),
            self.axes[2].ndc_to_plot(n.z),
        )
    }

    pub fn ndc_to_pixel(&self, ndc: Vec3) -> Vec2 {
        ndc_to_pixel_in(ndc, &self.plot_rect)
    }

    pub fn point_to_pixel(&self, point: Point) -> Vec2 {
        self.ndc_to_pixel(self.point_to_ndc(point))
    }

    pub fn pixel_to_ndc_ray(&self, pix: Vec2) -> Ray {
        pixel_to_ndc_ray_in(pix, &self.plot_rect)
    }

    /// Maps an NDC ray into plot space. The direction is transformed as a
    /// vector (rotation and per-axis scale, no translation) and keeps whatever
    /// length that gives it.
    pub fn ndc_ray_to_plot_ray(&self, ray: &Ray) -> Ray {
        let direction = (self.rotation.conjugate() * ray.direction) * self.ndc_spans();
        Ray::new(self.ndc_to_point(ray.origin), direction)
    }
}

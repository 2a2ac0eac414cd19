// src/context.rs
//! The explicit plotting context: plot registry, current plot and item
//! cursors, colormaps and style.
//!
//! A frame looks like:
//!
//! ```
//! use glam::{Vec2, Vec3};
//! use plot3d::{Context, Rect};
//!
//! let mut ctx = Context::headless();
//! let rect = Rect::from_min_size(Vec2::ZERO, Vec2::new(400.0, 300.0));
//! if ctx.begin_plot("Scatter", rect)? {
//!     if ctx.begin_item("points")? {
//!         ctx.fit_points([Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0)])?;
//!         ctx.end_item()?;
//!     }
//!     ctx.end_plot()?;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::axis::{Axis, AxisFlags};
use crate::colormap::{presets, ColormapId, ColormapTable};
use crate::host::{HeadlessHost, Host};
use crate::item::{ItemGroup, ItemStyle, NextItemData};
use crate::math::{Point, Ray, Rect};
use crate::plot::{box_rotation, Condition, PlotState};
use crate::registry::PlotRegistry;
use crate::style::Style;
use crate::ticks::{Formatter, Locator};
use anyhow::{anyhow, bail, Result};
use glam::{Quat, Vec2, Vec3};
use std::fmt;
use std::rc::Rc;

/// Key color for the next item of `items`; advances its colormap cursor.
fn advance_colormap(table: &ColormapTable, cmap: ColormapId, items: &mut ItemGroup) -> u32 {
    let count = table.get_key_count(cmap);
    let color = table.get_key_color(cmap, items.colormap_idx % count);
    items.colormap_idx = items.colormap_idx.wrapping_add(1);
    color
}

pub struct Context {
    host: Rc<dyn Host>,
    plots: PlotRegistry,
    current_plot: Option<usize>,
    current_item: Option<usize>,
    next_item: NextItemData,
    item_style: Option<ItemStyle>,
    style: Style,
    colormap_stack: Vec<ColormapId>,
    colormaps: ColormapTable,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("plots", &self.plots)
            .field("current_plot", &self.current_plot)
            .field("current_item", &self.current_item)
            .field("style", &self.style)
            .field("colormaps", &self.colormaps.count())
            .finish_non_exhaustive()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::headless()
    }
}

impl Context {
    pub fn new(host: Rc<dyn Host>) -> Self {
        let mut colormaps = ColormapTable::new();
        presets::register_builtin(&mut colormaps);
        log::debug!("plot context created with {} colormaps", colormaps.count());
        Self {
            plots: PlotRegistry::new(host.clone()),
            host,
            current_plot: None,
            current_item: None,
            next_item: NextItemData::default(),
            item_style: None,
            style: Style::default(),
            colormap_stack: Vec::new(),
            colormaps,
        }
    }

    /// Context with fixed-advance text metrics and CRC-32 label hashing.
    pub fn headless() -> Self {
        Self::new(Rc::new(HeadlessHost::default()))
    }

    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    pub fn plots(&self) -> &PlotRegistry {
        &self.plots
    }

    pub fn get_plot(&self, label: &str) -> Option<&PlotState> {
        self.plots.get_by_label(label)
    }

    pub fn current_plot(&self) -> Option<&PlotState> {
        self.plots.get(self.current_plot?)
    }

    pub fn current_plot_mut(&mut self) -> Option<&mut PlotState> {
        self.plots.get_mut(self.current_plot?)
    }

    fn plot_mut(&mut self, what: &str) -> Result<&mut PlotState> {
        let idx = self
            .current_plot
            .ok_or_else(|| anyhow!("{} called outside begin_plot/end_plot", what))?;
        self.plots
            .get_mut(idx)
            .ok_or_else(|| anyhow!("current plot slot {} vanished", idx))
    }

    // ---------------------------------------------------------------------
    // Plot scope
    // ---------------------------------------------------------------------

    /// Opens the plot labelled `label` for this frame, drawn into `rect`.
    ///
    /// Returns `Ok(false)` when `rect` has no area; the plot is then not
    /// opened and `end_plot` must not be called.
    pub fn begin_plot(&mut self, label: &str, rect: Rect) -> Result<bool> {
        if let Some(idx) = self.current_plot {
            let open = self.plots.get(idx).map_or("?", |p| p.title());
            bail!("begin_plot('{}') while plot '{}' is still open", label, open);
        }
        if !(rect.width() > 0.0 && rect.height() > 0.0) {
            log::trace!("plot '{}' skipped: empty rect {:?}", label, rect);
            return Ok(false);
        }
        let (idx, _) = self.plots.ensure(label);
        if let Some(plot) = self.plots.get_mut(idx) {
            plot.begin_frame(rect);
        }
        self.current_plot = Some(idx);
        Ok(true)
    }

    /// Closes the current plot and applies this frame's fit.
    pub fn end_plot(&mut self) -> Result<()> {
        if self.current_item.is_some() {
            log::warn!("end_plot with an item still open; closing it");
            self.end_item()?;
        }
        self.plot_mut("end_plot")?.end_frame();
        self.current_plot = None;
        self.next_item.reset();
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Setup
    // ---------------------------------------------------------------------

    pub fn setup_axis(&mut self, axis: Axis, label: Option<&str>, flags: AxisFlags) -> Result<()> {
        self.plot_mut("setup_axis")?.setup_axis(axis, label, flags);
        Ok(())
    }

    pub fn setup_axis_limits(&mut self, axis: Axis, min: f32, max: f32, cond: Condition) -> Result<()> {
        self.plot_mut("setup_axis_limits")?
            .setup_axis_limits(axis, min, max, cond);
        Ok(())
    }

    pub fn setup_axis_format(&mut self, axis: Axis, formatter: Rc<dyn Formatter>) -> Result<()> {
        self.plot_mut("setup_axis_format")?
            .setup_axis_format(axis, formatter);
        Ok(())
    }

    pub fn setup_axis_locator(&mut self, axis: Axis, locator: Locator) -> Result<()> {
        self.plot_mut("setup_axis_locator")?
            .setup_axis_locator(axis, locator);
        Ok(())
    }

    /// Labels all three axes and gives them the same flags.
    pub fn setup_axes(&mut self, labels: [Option<&str>; 3], flags: AxisFlags) -> Result<()> {
        let plot = self.plot_mut("setup_axes")?;
        for (axis, label) in Axis::ALL.into_iter().zip(labels) {
            plot.setup_axis(axis, label, flags);
        }
        Ok(())
    }

    pub fn setup_axes_limits(&mut self, min: Point, max: Point, cond: Condition) -> Result<()> {
        let plot = self.plot_mut("setup_axes_limits")?;
        for axis in Axis::ALL {
            let i = axis.index();
            plot.setup_axis_limits(axis, min[i], max[i], cond);
        }
        Ok(())
    }

    pub fn setup_box_rotation(&mut self, rotation: Quat, cond: Condition) -> Result<()> {
        self.plot_mut("setup_box_rotation")?
            .setup_box_rotation(rotation, cond);
        Ok(())
    }

    /// Orientation from elevation and azimuth in degrees, Z pointing up.
    pub fn setup_box_rotation_deg(&mut self, elevation: f32, azimuth: f32, cond: Condition) -> Result<()> {
        self.setup_box_rotation(box_rotation(elevation, azimuth), cond)
    }

    /// Ends setup for the current plot. Implied by the first item.
    pub fn setup_lock(&mut self) -> Result<()> {
        self.plot_mut("setup_lock")?.setup_lock();
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Items
    // ---------------------------------------------------------------------

    /// Starts submitting the item labelled `label` in the current plot.
    ///
    /// New items take their color from the next-item line color if one was
    /// set, else from the next colormap key. Returns `Ok(false)` for a hidden
    /// item, in which case `end_item` must not be called.
    pub fn begin_item(&mut self, label: &str) -> Result<bool> {
        if self.current_item.is_some() {
            bail!("begin_item('{}') while another item is open", label);
        }
        let id = self.host.hash_str(label);
        let cmap = self.style.colormap;
        let next = self.next_item;
        let idx = self
            .current_plot
            .ok_or_else(|| anyhow!("begin_item('{}') outside begin_plot/end_plot", label))?;
        let Some(plot) = self.plots.get_mut(idx) else {
            bail!("current plot slot {} vanished", idx);
        };
        plot.setup_lock();

        let items = &mut plot.items;
        let (item_idx, created) = items.get_or_add_item(id);
        if created {
            let color = match next.line_color {
                Some(color) => color,
                None => advance_colormap(&self.colormaps, cmap, items),
            };
            if let Some(item) = items.get_item_by_index_mut(item_idx) {
                item.color = color;
            }
            log::trace!("item '{}' created with color {:#010x}", label, color);
        }
        items.add_legend_entry(item_idx, label);

        let Some(item) = items.get_item_by_index_mut(item_idx) else {
            bail!("item slot {} vanished", item_idx);
        };
        if created && next.hidden {
            item.show = false;
        }
        if !item.show {
            self.next_item.reset();
            return Ok(false);
        }
        self.item_style = Some(ItemStyle::resolve(&next, item, &self.style));
        self.current_item = Some(item_idx);
        Ok(true)
    }

    pub fn end_item(&mut self) -> Result<()> {
        if self.current_item.take().is_none() {
            bail!("end_item without a matching begin_item");
        }
        self.item_style = None;
        self.next_item.reset();
        Ok(())
    }

    /// Folds data points into the current plot's fit for this frame.
    pub fn fit_points<I>(&mut self, points: I) -> Result<()>
    where
        I: IntoIterator<Item = Point>,
    {
        let plot = self.plot_mut("fit_points")?;
        plot.setup_lock();
        if !plot.fit_this_frame() {
            return Ok(());
        }
        for p in points {
            plot.extend_fit(p);
        }
        Ok(())
    }

    /// Style of the open item, resolved at `begin_item`.
    pub fn item_style(&self) -> Option<&ItemStyle> {
        self.item_style.as_ref()
    }

    /// Overrides the line of the next item. `None` keeps the automatic value.
    pub fn set_next_line_style(&mut self, color: Option<u32>, weight: Option<f32>) {
        self.next_item.line_color = color;
        self.next_item.line_weight = weight;
    }

    pub fn set_next_fill_style(&mut self, color: Option<u32>, alpha: Option<f32>) {
        self.next_item.fill_color = color;
        self.next_item.fill_alpha = alpha;
    }

    pub fn set_next_marker_style(
        &mut self,
        size: Option<f32>,
        fill: Option<u32>,
        weight: Option<f32>,
        outline: Option<u32>,
    ) {
        self.next_item.marker_size = size;
        self.next_item.marker_fill = fill;
        self.next_item.marker_weight = weight;
        self.next_item.marker_outline = outline;
    }

    /// Hides the next item the first time it is submitted.
    pub fn hide_next_item(&mut self) {
        self.next_item.hidden = true;
    }

    // ---------------------------------------------------------------------
    // Colormaps
    // ---------------------------------------------------------------------

    pub fn colormaps(&self) -> &ColormapTable {
        &self.colormaps
    }

    pub fn colormaps_mut(&mut self) -> &mut ColormapTable {
        &mut self.colormaps
    }

    pub fn add_colormap(&mut self, name: &str, keys: &[u32], qual: bool) -> Option<ColormapId> {
        self.colormaps.append(name, keys, qual)
    }

    #[inline]
    fn resolve_colormap(&self, cmap: Option<ColormapId>) -> ColormapId {
        cmap.unwrap_or(self.style.colormap)
    }

    /// Key color `idx` of `cmap` (or the active map), wrapping around.
    pub fn get_colormap_color(&self, idx: usize, cmap: Option<ColormapId>) -> u32 {
        let cmap = self.resolve_colormap(cmap);
        let count = self.colormaps.get_key_count(cmap);
        self.colormaps.get_key_color(cmap, idx % count)
    }

    /// Next automatic item color of the current plot.
    pub fn next_colormap_color(&mut self) -> Result<u32> {
        let cmap = self.style.colormap;
        let idx = self
            .current_plot
            .ok_or_else(|| anyhow!("next_colormap_color outside begin_plot/end_plot"))?;
        let Some(plot) = self.plots.get_mut(idx) else {
            bail!("current plot slot {} vanished", idx);
        };
        Ok(advance_colormap(&self.colormaps, cmap, &mut plot.items))
    }

    /// Color at `t` in `[0, 1]` along `cmap` (or the active map).
    pub fn sample_colormap(&self, t: f32, cmap: Option<ColormapId>) -> u32 {
        self.colormaps.lerp_table(self.resolve_colormap(cmap), t)
    }

    /// Makes `cmap` the active colormap until the matching pop.
    pub fn push_colormap(&mut self, cmap: ColormapId) {
        self.colormap_stack.push(self.style.colormap);
        self.style.colormap = cmap;
    }

    pub fn push_colormap_by_name(&mut self, name: &str) -> Result<()> {
        let cmap = self
            .colormaps
            .get_index(name)
            .ok_or_else(|| anyhow!("unknown colormap '{}'", name))?;
        self.push_colormap(cmap);
        Ok(())
    }

    pub fn pop_colormap(&mut self) -> Result<()> {
        let prev = self
            .colormap_stack
            .pop()
            .ok_or_else(|| anyhow!("pop_colormap without a matching push"))?;
        self.style.colormap = prev;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Coordinate conversions on the current plot
    // ---------------------------------------------------------------------

    pub fn plot_to_ndc(&self, point: Point) -> Option<Vec3> {
        Some(self.current_plot()?.point_to_ndc(point))
    }

    pub fn ndc_to_plot(&self, ndc: Vec3) -> Option<Point> {
        Some(self.current_plot()?.ndc_to_point(ndc))
    }

    pub fn ndc_to_pixels(&self, ndc: Vec3) -> Option<Vec2> {
        Some(self.current_plot()?.ndc_to_pixel(ndc))
    }

    pub fn plot_to_pixels(&self, point: Point) -> Option<Vec2> {
        Some(self.current_plot()?.point_to_pixel(point))
    }

    pub fn pixels_to_ndc_ray(&self, pix: Vec2) -> Option<Ray> {
        Some(self.current_plot()?.pixel_to_ndc_ray(pix))
    }

    pub fn ndc_ray_to_plot_ray(&self, ray: &Ray) -> Option<Ray> {
        Some(self.current_plot()?.ndc_ray_to_plot_ray(ray))
    }

    /// Picking ray in plot space through pixel `pix`.
    pub fn pixels_to_plot_ray(&self, pix: Vec2) -> Option<Ray> {
        let plot = self.current_plot()?;
        Some(plot.ndc_ray_to_plot_ray(&plot.pixel_to_ndc_ray(pix)))
    }
}

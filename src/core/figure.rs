use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::core::{
    AppendSide, AppendedAxes, Axes, AxesDivider, AxesRole, AxesSize, AxisId, Bounds,
    ColorMappable, Colorbar, ColorbarId, ColorbarMapping, ColorbarOrientation, ColorbarTicks,
    Colormap, ContourLevels, ContourSet, DrawableAxis, FigureConfig, FigureId, ImagePlot,
    Normalize, ValueGrid, Viewport, validate_color_mappable,
};
use crate::error::{ChartError, ChartResult};

/// Top-level drawing surface owning axes, their dividers and colorbars.
///
/// Every mutation goes through `&mut self`, so sharing a figure across
/// threads requires the caller to serialize access explicitly.
#[derive(Debug, Clone)]
pub struct Figure {
    id: FigureId,
    config: FigureConfig,
    axes: IndexMap<AxisId, Axes>,
    dividers: IndexMap<AxisId, AxesDivider>,
    colorbars: IndexMap<ColorbarId, Colorbar>,
    next_axis: u32,
    next_colorbar: u32,
}

impl Figure {
    pub fn new(config: FigureConfig) -> ChartResult<Self> {
        config.validate()?;
        let id = FigureId::next();
        debug!(
            figure = id.raw(),
            width_in = config.width_in,
            height_in = config.height_in,
            dpi = config.dpi,
            "create figure"
        );
        Ok(Self {
            id,
            config,
            axes: IndexMap::new(),
            dividers: IndexMap::new(),
            colorbars: IndexMap::new(),
            next_axis: 0,
            next_colorbar: 0,
        })
    }

    #[must_use]
    pub fn id(&self) -> FigureId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> FigureConfig {
        self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport()
    }

    /// Adds one axes covering the configured subplot box.
    pub fn add_subplot(&mut self) -> AxisId {
        let bounds = self.config.subplot_margins.bounds();
        self.insert_axes(bounds)
    }

    /// Adds one axes at an explicit figure-fraction position.
    pub fn add_axes(&mut self, bounds: Bounds) -> ChartResult<AxisId> {
        bounds.validate()?;
        Ok(self.insert_axes(bounds))
    }

    fn insert_axes(&mut self, bounds: Bounds) -> AxisId {
        let id = self.allocate_axis_id();
        self.next_axis = self.next_axis.saturating_add(1);
        self.axes.insert(id, Axes::new(id, bounds));
        trace!(figure = self.id.raw(), axis = id.index(), "add axes");
        id
    }

    fn allocate_axis_id(&self) -> AxisId {
        AxisId::new(self.id, self.next_axis)
    }

    #[must_use]
    pub fn contains_axis(&self, axis: AxisId) -> bool {
        axis.figure() == self.id && self.axes.contains_key(&axis)
    }

    #[must_use]
    pub fn axes(&self, axis: AxisId) -> Option<&Axes> {
        if axis.figure() != self.id {
            return None;
        }
        self.axes.get(&axis)
    }

    /// Axes in insertion order.
    pub fn axes_iter(&self) -> impl Iterator<Item = &Axes> {
        self.axes.values()
    }

    #[must_use]
    pub fn axes_count(&self) -> usize {
        self.axes.len()
    }

    /// Resolves an axis handle owned by this figure.
    ///
    /// Handles from other figures and unknown handles are rejected with
    /// [`ChartError::InvalidArgument`].
    pub fn resolve_axis<A: DrawableAxis + ?Sized>(&self, axis: &A) -> ChartResult<&Axes> {
        let id = axis.axis_id();
        if axis.figure_id() != self.id {
            warn!(
                figure = self.id.raw(),
                foreign_figure = axis.figure_id().raw(),
                axis = id.index(),
                "axis belongs to another figure"
            );
            return Err(ChartError::InvalidArgument(format!(
                "axis {} belongs to figure {}, not figure {}",
                id.index(),
                axis.figure_id().raw(),
                self.id.raw()
            )));
        }
        self.axes.get(&id).ok_or_else(|| {
            ChartError::InvalidArgument(format!(
                "axis {} does not exist in figure {}",
                id.index(),
                self.id.raw()
            ))
        })
    }

    /// Divider that has carved axes out of `parent`, if any.
    #[must_use]
    pub fn divider(&self, parent: AxisId) -> Option<&AxesDivider> {
        self.dividers.get(&parent)
    }

    /// Inserts a new axes carved out of `parent` on `side`.
    ///
    /// The parent's divider persists between calls, so repeated appends on the
    /// same side stack outwards. The parent and every earlier sibling are
    /// relaid out; on error nothing changes.
    pub fn append_child_axis(
        &mut self,
        parent: AxisId,
        side: AppendSide,
        size: AxesSize,
        pad: AxesSize,
    ) -> ChartResult<AxisId> {
        let parent_position = self.resolve_axis(&parent)?.position;
        let divider = self
            .dividers
            .get(&parent)
            .cloned()
            .unwrap_or_else(|| AxesDivider::new(parent, parent_position));

        let child = self.allocate_axis_id();
        let entry = AppendedAxes {
            axis: child,
            side,
            size,
            pad,
        };
        let (divider, layout) = divider.with_appended(entry, self.config.size_inches())?;

        self.next_axis = self.next_axis.saturating_add(1);
        if let Some(parent_axes) = self.axes.get_mut(&parent) {
            parent_axes.position = layout.parent;
        }
        for (axis, bounds) in &layout.appended {
            if *axis == child {
                self.axes.insert(child, Axes::new(child, *bounds));
            } else if let Some(sibling) = self.axes.get_mut(axis) {
                sibling.position = *bounds;
            }
        }
        self.dividers.insert(parent, divider);

        debug!(
            figure = self.id.raw(),
            parent = parent.index(),
            child = child.index(),
            side = ?side,
            size = %size,
            pad = %pad,
            "append child axes"
        );
        Ok(child)
    }

    /// Displays `grid` on `axis`, autoscaled to its finite range.
    pub fn imshow(
        &mut self,
        axis: AxisId,
        grid: ValueGrid,
        colormap: Colormap,
    ) -> ChartResult<ImagePlot> {
        self.resolve_axis(&axis)?;
        let image = ImagePlot::new(axis, grid, colormap);
        self.push_image(image)
    }

    /// Displays `grid` on `axis` with explicit color limits.
    pub fn imshow_with_norm(
        &mut self,
        axis: AxisId,
        grid: ValueGrid,
        colormap: Colormap,
        norm: Normalize,
    ) -> ChartResult<ImagePlot> {
        self.resolve_axis(&axis)?;
        let image = ImagePlot::new(axis, grid, colormap).with_norm(norm)?;
        self.push_image(image)
    }

    /// Displays a prepared image, for example one with a custom extent.
    pub fn add_image(&mut self, image: ImagePlot) -> ChartResult<ImagePlot> {
        self.resolve_axis(&image.axis())?;
        self.push_image(image)
    }

    fn push_image(&mut self, image: ImagePlot) -> ChartResult<ImagePlot> {
        let axes = self.axes.get_mut(&image.axis()).ok_or_else(|| {
            ChartError::InvalidArgument("image axis disappeared from figure".to_owned())
        })?;
        trace!(
            figure = self.id.raw(),
            axis = image.axis().index(),
            rows = image.grid().rows(),
            cols = image.grid().cols(),
            "add image"
        );
        axes.images.push(image.clone());
        Ok(image)
    }

    /// Displays `grid` on `axis` as filled contour bands.
    pub fn contourf(
        &mut self,
        axis: AxisId,
        grid: ValueGrid,
        levels: ContourLevels,
        colormap: Colormap,
    ) -> ChartResult<ContourSet> {
        self.resolve_axis(&axis)?;
        let contours = ContourSet::new(axis, grid, levels, colormap)?;
        let axes = self.axes.get_mut(&axis).ok_or_else(|| {
            ChartError::InvalidArgument("contour axis disappeared from figure".to_owned())
        })?;
        trace!(
            figure = self.id.raw(),
            axis = axis.index(),
            bands = contours.band_count(),
            "add filled contours"
        );
        axes.contours.push(contours.clone());
        Ok(contours)
    }

    /// Draws a colorbar for `mappable` into the existing axes `cax`.
    ///
    /// `cax` must not already host a colorbar.
    pub fn add_colorbar<M: ColorMappable + ?Sized>(
        &mut self,
        mappable: &M,
        cax: AxisId,
        orientation: ColorbarOrientation,
    ) -> ChartResult<ColorbarId> {
        validate_color_mappable(mappable)?;
        let role = self.resolve_axis(&cax)?.role;
        if let AxesRole::Colorbar(existing) = role {
            return Err(ChartError::InvalidData(format!(
                "axis {} already hosts colorbar {}",
                cax.index(),
                existing.index()
            )));
        }

        let id = ColorbarId::new(self.id, self.next_colorbar);
        let parent = self
            .dividers
            .values()
            .find(|divider| divider.appended().iter().any(|entry| entry.axis == cax))
            .map(AxesDivider::parent);
        let colorbar = Colorbar::new(
            id,
            cax,
            parent,
            orientation,
            ColorbarMapping::from_mappable(mappable),
        );

        let (vmin, vmax) = colorbar.value_range();
        self.next_colorbar = self.next_colorbar.saturating_add(1);
        if let Some(axes) = self.axes.get_mut(&cax) {
            axes.role = AxesRole::Colorbar(id);
        }
        self.colorbars.insert(id, colorbar);

        debug!(
            figure = self.id.raw(),
            colorbar = id.index(),
            cax = cax.index(),
            vmin,
            vmax,
            "create colorbar"
        );
        Ok(id)
    }

    #[must_use]
    pub fn colorbar(&self, id: ColorbarId) -> Option<&Colorbar> {
        if id.figure() != self.id {
            return None;
        }
        self.colorbars.get(&id)
    }

    /// Colorbars in creation order.
    pub fn colorbars(&self) -> impl Iterator<Item = &Colorbar> {
        self.colorbars.values()
    }

    #[must_use]
    pub fn colorbar_count(&self) -> usize {
        self.colorbars.len()
    }

    /// Replaces automatic tick selection with explicit values.
    ///
    /// Returns `false` when the colorbar is unknown to this figure.
    pub fn set_colorbar_ticks(&mut self, id: ColorbarId, ticks: Vec<f64>) -> ChartResult<bool> {
        if ticks.iter().any(|tick| !tick.is_finite()) {
            return Err(ChartError::InvalidData(
                "colorbar ticks must be finite".to_owned(),
            ));
        }
        let Some(colorbar) = self.colorbar_mut(id) else {
            return Ok(false);
        };
        colorbar.ticks = ColorbarTicks::Fixed(ticks);
        Ok(true)
    }

    /// Restores automatic tick selection.
    pub fn reset_colorbar_ticks(&mut self, id: ColorbarId) -> bool {
        let Some(colorbar) = self.colorbar_mut(id) else {
            return false;
        };
        colorbar.ticks = ColorbarTicks::Auto;
        true
    }

    /// Sets the text drawn along the colorbar's long side.
    pub fn set_colorbar_label(&mut self, id: ColorbarId, label: impl Into<String>) -> bool {
        let label = label.into();
        let Some(colorbar) = self.colorbar_mut(id) else {
            return false;
        };
        colorbar.label = if label.is_empty() { None } else { Some(label) };
        true
    }

    fn colorbar_mut(&mut self, id: ColorbarId) -> Option<&mut Colorbar> {
        if id.figure() != self.id {
            return None;
        }
        self.colorbars.get_mut(&id)
    }
}

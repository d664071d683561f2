use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{AxisId, Colormap, Extent, Normalize, ValueGrid};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Intensity scale that can drive a colorbar.
///
/// Implementors expose normalization limits and a colormap. Discrete scales
/// (filled contours) additionally report their band boundaries.
pub trait ColorMappable {
    fn norm(&self) -> Normalize;

    fn colormap(&self) -> Colormap;

    /// Strictly increasing band edges for discrete scales.
    fn boundaries(&self) -> Option<&[f64]> {
        None
    }

    /// Color for one data value, `None` for masked (non-finite) samples.
    fn to_color(&self, value: f64) -> Option<Color> {
        if !value.is_finite() {
            return None;
        }
        Some(self.colormap().map(self.norm().normalize(value)))
    }

    /// Value range a colorbar for this scale spans.
    fn value_range(&self) -> (f64, f64) {
        match self.boundaries() {
            Some([first, .., last]) => (*first, *last),
            _ => {
                let norm = self.norm();
                (norm.vmin, norm.vmax)
            }
        }
    }
}

impl<T: ColorMappable + ?Sized> ColorMappable for &T {
    fn norm(&self) -> Normalize {
        (**self).norm()
    }

    fn colormap(&self) -> Colormap {
        (**self).colormap()
    }

    fn boundaries(&self) -> Option<&[f64]> {
        (**self).boundaries()
    }

    fn to_color(&self, value: f64) -> Option<Color> {
        (**self).to_color(value)
    }
}

/// Checks that an intensity scale has usable limits and boundaries.
///
/// Failures are reported as [`ChartError::InvalidArgument`] since they describe
/// the caller's object rather than figure state.
pub fn validate_color_mappable<M: ColorMappable + ?Sized>(mappable: &M) -> ChartResult<()> {
    mappable
        .norm()
        .validate()
        .map_err(|err| ChartError::InvalidArgument(format!("intensity scale: {err}")))?;

    if let Some(boundaries) = mappable.boundaries() {
        validate_boundaries(boundaries).map_err(|err| {
            ChartError::InvalidArgument(format!("intensity scale: {err}"))
        })?;
    }
    Ok(())
}

pub(crate) fn validate_boundaries(boundaries: &[f64]) -> ChartResult<()> {
    if boundaries.len() < 2 {
        return Err(ChartError::InvalidData(
            "at least two boundaries are required".to_owned(),
        ));
    }
    if boundaries.iter().any(|value| !value.is_finite()) {
        return Err(ChartError::InvalidData(
            "boundaries must be finite".to_owned(),
        ));
    }
    if boundaries.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ChartError::InvalidData(
            "boundaries must be strictly increasing".to_owned(),
        ));
    }
    Ok(())
}

/// Standalone intensity scale without data, for legends of externally drawn content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarMappable {
    pub norm: Normalize,
    pub colormap: Colormap,
}

impl ScalarMappable {
    #[must_use]
    pub const fn new(norm: Normalize, colormap: Colormap) -> Self {
        Self { norm, colormap }
    }
}

impl ColorMappable for ScalarMappable {
    fn norm(&self) -> Normalize {
        self.norm
    }

    fn colormap(&self) -> Colormap {
        self.colormap
    }
}

/// Grid of samples displayed as colored cells on one axes.
///
/// Cloning is cheap: the grid is shared.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlot {
    axis: AxisId,
    grid: Arc<ValueGrid>,
    norm: Normalize,
    colormap: Colormap,
    extent: Extent,
}

impl ImagePlot {
    /// Builds an image autoscaled to the grid's finite range.
    #[must_use]
    pub fn new(axis: AxisId, grid: ValueGrid, colormap: Colormap) -> Self {
        let norm = Normalize::autoscale(grid.values());
        let extent = Extent::for_grid(grid.rows(), grid.cols());
        Self {
            axis,
            grid: Arc::new(grid),
            norm,
            colormap,
            extent,
        }
    }

    pub fn with_norm(mut self, norm: Normalize) -> ChartResult<Self> {
        norm.validate()?;
        self.norm = norm;
        Ok(self)
    }

    pub fn with_extent(mut self, extent: Extent) -> ChartResult<Self> {
        extent.validate()?;
        self.extent = extent;
        Ok(self)
    }

    #[must_use]
    pub fn axis(&self) -> AxisId {
        self.axis
    }

    #[must_use]
    pub fn grid(&self) -> &ValueGrid {
        &self.grid
    }

    #[must_use]
    pub fn extent(&self) -> Extent {
        self.extent
    }
}

impl ColorMappable for ImagePlot {
    fn norm(&self) -> Normalize {
        self.norm
    }

    fn colormap(&self) -> Colormap {
        self.colormap
    }
}

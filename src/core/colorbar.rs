use serde::{Deserialize, Serialize};

use crate::core::ticks::{
    COLORBAR_MAX_TICKS, COLORBAR_MIN_TICKS, COLORBAR_TICK_TARGET_SPACING_PX,
    axis_tick_target_count, nice_ticks,
};
use crate::core::{AppendSide, AxisId, ColorMappable, ColorbarId, Colormap, Normalize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorbarOrientation {
    Vertical,
    Horizontal,
}

impl ColorbarOrientation {
    /// Orientation that lines the colorbar up with the side it is appended to.
    #[must_use]
    pub fn for_side(side: AppendSide) -> Self {
        if side.is_horizontal() {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }
}

/// Snapshot of the intensity scale a colorbar was created for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorbarMapping {
    pub norm: Normalize,
    pub colormap: Colormap,
    pub boundaries: Option<Vec<f64>>,
}

impl ColorbarMapping {
    #[must_use]
    pub fn from_mappable<M: ColorMappable + ?Sized>(mappable: &M) -> Self {
        Self {
            norm: mappable.norm(),
            colormap: mappable.colormap(),
            boundaries: mappable.boundaries().map(<[f64]>::to_vec),
        }
    }

    /// Number of color bands, `None` for a continuous gradient.
    #[must_use]
    pub fn band_count(&self) -> Option<usize> {
        self.boundaries
            .as_ref()
            .map(|boundaries| boundaries.len().saturating_sub(1))
    }
}

impl ColorMappable for ColorbarMapping {
    fn norm(&self) -> Normalize {
        self.norm
    }

    fn colormap(&self) -> Colormap {
        self.colormap
    }

    fn boundaries(&self) -> Option<&[f64]> {
        self.boundaries.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorbarTicks {
    /// Round values chosen from the colorbar's on-screen length.
    Auto,
    Fixed(Vec<f64>),
}

/// Color legend drawn into one axes of a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colorbar {
    id: ColorbarId,
    cax: AxisId,
    parent: Option<AxisId>,
    orientation: ColorbarOrientation,
    mapping: ColorbarMapping,
    pub(crate) ticks: ColorbarTicks,
    pub(crate) label: Option<String>,
}

impl Colorbar {
    pub(crate) fn new(
        id: ColorbarId,
        cax: AxisId,
        parent: Option<AxisId>,
        orientation: ColorbarOrientation,
        mapping: ColorbarMapping,
    ) -> Self {
        Self {
            id,
            cax,
            parent,
            orientation,
            mapping,
            ticks: ColorbarTicks::Auto,
            label: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> ColorbarId {
        self.id
    }

    /// Axes the colorbar is drawn into.
    #[must_use]
    pub fn cax(&self) -> AxisId {
        self.cax
    }

    /// Axes the colorbar was carved out of, when it was attached through a divider.
    #[must_use]
    pub fn parent(&self) -> Option<AxisId> {
        self.parent
    }

    #[must_use]
    pub fn orientation(&self) -> ColorbarOrientation {
        self.orientation
    }

    #[must_use]
    pub fn mapping(&self) -> &ColorbarMapping {
        &self.mapping
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn tick_mode(&self) -> &ColorbarTicks {
        &self.ticks
    }

    /// Data range covered by the legend, as given by the intensity scale.
    #[must_use]
    pub fn value_range(&self) -> (f64, f64) {
        self.mapping.value_range()
    }

    /// Range used for drawing; never collapses onto a single value.
    #[must_use]
    pub fn display_range(&self) -> (f64, f64) {
        let (vmin, vmax) = self.value_range();
        Normalize { vmin, vmax }.nonsingular()
    }

    /// Normalized position (0 at the low end) of `value` along the bar.
    #[must_use]
    pub fn position_of(&self, value: f64) -> f64 {
        let (vmin, vmax) = self.display_range();
        Normalize { vmin, vmax }.normalize(value)
    }

    /// Tick values inside the display range for a bar `long_side_px` pixels long.
    #[must_use]
    pub fn resolve_ticks(&self, long_side_px: f64) -> Vec<f64> {
        let (low, high) = self.display_range();
        let tolerance = (high * 0.5 - low * 0.5) * 2e-9;
        let inside = |value: &f64| *value >= low - tolerance && *value <= high + tolerance;

        match (&self.ticks, self.mapping.boundaries.as_deref()) {
            (ColorbarTicks::Fixed(values), _) => values.iter().copied().filter(inside).collect(),
            (ColorbarTicks::Auto, Some(boundaries)) if boundaries.len() <= COLORBAR_MAX_TICKS => {
                boundaries.to_vec()
            }
            (ColorbarTicks::Auto, _) => {
                let count = axis_tick_target_count(
                    long_side_px,
                    COLORBAR_TICK_TARGET_SPACING_PX,
                    COLORBAR_MIN_TICKS,
                    COLORBAR_MAX_TICKS,
                );
                nice_ticks(low, high, count)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Colorbar, ColorbarMapping, ColorbarOrientation, ColorbarTicks};
    use crate::core::{AxisId, ColorbarId, Colormap, FigureId, Normalize, ScalarMappable};

    fn colorbar(mapping: ColorbarMapping) -> Colorbar {
        let figure = FigureId::next();
        Colorbar::new(
            ColorbarId::new(figure, 0),
            AxisId::new(figure, 1),
            Some(AxisId::new(figure, 0)),
            ColorbarOrientation::Vertical,
            mapping,
        )
    }

    #[test]
    fn auto_ticks_are_round_and_inside_range() {
        let scale = ScalarMappable::new(Normalize::new(-2.0, 2.0).expect("norm"), Colormap::Jet);
        let colorbar = colorbar(ColorbarMapping::from_mappable(&scale));
        let ticks = colorbar.resolve_ticks(200.0);
        assert_eq!(ticks, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(colorbar.position_of(0.0), 0.5);
    }

    #[test]
    fn discrete_mappings_tick_on_boundaries() {
        let mapping = ColorbarMapping {
            norm: Normalize::new(0.0, 3.0).expect("norm"),
            colormap: Colormap::Gray,
            boundaries: Some(vec![0.0, 1.0, 3.0]),
        };
        let colorbar = colorbar(mapping);
        assert_eq!(colorbar.mapping().band_count(), Some(2));
        assert_eq!(colorbar.resolve_ticks(10.0), vec![0.0, 1.0, 3.0]);
    }

    #[test]
    fn fixed_ticks_outside_range_are_dropped() {
        let scale = ScalarMappable::new(Normalize::new(0.0, 1.0).expect("norm"), Colormap::Hot);
        let mut colorbar = colorbar(ColorbarMapping::from_mappable(&scale));
        colorbar.ticks = ColorbarTicks::Fixed(vec![-1.0, 0.5, 1.0, 4.0]);
        assert_eq!(colorbar.resolve_ticks(300.0), vec![0.5, 1.0]);
    }

    #[test]
    fn degenerate_range_still_displays() {
        let scale = ScalarMappable::new(Normalize::new(5.0, 5.0).expect("norm"), Colormap::Gray);
        let colorbar = colorbar(ColorbarMapping::from_mappable(&scale));
        assert_eq!(colorbar.value_range(), (5.0, 5.0));
        assert_eq!(colorbar.display_range(), (4.5, 5.5));
        assert!(!colorbar.resolve_ticks(200.0).is_empty());
    }
}

use std::sync::Arc;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::mappable::validate_boundaries;
use crate::core::ticks::nice_covering_levels;
use crate::core::{AxisId, ColorMappable, Colormap, Extent, Normalize, ValueGrid};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// How filled-contour levels are chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContourLevels {
    /// At most this many bands on nice round boundaries covering the data,
    /// capped at 1023 bands.
    Count(usize),
    /// Explicit boundaries; sorted and deduplicated before use.
    Explicit(Vec<f64>),
}

/// Filled contour: each cell is painted with the color of the band its value falls in.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourSet {
    axis: AxisId,
    grid: Arc<ValueGrid>,
    levels: Vec<f64>,
    colormap: Colormap,
    extent: Extent,
}

impl ContourSet {
    pub fn new(
        axis: AxisId,
        grid: ValueGrid,
        levels: ContourLevels,
        colormap: Colormap,
    ) -> ChartResult<Self> {
        let levels = match levels {
            ContourLevels::Count(count) => {
                let (min, max) = grid.finite_range().ok_or_else(|| {
                    ChartError::InvalidData(
                        "contour levels need at least one finite sample".to_owned(),
                    )
                })?;
                nice_covering_levels(min, max, count.max(1))
            }
            ContourLevels::Explicit(mut levels) => {
                levels.sort_by_key(|value| OrderedFloat(*value));
                levels.dedup_by_key(|value| OrderedFloat(*value));
                levels
            }
        };
        validate_boundaries(&levels)?;

        let extent = Extent::for_grid(grid.rows(), grid.cols());
        Ok(Self {
            axis,
            grid: Arc::new(grid),
            levels,
            colormap,
            extent,
        })
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
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    #[must_use]
    pub fn band_count(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    #[must_use]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Band containing `value`; bands are closed on the low edge, and the
    /// last band also includes its high edge.
    #[must_use]
    pub fn band_index(&self, value: f64) -> Option<usize> {
        if !value.is_finite() {
            return None;
        }
        let (&first, &last) = (self.levels.first()?, self.levels.last()?);
        if value < first || value > last {
            return None;
        }
        let upper = self.levels.partition_point(|level| *level <= value);
        Some(upper.saturating_sub(1).min(self.band_count().saturating_sub(1)))
    }

    /// Color of one band, taken at the band's midpoint.
    #[must_use]
    pub fn band_color(&self, band: usize) -> Option<Color> {
        let low = *self.levels.get(band)?;
        let high = *self.levels.get(band + 1)?;
        Some(self.colormap.map(self.norm().normalize(low * 0.5 + high * 0.5)))
    }
}

impl ColorMappable for ContourSet {
    fn norm(&self) -> Normalize {
        match (self.levels.first(), self.levels.last()) {
            (Some(&vmin), Some(&vmax)) => Normalize { vmin, vmax },
            _ => Normalize::default(),
        }
    }

    fn colormap(&self) -> Colormap {
        self.colormap
    }

    fn boundaries(&self) -> Option<&[f64]> {
        Some(&self.levels)
    }

    fn to_color(&self, value: f64) -> Option<Color> {
        self.band_index(value).and_then(|band| self.band_color(band))
    }
}

#[cfg(test)]
mod tests {
    use super::{ContourLevels, ContourSet};
    use crate::core::{AxisId, ColorMappable, Colormap, FigureId, ValueGrid};

    fn axis() -> AxisId {
        AxisId::new(FigureId::next(), 0)
    }

    fn ramp() -> ValueGrid {
        ValueGrid::from_fn(4, 4, |row, col| (row * 4 + col) as f64).expect("grid")
    }

    #[test]
    fn counted_levels_cover_the_data() {
        let contours =
            ContourSet::new(axis(), ramp(), ContourLevels::Count(5), Colormap::Viridis)
                .expect("contours");
        assert_eq!(contours.levels(), &[0.0, 5.0, 10.0, 15.0]);
        assert_eq!(contours.value_range(), (0.0, 15.0));
    }

    #[test]
    fn counted_levels_handle_extreme_inputs() {
        let wide = ValueGrid::from_fn(2, 2, |row, col| {
            if row == col { -1.0e308 } else { 1.0e308 }
        })
        .expect("grid");
        let contours = ContourSet::new(axis(), wide, ContourLevels::Count(5), Colormap::Gray)
            .expect("wide contours");
        assert!(contours.levels().iter().all(|level| level.is_finite()));
        assert!(contours.band_color(0).is_some());

        let dense =
            ContourSet::new(axis(), ramp(), ContourLevels::Count(usize::MAX), Colormap::Gray)
                .expect("dense contours");
        assert!(dense.band_count() <= 1023);
        let (low, high) = dense.value_range();
        assert_eq!(low, 0.0);
        assert!((high - 15.0).abs() < 1e-9);
    }

    #[test]
    fn explicit_levels_are_sorted_and_deduplicated() {
        let contours = ContourSet::new(
            axis(),
            ramp(),
            ContourLevels::Explicit(vec![10.0, 0.0, 5.0, 10.0, 20.0]),
            Colormap::Gray,
        )
        .expect("contours");
        assert_eq!(contours.levels(), &[0.0, 5.0, 10.0, 20.0]);
        assert_eq!(contours.band_count(), 3);
    }

    #[test]
    fn band_lookup_includes_last_edge_and_skips_outliers() {
        let contours = ContourSet::new(
            axis(),
            ramp(),
            ContourLevels::Explicit(vec![0.0, 5.0, 10.0]),
            Colormap::Gray,
        )
        .expect("contours");
        assert_eq!(contours.band_index(0.0), Some(0));
        assert_eq!(contours.band_index(5.0), Some(1));
        assert_eq!(contours.band_index(10.0), Some(1));
        assert_eq!(contours.band_index(10.5), None);
        assert_eq!(contours.to_color(f64::NAN), None);
        assert_eq!(contours.to_color(2.0), contours.band_color(0));
    }

    #[test]
    fn single_level_is_rejected() {
        assert!(
            ContourSet::new(
                axis(),
                ramp(),
                ContourLevels::Explicit(vec![1.0]),
                Colormap::Gray
            )
            .is_err()
        );
    }
}

use serde::{Deserialize, Serialize};

use crate::core::{
    AxesRole, Bounds, ColorbarMapping, ColorbarOrientation, ColorbarTicks, Extent, Figure,
    FigureConfig,
};
use crate::error::{ChartError, ChartResult};

pub const FIGURE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable view of one axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxesSnapshot {
    pub index: u32,
    pub position: Bounds,
    pub original_position: Bounds,
    /// Index of the hosted colorbar, if any.
    pub colorbar: Option<u32>,
    pub image_count: usize,
    pub contour_count: usize,
    pub data_limits: Option<Extent>,
}

/// Serializable view of one colorbar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorbarSnapshot {
    pub index: u32,
    pub cax: u32,
    pub parent: Option<u32>,
    pub orientation: ColorbarOrientation,
    pub value_range: (f64, f64),
    pub mapping: ColorbarMapping,
    pub ticks: ColorbarTicks,
    pub label: Option<String>,
}

/// Deterministic figure state for regression tests and host diagnostics.
///
/// Indices are figure-local, so two figures built the same way produce equal
/// snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureSnapshot {
    pub config: FigureConfig,
    pub axes: Vec<AxesSnapshot>,
    pub colorbars: Vec<ColorbarSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: FigureSnapshot,
}

impl Figure {
    #[must_use]
    pub fn snapshot(&self) -> FigureSnapshot {
        let axes = self
            .axes_iter()
            .map(|axes| AxesSnapshot {
                index: axes.id().index(),
                position: axes.position(),
                original_position: axes.original_position(),
                colorbar: match axes.role() {
                    AxesRole::Plot => None,
                    AxesRole::Colorbar(id) => Some(id.index()),
                },
                image_count: axes.images().len(),
                contour_count: axes.contours().len(),
                data_limits: axes.data_limits(),
            })
            .collect();
        let colorbars = self
            .colorbars()
            .map(|colorbar| ColorbarSnapshot {
                index: colorbar.id().index(),
                cax: colorbar.cax().index(),
                parent: colorbar.parent().map(|parent| parent.index()),
                orientation: colorbar.orientation(),
                value_range: colorbar.value_range(),
                mapping: colorbar.mapping().clone(),
                ticks: colorbar.tick_mode().clone(),
                label: colorbar.label().map(str::to_owned),
            })
            .collect();

        FigureSnapshot {
            config: self.config(),
            axes,
            colorbars,
        }
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}

impl FigureSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = FigureSnapshotJsonContractV1 {
            schema_version: FIGURE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Parses either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<FigureSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: FigureSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != FIGURE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::FigureSnapshot;
    use crate::api::attach_colorbar;
    use crate::core::{Colormap, Figure, FigureConfig, ValueGrid};

    fn build() -> Figure {
        let mut figure = Figure::new(FigureConfig::default()).expect("figure");
        let axis = figure.add_subplot();
        let grid = ValueGrid::new(1, 3, vec![1.0, 2.0, 4.0]).expect("grid");
        let image = figure.imshow(axis, grid, Colormap::Viridis).expect("image");
        attach_colorbar(&mut figure, &image, &axis).expect("colorbar");
        figure
    }

    #[test]
    fn identically_built_figures_have_equal_snapshots() {
        assert_eq!(build().snapshot(), build().snapshot());
    }

    #[test]
    fn unsupported_schema_version_is_rejected() {
        let json = build()
            .snapshot_json_contract_v1_pretty()
            .expect("json")
            .replacen("\"schema_version\": 1", "\"schema_version\": 7", 1);
        assert!(FigureSnapshot::from_json_compat_str(&json).is_err());
    }
}

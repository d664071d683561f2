use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{
    AppendSide, AxesSize, ColorMappable, ColorbarId, ColorbarOrientation, DrawableAxis, Figure,
    validate_color_mappable,
};
use crate::error::ChartResult;

/// Where a colorbar axes is carved out of its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorbarPlacement {
    pub side: AppendSide,
    /// Thickness of the colorbar axes.
    pub size: AxesSize,
    /// Gap between the parent axes and the colorbar axes.
    pub pad: AxesSize,
}

impl Default for ColorbarPlacement {
    fn default() -> Self {
        Self {
            side: AppendSide::Right,
            size: AxesSize::percent(5.0),
            pad: AxesSize::Fixed(0.05),
        }
    }
}

impl ColorbarPlacement {
    #[must_use]
    pub fn on(side: AppendSide) -> Self {
        Self {
            side,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: AxesSize) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_pad(mut self, pad: AxesSize) -> Self {
        self.pad = pad;
        self
    }

    #[must_use]
    pub fn orientation(self) -> ColorbarOrientation {
        ColorbarOrientation::for_side(self.side)
    }
}

/// Attaches a vertical colorbar for `mappable` to the right of `axis`.
///
/// The new colorbar axes is 5% as wide as `axis` and sits 0.05 inch away
/// from it; `axis` shrinks to make room. Calling this again on the same axes
/// stacks another colorbar further right.
///
/// Fails with [`ChartError::InvalidArgument`](crate::ChartError::InvalidArgument)
/// when the intensity scale is unusable or `axis` does not belong to `figure`.
/// On error the figure is left untouched.
pub fn attach_colorbar<M, A>(figure: &mut Figure, mappable: &M, axis: &A) -> ChartResult<ColorbarId>
where
    M: ColorMappable + ?Sized,
    A: DrawableAxis + ?Sized,
{
    attach_colorbar_with(figure, mappable, axis, ColorbarPlacement::default())
}

/// Same as [`attach_colorbar`] with an explicit side, size and pad.
pub fn attach_colorbar_with<M, A>(
    figure: &mut Figure,
    mappable: &M,
    axis: &A,
    placement: ColorbarPlacement,
) -> ChartResult<ColorbarId>
where
    M: ColorMappable + ?Sized,
    A: DrawableAxis + ?Sized,
{
    if let Err(err) = validate_color_mappable(mappable) {
        warn!(figure = figure.id().raw(), error = %err, "reject intensity scale");
        return Err(err);
    }
    let parent = figure.resolve_axis(axis)?.id();

    let cax = figure.append_child_axis(parent, placement.side, placement.size, placement.pad)?;
    let id = figure.add_colorbar(mappable, cax, placement.orientation())?;

    debug!(
        figure = figure.id().raw(),
        parent = parent.index(),
        cax = cax.index(),
        colorbar = id.index(),
        "attach colorbar"
    );
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::{ColorbarPlacement, attach_colorbar, attach_colorbar_with};
    use crate::ChartError;
    use crate::core::{
        AppendSide, AxesRole, AxesSize, ColorbarOrientation, Colormap, Figure, FigureConfig,
        Normalize, ScalarMappable,
    };

    #[test]
    fn default_placement_is_right_five_percent() {
        let placement = ColorbarPlacement::default();
        assert_eq!(placement.side, AppendSide::Right);
        assert_eq!(placement.size, AxesSize::Fraction(0.05));
        assert_eq!(placement.pad, AxesSize::Fixed(0.05));
        assert_eq!(placement.orientation(), ColorbarOrientation::Vertical);
        assert_eq!(
            ColorbarPlacement::on(AppendSide::Bottom).orientation(),
            ColorbarOrientation::Horizontal
        );
    }

    #[test]
    fn reversed_limits_are_rejected_before_any_mutation() {
        let mut figure = Figure::new(FigureConfig::default()).expect("figure");
        let axis = figure.add_subplot();
        let scale = ScalarMappable::new(
            Normalize {
                vmin: 2.0,
                vmax: 1.0,
            },
            Colormap::Jet,
        );

        let err = attach_colorbar(&mut figure, &scale, &axis).expect_err("reversed");
        assert!(matches!(err, ChartError::InvalidArgument(_)));
        assert_eq!(figure.axes_count(), 1);
        assert_eq!(figure.colorbar_count(), 0);
        assert!(figure.divider(axis).is_none());
    }

    #[test]
    fn cax_is_marked_as_colorbar_axes() {
        let mut figure = Figure::new(FigureConfig::default()).expect("figure");
        let axis = figure.add_subplot();
        let scale = ScalarMappable::new(Normalize::default(), Colormap::Viridis);

        let id = attach_colorbar(&mut figure, &scale, &axis).expect("attach");
        let colorbar = figure.colorbar(id).expect("colorbar");
        let cax = figure.axes(colorbar.cax()).expect("cax");
        assert_eq!(cax.role(), AxesRole::Colorbar(id));
        assert_eq!(colorbar.parent(), Some(axis));
    }

    #[test]
    fn top_placement_yields_horizontal_colorbar_above_parent() {
        let mut figure = Figure::new(FigureConfig::default()).expect("figure");
        let axis = figure.add_subplot();
        let scale = ScalarMappable::new(Normalize::default(), Colormap::Gray);

        let id = attach_colorbar_with(
            &mut figure,
            &scale,
            &axis,
            ColorbarPlacement::on(AppendSide::Top).with_size(AxesSize::Fixed(0.2)),
        )
        .expect("attach");
        let colorbar = figure.colorbar(id).expect("colorbar");
        assert_eq!(colorbar.orientation(), ColorbarOrientation::Horizontal);

        let parent = figure.axes(axis).expect("parent").position();
        let cax = figure.axes(colorbar.cax()).expect("cax").position();
        assert!(cax.bottom > parent.top());
        assert!((cax.left - parent.left).abs() < 1e-12);
        assert!((cax.width - parent.width).abs() < 1e-12);
    }
}

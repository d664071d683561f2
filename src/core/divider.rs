use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{AxisId, Bounds};
use crate::error::{ChartError, ChartResult};

/// Side of the parent axes a new axes is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppendSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl AppendSide {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Extent of an appended axes or pad along the append direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxesSize {
    /// Fraction of the parent axes' extent (`"5%"` parses to `Fraction(0.05)`).
    Fraction(f64),
    /// Absolute size in inches.
    Fixed(f64),
}

impl AxesSize {
    #[must_use]
    pub fn percent(percent: f64) -> Self {
        Self::Fraction(percent / 100.0)
    }

    pub fn validate(self) -> ChartResult<()> {
        let value = match self {
            Self::Fraction(value) | Self::Fixed(value) => value,
        };
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "axes size must be finite and >= 0, got {self}"
            )));
        }
        Ok(())
    }
}

impl From<f64> for AxesSize {
    fn from(inches: f64) -> Self {
        Self::Fixed(inches)
    }
}

impl fmt::Display for AxesSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fraction(fraction) => write!(f, "{}%", fraction * 100.0),
            Self::Fixed(inches) => write!(f, "{inches}"),
        }
    }
}

impl FromStr for AxesSize {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        let trimmed = input.trim();
        let parse = |text: &str| {
            text.trim().parse::<f64>().map_err(|_| {
                ChartError::InvalidData(format!("cannot parse axes size `{input}`"))
            })
        };
        let size = match trimmed.strip_suffix('%') {
            Some(percent) => Self::percent(parse(percent)?),
            None => Self::Fixed(parse(trimmed)?),
        };
        size.validate()?;
        Ok(size)
    }
}

/// One axes appended through a divider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppendedAxes {
    pub axis: AxisId,
    pub side: AppendSide,
    pub size: AxesSize,
    pub pad: AxesSize,
}

/// Resolved positions of a divided axes and its appended siblings.
#[derive(Debug, Clone, PartialEq)]
pub struct DividerLayout {
    pub parent: Bounds,
    pub appended: SmallVec<[(AxisId, Bounds); 2]>,
}

impl DividerLayout {
    #[must_use]
    pub fn bounds_of(&self, axis: AxisId) -> Option<Bounds> {
        self.appended
            .iter()
            .find(|(candidate, _)| *candidate == axis)
            .map(|(_, bounds)| *bounds)
    }
}

/// Carves sibling axes out of the space originally allotted to one axes.
///
/// Appended axes are stacked outwards from the parent in append order. Along
/// the append direction the parent keeps whatever the appended sizes and pads
/// leave over: with an original extent `E`, relative sizes summing to `R` and
/// fixed sizes summing to `F`, the parent extent becomes `(E - F) / (1 + R)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AxesDivider {
    parent: AxisId,
    origin: Bounds,
    appended: SmallVec<[AppendedAxes; 2]>,
}

impl AxesDivider {
    #[must_use]
    pub fn new(parent: AxisId, origin: Bounds) -> Self {
        Self {
            parent,
            origin,
            appended: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn parent(&self) -> AxisId {
        self.parent
    }

    /// Space the divider partitions, in figure fractions.
    #[must_use]
    pub fn origin(&self) -> Bounds {
        self.origin
    }

    #[must_use]
    pub fn appended(&self) -> &[AppendedAxes] {
        &self.appended
    }

    /// Returns a copy of this divider with one more appended axes, after
    /// checking that the resulting layout is still feasible.
    pub fn with_appended(
        &self,
        entry: AppendedAxes,
        figure_size_in: (f64, f64),
    ) -> ChartResult<(Self, DividerLayout)> {
        entry.size.validate()?;
        entry.pad.validate()?;
        let mut next = self.clone();
        next.appended.push(entry);
        let layout = next.layout(figure_size_in)?;
        Ok((next, layout))
    }

    /// Resolves every position for a figure of `(width, height)` inches.
    pub fn layout(&self, figure_size_in: (f64, f64)) -> ChartResult<DividerLayout> {
        let (figure_width, figure_height) = figure_size_in;
        if !figure_width.is_finite()
            || !figure_height.is_finite()
            || figure_width <= 0.0
            || figure_height <= 0.0
        {
            return Err(ChartError::InvalidData(
                "figure size must be finite and > 0".to_owned(),
            ));
        }

        let horizontal = self.resolve_track(
            self.origin.left * figure_width,
            self.origin.width * figure_width,
            AppendSide::Left,
            AppendSide::Right,
        )?;
        let vertical = self.resolve_track(
            self.origin.bottom * figure_height,
            self.origin.height * figure_height,
            AppendSide::Bottom,
            AppendSide::Top,
        )?;

        let parent = Bounds::new(
            horizontal.main.0 / figure_width,
            vertical.main.0 / figure_height,
            horizontal.main.1 / figure_width,
            vertical.main.1 / figure_height,
        );

        let mut appended = SmallVec::new();
        for (axis, (start, length)) in horizontal.slots {
            appended.push((
                axis,
                Bounds::new(
                    start / figure_width,
                    parent.bottom,
                    length / figure_width,
                    parent.height,
                ),
            ));
        }
        for (axis, (start, length)) in vertical.slots {
            appended.push((
                axis,
                Bounds::new(
                    parent.left,
                    start / figure_height,
                    parent.width,
                    length / figure_height,
                ),
            ));
        }
        Ok(DividerLayout { parent, appended })
    }

    fn resolve_track(
        &self,
        start_in: f64,
        extent_in: f64,
        low_side: AppendSide,
        high_side: AppendSide,
    ) -> ChartResult<Track> {
        let mut relative = 0.0;
        let mut fixed = 0.0;
        let all_entries = entries_on(&self.appended, low_side)
            .chain(entries_on(&self.appended, high_side));
        for entry in all_entries {
            for size in [entry.size, entry.pad] {
                match size {
                    AxesSize::Fraction(fraction) => relative += fraction,
                    AxesSize::Fixed(inches) => fixed += inches,
                }
            }
        }

        let main_extent = (extent_in - fixed) / (1.0 + relative);
        if !main_extent.is_finite() || main_extent <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "appended axes leave no room for the parent axes ({extent_in:.3} in available, \
                 {fixed:.3} in fixed, {relative:.3} relative)"
            )));
        }
        let resolve = |size: AxesSize| match size {
            AxesSize::Fraction(fraction) => fraction * main_extent,
            AxesSize::Fixed(inches) => inches,
        };

        let mut slots = SmallVec::new();
        let mut cursor = start_in;
        let low_entries: SmallVec<[AppendedAxes; 2]> =
            entries_on(&self.appended, low_side).collect();
        for entry in low_entries.iter().rev() {
            let length = resolve(entry.size);
            slots.push((entry.axis, (cursor, length)));
            cursor += length + resolve(entry.pad);
        }
        let main = (cursor, main_extent);
        cursor += main_extent;
        for entry in entries_on(&self.appended, high_side) {
            cursor += resolve(entry.pad);
            let length = resolve(entry.size);
            slots.push((entry.axis, (cursor, length)));
            cursor += length;
        }

        Ok(Track { main, slots })
    }
}

fn entries_on(
    appended: &[AppendedAxes],
    side: AppendSide,
) -> impl Iterator<Item = AppendedAxes> + '_ {
    appended
        .iter()
        .filter(move |entry| entry.side == side)
        .copied()
}

struct Track {
    main: (f64, f64),
    slots: SmallVec<[(AxisId, (f64, f64)); 2]>,
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{AppendSide, AppendedAxes, AxesDivider, AxesSize};
    use crate::core::{AxisId, Bounds, FigureId};

    const FIGURE_SIZE: (f64, f64) = (10.0, 5.0);

    fn ids() -> (AxisId, AxisId, AxisId) {
        let figure = FigureId::next();
        (
            AxisId::new(figure, 0),
            AxisId::new(figure, 1),
            AxisId::new(figure, 2),
        )
    }

    #[test]
    fn sizes_parse_from_strings() {
        assert_eq!("5%".parse::<AxesSize>().expect("percent"), AxesSize::Fraction(0.05));
        assert_eq!(" 0.3 ".parse::<AxesSize>().expect("fixed"), AxesSize::Fixed(0.3));
        assert!("-1".parse::<AxesSize>().is_err());
        assert!("wide".parse::<AxesSize>().is_err());
        assert_eq!(AxesSize::from(0.05), AxesSize::Fixed(0.05));
    }

    #[test]
    fn right_append_shrinks_parent_and_keeps_gap() {
        let (parent, child, _) = ids();
        let divider = AxesDivider::new(parent, Bounds::new(0.1, 0.1, 0.8, 0.8));
        let (divider, layout) = divider
            .with_appended(
                AppendedAxes {
                    axis: child,
                    side: AppendSide::Right,
                    size: AxesSize::percent(5.0),
                    pad: AxesSize::Fixed(0.05),
                },
                FIGURE_SIZE,
            )
            .expect("append");
        assert_eq!(divider.appended().len(), 1);

        let main_in = (8.0 - 0.05) / 1.05;
        assert_relative_eq!(layout.parent.width * 10.0, main_in, epsilon = 1e-12);
        assert_relative_eq!(layout.parent.left, 0.1, epsilon = 1e-12);
        assert_eq!(layout.parent.height, 0.8);

        let cbar = layout.bounds_of(child).expect("child bounds");
        assert_relative_eq!(cbar.width, layout.parent.width * 0.05, epsilon = 1e-12);
        assert_relative_eq!(
            (cbar.left - layout.parent.right()) * 10.0,
            0.05,
            epsilon = 1e-12
        );
        assert_relative_eq!(cbar.right(), 0.9, epsilon = 1e-12);
        assert_eq!(cbar.bottom, layout.parent.bottom);
        assert_eq!(cbar.height, layout.parent.height);
    }

    #[test]
    fn repeated_right_appends_stack_outwards() {
        let (parent, first, second) = ids();
        let entry = |axis| AppendedAxes {
            axis,
            side: AppendSide::Right,
            size: AxesSize::percent(5.0),
            pad: AxesSize::Fixed(0.05),
        };
        let divider = AxesDivider::new(parent, Bounds::new(0.1, 0.1, 0.8, 0.8));
        let (divider, _) = divider.with_appended(entry(first), FIGURE_SIZE).expect("first");
        let (_, layout) = divider.with_appended(entry(second), FIGURE_SIZE).expect("second");

        let first_bounds = layout.bounds_of(first).expect("first bounds");
        let second_bounds = layout.bounds_of(second).expect("second bounds");
        assert!(first_bounds.right() < second_bounds.left);
        assert!(layout.parent.right() < first_bounds.left);
        assert_relative_eq!(second_bounds.right(), 0.9, epsilon = 1e-12);
    }

    #[test]
    fn bottom_append_spans_parent_width() {
        let (parent, child, _) = ids();
        let divider = AxesDivider::new(parent, Bounds::new(0.2, 0.2, 0.6, 0.6));
        let (_, layout) = divider
            .with_appended(
                AppendedAxes {
                    axis: child,
                    side: AppendSide::Bottom,
                    size: AxesSize::Fixed(0.2),
                    pad: AxesSize::Fixed(0.1),
                },
                FIGURE_SIZE,
            )
            .expect("append");
        let strip = layout.bounds_of(child).expect("strip");
        assert_relative_eq!(strip.bottom, 0.2, epsilon = 1e-12);
        assert_relative_eq!(strip.height * 5.0, 0.2, epsilon = 1e-12);
        assert_relative_eq!(layout.parent.bottom * 5.0, 1.0 + 0.3, epsilon = 1e-12);
        assert_eq!(strip.left, layout.parent.left);
        assert_eq!(strip.width, layout.parent.width);
    }

    #[test]
    fn oversized_fixed_append_is_rejected_without_mutation() {
        let (parent, child, _) = ids();
        let divider = AxesDivider::new(parent, Bounds::new(0.1, 0.1, 0.1, 0.8));
        let result = divider.with_appended(
            AppendedAxes {
                axis: child,
                side: AppendSide::Left,
                size: AxesSize::Fixed(2.0),
                pad: AxesSize::Fixed(0.0),
            },
            FIGURE_SIZE,
        );
        assert!(result.is_err());
        assert!(divider.appended().is_empty());
    }
}

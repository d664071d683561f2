use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel size of a render target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Rectangle in figure-fraction coordinates.
///
/// `(0, 0)` is the bottom-left corner of the figure and `(1, 1)` the top-right
/// corner, matching how axes positions are usually expressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub const fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    /// Builds bounds from edge coordinates.
    #[must_use]
    pub fn from_edges(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self::new(left, bottom, right - left, top - bottom)
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.bottom + self.height
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.left.is_finite()
            || !self.bottom.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(ChartError::InvalidData(
                "axes bounds must be finite".to_owned(),
            ));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ChartError::InvalidData(
                "axes bounds width and height must be > 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Maps these bounds onto a pixel viewport as `(x, y, width, height)` with
    /// a top-left origin.
    #[must_use]
    pub fn to_pixel_rect(self, viewport: Viewport) -> (f64, f64, f64, f64) {
        let vw = f64::from(viewport.width);
        let vh = f64::from(viewport.height);
        let x = self.left * vw;
        let y = (1.0 - self.top()) * vh;
        (x, y, self.width * vw, self.height * vh)
    }
}

/// Data-space rectangle covered by a grid.
///
/// `x_start`/`x_end` are the data values at the left and right image edges,
/// `y_start`/`y_end` the values at the bottom and top edges. Row `0` is
/// drawn at the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub x_start: f64,
    pub x_end: f64,
    pub y_start: f64,
    pub y_end: f64,
}

impl Extent {
    #[must_use]
    pub const fn new(x_start: f64, x_end: f64, y_start: f64, y_end: f64) -> Self {
        Self {
            x_start,
            x_end,
            y_start,
            y_end,
        }
    }

    /// Pixel-centered extent of a `rows x cols` grid with row `0` on top.
    #[must_use]
    pub fn for_grid(rows: usize, cols: usize) -> Self {
        Self::new(-0.5, cols as f64 - 0.5, rows as f64 - 0.5, -0.5)
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x_start.is_finite()
            || !self.x_end.is_finite()
            || !self.y_start.is_finite()
            || !self.y_end.is_finite()
        {
            return Err(ChartError::InvalidData("extent must be finite".to_owned()));
        }
        if self.x_start == self.x_end || self.y_start == self.y_end {
            return Err(ChartError::InvalidData(
                "extent must not be degenerate".to_owned(),
            ));
        }
        Ok(())
    }

    /// Smallest extent containing both, keeping the orientation of `self`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        let (x_lo, x_hi) = (
            self.x_start.min(self.x_end).min(other.x_start.min(other.x_end)),
            self.x_start.max(self.x_end).max(other.x_start.max(other.x_end)),
        );
        let (y_lo, y_hi) = (
            self.y_start.min(self.y_end).min(other.y_start.min(other.y_end)),
            self.y_start.max(self.y_end).max(other.y_start.max(other.y_end)),
        );
        let (x_start, x_end) = if self.x_start <= self.x_end {
            (x_lo, x_hi)
        } else {
            (x_hi, x_lo)
        };
        let (y_start, y_end) = if self.y_start <= self.y_end {
            (y_lo, y_hi)
        } else {
            (y_hi, y_lo)
        };
        Self::new(x_start, x_end, y_start, y_end)
    }
}

#[cfg(test)]
mod tests {
    use super::{Bounds, Extent, Viewport};

    #[test]
    fn pixel_rect_flips_vertical_origin() {
        let bounds = Bounds::new(0.25, 0.5, 0.5, 0.25);
        let (x, y, w, h) = bounds.to_pixel_rect(Viewport::new(400, 200));
        assert_eq!((x, y, w, h), (100.0, 50.0, 200.0, 50.0));
    }

    #[test]
    fn degenerate_bounds_are_rejected() {
        assert!(Bounds::new(0.1, 0.1, 0.0, 0.5).validate().is_err());
        assert!(Bounds::new(f64::NAN, 0.1, 0.2, 0.5).validate().is_err());
        assert!(Bounds::from_edges(0.1, 0.1, 0.9, 0.9).validate().is_ok());
    }

    #[test]
    fn grid_extent_is_pixel_centered_with_first_row_on_top() {
        let extent = Extent::for_grid(100, 50);
        assert_eq!(extent, Extent::new(-0.5, 49.5, 99.5, -0.5));
        extent.validate().expect("valid extent");
    }

    #[test]
    fn union_keeps_orientation_of_receiver() {
        let merged = Extent::for_grid(2, 2).union(Extent::new(0.0, 5.0, 0.0, 3.0));
        assert_eq!(merged, Extent::new(-0.5, 5.0, 3.0, -0.5));
    }
}

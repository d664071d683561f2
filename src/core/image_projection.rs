#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{ColorMappable, Extent, LinearScale, ValueGrid};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Pixel rectangle `(x, y, width, height)` with a top-left origin.
pub type PixelRect = (f64, f64, f64, f64);

/// Pixel-space geometry of one colored grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub row: usize,
    pub col: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
}

/// Projects every finite cell of `grid` into `plot_rect`.
///
/// `extent` places the grid in data space and `limits` is the data range the
/// plot rectangle shows. Cells whose value has no color (masked samples) are
/// skipped. Output is row-major regardless of the projection strategy.
pub fn project_grid_cells<M>(
    grid: &ValueGrid,
    extent: Extent,
    mappable: &M,
    limits: Extent,
    plot_rect: PixelRect,
) -> ChartResult<Vec<CellGeometry>>
where
    M: ColorMappable + Sync + ?Sized,
{
    extent.validate()?;
    limits.validate()?;
    let (_, _, width, height) = plot_rect;
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(ChartError::InvalidData(
            "plot rectangle must be finite with positive size".to_owned(),
        ));
    }

    let projector = CellProjector {
        grid,
        extent,
        x_scale: LinearScale::new(limits.x_start, limits.x_end)?,
        y_scale: LinearScale::new(limits.y_start, limits.y_end)?,
        plot_rect,
    };

    #[cfg(feature = "parallel-projection")]
    {
        let rows: Vec<ChartResult<Vec<CellGeometry>>> = (0..grid.rows())
            .into_par_iter()
            .map(|row| projector.project_row(row, mappable))
            .collect();
        let mut out = Vec::with_capacity(grid.values().len());
        for row in rows {
            out.extend(row?);
        }
        Ok(out)
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        let mut out = Vec::with_capacity(grid.values().len());
        for row in 0..grid.rows() {
            out.extend(projector.project_row(row, mappable)?);
        }
        Ok(out)
    }
}

struct CellProjector<'a> {
    grid: &'a ValueGrid,
    extent: Extent,
    x_scale: LinearScale,
    y_scale: LinearScale,
    plot_rect: PixelRect,
}

impl CellProjector<'_> {
    fn project_row<M>(&self, row: usize, mappable: &M) -> ChartResult<Vec<CellGeometry>>
    where
        M: ColorMappable + ?Sized,
    {
        let (left, top, width, height) = self.plot_rect;
        let (right, bottom) = (left + width, top + height);
        let rows = self.grid.rows() as f64;
        let cols = self.grid.cols() as f64;

        // Row 0 sits at the top edge of the extent.
        let y_step = (self.extent.y_start - self.extent.y_end) / rows;
        let y_a = self.extent.y_end + y_step * row as f64;
        let y_b = y_a + y_step;
        let py_a = self.y_scale.domain_to_pixel(y_a, bottom, top)?;
        let py_b = self.y_scale.domain_to_pixel(y_b, bottom, top)?;

        let x_step = (self.extent.x_end - self.extent.x_start) / cols;
        let mut out = Vec::with_capacity(self.grid.cols());
        for col in 0..self.grid.cols() {
            let Some(color) = self
                .grid
                .get(row, col)
                .and_then(|value| mappable.to_color(value))
            else {
                continue;
            };
            let x_a = self.extent.x_start + x_step * col as f64;
            let px_a = self.x_scale.domain_to_pixel(x_a, left, right)?;
            let px_b = self.x_scale.domain_to_pixel(x_a + x_step, left, right)?;
            out.push(CellGeometry {
                row,
                col,
                x: px_a.min(px_b),
                y: py_a.min(py_b),
                width: (px_b - px_a).abs(),
                height: (py_b - py_a).abs(),
                color,
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::project_grid_cells;
    use crate::core::{Colormap, Extent, Normalize, ScalarMappable, ValueGrid};

    #[test]
    fn first_row_is_projected_to_the_top() {
        let grid = ValueGrid::from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0]]).expect("grid");
        let extent = Extent::for_grid(2, 2);
        let scale = ScalarMappable::new(Normalize::new(0.0, 3.0).expect("norm"), Colormap::Gray);

        let cells = project_grid_cells(&grid, extent, &scale, extent, (10.0, 20.0, 100.0, 50.0))
            .expect("cells");
        assert_eq!(cells.len(), 4);

        let first = cells[0];
        assert_eq!((first.row, first.col), (0, 0));
        assert_relative_eq!(first.x, 10.0);
        assert_relative_eq!(first.y, 20.0);
        assert_relative_eq!(first.width, 50.0);
        assert_relative_eq!(first.height, 25.0);
        assert_relative_eq!(first.color.red, 0.0);

        let last = cells[3];
        assert_relative_eq!(last.x, 60.0);
        assert_relative_eq!(last.y, 45.0);
        assert_relative_eq!(last.color.red, 1.0);
    }

    #[test]
    fn masked_cells_are_skipped() {
        let grid = ValueGrid::new(1, 3, vec![0.0, f64::NAN, 1.0]).expect("grid");
        let extent = Extent::for_grid(1, 3);
        let scale = ScalarMappable::new(Normalize::default(), Colormap::Viridis);

        let cells = project_grid_cells(&grid, extent, &scale, extent, (0.0, 0.0, 30.0, 10.0))
            .expect("cells");
        assert_eq!(cells.iter().map(|cell| cell.col).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn zero_sized_plot_rect_is_rejected() {
        let grid = ValueGrid::new(1, 1, vec![0.0]).expect("grid");
        let extent = Extent::for_grid(1, 1);
        let scale = ScalarMappable::new(Normalize::default(), Colormap::Hot);
        assert!(project_grid_cells(&grid, extent, &scale, extent, (0.0, 0.0, 0.0, 5.0)).is_err());
    }
}

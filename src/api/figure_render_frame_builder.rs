use tracing::trace;

use crate::core::{Axes, AxesRole, CellGeometry, Figure, PixelRect, project_grid_cells};
use crate::error::ChartResult;
use crate::render::{RectPrimitive, RenderFrame};

use super::FigureRenderStyle;
use super::colorbar_render_frame_builder::{TickSide, append_colorbar_primitives};

/// Materializes backend-agnostic primitives for one figure draw pass.
///
/// Axes are drawn in insertion order: plot axes get a background, their
/// image and contour cells and a border; colorbar axes get the gradient,
/// outline, ticks and optional label of the colorbar they host.
pub fn build_figure_render_frame(
    figure: &Figure,
    style: FigureRenderStyle,
) -> ChartResult<RenderFrame> {
    style.validate()?;
    let viewport = figure.viewport();
    let mut frame = RenderFrame::new(viewport);
    frame.push_fill(
        (0.0, 0.0, f64::from(viewport.width), f64::from(viewport.height)),
        figure.config().background,
    );

    for axes in figure.axes_iter() {
        let rect = axes.position().to_pixel_rect(viewport);
        match axes.role() {
            AxesRole::Plot => append_plot_axes_primitives(&mut frame, axes, rect, style)?,
            AxesRole::Colorbar(id) => {
                let Some(colorbar) = figure.colorbar(id) else {
                    continue;
                };
                let parent = colorbar
                    .parent()
                    .and_then(|parent| figure.axes(parent))
                    .map(Axes::position);
                let tick_side =
                    TickSide::resolve(colorbar.orientation(), axes.position(), parent);
                append_colorbar_primitives(&mut frame, colorbar, rect, tick_side, style)?;
            }
        }
    }

    trace!(
        figure = figure.id().raw(),
        lines = frame.lines.len(),
        rects = frame.rects.len(),
        texts = frame.texts.len(),
        "build figure render frame"
    );
    Ok(frame)
}

fn append_plot_axes_primitives(
    frame: &mut RenderFrame,
    axes: &Axes,
    rect: PixelRect,
    style: FigureRenderStyle,
) -> ChartResult<()> {
    frame.push_fill(rect, style.axes_background_color);

    if let Some(limits) = axes.data_limits() {
        for image in axes.images() {
            let cells = project_grid_cells(image.grid(), image.extent(), image, limits, rect)?;
            frame.rects.extend(cells.into_iter().map(cell_rect));
        }
        for contours in axes.contours() {
            let cells =
                project_grid_cells(contours.grid(), contours.extent(), contours, limits, rect)?;
            frame.rects.extend(cells.into_iter().map(cell_rect));
        }
    }

    frame.push_outline(rect, style.axes_border_width, style.axes_border_color);
    Ok(())
}

fn cell_rect(cell: CellGeometry) -> RectPrimitive {
    RectPrimitive::new(cell.x, cell.y, cell.width, cell.height, cell.color)
}

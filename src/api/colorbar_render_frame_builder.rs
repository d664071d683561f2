use std::f64::consts::FRAC_PI_2;

use crate::core::{
    Bounds, ColorMappable, Colorbar, ColorbarOrientation, Normalize, PixelRect,
};
use crate::error::ChartResult;
use crate::render::{LinePrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::FigureRenderStyle;
use super::tick_label_format::{format_tick_label, smallest_tick_gap};

/// Side of the colorbar carrying tick marks and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl TickSide {
    /// Ticks face away from the parent axes, or right/bottom for free-standing bars.
    pub(crate) fn resolve(
        orientation: ColorbarOrientation,
        cax: Bounds,
        parent: Option<Bounds>,
    ) -> Self {
        match (orientation, parent) {
            (ColorbarOrientation::Vertical, Some(parent)) if cax.left < parent.left => Self::Left,
            (ColorbarOrientation::Vertical, _) => Self::Right,
            (ColorbarOrientation::Horizontal, Some(parent)) if cax.bottom > parent.bottom => {
                Self::Top
            }
            (ColorbarOrientation::Horizontal, _) => Self::Bottom,
        }
    }
}

/// Value-to-pixel mapping along the colorbar's long side.
#[derive(Clone, Copy)]
struct LongAxis {
    rect: PixelRect,
    orientation: ColorbarOrientation,
}

impl LongAxis {
    fn length(self) -> f64 {
        let (_, _, width, height) = self.rect;
        match self.orientation {
            ColorbarOrientation::Vertical => height,
            ColorbarOrientation::Horizontal => width,
        }
    }

    /// Pixel coordinate of normalized position `t`; low values sit at the
    /// bottom (vertical) or left (horizontal).
    fn pixel(self, t: f64) -> f64 {
        let (x, y, width, height) = self.rect;
        match self.orientation {
            ColorbarOrientation::Vertical => y + height - t * height,
            ColorbarOrientation::Horizontal => x + t * width,
        }
    }

    fn strip(self, t0: f64, t1: f64) -> PixelRect {
        let (x, y, width, height) = self.rect;
        let (a, b) = (self.pixel(t0), self.pixel(t1));
        let (start, extent) = (a.min(b), (b - a).abs());
        match self.orientation {
            ColorbarOrientation::Vertical => (x, start, width, extent),
            ColorbarOrientation::Horizontal => (start, y, extent, height),
        }
    }
}

pub(super) fn append_colorbar_primitives(
    frame: &mut RenderFrame,
    colorbar: &Colorbar,
    rect: PixelRect,
    tick_side: TickSide,
    style: FigureRenderStyle,
) -> ChartResult<()> {
    let axis = LongAxis {
        rect,
        orientation: colorbar.orientation(),
    };
    let (low, high) = colorbar.display_range();
    let mapping = colorbar.mapping();

    let edges: Vec<f64> = match mapping.boundaries() {
        Some(boundaries) => boundaries.to_vec(),
        None => {
            let steps = style.colorbar_gradient_steps;
            let range = Normalize {
                vmin: low,
                vmax: high,
            };
            (0..=steps)
                .map(|step| range.denormalize(step as f64 / steps as f64))
                .collect()
        }
    };
    for pair in edges.windows(2) {
        let Some(color) = mapping.to_color(pair[0] * 0.5 + pair[1] * 0.5) else {
            continue;
        };
        let strip = axis.strip(colorbar.position_of(pair[0]), colorbar.position_of(pair[1]));
        frame.push_fill(strip, color);
    }

    frame.push_outline(rect, style.colorbar_outline_width, style.colorbar_outline_color);

    let ticks = colorbar.resolve_ticks(axis.length());
    let tick_step = smallest_tick_gap(&ticks, high - low);
    for tick in ticks {
        let along = axis.pixel(colorbar.position_of(tick));
        let label = format_tick_label(tick, tick_step);
        push_tick(frame, rect, along, label, tick_side, style);
    }

    if let Some(label) = colorbar.label() {
        frame
            .texts
            .push(colorbar_label_primitive(label, rect, tick_side, style));
    }
    Ok(())
}

fn push_tick(
    frame: &mut RenderFrame,
    rect: PixelRect,
    along: f64,
    label: String,
    side: TickSide,
    style: FigureRenderStyle,
) {
    let (x, y, width, height) = rect;
    let length = style.colorbar_tick_mark_length_px;
    let gap = style.colorbar_tick_label_offset_px;
    let font = style.colorbar_tick_label_font_size_px;

    let (mark, text_x, text_y, align) = match side {
        TickSide::Right => {
            let edge = x + width;
            (
                (edge, along, edge + length, along),
                edge + length + gap,
                along - font * 0.5,
                TextHAlign::Left,
            )
        }
        TickSide::Left => (
            (x, along, x - length, along),
            x - length - gap,
            along - font * 0.5,
            TextHAlign::Right,
        ),
        TickSide::Bottom => {
            let edge = y + height;
            (
                (along, edge, along, edge + length),
                along,
                edge + length + gap,
                TextHAlign::Center,
            )
        }
        TickSide::Top => (
            (along, y, along, y - length),
            along,
            y - length - gap - font,
            TextHAlign::Center,
        ),
    };

    let (x1, y1, x2, y2) = mark;
    frame.lines.push(LinePrimitive::new(
        x1,
        y1,
        x2,
        y2,
        style.colorbar_tick_mark_width,
        style.colorbar_tick_mark_color,
    ));
    frame.texts.push(TextPrimitive::new(
        label,
        text_x,
        text_y,
        font,
        style.colorbar_tick_label_color,
        align,
    ));
}

fn colorbar_label_primitive(
    label: &str,
    rect: PixelRect,
    side: TickSide,
    style: FigureRenderStyle,
) -> TextPrimitive {
    let (x, y, width, height) = rect;
    let offset = style.colorbar_label_offset_px;
    let font = style.colorbar_label_font_size_px;
    let color = style.colorbar_tick_label_color;

    match side {
        // Rotated a quarter turn counter-clockwise so it reads bottom to top.
        TickSide::Right => TextPrimitive::new(
            label,
            x + width + offset,
            y + height * 0.5,
            font,
            color,
            TextHAlign::Center,
        )
        .with_angle(-FRAC_PI_2),
        TickSide::Left => TextPrimitive::new(
            label,
            x - offset - font,
            y + height * 0.5,
            font,
            color,
            TextHAlign::Center,
        )
        .with_angle(-FRAC_PI_2),
        TickSide::Bottom => TextPrimitive::new(
            label,
            x + width * 0.5,
            y + height + offset,
            font,
            color,
            TextHAlign::Center,
        ),
        TickSide::Top => TextPrimitive::new(
            label,
            x + width * 0.5,
            y - offset - font,
            font,
            color,
            TextHAlign::Center,
        ),
    }
}

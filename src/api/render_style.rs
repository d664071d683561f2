use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Style contract for figure render frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureRenderStyle {
    pub axes_background_color: Color,
    pub axes_border_color: Color,
    pub axes_border_width: f64,
    pub colorbar_outline_color: Color,
    pub colorbar_outline_width: f64,
    pub colorbar_tick_mark_color: Color,
    pub colorbar_tick_mark_width: f64,
    pub colorbar_tick_mark_length_px: f64,
    pub colorbar_tick_label_color: Color,
    pub colorbar_tick_label_font_size_px: f64,
    /// Gap between a tick mark's outer end and its label.
    pub colorbar_tick_label_offset_px: f64,
    pub colorbar_label_font_size_px: f64,
    /// Distance from the colorbar's outer edge to its label anchor.
    pub colorbar_label_offset_px: f64,
    /// Number of strips drawn for a continuous gradient.
    pub colorbar_gradient_steps: usize,
}

impl Default for FigureRenderStyle {
    fn default() -> Self {
        Self {
            axes_background_color: Color::rgb(1.0, 1.0, 1.0),
            axes_border_color: Color::rgb(0.0, 0.0, 0.0),
            axes_border_width: 0.8,
            colorbar_outline_color: Color::rgb(0.0, 0.0, 0.0),
            colorbar_outline_width: 0.8,
            colorbar_tick_mark_color: Color::rgb(0.0, 0.0, 0.0),
            colorbar_tick_mark_width: 0.8,
            colorbar_tick_mark_length_px: 3.5,
            colorbar_tick_label_color: Color::rgb(0.0, 0.0, 0.0),
            colorbar_tick_label_font_size_px: 10.0,
            colorbar_tick_label_offset_px: 3.5,
            colorbar_label_font_size_px: 10.0,
            colorbar_label_offset_px: 40.0,
            colorbar_gradient_steps: 256,
        }
    }
}

impl FigureRenderStyle {
    pub fn validate(self) -> ChartResult<()> {
        for color in [
            self.axes_background_color,
            self.axes_border_color,
            self.colorbar_outline_color,
            self.colorbar_tick_mark_color,
            self.colorbar_tick_label_color,
        ] {
            color.validate()?;
        }
        for (name, value) in [
            ("axes_border_width", self.axes_border_width),
            ("colorbar_outline_width", self.colorbar_outline_width),
            ("colorbar_tick_mark_width", self.colorbar_tick_mark_width),
            (
                "colorbar_tick_label_font_size_px",
                self.colorbar_tick_label_font_size_px,
            ),
            ("colorbar_label_font_size_px", self.colorbar_label_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "render style `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            (
                "colorbar_tick_mark_length_px",
                self.colorbar_tick_mark_length_px,
            ),
            (
                "colorbar_tick_label_offset_px",
                self.colorbar_tick_label_offset_px,
            ),
            ("colorbar_label_offset_px", self.colorbar_label_offset_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "render style `{name}` must be finite and >= 0"
                )));
            }
        }
        if self.colorbar_gradient_steps == 0 {
            return Err(ChartError::InvalidData(
                "render style `colorbar_gradient_steps` must be > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

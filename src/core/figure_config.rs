use serde::{Deserialize, Serialize};

use crate::core::{Bounds, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Edges of the default subplot box, in figure fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubplotMargins {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Default for SubplotMargins {
    fn default() -> Self {
        Self {
            left: 0.125,
            right: 0.9,
            bottom: 0.11,
            top: 0.88,
        }
    }
}

impl SubplotMargins {
    #[must_use]
    pub fn bounds(self) -> Bounds {
        Bounds::from_edges(self.left, self.bottom, self.right, self.top)
    }
}

/// Public figure bootstrap configuration.
///
/// This type is serializable so host applications can persist/load figure
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: f64,
    #[serde(default)]
    pub subplot_margins: SubplotMargins,
    #[serde(default = "default_background")]
    pub background: Color,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_in: 6.4,
            height_in: 4.8,
            dpi: 100.0,
            subplot_margins: SubplotMargins::default(),
            background: default_background(),
        }
    }
}

fn default_background() -> Color {
    Color::rgb(1.0, 1.0, 1.0)
}

impl FigureConfig {
    /// Sets the figure size in inches.
    #[must_use]
    pub fn with_size_inches(mut self, width_in: f64, height_in: f64) -> Self {
        self.width_in = width_in;
        self.height_in = height_in;
        self
    }

    /// Sets pixels per inch used when rendering.
    #[must_use]
    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    /// Sets the default subplot box.
    #[must_use]
    pub fn with_subplot_margins(mut self, margins: SubplotMargins) -> Self {
        self.subplot_margins = margins;
        self
    }

    /// Sets the figure background fill.
    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        for (name, value) in [
            ("width_in", self.width_in),
            ("height_in", self.height_in),
            ("dpi", self.dpi),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "figure `{name}` must be finite and > 0"
                )));
            }
        }

        let margins = self.subplot_margins;
        let in_unit = |value: f64| value.is_finite() && (0.0..=1.0).contains(&value);
        if !in_unit(margins.left)
            || !in_unit(margins.right)
            || !in_unit(margins.bottom)
            || !in_unit(margins.top)
        {
            return Err(ChartError::InvalidData(
                "subplot margins must be finite and in [0, 1]".to_owned(),
            ));
        }
        if margins.left >= margins.right || margins.bottom >= margins.top {
            return Err(ChartError::InvalidData(
                "subplot margins require left < right and bottom < top".to_owned(),
            ));
        }

        self.background.validate()?;
        let viewport = self.viewport();
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn size_inches(self) -> (f64, f64) {
        (self.width_in, self.height_in)
    }

    /// Pixel size of the rendered figure.
    #[must_use]
    pub fn viewport(self) -> Viewport {
        let to_px = |inches: f64| {
            let px = (inches * self.dpi).round();
            if px.is_finite() && px > 0.0 {
                px.min(f64::from(u32::MAX)) as u32
            } else {
                0
            }
        };
        Viewport::new(to_px(self.width_in), to_px(self.height_in))
    }

    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize figure config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse figure config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }
}

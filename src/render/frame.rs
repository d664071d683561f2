use crate::core::{PixelRect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LinePrimitive, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one figure draw pass.
///
/// Backends paint rects first, then lines, then texts, each in push order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    /// Fills `rect` with a solid color.
    pub fn push_fill(&mut self, rect: PixelRect, color: Color) {
        let (x, y, width, height) = rect;
        self.rects.push(RectPrimitive::new(x, y, width, height, color));
    }

    /// Strokes the four edges of `rect`.
    pub fn push_outline(&mut self, rect: PixelRect, stroke_width: f64, color: Color) {
        let (x, y, width, height) = rect;
        let (right, bottom) = (x + width, y + height);
        self.lines.extend([
            LinePrimitive::new(x, y, right, y, stroke_width, color),
            LinePrimitive::new(right, y, right, bottom, stroke_width, color),
            LinePrimitive::new(right, bottom, x, bottom, stroke_width, color),
            LinePrimitive::new(x, bottom, x, y, stroke_width, color),
        ]);
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.lines.len() + self.rects.len() + self.texts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitive_count() == 0
    }
}

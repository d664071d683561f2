use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// Headless renderer used by tests and figure-only pipelines.
///
/// Nothing is drawn, but each frame is validated and its primitive counts are
/// recorded.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_viewport: Option<Viewport>,
    pub last_line_count: usize,
    pub last_rect_count: usize,
    pub last_text_count: usize,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_viewport = Some(frame.viewport);
        self.last_line_count = frame.lines.len();
        self.last_rect_count = frame.rects.len();
        self.last_text_count = frame.texts.len();
        self.frames_rendered += 1;
        Ok(())
    }
}

use tracing::debug;

use crate::core::{ColorMappable, ColorbarId, DrawableAxis, Figure, FigureConfig};
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

use super::{
    ColorbarPlacement, FigureRenderStyle, attach_colorbar_with, build_figure_render_frame,
};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `FigureEngine` owns one figure and one renderer and turns the figure into
/// render frames on demand.
pub struct FigureEngine<R: Renderer> {
    renderer: R,
    figure: Figure,
    style: FigureRenderStyle,
}

impl<R: Renderer> FigureEngine<R> {
    pub fn new(renderer: R, config: FigureConfig) -> ChartResult<Self> {
        Ok(Self::from_figure(renderer, Figure::new(config)?))
    }

    #[must_use]
    pub fn from_figure(renderer: R, figure: Figure) -> Self {
        Self {
            renderer,
            figure,
            style: FigureRenderStyle::default(),
        }
    }

    #[must_use]
    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn figure_mut(&mut self) -> &mut Figure {
        &mut self.figure
    }

    #[must_use]
    pub fn render_style(&self) -> FigureRenderStyle {
        self.style
    }

    pub fn set_render_style(&mut self, style: FigureRenderStyle) -> ChartResult<()> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    /// Attaches a colorbar next to `axis` of the owned figure.
    pub fn attach_colorbar<M, A>(
        &mut self,
        mappable: &M,
        axis: &A,
        placement: ColorbarPlacement,
    ) -> ChartResult<ColorbarId>
    where
        M: ColorMappable + ?Sized,
        A: DrawableAxis + ?Sized,
    {
        attach_colorbar_with(&mut self.figure, mappable, axis, placement)
    }

    /// Materializes backend-agnostic primitives for one draw pass.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        build_figure_render_frame(&self.figure, self.style)
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        debug!(
            figure = self.figure.id().raw(),
            rects = frame.rects.len(),
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            "render figure"
        );
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context.
    ///
    /// This path is used by GTK draw callbacks while keeping the renderer
    /// implementation decoupled from GTK-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn into_parts(self) -> (R, Figure) {
        (self.renderer, self.figure)
    }
}

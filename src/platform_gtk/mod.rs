use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::FigureEngine;
use crate::render::{CairoContextRenderer, Renderer};

/// Hosts a [`FigureEngine`] inside a GTK4 `DrawingArea`.
///
/// The engine is shared with the draw callback, so figure mutations made
/// through [`GtkFigureAdapter::engine`] show up after [`GtkFigureAdapter::queue_redraw`].
pub struct GtkFigureAdapter<R: Renderer + CairoContextRenderer + 'static> {
    drawing_area: gtk::DrawingArea,
    engine: Rc<RefCell<FigureEngine<R>>>,
}

impl<R: Renderer + CairoContextRenderer + 'static> GtkFigureAdapter<R> {
    #[must_use]
    pub fn new(engine: FigureEngine<R>) -> Self {
        let viewport = engine.figure().viewport();
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_content_width(i32::try_from(viewport.width).unwrap_or(i32::MAX));
        drawing_area.set_content_height(i32::try_from(viewport.height).unwrap_or(i32::MAX));

        let engine = Rc::new(RefCell::new(engine));
        let draw_engine = Rc::clone(&engine);
        drawing_area.set_draw_func(move |_, context, _, _| {
            let Ok(mut engine) = draw_engine.try_borrow_mut() else {
                warn!("figure engine busy, skipping draw");
                return;
            };
            if let Err(err) = engine.render_on_cairo_context(context) {
                warn!(error = %err, "figure draw failed");
            }
        });

        Self {
            drawing_area,
            engine,
        }
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn engine(&self) -> Rc<RefCell<FigureEngine<R>>> {
        Rc::clone(&self.engine)
    }

    pub fn queue_redraw(&self) {
        self.drawing_area.queue_draw();
    }
}

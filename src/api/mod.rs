mod colorbar;
mod colorbar_render_frame_builder;
mod figure_engine;
mod figure_render_frame_builder;
mod figure_snapshot;
mod render_style;
mod tick_label_format;

pub use colorbar::{ColorbarPlacement, attach_colorbar, attach_colorbar_with};
pub use figure_engine::FigureEngine;
pub use figure_render_frame_builder::build_figure_render_frame;
pub use figure_snapshot::{
    AxesSnapshot, ColorbarSnapshot, FIGURE_SNAPSHOT_JSON_SCHEMA_V1, FigureSnapshot,
    FigureSnapshotJsonContractV1,
};
pub use render_style::FigureRenderStyle;

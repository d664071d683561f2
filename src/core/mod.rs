pub mod axes;
pub mod colorbar;
pub mod colormap;
pub mod contour;
pub mod divider;
pub mod figure;
pub mod figure_config;
pub mod grid;
pub mod image_projection;
pub mod mappable;
pub mod norm;
pub mod scale;
pub mod ticks;
pub mod types;

pub use axes::{Axes, AxesRole, AxisId, ColorbarId, DrawableAxis, FigureId};
pub use colorbar::{Colorbar, ColorbarMapping, ColorbarOrientation, ColorbarTicks};
pub use colormap::Colormap;
pub use contour::{ContourLevels, ContourSet};
pub use divider::{AppendSide, AppendedAxes, AxesDivider, AxesSize, DividerLayout};
pub use figure::Figure;
pub use figure_config::{FigureConfig, SubplotMargins};
pub use grid::ValueGrid;
pub use image_projection::{CellGeometry, PixelRect, project_grid_cells};
pub use mappable::{ColorMappable, ImagePlot, ScalarMappable, validate_color_mappable};
pub use norm::Normalize;
pub use scale::LinearScale;
pub use types::{Bounds, Extent, Viewport};

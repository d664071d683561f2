//! chart-colorbar: figure layout and colorbar attachment for Rust-native charts.
//!
//! The crate models a figure made of axes, lets callers display intensity
//! grids on those axes, and attaches color legends next to them through an
//! axes divider. Drawing goes through the same backend-agnostic render frame
//! used by the rest of the `chart-rs` family.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{
    ColorbarPlacement, FigureEngine, FigureRenderStyle, FigureSnapshot, attach_colorbar,
    attach_colorbar_with,
};
pub use error::{ChartError, ChartResult};

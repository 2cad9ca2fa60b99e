//! Chart rendering.

pub mod chart;

pub use chart::{render_png, scatter_points};

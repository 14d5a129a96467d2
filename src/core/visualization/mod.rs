//! Visualization of the covariance scan
//!
//! Renders the six covariance series and the recording envelope as a
//! line chart image.

mod chart;
mod text;

pub use chart::{draw_covariance_chart, render_covariance_chart, Canvas, ChartConfig};
pub use text::TextRenderer;

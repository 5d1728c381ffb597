//! Output formatting for utilization results.
//!
//! This module handles rendering scope results:
//! - [`terminal`] - Text report with severity colors
//! - [`json`] - JSON report keyed `scope_0`, `scope_1`, ...
//! - [`metric`] - Single numeric value for monitoring systems

mod json;
mod metric;
mod terminal;

pub use json::{render_json, to_json_value};
pub use metric::{extract_metric, MetricValue, ZeroMode};
pub use terminal::{disable_color_unless_terminal, format_label, paint, render_scope, render_text};

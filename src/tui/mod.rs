//! TUI module: Terminal User Interface using Ratatui.
//!
//! A single screen with:
//! - Usage sliders and the battery capacity input
//! - The estimate with its band and optimization tips
//! - Feature importances for tree-based models

mod app;
mod styles;
mod ui;

pub use app::{load_dependencies, App, DefaultPredictionService};
pub use styles::BatteryTheme;

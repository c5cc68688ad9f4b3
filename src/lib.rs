//! # batterylife
//!
//! Battery life estimation from daily phone usage, in a terminal UI.
//!
//! This crate provides:
//! - Loading of a pre-trained scaler and regressor (linear, tree, forest)
//! - Severity banding and optimization tips for each estimate
//! - Terminal UI for entering usage and viewing results
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (UsageProfile, Estimate, SeverityBand)
//! - `ports`: Trait definitions for the model and transform
//! - `adapters`: Artifact and asset loading
//! - `application`: The prediction use case
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Estimate, SeverityBand, UsageProfile};

/// Result type for batterylife operations
pub type Result<T> = std::result::Result<T, BatteryLifeError>;

/// Main error type for batterylife
#[derive(Debug, thiserror::Error)]
pub enum BatteryLifeError {
    #[error("Artifact load failed: {0}")]
    ArtifactLoad(#[from] adapters::ArtifactLoadError),

    #[error("Asset missing: {0}")]
    AssetMissing(#[from] adapters::AssetError),
}

//! Domain layer: Core types and rules.
//!
//! Pure Rust types with no I/O. The severity breakpoints and advisory
//! thresholds live here.

mod estimate;
mod usage;

pub use estimate::{
    Advisory, Estimate, FeatureImportances, SeverityBand, HIGH_BAND_HOURS, MODERATE_BAND_HOURS,
};
pub use usage::{Feature, ScaledVector, UsageProfile, FEATURE_COUNT, FEATURE_NAMES};

//! Feature transform port: Trait for the fitted input normalization.

use crate::domain::{ScaledVector, UsageProfile};

/// A fitted per-feature transform applied before prediction.
///
/// Parameters are fixed once loaded; `transform` never mutates them.
pub trait FeatureTransform: Send + Sync {
    /// Map a raw usage profile into model space.
    fn transform(&self, profile: &UsageProfile) -> ScaledVector;
}

//! Regressor port: Trait for the pre-trained battery life model.
//!
//! This trait abstracts the model family (linear, tree, forest) from the
//! application logic.

use crate::domain::{FeatureImportances, ScaledVector};

/// A fitted regression model.
///
/// Implementations provide:
/// - A prediction in hours for one scaled input vector
/// - Optionally, per-feature importance weights
pub trait Regressor: Send + Sync {
    /// Predict battery life in hours.
    ///
    /// Must be a pure function of `input`: the same vector always yields
    /// the same value.
    fn predict(&self, input: &ScaledVector) -> f64;

    /// Per-feature importance weights, if this model family exposes them.
    ///
    /// `None` means the capability is absent. Callers fall back to an
    /// informational message; this is never an error.
    fn feature_importances(&self) -> Option<FeatureImportances> {
        None
    }

    /// Short name of the model family, for logs and the status line.
    fn kind(&self) -> &'static str;
}

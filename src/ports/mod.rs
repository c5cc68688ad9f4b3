//! Ports layer: Trait definitions for external operations.
//!
//! These traits define the boundary between the application and the
//! externally trained artifacts.

mod regressor;
mod transform;

pub use regressor::Regressor;
pub use transform::FeatureTransform;

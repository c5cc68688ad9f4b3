//! Application layer: Use cases and services.
//!
//! Orchestrates domain rules with the loaded artifacts.

mod prediction;

pub use prediction::PredictionService;

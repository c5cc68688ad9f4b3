//! Adapters layer: Concrete implementations of ports.
//!
//! - `artifacts`: JSON scaler/model loading, integrity manifest
//! - `assets`: static image presence checks

pub mod artifacts;
pub mod assets;

pub use artifacts::{load_artifacts, ArtifactLoadError, LoadedArtifacts};
pub use assets::{AssetCatalog, AssetError};

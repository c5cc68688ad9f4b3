//! Artifact adapter: loads the fitted scaler and regressor from disk.
//!
//! Both artifacts are JSON documents exported by the training pipeline:
//!
//! - `scaler.json`: per-feature `mean` / `scale` of a standard scaler
//! - `model.json`: an `estimator` tagged by `type` (`linear`, `decision_tree`,
//!   `random_forest`)
//!
//! Each carries `schema_version` and `feature_names`; the loader refuses any
//! artifact whose feature list differs from the one the UI collects.
//!
//! # Integrity
//!
//! When `manifest.json` is present next to the artifacts, every artifact must
//! be listed in it and its SHA-256 digest must match before anything is parsed.
//! Generate the manifest with `cargo run --bin write_manifest -- <dir>`.
//!
//! Loading happens once at startup. Every failure here is fatal.

mod manifest;
mod model;
mod scaler;
mod tree;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::domain::FEATURE_NAMES;

pub use manifest::{sha256_hex, ArtifactManifest};
pub use model::{LinearModel, LoadedModel, RandomForest};
pub use scaler::StandardScaler;
pub use tree::{DecisionTree, TreeSpec};

/// Schema version this loader understands.
pub const SCHEMA_VERSION: u32 = 1;

/// Scaler artifact file name.
pub const SCALER_FILE: &str = "scaler.json";

/// Model artifact file name.
pub const MODEL_FILE: &str = "model.json";

/// Optional integrity manifest file name.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Errors raised while loading artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactLoadError {
    #[error("Artifact not found at {path:?}")]
    Missing { path: PathBuf },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed artifact {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported schema version {found} in {path:?} (expected {expected})")]
    SchemaVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("Feature mismatch in {path:?}: expected {expected:?}, found {found:?}")]
    FeatureMismatch {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Invalid parameters in {path:?}: {reason}")]
    InvalidParameters { path: PathBuf, reason: String },

    #[error("Integrity check failed for {file}: {reason}")]
    Integrity { file: String, reason: String },
}

impl ArtifactLoadError {
    pub(crate) fn invalid(path: &Path, reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// The fitted scaler and model, loaded once and never mutated.
#[derive(Debug, Clone)]
pub struct LoadedArtifacts {
    pub scaler: StandardScaler,
    pub model: LoadedModel,
}

/// Load and validate both artifacts from `dir`.
///
/// The scaler is loaded before the model, so a missing scaler is reported
/// even when the model is missing too.
///
/// # Errors
/// Returns `ArtifactLoadError` if the directory, either artifact, or a
/// manifest entry is missing, unreadable, malformed or inconsistent.
pub fn load_artifacts(dir: &Path) -> Result<LoadedArtifacts, ArtifactLoadError> {
    if !dir.is_dir() {
        return Err(ArtifactLoadError::Missing {
            path: dir.to_path_buf(),
        });
    }

    if ArtifactManifest::verify_dir(dir)? {
        tracing::info!("Artifact digests verified against {MANIFEST_FILE}");
    } else {
        tracing::warn!(
            "No {MANIFEST_FILE} in {:?}; loading artifacts without integrity check",
            dir
        );
    }

    let scaler = StandardScaler::load(&dir.join(SCALER_FILE))?;
    let model = LoadedModel::load(&dir.join(MODEL_FILE))?;

    tracing::info!(
        "Loaded artifacts from {:?} (model={}, n_features={})",
        dir,
        crate::ports::Regressor::kind(&model),
        FEATURE_NAMES.len()
    );

    Ok(LoadedArtifacts { scaler, model })
}

/// Read and deserialize a JSON artifact.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactLoadError> {
    if !path.is_file() {
        return Err(ArtifactLoadError::Missing {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|source| ArtifactLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| ArtifactLoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Check the schema version and feature order shared by every artifact.
pub(crate) fn check_header(
    path: &Path,
    schema_version: u32,
    feature_names: &[String],
) -> Result<(), ArtifactLoadError> {
    if schema_version != SCHEMA_VERSION {
        return Err(ArtifactLoadError::SchemaVersion {
            path: path.to_path_buf(),
            found: schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    if feature_names.iter().map(String::as_str).ne(FEATURE_NAMES) {
        return Err(ArtifactLoadError::FeatureMismatch {
            path: path.to_path_buf(),
            expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            found: feature_names.to_vec(),
        });
    }

    Ok(())
}

/// Convert a parameter vector into a fixed-size array of finite values.
pub(crate) fn finite_array<const N: usize>(
    path: &Path,
    name: &str,
    values: &[f64],
) -> Result<[f64; N], ArtifactLoadError> {
    let arr: [f64; N] = values.try_into().map_err(|_| {
        ArtifactLoadError::invalid(
            path,
            format!("{name} has {} values, expected {N}", values.len()),
        )
    })?;

    if let Some(i) = arr.iter().position(|v| !v.is_finite()) {
        return Err(ArtifactLoadError::invalid(
            path,
            format!("{name}[{i}] is not finite"),
        ));
    }

    Ok(arr)
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! JSON builders shared by the artifact tests.

    use std::path::Path;

    use serde_json::{json, Value};

    use crate::domain::FEATURE_NAMES;

    pub fn scaler_json() -> Value {
        json!({
            "schema_version": 1,
            "feature_names": FEATURE_NAMES,
            "mean": [8.0, 5.0, 55.0, 4000.0, 25.0, 20.5],
            "scale": [4.0, 3.0, 26.0, 1155.0, 14.7, 11.3],
        })
    }

    pub fn linear_json() -> Value {
        json!({
            "schema_version": 1,
            "feature_names": FEATURE_NAMES,
            "estimator": {
                "type": "linear",
                "coefficients": [-2.1, -1.4, -1.2, 2.3, -0.9, -0.4],
                "intercept": 11.0,
            },
        })
    }

    pub fn tree_json() -> Value {
        json!({
            "children_left":  [1, 2, -1, -1, 5, -1, -1],
            "children_right": [4, 3, -1, -1, 6, -1, -1],
            "feature":        [0, 3, -2, -2, 1, -2, -2],
            "threshold":      [0.0, 0.0, -2.0, -2.0, 0.0, -2.0, -2.0],
            "value":          [10.0, 12.0, 9.0, 15.0, 8.0, 10.0, 6.0],
            "impurity":       [10.0, 6.0, 2.0, 2.0, 4.0, 1.0, 1.0],
            "n_node_samples": [100, 50, 25, 25, 50, 25, 25],
        })
    }

    pub fn write(dir: &Path, name: &str, value: &Value) {
        let bytes = serde_json::to_vec_pretty(value).expect("serialize fixture");
        std::fs::write(dir.join(name), bytes).expect("write fixture");
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use tempfile::tempdir;

    fn write_pair(dir: &Path) {
        write(dir, SCALER_FILE, &scaler_json());
        write(dir, MODEL_FILE, &linear_json());
    }

    #[test]
    fn test_loads_valid_pair() {
        let dir = tempdir().expect("tempdir");
        write_pair(dir.path());

        let artifacts = load_artifacts(dir.path()).expect("artifacts should load");
        assert!(matches!(artifacts.model, LoadedModel::Linear(_)));
    }

    #[test]
    fn test_missing_scaler_is_reported() {
        let dir = tempdir().expect("tempdir");
        write(dir.path(), MODEL_FILE, &linear_json());

        match load_artifacts(dir.path()) {
            Err(ArtifactLoadError::Missing { path }) => assert!(path.ends_with(SCALER_FILE)),
            other => panic!("expected missing scaler, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_directory_is_reported() {
        let dir = tempdir().expect("tempdir");
        let gone = dir.path().join("nope");

        assert!(matches!(
            load_artifacts(&gone),
            Err(ArtifactLoadError::Missing { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let dir = tempdir().expect("tempdir");
        write_pair(dir.path());
        std::fs::write(dir.path().join(MODEL_FILE), b"{ not json").expect("write");

        assert!(matches!(
            load_artifacts(dir.path()),
            Err(ArtifactLoadError::Malformed { .. })
        ));
    }

    #[test]
    fn test_schema_version_is_checked() {
        let dir = tempdir().expect("tempdir");
        write_pair(dir.path());
        let mut scaler = scaler_json();
        scaler["schema_version"] = 2.into();
        write(dir.path(), SCALER_FILE, &scaler);

        assert!(matches!(
            load_artifacts(dir.path()),
            Err(ArtifactLoadError::SchemaVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_feature_order_is_checked() {
        let dir = tempdir().expect("tempdir");
        write_pair(dir.path());
        let mut model = linear_json();
        model["feature_names"] = serde_json::json!([
            "gaming_hours",
            "screen_time",
            "brightness",
            "battery_capacity",
            "background_apps",
            "app_usage"
        ]);
        write(dir.path(), MODEL_FILE, &model);

        assert!(matches!(
            load_artifacts(dir.path()),
            Err(ArtifactLoadError::FeatureMismatch { .. })
        ));
    }

    #[test]
    fn test_bundled_artifacts_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("models");
        let artifacts = load_artifacts(&dir).expect("bundled artifacts should load");
        assert!(matches!(artifacts.model, LoadedModel::DecisionTree(_)));
    }
}

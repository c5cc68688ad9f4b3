//! Standard scaler: `(x - mean) / scale` per feature.

use std::path::Path;

use serde::Deserialize;

use super::{check_header, finite_array, read_json, ArtifactLoadError};
use crate::domain::{Feature, ScaledVector, UsageProfile, FEATURE_COUNT};
use crate::ports::FeatureTransform;

/// On-disk form of the fitted scaler.
#[derive(Debug, Deserialize)]
struct ScalerArtifact {
    schema_version: u32,
    feature_names: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Fitted standardization parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// Build a scaler from parameters in model order.
    ///
    /// # Errors
    /// Returns error if any parameter is non-finite or any scale is zero.
    pub fn new(
        mean: [f64; FEATURE_COUNT],
        scale: [f64; FEATURE_COUNT],
    ) -> Result<Self, ArtifactLoadError> {
        Self::validated(Path::new("<memory>"), &mean, &scale)
    }

    /// Load `scaler.json`.
    ///
    /// # Errors
    /// Returns `ArtifactLoadError` if the file is missing, malformed, or
    /// inconsistent with the expected features.
    pub fn load(path: &Path) -> Result<Self, ArtifactLoadError> {
        let artifact: ScalerArtifact = read_json(path)?;
        check_header(path, artifact.schema_version, &artifact.feature_names)?;
        let scaler = Self::validated(path, &artifact.mean, &artifact.scale)?;

        tracing::info!("Loaded scaler from {:?}", path);
        Ok(scaler)
    }

    fn validated(path: &Path, mean: &[f64], scale: &[f64]) -> Result<Self, ArtifactLoadError> {
        let mean = finite_array(path, "mean", mean)?;
        let scale: [f64; FEATURE_COUNT] = finite_array(path, "scale", scale)?;

        if let Some(i) = scale.iter().position(|s| s.abs() < f64::MIN_POSITIVE) {
            return Err(ArtifactLoadError::invalid(
                path,
                format!("scale[{i}] is zero or subnormal"),
            ));
        }

        // Scaling is monotonic per feature, so the range bounds cover every input.
        for feature in Feature::ALL {
            let i = feature.index();
            let (min, max) = feature.range();
            if [min, max]
                .iter()
                .any(|x| !((x - mean[i]) / scale[i]).is_finite())
            {
                return Err(ArtifactLoadError::invalid(
                    path,
                    format!("scale[{i}] overflows over the {} range", feature.name()),
                ));
            }
        }

        Ok(Self { mean, scale })
    }
}

impl FeatureTransform for StandardScaler {
    fn transform(&self, profile: &UsageProfile) -> ScaledVector {
        let raw = profile.to_array();
        ScaledVector(std::array::from_fn(|i| (raw[i] - self.mean[i]) / self.scale[i]))
    }
}

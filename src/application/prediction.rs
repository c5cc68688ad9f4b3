//! Prediction service: Orchestrates battery life inference.
//!
//! This service coordinates:
//! - Feature scaling
//! - Model prediction
//! - Band classification and advisory rules

use std::sync::Arc;

use crate::adapters::LoadedArtifacts;
use crate::adapters::artifacts::{LoadedModel, StandardScaler};
use crate::domain::{Estimate, FeatureImportances, UsageProfile};
use crate::ports::{FeatureTransform, Regressor};

/// Service for running battery life inference.
///
/// Holds the fitted transform and model. Both are shared read-only; every
/// call to [`predict`](Self::predict) is a pure function of them and its input.
pub struct PredictionService<T, M>
where
    T: FeatureTransform,
    M: Regressor,
{
    transform: Arc<T>,
    model: Arc<M>,
}

impl<T, M> Clone for PredictionService<T, M>
where
    T: FeatureTransform,
    M: Regressor,
{
    fn clone(&self) -> Self {
        Self {
            transform: Arc::clone(&self.transform),
            model: Arc::clone(&self.model),
        }
    }
}

impl PredictionService<StandardScaler, LoadedModel> {
    /// Build the service from artifacts loaded at startup.
    #[must_use]
    pub fn from_artifacts(artifacts: LoadedArtifacts) -> Self {
        Self::new(Arc::new(artifacts.scaler), Arc::new(artifacts.model))
    }
}

impl<T, M> PredictionService<T, M>
where
    T: FeatureTransform,
    M: Regressor,
{
    /// Create a new prediction service.
    pub fn new(transform: Arc<T>, model: Arc<M>) -> Self {
        Self { transform, model }
    }

    /// Estimate battery life for a usage profile.
    ///
    /// Performs the full pipeline:
    /// 1. Scale the raw profile
    /// 2. Predict hours with the model
    /// 3. Classify the band and collect advisories from the raw profile
    #[must_use]
    pub fn predict(&self, profile: &UsageProfile) -> Estimate {
        tracing::debug!("Step 1: Scaling usage profile...");
        let scaled = self.transform.transform(profile);

        tracing::debug!("Step 2: Running {} model...", self.model.kind());
        let hours = self.model.predict(&scaled);

        tracing::debug!("Step 3: Classifying estimate...");
        let estimate = Estimate::new(hours, profile);

        tracing::info!(
            "Estimate complete: hours={:.2}, band={}, advisories={}",
            estimate.hours,
            estimate.band,
            estimate.advisories.len()
        );

        estimate
    }

    /// Feature importances of the loaded model, if it exposes them.
    #[must_use]
    pub fn feature_importances(&self) -> Option<FeatureImportances> {
        self.model.feature_importances()
    }

    /// Model family name.
    #[must_use]
    pub fn model_kind(&self) -> &'static str {
        self.model.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::artifacts::LinearModel;
    use crate::adapters::load_artifacts;
    use crate::domain::{Advisory, Feature, ScaledVector, SeverityBand};
    use std::path::Path;

    /// Returns a fixed value and has no importances.
    struct ConstantModel(f64);

    impl Regressor for ConstantModel {
        fn predict(&self, _input: &ScaledVector) -> f64 {
            self.0
        }

        fn kind(&self) -> &'static str {
            "constant"
        }
    }

    fn identity_scaler() -> Arc<StandardScaler> {
        Arc::new(StandardScaler::new([0.0; 6], [1.0; 6]).expect("scaler"))
    }

    fn bundled_service() -> PredictionService<StandardScaler, LoadedModel> {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("models");
        PredictionService::from_artifacts(load_artifacts(&dir).expect("bundled artifacts"))
    }

    #[test]
    fn test_band_follows_prediction() {
        for (hours, band) in [
            (15.0, SeverityBand::High),
            (14.0, SeverityBand::Moderate),
            (10.0, SeverityBand::Moderate),
            (8.0, SeverityBand::Low),
            (5.0, SeverityBand::Low),
        ] {
            let service = PredictionService::new(identity_scaler(), Arc::new(ConstantModel(hours)));
            assert_eq!(service.predict(&UsageProfile::default()).band, band);
        }
    }

    #[test]
    fn test_advisories_use_raw_profile() {
        // Scaling would push every raw value far below its threshold.
        let scaler = Arc::new(StandardScaler::new([1000.0; 6], [1.0; 6]).expect("scaler"));
        let service = PredictionService::new(scaler, Arc::new(ConstantModel(10.0)));

        let profile = UsageProfile {
            gaming_hours: 1.0,
            brightness: 90.0,
            background_apps: 30.0,
            ..UsageProfile::default()
        };

        assert_eq!(
            service.predict(&profile).advisories,
            vec![Advisory::LowerBrightness, Advisory::CloseBackgroundApps]
        );
    }

    #[test]
    fn test_prediction_uses_scaled_input() {
        let scaler = Arc::new(StandardScaler::new([6.0; 6], [2.0; 6]).expect("scaler"));
        let model =
            Arc::new(LinearModel::new([1.0, 0.0, 0.0, 0.0, 0.0, 0.0], 10.0).expect("model"));
        let service = PredictionService::new(scaler, model);

        let profile = UsageProfile {
            screen_time: 10.0,
            ..UsageProfile::default()
        };

        // (10 - 6) / 2 = 2
        assert_eq!(service.predict(&profile).hours, 12.0);
    }

    #[test]
    fn test_missing_capability_is_none() {
        let service = PredictionService::new(identity_scaler(), Arc::new(ConstantModel(9.0)));
        assert!(service.feature_importances().is_none());
        assert_eq!(service.model_kind(), "constant");
    }

    #[test]
    fn test_predict_is_idempotent() {
        let service = bundled_service();
        let profile = UsageProfile {
            screen_time: 11.0,
            gaming_hours: 4.0,
            ..UsageProfile::default()
        };

        let first = service.predict(&profile);
        let second = service.predict(&profile);
        assert_eq!(first.hours.to_bits(), second.hours.to_bits());
        assert_eq!(first.band, second.band);
        assert_eq!(first.advisories, second.advisories);
    }

    #[test]
    fn test_finite_over_declared_ranges() {
        let service = bundled_service();
        let linear = PredictionService::new(
            identity_scaler(),
            Arc::new(LinearModel::new([-2.1, -1.4, -1.2, 2.3, -0.9, -0.4], 11.0).expect("model")),
        );

        // Bounds and midpoint of every feature: 3^6 profiles.
        let grid: Vec<[f64; 3]> = Feature::ALL
            .iter()
            .map(|f| {
                let (min, max) = f.range();
                [min, (min + max) / 2.0, max]
            })
            .collect();

        for code in 0..3usize.pow(6) {
            let mut values = [0.0; 6];
            let mut rest = code;
            for (i, axis) in grid.iter().enumerate() {
                values[i] = axis[rest % 3];
                rest /= 3;
            }
            let profile = UsageProfile::from_array(values);

            assert!(service.predict(&profile).hours.is_finite(), "{profile:?}");
            assert!(linear.predict(&profile).hours.is_finite(), "{profile:?}");
        }
    }

    #[test]
    fn test_bundled_model_exposes_importances() {
        let imp = bundled_service()
            .feature_importances()
            .expect("bundled tree has importances");
        let total: f64 = imp.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}

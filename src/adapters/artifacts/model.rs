//! Regressor artifacts: linear model, decision tree, random forest.

use std::path::Path;

use serde::Deserialize;

use super::tree::{DecisionTree, TreeSpec};
use super::{check_header, finite_array, read_json, ArtifactLoadError};
use crate::domain::{FeatureImportances, ScaledVector, FEATURE_COUNT};
use crate::ports::Regressor;

/// On-disk form of the fitted model.
#[derive(Debug, Deserialize)]
struct ModelArtifact {
    schema_version: u32,
    feature_names: Vec<String>,
    estimator: EstimatorSpec,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum EstimatorSpec {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    DecisionTree {
        tree: TreeSpec,
    },
    RandomForest {
        trees: Vec<TreeSpec>,
    },
}

/// Ordinary least squares: `intercept + coefficients · x`.
///
/// Linear models expose no feature importances.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearModel {
    /// # Errors
    /// Returns error if any parameter is non-finite.
    pub fn new(
        coefficients: [f64; FEATURE_COUNT],
        intercept: f64,
    ) -> Result<Self, ArtifactLoadError> {
        Self::validated(Path::new("<memory>"), &coefficients, intercept)
    }

    fn validated(
        path: &Path,
        coefficients: &[f64],
        intercept: f64,
    ) -> Result<Self, ArtifactLoadError> {
        let coefficients = finite_array(path, "coefficients", coefficients)?;
        if !intercept.is_finite() {
            return Err(ArtifactLoadError::invalid(path, "intercept is not finite"));
        }
        Ok(Self {
            coefficients,
            intercept,
        })
    }
}

impl Regressor for LinearModel {
    fn predict(&self, input: &ScaledVector) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(input.as_slice())
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}

/// Mean of several decision trees. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl Regressor for RandomForest {
    fn predict(&self, input: &ScaledVector) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict(input)).sum();
        sum / self.trees.len() as f64
    }

    fn feature_importances(&self) -> Option<FeatureImportances> {
        let mut mean = [0.0; FEATURE_COUNT];
        for tree in &self.trees {
            for (feature, weight) in tree.impurity_importances().iter() {
                mean[feature.index()] += weight / self.trees.len() as f64;
            }
        }
        Some(FeatureImportances::new(mean).normalized())
    }

    fn kind(&self) -> &'static str {
        "random_forest"
    }
}

/// Any model family the loader understands.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedModel {
    Linear(LinearModel),
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
}

impl LoadedModel {
    /// Load `model.json`.
    ///
    /// # Errors
    /// Returns `ArtifactLoadError` if the file is missing, malformed, or
    /// inconsistent with the expected features.
    pub fn load(path: &Path) -> Result<Self, ArtifactLoadError> {
        let artifact: ModelArtifact = read_json(path)?;
        check_header(path, artifact.schema_version, &artifact.feature_names)?;

        let model = match artifact.estimator {
            EstimatorSpec::Linear {
                coefficients,
                intercept,
            } => Self::Linear(LinearModel::validated(path, &coefficients, intercept)?),
            EstimatorSpec::DecisionTree { tree } => {
                Self::DecisionTree(DecisionTree::from_spec(path, &tree)?)
            }
            EstimatorSpec::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(ArtifactLoadError::invalid(path, "forest has no trees"));
                }
                let trees = trees
                    .iter()
                    .map(|t| DecisionTree::from_spec(path, t))
                    .collect::<Result<Vec<_>, _>>()?;
                Self::RandomForest(RandomForest { trees })
            }
        };

        tracing::info!("Loaded {} model from {:?}", model.kind(), path);
        Ok(model)
    }

    fn inner(&self) -> &dyn Regressor {
        match self {
            Self::Linear(m) => m,
            Self::DecisionTree(m) => m,
            Self::RandomForest(m) => m,
        }
    }
}

impl Regressor for LoadedModel {
    fn predict(&self, input: &ScaledVector) -> f64 {
        self.inner().predict(input)
    }

    fn feature_importances(&self) -> Option<FeatureImportances> {
        self.inner().feature_importances()
    }

    fn kind(&self) -> &'static str {
        self.inner().kind()
    }
}

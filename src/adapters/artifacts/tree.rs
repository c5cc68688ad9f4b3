//! Decision tree regressor in the parallel-array layout used by sklearn.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ArtifactLoadError;
use crate::domain::{FeatureImportances, ScaledVector, FEATURE_COUNT};
use crate::ports::Regressor;

/// Marker for "no child" in `children_left` / `children_right`.
const LEAF: i64 = -1;

/// On-disk form of a fitted tree. All arrays are indexed by node id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSpec {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
    pub impurity: Vec<f64>,
    pub n_node_samples: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Split {
    feature: usize,
    threshold: f64,
    left: usize,
    right: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Node {
    value: f64,
    impurity: f64,
    samples: f64,
    split: Option<Split>,
}

/// A validated decision tree.
///
/// Children always have a larger id than their parent, so traversal from
/// the root terminates.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Validate a tree spec.
    ///
    /// # Errors
    /// Returns `ArtifactLoadError::InvalidParameters` naming the first
    /// offending node.
    pub fn from_spec(path: &Path, spec: &TreeSpec) -> Result<Self, ArtifactLoadError> {
        let n = spec.children_left.len();
        if n == 0 {
            return Err(ArtifactLoadError::invalid(path, "tree has no nodes"));
        }

        let lengths = [
            spec.children_right.len(),
            spec.feature.len(),
            spec.threshold.len(),
            spec.value.len(),
            spec.impurity.len(),
            spec.n_node_samples.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(ArtifactLoadError::invalid(
                path,
                "tree node arrays have different lengths",
            ));
        }

        let mut nodes = Vec::with_capacity(n);
        for id in 0..n {
            let value = spec.value[id];
            let impurity = spec.impurity[id];
            if !value.is_finite() || !impurity.is_finite() || impurity < 0.0 {
                return Err(ArtifactLoadError::invalid(
                    path,
                    format!("node {id} has non-finite value or impurity"),
                ));
            }

            let split = match (spec.children_left[id], spec.children_right[id]) {
                (LEAF, LEAF) => None,
                (left, right) => Some(Self::split(path, spec, id, left, right)?),
            };

            nodes.push(Node {
                value,
                impurity,
                samples: spec.n_node_samples[id] as f64,
                split,
            });
        }

        Ok(Self { nodes })
    }

    fn split(
        path: &Path,
        spec: &TreeSpec,
        id: usize,
        left: i64,
        right: i64,
    ) -> Result<Split, ArtifactLoadError> {
        let n = spec.children_left.len();
        let child = |c: i64| -> Option<usize> {
            usize::try_from(c).ok().filter(|&c| c > id && c < n)
        };

        let (Some(left), Some(right)) = (child(left), child(right)) else {
            return Err(ArtifactLoadError::invalid(
                path,
                format!("node {id} has invalid children ({left}, {right})"),
            ));
        };

        let feature = usize::try_from(spec.feature[id])
            .ok()
            .filter(|&f| f < FEATURE_COUNT)
            .ok_or_else(|| {
                ArtifactLoadError::invalid(
                    path,
                    format!("node {id} splits on unknown feature {}", spec.feature[id]),
                )
            })?;

        let threshold = spec.threshold[id];
        if !threshold.is_finite() {
            return Err(ArtifactLoadError::invalid(
                path,
                format!("node {id} has non-finite threshold"),
            ));
        }

        Ok(Split {
            feature,
            threshold,
            left,
            right,
        })
    }

    /// Number of nodes, leaves included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Weighted impurity decrease per feature, normalized.
    #[must_use]
    pub fn impurity_importances(&self) -> FeatureImportances {
        let mut raw = [0.0; FEATURE_COUNT];
        for node in &self.nodes {
            if let Some(split) = node.split {
                let l = &self.nodes[split.left];
                let r = &self.nodes[split.right];
                raw[split.feature] += node.samples * node.impurity
                    - l.samples * l.impurity
                    - r.samples * r.impurity;
            }
        }
        FeatureImportances::new(raw).normalized()
    }
}

impl Regressor for DecisionTree {
    fn predict(&self, input: &ScaledVector) -> f64 {
        let mut id = 0;
        loop {
            let node = &self.nodes[id];
            match node.split {
                None => return node.value,
                Some(split) => {
                    id = if input.0[split.feature] <= split.threshold {
                        split.left
                    } else {
                        split.right
                    };
                }
            }
        }
    }

    fn feature_importances(&self) -> Option<FeatureImportances> {
        Some(self.impurity_importances())
    }

    fn kind(&self) -> &'static str {
        "decision_tree"
    }
}

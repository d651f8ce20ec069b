//! Tree ensemble regression model
//!
//! Covers gradient-boosted trees (outputs summed) and random forests (outputs
//! averaged). Each tree is a flat node array rooted at index 0:
//!
//! ```text
//! split: go to `left` when x[feature] <= threshold, otherwise `right`
//! leaf:  emit `value`
//! ```
//!
//! Child indices must be greater than their parent's index, which is how tree
//! exporters lay nodes out and guarantees evaluation terminates.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, FeatureVector, Regressor, FEATURE_COUNT};

/// Node of a regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// One regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn validate(&self, model: &str, tree: usize) -> Result<(), DomainError> {
        if self.nodes.is_empty() {
            return Err(DomainError::artifact(model, format!("tree {} has no nodes", tree)));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(DomainError::artifact(
                            model,
                            format!(
                                "tree {} node {} splits on feature {} (model has {})",
                                tree, index, feature, FEATURE_COUNT
                            ),
                        ));
                    }

                    if !threshold.is_finite() {
                        return Err(DomainError::artifact(
                            model,
                            format!("tree {} node {} has a non-finite threshold", tree, index),
                        ));
                    }

                    for child in [left, right] {
                        if *child <= index || *child >= self.nodes.len() {
                            return Err(DomainError::artifact(
                                model,
                                format!(
                                    "tree {} node {} has invalid child index {}",
                                    tree, index, child
                                ),
                            ));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(DomainError::artifact(
                            model,
                            format!("tree {} leaf {} has a non-finite value", tree, index),
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    fn evaluate(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let mut index = 0;

        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if x[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// How tree outputs are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Gradient boosting
    #[default]
    Sum,
    /// Random forest
    Mean,
}

/// Ensemble of regression trees
#[derive(Debug, Clone)]
pub struct TreeEnsembleRegressor {
    name: String,
    base_score: f64,
    aggregation: Aggregation,
    trees: Vec<RegressionTree>,
}

impl TreeEnsembleRegressor {
    pub fn new(
        name: impl Into<String>,
        base_score: f64,
        aggregation: Aggregation,
        trees: Vec<RegressionTree>,
    ) -> Result<Self, DomainError> {
        let name = name.into();

        if trees.is_empty() {
            return Err(DomainError::artifact(&name, "ensemble has no trees"));
        }

        if !base_score.is_finite() {
            return Err(DomainError::artifact(&name, "base_score must be finite"));
        }

        for (index, tree) in trees.iter().enumerate() {
            tree.validate(&name, index)?;
        }

        Ok(Self {
            name,
            base_score,
            aggregation,
            trees,
        })
    }
}

impl Regressor for TreeEnsembleRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, DomainError> {
        let x = features.to_array();
        let total: f64 = self.trees.iter().map(|tree| tree.evaluate(&x)).sum();

        let combined = match self.aggregation {
            Aggregation::Sum => total,
            Aggregation::Mean => total / self.trees.len() as f64,
        };

        Ok(self.base_score + combined)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

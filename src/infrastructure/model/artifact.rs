//! Serialized model artifact

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Aggregation, LinearRegressor, RegressionTree, TreeEnsembleRegressor};
use crate::domain::{DomainError, Regressor};

/// Exported model, tagged by `kind`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear {
        #[serde(default)]
        name: Option<String>,
        intercept: f64,
        coefficients: Vec<f64>,
    },
    TreeEnsemble {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        base_score: f64,
        #[serde(default)]
        aggregation: Aggregation,
        trees: Vec<RegressionTree>,
    },
}

impl ModelArtifact {
    /// Validate the artifact and build the regressor it describes
    pub fn into_regressor(self) -> Result<Arc<dyn Regressor>, DomainError> {
        match self {
            Self::Linear {
                name,
                intercept,
                coefficients,
            } => {
                let name = name.unwrap_or_else(|| "linear".to_string());
                Ok(Arc::new(LinearRegressor::new(name, intercept, &coefficients)?))
            }
            Self::TreeEnsemble {
                name,
                base_score,
                aggregation,
                trees,
            } => {
                let name = name.unwrap_or_else(|| "tree_ensemble".to_string());
                Ok(Arc::new(TreeEnsembleRegressor::new(
                    name,
                    base_score,
                    aggregation,
                    trees,
                )?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeatureVector;

    #[test]
    fn test_linear_artifact() {
        let artifact: ModelArtifact = serde_json::from_str(
            r#"{"kind": "linear", "intercept": 5000.0, "coefficients": [1000.0, 0.0, 0.0, 0.0]}"#,
        )
        .unwrap();

        let model = artifact.into_regressor().unwrap();
        assert_eq!(model.name(), "linear");
        assert_eq!(
            model.predict(&FeatureVector::new(16, 1.6, 0, 0)).unwrap(),
            21000.0
        );
    }

    #[test]
    fn test_tree_ensemble_artifact() {
        let artifact: ModelArtifact = serde_json::from_str(
            r#"{
                "kind": "tree_ensemble",
                "name": "laptop-forest-v3",
                "aggregation": "mean",
                "trees": [
                    {"nodes": [{"value": 60000.0}]},
                    {"nodes": [{"value": 40000.0}]}
                ]
            }"#,
        )
        .unwrap();

        let model = artifact.into_regressor().unwrap();
        assert_eq!(model.name(), "laptop-forest-v3");
        assert_eq!(
            model.predict(&FeatureVector::new(8, 1.6, 0, 0)).unwrap(),
            50000.0
        );
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result: Result<ModelArtifact, _> =
            serde_json::from_str(r#"{"kind": "neural_net", "layers": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_linear_artifact_with_wrong_arity() {
        let artifact: ModelArtifact = serde_json::from_str(
            r#"{"kind": "linear", "intercept": 0.0, "coefficients": [1.0, 2.0]}"#,
        )
        .unwrap();

        assert!(artifact.into_regressor().is_err());
    }
}

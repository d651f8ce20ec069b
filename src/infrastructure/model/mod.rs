//! Regression model implementations loaded from exported artifacts

mod artifact;
mod linear;
mod tree_ensemble;

pub use artifact::ModelArtifact;
pub use linear::LinearRegressor;
pub use tree_ensemble::{Aggregation, RegressionTree, TreeEnsembleRegressor, TreeNode};

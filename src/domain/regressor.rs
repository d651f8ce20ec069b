//! Regression model contract

use std::fmt::Debug;

use crate::domain::prediction::FeatureVector;
use crate::domain::DomainError;

/// Pretrained price model
///
/// Implementations are loaded once and shared across requests. The model does
/// no input validation of its own, so callers must pass a vector assembled by
/// the pipeline.
pub trait Regressor: Send + Sync + Debug {
    /// Base price for one encoded configuration
    fn predict(&self, features: &FeatureVector) -> Result<f64, DomainError>;

    /// Human-readable model name used in logs and health checks
    fn name(&self) -> &str;
}

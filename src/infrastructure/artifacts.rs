//! Artifact loaders - encoders, normalization tables and the model
//!
//! Every loader is called once at startup. Any failure is fatal: the service
//! refuses to start rather than serving with a partial pipeline.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::{DomainError, LabelEncoder, NormalizationTable, Regressor};
use crate::infrastructure::model::ModelArtifact;

#[derive(Debug, Deserialize)]
struct EncoderArtifact {
    classes: Vec<String>,
}

async fn read_artifact(path: &Path) -> Result<String, DomainError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DomainError::artifact(path.display().to_string(), e.to_string()))
}

/// Load a fitted label encoder from `{"classes": [...]}`
pub async fn load_encoder(name: &str, path: &Path) -> Result<LabelEncoder, DomainError> {
    let text = read_artifact(path).await?;
    let artifact: EncoderArtifact = serde_json::from_str(&text)
        .map_err(|e| DomainError::artifact(path.display().to_string(), e.to_string()))?;

    let encoder = LabelEncoder::new(name, artifact.classes)?;
    info!(
        encoder = name,
        classes = encoder.len(),
        path = %path.display(),
        "Encoder loaded"
    );

    Ok(encoder)
}

/// Load a normalization table from TOML
pub async fn load_normalization_table(path: &Path) -> Result<NormalizationTable, DomainError> {
    let text = read_artifact(path).await?;
    toml::from_str(&text)
        .map_err(|e| DomainError::artifact(path.display().to_string(), e.to_string()))
}

/// Load and validate the regression model
pub async fn load_model(path: &Path) -> Result<Arc<dyn Regressor>, DomainError> {
    let text = read_artifact(path).await?;
    let artifact: ModelArtifact = serde_json::from_str(&text)
        .map_err(|e| DomainError::artifact(path.display().to_string(), e.to_string()))?;

    let model = artifact.into_regressor()?;
    info!(model = model.name(), path = %path.display(), "Model loaded");

    Ok(model)
}

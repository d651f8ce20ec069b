//! Laptop Price Estimator
//!
//! Estimates the market price of a laptop configuration:
//! - Processor and graphics choices normalized onto fitted label encoders
//! - Regression inference over a fixed feature vector
//! - Heuristic calibration (inflation, premium hardware and usage bonuses)
//! - Comparable listings retrieved from a historical catalog

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use api::state::AppState;
use domain::{LabelNormalizer, NormalizationTable, PricePipeline};
use infrastructure::{
    artifacts::{load_encoder, load_model, load_normalization_table},
    catalog::{load_catalog, CatalogSource},
    services::PredictionService,
};
use tracing::info;

/// Load every artifact named in the configuration and assemble the pipeline
pub async fn create_pipeline(config: &AppConfig) -> anyhow::Result<PricePipeline> {
    let artifacts = &config.artifacts;

    let cpu_encoder = Arc::new(load_encoder("cpu", &artifacts.cpu_encoder).await?);
    let gpu_encoder = Arc::new(load_encoder("gpu", &artifacts.gpu_encoder).await?);

    let cpu_table = match &artifacts.cpu_normalization {
        Some(path) => load_normalization_table(path).await?,
        None => NormalizationTable::default_cpu(),
    };
    let cpu = LabelNormalizer::new(cpu_table, cpu_encoder)?;

    let gpu = match &artifacts.gpu_normalization {
        Some(path) => LabelNormalizer::new(load_normalization_table(path).await?, gpu_encoder)?,
        None => LabelNormalizer::identity(gpu_encoder),
    };

    let model = load_model(&artifacts.model).await?;

    let source = CatalogSource::parse(&artifacts.catalog);
    let catalog = load_catalog(&source)
        .await
        .with_context(|| format!("Failed to load catalog from {}", source))?;

    let pipeline = PricePipeline::new(Arc::new(catalog), cpu, gpu, model)
        .with_calibration(config.calibration.clone())?
        .with_retrieval(config.retrieval.finder()?)
        .with_reference_price(config.retrieval.reference);

    info!(
        model = pipeline.model().name(),
        catalog_size = pipeline.catalog().len(),
        "Price pipeline ready"
    );

    Ok(pipeline)
}

/// Create the prediction service with default configuration
pub async fn create_prediction_service(config: &AppConfig) -> anyhow::Result<PredictionService> {
    let pipeline = create_pipeline(config).await?;
    Ok(PredictionService::new(Arc::new(pipeline)))
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let service = create_prediction_service(config).await?;
    Ok(AppState::new(Arc::new(service), config.presentation.clone()))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;
    use crate::domain::{PredictionRequest, ReferencePrice};

    fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn config_in(dir: &TempDir) -> AppConfig {
        let root = dir.path();
        let mut config = AppConfig::default();

        config.artifacts.cpu_encoder = write(
            root,
            "cpu.json",
            r#"{"classes": ["AMD Ryzen 5", "AMD Ryzen 7", "Intel Core i3", "Intel Core i5", "Intel Core i7"]}"#,
        );
        config.artifacts.gpu_encoder =
            write(root, "gpu.json", r#"{"classes": ["AMD", "Intel", "Nvidia"]}"#);
        config.artifacts.cpu_normalization = None;
        config.artifacts.model = write(
            root,
            "model.json",
            r#"{"kind": "linear", "name": "test-linear", "intercept": 20000.0,
                "coefficients": [2000.0, -1000.0, 500.0, 1500.0]}"#,
        );
        config.artifacts.catalog = write(
            root,
            "laptops.csv",
            "Company,TypeName,Ram,Weight,Price,Cpu,Gpu\n\
             Dell,Notebook,8GB,1.8kg,38000,Intel Core i5,Intel\n\
             HP,Notebook,8GB,1.9kg,42000,Intel Core i5,Nvidia\n\
             Asus,Gaming,16GB,2.4kg,85000,Intel Core i7,Nvidia\n",
        )
        .display()
        .to_string();

        config
    }

    #[tokio::test]
    async fn test_create_pipeline_from_artifacts() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let pipeline = create_pipeline(&config).await.unwrap();

        assert_eq!(pipeline.model().name(), "test-linear");
        assert_eq!(pipeline.catalog().len(), 3);

        // ram 8, weight 1.6, Intel Core i5 -> 3, Intel -> 1
        // 20000 + 16000 - 1600 + 1500 + 1500 = 37400
        let prediction = pipeline
            .predict(&PredictionRequest::new(8, "Intel Core i5", "Intel"))
            .unwrap();
        assert_eq!(prediction.raw_price, 37400.0);
        assert_eq!(prediction.predicted_price, 38148);
        assert_eq!(prediction.comparable_items[0].company, "Dell");
    }

    #[tokio::test]
    async fn test_create_pipeline_honours_retrieval_reference() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.retrieval.reference = ReferencePrice::Raw;
        config.retrieval.limit = 1;

        let pipeline = create_pipeline(&config).await.unwrap();
        let prediction = pipeline
            .predict(&PredictionRequest::new(8, "Intel Core i5", "Intel"))
            .unwrap();

        assert_eq!(prediction.reference_price, 37400.0);
        assert_eq!(prediction.comparable_items.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_model_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.artifacts.model = dir.path().join("missing.json");

        assert!(create_pipeline(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_calibration_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.calibration.inflation_multiplier = 0.0;

        assert!(create_pipeline(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_shipped_assets_load() {
        let state = create_app_state_with_config(&AppConfig::default())
            .await
            .unwrap();
        let status = state.prediction_service.status();

        assert!(status.catalog_size > 0);
        assert!(status.cpu_labels > 0);

        let options = state.prediction_service.options();
        for choice in &options.cpu {
            let prediction = state
                .prediction_service
                .predict(&PredictionRequest::new(8, choice.as_str(), options.gpu[0].as_str()))
                .unwrap();
            assert!(prediction.comparable_items.len() <= 4);
        }
    }

    #[tokio::test]
    async fn test_invalid_retrieval_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.retrieval.limit = 0;

        assert!(create_pipeline(&config).await.is_err());
    }
}

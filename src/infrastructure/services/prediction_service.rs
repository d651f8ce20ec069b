//! Prediction service - runs the pipeline with logging and metrics

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::domain::{
    DomainError, PredictionOptions, PredictionRequest, PricePipeline, PricePrediction,
};
use crate::infrastructure::observability::{record_label_fallback, record_prediction};

/// Snapshot of the loaded artifacts for readiness checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStatus {
    pub model: String,
    pub catalog_size: usize,
    pub cpu_labels: usize,
    pub gpu_labels: usize,
}

/// Shared entry point used by both the HTTP API and the CLI
#[derive(Debug, Clone)]
pub struct PredictionService {
    pipeline: Arc<PricePipeline>,
}

impl PredictionService {
    pub fn new(pipeline: Arc<PricePipeline>) -> Self {
        Self { pipeline }
    }

    /// Estimate a price for one configuration
    pub fn predict(&self, request: &PredictionRequest) -> Result<PricePrediction, DomainError> {
        let started = Instant::now();
        let model = self.pipeline.model().name().to_string();

        match self.pipeline.predict(request) {
            Ok(prediction) => {
                if prediction.cpu.source.is_fallback() {
                    warn!(choice = %request.cpu, label = %prediction.cpu.label, "CPU choice fell back");
                    record_label_fallback("cpu");
                }
                if prediction.gpu.source.is_fallback() {
                    warn!(choice = %request.gpu, label = %prediction.gpu.label, "GPU choice fell back");
                    record_label_fallback("gpu");
                }

                record_prediction(
                    &model,
                    true,
                    Some(prediction.predicted_price),
                    started.elapsed(),
                );

                info!(
                    model = %model,
                    predicted_price = prediction.predicted_price,
                    raw_price = prediction.raw_price,
                    comparables = prediction.comparable_items.len(),
                    "Price estimated"
                );

                Ok(prediction)
            }
            Err(e) => {
                record_prediction(&model, false, None, started.elapsed());
                warn!(model = %model, error = %e, "Price estimation failed");
                Err(e)
            }
        }
    }

    pub fn options(&self) -> PredictionOptions {
        self.pipeline.options()
    }

    pub fn status(&self) -> PipelineStatus {
        PipelineStatus {
            model: self.pipeline.model().name().to_string(),
            catalog_size: self.pipeline.catalog().len(),
            cpu_labels: self.pipeline.cpu_normalizer().encoder().len(),
            gpu_labels: self.pipeline.gpu_normalizer().encoder().len(),
        }
    }
}

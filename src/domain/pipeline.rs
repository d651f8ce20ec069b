//! Price estimation pipeline
//!
//! One request runs validation, normalization, feature assembly, inference,
//! calibration and comparable retrieval in order. Everything the pipeline
//! holds is read-only after construction, so a single instance is shared by
//! all requests.

use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::domain::calibration::{CalibrationInput, CalibrationPolicy};
use crate::domain::catalog::{Catalog, ComparableFinder, ReferencePrice};
use crate::domain::normalization::LabelNormalizer;
use crate::domain::prediction::{
    FeatureVector, PricePrediction, PredictionRequest, Purpose, RAM_CHOICES_GB,
};
use crate::domain::regressor::Regressor;
use crate::domain::DomainError;

/// Option lists offered to users
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionOptions {
    pub ram_gb: Vec<u32>,
    pub cpu: Vec<String>,
    pub gpu: Vec<String>,
    pub purposes: Vec<Purpose>,
}

/// Loaded pipeline with its artifacts
#[derive(Debug, Clone)]
pub struct PricePipeline {
    catalog: Arc<Catalog>,
    cpu: LabelNormalizer,
    gpu: LabelNormalizer,
    model: Arc<dyn Regressor>,
    calibration: CalibrationPolicy,
    retrieval: ComparableFinder,
    reference: ReferencePrice,
}

impl PricePipeline {
    /// Create a pipeline with default calibration and retrieval
    pub fn new(
        catalog: Arc<Catalog>,
        cpu: LabelNormalizer,
        gpu: LabelNormalizer,
        model: Arc<dyn Regressor>,
    ) -> Self {
        Self {
            catalog,
            cpu,
            gpu,
            model,
            calibration: CalibrationPolicy::default(),
            retrieval: ComparableFinder::default(),
            reference: ReferencePrice::default(),
        }
    }

    pub fn with_calibration(mut self, policy: CalibrationPolicy) -> Result<Self, DomainError> {
        policy.validate()?;
        self.calibration = policy;
        Ok(self)
    }

    pub fn with_retrieval(mut self, finder: ComparableFinder) -> Self {
        self.retrieval = finder;
        self
    }

    pub fn with_reference_price(mut self, reference: ReferencePrice) -> Self {
        self.reference = reference;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn model(&self) -> &dyn Regressor {
        self.model.as_ref()
    }

    pub fn cpu_normalizer(&self) -> &LabelNormalizer {
        &self.cpu
    }

    pub fn gpu_normalizer(&self) -> &LabelNormalizer {
        &self.gpu
    }

    /// Run the pipeline for one request
    pub fn predict(&self, request: &PredictionRequest) -> Result<PricePrediction, DomainError> {
        self.predict_with_rng(request, &mut rand::thread_rng())
    }

    /// Run the pipeline with the RNG used by sampling retrieval modes
    pub fn predict_with_rng<R: Rng + ?Sized>(
        &self,
        request: &PredictionRequest,
        rng: &mut R,
    ) -> Result<PricePrediction, DomainError> {
        request.validate()?;

        let (cpu, cpu_code) = self.cpu.encode(&request.cpu)?;
        let (gpu, gpu_code) = self.gpu.encode(&request.gpu)?;

        debug!(
            cpu_choice = %request.cpu,
            cpu_label = %cpu.label,
            gpu_choice = %request.gpu,
            gpu_label = %gpu.label,
            "Labels normalized"
        );

        let features = FeatureVector::new(request.ram_gb, request.weight_kg, cpu_code, gpu_code);
        let output = self.model.predict(&features)?;

        if !output.is_finite() {
            return Err(DomainError::inference(format!(
                "model '{}' returned a non-finite price: {}",
                self.model.name(),
                output
            )));
        }

        let raw_price = output.max(0.0);
        let calibration = self.calibration.calibrate(
            raw_price,
            &CalibrationInput {
                cpu_choice: &request.cpu,
                refresh_rate_hz: request.refresh_rate_hz,
                purpose: request.purpose,
            },
        );

        let reference_price = match self.reference {
            ReferencePrice::Calibrated => calibration.price as f64,
            ReferencePrice::Raw => raw_price,
        };

        let comparable_items = self.retrieval.find(&self.catalog, reference_price, rng);

        Ok(PricePrediction {
            predicted_price: calibration.price,
            raw_price,
            reference_price,
            adjustments: calibration.adjustments,
            cpu,
            gpu,
            features,
            comparable_items,
        })
    }

    /// Choices a client can offer for each input
    pub fn options(&self) -> PredictionOptions {
        PredictionOptions {
            ram_gb: RAM_CHOICES_GB.to_vec(),
            cpu: self.cpu.exposed_choices(),
            gpu: self.gpu.exposed_choices(),
            purposes: Purpose::ALL.to_vec(),
        }
    }
}

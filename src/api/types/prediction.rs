//! Prediction request/response types

use serde::{Deserialize, Serialize};

use crate::config::PresentationConfig;
use crate::domain::{
    Adjustment, LaptopRecord, Normalization, PredictionOptions, PredictionRequest, PricePrediction,
    Purpose, DEFAULT_WEIGHT_KG,
};

/// POST /v1/predict body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PredictPriceRequest {
    pub ram_gb: u32,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    pub cpu: String,
    pub gpu: String,
    #[serde(default)]
    pub refresh_rate_hz: Option<u32>,
    #[serde(default)]
    pub purpose: Option<Purpose>,
}

impl From<PredictPriceRequest> for PredictionRequest {
    fn from(body: PredictPriceRequest) -> Self {
        PredictionRequest {
            ram_gb: body.ram_gb,
            weight_kg: body.weight_kg.unwrap_or(DEFAULT_WEIGHT_KG),
            cpu: body.cpu,
            gpu: body.gpu,
            refresh_rate_hz: body.refresh_rate_hz,
            purpose: body.purpose,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedLabels {
    pub cpu: String,
    pub gpu: String,
    pub cpu_fallback: bool,
    pub gpu_fallback: bool,
}

/// A catalog listing close to the estimated price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparableItem {
    pub company: String,
    pub type_name: String,
    pub cpu: String,
    pub gpu: String,
    pub ram_gb: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    pub price: u64,
    pub shop_url: String,
}

impl ComparableItem {
    pub fn from_domain(record: &LaptopRecord, presentation: &PresentationConfig) -> Self {
        Self {
            company: record.company.clone(),
            type_name: record.type_name.clone(),
            cpu: record.cpu.clone(),
            gpu: record.gpu.clone(),
            ram_gb: record.ram_gb,
            weight_kg: record.weight_kg,
            price: record.price.max(0.0) as u64,
            shop_url: presentation.shop_url(&record.company),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictPriceResponse {
    pub predicted_price: u64,
    pub raw_price: f64,
    pub currency: String,
    pub adjustments: Vec<Adjustment>,
    pub normalized: NormalizedLabels,
    pub comparable_items: Vec<ComparableItem>,
}

impl PredictPriceResponse {
    pub fn from_domain(prediction: PricePrediction, presentation: &PresentationConfig) -> Self {
        let comparable_items = prediction
            .comparable_items
            .iter()
            .map(|record| ComparableItem::from_domain(record, presentation))
            .collect();

        Self {
            predicted_price: prediction.predicted_price,
            raw_price: prediction.raw_price,
            currency: presentation.currency.clone(),
            adjustments: prediction.adjustments,
            normalized: NormalizedLabels::from_pair(&prediction.cpu, &prediction.gpu),
            comparable_items,
        }
    }
}

impl NormalizedLabels {
    fn from_pair(cpu: &Normalization, gpu: &Normalization) -> Self {
        Self {
            cpu: cpu.label.clone(),
            gpu: gpu.label.clone(),
            cpu_fallback: cpu.source.is_fallback(),
            gpu_fallback: gpu.source.is_fallback(),
        }
    }
}

/// GET /v1/options response
#[derive(Debug, Clone, Serialize)]
pub struct OptionsResponse {
    pub ram_gb: Vec<u32>,
    pub cpu: Vec<String>,
    pub gpu: Vec<String>,
    pub purposes: Vec<Purpose>,
    pub default_weight_kg: f64,
    pub currency: String,
}

impl OptionsResponse {
    pub fn from_domain(options: PredictionOptions, presentation: &PresentationConfig) -> Self {
        Self {
            ram_gb: options.ram_gb,
            cpu: options.cpu,
            gpu: options.gpu,
            purposes: options.purposes,
            default_weight_kg: DEFAULT_WEIGHT_KG,
            currency: presentation.currency.clone(),
        }
    }
}

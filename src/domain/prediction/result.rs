//! Prediction result

use serde::Serialize;

use super::FeatureVector;
use crate::domain::calibration::Adjustment;
use crate::domain::catalog::LaptopRecord;
use crate::domain::normalization::Normalization;

/// Outcome of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePrediction {
    /// Calibrated price shown to the user
    pub predicted_price: u64,

    /// Model output before calibration
    pub raw_price: f64,

    /// Price the comparable items were matched against
    pub reference_price: f64,

    pub adjustments: Vec<Adjustment>,
    pub cpu: Normalization,
    pub gpu: Normalization,
    pub features: FeatureVector,

    /// At most the configured limit, closest first
    pub comparable_items: Vec<LaptopRecord>,
}

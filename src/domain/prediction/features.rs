//! Model feature vector

use serde::Serialize;

/// Number of model inputs
pub const FEATURE_COUNT: usize = 4;

/// Input order the model was trained with
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = ["ram", "weight", "cpu", "gpu"];

/// Encoded model input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    pub ram: f64,
    pub weight: f64,
    pub cpu_code: f64,
    pub gpu_code: f64,
}

impl FeatureVector {
    pub fn new(ram_gb: u32, weight_kg: f64, cpu_code: u32, gpu_code: u32) -> Self {
        Self {
            ram: f64::from(ram_gb),
            weight: weight_kg,
            cpu_code: f64::from(cpu_code),
            gpu_code: f64::from(gpu_code),
        }
    }

    /// Values in `FEATURE_NAMES` order
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [self.ram, self.weight, self.cpu_code, self.gpu_code]
    }
}

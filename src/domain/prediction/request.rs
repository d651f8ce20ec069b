//! Prediction request

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Weight assumed when the caller does not state one
pub const DEFAULT_WEIGHT_KG: f64 = 1.6;

/// RAM sizes offered to users
pub const RAM_CHOICES_GB: [u32; 5] = [4, 8, 16, 32, 64];

/// Intended use of the laptop, used by calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    General,
    Office,
    Student,
    Gaming,
    Editing,
}

impl Purpose {
    pub const ALL: [Purpose; 5] = [
        Purpose::General,
        Purpose::Office,
        Purpose::Student,
        Purpose::Gaming,
        Purpose::Editing,
    ];
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General => write!(f, "general"),
            Self::Office => write!(f, "office"),
            Self::Student => write!(f, "student"),
            Self::Gaming => write!(f, "gaming"),
            Self::Editing => write!(f, "editing"),
        }
    }
}

impl std::str::FromStr for Purpose {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "general" => Ok(Self::General),
            "office" => Ok(Self::Office),
            "student" => Ok(Self::Student),
            "gaming" => Ok(Self::Gaming),
            "editing" => Ok(Self::Editing),
            _ => Err(DomainError::validation(format!(
                "Unknown purpose: {}. Valid purposes: general, office, student, gaming, editing",
                s
            ))),
        }
    }
}

/// Hardware selection submitted for a price estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub ram_gb: u32,

    #[serde(default = "default_weight")]
    pub weight_kg: f64,

    /// Processor choice as shown to the user
    pub cpu: String,

    /// Graphics choice as shown to the user
    pub gpu: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_rate_hz: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<Purpose>,
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT_KG
}

impl PredictionRequest {
    pub fn new(ram_gb: u32, cpu: impl Into<String>, gpu: impl Into<String>) -> Self {
        Self {
            ram_gb,
            weight_kg: DEFAULT_WEIGHT_KG,
            cpu: cpu.into(),
            gpu: gpu.into(),
            refresh_rate_hz: None,
            purpose: None,
        }
    }

    pub fn with_weight(mut self, weight_kg: f64) -> Self {
        self.weight_kg = weight_kg;
        self
    }

    pub fn with_refresh_rate(mut self, hz: u32) -> Self {
        self.refresh_rate_hz = Some(hz);
        self
    }

    pub fn with_purpose(mut self, purpose: Purpose) -> Self {
        self.purpose = Some(purpose);
        self
    }

    /// Reject inputs the model must never see
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.ram_gb == 0 {
            return Err(DomainError::validation("ram_gb must be greater than 0"));
        }

        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(DomainError::validation(format!(
                "weight_kg must be a positive number, got {}",
                self.weight_kg
            )));
        }

        if self.cpu.trim().is_empty() {
            return Err(DomainError::validation("cpu cannot be empty"));
        }

        if self.gpu.trim().is_empty() {
            return Err(DomainError::validation("gpu cannot be empty"));
        }

        if self.refresh_rate_hz == Some(0) {
            return Err(DomainError::validation(
                "refresh_rate_hz must be greater than 0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let request = PredictionRequest::new(16, "Intel Core i7", "Nvidia")
            .with_refresh_rate(144)
            .with_purpose(Purpose::Gaming);
        assert!(request.validate().is_ok());
        assert_eq!(request.weight_kg, DEFAULT_WEIGHT_KG);
    }

    #[test]
    fn test_zero_ram_rejected() {
        let request = PredictionRequest::new(0, "Intel Core i7", "Nvidia");
        assert!(matches!(
            request.validate(),
            Err(DomainError::Validation { .. })
        ));
    }

    #[test]
    fn test_bad_weight_rejected() {
        for weight in [0.0, -1.2, f64::NAN, f64::INFINITY] {
            let request = PredictionRequest::new(8, "Intel Core i5", "Intel").with_weight(weight);
            assert!(request.validate().is_err(), "weight {} accepted", weight);
        }
    }

    #[test]
    fn test_blank_labels_rejected() {
        assert!(PredictionRequest::new(8, "  ", "Intel").validate().is_err());
        assert!(PredictionRequest::new(8, "Intel Core i5", "").validate().is_err());
    }

    #[test]
    fn test_zero_refresh_rate_rejected() {
        let request = PredictionRequest::new(8, "Intel Core i5", "Intel").with_refresh_rate(0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_deserialize_applies_default_weight() {
        let request: PredictionRequest = serde_json::from_str(
            r#"{"ram_gb": 8, "cpu": "Intel Core i5", "gpu": "Intel", "purpose": "editing"}"#,
        )
        .unwrap();

        assert_eq!(request.weight_kg, 1.6);
        assert_eq!(request.purpose, Some(Purpose::Editing));
        assert_eq!(request.refresh_rate_hz, None);
    }

    #[test]
    fn test_purpose_from_str() {
        assert_eq!("Gaming".parse::<Purpose>().unwrap(), Purpose::Gaming);
        assert_eq!("office".parse::<Purpose>().unwrap(), Purpose::Office);
        assert!("mining".parse::<Purpose>().is_err());
        assert_eq!(Purpose::Student.to_string(), "student");
    }
}

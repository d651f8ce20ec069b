//! Linear regression model

use crate::domain::{DomainError, FeatureVector, Regressor, FEATURE_COUNT};

/// `price = intercept + sum(coefficient[i] * feature[i])`
#[derive(Debug, Clone)]
pub struct LinearRegressor {
    name: String,
    intercept: f64,
    coefficients: [f64; FEATURE_COUNT],
}

impl LinearRegressor {
    pub fn new(
        name: impl Into<String>,
        intercept: f64,
        coefficients: &[f64],
    ) -> Result<Self, DomainError> {
        let name = name.into();

        let coefficients: [f64; FEATURE_COUNT] = coefficients.try_into().map_err(|_| {
            DomainError::artifact(
                &name,
                format!(
                    "expected {} coefficients, got {}",
                    FEATURE_COUNT,
                    coefficients.len()
                ),
            )
        })?;

        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(DomainError::artifact(
                &name,
                "intercept and coefficients must be finite",
            ));
        }

        Ok(Self {
            name,
            intercept,
            coefficients,
        })
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, DomainError> {
        let dot: f64 = features
            .to_array()
            .iter()
            .zip(self.coefficients.iter())
            .map(|(x, w)| x * w)
            .sum();

        Ok(self.intercept + dot)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict() {
        let model = LinearRegressor::new("linear", 10000.0, &[2500.0, -4000.0, 6000.0, 3000.0])
            .unwrap();
        let features = FeatureVector::new(8, 1.5, 2, 1);

        // 10000 + 20000 - 6000 + 12000 + 3000
        assert_eq!(model.predict(&features).unwrap(), 39000.0);
        assert_eq!(model.name(), "linear");
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let result = LinearRegressor::new("linear", 0.0, &[1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(DomainError::Artifact { .. })));
    }

    #[test]
    fn test_non_finite_weights_rejected() {
        let result = LinearRegressor::new("linear", 0.0, &[1.0, f64::NAN, 3.0, 4.0]);
        assert!(result.is_err());
    }
}

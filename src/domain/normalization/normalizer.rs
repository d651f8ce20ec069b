//! Label normalizer
//!
//! Resolves a raw UI choice to a label the encoder is guaranteed to know:
//!
//! 1. the table entry for the choice, when its target is known
//! 2. the choice itself, when the encoder knows it
//! 3. the table fallback, when the encoder knows it
//! 4. the encoder's first known label
//!
//! Steps 3 and 4 check the encoder at lookup time, so a refitted encoder can
//! never turn a stale fallback into a failed request.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::NormalizationTable;
use crate::domain::encoder::LabelEncoder;
use crate::domain::DomainError;

/// How a normalized label was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationSource {
    /// Found in the normalization table
    Mapped,
    /// The choice was already a known label
    Identity,
    /// The table fallback was used
    Fallback,
    /// Nothing else applied; the encoder's first label was used
    FirstKnown,
}

impl NormalizationSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback | Self::FirstKnown)
    }
}

/// Result of normalizing one choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Normalization {
    pub label: String,
    pub source: NormalizationSource,
}

/// Normalizer bound to the encoder it feeds
#[derive(Debug, Clone)]
pub struct LabelNormalizer {
    table: NormalizationTable,
    encoder: Arc<LabelEncoder>,
}

impl LabelNormalizer {
    /// Bind a table to an encoder, rejecting tables that point at unknown labels
    pub fn new(table: NormalizationTable, encoder: Arc<LabelEncoder>) -> Result<Self, DomainError> {
        if !encoder.knows(&table.fallback) {
            return Err(DomainError::configuration(format!(
                "normalization table {} for encoder '{}': fallback '{}' is not a known label",
                table.version,
                encoder.name(),
                table.fallback
            )));
        }

        if let Some(entry) = table.entries.iter().find(|e| !encoder.knows(&e.label)) {
            return Err(DomainError::configuration(format!(
                "normalization table {} for encoder '{}': choice '{}' maps to unknown label '{}'",
                table.version,
                encoder.name(),
                entry.choice,
                entry.label
            )));
        }

        info!(
            encoder = encoder.name(),
            version = %table.version,
            entries = table.entries.len(),
            "Normalization table validated"
        );

        Ok(Self { table, encoder })
    }

    /// Pass-through normalizer for encoders whose classes are offered directly
    pub fn identity(encoder: Arc<LabelEncoder>) -> Self {
        let table = NormalizationTable::new("identity", encoder.first_label());
        Self { table, encoder }
    }

    pub fn encoder(&self) -> &LabelEncoder {
        &self.encoder
    }

    /// Resolve a choice to a label the encoder knows
    pub fn normalize(&self, choice: &str) -> Normalization {
        if let Some(label) = self.table.lookup(choice) {
            if self.encoder.knows(label) {
                return Normalization {
                    label: label.to_string(),
                    source: NormalizationSource::Mapped,
                };
            }
        }

        if self.encoder.knows(choice) {
            return Normalization {
                label: choice.to_string(),
                source: NormalizationSource::Identity,
            };
        }

        if self.encoder.knows(&self.table.fallback) {
            return Normalization {
                label: self.table.fallback.clone(),
                source: NormalizationSource::Fallback,
            };
        }

        warn!(
            encoder = self.encoder.name(),
            choice = %choice,
            fallback = %self.table.fallback,
            "Fallback label unknown to encoder, using first known label"
        );

        Normalization {
            label: self.encoder.first_label().to_string(),
            source: NormalizationSource::FirstKnown,
        }
    }

    /// Normalize and encode in one step
    pub fn encode(&self, choice: &str) -> Result<(Normalization, u32), DomainError> {
        let normalization = self.normalize(choice);
        let code = self.encoder.transform(&normalization.label)?;
        Ok((normalization, code))
    }

    /// Choices offered to users: table entries first, then remaining encoder classes
    pub fn exposed_choices(&self) -> Vec<String> {
        let mut choices: Vec<String> = self.table.choices().map(str::to_string).collect();

        for class in self.encoder.classes() {
            if !choices.iter().any(|c| c == class) {
                choices.push(class.clone());
            }
        }

        choices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu_encoder() -> Arc<LabelEncoder> {
        Arc::new(
            LabelEncoder::new(
                "cpu",
                vec![
                    "AMD Ryzen 5".to_string(),
                    "AMD Ryzen 7".to_string(),
                    "Intel Core i3".to_string(),
                    "Intel Core i5".to_string(),
                    "Intel Core i7".to_string(),
                ],
            )
            .unwrap(),
        )
    }

    fn cpu_normalizer() -> LabelNormalizer {
        LabelNormalizer::new(NormalizationTable::default_cpu(), cpu_encoder()).unwrap()
    }

    #[test]
    fn test_i9_maps_to_i7() {
        let normalizer = cpu_normalizer();
        let (normalization, code) = normalizer.encode("Intel Core i9").unwrap();

        assert_eq!(normalization.label, "Intel Core i7");
        assert_eq!(normalization.source, NormalizationSource::Mapped);
        assert_eq!(code, normalizer.encoder().transform("Intel Core i7").unwrap());
    }

    #[test]
    fn test_known_label_passes_through() {
        let normalizer = cpu_normalizer();
        let normalization = normalizer.normalize("AMD Ryzen 7");
        assert_eq!(normalization.label, "AMD Ryzen 7");
        assert_eq!(normalization.source, NormalizationSource::Mapped);

        let identity = LabelNormalizer::identity(cpu_encoder());
        let normalization = identity.normalize("Intel Core i3");
        assert_eq!(normalization.source, NormalizationSource::Identity);
    }

    #[test]
    fn test_unlisted_choice_uses_fallback() {
        let normalizer = cpu_normalizer();
        let normalization = normalizer.normalize("Snapdragon X Elite");

        assert_eq!(normalization.label, "Intel Core i7");
        assert_eq!(normalization.source, NormalizationSource::Fallback);
        assert!(normalization.source.is_fallback());
    }

    #[test]
    fn test_unknown_fallback_rejected_at_startup() {
        let table = NormalizationTable::new("bad", "Intel Core i9");
        let result = LabelNormalizer::new(table, cpu_encoder());
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_unknown_target_rejected_at_startup() {
        let table = NormalizationTable::new("bad", "Intel Core i7")
            .with_entry("Apple M3", "Apple M3");
        let result = LabelNormalizer::new(table, cpu_encoder());
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_identity_normalizer_falls_back_to_first_label() {
        let normalizer = LabelNormalizer::identity(cpu_encoder());
        let normalization = normalizer.normalize("RISC-V");
        assert_eq!(normalization.label, "AMD Ryzen 5");
    }

    #[test]
    fn test_stale_fallback_resolves_to_first_known_label() {
        let normalizer = LabelNormalizer {
            table: NormalizationTable::new("stale", "Intel Core i9"),
            encoder: cpu_encoder(),
        };

        let (normalization, code) = normalizer.encode("Intel Core i9").unwrap();
        assert_eq!(normalization.label, "AMD Ryzen 5");
        assert_eq!(normalization.source, NormalizationSource::FirstKnown);
        assert_eq!(code, 0);
    }

    #[test]
    fn test_every_exposed_choice_is_encodable() {
        let normalizer = cpu_normalizer();

        for choice in normalizer.exposed_choices() {
            let normalization = normalizer.normalize(&choice);
            assert!(
                normalizer.encoder().knows(&normalization.label),
                "choice '{}' normalized to unknown label '{}'",
                choice,
                normalization.label
            );
        }
    }

    #[test]
    fn test_exposed_choices_append_unlisted_classes() {
        let normalizer = cpu_normalizer();
        let choices = normalizer.exposed_choices();

        assert_eq!(choices[0], "Intel Core i9");
        assert_eq!(choices.len(), 7);

        let identity = LabelNormalizer::identity(cpu_encoder());
        assert_eq!(identity.exposed_choices().len(), 5);
    }
}

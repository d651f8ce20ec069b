//! Fitted label encoder
//!
//! Maps a fixed, finite set of label strings onto integer codes. The code of a
//! label is its position in the fitted class list, matching how the encoders
//! were exported from the training pipeline.

use std::collections::HashMap;

use crate::domain::DomainError;

/// Fitted categorical-to-integer label mapper
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    name: String,
    classes: Vec<String>,
    codes: HashMap<String, u32>,
}

impl LabelEncoder {
    /// Create an encoder from its fitted class list
    pub fn new(name: impl Into<String>, classes: Vec<String>) -> Result<Self, DomainError> {
        let name = name.into();

        if classes.is_empty() {
            return Err(DomainError::artifact(
                &name,
                "encoder must have at least one class",
            ));
        }

        let mut codes = HashMap::with_capacity(classes.len());

        for (index, label) in classes.iter().enumerate() {
            if codes.insert(label.clone(), index as u32).is_some() {
                return Err(DomainError::artifact(
                    &name,
                    format!("duplicate class label '{}'", label),
                ));
            }
        }

        Ok(Self {
            name,
            classes,
            codes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Known labels in code order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// The label with code 0
    pub fn first_label(&self) -> &str {
        &self.classes[0]
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Whether the label belongs to the fitted class set
    pub fn knows(&self, label: &str) -> bool {
        self.codes.contains_key(label)
    }

    /// Encode a label, failing on anything outside the fitted class set
    pub fn transform(&self, label: &str) -> Result<u32, DomainError> {
        self.codes
            .get(label)
            .copied()
            .ok_or_else(|| DomainError::unknown_label(&self.name, label))
    }
}

//! Versioned label normalization table

use serde::{Deserialize, Serialize};

/// One UI choice and the encoder label it stands for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationEntry {
    pub choice: String,
    pub label: String,
}

impl NormalizationEntry {
    pub fn new(choice: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            choice: choice.into(),
            label: label.into(),
        }
    }
}

/// Mapping from exposed UI choices to recognized encoder labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationTable {
    /// Table revision, reported in logs at startup
    pub version: String,

    /// Label used when a choice has no usable entry
    pub fallback: String,

    /// Entries in the order they are offered to users
    #[serde(default)]
    pub entries: Vec<NormalizationEntry>,
}

impl NormalizationTable {
    pub fn new(version: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            fallback: fallback.into(),
            entries: Vec::new(),
        }
    }

    pub fn with_entry(mut self, choice: impl Into<String>, label: impl Into<String>) -> Self {
        self.entries.push(NormalizationEntry::new(choice, label));
        self
    }

    /// Target label configured for a choice
    pub fn lookup(&self, choice: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.choice == choice)
            .map(|entry| entry.label.as_str())
    }

    /// Choices listed in the table, in table order
    pub fn choices(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.choice.as_str())
    }

    /// Processor table shipped with the application
    pub fn default_cpu() -> Self {
        Self::new("2026.1", "Intel Core i7")
            .with_entry("Intel Core i9", "Intel Core i7")
            .with_entry("Intel Core i7", "Intel Core i7")
            .with_entry("Intel Core i5", "Intel Core i5")
            .with_entry("Intel Core i3", "Intel Core i3")
            .with_entry("AMD Ryzen 9", "AMD Ryzen 7")
            .with_entry("AMD Ryzen 7", "AMD Ryzen 7")
            .with_entry("AMD Ryzen 5", "AMD Ryzen 5")
    }
}

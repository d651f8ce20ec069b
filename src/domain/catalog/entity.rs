//! Catalog entities

use serde::{Deserialize, Serialize};

/// One historical laptop listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaptopRecord {
    pub company: String,
    pub type_name: String,
    pub cpu: String,
    pub gpu: String,
    pub ram_gb: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    pub price: f64,
}

impl LaptopRecord {
    /// Create a record with only a company and a price set
    pub fn priced(company: impl Into<String>, price: f64) -> Self {
        Self {
            company: company.into(),
            type_name: String::new(),
            cpu: String::new(),
            gpu: String::new(),
            ram_gb: 0,
            weight_kg: None,
            price,
        }
    }

    /// Absolute price distance to a reference price
    pub fn price_distance(&self, reference: f64) -> f64 {
        (self.price - reference).abs()
    }
}

/// Immutable, ordered catalog of listings
///
/// Row order is the order of the source and is used as the retrieval
/// tie-break, so it must never be rearranged after loading.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<LaptopRecord>,
}

impl Catalog {
    pub fn new(records: Vec<LaptopRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[LaptopRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LaptopRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<LaptopRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = LaptopRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

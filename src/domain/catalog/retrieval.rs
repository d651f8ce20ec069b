//! Comparable-item retrieval
//!
//! Selects the catalog records closest in price to a reference price. Distances
//! are computed into a request-local list; the shared catalog is only read.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Catalog, LaptopRecord};

/// Default number of comparable items returned
pub const DEFAULT_COMPARABLE_LIMIT: usize = 4;

/// Which price the comparable items are matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferencePrice {
    /// The calibrated price shown to the user
    #[default]
    Calibrated,
    /// The model output before calibration
    Raw,
}

/// Retrieval strategy
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RetrievalMode {
    /// Closest prices first, ties in catalog order
    #[default]
    Nearest,
    /// Random sample of records within `window` of the reference price
    PriceWindow { window: f64 },
}

/// Finds comparable catalog records
#[derive(Debug, Clone)]
pub struct ComparableFinder {
    mode: RetrievalMode,
    limit: usize,
}

impl Default for ComparableFinder {
    fn default() -> Self {
        Self::new(RetrievalMode::default(), DEFAULT_COMPARABLE_LIMIT)
    }
}

impl ComparableFinder {
    pub fn new(mode: RetrievalMode, limit: usize) -> Self {
        Self { mode, limit }
    }

    pub fn mode(&self) -> RetrievalMode {
        self.mode
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Find comparable records using the configured mode
    pub fn find<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        reference: f64,
        rng: &mut R,
    ) -> Vec<LaptopRecord> {
        match self.mode {
            RetrievalMode::Nearest => Self::nearest(catalog, reference, self.limit),
            RetrievalMode::PriceWindow { window } => {
                Self::sample_window(catalog, reference, window, self.limit, rng)
            }
        }
    }

    /// Up to `limit` records ordered by ascending price distance
    pub fn nearest(catalog: &Catalog, reference: f64, limit: usize) -> Vec<LaptopRecord> {
        let mut ranked: Vec<(usize, f64)> = catalog
            .iter()
            .enumerate()
            .map(|(index, record)| (index, record.price_distance(reference)))
            .collect();

        // sort_by is stable: equal distances keep catalog order
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

        ranked
            .into_iter()
            .take(limit)
            .map(|(index, _)| catalog.records()[index].clone())
            .collect()
    }

    fn sample_window<R: Rng + ?Sized>(
        catalog: &Catalog,
        reference: f64,
        window: f64,
        limit: usize,
        rng: &mut R,
    ) -> Vec<LaptopRecord> {
        let candidates: Vec<(usize, f64)> = catalog
            .iter()
            .enumerate()
            .map(|(index, record)| (index, record.price_distance(reference)))
            .filter(|(_, distance)| *distance <= window)
            .collect();

        if candidates.is_empty() {
            return Self::nearest(catalog, reference, limit);
        }

        let mut picked: Vec<(usize, f64)> = candidates
            .choose_multiple(rng, limit)
            .copied()
            .collect();

        picked.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        picked
            .into_iter()
            .map(|(index, _)| catalog.records()[index].clone())
            .collect()
    }
}

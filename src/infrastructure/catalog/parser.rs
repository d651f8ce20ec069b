//! CSV catalog parser
//!
//! Reads the listing dataset format: `Company`, `TypeName`, `Cpu`, `Ram`
//! (`"8GB"`), `Gpu`, `Weight` (`"1.37kg"`) and `Price`. Other columns are
//! ignored. Rows with an unparsable `Ram` or `Price` are skipped and logged; an
//! unparsable `Weight` is kept as unknown. A malformed CSV structure or a
//! missing required column fails the load.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::{Catalog, DomainError, LaptopRecord};

static RAM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\d+)\s*(?:gb)?\s*$").unwrap());

static WEIGHT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*(?:kgs?)?\s*$").unwrap());

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Company")]
    company: String,
    #[serde(rename = "TypeName", default)]
    type_name: String,
    #[serde(rename = "Cpu", default)]
    cpu: String,
    #[serde(rename = "Gpu", default)]
    gpu: String,
    #[serde(rename = "Ram")]
    ram: String,
    #[serde(rename = "Weight", default)]
    weight: String,
    #[serde(rename = "Price")]
    price: String,
}

impl CatalogRow {
    fn into_record(self) -> Result<LaptopRecord, String> {
        let ram_gb = parse_ram(&self.ram).ok_or_else(|| format!("invalid Ram '{}'", self.ram))?;
        let price = parse_price(&self.price)
            .ok_or_else(|| format!("invalid Price '{}'", self.price))?;
        let weight_kg = parse_weight(&self.weight);

        Ok(LaptopRecord {
            company: self.company.trim().to_string(),
            type_name: self.type_name.trim().to_string(),
            cpu: self.cpu.trim().to_string(),
            gpu: self.gpu.trim().to_string(),
            ram_gb,
            weight_kg,
            price,
        })
    }
}

fn parse_ram(raw: &str) -> Option<u32> {
    RAM_PATTERN
        .captures(raw)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|ram| *ram > 0)
}

fn parse_weight(raw: &str) -> Option<f64> {
    WEIGHT_PATTERN
        .captures(raw)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .filter(|w| *w > 0.0)
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}

/// Parse catalog CSV text, preserving row order
pub fn parse_catalog(text: &str) -> Result<Catalog, DomainError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| DomainError::catalog(format!("Failed to read CSV header: {}", e)))?
        .clone();

    for required in ["Company", "Ram", "Price"] {
        if !headers.iter().any(|h| h == required) {
            return Err(DomainError::catalog(format!(
                "Missing required column '{}'",
                required
            )));
        }
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (index, row) in reader.deserialize::<CatalogRow>().enumerate() {
        // header is line 1
        let line = index + 2;
        let row = row.map_err(|e| DomainError::catalog(format!("Line {}: {}", line, e)))?;

        match row.into_record() {
            Ok(record) => records.push(record),
            Err(reason) => {
                skipped += 1;
                warn!(line, reason = %reason, "Skipping catalog row");
            }
        }
    }

    info!(rows = records.len(), skipped, "Catalog parsed");

    Ok(Catalog::new(records))
}

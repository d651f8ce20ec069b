//! Catalog source resolution

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use super::parse_catalog;
use crate::domain::{Catalog, DomainError};

/// Where the catalog CSV is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// `http(s)://` locations are fetched, anything else is a file path
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Read and parse the catalog once
pub async fn load_catalog(source: &CatalogSource) -> Result<Catalog, DomainError> {
    info!(source = %source, "Loading catalog");

    let text = match source {
        CatalogSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::catalog(format!("Failed to read {}: {}", path.display(), e))
        })?,
        CatalogSource::Url(url) => fetch(url).await?,
    };

    let catalog = parse_catalog(&text)?;

    if catalog.is_empty() {
        return Err(DomainError::catalog(format!(
            "Catalog from {} has no usable rows",
            source
        )));
    }

    Ok(catalog)
}

async fn fetch(url: &str) -> Result<String, DomainError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| DomainError::catalog(format!("Failed to build HTTP client: {}", e)))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| DomainError::catalog(format!("Request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(DomainError::catalog(format!(
            "Fetching {} returned HTTP {}",
            url,
            response.status()
        )));
    }

    response
        .text()
        .await
        .map_err(|e| DomainError::catalog(format!("Failed to read response body: {}", e)))
}

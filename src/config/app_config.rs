use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{
    CalibrationPolicy, ComparableFinder, DomainError, ReferencePrice, RetrievalMode,
};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub calibration: CalibrationPolicy,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub presentation: PresentationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Prometheus metrics configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub path: String,
}

/// Locations of the startup artifacts
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    /// File path or `http(s)://` URL of the listing CSV
    pub catalog: String,
    pub cpu_encoder: PathBuf,
    pub gpu_encoder: PathBuf,
    /// Built-in processor table when unset
    #[serde(default)]
    pub cpu_normalization: Option<PathBuf>,
    /// GPU choices pass through unchanged when unset
    #[serde(default)]
    pub gpu_normalization: Option<PathBuf>,
    pub model: PathBuf,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStrategy {
    #[default]
    Nearest,
    PriceWindow,
}

/// Comparable-item retrieval settings
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub strategy: RetrievalStrategy,
    /// Half-width of the price window for `price_window`
    #[serde(default = "default_window")]
    pub window: f64,
    #[serde(default)]
    pub reference: ReferencePrice,
}

/// Display settings passed through to clients
#[derive(Debug, Clone, Deserialize)]
pub struct PresentationConfig {
    pub currency: String,
    /// `{company}` is replaced with the listing's company
    pub shop_url_template: String,
}

fn default_limit() -> usize {
    4
}

fn default_window() -> f64 {
    10000.0
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            catalog: "assets/laptop_data.csv".to_string(),
            cpu_encoder: PathBuf::from("assets/cpu_encoder.json"),
            gpu_encoder: PathBuf::from("assets/gpu_encoder.json"),
            cpu_normalization: Some(PathBuf::from("assets/cpu_normalization.toml")),
            gpu_normalization: None,
            model: PathBuf::from("assets/model.json"),
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            strategy: RetrievalStrategy::default(),
            window: default_window(),
            reference: ReferencePrice::default(),
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            shop_url_template: "https://www.amazon.in/s?k={company}+laptop".to_string(),
        }
    }
}

impl RetrievalConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.limit == 0 {
            return Err(DomainError::configuration(
                "retrieval.limit must be greater than 0",
            ));
        }

        if !self.window.is_finite() || self.window < 0.0 {
            return Err(DomainError::configuration(format!(
                "retrieval.window must be a non-negative number, got {}",
                self.window
            )));
        }

        Ok(())
    }

    pub fn finder(&self) -> Result<ComparableFinder, DomainError> {
        self.validate()?;

        let mode = match self.strategy {
            RetrievalStrategy::Nearest => RetrievalMode::Nearest,
            RetrievalStrategy::PriceWindow => RetrievalMode::PriceWindow {
                window: self.window,
            },
        };

        Ok(ComparableFinder::new(mode, self.limit))
    }
}

impl PresentationConfig {
    /// Search link for a company; each word is percent-encoded, words joined by `+`
    pub fn shop_url(&self, company: &str) -> String {
        let query = company
            .split_whitespace()
            .map(urlencoding::encode)
            .collect::<Vec<_>>()
            .join("+");
        self.shop_url_template.replace("{company}", &query)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Layer `default` and `local` files from `dir`, then `APP__*` env vars.
    /// Missing files are skipped; a file that fails to parse is an error.
    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let default = dir.join("default");
        let local = dir.join("local");

        let config = config::Config::builder()
            .add_source(config::File::with_name(&default.to_string_lossy()).required(false))
            .add_source(config::File::with_name(&local.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.metrics.enabled);
        assert_eq!(config.retrieval.limit, 4);
        assert_eq!(config.retrieval.reference, ReferencePrice::Calibrated);
        assert_eq!(config.calibration.inflation_multiplier, 1.02);
        assert_eq!(config.artifacts.catalog, "assets/laptop_data.csv");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [retrieval]
            strategy = "price_window"
            window = 7500.0
            reference = "raw"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.retrieval.limit, 4);
        assert_eq!(config.retrieval.reference, ReferencePrice::Raw);
        assert_eq!(
            config.retrieval.finder().unwrap().mode(),
            RetrievalMode::PriceWindow { window: 7500.0 }
        );
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_shop_url() {
        let presentation = PresentationConfig::default();
        assert_eq!(
            presentation.shop_url("Dell"),
            "https://www.amazon.in/s?k=Dell+laptop"
        );
        assert_eq!(
            presentation.shop_url("Microsoft Surface"),
            "https://www.amazon.in/s?k=Microsoft+Surface+laptop"
        );
    }

    #[test]
    fn test_shop_url_encodes_reserved_characters() {
        let presentation = PresentationConfig::default();
        assert_eq!(
            presentation.shop_url("  A&B   #1? "),
            "https://www.amazon.in/s?k=A%26B+%231%3F+laptop"
        );
    }

    #[test]
    fn test_retrieval_rejects_zero_limit() {
        let retrieval = RetrievalConfig {
            limit: 0,
            ..RetrievalConfig::default()
        };

        assert!(matches!(
            retrieval.finder(),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_retrieval_rejects_bad_window() {
        for window in [-1.0, f64::NAN, f64::INFINITY] {
            let retrieval = RetrievalConfig {
                window,
                ..RetrievalConfig::default()
            };
            assert!(retrieval.validate().is_err(), "window {window} accepted");
        }

        assert!(RetrievalConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_from_reads_local_overrides() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("local.toml"),
            "[retrieval]\nlimit = 2\n",
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.retrieval.limit, 2);
        assert_eq!(config.calibration.inflation_multiplier, 1.02);
    }

    #[test]
    fn test_load_from_rejects_malformed_file() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("local.toml"),
            "[calibration]\ninflation_multiplier = \"x\"\n",
        )
        .unwrap();

        assert!(AppConfig::load_from(dir.path()).is_err());
    }

    #[test]
    fn test_load_from_rejects_unparsable_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("default.toml"), "[server\nport = 80\n").unwrap();

        assert!(AppConfig::load_from(dir.path()).is_err());
    }
}

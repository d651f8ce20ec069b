//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::MetricsConfig;

static NUMERIC_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\d+(/|$)").unwrap());

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Initialize Prometheus metrics
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("laptop_price_estimator_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request metric
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Record one pipeline run
pub fn record_prediction(model: &str, success: bool, price: Option<u64>, duration: Duration) {
    let labels = [
        ("model", model.to_string()),
        ("status", if success { "success" } else { "error" }.to_string()),
    ];

    counter!("price_predictions_total", &labels).increment(1);
    histogram!("price_prediction_duration_seconds", &labels).record(duration.as_secs_f64());

    if let Some(price) = price {
        histogram!("price_prediction_value", "model" => model.to_string()).record(price as f64);
    }
}

/// Record a choice that had to fall back to a default label
pub fn record_label_fallback(encoder: &str) {
    counter!("label_fallbacks_total", "encoder" => encoder.to_string()).increment(1);
}

const MAX_PATH_CHARS: usize = 50;

/// Collapse numeric path segments and bound label length
fn sanitize_path(path: &str) -> String {
    let path = NUMERIC_SEGMENT.replace_all(path, "/{id}$1");

    // Cut on a char boundary; raw fallback paths may carry multi-byte text
    match path.char_indices().nth(MAX_PATH_CHARS) {
        Some((end, _)) => path[..end].to_string(),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path_numeric_id() {
        assert_eq!(sanitize_path("/v1/listings/123/similar"), "/v1/listings/{id}/similar");
    }

    #[test]
    fn test_sanitize_path_no_id() {
        assert_eq!(sanitize_path("/v1/predict"), "/v1/predict");
    }

    #[test]
    fn test_sanitize_path_truncates_long_paths() {
        let path = "/very/long/path/that/exceeds/the/maximum/allowed/length/for/metrics";
        assert!(sanitize_path(path).chars().count() <= 50);
    }

    #[test]
    fn test_sanitize_path_truncates_multibyte_on_char_boundary() {
        let path = format!("/{}é/tail/segment", "a".repeat(48));
        let sanitized = sanitize_path(&path);

        assert_eq!(sanitized.chars().count(), 50);
        assert!(sanitized.ends_with('é'));
    }

    #[test]
    fn test_sanitize_path_keeps_short_multibyte_path() {
        assert_eq!(sanitize_path("/v1/café"), "/v1/café");
    }

    #[test]
    fn test_recording_without_recorder_is_a_no_op() {
        record_prediction("linear", true, Some(51000), Duration::from_millis(2));
        record_label_fallback("cpu");
        record_http_request("POST", "/v1/predict", 200, Duration::from_millis(3));
    }
}

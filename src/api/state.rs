//! Application state shared by all handlers

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::PresentationConfig;
use crate::infrastructure::services::PredictionService;

/// Application state; cloning is cheap
#[derive(Clone)]
pub struct AppState {
    pub prediction_service: Arc<PredictionService>,
    pub presentation: Arc<PresentationConfig>,
    /// When the artifacts behind `prediction_service` were loaded
    pub loaded_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(prediction_service: Arc<PredictionService>, presentation: PresentationConfig) -> Self {
        Self {
            prediction_service,
            presentation: Arc::new(presentation),
            loaded_at: Utc::now(),
        }
    }
}

//! Option listing endpoint

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{Json, OptionsResponse};

/// GET /v1/options
pub async fn list_options(State(state): State<AppState>) -> Json<OptionsResponse> {
    Json(OptionsResponse::from_domain(
        state.prediction_service.options(),
        &state.presentation,
    ))
}

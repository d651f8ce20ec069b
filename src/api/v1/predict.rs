//! Price prediction endpoint

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, PredictPriceRequest, PredictPriceResponse};
use crate::domain::PredictionRequest;

/// POST /v1/predict
pub async fn predict_price(
    State(state): State<AppState>,
    Json(body): Json<PredictPriceRequest>,
) -> Result<Json<PredictPriceResponse>, ApiError> {
    debug!(ram_gb = body.ram_gb, cpu = %body.cpu, gpu = %body.gpu, "Predicting price");

    let request = PredictionRequest::from(body);
    let prediction = state.prediction_service.predict(&request)?;

    Ok(Json(PredictPriceResponse::from_domain(
        prediction,
        &state.presentation,
    )))
}

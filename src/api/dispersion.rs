use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::AppError;
use crate::models::dispersion::{DispersionMetadata, DispersionWindowRow};
use crate::models::query::{DispersionParams, DispersionRequest};
use crate::services::dispersion::calculate_dispersion;

/// Response of `GET /api/dispersion`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispersionResponse {
    pub success: bool,
    pub data: Vec<DispersionWindowRow>,
    pub metadata: DispersionMetadata,
}

/// Axum handler for `GET /api/dispersion`.
pub async fn dispersion_handler(
    State(state): State<AppState>,
    Query(params): Query<DispersionParams>,
) -> Result<Json<DispersionResponse>, AppError> {
    let request = DispersionRequest::from_params(params)?;
    let result = calculate_dispersion(state.text_api.as_ref(), &request).await;

    Ok(Json(DispersionResponse {
        success: true,
        data: result.dispersion,
        metadata: result.metadata,
    }))
}

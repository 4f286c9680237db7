use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::AppError;
use crate::models::document::DocumentMetadata;
use crate::services::catalog;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub success: bool,
    pub data: DocumentMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionParams {
    pub query: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub success: bool,
    pub data: Vec<String>,
}

/// Axum handler for `GET /api/document/{urn}`.
pub async fn document_handler(
    State(state): State<AppState>,
    Path(urn): Path<String>,
) -> Result<Json<DocumentResponse>, AppError> {
    let data = catalog::document_metadata(state.catalog_api.as_ref(), &urn).await?;

    Ok(Json(DocumentResponse {
        success: true,
        data,
    }))
}

/// Axum handler for `GET /api/suggestions`.
pub async fn suggestions_handler(
    State(state): State<AppState>,
    Query(params): Query<SuggestionParams>,
) -> Json<SuggestionsResponse> {
    let query = params.query.unwrap_or_default();
    let data = catalog::suggestions(state.catalog_api.as_ref(), &query).await;

    Json(SuggestionsResponse {
        success: true,
        data,
    })
}

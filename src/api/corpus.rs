use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::AppError;
use crate::models::document::Document;
use crate::models::query::{CorpusParams, SearchQuery};
use crate::services::corpus::search_corpus;

/// Response of `GET /api/corpus`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusResponse {
    pub success: bool,
    pub data: Vec<Document>,
    pub count: usize,
}

/// Axum handler for `GET /api/corpus`.
///
/// Validation runs before any upstream call; upstream failures are masked by
/// generated documents.
pub async fn corpus_handler(
    State(state): State<AppState>,
    Query(params): Query<CorpusParams>,
) -> Result<Json<CorpusResponse>, AppError> {
    let query = SearchQuery::from_params(params)?;
    let data = search_corpus(state.text_api.as_ref(), &query).await;

    Ok(Json(CorpusResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

use crate::error::AppError;
use crate::models::document::DocumentMetadata;
use crate::upstream::client::{CatalogApi, SUGGESTION_SIZE};
use crate::upstream::normalize::{extract_metadata, extract_suggestions};

/// Queries shorter than this are answered without asking the catalog.
pub const MIN_SUGGESTION_QUERY_CHARS: usize = 2;

/// Fetch catalog metadata for one item. There is no fallback on this path.
pub async fn document_metadata(
    api: &dyn CatalogApi,
    urn: &str,
) -> Result<DocumentMetadata, AppError> {
    if urn.trim().is_empty() {
        return Err(AppError::BadRequest("URN parameter is required".into()));
    }

    let item = api.item(urn).await.map_err(|e| {
        tracing::error!(urn, error = %e, "Failed to fetch document metadata");
        AppError::upstream("Failed to fetch document metadata", e)
    })?;

    Ok(extract_metadata(urn, &item))
}

/// Search suggestions for a partial query; empty when the query is too short
/// or the catalog fails.
pub async fn suggestions(api: &dyn CatalogApi, query: &str) -> Vec<String> {
    if query.chars().count() < MIN_SUGGESTION_QUERY_CHARS {
        return Vec::new();
    }

    match api.suggest(query, SUGGESTION_SIZE).await {
        Ok(payload) => extract_suggestions(&payload),
        Err(e) => {
            tracing::warn!(query, error = %e, "Failed to fetch suggestions");
            Vec::new()
        }
    }
}

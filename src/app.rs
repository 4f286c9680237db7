use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::error::UpstreamError;
use crate::settings::UpstreamSettings;
use crate::upstream::client::{CatalogApi, DhlabClient, TextAnalysisApi};

/// Shared state handed to every handler. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub text_api: Arc<dyn TextAnalysisApi>,
    pub catalog_api: Arc<dyn CatalogApi>,
}

impl AppState {
    /// Wire both upstream seams to one [`DhlabClient`].
    pub fn from_upstream(settings: &UpstreamSettings) -> Result<Self, UpstreamError> {
        let client = Arc::new(DhlabClient::new(settings)?);

        Ok(Self {
            text_api: client.clone(),
            catalog_api: client,
        })
    }
}

/// The JSON API, relative to its mount point.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/corpus", get(api::corpus::corpus_handler))
        .route("/dispersion", get(api::dispersion::dispersion_handler))
        .route("/document/{urn}", get(api::document::document_handler))
        .route("/suggestions", get(api::document::suggestions_handler))
        .route("/health", get(api::health::health_handler))
}

/// Full application router: the API under `/api`, plus the built UI when a
/// static directory is configured.
pub fn build_router(state: AppState, static_dir: Option<&str>) -> Router {
    let mut router = Router::new().nest("/api", api_router());

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

use crate::models::dispersion::{DispersionMetadata, DispersionResult, DispersionWindowRow};
use crate::models::query::DispersionRequest;
use crate::services::fallback::generate_dispersion;
use crate::services::outcome::UpstreamOutcome;
use crate::services::transform::transform_dispersion;
use crate::upstream::client::{DispersionBody, TextAnalysisApi};

/// Ask DHLAB for the dispersion of `request.words` and shape it into rows.
pub async fn fetch_dispersion(
    api: &dyn TextAnalysisApi,
    request: &DispersionRequest,
) -> UpstreamOutcome<Vec<DispersionWindowRow>> {
    let body = DispersionBody::from(request);

    match api.dispersion(&body).await {
        Ok(payload) => transform_dispersion(&payload, &request.words, request.step).into(),
        Err(e) => UpstreamOutcome::Unavailable(e.to_string()),
    }
}

/// Compute the dispersion for one document, substituting generated rows when
/// DHLAB fails.
pub async fn calculate_dispersion(
    api: &dyn TextAnalysisApi,
    request: &DispersionRequest,
) -> DispersionResult {
    let dispersion = fetch_dispersion(api, request).await.resolve("dispersion", || {
        generate_dispersion(&mut rand::rng(), &request.words, request.window, request.step)
    });

    DispersionResult {
        metadata: DispersionMetadata {
            urn: request.urn.clone(),
            words: request.words.clone(),
            window: request.window,
            step: request.step,
            total_windows: dispersion.len(),
        },
        dispersion,
    }
}

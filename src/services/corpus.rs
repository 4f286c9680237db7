use crate::models::document::Document;
use crate::models::query::SearchQuery;
use crate::services::fallback::generate_corpus;
use crate::services::outcome::UpstreamOutcome;
use crate::upstream::client::{CorpusRequest, TextAnalysisApi};
use crate::upstream::normalize::normalize_corpus;

/// Query the DHLAB corpus endpoint and normalize the records.
pub async fn fetch_corpus(
    api: &dyn TextAnalysisApi,
    query: &SearchQuery,
) -> UpstreamOutcome<Vec<Document>> {
    let request = CorpusRequest::from(query);

    match api.corpus(&request).await {
        Ok(payload) => normalize_corpus(&payload).into(),
        Err(e) => UpstreamOutcome::Unavailable(e.to_string()),
    }
}

/// Search the corpus, substituting generated documents when DHLAB fails.
pub async fn search_corpus(api: &dyn TextAnalysisApi, query: &SearchQuery) -> Vec<Document> {
    fetch_corpus(api, query)
        .await
        .resolve("corpus", || generate_corpus(&mut rand::rng(), query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamError;
    use crate::services::fallback::{MAX_MOCK_DOCUMENTS, MIN_MOCK_DOCUMENTS};
    use crate::upstream::client::MockTextAnalysisApi;
    use serde_json::json;

    fn query() -> SearchQuery {
        SearchQuery {
            freetext: Some("fjord".into()),
            title: None,
            from_year: 1880,
            to_year: 1890,
        }
    }

    #[tokio::test]
    async fn test_search_corpus_forwards_filters() {
        let mut api = MockTextAnalysisApi::new();
        api.expect_corpus()
            .withf(|req| {
                req.freetext.as_deref() == Some("fjord")
                    && req.title.is_none()
                    && req.from_year == 1880
                    && req.to_year == 1890
                    && req.limit == 50
            })
            .times(1)
            .returning(|_| Ok(json!([{ "urn": "URN:1", "title": "Fjorden", "year": 1885 }])));

        let docs = search_corpus(&api, &query()).await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "Fjorden");
        assert_eq!(docs[0].id, "URN:1");
    }

    #[tokio::test]
    async fn test_search_corpus_falls_back_on_transport_error() {
        let mut api = MockTextAnalysisApi::new();
        api.expect_corpus()
            .times(1)
            .returning(|_| Err(UpstreamError::Status(503)));

        let docs = search_corpus(&api, &query()).await;
        assert!((MIN_MOCK_DOCUMENTS..=MAX_MOCK_DOCUMENTS).contains(&docs.len()));
        assert!(docs.iter().all(|d| d.title.ends_with("(fjord)")));
        assert!(docs
            .iter()
            .all(|d| d.year.is_some_and(|y| (1880..=1890).contains(&y))));
    }

    #[tokio::test]
    async fn test_fetch_corpus_reports_malformed_payload() {
        let mut api = MockTextAnalysisApi::new();
        api.expect_corpus()
            .returning(|_| Ok(json!({ "detail": "bad request" })));

        let outcome = fetch_corpus(&api, &query()).await;
        assert!(!outcome.is_success());
    }

    #[tokio::test]
    async fn test_null_body_is_an_empty_result() {
        let mut api = MockTextAnalysisApi::new();
        api.expect_corpus().returning(|_| Ok(serde_json::Value::Null));

        let docs = search_corpus(&api, &query()).await;
        assert!(docs.is_empty());
    }
}

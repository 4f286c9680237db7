use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Serialize;
use serde_json::Value;

use crate::error::UpstreamError;
use crate::models::query::{DispersionRequest, SearchQuery};
use crate::settings::UpstreamSettings;

/// Maximum number of documents requested from the corpus endpoint.
pub const CORPUS_LIMIT: u32 = 50;

/// Number of suggestions requested from the catalog.
pub const SUGGESTION_SIZE: usize = 10;

/// Body of `POST {dhlab}/corpus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusRequest {
    pub from_year: i64,
    pub to_year: i64,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freetext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl From<&SearchQuery> for CorpusRequest {
    fn from(query: &SearchQuery) -> Self {
        Self {
            from_year: query.from_year,
            to_year: query.to_year,
            limit: CORPUS_LIMIT,
            freetext: query.freetext.clone(),
            title: query.title.clone(),
        }
    }
}

/// Body of `POST {dhlab}/dispersion`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispersionBody {
    pub urn: String,
    pub words: Vec<String>,
    pub window: u32,
    pub pr: u32,
}

impl From<&DispersionRequest> for DispersionBody {
    fn from(request: &DispersionRequest) -> Self {
        Self {
            urn: request.urn.clone(),
            words: request.words.clone(),
            window: request.window,
            pr: request.step,
        }
    }
}

/// The DHLAB text-analysis endpoints, abstracted so tests can substitute
/// a fake upstream.
///
/// Implementations return the raw JSON body; shaping happens in the
/// service layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextAnalysisApi: Send + Sync {
    /// Search the corpus. Returns the raw list of result records.
    async fn corpus(&self, request: &CorpusRequest) -> Result<Value, UpstreamError>;

    /// Compute per-window word frequencies for one document.
    async fn dispersion(&self, request: &DispersionBody) -> Result<Value, UpstreamError>;
}

/// The catalog endpoints used for item metadata and search suggestions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch the catalog record for an item.
    async fn item(&self, urn: &str) -> Result<Value, UpstreamError>;

    /// Fetch search suggestions for a partial query.
    async fn suggest(&self, query: &str, size: usize) -> Result<Value, UpstreamError>;
}

/// HTTP client for the National Library APIs, configured explicitly from
/// [`UpstreamSettings`].
#[derive(Debug, Clone)]
pub struct DhlabClient {
    http: reqwest::Client,
    dhlab_base_url: String,
    catalog_base_url: String,
}

impl DhlabClient {
    pub fn new(settings: &UpstreamSettings) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            dhlab_base_url: settings.dhlab_base_url.trim_end_matches('/').to_string(),
            catalog_base_url: settings.catalog_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `{catalog}/items/{urn}`. The URN goes in as one path segment, so `:`
    /// stays literal while `/`, `%`, `?` and spaces are escaped.
    fn item_url(&self, urn: &str) -> Result<reqwest::Url, UpstreamError> {
        let mut url = reqwest::Url::parse(&self.catalog_base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{}: {e}", self.catalog_base_url)))?;

        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(self.catalog_base_url.clone()))?
            .pop_if_empty()
            .extend(["items", urn]);

        Ok(url)
    }
}

#[async_trait]
impl TextAnalysisApi for DhlabClient {
    async fn corpus(&self, request: &CorpusRequest) -> Result<Value, UpstreamError> {
        let url = format!("{}/corpus", self.dhlab_base_url);
        tracing::debug!(%url, ?request, "Requesting corpus from DHLAB");

        let response = self.http.post(&url).json(request).send().await?;
        read_json(response).await
    }

    async fn dispersion(&self, request: &DispersionBody) -> Result<Value, UpstreamError> {
        let url = format!("{}/dispersion", self.dhlab_base_url);
        tracing::debug!(%url, ?request, "Requesting dispersion from DHLAB");

        let response = self.http.post(&url).json(request).send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl CatalogApi for DhlabClient {
    async fn item(&self, urn: &str) -> Result<Value, UpstreamError> {
        let url = self.item_url(urn)?;
        tracing::debug!(%url, "Requesting item metadata from catalog");

        let response = self.http.get(url).send().await?;
        read_json(response).await
    }

    async fn suggest(&self, query: &str, size: usize) -> Result<Value, UpstreamError> {
        let url = format!("{}/search/suggest", self.catalog_base_url);
        tracing::debug!(%url, query, "Requesting suggestions from catalog");

        let response = self
            .http
            .get(&url)
            .query(&[("q", query.to_string()), ("size", size.to_string())])
            .send()
            .await?;
        read_json(response).await
    }
}

/// Check the status and decode the body. An empty body decodes to `null`.
async fn read_json(response: reqwest::Response) -> Result<Value, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::Status(status.as_u16()));
    }

    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_slice(&bytes)?)
}

//! Typed client for this service's own `/api`, for Rust consumers and tooling.
//!
//! Errors are translated into the same user-facing (Norwegian) messages the
//! browser UI shows.

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::corpus::CorpusResponse;
use crate::api::dispersion::DispersionResponse;
use crate::api::document::{DocumentResponse, SuggestionsResponse};
use crate::api::health::HealthResponse;

pub const RATE_LIMITED_MESSAGE: &str = "For mange forespørsler. Prøv igjen senere.";
pub const SERVER_ERROR_MESSAGE: &str = "Serverfeil. Prøv igjen senere.";
pub const NETWORK_ERROR_MESSAGE: &str = "Noe gikk galt. Sjekk nettverkstilkoblingen og prøv igjen.";

const CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with an error status. `message` is ready to show.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never got a usable answer.
    #[error("Noe gikk galt. Sjekk nettverkstilkoblingen og prøv igjen.")]
    Network(#[source] reqwest::Error),
}

/// Parameters of a corpus search; `None` fields are left out of the query.
#[derive(Debug, Clone, Default)]
pub struct CorpusSearch {
    pub freetext: Option<String>,
    pub title: Option<String>,
    pub from_year: Option<i64>,
    pub to_year: Option<i64>,
}

pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    /// `base_url` is the API root, e.g. `http://localhost:3001/api`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(CLIENT_TIMEOUT)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn search_corpus(&self, search: &CorpusSearch) -> Result<CorpusResponse, ClientError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(freetext) = search.freetext.as_ref().filter(|f| !f.is_empty()) {
            params.push(("freetext", freetext.clone()));
        }
        if let Some(title) = search.title.as_ref().filter(|t| !t.is_empty()) {
            params.push(("title", title.clone()));
        }
        if let Some(from_year) = search.from_year {
            params.push(("from_year", from_year.to_string()));
        }
        if let Some(to_year) = search.to_year {
            params.push(("to_year", to_year.to_string()));
        }

        self.get("/corpus", &params).await
    }

    pub async fn dispersion(
        &self,
        urn: &str,
        words: &[String],
        window: u32,
        step: u32,
    ) -> Result<DispersionResponse, ClientError> {
        let params = [
            ("urn", urn.to_string()),
            ("words", words.join(",")),
            ("window", window.to_string()),
            ("pr", step.to_string()),
        ];

        self.get("/dispersion", &params).await
    }

    pub async fn document_metadata(&self, urn: &str) -> Result<DocumentResponse, ClientError> {
        let path = format!("/document/{}", urlencoding::encode(urn));
        self.get(&path, &[]).await
    }

    pub async fn suggestions(&self, query: &str) -> Result<SuggestionsResponse, ClientError> {
        self.get("/suggestions", &[("query", query.to_string())])
            .await
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get("/health", &[]).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "Calling dispersion API");

        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(ClientError::Network)?;

        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(ClientError::Network);
        }

        let body = response.json::<serde_json::Value>().await.ok();
        Err(ClientError::Api {
            status: status.as_u16(),
            message: user_message(status.as_u16(), body.as_ref()),
        })
    }
}

/// Pick the message shown to the user for an error response.
pub fn user_message(status: u16, body: Option<&serde_json::Value>) -> String {
    if status == 429 {
        return RATE_LIMITED_MESSAGE.to_string();
    }
    if status >= 500 {
        return SERVER_ERROR_MESSAGE.to_string();
    }

    body.and_then(|b| {
        b.get("message")
            .or_else(|| b.get("error"))
            .and_then(|m| m.as_str())
    })
    .map(str::to_string)
    .unwrap_or_else(|| NETWORK_ERROR_MESSAGE.to_string())
}

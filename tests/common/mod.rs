#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use dhlab_dispersion::app::{build_router, AppState};
use dhlab_dispersion::settings::UpstreamSettings;

/// A canned upstream answer.
#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: StatusCode,
    pub body: Value,
}

impl StubReply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: serde_json::json!({ "detail": "stub failure" }),
        }
    }
}

/// Canned answers for each upstream endpoint.
#[derive(Debug, Clone)]
pub struct StubResponses {
    pub corpus: StubReply,
    pub dispersion: StubReply,
    pub item: StubReply,
    pub suggest: StubReply,
}

impl Default for StubResponses {
    fn default() -> Self {
        Self {
            corpus: StubReply::ok(serde_json::json!([])),
            dispersion: StubReply::ok(serde_json::json!([])),
            item: StubReply::ok(serde_json::json!({})),
            suggest: StubReply::ok(serde_json::json!({ "suggestions": [] })),
        }
    }
}

/// One request received by the stub upstream.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub endpoint: &'static str,
    pub payload: Value,
}

#[derive(Clone)]
struct StubState {
    responses: Arc<StubResponses>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl StubState {
    fn record(&self, endpoint: &'static str, payload: Value) {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall { endpoint, payload });
    }
}

/// DHLAB and catalog stand-in listening on an ephemeral local port.
///
/// DHLAB routes live under `/dhlab`, catalog routes under `/catalog`.
pub struct StubUpstream {
    pub base_url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    _server: tokio::task::JoinHandle<()>,
}

impl StubUpstream {
    pub async fn start(responses: StubResponses) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            responses: Arc::new(responses),
            calls: calls.clone(),
        };

        let router = Router::new()
            .route("/dhlab/corpus", post(stub_corpus))
            .route("/dhlab/dispersion", post(stub_dispersion))
            .route("/catalog/items/{urn}", get(stub_item))
            .route("/catalog/search/suggest", get(stub_suggest))
            .with_state(state);

        let (base_url, server) = serve(router).await;
        Self {
            base_url,
            calls,
            _server: server,
        }
    }

    pub fn settings(&self) -> UpstreamSettings {
        UpstreamSettings::new(
            format!("{}/dhlab", self.base_url),
            format!("{}/catalog", self.base_url),
        )
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

async fn stub_corpus(
    State(state): State<StubState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.record("corpus", body);
    reply(&state.responses.corpus)
}

async fn stub_dispersion(
    State(state): State<StubState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.record("dispersion", body);
    reply(&state.responses.dispersion)
}

async fn stub_item(
    State(state): State<StubState>,
    Path(urn): Path<String>,
) -> (StatusCode, Json<Value>) {
    state.record("item", Value::String(urn));
    reply(&state.responses.item)
}

async fn stub_suggest(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.record("suggest", serde_json::to_value(params).unwrap());
    reply(&state.responses.suggest)
}

fn reply(stub: &StubReply) -> (StatusCode, Json<Value>) {
    (stub.status, Json(stub.body.clone()))
}

/// Serve `router` on an ephemeral port; returns its base URL.
pub async fn serve(router: Router) -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server failed");
    });

    (format!("http://{}", addr), handle)
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind placeholder listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    format!("http://{}", addr)
}

/// The proxy wired to a stub upstream.
pub struct TestEnv {
    pub upstream: StubUpstream,
    pub router: Router,
}

impl TestEnv {
    pub async fn start(responses: StubResponses) -> Self {
        let upstream = StubUpstream::start(responses).await;
        let state =
            AppState::from_upstream(&upstream.settings()).expect("Failed to build upstream client");
        let router = build_router(state, None);

        Self { upstream, router }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .build(self.router.clone())
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .build(self.router.clone())
    }
}

/// Build a `TestServer` whose upstream is unreachable (for fallback tests).
pub async fn server_without_upstream() -> axum_test::TestServer {
    let base = unreachable_base_url().await;
    let settings = UpstreamSettings::new(format!("{base}/dhlab"), format!("{base}/catalog"));
    let state = AppState::from_upstream(&settings).expect("Failed to build upstream client");

    axum_test::TestServer::builder()
        .build(build_router(state, None))
}

pub fn count_calls(upstream: &StubUpstream, endpoint: &str) -> usize {
    upstream
        .calls()
        .iter()
        .filter(|c| c.endpoint == endpoint)
        .count()
}

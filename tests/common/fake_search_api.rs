//! Fake vacancy search API for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `GET /vacancies?text=...`:
//! - a registered query returns its canned `{"items": [...]}` body
//! - an unknown query returns `{"items": []}`
//! - no `text` parameter (the probe) returns an empty body with the
//!   configured status
//!
//! Every request's `text` parameter is recorded so tests can assert the
//! query reached the server unmodified.
//!
//! # Example
//!
//! ```rust,no_run
//! # tokio_test::block_on(async {
//! use common::fake_search_api::FakeSearchApi;
//!
//! let api = FakeSearchApi::start().await.unwrap();
//! api.respond("кассир", vec![vacancy("Кассир", "Магнит")]).await;
//!
//! // Point the client at api.url()
//! let endpoint = EndpointConfig::with_url(api.url());
//! # });
//! ```

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// State shared between the router and test code.
struct ApiState {
    /// Canned bodies keyed by the exact `text` parameter.
    bodies: HashMap<String, String>,
    /// Status for every response; non-200 bodies are a short error string.
    status: StatusCode,
    /// `text` parameter of each request, `None` for the probe.
    requests: Vec<Option<String>>,
}

impl Default for ApiState {
    fn default() -> Self {
        Self { bodies: HashMap::new(), status: StatusCode::OK, requests: Vec::new() }
    }
}

/// Handle to the running fake search API server.
pub struct FakeSearchApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeSearchApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/vacancies", get(search))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the task a moment to register.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        Ok(Self { addr, state })
    }

    /// Search endpoint URL (e.g. `http://127.0.0.1:PORT/vacancies`).
    pub fn url(&self) -> String {
        format!("http://{}/vacancies", self.addr)
    }

    /// Serve `items` for an exact query string.
    pub async fn respond(&self, query: &str, items: Vec<serde_json::Value>) {
        let body = serde_json::json!({ "found": items.len(), "items": items });
        self.respond_raw(query, &body.to_string()).await;
    }

    /// Serve an arbitrary body for an exact query string.
    pub async fn respond_raw(&self, query: &str, body: &str) {
        let mut state = self.state.lock().await;
        state.bodies.insert(query.to_string(), body.to_string());
    }

    /// Answer every subsequent request with `status`.
    pub async fn set_status(&self, status: StatusCode) {
        self.state.lock().await.status = status;
    }

    /// Recorded `text` parameters, in arrival order.
    pub async fn requests(&self) -> Vec<Option<String>> {
        self.state.lock().await.requests.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn search(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<Mutex<ApiState>>>,
) -> Response {
    let mut state = state.lock().await;
    let text = params.get("text").cloned();
    state.requests.push(text.clone());

    if state.status != StatusCode::OK {
        return (state.status, "upstream unavailable").into_response();
    }

    let Some(text) = text else {
        return StatusCode::OK.into_response();
    };

    let body = state
        .bodies
        .get(&text)
        .cloned()
        .unwrap_or_else(|| r#"{"found":0,"items":[]}"#.to_string());

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

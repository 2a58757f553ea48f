// ABOUTME: Local HTTP server standing in for third-party APIs in client tests
// ABOUTME: Serves a fixed status and JSON body on an ephemeral port and records requests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{StatusCode, Uri},
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;

/// One request received by the stub
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request path, percent-encoded as received
    pub path: String,
    /// Decoded query parameters
    pub query: HashMap<String, String>,
    /// JSON body, when one was sent
    pub body: Option<Value>,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: Value,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Running stub server
pub struct StubUpstream {
    /// `http://127.0.0.1:<port>`
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubUpstream {
    /// Start a stub answering every request with `status` and `body`
    pub async fn spawn(status: StatusCode, body: Value) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status,
            body,
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(handle_any).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{address}"),
            requests,
        }
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The only request received; panics unless exactly one arrived
    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one upstream request");
        requests.into_iter().next().unwrap()
    }
}

async fn handle_any(
    State(state): State<StubState>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_owned(),
        query,
        body: serde_json::from_slice(&body).ok(),
    });
    (state.status, Json(state.body.clone()))
}

//! In-process stand-in for a Discord webhook, used by tests

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

struct MockState {
    /// Status to answer the n-th request with; 204 once exhausted
    statuses: Vec<u16>,
    received: Mutex<Vec<Value>>,
}

pub(crate) struct MockDiscord {
    pub url: String,
    state: Arc<MockState>,
}

impl MockDiscord {
    pub async fn start(statuses: Vec<u16>) -> Self {
        let state = Arc::new(MockState {
            statuses,
            received: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .route("/api/webhooks/1/token", post(receive))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}/api/webhooks/1/token", addr),
            state,
        }
    }

    /// Bodies received so far, in arrival order
    pub async fn received(&self) -> Vec<Value> {
        self.state.received.lock().await.clone()
    }

    pub async fn batch_sizes(&self) -> Vec<usize> {
        self.received()
            .await
            .iter()
            .map(|body| body["embeds"].as_array().map_or(0, Vec::len))
            .collect()
    }
}

async fn receive(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> StatusCode {
    let mut received = state.received.lock().await;
    let status = state
        .statuses
        .get(received.len())
        .copied()
        .unwrap_or(204);
    received.push(body);

    StatusCode::from_u16(status).unwrap_or(StatusCode::NO_CONTENT)
}

/// A URL nothing is listening on
pub(crate) async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api/webhooks/1/token", addr)
}

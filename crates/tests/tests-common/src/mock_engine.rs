//! An in-process stand-in for the engine's SQL endpoint.
//!
//! It answers every `POST /druid/v2/sql` with one canned response and records what it was
//! sent, so tests can check both sides of the exchange without a running cluster.

use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use tokio::sync::oneshot;

pub use axum::http::StatusCode;

pub const QUERY_PATH: &str = "/druid/v2/sql";

/// What the mock engine answers with.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: String,
}

impl CannedResponse {
    /// A `200 OK` typed-array body.
    pub fn typed_array(payload: &serde_json::Value) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "application/json".to_string(),
            body: payload.to_string(),
        }
    }

    /// A `200 OK` CSV body.
    pub fn csv(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "text/csv".to_string(),
            body: body.to_string(),
        }
    }

    /// A failure with a plain-text explanation.
    pub fn error(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain".to_string(),
            body: body.to_string(),
        }
    }
}

/// One request the mock engine received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub user_agent: Option<String>,
    pub content_type: Option<String>,
    /// The body parsed as JSON, or `Null` if it was not JSON.
    pub body: serde_json::Value,
}

#[derive(Debug)]
struct Shared {
    response: Mutex<CannedResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// A running mock engine. Shut down when dropped.
#[derive(Debug)]
pub struct MockEngine {
    address: SocketAddr,
    shared: Arc<Shared>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockEngine {
    /// Bind to an ephemeral local port and start serving `response`.
    pub async fn start(response: CannedResponse) -> anyhow::Result<MockEngine> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        listener.set_nonblocking(true)?;
        let address = listener.local_addr()?;

        let shared = Arc::new(Shared {
            response: Mutex::new(response),
            requests: Mutex::new(Vec::new()),
        });
        let router = Router::new()
            .route(QUERY_PATH, post(handle_query))
            .with_state(shared.clone());

        let (shutdown, shutdown_signal) = oneshot::channel::<()>();
        let server = axum::Server::from_tcp(listener)?
            .serve(router.into_make_service())
            .with_graceful_shutdown(async {
                shutdown_signal.await.ok();
            });
        tokio::spawn(async move {
            if let Err(err) = server.await {
                tracing::error!(error = %err, "mock engine stopped");
            }
        });

        Ok(MockEngine {
            address,
            shared,
            shutdown: Some(shutdown),
        })
    }

    /// The base URL to connect to.
    pub fn dsn(&self) -> String {
        format!("http://{}", self.address)
    }

    /// Replace the canned response for all later requests.
    pub fn respond_with(&self, response: CannedResponse) {
        *lock(&self.shared.response) = response;
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.shared.requests).clone()
    }
}

impl Drop for MockEngine {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

async fn handle_query(
    State(shared): State<Arc<Shared>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    lock(&shared.requests).push(RecordedRequest {
        user_agent: header_text(header::USER_AGENT),
        content_type: header_text(header::CONTENT_TYPE),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    });

    let response = lock(&shared.response).clone();
    (
        response.status,
        [(header::CONTENT_TYPE, response.content_type)],
        response.body,
    )
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_and_records() {
        let engine = MockEngine::start(CannedResponse::csv("a\n1\n")).await.unwrap();

        let response = reqwest::Client::new()
            .post(format!("{}{QUERY_PATH}", engine.dsn()))
            .header("User-Agent", "probe")
            .body(r#"{"query":"SELECT 1"}"#)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "a\n1\n");

        let requests = engine.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].user_agent.as_deref(), Some("probe"));
        assert_eq!(requests[0].body["query"], "SELECT 1");
    }
}

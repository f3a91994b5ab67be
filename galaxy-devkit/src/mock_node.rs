/*!
Mock galaxy node over real HTTP

Binds an axum server on `127.0.0.1:0` serving `GET /system` according to a
[`NodeBehavior`]. The server stops when the [`MockNode`] is dropped.
*/

use anyhow::Result;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// How the mock answers `GET /system`
#[derive(Debug, Clone)]
pub enum NodeBehavior {
    /// 200 with this JSON body
    Respond(Value),
    /// 200 with an arbitrary body, typically not a record
    RawBody(String),
    /// Given status code and body
    Status(u16, String),
    /// 200 with this JSON body after a pause
    Delay(Duration, Value),
    /// Accept the request and never answer
    Hang,
}

#[derive(Clone)]
struct NodeState {
    behavior: Arc<NodeBehavior>,
    hits: Arc<AtomicUsize>,
}

pub struct MockNode {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    server: JoinHandle<()>,
}

impl MockNode {
    pub async fn spawn(behavior: NodeBehavior) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let hits = Arc::new(AtomicUsize::new(0));

        let state = NodeState { behavior: Arc::new(behavior), hits: hits.clone() };
        let app = Router::new()
            .route("/system", get(serve_system))
            .route("/health", get(|| async { "ok" }))
            .with_state(state);

        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                log::warn!("[MOCK] node {} stopped: {}", addr, e);
            }
        });

        log::info!("[MOCK] node listening on {}", addr);
        Ok(Self { addr, hits, server })
    }

    /// `host:port` as the collector expects it
    pub fn address(&self) -> String {
        self.addr.to_string()
    }

    /// Number of `/system` requests received so far
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// An address nothing listens on (connection refused)
    pub async fn unreachable_address() -> Result<String> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        drop(listener);
        Ok(addr.to_string())
    }
}

impl Drop for MockNode {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn serve_system(State(state): State<NodeState>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    match state.behavior.as_ref() {
        NodeBehavior::Respond(body) => axum::Json(body.clone()).into_response(),
        NodeBehavior::RawBody(body) => {
            ([(header::CONTENT_TYPE, "application/json")], body.clone()).into_response()
        }
        NodeBehavior::Status(code, body) => {
            let status = StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, body.clone()).into_response()
        }
        NodeBehavior::Delay(pause, body) => {
            tokio::time::sleep(*pause).await;
            axum::Json(body.clone()).into_response()
        }
        NodeBehavior::Hang => {
            tokio::time::sleep(Duration::from_secs(24 * 3600)).await;
            StatusCode::GATEWAY_TIMEOUT.into_response()
        }
    }
}

/**
 * NODE HTTP API - what a collector talks to
 *
 * GET /system : this node's star system, last_seen_at = now
 * GET /health : liveness check, plain "ok"
 */

use crate::config::NodeConfig;
use crate::models::SystemReport;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::debug;

#[derive(Clone)]
pub struct AppState {
    pub node: Arc<NodeConfig>,
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/system", get(get_system))
        .with_state(app_state)
}

// GET /system
async fn get_system(State(app): State<AppState>) -> Json<SystemReport> {
    debug!("serving /system for {}", app.node.name);
    Json(SystemReport {
        name: app.node.name.clone(),
        star_type: app.node.star_type.clone(),
        position: app.node.position,
        last_seen_at: now_rfc3339(),
    })
}

fn now_rfc3339() -> String {
    let now = OffsetDateTime::now_utc();
    let now = now.replace_nanosecond(0).unwrap_or(now);
    now.format(&Rfc3339).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;
    use tokio::net::TcpListener;

    async fn serve(node: NodeConfig) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = build_router(AppState { node: Arc::new(node) });
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr.to_string()
    }

    #[tokio::test]
    async fn test_system_endpoint() {
        let node = NodeConfig { position: Position { x: 3.0, y: 0.0, z: 0.0 }, ..Default::default() };
        let addr = serve(node).await;

        let body: serde_json::Value = reqwest::get(format!("http://{addr}/system"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["name"], "Sol");
        assert_eq!(body["star_type"]["class"], "G");
        assert_eq!(body["position"]["x"], 3.0);
        let seen = body["last_seen_at"].as_str().unwrap();
        assert!(OffsetDateTime::parse(seen, &Rfc3339).is_ok());
        assert!(seen.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let addr = serve(NodeConfig::default()).await;
        let text = reqwest::get(format!("http://{addr}/health")).await.unwrap().text().await.unwrap();
        assert_eq!(text, "ok");
    }

    #[test]
    fn test_timestamp_has_no_fraction() {
        let ts = now_rfc3339();
        assert!(!ts.contains('.'));
    }
}

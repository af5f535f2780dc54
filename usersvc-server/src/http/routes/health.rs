//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => "ok",
        Err(err) => {
            tracing::warn!(error = %err, "health check: database unreachable");
            "unavailable"
        }
    };

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    #[tokio::test]
    async fn health_returns_ok() {
        let pool = create_memory_pool().await.unwrap();
        let Json(body) = health(State(Arc::new(AppState { pool }))).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.database, "ok");
    }

    #[tokio::test]
    async fn health_reports_closed_database() {
        let pool = create_memory_pool().await.unwrap();
        pool.close().await;
        let Json(body) = health(State(Arc::new(AppState { pool }))).await;
        assert_eq!(body.database, "unavailable");
    }
}

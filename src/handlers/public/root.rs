use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::manager;

/// GET / - service info
pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Cozy API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "public": "/, /health, /auth/register, /auth/login",
                "auth": "/api/auth/me (protected)",
                "calendars": "/api/calendars[/:id] (protected)",
                "events": "/api/events[/:id] (protected)",
                "projects": "/api/projects[/:id] (protected)",
                "tasks": "/api/projects/:project_id/tasks, /api/tasks/:id[/status] (protected)",
            }
        }
    }))
}

/// GET /health - 200 when the database answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let check = match &state.db {
        Some(pool) => manager::health_check(pool).await.map_err(|e| e.to_string()),
        None => Err("database not configured".to_string()),
    };

    match check {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": "ok" }
            })),
        ),
        Err(e) => {
            tracing::warn!("health check degraded: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": true,
                    "message": "database unavailable",
                    "code": "SERVICE_UNAVAILABLE",
                    "data": { "status": "degraded", "timestamp": now, "database": "unavailable" }
                })),
            )
        }
    }
}

use axum::{debug_handler, extract::State, http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use sqlx::SqlitePool;

use crate::AppState;

/// Connectivity probe plus a user count. No retries.
#[debug_handler(state = AppState)]
pub async fn health(State(db_pool): State<SqlitePool>) -> Response {
    match probe(&db_pool).await {
        Ok(users) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": true, "users": users })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error.message = %err, "health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "error", "database": false, "message": err.to_string() })),
            )
                .into_response()
        }
    }
}

async fn probe(db_pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query("SELECT 1").execute(db_pool).await?;
    sqlx::query_scalar("SELECT COUNT(*) FROM users").fetch_one(db_pool).await
}

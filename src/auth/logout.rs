use axum::{debug_handler, Json};
use serde_json::{json, Value};
use tower_sessions::Session;

use crate::{session::Caller, AppResult, AppState};

#[debug_handler(state = AppState)]
pub(crate) async fn logout(
    caller: Caller,
    session: Session,
) -> AppResult<Json<Value>> {
    session.flush().await?;
    if let Some(user_id) = caller.user_id {
        tracing::info!(user_id, "signed out");
    }
    Ok(Json(json!({ "success": true })))
}

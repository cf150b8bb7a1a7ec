use axum::{debug_handler, extract::State, routing::{get, post}, Json, Router};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    crud,
    resources::users::{User, Users},
    session::{Caller, USER_ID},
    AppError, AppResult, AppState,
};

mod callback;
mod clients;
mod login;
mod logout;

pub use clients::{ClientProvider, Clients};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login/{provider}", get(login::login))
        .route("/api/auth/callback/{provider}", get(callback::callback))
        .route("/api/auth/session", get(current))
        .route("/api/auth/logout", post(logout::logout))
}

/// Binds the session to `user`. The session id is cycled first.
pub async fn sign_in(session: &Session, user: &User) -> AppResult<()> {
    session.cycle_id().await?;
    session.insert(USER_ID, user.id).await?;
    tracing::info!(user_id = user.id, role = %user.role, "signed in");
    Ok(())
}

#[debug_handler(state = AppState)]
pub(crate) async fn current(
    caller: Caller,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Json<Value>> {
    let Some(user_id) = caller.user_id else {
        return Ok(Json(json!({ "user": null })));
    };

    let user = match crud::fetch_by_id::<Users>(&db_pool, user_id).await {
        Ok(user) if user.is_active => user,
        Ok(_) | Err(AppError::NotFound) => return Ok(Json(json!({ "user": null }))),
        Err(err) => return Err(err),
    };

    Ok(Json(json!({
        "user": {
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "role": user.role,
        }
    })))
}

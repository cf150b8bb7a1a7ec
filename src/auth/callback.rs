use axum::{debug_handler, extract::{Path, Query, State}, response::Redirect};
use oauth2::{reqwest, AuthorizationCode, CsrfToken, PkceCodeVerifier, TokenResponse};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    resources::users,
    session::{CSRF_STATE, PKCE_VERIFIER, RETURN_URL},
    AppError, AppResult, AppState, GetField,
};

use super::{clients::ClientProvider, sign_in, Clients};

#[derive(Deserialize)]
pub(crate) struct CallbackQuery {
    pub(crate) state: Option<String>,
    pub(crate) code: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn callback(
    Path(provider): Path<ClientProvider>,
    Query(CallbackQuery { state, code }): Query<CallbackQuery>,
    State(db_pool): State<SqlitePool>,
    State(clients): State<Clients>,
    session: Session,
) -> AppResult<Redirect> {
    let state = CsrfToken::new(state.ok_or(AppError::Unauthorized)?);
    let code = AuthorizationCode::new(code.ok_or(AppError::Unauthorized)?);

    let Some(stored_state) = session.remove::<String>(CSRF_STATE).await? else {
        return Err(AppError::Unauthorized);
    };
    if state.secret() != &stored_state {
        tracing::warn!(%provider, "csrf state mismatch");
        return Err(AppError::Unauthorized);
    }

    let Some(pkce_verifier) = session.remove::<String>(PKCE_VERIFIER).await? else {
        return Err(AppError::Unauthorized);
    };

    let client = clients.get_client(provider)?;
    let http_client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    let token_result = client
        .exchange_code(code)
        .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier))
        .request_async(&http_client)
        .await?;

    let profile: serde_json::Value = http_client
        .get(provider.userinfo_url())
        .bearer_auth(token_result.access_token().secret())
        .header(reqwest::header::USER_AGENT, env!("CARGO_PKG_NAME"))
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let email = profile.get_str_field("email")?;

    let Some(user) = users::find_active_by_email(&db_pool, &email).await? else {
        tracing::warn!(%provider, %email, "sign-in refused: no active user");
        return Err(AppError::Unauthorized);
    };

    let return_url = session.remove::<String>(RETURN_URL).await?;
    sign_in(&session, &user).await?;

    Ok(Redirect::to(return_url.as_deref().unwrap_or("/")))
}

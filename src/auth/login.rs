use axum::{debug_handler, extract::{Path, Query, State}, response::Redirect};
use oauth2::{CsrfToken, PkceCodeChallenge};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{session::{CSRF_STATE, PKCE_VERIFIER, RETURN_URL}, AppResult, AppState};

use super::{clients::ClientProvider, Clients};

#[derive(Deserialize)]
pub(crate) struct LoginQuery {
    pub(crate) return_url: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn login(
    Path(provider): Path<ClientProvider>,
    Query(LoginQuery { return_url }): Query<LoginQuery>,
    State(clients): State<Clients>,
    session: Session,
) -> AppResult<Redirect> {
    let client = clients.get_client(provider)?;

    let (pkce_code_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

    let (authorize_url, csrf_state) = client.authorize_url(CsrfToken::new_random)
        .add_scopes(provider.scopes())
        .set_pkce_challenge(pkce_code_challenge)
        .url();

    session.insert(CSRF_STATE, csrf_state.secret()).await?;
    session.insert(PKCE_VERIFIER, pkce_verifier.secret()).await?;
    if let Some(return_url) = return_url.filter(|url| is_local_path(url)) {
        session.insert(RETURN_URL, return_url).await?;
    }

    Ok(Redirect::to(authorize_url.as_str()))
}

/// Only same-origin paths are remembered, so a login link can't bounce elsewhere.
pub(crate) fn is_local_path(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//") && !url.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_local_paths_are_return_targets() {
        assert!(is_local_path("/admin/bookings"));
        assert!(!is_local_path("//evil.example"));
        assert!(!is_local_path("https://evil.example"));
        assert!(!is_local_path("/\\evil.example"));
    }
}

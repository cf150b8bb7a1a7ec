use std::{fmt, path::Path};

use anyhow::Context;
use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, EndpointNotSet, EndpointSet, RedirectUrl, Scope, TokenUrl};
use serde::Deserialize;
use serde_json::Value;

use crate::{AppError, AppResult, GetField};

type ProviderClient = BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClientProvider {
    Google,
    Github,
}

impl ClientProvider {
    pub fn key(&self) -> &'static str {
        use ClientProvider::*;
        match self {
            Google => "google",
            Github => "github",
        }
    }

    fn auth_url(&self) -> &'static str {
        use ClientProvider::*;
        match self {
            Google => "https://accounts.google.com/o/oauth2/v2/auth",
            Github => "https://github.com/login/oauth/authorize",
        }
    }

    fn token_url(&self) -> &'static str {
        use ClientProvider::*;
        match self {
            Google => "https://oauth2.googleapis.com/token",
            Github => "https://github.com/login/oauth/access_token",
        }
    }

    /// Endpoint answering with a JSON object that carries an `email` field.
    pub fn userinfo_url(&self) -> &'static str {
        use ClientProvider::*;
        match self {
            Google => "https://openidconnect.googleapis.com/v1/userinfo",
            Github => "https://api.github.com/user",
        }
    }

    pub fn scopes(&self) -> Vec<Scope> {
        use ClientProvider::*;
        let scopes: &[&str] = match self {
            Google => &["openid", "email", "profile"],
            Github => &["read:user", "user:email"],
        };
        scopes.iter().map(|scope| Scope::new(scope.to_string())).collect()
    }
}

impl fmt::Display for ClientProvider {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// OAuth clients for the providers that have keys configured.
#[derive(Clone, Default)]
pub struct Clients {
    google_client: Option<ProviderClient>,
    github_client: Option<ProviderClient>,
}

impl Clients {
    /// Expects `{ "google": { "client_id", "client_secret" }, "github": { ... } }`;
    /// either provider may be left out.
    pub fn from_json(json: Value, public_url: &str) -> AppResult<Clients> {
        Ok(Clients {
            google_client: build_client(&json, ClientProvider::Google, public_url)?,
            github_client: build_client(&json, ClientProvider::Github, public_url)?,
        })
    }

    pub fn from_file(path: &Path, public_url: &str) -> anyhow::Result<Clients> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let json = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not valid JSON", path.display()))?;
        Ok(Self::from_json(json, public_url)?)
    }

    /// A provider without keys is reported as missing.
    pub fn get_client(&self, provider: ClientProvider) -> AppResult<&ProviderClient> {
        use ClientProvider::*;
        match provider {
            Google => self.google_client.as_ref(),
            Github => self.github_client.as_ref(),
        }
        .ok_or(AppError::NotFound)
    }
}

fn build_client(json: &Value, provider: ClientProvider, public_url: &str) -> AppResult<Option<ProviderClient>> {
    let Some(json) = json.get(provider.key()) else {
        return Ok(None);
    };

    let client_id = ClientId::new(json.get_str_field("client_id")?);
    let client_secret = ClientSecret::new(json.get_str_field("client_secret")?);

    let auth_url = AuthUrl::new(provider.auth_url().to_owned())?;
    let token_url = TokenUrl::new(provider.token_url().to_owned())?;
    let redirect_url = RedirectUrl::new(format!("{public_url}/api/auth/callback/{provider}"))?;

    Ok(Some(
        BasicClient::new(client_id)
            .set_client_secret(client_secret)
            .set_auth_uri(auth_url)
            .set_token_uri(token_url)
            .set_redirect_uri(redirect_url),
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_providers_are_not_found() {
        let clients = Clients::from_json(
            json!({ "google": { "client_id": "id", "client_secret": "secret" } }),
            "http://localhost:8080",
        )
        .unwrap();

        assert!(clients.get_client(ClientProvider::Google).is_ok());
        assert!(matches!(clients.get_client(ClientProvider::Github), Err(AppError::NotFound)));
    }

    #[test]
    fn provider_keys_must_be_complete() {
        let result = Clients::from_json(json!({ "github": { "client_id": "id" } }), "http://localhost:8080");
        assert!(result.is_err());
    }

    #[test]
    fn redirect_points_back_at_the_callback_route() {
        let clients = Clients::from_json(
            json!({ "github": { "client_id": "id", "client_secret": "secret" } }),
            "https://hotels.example",
        )
        .unwrap();
        let client = clients.get_client(ClientProvider::Github).unwrap();

        assert_eq!(
            client.redirect_uri().unwrap().as_str(),
            "https://hotels.example/api/auth/callback/github"
        );
    }
}

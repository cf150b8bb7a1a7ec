use std::{net::SocketAddr, path::PathBuf, str::FromStr};

use anyhow::{ensure, Context};

/// Upper bound for `SESSION_IDLE_MINUTES`: one year.
const MAX_SESSION_IDLE_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub public_url: String,
    pub session_secure: bool,
    pub session_idle_minutes: i64,
    pub oauth_clients_file: Option<PathBuf>,
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let session_idle_minutes = parse_or(&lookup, "SESSION_IDLE_MINUTES", 60)?;
        ensure!(
            (1..=MAX_SESSION_IDLE_MINUTES).contains(&session_idle_minutes),
            "invalid SESSION_IDLE_MINUTES: {session_idle_minutes} is outside 1..={MAX_SESSION_IDLE_MINUTES}"
        );

        Ok(Config {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://hotel.db?mode=rwc".to_owned()),
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 16)?,
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?,
            public_url: lookup("PUBLIC_URL")
                .unwrap_or_else(|| "http://localhost:8080".to_owned())
                .trim_end_matches('/')
                .to_owned(),
            session_secure: parse_or(&lookup, "SESSION_SECURE", false)?,
            session_idle_minutes,
            oauth_clients_file: lookup("OAUTH_CLIENTS_FILE").map(PathBuf::from),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().with_context(|| format!("invalid {key}: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.database_max_connections, 16);
        assert!(!config.session_secure);
        assert!(config.oauth_clients_file.is_none());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("SESSION_SECURE", "true"),
            ("PUBLIC_URL", "https://hotels.example/"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert!(config.session_secure);
        assert_eq!(config.public_url, "https://hotels.example");
    }

    #[test]
    fn malformed_values_name_the_variable() {
        let err = config_from(&[("DATABASE_MAX_CONNECTIONS", "lots")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_MAX_CONNECTIONS"));
    }

    #[test]
    fn session_idle_minutes_must_be_in_range() {
        for raw in ["0", "-5", "9223372036854775807"] {
            let err = config_from(&[("SESSION_IDLE_MINUTES", raw)]).unwrap_err();
            assert!(err.to_string().contains("SESSION_IDLE_MINUTES"), "{raw}");
        }
        assert_eq!(config_from(&[("SESSION_IDLE_MINUTES", "1440")]).unwrap().session_idle_minutes, 1440);
    }
}

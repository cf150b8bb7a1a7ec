pub mod app;
pub mod appresult;
pub mod auth;
pub mod config;
pub mod crud;
pub mod db;
pub mod health;
pub mod resources;
pub mod session;
pub mod telemetry;

use axum::extract::FromRef;
use serde_json::Value;
use sqlx::SqlitePool;

pub use appresult::{AppError, AppResult};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub clients: auth::Clients,
}

pub trait GetField {
    fn get_str_field(&self, field: &str) -> AppResult<String>;
}

impl GetField for Value {
    fn get_str_field(&self, field: &str) -> AppResult<String> {
        Ok(
            self.get(field)
            .ok_or(format!("expected {field} in {self}"))?
            .as_str()
            .ok_or(format!("expected {field} in {self} to be string"))?
            .to_owned()
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn string_fields_are_extracted() {
        let profile: Value = json!({ "email": "ada@example.com", "id": 7 });
        assert_eq!(profile.get_str_field("email").unwrap(), "ada@example.com");
        assert!(profile.get_str_field("id").is_err());
        assert!(profile.get_str_field("name").is_err());
    }
}

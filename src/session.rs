use std::{fmt, str::FromStr};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::AppError;

pub const USER_ID: &str = "user_id";
pub const CSRF_STATE: &str = "csrf_state";
pub const PKCE_VERIFIER: &str = "pkce_verifier";
pub const RETURN_URL: &str = "return_url";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Manager,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Guest => "GUEST",
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "MANAGER" => Ok(Role::Manager),
            "GUEST" => Ok(Role::Guest),
            other => Err(format!("unknown role {other}")),
        }
    }
}

/// Who is calling.
///
/// The session only carries the user id. Role and activity are read from
/// `users` on every request, so a demoted or deactivated account loses access
/// immediately. An anonymous caller has neither field set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Option<i64>,
    pub role: Option<Role>,
}

impl Caller {
    pub fn is_staff(&self) -> bool {
        self.role.is_some_and(|role| role.is_staff())
    }
}

impl<S> FromRequestParts<S> for Caller
where
    SqlitePool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::from(msg))?;

        let Some(user_id) = session.get::<i64>(USER_ID).await? else {
            return Ok(Caller::default());
        };

        let db_pool = SqlitePool::from_ref(state);
        let role: Option<Role> = sqlx::query_scalar("SELECT role FROM users WHERE id = ? AND is_active = 1")
            .bind(user_id)
            .fetch_optional(&db_pool)
            .await?;

        Ok(match role {
            Some(role) => Caller { user_id: Some(user_id), role: Some(role) },
            None => {
                tracing::debug!(user_id, "session user is gone or inactive");
                Caller::default()
            }
        })
    }
}

/// Authorization predicate attached to a set of routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Open,
    Staff,
    /// Reads are open, writes need staff.
    StaffWrites,
}

impl Gate {
    pub fn check(self, caller: &Caller, write: bool) -> Result<(), AppError> {
        let needs_staff = match self {
            Gate::Open => false,
            Gate::Staff => true,
            Gate::StaffWrites => write,
        };

        if needs_staff && !caller.is_staff() {
            return Err(AppError::Unauthorized);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(role: Option<Role>) -> Caller {
        Caller { user_id: role.map(|_| 1), role }
    }

    #[test]
    fn roles_round_trip_through_strings() {
        for role in [Role::Admin, Role::Manager, Role::Guest] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn staff_gate_admits_admins_and_managers_only() {
        assert!(Gate::Staff.check(&caller(Some(Role::Admin)), false).is_ok());
        assert!(Gate::Staff.check(&caller(Some(Role::Manager)), true).is_ok());
        assert!(matches!(Gate::Staff.check(&caller(Some(Role::Guest)), false), Err(AppError::Unauthorized)));
        assert!(matches!(Gate::Staff.check(&caller(None), false), Err(AppError::Unauthorized)));
    }

    #[test]
    fn staff_writes_gate_leaves_reads_open() {
        assert!(Gate::StaffWrites.check(&caller(None), false).is_ok());
        assert!(Gate::StaffWrites.check(&caller(None), true).is_err());
        assert!(Gate::StaffWrites.check(&caller(Some(Role::Manager)), true).is_ok());
    }

    #[test]
    fn open_gate_admits_anyone() {
        assert!(Gate::Open.check(&caller(None), true).is_ok());
    }
}

use axum::{extract::rejection::JsonRejection, http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use sqlx::error::ErrorKind;

pub type AppResult<T> = Result<T, AppError>;

const SQLITE_CONSTRAINT_TRIGGER: &str = "1811";

/// Failure of a single request.
///
/// Variants map one-to-one onto response statuses. `Internal` keeps the full
/// cause for the log; the client only ever sees a generic message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Internal(_) => "internal server error".to_owned(),
            AppError::Conflict(msg) | AppError::BadRequest(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(err) = &self {
            tracing::error!(error.cause_chain = ?err, error.message = %err, "request failed");
        }

        (self.status(), Json(json!({ "error": self.client_message() }))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound,
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => AppError::Conflict(db_err.message().to_owned()),
                // Raised by `ON DELETE RESTRICT` actions.
                _ if db_err.code().as_deref() == Some(SQLITE_CONSTRAINT_TRIGGER) => {
                    AppError::Conflict(db_err.message().to_owned())
                }
                _ => AppError::Internal(sqlx::Error::Database(db_err).into()),
            },
            err => AppError::Internal(err.into()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        Self::Internal(anyhow::Error::msg(err))
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        Self::Internal(anyhow::Error::msg(err.to_owned()))
    }
}

macro_rules! apperr_impl {
    ($E:ty) => {
        impl From<$E> for AppError {
            fn from(err: $E) -> Self {
                Self::Internal(anyhow::Error::from(err))
            }
        }
    };
}

apperr_impl!(serde_json::Error);
apperr_impl!(tower_sessions::session::Error);
apperr_impl!(reqwest::Error);
apperr_impl!(oauth2::url::ParseError);

impl<E: core::error::Error + Send + Sync + 'static, R: oauth2::ErrorResponse + Send + Sync + 'static> From<oauth2::RequestTokenError<E, R>> for AppError {
    fn from(err: oauth2::RequestTokenError<E, R>) -> Self {
        Self::Internal(anyhow::Error::from(err))
    }
}

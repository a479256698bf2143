//! HTTP error mapping.
//!
//! Models and activities return `anyhow::Result`; handlers return
//! [`ApiResult`] and `?` converts through `From<anyhow::Error>`, which
//! recognises the sqlx failures that are the caller's fault.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::common::{AuthError, ValidationErrors};

pub type ApiResult<T> = Result<T, ApiError>;

const PG_UNIQUE_VIOLATION: &str = "23505";
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";
const PG_CHECK_VIOLATION: &str = "23514";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Unavailable(String),

    #[error("Internal server error")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn not_found(what: &str) -> Self {
        Self::NotFound(what.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(AuthError::AdminRequired) => StatusCode::FORBIDDEN,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_failed",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Auth(AuthError::AdminRequired) => "forbidden",
            ApiError::Auth(_) => "unauthenticated",
            ApiError::Unavailable(_) => "unavailable",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(sqlx_err) = err.downcast_ref::<sqlx::Error>() {
            match sqlx_err {
                sqlx::Error::RowNotFound => return ApiError::not_found("Record"),
                sqlx::Error::Database(db) => match db.code().as_deref() {
                    Some(PG_UNIQUE_VIOLATION) => {
                        return ApiError::Conflict(
                            "A record with the same slug already exists".to_string(),
                        )
                    }
                    Some(PG_FOREIGN_KEY_VIOLATION) => {
                        return ApiError::BadRequest(
                            "Referenced record does not exist".to_string(),
                        )
                    }
                    Some(PG_CHECK_VIOLATION) => {
                        return ApiError::BadRequest(format!(
                            "Constraint violated: {}",
                            db.constraint().unwrap_or("check")
                        ))
                    }
                    _ => {}
                },
                _ => {}
            }
        }
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::Validation(fields) => json!({
                "error": self.code(),
                "message": "Some fields are invalid",
                "fields": fields,
            }),
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "Request failed");
                json!({ "error": self.code(), "message": self.to_string() })
            }
            _ => json!({ "error": self.code(), "message": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_404() {
        let err: ApiError = anyhow::Error::from(sqlx::Error::RowNotFound).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn context_wrapped_row_not_found_still_maps_to_404() {
        let err = anyhow::Error::from(sqlx::Error::RowNotFound).context("Failed to load package");
        assert_eq!(ApiError::from(err).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_errors_are_internal() {
        let err: ApiError = anyhow::anyhow!("boom").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn auth_errors_split_401_and_403() {
        assert_eq!(
            ApiError::from(AuthError::AuthenticationRequired).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::AdminRequired).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn validation_errors_are_422() {
        let mut fields = ValidationErrors::new();
        fields.require_text("title", "");
        assert_eq!(
            ApiError::from(fields).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}

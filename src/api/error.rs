//! HTTP error envelope.
//!
//! Every failing handler answers with `{"error": {"code", "message"}}`. Client
//! errors echo the domain message; server errors are logged and replaced by a
//! generic text.

use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::warn!("Not found: {}", msg);
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", msg)
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::warn!("Bad request: {}", msg);
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::warn!("Conflict: {}", msg);
        Self::new(StatusCode::CONFLICT, "CONFLICT", msg)
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::warn!("Unprocessable entity: {}", msg);
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE_ENTITY", msg)
    }

    /// Logs `msg` and answers with a generic 500.
    pub fn internal(msg: impl Into<String>) -> Self {
        let msg: String = msg.into();
        tracing::error!("Internal error: {}", msg);
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error",
        )
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorEnvelope<'a> {
            error: ErrorBody<'a>,
        }

        #[derive(Serialize)]
        struct ErrorBody<'a> {
            code: &'a str,
            message: &'a str,
        }

        (
            self.status,
            Json(ErrorEnvelope {
                error: ErrorBody {
                    code: self.code,
                    message: &self.message,
                },
            }),
        )
            .into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound { .. } => Self::not_found(err.to_string()),
            Error::Validation { message } => Self::bad_request(message),
            Error::Integrity { message } => Self::unprocessable(message),
            Error::InvalidStatusTransition { .. } => Self::conflict(err.to_string()),
            Error::Config { .. } | Error::Database(_) | Error::Io(_) => {
                Self::internal(format!("{err:?}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::search::SearchStatus;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::not_found("Search", "abc"), StatusCode::NOT_FOUND),
            (Error::validation("bad guests"), StatusCode::BAD_REQUEST),
            (
                Error::Integrity {
                    message: "dangling".to_string(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                Error::InvalidStatusTransition {
                    from: SearchStatus::Completed,
                    to: SearchStatus::Processing,
                },
                StatusCode::CONFLICT,
            ),
            (
                Error::Config {
                    message: "broken".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = ApiError::from(Error::Database(sea_orm::DbErr::Custom(
            "secret table layout".to_string(),
        )));
        assert_eq!(err.message, "Internal server error");
        assert_eq!(err.code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_client_errors_keep_message() {
        let err = ApiError::from(Error::validation("Location cannot be empty"));
        assert_eq!(err.message, "Location cannot be empty");
        assert_eq!(err.code, "BAD_REQUEST");
    }
}

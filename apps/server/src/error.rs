use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gertonargent_core::errors::{DatabaseError, Error as CoreError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Not Found")]
    NotFound,
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(e) => match e {
                CoreError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
                CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::NotFound => StatusCode::NOT_FOUND,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Status codes of the callable wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallableStatus {
    InvalidArgument,
    Unauthenticated,
    Internal,
}

impl CallableStatus {
    fn http_status(self) -> StatusCode {
        match self {
            CallableStatus::InvalidArgument => StatusCode::BAD_REQUEST,
            CallableStatus::Unauthenticated => StatusCode::UNAUTHORIZED,
            CallableStatus::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error returned by callable endpoints, rendered as `{"error": {"status", "message"}}`.
#[derive(Debug, Clone, Serialize)]
pub struct CallableError {
    pub status: CallableStatus,
    pub message: String,
}

impl CallableError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            status: CallableStatus::InvalidArgument,
            message: message.into(),
        }
    }

    /// Maps a core error; anything but a missing identity is reported as `INTERNAL`
    /// with the fixed `internal_message`.
    pub fn from_core(err: CoreError, internal_message: &str) -> Self {
        if err.is_unauthenticated() {
            return Self {
                status: CallableStatus::Unauthenticated,
                message: err.to_string(),
            };
        }
        Self {
            status: CallableStatus::Internal,
            message: internal_message.to_string(),
        }
    }
}

#[derive(Serialize)]
struct CallableErrorEnvelope {
    error: CallableError,
}

impl IntoResponse for CallableError {
    fn into_response(self) -> Response {
        let status = self.status.http_status();
        (status, Json(CallableErrorEnvelope { error: self })).into_response()
    }
}

//! Application error type and its HTTP mapping.
//!
//! Every fallible operation in the crate returns [`AppError`]. Variants carry a
//! human-readable message plus structured JSON details that are echoed back to
//! API clients in the error body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// JSON envelope returned for every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors surfaced by the link service and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The destination URL is malformed or uses an unsupported scheme.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// A custom code does not match `^[A-Za-z0-9]{1,10}$`.
    #[error("{message}")]
    InvalidCodeFormat { message: String, details: Value },

    /// Request body failed structural validation.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The code is already taken.
    #[error("{message}")]
    CodeConflict { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Every generated candidate collided with an existing code.
    #[error("{message}")]
    CodeExhausted { message: String, details: Value },

    /// The store could not be reached or did not answer in time.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_code_format(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidCodeFormat {
            message: message.into(),
            details,
        }
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::CodeConflict {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::CodeExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns `true` for the expected "no such link" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUrl { .. } | Self::InvalidCodeFormat { .. } | Self::Validation { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::CodeConflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::CodeExhausted { .. } | Self::StoreUnavailable { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            Self::InvalidUrl { message, details } => ("invalid_url", message, details),
            Self::InvalidCodeFormat { message, details } => {
                ("invalid_code_format", message, details)
            }
            Self::Validation { message, details } => ("validation_error", message, details),
            Self::CodeConflict { message, details } => ("code_conflict", message, details),
            Self::NotFound { message, details } => ("not_found", message, details),
            Self::CodeExhausted { message, details } => ("code_exhausted", message, details),
            Self::StoreUnavailable { message, details } => ("store_unavailable", message, details),
            Self::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::conflict(
                    "Code already exists",
                    json!({ "constraint": db.constraint() }),
                );
            }

            // 57014 query_canceled (statement_timeout), 08xxx connection exceptions,
            // 57P0x server shutting down.
            if let Some(state) = db.code()
                && (state == "57014" || state.starts_with("08") || state.starts_with("57P0"))
            {
                return AppError::unavailable(
                    "Store unavailable",
                    json!({ "sqlstate": state.to_string() }),
                );
            }

            return AppError::internal("Database error", json!({}));
        }

        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => {
                AppError::unavailable("Store unavailable", json!({ "reason": e.to_string() }))
            }
            _ => AppError::internal("Database error", json!({})),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}

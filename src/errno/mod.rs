//! Domain error catalog.
//!
//! Every error that crosses the HTTP boundary is a [`DomainError`]: a status
//! code, a stable dotted reason and a default message. The catalog entries
//! are constants; handlers derive request-specific variants from them with
//! [`DomainError::with_message`].

mod post;
mod user;

use std::borrow::Cow;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::Serialize;
use thiserror::Error;

pub use post::POST_NOT_FOUND;
pub use user::{PASSWORD_INVALID, USER_ALREADY_EXISTS, USER_NOT_FOUND, USERNAME_INVALID};

/// Structured, transport-aware error with a stable reason code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error: code = {code} reason = {reason} message = {message}", code = .status.as_u16())]
pub struct DomainError {
    status: StatusCode,
    reason: &'static str,
    message: Cow<'static, str>,
}

impl DomainError {
    pub const fn new(status: StatusCode, reason: &'static str, message: &'static str) -> Self {
        Self {
            status,
            reason,
            message: Cow::Borrowed(message),
        }
    }

    /// Returns a copy of this error carrying `message`; status and reason are kept.
    pub fn with_message(&self, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status: self.status,
            reason: self.reason,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn reason(&self) -> &'static str {
        self.reason
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Two errors are the same kind of failure when their reasons match,
    /// whatever their messages say.
    pub fn is(&self, other: &DomainError) -> bool {
        self.reason == other.reason
    }

    fn log_error(&self) {
        match self.status {
            code if code.is_client_error() => {
                tracing::warn!(
                    status_code = code.as_u16(),
                    reason = self.reason,
                    detail = %self.message,
                    "Client error"
                );
            }
            code if code.is_server_error() => {
                tracing::error!(
                    status_code = code.as_u16(),
                    reason = self.reason,
                    detail = %self.message,
                    "Server error"
                );
            }
            _ => {}
        }
    }
}

/// Success marker, for handlers that report an outcome in catalog form.
pub const OK: DomainError = DomainError::new(StatusCode::OK, "", "");

pub const INTERNAL: DomainError = DomainError::new(
    StatusCode::INTERNAL_SERVER_ERROR,
    "InternalError",
    "Internal server error.",
);

pub const NOT_FOUND: DomainError =
    DomainError::new(StatusCode::NOT_FOUND, "NotFound", "Resource not found.");

/// The request body could not be decoded into the expected payload.
pub const BIND: DomainError = DomainError::new(
    StatusCode::BAD_REQUEST,
    "BindError",
    "Error occurred while binding the request body to the struct.",
);

pub const INVALID_ARGUMENT: DomainError =
    DomainError::new(StatusCode::BAD_REQUEST, "InvalidArgument", "Invalid argument");

pub const UNAUTHENTICATED: DomainError =
    DomainError::new(StatusCode::UNAUTHORIZED, "Unauthenticated", "Unauthenticated.");

pub const PERMISSION_DENIED: DomainError = DomainError::new(
    StatusCode::FORBIDDEN,
    "PermissionDenied",
    "Permission denied. Access to the requested resource is forbidden.",
);

pub const OPERATION_FAILED: DomainError = DomainError::new(
    StatusCode::CONFLICT,
    "OperationFailed",
    "The requested operation has failed. Please try again later.",
);

pub const PAGE_NOT_FOUND: DomainError =
    DomainError::new(StatusCode::NOT_FOUND, "NotFound.PageNotFound", "Page not found.");

pub const DB_READ: DomainError = DomainError::new(
    StatusCode::INTERNAL_SERVER_ERROR,
    "InternalError.DBRead",
    "Database read failure.",
);

pub const DB_WRITE: DomainError = DomainError::new(
    StatusCode::INTERNAL_SERVER_ERROR,
    "InternalError.DBWrite",
    "Database write failure.",
);

/// Wire form of a [`DomainError`].
#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    code: u16,
    reason: &'a str,
    message: &'a str,
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        self.log_error();

        let body = Json(ErrorResponse {
            code: self.status.as_u16(),
            reason: self.reason,
            message: &self.message,
        });

        (self.status, body).into_response()
    }
}

impl From<DieselError> for DomainError {
    fn from(error: DieselError) -> Self {
        match error {
            DieselError::NotFound => NOT_FOUND,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                let constraint = info.constraint_name().unwrap_or("unique constraint");
                OPERATION_FAILED.with_message(format!("duplicate value violates {constraint}"))
            }
            other => {
                tracing::error!(error = %other, "Database operation failed");
                DB_READ.with_message(other.to_string())
            }
        }
    }
}

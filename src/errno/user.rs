use axum::http::StatusCode;

use super::DomainError;

pub const USERNAME_INVALID: DomainError = DomainError::new(
    StatusCode::BAD_REQUEST,
    "InvalidArgument.UsernameInvalid",
    "Invalid username: Username must consist of letters, digits, and underscores only, and its length must be between 3 and 20 characters.",
);

/// Login or password change supplied the wrong password.
pub const PASSWORD_INVALID: DomainError = DomainError::new(
    StatusCode::BAD_REQUEST,
    "InvalidArgument.PasswordInvalid",
    "Password is incorrect.",
);

pub const USER_ALREADY_EXISTS: DomainError = DomainError::new(
    StatusCode::BAD_REQUEST,
    "AlreadyExist.UserAlreadyExists",
    "User already exists.",
);

pub const USER_NOT_FOUND: DomainError =
    DomainError::new(StatusCode::NOT_FOUND, "NotFound.UserNotFound", "User not found.");

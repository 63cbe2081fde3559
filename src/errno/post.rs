use axum::http::StatusCode;

use super::DomainError;

/// The requested blog post does not exist.
pub const POST_NOT_FOUND: DomainError =
    DomainError::new(StatusCode::NOT_FOUND, "NotFound.PostNotFound", "Post not found.");

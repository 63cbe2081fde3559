use async_trait::async_trait;
use axum::{
    body::to_bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, HeaderValue, header::CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use serde_json::Deserializer;

use crate::errno::{self, DomainError};

pub const MAX_BODY_SIZE_BYTES: usize = 64 * 1024; // 64 KiB upper bound for request bodies

/// Strict JSON body extractor; every rejection is a [`errno::BIND`] error.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

fn invalid_content_type(value: Option<&HeaderValue>) -> DomainError {
    let received = value
        .and_then(|val| val.to_str().ok())
        .unwrap_or("missing");
    errno::BIND.with_message(format!(
        "expected application/json payload, received {received}"
    ))
}

fn parsing_error(err: serde_path_to_error::Error<serde_json::Error>) -> DomainError {
    let path = err.path().to_string();
    let error = err.into_inner();
    let message = if path.is_empty() || path == "." {
        format!("failed to parse JSON payload: {error}")
    } else {
        format!("failed to parse JSON payload at {path}: {error}")
    };

    errno::BIND.with_message(message)
}

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = DomainError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        validate_content_type(req.headers())?;

        let body_bytes = to_bytes(req.into_body(), MAX_BODY_SIZE_BYTES)
            .await
            .map_err(|err| errno::BIND.with_message(format!("failed to read request body: {err}")))?;

        let mut deserializer = Deserializer::from_slice(body_bytes.as_ref());
        let result =
            serde_path_to_error::deserialize(&mut deserializer).map_err(parsing_error)?;

        deserializer.end().map_err(|err| {
            errno::BIND.with_message(format!("unexpected trailing data: {err}"))
        })?;

        Ok(ValidatedJson(result))
    }
}

fn validate_content_type(headers: &HeaderMap) -> Result<(), DomainError> {
    let value = headers.get(CONTENT_TYPE);

    if let Some(value) = value
        && let Ok(value) = value.to_str()
        && (value.starts_with("application/json") || value.ends_with("+json"))
    {
        return Ok(());
    }

    Err(invalid_content_type(value))
}

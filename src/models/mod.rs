//! Request bodies accepted by the user and post APIs.

pub mod post;
pub mod user;

use serde::Deserialize;

/// Paging window shared by the list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListRequest {
    #[serde(default)]
    pub offset: i64,
    pub limit: i64,
}

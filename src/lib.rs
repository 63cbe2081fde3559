//! Request admission for the blog backend.
//!
//! [`validation::Validator`] classifies user-supplied identity fields and
//! request bodies; rejections are [`errno::DomainError`] values that render
//! themselves as HTTP responses.

pub mod errno;
pub mod logging;
pub mod models;
pub mod store;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use errno::DomainError;
pub use store::{Datastore, Store};
pub use validation::Validator;

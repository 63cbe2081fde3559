//! Request admission: syntactic checks on identity fields and request bodies.
//!
//! The field predicates are pure functions of their input and the compiled
//! patterns below. They never log; rejections are returned as
//! [`DomainError`]s derived from [`errno::INVALID_ARGUMENT`] for the request
//! layer to project onto the response.

pub mod json;
mod post;
mod user;

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::errno::{self, DomainError};
use crate::store::Store;

// `\d` and the letter classes are ASCII-only. The length check counts
// characters, which is only observable for inputs the charset check rejects.
static USERNAME_LENGTH: LazyLock<Regex> = LazyLock::new(|| unicode_pattern(r"^.{3,20}$"));
static USERNAME_CHARSET: LazyLock<Regex> = LazyLock::new(|| ascii_pattern(r"^[A-Za-z0-9_]+$"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    ascii_pattern(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
});
static PHONE: LazyLock<Regex> = LazyLock::new(|| ascii_pattern(r"^1[3-9]\d{9}$"));
static HAS_LETTER: LazyLock<Regex> = LazyLock::new(|| ascii_pattern(r"[A-Za-z]"));
static HAS_DIGIT: LazyLock<Regex> = LazyLock::new(|| ascii_pattern(r"\d"));

const MIN_PASSWORD_LEN: usize = 6;

fn unicode_pattern(pattern: &str) -> Regex {
    Regex::new(pattern).expect("validation pattern must compile")
}

fn ascii_pattern(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .unicode(false)
        .build()
        .expect("validation pattern must compile")
}

/// Field and request validation bound to a data-access capability.
///
/// The store is reserved for checks that need persisted state (such as
/// username uniqueness); none of the syntactic predicates touch it.
#[derive(Debug, Clone)]
pub struct Validator<S> {
    store: S,
}

impl<S: Store> Validator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_valid_username(&self, username: &str) -> bool {
        is_valid_username(username)
    }

    pub fn is_valid_password(&self, password: &str) -> Result<(), DomainError> {
        is_valid_password(password)
    }

    pub fn is_valid_email(&self, email: &str) -> Result<(), DomainError> {
        is_valid_email(email)
    }

    pub fn is_valid_phone(&self, phone: &str) -> Result<(), DomainError> {
        is_valid_phone(phone)
    }
}

/// 3 to 20 characters drawn from `[A-Za-z0-9_]`.
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_LENGTH.is_match(username) && USERNAME_CHARSET.is_match(username)
}

/// Non-empty, at least six bytes, with at least one ASCII letter and one digit.
///
/// Checks run in that order and the first failure is reported.
pub fn is_valid_password(password: &str) -> Result<(), DomainError> {
    if password.is_empty() {
        return Err(errno::INVALID_ARGUMENT.with_message("password cannot be empty"));
    }

    if password.len() < MIN_PASSWORD_LEN {
        return Err(errno::INVALID_ARGUMENT
            .with_message("password must be at least 6 characters long"));
    }

    if !HAS_LETTER.is_match(password) {
        return Err(errno::INVALID_ARGUMENT
            .with_message("password must contain at least one letter"));
    }

    if !HAS_DIGIT.is_match(password) {
        return Err(errno::INVALID_ARGUMENT
            .with_message("password must contain at least one number"));
    }

    Ok(())
}

pub fn is_valid_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() {
        return Err(errno::INVALID_ARGUMENT.with_message("email cannot be empty"));
    }

    if !EMAIL.is_match(email) {
        return Err(errno::INVALID_ARGUMENT.with_message("invalid email format"));
    }

    Ok(())
}

/// Mainland China mobile number: eleven digits, `1` then `3`-`9`.
pub fn is_valid_phone(phone: &str) -> Result<(), DomainError> {
    if phone.is_empty() {
        return Err(errno::INVALID_ARGUMENT.with_message("phone cannot be empty"));
    }

    if !PHONE.is_match(phone) {
        return Err(errno::INVALID_ARGUMENT.with_message("invalid phone format"));
    }

    Ok(())
}

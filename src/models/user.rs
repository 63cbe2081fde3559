use std::fmt;

use serde::Deserialize;

use crate::logging::{SanitizedEmail, SanitizedPhone, SanitizedUsername};

const REDACTED: &str = "***";

#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub nickname: Option<String>,
    pub email: String,
    pub phone: String,
}

impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("username", &format_args!("{}", SanitizedUsername::new(&self.username)))
            .field("password", &REDACTED)
            .field("nickname", &self.nickname)
            .field("email", &format_args!("{}", SanitizedEmail::new(&self.email)))
            .field("phone", &format_args!("{}", SanitizedPhone::new(&self.phone)))
            .finish()
    }
}

/// Partial profile update; absent fields are left unchanged.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl fmt::Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateUserRequest")
            .field("user_id", &self.user_id)
            .field("nickname", &self.nickname)
            .field(
                "email",
                &self.email.as_ref().map(|email| SanitizedEmail::new(email).to_string()),
            )
            .field(
                "phone",
                &self.phone.as_ref().map(|phone| SanitizedPhone::new(phone).to_string()),
            )
            .finish()
    }
}

#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub old_password: String,
    pub new_password: String,
}

impl fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordRequest")
            .field("user_id", &self.user_id)
            .field("old_password", &REDACTED)
            .field("new_password", &REDACTED)
            .finish()
    }
}

#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &format_args!("{}", SanitizedUsername::new(&self.username)))
            .field("password", &REDACTED)
            .finish()
    }
}

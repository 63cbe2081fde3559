use std::fmt;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Installs the global `fmt` subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` when a global subscriber is already installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Sanitized wrapper for email addresses that masks the local part
#[derive(Debug, Clone)]
pub struct SanitizedEmail(String);

impl SanitizedEmail {
    pub fn new(email: impl AsRef<str>) -> Self {
        Self(Self::sanitize(email.as_ref()))
    }

    fn sanitize(email: &str) -> String {
        match email.split_once('@') {
            Some((local, domain)) => {
                let mut chars = local.chars();
                let masked_local = match (chars.next(), chars.clone().count()) {
                    (Some(first), rest) if rest >= 2 => format!("{first}***"),
                    _ => "*".repeat(local.chars().count()),
                };
                format!("{masked_local}@{domain}")
            }
            None => "***@***".to_string(),
        }
    }
}

impl fmt::Display for SanitizedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sanitized wrapper for usernames that shows only first and last character
#[derive(Debug, Clone)]
pub struct SanitizedUsername(String);

impl SanitizedUsername {
    pub fn new(username: impl AsRef<str>) -> Self {
        Self(Self::sanitize(username.as_ref()))
    }

    fn sanitize(username: &str) -> String {
        let len = username.chars().count();
        let first = username.chars().next();
        let last = username.chars().last();
        match (first, last) {
            (Some(first), Some(last)) if len > 4 => format!("{first}***{last}"),
            (Some(first), _) if len > 2 => format!("{first}***"),
            _ => "*".repeat(len),
        }
    }
}

impl fmt::Display for SanitizedUsername {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sanitized wrapper for phone numbers that keeps the first three and last two digits
#[derive(Debug, Clone)]
pub struct SanitizedPhone(String);

impl SanitizedPhone {
    pub fn new(phone: impl AsRef<str>) -> Self {
        Self(Self::sanitize(phone.as_ref()))
    }

    fn sanitize(phone: &str) -> String {
        let chars: Vec<char> = phone.chars().collect();
        if chars.len() < 7 {
            return "*".repeat(chars.len());
        }

        let head: String = chars.iter().take(3).collect();
        let tail: String = chars.iter().skip(chars.len() - 2).collect();
        format!("{head}{}{tail}", "*".repeat(chars.len() - 5))
    }
}

impl fmt::Display for SanitizedPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_email() {
        assert_eq!(
            SanitizedEmail::new("user@example.com").to_string(),
            "u***@example.com"
        );
        assert_eq!(
            SanitizedEmail::new("ab@test.com").to_string(),
            "**@test.com"
        );
        assert_eq!(SanitizedEmail::new("a@test.com").to_string(), "*@test.com");
        assert_eq!(SanitizedEmail::new("invalid-email").to_string(), "***@***");
    }

    #[test]
    fn test_sanitize_username() {
        assert_eq!(SanitizedUsername::new("johndoe").to_string(), "j***e");
        assert_eq!(SanitizedUsername::new("ab").to_string(), "**");
        assert_eq!(SanitizedUsername::new("abc").to_string(), "a***");
        assert_eq!(SanitizedUsername::new("a").to_string(), "*");
        assert_eq!(SanitizedUsername::new("").to_string(), "");
    }

    #[test]
    fn test_sanitize_phone() {
        assert_eq!(SanitizedPhone::new("13912345678").to_string(), "139******78");
        assert_eq!(SanitizedPhone::new("12345").to_string(), "*****");
        assert_eq!(SanitizedPhone::new("").to_string(), "");
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        // Whatever the first call returns, a global subscriber is installed afterwards.
        init_tracing();
        assert!(!init_tracing());
    }
}

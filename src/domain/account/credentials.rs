//! Login credentials and password changes.
//!
//! Passwords are kept as entered; comparison is constant-time so response
//! timing does not leak how much of a guess matched.

use secrecy::{ExposeSecret, Secret};
use subtle::ConstantTimeEq;

use crate::domain::foundation::ValidationError;

/// Maximum length of a username.
pub const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length of a password.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Login name, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("usuario"));
        }
        if trimmed.chars().count() > MAX_USERNAME_LENGTH {
            return Err(ValidationError::invalid_format(
                "usuario",
                format!("must be at most {} characters", MAX_USERNAME_LENGTH),
            ));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "usuario",
                "must not contain spaces",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A password value. Debug output is redacted.
#[derive(Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_field("password"));
        }
        if value.chars().count() > MAX_PASSWORD_LENGTH {
            return Err(ValidationError::invalid_format(
                "password",
                format!("must be at most {} characters", MAX_PASSWORD_LENGTH),
            ));
        }
        Ok(Self(Secret::new(value)))
    }

    /// Rebuilds a stored password without validation.
    pub fn reconstitute(value: impl Into<String>) -> Self {
        Self(Secret::new(value.into()))
    }

    /// Constant-time comparison against a candidate.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0
            .expose_secret()
            .as_bytes()
            .ct_eq(candidate.as_bytes())
            .into()
    }

    /// Raw value for persistence.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

/// A confirmed new password: both form fields must agree.
#[derive(Debug, Clone)]
pub struct PasswordChange(Password);

impl PasswordChange {
    /// # Errors
    ///
    /// - `InvalidFormat` on `pass2` when the two entries differ
    /// - any [`Password::new`] error
    pub fn confirm(pass1: &str, pass2: &str) -> Result<Self, ValidationError> {
        let first = pass1.as_bytes();
        let second = pass2.as_bytes();
        let same: bool = first.ct_eq(second).into();
        if !same {
            return Err(ValidationError::invalid_format(
                "pass2",
                "passwords do not match",
            ));
        }
        Ok(Self(Password::new(pass1)?))
    }

    pub fn into_password(self) -> Password {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_trimmed() {
        assert_eq!(Username::new("  prof.ana ").unwrap().as_str(), "prof.ana");
    }

    #[test]
    fn username_rejects_blank_and_spaces() {
        assert!(Username::new("   ").is_err());
        assert!(Username::new("ana lopez").is_err());
    }

    #[test]
    fn password_matches_exact_value_only() {
        let pw = Password::new("secreto").unwrap();
        assert!(pw.matches("secreto"));
        assert!(!pw.matches("secret"));
        assert!(!pw.matches("secreto "));
    }

    #[test]
    fn password_debug_is_redacted() {
        let pw = Password::new("secreto").unwrap();
        assert!(!format!("{:?}", pw).contains("secreto"));
    }

    #[test]
    fn password_change_requires_matching_entries() {
        let err = PasswordChange::confirm("uno", "dos").unwrap_err();
        assert_eq!(err.field(), "pass2");
        let ok = PasswordChange::confirm("nuevo", "nuevo").unwrap();
        assert!(ok.into_password().matches("nuevo"));
    }

    #[test]
    fn password_change_rejects_empty() {
        assert!(PasswordChange::confirm("", "").is_err());
    }
}

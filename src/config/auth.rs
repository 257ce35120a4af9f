//! Session configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum length of the HMAC signing secret.
pub const MIN_SESSION_SECRET_BYTES: usize = 32;

/// Signed-cookie session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret for session tokens
    pub session_secret: Secret<String>,

    /// Session lifetime in seconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,

    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Mark the cookie `Secure` (HTTPS only)
    #[serde(default)]
    pub secure_cookie: bool,
}

impl AuthConfig {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Validate session configuration
    ///
    /// Production requires a secure cookie.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.session_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__SESSION_SECRET"));
        }
        if secret.len() < MIN_SESSION_SECRET_BYTES {
            return Err(ValidationError::SessionSecretTooShort(MIN_SESSION_SECRET_BYTES));
        }
        if !(60..=7 * 24 * 3600).contains(&self.session_ttl_secs) {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.cookie_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__COOKIE_NAME"));
        }
        if *environment == Environment::Production && !self.secure_cookie {
            return Err(ValidationError::InsecureCookieInProduction);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: Secret::new(String::new()),
            session_ttl_secs: default_session_ttl(),
            cookie_name: default_cookie_name(),
            secure_cookie: false,
        }
    }
}

fn default_session_ttl() -> u64 {
    8 * 3600
}

fn default_cookie_name() -> String {
    "sesion".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AuthConfig {
        AuthConfig {
            session_secret: Secret::new("x".repeat(MIN_SESSION_SECRET_BYTES)),
            ..Default::default()
        }
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_ttl(), Duration::from_secs(8 * 3600));
        assert_eq!(config.cookie_name, "sesion");
        assert!(!config.secure_cookie);
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        assert!(matches!(
            AuthConfig::default().validate(&Environment::Development),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_short_secret_is_rejected() {
        let config = AuthConfig {
            session_secret: Secret::new("corto".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::SessionSecretTooShort(_))
        ));
    }

    #[test]
    fn test_production_requires_secure_cookie() {
        let config = valid();
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.validate(&Environment::Production).is_err());

        let config = AuthConfig {
            secure_cookie: true,
            ..valid()
        };
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_secret_is_redacted_in_debug() {
        let config = valid();
        assert!(!format!("{:?}", config).contains(&"x".repeat(MIN_SESSION_SECRET_BYTES)));
    }
}

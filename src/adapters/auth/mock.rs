//! Mock session adapter for testing.
//!
//! Maps opaque tokens to users. Tokens not in the map return `InvalidToken`.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::{SessionIssuer, SessionValidator};

#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token for a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.write_tokens().insert(token.into(), user);
        self
    }

    /// Makes every validation and issue fail with `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        if let Ok(mut slot) = self.force_error.write() {
            *slot = Some(error);
        }
        self
    }

    /// Number of tokens known, including issued ones.
    pub fn token_count(&self) -> usize {
        self.tokens.read().map(|t| t.len()).unwrap_or(0)
    }

    fn write_tokens(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, AuthenticatedUser>> {
        self.tokens.write().unwrap_or_else(|p| p.into_inner())
    }

    fn forced(&self) -> Option<AuthError> {
        self.force_error.read().ok().and_then(|e| e.clone())
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(err) = self.forced() {
            return Err(err);
        }
        self.tokens
            .read()
            .map_err(|_| AuthError::InvalidToken)?
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[async_trait]
impl SessionIssuer for MockSessionValidator {
    async fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError> {
        if let Some(err) = self.forced() {
            return Err(err);
        }
        let mut tokens = self.write_tokens();
        let token = format!("mock-session-{}", tokens.len() + 1);
        tokens.insert(token.clone(), user.clone());
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AccountId, Role};

    fn teacher() -> AuthenticatedUser {
        AuthenticatedUser::new(AccountId::new(), "ana", Role::Maestro)
    }

    #[tokio::test]
    async fn registered_token_validates() {
        let user = teacher();
        let mock = MockSessionValidator::new().with_user("t1", user.clone());
        assert_eq!(mock.validate("t1").await.unwrap(), user);
        assert_eq!(mock.validate("t2").await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn issued_token_is_remembered() {
        let mock = MockSessionValidator::new();
        let token = mock.issue(&teacher()).await.unwrap();
        assert_eq!(mock.validate(&token).await.unwrap().username, "ana");
        assert_eq!(mock.token_count(), 1);
    }

    #[tokio::test]
    async fn forced_error_is_returned() {
        let mock = MockSessionValidator::new()
            .with_user("t1", teacher())
            .with_error(AuthError::TokenExpired);
        assert_eq!(mock.validate("t1").await, Err(AuthError::TokenExpired));
    }
}

//! Session ports: turning a cookie into an identity and back.
//!
//! The HTTP middleware reads the session cookie and asks a
//! [`SessionValidator`] who the caller is. Login and cycle switching ask a
//! [`SessionIssuer`] for a fresh token to put back in the cookie.
//!
//! # Contract
//!
//! Implementations must:
//! - verify the token signature
//! - reject expired tokens with `AuthError::TokenExpired`
//! - reject anything malformed or tampered with `AuthError::InvalidToken`

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates session tokens and extracts the caller's identity.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a session token and return the authenticated user.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthenticatedUser)` - token valid, identity extracted
    /// * `Err(AuthError::InvalidToken)` - malformed or bad signature
    /// * `Err(AuthError::TokenExpired)` - signature valid but expired
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Issues session tokens for an identity.
#[async_trait]
pub trait SessionIssuer: Send + Sync {
    /// Produce a signed token carrying `user`, including its selected cycle.
    async fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AccountId, Role};
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Opaque-token session store used to exercise both traits together.
    struct TestSessions {
        tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    }

    impl TestSessions {
        fn new() -> Self {
            Self {
                tokens: RwLock::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl SessionValidator for TestSessions {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[async_trait]
    impl SessionIssuer for TestSessions {
        async fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError> {
            let mut tokens = self.tokens.write().unwrap();
            let token = format!("token-{}", tokens.len());
            tokens.insert(token.clone(), user.clone());
            Ok(token)
        }
    }

    #[tokio::test]
    async fn issued_token_validates_to_same_user() {
        let sessions = TestSessions::new();
        let user = AuthenticatedUser::new(AccountId::new(), "director", Role::Director)
            .with_selected_cycle("2023-2024");

        let token = sessions.issue(&user).await.unwrap();
        let validated = sessions.validate(&token).await.unwrap();

        assert_eq!(validated, user);
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let sessions = TestSessions::new();
        assert!(matches!(
            sessions.validate("nope").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn session_traits_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
        assert_send_sync::<dyn SessionIssuer>();
    }
}

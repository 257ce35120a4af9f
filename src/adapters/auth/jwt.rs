//! Signed session tokens (HS256 JWT).
//!
//! The token is the whole session: account id, username, role, the cycle a
//! Director is browsing, issue time and expiry. It lives in an HTTP-only
//! cookie, so nothing is kept server-side.

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::domain::foundation::{AccountId, AuthError, AuthenticatedUser, Role, Timestamp};
use crate::ports::{SessionIssuer, SessionValidator};

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionClaims {
    sub: Uuid,
    username: String,
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cycle: Option<String>,
    iat: i64,
    exp: i64,
}

impl SessionClaims {
    fn into_user(self) -> AuthenticatedUser {
        let user = AuthenticatedUser::new(AccountId::from_uuid(self.sub), self.username, self.role);
        match self.cycle {
            Some(cycle) => user.with_selected_cycle(cycle),
            None => user,
        }
    }
}

/// Issues and validates HS256 session tokens.
pub struct JwtSessionService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtSessionService {
    pub fn new(secret: &Secret<String>, ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            validation,
            ttl,
        }
    }

    fn issue_at(&self, user: &AuthenticatedUser, now: Timestamp) -> Result<String, AuthError> {
        let claims = SessionClaims {
            sub: *user.id.as_uuid(),
            username: user.username.clone(),
            role: user.role,
            cycle: user.selected_cycle.clone(),
            iat: now.as_unix_secs(),
            exp: now.plus_secs(self.ttl.as_secs()).as_unix_secs(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::IssueFailed(e.to_string()))
    }
}

#[async_trait]
impl SessionIssuer for JwtSessionService {
    async fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError> {
        self.issue_at(user, Timestamp::now())
    }
}

#[async_trait]
impl SessionValidator for JwtSessionService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            },
        )?;
        Ok(data.claims.into_user())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtSessionService {
        JwtSessionService::new(
            &Secret::new("0123456789abcdef0123456789abcdef".to_string()),
            Duration::from_secs(3600),
        )
    }

    fn director() -> AuthenticatedUser {
        AuthenticatedUser::new(AccountId::new(), "director", Role::Director)
    }

    #[tokio::test]
    async fn issued_token_round_trips_identity() {
        let svc = service();
        let user = director().with_selected_cycle("2023-2024");

        let token = svc.issue(&user).await.unwrap();
        let validated = svc.validate(&token).await.unwrap();

        assert_eq!(validated, user);
    }

    #[tokio::test]
    async fn token_without_cycle_has_no_selection() {
        let svc = service();
        let token = svc.issue(&director()).await.unwrap();
        assert!(svc.validate(&token).await.unwrap().selected_cycle.is_none());
    }

    #[tokio::test]
    async fn tampered_token_is_invalid() {
        let svc = service();
        let mut token = svc.issue(&director()).await.unwrap();
        token.push('x');
        assert_eq!(svc.validate(&token).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_invalid() {
        let other = JwtSessionService::new(
            &Secret::new("another-secret-another-secret-xx".to_string()),
            Duration::from_secs(3600),
        );
        let token = other.issue(&director()).await.unwrap();
        assert_eq!(service().validate(&token).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let svc = service();
        let long_ago = Timestamp::from_unix_secs(Timestamp::now().as_unix_secs() - 7200).unwrap();
        let token = svc.issue_at(&director(), long_ago).unwrap();
        assert_eq!(svc.validate(&token).await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        assert_eq!(
            service().validate("not-a-jwt").await,
            Err(AuthError::InvalidToken)
        );
    }
}

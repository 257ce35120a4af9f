//! Session middleware and extractors for axum.
//!
//! The session travels in a signed token inside an HTTP-only cookie.
//!
//! ```text
//! Request → session_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!               Handler → RequireAuth / RequireDirector read from extensions
//! ```
//!
//! A missing or invalid session redirects the browser to the login page;
//! a Teacher reaching a Director-only endpoint gets 403.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{debug, warn};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::SessionValidator;

/// Where unauthenticated requests are sent.
pub const LOGIN_PATH: &str = "/";

/// Middleware state: the validator and the cookie to read.
#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<dyn SessionValidator>,
    pub cookie_name: String,
}

/// Validates the session cookie and injects the user into request extensions.
///
/// Requests without a valid cookie continue untouched; the extractors decide
/// whether the route needs a session.
pub async fn session_middleware(
    State(auth): State<AuthState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(cookie) = jar.get(&auth.cookie_name) {
        match auth.validator.validate(cookie.value()).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
            }
            Err(e) if e.requires_reauthentication() => {
                debug!(error = %e, "Ignoring invalid session cookie")
            }
            Err(e) => warn!(error = %e, "Session validation failed"),
        }
    }
    next.run(request).await
}

/// Builds the HTTP-only session cookie.
pub fn session_cookie(name: &str, token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name.to_string(), token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Extractor that requires a session.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Extractor that requires a Director session.
#[derive(Debug, Clone)]
pub struct RequireDirector(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireDirector
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            match parts.extensions.get::<AuthenticatedUser>() {
                Some(user) if user.is_director() => Ok(RequireDirector(user.clone())),
                Some(_) => Err(AuthRejection::NotDirector),
                None => Err(AuthRejection::Unauthenticated),
            }
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No valid session cookie.
    Unauthenticated,
    /// Signed in, but not as Director.
    NotDirector,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => Redirect::to(LOGIN_PATH).into_response(),
            AuthRejection::NotDirector => (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse::forbidden("Director role required")),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AccountId, Role};
    use axum::extract::FromRequestParts;
    use axum::http::header::LOCATION;

    fn parts_with(user: Option<AuthenticatedUser>) -> axum::http::request::Parts {
        let mut request: axum::http::Request<()> =
            axum::http::Request::builder().uri("/test").body(()).unwrap();
        if let Some(user) = user {
            request.extensions_mut().insert(user);
        }
        request.into_parts().0
    }

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(AccountId::new(), "someone", role)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Extractors
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        let mut parts = parts_with(Some(user(Role::Maestro)));
        let RequireAuth(extracted) = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(extracted.username, "someone");
    }

    #[tokio::test]
    async fn require_auth_fails_without_user() {
        let mut parts = parts_with(None);
        let result = RequireAuth::from_request_parts(&mut parts, &()).await;
        assert_eq!(result.unwrap_err(), AuthRejection::Unauthenticated);
    }

    #[tokio::test]
    async fn require_director_rejects_teachers() {
        let mut parts = parts_with(Some(user(Role::Maestro)));
        let result = RequireDirector::from_request_parts(&mut parts, &()).await;
        assert_eq!(result.unwrap_err(), AuthRejection::NotDirector);

        let mut parts = parts_with(Some(user(Role::Director)));
        assert!(RequireDirector::from_request_parts(&mut parts, &())
            .await
            .is_ok());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Rejections and cookies
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn unauthenticated_redirects_to_login() {
        let response = AuthRejection::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), LOGIN_PATH);
    }

    #[test]
    fn not_director_is_forbidden() {
        let response = AuthRejection::NotDirector.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn session_cookie_is_http_only() {
        let cookie = session_cookie("sesion", "token".to_string(), true);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn auth_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
    }
}

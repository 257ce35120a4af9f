//! Session adapters.
//!
//! Implementations of the `SessionValidator` and `SessionIssuer` ports:
//!
//! - `jwt` - HS256-signed cookie tokens used in production
//! - `mock` - Opaque test tokens

mod jwt;
mod mock;

pub use jwt::JwtSessionService;
pub use mock::MockSessionValidator;

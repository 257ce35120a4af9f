//! Account domain module.
//!
//! Staff logins (Director and teachers), password checks and first-login
//! password changes.

mod account;
mod credentials;
mod errors;

pub use account::{Account, MAX_FULL_NAME_LENGTH};
pub use credentials::{
    Password, PasswordChange, Username, MAX_PASSWORD_LENGTH, MAX_USERNAME_LENGTH,
};
pub use errors::AccountError;

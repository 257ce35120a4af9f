//! HTTP DTOs for account endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::account::Account;
use crate::domain::foundation::{AuthenticatedUser, Role};

/// Page a freshly created account must visit first.
pub const FIRST_LOGIN_PATH: &str = "/primer-ingreso";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const LOGIN_ACTION: &str = "/login";
pub const NEW_PASSWORD_ACTION: &str = "/guardar-nuevo-password";

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Deserialize)]
pub struct NewPasswordForm {
    pub pass1: String,
    pub pass2: String,
}

#[derive(Clone, Deserialize)]
pub struct CreateTeacherForm {
    pub nombre: String,
    pub usuario: String,
    pub password: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUserResponse {
    pub id: String,
    pub username: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_cycle: Option<String>,
}

impl From<&AuthenticatedUser> for SessionUserResponse {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            role: user.role,
            selected_cycle: user.selected_cycle.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: SessionUserResponse,
    pub requires_password_change: bool,
    /// Where the client should go next.
    pub redirect: String,
}

/// Describes a form the client renders: where to post it and which fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormPageResponse {
    pub action: String,
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUserResponse>,
}

impl FormPageResponse {
    pub fn login() -> Self {
        Self {
            action: LOGIN_ACTION.to_string(),
            fields: vec!["username".to_string(), "password".to_string()],
            user: None,
        }
    }

    pub fn new_password(user: &AuthenticatedUser) -> Self {
        Self {
            action: NEW_PASSWORD_ACTION.to_string(),
            fields: vec!["pass1".to_string(), "pass2".to_string()],
            user: Some(SessionUserResponse::from(user)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherAccountResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub requires_password_change: bool,
}

impl From<&Account> for TeacherAccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id().to_string(),
            username: account.username().to_string(),
            full_name: account.full_name().to_string(),
            requires_password_change: account.requires_password_change(),
        }
    }
}

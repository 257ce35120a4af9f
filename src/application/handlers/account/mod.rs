//! Account handlers: login, first-login password change, teacher creation.

mod change_password;
mod create_teacher;
mod login;

pub use change_password::{ChangePasswordCommand, ChangePasswordHandler};
pub use create_teacher::{CreateTeacherCommand, CreateTeacherHandler};
pub use login::{LoginCommand, LoginHandler, LoginResult};

//! Credential registration and authentication.

mod error;
pub mod password;
mod service;

pub use self::error::AuthError;
pub use self::service::AuthService;

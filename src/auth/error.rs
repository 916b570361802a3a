use crate::store::StoreError;
use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username and password are required")]
    Validation,
    #[error("Username already exists")]
    Conflict,
    /// Unknown username and wrong password share this variant so callers
    /// cannot tell them apart.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Hash(_) | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to clients. Internal failures are not described.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Hash(_) | Self::Store(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

//! API handlers and the request/response types they share.

pub mod health;
pub mod root;
pub mod user_login;
pub mod user_signup;

use crate::auth::AuthError;
use axum::{Json, http::StatusCode};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tokio::task::JoinError;
use tracing::error;
use utoipa::ToSchema;

/// Body accepted by `/api/signup` and `/api/login`.
///
/// Both fields are optional at the JSON level so an absent or `null` field
/// reaches the handler. `into_parts` turns it into an empty string, which
/// validation then rejects with `400`.
#[derive(ToSchema, Deserialize, Default)]
pub struct UserCredentials {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

impl UserCredentials {
    fn into_parts(self) -> (String, SecretString) {
        (
            self.username.unwrap_or_default(),
            SecretString::from(self.password.unwrap_or_default()),
        )
    }
}

impl std::fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct AuthResponse {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl AuthResponse {
    const fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

fn missing_payload() -> (StatusCode, Json<AuthResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(AuthResponse::failure("Missing payload")),
    )
}

/// Map the outcome of a blocking auth call to a status and JSON body.
fn respond(outcome: Result<Result<(), AuthError>, JoinError>) -> (StatusCode, Json<AuthResponse>) {
    match outcome {
        Ok(Ok(())) => (StatusCode::OK, Json(AuthResponse::ok())),
        Ok(Err(err)) => {
            if matches!(err, AuthError::Hash(_) | AuthError::Store(_)) {
                error!("auth operation failed: {err}");
            }
            (err.status(), Json(AuthResponse::failure(err.public_message())))
        }
        Err(err) => {
            error!("auth task failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AuthResponse::failure("Internal server error")),
            )
        }
    }
}

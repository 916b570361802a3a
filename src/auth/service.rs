use super::{AuthError, password};
use crate::store::{AttemptEntry, AttemptLog, CredentialRecord, CredentialStore};
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Register and authenticate users over injected stores.
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    attempts: Arc<dyn AttemptLog>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}

impl AuthService {
    #[must_use]
    pub fn new(credentials: Arc<dyn CredentialStore>, attempts: Arc<dyn AttemptLog>) -> Self {
        Self {
            credentials,
            attempts,
        }
    }

    #[must_use]
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    #[must_use]
    pub fn attempts(&self) -> &Arc<dyn AttemptLog> {
        &self.attempts
    }

    /// Create a credential record for `username`.
    ///
    /// # Errors
    /// `Validation` if either input is empty, `Conflict` if the username is
    /// taken, `Hash`/`Store` on internal failures.
    #[instrument(skip(self, password))]
    pub fn register(&self, username: &str, password: &SecretString) -> Result<(), AuthError> {
        let secret = password.expose_secret();
        if username.is_empty() || secret.is_empty() {
            return Err(AuthError::Validation);
        }

        let password_hash =
            password::hash_password(secret).map_err(|e| AuthError::Hash(e.to_string()))?;

        let record = CredentialRecord {
            username: username.to_string(),
            password_hash,
            created_at: Utc::now(),
        };

        if self.credentials.insert_if_absent(record)? {
            debug!("user registered");
            Ok(())
        } else {
            debug!("username already exists");
            Err(AuthError::Conflict)
        }
    }

    /// Verify `password` for `username` and record the attempt.
    ///
    /// Exactly one attempt entry is appended for every call that passes
    /// validation, whatever the outcome.
    ///
    /// # Errors
    /// `Validation` if either input is empty, `InvalidCredentials` for an
    /// unknown user or wrong password, `Store` on storage failures.
    #[instrument(skip(self, password))]
    pub fn authenticate(&self, username: &str, password: &SecretString) -> Result<(), AuthError> {
        let secret = password.expose_secret();
        if username.is_empty() || secret.is_empty() {
            return Err(AuthError::Validation);
        }

        let success = match self.credentials.get(username)? {
            Some(record) => password::verify_password(secret, &record.password_hash)
                .unwrap_or_else(|e| {
                    error!("stored hash for user is unusable: {e}");
                    false
                }),
            None => {
                password::verify_dummy(secret);
                false
            }
        };

        self.attempts.append(AttemptEntry {
            username: username.to_string(),
            timestamp: Utc::now(),
            success,
        })?;

        if success {
            debug!("login successful");
            Ok(())
        } else {
            debug!("invalid credentials");
            Err(AuthError::InvalidCredentials)
        }
    }
}

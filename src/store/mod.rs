//! Credential and attempt-log storage.
//!
//! Both stores follow the same contract: `load` returns a full in-memory
//! snapshot and `save` overwrites the persisted representation. Mutations that
//! must not race (`insert_if_absent`, `append`) are implemented by each backend
//! under its own lock so the read-modify-write happens as a single step.

pub mod json;
pub mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::PathBuf};
use thiserror::Error;

pub use self::json::{JsonAttemptLog, JsonCredentialStore};
pub use self::memory::{MemoryAttemptLog, MemoryCredentialStore};

/// Stored credential for one user. Never updated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub username: String,
    /// Argon2id PHC string; the salt is embedded.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of one authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptEntry {
    pub username: String,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
}

pub type Credentials = HashMap<String, CredentialRecord>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("store lock poisoned")]
    Poisoned,
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Username → credential mapping.
pub trait CredentialStore: Send + Sync {
    /// Full snapshot of every stored credential.
    ///
    /// # Errors
    /// Returns an error if the backing document cannot be read or parsed.
    fn load(&self) -> Result<Credentials>;

    /// Overwrite the persisted document with `credentials`.
    ///
    /// # Errors
    /// Returns an error if the backing document cannot be written.
    fn save(&self, credentials: &Credentials) -> Result<()>;

    /// Insert `record` unless its username already exists.
    ///
    /// Returns `false` and writes nothing when the username is taken.
    ///
    /// # Errors
    /// Returns an error if the backing document cannot be read or written.
    fn insert_if_absent(&self, record: CredentialRecord) -> Result<bool>;

    /// # Errors
    /// Returns an error if the backing document cannot be read or parsed.
    fn get(&self, username: &str) -> Result<Option<CredentialRecord>> {
        Ok(self.load()?.remove(username))
    }
}

/// Append-only, chronologically ordered log of authentication attempts.
pub trait AttemptLog: Send + Sync {
    /// # Errors
    /// Returns an error if the backing document cannot be read or parsed.
    fn load(&self) -> Result<Vec<AttemptEntry>>;

    /// # Errors
    /// Returns an error if the backing document cannot be written.
    fn save(&self, entries: &[AttemptEntry]) -> Result<()>;

    /// Append one entry at the end of the log.
    ///
    /// # Errors
    /// Returns an error if the backing document cannot be read or written.
    fn append(&self, entry: AttemptEntry) -> Result<()>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn credential_record_uses_camel_case_fields() {
        let record = CredentialRecord {
            username: "alice".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["username"], json!("alice"));
        assert_eq!(value["createdAt"], json!("2024-05-01T12:00:00Z"));
        assert!(value.get("passwordHash").is_some());
        assert!(value.get("password_hash").is_none());
    }

    #[test]
    fn attempt_entry_reads_source_format() {
        let entry: AttemptEntry = serde_json::from_value(json!({
            "username": "bob",
            "timestamp": "2024-05-01T12:00:00.123Z",
            "success": false
        }))
        .unwrap();

        assert_eq!(entry.username, "bob");
        assert!(!entry.success);
    }
}

//! Flat JSON file backends.
//!
//! Each store owns one document: an object keyed by username for credentials
//! and an array for attempts. Documents are created empty at construction if
//! absent. Writes go to a sibling temporary file that is renamed over the
//! original, so readers never observe a half-written document.

use super::{AttemptEntry, AttemptLog, CredentialRecord, CredentialStore, Credentials, Result, StoreError};
use serde::{Serialize, de::DeserializeOwned};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};
use tracing::{debug, instrument};

#[derive(Debug)]
struct JsonDocument {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonDocument {
    fn open<T: Serialize + Default>(path: PathBuf) -> Result<Self> {
        let document = Self {
            path,
            lock: Mutex::new(()),
        };

        if !document.path.exists() {
            if let Some(parent) = document.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
            }
            document.write(&T::default())?;
            debug!(path = %document.path.display(), "created empty document");
        }

        Ok(document)
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock.lock().map_err(|_| StoreError::Poisoned)
    }

    fn read<T: DeserializeOwned + Default>(&self) -> Result<T> {
        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        if raw.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let body = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        let tmp = tmp_path(&self.path);
        fs::write(&tmp, body).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Credential store backed by a single JSON object document.
#[derive(Debug)]
pub struct JsonCredentialStore {
    document: JsonDocument,
}

impl JsonCredentialStore {
    /// Open the document at `path`, creating `{}` if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file or its parent directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            document: JsonDocument::open::<Credentials>(path.into())?,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.document.path
    }
}

impl CredentialStore for JsonCredentialStore {
    fn load(&self) -> Result<Credentials> {
        let _guard = self.document.guard()?;
        self.document.read()
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        let _guard = self.document.guard()?;
        self.document.write(credentials)
    }

    #[instrument(skip_all, fields(username = %record.username))]
    fn insert_if_absent(&self, record: CredentialRecord) -> Result<bool> {
        let _guard = self.document.guard()?;
        let mut credentials: Credentials = self.document.read()?;

        if credentials.contains_key(&record.username) {
            return Ok(false);
        }

        credentials.insert(record.username.clone(), record);
        self.document.write(&credentials)?;

        Ok(true)
    }
}

/// Attempt log backed by a single JSON array document.
#[derive(Debug)]
pub struct JsonAttemptLog {
    document: JsonDocument,
}

impl JsonAttemptLog {
    /// Open the document at `path`, creating `[]` if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file or its parent directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            document: JsonDocument::open::<Vec<AttemptEntry>>(path.into())?,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.document.path
    }
}

impl AttemptLog for JsonAttemptLog {
    fn load(&self) -> Result<Vec<AttemptEntry>> {
        let _guard = self.document.guard()?;
        self.document.read()
    }

    fn save(&self, entries: &[AttemptEntry]) -> Result<()> {
        let _guard = self.document.guard()?;
        self.document.write(entries)
    }

    fn append(&self, entry: AttemptEntry) -> Result<()> {
        let _guard = self.document.guard()?;
        let mut entries: Vec<AttemptEntry> = self.document.read()?;
        entries.push(entry);
        self.document.write(&entries)
    }
}

//! In-memory stores for tests.

use super::{AttemptEntry, AttemptLog, CredentialRecord, CredentialStore, Credentials, Result, StoreError};
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credentials: Mutex<Credentials>,
    loads: AtomicUsize,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the store has been read, including reads done by
    /// `get` and `insert_if_absent`.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Credentials> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let credentials = self.credentials.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(credentials.clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        let mut current = self.credentials.lock().map_err(|_| StoreError::Poisoned)?;
        *current = credentials.clone();
        Ok(())
    }

    fn insert_if_absent(&self, record: CredentialRecord) -> Result<bool> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let mut credentials = self.credentials.lock().map_err(|_| StoreError::Poisoned)?;
        if credentials.contains_key(&record.username) {
            return Ok(false);
        }
        credentials.insert(record.username.clone(), record);
        Ok(true)
    }

    fn get(&self, username: &str) -> Result<Option<CredentialRecord>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let credentials = self.credentials.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(credentials.get(username).cloned())
    }
}

#[derive(Debug, Default)]
pub struct MemoryAttemptLog {
    entries: Mutex<Vec<AttemptEntry>>,
}

impl MemoryAttemptLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttemptLog for MemoryAttemptLog {
    fn load(&self) -> Result<Vec<AttemptEntry>> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.clone())
    }

    fn save(&self, entries: &[AttemptEntry]) -> Result<()> {
        let mut current = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        *current = entries.to_vec();
        Ok(())
    }

    fn append(&self, entry: AttemptEntry) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.push(entry);
        Ok(())
    }
}

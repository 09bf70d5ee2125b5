//! Business logic services
//!
//! [`Library`] owns the whole [`LibraryState`] together with the storage it
//! came from. Every mutating operation validates first, changes memory, then
//! rewrites the data file once. If that final save fails the error is
//! returned but the in-memory change is kept; callers should tell the
//! operator the last change may not be on disk.

pub mod catalog;
pub mod loans;
pub mod users;

use crate::{
    error::AppResult,
    repository::{ConsistencyIssue, LibraryState, Storage},
};

/// The library: in-memory state plus the file it persists to
#[derive(Debug)]
pub struct Library {
    state: LibraryState,
    storage: Storage,
}

impl Library {
    /// Load the state from `storage`, or start empty if the file is absent
    pub fn open(storage: Storage) -> AppResult<Self> {
        let state = storage.load()?;
        for issue in state.check() {
            tracing::warn!("Inconsistent data in {}: {}", storage.path().display(), issue);
        }
        tracing::info!(
            "Opened library at {} ({} books, {} users)",
            storage.path().display(),
            state.catalog.len(),
            state.membership.len()
        );
        Ok(Self { state, storage })
    }

    /// Wrap an existing state without touching the file
    pub fn with_state(state: LibraryState, storage: Storage) -> Self {
        Self { state, storage }
    }

    pub fn state(&self) -> &LibraryState {
        &self.state
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn check(&self) -> Vec<ConsistencyIssue> {
        self.state.check()
    }

    fn persist(&self) -> AppResult<()> {
        self.storage.save(&self.state).inspect_err(|e| {
            tracing::error!("Failed to save library state: {}", e);
        })
    }
}

//! The client-local storage slot behind the draft store.
//!
//! One slot holds one serialized draft. The trait keeps the store
//! testable and lets the same code run against an in-process slot or a
//! file standing in for the browser's local storage. Slot operations
//! return `Result`; the store above is what decides to drop the error
//! channel, so the never-throws contract stays auditable.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Slot read failed: {0}")]
    Read(String),

    #[error("Slot write failed: {0}")]
    Write(String),
}

/// A single key/value slot for the serialized draft.
pub trait DraftSlot: Send + Sync {
    /// Returns the stored payload, or `None` when nothing was ever stored.
    fn load(&self) -> Result<Option<String>, StoreError>;

    fn save(&self, payload: &str) -> Result<(), StoreError>;
}

/// In-process slot. The default for tests and single-surface embedding.
#[derive(Debug, Default)]
pub struct MemorySlot {
    payload: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftSlot for MemorySlot {
    fn load(&self) -> Result<Option<String>, StoreError> {
        let guard = self.payload.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn save(&self, payload: &str) -> Result<(), StoreError> {
        let mut guard = self.payload.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(payload.to_string());
        Ok(())
    }
}

/// File-backed slot: one JSON file on disk, read whole and replaced
/// whole, matching the whole-object replacement semantics of the store.
#[derive(Debug)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DraftSlot for FileSlot {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read(e.to_string())),
        }
    }

    fn save(&self, payload: &str) -> Result<(), StoreError> {
        fs::write(&self.path, payload).map_err(|e| StoreError::Write(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn memory_slot_round_trips() {
        let slot = MemorySlot::new();

        assert_eq!(slot.load().unwrap(), None);
        slot.save("{\"baseRate\":723}").unwrap();
        assert_eq!(slot.load().unwrap().as_deref(), Some("{\"baseRate\":723}"));
    }

    #[test]
    fn file_slot_missing_file_is_empty_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("draft.json"));

        assert_eq!(slot.load().unwrap(), None);
    }

    #[test]
    fn file_slot_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("draft.json"));

        slot.save("{\"restaurantName\":\"Taqueria Norte\"}").unwrap();
        assert_eq!(
            slot.load().unwrap().as_deref(),
            Some("{\"restaurantName\":\"Taqueria Norte\"}")
        );
    }
}

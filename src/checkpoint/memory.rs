//! In-memory checkpoint store.
//!
//! Holds the serialized record, so loads go through the same JSON path as
//! the file store. Clones share one slot, which lets a caller keep a handle
//! while the controller owns another.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::CheckpointStore;
use crate::error::{Error, Result};
use crate::model::Checkpoint;

#[derive(Debug, Clone, Default)]
pub struct MemoryCheckpointStore {
    slot: Arc<Mutex<Option<String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryCheckpointStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-serialized content, valid or not.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let store = Self::new();
        *store.lock() = Some(raw.into());
        store
    }

    /// Current serialized content, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.lock().clone()
    }

    /// Make every subsequent `save` and `delete` fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(Error::Io(std::io::Error::other("checkpoint store is read-only")));
        }
        Ok(())
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    fn has(&self) -> bool {
        self.lock().is_some()
    }

    fn load(&self) -> Result<Option<Checkpoint>> {
        match self.lock().as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, checkpoint: &Checkpoint) -> Result<()> {
        self.check_writable()?;
        let raw = serde_json::to_string(checkpoint)?;
        *self.lock() = Some(raw);
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        self.check_writable()?;
        *self.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_slot() {
        let mut store = MemoryCheckpointStore::new();
        let observer = store.clone();

        let cp = Checkpoint::new(vec!["x".to_string()], vec![]);
        store.save(&cp).unwrap();

        assert!(observer.has());
        assert_eq!(observer.load().unwrap().unwrap(), cp);

        store.delete().unwrap();
        assert!(!observer.has());
    }

    #[test]
    fn test_saved_record_uses_persisted_field_names() {
        let mut store = MemoryCheckpointStore::new();
        assert_eq!(store.raw(), None);

        store
            .save(&Checkpoint::new(vec!["u".to_string()], vec!["f".to_string()]))
            .unwrap();

        let raw = store.raw().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["lastStep"], "unfollow");
        assert_eq!(value["usersToUnfollow"], serde_json::json!(["u"]));
        assert_eq!(value["usersToFollow"], serde_json::json!(["f"]));
        assert_eq!(value["unfollowIndex"], 0);
    }

    #[test]
    fn test_failing_writes() {
        let mut store = MemoryCheckpointStore::new();
        store.set_fail_writes(true);
        let cp = Checkpoint::new(vec![], vec![]);
        assert!(store.save(&cp).is_err());
        assert!(!store.has());
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let store = MemoryCheckpointStore::with_raw("not json");
        assert!(store.has());
        assert!(store.load().is_err());
    }
}

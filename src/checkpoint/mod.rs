//! Checkpoint persistence.
//!
//! The controller only sees the [`CheckpointStore`] capability
//! (`has`, `load`, `save`, `delete`). Two backends ship with the crate:
//!
//! - [`FileCheckpointStore`]: one JSON file, replaced atomically on save
//! - [`MemoryCheckpointStore`]: in-process slot, shareable between handles
//!
//! Stores are whole-record overwrite. A save never leaves a partially
//! written record behind.

mod file;
mod memory;

pub use file::FileCheckpointStore;
pub use memory::MemoryCheckpointStore;

use crate::error::Result;
use crate::model::Checkpoint;

/// Durable storage for a single checkpoint record.
pub trait CheckpointStore {
    /// Whether a record is present. This is the resume signal.
    fn has(&self) -> bool;

    /// Read the record.
    ///
    /// Returns `Ok(None)` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<Checkpoint>>;

    /// Replace the stored record with `checkpoint`, verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save(&mut self, checkpoint: &Checkpoint) -> Result<()>;

    /// Remove the record. Removing an absent record is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing record cannot be removed.
    fn delete(&mut self) -> Result<()>;
}

//! File-backed checkpoint store.
//!
//! Writes go to a sibling temp file, are synced to disk, then renamed over
//! the target. A crash mid-save leaves the previous checkpoint intact.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::CheckpointStore;
use crate::error::Result;
use crate::model::Checkpoint;

/// Checkpoint stored as pretty-printed JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn has(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> Result<Option<Checkpoint>> {
        if !self.has() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let checkpoint: Checkpoint = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), phase = %checkpoint.phase, "Loaded checkpoint");
        Ok(Some(checkpoint))
    }

    fn save(&mut self, checkpoint: &Checkpoint) -> Result<()> {
        let json = serde_json::to_string_pretty(checkpoint)?;
        let temp_path = self.temp_path();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(json.as_bytes())?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }

        fs::rename(&temp_path, &self.path)?;
        debug!(path = %self.path.display(), "Saved checkpoint");
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        if self.has() {
            fs::remove_file(&self.path)?;
            debug!(path = %self.path.display(), "Deleted checkpoint");
        }
        Ok(())
    }
}

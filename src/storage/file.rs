use super::StorageBackend;
use crate::io::paths::PathUtils;
use crate::{FunRunError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores each slot as `<data_dir>/<slot>.json`
#[derive(Debug, Clone)]
pub struct FileBackend {
    data_dir: PathBuf,
}

impl FileBackend {
    /// Create backend rooted at `data_dir`, creating the directory if needed
    pub fn new(data_dir: &Path) -> Result<Self> {
        if !data_dir.exists() {
            fs::create_dir_all(data_dir)?;
        }

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        if !PathUtils::is_valid_slot_name(key) {
            return Err(FunRunError::Storage(format!("Invalid slot name '{}'", key)));
        }
        Ok(self.data_dir.join(format!("{}.json", key)))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        debug!(slot = key, bytes = content.len(), "Read slot");
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;

        // Write next to the target so the rename stays on one filesystem
        let mut tmp = tempfile::NamedTempFile::new_in(&self.data_dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| FunRunError::Io(e.error))?;

        debug!(slot = key, bytes = value.len(), "Wrote slot");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let path = self.slot_path(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
            debug!(slot = key, "Removed slot");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

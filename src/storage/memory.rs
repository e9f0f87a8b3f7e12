use super::StorageBackend;
use crate::Result;
use std::collections::HashMap;

/// In-process backend, nothing survives the process
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    slots: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots currently holding a value
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.slots.remove(key).is_some())
    }
}

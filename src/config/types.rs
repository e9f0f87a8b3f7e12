use crate::auth::{StaticCredentials, AUTH_SLOT};
use crate::export::DEFAULT_EXPORT_FILE;
use crate::io::FunRunPaths;
use crate::registry::store::REGISTRATIONS_SLOT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level `funrun.yaml` configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FunRunConfig {
    /// Directory holding storage slots, platform data dir when unset
    pub data_dir: Option<PathBuf>,
    pub storage: StorageConfig,
    /// Administrator credential pair
    pub admin: StaticCredentials,
    pub export: ExportConfig,
}

impl FunRunConfig {
    /// Data directory to use, falling back to the platform location
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| FunRunPaths::default().data_dir)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One JSON file per slot under the data directory
    #[default]
    File,
    /// Process memory only, for dry runs
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: BackendKind,
    pub registrations_slot: String,
    pub auth_slot: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::File,
            registrations_slot: REGISTRATIONS_SLOT.to_string(),
            auth_slot: AUTH_SLOT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File name used when `export` is run without `--output`
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_EXPORT_FILE.to_string(),
        }
    }
}

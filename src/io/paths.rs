use crate::{FunRunError, Result};
use directories::ProjectDirs;
use std::path::{Component, Path, PathBuf};

/// Path management for funrun configuration and data
#[derive(Debug, Clone)]
pub struct FunRunPaths {
    /// Configuration directory
    pub config_dir: PathBuf,
    /// Directory holding the storage slots
    pub data_dir: PathBuf,
}

impl FunRunPaths {
    /// Create new paths instance using standard directories
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "funrun").ok_or_else(|| {
            FunRunError::Config("Failed to determine project directories".to_string())
        })?;

        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Create paths for a specific project directory
    pub fn for_project(project_root: &Path) -> Self {
        let config_dir = project_root.join(".funrun");
        let data_dir = config_dir.join("data");
        Self {
            config_dir,
            data_dir,
        }
    }

    /// Global configuration file path
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.yaml")
    }
}

impl Default for FunRunPaths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if platform directories fail
            let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            Self::for_project(&current_dir)
        })
    }
}

/// Utilities for working with paths
pub struct PathUtils;

impl PathUtils {
    /// Check if path is safe (no traversal attacks)
    pub fn is_safe_path(path: &Path) -> bool {
        !path
            .components()
            .any(|c| matches!(c, Component::ParentDir))
    }

    /// A slot name must map to exactly one file directly inside the data dir
    pub fn is_valid_slot_name(name: &str) -> bool {
        let path = Path::new(name);
        !name.is_empty()
            && Self::is_safe_path(path)
            && path.components().count() == 1
            && matches!(path.components().next(), Some(Component::Normal(_)))
    }
}

use super::types::FunRunConfig;
use crate::io::{FunRunPaths, PathUtils};
use crate::{FunRunError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-local configuration file name
pub const PROJECT_CONFIG_FILE: &str = "funrun.yaml";

/// Finds, parses and validates the configuration file
pub struct ConfigLoader {
    project_root: PathBuf,
    global_config: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader searching `project_root` and then the platform config dir
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            global_config: FunRunPaths::new().ok().map(|paths| paths.config_file()),
        }
    }

    /// Override the global config location
    pub fn with_global_config(mut self, path: Option<PathBuf>) -> Self {
        self.global_config = path;
        self
    }

    /// Load from an explicit path, or discover one, or fall back to defaults
    pub fn load(&self, explicit: Option<&Path>) -> Result<FunRunConfig> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(FunRunError::Config(format!(
                    "Config file {} not found",
                    path.display()
                )));
            }
            return self.load_file(path);
        }

        match self.discover() {
            Some(path) => self.load_file(&path),
            None => {
                debug!("No config file found, using defaults");
                Ok(FunRunConfig::default())
            }
        }
    }

    /// First existing config file in discovery order
    pub fn discover(&self) -> Option<PathBuf> {
        let project = self.project_root.join(PROJECT_CONFIG_FILE);
        if project.exists() {
            return Some(project);
        }

        self.global_config.clone().filter(|path| path.exists())
    }

    /// Parse and validate one config file
    pub fn load_file(&self, path: &Path) -> Result<FunRunConfig> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            FunRunError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        // An empty file means "all defaults"
        let config: FunRunConfig = if contents.trim().is_empty() {
            FunRunConfig::default()
        } else {
            serde_yaml_ng::from_str(&contents).map_err(|e| {
                FunRunError::Config(format!(
                    "Failed to parse config file {}: {}",
                    path.display(),
                    e
                ))
            })?
        };

        Self::validate(&config)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn validate(config: &FunRunConfig) -> Result<()> {
        let storage = &config.storage;

        for (field, slot) in [
            ("registrations_slot", &storage.registrations_slot),
            ("auth_slot", &storage.auth_slot),
        ] {
            if !PathUtils::is_valid_slot_name(slot) {
                return Err(FunRunError::Config(format!(
                    "storage.{} '{}' is not a valid slot name",
                    field, slot
                )));
            }
        }

        if storage.registrations_slot == storage.auth_slot {
            return Err(FunRunError::Config(
                "storage.registrations_slot and storage.auth_slot must differ".to_string(),
            ));
        }

        if config.admin.username.trim().is_empty() {
            return Err(FunRunError::Config(
                "admin.username must not be empty".to_string(),
            ));
        }

        if config.export.file_name.trim().is_empty() {
            return Err(FunRunError::Config(
                "export.file_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

//! Panel options persistence

use anyhow::{Context, Result};
use imageit_types::PanelOptions;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Reads and writes panel options as pretty JSON
#[derive(Debug, Clone)]
pub struct OptionsStore {
    path: PathBuf,
}

impl OptionsStore {
    /// Store at the platform config location
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: Self::default_path()?,
        })
    }

    /// Store at a specific file path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `path` if given, otherwise at the platform config location
    pub fn at_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Ok(Self::at(path)),
            None => Self::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the default options file path
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "imageit", "imageit")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("options.json"))
    }

    /// Load options; a missing file yields the defaults
    pub fn load(&self) -> Result<PanelOptions> {
        if !self.path.exists() {
            debug!("No options at {}, using defaults", self.path.display());
            return Ok(PanelOptions::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let options = serde_json::from_str(&content)
            .with_context(|| format!("Invalid panel options in {}", self.path.display()))?;
        Ok(options)
    }

    /// Save options, replacing whatever was stored before
    pub fn save(&self, options: &PanelOptions) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(options)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        info!("Saved options to {}", self.path.display());
        Ok(())
    }
}

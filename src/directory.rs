use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Standard .devtips directory name
pub const DEVTIPS_DIR: &str = ".devtips";

/// Settings file name
pub const CONFIG_FILE: &str = "config.json";

/// Tips file name
pub const TIPS_FILE: &str = "tips.json";

/// Represents a .devtips storage directory and the files inside it
#[derive(Debug, Clone, PartialEq)]
pub struct DevtipsDirectory {
    /// Root path of the storage directory
    pub root: PathBuf,

    /// Path to config.json
    pub config_file: PathBuf,

    /// Path to tips.json
    pub tips_file: PathBuf,
}

impl DevtipsDirectory {
    /// Create a new DevtipsDirectory from a root path
    pub fn new(root: PathBuf) -> Self {
        let config_file = root.join(CONFIG_FILE);
        let tips_file = root.join(TIPS_FILE);

        Self {
            root,
            config_file,
            tips_file,
        }
    }

    /// Check if the storage directory exists
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Check if config.json exists
    pub fn has_config(&self) -> bool {
        self.config_file.is_file()
    }

    /// Check if tips.json exists
    pub fn has_tips(&self) -> bool {
        self.tips_file.is_file()
    }

    /// Create the directory (and any missing parents). Succeeds if it already exists.
    pub fn create(&self) -> Result<()> {
        if self.exists() {
            debug!("Storage directory already present: {}", self.root.display());
            return Ok(());
        }

        info!("Creating storage directory at: {}", self.root.display());
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create directory: {}", self.root.display()))?;

        Ok(())
    }
}

/// Get the global .devtips directory (in user's home directory)
pub fn global_devtips_dir() -> Result<DevtipsDirectory> {
    let home_dir = dirs::home_dir().context("Failed to get home directory")?;
    Ok(DevtipsDirectory::new(home_dir.join(DEVTIPS_DIR)))
}

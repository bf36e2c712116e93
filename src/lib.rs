pub mod config_manager;
pub mod directory;
pub mod persistence;

// Re-export commonly used types
pub use config_manager::{ConfigManager, Settings, Tips};
pub use directory::{global_devtips_dir, DevtipsDirectory};

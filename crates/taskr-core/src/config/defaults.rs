//! Default values for taskr configuration.

// ============================================================================
// Storage Defaults
// ============================================================================

/// Default task file, relative to the working directory.
pub const DEFAULT_TASKS_FILE: &str = "tasks.txt";

// ============================================================================
// Config File Locations
// ============================================================================

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "taskr.toml";

/// Subdirectory of the user config dir holding `config.toml`.
pub const USER_CONFIG_DIR: &str = "taskr";

/// User config file name.
pub const USER_CONFIG_FILE: &str = "config.toml";

// ============================================================================
// Environment Overrides
// ============================================================================

/// Overrides `storage.file`.
pub const ENV_TASKS_FILE: &str = "TASKR_FILE";

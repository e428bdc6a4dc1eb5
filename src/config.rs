use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::conventional::DEFAULT_COMMIT_TYPES;
use crate::error::{BumpError, Result};

/// File name looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "conventional-bump.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE_NAME: &str = ".conventional-bump.toml";

/// Represents the complete configuration for conventional-bump.
///
/// Contains file locations, the optional sync command and commit validation settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

fn default_version_file() -> PathBuf {
    PathBuf::from("VERSION")
}

fn default_changelog_file() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

/// Locations of the files rewritten by a bump.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilesConfig {
    #[serde(default = "default_version_file")]
    pub version: PathBuf,

    #[serde(default = "default_changelog_file")]
    pub changelog: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            version: default_version_file(),
            changelog: default_changelog_file(),
        }
    }
}

/// External command that propagates the new version to other project files.
///
/// The command is an argv list; `--version-file <path>` is appended when it runs.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct SyncConfig {
    #[serde(default)]
    pub command: Option<Vec<String>>,
}

fn default_base_branch() -> String {
    "main".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_commit_types() -> Vec<String> {
    DEFAULT_COMMIT_TYPES.iter().map(|t| t.to_string()).collect()
}

/// Settings for commit message validation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ValidationConfig {
    #[serde(default = "default_base_branch")]
    pub base_branch: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_commit_types")]
    pub types: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            base_branch: default_base_branch(),
            remote: default_remote(),
            types: default_commit_types(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `conventional-bump.toml` in current directory
/// 3. `.conventional-bump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or an explicit path is missing
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    if let Some(path) = config_path {
        return read_config_file(Path::new(path));
    }

    let local = Path::new(CONFIG_FILE_NAME);
    if local.exists() {
        return read_config_file(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(USER_CONFIG_FILE_NAME);
        if user_config.exists() {
            return read_config_file(&user_config);
        }
    }

    tracing::debug!("no configuration file found, using defaults");
    Ok(Config::default())
}

fn read_config_file(path: &Path) -> Result<Config> {
    tracing::debug!(path = %path.display(), "loading configuration");

    let config_str = fs::read_to_string(path).map_err(|e| {
        BumpError::config(format!("Cannot read '{}': {}", path.display(), e))
    })?;

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| BumpError::config(format!("Cannot parse '{}': {}", path.display(), e)))?;

    if config.validation.types.is_empty() {
        return Err(BumpError::config(format!(
            "'{}': validation.types must not be empty",
            path.display()
        )));
    }

    if matches!(&config.sync.command, Some(command) if command.is_empty()) {
        return Err(BumpError::config(format!(
            "'{}': sync.command must name a program",
            path.display()
        )));
    }

    Ok(config)
}

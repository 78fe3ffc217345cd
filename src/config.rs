//! User configuration in `<config_dir>/forge-push/config.toml`
//!
//! ```toml
//! [gitlab]
//! url = "https://gitlab.example.com"
//! token = "glpat-..."
//!
//! [github]
//! token = "ghp_..."
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "FORGE_PUSH_CONFIG";

/// Directory name within the platform config dir
const CONFIG_DIR: &str = "forge-push";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

/// Parsed configuration file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// GitLab settings
    #[serde(default)]
    pub gitlab: ForgeSettings,
    /// GitHub settings
    #[serde(default)]
    pub github: ForgeSettings,
}

/// Per-forge settings
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ForgeSettings {
    /// API base URL override
    pub url: Option<String>,
    /// Access token
    pub token: Option<String>,
}

impl std::fmt::Debug for ForgeSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForgeSettings")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Location of the config file
///
/// `$FORGE_PUSH_CONFIG` wins; otherwise the platform config dir is used.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load configuration from `path`
///
/// Returns an empty `Config` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Load configuration from the default location
pub fn load_default_config() -> Result<Config> {
    config_path().map_or_else(|| Ok(Config::default()), |path| load_config(&path))
}

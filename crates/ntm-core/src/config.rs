use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use ntm_util::errors::NtmError;
use ntm_util::fs::find_ancestor_with;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "ntm.toml";

/// Options controlling how modules are resolved and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranspileOptions {
    /// Follow symbolic links to a package's real location.
    #[serde(default = "default_resolve_symlinks", rename = "resolve-symlinks")]
    pub resolve_symlinks: bool,
    /// Report every transpiled file and the resolved roots.
    #[serde(default)]
    pub debug: bool,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            resolve_symlinks: default_resolve_symlinks(),
            debug: false,
        }
    }
}

fn default_resolve_symlinks() -> bool {
    true
}

/// Project configuration loaded from `ntm.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Packages to transpile.
    #[serde(default)]
    pub modules: Vec<String>,

    #[serde(flatten)]
    pub options: TranspileOptions,
}

impl ProjectConfig {
    /// Parse configuration from TOML text.
    pub fn parse_toml(content: &str) -> Result<Self, NtmError> {
        toml::from_str(content).map_err(|e| NtmError::Config {
            message: format!("Failed to parse {CONFIG_FILE}: {e}"),
        })
    }

    /// Load the configuration at `path`, or return defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, NtmError> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| NtmError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse_toml(&content)
    }

    /// Find `ntm.toml` in `start` or one of its ancestors.
    pub fn find(start: &Path) -> Option<PathBuf> {
        find_ancestor_with(start, CONFIG_FILE).map(|dir| dir.join(CONFIG_FILE))
    }

    /// Find and load the nearest `ntm.toml`, falling back to defaults.
    pub fn discover(start: &Path) -> Result<Self, NtmError> {
        match Self::find(start) {
            Some(path) => {
                tracing::debug!("using configuration at {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

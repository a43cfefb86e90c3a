//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/looptree/looptree.toml`
//! 3. Local config: `--config <file>` or `./.looptree.toml`
//! 4. Environment variables: `LOOPTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// File name of the local config, looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".looptree.toml";

/// Unified configuration for looptree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Member of the top-level document holding the root node (default: "root")
    pub document_key: String,
    /// Deepest allowed nesting, root counts as 1 (default: unlimited)
    pub max_depth: Option<usize>,
    /// Reject repeated node names instead of letting the last one win
    pub reject_duplicate_names: bool,
    /// Suffix shown after loop parents in rendered trees
    pub loop_marker: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            document_key: "root".into(),
            max_depth: None,
            reject_duplicate_names: false,
            loop_marker: "↻".into(),
        }
    }
}

/// Raw settings for intermediate parsing.
///
/// `None` means "not specified in this layer, inherit from below".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub document_key: Option<String>,
    pub max_depth: Option<usize>,
    pub reject_duplicate_names: Option<bool>,
    pub loop_marker: Option<String>,
}

/// Get the XDG config directory for looptree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "looptree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("looptree.toml"))
}

/// Get the path to the local config file in `dir`.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_FILE)
}

/// Expand `~`, `$VAR` and `${VAR}` in a path; unresolvable paths are returned unchanged.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins where it is Some.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            document_key: overlay
                .document_key
                .clone()
                .unwrap_or_else(|| self.document_key.clone()),
            max_depth: overlay.max_depth.or(self.max_depth),
            reject_duplicate_names: overlay
                .reject_duplicate_names
                .unwrap_or(self.reject_duplicate_names),
            loop_marker: overlay
                .loop_marker
                .clone()
                .unwrap_or_else(|| self.loop_marker.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional local config file; it must exist when given
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Local config
        if let Some(local) = local {
            let local_path = expand_path(local);
            if !local_path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", local_path.display()),
                });
            }
            debug!("load: local config {}", local_path.display());
            current = current.merge_with(&load_raw_settings(&local_path)?);
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current)
    }

    /// Apply LOOPTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                // LOOPTREE_MAX_DEPTH -> max_depth; "__" is reserved for nested keys
                Environment::with_prefix("LOOPTREE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value::<String>(&config, "document_key")? {
            settings.document_key = val;
        }
        if let Some(val) = env_value::<usize>(&config, "max_depth")? {
            settings.max_depth = Some(val);
        }
        if let Some(val) = env_value::<bool>(&config, "reject_duplicate_names")? {
            settings.reject_duplicate_names = val;
        }
        if let Some(val) = env_value::<String>(&config, "loop_marker")? {
            settings.loop_marker = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# looptree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/looptree/looptree.toml
#   Local:  ./.looptree.toml or --config <file>
#   Env:    LOOPTREE_* environment variables (explicit overrides)

# Member of the top-level document that holds the root node
# document_key = "root"

# Deepest allowed nesting, the root node counts as level 1
# max_depth = 64

# Reject repeated node names (default: the last occurrence wins)
# reject_duplicate_names = false

# Suffix shown after nodes that have loop children
# loop_marker = "↻"
"#
        .to_string()
    }
}

/// A missing key is not an error; a value of the wrong type is.
fn env_value<T: DeserializeOwned>(config: &Config, key: &str) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treeplan/treeplan.toml`
//! 3. Local config: `<dir>/.treeplan.toml`
//! 4. Environment variables: `TREEPLAN_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Layout used when no structure file is given.
pub const DEFAULT_STRUCTURE: &str = "\
.
├── Core
├── Docs
│   └── API
├── GUI
├── LICENSE
├── Models
├── README.md
├── requirements.txt
├── Scripts
├── SysUtils
├── Tests
└── Utils
";

/// Name of the local config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".treeplan.toml";

/// Raw settings for intermediate parsing.
///
/// `None` means "not specified in this layer, inherit".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub projects_dir: Option<PathBuf>,
    pub default_structure: Option<String>,
}

/// Unified configuration for treeplan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Parent directory for `treeplan new` (default: ~/Projects)
    pub projects_dir: PathBuf,
    /// Tree text used when no structure file is given
    pub default_structure: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            projects_dir: default_projects_dir(),
            default_structure: DEFAULT_STRUCTURE.to_string(),
        }
    }
}

fn default_projects_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join("Projects"))
        .unwrap_or_else(|| PathBuf::from("~/Projects"))
}

/// Get the XDG config directory for treeplan.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treeplan").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treeplan.toml"))
}

/// Get the path to the local config file in a working directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_FILE)
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
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.projects_dir.to_string_lossy().as_ref());
        self.projects_dir = PathBuf::from(expanded);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            projects_dir: overlay
                .projects_dir
                .clone()
                .unwrap_or_else(|| self.projects_dir.clone()),
            default_structure: overlay
                .default_structure
                .clone()
                .unwrap_or_else(|| self.default_structure.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional working directory holding `.treeplan.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply TREEPLAN_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TREEPLAN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("projects_dir") {
            settings.projects_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("default_structure") {
            settings.default_structure = val;
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
        format!(
            r#"# treeplan configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/treeplan/treeplan.toml
#   Local:  <dir>/.treeplan.toml
#   Env:    TREEPLAN_PROJECTS_DIR, TREEPLAN_DEFAULT_STRUCTURE

# Parent directory for `treeplan new`
# projects_dir = "~/Projects"

# Layout used when no --structure file is given
default_structure = """
{}"""
"#,
            DEFAULT_STRUCTURE
        )
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

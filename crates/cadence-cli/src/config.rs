//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use cadence_core::SlotSearchConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the JSON plan file holding availability, sessions and session types.
    pub plan_path: PathBuf,

    /// Slot search defaults, overridable per invocation.
    #[serde(default)]
    pub search: SlotSearchConfig,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("plan_path", &self.plan_path)
            .field("search", &self.search)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            plan_path: data_dir.join("plan.json"),
            search: SlotSearchConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (CADENCE_*, nested keys split on __)
        figment = figment.merge(Env::prefixed("CADENCE_").split("__"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for cadence.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("cadence"))
}

/// Returns the platform-specific data directory for cadence.
///
/// On Linux: `~/.local/share/cadence`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("cadence"))
}

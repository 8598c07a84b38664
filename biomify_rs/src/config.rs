//! Configuration file support for biomify.
//!
//! Loads optional `.biomify.toml` from the project root.

use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use crate::biome_config::DEFAULT_BIOME_VERSION;

pub const CONFIG_FILE: &str = ".biomify.toml";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BiomifyConfig {
    /// Biome release to install and pin the schema to
    pub biome_version: String,
    pub defaults: PromptDefaults,
}

/// Pre-set answers for the interactive questions.
///
/// `None` means "ask". Command-line flags take precedence over these.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct PromptDefaults {
    /// Uninstall ESLint/Prettier and delete their configuration
    pub remove_legacy: Option<bool>,
    /// Strip ESLint directive comments from sources
    pub strip_comments: Option<bool>,
}

impl Default for BiomifyConfig {
    fn default() -> Self {
        Self {
            biome_version: DEFAULT_BIOME_VERSION.to_string(),
            defaults: PromptDefaults::default(),
        }
    }
}

impl BiomifyConfig {
    /// Load config from `.biomify.toml` in the given root directory.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        Self::load_from_path(&root.join(CONFIG_FILE))
    }

    /// Load config from a specific path.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(config) if config.biome_version.trim().is_empty() => {
                    warn!("{}: empty biome_version, using default", path.display());
                    Self {
                        biome_version: DEFAULT_BIOME_VERSION.to_string(),
                        ..config
                    }
                }
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

//! Configuration for the criteria codec.
//!
//! Config directory resolution order:
//! 1. Explicit path passed to `Config::load_from()`
//! 2. CQ_CONFIG_DIR environment variable
//! 3. Default: platform config directory (e.g. ~/.config/cq)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Name of the config file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_VAR: &str = "CQ_CONFIG_DIR";

/// Codec configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pagination: PageConfig,

    #[serde(default)]
    pub similarity: SimilarityConfig,
}

/// Page sizes a bulk-mode URL may request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_page_sizes")]
    pub page_sizes: Vec<u32>,

    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

/// Result-count limits a similarity search may request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityConfig {
    #[serde(default = "default_similarity_limits")]
    pub limits: Vec<u32>,

    #[serde(default = "default_similarity_limit")]
    pub default_limit: u32,
}

fn default_page_sizes() -> Vec<u32> {
    vec![1, 10, 20, 50, 100]
}

fn default_page_size() -> u32 {
    10
}

fn default_similarity_limits() -> Vec<u32> {
    vec![50, 100, 200, 300, 400]
}

fn default_similarity_limit() -> u32 {
    50
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            page_sizes: default_page_sizes(),
            default_page_size: default_page_size(),
        }
    }
}

impl PageConfig {
    /// Resolve a requested page size against the allow-list.
    pub fn resolve(&self, many: Option<u32>) -> u32 {
        match many {
            Some(many) if self.page_sizes.contains(&many) => many,
            _ => self.default_page_size,
        }
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            limits: default_similarity_limits(),
            default_limit: default_similarity_limit(),
        }
    }
}

impl SimilarityConfig {
    /// Resolve a requested limit against the allow-list.
    pub fn resolve(&self, limit: Option<u32>) -> u32 {
        match limit {
            Some(limit) if self.limits.contains(&limit) => limit,
            _ => self.default_limit,
        }
    }
}

impl Config {
    /// Load config from the resolved config directory, or use defaults.
    pub fn load() -> Result<Self> {
        match resolve_config_dir() {
            Some(dir) => Self::load_from(&dir),
            None => Ok(Self::default()),
        }
    }

    /// Load config from `<dir>/config.toml`, or use defaults if absent.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents).map_err(|e| Error::ConfigFile {
            path: config_path.clone(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to `<dir>/config.toml`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        self.validate()?;
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join(CONFIG_FILE), contents)?;
        Ok(())
    }

    /// Check that every default is a member of its allow-list.
    pub fn validate(&self) -> Result<()> {
        check_allow_list(
            "pagination.page_sizes",
            &self.pagination.page_sizes,
            self.pagination.default_page_size,
        )?;
        check_allow_list(
            "similarity.limits",
            &self.similarity.limits,
            self.similarity.default_limit,
        )
    }

    /// Render the config as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }
}

fn check_allow_list(field: &str, allowed: &[u32], default: u32) -> Result<()> {
    if allowed.is_empty() {
        return Err(Error::Config(format!("{} must not be empty", field)));
    }
    if allowed.contains(&0) {
        return Err(Error::Config(format!("{} must not contain 0", field)));
    }
    if !allowed.contains(&default) {
        return Err(Error::Config(format!(
            "default {} is not one of {} {:?}",
            default, field, allowed
        )));
    }
    Ok(())
}

/// Resolve the config directory using the standard resolution order.
pub fn resolve_config_dir() -> Option<PathBuf> {
    // 1. Environment variable
    if let Ok(path) = std::env::var(CONFIG_DIR_VAR) {
        return Some(PathBuf::from(path));
    }

    // 2. Platform config directory (via directories crate)
    ProjectDirs::from("", "", "cq").map(|dirs| dirs.config_dir().to_path_buf())
}

//! Application configuration, loadable from TOML

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    Error, Result,
    tree::{DEFAULT_MAX_NODES, PrunePolicy},
};

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tree: TreeConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Tree construction settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// What to do with branches that allow an immediate opponent win
    pub prune: PrunePolicy,

    /// Node budget; building past it fails with an allocation error
    pub max_nodes: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            prune: PrunePolicy::default(),
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

/// Terminal rendering settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Color board cells with ANSI escapes
    pub color: bool,

    /// Print the rank of each machine candidate before it moves
    pub show_ranks: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_ranks: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter level when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config file {}", path.display()),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.tree.max_nodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "tree.max_nodes must be > 0".to_string(),
            });
        }
        let level = self.logging.level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "logging.level '{}' is not one of {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tree.prune, PrunePolicy::Detach);
        assert_eq!(config.tree.max_nodes, DEFAULT_MAX_NODES);
        assert!(config.display.color);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [tree]
            prune = "reclaim"
            "#,
        )
        .unwrap();
        assert_eq!(config.tree.prune, PrunePolicy::Reclaim);
        assert_eq!(config.tree.max_nodes, DEFAULT_MAX_NODES);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn zero_node_budget_is_rejected() {
        let err = AppConfig::from_toml("[tree]\nmax_nodes = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_nodes"));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = AppConfig::from_toml("[logging]\nlevel = \"loud\"\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }

    #[test]
    fn unknown_prune_policy_fails_to_parse() {
        let err = AppConfig::from_toml("[tree]\nprune = \"sometimes\"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }
}

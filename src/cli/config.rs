//! Configuration options shared by every subcommand

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::{config::AppConfig, tree::PrunePolicy};

/// File read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "tictree.toml";

/// Config file location plus the tree settings that can be overridden from
/// the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a TOML config file (defaults to ./tictree.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Immediate-loss pruning policy (off, detach, reclaim)
    #[arg(long, global = true)]
    pub prune: Option<PrunePolicy>,

    /// Maximum number of live tree nodes
    #[arg(long, global = true)]
    pub max_nodes: Option<usize>,
}

impl ConfigArgs {
    /// Load the config file and apply command-line overrides on top of it.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => AppConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
        };

        if let Some(prune) = self.prune {
            config.tree.prune = prune;
        }
        if let Some(max_nodes) = self.max_nodes {
            config.tree.max_nodes = max_nodes;
        }
        config.validate()?;
        Ok(config)
    }
}

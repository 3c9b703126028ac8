//! Subcommand implementations.

pub mod init;
pub mod lint;
pub mod list_rules;
pub mod output;

use anyhow::{Context, Result};
use oaslint_core::Config;

use crate::config_resolver::ConfigSource;

/// Loads the configuration a resolved source points at.
pub fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

//! Configuration file resolution with global fallback.
//!
//! Resolution order:
//!
//! 1. `--config` flag or `$OASLINT_CONFIG` (explicit path)
//! 2. `{dir}/oaslint.toml` or `{dir}/.oaslint.toml`
//! 3. `$OASLINT_CONFIG_DIR/config.toml` or `~/.oaslint/config.toml`
//! 4. No config found → defaults

use std::fmt;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config`.
    Explicit(PathBuf),
    /// Found in the working directory.
    Project(PathBuf),
    /// Loaded from the global config directory.
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "{} (explicit)", p.display()),
            Self::Project(p) => write!(f, "{}", p.display()),
            Self::Global(p) => write!(f, "{} (global)", p.display()),
            Self::Default => f.write_str("built-in defaults"),
        }
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["oaslint.toml", ".oaslint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file for documents linted from `dir`.
#[must_use]
pub fn resolve(dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    let source = resolve_in(dir, explicit, global_config_dir().as_deref());
    tracing::debug!("Configuration: {source}");
    source
}

fn resolve_in(dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|d| d.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

/// Returns the global config directory: `$OASLINT_CONFIG_DIR`, else
/// `~/.oaslint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("OASLINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".oaslint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_wins_and_is_not_checked() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("oaslint.toml"), "").unwrap();

        let result = resolve_in(project.path(), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(result, ConfigSource::Explicit(PathBuf::from("/nonexistent.toml")));
    }

    #[test]
    fn project_names_checked_in_order() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join(".oaslint.toml"), "").unwrap();
        assert_eq!(
            resolve_in(project.path(), None, None),
            ConfigSource::Project(project.path().join(".oaslint.toml"))
        );

        fs::write(project.path().join("oaslint.toml"), "").unwrap();
        assert_eq!(
            resolve_in(project.path(), None, None),
            ConfigSource::Project(project.path().join("oaslint.toml"))
        );
    }

    #[test]
    fn global_is_a_fallback() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        assert_eq!(resolve_in(project.path(), None, Some(global.path())), ConfigSource::Default);

        fs::write(global.path().join("config.toml"), "").unwrap();
        let result = resolve_in(project.path(), None, Some(global.path()));
        assert!(result.is_global());
        assert_eq!(result.path(), Some(global.path().join("config.toml").as_path()));

        fs::write(project.path().join("oaslint.toml"), "").unwrap();
        assert!(matches!(
            resolve_in(project.path(), None, Some(global.path())),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn display_names_the_origin() {
        assert_eq!(ConfigSource::Default.to_string(), "built-in defaults");
        assert_eq!(
            ConfigSource::Global(PathBuf::from("/home/u/.oaslint/config.toml")).to_string(),
            "/home/u/.oaslint/config.toml (global)"
        );
    }
}

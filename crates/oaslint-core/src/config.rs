//! Configuration types for oaslint.

use crate::ruleset::RuleOptions;
use crate::types::Severity;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for oaslint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset deciding which rules are enabled by default.
    #[serde(default)]
    pub preset: Option<Preset>,

    /// Severity threshold for failure (default: `error`).
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations, keyed by rule id.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Whether a rule is enabled, given its preset default.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_id: &str, default: bool) -> bool {
        self.rules
            .get(rule_id)
            .and_then(|c| c.enabled)
            .unwrap_or(default)
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_id: &str) -> Option<Severity> {
        self.rules.get(rule_id).and_then(|c| c.severity)
    }

    /// Gets the option overrides for a rule.
    #[must_use]
    pub fn rule_options(&self, rule_id: &str) -> RuleOptions {
        self.rules
            .get(rule_id)
            .map(RuleConfig::options)
            .unwrap_or_default()
    }

    /// The preset in effect (default: recommended).
    #[must_use]
    pub fn preset(&self) -> Preset {
        self.preset.unwrap_or_default()
    }

    /// Severity at or above which a run fails.
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Error)
    }
}

/// Named rule selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Rules marked as recommended.
    #[default]
    Recommended,
    /// Every rule.
    All,
    /// No rule unless enabled explicitly.
    Off,
}

impl Preset {
    /// Every preset.
    pub const ALL: [Self; 3] = [Self::Recommended, Self::All, Self::Off];

    /// Whether a rule starts enabled under this preset.
    #[must_use]
    pub fn enables(self, recommended: bool) -> bool {
        match self {
            Self::Recommended => recommended,
            Self::All => true,
            Self::Off => false,
        }
    }

    /// Preset name as written in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::All => "all",
            Self::Off => "off",
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "recommended" => Ok(Self::Recommended),
            "all" => Ok(Self::All),
            "off" => Ok(Self::Off),
            other => Err(format!("unknown preset `{other}`")),
        }
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Evaluate rules in parallel.
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Honor `x-lint-ignore` directives in documents.
    #[serde(default = "default_true")]
    pub honor_ignores: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            honor_ignores: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Options converted for the rule function.
    #[must_use]
    pub fn options(&self) -> RuleOptions {
        RuleOptions::from_toml(&self.options)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.parallel);
        assert!(config.analyzer.honor_ignores);
        assert!(config.rules.is_empty());
        assert_eq!(config.fail_on(), Severity::Error);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "all"
fail_on = "warning"

[analyzer]
parallel = false

[rules.operation-description]
enabled = true
severity = "info"
minWords = 3

[rules.info-contact]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset(), Preset::All);
        assert_eq!(config.fail_on(), Severity::Warning);
        assert!(!config.analyzer.parallel);
        assert!(config.analyzer.honor_ignores);
        assert!(config.is_rule_enabled("operation-description", false));
        assert!(!config.is_rule_enabled("info-contact", true));
        assert!(config.is_rule_enabled("unmentioned", true));
        assert_eq!(config.rule_severity("operation-description"), Some(Severity::Info));
        assert_eq!(
            config.rule_options("operation-description").get_usize("minWords"),
            Some(3)
        );
        assert!(config.rule_options("info-contact").is_empty());
    }

    #[test]
    fn presets_decide_default_enablement() {
        assert!(Preset::Recommended.enables(true));
        assert!(!Preset::Recommended.enables(false));
        assert!(Preset::All.enables(false));
        assert!(!Preset::Off.enables(true));
        assert_eq!("ALL".parse::<Preset>(), Ok(Preset::All));
        assert!("strict".parse::<Preset>().is_err());
        assert!(Config::parse("preset = \"strict\"").is_err());
    }

    #[test]
    fn rejects_invalid_toml() {
        let err = Config::parse("preset = ").expect_err("invalid toml");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("oaslint.toml");
        std::fs::write(&path, "fail_on = \"info\"\n").expect("write config");
        let config = Config::from_file(&path).expect("config loads");
        assert_eq!(config.fail_on(), Severity::Info);

        let missing = Config::from_file(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}

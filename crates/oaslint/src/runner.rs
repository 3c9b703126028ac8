//! Runner for linting OpenAPI documents from `cargo test`.
//!
//! Relative document and config paths are resolved against the workspace
//! root (or the crate root outside a workspace).

use oaslint_core::{Analyzer, Config, LintResult, Preset, Severity};
use std::path::{Path, PathBuf};

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["oaslint.toml", ".oaslint.toml"];

/// A lint run that panics with a report when findings reach `fail_on`.
///
/// ```rust,ignore
/// #[test]
/// fn openapi_is_clean() {
///     oaslint::Check::new("api/openapi.yaml")
///         .preset(oaslint::Preset::All)
///         .fail_on(oaslint::Severity::Warning)
///         .run();
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Check {
    document: PathBuf,
    preset: Option<Preset>,
    config: Option<PathBuf>,
    fail_on: Option<Severity>,
}

impl Check {
    /// Lints `document` with the project configuration.
    #[must_use]
    pub fn new(document: impl Into<PathBuf>) -> Self {
        Self {
            document: document.into(),
            preset: None,
            config: None,
            fail_on: None,
        }
    }

    /// Overrides the configured preset.
    #[must_use]
    pub fn preset(mut self, preset: Preset) -> Self {
        self.preset = Some(preset);
        self
    }

    /// Reads configuration from `path` instead of searching for it.
    #[must_use]
    pub fn config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = Some(path.into());
        self
    }

    /// Overrides the configured failure threshold.
    #[must_use]
    pub fn fail_on(mut self, severity: Severity) -> Self {
        self.fail_on = Some(severity);
        self
    }

    /// Runs the analysis and returns the result.
    ///
    /// # Panics
    ///
    /// Panics if the configuration or the document cannot be read, or if a
    /// finding at or above the failure threshold exists.
    #[must_use = "the result carries findings below the failure threshold"]
    pub fn run(self) -> LintResult {
        let root = find_project_root();
        let mut config = parse_config(&read_config_content(&root, self.config.as_deref()));
        if self.preset.is_some() {
            config.preset = self.preset;
        }
        let fail_on = self.fail_on.unwrap_or_else(|| config.fail_on());

        let document = absolutize(&root, &self.document);
        let analyzer = Analyzer::builder()
            .rules(oaslint_rules::builtin_rules())
            .config(config)
            .build();

        let result = analyzer.analyze_file(&document).unwrap_or_else(|e| {
            panic!("oaslint: failed to lint {}: {e}", document.display());
        });

        if result.has_violations_at(fail_on) {
            let report = result.format_test_report(fail_on);
            panic!("{report}");
        }
        result
    }
}

/// Lints `document` with the project configuration.
///
/// # Panics
///
/// Panics under the conditions of [`Check::run`].
pub fn check(document: impl Into<PathBuf>) {
    let _ = Check::new(document).run();
}

fn absolutize(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Reads the raw TOML content from the config file.
///
/// Returns an empty string if no config file is found.
fn read_config_content(root: &Path, explicit_path: Option<&Path>) -> String {
    let path = match explicit_path {
        Some(path) => absolutize(root, path),
        None => match CONFIG_CANDIDATES.iter().map(|c| root.join(c)).find(|p| p.is_file()) {
            Some(path) => path,
            None => return String::new(),
        },
    };
    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!("oaslint: failed to read config from {}: {e}", path.display());
    })
}

/// Parses a `Config` from TOML content.
fn parse_config(content: &str) -> Config {
    if content.trim().is_empty() {
        return Config::default();
    }
    Config::parse(content).unwrap_or_else(|e| {
        panic!("oaslint: failed to parse config: {e}");
    })
}

/// Checks whether a `Cargo.toml` file defines a `[workspace]` section
/// by parsing as TOML, avoiding false positives from comments or strings.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(cargo_toml) else {
        return false;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    table.contains_key("workspace")
}

/// Finds the workspace root above `CARGO_MANIFEST_DIR`.
fn find_project_root() -> PathBuf {
    let Some(manifest_dir) = std::env::var_os("CARGO_MANIFEST_DIR").map(PathBuf::from) else {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    };

    manifest_dir
        .ancestors()
        .find(|dir| has_workspace_section(&dir.join("Cargo.toml")))
        .map_or_else(|| manifest_dir.clone(), Path::to_path_buf)
}

//! Lint command implementation.

use anyhow::{bail, Context, Result};
use clap::Args;
use oaslint_core::{Analyzer, Config, Preset, RuleConfig, Severity};
use oaslint_rules::builtin_rules;
use std::path::PathBuf;

use super::output::{self, Linted};
use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Arguments of `oaslint lint`.
#[derive(Args, Debug)]
pub struct LintArgs {
    /// Documents to lint; glob patterns are expanded
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Preset deciding which rules run by default
    #[arg(long)]
    pub preset: Option<Preset>,

    /// Only run specific rules (comma-separated ids)
    #[arg(long)]
    pub rules: Option<String>,

    /// Lowest severity that fails the run
    #[arg(long)]
    pub fail_on: Option<Severity>,

    /// Only print findings at or above the failure threshold
    #[arg(short, long)]
    pub quiet: bool,
}

/// Runs the lint command.
///
/// Returns `true` when a finding reaches the failure threshold.
pub fn run(args: &LintArgs, source: &ConfigSource) -> Result<bool> {
    let mut config = super::load_config(source)?;
    apply_overrides(&mut config, args);
    let fail_on = config.fail_on();

    let files = expand(&args.files)?;
    let analyzer = Analyzer::builder().rules(builtin_rules()).config(config).build();
    tracing::info!("Linting {} file(s) with {} rules", files.len(), analyzer.rule_count());

    let mut linted = Vec::with_capacity(files.len());
    for file in files {
        let text = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let mut result = analyzer
            .analyze_source(&file.display().to_string(), &text)
            .with_context(|| format!("Failed to lint {}", file.display()))?;
        if args.quiet {
            result.violations.retain(|v| v.severity >= fail_on);
        }
        linted.push(Linted { result, text });
    }

    output::print(&linted, &analyzer, args.format, !args.quiet)?;

    Ok(linted.iter().any(|l| l.result.has_violations_at(fail_on)))
}

/// Folds command-line flags into the loaded configuration.
fn apply_overrides(config: &mut Config, args: &LintArgs) {
    if let Some(preset) = args.preset {
        config.preset = Some(preset);
    }
    if let Some(fail_on) = args.fail_on {
        config.fail_on = Some(fail_on);
    }
    if let Some(filter) = &args.rules {
        config.preset = Some(Preset::Off);
        for id in filter.split(',').map(str::trim).filter(|id| !id.is_empty()) {
            config
                .rules
                .entry(id.to_string())
                .or_insert_with(RuleConfig::default)
                .enabled = Some(true);
        }
    }
}

fn is_pattern(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

/// Expands glob patterns, keeping plain paths as given.
fn expand(args: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for arg in args {
        if !is_pattern(arg) {
            files.push(PathBuf::from(arg));
            continue;
        }
        let mut matched: Vec<PathBuf> = glob::glob(arg)
            .with_context(|| format!("Invalid glob pattern: {arg}"))?
            .filter_map(|entry| match entry {
                Ok(path) if path.is_file() => Some(path),
                Ok(_) => None,
                Err(err) => {
                    tracing::warn!("Skipping unreadable path: {err}");
                    None
                }
            })
            .collect();
        if matched.is_empty() {
            tracing::warn!("Pattern {arg} matched no files");
        }
        matched.sort();
        files.append(&mut matched);
    }
    if files.is_empty() {
        bail!("No documents to lint");
    }
    Ok(files)
}

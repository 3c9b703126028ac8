//! List rules command implementation.

use anyhow::Result;
use oaslint_core::{Analyzer, OptionValue, Preset, RegisteredRule, RuleOptions};
use oaslint_rules::builtin_rules;
use serde::Serialize;

use crate::config_resolver::ConfigSource;
use crate::ListFormat;

/// One row of the listing.
#[derive(Debug, Serialize)]
struct RuleRow<'a> {
    id: &'a str,
    function: &'a str,
    category: &'a str,
    severity: String,
    formats: Vec<String>,
    recommended: bool,
    enabled: bool,
    #[serde(skip_serializing_if = "no_options")]
    options: &'a RuleOptions,
    description: &'a str,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn no_options(options: &&RuleOptions) -> bool {
    options.is_empty()
}

impl<'a> RuleRow<'a> {
    fn new(rule: &'a RegisteredRule, enabled: bool) -> Self {
        let meta = &rule.definition.metadata;
        Self {
            id: &meta.id,
            function: &rule.definition.action.function,
            category: meta.category.as_str(),
            severity: meta.severity.to_string(),
            formats: meta.formats.iter().map(ToString::to_string).collect(),
            recommended: meta.recommended,
            enabled,
            options: &rule.definition.action.options,
            description: &meta.description,
        }
    }
}

fn render_options(options: &RuleOptions) -> String {
    options
        .iter()
        .map(|(key, value)| match value {
            OptionValue::Text(text) => format!("{key}={text}"),
            OptionValue::List(items) => format!("{key}=[{}]", items.join(",")),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs the list-rules command.
pub fn run(source: &ConfigSource, preset: Option<Preset>, format: ListFormat) -> Result<()> {
    let mut config = super::load_config(source)?;
    if preset.is_some() {
        config.preset = preset;
    }
    let preset = config.preset();
    let analyzer = Analyzer::builder().rules(builtin_rules()).config(config).build();
    let rows: Vec<RuleRow<'_>> = analyzer.rules().map(|(rule, enabled)| RuleRow::new(rule, enabled)).collect();

    match format {
        ListFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        ListFormat::Text => print_table(&rows, preset),
    }
    Ok(())
}

fn print_table(rows: &[RuleRow<'_>], preset: Preset) {
    println!("Available rules (preset: {preset}):\n");
    println!(
        "{:<3} {:<40} {:<34} {:<13} {:<8} Formats",
        "", "Id", "Function", "Category", "Severity"
    );
    println!("{}", "-".repeat(120));

    for row in rows {
        let marker = if row.enabled { "*" } else { "" };
        println!(
            "{:<3} {:<40} {:<34} {:<13} {:<8} {}",
            marker,
            row.id,
            row.function,
            row.category,
            row.severity,
            row.formats.join(",")
        );
        if !row.options.is_empty() {
            println!("{:<3} options: {}", "", render_options(row.options));
        }
    }

    println!("\n* enabled under the current configuration");
    println!("\nPresets:");
    println!("  recommended  - rules marked as recommended (default)");
    println!("  all          - every rule");
    println!("  off          - no rule unless enabled in [rules.<id>]");

    println!("\nUse --rules to run specific rules, e.g.:");
    println!("  oaslint lint openapi.yaml --rules operation-tags,info-contact");
}

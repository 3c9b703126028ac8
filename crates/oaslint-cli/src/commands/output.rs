//! Shared output formatting for lint results.

use anyhow::Result;
use miette::{NamedSource, Report};
use oaslint_core::{Analyzer, LintResult, Severity, Violation, ViolationDiagnostic};
use std::collections::HashMap;
use std::fmt::Write;

use crate::OutputFormat;

/// One linted document with the text it was parsed from.
pub struct Linted {
    /// Analysis result.
    pub result: LintResult,
    /// Document text, needed for source excerpts.
    pub text: String,
}

/// Print lint results in the specified format.
pub fn print(linted: &[Linted], analyzer: &Analyzer, format: OutputFormat, summary: bool) -> Result<()> {
    let hints = hints(analyzer);
    let rendered = match format {
        OutputFormat::Text => render_text(linted, &hints, summary),
        OutputFormat::Json => render_json(linted)?,
        OutputFormat::Compact => render_compact(linted),
        OutputFormat::Pretty => render_pretty(linted, &hints, summary),
    };
    print!("{rendered}");
    Ok(())
}

/// `how_to_fix` hints keyed by rule id.
fn hints(analyzer: &Analyzer) -> HashMap<&str, &str> {
    analyzer
        .rules()
        .filter_map(|(rule, _)| {
            let meta = &rule.definition.metadata;
            meta.how_to_fix.as_deref().map(|hint| (meta.id.as_str(), hint))
        })
        .collect()
}

fn severity_indicator(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn summary_line(linted: &[Linted]) -> String {
    let (mut errors, mut warnings, mut infos) = (0, 0, 0);
    for l in linted {
        let (e, w, i) = l.result.count_by_severity();
        errors += e;
        warnings += w;
        infos += i;
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    format!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m\n",
        summary_color,
        errors,
        warnings,
        infos,
        linted.len()
    )
}

fn render_text(linted: &[Linted], hints: &HashMap<&str, &str>, summary: bool) -> String {
    let mut out = String::new();
    for l in linted {
        for violation in &l.result.violations {
            let _ = writeln!(
                out,
                "{} {} at {}:{}",
                violation.rule_id, violation.category, l.result.source, violation.start
            );
            let _ = writeln!(out, "  {}: {}", severity_indicator(violation.severity), violation.message);
            let _ = writeln!(out, "  = path: {}", violation.path);
            for extra in violation.paths.iter().filter(|p| **p != violation.path) {
                let _ = writeln!(out, "  = also used at: {extra}");
            }
            if let Some(hint) = hints.get(violation.rule_id.as_str()) {
                let _ = writeln!(out, "  = help: {hint}");
            }
            out.push('\n');
        }
    }
    if summary {
        out.push_str(&summary_line(linted));
    }
    out
}

fn render_json(linted: &[Linted]) -> Result<String> {
    let results: Vec<&LintResult> = linted.iter().map(|l| &l.result).collect();
    let mut json = serde_json::to_string_pretty(&results)?;
    json.push('\n');
    Ok(json)
}

fn compact_line(source: &str, violation: &Violation) -> String {
    format!(
        "{}:{}:{}: {} [{}] {}\n",
        source,
        violation.start.line,
        violation.start.column,
        violation.severity,
        violation.rule_id,
        violation.message,
    )
}

fn render_compact(linted: &[Linted]) -> String {
    linted
        .iter()
        .flat_map(|l| l.result.violations.iter().map(|v| compact_line(&l.result.source, v)))
        .collect()
}

fn render_pretty(linted: &[Linted], hints: &HashMap<&str, &str>, summary: bool) -> String {
    let mut out = String::new();
    for l in linted {
        for violation in &l.result.violations {
            let help = hints.get(violation.rule_id.as_str()).map(|h| (*h).to_string());
            let report = Report::new(ViolationDiagnostic::new(violation, &l.text, help))
                .with_source_code(NamedSource::new(&l.result.source, l.text.clone()));
            let _ = writeln!(out, "{report:?}");
        }
    }
    if summary {
        out.push_str(&summary_line(linted));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use oaslint_core::{Category, Position, Range};

    fn linted() -> Vec<Linted> {
        let mut result = LintResult::new("api.yaml");
        result.violations.push(Violation::new(
            "operation-tags",
            Category::Tags,
            Severity::Warning,
            "the `GET` operation at path `/a` has no tags",
            "$.paths['/a'].get",
            Range::new(Position::new(4, 5), Position::new(4, 8)),
        ));
        vec![Linted {
            result,
            text: String::new(),
        }]
    }

    #[test]
    fn compact_output() {
        insta::assert_snapshot!(render_compact(&linted()).trim_end(), @"api.yaml:4:5: warning [operation-tags] the `GET` operation at path `/a` has no tags");
    }

    #[test]
    fn text_output_includes_hint() {
        let mut hints = HashMap::new();
        hints.insert("operation-tags", "Add a `tags` entry to the operation");
        let text = render_text(&linted(), &hints, false);
        assert!(text.contains("operation-tags tags at api.yaml:4:5"));
        assert!(text.contains("= path: $.paths['/a'].get"));
        assert!(text.contains("= help: Add a `tags` entry to the operation"));
    }

    #[test]
    fn json_output_is_an_array_of_results() {
        let json = render_json(&linted()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["source"], "api.yaml");
        assert_eq!(value[0]["violations"][0]["rule_id"], "operation-tags");
        assert_eq!(value[0]["violations"][0]["start"]["col"], 5);
    }

    #[test]
    fn summary_counts_every_file() {
        let line = summary_line(&linted());
        assert!(line.contains("Found 0 error(s), 1 warning(s), 0 info(s) in 1 file(s)"));
    }
}

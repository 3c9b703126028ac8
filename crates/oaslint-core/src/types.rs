//! Core types for lint violations and results.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" | "hint" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown severity `{other}`")),
        }
    }
}

/// Rule category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Document-level OpenAPI structure.
    OpenApi,
    /// Descriptions and summaries.
    Descriptions,
    /// Schemas and their keywords.
    Schemas,
    /// Operations, paths and responses.
    Operations,
    /// Tags.
    Tags,
    /// The `info` object.
    Information,
    /// Security schemes and requirements.
    Security,
    /// Structural validation.
    Validation,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Self; 8] = [
        Self::OpenApi,
        Self::Descriptions,
        Self::Schemas,
        Self::Operations,
        Self::Tags,
        Self::Information,
        Self::Security,
        Self::Validation,
    ];

    /// Lowercase identifier used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenApi => "openapi",
            Self::Descriptions => "descriptions",
            Self::Schemas => "schemas",
            Self::Operations => "operations",
            Self::Tags => "tags",
            Self::Information => "information",
            Self::Security => "security",
            Self::Validation => "validation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A position in the source text.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    #[serde(rename = "col")]
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Byte offset of this position in `source`, clamped to its length.
    #[must_use]
    pub fn offset_in(&self, source: &str) -> usize {
        if self.line == 0 {
            return 0;
        }
        let mut offset = 0;
        for (i, line) in source.split_inclusive('\n').enumerate() {
            if i + 1 == self.line {
                let within: usize = line
                    .chars()
                    .take(self.column.saturating_sub(1))
                    .map(char::len_utf8)
                    .sum();
                return offset + within;
            }
            offset += line.len();
        }
        source.len()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span between two positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    /// First position.
    pub start: Position,
    /// Position just past the span.
    pub end: Position,
}

impl Range {
    /// Creates a range, swapping the bounds if they are out of order.
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Id of the rule definition that produced it (e.g. `operation-tags`).
    pub rule_id: String,
    /// Category of that rule.
    pub category: Category,
    /// Severity of this violation.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Primary JSON-Path.
    pub path: String,
    /// Every JSON-Path at which the offending element is used.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,
    /// Start of the anchored node.
    pub start: Position,
    /// End of the anchored node.
    pub end: Position,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        rule_id: impl Into<String>,
        category: Category,
        severity: Severity,
        message: impl Into<String>,
        path: impl Into<String>,
        range: Range,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            category,
            severity,
            message: message.into(),
            path: path.into(),
            paths: Vec::new(),
            start: range.start,
            end: range.end,
        }
    }

    /// Sets every use-site of the offending element.
    #[must_use]
    pub fn with_paths(mut self, paths: Vec<String>) -> Self {
        self.paths = paths;
        self
    }

    /// The span of this violation.
    #[must_use]
    pub fn range(&self) -> Range {
        Range {
            start: self.start,
            end: self.end,
        }
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{} {} at {}\n", self.rule_id, self.category, self.start);
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        let _ = writeln!(output, "  = path: {}", self.path);
        for extra in self.paths.iter().filter(|p| **p != self.path) {
            let _ = writeln!(output, "  = also used at: {extra}");
        }
        output
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] {} ({})",
            self.start, self.severity, self.rule_id, self.message, self.path
        )
    }
}

/// Converts a Violation to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl ViolationDiagnostic {
    /// Builds a diagnostic whose span is resolved against `source`.
    #[must_use]
    pub fn new(violation: &Violation, source: &str, help: Option<String>) -> Self {
        let start = violation.start.offset_in(source);
        let end = violation.end.offset_in(source).max(start);
        Self {
            message: format!("[{}] {}", violation.rule_id, violation.message),
            help,
            span: SourceSpan::from((start, end - start)),
            label_message: violation.path.clone(),
        }
    }
}

/// Result of linting one document.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// Name of the linted source (usually a file path).
    pub source: String,
    /// Detected spec version label, e.g. `OpenAPI 3.1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<String>,
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of rules evaluated.
    pub rules_run: usize,
    /// Number of violations silenced by `x-lint-ignore`.
    #[serde(default)]
    pub ignored: usize,
    /// True if evaluation stopped early on request.
    #[serde(default)]
    pub cancelled: bool,
}

impl LintResult {
    /// Creates a new empty result for `source`.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    /// Returns true if there are any warnings or errors.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity >= Severity::Warning)
    }

    /// Returns violations filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .collect()
    }

    /// Returns violations produced by one rule.
    #[must_use]
    pub fn by_rule(&self, rule_id: &str) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.rule_id == rule_id)
            .collect()
    }

    /// Counts violations by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity| {
            self.violations
                .iter()
                .filter(|v| v.severity == severity)
                .count()
        };
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Prints a summary report to stdout.
    pub fn print_report(&self) {
        let (errors, warnings, infos) = self.count_by_severity();

        for violation in &self.violations {
            println!("{}", violation.format());
        }

        println!(
            "\nFound {} error(s), {} warning(s), {} info(s) in {}",
            errors, warnings, infos, self.source
        );
    }

    /// Formats violations as a test failure report.
    ///
    /// Produces a human-readable multi-line report suitable for `panic!()` messages
    /// in `cargo test` integration.
    #[must_use]
    pub fn format_test_report(&self, fail_on: Severity) -> String {
        use std::fmt::Write;

        let failing: Vec<&Violation> = self
            .violations
            .iter()
            .filter(|v| v.severity >= fail_on)
            .collect();

        let mut report = String::new();
        let _ = writeln!(
            report,
            "\n=== oaslint: {} violation(s) in {} ===\n",
            failing.len(),
            self.source
        );

        for v in &failing {
            let _ = writeln!(report, "{} at {} ({})", v.rule_id, v.start, v.path);
            let _ = writeln!(report, "  {}: {}", v.severity, v.message);
            let _ = writeln!(report);
        }

        let (errors, warnings, infos) = self.count_by_severity();
        let _ = writeln!(
            report,
            "Total: {errors} error(s), {warnings} warning(s), {infos} info(s)"
        );

        report
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            "operation-tags",
            Category::Tags,
            severity,
            "Tags for `get` operation at path `/pets` are missing",
            "$.paths['/pets'].get",
            Range::new(Position::new(4, 5), Position::new(4, 8)),
        )
    }

    #[test]
    fn range_orders_bounds() {
        let range = Range::new(Position::new(5, 1), Position::new(2, 3));
        assert_eq!(range.start, Position::new(2, 3));
        assert_eq!(range.end, Position::new(5, 1));
    }

    #[test]
    fn position_offset_accounts_for_previous_lines() {
        let source = "a: 1\nbb: 2\n";
        assert_eq!(Position::new(1, 1).offset_in(source), 0);
        assert_eq!(Position::new(2, 1).offset_in(source), 5);
        assert_eq!(Position::new(2, 5).offset_in(source), 9);
        assert_eq!(Position::new(9, 1).offset_in(source), source.len());
    }

    #[test]
    fn violation_serializes_with_short_column_names() {
        let json = serde_json::to_value(make_violation(Severity::Warning)).expect("serialize");
        assert_eq!(json["start"], serde_json::json!({"line": 4, "col": 5}));
        assert_eq!(json["category"], "tags");
        assert!(json.get("paths").is_none());
    }

    #[test]
    fn violation_format_lists_extra_paths() {
        let v = make_violation(Severity::Error).with_paths(vec![
            "$.paths['/pets'].get".into(),
            "$.paths['/cats'].get".into(),
        ]);
        let formatted = v.format();
        assert!(formatted.contains("= also used at: $.paths['/cats'].get"));
        assert!(!formatted.contains("= also used at: $.paths['/pets'].get"));
    }

    #[test]
    fn violation_display_is_single_line() {
        let display = make_violation(Severity::Error).to_string();
        assert!(display.starts_with("4:5: error [operation-tags]"));
        assert!(!display.contains('\n'));
    }

    #[test]
    fn severity_parses_aliases() {
        assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("hint".parse::<Severity>(), Ok(Severity::Info));
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn has_violations_at_error_only() {
        let mut result = LintResult::new("api.yaml");
        result.violations.push(make_violation(Severity::Warning));
        assert!(!result.has_violations_at(Severity::Error));
        assert!(result.has_violations_at(Severity::Warning));
    }

    #[test]
    fn format_test_report_filters_by_severity() {
        let mut result = LintResult::new("api.yaml");
        result.violations.push(make_violation(Severity::Warning));
        result.violations.push(make_violation(Severity::Error));

        let report = result.format_test_report(Severity::Error);
        assert!(report.contains("1 violation(s) in api.yaml"));
        assert!(report.contains("1 error(s)"));
        assert!(report.contains("1 warning(s)"));
    }
}

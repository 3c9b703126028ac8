//! Integration test: custom rules end-to-end via Analyzer.
//!
//! Exercises the harness on its own: format filtering, deduplication,
//! inline ignores, cancellation and configuration overrides.

use oaslint_core::{
    Analyzer, CancellationToken, Category, Config, JsonPath, Node, Rule, RuleContext,
    RuleDefinition, Severity, SpecFormat, Violation,
};

/// Flags an `info` object without a `title`, twice.
struct InfoTitle;

impl Rule for InfoTitle {
    fn name(&self) -> &'static str {
        "infoTitle"
    }

    fn category(&self) -> Category {
        Category::Information
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some((key, info)) = ctx.document.entry("info") else {
            return Vec::new();
        };
        if info.has("title") {
            return Vec::new();
        }
        let path = JsonPath::root().key("info");
        let violation = ctx.violation("info section is missing a title", &path, key);
        vec![violation.clone(), violation]
    }
}

fn definition() -> RuleDefinition {
    RuleDefinition::new("info-title", "infoTitle", Category::Information, Severity::Warning)
}

const UNTITLED: &str = "openapi: 3.0.3\ninfo: {version: '1'}\npaths: {}\n";

// ── Harness behavior ──

#[test]
fn duplicate_results_are_reported_once() {
    let analyzer = Analyzer::builder().rule(definition(), InfoTitle).build();
    let result = analyzer.analyze_source("inline.yaml", UNTITLED).expect("analysis should succeed");

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.rules_run, 1);
    insta::assert_snapshot!(result.format_test_report(Severity::Warning).trim(), @r"
    === oaslint: 1 violation(s) in inline.yaml ===

    info-title at 2:1 ($.info)
      warning: info section is missing a title

    Total: 0 error(s), 1 warning(s), 0 info(s)
    ");
}

#[test]
fn rules_outside_their_formats_are_skipped() {
    let analyzer = Analyzer::builder()
        .rule(definition().formats(&[SpecFormat::Swagger2]), InfoTitle)
        .build();
    let result = analyzer.analyze_source("inline.yaml", UNTITLED).expect("analysis should succeed");
    assert_eq!(result.rules_run, 0);
    assert!(result.violations.is_empty());
}

#[test]
fn inline_ignore_covers_owning_key() {
    let source = "openapi: 3.0.3\ninfo:\n  version: '1'\n  x-lint-ignore:\n    info-title: generated document\npaths: {}\n";
    let analyzer = Analyzer::builder().rule(definition(), InfoTitle).build();
    let result = analyzer.analyze_source("inline.yaml", source).expect("analysis should succeed");
    assert!(result.violations.is_empty());
    assert_eq!(result.ignored, 1);
}

#[test]
fn cancelled_analysis_runs_nothing() {
    let token = CancellationToken::new();
    token.cancel();
    let analyzer = Analyzer::builder()
        .rule(definition(), InfoTitle)
        .cancellation(token)
        .build();
    let result = analyzer.analyze_source("inline.yaml", UNTITLED).expect("analysis should succeed");
    assert!(result.cancelled);
    assert_eq!(result.rules_run, 0);
}

#[test]
fn configuration_overrides_severity_and_enablement() {
    let config = Config::parse("[rules.info-title]\nseverity = \"error\"\n").expect("config should parse");
    let analyzer = Analyzer::builder().rule(definition(), InfoTitle).config(config).build();
    let result = analyzer.analyze_source("inline.yaml", UNTITLED).expect("analysis should succeed");
    assert!(result.has_errors());

    let config = Config::parse("[rules.info-title]\nenabled = false\n").expect("config should parse");
    let analyzer = Analyzer::builder().rule(definition(), InfoTitle).config(config).build();
    assert_eq!(analyzer.rule_count(), 0);
}

// ── Harness errors ──

#[test]
fn non_openapi_documents_are_rejected() {
    let analyzer = Analyzer::builder().rule(definition(), InfoTitle).build();
    let err = analyzer
        .analyze_source("other.yaml", "name: not an api\n")
        .expect_err("detection should fail");
    assert_eq!(err.to_string(), "other.yaml is not a Swagger 2.0 or OpenAPI 3.x document");

    assert!(analyzer.analyze_source("broken.yaml", "openapi: [\n").is_err());
}

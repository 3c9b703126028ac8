//! Integration test: the built-in catalog against fixture documents.

use oaslint_core::{Analyzer, Config, LintResult, Severity};
use oaslint_rules::builtin_rules;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn analyze(name: &str, config: &str) -> LintResult {
    let config = Config::parse(config).expect("fixture config should parse");
    Analyzer::builder()
        .rules(builtin_rules())
        .config(config)
        .build()
        .analyze_file(&fixture(name))
        .expect("analysis should succeed")
}

fn rule_ids(result: &LintResult) -> Vec<&str> {
    result.violations.iter().map(|v| v.rule_id.as_str()).collect()
}

// ── Well-formed documents ──

#[test]
fn petstore_oas3_has_no_errors() {
    let result = analyze("petstore-oas3.yaml", "");
    assert_eq!(result.spec.as_deref(), Some("OpenAPI 3.0.3"));
    assert!(
        result.by_severity(Severity::Error).is_empty(),
        "unexpected errors: {:#?}",
        result.by_severity(Severity::Error)
    );
    assert!(result.by_rule("oas3-schema").is_empty());
    assert!(result.rules_run > 0);
}

#[test]
fn petstore_swagger_has_no_errors() {
    let result = analyze("petstore-swagger.yaml", "");
    assert!(
        result.by_severity(Severity::Error).is_empty(),
        "unexpected errors: {:#?}",
        result.by_severity(Severity::Error)
    );
    assert!(result.by_rule("oas2-schema").is_empty());
    assert!(result.by_rule("oas2-operation-formData-consume-check").is_empty());
}

#[test]
fn oas3_only_rules_skip_swagger() {
    let result = analyze("petstore-swagger.yaml", "preset = \"all\"\n");
    let ids = rule_ids(&result);
    assert!(ids.iter().all(|id| !id.starts_with("oas3-")), "{ids:?}");
}

// ── Broken document ──

#[test]
fn broken_document_reports_structural_errors() {
    let result = analyze("broken-oas3.yaml", "");
    assert_eq!(result.by_rule("duplicate-paths").len(), 1);
    assert_eq!(result.by_rule("operation-operationId-unique").len(), 1);
    assert!(!result.by_rule("path-params").is_empty());
    assert!(result.has_errors());
}

#[test]
fn inline_ignore_silences_only_named_rule() {
    let result = analyze("broken-oas3.yaml", "");
    assert!(result
        .by_rule("component-description")
        .iter()
        .all(|v| !v.path.contains("Orphan")));
    assert!(result.ignored >= 1);
    assert_eq!(result.by_rule("oas3-unused-component").len(), 1);

    let strict = analyze("broken-oas3.yaml", "[analyzer]\nhonor_ignores = false\n");
    assert_eq!(strict.ignored, 0);
    assert!(strict
        .by_rule("component-description")
        .iter()
        .any(|v| v.path.contains("Orphan")));
}

#[test]
fn serial_and_parallel_runs_agree() {
    let parallel = analyze("broken-oas3.yaml", "preset = \"all\"\n");
    let serial = analyze("broken-oas3.yaml", "preset = \"all\"\n\n[analyzer]\nparallel = false\n");
    assert_eq!(parallel.violations, serial.violations);
}

#[test]
fn disabled_rule_is_not_run() {
    let result = analyze(
        "broken-oas3.yaml",
        "[rules.\"duplicate-paths\"]\nenabled = false\n",
    );
    assert!(result.by_rule("duplicate-paths").is_empty());
}

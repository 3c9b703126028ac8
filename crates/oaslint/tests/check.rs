//! Integration tests for `oaslint::check!()` and the `Check` runner.
//!
//! Paths are relative to the workspace root.

use oaslint::{Check, Preset, Severity};

// Full pipeline: macro expansion → config search → analysis → pass.
oaslint::check!(petstore_passes_recommended, "crates/oaslint/tests/fixtures/petstore.yaml");

#[test]
fn explicit_config_is_applied() {
    let result = Check::new("crates/oaslint/tests/fixtures/petstore.yaml")
        .config("crates/oaslint/tests/fixtures/lint.toml")
        .run();
    assert_eq!(result.spec.as_deref(), Some("OpenAPI 3.0.3"));
    assert!(result.rules_run > 0);
}

#[test]
#[should_panic(expected = "oaslint: 1 violation(s)")]
fn findings_at_threshold_panic() {
    let _ = Check::new("crates/oaslint/tests/fixtures/untagged.yaml")
        .config("crates/oaslint/tests/fixtures/tags-only.toml")
        .fail_on(Severity::Warning)
        .run();
}

#[test]
fn findings_below_threshold_are_returned() {
    let result = Check::new("crates/oaslint/tests/fixtures/untagged.yaml")
        .config("crates/oaslint/tests/fixtures/tags-only.toml")
        .run();
    assert_eq!(result.by_rule("operation-tags").len(), 1);
}

#[test]
fn preset_override_wins_over_config() {
    let result = Check::new("crates/oaslint/tests/fixtures/untagged.yaml")
        .config("crates/oaslint/tests/fixtures/tags-only.toml")
        .preset(Preset::All)
        .run();
    assert!(result.rules_run > 1);
}

//! Integration test: built-in rules evaluated through the Analyzer.
//!
//! Each scenario enables a single rule id on top of the `off` preset and
//! lints an inline document.

use oaslint_core::{Analyzer, Config, Violation};
use oaslint_rules::builtin_rules;

fn lint_only(rule_id: &str, source: &str) -> Vec<Violation> {
    let config = Config::parse(&format!(
        "preset = \"off\"\n\n[rules.\"{rule_id}\"]\nenabled = true\n"
    ))
    .expect("config should parse");
    let analyzer = Analyzer::builder().rules(builtin_rules()).config(config).build();
    assert_eq!(analyzer.rule_count(), 1, "unknown rule id {rule_id}");
    analyzer
        .analyze_source("inline.yaml", source)
        .expect("analysis should succeed")
        .violations
}

fn paths(violations: &[Violation]) -> Vec<&str> {
    violations.iter().map(|v| v.path.as_str()).collect()
}

// ── Naming and paths ──

#[test]
fn camel_case_properties_skip_extensions() {
    let violations = lint_only(
        "camel-case-properties",
        r"openapi: 3.0.3
info: {title: t, version: '1'}
paths: {}
components:
  schemas:
    X:
      type: object
      properties:
        UserName: {type: string}
        user_name: {type: string}
        userID: {type: string}
        x-ext: {type: string}
",
    );
    assert_eq!(
        paths(&violations),
        vec![
            "$.components.schemas.X.properties.UserName",
            "$.components.schemas.X.properties.user_name",
        ]
    );
}

#[test]
fn duplicate_paths_reads_raw_mapping() {
    let violations = lint_only(
        "duplicate-paths",
        r"openapi: 3.0.3
info: {title: t, version: '1'}
paths:
  /a/{id}: {get: {responses: {}}}
  /a/{id}: {post: {responses: {}}}
  /a/{id}: {delete: {responses: {}}}
",
    );
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].start.line, 5);
    assert_eq!(violations[1].start.line, 6);
}

#[test]
fn ambiguous_paths_need_same_method_and_templates() {
    let violations = lint_only(
        "no-ambiguous-paths",
        r"openapi: 3.0.3
info: {title: t, version: '1'}
paths:
  /foo/{x}: {get: {responses: {}}}
  /foo/bar: {get: {responses: {}}}
  /foo/{y}: {post: {responses: {}}}
  /users/{a}: {get: {responses: {}}}
  /users/{b}: {get: {responses: {}}}
",
    );
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].message,
        "paths are ambiguous with one another: `/users/{a}` and `/users/{b}`"
    );
}

// ── References ──

#[test]
fn unused_component_follows_transitive_references() {
    let violations = lint_only(
        "oas3-unused-component",
        r"openapi: 3.0.3
info: {title: t, version: '1'}
components:
  schemas:
    Used: {type: object}
    Orphan: {type: object}
    ViaAllOf: {allOf: [{$ref: '#/components/schemas/Used'}]}
paths:
  /x:
    get:
      responses:
        '200':
          description: ok
          content:
            application/json:
              schema: {$ref: '#/components/schemas/ViaAllOf'}
",
    );
    assert_eq!(paths(&violations), vec!["$.components.schemas.Orphan"]);
}

const NULLABLE_30: &str = "openapi: 3.0.3\ninfo: {title: t, version: '1'}\npaths: {}\ncomponents:\n  schemas:\n    S: ";
const NULLABLE_31: &str = "openapi: 3.1.0\ninfo: {title: t, version: '1'}\npaths: {}\ncomponents:\n  schemas:\n    S: ";

#[test]
fn nullable_enum_follows_version() {
    let count = |prefix: &str, schema: &str| {
        lint_only("nullable-enum-contains-null", &format!("{prefix}{schema}\n")).len()
    };
    assert_eq!(count(NULLABLE_30, "{type: string, nullable: true, enum: [a, b]}"), 1);
    assert_eq!(count(NULLABLE_30, "{type: string, nullable: true, enum: [a, b, null]}"), 0);
    assert_eq!(count(NULLABLE_31, "{type: [string, 'null'], enum: [a, b]}"), 1);
    assert_eq!(count(NULLABLE_31, "{type: [string, 'null'], enum: [a, b, null]}"), 0);
}

#[test]
fn ref_siblings_follow_version() {
    let doc = |version: &str| {
        format!(
            "openapi: {version}\ninfo: {{title: t, version: '1'}}\npaths: {{}}\ncomponents:\n  schemas:\n    Y: {{type: object}}\n    X: {{$ref: '#/components/schemas/Y', description: hi}}\n"
        )
    };
    assert_eq!(lint_only("no-$ref-siblings", &doc("3.0.3")).len(), 1);
    assert!(lint_only("no-$ref-siblings", &doc("3.1.0")).is_empty());
    assert!(lint_only("oas3-no-$ref-siblings", &doc("3.1.0")).is_empty());
}

// ── Harness behavior ──

#[test]
fn results_are_deterministic() {
    let source = r"openapi: 3.0.3
info: {title: t, version: '1'}
paths:
  /Users/{id}:
    get:
      responses: {}
  /users/{id}:
    get:
      responses: {}
";
    let analyzer = Analyzer::builder()
        .rules(builtin_rules())
        .config(Config::parse("preset = \"all\"\n").expect("config should parse"))
        .build();
    let first = analyzer.analyze_source("a.yaml", source).expect("analysis should succeed");
    let second = analyzer.analyze_source("a.yaml", source).expect("analysis should succeed");
    assert!(!first.violations.is_empty());
    assert_eq!(first.violations, second.violations);
    for v in &first.violations {
        assert!(v.path.starts_with('$'), "{v:?}");
        assert!(v.start.line >= 1, "{v:?}");
        assert!(!v.rule_id.is_empty());
    }
}

#[test]
fn fixing_the_reported_element_clears_the_result() {
    let broken = r"openapi: 3.0.3
info: {title: t, version: '1'}
paths:
  /pets:
    get:
      requestBody: {content: {}}
      responses: {}
";
    let fixed = broken.replace("      requestBody: {content: {}}\n", "");
    assert_eq!(lint_only("no-request-body", broken).len(), 1);
    assert!(lint_only("no-request-body", &fixed).is_empty());
}

#[test]
fn severity_override_applies() {
    let config = Config::parse(
        "preset = \"off\"\n\n[rules.\"operation-tags\"]\nenabled = true\nseverity = \"error\"\n",
    )
    .expect("config should parse");
    let analyzer = Analyzer::builder().rules(builtin_rules()).config(config).build();
    let result = analyzer
        .analyze_source(
            "inline.yaml",
            "openapi: 3.0.3\ninfo: {title: t, version: '1'}\npaths:\n  /a:\n    get:\n      responses: {}\n",
        )
        .expect("analysis should succeed");
    assert_eq!(result.violations.len(), 1);
    assert!(result.has_errors());
}

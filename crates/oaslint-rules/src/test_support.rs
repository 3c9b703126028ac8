//! Helpers for evaluating a single rule against an inline document.

use oaslint_core::validator::{JsonSchemaValidator, SchemaValidator};
use oaslint_core::{
    Node, OpenApi, Rule, RuleContext, RuleDefinition, Severity, SpecIndex, SpecInfo, Violation,
};

/// Evaluates `rule` with its built-in definition (or a bare one when the
/// function has no preset).
pub(crate) fn lint(rule: &dyn Rule, src: &str) -> Vec<Violation> {
    let definition = crate::presets::definitions()
        .into_iter()
        .find(|d| d.action.function == rule.name())
        .unwrap_or_else(|| {
            RuleDefinition::new("test-rule", rule.name(), rule.category(), Severity::Warning)
        });
    lint_with(rule, definition, src)
}

/// Evaluates `rule` with an explicit definition.
pub(crate) fn lint_with(rule: &dyn Rule, definition: RuleDefinition, src: &str) -> Vec<Violation> {
    lint_with_validator(rule, definition, src, &JsonSchemaValidator)
}

/// Evaluates `rule` with an explicit definition and schema validator.
pub(crate) fn lint_with_validator(
    rule: &dyn Rule,
    mut definition: RuleDefinition,
    src: &str,
    validator: &dyn SchemaValidator,
) -> Vec<Violation> {
    definition.compile_pattern();
    let doc = Node::parse(src).expect("valid yaml");
    let info = SpecInfo::detect(&doc).expect("openapi or swagger document");
    let model = OpenApi::new(doc.root(), info.clone());
    let index = SpecIndex::build(&model);
    let ctx = RuleContext::new(doc.root(), &info, &definition.metadata, &definition.action)
        .with_model(&model)
        .with_index(&index)
        .with_validator(validator);
    rule.evaluate(&[doc.root()], &ctx)
}

/// Messages of `violations`, in order.
pub(crate) fn messages(violations: &[Violation]) -> Vec<&str> {
    violations.iter().map(|v| v.message.as_str()).collect()
}

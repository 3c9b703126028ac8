//! Rule detecting a path template declared more than once.
//!
//! YAML and JSON parsers keep the last occurrence of a repeated key, so
//! every earlier declaration silently disappears. The raw `paths` mapping
//! is scanned, not the model.

use oaslint_core::{Category, JsonPath, Node, Rule, RuleContext, Violation};

use std::collections::BTreeSet;

/// Function name of the rule.
pub const NAME: &str = "duplicatePaths";

/// Flags repeated keys in `paths`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicatePaths;

impl DuplicatePaths {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for DuplicatePaths {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Operations
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(paths) = ctx.document.get("paths") else {
            return Vec::new();
        };

        let base = JsonPath::root().key("paths");
        let mut seen = BTreeSet::new();
        paths
            .pairs()
            .filter(|(key, _)| !seen.insert(key.value.as_str()))
            .map(|(key, _)| {
                ctx.violation(
                    format!(
                        "duplicate path `{}` found; only the last definition will be used, previous definitions are ignored",
                        key.value
                    ),
                    &base.key(key.value.clone()),
                    key,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lint;

    #[test]
    fn test_reports_each_repeat_after_the_first() {
        let violations = lint(
            &DuplicatePaths::new(),
            r"openapi: 3.0.3
info: {title: t}
paths:
  /a/{id}: {get: {responses: {}}}
  /a/{id}: {post: {responses: {}}}
  /a/{id}: {delete: {responses: {}}}
  /b: {get: {responses: {}}}
",
        );
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].start.line, 5);
        assert_eq!(violations[1].start.line, 6);
        assert_eq!(violations[0].path, "$.paths['/a/{id}']");
    }
}

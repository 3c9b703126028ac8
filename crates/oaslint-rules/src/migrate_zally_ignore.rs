//! Rule asking for `x-zally-ignore` to be replaced by `x-lint-ignore`.

use oaslint_core::{Category, JsonPath, Node, Rule, RuleContext, Violation};

/// Function name of the rule.
pub const NAME: &str = "migrateZallyIgnore";

const ZALLY_IGNORE: &str = "x-zally-ignore";

/// Flags every `x-zally-ignore` key.
#[derive(Debug, Clone, Copy, Default)]
pub struct MigrateZallyIgnore;

impl MigrateZallyIgnore {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn walk(ctx: &RuleContext<'_>, node: &Node, path: &JsonPath, violations: &mut Vec<Violation>) {
    if node.is_mapping() {
        for (key, value) in node.pairs() {
            let child = path.key(key.value.clone());
            if key.value == ZALLY_IGNORE {
                violations.push(ctx.violation(
                    "`x-zally-ignore` keys are not supported, convert ignore rules to use `x-lint-ignore`",
                    &child,
                    key,
                ));
            }
            walk(ctx, value, &child, violations);
        }
    } else if node.is_sequence() {
        for (i, item) in node.items().iter().enumerate() {
            walk(ctx, item, &path.index(i), violations);
        }
    }
}

impl Rule for MigrateZallyIgnore {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::OpenApi
    }

    fn evaluate(&self, nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for node in nodes {
            walk(ctx, node.root(), &JsonPath::root(), &mut violations);
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lint;

    #[test]
    fn test_zally_ignore_keys() {
        let violations = lint(
            &MigrateZallyIgnore::new(),
            r"openapi: 3.0.3
info: {title: t}
x-zally-ignore: [101]
paths:
  /a:
    get:
      x-zally-ignore: [104, 105]
      responses: {}
",
        );
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].path, "$.x-zally-ignore");
        assert_eq!(violations[1].path, "$.paths['/a'].get.x-zally-ignore");
        assert_eq!(violations[1].start.line, 7);
    }
}

//! Rule rejecting `$ref` on operation objects. Path items may be
//! referenced; the operations inside them may not.

use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

/// Function name of the rule.
pub const NAME: &str = "pathItemReferences";

/// Flags operations declared through `$ref`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathItemReferences;

impl PathItemReferences {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for PathItemReferences {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Operations
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(model) = ctx.model else {
            return Vec::new();
        };

        model
            .operations()
            .iter()
            .filter(|op| op.is_ref())
            .filter_map(|op| {
                let (key, _) = op.raw.entry("$ref")?;
                Some(ctx.violation(
                    format!(
                        "the `{}` operation at path `{}` is a `$ref`, only path items may be referenced",
                        op.method.to_ascii_uppercase(),
                        op.path
                    ),
                    &op.json_path.key("$ref"),
                    key,
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lint, messages};

    #[test]
    fn test_referenced_operation() {
        let violations = lint(
            &PathItemReferences::new(),
            r"openapi: 3.1.0
info: {title: t}
paths:
  /a:
    $ref: '#/components/pathItems/A'
  /b:
    get:
      $ref: '#/components/pathItems/A/get'
components:
  pathItems:
    A:
      get: {responses: {}}
",
        );
        assert_eq!(
            messages(&violations),
            vec!["the `GET` operation at path `/b` is a `$ref`, only path items may be referenced"]
        );
        assert_eq!(violations[0].path, "$.paths['/b'].get.$ref");
        assert_eq!(violations[0].start.line, 8);
    }
}

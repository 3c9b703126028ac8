//! Rule forbidding request bodies on `GET` and `DELETE`.

use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

/// Function name of the rule.
pub const NAME: &str = "noRequestBody";

const BODYLESS_METHODS: [&str; 2] = ["get", "delete"];

/// Flags a `requestBody` on a `GET` or `DELETE` operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRequestBody;

impl NoRequestBody {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoRequestBody {
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
            .filter(|op| BODYLESS_METHODS.contains(&op.method))
            .filter_map(|op| {
                let entry = op.entry("requestBody")?;
                Some(ctx.violation(
                    format!(
                        "`{}` operation at path `{}` must not accept a request body",
                        op.method.to_ascii_uppercase(),
                        op.path
                    ),
                    &op.json_path.key("requestBody"),
                    entry.key,
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
    fn test_bodies_on_get_and_delete() {
        let violations = lint(
            &NoRequestBody::new(),
            r"openapi: 3.0.3
info: {title: t}
paths:
  /a:
    get: {requestBody: {content: {}}, responses: {}}
    post: {requestBody: {content: {}}, responses: {}}
    delete: {requestBody: {content: {}}, responses: {}}
",
        );
        assert_eq!(
            messages(&violations),
            vec![
                "`GET` operation at path `/a` must not accept a request body",
                "`DELETE` operation at path `/a` must not accept a request body",
            ]
        );
        assert_eq!(violations[1].path, "$.paths['/a'].delete.requestBody");
        assert_eq!(violations[0].start.line, 5);
    }
}

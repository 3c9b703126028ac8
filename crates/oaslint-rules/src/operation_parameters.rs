//! Rule checking parameter lists of path items and operations.
//!
//! Within one list every parameter needs an `in`, and a `(name, in)` pair
//! may only appear once. Across the effective parameters of an operation
//! there is at most one `body` parameter, and `body` and `formData` never
//! mix.

use oaslint_core::model::{reference_of, Parameter};
use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

use std::collections::BTreeSet;

/// Function name of the rule.
pub const NAME: &str = "operationParameters";

/// Checks parameter lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationParameters;

impl OperationParameters {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn check_list(ctx: &RuleContext<'_>, label: &str, params: &[Parameter<'_>], violations: &mut Vec<Violation>) {
    let mut seen = BTreeSet::new();
    for param in params {
        if reference_of(param.node).is_some() {
            continue;
        }
        let Some(location) = param.location() else {
            violations.push(ctx.violation(
                format!("{label} contains a parameter with no `in` value"),
                &param.json_path,
                param.raw,
            ));
            continue;
        };
        let Some(name) = param.name() else {
            continue;
        };
        if !seen.insert((name, location)) {
            violations.push(ctx.violation(
                format!("{label} contains a duplicate parameter `{name}` in `{location}`"),
                &param.json_path,
                param.raw,
            ));
        }
    }
}

fn check_body(ctx: &RuleContext<'_>, label: &str, params: &[Parameter<'_>], violations: &mut Vec<Violation>) {
    let bodies: Vec<&Parameter<'_>> = params.iter().filter(|p| p.location() == Some("body")).collect();
    for extra in bodies.iter().skip(1) {
        violations.push(ctx.violation(
            format!("{label} has more than one `body` parameter"),
            &extra.json_path,
            extra.raw,
        ));
    }
    if bodies.is_empty() {
        return;
    }
    if let Some(form) = params.iter().find(|p| p.location() == Some("formData")) {
        violations.push(ctx.violation(
            format!("{label} mixes `body` and `formData` parameters"),
            &form.json_path,
            form.raw,
        ));
    }
}

impl Rule for OperationParameters {
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

        let mut violations = Vec::new();
        for item in model.path_items() {
            let label = format!("path `{}`", item.path);
            check_list(ctx, &label, &item.parameters(), &mut violations);

            for op in item.operations() {
                let label = format!("the `{}` operation at path `{}`", op.method.to_ascii_uppercase(), op.path);
                check_list(ctx, &label, &op.own_parameters(), &mut violations);
                check_body(ctx, &label, &op.parameters(), &mut violations);
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lint, messages};

    #[test]
    fn test_parameter_lists() {
        let violations = lint(
            &OperationParameters::new(),
            r"openapi: 3.0.3
info: {title: t}
paths:
  /a:
    parameters:
      - {name: trace, in: header}
      - {name: trace, in: header}
    get:
      parameters:
        - {name: limit, in: query}
        - {name: limit}
        - {name: limit, in: header}
      responses: {}
",
        );
        assert_eq!(
            messages(&violations),
            vec![
                "path `/a` contains a duplicate parameter `trace` in `header`",
                "the `GET` operation at path `/a` contains a parameter with no `in` value",
            ]
        );
        assert_eq!(violations[1].path, "$.paths['/a'].get.parameters[1]");
    }

    #[test]
    fn test_body_parameters() {
        let violations = lint(
            &OperationParameters::new(),
            r"swagger: '2.0'
info: {title: t, version: '1'}
paths:
  /a:
    parameters:
      - {name: payload, in: body, schema: {type: object}}
    post:
      parameters:
        - {name: other, in: body, schema: {type: object}}
        - {name: file, in: formData, type: file}
      responses: {}
",
        );
        assert_eq!(
            messages(&violations),
            vec![
                "the `POST` operation at path `/a` has more than one `body` parameter",
                "the `POST` operation at path `/a` mixes `body` and `formData` parameters",
            ]
        );
        assert_eq!(violations[0].path, "$.paths['/a'].post.parameters[0]");
    }
}

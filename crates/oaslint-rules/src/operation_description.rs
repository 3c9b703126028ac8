//! Rule requiring operations, request bodies and responses to be described.
//!
//! # Options
//!
//! - `minWords`: minimum number of words. With the default `0` an
//!   operation is satisfied by either a description or a summary; with a
//!   positive value both are required and both must be long enough.

use oaslint_core::model::Operation;
use oaslint_core::{Category, JsonPath, Node, Rule, RuleContext, RuleSchema, Violation};

/// Function name of the rule.
pub const NAME: &str = "operationDescription";

/// Requires descriptions on operations and their bodies and responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationDescription;

impl OperationDescription {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for OperationDescription {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Descriptions
    }

    fn schema(&self) -> RuleSchema {
        RuleSchema::new(NAME).property("minWords", "minimum number of words in a description")
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(model) = ctx.model else {
            return Vec::new();
        };
        let min_words = ctx.options.get_usize("minWords").unwrap_or(0);

        let mut violations = Vec::new();
        for op in model.operations() {
            check_operation(ctx, &op, min_words, &mut violations);

            if let (Some(body), Some(entry)) = (op.request_body(), op.entry("requestBody")) {
                let path = op.json_path.key("requestBody");
                check_text(
                    ctx,
                    body,
                    "description",
                    min_words,
                    &format!("{} `requestBody`", describe(&op)),
                    &path,
                    entry.key,
                    &mut violations,
                );
            }

            let Some(responses) = op.responses() else {
                continue;
            };
            let base = op.json_path.key("responses");
            for (code, response) in responses.unique_pairs() {
                let response = op.resolve(response);
                if !response.is_mapping() {
                    continue;
                }
                check_text(
                    ctx,
                    response,
                    "description",
                    min_words,
                    &format!("{} response `{}`", describe(&op), code.value),
                    &base.key(code.value.clone()),
                    code,
                    &mut violations,
                );
            }
        }
        violations
    }
}

fn describe(op: &Operation<'_>) -> String {
    format!(
        "operation method `{}` at path `{}`",
        op.method.to_ascii_uppercase(),
        op.path
    )
}

fn check_operation(
    ctx: &RuleContext<'_>,
    op: &Operation<'_>,
    min_words: usize,
    violations: &mut Vec<Violation>,
) {
    let has = |field: &str| op.get(field).and_then(Node::as_text).is_some();
    if min_words == 0 {
        if !has("description") && !has("summary") {
            violations.push(ctx.violation(
                format!("{} is missing a description and a summary", describe(op)),
                &op.json_path,
                op.key,
            ));
        }
        return;
    }
    for field in ["description", "summary"] {
        check_text(
            ctx,
            op.node,
            field,
            min_words,
            &describe(op),
            &op.json_path,
            op.key,
            violations,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn check_text(
    ctx: &RuleContext<'_>,
    owner: &Node,
    field: &str,
    min_words: usize,
    subject: &str,
    path: &JsonPath,
    anchor: &Node,
    violations: &mut Vec<Violation>,
) {
    match owner.entry(field) {
        Some((_, value)) if value.as_text().is_some() => {
            let words = value.as_text().map_or(0, |text| text.split_whitespace().count());
            if words < min_words {
                violations.push(ctx.violation(
                    format!("{subject} has a {field} that must be at least `{min_words}` words long"),
                    &path.key(field),
                    value,
                ));
            }
        }
        _ => violations.push(ctx.violation(
            format!("{subject} is missing a {field}"),
            path,
            anchor,
        )),
    }
}

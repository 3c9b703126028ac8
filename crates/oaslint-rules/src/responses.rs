//! Rules on the response codes an operation declares.
//!
//! - `operation4xxResponse`: at least one client error (`400`–`499` or `4XX`)
//! - `successResponse`: at least one `2xx`/`3xx` code, or one of the
//!   codes listed in the `properties` option
//! - `postResponseSuccess`: `POST` operations declare one of the codes in
//!   `properties` (default `200`, `201`, `202`)

use oaslint_core::model::Operation;
use oaslint_core::{Category, Node, Rule, RuleContext, RuleSchema, Violation};

/// Function name of the client error rule.
pub const CLIENT_ERROR_NAME: &str = "operation4xxResponse";

/// Function name of the success rule.
pub const SUCCESS_NAME: &str = "successResponse";

/// Function name of the `POST` success rule.
pub const POST_SUCCESS_NAME: &str = "postResponseSuccess";

const POST_DEFAULT_CODES: [&str; 3] = ["200", "201", "202"];

fn in_range(code: &str, low: u16, high: u16, wildcard: char) -> bool {
    match code.parse::<u16>() {
        Ok(code) => (low..high).contains(&code),
        Err(_) => {
            code.len() == 3
                && code.starts_with(wildcard)
                && code[1..].eq_ignore_ascii_case("xx")
        }
    }
}

fn report(ctx: &RuleContext<'_>, op: &Operation<'_>, message: String) -> Violation {
    match op.entry("responses") {
        Some(entry) => ctx.violation(message, &op.json_path.key("responses"), entry.key),
        None => ctx.violation(message, &op.json_path, op.key),
    }
}

fn codes_option<'o>(ctx: &'o RuleContext<'_>) -> Option<Vec<&'o str>> {
    ctx.options.get_list("properties").filter(|codes| !codes.is_empty())
}

/// Requires a `4xx` response on every operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Operation4xxResponse;

impl Operation4xxResponse {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for Operation4xxResponse {
    fn name(&self) -> &'static str {
        CLIENT_ERROR_NAME
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
            .filter(|op| !op.response_codes().iter().any(|c| in_range(c, 400, 500, '4')))
            .map(|op| {
                report(
                    ctx,
                    op,
                    format!(
                        "the `{}` operation at path `{}` must define at least one `4xx` error response",
                        op.method.to_ascii_uppercase(),
                        op.path
                    ),
                )
            })
            .collect()
    }
}

/// Requires a success response on every operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuccessResponse;

impl SuccessResponse {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for SuccessResponse {
    fn name(&self) -> &'static str {
        SUCCESS_NAME
    }

    fn category(&self) -> Category {
        Category::Operations
    }

    fn schema(&self) -> RuleSchema {
        RuleSchema::new(SUCCESS_NAME).property("properties", "accepted success codes")
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(model) = ctx.model else {
            return Vec::new();
        };
        let accepted = codes_option(ctx);

        let mut violations = Vec::new();
        for op in model.operations() {
            let codes = op.response_codes();
            let ok = match &accepted {
                Some(accepted) => codes.iter().any(|c| accepted.contains(c)),
                None => codes
                    .iter()
                    .any(|c| in_range(c, 200, 400, '2') || in_range(c, 200, 400, '3')),
            };
            if ok {
                continue;
            }
            let wanted = accepted.as_ref().map_or_else(
                || "a `2xx` or `3xx` response".to_string(),
                |codes| format!("one of the responses `{}`", codes.join("`, `")),
            );
            violations.push(report(
                ctx,
                &op,
                format!(
                    "the `{}` operation at path `{}` must define at least {wanted}",
                    op.method.to_ascii_uppercase(),
                    op.path
                ),
            ));
        }
        violations
    }
}

/// Requires `POST` operations to declare an accepted success code.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostResponseSuccess;

impl PostResponseSuccess {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for PostResponseSuccess {
    fn name(&self) -> &'static str {
        POST_SUCCESS_NAME
    }

    fn category(&self) -> Category {
        Category::Operations
    }

    fn schema(&self) -> RuleSchema {
        RuleSchema::new(POST_SUCCESS_NAME).property("properties", "accepted success codes")
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(model) = ctx.model else {
            return Vec::new();
        };
        let accepted = codes_option(ctx).unwrap_or_else(|| POST_DEFAULT_CODES.to_vec());

        model
            .operations()
            .iter()
            .filter(|op| op.method == "post")
            .filter(|op| !op.response_codes().iter().any(|c| accepted.contains(c)))
            .map(|op| {
                report(
                    ctx,
                    op,
                    format!(
                        "the `POST` operation at path `{}` must define at least one of the success responses `{}`",
                        op.path,
                        accepted.join("`, `")
                    ),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lint, lint_with, messages};
    use oaslint_core::{RuleDefinition, Severity};

    const DOC: &str = r"openapi: 3.0.3
info: {title: t}
paths:
  /a:
    get:
      responses: {'200': {description: ok}, '4XX': {description: bad}}
    post:
      responses: {'204': {description: ok}}
    put:
      responses: {'302': {description: moved}, '404': {description: missing}}
    delete:
      responses: {default: {description: whatever}}
";

    #[test]
    fn test_client_error_responses() {
        let violations = lint(&Operation4xxResponse::new(), DOC);
        assert_eq!(
            messages(&violations),
            vec![
                "the `POST` operation at path `/a` must define at least one `4xx` error response",
                "the `DELETE` operation at path `/a` must define at least one `4xx` error response",
            ]
        );
        assert_eq!(violations[0].path, "$.paths['/a'].post.responses");
    }

    #[test]
    fn test_success_responses() {
        let violations = lint(&SuccessResponse::new(), DOC);
        assert_eq!(
            messages(&violations),
            vec!["the `DELETE` operation at path `/a` must define at least a `2xx` or `3xx` response"]
        );

        let definition = RuleDefinition::new("success", SUCCESS_NAME, Category::Operations, Severity::Warning)
            .option_list("properties", ["200"]);
        let strict = lint_with(&SuccessResponse::new(), definition, DOC);
        assert_eq!(strict.len(), 3);
        assert!(strict[0].message.ends_with("one of the responses `200`"));
    }

    #[test]
    fn test_post_success() {
        let violations = lint(&PostResponseSuccess::new(), DOC);
        assert_eq!(
            messages(&violations),
            vec!["the `POST` operation at path `/a` must define at least one of the success responses `200`, `201`, `202`"]
        );
    }
}

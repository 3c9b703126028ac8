//! Swagger 2.0 rule: operations with `formData` parameters must consume a
//! form media type.

use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

/// Function name of the rule.
pub const NAME: &str = "oas2OperationFormDataConsumeCheck";

const FORM_MEDIA_TYPES: [&str; 2] = ["application/x-www-form-urlencoded", "multipart/form-data"];

/// Checks `consumes` of operations taking form data.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormDataConsumes;

impl FormDataConsumes {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn consumes_form(consumes: Option<&Node>) -> bool {
    consumes.is_some_and(|list| {
        list.items()
            .iter()
            .filter_map(Node::as_str)
            .any(|media| FORM_MEDIA_TYPES.iter().any(|form| media.starts_with(form)))
    })
}

impl Rule for FormDataConsumes {
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
        for op in model.operations() {
            let params = op.parameters();
            let Some(form) = params.iter().find(|p| p.location() == Some("formData")) else {
                continue;
            };
            let consumes = op.get("consumes").or_else(|| ctx.document.get("consumes"));
            if consumes_form(consumes) {
                continue;
            }
            violations.push(ctx.violation(
                format!(
                    "the `{}` operation at path `{}` has `formData` parameters but does not consume `{}`",
                    op.method.to_ascii_uppercase(),
                    op.path,
                    FORM_MEDIA_TYPES.join("` or `")
                ),
                &form.json_path,
                form.raw,
            ));
        }
        violations
    }
}

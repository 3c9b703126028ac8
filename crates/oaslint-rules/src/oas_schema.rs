//! Rule validating the whole document against the OpenAPI meta-schema
//! of its version.
//!
//! Each failure is anchored on the deepest node its instance path
//! reaches. Failures repeating the same location and reason are
//! reported once. A failed `if`/`then`/`else` branch surfaces as the
//! failures nested in the branch, never as a summary of its own.

use crate::meta_schema;

use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

use std::collections::HashSet;
use tracing::{debug, warn};

/// Function name of the rule.
pub const NAME: &str = "oasSchema";

/// Validates the document structure.
#[derive(Debug, Clone, Copy, Default)]
pub struct OasSchema;

impl OasSchema {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for OasSchema {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Validation
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(validator) = ctx.validator else {
            return Vec::new();
        };
        let Some(schema) = meta_schema::for_format(ctx.spec_info.format) else {
            return Vec::new();
        };

        let instance = ctx.document.to_json();
        let failures = match validator.validate(schema, &instance, ctx.spec_info.dialect()) {
            Ok(failures) => failures,
            Err(err) => {
                warn!(format = %ctx.spec_info.format, error = %err, "meta-schema rejected by validator");
                return Vec::new();
            }
        };
        debug!(failures = failures.len(), "document validated");

        let mut seen = HashSet::new();
        let mut violations = Vec::new();
        for failure in failures {
            let (path, node) = ctx.document.locate_pointer(&failure.instance_path);
            let rendered = path.to_string();
            if !seen.insert((rendered, node.line, node.column, failure.reason.clone())) {
                continue;
            }
            violations.push(ctx.violation(format!("schema invalid: {}", failure.reason), &path, node));
        }
        violations
    }
}

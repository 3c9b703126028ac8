//! Rule reporting components nothing refers to, and broken references.
//!
//! A component counts as used when a local `$ref` (including discriminator
//! mappings) points at it or into it. Security schemes count as used when
//! a `security` requirement names them.

use oaslint_core::index::ComponentClass;
use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

use std::collections::BTreeSet;

/// Function name of the rule.
pub const NAME: &str = "unusedComponent";

/// Flags orphaned components and unresolved references.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnusedComponent;

impl UnusedComponent {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for UnusedComponent {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Schemas
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(index) = ctx.index else {
            return Vec::new();
        };

        let schemes_used: BTreeSet<&str> = index.security_requirements.iter().map(|r| r.name).collect();
        let is_used = |reference: &str| {
            let nested = format!("{reference}/");
            index.references_used.contains(reference)
                || index.references_used.iter().any(|used| used.starts_with(&nested))
        };

        let mut violations = Vec::new();
        for component in index.all_components() {
            let used = match component.class {
                ComponentClass::SecuritySchemes => schemes_used.contains(component.name),
                _ => is_used(&component.reference),
            };
            if !used {
                violations.push(ctx.violation(
                    format!("the component `{}` is potentially unused or has been orphaned", component.name),
                    &component.path,
                    component.key,
                ));
            }
        }

        for error in &index.reference_errors {
            violations.push(ctx.violation(error.message.clone(), &error.path.key("$ref"), error.node));
        }
        violations
    }
}

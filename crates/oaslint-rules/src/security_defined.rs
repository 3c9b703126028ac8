//! Rules requiring every `security` requirement to name a defined scheme.
//!
//! OpenAPI 3 schemes live under `components.securitySchemes` (or the
//! container named by the `schemesPath` option); Swagger 2.0 schemes live
//! under `securityDefinitions`.

use oaslint_core::index::SecurityRequirementFact;
use oaslint_core::utils::jsonpath::escape_pointer;
use oaslint_core::{Category, JsonPath, Node, Rule, RuleContext, RuleSchema, Violation};

/// Function name of the OpenAPI 3 rule.
pub const NAME: &str = "operationSecurityDefined";

/// Function name of the Swagger 2.0 rule.
pub const OAS2_NAME: &str = "oas2OperationSecurityDefined";

fn report(ctx: &RuleContext<'_>, requirement: &SecurityRequirementFact<'_>) -> Violation {
    let message = match requirement.operation {
        Some((path, method)) => format!(
            "the `{}` operation at path `{path}` references an undefined security scheme `{}`",
            method.to_ascii_uppercase(),
            requirement.name
        ),
        None => format!(
            "security requirement references an undefined security scheme `{}`",
            requirement.name
        ),
    };
    ctx.violation(message, &requirement.path, requirement.key)
}

/// Checks requirement names against the OpenAPI 3 scheme container.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationSecurityDefined;

impl OperationSecurityDefined {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for OperationSecurityDefined {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn schema(&self) -> RuleSchema {
        RuleSchema::new(NAME).property("schemesPath", "JSON-Path of the security scheme container")
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let (Some(model), Some(index)) = (ctx.model, ctx.index) else {
            return Vec::new();
        };
        let schemes = match ctx.options.get_str("schemesPath") {
            Some(selector) => ctx.document.at(&JsonPath::parse_selector(selector)),
            None => model.security_schemes(),
        };

        index
            .security_requirements
            .iter()
            .filter(|requirement| !schemes.is_some_and(|schemes| schemes.has(requirement.name)))
            .map(|requirement| report(ctx, requirement))
            .collect()
    }
}

/// Checks requirement names against `securityDefinitions`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Oas2OperationSecurityDefined;

impl Oas2OperationSecurityDefined {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for Oas2OperationSecurityDefined {
    fn name(&self) -> &'static str {
        OAS2_NAME
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let (Some(model), Some(index)) = (ctx.model, ctx.index) else {
            return Vec::new();
        };
        let prefix = ctx.spec_info.security_scheme_prefix();

        index
            .security_requirements
            .iter()
            .filter(|requirement| {
                let reference = format!("{prefix}{}", escape_pointer(requirement.name));
                model.resolve_reference(&reference).is_none()
            })
            .map(|requirement| report(ctx, requirement))
            .collect()
    }
}

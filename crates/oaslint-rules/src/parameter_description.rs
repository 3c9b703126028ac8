//! Rule requiring a description on every inline parameter.

use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

/// Function name of the rule.
pub const NAME: &str = "parameterDescription";

/// Flags parameters without a description.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterDescription;

impl ParameterDescription {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ParameterDescription {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Descriptions
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(index) = ctx.index else {
            return Vec::new();
        };

        index
            .parameter_objects
            .iter()
            .filter(|param| param.node.get("description").and_then(Node::as_text).is_none())
            .map(|param| {
                let message = match param.name() {
                    Some(name) => format!("the parameter `{name}` does not contain a description"),
                    None => "a parameter does not contain a description".to_string(),
                };
                let anchor = param.node.entry("name").map_or(param.node, |(key, _)| key);
                ctx.violation(message, &param.path, anchor)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lint, messages};

    #[test]
    fn test_undocumented_parameters() {
        let violations = lint(
            &ParameterDescription::new(),
            r"openapi: 3.0.3
info: {title: t}
paths:
  /a:
    get:
      parameters:
        - {name: limit, in: query, description: Page size}
        - {name: offset, in: query, description: ''}
        - $ref: '#/components/parameters/Sort'
      responses: {}
components:
  parameters:
    Sort: {name: sort, in: query}
",
        );
        assert_eq!(
            messages(&violations),
            vec![
                "the parameter `offset` does not contain a description",
                "the parameter `sort` does not contain a description",
            ]
        );
        assert_eq!(violations[0].path, "$.paths['/a'].get.parameters[1]");
        assert_eq!(violations[1].path, "$.components.parameters.Sort");
    }
}

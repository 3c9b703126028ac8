//! Rule requiring reusable schemas, responses and request bodies to carry
//! a description.

use oaslint_core::index::ComponentClass;
use oaslint_core::model::reference_of;
use oaslint_core::{Category, Node, Rule, RuleContext, RuleSchema, Violation};

/// Function name of the rule.
pub const NAME: &str = "componentDescription";

const CLASSES: [(ComponentClass, &str); 3] = [
    (ComponentClass::Schemas, "schema"),
    (ComponentClass::Responses, "response"),
    (ComponentClass::RequestBodies, "request body"),
];

/// Requires descriptions on described component classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentDescription;

impl ComponentDescription {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ComponentDescription {
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
        let Some(index) = ctx.index else {
            return Vec::new();
        };
        let min_words = ctx.options.get_usize("minWords").unwrap_or(0);

        let mut violations = Vec::new();
        for (class, label) in CLASSES {
            for component in index.components_of(class) {
                if !component.node.is_mapping() || reference_of(component.node).is_some() {
                    continue;
                }
                match component.node.entry("description") {
                    Some((_, value)) if value.as_text().is_some() => {
                        let words = value.as_text().map_or(0, |t| t.split_whitespace().count());
                        if words < min_words {
                            violations.push(ctx.violation(
                                format!(
                                    "{label} component `{}` description must be at least `{min_words}` words long",
                                    component.name
                                ),
                                &component.path.key("description"),
                                value,
                            ));
                        }
                    }
                    _ => violations.push(ctx.violation(
                        format!("{label} component `{}` is missing a description", component.name),
                        &component.path,
                        component.key,
                    )),
                }
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lint, lint_with, messages};
    use oaslint_core::{RuleDefinition, Severity};

    const DOC: &str = r"openapi: 3.0.3
info: {title: t}
paths: {}
components:
  schemas:
    Pet: {type: object, description: A pet in the store}
    Tag: {type: string}
    Alias: {$ref: '#/components/schemas/Pet'}
  responses:
    NotFound: {description: gone}
  requestBodies:
    NewPet:
      content: {application/json: {schema: {$ref: '#/components/schemas/Pet'}}}
  parameters:
    Id: {name: id, in: path}
";

    #[test]
    fn test_flags_missing_descriptions() {
        let violations = lint(&ComponentDescription::new(), DOC);
        assert_eq!(
            messages(&violations),
            vec![
                "schema component `Tag` is missing a description",
                "request body component `NewPet` is missing a description",
            ]
        );
        assert_eq!(violations[0].path, "$.components.schemas.Tag");
    }

    #[test]
    fn test_min_words() {
        let definition =
            RuleDefinition::new("component-description", NAME, Category::Descriptions, Severity::Warning)
                .option("minWords", "2");
        let violations = lint_with(&ComponentDescription::new(), definition, DOC);
        assert!(messages(&violations)
            .contains(&"response component `NotFound` description must be at least `2` words long"));
    }
}

//! Rules for top-level tags: operations may only use declared tags, and
//! declared tags need a description.

use oaslint_core::{Category, JsonPath, Node, Rule, RuleContext, Violation};

/// Function name of the declared-tag rule.
pub const DEFINED_NAME: &str = "tagDefined";

/// Function name of the tag description rule.
pub const DESCRIPTION_NAME: &str = "tagDescription";

/// Flags operation tags missing from the top-level `tags` array.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagDefined;

impl TagDefined {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for TagDefined {
    fn name(&self) -> &'static str {
        DEFINED_NAME
    }

    fn category(&self) -> Category {
        Category::Tags
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(model) = ctx.model else {
            return Vec::new();
        };
        let defined = model.tag_names();

        let mut violations = Vec::new();
        for op in model.operations() {
            let Some(tags) = op.get("tags") else {
                continue;
            };
            let base = op.json_path.key("tags");
            for (i, tag) in tags.items().iter().enumerate() {
                let Some(name) = tag.as_str() else {
                    continue;
                };
                if !defined.contains(&name) {
                    violations.push(ctx.violation(
                        format!("the `{}` operation at path `{}` contains a tag `{name}`, that is not defined in the global document tags", op.method.to_ascii_uppercase(), op.path),
                        &base.index(i),
                        tag,
                    ));
                }
            }
        }
        violations
    }
}

/// Requires a description on every top-level tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagDescription;

impl TagDescription {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for TagDescription {
    fn name(&self) -> &'static str {
        DESCRIPTION_NAME
    }

    fn category(&self) -> Category {
        Category::Tags
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(tags) = ctx.model.and_then(|m| m.tags()) else {
            return Vec::new();
        };

        let base = JsonPath::root().key("tags");
        let mut violations = Vec::new();
        for (i, tag) in tags.value.items().iter().enumerate() {
            if tag.get("description").and_then(Node::as_text).is_some() {
                continue;
            }
            let message = match tag.get("name").and_then(Node::as_str) {
                Some(name) => format!("tag `{name}` must have a description"),
                None => format!("tag at index `{i}` must have a description"),
            };
            violations.push(ctx.violation(message, &base.index(i), tag.get("name").unwrap_or(tag)));
        }
        violations
    }
}

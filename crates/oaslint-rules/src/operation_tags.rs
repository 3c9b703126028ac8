//! Rules for operation tags: at least one, and at most one.

use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

/// Function name of the rule requiring tags.
pub const NAME: &str = "operationTags";

/// Function name of the single-tag rule.
pub const SINGLE_NAME: &str = "operationSingleTag";

/// Requires a non-empty `tags` array on every operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationTags;

impl OperationTags {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for OperationTags {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> Category {
        Category::Tags
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(model) = ctx.model else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        for op in model.operations() {
            let method = op.method.to_ascii_uppercase();
            match op.entry("tags") {
                None => violations.push(ctx.violation(
                    format!("the `{method}` operation at path `{}` does not contain any tags", op.path),
                    &op.json_path,
                    op.key,
                )),
                Some(entry) if entry.value.is_empty() => violations.push(ctx.violation(
                    format!("tags for the `{method}` operation at path `{}` are empty", op.path),
                    &op.json_path.key("tags"),
                    entry.key,
                )),
                Some(_) => {}
            }
        }
        violations
    }
}

/// Flags operations with more than one tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationSingleTag;

impl OperationSingleTag {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for OperationSingleTag {
    fn name(&self) -> &'static str {
        SINGLE_NAME
    }

    fn category(&self) -> Category {
        Category::Tags
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(model) = ctx.model else {
            return Vec::new();
        };

        model
            .operations()
            .iter()
            .filter_map(|op| {
                let entry = op.entry("tags")?;
                (entry.value.len() > 1).then(|| {
                    ctx.violation(
                        format!(
                            "the `{}` operation at path `{}` contains more than one tag ({} is too many)",
                            op.method.to_ascii_uppercase(),
                            op.path,
                            entry.value.len()
                        ),
                        &op.json_path.key("tags"),
                        entry.key,
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lint, messages};

    const DOC: &str = r"swagger: '2.0'
info: {title: t, version: '1'}
paths:
  /a:
    get: {tags: [a], responses: {}}
    put: {tags: [], responses: {}}
    post: {responses: {}}
    patch: {tags: [a, b], responses: {}}
";

    #[test]
    fn test_missing_and_empty_tags() {
        let violations = lint(&OperationTags::new(), DOC);
        assert_eq!(
            messages(&violations),
            vec![
                "tags for the `PUT` operation at path `/a` are empty",
                "the `POST` operation at path `/a` does not contain any tags",
            ]
        );
    }

    #[test]
    fn test_more_than_one_tag() {
        let violations = lint(&OperationSingleTag::new(), DOC);
        assert_eq!(
            messages(&violations),
            vec!["the `PATCH` operation at path `/a` contains more than one tag (2 is too many)"]
        );
        assert_eq!(violations[0].path, "$.paths['/a'].patch.tags");
    }
}

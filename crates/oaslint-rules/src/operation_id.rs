//! Rules for `operationId`: presence and uniqueness.

use oaslint_core::{Category, Node, Rule, RuleContext, Violation};

use std::collections::BTreeMap;

/// Function name of the presence rule.
pub const NAME: &str = "operationId";

/// Function name of the uniqueness rule.
pub const UNIQUE_NAME: &str = "uniqueOperationId";

/// Requires every operation to declare an `operationId`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationId;

impl OperationId {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for OperationId {
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

        model
            .operations()
            .iter()
            .filter(|op| op.operation_id().is_none())
            .map(|op| {
                ctx.violation(
                    format!(
                        "the `{}` operation at path `{}` does not contain an `operationId`",
                        op.method.to_ascii_uppercase(),
                        op.path
                    ),
                    &op.json_path,
                    op.key,
                )
            })
            .collect()
    }
}

/// Flags an `operationId` already used by an earlier operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueOperationId;

impl UniqueOperationId {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for UniqueOperationId {
    fn name(&self) -> &'static str {
        UNIQUE_NAME
    }

    fn category(&self) -> Category {
        Category::Operations
    }

    fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(model) = ctx.model else {
            return Vec::new();
        };

        let mut first: BTreeMap<&str, (&str, &str)> = BTreeMap::new();
        let mut violations = Vec::new();
        for op in model.operations() {
            let (Some(id), Some(entry)) = (op.operation_id(), op.entry("operationId")) else {
                continue;
            };
            match first.get(id) {
                Some((method, path)) => violations.push(ctx.violation(
                    format!(
                        "the `{}` operation at path `{}` contains a duplicate operationId `{id}`, first seen on `{}` at `{path}`",
                        op.method.to_ascii_uppercase(),
                        op.path,
                        method.to_ascii_uppercase(),
                    ),
                    &op.json_path.key("operationId"),
                    entry.value,
                )),
                None => {
                    first.insert(id, (op.method, op.path));
                }
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lint, messages};

    const DOC: &str = r"openapi: 3.0.3
info: {title: t}
paths:
  /pets:
    get: {operationId: listPets, responses: {}}
    post: {operationId: listPets, responses: {}}
  /pets/{id}:
    get: {operationId: '  ', responses: {}}
    delete: {responses: {}}
";

    #[test]
    fn test_missing_operation_ids() {
        let violations = lint(&OperationId::new(), DOC);
        assert_eq!(
            messages(&violations),
            vec![
                "the `GET` operation at path `/pets/{id}` does not contain an `operationId`",
                "the `DELETE` operation at path `/pets/{id}` does not contain an `operationId`",
            ]
        );
    }

    #[test]
    fn test_duplicate_operation_ids() {
        let violations = lint(&UniqueOperationId::new(), DOC);
        assert_eq!(
            messages(&violations),
            vec!["the `POST` operation at path `/pets` contains a duplicate operationId `listPets`, first seen on `GET` at `/pets`"]
        );
        assert_eq!(violations[0].path, "$.paths['/pets'].post.operationId");
    }
}

//! Context types for rule execution.

use crate::index::SpecIndex;
use crate::model::OpenApi;
use crate::node::Node;
use crate::ruleset::{RuleAction, RuleMetadata, RuleOptions};
use crate::spec_info::{NullableEncoding, SpecInfo};
use crate::types::{Range, Violation};
use crate::utils::jsonpath::JsonPath;
use crate::validator::SchemaValidator;

/// Input bundle handed to every rule.
///
/// Everything is borrowed and read-only; the document outlives the
/// context and every violation built from it.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    /// Document root.
    pub document: &'a Node,
    /// Typed model, when available.
    pub model: Option<&'a OpenApi<'a>>,
    /// Pre-extracted facts, when available.
    pub index: Option<&'a SpecIndex<'a>>,
    /// Detected format and version.
    pub spec_info: &'a SpecInfo,
    /// Metadata of the rule being evaluated.
    pub rule: &'a RuleMetadata,
    /// Action of the rule being evaluated.
    pub action: &'a RuleAction,
    /// Decoded options (same as `action.options`).
    pub options: &'a RuleOptions,
    /// Schema validator for example and document validation.
    pub validator: Option<&'a dyn SchemaValidator>,
}

impl<'a> RuleContext<'a> {
    /// Creates a context with only the document and rule bound.
    #[must_use]
    pub fn new(
        document: &'a Node,
        spec_info: &'a SpecInfo,
        rule: &'a RuleMetadata,
        action: &'a RuleAction,
    ) -> Self {
        Self {
            document,
            model: None,
            index: None,
            spec_info,
            rule,
            action,
            options: &action.options,
            validator: None,
        }
    }

    /// Attaches the model.
    #[must_use]
    pub fn with_model(mut self, model: &'a OpenApi<'a>) -> Self {
        self.model = Some(model);
        self
    }

    /// Attaches the index.
    #[must_use]
    pub fn with_index(mut self, index: &'a SpecIndex<'a>) -> Self {
        self.index = Some(index);
        self
    }

    /// Attaches a schema validator.
    #[must_use]
    pub fn with_validator(mut self, validator: &'a dyn SchemaValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Builds a violation anchored to a single node.
    #[must_use]
    pub fn violation(&self, message: impl Into<String>, path: &JsonPath, node: &Node) -> Violation {
        self.violation_between(message, path, node, node)
    }

    /// Builds a violation spanning from `start` to the end of `end`.
    #[must_use]
    pub fn violation_between(
        &self,
        message: impl Into<String>,
        path: &JsonPath,
        start: &Node,
        end: &Node,
    ) -> Violation {
        Violation::new(
            self.rule.id.clone(),
            self.rule.category,
            self.rule.severity,
            self.render_message(message.into()),
            path.to_string(),
            Range::new(start.start(), end.end()),
        )
    }

    /// Builds a violation for a node inside a possibly shared schema,
    /// listing every path at which it is used.
    #[must_use]
    pub fn schema_violation(&self, message: impl Into<String>, path: &JsonPath, node: &Node) -> Violation {
        let violation = self.violation(message, path, node);
        violation.with_paths(self.usage_paths(path))
    }

    /// Every JSON-Path at which the schema location `path` is used.
    #[must_use]
    pub fn usage_paths(&self, path: &JsonPath) -> Vec<String> {
        self.index
            .map_or_else(|| vec![path.to_string()], |index| index.schema_usage_paths(path))
    }

    fn render_message(&self, message: String) -> String {
        match &self.rule.message {
            Some(template) if template.contains("{{error}}") => template.replace("{{error}}", &message),
            Some(template) if !template.is_empty() => template.clone(),
            _ => message,
        }
    }

    /// Whether `$ref` may carry sibling keywords in this document.
    #[must_use]
    pub fn supports_ref_siblings(&self) -> bool {
        self.spec_info.supports_ref_siblings()
    }

    /// How schemas of this document declare nullability.
    #[must_use]
    pub fn nullable_encoding(&self) -> NullableEncoding {
        self.spec_info.nullable_encoding()
    }
}

impl std::fmt::Debug for RuleContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleContext")
            .field("rule", &self.rule.id)
            .field("spec", &self.spec_info.label())
            .field("model", &self.model.is_some())
            .field("index", &self.index.is_some())
            .field("validator", &self.validator.is_some())
            .finish_non_exhaustive()
    }
}

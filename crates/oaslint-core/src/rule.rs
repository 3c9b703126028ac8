//! Rule trait for defining lint rules.

use crate::context::RuleContext;
use crate::node::Node;
use crate::types::{Category, Violation};

/// A lint rule function.
///
/// A rule receives the nodes selected for it (often empty; most rules read
/// the model or the index through the context instead) and returns every
/// violation it finds. Rules never fail: malformed subtrees are skipped and
/// a missing model or index yields an empty result.
///
/// # Example
///
/// ```ignore
/// use oaslint_core::{Category, Rule, RuleContext, Node, Violation};
///
/// pub struct InfoTitle;
///
/// impl Rule for InfoTitle {
///     fn name(&self) -> &'static str { "infoTitle" }
///     fn category(&self) -> Category { Category::Information }
///
///     fn evaluate(&self, _nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation> {
///         let Some(model) = ctx.model else { return Vec::new() };
///         // ...
///         Vec::new()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the camelCase function name (e.g., `operationTags`).
    fn name(&self) -> &'static str;

    /// Returns the category this function belongs to.
    fn category(&self) -> Category;

    /// Declares the options this function recognizes.
    fn schema(&self) -> RuleSchema {
        RuleSchema::new(self.name())
    }

    /// Evaluates the rule and returns violations in a deterministic order.
    fn evaluate(&self, nodes: &[&Node], ctx: &RuleContext<'_>) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Options recognized by a rule function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSchema {
    /// Function name.
    pub name: &'static str,
    /// Recognized option keys.
    pub properties: Vec<RuleProperty>,
}

/// One recognized option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleProperty {
    /// Option key.
    pub name: &'static str,
    /// What the option controls.
    pub description: &'static str,
}

impl RuleSchema {
    /// Creates a schema without options.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            properties: Vec::new(),
        }
    }

    /// Adds an option.
    #[must_use]
    pub fn property(mut self, name: &'static str, description: &'static str) -> Self {
        self.properties.push(RuleProperty { name, description });
        self
    }

    /// Returns true if `key` is a recognized option.
    #[must_use]
    pub fn recognizes(&self, key: &str) -> bool {
        self.properties.iter().any(|p| p.name == key)
    }
}

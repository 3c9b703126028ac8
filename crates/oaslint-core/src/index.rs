//! Pre-extracted facts about a document.
//!
//! [`SpecIndex::build`] walks the literal document tree once. Schemas are
//! found at the locations where the OpenAPI and JSON Schema grammars
//! allow them; `$ref` targets are never followed, so every schema is
//! indexed exactly once at its definition site and cycles cannot occur.
//! Example payloads (`example`, `examples[*].value`, `default`, `const`,
//! `enum`) are not descended into.

use crate::model::{canonical_reference, reference_of, resolve, resolve_reference, OpenApi, Operation};
use crate::node::Node;
use crate::utils::jsonpath::JsonPath;
use crate::utils::paths::is_http_method;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::debug;

/// Keywords whose value is a single subschema.
const SINGLE_SCHEMA_KEYWORDS: [&str; 12] = [
    "items",
    "additionalProperties",
    "additionalItems",
    "not",
    "contains",
    "propertyNames",
    "if",
    "then",
    "else",
    "unevaluatedItems",
    "unevaluatedProperties",
    "contentSchema",
];

/// Keywords whose value maps names to subschemas.
const MAP_SCHEMA_KEYWORDS: [&str; 5] = [
    "properties",
    "patternProperties",
    "dependentSchemas",
    "$defs",
    "definitions",
];

/// Keywords whose value is an array of subschemas.
const ARRAY_SCHEMA_KEYWORDS: [&str; 4] = ["allOf", "anyOf", "oneOf", "prefixItems"];

/// Keys whose values are example payloads rather than document structure.
const PAYLOAD_KEYS: [&str; 4] = ["example", "default", "const", "enum"];

/// Polymorphic keyword a reference was found under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolyKeyword {
    /// `allOf`.
    AllOf,
    /// `oneOf`.
    OneOf,
    /// `anyOf`.
    AnyOf,
}

impl PolyKeyword {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "allOf" => Some(Self::AllOf),
            "oneOf" => Some(Self::OneOf),
            "anyOf" => Some(Self::AnyOf),
            _ => None,
        }
    }

    /// The keyword as written.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllOf => "allOf",
            Self::OneOf => "oneOf",
            Self::AnyOf => "anyOf",
        }
    }
}

/// Class of a reusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentClass {
    /// `components/schemas` or `definitions`.
    Schemas,
    /// `components/responses` or `responses`.
    Responses,
    /// `components/parameters` or `parameters`.
    Parameters,
    /// `components/examples`.
    Examples,
    /// `components/requestBodies`.
    RequestBodies,
    /// `components/headers`.
    Headers,
    /// `components/securitySchemes` or `securityDefinitions`.
    SecuritySchemes,
    /// `components/links`.
    Links,
    /// `components/callbacks`.
    Callbacks,
    /// `components/pathItems`.
    PathItems,
}

impl ComponentClass {
    const OAS3: [Self; 10] = [
        Self::Schemas,
        Self::Responses,
        Self::Parameters,
        Self::Examples,
        Self::RequestBodies,
        Self::Headers,
        Self::SecuritySchemes,
        Self::Links,
        Self::Callbacks,
        Self::PathItems,
    ];

    /// Key of the class under `components`.
    #[must_use]
    pub fn oas3_key(self) -> &'static str {
        match self {
            Self::Schemas => "schemas",
            Self::Responses => "responses",
            Self::Parameters => "parameters",
            Self::Examples => "examples",
            Self::RequestBodies => "requestBodies",
            Self::Headers => "headers",
            Self::SecuritySchemes => "securitySchemes",
            Self::Links => "links",
            Self::Callbacks => "callbacks",
            Self::PathItems => "pathItems",
        }
    }

    /// Top-level key of the class in Swagger 2.0, if it exists there.
    #[must_use]
    pub fn swagger_key(self) -> Option<&'static str> {
        match self {
            Self::Schemas => Some("definitions"),
            Self::Responses => Some("responses"),
            Self::Parameters => Some("parameters"),
            Self::SecuritySchemes => Some("securityDefinitions"),
            _ => None,
        }
    }
}

impl fmt::Display for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.oas3_key())
    }
}

/// A schema object.
#[derive(Debug, Clone)]
pub struct SchemaFact<'a> {
    /// The schema mapping.
    pub node: &'a Node,
    /// Key node of the entry holding the schema (absent for array items).
    pub key: Option<&'a Node>,
    /// Location of the schema.
    pub path: JsonPath,
    /// Index of the enclosing schema in [`SpecIndex::schemas`].
    pub parent: Option<usize>,
    /// Keyword of the parent through which this schema was reached.
    pub via: Option<&'static str>,
}

/// A `description` or `summary` scalar.
#[derive(Debug, Clone)]
pub struct TextFact<'a> {
    /// The text as written.
    pub value: &'a str,
    /// Key node.
    pub key: &'a Node,
    /// Scalar node.
    pub node: &'a Node,
    /// Location of the scalar.
    pub path: JsonPath,
}

/// An `enum` keyword.
#[derive(Debug, Clone)]
pub struct EnumFact<'a> {
    /// Schema (or Swagger parameter) holding the enum.
    pub schema: &'a Node,
    /// The `type` value, if declared.
    pub type_node: Option<&'a Node>,
    /// Key node of `enum`.
    pub key: &'a Node,
    /// The enum array.
    pub values: &'a Node,
    /// Location of the schema.
    pub schema_path: JsonPath,
    /// Location of the enum array.
    pub path: JsonPath,
}

/// A `$ref` occurrence.
#[derive(Debug, Clone)]
pub struct ReferenceFact<'a> {
    /// Reference as written.
    pub reference: &'a str,
    /// Canonical local reference; `None` for external ones.
    pub target: Option<String>,
    /// Key node of `$ref`.
    pub key: &'a Node,
    /// Value node of `$ref`.
    pub node: &'a Node,
    /// Mapping that holds the `$ref`.
    pub parent: &'a Node,
    /// Location of that mapping.
    pub path: JsonPath,
    /// Polymorphic keyword this reference sits under.
    pub poly: Option<PolyKeyword>,
}

impl ReferenceFact<'_> {
    /// Keys next to `$ref` in the same mapping.
    #[must_use]
    pub fn sibling_keys(&self) -> Vec<&str> {
        self.parent
            .pairs()
            .map(|(k, _)| k.value.as_str())
            .filter(|k| *k != "$ref")
            .collect()
    }
}

/// A reusable component.
#[derive(Debug, Clone)]
pub struct ComponentFact<'a> {
    /// Component class.
    pub class: ComponentClass,
    /// Component name.
    pub name: &'a str,
    /// Key node.
    pub key: &'a Node,
    /// Component value.
    pub node: &'a Node,
    /// Local reference addressing it.
    pub reference: String,
    /// Location of the component.
    pub path: JsonPath,
}

/// A parameter object.
#[derive(Debug, Clone)]
pub struct ParameterFact<'a> {
    /// Parameter as written.
    pub raw: &'a Node,
    /// Parameter after `$ref` resolution.
    pub node: &'a Node,
    /// Location of the declaration.
    pub path: JsonPath,
    /// Path template for operation parameters.
    pub template: Option<&'a str>,
    /// Method, or `top` for path-item parameters.
    pub method: Option<&'a str>,
}

impl<'a> ParameterFact<'a> {
    /// The `name` field.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.node.get("name").and_then(Node::as_str)
    }

    /// The `in` field.
    #[must_use]
    pub fn location(&self) -> Option<&'a str> {
        self.node.get("in").and_then(Node::as_str)
    }

    /// Returns true if declared through `$ref`.
    #[must_use]
    pub fn is_ref(&self) -> bool {
        reference_of(self.raw).is_some()
    }
}

/// A media type object, or a header object.
#[derive(Debug, Clone)]
pub struct ObjectFact<'a> {
    /// Media type or header name.
    pub name: &'a str,
    /// Key node.
    pub key: &'a Node,
    /// Object value.
    pub node: &'a Node,
    /// Location of the object.
    pub path: JsonPath,
}

/// One scheme name inside a `security` requirement.
#[derive(Debug, Clone)]
pub struct SecurityRequirementFact<'a> {
    /// Scheme name.
    pub name: &'a str,
    /// Key node of the name.
    pub key: &'a Node,
    /// Location of the requirement entry.
    pub path: JsonPath,
    /// `(path, method)` for operation-level requirements.
    pub operation: Option<(&'a str, &'a str)>,
}

/// A reference that could not be resolved.
#[derive(Debug, Clone)]
pub struct ReferenceError<'a> {
    /// Reference as written.
    pub reference: &'a str,
    /// Value node of `$ref`.
    pub node: &'a Node,
    /// Location of the mapping holding `$ref`.
    pub path: JsonPath,
    /// Resolver message.
    pub message: String,
}

/// Fact collections for one document.
#[derive(Debug, Default)]
pub struct SpecIndex<'a> {
    /// Every schema object, in walk order.
    pub schemas: Vec<SchemaFact<'a>>,
    /// Every operation, in document order.
    pub operations: Vec<Operation<'a>>,
    /// Component parameters (or Swagger top-level parameters).
    pub parameters: Vec<ParameterFact<'a>>,
    /// Path-item (`method = "top"`) and operation parameters.
    pub operation_parameters: Vec<ParameterFact<'a>>,
    /// Every inline parameter object, component or operation level.
    pub parameter_objects: Vec<ParameterFact<'a>>,
    /// Every media type object.
    pub media_types: Vec<ObjectFact<'a>>,
    /// Every header object.
    pub headers: Vec<ObjectFact<'a>>,
    /// Every `description` scalar.
    pub descriptions: Vec<TextFact<'a>>,
    /// Every `summary` scalar.
    pub summaries: Vec<TextFact<'a>>,
    /// Every enum.
    pub enums: Vec<EnumFact<'a>>,
    /// Components by class, keyed by reference.
    pub components: BTreeMap<ComponentClass, BTreeMap<String, ComponentFact<'a>>>,
    /// Every `$ref` occurrence.
    pub references: Vec<ReferenceFact<'a>>,
    /// Canonical local references used anywhere.
    pub references_used: BTreeSet<String>,
    /// Resolved targets of local references.
    pub mapped_references: BTreeMap<String, &'a Node>,
    /// Security requirement names at root and operation level.
    pub security_requirements: Vec<SecurityRequirementFact<'a>>,
    /// Broken local references.
    pub reference_errors: Vec<ReferenceError<'a>>,
}

impl<'a> SpecIndex<'a> {
    /// Builds the index for a model.
    #[must_use]
    pub fn build(model: &OpenApi<'a>) -> Self {
        let mut index = Self::default();
        let mut walker = Walker {
            index: &mut index,
            root: model.root(),
        };
        if model.spec_info().is_oas3() {
            walker.walk_oas3();
        } else {
            walker.walk_swagger();
        }
        walker.walk_raw(model.root(), &JsonPath::root(), None, false);
        walker.walk_security(model.root().get("security"), &JsonPath::root().key("security"), None);
        index.operations = model.operations();
        index.resolve_references();
        debug!(
            schemas = index.schemas.len(),
            operations = index.operations.len(),
            references = index.references.len(),
            "index built"
        );
        index
    }

    /// References found under `allOf`.
    #[must_use]
    pub fn poly_all_of(&self) -> Vec<&ReferenceFact<'a>> {
        self.poly(PolyKeyword::AllOf)
    }

    /// References found under `oneOf`.
    #[must_use]
    pub fn poly_one_of(&self) -> Vec<&ReferenceFact<'a>> {
        self.poly(PolyKeyword::OneOf)
    }

    /// References found under `anyOf`.
    #[must_use]
    pub fn poly_any_of(&self) -> Vec<&ReferenceFact<'a>> {
        self.poly(PolyKeyword::AnyOf)
    }

    fn poly(&self, keyword: PolyKeyword) -> Vec<&ReferenceFact<'a>> {
        self.references
            .iter()
            .filter(|r| r.poly == Some(keyword))
            .collect()
    }

    /// References that have neighbouring keys.
    #[must_use]
    pub fn reference_siblings(&self) -> Vec<&ReferenceFact<'a>> {
        self.references
            .iter()
            .filter(|r| r.parent.len() > 1)
            .collect()
    }

    /// Components of one class, ordered by reference.
    pub fn components_of(&self, class: ComponentClass) -> impl Iterator<Item = &ComponentFact<'a>> {
        self.components.get(&class).into_iter().flat_map(BTreeMap::values)
    }

    /// All components, ordered by class then reference.
    pub fn all_components(&self) -> impl Iterator<Item = &ComponentFact<'a>> {
        self.components.values().flat_map(BTreeMap::values)
    }

    /// Path template → method → tag names.
    #[must_use]
    pub fn operation_tags(&self) -> BTreeMap<&'a str, BTreeMap<&'a str, Vec<&'a str>>> {
        let mut tags: BTreeMap<&'a str, BTreeMap<&'a str, Vec<&'a str>>> = BTreeMap::new();
        for op in &self.operations {
            tags.entry(op.path).or_default().insert(op.method, op.tags());
        }
        tags
    }

    /// Parameters of one operation: `method = "top"` for path-item level.
    #[must_use]
    pub fn parameters_for(&self, template: &str, method: &str) -> Vec<&ParameterFact<'a>> {
        self.operation_parameters
            .iter()
            .filter(|p| p.template == Some(template) && p.method == Some(method))
            .collect()
    }

    /// Every JSON-Path at which the schema at `path` is used.
    ///
    /// If `path` lies inside a schema component, the result holds `path`
    /// itself followed by the same location seen through each `$ref` to
    /// that component, transitively. Otherwise it is just `[path]`.
    #[must_use]
    pub fn schema_usage_paths(&self, path: &JsonPath) -> Vec<String> {
        let mut paths = vec![path.to_string()];
        let mut pending = vec![path.clone()];
        let mut visited = BTreeSet::new();

        while let Some(current) = pending.pop() {
            let Some(component) = self
                .components_of(ComponentClass::Schemas)
                .find(|c| current.strip_prefix(&c.path).is_some())
            else {
                continue;
            };
            if !visited.insert(component.reference.clone()) {
                continue;
            }
            let Some(tail) = current.strip_prefix(&component.path) else {
                continue;
            };
            for reference in &self.references {
                if reference.target.as_deref() != Some(component.reference.as_str()) {
                    continue;
                }
                let use_site = reference.path.join(tail);
                let rendered = use_site.to_string();
                if !paths.contains(&rendered) {
                    paths.push(rendered);
                    pending.push(use_site);
                }
            }
        }
        paths
    }

    fn resolve_references(&mut self) {
        let targets = self.references.iter().filter_map(|r| r.target.clone());
        self.references_used.extend(targets);
    }
}

struct Walker<'a, 'i> {
    index: &'i mut SpecIndex<'a>,
    root: &'a Node,
}

impl<'a> Walker<'a, '_> {
    fn walk_oas3(&mut self) {
        let root = self.root;
        let base = JsonPath::root();
        if let Some(paths) = root.get("paths") {
            self.walk_paths(paths, &base.key("paths"));
        }
        if let Some(webhooks) = root.get("webhooks") {
            let hooks = base.key("webhooks");
            for (key, item) in webhooks.unique_pairs() {
                self.walk_path_item(None, item, &hooks.key(key.value.clone()));
            }
        }
        let Some(components) = root.get("components") else {
            return;
        };
        let components_path = base.key("components");
        for class in ComponentClass::OAS3 {
            let Some(map) = components.get(class.oas3_key()) else {
                continue;
            };
            let class_path = components_path.key(class.oas3_key());
            for (key, value) in map.unique_pairs() {
                let path = class_path.key(key.value.clone());
                self.record_component(class, key, value, &path);
                match class {
                    ComponentClass::Schemas => self.walk_schema(value, Some(key), &path, None, None),
                    ComponentClass::Responses => self.walk_response(value, &path),
                    ComponentClass::Parameters => {
                        if let Some(fact) = self.walk_parameter(value, &path, None, None) {
                            self.index.parameters.push(fact);
                        }
                    }
                    ComponentClass::RequestBodies => self.walk_request_body(value, &path),
                    ComponentClass::Headers => self.walk_header(key, value, &path),
                    ComponentClass::Callbacks => self.walk_callback(value, &path),
                    ComponentClass::PathItems => self.walk_path_item(None, value, &path),
                    ComponentClass::Examples
                    | ComponentClass::SecuritySchemes
                    | ComponentClass::Links => {}
                }
            }
        }
    }

    fn walk_swagger(&mut self) {
        let root = self.root;
        let base = JsonPath::root();
        if let Some(paths) = root.get("paths") {
            self.walk_paths(paths, &base.key("paths"));
        }
        for class in [
            ComponentClass::Schemas,
            ComponentClass::Parameters,
            ComponentClass::Responses,
            ComponentClass::SecuritySchemes,
        ] {
            let Some(key_name) = class.swagger_key() else {
                continue;
            };
            let Some(map) = root.get(key_name) else {
                continue;
            };
            let class_path = base.key(key_name);
            for (key, value) in map.unique_pairs() {
                let path = class_path.key(key.value.clone());
                self.record_component(class, key, value, &path);
                match class {
                    ComponentClass::Schemas => self.walk_schema(value, Some(key), &path, None, None),
                    ComponentClass::Parameters => {
                        if let Some(fact) = self.walk_parameter(value, &path, None, None) {
                            self.index.parameters.push(fact);
                        }
                    }
                    ComponentClass::Responses => self.walk_response(value, &path),
                    _ => {}
                }
            }
        }
    }

    fn record_component(&mut self, class: ComponentClass, key: &'a Node, node: &'a Node, path: &JsonPath) {
        let reference = path.to_reference();
        self.index.components.entry(class).or_default().insert(
            reference.clone(),
            ComponentFact {
                class,
                name: key.value.as_str(),
                key,
                node,
                reference,
                path: path.clone(),
            },
        );
    }

    fn walk_paths(&mut self, paths: &'a Node, base: &JsonPath) {
        for (key, item) in paths.unique_pairs() {
            self.walk_path_item(Some(key.value.as_str()), item, &base.key(key.value.clone()));
        }
    }

    fn walk_path_item(&mut self, template: Option<&'a str>, item: &'a Node, path: &JsonPath) {
        if !item.is_mapping() || reference_of(item).is_some() {
            return;
        }
        self.walk_parameter_list(item, path, template, Some("top"));
        for (key, op) in item.unique_pairs() {
            if is_http_method(&key.value) && op.is_mapping() {
                self.walk_operation(template, key.value.as_str(), op, &path.key(key.value.clone()));
            }
        }
    }

    fn walk_operation(&mut self, template: Option<&'a str>, method: &'a str, op: &'a Node, path: &JsonPath) {
        if reference_of(op).is_some() {
            return;
        }
        self.walk_parameter_list(op, path, template, Some(method));
        if let Some(body) = op.get("requestBody") {
            self.walk_request_body(body, &path.key("requestBody"));
        }
        if let Some(responses) = op.get("responses") {
            let base = path.key("responses");
            for (code, response) in responses.unique_pairs() {
                self.walk_response(response, &base.key(code.value.clone()));
            }
        }
        if let Some(callbacks) = op.get("callbacks") {
            let base = path.key("callbacks");
            for (name, callback) in callbacks.unique_pairs() {
                self.walk_callback(callback, &base.key(name.value.clone()));
            }
        }
        let operation = template.map(|t| (t, method));
        self.walk_security(op.get("security"), &path.key("security"), operation);
    }

    fn walk_callback(&mut self, callback: &'a Node, path: &JsonPath) {
        if reference_of(callback).is_some() {
            return;
        }
        for (expression, item) in callback.unique_pairs() {
            self.walk_path_item(None, item, &path.key(expression.value.clone()));
        }
    }

    fn walk_parameter_list(
        &mut self,
        owner: &'a Node,
        owner_path: &JsonPath,
        template: Option<&'a str>,
        method: Option<&'a str>,
    ) {
        let Some(params) = owner.get("parameters") else {
            return;
        };
        let base = owner_path.key("parameters");
        for (i, param) in params.items().iter().enumerate() {
            if let Some(fact) = self.walk_parameter(param, &base.index(i), template, method) {
                if template.is_some() {
                    self.index.operation_parameters.push(fact);
                }
            }
        }
    }

    fn walk_parameter(
        &mut self,
        param: &'a Node,
        path: &JsonPath,
        template: Option<&'a str>,
        method: Option<&'a str>,
    ) -> Option<ParameterFact<'a>> {
        if !param.is_mapping() {
            return None;
        }
        let fact = ParameterFact {
            raw: param,
            node: resolve(self.root, param),
            path: path.clone(),
            template,
            method,
        };
        if reference_of(param).is_some() {
            return Some(fact);
        }
        self.index.parameter_objects.push(fact.clone());
        if let Some(schema) = param.entry("schema") {
            self.walk_schema(schema.1, Some(schema.0), &path.key("schema"), None, None);
        } else {
            // Swagger 2.0 non-body parameters carry schema keywords inline.
            self.record_enum(param, path);
            if let Some((key, items)) = param.entry("items") {
                self.walk_schema(items, Some(key), &path.key("items"), None, None);
            }
        }
        if let Some(content) = param.get("content") {
            self.walk_content(content, &path.key("content"));
        }
        Some(fact)
    }

    fn walk_request_body(&mut self, body: &'a Node, path: &JsonPath) {
        if reference_of(body).is_some() {
            return;
        }
        if let Some(content) = body.get("content") {
            self.walk_content(content, &path.key("content"));
        }
    }

    fn walk_response(&mut self, response: &'a Node, path: &JsonPath) {
        if !response.is_mapping() || reference_of(response).is_some() {
            return;
        }
        if let Some((key, schema)) = response.entry("schema") {
            self.walk_schema(schema, Some(key), &path.key("schema"), None, None);
        }
        if let Some(headers) = response.get("headers") {
            let base = path.key("headers");
            for (name, header) in headers.unique_pairs() {
                self.walk_header(name, header, &base.key(name.value.clone()));
            }
        }
        if let Some(content) = response.get("content") {
            self.walk_content(content, &path.key("content"));
        }
    }

    fn walk_header(&mut self, name: &'a Node, header: &'a Node, path: &JsonPath) {
        if !header.is_mapping() || reference_of(header).is_some() {
            return;
        }
        self.index.headers.push(ObjectFact {
            name: name.value.as_str(),
            key: name,
            node: header,
            path: path.clone(),
        });
        if let Some((key, schema)) = header.entry("schema") {
            self.walk_schema(schema, Some(key), &path.key("schema"), None, None);
        } else {
            self.record_enum(header, path);
            if let Some((key, items)) = header.entry("items") {
                self.walk_schema(items, Some(key), &path.key("items"), None, None);
            }
        }
        if let Some(content) = header.get("content") {
            self.walk_content(content, &path.key("content"));
        }
    }

    fn walk_content(&mut self, content: &'a Node, path: &JsonPath) {
        for (name, media) in content.unique_pairs() {
            if !media.is_mapping() {
                continue;
            }
            let media_path = path.key(name.value.clone());
            self.index.media_types.push(ObjectFact {
                name: name.value.as_str(),
                key: name,
                node: media,
                path: media_path.clone(),
            });
            if let Some((key, schema)) = media.entry("schema") {
                self.walk_schema(schema, Some(key), &media_path.key("schema"), None, None);
            }
            if let Some(encoding) = media.get("encoding") {
                let encoding_path = media_path.key("encoding");
                for (property, spec) in encoding.unique_pairs() {
                    let Some(headers) = spec.get("headers") else {
                        continue;
                    };
                    let headers_path = encoding_path.key(property.value.clone()).key("headers");
                    for (header_name, header) in headers.unique_pairs() {
                        self.walk_header(header_name, header, &headers_path.key(header_name.value.clone()));
                    }
                }
            }
        }
    }

    fn walk_schema(
        &mut self,
        schema: &'a Node,
        key: Option<&'a Node>,
        path: &JsonPath,
        parent: Option<usize>,
        via: Option<&'static str>,
    ) {
        if !schema.is_mapping() {
            return;
        }
        let id = self.index.schemas.len();
        self.index.schemas.push(SchemaFact {
            node: schema,
            key,
            path: path.clone(),
            parent,
            via,
        });
        self.record_enum(schema, path);

        if let Some(mapping) = schema.get("discriminator").and_then(|d| d.get("mapping")) {
            for (_, target) in mapping.pairs() {
                if let Some(reference) = target.as_str().and_then(canonical_reference) {
                    self.index.references_used.insert(reference);
                }
            }
        }

        for keyword in SINGLE_SCHEMA_KEYWORDS {
            let Some((k, value)) = schema.entry(keyword) else {
                continue;
            };
            if value.is_sequence() {
                for (i, item) in value.items().iter().enumerate() {
                    self.walk_schema(item, None, &path.key(keyword).index(i), Some(id), Some(keyword));
                }
            } else {
                self.walk_schema(value, Some(k), &path.key(keyword), Some(id), Some(keyword));
            }
        }
        for keyword in MAP_SCHEMA_KEYWORDS {
            let Some(map) = schema.get(keyword) else {
                continue;
            };
            let base = path.key(keyword);
            for (name, value) in map.unique_pairs() {
                self.walk_schema(value, Some(name), &base.key(name.value.clone()), Some(id), Some(keyword));
            }
        }
        for keyword in ARRAY_SCHEMA_KEYWORDS {
            let Some(list) = schema.get(keyword) else {
                continue;
            };
            let base = path.key(keyword);
            for (i, item) in list.items().iter().enumerate() {
                self.walk_schema(item, None, &base.index(i), Some(id), Some(keyword));
            }
        }
    }

    fn record_enum(&mut self, owner: &'a Node, path: &JsonPath) {
        let Some((key, values)) = owner.entry("enum") else {
            return;
        };
        if !values.is_sequence() {
            return;
        }
        self.index.enums.push(EnumFact {
            schema: owner,
            type_node: owner.get("type"),
            key,
            values,
            schema_path: path.clone(),
            path: path.key("enum"),
        });
    }

    fn walk_security(
        &mut self,
        security: Option<&'a Node>,
        path: &JsonPath,
        operation: Option<(&'a str, &'a str)>,
    ) {
        let Some(security) = security else {
            return;
        };
        for (i, requirement) in security.items().iter().enumerate() {
            let entry_path = path.index(i);
            for (name, _) in requirement.pairs() {
                self.index.security_requirements.push(SecurityRequirementFact {
                    name: name.value.as_str(),
                    key: name,
                    path: entry_path.key(name.value.clone()),
                    operation,
                });
            }
        }
    }

    /// Collects descriptions, summaries and references from the raw tree.
    fn walk_raw(&mut self, node: &'a Node, path: &JsonPath, sequence_key: Option<&str>, example_object: bool) {
        if node.is_mapping() {
            if let Some((key, value)) = node.entry("$ref") {
                if let Some(reference) = value.as_str() {
                    self.record_reference(reference, key, value, node, path, sequence_key);
                }
            }
            for (key, value) in node.unique_pairs() {
                let name = key.value.as_str();
                if PAYLOAD_KEYS.contains(&name) || (example_object && name == "value") {
                    continue;
                }
                if name == "examples" && value.is_sequence() {
                    continue;
                }
                let child = path.key(name);
                if matches!(name, "description" | "summary") && value.is_scalar() {
                    if let Some(text) = value.as_str() {
                        let fact = TextFact {
                            value: text,
                            key,
                            node: value,
                            path: child,
                        };
                        if name == "description" {
                            self.index.descriptions.push(fact);
                        } else {
                            self.index.summaries.push(fact);
                        }
                    }
                    continue;
                }
                if name == "examples" {
                    for (example_name, example) in value.unique_pairs() {
                        self.walk_raw(example, &child.key(example_name.value.clone()), None, true);
                    }
                    continue;
                }
                self.walk_raw(value, &child, value.is_sequence().then_some(name), false);
            }
        } else if node.is_sequence() {
            for (i, item) in node.items().iter().enumerate() {
                self.walk_raw(item, &path.index(i), sequence_key, false);
            }
        }
    }

    fn record_reference(
        &mut self,
        reference: &'a str,
        key: &'a Node,
        node: &'a Node,
        parent: &'a Node,
        path: &JsonPath,
        sequence_key: Option<&str>,
    ) {
        let target = canonical_reference(reference);
        if let Some(target) = &target {
            match resolve_reference(self.root, target) {
                Some(resolved) => {
                    self.index.mapped_references.insert(target.clone(), resolved);
                }
                None => self.index.reference_errors.push(ReferenceError {
                    reference,
                    node,
                    path: path.clone(),
                    message: format!("component `{reference}` does not exist in the specification"),
                }),
            }
        }
        self.index.references.push(ReferenceFact {
            reference,
            target,
            key,
            node,
            parent,
            path: path.clone(),
            poly: sequence_key.and_then(PolyKeyword::from_key),
        });
    }
}

//! Typed view over the document tree.
//!
//! Every view borrows the [`Node`]s it was built from, so findings can be
//! anchored on the exact key or value a rule looked at. `$ref`s are
//! resolved against the same document; external references are left
//! unresolved.

use crate::node::Node;
use crate::spec_info::SpecInfo;
use crate::utils::jsonpath::{unescape_pointer, JsonPath};
use crate::utils::paths::is_http_method;

/// Maximum number of `$ref` hops followed by [`resolve`].
const MAX_REF_DEPTH: usize = 16;

/// A key node and its value.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    /// Key node.
    pub key: &'a Node,
    /// Value node.
    pub value: &'a Node,
}

/// Resolves a local reference (`#/components/schemas/Pet`).
///
/// Returns `None` for external references and for pointers that lead
/// nowhere.
#[must_use]
pub fn resolve_reference<'a>(document: &'a Node, reference: &str) -> Option<&'a Node> {
    let fragment = reference.strip_prefix('#')?;
    let pointer = urlencoding::decode(fragment).ok()?;
    let mut current = document.root();
    for raw in pointer.split('/').skip(1) {
        let key = unescape_pointer(raw);
        current = if current.is_sequence() {
            current.items().get(key.parse::<usize>().ok()?)?
        } else {
            current.get(&key)?
        };
    }
    Some(current)
}

/// Canonical form of a local reference, or `None` for external ones.
///
/// Percent-encoding differences are removed so that `#/paths/~1a%7Bid%7D`
/// and `#/paths/~1a{id}` compare equal.
#[must_use]
pub fn canonical_reference(reference: &str) -> Option<String> {
    let fragment = reference.strip_prefix('#')?;
    let pointer = urlencoding::decode(fragment).ok()?;
    let mut path = JsonPath::root();
    for raw in pointer.split('/').skip(1) {
        path = path.key(unescape_pointer(raw));
    }
    Some(path.to_reference())
}

/// Returns the `$ref` string of a reference object.
#[must_use]
pub fn reference_of(node: &Node) -> Option<&str> {
    node.get("$ref").and_then(Node::as_str)
}

/// Follows `$ref` chains from `node`.
///
/// Stops at the first node without a resolvable `$ref`, and after a
/// fixed number of hops so cycles terminate.
#[must_use]
pub fn resolve<'a>(document: &'a Node, node: &'a Node) -> &'a Node {
    let mut current = node;
    for _ in 0..MAX_REF_DEPTH {
        match reference_of(current).and_then(|r| resolve_reference(document, r)) {
            Some(target) => current = target,
            None => break,
        }
    }
    current
}

/// The OpenAPI document as a whole.
#[derive(Debug, Clone)]
pub struct OpenApi<'a> {
    root: &'a Node,
    spec_info: SpecInfo,
}

impl<'a> OpenApi<'a> {
    /// Wraps a parsed document.
    #[must_use]
    pub fn new(document: &'a Node, spec_info: SpecInfo) -> Self {
        Self {
            root: document.root(),
            spec_info,
        }
    }

    /// The root mapping.
    #[must_use]
    pub fn root(&self) -> &'a Node {
        self.root
    }

    /// Detected format and version.
    #[must_use]
    pub fn spec_info(&self) -> &SpecInfo {
        &self.spec_info
    }

    /// A top-level entry.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<Entry<'a>> {
        self.root.entry(key).map(|(key, value)| Entry { key, value })
    }

    /// The `info` object.
    #[must_use]
    pub fn info(&self) -> Option<Entry<'a>> {
        self.entry("info")
    }

    /// The `servers` array.
    #[must_use]
    pub fn servers(&self) -> Option<Entry<'a>> {
        self.entry("servers")
    }

    /// The top-level `tags` array.
    #[must_use]
    pub fn tags(&self) -> Option<Entry<'a>> {
        self.entry("tags")
    }

    /// Names of the top-level tags.
    #[must_use]
    pub fn tag_names(&self) -> Vec<&'a str> {
        self.tags()
            .map(|tags| {
                tags.value
                    .items()
                    .iter()
                    .filter_map(|t| t.get("name").and_then(Node::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The container of security scheme definitions for this version.
    #[must_use]
    pub fn security_schemes(&self) -> Option<&'a Node> {
        if self.spec_info.is_oas3() {
            self.root.get("components")?.get("securitySchemes")
        } else {
            self.root.get("securityDefinitions")
        }
    }

    /// Resolves a local reference.
    #[must_use]
    pub fn resolve_reference(&self, reference: &str) -> Option<&'a Node> {
        resolve_reference(self.root, reference)
    }

    /// Follows `$ref` chains from `node`.
    #[must_use]
    pub fn resolve(&self, node: &'a Node) -> &'a Node {
        resolve(self.root, node)
    }

    /// Path items in document order, duplicate paths collapsed to their
    /// last definition.
    #[must_use]
    pub fn path_items(&self) -> Vec<PathItem<'a>> {
        let Some(paths) = self.root.get("paths") else {
            return Vec::new();
        };
        let base = JsonPath::root().key("paths");
        paths
            .unique_pairs()
            .filter(|(_, value)| value.is_mapping())
            .map(|(key, raw)| PathItem {
                path: key.value.as_str(),
                key,
                raw,
                node: self.resolve(raw),
                json_path: base.key(key.value.clone()),
                root: self.root,
            })
            .collect()
    }

    /// Every operation of every path item.
    #[must_use]
    pub fn operations(&self) -> Vec<Operation<'a>> {
        self.path_items()
            .iter()
            .flat_map(PathItem::operations)
            .collect()
    }
}

/// One entry of `paths`.
#[derive(Debug, Clone)]
pub struct PathItem<'a> {
    /// Path template.
    pub path: &'a str,
    /// Key node of the template.
    pub key: &'a Node,
    /// The path item as written (possibly a `$ref`).
    pub raw: &'a Node,
    /// The path item after `$ref` resolution.
    pub node: &'a Node,
    /// `$.paths['<template>']`.
    pub json_path: JsonPath,
    root: &'a Node,
}

impl<'a> PathItem<'a> {
    /// Returns true if the path item is declared through `$ref`.
    #[must_use]
    pub fn is_ref(&self) -> bool {
        reference_of(self.raw).is_some()
    }

    /// Operations in document order.
    #[must_use]
    pub fn operations(&self) -> Vec<Operation<'a>> {
        self.node
            .unique_pairs()
            .filter(|(key, value)| is_http_method(&key.value) && value.is_mapping())
            .map(|(key, raw)| Operation {
                path: self.path,
                method: key.value.as_str(),
                key,
                raw,
                node: resolve(self.root, raw),
                json_path: self.json_path.key(key.value.clone()),
                path_item: self.node,
                root: self.root,
            })
            .collect()
    }

    /// Methods declared on this path item.
    #[must_use]
    pub fn methods(&self) -> Vec<&'a str> {
        self.node
            .pairs()
            .filter(|(key, _)| is_http_method(&key.value))
            .map(|(key, _)| key.value.as_str())
            .collect()
    }

    /// Parameters declared on the path item itself.
    #[must_use]
    pub fn parameters(&self) -> Vec<Parameter<'a>> {
        collect_parameters(self.root, self.node, &self.json_path, ParameterLevel::PathItem)
    }
}

/// An operation of a path item.
#[derive(Debug, Clone)]
pub struct Operation<'a> {
    /// Path template of the owning path item.
    pub path: &'a str,
    /// Lowercase HTTP method.
    pub method: &'a str,
    /// Key node of the method.
    pub key: &'a Node,
    /// The operation as written (possibly a `$ref`).
    pub raw: &'a Node,
    /// The operation after `$ref` resolution.
    pub node: &'a Node,
    /// `$.paths['<template>'].<method>`.
    pub json_path: JsonPath,
    /// The owning path item (resolved).
    pub path_item: &'a Node,
    root: &'a Node,
}

impl<'a> Operation<'a> {
    /// Returns true if the operation is declared through `$ref`.
    #[must_use]
    pub fn is_ref(&self) -> bool {
        reference_of(self.raw).is_some()
    }

    /// A field of the operation.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a Node> {
        self.node.get(key)
    }

    /// A field of the operation with its key node.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<Entry<'a>> {
        self.node.entry(key).map(|(key, value)| Entry { key, value })
    }

    /// The `operationId` value, if any.
    #[must_use]
    pub fn operation_id(&self) -> Option<&'a str> {
        self.get("operationId").and_then(Node::as_text)
    }

    /// Tag names of the operation.
    #[must_use]
    pub fn tags(&self) -> Vec<&'a str> {
        self.get("tags")
            .map(|tags| tags.items().iter().filter_map(Node::as_str).collect())
            .unwrap_or_default()
    }

    /// The `responses` mapping.
    #[must_use]
    pub fn responses(&self) -> Option<&'a Node> {
        self.get("responses").filter(|r| r.is_mapping())
    }

    /// Response codes as written.
    #[must_use]
    pub fn response_codes(&self) -> Vec<&'a str> {
        self.responses()
            .map(|r| r.pairs().map(|(k, _)| k.value.as_str()).collect())
            .unwrap_or_default()
    }

    /// The request body after `$ref` resolution.
    #[must_use]
    pub fn request_body(&self) -> Option<&'a Node> {
        self.get("requestBody").map(|body| resolve(self.root, body))
    }

    /// Resolves a node of this document.
    #[must_use]
    pub fn resolve(&self, node: &'a Node) -> &'a Node {
        resolve(self.root, node)
    }

    /// Parameters declared on the operation itself.
    #[must_use]
    pub fn own_parameters(&self) -> Vec<Parameter<'a>> {
        collect_parameters(self.root, self.node, &self.json_path, ParameterLevel::Operation)
    }

    /// Parameters declared on the owning path item.
    #[must_use]
    pub fn path_item_parameters(&self) -> Vec<Parameter<'a>> {
        let base = self
            .json_path
            .parent()
            .unwrap_or_else(|| JsonPath::root().key("paths").key(self.path));
        collect_parameters(self.root, self.path_item, &base, ParameterLevel::PathItem)
    }

    /// Effective parameters: path-item parameters overridden by operation
    /// parameters with the same name and location.
    #[must_use]
    pub fn parameters(&self) -> Vec<Parameter<'a>> {
        let own = self.own_parameters();
        let mut effective: Vec<Parameter<'a>> = self
            .path_item_parameters()
            .into_iter()
            .filter(|inherited| {
                !own.iter()
                    .any(|p| p.name() == inherited.name() && p.location() == inherited.location())
            })
            .collect();
        effective.extend(own);
        effective
    }
}

/// Where a parameter is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLevel {
    /// Under `paths.<template>.parameters`.
    PathItem,
    /// Under `paths.<template>.<method>.parameters`.
    Operation,
}

/// A parameter declaration.
#[derive(Debug, Clone)]
pub struct Parameter<'a> {
    /// The parameter as written (possibly a `$ref`).
    pub raw: &'a Node,
    /// The parameter after `$ref` resolution.
    pub node: &'a Node,
    /// Path of the declaration.
    pub json_path: JsonPath,
    /// Declaration level.
    pub level: ParameterLevel,
}

impl<'a> Parameter<'a> {
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

    /// Returns true if `required: true`.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.node.get("required").is_some_and(Node::is_true)
    }

    /// Returns true if declared through `$ref`.
    #[must_use]
    pub fn is_ref(&self) -> bool {
        reference_of(self.raw).is_some()
    }
}

fn collect_parameters<'a>(
    root: &'a Node,
    owner: &'a Node,
    owner_path: &JsonPath,
    level: ParameterLevel,
) -> Vec<Parameter<'a>> {
    let Some(params) = owner.get("parameters") else {
        return Vec::new();
    };
    let base = owner_path.key("parameters");
    params
        .items()
        .iter()
        .enumerate()
        .filter(|(_, raw)| raw.is_mapping())
        .map(|(i, raw)| Parameter {
            raw,
            node: resolve(root, raw),
            json_path: base.index(i),
            level,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec_info::SpecFormat;

    const DOC: &str = r"openapi: 3.0.3
info: {title: Pets, version: '1'}
tags:
  - name: pets
paths:
  /pets/{id}:
    parameters:
      - $ref: '#/components/parameters/Id'
    get:
      operationId: getPet
      tags: [pets]
      parameters:
        - {name: verbose, in: query}
      responses:
        '200': {description: ok}
        '404': {description: missing}
    delete:
      $ref: '#/components/x-ops/remove'
components:
  parameters:
    Id: {name: id, in: path, required: true}
  x-ops:
    remove:
      responses: {'204': {description: gone}}
";

    fn model(doc: &Node) -> OpenApi<'_> {
        OpenApi::new(doc, SpecInfo::new(SpecFormat::Oas30, "3.0.3"))
    }

    #[test]
    fn lists_operations_with_paths() {
        let doc = Node::parse(DOC).expect("valid yaml");
        let api = model(&doc);
        let ops = api.operations();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].method, "get");
        assert_eq!(ops[0].json_path.to_string(), "$.paths['/pets/{id}'].get");
        assert_eq!(ops[0].operation_id(), Some("getPet"));
        assert_eq!(ops[0].tags(), vec!["pets"]);
        assert_eq!(ops[0].response_codes(), vec!["200", "404"]);
    }

    #[test]
    fn resolves_referenced_operations() {
        let doc = Node::parse(DOC).expect("valid yaml");
        let api = model(&doc);
        let delete = &api.operations()[1];
        assert!(delete.is_ref());
        assert_eq!(delete.response_codes(), vec!["204"]);
    }

    #[test]
    fn merges_path_item_parameters() {
        let doc = Node::parse(DOC).expect("valid yaml");
        let api = model(&doc);
        let get = &api.operations()[0];
        let params = get.parameters();
        let names: Vec<_> = params.iter().filter_map(Parameter::name).collect();
        assert_eq!(names, vec!["id", "verbose"]);
        assert!(params[0].is_ref());
        assert!(params[0].is_required());
        assert_eq!(
            params[0].json_path.to_string(),
            "$.paths['/pets/{id}'].parameters[0]"
        );
    }

    #[test]
    fn resolves_references_by_pointer() {
        let doc = Node::parse(DOC).expect("valid yaml");
        assert!(resolve_reference(&doc, "#/components/parameters/Id").is_some());
        assert!(resolve_reference(&doc, "#/paths/~1pets~1%7Bid%7D/get").is_some());
        assert!(resolve_reference(&doc, "#/components/parameters/Nope").is_none());
        assert!(resolve_reference(&doc, "other.yaml#/x").is_none());
    }

    #[test]
    fn canonicalizes_references() {
        assert_eq!(
            canonical_reference("#/paths/~1a~1%7Bid%7D"),
            canonical_reference("#/paths/~1a~1{id}")
        );
        assert_eq!(canonical_reference("other.yaml#/a"), None);
    }

    #[test]
    fn resolve_stops_on_cycles() {
        let doc = Node::parse("a: {$ref: '#/b'}\nb: {$ref: '#/a'}\n").expect("valid yaml");
        let a = doc.root().get("a").expect("a");
        let resolved = resolve(&doc, a);
        assert!(resolved.has("$ref"));
    }

    #[test]
    fn reads_tag_names() {
        let doc = Node::parse(DOC).expect("valid yaml");
        assert_eq!(model(&doc).tag_names(), vec!["pets"]);
    }
}

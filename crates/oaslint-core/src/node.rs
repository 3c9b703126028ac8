//! Document node tree with source positions.
//!
//! The tree is built from `yaml-rust2` parser events rather than its
//! `Yaml` value type so that every node keeps its line and column and
//! mapping keys keep their original order, duplicates included.
//!
//! JSON documents go through the same loader since JSON is a subset of
//! YAML's flow syntax.

use crate::types::Position;
use crate::utils::jsonpath::{JsonPath, Segment};

use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Errors produced while loading a document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The YAML scanner or parser rejected the input.
    #[error("invalid YAML at line {line}, column {column}: {message}")]
    Syntax {
        /// Line of the error (1-indexed).
        line: usize,
        /// Column of the error (1-indexed).
        column: usize,
        /// Scanner message.
        message: String,
    },

    /// The input contains no document.
    #[error("document is empty")]
    Empty,

    /// Alias expansion would copy more nodes than allowed.
    #[error("aliases expand to more than {limit} nodes")]
    AliasLimit {
        /// Maximum number of nodes aliases may copy.
        limit: usize,
    },
}

/// Maximum number of nodes copied by alias expansion in one document.
pub const MAX_ALIAS_NODES: usize = 100_000;

/// Structural kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The document wrapper; its single child is the root value.
    Document,
    /// A mapping; `content` alternates keys and values.
    Mapping,
    /// A sequence; `content` holds the items.
    Sequence,
    /// A scalar; `value` holds the text.
    Scalar,
}

/// Resolved type of a scalar, following the YAML core schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `null`, `~` or an empty plain scalar.
    Null,
    /// `true` / `false`.
    Bool,
    /// Decimal, octal (`0o`) or hexadecimal (`0x`) integer.
    Int,
    /// Floating point number, including `.inf` and `.nan`.
    Float,
    /// Any other scalar, and every quoted scalar.
    Str,
}

impl ScalarKind {
    /// JSON Schema type name of a scalar of this kind.
    #[must_use]
    pub fn json_type(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::Float => "number",
            Self::Str => "string",
        }
    }
}

/// A node of the parsed YAML/JSON tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Structural kind.
    pub kind: NodeKind,
    /// Resolved scalar type (`Str` for collections).
    pub scalar: ScalarKind,
    /// Scalar text (empty for collections).
    pub value: String,
    /// Children: alternating key/value for mappings, items for sequences.
    pub content: Vec<Node>,
    /// Line of the first character (1-indexed).
    pub line: usize,
    /// Column of the first character (1-indexed).
    pub column: usize,
}

impl Node {
    /// Parses YAML or JSON text into a [`NodeKind::Document`] node.
    ///
    /// Only the first document of a multi-document stream is kept.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Syntax`] for malformed input,
    /// [`ParseError::Empty`] when the stream holds no document and
    /// [`ParseError::AliasLimit`] when aliases expand past
    /// [`MAX_ALIAS_NODES`].
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let mut builder = TreeBuilder::default();
        let mut parser = Parser::new_from_str(source);
        parser
            .load(&mut builder, false)
            .map_err(|e| ParseError::Syntax {
                line: e.marker().line(),
                column: e.marker().col() + 1,
                message: e.info().to_string(),
            })?;
        if builder.alias_overflow {
            return Err(ParseError::AliasLimit { limit: MAX_ALIAS_NODES });
        }

        let root = builder.roots.into_iter().next().ok_or(ParseError::Empty)?;
        Ok(Self {
            kind: NodeKind::Document,
            scalar: ScalarKind::Str,
            value: String::new(),
            line: root.line,
            column: root.column,
            content: vec![root],
        })
    }

    /// Creates a scalar node. Plain scalars are resolved with the core schema.
    #[must_use]
    pub fn scalar(value: impl Into<String>, plain: bool, line: usize, column: usize) -> Self {
        let value = value.into();
        let scalar = if plain {
            resolve_plain(&value)
        } else {
            ScalarKind::Str
        };
        Self {
            kind: NodeKind::Scalar,
            scalar,
            value,
            content: Vec::new(),
            line,
            column,
        }
    }

    fn collection(kind: NodeKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            scalar: ScalarKind::Str,
            value: String::new(),
            content: Vec::new(),
            line,
            column,
        }
    }

    /// Returns the root value, unwrapping a document node.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self.kind {
            NodeKind::Document => self.content.first().unwrap_or(self),
            _ => self,
        }
    }

    /// Returns true for mapping nodes.
    #[must_use]
    pub fn is_mapping(&self) -> bool {
        self.kind == NodeKind::Mapping
    }

    /// Returns true for sequence nodes.
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        self.kind == NodeKind::Sequence
    }

    /// Returns true for scalar nodes.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.kind == NodeKind::Scalar
    }

    /// Returns true for a null scalar.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.kind == NodeKind::Scalar && self.scalar == ScalarKind::Null
    }

    /// Iterates key/value pairs of a mapping in document order.
    ///
    /// Duplicate keys are yielded as often as they occur. Non-mappings
    /// yield nothing.
    pub fn pairs(&self) -> impl Iterator<Item = (&Self, &Self)> {
        let content: &[Self] = if self.is_mapping() { &self.content } else { &[] };
        content.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Iterates key/value pairs with duplicate keys collapsed to their
    /// last occurrence, keeping the position of that occurrence.
    pub fn unique_pairs(&self) -> impl Iterator<Item = (&Self, &Self)> {
        let pairs: Vec<(&Self, &Self)> = self.pairs().collect();
        let keep: Vec<bool> = pairs
            .iter()
            .enumerate()
            .map(|(i, (key, _))| !pairs[i + 1..].iter().any(|(k, _)| k.value == key.value))
            .collect();
        pairs
            .into_iter()
            .zip(keep)
            .filter_map(|(pair, keep)| keep.then_some(pair))
    }

    /// Finds the last entry with the given key.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<(&Self, &Self)> {
        self.pairs().filter(|(k, _)| k.value == key).last()
    }

    /// Finds the value of the last entry with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.entry(key).map(|(_, v)| v)
    }

    /// Returns true if the mapping has the given key.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.entry(key).is_some()
    }

    /// Items of a sequence; empty for other kinds.
    #[must_use]
    pub fn items(&self) -> &[Self] {
        if self.is_sequence() {
            &self.content
        } else {
            &[]
        }
    }

    /// Number of entries of a mapping or items of a sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        match self.kind {
            NodeKind::Mapping => self.content.len() / 2,
            NodeKind::Sequence | NodeKind::Document => self.content.len(),
            NodeKind::Scalar => 0,
        }
    }

    /// Returns true if a collection has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text of a non-null scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        (self.is_scalar() && self.scalar != ScalarKind::Null).then_some(self.value.as_str())
    }

    /// Text of a non-null scalar with surrounding whitespace removed,
    /// `None` if that leaves nothing.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.as_str().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Value of a boolean scalar.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        if !self.is_scalar() || self.scalar != ScalarKind::Bool {
            return None;
        }
        Some(self.value.eq_ignore_ascii_case("true"))
    }

    /// Returns true for a scalar `true`.
    #[must_use]
    pub fn is_true(&self) -> bool {
        self.as_bool() == Some(true)
    }

    /// Value of an integer scalar.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        if !self.is_scalar() || self.scalar != ScalarKind::Int {
            return None;
        }
        parse_int(&self.value)
    }

    /// Value of an integer or float scalar.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match (self.kind, self.scalar) {
            #[allow(clippy::cast_precision_loss)]
            (NodeKind::Scalar, ScalarKind::Int) => parse_int(&self.value).map(|i| i as f64),
            (NodeKind::Scalar, ScalarKind::Float) => parse_float(&self.value),
            _ => None,
        }
    }

    /// JSON Schema type name of the value this node holds.
    #[must_use]
    pub fn json_type(&self) -> &'static str {
        match self.kind {
            NodeKind::Mapping => "object",
            NodeKind::Sequence => "array",
            NodeKind::Document => self.root().json_type(),
            NodeKind::Scalar => self.scalar.json_type(),
        }
    }

    /// Position of the first character.
    #[must_use]
    pub fn start(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Position just past the node.
    ///
    /// Scalars advance the column by the length of their value;
    /// collections end where their last descendant ends.
    #[must_use]
    pub fn end(&self) -> Position {
        match self.kind {
            NodeKind::Scalar => Position::new(self.line, self.column + self.value.chars().count()),
            _ => match self.content.last() {
                Some(last) => last.end(),
                None => Position::new(self.line, self.column + 2),
            },
        }
    }

    /// Follows `path` from this node.
    #[must_use]
    pub fn at(&self, path: &JsonPath) -> Option<&Self> {
        let mut current = self.root();
        for segment in path.segments() {
            current = match segment {
                Segment::Key(key) => current.get(key)?,
                Segment::Index(index) if current.is_mapping() => current.get(&index.to_string())?,
                Segment::Index(index) => current.items().get(*index)?,
            };
        }
        Some(current)
    }

    /// Walks a JSON pointer as far as the tree allows.
    ///
    /// Returns the deepest node reached and its JSON-Path; numeric pointer
    /// segments become keys under mappings and indices under sequences.
    #[must_use]
    pub fn locate_pointer(&self, pointer: &str) -> (JsonPath, &Self) {
        let mut current = self.root();
        let mut path = JsonPath::root();
        for raw in pointer.split('/').skip(1) {
            let key = crate::utils::jsonpath::unescape_pointer(raw);
            if current.is_sequence() {
                match key.parse::<usize>().ok().and_then(|i| current.items().get(i).map(|n| (i, n))) {
                    Some((index, next)) => {
                        path = path.index(index);
                        current = next;
                    }
                    None => break,
                }
            } else {
                match current.get(&key) {
                    Some(next) => {
                        path = path.key(key);
                        current = next;
                    }
                    None => break,
                }
            }
        }
        (path, current)
    }

    /// Converts the subtree into a JSON value.
    ///
    /// Later duplicate keys overwrite earlier ones.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self.kind {
            NodeKind::Document => self.root().to_json(),
            NodeKind::Mapping => Value::Object(
                self.pairs()
                    .map(|(k, v)| (k.value.clone(), v.to_json()))
                    .collect(),
            ),
            NodeKind::Sequence => Value::Array(self.content.iter().map(Self::to_json).collect()),
            NodeKind::Scalar => match self.scalar {
                ScalarKind::Null => Value::Null,
                ScalarKind::Bool => Value::Bool(self.value.eq_ignore_ascii_case("true")),
                ScalarKind::Int => parse_int(&self.value)
                    .map_or_else(|| Value::String(self.value.clone()), Value::from),
                ScalarKind::Float => parse_float(&self.value)
                    .and_then(serde_json::Number::from_f64)
                    .map_or_else(|| Value::String(self.value.clone()), Value::Number),
                ScalarKind::Str => Value::String(self.value.clone()),
            },
        }
    }
}

fn resolve_plain(value: &str) -> ScalarKind {
    match value {
        "" | "~" | "null" | "Null" | "NULL" => ScalarKind::Null,
        "true" | "True" | "TRUE" | "false" | "False" | "FALSE" => ScalarKind::Bool,
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" | "-.inf" | "-.Inf" | "-.INF"
        | ".nan" | ".NaN" | ".NAN" => ScalarKind::Float,
        _ if parse_int(value).is_some() => ScalarKind::Int,
        _ if is_float_literal(value) => ScalarKind::Float,
        _ => ScalarKind::Str,
    }
}

fn parse_int(value: &str) -> Option<i64> {
    if let Some(hex) = value.strip_prefix("0x") {
        return i64::from_str_radix(hex, 16).ok();
    }
    if let Some(oct) = value.strip_prefix("0o") {
        return i64::from_str_radix(oct, 8).ok();
    }
    let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

fn parse_float(value: &str) -> Option<f64> {
    match value.trim_start_matches('+').to_ascii_lowercase().as_str() {
        ".inf" => Some(f64::INFINITY),
        "-.inf" => Some(f64::NEG_INFINITY),
        ".nan" => Some(f64::NAN),
        other => other.parse().ok(),
    }
}

/// Matches `[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?`.
fn is_float_literal(value: &str) -> bool {
    let body = value.strip_prefix(['-', '+']).unwrap_or(value);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };
    let mantissa_ok = match mantissa.split_once('.') {
        Some((int, frac)) => {
            (!int.is_empty() || !frac.is_empty())
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => !mantissa.is_empty() && mantissa.bytes().all(|b| b.is_ascii_digit()),
    };
    let exponent_ok = exponent.map_or(true, |exp| {
        let digits = exp.strip_prefix(['-', '+']).unwrap_or(exp);
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
    });
    mantissa_ok && exponent_ok
}

/// Assembles nodes from parser events.
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<(Node, usize)>,
    /// Anchored nodes with their subtree sizes.
    anchors: HashMap<usize, (Node, usize)>,
    roots: Vec<Node>,
    expanded: usize,
    alias_overflow: bool,
}

impl TreeBuilder {
    fn insert(&mut self, node: Node, anchor: usize) {
        if anchor > 0 {
            let size = subtree_size(&node);
            self.anchors.insert(anchor, (node.clone(), size));
        }
        match self.stack.last_mut() {
            Some((parent, _)) => parent.content.push(node),
            None => self.roots.push(node),
        }
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, event: Event, mark: Marker) {
        let (line, column) = (mark.line(), mark.col() + 1);
        match event {
            Event::Scalar(value, style, anchor, ..) => {
                let node = Node::scalar(value, style == TScalarStyle::Plain, line, column);
                self.insert(node, anchor);
            }
            Event::SequenceStart(anchor, ..) => {
                self.stack
                    .push((Node::collection(NodeKind::Sequence, line, column), anchor));
            }
            Event::MappingStart(anchor, ..) => {
                self.stack
                    .push((Node::collection(NodeKind::Mapping, line, column), anchor));
            }
            Event::SequenceEnd | Event::MappingEnd => {
                if let Some((node, anchor)) = self.stack.pop() {
                    self.insert(node, anchor);
                }
            }
            Event::Alias(id) => {
                let copy = match self.anchors.get(&id) {
                    Some((_, size)) if self.alias_overflow || self.expanded + size > MAX_ALIAS_NODES => {
                        self.alias_overflow = true;
                        None
                    }
                    Some((node, size)) => {
                        self.expanded += size;
                        Some(node.clone())
                    }
                    None => None,
                };
                let node = copy.unwrap_or_else(|| Node::scalar(String::new(), true, line, column));
                self.insert(node, 0);
            }
            _ => {}
        }
    }
}

fn subtree_size(node: &Node) -> usize {
    1 + node.content.iter().map(subtree_size).sum::<usize>()
}

//! JSON-Path builder used to address results.
//!
//! Keys made of identifier characters render in dotted form
//! (`$.info.contact`); everything else is bracketed
//! (`$.paths['/pets/{id}'].get`). Indices render as `[n]`.

use std::fmt;

/// One step of a [`JsonPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// Mapping key.
    Key(String),
    /// Sequence index.
    Index(usize),
}

/// A location inside the document, rendered as JSON-Path or JSON pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsonPath {
    segments: Vec<Segment>,
}

impl JsonPath {
    /// The document root, `$`.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with `key` appended.
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.segments.push(Segment::Key(key.into()));
        path
    }

    /// Returns a new path with `index` appended.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.segments.push(Segment::Index(index));
        path
    }

    /// Returns a new path with all of `tail` appended.
    #[must_use]
    pub fn join(&self, tail: &[Segment]) -> Self {
        let mut path = self.clone();
        path.segments.extend_from_slice(tail);
        path
    }

    /// The steps of this path.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The last step, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// The path without its last step.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self {
            segments: init.to_vec(),
        })
    }

    /// Returns true for `$`.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the remaining steps if `prefix` is a prefix of this path.
    #[must_use]
    pub fn strip_prefix(&self, prefix: &Self) -> Option<&[Segment]> {
        self.segments.strip_prefix(prefix.segments.as_slice())
    }

    /// Renders an RFC 6901 JSON pointer (`/paths/~1pets/get`).
    #[must_use]
    pub fn to_pointer(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Key(key) => format!("/{}", escape_pointer(key)),
                Segment::Index(index) => format!("/{index}"),
            })
            .collect()
    }

    /// Renders a local reference (`#/components/schemas/Pet`) with each
    /// segment percent-encoded so the result is a valid URI fragment.
    #[must_use]
    pub fn to_reference(&self) -> String {
        let mut reference = String::from("#");
        for segment in &self.segments {
            reference.push('/');
            match segment {
                Segment::Key(key) => reference.push_str(&urlencoding::encode(&escape_pointer(key))),
                Segment::Index(index) => reference.push_str(&index.to_string()),
            }
        }
        reference
    }

    /// Parses a JSON pointer. Numeric segments become indices.
    #[must_use]
    pub fn from_pointer(pointer: &str) -> Self {
        let segments = pointer
            .split('/')
            .skip(1)
            .map(|raw| match raw.parse::<usize>() {
                Ok(index) => Segment::Index(index),
                Err(_) => Segment::Key(unescape_pointer(raw)),
            })
            .collect();
        Self { segments }
    }

    /// Parses a selector written either as a pointer (`#/a/b`, `/a/b`) or
    /// as a dotted path (`$.a.b`).
    #[must_use]
    pub fn parse_selector(selector: &str) -> Self {
        if selector.starts_with('/') || selector.starts_with("#/") {
            return Self::from_pointer(selector.trim_start_matches('#'));
        }
        selector
            .trim_start_matches('$')
            .split('.')
            .filter(|s| !s.is_empty())
            .fold(Self::root(), |path, segment| path.key(segment))
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                Segment::Key(key) if is_identifier(key) => write!(f, ".{key}")?,
                Segment::Key(key) => write!(f, "['{}']", key.replace('\'', "\\'"))?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Identifier-safe keys: a letter, `_` or `$` followed by letters,
/// digits, `_`, `$` or `-`.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '-'))
}

/// Escapes `~` and `/` for a JSON pointer segment.
#[must_use]
pub fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Reverses [`escape_pointer`].
#[must_use]
pub fn unescape_pointer(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

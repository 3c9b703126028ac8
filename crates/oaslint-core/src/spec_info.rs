//! Spec format detection and version capability probes.

use crate::node::Node;
use crate::validator::Dialect;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Document format family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpecFormat {
    /// Swagger 2.0.
    #[serde(rename = "oas2")]
    Swagger2,
    /// OpenAPI 3.0.x.
    #[serde(rename = "oas3_0")]
    Oas30,
    /// OpenAPI 3.1.x and later.
    #[serde(rename = "oas3_1")]
    Oas31,
}

impl SpecFormat {
    /// Both OpenAPI 3 formats.
    pub const OAS3: [Self; 2] = [Self::Oas30, Self::Oas31];

    /// Short identifier used in configuration and reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Swagger2 => "oas2",
            Self::Oas30 => "oas3_0",
            Self::Oas31 => "oas3_1",
        }
    }
}

impl fmt::Display for SpecFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a schema declares that it accepts `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullableEncoding {
    /// `nullable: true` (OpenAPI 3.0, and `x-nullable` in Swagger 2.0).
    Keyword,
    /// `type: [T, "null"]` (OpenAPI 3.1).
    TypeArray,
}

/// Detected format and the version string as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpecInfo {
    /// Format family.
    pub format: SpecFormat,
    /// Value of the `swagger` / `openapi` field.
    pub version: String,
}

impl SpecInfo {
    /// Creates spec info directly.
    #[must_use]
    pub fn new(format: SpecFormat, version: impl Into<String>) -> Self {
        Self {
            format,
            version: version.into(),
        }
    }

    /// Detects the format from the root mapping.
    ///
    /// Returns `None` when neither `swagger: 2.x` nor `openapi: 3.x` is
    /// present.
    #[must_use]
    pub fn detect(root: &Node) -> Option<Self> {
        let root = root.root();
        if let Some(version) = root.get("openapi").and_then(Node::as_str) {
            let mut parts = version.trim().split('.');
            let major = parts.next().and_then(|m| m.parse::<u32>().ok())?;
            let minor = parts.next().and_then(|m| m.parse::<u32>().ok()).unwrap_or(0);
            let format = match (major, minor) {
                (3, 0) => SpecFormat::Oas30,
                (3, _) => SpecFormat::Oas31,
                _ => return None,
            };
            return Some(Self::new(format, version.trim()));
        }
        let version = root.get("swagger").and_then(Node::as_str)?;
        version
            .trim()
            .starts_with('2')
            .then(|| Self::new(SpecFormat::Swagger2, version.trim()))
    }

    /// Returns true for either OpenAPI 3 format.
    #[must_use]
    pub fn is_oas3(&self) -> bool {
        self.format != SpecFormat::Swagger2
    }

    /// Whether `$ref` may carry sibling keywords.
    #[must_use]
    pub fn supports_ref_siblings(&self) -> bool {
        self.format == SpecFormat::Oas31
    }

    /// The nullable encoding native to this version.
    #[must_use]
    pub fn nullable_encoding(&self) -> NullableEncoding {
        match self.format {
            SpecFormat::Oas31 => NullableEncoding::TypeArray,
            SpecFormat::Swagger2 | SpecFormat::Oas30 => NullableEncoding::Keyword,
        }
    }

    /// Reference prefix under which security schemes are defined.
    #[must_use]
    pub fn security_scheme_prefix(&self) -> &'static str {
        match self.format {
            SpecFormat::Swagger2 => "#/securityDefinitions/",
            SpecFormat::Oas30 | SpecFormat::Oas31 => "#/components/securitySchemes/",
        }
    }

    /// Reference prefix under which reusable schemas are defined.
    #[must_use]
    pub fn schema_prefix(&self) -> &'static str {
        match self.format {
            SpecFormat::Swagger2 => "#/definitions/",
            SpecFormat::Oas30 | SpecFormat::Oas31 => "#/components/schemas/",
        }
    }

    /// JSON Schema dialect used by schema objects of this version.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        match self.format {
            SpecFormat::Oas31 => Dialect::Draft202012,
            SpecFormat::Swagger2 | SpecFormat::Oas30 => Dialect::Draft4,
        }
    }

    /// Human-readable label, e.g. `OpenAPI 3.1.0`.
    #[must_use]
    pub fn label(&self) -> String {
        match self.format {
            SpecFormat::Swagger2 => format!("Swagger {}", self.version),
            SpecFormat::Oas30 | SpecFormat::Oas31 => format!("OpenAPI {}", self.version),
        }
    }
}

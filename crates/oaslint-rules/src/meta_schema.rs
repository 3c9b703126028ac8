//! Embedded OpenAPI meta-schemas, parsed once on first use.

use oaslint_core::SpecFormat;

use serde_json::Value;
use std::sync::OnceLock;
use tracing::warn;

const OAS2: &str = include_str!("../schemas/oas2.json");
const OAS3_0: &str = include_str!("../schemas/oas3_0.json");
const OAS3_1: &str = include_str!("../schemas/oas3_1.json");

static OAS2_SCHEMA: OnceLock<Option<Value>> = OnceLock::new();
static OAS3_0_SCHEMA: OnceLock<Option<Value>> = OnceLock::new();
static OAS3_1_SCHEMA: OnceLock<Option<Value>> = OnceLock::new();

fn load(cell: &'static OnceLock<Option<Value>>, source: &str, format: SpecFormat) -> Option<&'static Value> {
    cell.get_or_init(|| match serde_json::from_str(source) {
        Ok(schema) => Some(schema),
        Err(err) => {
            warn!(%format, error = %err, "embedded meta-schema is not valid JSON");
            None
        }
    })
    .as_ref()
}

/// The meta-schema describing documents of `format`.
pub(crate) fn for_format(format: SpecFormat) -> Option<&'static Value> {
    match format {
        SpecFormat::Swagger2 => load(&OAS2_SCHEMA, OAS2, format),
        SpecFormat::Oas30 => load(&OAS3_0_SCHEMA, OAS3_0, format),
        SpecFormat::Oas31 => load(&OAS3_1_SCHEMA, OAS3_1, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_format_has_a_schema() {
        for format in [SpecFormat::Swagger2, SpecFormat::Oas30, SpecFormat::Oas31] {
            let schema = for_format(format).expect("embedded schema parses");
            assert_eq!(schema["type"], "object");
        }
    }
}

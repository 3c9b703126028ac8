//! JSON Schema validation seam.
//!
//! Rules that validate examples or the whole document talk to a
//! [`SchemaValidator`]; the default implementation is backed by the
//! `jsonschema` crate with remote and file resolution disabled.

use serde_json::Value;
use thiserror::Error;

/// JSON Schema draft used to interpret a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Draft 4, the basis of Swagger 2.0 and OpenAPI 3.0 schema objects.
    Draft4,
    /// Draft 2020-12, used by OpenAPI 3.1.
    Draft202012,
}

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidationFailure {
    /// JSON pointer into the validated instance (empty for the root).
    pub instance_path: String,
    /// Human-readable reason.
    pub reason: String,
}

/// Errors from building a validator.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// The schema itself could not be compiled.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

/// Validates instances against JSON Schemas.
pub trait SchemaValidator: Send + Sync {
    /// Validates `instance` against `schema` and returns every failure.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError::InvalidSchema`] if `schema` cannot be
    /// compiled.
    fn validate(
        &self,
        schema: &Value,
        instance: &Value,
        dialect: Dialect,
    ) -> Result<Vec<ValidationFailure>, ValidatorError>;
}

/// [`SchemaValidator`] backed by the `jsonschema` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator;

impl SchemaValidator for JsonSchemaValidator {
    fn validate(
        &self,
        schema: &Value,
        instance: &Value,
        dialect: Dialect,
    ) -> Result<Vec<ValidationFailure>, ValidatorError> {
        let draft = match dialect {
            Dialect::Draft4 => jsonschema::Draft::Draft4,
            Dialect::Draft202012 => jsonschema::Draft::Draft202012,
        };
        let validator = jsonschema::options()
            .with_draft(draft)
            .build(schema)
            .map_err(|err| ValidatorError::InvalidSchema(err.to_string()))?;

        Ok(validator
            .iter_errors(instance)
            .map(|err| ValidationFailure {
                instance_path: err.instance_path.to_string(),
                reason: err.to_string(),
            })
            .collect())
    }
}

/// Builds a schema that validates against the schema found at `pointer`
/// inside `document`, keeping the rest of the document available for
/// local `$ref`s.
#[must_use]
pub fn schema_at(document: &Value, reference: &str) -> Value {
    let mut schema = match document {
        Value::Object(map) => map.clone(),
        _ => serde_json::Map::new(),
    };
    schema.insert("$ref".to_string(), Value::String(reference.to_string()));
    Value::Object(schema)
}

/// Rewrites OpenAPI 3.0 `nullable: true` into `type: [T, "null"]` so
/// that a standard JSON Schema validator accepts `null`.
pub fn expand_nullable(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.get("nullable") == Some(&Value::Bool(true)) {
                if let Some(Value::String(ty)) = map.get("type").cloned() {
                    map.insert(
                        "type".to_string(),
                        Value::Array(vec![Value::String(ty), Value::String("null".into())]),
                    );
                }
            }
            for child in map.values_mut() {
                expand_nullable(child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(expand_nullable),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reports_failures_with_instance_path() {
        let schema = json!({"type": "object", "properties": {"age": {"type": "integer"}}});
        let failures = JsonSchemaValidator
            .validate(&schema, &json!({"age": "old"}), Dialect::Draft4)
            .expect("valid schema");
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].instance_path, "/age");
    }

    #[test]
    fn accepts_valid_instances() {
        let schema = json!({"type": "array", "items": {"type": "string"}});
        let failures = JsonSchemaValidator
            .validate(&schema, &json!(["a", "b"]), Dialect::Draft202012)
            .expect("valid schema");
        assert!(failures.is_empty());
    }

    #[test]
    fn resolves_local_refs_through_schema_at() {
        let doc = json!({"components": {"schemas": {"Pet": {"type": "string"}}}});
        let schema = schema_at(&doc, "#/components/schemas/Pet");
        let failures = JsonSchemaValidator
            .validate(&schema, &json!(1), Dialect::Draft4)
            .expect("valid schema");
        assert_eq!(failures.len(), 1);
    }

    #[test]
    fn expands_nullable_keyword() {
        let mut schema = json!({"properties": {"a": {"type": "string", "nullable": true}}});
        expand_nullable(&mut schema);
        assert_eq!(schema["properties"]["a"]["type"], json!(["string", "null"]));
    }

    #[test]
    fn invalid_schema_is_an_error() {
        let schema = json!({"type": 12});
        assert!(JsonSchemaValidator
            .validate(&schema, &json!(1), Dialect::Draft202012)
            .is_err());
    }
}

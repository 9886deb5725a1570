//! Strict JSON schemas for OpenAI structured outputs, derived from Rust types.
//!
//! OpenAI's `strict: true` mode only accepts schemas where:
//! 1. every object has `additionalProperties: false`
//! 2. every property is listed in `required`, nullable ones included
//! 3. there are no `$ref` indirections
//!
//! `schemars` produces none of these by default, so [`strict_schema`] rewrites
//! its output in a single walk.
//!
//! ```rust,ignore
//! #[derive(Deserialize, JsonSchema)]
//! struct Names {
//!     names: Vec<String>,
//! }
//!
//! let schema = Names::openai_schema();
//! ```

use schemars::schema::RootSchema;
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Guards against self-referential types expanding forever.
const MAX_INLINE_DEPTH: usize = 32;

/// A type the model can be asked to produce.
///
/// Blanket-implemented for every `JsonSchema + DeserializeOwned` type.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Strict, fully inlined schema for this type.
    fn openai_schema() -> Value {
        strict_schema(schema_for!(Self))
    }

    /// Schema name, used to label the `json_schema` response format.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Rewrite a `schemars` root schema into the form strict mode accepts.
pub fn strict_schema(root: RootSchema) -> Value {
    let mut value = serde_json::to_value(root).unwrap_or_default();

    let definitions = match &mut value {
        Value::Object(map) => {
            map.remove("$schema");
            map.remove("definitions")
        }
        _ => None,
    }
    .unwrap_or(Value::Null);

    tighten(&mut value, &definitions, 0);
    value
}

fn ref_target(value: &Value) -> Option<String> {
    value
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(|r| r.strip_prefix("#/definitions/"))
        .map(str::to_owned)
}

fn tighten(value: &mut Value, definitions: &Value, depth: usize) {
    if let Some(name) = ref_target(value) {
        if depth < MAX_INLINE_DEPTH {
            if let Some(definition) = definitions.get(&name) {
                *value = definition.clone();
                tighten(value, definitions, depth + 1);
                return;
            }
        }
    }

    match value {
        Value::Object(map) => {
            if map.get("type").and_then(Value::as_str) == Some("object") {
                let required: Vec<Value> = map
                    .get("properties")
                    .and_then(Value::as_object)
                    .map(|props| props.keys().cloned().map(Value::String).collect())
                    .unwrap_or_default();
                map.insert("required".to_string(), Value::Array(required));
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }

            for child in map.values_mut() {
                tighten(child, definitions, depth);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                tighten(item, definitions, depth);
            }
        }
        _ => {}
    }
}

//! Discriminator-first decoding helpers shared by the tagged unions.
//!
//! Every union in the model is encoded as a keyed record whose `type` field
//! names the active variant. Decoding always reads `type` before anything
//! else, then pulls the variant's required fields.

use crate::error::SchemaError;
use serde_json::{Map, Value};

/// Name of the discriminator field
pub const TYPE_FIELD: &str = "type";

pub type Record = Map<String, Value>;

/// View a value as a keyed record
pub fn record<'a>(value: &'a Value, entity: &'static str) -> Result<&'a Record, SchemaError> {
    value.as_object().ok_or(SchemaError::UnexpectedShape {
        entity,
        expected: "a keyed record",
    })
}

/// Read the discriminator; absent or non-text values are unrecognized
pub fn discriminator<'a>(record: &'a Record, entity: &'static str) -> Result<&'a str, SchemaError> {
    match record.get(TYPE_FIELD) {
        Some(Value::String(name)) => Ok(name),
        Some(other) => Err(SchemaError::unrecognized(entity, Some(other.to_string().as_str()))),
        None => Err(SchemaError::unrecognized(entity, None)),
    }
}

/// Read a required text field of a variant
pub fn required_str(
    record: &Record,
    entity: &'static str,
    variant: &'static str,
    field: &'static str,
) -> Result<String, SchemaError> {
    match record.get(field) {
        Some(Value::String(text)) => Ok(text.clone()),
        _ => Err(SchemaError::missing(entity, variant, field)),
    }
}

/// Read a required nested field of a variant
pub fn required<'a>(
    record: &'a Record,
    entity: &'static str,
    variant: &'static str,
    field: &'static str,
) -> Result<&'a Value, SchemaError> {
    match record.get(field) {
        Some(Value::Null) | None => Err(SchemaError::missing(entity, variant, field)),
        Some(value) => Ok(value),
    }
}

/// Read an optional list of strings. `None` when the field is absent or is
/// not a list made only of strings.
pub fn string_list(record: &Record, field: &str) -> Option<Vec<String>> {
    record
        .get(field)?
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

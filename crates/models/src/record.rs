//! Schemaless records.
//!
//! A record is a JSON object. The `id` field is the caller-supplied
//! application identifier; any storage-side key is kept out of it.

use serde_json::{Map, Value};

use crate::errors::ModelError;

pub type Record = Map<String, Value>;

pub const ID_FIELD: &str = "id";

/// Application identifier of a record, when it holds a string `id`.
pub fn record_id(record: &Record) -> Option<&str> {
    record.get(ID_FIELD).and_then(Value::as_str)
}

/// Whether `record` is addressed by `id`.
pub fn matches_id(record: &Record, id: &str) -> bool {
    record_id(record) == Some(id)
}

/// Accept only JSON objects as records.
pub fn from_value(value: Value) -> Result<Record, ModelError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(ModelError::NotAnObject("null")),
        Value::Bool(_) => Err(ModelError::NotAnObject("boolean")),
        Value::Number(_) => Err(ModelError::NotAnObject("number")),
        Value::String(_) => Err(ModelError::NotAnObject("string")),
        Value::Array(_) => Err(ModelError::NotAnObject("array")),
    }
}

/// Drop fields a patch may not touch. The identifier is fixed at creation.
pub fn sanitize_patch(mut patch: Record) -> Record {
    patch.remove(ID_FIELD);
    patch
}

/// Overwrite the fields named in `patch`, leaving all others as they are.
/// Returns how many fields actually changed value.
pub fn merge(target: &mut Record, patch: &Record) -> usize {
    let mut modified = 0;
    for (key, value) in patch {
        if key == ID_FIELD {
            continue;
        }
        if target.get(key) != Some(value) {
            target.insert(key.clone(), value.clone());
            modified += 1;
        }
    }
    modified
}

// # JSON Field Extractor
//
// The registrar removes default-valued fields from its responses to save
// bandwidth. Every model reads its fields through these accessors so that a
// partially populated object never fails to decode:
//
// - strings default to ""
// - booleans default to false
// - numbers default to 0
//
// A field that is present but has the wrong JSON type is a decode error, and
// an integer that does not fit the requested width is a range error.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A decoded JSON object
pub type JsonObject = Map<String, Value>;

/// Read a 64-bit signed integer, defaulting to 0
pub fn get_i64(object: &JsonObject, key: &str) -> Result<i64> {
    let Some(value) = object.get(key) else {
        return Ok(0);
    };

    match value {
        Value::Number(number) => {
            if let Some(n) = number.as_i64() {
                Ok(n)
            } else if number.is_u64() {
                Err(Error::Range {
                    field: key.to_string(),
                    value: number.to_string(),
                    target: "i64",
                })
            } else {
                Err(Error::decode(format!(
                    "field `{}` is not an integer: {}",
                    key, number
                )))
            }
        }
        other => Err(type_mismatch(key, "an integer", other)),
    }
}

/// Read a 32-bit signed integer, defaulting to 0
pub fn get_i32(object: &JsonObject, key: &str) -> Result<i32> {
    let value = get_i64(object, key)?;
    i32::try_from(value).map_err(|_| Error::Range {
        field: key.to_string(),
        value: value.to_string(),
        target: "i32",
    })
}

/// Read a 32-bit unsigned integer, defaulting to 0
pub fn get_u32(object: &JsonObject, key: &str) -> Result<u32> {
    let value = get_i64(object, key)?;
    u32::try_from(value).map_err(|_| Error::Range {
        field: key.to_string(),
        value: value.to_string(),
        target: "u32",
    })
}

/// Read a double, defaulting to 0.0
///
/// Integer-valued numbers are accepted and widened.
pub fn get_f64(object: &JsonObject, key: &str) -> Result<f64> {
    match object.get(key) {
        None => Ok(0.0),
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| Error::decode(format!("field `{}` is not a double", key))),
        Some(other) => Err(type_mismatch(key, "a number", other)),
    }
}

/// Read a boolean, defaulting to false
pub fn get_bool(object: &JsonObject, key: &str) -> Result<bool> {
    match object.get(key) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(type_mismatch(key, "a boolean", other)),
    }
}

/// Read a string, defaulting to ""
pub fn get_string(object: &JsonObject, key: &str) -> Result<String> {
    match object.get(key) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(type_mismatch(key, "a string", other)),
    }
}

/// Read an array of strings, defaulting to an empty list
pub fn get_string_array(object: &JsonObject, key: &str) -> Result<Vec<String>> {
    let Some(value) = object.get(key) else {
        return Ok(Vec::new());
    };

    let items = value
        .as_array()
        .ok_or_else(|| type_mismatch(key, "an array", value))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| type_mismatch(key, "an array of strings", item))
        })
        .collect()
}

/// Read an array of objects, defaulting to an empty list
///
/// Used for the collection field of a paged response (`"domains"`, `"records"`).
pub fn get_object_array<'a>(object: &'a JsonObject, key: &str) -> Result<Vec<&'a JsonObject>> {
    let Some(value) = object.get(key) else {
        return Ok(Vec::new());
    };

    let items = value
        .as_array()
        .ok_or_else(|| type_mismatch(key, "an array", value))?;

    items
        .iter()
        .map(|item| {
            item.as_object()
                .ok_or_else(|| type_mismatch(key, "an array of objects", item))
        })
        .collect()
}

/// Parse a response body that must be a JSON object
pub fn parse_object(body: &str) -> Result<JsonObject> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(object) => Ok(object),
        other => Err(Error::decode(format!(
            "response body is not a JSON object: {}",
            kind(&other)
        ))),
    }
}

fn type_mismatch(key: &str, expected: &str, found: &Value) -> Error {
    Error::decode(format!(
        "field `{}` should be {}, found {}",
        key,
        expected,
        kind(found)
    ))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

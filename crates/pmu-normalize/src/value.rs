//! Field access on generic JSON values.
//!
//! Helpers return the human-readable reason on failure; callers turn it into
//! a [`crate::Diagnostic`].

use pmu_model::{AttributeValue, EventCode};
use serde_json::{Map, Value};

pub(crate) type FieldResult<T> = std::result::Result<T, String>;

/// JSON type name for messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub(crate) fn as_object(value: &Value) -> FieldResult<&Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| format!("expected an object, found {}", type_name(value)))
}

/// Optional text field; missing or `null` is empty.
pub(crate) fn optional_text(record: &Map<String, Value>, field: &str) -> FieldResult<String> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(format!(
            "field '{field}' must be a string, found {}",
            type_name(other)
        )),
    }
}

pub(crate) fn required_text(record: &Map<String, Value>, field: &str) -> FieldResult<String> {
    match record.get(field) {
        None | Some(Value::Null) => Err(format!("missing field '{field}'")),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(format!(
            "field '{field}' must be a string, found {}",
            type_name(other)
        )),
    }
}

/// Optional list of names; missing or `null` is empty.
pub(crate) fn optional_names(record: &Map<String, Value>, field: &str) -> FieldResult<Vec<String>> {
    let items = match record.get(field) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(format!(
                "field '{field}' must be an array, found {}",
                type_name(other)
            ));
        }
    };
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                format!(
                    "field '{field}' must list strings, found {}",
                    type_name(item)
                )
            })
        })
        .collect()
}

/// Event code from a JSON integer or a hex/decimal string.
pub(crate) fn event_code(record: &Map<String, Value>) -> FieldResult<EventCode> {
    let code = match record.get("code") {
        None | Some(Value::Null) => return Err("missing field 'code'".to_string()),
        Some(Value::String(text)) => EventCode::parse(text),
        Some(Value::Number(number)) => match number.as_i64() {
            Some(value) => EventCode::from_integer(value),
            None => match number.as_u64() {
                Some(value) => EventCode::from_integer(value),
                None => return Err(format!("event code {number} is not an integer")),
            },
        },
        Some(other) => {
            return Err(format!(
                "field 'code' must be a number or string, found {}",
                type_name(other)
            ));
        }
    };
    code.map_err(|err| err.to_string())
}

/// Product configuration scalar. Nested values are rejected.
pub(crate) fn attribute(value: &Value) -> FieldResult<AttributeValue> {
    match value {
        Value::String(text) => Ok(AttributeValue::Text(text.clone())),
        Value::Number(number) => Ok(number
            .as_i64()
            .map_or_else(|| AttributeValue::Text(number.to_string()), AttributeValue::Integer)),
        Value::Bool(flag) => Ok(AttributeValue::Text(flag.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(format!(
            "attribute must be a scalar, found {}",
            type_name(value)
        )),
    }
}

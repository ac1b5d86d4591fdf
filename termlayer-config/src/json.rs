//! Field helpers for layering JSON objects onto settings records.
//!
//! Every layered field follows the same rule:
//!
//! - key absent: leave the current value alone
//! - `null`: reset to unset, so the compiled default applies again
//! - value of the wrong type: keep the current value and report it
//! - anything else: replace the current value

use crate::warnings::SettingsLoadWarning;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Layer one optional field from `obj[key]` into `slot`.
pub(crate) fn layer_field<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    key: &str,
    slot: &mut Option<T>,
    owner: &str,
    warnings: &mut Vec<SettingsLoadWarning>,
) {
    match obj.get(key) {
        None => {}
        Some(Value::Null) => *slot = None,
        Some(value) => match T::deserialize(value) {
            Ok(parsed) => *slot = Some(parsed),
            Err(e) => warnings.push(SettingsLoadWarning::InvalidValue {
                owner: owner.to_string(),
                key: key.to_string(),
                reason: e.to_string(),
            }),
        },
    }
}

/// Write `slot` into `out[key]` if it is set.
pub(crate) fn write_field<T: Serialize>(out: &mut Map<String, Value>, key: &str, slot: &Option<T>) {
    if let Some(value) = slot
        && let Ok(json) = serde_json::to_value(value)
    {
        out.insert(key.to_string(), json);
    }
}

/// `obj[key]` as a string, if it is one.
pub(crate) fn get_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

/// Describe a JSON value's type for diagnostics.
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

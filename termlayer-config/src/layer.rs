//! Settings layers: one decoded JSON document plus where it came from.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::json;
use crate::profile_types::LayerOrigin;

/// The built-in defaults document.
pub const DEFAULT_SETTINGS_JSON: &str = include_str!("../assets/defaults.json");

/// One settings document, already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsLayer {
    pub origin: LayerOrigin,
    pub document: Value,
}

impl SettingsLayer {
    pub fn new(origin: LayerOrigin, document: Value) -> Self {
        Self { origin, document }
    }

    /// Decode JSON text. Malformed text is a hard error; everything else is
    /// dealt with (and warned about) while layering.
    pub fn parse(origin: LayerOrigin, text: &str) -> Result<Self, ConfigError> {
        let document = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        Ok(Self { origin, document })
    }

    /// Read and decode a settings file.
    pub fn load(origin: LayerOrigin, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Read {} settings from {}", origin, path.display());
        Self::parse(origin, &text)
    }

    /// The compiled-in defaults layer.
    pub fn builtin_defaults() -> Result<Self, ConfigError> {
        Self::parse(LayerOrigin::Defaults, DEFAULT_SETTINGS_JSON)
    }

    /// Split the document into its parts, or explain why it can't be used.
    pub(crate) fn contents(&self) -> Result<LayerContents<'_>, String> {
        match &self.document {
            Value::Array(profiles) => Ok(LayerContents {
                globals: None,
                legacy_globals: None,
                profiles: Some(profiles),
            }),
            Value::Object(obj) => {
                let legacy_globals = match obj.get("globals") {
                    None | Some(Value::Null) => None,
                    Some(Value::Object(globals)) => Some(globals),
                    Some(other) => return Err(wrong_type("globals", "an object", other)),
                };

                let profiles = match obj.get("profiles") {
                    None | Some(Value::Null) => None,
                    Some(Value::Array(list)) => Some(list),
                    Some(Value::Object(profiles)) => match profiles.get("list") {
                        None | Some(Value::Null) => None,
                        Some(Value::Array(list)) => Some(list),
                        Some(other) => return Err(wrong_type("profiles.list", "an array", other)),
                    },
                    Some(other) => {
                        return Err(wrong_type("profiles", "an array or an object", other));
                    }
                };

                for key in ["schemes", "keybindings", "bindings"] {
                    for section in [Some(obj), legacy_globals].into_iter().flatten() {
                        match section.get(key) {
                            None | Some(Value::Null) | Some(Value::Array(_)) => {}
                            Some(other) => return Err(wrong_type(key, "an array", other)),
                        }
                    }
                }

                Ok(LayerContents {
                    globals: Some(obj),
                    legacy_globals,
                    profiles,
                })
            }
            other => Err(format!(
                "expected an object or an array, found {}",
                json::type_name(other)
            )),
        }
    }
}

fn wrong_type(key: &str, expected: &str, found: &Value) -> String {
    format!(
        "\"{}\" must be {}, found {}",
        key,
        expected,
        json::type_name(found)
    )
}

/// Borrowed view of a validated layer document.
pub(crate) struct LayerContents<'a> {
    /// Top-level global keys (the whole object)
    pub globals: Option<&'a Map<String, Value>>,
    /// Keys nested under the deprecated `globals` object
    pub legacy_globals: Option<&'a Map<String, Value>>,
    pub profiles: Option<&'a Vec<Value>>,
}

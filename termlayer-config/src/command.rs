//! Named commands (command palette entries).
//!
//! Commands are read from the same `keybindings`/`bindings` arrays as the
//! keybinding table. Problems in those entries are reported by the keybinding
//! table, so parsing here stays silent and just skips what it can't use.

use std::collections::HashMap;

use serde_json::{Map, Value};
use termlayer_keybindings::action::parse_action;
use termlayer_keybindings::{ActionAndArgs, KeyChord, parse_key_chord};

use crate::json;

/// A named action.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: String,
    action: ActionAndArgs,
    icon_path: Option<String>,
    key_chord: Option<KeyChord>,
}

impl Command {
    pub fn new(name: impl Into<String>, action: ActionAndArgs) -> Self {
        Self {
            name: name.into(),
            action,
            icon_path: None,
            key_chord: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action(&self) -> &ActionAndArgs {
        &self.action
    }

    pub fn icon_path(&self) -> Option<&str> {
        self.icon_path.as_deref()
    }

    /// The chord this command was declared with, if any.
    pub fn key_chord(&self) -> Option<&KeyChord> {
        self.key_chord.as_ref()
    }

    fn from_json(obj: &Map<String, Value>) -> ParsedEntry {
        let action = match obj.get("command").map(parse_action) {
            Some(Ok(Some(action))) => action,
            Some(Ok(None)) => return ParsedEntry::Unbind,
            Some(Err(_)) | None => return ParsedEntry::Invalid,
        };

        let name = json::get_str(obj, "name")
            .map(str::to_string)
            .unwrap_or_else(|| action.generate_name());
        let icon_path = json::get_str(obj, "icon")
            .or_else(|| json::get_str(obj, "iconPath"))
            .map(str::to_string);
        let key_chord = match obj.get("keys") {
            Some(Value::String(keys)) => parse_key_chord(keys).ok(),
            Some(Value::Array(list)) if list.len() == 1 => list[0]
                .as_str()
                .and_then(|keys| parse_key_chord(keys).ok()),
            _ => None,
        };

        ParsedEntry::Command(Self {
            name,
            action,
            icon_path,
            key_chord,
        })
    }

    /// Apply an array of binding entries to a command table.
    ///
    /// A command replaces any earlier command of the same name. An entry
    /// whose action is `null`/`"unbound"` removes the command it names.
    pub fn layer_json(commands: &mut HashMap<String, Command>, json: &Value) {
        let Some(entries) = json.as_array() else {
            return;
        };

        for obj in entries.iter().filter_map(Value::as_object) {
            match Self::from_json(obj) {
                ParsedEntry::Command(command) => {
                    log::debug!("Command '{}' -> {}", command.name, command.action.action);
                    commands.insert(command.name.clone(), command);
                }
                ParsedEntry::Unbind => {
                    if let Some(name) = json::get_str(obj, "name")
                        && commands.remove(name).is_some()
                    {
                        log::debug!("Command '{}' removed", name);
                    }
                }
                ParsedEntry::Invalid => {}
            }
        }
    }
}

enum ParsedEntry {
    Command(Command),
    /// The entry's action is `null`/`"unbound"`
    Unbind,
    Invalid,
}

//! Keybinding table for termlayer.
//!
//! Maps key chords (`ctrl+shift+t`) to shortcut actions. Tables are built by
//! layering JSON binding arrays on top of each other; every problem found in
//! an entry is returned as a [`KeybindingWarning`] instead of failing the load.
//!
//! Dispatching key events is up to the host application.

pub mod action;
pub mod parser;
mod warning;

pub use action::{ActionAndArgs, ActionArgs, Direction, NewTerminalArgs, ShortcutAction, SplitStyle};
pub use parser::{KeyChord, Modifiers, NamedKey, ParseError, ParsedKey, parse_key_chord};
pub use warning::KeybindingWarning;

use serde_json::Value;
use std::collections::BTreeMap;

/// Key chord → action table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyBindings {
    bindings: BTreeMap<KeyChord, ActionAndArgs>,
}

impl KeyBindings {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one layer of binding entries.
    ///
    /// Each entry looks like `{"command": <action>, "keys": "ctrl+c"}`.
    /// A `null` or `"unbound"` command removes the chord. Entries that can't
    /// be used are skipped and reported; bindings already in the table stay
    /// intact.
    pub fn layer_json(&mut self, json: &Value) -> Vec<KeybindingWarning> {
        let mut warnings = Vec::new();

        let Some(entries) = json.as_array() else {
            warnings.push(KeybindingWarning::InvalidBindingEntry {
                index: 0,
                reason: "expected an array of bindings".to_string(),
            });
            return warnings;
        };

        for (index, entry) in entries.iter().enumerate() {
            if let Err(warning) = self.layer_entry(index, entry) {
                log::debug!("Skipping keybinding entry #{}: {}", index, warning);
                warnings.push(warning);
            }
        }

        log::debug!(
            "Keybinding table has {} bindings after layering {} entries",
            self.bindings.len(),
            entries.len()
        );
        warnings
    }

    fn layer_entry(&mut self, index: usize, entry: &Value) -> Result<(), KeybindingWarning> {
        let obj = entry
            .as_object()
            .ok_or_else(|| KeybindingWarning::InvalidBindingEntry {
                index,
                reason: "entry is not an object".to_string(),
            })?;

        let command = obj
            .get("command")
            .ok_or_else(|| KeybindingWarning::InvalidBindingEntry {
                index,
                reason: "missing \"command\"".to_string(),
            })?;

        let action = action::parse_action(command)?;

        // Entries without keys only define commands.
        let Some(chord) = parse_keys(obj.get("keys"))? else {
            return Ok(());
        };

        match action {
            Some(action) => {
                log::debug!("Bound {} -> {}", chord, action.action);
                self.bindings.insert(chord, action);
            }
            None => {
                log::debug!("Unbound {}", chord);
                self.bindings.remove(&chord);
            }
        }
        Ok(())
    }

    /// Bind a chord directly, replacing any previous binding.
    pub fn bind(&mut self, chord: KeyChord, action: ActionAndArgs) {
        self.bindings.insert(chord, action);
    }

    /// Remove the binding for a chord, returning what was bound.
    pub fn unbind(&mut self, chord: &KeyChord) -> Option<ActionAndArgs> {
        self.bindings.remove(chord)
    }

    /// Look up the action bound to a chord.
    pub fn lookup(&self, chord: &KeyChord) -> Option<&ActionAndArgs> {
        self.bindings.get(chord)
    }

    /// Find a chord bound to the given action (and arguments).
    pub fn key_chord_for(&self, action: &ActionAndArgs) -> Option<&KeyChord> {
        self.bindings
            .iter()
            .find(|(_, bound)| *bound == action)
            .map(|(chord, _)| chord)
    }

    /// Iterate bindings in chord order.
    pub fn iter(&self) -> impl Iterator<Item = (&KeyChord, &ActionAndArgs)> {
        self.bindings.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

fn parse_keys(keys: Option<&Value>) -> Result<Option<KeyChord>, KeybindingWarning> {
    let text = match keys {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(text)) => text.as_str(),
        Some(Value::Array(list)) => match list.as_slice() {
            [] => return Ok(None),
            [Value::String(text)] => text.as_str(),
            [other] => {
                return Err(KeybindingWarning::InvalidKeyChord {
                    keys: other.to_string(),
                    reason: "expected a string".to_string(),
                });
            }
            _ => {
                return Err(KeybindingWarning::TooManyKeysForChord { count: list.len() });
            }
        },
        Some(other) => {
            return Err(KeybindingWarning::InvalidKeyChord {
                keys: other.to_string(),
                reason: "expected a string".to_string(),
            });
        }
    };

    parse_key_chord(text)
        .map(Some)
        .map_err(|e| KeybindingWarning::InvalidKeyChord {
            keys: text.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chord(s: &str) -> KeyChord {
        parse_key_chord(s).unwrap()
    }

    #[test]
    fn test_empty_table() {
        let table = KeyBindings::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_layer_simple_bindings() {
        let mut table = KeyBindings::new();
        let warnings = table.layer_json(&json!([
            {"command": "copy", "keys": "ctrl+c"},
            {"command": "paste", "keys": ["ctrl+v"]},
        ]));

        assert!(warnings.is_empty());
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.lookup(&chord("ctrl+c")).map(|a| a.action),
            Some(ShortcutAction::Copy)
        );
        assert_eq!(
            table.lookup(&chord("Ctrl+V")).map(|a| a.action),
            Some(ShortcutAction::Paste)
        );
    }

    #[test]
    fn test_later_layer_rebinds_chord() {
        let mut table = KeyBindings::new();
        table.layer_json(&json!([{"command": "copy", "keys": "ctrl+c"}]));
        table.layer_json(&json!([{"command": "find", "keys": "ctrl+c"}]));

        assert_eq!(table.len(), 1);
        assert_eq!(
            table.lookup(&chord("ctrl+c")).map(|a| a.action),
            Some(ShortcutAction::Find)
        );
    }

    #[test]
    fn test_unbind_removes_chord() {
        let mut table = KeyBindings::new();
        table.layer_json(&json!([{"command": "copy", "keys": "ctrl+c"}]));
        let warnings = table.layer_json(&json!([
            {"command": null, "keys": "ctrl+c"},
        ]));

        assert!(warnings.is_empty());
        assert!(table.lookup(&chord("ctrl+c")).is_none());
    }

    #[test]
    fn test_unknown_action_keeps_existing_binding() {
        let mut table = KeyBindings::new();
        table.layer_json(&json!([{"command": "copy", "keys": "ctrl+c"}]));
        let warnings = table.layer_json(&json!([
            {"command": "notARealAction", "keys": "ctrl+c"},
        ]));

        assert_eq!(
            warnings,
            vec![KeybindingWarning::UnknownAction {
                action: "notARealAction".to_string()
            }]
        );
        assert_eq!(
            table.lookup(&chord("ctrl+c")).map(|a| a.action),
            Some(ShortcutAction::Copy)
        );
    }

    #[test]
    fn test_too_many_keys() {
        let mut table = KeyBindings::new();
        let warnings = table.layer_json(&json!([
            {"command": "copy", "keys": ["ctrl+c", "ctrl+insert"]},
        ]));

        assert_eq!(
            warnings,
            vec![KeybindingWarning::TooManyKeysForChord { count: 2 }]
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_invalid_chord_and_entry() {
        let mut table = KeyBindings::new();
        let warnings = table.layer_json(&json!([
            {"command": "copy", "keys": "ctrl+"},
            {"keys": "ctrl+x"},
            42,
        ]));

        assert_eq!(warnings.len(), 3);
        assert!(matches!(
            warnings[0],
            KeybindingWarning::InvalidKeyChord { .. }
        ));
        assert!(matches!(
            warnings[1],
            KeybindingWarning::InvalidBindingEntry { index: 1, .. }
        ));
        assert!(matches!(
            warnings[2],
            KeybindingWarning::InvalidBindingEntry { index: 2, .. }
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn test_entry_without_keys_is_silent() {
        let mut table = KeyBindings::new();
        let warnings = table.layer_json(&json!([{"command": "openSettings"}]));
        assert!(warnings.is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_key_chord_for() {
        let mut table = KeyBindings::new();
        table.layer_json(&json!([
            {"command": {"action": "switchToTab", "index": 0}, "keys": "ctrl+alt+1"},
            {"command": {"action": "switchToTab", "index": 1}, "keys": "ctrl+alt+2"},
        ]));

        let action = ActionAndArgs::with_args(
            ShortcutAction::SwitchToTab,
            ActionArgs::SwitchToTab { index: 1 },
        );
        assert_eq!(table.key_chord_for(&action), Some(&chord("ctrl+alt+2")));
        assert!(
            table
                .key_chord_for(&ActionAndArgs::new(ShortcutAction::Copy))
                .is_none()
        );
    }

    #[test]
    fn test_non_array_layer() {
        let mut table = KeyBindings::new();
        let warnings = table.layer_json(&json!({"command": "copy"}));
        assert_eq!(warnings.len(), 1);
    }
}

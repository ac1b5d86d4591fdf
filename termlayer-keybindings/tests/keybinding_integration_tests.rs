//! Integration tests for termlayer-keybindings.
//!
//! These tests exercise the full JSON → table → lookup pipeline through the
//! public API only.

use serde_json::json;
use termlayer_keybindings::{
    ActionAndArgs, ActionArgs, Direction, KeyBindings, KeybindingWarning, ShortcutAction,
    parse_key_chord,
};

// ---------------------------------------------------------------------------
// Layering
// ---------------------------------------------------------------------------

#[test]
fn defaults_then_user_layer() {
    let mut table = KeyBindings::new();

    let defaults = json!([
        {"command": "copy", "keys": "ctrl+shift+c"},
        {"command": "paste", "keys": "ctrl+shift+v"},
        {"command": "newTab", "keys": "ctrl+shift+t"},
        {"command": {"action": "moveFocus", "direction": "left"}, "keys": "alt+left"},
    ]);
    assert!(table.layer_json(&defaults).is_empty());
    assert_eq!(table.len(), 4);

    let user = json!([
        {"command": "unbound", "keys": "ctrl+shift+t"},
        {"command": "closeTab", "keys": "ctrl+w"},
    ]);
    assert!(table.layer_json(&user).is_empty());

    assert_eq!(table.len(), 4);
    assert!(table.lookup(&parse_key_chord("ctrl+shift+t").unwrap()).is_none());
    assert_eq!(
        table
            .lookup(&parse_key_chord("ctrl+w").unwrap())
            .map(|a| a.action),
        Some(ShortcutAction::CloseTab)
    );
    assert_eq!(
        table.lookup(&parse_key_chord("Alt+Left").unwrap()),
        Some(&ActionAndArgs::with_args(
            ShortcutAction::MoveFocus,
            ActionArgs::Direction(Direction::Left)
        ))
    );
}

#[test]
fn one_bad_entry_does_not_poison_the_layer() {
    let mut table = KeyBindings::new();
    let warnings = table.layer_json(&json!([
        {"command": "copy", "keys": "ctrl+c"},
        {"command": "teleport", "keys": "ctrl+t"},
        {"command": "paste", "keys": "ctrl+v"},
    ]));

    assert_eq!(
        warnings,
        vec![KeybindingWarning::UnknownAction {
            action: "teleport".to_string()
        }]
    );
    assert_eq!(table.len(), 2);
}

#[test]
fn missing_parameter_drops_binding() {
    let mut table = KeyBindings::new();
    let warnings = table.layer_json(&json!([
        {"command": {"action": "executeCommandline"}, "keys": "ctrl+e"},
    ]));

    assert_eq!(
        warnings,
        vec![KeybindingWarning::MissingRequiredParameter {
            action: "executeCommandline".to_string(),
            parameter: "commandline".to_string(),
        }]
    );
    assert!(table.is_empty());
}

// ---------------------------------------------------------------------------
// Iteration and reverse lookup
// ---------------------------------------------------------------------------

#[test]
fn iteration_is_sorted_and_stable() {
    let mut table = KeyBindings::new();
    table.layer_json(&json!([
        {"command": "paste", "keys": "ctrl+v"},
        {"command": "copy", "keys": "ctrl+c"},
    ]));

    let first: Vec<String> = table.iter().map(|(chord, _)| chord.to_string()).collect();
    let second: Vec<String> = table.iter().map(|(chord, _)| chord.to_string()).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn reverse_lookup_finds_bound_chord() {
    let mut table = KeyBindings::new();
    table.layer_json(&json!([{"command": "find", "keys": "ctrl+shift+f"}]));

    let chord = table
        .key_chord_for(&ActionAndArgs::new(ShortcutAction::Find))
        .unwrap();
    assert_eq!(chord.to_string(), "ctrl+shift+f");
}

// ---------------------------------------------------------------------------
// Chord display
// ---------------------------------------------------------------------------

#[test]
fn chord_display_round_trips_through_layer() {
    let mut table = KeyBindings::new();
    table.layer_json(&json!([{"command": "copy", "keys": "Shift+Ctrl+Insert"}]));

    let (chord, _) = table.iter().next().unwrap();
    let rebuilt = json!([{"command": "paste", "keys": chord.to_string()}]);
    table.layer_json(&rebuilt);

    assert_eq!(table.len(), 1);
    assert_eq!(
        table.iter().next().map(|(_, a)| a.action),
        Some(ShortcutAction::Paste)
    );
}

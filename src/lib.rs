// Library exports for the termlayer binary and its tests
//
// The settings model and layering engine live in `termlayer-config`; key
// chord parsing and the binding table in `termlayer-keybindings`. This crate
// adds the pieces an application needs around them: a snapshot store that
// swaps whole snapshots on reload, the stderr logging bridge and the CLI.

/// Application version (root crate version).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod logging;
pub mod store;

pub use store::{SettingsSources, SettingsStore, default_user_settings_path};
pub use termlayer_config as config;
pub use termlayer_keybindings as keybindings;

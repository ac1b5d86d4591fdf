//! Layered settings model for termlayer.
//!
//! Settings come in as an ordered list of JSON documents (built-in defaults,
//! the user's file, documents produced by profile generators). This crate
//! merges them into one resolved configuration:
//!
//! - Profiles are matched across layers by GUID, or by name and source while
//!   they have no GUID yet, and overridden field by field
//! - Global settings, color schemes, commands and keybindings are layered in
//!   document order
//! - Anything malformed produces a [`SettingsLoadWarning`] and is skipped;
//!   only undecodable JSON is an error
//!
//! ```
//! use serde_json::json;
//! use termlayer_config::{LayerOrigin, LayeringEngine, LayeringOptions, SettingsLayer};
//!
//! let layers = [
//!     SettingsLayer::new(LayerOrigin::Defaults, json!({"profiles": [{"name": "cmd"}]})),
//!     SettingsLayer::new(LayerOrigin::User, json!({"profiles": [{"name": "cmd", "fontSize": 14}]})),
//! ];
//! let outcome = LayeringEngine::load(&layers, LayeringOptions::default());
//!
//! assert!(outcome.warnings.is_empty());
//! assert_eq!(outcome.settings.profiles()[0].font_size(), 14);
//! ```

#[macro_use]
mod macros;

pub mod color;
pub mod color_scheme;
pub mod command;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod global_settings;
pub mod identity;
mod json;
pub mod layer;
pub mod profile_types;
pub mod resolved;
pub mod types;
pub mod warnings;

pub use color::{Color, ColorParseError};
pub use color_scheme::ColorScheme;
pub use command::Command;
pub use engine::{LayeringEngine, LayeringOptions};
pub use error::ConfigError;
pub use global_settings::{GlobalAppSettings, GlobalSettings};
pub use identity::{
    PROFILE_GUID_NAMESPACE, generate_profile_guid, guid_or_generate_for_json,
    is_dynamic_profile_object, parse_guid,
};
pub use layer::{DEFAULT_SETTINGS_JSON, SettingsLayer};
pub use profile_types::{
    LayerOrigin, Profile, ProfileCollection, ProfileDraft, ProfileId, ProfileSettings,
};
pub use resolved::{LoadOutcome, ResolvedSettings};
pub use types::{
    BackgroundImageAlignment, BackgroundImageStretchMode, CloseOnExitMode, CursorShape,
    ElementTheme, FontWeight, LaunchMode, LaunchPosition, ScrollbarState, TabWidthMode,
    TextAntialiasingMode,
};
pub use warnings::{SettingsLoadWarning, WarningKind, WarningSink};

// The keybinding crate is part of this crate's public API
pub use termlayer_keybindings as keybindings;

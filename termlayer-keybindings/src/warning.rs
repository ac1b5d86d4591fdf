//! Non-fatal problems found while reading keybinding entries.

use thiserror::Error;

/// A problem with one keybinding entry.
///
/// None of these abort loading; the offending entry is skipped and the rest
/// of the table is still built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeybindingWarning {
    /// The `command` names an action this table doesn't know.
    #[error("unknown action '{action}'")]
    UnknownAction { action: String },

    /// The `keys` string could not be parsed as a chord.
    #[error("invalid key chord '{keys}': {reason}")]
    InvalidKeyChord { keys: String, reason: String },

    /// `keys` was an array with more than one chord. Multi-chord sequences
    /// are not supported.
    #[error("binding lists {count} key chords, only a single chord is supported")]
    TooManyKeysForChord { count: usize },

    #[error("action '{action}' is missing required parameter '{parameter}'")]
    MissingRequiredParameter { action: String, parameter: String },

    #[error("invalid parameters for action '{action}': {reason}")]
    InvalidParameter { action: String, reason: String },

    /// The entry itself is malformed (not an object, no `command`, ...).
    #[error("binding entry #{index} is invalid: {reason}")]
    InvalidBindingEntry { index: usize, reason: String },
}

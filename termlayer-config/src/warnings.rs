//! Non-fatal load warnings.
//!
//! Loading settings never fails because of what is *inside* a document.
//! Every problem is recorded as a [`SettingsLoadWarning`] and the load
//! carries on with whatever is still usable.

use std::fmt;
use termlayer_keybindings::KeybindingWarning;
use thiserror::Error;
use uuid::Uuid;

/// Broad category of a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// A document or entry is not shaped as expected; it was skipped.
    Structural,
    /// A reference (default profile, color scheme) did not resolve; a
    /// fallback was applied.
    Referential,
    /// An entry is well-formed but means nothing (unknown action, ...).
    Semantic,
}

impl WarningKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            WarningKind::Structural => "structural",
            WarningKind::Referential => "referential",
            WarningKind::Semantic => "semantic",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A problem found while loading settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsLoadWarning {
    // ========================================================================
    // Structural
    // ========================================================================
    /// The whole layer was skipped.
    #[error("{origin} layer skipped: {reason}")]
    InvalidLayer { origin: String, reason: String },

    /// A `profiles` entry was not an object.
    #[error("{origin} layer: profile entry #{index} is not an object")]
    InvalidProfileEntry { origin: String, index: usize },

    /// A new profile would have been created, but the object has no name.
    #[error("{origin} layer: profile entry #{index} has no name and matches no existing profile")]
    MissingProfileName { origin: String, index: usize },

    /// A field had the wrong type or an unrecognized value. The previous
    /// value (if any) was kept.
    #[error("{owner}: ignoring invalid value for \"{key}\": {reason}")]
    InvalidValue {
        owner: String,
        key: String,
        reason: String,
    },

    /// A `schemes` entry without a name (or not an object at all).
    #[error("color scheme entry #{index} has no name")]
    MissingSchemeName { index: usize },

    /// Global settings were nested under a `globals` object.
    #[error("{origin} layer: the \"globals\" property is deprecated, move its contents to the top level")]
    LegacyGlobalsProperty { origin: String },

    // ========================================================================
    // Referential
    // ========================================================================
    /// Two finalized profiles share a GUID; the later one was dropped.
    #[error("duplicate profile {} (\"{name}\") was dropped", .guid.braced())]
    DuplicateProfile { guid: Uuid, name: String },

    /// A profile names a color scheme that doesn't exist.
    #[error("profile \"{profile}\" references unknown color scheme \"{scheme}\"")]
    UnknownColorScheme { profile: String, scheme: String },

    /// `defaultProfile` did not match any profile.
    #[error("default profile \"{requested}\" not found, using \"{fallback}\"")]
    MissingDefaultProfile { requested: String, fallback: String },

    // ========================================================================
    // Semantic
    // ========================================================================
    #[error("no profiles were loaded")]
    NoProfiles,

    #[error("all profiles are hidden")]
    AllProfilesHidden,

    #[error("keybinding: {0}")]
    Keybinding(#[from] KeybindingWarning),
}

impl SettingsLoadWarning {
    pub fn kind(&self) -> WarningKind {
        match self {
            SettingsLoadWarning::InvalidLayer { .. }
            | SettingsLoadWarning::InvalidProfileEntry { .. }
            | SettingsLoadWarning::MissingProfileName { .. }
            | SettingsLoadWarning::InvalidValue { .. }
            | SettingsLoadWarning::MissingSchemeName { .. }
            | SettingsLoadWarning::LegacyGlobalsProperty { .. } => WarningKind::Structural,
            SettingsLoadWarning::DuplicateProfile { .. }
            | SettingsLoadWarning::UnknownColorScheme { .. }
            | SettingsLoadWarning::MissingDefaultProfile { .. } => WarningKind::Referential,
            SettingsLoadWarning::NoProfiles
            | SettingsLoadWarning::AllProfilesHidden
            | SettingsLoadWarning::Keybinding(_) => WarningKind::Semantic,
        }
    }
}

/// Ordered collection of warnings produced during one load.
///
/// Every warning is logged as it arrives so problems show up in the log even
/// if the caller never looks at the list.
#[derive(Debug, Clone, Default)]
pub struct WarningSink {
    warnings: Vec<SettingsLoadWarning>,
}

impl WarningSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: SettingsLoadWarning) {
        log::warn!("Settings warning ({}): {}", warning.kind(), warning);
        self.warnings.push(warning);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SettingsLoadWarning> {
        self.warnings.iter()
    }

    pub fn into_vec(self) -> Vec<SettingsLoadWarning> {
        self.warnings
    }
}

impl Extend<SettingsLoadWarning> for WarningSink {
    fn extend<I: IntoIterator<Item = SettingsLoadWarning>>(&mut self, iter: I) {
        for warning in iter {
            self.push(warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_keeps_order() {
        let mut sink = WarningSink::new();
        sink.push(SettingsLoadWarning::NoProfiles);
        sink.extend([
            SettingsLoadWarning::MissingSchemeName { index: 3 },
            SettingsLoadWarning::AllProfilesHidden,
        ]);

        assert_eq!(sink.len(), 3);
        let warnings = sink.into_vec();
        assert_eq!(warnings[0], SettingsLoadWarning::NoProfiles);
        assert_eq!(warnings[2], SettingsLoadWarning::AllProfilesHidden);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            SettingsLoadWarning::MissingDefaultProfile {
                requested: "cmd".into(),
                fallback: "Shell".into()
            }
            .kind(),
            WarningKind::Referential
        );
        assert_eq!(
            SettingsLoadWarning::from(KeybindingWarning::UnknownAction {
                action: "x".into()
            })
            .kind(),
            WarningKind::Semantic
        );
        assert_eq!(
            SettingsLoadWarning::InvalidValue {
                owner: "cmd".into(),
                key: "fontSize".into(),
                reason: "expected i32".into()
            }
            .kind(),
            WarningKind::Structural
        );
    }

    #[test]
    fn test_display_mentions_details() {
        let warning = SettingsLoadWarning::UnknownColorScheme {
            profile: "cmd".into(),
            scheme: "Nope".into(),
        };
        let text = warning.to_string();
        assert!(text.contains("cmd"));
        assert!(text.contains("Nope"));
    }
}

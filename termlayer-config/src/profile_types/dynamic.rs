//! Layer origin tracking.
//!
//! Records which kind of document a layer came from. Profiles remember every
//! origin that contributed to them; this is runtime-only information and is
//! never written back to settings files.

use std::fmt;

/// Where a settings layer came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LayerOrigin {
    /// The built-in defaults document
    Defaults,
    /// The user's settings file
    User,
    /// A dynamic profile generator, identified by its namespace (e.g.
    /// `"Windows.Terminal.Wsl"`)
    Generator(String),
}

impl LayerOrigin {
    /// Returns true if this layer was produced by a profile generator
    pub fn is_dynamic(&self) -> bool {
        matches!(self, LayerOrigin::Generator(_))
    }

    /// The generator namespace, for generator layers.
    pub fn namespace(&self) -> Option<&str> {
        match self {
            LayerOrigin::Generator(namespace) => Some(namespace),
            _ => None,
        }
    }
}

impl fmt::Display for LayerOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerOrigin::Defaults => f.write_str("defaults"),
            LayerOrigin::User => f.write_str("user"),
            LayerOrigin::Generator(namespace) => write!(f, "generator '{}'", namespace),
        }
    }
}

//! Value types for profile and global settings.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Cursor / Scrollbar
// ============================================================================

/// Cursor shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum CursorShape {
    /// Legacy console cursor, height set by `cursorHeight`
    Vintage,
    #[default]
    Bar,
    Underscore,
    FilledBox,
    EmptyBox,
}

impl CursorShape {
    pub fn display_name(&self) -> &'static str {
        match self {
            CursorShape::Vintage => "Vintage",
            CursorShape::Bar => "Bar",
            CursorShape::Underscore => "Underscore",
            CursorShape::FilledBox => "Filled box",
            CursorShape::EmptyBox => "Empty box",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ScrollbarState {
    #[default]
    Visible,
    Hidden,
}

// ============================================================================
// Background image
// ============================================================================

/// How the background image is scaled to fill the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundImageStretchMode {
    /// Keep original size
    None,
    /// Stretch to fill, ignoring aspect ratio
    Fill,
    /// Scale to fit, preserving aspect ratio
    Uniform,
    /// Scale to cover, preserving aspect ratio (may crop)
    #[default]
    UniformToFill,
}

/// Where the background image is anchored.
///
/// Horizontal and vertical alignment are a single setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundImageAlignment {
    #[default]
    Center,
    Left,
    Top,
    Right,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

// ============================================================================
// Text rendering
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TextAntialiasingMode {
    #[default]
    Grayscale,
    Cleartype,
    Aliased,
}

/// Font weight, either a named weight or a number between 1 and 999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(u16);

impl FontWeight {
    pub const THIN: FontWeight = FontWeight(100);
    pub const EXTRA_LIGHT: FontWeight = FontWeight(200);
    pub const LIGHT: FontWeight = FontWeight(300);
    pub const SEMI_LIGHT: FontWeight = FontWeight(350);
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const SEMI_BOLD: FontWeight = FontWeight(600);
    pub const BOLD: FontWeight = FontWeight(700);
    pub const EXTRA_BOLD: FontWeight = FontWeight(800);
    pub const BLACK: FontWeight = FontWeight(900);
    pub const EXTRA_BLACK: FontWeight = FontWeight(950);

    const NAMED: &'static [(&'static str, FontWeight)] = &[
        ("thin", Self::THIN),
        ("extra-light", Self::EXTRA_LIGHT),
        ("light", Self::LIGHT),
        ("semi-light", Self::SEMI_LIGHT),
        ("normal", Self::NORMAL),
        ("medium", Self::MEDIUM),
        ("semi-bold", Self::SEMI_BOLD),
        ("bold", Self::BOLD),
        ("extra-bold", Self::EXTRA_BOLD),
        ("black", Self::BLACK),
        ("extra-black", Self::EXTRA_BLACK),
    ];

    /// Create a weight from a number in `1..=999`.
    pub fn new(weight: u16) -> Option<Self> {
        (1..=999).contains(&weight).then_some(Self(weight))
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    /// The name of this weight, if it is one of the named weights.
    pub fn name(&self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(_, weight)| weight == self)
            .map(|(name, _)| *name)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, weight)| *weight)
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl Serialize for FontWeight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.name() {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_u16(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WeightVisitor;

        impl de::Visitor<'_> for WeightVisitor {
            type Value = FontWeight;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a font weight name or a number between 1 and 999")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<FontWeight, E> {
                FontWeight::from_name(v)
                    .ok_or_else(|| E::custom(format!("unknown font weight '{}'", v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<FontWeight, E> {
                u16::try_from(v)
                    .ok()
                    .and_then(FontWeight::new)
                    .ok_or_else(|| E::custom(format!("font weight {} is out of range", v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<FontWeight, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("font weight {} is out of range", v)))
                    .and_then(|v| self.visit_u64(v))
            }
        }

        deserializer.deserialize_any(WeightVisitor)
    }
}

// ============================================================================
// Session lifecycle
// ============================================================================

/// What happens to a tab when its process exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum CloseOnExitMode {
    /// Keep the tab open
    Never,
    /// Close only when the process exited successfully
    #[default]
    Graceful,
    /// Always close
    Always,
}

impl<'de> Deserialize<'de> for CloseOnExitMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Older settings files use a plain bool.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Named(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Flag(true) => Ok(CloseOnExitMode::Graceful),
            Repr::Flag(false) => Ok(CloseOnExitMode::Never),
            Repr::Named(name) => match name.as_str() {
                "never" => Ok(CloseOnExitMode::Never),
                "graceful" => Ok(CloseOnExitMode::Graceful),
                "always" => Ok(CloseOnExitMode::Always),
                other => Err(de::Error::unknown_variant(
                    other,
                    &["never", "graceful", "always"],
                )),
            },
        }
    }
}

// ============================================================================
// Window / tab strip
// ============================================================================

/// Application theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ElementTheme {
    /// Follow the OS setting
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TabWidthMode {
    #[default]
    Equal,
    TitleLength,
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum LaunchMode {
    #[default]
    Default,
    Maximized,
    Fullscreen,
    Focus,
    MaximizedFocus,
}

/// Initial window position, written as `"x,y"`. Either coordinate may be
/// left empty (`",100"`) to let the window manager pick it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LaunchPosition {
    pub x: Option<i64>,
    pub y: Option<i64>,
}

impl FromStr for LaunchPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coordinate = |part: Option<&str>| -> Result<Option<i64>, String> {
            match part.map(str::trim) {
                None | Some("") => Ok(None),
                Some(text) => text
                    .parse()
                    .map(Some)
                    .map_err(|_| format!("invalid coordinate '{}' in position '{}'", text, s)),
            }
        };

        let mut parts = s.splitn(2, ',');
        let x = coordinate(parts.next())?;
        let y = coordinate(parts.next())?;
        Ok(Self { x, y })
    }
}

impl fmt::Display for LaunchPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |v: Option<i64>| v.map(|v| v.to_string()).unwrap_or_default();
        write!(f, "{},{}", part(self.x), part(self.y))
    }
}

impl Serialize for LaunchPosition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LaunchPosition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

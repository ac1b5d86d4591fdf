//! Key chord parser.
//!
//! Parses human-readable chord strings like "ctrl+shift+t" into [`KeyChord`]
//! values. Parsing is case-insensitive; the [`fmt::Display`] form is the
//! canonical lowercase spelling and parses back to the same chord.

use std::fmt;

/// Error type for key chord parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

/// Set of active modifiers for a key chord.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    /// Windows / Super / Cmd key
    pub super_key: bool,
}

/// A parsed key chord (modifiers + key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyChord {
    pub modifiers: Modifiers,
    pub key: ParsedKey,
}

impl KeyChord {
    pub fn new(modifiers: Modifiers, key: ParsedKey) -> Self {
        Self { modifiers, key }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();

        if self.modifiers.ctrl {
            parts.push("ctrl".to_string());
        }
        if self.modifiers.alt {
            parts.push("alt".to_string());
        }
        if self.modifiers.shift {
            parts.push("shift".to_string());
        }
        if self.modifiers.super_key {
            parts.push("win".to_string());
        }

        match &self.key {
            ParsedKey::Character(c) => parts.push(c.to_string()),
            ParsedKey::Named(n) => parts.push(n.canonical_name()),
        }

        write!(f, "{}", parts.join("+"))
    }
}

impl std::str::FromStr for KeyChord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key_chord(s)
    }
}

/// The actual key (either a character or a named key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParsedKey {
    /// A single printable character, stored lowercase (e.g., 'a', '1', ',')
    Character(char),
    /// A named key (e.g., F1, Enter, Escape)
    Named(NamedKey),
}

/// Keys that are spelled by name rather than by the character they produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NamedKey {
    /// Function keys F1 through F24
    Function(u8),
    Enter,
    Tab,
    Space,
    Escape,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Plus,
    Minus,
    Menu,
    /// Numeric keypad digits 0 through 9
    Numpad(u8),
    NumpadAdd,
    NumpadSubtract,
    NumpadMultiply,
    NumpadDivide,
    NumpadDecimal,
}

impl NamedKey {
    /// The spelling used when a chord is displayed.
    pub fn canonical_name(&self) -> String {
        match self {
            NamedKey::Function(n) => format!("f{}", n),
            NamedKey::Numpad(n) => format!("numpad{}", n),
            NamedKey::Enter => "enter".to_string(),
            NamedKey::Tab => "tab".to_string(),
            NamedKey::Space => "space".to_string(),
            NamedKey::Escape => "esc".to_string(),
            NamedKey::Backspace => "backspace".to_string(),
            NamedKey::Delete => "delete".to_string(),
            NamedKey::Insert => "insert".to_string(),
            NamedKey::Home => "home".to_string(),
            NamedKey::End => "end".to_string(),
            NamedKey::PageUp => "pgup".to_string(),
            NamedKey::PageDown => "pgdn".to_string(),
            NamedKey::ArrowUp => "up".to_string(),
            NamedKey::ArrowDown => "down".to_string(),
            NamedKey::ArrowLeft => "left".to_string(),
            NamedKey::ArrowRight => "right".to_string(),
            NamedKey::Plus => "plus".to_string(),
            NamedKey::Minus => "minus".to_string(),
            NamedKey::Menu => "menu".to_string(),
            NamedKey::NumpadAdd => "numpad_plus".to_string(),
            NamedKey::NumpadSubtract => "numpad_minus".to_string(),
            NamedKey::NumpadMultiply => "numpad_multiply".to_string(),
            NamedKey::NumpadDivide => "numpad_divide".to_string(),
            NamedKey::NumpadDecimal => "numpad_period".to_string(),
        }
    }
}

/// Parse a key chord string into a KeyChord.
///
/// Supported format: "modifier+modifier+key"
///
/// Modifiers:
/// - `ctrl`, `control` - Control key
/// - `alt`, `option` - Alt/Option key
/// - `shift` - Shift key
/// - `win`, `super`, `cmd`, `command`, `meta` - Windows/Super key
///
/// Keys:
/// - Single characters: `a`, `1`, `,`, etc.
/// - Named keys: `f1`-`f24`, `enter`, `esc`, `space`, `tab`, `pgup`,
///   `numpad0`-`numpad9`, `plus`, `minus`, etc.
pub fn parse_key_chord(s: &str) -> Result<KeyChord, ParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ParseError("Empty key chord".to_string()));
    }

    let parts: Vec<&str> = trimmed.split('+').map(str::trim).collect();

    let mut modifiers = Modifiers::default();
    let mut key_part = None;

    for (i, part) in parts.iter().enumerate() {
        let is_last = i == parts.len() - 1;

        if part.is_empty() {
            return Err(ParseError(format!(
                "Empty segment in key chord '{}' (use 'plus' for the + key)",
                trimmed
            )));
        }

        let is_modifier = match part.to_lowercase().as_str() {
            "ctrl" | "control" => {
                modifiers.ctrl = true;
                true
            }
            "alt" | "option" => {
                modifiers.alt = true;
                true
            }
            "shift" => {
                modifiers.shift = true;
                true
            }
            "win" | "super" | "cmd" | "command" | "meta" => {
                modifiers.super_key = true;
                true
            }
            _ => false,
        };

        if !is_modifier {
            if key_part.is_some() {
                return Err(ParseError(format!(
                    "Multiple keys specified: already have key, found '{}'",
                    part
                )));
            }
            key_part = Some(*part);
        } else if is_last {
            return Err(ParseError(
                "Key chord ends with modifier, no key specified".to_string(),
            ));
        }
    }

    let key_str = key_part.ok_or_else(|| ParseError("No key specified".to_string()))?;
    let key = parse_key(key_str)?;

    Ok(KeyChord { modifiers, key })
}

/// Parse a key string into a ParsedKey.
fn parse_key(s: &str) -> Result<ParsedKey, ParseError> {
    if let Some(named) = parse_named_key(s) {
        return Ok(ParsedKey::Named(named));
    }

    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
        && !c.is_whitespace()
        && !c.is_control()
    {
        return Ok(ParsedKey::Character(c.to_ascii_lowercase()));
    }

    Err(ParseError(format!("Unknown key: '{}'", s)))
}

/// Parse a named key string into a NamedKey.
fn parse_named_key(s: &str) -> Option<NamedKey> {
    let lower = s.to_lowercase();

    if let Some(number) = lower.strip_prefix("numpad")
        && let Ok(n) = number.parse::<u8>()
    {
        return (n <= 9).then_some(NamedKey::Numpad(n));
    }

    if let Some(number) = lower.strip_prefix('f')
        && let Ok(n) = number.parse::<u8>()
    {
        return (1..=24).contains(&n).then_some(NamedKey::Function(n));
    }

    match lower.as_str() {
        "enter" | "return" => Some(NamedKey::Enter),
        "escape" | "esc" => Some(NamedKey::Escape),
        "space" => Some(NamedKey::Space),
        "tab" => Some(NamedKey::Tab),
        "backspace" => Some(NamedKey::Backspace),
        "delete" | "del" => Some(NamedKey::Delete),
        "insert" | "ins" => Some(NamedKey::Insert),
        "home" => Some(NamedKey::Home),
        "end" => Some(NamedKey::End),
        "pageup" | "pgup" => Some(NamedKey::PageUp),
        "pagedown" | "pgdn" => Some(NamedKey::PageDown),

        "up" | "arrowup" => Some(NamedKey::ArrowUp),
        "down" | "arrowdown" => Some(NamedKey::ArrowDown),
        "left" | "arrowleft" => Some(NamedKey::ArrowLeft),
        "right" | "arrowright" => Some(NamedKey::ArrowRight),

        "plus" => Some(NamedKey::Plus),
        "minus" => Some(NamedKey::Minus),
        "menu" | "app" => Some(NamedKey::Menu),

        "numpad_plus" | "numpad_add" => Some(NamedKey::NumpadAdd),
        "numpad_minus" | "numpad_subtract" => Some(NamedKey::NumpadSubtract),
        "numpad_multiply" => Some(NamedKey::NumpadMultiply),
        "numpad_divide" => Some(NamedKey::NumpadDivide),
        "numpad_period" | "numpad_decimal" => Some(NamedKey::NumpadDecimal),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_key() {
        let chord = parse_key_chord("a").unwrap();
        assert!(!chord.modifiers.ctrl);
        assert!(!chord.modifiers.shift);
        assert_eq!(chord.key, ParsedKey::Character('a'));
    }

    #[test]
    fn test_ctrl_shift_key() {
        let chord = parse_key_chord("ctrl+shift+t").unwrap();
        assert!(chord.modifiers.ctrl);
        assert!(chord.modifiers.shift);
        assert!(!chord.modifiers.alt);
        assert_eq!(chord.key, ParsedKey::Character('t'));
    }

    #[test]
    fn test_case_insensitive() {
        let upper = parse_key_chord("Ctrl+Shift+T").unwrap();
        let lower = parse_key_chord("ctrl+shift+t").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_modifier_order_is_irrelevant() {
        let a = parse_key_chord("shift+ctrl+t").unwrap();
        let b = parse_key_chord("ctrl+shift+t").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_function_keys() {
        let chord = parse_key_chord("alt+f4").unwrap();
        assert!(chord.modifiers.alt);
        assert_eq!(chord.key, ParsedKey::Named(NamedKey::Function(4)));

        let chord = parse_key_chord("F24").unwrap();
        assert_eq!(chord.key, ParsedKey::Named(NamedKey::Function(24)));

        assert!(parse_key_chord("f25").is_err());
        assert!(parse_key_chord("f0").is_err());
    }

    #[test]
    fn test_single_f_is_a_character() {
        let chord = parse_key_chord("ctrl+f").unwrap();
        assert_eq!(chord.key, ParsedKey::Character('f'));
    }

    #[test]
    fn test_numpad_keys() {
        let chord = parse_key_chord("ctrl+numpad7").unwrap();
        assert_eq!(chord.key, ParsedKey::Named(NamedKey::Numpad(7)));
        assert!(parse_key_chord("numpad10").is_err());
    }

    #[test]
    fn test_named_key_aliases() {
        let chord = parse_key_chord("Return").unwrap();
        assert_eq!(chord.key, ParsedKey::Named(NamedKey::Enter));

        let chord = parse_key_chord("Escape").unwrap();
        assert_eq!(chord.key, ParsedKey::Named(NamedKey::Escape));

        let chord = parse_key_chord("PageUp").unwrap();
        assert_eq!(chord.key, ParsedKey::Named(NamedKey::PageUp));

        let chord = parse_key_chord("app").unwrap();
        assert_eq!(chord.key, ParsedKey::Named(NamedKey::Menu));
    }

    #[test]
    fn test_punctuation_key() {
        let chord = parse_key_chord("ctrl+,").unwrap();
        assert_eq!(chord.key, ParsedKey::Character(','));
    }

    #[test]
    fn test_modifier_aliases() {
        assert!(parse_key_chord("Control+A").unwrap().modifiers.ctrl);
        assert!(parse_key_chord("Option+A").unwrap().modifiers.alt);
        assert!(parse_key_chord("Cmd+A").unwrap().modifiers.super_key);
        assert!(parse_key_chord("win+A").unwrap().modifiers.super_key);
    }

    #[test]
    fn test_invalid_empty() {
        assert!(parse_key_chord("").is_err());
        assert!(parse_key_chord("   ").is_err());
    }

    #[test]
    fn test_invalid_modifier_only() {
        assert!(parse_key_chord("ctrl").is_err());
        assert!(parse_key_chord("ctrl+shift").is_err());
    }

    #[test]
    fn test_invalid_double_plus() {
        assert!(parse_key_chord("ctrl++").is_err());
    }

    #[test]
    fn test_invalid_two_keys() {
        assert!(parse_key_chord("ctrl+a+b").is_err());
    }

    #[test]
    fn test_invalid_unknown_key() {
        assert!(parse_key_chord("ctrl+unknownkey").is_err());
    }

    #[test]
    fn test_display_is_canonical() {
        let chord = parse_key_chord("Shift+Ctrl+PageUp").unwrap();
        assert_eq!(chord.to_string(), "ctrl+shift+pgup");

        let reparsed: KeyChord = chord.to_string().parse().unwrap();
        assert_eq!(reparsed, chord);
    }
}

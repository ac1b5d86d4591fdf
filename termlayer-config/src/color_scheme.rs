/// Named color schemes referenced by profiles
use serde_json::{Map, Value};

use crate::color::Color;
use crate::json;
use crate::warnings::SettingsLoadWarning;

/// JSON keys of the 16 table colors, in ANSI order
const TABLE_KEYS: [&str; 16] = [
    "black",
    "red",
    "green",
    "yellow",
    "blue",
    "purple",
    "cyan",
    "white",
    "brightBlack",
    "brightRed",
    "brightGreen",
    "brightYellow",
    "brightBlue",
    "brightPurple",
    "brightCyan",
    "brightWhite",
];

/// Terminal color scheme with 16 ANSI colors plus foreground/background
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    name: String,
    pub foreground: Color,
    pub background: Color,
    pub selection_background: Color,
    pub cursor_color: Color,

    /// ANSI colors (0-15)
    pub table: [Color; 16],
}

impl ColorScheme {
    /// A scheme with the given name and Campbell's colors.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::campbell()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get ANSI color by index (0-15)
    pub fn table_color(&self, index: u8) -> Color {
        self.table
            .get(usize::from(index))
            .copied()
            .unwrap_or(self.foreground)
    }

    /// Build a scheme from one `schemes` entry. Returns `None` if the entry
    /// has no name; colors it doesn't mention keep Campbell's values.
    pub fn from_json(obj: &Map<String, Value>) -> Option<(Self, Vec<SettingsLoadWarning>)> {
        let name = json::get_str(obj, "name")?;
        let mut scheme = Self::new(name);
        let warnings = scheme.layer_json(obj);
        Some((scheme, warnings))
    }

    /// Schemes are matched across layers by name.
    pub fn should_be_layered(&self, obj: &Map<String, Value>) -> bool {
        json::get_str(obj, "name") == Some(self.name.as_str())
    }

    /// Overwrite every color present in `obj`.
    pub fn layer_json(&mut self, obj: &Map<String, Value>) -> Vec<SettingsLoadWarning> {
        let mut warnings = Vec::new();
        let owner = format!("scheme \"{}\"", self.name);

        let mut layer = |key: &str, slot: &mut Color| {
            let mut value = None;
            json::layer_field(obj, key, &mut value, &owner, &mut warnings);
            if let Some(color) = value {
                *slot = color;
            }
        };

        layer("foreground", &mut self.foreground);
        layer("background", &mut self.background);
        layer("selectionBackground", &mut self.selection_background);
        layer("cursorColor", &mut self.cursor_color);
        for (key, slot) in TABLE_KEYS.iter().zip(self.table.iter_mut()) {
            layer(*key, slot);
        }

        warnings
    }

    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        out.insert("name".into(), Value::String(self.name.clone()));
        out.insert("foreground".into(), Value::String(self.foreground.to_string()));
        out.insert("background".into(), Value::String(self.background.to_string()));
        out.insert(
            "selectionBackground".into(),
            Value::String(self.selection_background.to_string()),
        );
        out.insert("cursorColor".into(), Value::String(self.cursor_color.to_string()));
        for (key, color) in TABLE_KEYS.iter().zip(self.table.iter()) {
            out.insert((*key).into(), Value::String(color.to_string()));
        }
        Value::Object(out)
    }

    /// Campbell, the default scheme
    pub fn campbell() -> Self {
        Self {
            name: "Campbell".to_string(),
            foreground: Color::new(0xcc, 0xcc, 0xcc),
            background: Color::new(0x0c, 0x0c, 0x0c),
            selection_background: Color::new(0xff, 0xff, 0xff),
            cursor_color: Color::new(0xff, 0xff, 0xff),
            table: [
                Color::new(0x0c, 0x0c, 0x0c),
                Color::new(0xc5, 0x0f, 0x1f),
                Color::new(0x13, 0xa1, 0x0e),
                Color::new(0xc1, 0x9c, 0x00),
                Color::new(0x00, 0x37, 0xda),
                Color::new(0x88, 0x17, 0x98),
                Color::new(0x3a, 0x96, 0xdd),
                Color::new(0xcc, 0xcc, 0xcc),
                Color::new(0x76, 0x76, 0x76),
                Color::new(0xe7, 0x48, 0x56),
                Color::new(0x16, 0xc6, 0x0c),
                Color::new(0xf9, 0xf1, 0xa5),
                Color::new(0x3b, 0x78, 0xff),
                Color::new(0xb4, 0x00, 0x9e),
                Color::new(0x61, 0xd6, 0xd6),
                Color::new(0xf2, 0xf2, 0xf2),
            ],
        }
    }
}

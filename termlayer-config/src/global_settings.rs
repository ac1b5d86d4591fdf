//! The global (process-wide) settings record.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use serde_json::{Map, Value};
use termlayer_keybindings::{KeyBindings, KeybindingWarning};
use uuid::Uuid;

use crate::color_scheme::ColorScheme;
use crate::command::Command;
use crate::defaults;
use crate::json;
use crate::types::{ElementTheme, LaunchMode, LaunchPosition, TabWidthMode};
use crate::warnings::SettingsLoadWarning;

/// Label used for warnings about global keys.
const OWNER: &str = "global settings";

layered_settings! {
    /// Scalar global settings. Same tri-state discipline as profile settings.
    pub struct GlobalSettings {
        // ====================================================================
        // Window
        // ====================================================================
        initial_rows, has_initial_rows, set_initial_rows, clear_initial_rows: i32 =
            "initialRows" => defaults::initial_rows();
        initial_cols, has_initial_cols, set_initial_cols, clear_initial_cols: i32 =
            "initialCols" => defaults::initial_cols();
        /// Initial window position, `"x,y"`
        initial_position, has_initial_position, set_initial_position, clear_initial_position:
            LaunchPosition = "initialPosition" => defaults::initial_position();
        launch_mode, has_launch_mode, set_launch_mode, clear_launch_mode: LaunchMode =
            "launchMode" => defaults::launch_mode();
        snap_to_grid_on_resize, has_snap_to_grid_on_resize, set_snap_to_grid_on_resize,
            clear_snap_to_grid_on_resize: bool =
            "snapToGridOnResize" => defaults::snap_to_grid_on_resize();
        always_on_top, has_always_on_top, set_always_on_top, clear_always_on_top: bool =
            "alwaysOnTop" => defaults::always_on_top();
        start_on_user_login, has_start_on_user_login, set_start_on_user_login,
            clear_start_on_user_login: bool =
            "startOnUserLogin" => defaults::start_on_user_login();
        theme, has_theme, set_theme, clear_theme: ElementTheme = "theme" => defaults::theme();

        // ====================================================================
        // Tabs
        // ====================================================================
        always_show_tabs, has_always_show_tabs, set_always_show_tabs, clear_always_show_tabs:
            bool = "alwaysShowTabs" => defaults::always_show_tabs();
        show_terminal_title_in_titlebar, has_show_terminal_title_in_titlebar,
            set_show_terminal_title_in_titlebar, clear_show_terminal_title_in_titlebar: bool =
            "showTerminalTitleInTitlebar" => defaults::show_terminal_title_in_titlebar();
        show_tabs_in_titlebar, has_show_tabs_in_titlebar, set_show_tabs_in_titlebar,
            clear_show_tabs_in_titlebar: bool =
            "showTabsInTitlebar" => defaults::show_tabs_in_titlebar();
        confirm_close_all_tabs, has_confirm_close_all_tabs, set_confirm_close_all_tabs,
            clear_confirm_close_all_tabs: bool =
            "confirmCloseAllTabs" => defaults::confirm_close_all_tabs();
        tab_width_mode, has_tab_width_mode, set_tab_width_mode, clear_tab_width_mode:
            TabWidthMode = "tabWidthMode" => defaults::tab_width_mode();

        // ====================================================================
        // Selection & clipboard
        // ====================================================================
        /// Characters that end a word for double-click selection
        word_delimiters, has_word_delimiters, set_word_delimiters, clear_word_delimiters:
            String = "wordDelimiters" => defaults::word_delimiters();
        copy_on_select, has_copy_on_select, set_copy_on_select, clear_copy_on_select: bool =
            "copyOnSelect" => defaults::copy_on_select();
        copy_formatting, has_copy_formatting, set_copy_formatting, clear_copy_formatting:
            bool = "copyFormatting" => defaults::copy_formatting();
        large_paste_warning, has_large_paste_warning, set_large_paste_warning,
            clear_large_paste_warning: bool =
            "largePasteWarning" => defaults::large_paste_warning();
        multi_line_paste_warning, has_multi_line_paste_warning, set_multi_line_paste_warning,
            clear_multi_line_paste_warning: bool =
            "multiLinePasteWarning" => defaults::multi_line_paste_warning();

        // ====================================================================
        // Debugging / experimental
        // ====================================================================
        debug_features, has_debug_features, set_debug_features, clear_debug_features: bool =
            "debugFeatures" => defaults::debug_features();
        force_full_repaint, has_force_full_repaint, set_force_full_repaint,
            clear_force_full_repaint: bool =
            "experimental.rendering.forceFullRepaint" => defaults::force_full_repaint();
        software_rendering, has_software_rendering, set_software_rendering,
            clear_software_rendering: bool =
            "experimental.rendering.software" => defaults::software_rendering();
        force_vt_input, has_force_vt_input, set_force_vt_input, clear_force_vt_input: bool =
            "experimental.input.forceVT" => defaults::force_vt_input();
    }
}

/// Global settings plus the collections that live next to them: color
/// schemes, commands and keybindings.
#[derive(Debug, Clone, Default)]
pub struct GlobalAppSettings {
    settings: GlobalSettings,
    unparsed_default_profile: Option<String>,
    default_profile: Option<Uuid>,
    color_schemes: HashMap<String, ColorScheme>,
    commands: HashMap<String, Command>,
    keybindings: KeyBindings,
    keybindings_warnings: Vec<KeybindingWarning>,
}

impl GlobalAppSettings {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Default profile
    // ========================================================================

    /// The default profile's GUID once it has been resolved (or set directly).
    pub fn default_profile(&self) -> Option<Uuid> {
        self.default_profile
    }

    /// Set the default profile by GUID. Clears any pending `defaultProfile`
    /// string.
    pub fn set_default_profile(&mut self, guid: Uuid) {
        self.default_profile = Some(guid);
        self.unparsed_default_profile = None;
    }

    /// The `defaultProfile` value as written, while it still awaits
    /// resolution against the finalized profiles.
    pub fn unparsed_default_profile(&self) -> Option<&str> {
        self.unparsed_default_profile.as_deref()
    }

    // ========================================================================
    // Schemes, commands, keybindings
    // ========================================================================

    /// Insert or replace a scheme by name
    pub fn add_color_scheme(&mut self, scheme: ColorScheme) {
        self.color_schemes.insert(scheme.name().to_string(), scheme);
    }

    pub fn color_schemes(&self) -> &HashMap<String, ColorScheme> {
        &self.color_schemes
    }

    pub fn commands(&self) -> &HashMap<String, Command> {
        &self.commands
    }

    pub fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    /// Every keybinding warning seen so far, across all layers.
    pub fn keybindings_warnings(&self) -> &[KeybindingWarning] {
        &self.keybindings_warnings
    }

    // ========================================================================
    // Layering
    // ========================================================================

    /// Apply one layer of global keys.
    ///
    /// Scalars follow the usual field rules. `schemes` entries are layered
    /// onto the scheme of the same name (or added). `keybindings` and
    /// `bindings` arrays feed both the keybinding table and the command
    /// table; keybinding warnings are kept on this record and also returned.
    pub fn layer_json(&mut self, obj: &Map<String, Value>) -> Vec<SettingsLoadWarning> {
        let mut warnings = Vec::new();

        match obj.get("defaultProfile") {
            None => {}
            Some(Value::Null) => self.unparsed_default_profile = None,
            Some(Value::String(text)) => self.unparsed_default_profile = Some(text.clone()),
            Some(other) => warnings.push(SettingsLoadWarning::InvalidValue {
                owner: OWNER.to_string(),
                key: "defaultProfile".to_string(),
                reason: format!("expected a string, found {}", json::type_name(other)),
            }),
        }

        self.settings.layer_json(OWNER, obj, &mut warnings);

        if let Some(schemes) = obj.get("schemes") {
            self.layer_schemes(schemes, &mut warnings);
        }

        for key in ["keybindings", "bindings"] {
            if let Some(bindings) = obj.get(key) {
                let binding_warnings = self.keybindings.layer_json(bindings);
                Command::layer_json(&mut self.commands, bindings);
                warnings.extend(binding_warnings.iter().cloned().map(SettingsLoadWarning::from));
                self.keybindings_warnings.extend(binding_warnings);
            }
        }

        warnings
    }

    fn layer_schemes(&mut self, schemes: &Value, warnings: &mut Vec<SettingsLoadWarning>) {
        let Some(entries) = schemes.as_array() else {
            warnings.push(SettingsLoadWarning::InvalidValue {
                owner: OWNER.to_string(),
                key: "schemes".to_string(),
                reason: format!("expected an array, found {}", json::type_name(schemes)),
            });
            return;
        };

        for (index, entry) in entries.iter().enumerate() {
            let Some((obj, name)) = entry
                .as_object()
                .and_then(|obj| Some((obj, json::get_str(obj, "name")?)))
            else {
                warnings.push(SettingsLoadWarning::MissingSchemeName { index });
                continue;
            };

            if let Some(existing) = self.color_schemes.get_mut(name) {
                log::debug!("Layering color scheme '{}'", name);
                warnings.extend(existing.layer_json(obj));
            } else if let Some((scheme, scheme_warnings)) = ColorScheme::from_json(obj) {
                log::debug!("Adding color scheme '{}'", name);
                warnings.extend(scheme_warnings);
                self.add_color_scheme(scheme);
            }
        }
    }

    /// Serialize the scalar settings that are set, the default profile and
    /// every color scheme (sorted by name).
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();

        if let Some(guid) = self.default_profile {
            out.insert(
                "defaultProfile".into(),
                Value::String(guid.braced().to_string()),
            );
        } else if let Some(unparsed) = &self.unparsed_default_profile {
            out.insert("defaultProfile".into(), Value::String(unparsed.clone()));
        }

        self.settings.write_json(&mut out);

        let mut schemes: Vec<&ColorScheme> = self.color_schemes.values().collect();
        schemes.sort_by(|a, b| a.name().cmp(b.name()));
        out.insert(
            "schemes".into(),
            Value::Array(schemes.into_iter().map(ColorScheme::to_json).collect()),
        );

        Value::Object(out)
    }
}

impl Deref for GlobalAppSettings {
    type Target = GlobalSettings;

    fn deref(&self) -> &GlobalSettings {
        &self.settings
    }
}

impl DerefMut for GlobalAppSettings {
    fn deref_mut(&mut self) -> &mut GlobalSettings {
        &mut self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use termlayer_keybindings::{ShortcutAction, parse_key_chord};

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_defaults_when_unset() {
        let globals = GlobalAppSettings::new();
        assert_eq!(globals.initial_rows(), 30);
        assert_eq!(globals.initial_cols(), 120);
        assert!(globals.always_show_tabs());
        assert_eq!(globals.initial_position(), LaunchPosition::default());
        assert_eq!(globals.launch_mode(), LaunchMode::Default);
        assert!(globals.default_profile().is_none());
    }

    #[test]
    fn test_later_layer_wins_for_scalars() {
        let mut globals = GlobalAppSettings::new();
        globals.layer_json(&object(json!({"initialRows": 40, "copyOnSelect": true})));
        globals.layer_json(&object(json!({"initialRows": 50})));

        assert_eq!(globals.initial_rows(), 50);
        assert!(globals.copy_on_select());
    }

    #[test]
    fn test_initial_position_parsing() {
        let mut globals = GlobalAppSettings::new();
        let warnings = globals.layer_json(&object(json!({"initialPosition": "10,"})));
        assert!(warnings.is_empty());
        assert_eq!(
            globals.initial_position(),
            LaunchPosition {
                x: Some(10),
                y: None
            }
        );
    }

    #[test]
    fn test_default_profile_string_then_guid() {
        let mut globals = GlobalAppSettings::new();
        globals.layer_json(&object(json!({"defaultProfile": "cmd"})));
        assert_eq!(globals.unparsed_default_profile(), Some("cmd"));

        let guid = crate::identity::generate_profile_guid("cmd", None);
        globals.set_default_profile(guid);
        assert_eq!(globals.default_profile(), Some(guid));
        assert!(globals.unparsed_default_profile().is_none());
    }

    #[test]
    fn test_schemes_layer_by_name() {
        let mut globals = GlobalAppSettings::new();
        globals.layer_json(&object(json!({
            "schemes": [{"name": "Mine", "red": "#FF0000", "green": "#00FF00"}]
        })));
        let warnings = globals.layer_json(&object(json!({
            "schemes": [{"name": "Mine", "red": "#880000"}, {"red": "#000000"}]
        })));

        assert_eq!(warnings, vec![SettingsLoadWarning::MissingSchemeName { index: 1 }]);
        let scheme = &globals.color_schemes()["Mine"];
        assert_eq!(scheme.table[1].to_string(), "#880000");
        assert_eq!(scheme.table[2].to_string(), "#00FF00");
    }

    #[test]
    fn test_add_color_scheme_replaces_wholesale() {
        let mut globals = GlobalAppSettings::new();
        let mut first = ColorScheme::new("X");
        first.background = crate::Color::new(1, 2, 3);
        globals.add_color_scheme(first);
        globals.add_color_scheme(ColorScheme::new("X"));

        assert_eq!(globals.color_schemes().len(), 1);
        assert_eq!(
            globals.color_schemes()["X"].background,
            ColorScheme::campbell().background
        );
    }

    #[test]
    fn test_keybindings_and_commands() {
        let mut globals = GlobalAppSettings::new();
        let warnings = globals.layer_json(&object(json!({
            "keybindings": [
                {"command": "copy", "keys": "ctrl+c"},
                {"command": "warpDrive", "keys": "ctrl+w"},
            ],
            "bindings": [
                {"name": "Palette", "command": "commandPalette", "keys": "ctrl+shift+p"},
            ]
        })));

        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            SettingsLoadWarning::Keybinding(KeybindingWarning::UnknownAction { action }) if action == "warpDrive"
        ));
        assert_eq!(globals.keybindings_warnings().len(), 1);

        assert_eq!(globals.keybindings().len(), 2);
        assert_eq!(
            globals
                .keybindings()
                .lookup(&parse_key_chord("ctrl+shift+p").unwrap())
                .map(|a| a.action),
            Some(ShortcutAction::CommandPalette)
        );
        assert!(globals.commands().contains_key("Palette"));
        assert!(globals.commands().contains_key("Copy text"));
    }

    #[test]
    fn test_to_json_includes_set_scalars_only() {
        let mut globals = GlobalAppSettings::new();
        globals.layer_json(&object(json!({"alwaysOnTop": true, "defaultProfile": "cmd"})));
        let json = globals.to_json();

        assert_eq!(json["alwaysOnTop"], json!(true));
        assert_eq!(json["defaultProfile"], json!("cmd"));
        assert!(json.get("initialRows").is_none());
        assert_eq!(json["schemes"], json!([]));
    }
}

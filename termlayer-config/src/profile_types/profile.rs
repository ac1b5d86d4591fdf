//! Profile records: the mutable draft built while layering and the
//! finalized, read-only profile handed out afterwards.

use std::ops::{Deref, DerefMut};

use serde_json::{Map, Value};
use uuid::Uuid;

use super::dynamic::LayerOrigin;
use crate::color::Color;
use crate::defaults;
use crate::identity::{generate_profile_guid, normalize_source, parse_guid};
use crate::json;
use crate::types::{
    BackgroundImageAlignment, BackgroundImageStretchMode, CloseOnExitMode, CursorShape,
    FontWeight, ScrollbarState, TextAntialiasingMode,
};
use crate::warnings::SettingsLoadWarning;

/// Unique identifier for a profile
pub type ProfileId = Uuid;

layered_settings! {
    /// Every optional appearance/behaviour setting of a profile.
    ///
    /// Each field is either unset (the getter returns the compiled default,
    /// or `None` for settings without one) or explicitly set by some layer.
    pub struct ProfileSettings {
        /// Hide the profile from the new-tab menu
        hidden, has_hidden, set_hidden, clear_hidden: bool = "hidden" => defaults::hidden();

        // ====================================================================
        // Colors
        // ====================================================================
        foreground, has_foreground, set_foreground, clear_foreground: Color = "foreground";
        background, has_background, set_background, clear_background: Color = "background";
        selection_background, has_selection_background, set_selection_background,
            clear_selection_background: Color = "selectionBackground";
        cursor_color, has_cursor_color, set_cursor_color, clear_cursor_color: Color = "cursorColor";
        /// Name of the color scheme in the global `schemes` list
        color_scheme, has_color_scheme, set_color_scheme, clear_color_scheme: String =
            "colorScheme" => defaults::color_scheme();

        // ====================================================================
        // Terminal behaviour
        // ====================================================================
        /// Scrollback lines
        history_size, has_history_size, set_history_size, clear_history_size: i32 =
            "historySize" => defaults::history_size();
        snap_on_input, has_snap_on_input, set_snap_on_input, clear_snap_on_input: bool =
            "snapOnInput" => defaults::snap_on_input();
        alt_gr_aliasing, has_alt_gr_aliasing, set_alt_gr_aliasing, clear_alt_gr_aliasing: bool =
            "altGrAliasing" => defaults::alt_gr_aliasing();
        cursor_height, has_cursor_height, set_cursor_height, clear_cursor_height: u32 =
            "cursorHeight" => defaults::cursor_height();
        cursor_shape, has_cursor_shape, set_cursor_shape, clear_cursor_shape: CursorShape =
            "cursorShape" => defaults::cursor_shape();
        tab_title, has_tab_title, set_tab_title, clear_tab_title: String = "tabTitle";
        suppress_application_title, has_suppress_application_title,
            set_suppress_application_title, clear_suppress_application_title: bool =
            "suppressApplicationTitle" => defaults::suppress_application_title();
        /// Connection type of the session (e.g. a remote connection provider)
        connection_type, has_connection_type, set_connection_type, clear_connection_type: Uuid =
            "connectionType";
        commandline, has_commandline, set_commandline, clear_commandline: String =
            "commandline" => defaults::commandline();
        close_on_exit, has_close_on_exit, set_close_on_exit, clear_close_on_exit: CloseOnExitMode =
            "closeOnExit" => defaults::close_on_exit();
        starting_directory, has_starting_directory, set_starting_directory,
            clear_starting_directory: String = "startingDirectory";
        icon, has_icon, set_icon, clear_icon: String = "icon";

        // ====================================================================
        // Font
        // ====================================================================
        font_face, has_font_face, set_font_face, clear_font_face: String =
            "fontFace" => defaults::font_face();
        font_size, has_font_size, set_font_size, clear_font_size: i32 =
            "fontSize" => defaults::font_size();
        font_weight, has_font_weight, set_font_weight, clear_font_weight: FontWeight =
            "fontWeight" => defaults::font_weight();
        antialiasing_mode, has_antialiasing_mode, set_antialiasing_mode,
            clear_antialiasing_mode: TextAntialiasingMode =
            "antialiasingMode" => defaults::antialiasing_mode();

        // ====================================================================
        // Window surface
        // ====================================================================
        acrylic_opacity, has_acrylic_opacity, set_acrylic_opacity, clear_acrylic_opacity: f64 =
            "acrylicOpacity" => defaults::acrylic_opacity();
        use_acrylic, has_use_acrylic, set_use_acrylic, clear_use_acrylic: bool =
            "useAcrylic" => defaults::use_acrylic();
        /// Padding around the text, as written in settings (`"8, 8, 8, 8"`)
        padding, has_padding, set_padding, clear_padding: String =
            "padding" => defaults::padding();
        scrollbar_state, has_scrollbar_state, set_scrollbar_state, clear_scrollbar_state:
            ScrollbarState = "scrollbarState" => defaults::scrollbar_state();
        background_image, has_background_image, set_background_image, clear_background_image:
            String = "backgroundImage";
        background_image_opacity, has_background_image_opacity, set_background_image_opacity,
            clear_background_image_opacity: f64 =
            "backgroundImageOpacity" => defaults::background_image_opacity();
        background_image_stretch_mode, has_background_image_stretch_mode,
            set_background_image_stretch_mode, clear_background_image_stretch_mode:
            BackgroundImageStretchMode =
            "backgroundImageStretchMode" => defaults::background_image_stretch_mode();
        background_image_alignment, has_background_image_alignment,
            set_background_image_alignment, clear_background_image_alignment:
            BackgroundImageAlignment =
            "backgroundImageAlignment" => defaults::background_image_alignment();
        retro_terminal_effect, has_retro_terminal_effect, set_retro_terminal_effect,
            clear_retro_terminal_effect: bool =
            "experimental.retroTerminalEffect" => defaults::retro_terminal_effect();
    }
}

/// A profile while layers are still being applied.
///
/// The GUID may still be missing; it is assigned at the latest by
/// [`finalize`](Self::finalize) and never changes after that.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDraft {
    guid: Option<ProfileId>,
    name: String,
    source: Option<String>,
    settings: ProfileSettings,
    origins: Vec<LayerOrigin>,
}

impl ProfileDraft {
    /// Create a new draft with the given name and no GUID
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            guid: None,
            name: name.into(),
            source: None,
            settings: ProfileSettings::default(),
            origins: Vec::new(),
        }
    }

    /// Create a draft with a specific GUID
    pub fn with_guid(guid: ProfileId, name: impl Into<String>) -> Self {
        Self {
            guid: Some(guid),
            ..Self::new(name)
        }
    }

    /// Builder method to set the source namespace
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.set_source(Some(source.into()));
        self
    }

    /// Build a new draft from one JSON object. Fields the object doesn't
    /// mention stay unset.
    pub fn from_json(obj: &Map<String, Value>) -> (Self, Vec<SettingsLoadWarning>) {
        let mut draft = Self::new(defaults::profile_name());
        let warnings = draft.layer_json(obj);
        (draft, warnings)
    }

    pub fn guid(&self) -> Option<ProfileId> {
        self.guid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn source_namespace(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Set the source namespace. An empty string counts as no source.
    pub fn set_source(&mut self, source: Option<String>) {
        self.source = source.filter(|s| !s.is_empty());
    }

    pub fn is_dynamic(&self) -> bool {
        self.source.is_some()
    }

    /// Layer origins that contributed to this profile, in order.
    pub fn origins(&self) -> &[LayerOrigin] {
        &self.origins
    }

    pub(crate) fn record_origin(&mut self, origin: &LayerOrigin) {
        if !self.origins.contains(origin) {
            self.origins.push(origin.clone());
        }
    }

    /// Whether `obj` describes this same profile.
    ///
    /// A GUID in the object is authoritative once this draft has one. Name
    /// and source are only compared while the draft has no GUID yet; both
    /// sources absent counts as equal.
    pub fn should_be_layered(&self, obj: &Map<String, Value>) -> bool {
        if let Some(guid) = self.guid {
            let other = json::get_str(obj, "guid").and_then(parse_guid);
            return other == Some(guid);
        }

        let other_name = json::get_str(obj, "name");
        let other_source = normalize_source(json::get_str(obj, "source"));
        other_name == Some(self.name.as_str()) && other_source == self.source.as_deref()
    }

    /// Apply every field present in `obj`.
    ///
    /// A `guid` in the object is only adopted if this draft doesn't have one
    /// yet. Returns one warning per value that couldn't be used.
    pub fn layer_json(&mut self, obj: &Map<String, Value>) -> Vec<SettingsLoadWarning> {
        let mut warnings = Vec::new();

        match obj.get("name") {
            None | Some(Value::Null) => {}
            Some(Value::String(name)) => self.name = name.clone(),
            Some(other) => warnings.push(self.invalid_value("name", other)),
        }

        match obj.get("guid") {
            None | Some(Value::Null) => {}
            Some(Value::String(text)) => match parse_guid(text) {
                Some(guid) if self.guid.is_none() => self.guid = Some(guid),
                Some(guid) if self.guid != Some(guid) => {
                    log::debug!(
                        "Profile '{}' keeps its GUID, ignoring {}",
                        self.name,
                        guid.braced()
                    );
                }
                Some(_) => {}
                None => warnings.push(SettingsLoadWarning::InvalidValue {
                    owner: self.name.clone(),
                    key: "guid".to_string(),
                    reason: format!("'{}' is not a GUID", text),
                }),
            },
            Some(other) => warnings.push(self.invalid_value("guid", other)),
        }

        match obj.get("source") {
            None => {}
            Some(Value::Null) => self.source = None,
            Some(Value::String(source)) => self.set_source(Some(source.clone())),
            Some(other) => warnings.push(self.invalid_value("source", other)),
        }

        self.settings.layer_json(&self.name, obj, &mut warnings);
        warnings
    }

    fn invalid_value(&self, key: &str, value: &Value) -> SettingsLoadWarning {
        SettingsLoadWarning::InvalidValue {
            owner: self.name.clone(),
            key: key.to_string(),
            reason: format!("expected a string, found {}", json::type_name(value)),
        }
    }

    /// Assign the synthesized GUID if no layer supplied one. Idempotent.
    pub fn generate_guid_if_necessary(&mut self) -> ProfileId {
        *self
            .guid
            .get_or_insert_with(|| generate_profile_guid(&self.name, self.source.as_deref()))
    }

    /// The GUID this draft has, or will have once finalized.
    pub fn guid_or_generate(&self) -> ProfileId {
        self.guid
            .unwrap_or_else(|| generate_profile_guid(&self.name, self.source.as_deref()))
    }

    /// Minimal JSON anchor that a later layer can use to target this profile.
    pub fn generate_stub(&self) -> Value {
        stub(
            self.guid_or_generate(),
            &self.name,
            self.source.as_deref(),
            self.settings.hidden(),
        )
    }

    /// Freeze the draft, synthesizing its GUID if necessary.
    pub fn finalize(mut self) -> Profile {
        let guid = self.generate_guid_if_necessary();
        Profile {
            guid,
            name: self.name,
            source: self.source,
            settings: self.settings,
            origins: self.origins,
        }
    }
}

impl Deref for ProfileDraft {
    type Target = ProfileSettings;

    fn deref(&self) -> &ProfileSettings {
        &self.settings
    }
}

impl DerefMut for ProfileDraft {
    fn deref_mut(&mut self) -> &mut ProfileSettings {
        &mut self.settings
    }
}

/// A finalized profile. Its GUID is always present and nothing about it can
/// change any more.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    guid: ProfileId,
    name: String,
    source: Option<String>,
    settings: ProfileSettings,
    origins: Vec<LayerOrigin>,
}

impl Profile {
    pub fn guid(&self) -> ProfileId {
        self.guid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_namespace(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_dynamic(&self) -> bool {
        self.source.is_some()
    }

    /// Layer origins that contributed to this profile, in order.
    pub fn origins(&self) -> &[LayerOrigin] {
        &self.origins
    }

    /// Whether any non-generator layer touched this profile.
    pub fn has_user_origin(&self) -> bool {
        self.origins.iter().any(|origin| !origin.is_dynamic())
    }

    pub fn generate_stub(&self) -> Value {
        stub(
            self.guid,
            &self.name,
            self.source.as_deref(),
            self.settings.hidden(),
        )
    }

    /// Serialize identity plus every explicitly set field. Feeding the
    /// result back in as a layer reproduces this profile.
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        out.insert("guid".into(), Value::String(self.guid.braced().to_string()));
        out.insert("name".into(), Value::String(self.name.clone()));
        if let Some(source) = &self.source {
            out.insert("source".into(), Value::String(source.clone()));
        }
        self.settings.write_json(&mut out);
        Value::Object(out)
    }

    /// Engine-only escape hatch for post-finalize fixups (dangling scheme
    /// references).
    pub(crate) fn settings_mut(&mut self) -> &mut ProfileSettings {
        &mut self.settings
    }
}

impl Deref for Profile {
    type Target = ProfileSettings;

    fn deref(&self) -> &ProfileSettings {
        &self.settings
    }
}

fn stub(guid: ProfileId, name: &str, source: Option<&str>, hidden: bool) -> Value {
    let mut out = Map::new();
    out.insert("guid".into(), Value::String(guid.braced().to_string()));
    out.insert("name".into(), Value::String(name.to_string()));
    if let Some(source) = source {
        out.insert("source".into(), Value::String(source.to_string()));
    }
    out.insert("hidden".into(), Value::Bool(hidden));
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    const GUID: &str = "{6239a42c-1111-49a3-80bd-e8fdd045185c}";

    #[test]
    fn test_from_json_leaves_unmentioned_fields_unset() {
        let (draft, warnings) = ProfileDraft::from_json(&object(json!({
            "name": "cmd",
            "fontSize": 14
        })));

        assert!(warnings.is_empty());
        assert_eq!(draft.name(), "cmd");
        assert!(draft.has_font_size());
        assert_eq!(draft.font_size(), 14);
        assert!(!draft.has_font_face());
        assert_eq!(draft.font_face(), "Cascadia Mono");
        assert!(draft.guid().is_none());
    }

    #[test]
    fn test_optional_fields_without_default() {
        let (draft, _) = ProfileDraft::from_json(&object(json!({"name": "cmd"})));
        assert_eq!(draft.foreground(), None);
        assert_eq!(draft.tab_title(), None);

        let (draft, _) = ProfileDraft::from_json(&object(json!({
            "name": "cmd",
            "foreground": "#00FF00"
        })));
        assert_eq!(draft.foreground(), Some(Color::new(0, 255, 0)));
    }

    #[test]
    fn test_layer_json_only_overwrites_present_fields() {
        let (mut draft, _) = ProfileDraft::from_json(&object(json!({
            "name": "cmd",
            "fontSize": 14,
            "fontFace": "Consolas"
        })));

        let warnings = draft.layer_json(&object(json!({"fontSize": 16})));
        assert!(warnings.is_empty());
        assert_eq!(draft.font_size(), 16);
        assert_eq!(draft.font_face(), "Consolas");
    }

    #[test]
    fn test_null_resets_to_default() {
        let (mut draft, _) = ProfileDraft::from_json(&object(json!({
            "name": "cmd",
            "historySize": 100
        })));
        draft.layer_json(&object(json!({"historySize": null})));
        assert!(!draft.has_history_size());
        assert_eq!(draft.history_size(), 9001);
    }

    #[test]
    fn test_wrong_type_keeps_earlier_value() {
        let (mut draft, _) = ProfileDraft::from_json(&object(json!({
            "name": "cmd",
            "useAcrylic": true
        })));
        let warnings = draft.layer_json(&object(json!({"useAcrylic": "yes"})));
        assert_eq!(warnings.len(), 1);
        assert!(draft.use_acrylic());
    }

    #[test]
    fn test_guid_adopted_once() {
        let mut draft = ProfileDraft::new("cmd");
        draft.layer_json(&object(json!({"guid": GUID})));
        assert_eq!(draft.guid(), parse_guid(GUID));

        draft.layer_json(&object(json!({"guid": "{00000000-0000-0000-0000-000000000001}"})));
        assert_eq!(draft.guid(), parse_guid(GUID));
    }

    #[test]
    fn test_invalid_guid_warns() {
        let mut draft = ProfileDraft::new("cmd");
        let warnings = draft.layer_json(&object(json!({"guid": "nope"})));
        assert_eq!(warnings.len(), 1);
        assert!(draft.guid().is_none());
    }

    #[test]
    fn test_should_be_layered_by_guid() {
        let draft = ProfileDraft::with_guid(parse_guid(GUID).unwrap(), "cmd");
        assert!(draft.should_be_layered(&object(json!({"guid": GUID, "name": "other"}))));
        assert!(!draft.should_be_layered(&object(json!({"name": "cmd"}))));
        assert!(!draft.should_be_layered(&object(json!({
            "guid": "{00000000-0000-0000-0000-000000000001}",
            "name": "cmd"
        }))));
    }

    #[test]
    fn test_should_be_layered_by_name_and_source() {
        let plain = ProfileDraft::new("Ubuntu");
        assert!(plain.should_be_layered(&object(json!({"name": "Ubuntu"}))));
        assert!(plain.should_be_layered(&object(json!({"name": "Ubuntu", "source": ""}))));
        assert!(!plain.should_be_layered(&object(json!({"name": "Ubuntu", "source": "wsl"}))));
        assert!(!plain.should_be_layered(&object(json!({"name": "Debian"}))));

        let dynamic = ProfileDraft::new("Ubuntu").source("wsl");
        assert!(dynamic.should_be_layered(&object(json!({"name": "Ubuntu", "source": "wsl"}))));
        assert!(!dynamic.should_be_layered(&object(json!({"name": "Ubuntu"}))));
    }

    #[test]
    fn test_generate_guid_is_idempotent() {
        let mut draft = ProfileDraft::new("cmd");
        let first = draft.generate_guid_if_necessary();
        let second = draft.generate_guid_if_necessary();
        assert_eq!(first, second);
        assert_eq!(first, generate_profile_guid("cmd", None));
    }

    #[test]
    fn test_finalize_keeps_explicit_guid() {
        let guid = parse_guid(GUID).unwrap();
        let profile = ProfileDraft::with_guid(guid, "cmd").finalize();
        assert_eq!(profile.guid(), guid);
    }

    #[test]
    fn test_stub_contents() {
        let mut draft = ProfileDraft::new("Ubuntu").source("wsl");
        draft.set_hidden(true);
        let stub = draft.generate_stub();

        assert_eq!(stub["name"], json!("Ubuntu"));
        assert_eq!(stub["source"], json!("wsl"));
        assert_eq!(stub["hidden"], json!(true));
        let guid = parse_guid(stub["guid"].as_str().unwrap()).unwrap();
        assert_eq!(guid, generate_profile_guid("Ubuntu", Some("wsl")));
        assert!(stub["guid"].as_str().unwrap().starts_with('{'));
    }

    #[test]
    fn test_to_json_round_trips_set_fields() {
        let (draft, _) = ProfileDraft::from_json(&object(json!({
            "name": "cmd",
            "fontSize": 14,
            "closeOnExit": false,
            "experimental.retroTerminalEffect": true
        })));
        let profile = draft.finalize();
        let json = profile.to_json();

        assert_eq!(json["fontSize"], json!(14));
        assert_eq!(json["closeOnExit"], json!("never"));
        assert_eq!(json["experimental.retroTerminalEffect"], json!(true));
        assert!(json.get("fontFace").is_none());

        let (reparsed, warnings) = ProfileDraft::from_json(json.as_object().unwrap());
        assert!(warnings.is_empty());
        assert_eq!(reparsed.finalize(), profile);
    }
}

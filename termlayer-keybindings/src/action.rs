//! Shortcut actions and their arguments.
//!
//! An action appears in JSON either as a bare name (`"copy"`) or as an object
//! carrying the name under `action` plus its arguments
//! (`{"action": "switchToTab", "index": 2}`). `null` and `"unbound"` mean
//! "remove whatever is bound here".

use crate::warning::KeybindingWarning;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Every action a key chord or command can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShortcutAction {
    Copy,
    Paste,
    OpenNewTabDropdown,
    DuplicateTab,
    NewTab,
    NewWindow,
    CloseWindow,
    CloseTab,
    ClosePane,
    NextTab,
    PrevTab,
    SplitPane,
    TogglePaneZoom,
    SwitchToTab,
    AdjustFontSize,
    ResetFontSize,
    ScrollUp,
    ScrollDown,
    ScrollUpPage,
    ScrollDownPage,
    ResizePane,
    MoveFocus,
    OpenSettings,
    ToggleFullscreen,
    ToggleAlwaysOnTop,
    ToggleFocusMode,
    SetTabColor,
    OpenTabColorPicker,
    RenameTab,
    CommandPalette,
    Find,
    ExecuteCommandline,
    ToggleRetroEffect,
}

impl ShortcutAction {
    /// All actions, in declaration order.
    pub const ALL: &'static [ShortcutAction] = &[
        ShortcutAction::Copy,
        ShortcutAction::Paste,
        ShortcutAction::OpenNewTabDropdown,
        ShortcutAction::DuplicateTab,
        ShortcutAction::NewTab,
        ShortcutAction::NewWindow,
        ShortcutAction::CloseWindow,
        ShortcutAction::CloseTab,
        ShortcutAction::ClosePane,
        ShortcutAction::NextTab,
        ShortcutAction::PrevTab,
        ShortcutAction::SplitPane,
        ShortcutAction::TogglePaneZoom,
        ShortcutAction::SwitchToTab,
        ShortcutAction::AdjustFontSize,
        ShortcutAction::ResetFontSize,
        ShortcutAction::ScrollUp,
        ShortcutAction::ScrollDown,
        ShortcutAction::ScrollUpPage,
        ShortcutAction::ScrollDownPage,
        ShortcutAction::ResizePane,
        ShortcutAction::MoveFocus,
        ShortcutAction::OpenSettings,
        ShortcutAction::ToggleFullscreen,
        ShortcutAction::ToggleAlwaysOnTop,
        ShortcutAction::ToggleFocusMode,
        ShortcutAction::SetTabColor,
        ShortcutAction::OpenTabColorPicker,
        ShortcutAction::RenameTab,
        ShortcutAction::CommandPalette,
        ShortcutAction::Find,
        ShortcutAction::ExecuteCommandline,
        ShortcutAction::ToggleRetroEffect,
    ];

    /// The name used for this action in settings files.
    pub fn json_name(&self) -> &'static str {
        match self {
            ShortcutAction::Copy => "copy",
            ShortcutAction::Paste => "paste",
            ShortcutAction::OpenNewTabDropdown => "openNewTabDropdown",
            ShortcutAction::DuplicateTab => "duplicateTab",
            ShortcutAction::NewTab => "newTab",
            ShortcutAction::NewWindow => "newWindow",
            ShortcutAction::CloseWindow => "closeWindow",
            ShortcutAction::CloseTab => "closeTab",
            ShortcutAction::ClosePane => "closePane",
            ShortcutAction::NextTab => "nextTab",
            ShortcutAction::PrevTab => "prevTab",
            ShortcutAction::SplitPane => "splitPane",
            ShortcutAction::TogglePaneZoom => "togglePaneZoom",
            ShortcutAction::SwitchToTab => "switchToTab",
            ShortcutAction::AdjustFontSize => "adjustFontSize",
            ShortcutAction::ResetFontSize => "resetFontSize",
            ShortcutAction::ScrollUp => "scrollUp",
            ShortcutAction::ScrollDown => "scrollDown",
            ShortcutAction::ScrollUpPage => "scrollUpPage",
            ShortcutAction::ScrollDownPage => "scrollDownPage",
            ShortcutAction::ResizePane => "resizePane",
            ShortcutAction::MoveFocus => "moveFocus",
            ShortcutAction::OpenSettings => "openSettings",
            ShortcutAction::ToggleFullscreen => "toggleFullscreen",
            ShortcutAction::ToggleAlwaysOnTop => "toggleAlwaysOnTop",
            ShortcutAction::ToggleFocusMode => "toggleFocusMode",
            ShortcutAction::SetTabColor => "setTabColor",
            ShortcutAction::OpenTabColorPicker => "openTabColorPicker",
            ShortcutAction::RenameTab => "renameTab",
            ShortcutAction::CommandPalette => "commandPalette",
            ShortcutAction::Find => "find",
            ShortcutAction::ExecuteCommandline => "executeCommandline",
            ShortcutAction::ToggleRetroEffect => "toggleRetroEffect",
        }
    }

    /// Look an action up by its settings-file name. Names are case-sensitive.
    pub fn from_json_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.json_name() == name)
    }

    /// Human-readable label, used when a command has no explicit name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutAction::Copy => "Copy text",
            ShortcutAction::Paste => "Paste",
            ShortcutAction::OpenNewTabDropdown => "Open new tab dropdown",
            ShortcutAction::DuplicateTab => "Duplicate tab",
            ShortcutAction::NewTab => "New tab",
            ShortcutAction::NewWindow => "New window",
            ShortcutAction::CloseWindow => "Close window",
            ShortcutAction::CloseTab => "Close tab",
            ShortcutAction::ClosePane => "Close pane",
            ShortcutAction::NextTab => "Next tab",
            ShortcutAction::PrevTab => "Previous tab",
            ShortcutAction::SplitPane => "Split pane",
            ShortcutAction::TogglePaneZoom => "Toggle pane zoom",
            ShortcutAction::SwitchToTab => "Switch to tab",
            ShortcutAction::AdjustFontSize => "Adjust font size",
            ShortcutAction::ResetFontSize => "Reset font size",
            ShortcutAction::ScrollUp => "Scroll up",
            ShortcutAction::ScrollDown => "Scroll down",
            ShortcutAction::ScrollUpPage => "Scroll up one page",
            ShortcutAction::ScrollDownPage => "Scroll down one page",
            ShortcutAction::ResizePane => "Resize pane",
            ShortcutAction::MoveFocus => "Move focus",
            ShortcutAction::OpenSettings => "Open settings",
            ShortcutAction::ToggleFullscreen => "Toggle fullscreen",
            ShortcutAction::ToggleAlwaysOnTop => "Toggle always on top mode",
            ShortcutAction::ToggleFocusMode => "Toggle focus mode",
            ShortcutAction::SetTabColor => "Set tab color",
            ShortcutAction::OpenTabColorPicker => "Open tab color picker",
            ShortcutAction::RenameTab => "Rename tab",
            ShortcutAction::CommandPalette => "Toggle command palette",
            ShortcutAction::Find => "Find",
            ShortcutAction::ExecuteCommandline => "Run commandline",
            ShortcutAction::ToggleRetroEffect => "Toggle retro terminal effect",
        }
    }

    /// The argument that must be present for this action to be usable.
    pub fn required_parameter(&self) -> Option<&'static str> {
        match self {
            ShortcutAction::SwitchToTab => Some("index"),
            ShortcutAction::MoveFocus | ShortcutAction::ResizePane => Some("direction"),
            ShortcutAction::ExecuteCommandline => Some("commandline"),
            _ => None,
        }
    }
}

impl fmt::Display for ShortcutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_name())
    }
}

/// Direction argument for focus movement and pane resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn display_name(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Orientation of a new split pane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SplitStyle {
    #[default]
    Auto,
    Vertical,
    Horizontal,
}

/// What to launch for `newTab` / `splitPane`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTerminalArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commandline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

impl NewTerminalArgs {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn describe(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(index) = self.index {
            parts.push(format!("index: {}", index));
        }
        if let Some(profile) = &self.profile {
            parts.push(format!("profile: {}", profile));
        }
        if let Some(commandline) = &self.commandline {
            parts.push(format!("commandline: {}", commandline));
        }
        if let Some(dir) = &self.starting_directory {
            parts.push(format!("directory: {}", dir));
        }
        if let Some(title) = &self.tab_title {
            parts.push(format!("title: {}", title));
        }
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CopyArgs {
    #[serde(default)]
    single_line: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
struct IndexArgs {
    index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
struct DirectionArgs {
    direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
struct DeltaArgs {
    #[serde(default)]
    delta: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
struct ColorArgs {
    #[serde(default)]
    color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
struct CommandlineArgs {
    commandline: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
struct SplitArgs {
    #[serde(default)]
    split: SplitStyle,
    #[serde(flatten)]
    terminal: NewTerminalArgs,
}

/// Arguments attached to an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionArgs {
    Copy { single_line: bool },
    NewTerminal(NewTerminalArgs),
    SplitPane { split: SplitStyle, terminal: NewTerminalArgs },
    SwitchToTab { index: u32 },
    Direction(Direction),
    AdjustFontSize { delta: i32 },
    SetTabColor { color: Option<String> },
    ExecuteCommandline { commandline: String },
}

impl ActionArgs {
    fn to_json(&self, out: &mut Map<String, Value>) {
        match self {
            ActionArgs::Copy { single_line } => {
                out.insert("singleLine".into(), Value::Bool(*single_line));
            }
            ActionArgs::NewTerminal(terminal) => merge_serialized(out, terminal),
            ActionArgs::SplitPane { split, terminal } => {
                if let Ok(value) = serde_json::to_value(split) {
                    out.insert("split".into(), value);
                }
                merge_serialized(out, terminal);
            }
            ActionArgs::SwitchToTab { index } => {
                out.insert("index".into(), Value::from(*index));
            }
            ActionArgs::Direction(direction) => {
                out.insert("direction".into(), Value::from(direction.display_name()));
            }
            ActionArgs::AdjustFontSize { delta } => {
                out.insert("delta".into(), Value::from(*delta));
            }
            ActionArgs::SetTabColor { color } => {
                out.insert(
                    "color".into(),
                    color.clone().map(Value::String).unwrap_or(Value::Null),
                );
            }
            ActionArgs::ExecuteCommandline { commandline } => {
                out.insert("commandline".into(), Value::from(commandline.as_str()));
            }
        }
    }
}

fn merge_serialized(out: &mut Map<String, Value>, terminal: &NewTerminalArgs) {
    if let Ok(Value::Object(fields)) = serde_json::to_value(terminal) {
        out.extend(fields);
    }
}

/// An action together with its (optional) arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionAndArgs {
    pub action: ShortcutAction,
    pub args: Option<ActionArgs>,
}

impl ActionAndArgs {
    pub fn new(action: ShortcutAction) -> Self {
        Self { action, args: None }
    }

    pub fn with_args(action: ShortcutAction, args: ActionArgs) -> Self {
        Self {
            action,
            args: Some(args),
        }
    }

    /// Build a name for a command that didn't specify one.
    pub fn generate_name(&self) -> String {
        let base = self.action.display_name();
        let Some(args) = &self.args else {
            return base.to_string();
        };

        match args {
            ActionArgs::Copy { single_line: true } => format!("{}, single line", base),
            ActionArgs::Copy { single_line: false } => base.to_string(),
            ActionArgs::NewTerminal(terminal) => match terminal.describe() {
                Some(detail) => format!("{}, {}", base, detail),
                None => base.to_string(),
            },
            ActionArgs::SplitPane { split, terminal } => {
                let mut name = match split {
                    SplitStyle::Auto => base.to_string(),
                    SplitStyle::Vertical => format!("{}, split: vertical", base),
                    SplitStyle::Horizontal => format!("{}, split: horizontal", base),
                };
                if let Some(detail) = terminal.describe() {
                    name = format!("{}, {}", name, detail);
                }
                name
            }
            ActionArgs::SwitchToTab { index } => format!("{}, index:{}", base, index),
            ActionArgs::Direction(direction) => format!("{} {}", base, direction.display_name()),
            ActionArgs::AdjustFontSize { delta } if *delta >= 0 => {
                format!("Increase font size, amount: {}", delta)
            }
            ActionArgs::AdjustFontSize { delta } => {
                format!("Decrease font size, amount: {}", delta.unsigned_abs())
            }
            ActionArgs::SetTabColor { color: Some(color) } => {
                format!("Set the tab color to {}", color)
            }
            ActionArgs::SetTabColor { color: None } => "Reset tab color".to_string(),
            ActionArgs::ExecuteCommandline { commandline } => {
                format!("{} \"{}\"", base, commandline)
            }
        }
    }

    /// Serialize back to the settings-file form.
    pub fn to_json(&self) -> Value {
        match &self.args {
            None => Value::from(self.action.json_name()),
            Some(args) => {
                let mut out = Map::new();
                out.insert("action".into(), Value::from(self.action.json_name()));
                args.to_json(&mut out);
                Value::Object(out)
            }
        }
    }
}

impl fmt::Display for ActionAndArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.generate_name())
    }
}

/// Parse an action value.
///
/// Returns `Ok(None)` when the value explicitly unbinds (`null` or
/// `"unbound"`).
pub fn parse_action(value: &Value) -> Result<Option<ActionAndArgs>, KeybindingWarning> {
    match value {
        Value::Null => Ok(None),
        Value::String(name) if name == "unbound" => Ok(None),
        Value::String(name) => {
            let action = lookup_action(name)?;
            if let Some(parameter) = action.required_parameter() {
                return Err(KeybindingWarning::MissingRequiredParameter {
                    action: name.clone(),
                    parameter: parameter.to_string(),
                });
            }
            Ok(Some(ActionAndArgs::new(action)))
        }
        Value::Object(obj) => match obj.get("action") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(name)) if name == "unbound" => Ok(None),
            Some(Value::String(name)) => {
                let action = lookup_action(name)?;
                parse_args(action, obj).map(Some)
            }
            Some(other) => Err(KeybindingWarning::UnknownAction {
                action: other.to_string(),
            }),
        },
        other => Err(KeybindingWarning::UnknownAction {
            action: other.to_string(),
        }),
    }
}

fn lookup_action(name: &str) -> Result<ShortcutAction, KeybindingWarning> {
    ShortcutAction::from_json_name(name).ok_or_else(|| KeybindingWarning::UnknownAction {
        action: name.to_string(),
    })
}

fn parse_args(
    action: ShortcutAction,
    obj: &Map<String, Value>,
) -> Result<ActionAndArgs, KeybindingWarning> {
    if let Some(parameter) = action.required_parameter()
        && obj.get(parameter).is_none_or(Value::is_null)
    {
        return Err(KeybindingWarning::MissingRequiredParameter {
            action: action.json_name().to_string(),
            parameter: parameter.to_string(),
        });
    }

    let value = Value::Object(obj.clone());
    let invalid = |e: serde_json::Error| KeybindingWarning::InvalidParameter {
        action: action.json_name().to_string(),
        reason: e.to_string(),
    };

    let args = match action {
        ShortcutAction::Copy => {
            let args: CopyArgs = serde_json::from_value(value).map_err(invalid)?;
            Some(ActionArgs::Copy {
                single_line: args.single_line,
            })
        }
        ShortcutAction::NewTab => {
            let terminal: NewTerminalArgs = serde_json::from_value(value).map_err(invalid)?;
            (!terminal.is_empty()).then_some(ActionArgs::NewTerminal(terminal))
        }
        ShortcutAction::SplitPane => {
            let args: SplitArgs = serde_json::from_value(value).map_err(invalid)?;
            Some(ActionArgs::SplitPane {
                split: args.split,
                terminal: args.terminal,
            })
        }
        ShortcutAction::SwitchToTab => {
            let args: IndexArgs = serde_json::from_value(value).map_err(invalid)?;
            Some(ActionArgs::SwitchToTab { index: args.index })
        }
        ShortcutAction::MoveFocus | ShortcutAction::ResizePane => {
            let args: DirectionArgs = serde_json::from_value(value).map_err(invalid)?;
            Some(ActionArgs::Direction(args.direction))
        }
        ShortcutAction::AdjustFontSize => {
            let args: DeltaArgs = serde_json::from_value(value).map_err(invalid)?;
            Some(ActionArgs::AdjustFontSize { delta: args.delta })
        }
        ShortcutAction::SetTabColor => {
            let args: ColorArgs = serde_json::from_value(value).map_err(invalid)?;
            Some(ActionArgs::SetTabColor { color: args.color })
        }
        ShortcutAction::ExecuteCommandline => {
            let args: CommandlineArgs = serde_json::from_value(value).map_err(invalid)?;
            Some(ActionArgs::ExecuteCommandline {
                commandline: args.commandline,
            })
        }
        _ => None,
    };

    Ok(ActionAndArgs { action, args })
}

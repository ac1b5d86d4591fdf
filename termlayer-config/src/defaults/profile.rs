//! Default values for profile settings.

use crate::types::{
    BackgroundImageAlignment, BackgroundImageStretchMode, CloseOnExitMode, CursorShape,
    FontWeight, ScrollbarState, TextAntialiasingMode,
};

/// Name given to profiles built programmatically without one.
pub fn profile_name() -> String {
    "Default".to_string()
}

pub fn hidden() -> bool {
    false
}

pub fn color_scheme() -> String {
    "Campbell".to_string()
}

pub fn history_size() -> i32 {
    9001
}

pub fn snap_on_input() -> bool {
    true
}

pub fn alt_gr_aliasing() -> bool {
    true
}

pub fn cursor_height() -> u32 {
    25 // Percent of the cell, only used by the vintage cursor
}

pub fn cursor_shape() -> CursorShape {
    CursorShape::Bar
}

pub fn suppress_application_title() -> bool {
    false
}

#[cfg(windows)]
pub fn commandline() -> String {
    "cmd.exe".to_string()
}

#[cfg(not(windows))]
pub fn commandline() -> String {
    "/bin/sh".to_string()
}

pub fn font_face() -> String {
    "Cascadia Mono".to_string()
}

pub fn font_size() -> i32 {
    12
}

pub fn font_weight() -> FontWeight {
    FontWeight::NORMAL
}

pub fn acrylic_opacity() -> f64 {
    0.5
}

pub fn use_acrylic() -> bool {
    false
}

pub fn close_on_exit() -> CloseOnExitMode {
    CloseOnExitMode::Graceful
}

pub fn padding() -> String {
    "8, 8, 8, 8".to_string()
}

pub fn scrollbar_state() -> ScrollbarState {
    ScrollbarState::Visible
}

pub fn background_image_opacity() -> f64 {
    1.0
}

pub fn background_image_stretch_mode() -> BackgroundImageStretchMode {
    BackgroundImageStretchMode::UniformToFill
}

pub fn background_image_alignment() -> BackgroundImageAlignment {
    BackgroundImageAlignment::Center
}

pub fn retro_terminal_effect() -> bool {
    false
}

pub fn antialiasing_mode() -> TextAntialiasingMode {
    TextAntialiasingMode::Grayscale
}

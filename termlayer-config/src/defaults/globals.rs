//! Default values for global (process-wide) settings.

use crate::types::{ElementTheme, LaunchMode, LaunchPosition, TabWidthMode};

pub fn initial_rows() -> i32 {
    30
}

pub fn initial_cols() -> i32 {
    120
}

pub fn initial_position() -> LaunchPosition {
    LaunchPosition::default() // Let the window manager decide
}

pub fn always_show_tabs() -> bool {
    true
}

pub fn show_terminal_title_in_titlebar() -> bool {
    true
}

pub fn confirm_close_all_tabs() -> bool {
    true
}

pub fn theme() -> ElementTheme {
    ElementTheme::System
}

pub fn tab_width_mode() -> TabWidthMode {
    TabWidthMode::Equal
}

pub fn show_tabs_in_titlebar() -> bool {
    true
}

pub fn word_delimiters() -> String {
    " /\\()\"'-.,:;<>~!@#$%^&*|+=[]{}~?\u{2502}".to_string()
}

pub fn copy_on_select() -> bool {
    false
}

pub fn copy_formatting() -> bool {
    false
}

pub fn large_paste_warning() -> bool {
    true
}

pub fn multi_line_paste_warning() -> bool {
    true
}

pub fn launch_mode() -> LaunchMode {
    LaunchMode::Default
}

pub fn snap_to_grid_on_resize() -> bool {
    true
}

pub fn debug_features() -> bool {
    cfg!(debug_assertions)
}

pub fn force_full_repaint() -> bool {
    false
}

pub fn software_rendering() -> bool {
    false
}

pub fn force_vt_input() -> bool {
    false
}

pub fn start_on_user_login() -> bool {
    false
}

pub fn always_on_top() -> bool {
    false
}

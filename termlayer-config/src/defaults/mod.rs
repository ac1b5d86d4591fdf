//! Compiled-in default values.
//!
//! Accessors on the settings records fall back to these free functions when
//! no layer set the field. Everything is re-exported from this module so
//! call-sites can use `crate::defaults::*`.

mod globals;
mod profile;

// ── Profile appearance & behaviour ─────────────────────────────────────────
pub use profile::{
    acrylic_opacity, alt_gr_aliasing, antialiasing_mode, background_image_alignment,
    background_image_opacity, background_image_stretch_mode, close_on_exit, color_scheme,
    commandline, cursor_height, cursor_shape, font_face, font_size, font_weight, hidden,
    history_size, padding, profile_name, retro_terminal_effect, scrollbar_state, snap_on_input,
    suppress_application_title, use_acrylic,
};

// ── Global settings ────────────────────────────────────────────────────────
pub use globals::{
    always_on_top, always_show_tabs, confirm_close_all_tabs, copy_formatting, copy_on_select,
    debug_features, force_full_repaint, force_vt_input, initial_cols, initial_position,
    initial_rows, large_paste_warning, launch_mode, multi_line_paste_warning,
    show_tabs_in_titlebar, show_terminal_title_in_titlebar, snap_to_grid_on_resize,
    software_rendering, start_on_user_login, tab_width_mode, theme, word_delimiters,
};


pub(crate) fn default_server_base_url() -> String {
    "http://127.0.0.1:8000/".to_string()
}

pub(crate) fn default_request_timeout_secs() -> u64 {
    10
}

pub(crate) fn default_volume() -> f32 {
    1.0
}

pub(crate) fn default_time_update_interval_ms() -> u64 {
    250
}

pub(crate) fn default_double_click_window_ms() -> u64 {
    250
}

pub(crate) fn default_scroll_edge_top_px() -> f32 {
    lingo_core::sync::DEFAULT_EDGE_TOP_PX
}

pub(crate) fn default_scroll_edge_bottom_px() -> f32 {
    lingo_core::sync::DEFAULT_EDGE_BOTTOM_PX
}

pub(crate) fn default_smooth_scroll_ms() -> u64 {
    300
}

pub(crate) fn default_font_size() -> u32 {
    20
}

pub(crate) fn default_line_spacing() -> f32 {
    1.4
}

pub(crate) fn default_margin_horizontal() -> u16 {
    24
}

pub(crate) fn default_margin_vertical() -> u16 {
    16
}

pub(crate) fn default_day_highlight() -> crate::config::HighlightColor {
    crate::config::HighlightColor {
        r: 0.99,
        g: 0.88,
        b: 0.28,
        a: 0.55,
    }
}

pub(crate) fn default_night_highlight() -> crate::config::HighlightColor {
    crate::config::HighlightColor {
        r: 0.8,
        g: 0.8,
        b: 0.5,
        a: 0.25,
    }
}

pub(crate) fn default_window_width() -> f32 {
    1180.0
}

pub(crate) fn default_window_height() -> f32 {
    780.0
}

pub(crate) fn default_narrow_breakpoint_px() -> f32 {
    720.0
}

pub(crate) fn default_file_panel_width() -> f32 {
    260.0
}

pub(crate) fn default_notebook_width() -> f32 {
    300.0
}

pub(crate) fn default_key_toggle_play_pause() -> String {
    "space".to_string()
}

pub(crate) fn default_key_toggle_notebook() -> String {
    "ctrl+n".to_string()
}

pub(crate) fn default_key_toggle_file_list() -> String {
    "ctrl+l".to_string()
}

pub(crate) fn default_key_safe_quit() -> String {
    "ctrl+q".to_string()
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}

use lingo_core::Language;
use serde::Deserialize;

/// Flattened app configuration. The TOML file groups these fields into tables
/// (see `tables.rs`).
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default = "crate::config::defaults::default_server_base_url")]
    pub server_base_url: String,
    #[serde(default = "crate::config::defaults::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub default_language: Language,
    #[serde(default = "crate::config::defaults::default_volume")]
    pub volume: f32,
    #[serde(default = "crate::config::defaults::default_time_update_interval_ms")]
    pub time_update_interval_ms: u64,
    #[serde(default = "crate::config::defaults::default_double_click_window_ms")]
    pub double_click_window_ms: u64,
    #[serde(default = "crate::config::defaults::default_scroll_edge_top_px")]
    pub scroll_edge_top_px: f32,
    #[serde(default = "crate::config::defaults::default_scroll_edge_bottom_px")]
    pub scroll_edge_bottom_px: f32,
    #[serde(default = "crate::config::defaults::default_smooth_scroll_ms")]
    pub smooth_scroll_ms: u64,
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_font_size")]
    pub font_size: u32,
    #[serde(default = "crate::config::defaults::default_line_spacing")]
    pub line_spacing: f32,
    #[serde(default = "crate::config::defaults::default_margin_horizontal")]
    pub margin_horizontal: u16,
    #[serde(default = "crate::config::defaults::default_margin_vertical")]
    pub margin_vertical: u16,
    #[serde(default = "crate::config::defaults::default_day_highlight")]
    pub day_highlight: HighlightColor,
    #[serde(default = "crate::config::defaults::default_night_highlight")]
    pub night_highlight: HighlightColor,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default = "crate::config::defaults::default_narrow_breakpoint_px")]
    pub narrow_breakpoint_px: f32,
    #[serde(default = "crate::config::defaults::default_file_panel_width")]
    pub file_panel_width: f32,
    #[serde(default = "crate::config::defaults::default_notebook_width")]
    pub notebook_width: f32,
    #[serde(default = "crate::config::defaults::default_key_toggle_play_pause")]
    pub key_toggle_play_pause: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_notebook")]
    pub key_toggle_notebook: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_file_list")]
    pub key_toggle_file_list: String,
    #[serde(default = "crate::config::defaults::default_key_safe_quit")]
    pub key_safe_quit: String,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            server_base_url: crate::config::defaults::default_server_base_url(),
            request_timeout_secs: crate::config::defaults::default_request_timeout_secs(),
            default_language: Language::default(),
            volume: crate::config::defaults::default_volume(),
            time_update_interval_ms: crate::config::defaults::default_time_update_interval_ms(),
            double_click_window_ms: crate::config::defaults::default_double_click_window_ms(),
            scroll_edge_top_px: crate::config::defaults::default_scroll_edge_top_px(),
            scroll_edge_bottom_px: crate::config::defaults::default_scroll_edge_bottom_px(),
            smooth_scroll_ms: crate::config::defaults::default_smooth_scroll_ms(),
            theme: ThemeMode::default(),
            font_size: crate::config::defaults::default_font_size(),
            line_spacing: crate::config::defaults::default_line_spacing(),
            margin_horizontal: crate::config::defaults::default_margin_horizontal(),
            margin_vertical: crate::config::defaults::default_margin_vertical(),
            day_highlight: crate::config::defaults::default_day_highlight(),
            night_highlight: crate::config::defaults::default_night_highlight(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            narrow_breakpoint_px: crate::config::defaults::default_narrow_breakpoint_px(),
            file_panel_width: crate::config::defaults::default_file_panel_width(),
            notebook_width: crate::config::defaults::default_notebook_width(),
            key_toggle_play_pause: crate::config::defaults::default_key_toggle_play_pause(),
            key_toggle_notebook: crate::config::defaults::default_key_toggle_notebook(),
            key_toggle_file_list: crate::config::defaults::default_key_toggle_file_list(),
            key_safe_quit: crate::config::defaults::default_key_safe_quit(),
            log_level: crate::config::defaults::default_log_level(),
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    #[default]
    Day,
    Night,
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct HighlightColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

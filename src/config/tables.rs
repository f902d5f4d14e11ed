use super::defaults;
use super::models::{AppConfig, HighlightColor, LogLevel, ThemeMode};
use lingo_core::Language;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    playback: PlaybackConfig,
    #[serde(default)]
    scroll: ScrollConfig,
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    ui: UiConfig,
    #[serde(default)]
    keys: KeysConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            server_base_url: tables.server.base_url,
            request_timeout_secs: tables.server.request_timeout_secs,
            default_language: tables.playback.default_language,
            volume: tables.playback.volume,
            time_update_interval_ms: tables.playback.time_update_interval_ms,
            double_click_window_ms: tables.playback.double_click_window_ms,
            scroll_edge_top_px: tables.scroll.edge_top_px,
            scroll_edge_bottom_px: tables.scroll.edge_bottom_px,
            smooth_scroll_ms: tables.scroll.smooth_scroll_ms,
            theme: tables.appearance.theme,
            font_size: tables.appearance.font_size,
            line_spacing: tables.appearance.line_spacing,
            margin_horizontal: tables.appearance.margin_horizontal,
            margin_vertical: tables.appearance.margin_vertical,
            day_highlight: tables.appearance.day_highlight,
            night_highlight: tables.appearance.night_highlight,
            window_width: tables.ui.window_width,
            window_height: tables.ui.window_height,
            narrow_breakpoint_px: tables.ui.narrow_breakpoint_px,
            file_panel_width: tables.ui.file_panel_width,
            notebook_width: tables.ui.notebook_width,
            key_toggle_play_pause: tables.keys.toggle_play_pause,
            key_toggle_notebook: tables.keys.toggle_notebook,
            key_toggle_file_list: tables.keys.toggle_file_list,
            key_safe_quit: tables.keys.safe_quit,
            log_level: tables.logging.log_level,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            server: ServerConfig {
                base_url: config.server_base_url.clone(),
                request_timeout_secs: config.request_timeout_secs,
            },
            playback: PlaybackConfig {
                default_language: config.default_language,
                volume: config.volume,
                time_update_interval_ms: config.time_update_interval_ms,
                double_click_window_ms: config.double_click_window_ms,
            },
            scroll: ScrollConfig {
                edge_top_px: config.scroll_edge_top_px,
                edge_bottom_px: config.scroll_edge_bottom_px,
                smooth_scroll_ms: config.smooth_scroll_ms,
            },
            appearance: AppearanceConfig {
                theme: config.theme,
                font_size: config.font_size,
                line_spacing: config.line_spacing,
                margin_horizontal: config.margin_horizontal,
                margin_vertical: config.margin_vertical,
                day_highlight: config.day_highlight,
                night_highlight: config.night_highlight,
            },
            ui: UiConfig {
                window_width: config.window_width,
                window_height: config.window_height,
                narrow_breakpoint_px: config.narrow_breakpoint_px,
                file_panel_width: config.file_panel_width,
                notebook_width: config.notebook_width,
            },
            keys: KeysConfig {
                toggle_play_pause: config.key_toggle_play_pause.clone(),
                toggle_notebook: config.key_toggle_notebook.clone(),
                toggle_file_list: config.key_toggle_file_list.clone(),
                safe_quit: config.key_safe_quit.clone(),
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ServerConfig {
    #[serde(default = "defaults::default_server_base_url")]
    base_url: String,
    #[serde(default = "defaults::default_request_timeout_secs")]
    request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            base_url: defaults::default_server_base_url(),
            request_timeout_secs: defaults::default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct PlaybackConfig {
    #[serde(default)]
    default_language: Language,
    #[serde(default = "defaults::default_volume")]
    volume: f32,
    #[serde(default = "defaults::default_time_update_interval_ms")]
    time_update_interval_ms: u64,
    #[serde(default = "defaults::default_double_click_window_ms")]
    double_click_window_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            default_language: Language::default(),
            volume: defaults::default_volume(),
            time_update_interval_ms: defaults::default_time_update_interval_ms(),
            double_click_window_ms: defaults::default_double_click_window_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ScrollConfig {
    #[serde(default = "defaults::default_scroll_edge_top_px")]
    edge_top_px: f32,
    #[serde(default = "defaults::default_scroll_edge_bottom_px")]
    edge_bottom_px: f32,
    #[serde(default = "defaults::default_smooth_scroll_ms")]
    smooth_scroll_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        ScrollConfig {
            edge_top_px: defaults::default_scroll_edge_top_px(),
            edge_bottom_px: defaults::default_scroll_edge_bottom_px(),
            smooth_scroll_ms: defaults::default_smooth_scroll_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_font_size")]
    font_size: u32,
    #[serde(default = "defaults::default_line_spacing")]
    line_spacing: f32,
    #[serde(default = "defaults::default_margin_horizontal")]
    margin_horizontal: u16,
    #[serde(default = "defaults::default_margin_vertical")]
    margin_vertical: u16,
    #[serde(default = "defaults::default_day_highlight")]
    day_highlight: HighlightColor,
    #[serde(default = "defaults::default_night_highlight")]
    night_highlight: HighlightColor,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            theme: ThemeMode::default(),
            font_size: defaults::default_font_size(),
            line_spacing: defaults::default_line_spacing(),
            margin_horizontal: defaults::default_margin_horizontal(),
            margin_vertical: defaults::default_margin_vertical(),
            day_highlight: defaults::default_day_highlight(),
            night_highlight: defaults::default_night_highlight(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct UiConfig {
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
    #[serde(default = "defaults::default_narrow_breakpoint_px")]
    narrow_breakpoint_px: f32,
    #[serde(default = "defaults::default_file_panel_width")]
    file_panel_width: f32,
    #[serde(default = "defaults::default_notebook_width")]
    notebook_width: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            narrow_breakpoint_px: defaults::default_narrow_breakpoint_px(),
            file_panel_width: defaults::default_file_panel_width(),
            notebook_width: defaults::default_notebook_width(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_toggle_play_pause")]
    toggle_play_pause: String,
    #[serde(default = "defaults::default_key_toggle_notebook")]
    toggle_notebook: String,
    #[serde(default = "defaults::default_key_toggle_file_list")]
    toggle_file_list: String,
    #[serde(default = "defaults::default_key_safe_quit")]
    safe_quit: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            toggle_play_pause: defaults::default_key_toggle_play_pause(),
            toggle_notebook: defaults::default_key_toggle_notebook(),
            toggle_file_list: defaults::default_key_toggle_file_list(),
            safe_quit: defaults::default_key_safe_quit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

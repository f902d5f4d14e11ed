use super::models::AppConfig;
use super::tables::ConfigTables;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err}");
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    let tables: ConfigTables = toml::from_str(contents)?;
    Ok(tables.into())
}

/// Render the effective configuration in the on-disk table layout.
pub fn serialize_config(config: &AppConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(&ConfigTables::from(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogLevel, ThemeMode};
    use lingo_core::Language;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = parse_config("").expect("parse");
        assert_eq!(cfg.server_base_url, "http://127.0.0.1:8000/");
        assert_eq!(cfg.double_click_window_ms, 250);
        assert_eq!(cfg.scroll_edge_top_px, 100.0);
        assert_eq!(cfg.scroll_edge_bottom_px, 150.0);
        assert_eq!(cfg.key_toggle_play_pause, "space");
        assert_eq!(cfg.log_level, LogLevel::Info);
    }

    #[test]
    fn reads_values_from_their_tables() {
        let cfg = parse_config(
            r#"
[server]
base_url = "http://reader.local:9000/app/"

[playback]
default_language = "german"
volume = 0.5

[scroll]
edge_bottom_px = 200.0

[appearance]
theme = "night"

[keys]
safe_quit = "ctrl+w"

[logging]
log_level = "debug"
"#,
        )
        .expect("parse");
        assert_eq!(cfg.server_base_url, "http://reader.local:9000/app/");
        assert_eq!(cfg.default_language, Language::German);
        assert_eq!(cfg.volume, 0.5);
        assert_eq!(cfg.scroll_edge_bottom_px, 200.0);
        assert_eq!(cfg.scroll_edge_top_px, 100.0);
        assert_eq!(cfg.theme, ThemeMode::Night);
        assert_eq!(cfg.key_safe_quit, "ctrl+w");
        assert_eq!(cfg.key_toggle_notebook, "ctrl+n");
        assert_eq!(cfg.log_level, LogLevel::Debug);
    }

    #[test]
    fn rejects_unknown_language() {
        assert!(parse_config("[playback]\ndefault_language = \"klingon\"\n").is_err());
    }

    #[test]
    fn serialized_config_reads_back() {
        let mut cfg = AppConfig::default();
        cfg.default_language = Language::Spanish;
        cfg.notebook_width = 340.0;
        let text = serialize_config(&cfg).expect("serialize");
        assert!(text.contains("[server]"));
        let parsed = parse_config(&text).expect("parse");
        assert_eq!(parsed.default_language, Language::Spanish);
        assert_eq!(parsed.notebook_width, 340.0);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load_config(Path::new("/nonexistent/lingo-reader/config.toml"));
        assert_eq!(cfg.request_timeout_secs, 10);
    }
}

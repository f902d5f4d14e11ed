mod audio;
mod catalog;
mod constants;
mod notebook;
mod transcript;
mod ui;

use crate::config::{AppConfig, HighlightColor, ThemeMode};
use iced::{Color, Task};
use lingo_core::{ApiClient, ScrollPolicy, SelectionTracker};
use std::time::Duration;
use tracing::info;

use super::messages::Message;

pub(in crate::app) use audio::{AudioState, AudioStatus};
pub(crate) use catalog::entry_label;
pub(in crate::app) use catalog::{CatalogState, CatalogStatus};
pub(crate) use constants::*;
pub(in crate::app) use notebook::{NotebookState, NotebookStatus, Notice};
pub(in crate::app) use transcript::{TranscriptState, TranscriptStatus};
pub(in crate::app) use ui::LayoutState;

/// Core application state composed of sub-models.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) api: ApiClient,
    pub(super) selection: SelectionTracker,
    pub(super) catalog: CatalogState,
    pub(super) transcript: TranscriptState,
    pub(super) audio: AudioState,
    pub(super) notebook: NotebookState,
    pub(super) layout: LayoutState,
}

impl App {
    /// Build the initial state and request the catalog for the starting
    /// language.
    pub fn bootstrap(config: AppConfig, api: ApiClient) -> (App, Task<Message>) {
        let config = clamp_config(config);
        let language = config.default_language;
        let mut app = App {
            api,
            selection: SelectionTracker::new(),
            catalog: CatalogState::new(language),
            transcript: TranscriptState::new(),
            audio: AudioState::new(config.volume),
            notebook: NotebookState::new(),
            layout: LayoutState::new(config.window_width, config.window_height),
            config,
        };
        info!(%language, "Bootstrapping reader");
        let effects = app.select_language(language);
        let task = Task::batch(effects.into_iter().map(|effect| app.run_effect(effect)));
        (app, task)
    }

    pub(super) fn highlight_color(&self) -> Color {
        let HighlightColor { r, g, b, a } = if matches!(self.config.theme, ThemeMode::Night) {
            self.config.night_highlight
        } else {
            self.config.day_highlight
        };
        Color { r, g, b, a }
    }

    pub(super) fn is_narrow(&self) -> bool {
        self.layout.window_width < self.config.narrow_breakpoint_px
    }

    pub(super) fn scroll_policy(&self) -> ScrollPolicy {
        ScrollPolicy {
            edge_top: self.config.scroll_edge_top_px,
            edge_bottom: self.config.scroll_edge_bottom_px,
        }
    }

    pub(super) fn double_click_window(&self) -> Duration {
        Duration::from_millis(self.config.double_click_window_ms)
    }

    pub(super) fn current_title(&self) -> Option<String> {
        self.catalog
            .selected
            .as_deref()
            .map(lingo_core::text_utils::article_title)
    }
}

/// Pull out-of-range values back to something the UI can work with.
pub(crate) fn clamp_config(mut config: AppConfig) -> AppConfig {
    config.volume = if config.volume.is_finite() {
        config.volume.clamp(MIN_VOLUME, MAX_VOLUME)
    } else {
        1.0
    };
    config.font_size = config.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    config.line_spacing = if config.line_spacing.is_finite() {
        config.line_spacing.clamp(0.8, 3.0)
    } else {
        1.4
    };
    config.margin_horizontal = config.margin_horizontal.min(MAX_MARGIN);
    config.margin_vertical = config.margin_vertical.min(MAX_MARGIN);
    config.time_update_interval_ms = config.time_update_interval_ms.max(MIN_TIME_UPDATE_MS);
    config.double_click_window_ms = config.double_click_window_ms.min(MAX_DOUBLE_CLICK_WINDOW_MS);
    config.smooth_scroll_ms = config.smooth_scroll_ms.min(MAX_SMOOTH_SCROLL_MS);
    config.scroll_edge_top_px = finite_or(config.scroll_edge_top_px, 100.0).max(0.0);
    config.scroll_edge_bottom_px = finite_or(config.scroll_edge_bottom_px, 150.0).max(0.0);
    config.window_width = finite_or(config.window_width, 1180.0).max(320.0);
    config.window_height = finite_or(config.window_height, 780.0).max(240.0);
    config.narrow_breakpoint_px = finite_or(config.narrow_breakpoint_px, 720.0).max(0.0);
    config.file_panel_width = finite_or(config.file_panel_width, 260.0).clamp(120.0, 800.0);
    config.notebook_width = finite_or(config.notebook_width, 300.0).clamp(160.0, 800.0);
    config.day_highlight = clamp_highlight(config.day_highlight);
    config.night_highlight = clamp_highlight(config.night_highlight);
    config
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

fn clamp_highlight(color: HighlightColor) -> HighlightColor {
    let channel = |v: f32| finite_or(v, 0.0).clamp(0.0, 1.0);
    HighlightColor {
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
        a: channel(color.a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_values() {
        let mut config = AppConfig::default();
        config.volume = 7.0;
        config.font_size = 2;
        config.line_spacing = f32::NAN;
        config.time_update_interval_ms = 0;
        config.day_highlight.a = 3.0;
        let clamped = clamp_config(config);
        assert_eq!(clamped.volume, MAX_VOLUME);
        assert_eq!(clamped.font_size, MIN_FONT_SIZE);
        assert_eq!(clamped.line_spacing, 1.4);
        assert_eq!(clamped.time_update_interval_ms, MIN_TIME_UPDATE_MS);
        assert_eq!(clamped.day_highlight.a, 1.0);
    }

    #[test]
    fn defaults_survive_clamping() {
        let clamped = clamp_config(AppConfig::default());
        assert_eq!(clamped.double_click_window_ms, 250);
        assert_eq!(clamped.smooth_scroll_ms, 300);
        assert_eq!(clamped.narrow_breakpoint_px, 720.0);
    }
}

use super::super::state::App;
use crate::config::ThemeMode;
use tracing::{debug, info};

impl App {
    pub(super) fn handle_toggle_theme(&mut self) {
        self.config.theme = match self.config.theme {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        };
        info!(theme = %self.config.theme, "Switched theme");
    }

    /// Widening past the breakpoint docks the file list again, so the overlay
    /// is dropped.
    pub(super) fn handle_window_resized(&mut self, width: f32, height: f32) {
        self.layout.window_width = width;
        self.layout.window_height = height;
        if !self.is_narrow() && self.layout.file_list_open {
            debug!(width, "Window is wide again; closing file overlay");
            self.layout.file_list_open = false;
        }
    }

    pub(super) fn handle_toggle_file_list(&mut self) {
        self.layout.file_list_open = !self.layout.file_list_open;
    }

    pub(super) fn handle_close_file_list(&mut self) {
        self.layout.file_list_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::tests::test_app;

    #[test]
    fn widening_the_window_closes_the_overlay() {
        let mut app = test_app();
        app.handle_window_resized(500.0, 700.0);
        assert!(app.is_narrow());
        app.handle_toggle_file_list();
        assert!(app.layout.file_list_open);

        app.handle_window_resized(1200.0, 700.0);
        assert!(!app.is_narrow());
        assert!(!app.layout.file_list_open);
        assert_eq!(app.layout.window_height, 700.0);
    }
}

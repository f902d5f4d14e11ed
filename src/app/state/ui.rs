use lingo_core::{ScrollAnimation, Viewport};

/// Window geometry, file list overlay and transcript scroll tracking.
pub struct LayoutState {
    pub(in crate::app) window_width: f32,
    pub(in crate::app) window_height: f32,
    pub(in crate::app) file_list_open: bool,
    pub(in crate::app) viewport: Viewport,
    pub(in crate::app) viewport_width: f32,
    pub(in crate::app) animation: Option<ScrollAnimation>,
}

impl LayoutState {
    pub(in crate::app) fn new(window_width: f32, window_height: f32) -> Self {
        Self {
            window_width,
            window_height,
            file_list_open: false,
            viewport: Viewport::default(),
            viewport_width: 0.0,
            animation: None,
        }
    }
}

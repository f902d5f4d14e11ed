use crate::audio::AudioController;

#[derive(Debug, Clone, PartialEq)]
pub enum AudioStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Audio source for the current article plus intents recorded before the
/// source arrived.
pub struct AudioState {
    pub(in crate::app) controller: AudioController,
    pub(in crate::app) status: AudioStatus,
    pub(in crate::app) pending_seek: Option<f64>,
    pub(in crate::app) pending_play: bool,
    pub(in crate::app) position: f64,
}

impl AudioState {
    pub(in crate::app) fn new(volume: f32) -> Self {
        Self {
            controller: AudioController::new(volume),
            status: AudioStatus::Idle,
            pending_seek: None,
            pending_play: false,
            position: 0.0,
        }
    }

    pub(in crate::app) fn reset(&mut self, status: AudioStatus) {
        self.controller.stop();
        self.status = status;
        self.pending_seek = None;
        self.pending_play = false;
        self.position = 0.0;
    }

    pub(in crate::app) fn is_loading(&self) -> bool {
        matches!(self.status, AudioStatus::Loading)
    }
}

use iced::task::Handle;
use lingo_core::SubtitleView;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptStatus {
    Empty,
    Loading,
    Ready,
    Failed(String),
}

/// Rendered subtitles for the current article and the click timers armed on
/// them. Dropping a timer handle aborts its task.
pub struct TranscriptState {
    pub(in crate::app) status: TranscriptStatus,
    pub(in crate::app) view: Option<SubtitleView>,
    pub(in crate::app) timers: HashMap<u64, Handle>,
    pub(in crate::app) generation: u64,
}

impl TranscriptState {
    pub(in crate::app) fn new() -> Self {
        Self {
            status: TranscriptStatus::Empty,
            view: None,
            timers: HashMap::new(),
            generation: 0,
        }
    }

    pub(in crate::app) fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Swap in a freshly rendered view; timers of the old one die with it.
    pub(in crate::app) fn replace_view(&mut self, view: SubtitleView) {
        self.timers.clear();
        self.view = Some(view);
        self.status = TranscriptStatus::Ready;
    }

    pub(in crate::app) fn clear(&mut self, status: TranscriptStatus) {
        self.timers.clear();
        self.view = None;
        self.status = status;
    }

    pub(in crate::app) fn drop_timers(&mut self, tokens: &[u64]) {
        for token in tokens {
            self.timers.remove(token);
        }
    }
}

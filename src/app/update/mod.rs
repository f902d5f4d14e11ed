use iced::widget::scrollable::RelativeOffset;
use lingo_core::{CatalogTicket, LoadContext};
use std::time::Duration;

mod appearance;
mod catalog;
mod core;
mod notebook;
mod playback;
mod scroll;

#[cfg(test)]
pub(super) use self::core::tests;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Effect {
    FetchCatalog(CatalogTicket),
    FetchSubtitles(LoadContext),
    FetchAudio(LoadContext),
    ArmClickTimer {
        generation: u64,
        unit: usize,
        token: u64,
        delay: Duration,
    },
    Play,
    Pause,
    Seek(f64),
    ScrollTo(RelativeOffset),
    LoadNotes {
        request_id: u64,
        article_id: String,
    },
    SaveNotes {
        article_id: String,
        words: Vec<String>,
    },
    QuitSafely,
}

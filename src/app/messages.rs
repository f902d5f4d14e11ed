use iced::keyboard::{Key, Modifiers};
use iced::widget::scrollable::RelativeOffset;
use iced::widget::text_editor;
use lingo_core::{CatalogTicket, Language, LoadContext, Sentence};
use std::sync::Arc;
use std::time::Instant;

/// Messages emitted by the UI and by completed tasks.
#[derive(Debug, Clone)]
pub enum Message {
    LanguageSelected(Language),
    FileSelected(String),
    CatalogLoaded {
        ticket: CatalogTicket,
        result: Result<Vec<String>, String>,
    },
    SubtitlesLoaded {
        ctx: LoadContext,
        result: Result<Vec<Sentence>, String>,
    },
    AudioLoaded {
        ctx: LoadContext,
        result: Result<Arc<Vec<u8>>, String>,
    },
    SentenceClicked(usize),
    ClickWindowElapsed {
        generation: u64,
        unit: usize,
        token: u64,
    },
    Play,
    Pause,
    TogglePlayPause,
    SeekTo(f32),
    SetVolume(f32),
    Tick(Instant),
    AnimationFrame(Instant),
    Scrolled {
        offset: RelativeOffset,
        viewport_width: f32,
        viewport_height: f32,
        content_height: f32,
    },
    WindowResized {
        width: f32,
        height: f32,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    ToggleFileList,
    CloseFileList,
    ToggleTheme,
    ToggleNotebook,
    NotebookEdited(text_editor::Action),
    SaveNotes,
    NotesLoaded {
        request_id: u64,
        article_id: String,
        result: Result<Vec<String>, String>,
    },
    NotesSaved {
        article_id: String,
        result: Result<usize, String>,
    },
    PollSystemSignals,
    SafeQuit,
}

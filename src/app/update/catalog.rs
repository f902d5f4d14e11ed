use super::super::state::{App, AudioStatus, CatalogStatus, TranscriptStatus};
use super::Effect;
use lingo_core::{CatalogTicket, Language, LoadContext, Sentence, SubtitleView};
use std::sync::Arc;
use tracing::{debug, info, warn};

impl App {
    /// Switch the language tab: drop the current article and fetch the new
    /// catalog.
    /// Re-selecting the language already shown only refetches when its
    /// catalog did not load.
    pub(super) fn handle_language_selected(&mut self, language: Language, effects: &mut Vec<Effect>) {
        let settled = matches!(self.catalog.status, CatalogStatus::Loaded(_));
        if language != self.catalog.language || !settled {
            effects.extend(self.select_language(language));
        }
    }

    pub(super) fn handle_file_selected(&mut self, file_name: String, effects: &mut Vec<Effect>) {
        self.layout.file_list_open = false;
        effects.extend(self.select_file(file_name));
    }

    pub(in crate::app) fn select_language(&mut self, language: Language) -> Vec<Effect> {
        let ticket = self.selection.begin_catalog(language);
        self.catalog.language = language;
        self.catalog.status = CatalogStatus::Loading;
        self.catalog.selected = None;
        self.selection_changed(None);
        info!(%language, request_id = ticket.request_id, "Selected language");
        vec![Effect::FetchCatalog(ticket)]
    }

    /// Select an article in the current language and start its loads.
    pub(in crate::app) fn select_file(&mut self, file_name: String) -> Vec<Effect> {
        let ctx = self
            .selection
            .begin_article(self.catalog.language, file_name.clone());
        self.catalog.selected = Some(file_name);
        info!(
            language = %ctx.language,
            file = %ctx.file_name,
            request_id = ctx.request_id,
            "Selected article"
        );
        self.selection_changed(Some(&ctx));
        vec![Effect::FetchSubtitles(ctx.clone()), Effect::FetchAudio(ctx)]
    }

    /// Tell every sub-state that the current article changed.
    fn selection_changed(&mut self, ctx: Option<&LoadContext>) {
        let loading = ctx.is_some();
        self.transcript.clear(if loading {
            TranscriptStatus::Loading
        } else {
            TranscriptStatus::Empty
        });
        self.layout.animation = None;
        self.audio.reset(if loading {
            AudioStatus::Loading
        } else {
            AudioStatus::Idle
        });
        self.notebook.close();
    }

    pub(super) fn handle_catalog_loaded(
        &mut self,
        ticket: CatalogTicket,
        result: Result<Vec<String>, String>,
        effects: &mut Vec<Effect>,
    ) {
        if !self.selection.is_current_catalog(&ticket) {
            debug!(
                language = %ticket.language,
                request_id = ticket.request_id,
                "Discarding stale catalog response"
            );
            return;
        }

        match result {
            Ok(files) => {
                info!(language = %ticket.language, files = files.len(), "Catalog loaded");
                let first = files.first().cloned();
                self.catalog.status = CatalogStatus::Loaded(files);
                if let Some(first) = first {
                    effects.extend(self.select_file(first));
                }
            }
            Err(err) => {
                warn!(language = %ticket.language, "Failed to load catalog: {err}");
                self.catalog.status = CatalogStatus::Failed(err);
            }
        }
    }

    pub(super) fn handle_subtitles_loaded(
        &mut self,
        ctx: LoadContext,
        result: Result<Vec<Sentence>, String>,
        effects: &mut Vec<Effect>,
    ) {
        if !self.selection.is_current(&ctx) {
            debug!(
                file = %ctx.file_name,
                request_id = ctx.request_id,
                "Discarding stale subtitle response"
            );
            return;
        }

        match result {
            Ok(sentences) => {
                let generation = self.transcript.next_generation();
                let mut view =
                    SubtitleView::render(generation, sentences, self.double_click_window());
                info!(
                    file = %ctx.file_name,
                    units = view.len(),
                    generation,
                    "Rendered subtitles"
                );
                let position = self.audio.controller.position(std::time::Instant::now());
                let newly_active = view.sync(position);
                self.transcript.replace_view(view);
                self.layout.animation = None;
                effects.push(Effect::ScrollTo(iced::widget::scrollable::RelativeOffset::START));
                self.follow_newly_active(&newly_active, effects);
            }
            Err(err) => {
                warn!(file = %ctx.file_name, "Failed to load subtitles: {err}");
                self.transcript.clear(TranscriptStatus::Failed(err));
            }
        }
    }

    pub(super) fn handle_audio_loaded(
        &mut self,
        ctx: LoadContext,
        result: Result<Arc<Vec<u8>>, String>,
        effects: &mut Vec<Effect>,
    ) {
        if !self.selection.is_current(&ctx) {
            debug!(
                file = %ctx.file_name,
                request_id = ctx.request_id,
                "Discarding stale audio response"
            );
            return;
        }

        let bound = result.and_then(|bytes| {
            self.audio
                .controller
                .set_source(bytes)
                .map_err(|err| format!("{err:#}"))
        });
        match bound {
            Ok(()) => {
                self.audio.status = AudioStatus::Ready;
                if let Some(seconds) = self.audio.pending_seek.take() {
                    effects.push(Effect::Seek(seconds));
                }
                if std::mem::take(&mut self.audio.pending_play) {
                    effects.push(Effect::Play);
                }
            }
            Err(err) => {
                warn!(file = %ctx.file_name, "Audio unavailable: {err}");
                self.audio.pending_seek = None;
                self.audio.pending_play = false;
                self.audio.status = AudioStatus::Failed(err);
            }
        }
    }
}

use super::super::state::{App, NotebookStatus, Notice};
use super::Effect;
use iced::widget::text_editor;
use lingo_core::notes::{format_buffer, parse_buffer};
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_toggle_notebook(&mut self, effects: &mut Vec<Effect>) {
        if self.notebook.open {
            self.notebook.close();
            debug!("Closed notebook");
            return;
        }
        let Some(article_id) = self.selection.current().map(|ctx| ctx.article_id()) else {
            debug!("Notebook needs a selected article");
            return;
        };
        let request_id = self.notebook.begin_load(article_id.clone());
        info!(%article_id, request_id, "Opening notebook");
        effects.push(Effect::LoadNotes {
            request_id,
            article_id,
        });
    }

    pub(super) fn handle_notebook_edited(&mut self, action: text_editor::Action) {
        if !matches!(self.notebook.status, NotebookStatus::Ready) {
            return;
        }
        if action.is_edit() {
            self.notebook.notice = None;
        }
        self.notebook.content.perform(action);
    }

    pub(super) fn handle_save_notes(&mut self, effects: &mut Vec<Effect>) {
        if self.notebook.is_saving() || !matches!(self.notebook.status, NotebookStatus::Ready) {
            return;
        }
        let Some(article_id) = self.notebook.article_id.clone() else {
            return;
        };
        let words = parse_buffer(&self.notebook.content.text());
        self.notebook.saving = Some(article_id.clone());
        self.notebook.notice = None;
        effects.push(Effect::SaveNotes { article_id, words });
    }

    pub(super) fn handle_notes_loaded(
        &mut self,
        request_id: u64,
        article_id: String,
        result: Result<Vec<String>, String>,
    ) {
        if !self.notebook.is_current(request_id, &article_id) {
            debug!(%article_id, request_id, "Discarding stale notes response");
            return;
        }
        match result {
            Ok(words) => {
                debug!(%article_id, count = words.len(), "Loaded notes");
                self.notebook.content = text_editor::Content::with_text(&format_buffer(&words));
                self.notebook.status = NotebookStatus::Ready;
            }
            Err(err) => {
                warn!(%article_id, "Failed to load notes: {err}");
                self.notebook.status = NotebookStatus::Failed(err);
            }
        }
    }

    /// Save outcomes are reported even when the panel was closed or moved to
    /// another article while the request was in flight.
    pub(super) fn handle_notes_saved(&mut self, article_id: String, result: Result<usize, String>) {
        if self.notebook.saving.as_deref() == Some(article_id.as_str()) {
            self.notebook.saving = None;
        }
        let shown_here = self.notebook.open
            && self.notebook.article_id.as_deref() == Some(article_id.as_str());
        match result {
            Ok(count) => {
                info!(%article_id, count, "Notes saved");
                if shown_here {
                    self.notebook.notice = Some(Notice {
                        text: format!("Saved {count} notes."),
                        is_error: false,
                    });
                }
            }
            Err(err) => {
                warn!(%article_id, "Failed to save notes: {err}");
                let text = if shown_here {
                    format!("Could not save notes: {err}")
                } else {
                    format!("Could not save notes for {article_id}: {err}")
                };
                self.notebook.notice = Some(Notice {
                    text,
                    is_error: true,
                });
            }
        }
    }
}

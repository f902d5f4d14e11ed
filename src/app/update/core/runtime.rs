use super::super::super::messages::Message;
use super::super::super::state::{App, TEXT_SCROLL_ID};
use super::super::Effect;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::window;
use std::sync::Arc;
use tracing::info;

impl App {
    pub(in crate::app) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::FetchCatalog(ticket) => {
                let api = self.api.clone();
                Task::perform(
                    async move { api.list_files(ticket.language).await },
                    move |result| Message::CatalogLoaded {
                        ticket,
                        result: result.map_err(|err| err.to_string()),
                    },
                )
            }
            Effect::FetchSubtitles(ctx) => {
                let api = self.api.clone();
                let request = ctx.clone();
                Task::perform(
                    async move {
                        api.load_subtitles(request.language, &request.file_name)
                            .await
                    },
                    move |result| Message::SubtitlesLoaded {
                        ctx: ctx.clone(),
                        result: result.map_err(|err| err.to_string()),
                    },
                )
            }
            Effect::FetchAudio(ctx) => {
                let api = self.api.clone();
                let request = ctx.clone();
                Task::perform(
                    async move { api.fetch_audio(request.language, &request.file_name).await },
                    move |result| Message::AudioLoaded {
                        ctx: ctx.clone(),
                        result: result.map(Arc::new).map_err(|err| err.to_string()),
                    },
                )
            }
            Effect::ArmClickTimer {
                generation,
                unit,
                token,
                delay,
            } => {
                let (task, handle) = Task::perform(tokio::time::sleep(delay), move |_| {
                    Message::ClickWindowElapsed {
                        generation,
                        unit,
                        token,
                    }
                })
                .abortable();
                self.transcript
                    .timers
                    .insert(token, handle.abort_on_drop());
                task
            }
            Effect::Play => {
                self.play_audio();
                Task::none()
            }
            Effect::Pause => {
                self.pause_audio();
                Task::none()
            }
            Effect::Seek(seconds) => {
                self.seek_audio(seconds);
                Task::none()
            }
            Effect::ScrollTo(offset) => {
                iced::widget::scrollable::snap_to(TEXT_SCROLL_ID.clone(), offset)
            }
            Effect::LoadNotes {
                request_id,
                article_id,
            } => {
                let api = self.api.clone();
                let requested = article_id.clone();
                Task::perform(
                    async move { api.load_notes(&requested).await },
                    move |result| Message::NotesLoaded {
                        request_id,
                        article_id: article_id.clone(),
                        result: result.map_err(|err| err.to_string()),
                    },
                )
            }
            Effect::SaveNotes { article_id, words } => {
                let api = self.api.clone();
                let requested = article_id.clone();
                let count = words.len();
                Task::perform(
                    async move { api.save_notes(&requested, &words).await },
                    move |result| Message::NotesSaved {
                        article_id: article_id.clone(),
                        result: result.map(|()| count).map_err(|err| err.to_string()),
                    },
                )
            }
            Effect::QuitSafely => {
                info!("Shutting down");
                self.transcript.timers.clear();
                self.audio.controller.stop();
                iced::exit()
            }
        }
    }
}

impl App {
    pub(super) fn handle_poll_system_signals(&mut self, effects: &mut Vec<Effect>) {
        if crate::take_sigint_requested() {
            info!("Ctrl-C received; quitting");
            effects.push(Effect::QuitSafely);
        }
    }

    pub(super) fn handle_safe_quit(&mut self, effects: &mut Vec<Effect>) {
        effects.push(Effect::QuitSafely);
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if let Event::Window(window::Event::Resized(size)) = event {
        return Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        });
    }
    // Focused text editors capture their keys.
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}

use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use std::time::Instant;

impl App {
    pub(in crate::app) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::LanguageSelected(language) => {
                self.handle_language_selected(language, &mut effects)
            }
            Message::FileSelected(file_name) => self.handle_file_selected(file_name, &mut effects),
            Message::CatalogLoaded { ticket, result } => {
                self.handle_catalog_loaded(ticket, result, &mut effects);
            }
            Message::SubtitlesLoaded { ctx, result } => {
                self.handle_subtitles_loaded(ctx, result, &mut effects);
            }
            Message::AudioLoaded { ctx, result } => {
                self.handle_audio_loaded(ctx, result, &mut effects);
            }
            Message::SentenceClicked(idx) => {
                self.handle_sentence_clicked(idx, Instant::now(), &mut effects);
            }
            Message::ClickWindowElapsed {
                generation,
                unit,
                token,
            } => self.handle_click_window_elapsed(generation, unit, token, &mut effects),
            Message::Play => self.handle_play(&mut effects),
            Message::Pause => self.handle_pause(&mut effects),
            Message::TogglePlayPause => self.handle_toggle_play_pause(&mut effects),
            Message::SeekTo(seconds) => self.handle_seek_to(f64::from(seconds), &mut effects),
            Message::SetVolume(volume) => self.handle_set_volume(volume),
            Message::Tick(now) => self.handle_tick(now, &mut effects),
            Message::AnimationFrame(now) => self.handle_animation_frame(now, &mut effects),
            Message::Scrolled {
                offset,
                viewport_width,
                viewport_height,
                content_height,
            } => self.handle_scrolled(offset, viewport_width, viewport_height, content_height),
            Message::WindowResized { width, height } => self.handle_window_resized(width, height),
            Message::KeyPressed { key, modifiers } => {
                self.handle_key_pressed(key, modifiers, &mut effects)
            }
            Message::ToggleFileList => self.handle_toggle_file_list(),
            Message::CloseFileList => self.handle_close_file_list(),
            Message::ToggleTheme => self.handle_toggle_theme(),
            Message::ToggleNotebook => self.handle_toggle_notebook(&mut effects),
            Message::NotebookEdited(action) => self.handle_notebook_edited(action),
            Message::SaveNotes => self.handle_save_notes(&mut effects),
            Message::NotesLoaded {
                request_id,
                article_id,
                result,
            } => self.handle_notes_loaded(request_id, article_id, result),
            Message::NotesSaved { article_id, result } => {
                self.handle_notes_saved(article_id, result);
            }
            Message::PollSystemSignals => self.handle_poll_system_signals(&mut effects),
            Message::SafeQuit => self.handle_safe_quit(&mut effects),
        }

        effects
    }
}

#[cfg(test)]
pub(in crate::app) mod tests {
    use super::*;
    use crate::app::state::{
        AudioStatus, CatalogStatus, MAX_VOLUME, NotebookStatus, TranscriptStatus,
    };
    use crate::config::{AppConfig, ThemeMode};
    use iced::keyboard::{Key, Modifiers, key};
    use lingo_core::{ApiClient, Language, LoadContext, Sentence};
    use std::sync::Arc;
    use std::time::Duration;

    pub(in crate::app) fn test_app() -> App {
        let api = ApiClient::new("http://127.0.0.1:9/", Duration::from_secs(1)).expect("client");
        let mut config = AppConfig::default();
        config.default_language = Language::German;
        let (app, _task) = App::bootstrap(config, api);
        app
    }

    fn catalog_ticket(effects: &[Effect]) -> lingo_core::CatalogTicket {
        effects
            .iter()
            .find_map(|effect| match effect {
                Effect::FetchCatalog(ticket) => Some(*ticket),
                _ => None,
            })
            .expect("catalog fetch")
    }

    fn article_ctx(effects: &[Effect]) -> LoadContext {
        effects
            .iter()
            .find_map(|effect| match effect {
                Effect::FetchSubtitles(ctx) => Some(ctx.clone()),
                _ => None,
            })
            .expect("subtitle fetch")
    }

    pub(in crate::app) fn sentences() -> Vec<Sentence> {
        vec![
            Sentence::new("Der Hund schläft.", 0.0, 2.0),
            Sentence::new("Die Katze spielt.", 2.0, 4.5),
            Sentence::new("Es regnet.", 5.0, 7.0),
        ]
    }

    /// App with `files` loaded and the first one auto-selected.
    pub(in crate::app) fn loaded_app(files: &[&str]) -> (App, LoadContext) {
        let mut app = test_app();
        let effects = app.reduce(Message::LanguageSelected(Language::French));
        let ticket = catalog_ticket(&effects);
        let effects = app.reduce(Message::CatalogLoaded {
            ticket,
            result: Ok(files.iter().map(|f| f.to_string()).collect()),
        });
        let ctx = article_ctx(&effects);
        (app, ctx)
    }

    fn app_with_transcript() -> (App, LoadContext) {
        let (mut app, ctx) = loaded_app(&["a.mp3", "b.mp3"]);
        app.reduce(Message::SubtitlesLoaded {
            ctx: ctx.clone(),
            result: Ok(sentences()),
        });
        (app, ctx)
    }

    #[test]
    fn bootstrap_requests_catalog_for_configured_language() {
        let app = test_app();
        assert_eq!(app.catalog.language, Language::German);
        assert_eq!(app.catalog.status, CatalogStatus::Loading);
    }

    #[test]
    fn catalog_auto_selects_first_file_and_loads_it() {
        let mut app = test_app();
        let effects = app.reduce(Message::LanguageSelected(Language::Spanish));
        let ticket = catalog_ticket(&effects);
        let effects = app.reduce(Message::CatalogLoaded {
            ticket,
            result: Ok(vec!["uno.mp3".into(), "dos.mp3".into()]),
        });

        assert_eq!(app.catalog.selected.as_deref(), Some("uno.mp3"));
        let subtitle_loads = effects
            .iter()
            .filter(|e| matches!(e, Effect::FetchSubtitles(_)))
            .count();
        let audio_loads = effects
            .iter()
            .filter(|e| matches!(e, Effect::FetchAudio(_)))
            .count();
        assert_eq!((subtitle_loads, audio_loads), (1, 1));
        let ctx = article_ctx(&effects);
        assert_eq!(ctx.language, Language::Spanish);
        assert_eq!(ctx.file_name, "uno.mp3");
        assert_eq!(app.transcript.status, TranscriptStatus::Loading);
        assert_eq!(app.audio.status, AudioStatus::Loading);
    }

    #[test]
    fn empty_catalog_issues_no_article_requests() {
        let mut app = test_app();
        let effects = app.reduce(Message::LanguageSelected(Language::English));
        let ticket = catalog_ticket(&effects);
        let effects = app.reduce(Message::CatalogLoaded {
            ticket,
            result: Ok(Vec::new()),
        });
        assert!(effects.is_empty());
        assert_eq!(app.catalog.status, CatalogStatus::Loaded(Vec::new()));
        assert_eq!(app.catalog.selected, None);
        assert_eq!(app.transcript.status, TranscriptStatus::Empty);
    }

    #[test]
    fn catalog_failure_is_reported_without_retry() {
        let mut app = test_app();
        let effects = app.reduce(Message::LanguageSelected(Language::English));
        let ticket = catalog_ticket(&effects);
        let effects = app.reduce(Message::CatalogLoaded {
            ticket,
            result: Err("connection refused".into()),
        });
        assert!(effects.is_empty());
        assert!(matches!(app.catalog.status, CatalogStatus::Failed(_)));
    }

    #[test]
    fn stale_catalog_response_is_ignored() {
        let mut app = test_app();
        let first = catalog_ticket(&app.reduce(Message::LanguageSelected(Language::English)));
        let second = catalog_ticket(&app.reduce(Message::LanguageSelected(Language::Spanish)));
        let effects = app.reduce(Message::CatalogLoaded {
            ticket: first,
            result: Ok(vec!["old.mp3".into()]),
        });
        assert!(effects.is_empty());
        assert_eq!(app.catalog.status, CatalogStatus::Loading);

        app.reduce(Message::CatalogLoaded {
            ticket: second,
            result: Ok(vec!["nuevo.mp3".into()]),
        });
        assert_eq!(app.catalog.selected.as_deref(), Some("nuevo.mp3"));
    }

    #[test]
    fn stale_subtitles_never_replace_current_ones() {
        let (mut app, first_ctx) = loaded_app(&["a.mp3", "b.mp3"]);
        let effects = app.reduce(Message::FileSelected("b.mp3".into()));
        let second_ctx = article_ctx(&effects);

        app.reduce(Message::SubtitlesLoaded {
            ctx: second_ctx,
            result: Ok(vec![Sentence::new("B.", 0.0, 1.0)]),
        });
        app.reduce(Message::SubtitlesLoaded {
            ctx: first_ctx,
            result: Ok(sentences()),
        });

        let view = app.transcript.view.as_ref().expect("view");
        assert_eq!(view.len(), 1);
        assert_eq!(view.units()[0].label(), "B. ");
    }

    #[test]
    fn subtitle_failure_leaves_audio_alone() {
        let (mut app, ctx) = loaded_app(&["a.mp3"]);
        app.reduce(Message::SubtitlesLoaded {
            ctx,
            result: Err("HTTP 404".into()),
        });
        assert!(matches!(app.transcript.status, TranscriptStatus::Failed(_)));
        assert_eq!(app.audio.status, AudioStatus::Loading);
    }

    #[test]
    fn audio_failure_is_shown_in_transport() {
        let (mut app, ctx) = loaded_app(&["a.mp3"]);
        app.reduce(Message::AudioLoaded {
            ctx,
            result: Ok(Arc::new(b"garbage".to_vec())),
        });
        assert!(matches!(app.audio.status, AudioStatus::Failed(_)));
    }

    #[test]
    fn switching_language_clears_current_article() {
        let (mut app, _ctx) = app_with_transcript();
        app.reduce(Message::ToggleNotebook);
        app.reduce(Message::LanguageSelected(Language::English));
        assert!(app.transcript.view.is_none());
        assert_eq!(app.catalog.selected, None);
        assert!(!app.notebook.open);
        assert_eq!(app.audio.status, AudioStatus::Idle);
        assert_eq!(app.catalog.status, CatalogStatus::Loading);
    }

    #[test]
    fn isolated_click_seeks_and_plays_once() {
        let (mut app, _ctx) = app_with_transcript();
        let effects = app.reduce(Message::SentenceClicked(1));
        let (generation, unit, token) = match effects.as_slice() {
            [
                Effect::ArmClickTimer {
                    generation,
                    unit,
                    token,
                    ..
                },
            ] => (*generation, *unit, *token),
            other => panic!("unexpected effects: {other:?}"),
        };

        let fired = app.reduce(Message::ClickWindowElapsed {
            generation,
            unit,
            token,
        });
        // Audio has not arrived yet, so the intent is parked.
        assert!(fired.iter().all(|e| !matches!(e, Effect::Seek(_))));
        assert_eq!(app.audio.pending_seek, Some(2.0));
        assert!(app.audio.pending_play);
        let view = app.transcript.view.as_ref().expect("view");
        assert_eq!(view.active_indices(), vec![1]);

        let again = app.reduce(Message::ClickWindowElapsed {
            generation,
            unit,
            token,
        });
        assert!(again.is_empty());
    }

    #[test]
    fn double_click_pauses_without_seeking() {
        let (mut app, _ctx) = app_with_transcript();
        let first = app.reduce(Message::SentenceClicked(0));
        let Some(Effect::ArmClickTimer {
            generation,
            unit,
            token,
            ..
        }) = first.first().cloned()
        else {
            panic!("expected timer");
        };
        let second = app.reduce(Message::SentenceClicked(2));
        assert_eq!(second, vec![Effect::Pause]);

        let fired = app.reduce(Message::ClickWindowElapsed {
            generation,
            unit,
            token,
        });
        assert!(fired.is_empty());
        assert_eq!(app.audio.pending_seek, None);
    }

    #[test]
    fn timers_from_previous_transcript_are_ignored() {
        let (mut app, _ctx) = app_with_transcript();
        let Some(Effect::ArmClickTimer {
            generation,
            unit,
            token,
            ..
        }) = app.reduce(Message::SentenceClicked(0)).first().cloned()
        else {
            panic!("expected timer");
        };
        let ctx = article_ctx(&app.reduce(Message::FileSelected("b.mp3".into())));
        app.reduce(Message::SubtitlesLoaded {
            ctx,
            result: Ok(sentences()),
        });
        let fired = app.reduce(Message::ClickWindowElapsed {
            generation,
            unit,
            token,
        });
        assert!(fired.is_empty());
        assert_eq!(app.audio.pending_seek, None);
    }

    #[test]
    fn play_without_source_is_remembered_while_loading() {
        let (mut app, _ctx) = app_with_transcript();
        let effects = app.reduce(Message::Play);
        assert!(effects.is_empty());
        assert!(app.audio.pending_play);
    }

    #[test]
    fn play_failure_is_logged_not_fatal() {
        let (mut app, _ctx) = app_with_transcript();
        app.play_audio();
        assert!(!app.audio.controller.is_playing());
        assert!(matches!(app.audio.status, AudioStatus::Loading));
        app.reduce(Message::Tick(Instant::now()));
    }

    #[test]
    fn ticks_move_highlight_with_bound_source() {
        let (mut app, ctx) = app_with_transcript();
        let wav = crate::audio::tests::silent_wav(8_000 * 8);
        app.reduce(Message::AudioLoaded {
            ctx,
            result: Ok(Arc::new(wav)),
        });
        assert_eq!(app.audio.status, AudioStatus::Ready);
        app.play_audio();

        let effects = app.reduce(Message::SeekTo(3.0));
        assert!(effects.contains(&Effect::Seek(3.0)));
        app.seek_audio(3.0);
        app.reduce(Message::Tick(Instant::now()));
        let view = app.transcript.view.as_ref().expect("view");
        assert_eq!(view.active_indices(), vec![1]);

        app.seek_audio(5.5);
        app.reduce(Message::Tick(Instant::now()));
        let view = app.transcript.view.as_ref().expect("view");
        assert_eq!(view.active_indices(), vec![2]);
        assert!((app.audio.position - 5.5).abs() < 0.5);
    }

    #[test]
    fn space_toggles_playback_only_with_source() {
        let (mut app, _ctx) = app_with_transcript();
        let effects = app.reduce(Message::KeyPressed {
            key: Key::Named(key::Named::Space),
            modifiers: Modifiers::empty(),
        });
        assert!(effects.is_empty());
        assert!(!app.audio.pending_play);
    }

    #[test]
    fn notebook_open_fetches_notes_for_article() {
        let (mut app, _ctx) = app_with_transcript();
        let effects = app.reduce(Message::ToggleNotebook);
        assert_eq!(
            effects,
            vec![Effect::LoadNotes {
                request_id: app.notebook.request_id,
                article_id: "french-a.mp3".into(),
            }]
        );
        assert_eq!(app.notebook.status, NotebookStatus::Loading);
    }

    #[test]
    fn notes_round_trip_through_buffer() {
        let (mut app, _ctx) = app_with_transcript();
        app.reduce(Message::ToggleNotebook);
        let request_id = app.notebook.request_id;
        app.reduce(Message::NotesLoaded {
            request_id,
            article_id: "french-a.mp3".into(),
            result: Ok(vec!["chien".into(), "chat".into()]),
        });
        assert_eq!(app.notebook.status, NotebookStatus::Ready);
        assert_eq!(app.notebook.content.text().trim_end(), "chien\nchat");

        app.notebook.content = iced::widget::text_editor::Content::with_text("  \napple\n\nbear");
        let effects = app.reduce(Message::SaveNotes);
        assert_eq!(
            effects,
            vec![Effect::SaveNotes {
                article_id: "french-a.mp3".into(),
                words: vec!["apple".into(), "bear".into()],
            }]
        );
        app.reduce(Message::NotesSaved {
            article_id: "french-a.mp3".into(),
            result: Ok(2),
        });
        let notice = app.notebook.notice.as_ref().expect("notice");
        assert!(!notice.is_error);
    }

    fn ready_notebook(app: &mut App) {
        app.reduce(Message::ToggleNotebook);
        let request_id = app.notebook.request_id;
        app.reduce(Message::NotesLoaded {
            request_id,
            article_id: "french-a.mp3".into(),
            result: Ok(vec!["chien".into()]),
        });
    }

    #[test]
    fn save_failure_after_closing_notebook_is_still_reported() {
        let (mut app, _ctx) = app_with_transcript();
        ready_notebook(&mut app);
        assert_eq!(app.reduce(Message::SaveNotes).len(), 1);
        app.reduce(Message::ToggleNotebook);
        assert!(!app.notebook.open);

        app.reduce(Message::NotesSaved {
            article_id: "french-a.mp3".into(),
            result: Err("HTTP 500".into()),
        });
        assert!(!app.notebook.is_saving());
        let notice = app.notebook.notice.as_ref().expect("notice");
        assert!(notice.is_error);
        assert!(notice.text.contains("HTTP 500"));

        ready_notebook(&mut app);
        assert!(app.notebook.notice.as_ref().is_some_and(|notice| notice.is_error));
    }

    #[test]
    fn reopening_mid_save_does_not_allow_a_second_save() {
        let (mut app, _ctx) = app_with_transcript();
        ready_notebook(&mut app);
        assert_eq!(app.reduce(Message::SaveNotes).len(), 1);
        app.reduce(Message::ToggleNotebook);
        ready_notebook(&mut app);
        assert!(app.notebook.is_saving());
        assert!(app.reduce(Message::SaveNotes).is_empty());

        app.reduce(Message::NotesSaved {
            article_id: "french-a.mp3".into(),
            result: Ok(1),
        });
        assert!(!app.notebook.is_saving());
        assert_eq!(app.reduce(Message::SaveNotes).len(), 1);
    }

    #[test]
    fn notes_for_previous_article_are_discarded() {
        let (mut app, _ctx) = app_with_transcript();
        app.reduce(Message::ToggleNotebook);
        let stale_request = app.notebook.request_id;
        app.reduce(Message::FileSelected("b.mp3".into()));
        assert!(!app.notebook.open);
        app.reduce(Message::ToggleNotebook);
        app.reduce(Message::NotesLoaded {
            request_id: stale_request,
            article_id: "french-a.mp3".into(),
            result: Ok(vec!["old".into()]),
        });
        assert_eq!(app.notebook.status, NotebookStatus::Loading);
        assert_eq!(app.notebook.article_id.as_deref(), Some("french-b.mp3"));
    }

    #[test]
    fn notes_load_failure_is_shown_in_panel() {
        let (mut app, _ctx) = app_with_transcript();
        app.reduce(Message::ToggleNotebook);
        let request_id = app.notebook.request_id;
        app.reduce(Message::NotesLoaded {
            request_id,
            article_id: "french-a.mp3".into(),
            result: Err("HTTP 500".into()),
        });
        assert!(matches!(app.notebook.status, NotebookStatus::Failed(_)));
    }

    #[test]
    fn notebook_needs_an_article() {
        let mut app = test_app();
        assert!(app.reduce(Message::ToggleNotebook).is_empty());
        assert!(!app.notebook.open);
    }

    #[test]
    fn picking_a_file_closes_the_overlay() {
        let (mut app, _ctx) = loaded_app(&["a.mp3", "b.mp3"]);
        app.reduce(Message::WindowResized {
            width: 500.0,
            height: 700.0,
        });
        app.reduce(Message::ToggleFileList);
        assert!(app.layout.file_list_open);
        app.reduce(Message::FileSelected("b.mp3".into()));
        assert!(!app.layout.file_list_open);
    }

    #[test]
    fn theme_toggles_between_day_and_night() {
        let mut app = test_app();
        app.reduce(Message::ToggleTheme);
        assert_eq!(app.config.theme, ThemeMode::Night);
        app.reduce(Message::ToggleTheme);
        assert_eq!(app.config.theme, ThemeMode::Day);
    }

    #[test]
    fn volume_is_clamped() {
        let mut app = test_app();
        app.reduce(Message::SetVolume(9.0));
        assert_eq!(app.audio.controller.volume(), MAX_VOLUME);
    }

    #[test]
    fn safe_quit_emits_quit_effect() {
        let mut app = test_app();
        assert_eq!(app.reduce(Message::SafeQuit), vec![Effect::QuitSafely]);
    }
}

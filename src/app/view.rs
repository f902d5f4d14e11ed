use super::messages::Message;
use super::state::{
    App, AudioStatus, BACKDROP_COLOR, CatalogStatus, ERROR_COLOR, MAX_VOLUME, MIN_VOLUME,
    MUTED_COLOR, NotebookStatus, SUCCESS_COLOR, TEXT_SCROLL_ID, TranscriptStatus, entry_label,
};
use crate::config::ThemeMode;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::text::{LineHeight, Rich, Span, Wrapping};
use iced::widget::{
    Column, Row, button, column, container, horizontal_space, mouse_area, opaque, row,
    scrollable, slider, stack, text, text_editor,
};
use iced::{Background, Color, Element, Length, Padding, Theme};
use lingo_core::Language;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let main = column![self.header(), self.transcript_view(), self.transport_bar()]
            .spacing(12)
            .padding(16)
            .width(Length::Fill)
            .height(Length::Fill);

        let mut layout: Row<'_, Message> = row![].spacing(8).height(Length::Fill);
        if !self.is_narrow() {
            layout = layout.push(
                container(self.file_list())
                    .width(Length::Fixed(self.config.file_panel_width))
                    .height(Length::Fill)
                    .padding(12),
            );
        }
        layout = layout.push(main);
        if self.notebook.open {
            layout = layout.push(self.notebook_panel());
        }

        if self.is_narrow() && self.layout.file_list_open {
            let backdrop = mouse_area(
                container(horizontal_space())
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .style(|_theme: &Theme| container::Style {
                        background: Some(BACKDROP_COLOR.into()),
                        ..container::Style::default()
                    }),
            )
            .on_press(Message::CloseFileList);
            let drawer = container(self.file_list())
                .width(Length::Fixed(self.config.file_panel_width))
                .height(Length::Fill)
                .padding(12)
                .style(container::rounded_box);
            stack![layout, backdrop, opaque(drawer)].into()
        } else {
            layout.into()
        }
    }
}

impl App {
    fn header(&self) -> Element<'_, Message> {
        let tabs = Language::ALL
            .into_iter()
            .fold(row![].spacing(6), |tabs, language| {
                let tab = button(text(language.label())).on_press(Message::LanguageSelected(language));
                tabs.push(if language == self.catalog.language {
                    tab.style(button::primary)
                } else {
                    tab.style(button::secondary)
                })
            });

        let theme_label = if matches!(self.config.theme, ThemeMode::Night) {
            "Day Mode"
        } else {
            "Night Mode"
        };
        let notebook_label = if self.notebook.open {
            "Close Notebook"
        } else {
            "Notebook"
        };
        let notebook_toggle = if self.selection.current().is_some() {
            button(notebook_label).on_press(Message::ToggleNotebook)
        } else {
            button(notebook_label)
        };

        let mut controls: Row<'_, Message> = row![].spacing(10).align_y(Vertical::Center);
        if self.is_narrow() {
            controls = controls.push(button("Files").on_press(Message::ToggleFileList));
        }
        controls = controls
            .push(tabs)
            .push(horizontal_space())
            .push(notebook_toggle)
            .push(button(theme_label).on_press(Message::ToggleTheme));

        let title = self
            .current_title()
            .unwrap_or_else(|| "No article selected".to_string());

        column![controls, text(title).size(self.config.font_size as f32 + 6.0)]
            .spacing(10)
            .into()
    }

    fn file_list(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = match &self.catalog.status {
            CatalogStatus::Loading => text("Loading files...").color(MUTED_COLOR).into(),
            CatalogStatus::Failed(err) => text(format!("Could not load files: {err}"))
                .color(ERROR_COLOR)
                .into(),
            CatalogStatus::Loaded(files) if files.is_empty() => {
                text("No files for this language").color(MUTED_COLOR).into()
            }
            CatalogStatus::Loaded(files) => {
                let entries = files.iter().enumerate().fold(
                    Column::new().spacing(4),
                    |list, (idx, file_name)| {
                        let selected = self.catalog.selected.as_deref() == Some(file_name.as_str());
                        let entry = button(text(entry_label(idx, file_name)).wrapping(Wrapping::WordOrGlyph))
                            .width(Length::Fill)
                            .on_press(Message::FileSelected(file_name.clone()));
                        list.push(if selected {
                            entry.style(button::primary)
                        } else {
                            entry.style(button::text)
                        })
                    },
                );
                scrollable(entries).height(Length::Fill).into()
            }
        };

        column![text(format!("{} files", self.catalog.language.label())).size(18.0), body]
            .spacing(10)
            .into()
    }

    fn transcript_view(&self) -> Element<'_, Message> {
        match &self.transcript.status {
            TranscriptStatus::Empty => {
                return self.placeholder("Select a file to start reading.".into(), MUTED_COLOR);
            }
            TranscriptStatus::Loading => {
                return self.placeholder("Loading transcript...".into(), MUTED_COLOR);
            }
            TranscriptStatus::Failed(err) => {
                return self.placeholder(format!("Could not load transcript: {err}"), ERROR_COLOR);
            }
            TranscriptStatus::Ready => {}
        }
        let Some(view) = self.transcript.view.as_ref() else {
            return self.placeholder("Loading transcript...".into(), MUTED_COLOR);
        };
        if view.is_empty() {
            return self.placeholder("This transcript has no sentences.".into(), MUTED_COLOR);
        }

        let highlight = self.highlight_color();
        let spans: Vec<Span<'_, Message>> = view
            .units()
            .iter()
            .enumerate()
            .map(|(idx, unit)| {
                let mut span: Span<'_, Message> = Span::new(unit.label())
                    .size(self.config.font_size as f32)
                    .line_height(LineHeight::Relative(self.config.line_spacing))
                    .link(Message::SentenceClicked(idx));
                if unit.is_highlighted() {
                    span = span
                        .background(Background::Color(highlight))
                        .padding(Padding::from(2u16));
                }
                span
            })
            .collect();

        let rich: Rich<'_, Message> = Rich::with_spans(spans);
        let content = rich
            .width(Length::Fill)
            .wrapping(Wrapping::Word)
            .align_x(Horizontal::Left);

        scrollable(
            container(content)
                .width(Length::Fill)
                .padding([self.config.margin_vertical, self.config.margin_horizontal]),
        )
        .on_scroll(|viewport| Message::Scrolled {
            offset: viewport.relative_offset(),
            viewport_width: viewport.bounds().width,
            viewport_height: viewport.bounds().height,
            content_height: viewport.content_bounds().height,
        })
        .id(TEXT_SCROLL_ID.clone())
        .height(Length::Fill)
        .into()
    }

    fn placeholder(&self, message: String, color: Color) -> Element<'_, Message> {
        container(text(message).color(color))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding([self.config.margin_vertical, self.config.margin_horizontal])
            .into()
    }

    fn transport_bar(&self) -> Element<'_, Message> {
        let has_source = self.audio.controller.has_source();
        let playing = self.audio.controller.is_playing();
        let play_button = match (has_source, playing) {
            (true, true) => button("Pause").on_press(Message::Pause),
            (true, false) => button("Play").on_press(Message::Play),
            (false, _) => button("Play"),
        };

        let duration = self.audio.controller.duration();
        let clock = format!(
            "{} / {}",
            format_clock(self.audio.position),
            duration.map(format_clock).unwrap_or_else(|| "--:--".to_string())
        );

        let mut bar: Row<'_, Message> = row![play_button, text(clock)]
            .spacing(12)
            .align_y(Vertical::Center);

        match (has_source, duration) {
            (true, Some(total)) if total > 0.0 => {
                bar = bar.push(
                    slider(
                        0.0..=total as f32,
                        self.audio.position.min(total) as f32,
                        Message::SeekTo,
                    )
                    .step(0.1)
                    .width(Length::Fill),
                );
            }
            _ => bar = bar.push(horizontal_space()),
        }

        match &self.audio.status {
            AudioStatus::Loading => bar = bar.push(text("Loading audio...").color(MUTED_COLOR)),
            AudioStatus::Failed(err) => {
                bar = bar.push(text(format!("Audio unavailable: {err}")).color(ERROR_COLOR))
            }
            AudioStatus::Idle | AudioStatus::Ready => {}
        }

        bar = bar.push(
            row![
                text(format!("Volume {:.0}%", self.config.volume * 100.0)),
                slider(MIN_VOLUME..=MAX_VOLUME, self.config.volume, Message::SetVolume)
                    .step(0.01)
                    .width(Length::Fixed(140.0)),
            ]
            .spacing(8)
            .align_y(Vertical::Center),
        );

        container(bar).padding([4, 0]).into()
    }

    fn notebook_panel(&self) -> Element<'_, Message> {
        let title = self
            .current_title()
            .map(|title| format!("Notes: {title}"))
            .unwrap_or_else(|| "Notes".to_string());

        let body: Element<'_, Message> = match &self.notebook.status {
            NotebookStatus::Loading => text("Loading notes...").color(MUTED_COLOR).into(),
            NotebookStatus::Failed(err) => text(format!("Could not load notes: {err}"))
                .color(ERROR_COLOR)
                .into(),
            NotebookStatus::Ready => {
                let save = if self.notebook.is_saving() {
                    button("Saving...")
                } else {
                    button("Save").on_press(Message::SaveNotes)
                };
                let mut panel = column![
                    text("One word or phrase per line.").color(MUTED_COLOR),
                    text_editor(&self.notebook.content)
                        .on_action(Message::NotebookEdited)
                        .height(Length::Fill),
                    save,
                ]
                .spacing(8);
                if let Some(notice) = &self.notebook.notice {
                    let color = if notice.is_error {
                        ERROR_COLOR
                    } else {
                        SUCCESS_COLOR
                    };
                    panel = panel.push(text(notice.text.as_str()).color(color));
                }
                panel.into()
            }
        };

        container(
            column![
                row![
                    text(title).size(18.0),
                    horizontal_space(),
                    button("Close").on_press(Message::ToggleNotebook)
                ]
                .align_y(Vertical::Center),
                body
            ]
            .spacing(10)
            .height(Length::Fill),
        )
        .width(Length::Fixed(self.config.notebook_width))
        .height(Length::Fill)
        .padding(12)
        .into()
    }
}

/// `m:ss` for a playback position in seconds.
pub(super) fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_clock_positions() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(59.9), "0:59");
        assert_eq!(format_clock(61.0), "1:01");
        assert_eq!(format_clock(3725.0), "62:05");
        assert_eq!(format_clock(f64::NAN), "0:00");
        assert_eq!(format_clock(-3.0), "0:00");
    }

    #[test]
    fn view_builds_for_every_panel_state() {
        let (mut app, ctx) = crate::app::update::tests::loaded_app(&["a.mp3"]);
        let _ = app.view();
        app.reduce(Message::SubtitlesLoaded {
            ctx,
            result: Ok(crate::app::update::tests::sentences()),
        });
        app.reduce(Message::ToggleNotebook);
        app.reduce(Message::WindowResized {
            width: 480.0,
            height: 800.0,
        });
        app.reduce(Message::ToggleFileList);
        let _ = app.view();
    }
}

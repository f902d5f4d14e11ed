use super::super::state::{App, MAX_VOLUME, MIN_VOLUME};
use super::Effect;
use lingo_core::ClickOutcome;
use std::time::Instant;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_sentence_clicked(
        &mut self,
        idx: usize,
        now: Instant,
        effects: &mut Vec<Effect>,
    ) {
        let Some(view) = self.transcript.view.as_mut() else {
            return;
        };
        let generation = view.generation();
        match view.click(idx, now) {
            ClickOutcome::ArmTimer { unit, token, delay } => {
                debug!(unit, token, "Armed click timer");
                effects.push(Effect::ArmClickTimer {
                    generation,
                    unit,
                    token,
                    delay,
                });
            }
            ClickOutcome::CancelAndPause { cancelled } => {
                info!(cancelled = cancelled.len(), "Double click; pausing");
                self.transcript.drop_timers(&cancelled);
                self.audio.pending_seek = None;
                self.audio.pending_play = false;
                effects.push(Effect::Pause);
            }
            ClickOutcome::Ignored => {}
        }
    }

    pub(super) fn handle_click_window_elapsed(
        &mut self,
        generation: u64,
        unit: usize,
        token: u64,
        effects: &mut Vec<Effect>,
    ) {
        self.transcript.timers.remove(&token);
        let Some(view) = self.transcript.view.as_mut() else {
            return;
        };
        let Some(start) = view.resolve_timer(generation, unit, token) else {
            debug!(generation, unit, token, "Ignoring stale click timer");
            return;
        };

        info!(unit, start, "Seeking to clicked sentence");
        let newly_active = view.sync(start);
        self.audio.position = start;
        if self.audio.controller.has_source() {
            effects.push(Effect::Seek(start));
            effects.push(Effect::Play);
        } else {
            self.audio.pending_seek = Some(start);
            self.audio.pending_play = true;
        }
        self.follow_newly_active(&newly_active, effects);
    }

    pub(super) fn handle_play(&mut self, effects: &mut Vec<Effect>) {
        if self.audio.controller.has_source() {
            effects.push(Effect::Play);
        } else if self.audio.is_loading() {
            self.audio.pending_play = true;
        }
    }

    pub(super) fn handle_pause(&mut self, effects: &mut Vec<Effect>) {
        self.audio.pending_play = false;
        effects.push(Effect::Pause);
    }

    pub(super) fn handle_toggle_play_pause(&mut self, effects: &mut Vec<Effect>) {
        if !self.audio.controller.has_source() {
            return;
        }
        if self.audio.controller.is_playing() {
            effects.push(Effect::Pause);
        } else {
            effects.push(Effect::Play);
        }
    }

    pub(super) fn handle_seek_to(&mut self, seconds: f64, effects: &mut Vec<Effect>) {
        if !self.audio.controller.has_source() {
            return;
        }
        effects.push(Effect::Seek(seconds));
        if let Some(view) = self.transcript.view.as_mut() {
            let newly_active = view.sync(seconds);
            self.follow_newly_active(&newly_active, effects);
        }
    }

    pub(super) fn handle_set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(MIN_VOLUME, MAX_VOLUME);
        self.config.volume = volume;
        self.audio.controller.set_volume(volume);
    }

    /// Time update: read the position and resync the highlight.
    pub(super) fn handle_tick(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        if self.audio.controller.poll_end(now) {
            debug!("Playback reached the end of the track");
        }
        if !self.audio.controller.has_source() {
            return;
        }
        let position = self.audio.controller.position(now);
        self.audio.position = position;
        if let Some(view) = self.transcript.view.as_mut() {
            let newly_active = view.sync(position);
            self.follow_newly_active(&newly_active, effects);
        }
    }

    /// Start playback. Failures (no device, no source) are logged only.
    pub(in crate::app) fn play_audio(&mut self) {
        match self.audio.controller.play(Instant::now()) {
            Ok(()) => info!(position = self.audio.position, "Playback started"),
            Err(err) => warn!("Audio playback was blocked: {err:#}"),
        }
    }

    pub(in crate::app) fn pause_audio(&mut self) {
        let now = Instant::now();
        self.audio.controller.pause(now);
        self.audio.position = self.audio.controller.position(now);
    }

    pub(in crate::app) fn seek_audio(&mut self, seconds: f64) {
        let now = Instant::now();
        if let Err(err) = self.audio.controller.seek(seconds, now) {
            warn!(seconds, "Seek failed: {err:#}");
        }
        self.audio.position = self.audio.controller.position(now);
    }
}

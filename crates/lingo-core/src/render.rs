//! Display units for a transcript and the click state machine attached to them.
//!
//! A single click on a unit schedules a seek to that unit's start which only
//! fires once the double-click window has passed. A second click inside the
//! window, on any unit, drops every pending seek and asks for a pause instead.
//! The caller owns the actual timer: `click` says when to arm one and
//! `resolve_timer` decides whether a fired timer still counts.

use crate::model::Sentence;
use crate::text_utils::collapse_whitespace;
use std::time::{Duration, Instant};

pub const DEFAULT_DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickState {
    Idle,
    PendingSeek { token: u64 },
}

/// On-screen representation of one sentence.
#[derive(Debug, Clone)]
pub struct DisplayUnit {
    pub(crate) sentence: Sentence,
    pub(crate) label: String,
    pub(crate) highlighted: bool,
    pub(crate) click: ClickState,
}

impl DisplayUnit {
    fn new(sentence: Sentence) -> Self {
        let label = format!("{} ", collapse_whitespace(&sentence.text));
        Self {
            sentence,
            label,
            highlighted: false,
            click: ClickState::Idle,
        }
    }

    /// Text as rendered, including the trailing separator.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn start(&self) -> f64 {
        self.sentence.start
    }

    pub fn end(&self) -> f64 {
        self.sentence.end
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn click_state(&self) -> ClickState {
        self.click
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Arm a timer for `delay`; when it fires, pass `token` to `resolve_timer`.
    ArmTimer {
        unit: usize,
        token: u64,
        delay: Duration,
    },
    /// Second click inside the window. `cancelled` lists the dropped tokens.
    CancelAndPause { cancelled: Vec<u64> },
    Ignored,
}

/// The rendered transcript for one load. Replaced wholesale on every load;
/// `generation` identifies which load a timer belongs to.
#[derive(Debug, Clone)]
pub struct SubtitleView {
    pub(crate) generation: u64,
    pub(crate) units: Vec<DisplayUnit>,
    window: Duration,
    last_click: Option<Instant>,
    next_token: u64,
}

impl SubtitleView {
    pub fn render(generation: u64, sentences: Vec<Sentence>, window: Duration) -> Self {
        Self {
            generation,
            units: sentences.into_iter().map(DisplayUnit::new).collect(),
            window,
            last_click: None,
            next_token: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn units(&self) -> &[DisplayUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Register a click on `idx` at `now`.
    pub fn click(&mut self, idx: usize, now: Instant) -> ClickOutcome {
        if idx >= self.units.len() {
            return ClickOutcome::Ignored;
        }

        let within_window = self
            .last_click
            .map(|previous| now.saturating_duration_since(previous) < self.window)
            .unwrap_or(false);
        self.last_click = Some(now);

        if within_window {
            return ClickOutcome::CancelAndPause {
                cancelled: self.cancel_pending(),
            };
        }

        self.next_token = self.next_token.wrapping_add(1);
        let token = self.next_token;
        self.units[idx].click = ClickState::PendingSeek { token };
        ClickOutcome::ArmTimer {
            unit: idx,
            token,
            delay: self.window,
        }
    }

    /// A click timer fired. Returns the seek target when the timer is still the
    /// pending one for that unit in this generation.
    pub fn resolve_timer(&mut self, generation: u64, idx: usize, token: u64) -> Option<f64> {
        if generation != self.generation {
            return None;
        }
        let unit = self.units.get_mut(idx)?;
        match unit.click {
            ClickState::PendingSeek { token: pending } if pending == token => {
                unit.click = ClickState::Idle;
                Some(unit.sentence.start)
            }
            _ => None,
        }
    }

    /// Drop every pending seek, returning the tokens that were cancelled.
    pub fn cancel_pending(&mut self) -> Vec<u64> {
        self.units
            .iter_mut()
            .filter_map(|unit| match unit.click {
                ClickState::PendingSeek { token } => {
                    unit.click = ClickState::Idle;
                    Some(token)
                }
                ClickState::Idle => None,
            })
            .collect()
    }

    pub fn has_pending(&self) -> bool {
        self.units
            .iter()
            .any(|unit| matches!(unit.click, ClickState::PendingSeek { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> SubtitleView {
        SubtitleView::render(
            7,
            vec![
                Sentence::new("One.", 0.0, 1.0),
                Sentence::new("Two\n  lines.", 1.0, 2.0),
                Sentence::new("Three.", 2.0, 3.5),
            ],
            DEFAULT_DOUBLE_CLICK_WINDOW,
        )
    }

    #[test]
    fn renders_one_unit_per_sentence_in_order() {
        let view = view();
        let labels: Vec<&str> = view.units().iter().map(DisplayUnit::label).collect();
        assert_eq!(labels, vec!["One. ", "Two lines. ", "Three. "]);
        assert_eq!(view.units()[2].start(), 2.0);
        assert_eq!(view.units()[2].end(), 3.5);
        assert!(view.units().iter().all(|unit| !unit.is_highlighted()));
    }

    #[test]
    fn isolated_click_seeks_exactly_once() {
        let mut view = view();
        let now = Instant::now();
        let ClickOutcome::ArmTimer { unit, token, delay } = view.click(2, now) else {
            panic!("expected timer");
        };
        assert_eq!((unit, delay), (2, DEFAULT_DOUBLE_CLICK_WINDOW));
        assert_eq!(view.resolve_timer(7, 2, token), Some(2.0));
        assert_eq!(view.resolve_timer(7, 2, token), None);
        assert_eq!(view.units()[2].click_state(), ClickState::Idle);
    }

    #[test]
    fn double_click_on_same_unit_cancels_seek_and_pauses() {
        let mut view = view();
        let now = Instant::now();
        let ClickOutcome::ArmTimer { token, .. } = view.click(1, now) else {
            panic!("expected timer");
        };
        let second = view.click(1, now + Duration::from_millis(120));
        assert_eq!(
            second,
            ClickOutcome::CancelAndPause {
                cancelled: vec![token]
            }
        );
        assert_eq!(view.resolve_timer(7, 1, token), None);
        assert!(!view.has_pending());
    }

    #[test]
    fn second_click_on_other_unit_also_cancels() {
        let mut view = view();
        let now = Instant::now();
        let ClickOutcome::ArmTimer { token, .. } = view.click(0, now) else {
            panic!("expected timer");
        };
        let second = view.click(2, now + Duration::from_millis(200));
        assert!(matches!(second, ClickOutcome::CancelAndPause { .. }));
        assert_eq!(view.resolve_timer(7, 0, token), None);
        assert_eq!(view.units()[2].click_state(), ClickState::Idle);
    }

    #[test]
    fn clicks_outside_window_are_independent() {
        let mut view = view();
        let now = Instant::now();
        let first = view.click(0, now);
        let ClickOutcome::ArmTimer { token: first_token, .. } = first else {
            panic!("expected timer");
        };
        assert_eq!(view.resolve_timer(7, 0, first_token), Some(0.0));

        let second = view.click(1, now + Duration::from_millis(400));
        let ClickOutcome::ArmTimer { token: second_token, .. } = second else {
            panic!("expected timer");
        };
        assert_ne!(first_token, second_token);
        assert_eq!(view.resolve_timer(7, 1, second_token), Some(1.0));
    }

    #[test]
    fn timer_from_previous_render_never_fires() {
        let mut old = view();
        let ClickOutcome::ArmTimer { token, .. } = old.click(0, Instant::now()) else {
            panic!("expected timer");
        };
        let mut fresh = SubtitleView::render(
            8,
            vec![Sentence::new("New.", 0.0, 1.0)],
            DEFAULT_DOUBLE_CLICK_WINDOW,
        );
        assert_eq!(fresh.resolve_timer(7, 0, token), None);
    }

    #[test]
    fn click_past_end_is_ignored() {
        let mut view = view();
        assert_eq!(view.click(9, Instant::now()), ClickOutcome::Ignored);
    }
}

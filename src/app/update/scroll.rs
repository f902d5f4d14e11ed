use super::super::state::App;
use super::Effect;
use iced::widget::scrollable::RelativeOffset;
use lingo_core::{ScrollAnimation, UnitBounds};
use std::time::{Duration, Instant};
use tracing::debug;

impl App {
    pub(super) fn handle_scrolled(
        &mut self,
        offset: RelativeOffset,
        viewport_width: f32,
        viewport_height: f32,
        content_height: f32,
    ) {
        let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let viewport = &mut self.layout.viewport;
        viewport.height = sanitize(viewport_height);
        viewport.content_height = sanitize(content_height);
        let fraction = if offset.y.is_finite() {
            offset.y.clamp(0.0, 1.0)
        } else {
            0.0
        };
        viewport.scroll_top = fraction * viewport.max_scroll();
        self.layout.viewport_width = sanitize(viewport_width);
    }

    /// Scroll toward the last newly active unit that sits near a viewport
    /// edge.
    pub(super) fn follow_newly_active(&mut self, newly_active: &[usize], effects: &mut Vec<Effect>) {
        let policy = self.scroll_policy();
        let viewport = self.layout.viewport;
        let Some(target) = newly_active
            .iter()
            .filter_map(|idx| self.estimated_unit_bounds(*idx))
            .filter_map(|bounds| policy.scroll_target(bounds, viewport))
            .last()
        else {
            return;
        };

        let duration = Duration::from_millis(self.config.smooth_scroll_ms);
        if duration.is_zero() {
            effects.push(Effect::ScrollTo(RelativeOffset {
                x: 0.0,
                y: viewport.relative(target),
            }));
            return;
        }
        let now = Instant::now();
        let from = self
            .layout
            .animation
            .map(|animation| animation.sample(now))
            .unwrap_or(viewport.scroll_top);
        debug!(from, target, "Scrolling active sentence into view");
        self.layout.animation = Some(ScrollAnimation::new(from, target, now, duration));
    }

    pub(super) fn handle_animation_frame(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        let Some(animation) = self.layout.animation else {
            return;
        };
        let y = animation.sample(now);
        if animation.is_finished(now) {
            self.layout.animation = None;
        }
        effects.push(Effect::ScrollTo(RelativeOffset {
            x: 0.0,
            y: self.layout.viewport.relative(y),
        }));
    }

    /// Vertical extent of a unit in the transcript, estimated from how many
    /// characters fit on a line.
    pub(super) fn estimated_unit_bounds(&self, idx: usize) -> Option<UnitBounds> {
        let units = self.transcript.view.as_ref()?.units();
        if idx >= units.len() {
            return None;
        }
        let chars_per_line = (self.estimated_text_width() / self.estimated_glyph_width_px())
            .floor()
            .max(8.0) as usize;
        let line_height = self.config.font_size.max(1) as f32 * self.config.line_spacing;
        let top_padding = self.config.margin_vertical as f32;

        let before: usize = units[..idx]
            .iter()
            .map(|unit| unit.label().chars().count())
            .sum();
        let length = units[idx].label().chars().count().max(1);
        let first_line = before / chars_per_line;
        let last_line = (before + length - 1) / chars_per_line;

        Some(UnitBounds {
            top: top_padding + first_line as f32 * line_height,
            bottom: top_padding + (last_line + 1) as f32 * line_height,
        })
    }

    fn estimated_text_width(&self) -> f32 {
        let width = if self.layout.viewport_width > 0.0 {
            self.layout.viewport_width
        } else {
            let mut fallback = self.layout.window_width.max(1.0);
            if !self.is_narrow() {
                fallback -= self.config.file_panel_width;
            }
            if self.notebook.open {
                fallback -= self.config.notebook_width;
            }
            fallback.max(1.0)
        };
        let margin_total = (self.config.margin_horizontal as f32 * 2.0).min(width * 0.9);
        (width - margin_total).max(1.0)
    }

    fn estimated_glyph_width_px(&self) -> f32 {
        (self.config.font_size.max(1) as f32 * 0.55).max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::messages::Message;
    use super::super::core::tests::loaded_app;
    use super::*;
    use lingo_core::Sentence;

    fn long_transcript() -> App {
        let (mut app, ctx) = loaded_app(&["lang.mp3"]);
        let sentences = (0..120)
            .map(|i| {
                Sentence::new(
                    format!("Sentence number {i} keeps the reader busy for a while."),
                    i as f64 * 2.0,
                    i as f64 * 2.0 + 2.0,
                )
            })
            .collect();
        app.reduce(Message::SubtitlesLoaded {
            ctx,
            result: Ok(sentences),
        });
        app.reduce(Message::Scrolled {
            offset: RelativeOffset::START,
            viewport_width: 848.0,
            viewport_height: 600.0,
            content_height: 6000.0,
        });
        app
    }

    #[test]
    fn bounds_grow_monotonically() {
        let app = long_transcript();
        let mut previous = -1.0f32;
        for idx in 0..120 {
            let bounds = app.estimated_unit_bounds(idx).expect("bounds");
            assert!(bounds.top >= previous);
            assert!(bounds.bottom > bounds.top);
            previous = bounds.top;
        }
        assert!(app.estimated_unit_bounds(120).is_none());
    }

    #[test]
    fn visible_unit_does_not_start_animation() {
        let mut app = long_transcript();
        let mut effects = Vec::new();
        app.follow_newly_active(&[3], &mut effects);
        assert!(app.layout.animation.is_none());
        assert!(effects.is_empty());
    }

    #[test]
    fn distant_unit_is_scrolled_into_view() {
        let mut app = long_transcript();
        let mut effects = Vec::new();
        app.follow_newly_active(&[80], &mut effects);
        let animation = app.layout.animation.expect("animation");
        let bounds = app.estimated_unit_bounds(80).expect("bounds");
        let centre = (bounds.top + bounds.bottom) * 0.5;
        assert!((animation.target() - (centre - 300.0)).abs() < 0.5);
    }

    #[test]
    fn last_unit_needing_a_scroll_wins() {
        let mut app = long_transcript();
        let mut effects = Vec::new();
        app.follow_newly_active(&[60, 3, 90], &mut effects);
        let animation = app.layout.animation.expect("animation");
        let bounds = app.estimated_unit_bounds(90).expect("bounds");
        let centre = (bounds.top + bounds.bottom) * 0.5;
        assert!((animation.target() - (centre - 300.0)).abs() < 0.5);
    }

    #[test]
    fn animation_frames_snap_and_finish() {
        let mut app = long_transcript();
        let mut effects = Vec::new();
        app.follow_newly_active(&[80], &mut effects);
        let later = Instant::now() + Duration::from_secs(1);
        app.handle_animation_frame(later, &mut effects);
        assert!(app.layout.animation.is_none());
        assert!(matches!(effects.as_slice(), [Effect::ScrollTo(offset)] if offset.y > 0.0));
    }

    #[test]
    fn instant_scroll_when_smoothing_is_disabled() {
        let mut app = long_transcript();
        app.config.smooth_scroll_ms = 0;
        let mut effects = Vec::new();
        app.follow_newly_active(&[80], &mut effects);
        assert!(app.layout.animation.is_none());
        assert_eq!(effects.len(), 1);
    }
}

//! Highlight synchronization between playback time and display units, plus the
//! scroll policy that keeps the active unit in view.

use crate::render::SubtitleView;
use std::time::{Duration, Instant};

pub const DEFAULT_EDGE_TOP_PX: f32 = 100.0;
pub const DEFAULT_EDGE_BOTTOM_PX: f32 = 150.0;

impl SubtitleView {
    /// Highlight exactly the units whose interval contains `t` and return the
    /// ones that were not highlighted before. Safe to call at any rate.
    pub fn sync(&mut self, t: f64) -> Vec<usize> {
        let mut newly_active = Vec::new();
        for (idx, unit) in self.units.iter_mut().enumerate() {
            let was_active = unit.highlighted;
            unit.highlighted = unit.sentence.contains(t);
            if unit.highlighted && !was_active {
                newly_active.push(idx);
            }
        }
        newly_active
    }

    pub fn active_indices(&self) -> Vec<usize> {
        self.units
            .iter()
            .enumerate()
            .filter_map(|(idx, unit)| unit.highlighted.then_some(idx))
            .collect()
    }
}

/// Scroll state of the transcript, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll_top: f32,
    pub height: f32,
    pub content_height: f32,
}

impl Viewport {
    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.height).max(0.0)
    }

    /// Scroll position as a fraction of the scrollable range.
    pub fn relative(&self, scroll_top: f32) -> f32 {
        let range = self.max_scroll();
        if range <= f32::EPSILON {
            0.0
        } else {
            (scroll_top / range).clamp(0.0, 1.0)
        }
    }
}

/// Vertical extent of a unit in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitBounds {
    pub top: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPolicy {
    pub edge_top: f32,
    pub edge_bottom: f32,
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self {
            edge_top: DEFAULT_EDGE_TOP_PX,
            edge_bottom: DEFAULT_EDGE_BOTTOM_PX,
        }
    }
}

impl ScrollPolicy {
    /// Whether the unit sits close to (or beyond) either viewport edge.
    pub fn needs_recentering(&self, bounds: UnitBounds, viewport: Viewport) -> bool {
        let top = bounds.top - viewport.scroll_top;
        let bottom = bounds.bottom - viewport.scroll_top;
        top < self.edge_top || bottom > viewport.height - self.edge_bottom
    }

    pub fn centered_scroll_top(&self, bounds: UnitBounds, viewport: Viewport) -> f32 {
        let center = (bounds.top + bounds.bottom) * 0.5;
        (center - viewport.height * 0.5).clamp(0.0, viewport.max_scroll())
    }

    /// Scroll position that centres the unit, or `None` when it is comfortably
    /// visible, the viewport is not measured yet, or the view cannot move.
    pub fn scroll_target(&self, bounds: UnitBounds, viewport: Viewport) -> Option<f32> {
        if viewport.height <= 0.0 || !self.needs_recentering(bounds, viewport) {
            return None;
        }
        let target = self.centered_scroll_top(bounds, viewport);
        ((target - viewport.scroll_top).abs() >= 0.5).then_some(target)
    }
}

/// Ease-out scroll from one position to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    pub fn new(from: f32, to: f32, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn sample(&self, now: Instant) -> f32 {
        let progress = self.progress(now);
        let eased = 1.0 - (1.0 - progress).powi(3);
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sentence;
    use crate::render::DEFAULT_DOUBLE_CLICK_WINDOW;

    fn sorted() -> Vec<Sentence> {
        vec![
            Sentence::new("a", 0.0, 1.0),
            Sentence::new("b", 1.0, 2.0),
            Sentence::new("c", 2.5, 4.0),
        ]
    }

    fn matching(sentences: &[Sentence], t: f64) -> Vec<usize> {
        sentences
            .iter()
            .enumerate()
            .filter_map(|(idx, sentence)| sentence.contains(t).then_some(idx))
            .collect()
    }

    fn view(sentences: Vec<Sentence>) -> SubtitleView {
        SubtitleView::render(1, sentences, DEFAULT_DOUBLE_CLICK_WINDOW)
    }

    #[test]
    fn activates_exactly_matching_sentences() {
        let mut view = view(sorted());
        for step in 0..50 {
            let t = step as f64 * 0.1;
            view.sync(t);
            assert_eq!(view.active_indices(), matching(&sorted(), t), "t={t}");
            assert!(view.active_indices().len() <= 1);
        }
    }

    #[test]
    fn boundary_belongs_to_next_sentence() {
        let mut view = view(sorted());
        assert_eq!(view.sync(1.0), vec![1]);
        assert_eq!(view.active_indices(), vec![1]);
    }

    #[test]
    fn gap_clears_every_highlight() {
        let mut view = view(sorted());
        view.sync(1.5);
        assert!(view.sync(2.2).is_empty());
        assert!(view.active_indices().is_empty());
    }

    #[test]
    fn repeated_sync_is_stable() {
        let mut view = view(sorted());
        assert_eq!(view.sync(3.0), vec![2]);
        assert!(view.sync(3.0).is_empty());
        assert_eq!(view.active_indices(), vec![2]);
    }

    #[test]
    fn overlapping_input_highlights_all_matches() {
        let mut view = view(vec![
            Sentence::new("a", 0.0, 2.0),
            Sentence::new("b", 1.0, 3.0),
            Sentence::new("c", 5.0, 6.0),
        ]);
        assert_eq!(view.sync(1.5), vec![0, 1]);
        assert_eq!(view.sync(2.5), Vec::<usize>::new());
        assert_eq!(view.active_indices(), vec![1]);
    }

    #[test]
    fn nan_time_matches_nothing() {
        let mut view = view(sorted());
        view.sync(0.5);
        view.sync(f64::NAN);
        assert!(view.active_indices().is_empty());
    }

    #[test]
    fn sync_leaves_click_state_alone() {
        let mut view = view(sorted());
        let _ = view.click(0, Instant::now());
        view.sync(0.5);
        assert!(view.has_pending());
    }

    fn viewport(scroll_top: f32) -> Viewport {
        Viewport {
            scroll_top,
            height: 600.0,
            content_height: 3000.0,
        }
    }

    #[test]
    fn comfortably_visible_unit_is_not_scrolled() {
        let policy = ScrollPolicy::default();
        let bounds = UnitBounds {
            top: 1300.0,
            bottom: 1330.0,
        };
        assert_eq!(policy.scroll_target(bounds, viewport(1000.0)), None);
    }

    #[test]
    fn unit_near_bottom_edge_is_centred() {
        let policy = ScrollPolicy::default();
        let bounds = UnitBounds {
            top: 1440.0,
            bottom: 1470.0,
        };
        let target = policy
            .scroll_target(bounds, viewport(1000.0))
            .expect("scroll");
        assert!((target - 1155.0).abs() < 0.01);
    }

    #[test]
    fn unit_near_top_edge_is_centred() {
        let policy = ScrollPolicy::default();
        let bounds = UnitBounds {
            top: 1050.0,
            bottom: 1080.0,
        };
        let target = policy
            .scroll_target(bounds, viewport(1000.0))
            .expect("scroll");
        assert!((target - 765.0).abs() < 0.01);
    }

    #[test]
    fn target_is_clamped_to_scroll_range() {
        let policy = ScrollPolicy::default();
        let first_line = UnitBounds {
            top: 16.0,
            bottom: 44.0,
        };
        assert_eq!(policy.scroll_target(first_line, viewport(0.0)), None);
        assert_eq!(policy.scroll_target(first_line, viewport(400.0)), Some(0.0));
    }

    #[test]
    fn unmeasured_viewport_never_scrolls() {
        let policy = ScrollPolicy::default();
        let bounds = UnitBounds {
            top: 5000.0,
            bottom: 5030.0,
        };
        assert_eq!(policy.scroll_target(bounds, Viewport::default()), None);
    }

    #[test]
    fn relative_offset_uses_scrollable_range() {
        let viewport = viewport(0.0);
        assert_eq!(viewport.relative(1200.0), 0.5);
        assert_eq!(viewport.relative(9000.0), 1.0);
        let short = Viewport {
            scroll_top: 0.0,
            height: 600.0,
            content_height: 300.0,
        };
        assert_eq!(short.relative(50.0), 0.0);
    }

    #[test]
    fn animation_eases_to_target() {
        let start = Instant::now();
        let animation = ScrollAnimation::new(0.0, 300.0, start, Duration::from_millis(300));
        assert_eq!(animation.sample(start), 0.0);
        let midway = animation.sample(start + Duration::from_millis(150));
        assert!(midway > 150.0 && midway < 300.0);
        assert_eq!(animation.sample(start + Duration::from_millis(400)), 300.0);
        assert!(animation.is_finished(start + Duration::from_millis(300)));
    }

    #[test]
    fn zero_length_animation_jumps() {
        let start = Instant::now();
        let animation = ScrollAnimation::new(10.0, 90.0, start, Duration::ZERO);
        assert_eq!(animation.sample(start), 90.0);
        assert!(animation.is_finished(start));
    }
}

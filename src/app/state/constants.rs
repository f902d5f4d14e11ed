use iced::Color;
use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;

/// Limits for user-tunable values.
pub(crate) const MIN_VOLUME: f32 = 0.0;
pub(crate) const MAX_VOLUME: f32 = 2.0;
pub(crate) const MIN_FONT_SIZE: u32 = 10;
pub(crate) const MAX_FONT_SIZE: u32 = 48;
pub(crate) const MAX_MARGIN: u16 = 400;
pub(crate) const MIN_TIME_UPDATE_MS: u64 = 20;
pub(crate) const MAX_DOUBLE_CLICK_WINDOW_MS: u64 = 2_000;
pub(crate) const MAX_SMOOTH_SCROLL_MS: u64 = 5_000;
pub(crate) const ANIMATION_FRAME_MS: u64 = 16;
pub(crate) const SIGNAL_POLL_MS: u64 = 200;
pub(crate) const ERROR_COLOR: Color = Color::from_rgb(0xef as f32 / 255.0, 0x44 as f32 / 255.0, 0x44 as f32 / 255.0);
pub(crate) const SUCCESS_COLOR: Color = Color::from_rgb(0x22 as f32 / 255.0, 0xc5 as f32 / 255.0, 0x5e as f32 / 255.0);
pub(crate) const MUTED_COLOR: Color = Color::from_rgb(0x8a as f32 / 255.0, 0x8f as f32 / 255.0, 0x98 as f32 / 255.0);
pub(crate) const BACKDROP_COLOR: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.45,
};
pub(crate) static TEXT_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("transcript-scroll"));

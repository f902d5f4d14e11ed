//! Headless core of the language-learning player.
//!
//! Everything here is independent of the GUI toolkit and the audio backend:
//! - `model`: sentences, languages and the per-load selection context.
//! - `api`: HTTP client for the catalog, subtitle, audio and notes endpoints.
//! - `render`: display units with single/double click disambiguation.
//! - `sync`: playback-time highlight synchronization and scroll policy.
//! - `notes`: notebook buffer parsing.
//! - `text_utils`: article title derivation.

pub mod api;
pub mod model;
pub mod notes;
pub mod render;
pub mod sync;
pub mod text_utils;

pub use api::{ApiClient, ApiError};
pub use model::{CatalogTicket, Language, LoadContext, Sentence, SelectionTracker};
pub use render::{ClickOutcome, ClickState, DisplayUnit, SubtitleView};
pub use sync::{ScrollAnimation, ScrollPolicy, UnitBounds, Viewport};

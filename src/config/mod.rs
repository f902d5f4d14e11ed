//! Configuration loading for the reader.
//!
//! Settings live in `conf/config.toml` grouped into tables. Missing tables,
//! missing keys and unreadable files all fall back to defaults so the window
//! can still open.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, parse_config, serialize_config};
pub use models::{AppConfig, HighlightColor, LogLevel, ThemeMode};

//! Display helpers for article names and subtitle text.

use once_cell::sync::Lazy;
use regex::Regex;

static EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.[^/.]+$").expect("extension regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Article title shown above the transcript: the file name without its
/// extension.
pub fn article_title(file_name: &str) -> String {
    EXTENSION.replace(file_name, "").into_owned()
}

/// Collapse runs of whitespace (subtitle lines often carry hard breaks).
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_last_extension_only() {
        assert_eq!(article_title("lesson-01.mp3"), "lesson-01");
        assert_eq!(article_title("news.2024.05.mp3"), "news.2024.05");
        assert_eq!(article_title("plain"), "plain");
    }

    #[test]
    fn keeps_dots_inside_directories() {
        assert_eq!(article_title("v1.2/readme"), "v1.2/readme");
    }

    #[test]
    fn collapses_line_breaks() {
        assert_eq!(collapse_whitespace("  Guten\n  Morgen\t!  "), "Guten Morgen !");
    }
}

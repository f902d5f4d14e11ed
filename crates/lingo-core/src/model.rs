use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One timed subtitle unit. `start` is inclusive, `end` exclusive, both in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Sentence {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Whether playback time `t` falls inside `[start, end)`.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }
}

/// Languages the catalog is organised by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    German,
    French,
    Spanish,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::German,
        Language::French,
        Language::Spanish,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::German => "german",
            Language::French => "french",
            Language::Spanish => "spanish",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::German => "German",
            Language::French => "French",
            Language::Spanish => "Spanish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language `{0}` (expected english, german, french or spanish)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str() == normalized)
            .ok_or_else(|| UnknownLanguage(raw.to_string()))
    }
}

/// Immutable description of one article load. Every subtitle and audio request
/// carries the context it was issued for so late replies can be recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadContext {
    pub request_id: u64,
    pub language: Language,
    pub file_name: String,
}

impl LoadContext {
    /// Key used by the notes endpoint for this article.
    pub fn article_id(&self) -> String {
        article_id(self.language, &self.file_name)
    }
}

/// `{language}-{file_name}`. Servers decode `%2F` before routing, so the key
/// never carries a `/`.
pub fn article_id(language: Language, file_name: &str) -> String {
    format!("{}-{}", language.as_str(), file_name.replace('/', "_"))
}

/// Tag for one catalog request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogTicket {
    pub request_id: u64,
    pub language: Language,
}

/// Hands out request ids and remembers which catalog/article request is live.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    next_id: u64,
    catalog: Option<CatalogTicket>,
    article: Option<LoadContext>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn mint(&mut self) -> u64 {
        self.next_id = self.next_id.wrapping_add(1);
        self.next_id
    }

    /// Start a catalog fetch. Any article selection from the previous
    /// language stops being current.
    pub fn begin_catalog(&mut self, language: Language) -> CatalogTicket {
        let ticket = CatalogTicket {
            request_id: self.mint(),
            language,
        };
        self.catalog = Some(ticket);
        self.article = None;
        ticket
    }

    pub fn begin_article(&mut self, language: Language, file_name: impl Into<String>) -> LoadContext {
        let ctx = LoadContext {
            request_id: self.mint(),
            language,
            file_name: file_name.into(),
        };
        self.article = Some(ctx.clone());
        ctx
    }

    pub fn is_current_catalog(&self, ticket: &CatalogTicket) -> bool {
        self.catalog.as_ref() == Some(ticket)
    }

    pub fn is_current(&self, ctx: &LoadContext) -> bool {
        self.article.as_ref() == Some(ctx)
    }

    pub fn current(&self) -> Option<&LoadContext> {
        self.article.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language_case_insensitively() {
        assert_eq!(" German ".parse::<Language>(), Ok(Language::German));
        assert_eq!("SPANISH".parse::<Language>(), Ok(Language::Spanish));
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn sentence_interval_is_half_open() {
        let sentence = Sentence::new("Hallo.", 1.0, 2.5);
        assert!(!sentence.contains(0.999));
        assert!(sentence.contains(1.0));
        assert!(sentence.contains(2.499));
        assert!(!sentence.contains(2.5));
        assert!(!sentence.contains(f64::NAN));
    }

    #[test]
    fn sentence_ignores_extra_fields() {
        let parsed: Sentence =
            serde_json::from_str(r#"{"index":"3","text":"Hi.","start":1.5,"end":2.0}"#)
                .expect("sentence json");
        assert_eq!(parsed, Sentence::new("Hi.", 1.5, 2.0));
    }

    #[test]
    fn newer_article_makes_older_context_stale() {
        let mut tracker = SelectionTracker::new();
        let first = tracker.begin_article(Language::English, "a");
        let second = tracker.begin_article(Language::English, "b");
        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));
    }

    #[test]
    fn reselecting_same_file_still_invalidates_previous_request() {
        let mut tracker = SelectionTracker::new();
        let first = tracker.begin_article(Language::French, "x");
        let again = tracker.begin_article(Language::French, "x");
        assert_ne!(first.request_id, again.request_id);
        assert!(!tracker.is_current(&first));
    }

    #[test]
    fn catalog_switch_drops_article() {
        let mut tracker = SelectionTracker::new();
        let ctx = tracker.begin_article(Language::English, "a");
        let ticket = tracker.begin_catalog(Language::German);
        assert!(!tracker.is_current(&ctx));
        assert!(tracker.is_current_catalog(&ticket));
        assert!(tracker.current().is_none());
    }

    #[test]
    fn article_id_joins_language_and_file() {
        let mut tracker = SelectionTracker::new();
        let ctx = tracker.begin_article(Language::Spanish, "el gato");
        assert_eq!(ctx.article_id(), "spanish-el gato");
        assert_eq!(article_id(Language::German, "a/b.mp3"), "german-a_b.mp3");
        assert!(!article_id(Language::English, "x/y/z").contains('/'));
    }
}

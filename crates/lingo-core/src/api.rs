//! HTTP client for the article server.
//!
//! The server exposes five endpoints relative to a base URL:
//! - `GET /files?lang={language}` lists article names.
//! - `GET /subtitle/{language}/{file}` returns the timed sentences.
//! - `GET /audio/{language}/{file}` streams the audio track.
//! - `GET /api/notes/{article}` and `POST /api/notes/{article}` read and
//!   replace the vocabulary notes of one article.
//!
//! Path segments are percent-encoded, so file names and article ids may
//! contain spaces or slashes.

use crate::model::{Language, Sentence};
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid server url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: StatusCode },
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("server reported: {0}")]
    Server(String),
}

#[derive(Debug, Deserialize)]
struct FilesResponse {
    #[serde(default)]
    files: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct NotesResponse {
    #[serde(default)]
    words: Vec<String>,
}

/// The subtitle endpoint answers either the sentence array or an error object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SubtitlePayload {
    Sentences(Vec<Sentence>),
    Failure { error: String },
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;
        info!(base_url = %base_url, timeout_secs = timeout.as_secs_f32(), "Created API client");
        Ok(Self { http, base_url })
    }

    /// `GET /files?lang={language}`; order is preserved.
    pub async fn list_files(&self, language: Language) -> Result<Vec<String>, ApiError> {
        let mut url = self.endpoint(&["files"])?;
        url.query_pairs_mut().append_pair("lang", language.as_str());
        let response = self.get(url.clone()).await?;
        let body: FilesResponse = decode(response, &url).await?;
        debug!(%language, count = body.files.len(), "Fetched file catalog");
        Ok(body.files)
    }

    /// `GET /subtitle/{language}/{file}`.
    pub async fn load_subtitles(
        &self,
        language: Language,
        file_name: &str,
    ) -> Result<Vec<Sentence>, ApiError> {
        let url = self.endpoint(&["subtitle", language.as_str(), file_name])?;
        let response = self.get(url.clone()).await?;
        match decode::<SubtitlePayload>(response, &url).await? {
            SubtitlePayload::Sentences(sentences) => {
                debug!(%language, file_name, count = sentences.len(), "Fetched subtitles");
                Ok(sentences)
            }
            SubtitlePayload::Failure { error } => Err(ApiError::Server(error)),
        }
    }

    pub fn audio_url(&self, language: Language, file_name: &str) -> Result<Url, ApiError> {
        self.endpoint(&["audio", language.as_str(), file_name])
    }

    /// `GET /audio/{language}/{file}`; returns the whole encoded track.
    pub async fn fetch_audio(
        &self,
        language: Language,
        file_name: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.audio_url(language, file_name)?;
        let response = self.get(url.clone()).await?;
        let bytes = response.bytes().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        debug!(%language, file_name, bytes = bytes.len(), "Fetched audio");
        Ok(bytes.to_vec())
    }

    /// `GET /api/notes/{article}`. An article without notes yields an empty list.
    pub async fn load_notes(&self, article_id: &str) -> Result<Vec<String>, ApiError> {
        let url = self.notes_url(article_id)?;
        let response = self.get(url.clone()).await?;
        let body: NotesResponse = decode(response, &url).await?;
        Ok(body.words)
    }

    /// `POST /api/notes/{article}` with one `words` form field per entry. The
    /// server replaces the stored list wholesale.
    pub async fn save_notes(&self, article_id: &str, words: &[String]) -> Result<(), ApiError> {
        let url = self.notes_url(article_id)?;
        let form: Vec<(&str, &str)> = words.iter().map(|word| ("words", word.as_str())).collect();
        let response = self
            .http
            .post(url.clone())
            .form(&form)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        ensure_success(response, &url)?;
        info!(article_id, count = words.len(), "Saved notes");
        Ok(())
    }

    fn notes_url(&self, article_id: &str) -> Result<Url, ApiError> {
        self.endpoint(&["api", "notes", article_id])
    }

    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "cannot be used as a base".to_string(),
            })?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<Response, ApiError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        ensure_success(response, &url)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw.trim()).map_err(|err| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl {
            url: raw.to_string(),
            reason: "expected an http(s) base url".to_string(),
        });
    }
    Ok(url)
}

fn ensure_success(response: Response, url: &Url) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            url: url.to_string(),
            status,
        })
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response, url: &Url) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

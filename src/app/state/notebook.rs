use iced::widget::text_editor;

#[derive(Debug, Clone, PartialEq)]
pub enum NotebookStatus {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub(in crate::app) text: String,
    pub(in crate::app) is_error: bool,
}

/// Notes panel for the current article. The buffer only lives while the
/// panel is open; an in-flight save and its error notice outlive it.
pub struct NotebookState {
    pub(in crate::app) open: bool,
    pub(in crate::app) article_id: Option<String>,
    pub(in crate::app) request_id: u64,
    pub(in crate::app) status: NotebookStatus,
    pub(in crate::app) content: text_editor::Content,
    pub(in crate::app) notice: Option<Notice>,
    /// Article whose save request is still in flight.
    pub(in crate::app) saving: Option<String>,
}

impl NotebookState {
    pub(in crate::app) fn new() -> Self {
        Self {
            open: false,
            article_id: None,
            request_id: 0,
            status: NotebookStatus::Loading,
            content: text_editor::Content::new(),
            notice: None,
            saving: None,
        }
    }

    /// Close the panel and forget the buffer.
    pub(in crate::app) fn close(&mut self) {
        self.open = false;
        self.article_id = None;
        self.status = NotebookStatus::Loading;
        self.content = text_editor::Content::new();
    }

    pub(in crate::app) fn begin_load(&mut self, article_id: String) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.open = true;
        self.article_id = Some(article_id);
        self.status = NotebookStatus::Loading;
        self.content = text_editor::Content::new();
        if self.notice.as_ref().is_some_and(|notice| !notice.is_error) {
            self.notice = None;
        }
        self.request_id
    }

    pub(in crate::app) fn is_saving(&self) -> bool {
        self.saving.is_some()
    }

    pub(in crate::app) fn is_current(&self, request_id: u64, article_id: &str) -> bool {
        self.open && self.request_id == request_id && self.article_id.as_deref() == Some(article_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_invalidates_previous_request() {
        let mut notebook = NotebookState::new();
        let first = notebook.begin_load("german-a.mp3".into());
        let second = notebook.begin_load("german-a.mp3".into());
        assert!(!notebook.is_current(first, "german-a.mp3"));
        assert!(notebook.is_current(second, "german-a.mp3"));
        assert!(!notebook.is_current(second, "german-b.mp3"));
        notebook.close();
        assert!(!notebook.is_current(second, "german-a.mp3"));
    }

    #[test]
    fn save_and_error_notice_survive_reopen() {
        let mut notebook = NotebookState::new();
        notebook.begin_load("german-a.mp3".into());
        notebook.saving = Some("german-a.mp3".into());
        notebook.notice = Some(Notice {
            text: "Could not save notes: HTTP 500".into(),
            is_error: true,
        });
        notebook.close();
        notebook.begin_load("german-a.mp3".into());
        assert!(notebook.is_saving());
        assert!(notebook.notice.as_ref().is_some_and(|notice| notice.is_error));

        notebook.notice = Some(Notice {
            text: "Saved 2 notes.".into(),
            is_error: false,
        });
        notebook.begin_load("german-b.mp3".into());
        assert!(notebook.notice.is_none());
    }
}

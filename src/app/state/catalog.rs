use lingo_core::Language;

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogStatus {
    Loading,
    Loaded(Vec<String>),
    Failed(String),
}

/// Language tab plus the file list fetched for it.
pub struct CatalogState {
    pub(in crate::app) language: Language,
    pub(in crate::app) status: CatalogStatus,
    pub(in crate::app) selected: Option<String>,
}

impl CatalogState {
    pub(in crate::app) fn new(language: Language) -> Self {
        Self {
            language,
            status: CatalogStatus::Loading,
            selected: None,
        }
    }

    pub(in crate::app) fn files(&self) -> &[String] {
        match &self.status {
            CatalogStatus::Loaded(files) => files,
            _ => &[],
        }
    }
}

/// List entry text: 1-based position and the file name.
pub(crate) fn entry_label(position: usize, file_name: &str) -> String {
    format!("{}. {}", position + 1, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_one_based() {
        assert_eq!(entry_label(0, "Der Hund.mp3"), "1. Der Hund.mp3");
        assert_eq!(entry_label(9, "x"), "10. x");
    }

    #[test]
    fn files_are_empty_unless_loaded() {
        let mut catalog = CatalogState::new(Language::German);
        assert!(catalog.files().is_empty());
        catalog.status = CatalogStatus::Failed("boom".into());
        assert!(catalog.files().is_empty());
        catalog.status = CatalogStatus::Loaded(vec!["a".into()]);
        assert_eq!(catalog.files(), ["a".to_string()]);
    }
}

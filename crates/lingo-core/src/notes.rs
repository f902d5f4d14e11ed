//! Notebook buffer handling.

/// Split the edit buffer into note entries: one per line, trimmed, blank
/// lines dropped.
pub fn parse_buffer(buffer: &str) -> Vec<String> {
    buffer
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render loaded entries back into an editable buffer, one per line.
pub fn format_buffer(words: &[String]) -> String {
    words.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_blank_and_whitespace_only_lines() {
        assert_eq!(parse_buffer("  \napple\n\nbear"), vec!["apple", "bear"]);
    }

    #[test]
    fn handles_crlf_and_surrounding_space() {
        assert_eq!(
            parse_buffer("der Hund\r\n\t\r\n  die Katze  \r\n"),
            vec!["der Hund", "die Katze"]
        );
    }

    #[test]
    fn empty_buffer_has_no_entries() {
        assert!(parse_buffer("").is_empty());
        assert!(parse_buffer("\n\n   \n").is_empty());
    }

    #[test]
    fn formatted_buffer_parses_back_to_same_words() {
        let words = vec!["apple".to_string(), "bear".to_string()];
        assert_eq!(parse_buffer(&format_buffer(&words)), words);
    }
}

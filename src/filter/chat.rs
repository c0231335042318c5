//! Chat allow-list filtering

use std::collections::HashSet;

/// Allow-list of chat ids and @handles. Empty means every chat is monitored.
#[derive(Debug, Clone, Default)]
pub struct ChatFilter {
    entries: HashSet<String>,
}

impl ChatFilter {
    /// Build a filter from already-normalized (lowercase) entries
    pub fn new(entries: HashSet<String>) -> Self {
        ChatFilter { entries }
    }

    /// Whether the filter accepts everything
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a message from this chat/sender is in scope.
    ///
    /// Matches on the chat id, the sender id, or the sender's handle;
    /// handles match case-insensitively, both with and without the
    /// leading `@`.
    pub fn should_process(
        &self,
        chat_id: i64,
        sender_id: Option<i64>,
        sender_handle: Option<&str>,
    ) -> bool {
        if self.entries.is_empty() {
            return true;
        }

        if self.entries.contains(&chat_id.to_string()) {
            return true;
        }

        if let Some(id) = sender_id {
            if self.entries.contains(&id.to_string()) {
                return true;
            }
        }

        if let Some(handle) = sender_handle {
            let handle = handle.trim_start_matches('@').to_lowercase();
            if self.entries.contains(&handle) || self.entries.contains(&format!("@{}", handle)) {
                return true;
            }
        }

        false
    }

    /// Render the configured entries for logging
    pub fn describe(&self) -> String {
        let mut items: Vec<&str> = self.entries.iter().map(String::as_str).collect();
        items.sort_unstable();
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(entries: &[&str]) -> ChatFilter {
        ChatFilter::new(entries.iter().map(|e| e.to_string()).collect())
    }

    #[test]
    fn test_empty_filter_accepts_all() {
        let f = ChatFilter::default();
        assert!(f.should_process(42, None, None));
        assert!(f.should_process(-100123, Some(7), Some("anyone")));
    }

    #[test]
    fn test_matches_chat_id() {
        let f = filter(&["555"]);
        assert!(f.should_process(555, None, None));
        assert!(!f.should_process(556, None, None));
    }

    #[test]
    fn test_matches_sender_id() {
        let f = filter(&["555"]);
        assert!(f.should_process(-1009, Some(555), None));
        assert!(!f.should_process(-1009, Some(556), None));
    }

    #[test]
    fn test_matches_handle_case_insensitive() {
        let f = filter(&["@alice"]);
        assert!(f.should_process(1, None, Some("Alice")));
        assert!(f.should_process(1, None, Some("@ALICE")));
        assert!(!f.should_process(1, None, Some("bob")));
    }

    #[test]
    fn test_matches_handle_without_at_prefix() {
        let f = filter(&["alice"]);
        assert!(f.should_process(1, None, Some("@alice")));
        assert!(f.should_process(1, None, Some("alice")));
    }

    #[test]
    fn test_rejects_numeric_sender_when_filter_wants_handle() {
        let f = filter(&["@alice"]);
        assert!(!f.should_process(555, Some(555), None));
    }
}

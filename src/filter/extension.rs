//! Extension filtering with named presets
//!
//! Presets are shorthand for common suffix groups; they are expanded into a
//! flat set at configuration time, so the runtime only ever sees concrete
//! suffixes.

use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Named suffix groups accepted in place of literal extensions
pub const EXTENSION_PRESETS: &[(&str, &[&str])] = &[
    (
        "audio",
        &[".mp3", ".m4a", ".flac", ".ogg", ".opus", ".wav", ".aac"],
    ),
    ("video", &[".mp4", ".mkv", ".webm", ".mov", ".avi"]),
];

/// Allow-list of file suffixes. Empty means every attachment is accepted.
#[derive(Debug, Clone, Default)]
pub struct ExtensionFilter {
    allowed: HashSet<String>,
}

impl ExtensionFilter {
    /// Expand preset names and merge literal extensions into a flat set.
    ///
    /// Tokens naming a preset contribute that preset's suffixes; every other
    /// token is kept verbatim as a literal extension. A token that matches no
    /// preset and has no leading dot is still kept as a literal, with a
    /// warning.
    pub fn resolve(tokens: &HashSet<String>) -> Self {
        let mut allowed = HashSet::new();

        for token in tokens {
            if let Some((_, suffixes)) = EXTENSION_PRESETS
                .iter()
                .find(|(name, _)| *name == token.as_str())
            {
                debug!("Extension preset found: {}", token);
                allowed.extend(suffixes.iter().map(|s| s.to_string()));
            } else {
                if !token.starts_with('.') {
                    warn!(
                        "'{}' matches no preset and has no leading dot; keeping it as a literal extension",
                        token
                    );
                }
                allowed.insert(token.clone());
            }
        }

        ExtensionFilter { allowed }
    }

    /// Whether the filter accepts everything
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Check a filename or path against the allow-list.
    ///
    /// The suffix comparison is case-insensitive; a file without an
    /// extension only passes when the filter is empty.
    pub fn matches<P: AsRef<Path>>(&self, file: P) -> bool {
        if self.allowed.is_empty() {
            return true;
        }

        file.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.allowed.contains(&format!(".{}", ext.to_lowercase())))
            .unwrap_or(false)
    }

    /// Render the allowed set for logging
    pub fn describe(&self) -> String {
        let mut items: Vec<&str> = self.allowed.iter().map(String::as_str).collect();
        items.sort_unstable();
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(tokens: &[&str]) -> ExtensionFilter {
        ExtensionFilter::resolve(&tokens.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_preset_expands_to_fixed_set() {
        let f = resolve(&["audio"]);
        for ext in ["song.mp3", "a.m4a", "b.flac", "c.ogg", "d.opus", "e.wav", "f.aac"] {
            assert!(f.matches(ext), "{} should match the audio preset", ext);
        }
        assert!(!f.matches("movie.mkv"));
    }

    #[test]
    fn test_literal_extensions_pass_through() {
        let f = resolve(&[".xyz"]);
        assert!(f.matches("file.xyz"));
        assert!(!f.matches("file.mp3"));
    }

    #[test]
    fn test_unknown_token_degrades_to_literal() {
        // No dot, no preset: kept verbatim, so it can never match a suffix
        let f = resolve(&["weird"]);
        assert!(!f.matches("file.weird"));
        assert!(!f.matches("weird"));
    }

    #[test]
    fn test_preset_and_literal_merge() {
        let f = resolve(&["audio", ".mkv"]);
        assert!(f.matches("song.mp3"));
        assert!(f.matches("movie.mkv"));
        assert!(!f.matches("movie.avi"));
    }

    #[test]
    fn test_empty_filter_accepts_all() {
        let f = ExtensionFilter::default();
        assert!(f.matches("anything.bin"));
        assert!(f.matches("no_extension"));
    }

    #[test]
    fn test_suffix_match_is_case_insensitive() {
        let f = resolve(&["audio"]);
        assert!(f.matches("song.MP3"));
        assert!(f.matches("SONG.Flac"));
    }

    #[test]
    fn test_missing_extension_fails_nonempty_filter() {
        let f = resolve(&["audio"]);
        assert!(!f.matches("document_12345"));
    }
}

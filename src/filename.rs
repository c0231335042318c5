//! Filename handling for downloaded media
//!
//! Produces names that are safe to write on any filesystem and resolves
//! collisions without ever overwriting an existing file. Callers run on the
//! single dispatch loop; there is no locking around the existence checks.

use std::path::{Path, PathBuf};

/// Characters that are unsafe in filenames on at least one supported platform
const UNSAFE_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Placeholder used when sanitization leaves nothing behind
const EMPTY_NAME_PLACEHOLDER: &str = "untitled";

/// Fixed MIME-to-extension mapping for documents that declare no filename
const MIME_EXTENSIONS: &[(&str, &str)] = &[
    ("audio/mpeg", ".mp3"),
    ("audio/mp4", ".m4a"),
    ("audio/flac", ".flac"),
    ("audio/ogg", ".ogg"),
    ("audio/wav", ".wav"),
    ("video/mp4", ".mp4"),
];

/// Sanitize a filename for safe storage on the filesystem.
///
/// Replaces problematic characters with underscores and strips leading and
/// trailing spaces and dots. An empty result becomes `"untitled"`.
pub fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c })
        .collect();

    let cleaned = cleaned.trim_matches(|c| c == ' ' || c == '.');

    if cleaned.is_empty() {
        EMPTY_NAME_PLACEHOLDER.to_string()
    } else {
        cleaned.to_string()
    }
}

/// First path under `dir` for `name` that does not already exist.
///
/// On collision, `_1`, `_2`, ... is appended before the extension until a
/// free path is found.
pub fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let stem = candidate
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
        .to_string();
    let suffix = candidate
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| format!(".{}", s))
        .unwrap_or_default();

    let mut counter = 1u32;
    loop {
        let path = dir.join(format!("{}_{}{}", stem, counter, suffix));
        if !path.exists() {
            return path;
        }
        counter += 1;
    }
}

/// Extension for a MIME type, if it is one of the common audio/video types
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    MIME_EXTENSIONS
        .iter()
        .find(|(known, _)| *known == mime)
        .map(|(_, ext)| *ext)
}

//! Transcript rendering options.

use std::path::Path;

/// Fence tag used when nothing more specific is known.
pub const DEFAULT_LANGUAGE: &str = "js";

/// Options controlling how a transcript is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptOptions {
    /// Tag written after the opening fence, e.g. `` ```js ``.
    pub language: String,
}

impl Default for TranscriptOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptOptions {
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Set the fence language tag.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Derive options from a source path's extension.
    ///
    /// Unknown or missing extensions fall back to the default tag.
    #[must_use]
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("jsx") => Self::new().language("jsx"),
            _ => Self::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_js() {
        assert_eq!(TranscriptOptions::default().language, "js");
    }

    #[test]
    fn language_override() {
        let options = TranscriptOptions::new().language("javascript");
        assert_eq!(options.language, "javascript");
    }

    #[test]
    fn module_extensions() {
        for path in ["a.mjs", "b.cjs", "d.js"] {
            assert_eq!(TranscriptOptions::for_path(path).language, "js", "{path}");
        }
        assert_eq!(TranscriptOptions::for_path("dir/c.JSX").language, "jsx");
    }

    #[test]
    fn unknown_extension_falls_back() {
        assert_eq!(TranscriptOptions::for_path("notes.txt").language, "js");
        assert_eq!(TranscriptOptions::for_path("Makefile").language, "js");
    }
}

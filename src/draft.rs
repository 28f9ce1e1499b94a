//! Draft collaborator boundary
//!
//! The panel reads the current draft and pushes full-replacement updates
//! through a single callback; it never owns the draft itself.

use std::path::PathBuf;

/// The externally-owned document draft
///
/// Both `edit`-mode success and suggestion acceptance go through `update`
/// with the complete replacement text.
pub trait DraftHost {
    fn draft(&self) -> &str;
    fn update(&mut self, text: String);
}

/// In-memory draft, optionally backed by a file on disk
#[derive(Debug, Default)]
pub struct DraftBuffer {
    text: String,
    path: Option<PathBuf>,
}

impl DraftBuffer {
    pub fn new(text: String) -> Self {
        Self { text, path: None }
    }

    /// Load the draft from a file, creating an empty buffer if it is missing
    pub fn from_path(path: PathBuf) -> Self {
        let text = std::fs::read_to_string(&path).unwrap_or_default();
        Self {
            text,
            path: Some(path),
        }
    }
}

impl DraftHost for DraftBuffer {
    fn draft(&self) -> &str {
        &self.text
    }

    fn update(&mut self, text: String) {
        self.text = text;
        if let Some(path) = &self.path {
            if let Err(e) = std::fs::write(path, &self.text) {
                log::warn!("failed to write draft {}: {e}", path.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_replaces_wholesale() {
        let mut draft = DraftBuffer::new("old".to_string());
        draft.update("new body".to_string());
        assert_eq!(draft.draft(), "new body");
    }

    #[test]
    fn test_file_backed_draft_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.md");
        std::fs::write(&path, "# Title").unwrap();

        let mut draft = DraftBuffer::from_path(path.clone());
        assert_eq!(draft.draft(), "# Title");

        draft.update("# Revised".to_string());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Revised");
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let draft = DraftBuffer::from_path(dir.path().join("absent.md"));
        assert_eq!(draft.draft(), "");
    }
}

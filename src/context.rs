//! Notebook context digest
//!
//! Externally supplied source/note records are opaque JSON. The panel reduces
//! them to a bounded textual summary: at most the first five of each, rendered
//! as indexed, serialized lines.

use serde::Deserialize;
use serde_json::Value;

/// Cap on records taken from each list
pub const MAX_RECORDS: usize = 5;

/// Summary used when no context records were supplied
pub const EMPTY_SUMMARY: &str = "No additional notebook context provided.";

/// Opaque context records supplied by the notebook
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotebookContext {
    #[serde(default)]
    pub sources: Vec<Value>,
    #[serde(default)]
    pub notes: Vec<Value>,
}

impl NotebookContext {
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.notes.is_empty()
    }

    /// Render the bounded textual summary embedded in prompts
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return EMPTY_SUMMARY.to_string();
        }

        format!(
            "Sources:\n{}\n\nNotes:\n{}",
            render_records(&self.sources),
            render_records(&self.notes)
        )
    }
}

/// Render up to `MAX_RECORDS` records as `(n) <json>` lines
fn render_records(records: &[Value]) -> String {
    records
        .iter()
        .take(MAX_RECORDS)
        .enumerate()
        .map(|(index, record)| format!("({}) {}", index + 1, record))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================
// Layer 3 — Review Domain Type
// ============================================================
// One row of the review table, reduced to the text column of
// interest. Everything else in the CSV is dropped at load time.

use serde::{Deserialize, Serialize};

/// A single review comment.
///
/// `row` is the zero-based data row in the source table (the
/// header is not counted), kept so a label can be traced back
/// to the line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub row:  usize,
    pub text: String,
}

impl Review {
    pub fn new(row: usize, text: impl Into<String>) -> Self {
        Self { row, text: text.into() }
    }

    /// True for rows whose text cell was blank in the source.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

// ============================================================
// Layer 3 — Sentiment Label
// ============================================================
// The classifier has two output classes. Class 0 is the
// negative class; every other class index is read as positive.
// Labels are rendered in Spanish because the review corpus is.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Negative,
    Positive,
}

impl Sentiment {
    /// Map a predicted class index onto a label.
    pub fn from_class(class: usize) -> Self {
        if class == 0 {
            Sentiment::Negative
        } else {
            Sentiment::Positive
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Negative => "Negativo",
            Sentiment::Positive => "Positivo",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

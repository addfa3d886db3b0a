// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer is written against these traits, not
// against the CSV loader or the Burn classifier directly.
//
//   ReviewSource   ← CsvReviewLoader (HTTP or local file)
//   SentimentModel ← Inferencer (Burn classifier), test stubs

use anyhow::Result;

use crate::data::padding::PaddedSequences;
use crate::domain::review::Review;

// ─── ReviewSource ─────────────────────────────────────────────────────────────
/// Any component that can produce the review table.
pub trait ReviewSource {
    /// Load every review row, in source order.
    fn load_all(&self) -> Result<Vec<Review>>;
}

// ─── SentimentModel ───────────────────────────────────────────────────────────
/// A trained classifier that scores padded token-index sequences.
///
/// `predict` returns one probability vector per input row, one
/// entry per output class, in the same order as the rows.
pub trait SentimentModel {
    fn predict(&self, padded: &PaddedSequences) -> Result<Vec<Vec<f32>>>;

    /// Number of token ids the model can embed, when it has a
    /// fixed table. Ids must stay strictly below it.
    fn vocab_size(&self) -> Option<usize> {
        None
    }
}

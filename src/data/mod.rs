// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw CSV to tensor batches.
//
// The pipeline flows in this order:
//
//   review CSV (URL or file)
//       │
//       ▼
//   CsvReviewLoader   → fetches the table, keeps the text column
//       │
//       ▼
//   text              → lowercases, strips punctuation, splits words
//       │
//       ▼
//   WordIndex         → fits word → index, converts texts to sequences
//       │
//       ▼
//   pad_sequences     → forces every sequence to maxlen
//       │
//       ▼
//   SequenceBatcher   → stacks padded rows into an Int tensor
//
// Each module is responsible for exactly one step.

/// Loads the review CSV over HTTP or from disk
pub mod loader;

/// Splits raw comments into words
pub mod text;

/// Word-level vocabulary fitted on the review texts
pub mod vocabulary;

/// Truncation and padding to a fixed length
pub mod padding;

/// Implements Burn's Batcher trait over padded rows
pub mod batcher;

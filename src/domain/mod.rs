// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing what the
// system works with: review rows, sentiment labels, and the
// two seams the rest of the crate is written against.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust structs, enums, and traits
//
// The data layer produces Reviews, the ml layer implements
// SentimentModel, and the application layer only sees the
// traits, so a file-based source or a stub model can be
// dropped in without touching the use cases.

// One row of the review table
pub mod review;

// The two-way sentiment label
pub mod sentiment;

// Core abstractions (traits) that other layers implement
pub mod traits;

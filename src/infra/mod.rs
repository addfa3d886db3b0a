// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Persistence for the two artifacts the pipeline shares
// between runs:
//
//   tokenizer_store.rs — Writes the fitted WordIndex after
//                        `prepare` and reloads it for
//                        `evaluate`, so both see the same
//                        vocabulary. Also exports a HuggingFace
//                        tokenizer.json view.
//
//   checkpoint.rs      — Loads (and saves) the pretrained
//                        classifier weights with Burn's
//                        CompactRecorder, plus the JSON config
//                        needed to rebuild its architecture.
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Classifier checkpoint saving and loading
pub mod checkpoint;

/// Tokenizer saving and loading
pub mod tokenizer_store;

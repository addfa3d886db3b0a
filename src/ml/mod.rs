// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model code lives here. No other layer builds a
// Module or runs a forward pass.
//
//   classifier.rs — Embedding → masked mean pool → linear head.
//                   Produces two logits per comment.
//
//   inferencer.rs — Loads a classifier checkpoint and implements
//                   the SentimentModel trait over padded rows.
//
//   evaluate.rs   — Comment in, Negativo / Positivo out.
//
// There is no training loop: the classifier weights are a
// pretrained artifact placed in the artifacts directory.
//
// Reference: Burn Book §3 (Building Blocks)

/// Bag-of-embeddings sentiment classifier
pub mod classifier;

/// Loads the checkpoint and scores padded rows
pub mod inferencer;

/// Maps a comment to its sentiment label
pub mod evaluate;

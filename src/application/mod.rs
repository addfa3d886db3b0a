// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish one
// goal each: preparing the corpus, or labelling a comment.
//
// Rules for this layer:
//   - No ML math or model code here
//   - No UI or printing here (that's Layer 1)
//   - No direct file or network access (that's Layer 4 and 6)
//   - Only workflow coordination

// Fetch → fit tokenizer → sequences → pad
pub mod prepare_use_case;

// Load artifacts → label a comment
pub mod evaluate_use_case;

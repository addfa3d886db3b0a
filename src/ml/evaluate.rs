// ============================================================
// Layer 5 — Comment Evaluation
// ============================================================
// Runs one comment (or a batch) through the same preprocessing
// the corpus went through, then reads the model's winning class:
//
//   comment → texts_to_sequences → pad (post, post, 0)
//           → model.predict → argmax → Negativo / Positivo

use anyhow::{anyhow, Result};

use crate::data::padding::{pad_sequences, Side};
use crate::data::vocabulary::WordIndex;
use crate::domain::sentiment::Sentiment;
use crate::domain::traits::SentimentModel;

/// Label a single comment.
pub fn evaluate_comment<M: SentimentModel + ?Sized>(
    comment:          &str,
    tokenizer:        &WordIndex,
    model:            &M,
    max_sequence_len: usize,
) -> Result<Sentiment> {
    evaluate_comments(&[comment], tokenizer, model, max_sequence_len)?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("Model returned no prediction for the comment"))
}

/// Label every comment, preserving input order.
pub fn evaluate_comments<S: AsRef<str>, M: SentimentModel + ?Sized>(
    comments:         &[S],
    tokenizer:        &WordIndex,
    model:            &M,
    max_sequence_len: usize,
) -> Result<Vec<Sentiment>> {
    let sequences = tokenizer.texts_to_sequences(comments);
    let padded = pad_sequences(&sequences, Some(max_sequence_len), Side::Post, Side::Post, 0);

    let probabilities = model.predict(&padded)?;
    if probabilities.len() != comments.len() {
        return Err(anyhow!(
            "Model returned {} predictions for {} comments",
            probabilities.len(),
            comments.len()
        ));
    }

    probabilities
        .iter()
        .map(|p| argmax(p).map(Sentiment::from_class))
        .collect()
}

/// Index of the largest probability; the first one wins ties.
fn argmax(probabilities: &[f32]) -> Result<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &p) in probabilities.iter().enumerate() {
        match best {
            Some((_, b)) if p <= b => {}
            _ => best = Some((i, p)),
        }
    }
    best.map(|(i, _)| i)
        .ok_or_else(|| anyhow!("Model returned an empty probability vector"))
}

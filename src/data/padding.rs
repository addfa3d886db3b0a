// ============================================================
// Layer 4 — Sequence Padding
// ============================================================
// Forces variable-length index sequences into one rectangular
// [rows, maxlen] array so they can be stacked into a tensor.
//
// Two independent choices:
//   truncating — which end to cut when a sequence is too long
//   padding    — which end to fill when a sequence is too short
//
// Example with maxlen=4, value=0:
//   [5 6 7 8 9]  truncating=Post → [5 6 7 8]
//   [5 6 7 8 9]  truncating=Pre  → [6 7 8 9]
//   [5 6]        padding=Post    → [5 6 0 0]
//   [5 6]        padding=Pre     → [0 0 5 6]

use serde::{Deserialize, Serialize};

/// Which end of a sequence an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Pre,
    Post,
}

/// A row-major `[rows, cols]` block of token indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedSequences {
    rows: usize,
    cols: usize,
    data: Vec<u32>,
}

impl PaddedSequences {
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, index: usize) -> &[u32] {
        &self.data[index * self.cols..(index + 1) * self.cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        // chunks_exact panics on 0, and a zero-width array still has rows
        (0..self.rows).map(move |i| self.row(i))
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }
}

/// Pad and truncate `sequences` to a common length.
///
/// `maxlen = None` uses the length of the longest sequence.
/// Empty sequences yield a row made only of `value`.
pub fn pad_sequences(
    sequences:  &[Vec<u32>],
    maxlen:     Option<usize>,
    padding:    Side,
    truncating: Side,
    value:      u32,
) -> PaddedSequences {
    let cols = maxlen.unwrap_or_else(|| sequences.iter().map(Vec::len).max().unwrap_or(0));
    let rows = sequences.len();
    let mut data = vec![value; rows * cols];

    for (r, seq) in sequences.iter().enumerate() {
        if seq.is_empty() || cols == 0 {
            continue;
        }

        let kept: &[u32] = if seq.len() > cols {
            match truncating {
                Side::Pre  => &seq[seq.len() - cols..],
                Side::Post => &seq[..cols],
            }
        } else {
            seq
        };

        let row = &mut data[r * cols..(r + 1) * cols];
        match padding {
            Side::Post => row[..kept.len()].copy_from_slice(kept),
            Side::Pre  => row[cols - kept.len()..].copy_from_slice(kept),
        }
    }

    let truncated = sequences.iter().filter(|s| s.len() > cols).count();
    if truncated > 0 {
        tracing::debug!("Truncated {} of {} sequences to {} tokens", truncated, rows, cols);
    }

    PaddedSequences { rows, cols, data }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_padding_and_truncation() {
        let p = pad_sequences(&[vec![5, 6], vec![1, 2, 3, 4, 5, 6]], Some(4), Side::Post, Side::Post, 0);
        assert_eq!(p.shape(), (2, 4));
        assert_eq!(p.row(0), &[5, 6, 0, 0]);
        assert_eq!(p.row(1), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_pre_padding_and_truncation() {
        let p = pad_sequences(&[vec![5, 6], vec![1, 2, 3, 4, 5, 6]], Some(4), Side::Pre, Side::Pre, 0);
        assert_eq!(p.row(0), &[0, 0, 5, 6]);
        assert_eq!(p.row(1), &[3, 4, 5, 6]);
    }

    #[test]
    fn test_every_row_has_maxlen_entries() {
        let seqs = vec![vec![], vec![1], vec![1; 250], vec![2; 100]];
        let p = pad_sequences(&seqs, Some(100), Side::Post, Side::Post, 0);
        assert!(p.rows().all(|r| r.len() == 100));
        assert_eq!(p.rows().count(), 4);
    }

    #[test]
    fn test_empty_sequence_is_all_filler() {
        let p = pad_sequences(&[vec![]], Some(3), Side::Post, Side::Post, 9);
        assert_eq!(p.row(0), &[9, 9, 9]);
    }

    #[test]
    fn test_maxlen_defaults_to_longest() {
        let p = pad_sequences(&[vec![1], vec![1, 2, 3]], None, Side::Pre, Side::Post, 0);
        assert_eq!(p.shape(), (2, 3));
        assert_eq!(p.row(0), &[0, 0, 1]);
    }

    #[test]
    fn test_no_sequences() {
        let p = pad_sequences(&[], Some(100), Side::Post, Side::Post, 0);
        assert_eq!(p.shape(), (0, 100));
        assert!(p.is_empty());
    }
}

// ============================================================
// Layer 4 — Sequence Batcher
// ============================================================
// Implements Burn's Batcher trait to stack padded index rows
// into one Int tensor for the classifier forward pass.
//
// How batching works here:
//   Input:  Vec of N rows, each of length S (already padded)
//   Output: SequenceBatch with a tensor of shape [N, S]
//
//   All rows are flattened into one Vec, then reshaped:
//   [r1_t1, r1_t2, ..., r1_tS, r2_t1, ..., rN_tS] → [N, S]
//
// Rows must share one length; pad_sequences guarantees that.

use burn::{data::dataloader::batcher::Batcher, prelude::*};

/// A batch of padded sequences ready for the forward pass.
#[derive(Debug, Clone)]
pub struct SequenceBatch<B: Backend> {
    /// Token indices, shape [batch_size, seq_len]
    pub input_ids: Tensor<B, 2, Int>,
}

/// Holds the target device so tensors are created on the
/// correct GPU/CPU.
#[derive(Clone, Debug)]
pub struct SequenceBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> SequenceBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<Vec<u32>, SequenceBatch<B>> for SequenceBatcher<B> {
    fn batch(&self, items: Vec<Vec<u32>>) -> SequenceBatch<B> {
        let batch_size = items.len();
        let seq_len    = items.first().map(Vec::len).unwrap_or(0);

        // Burn Int tensors are built from i32
        let flat: Vec<i32> = items
            .iter()
            .flat_map(|row| row.iter().map(|&x| x as i32))
            .collect();

        let input_ids = Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        SequenceBatch { input_ids }
    }
}

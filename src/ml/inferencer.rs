// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Wraps a loaded SentimentClassifier behind the SentimentModel
// trait. Padded rows go through the SequenceBatcher in slices of
// `batch_size`, and each slice's softmax output is copied back
// into one probability vector per row.
//
// The embedding table bounds the ids a row may hold: any id at or
// past vocab_size is rejected before it reaches the forward pass.
use anyhow::{anyhow, Result};
use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::batcher::SequenceBatcher;
use crate::data::padding::PaddedSequences;
use crate::domain::traits::SentimentModel;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::classifier::{SentimentClassifier, SentimentClassifierConfig};

pub type InferBackend = burn::backend::Wgpu;

const DEFAULT_BATCH_SIZE: usize = 64;

pub struct Inferencer<B: Backend> {
    model:       SentimentClassifier<B>,
    batcher:     SequenceBatcher<B>,
    batch_size:  usize,
    num_classes: usize,
    vocab_size:  usize,
}

impl<B: Backend> Inferencer<B> {
    pub fn new(model: SentimentClassifier<B>, num_classes: usize, device: B::Device) -> Self {
        let [vocab_size, _] = model.token_embedding.weight.val().dims();
        Self {
            model,
            batcher: SequenceBatcher::new(device),
            batch_size: DEFAULT_BATCH_SIZE,
            num_classes,
            vocab_size,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Rebuild the architecture from the saved config, then load weights.
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager, device: B::Device) -> Result<Self> {
        let cfg   = ckpt_manager.load_config()?;
        check_config(&cfg)?;
        let model = cfg.init::<B>(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!(
            "Classifier loaded: vocab_size={}, d_model={}, classes={}",
            cfg.vocab_size, cfg.d_model, cfg.num_classes
        );
        Ok(Self::new(model, cfg.num_classes, device))
    }
}

/// Reject shapes the classifier cannot be built or scored with.
fn check_config(cfg: &SentimentClassifierConfig) -> Result<()> {
    if cfg.vocab_size == 0 || cfg.d_model == 0 || cfg.num_classes == 0 {
        return Err(anyhow!(
            "Invalid classifier config: vocab_size={}, d_model={}, num_classes={} (all must be > 0)",
            cfg.vocab_size, cfg.d_model, cfg.num_classes
        ));
    }
    if cfg.pad_index >= cfg.vocab_size {
        return Err(anyhow!(
            "Invalid classifier config: pad_index {} is outside vocab_size {}",
            cfg.pad_index, cfg.vocab_size
        ));
    }
    Ok(())
}

impl<B: Backend> SentimentModel for Inferencer<B> {
    fn predict(&self, padded: &PaddedSequences) -> Result<Vec<Vec<f32>>> {
        let (rows, cols) = padded.shape();
        if rows == 0 {
            return Ok(Vec::new());
        }
        if cols == 0 {
            return Err(anyhow!("Cannot classify zero-length sequences"));
        }
        if self.num_classes == 0 {
            return Err(anyhow!("Classifier has no output classes"));
        }
        if let Some(&id) = padded.as_slice().iter().find(|&&id| id as usize >= self.vocab_size) {
            return Err(anyhow!(
                "Token id {} is outside the classifier vocabulary (vocab_size={})",
                id, self.vocab_size
            ));
        }

        let mut out = Vec::with_capacity(rows);
        let all: Vec<Vec<u32>> = padded.rows().map(<[u32]>::to_vec).collect();

        for chunk in all.chunks(self.batch_size) {
            let batch = self.batcher.batch(chunk.to_vec());
            let probs: Vec<f32> = self
                .model
                .forward_proba(batch.input_ids)
                .into_data()
                .to_vec::<f32>()
                .map_err(|e| anyhow!("Cannot read class probabilities: {e:?}"))?;

            out.extend(probs.chunks(self.num_classes).map(<[f32]>::to_vec));
        }

        tracing::debug!("Scored {} rows of length {}", rows, cols);
        Ok(out)
    }

    fn vocab_size(&self) -> Option<usize> {
        Some(self.vocab_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::padding::{pad_sequences, Side};
    use crate::data::vocabulary::{TokenizerOptions, WordIndex};
    use crate::domain::sentiment::Sentiment;
    use crate::ml::evaluate::evaluate_comment;
    use burn::backend::NdArray;

    #[test]
    fn test_one_probability_vector_per_row_across_batches() {
        let device = Default::default();
        let model = SentimentClassifierConfig::new(20, 4).init::<NdArray>(&device);
        let inferencer = Inferencer::new(model, 2, device).with_batch_size(2);

        let padded = pad_sequences(
            &[vec![1, 2], vec![3], vec![], vec![4, 5, 6, 7, 8]],
            Some(4),
            Side::Post,
            Side::Post,
            0,
        );
        let probs = inferencer.predict(&padded).unwrap();

        assert_eq!(probs.len(), 4);
        for p in &probs {
            assert_eq!(p.len(), 2);
            assert!((p.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_no_rows_gives_no_predictions() {
        let device = Default::default();
        let model = SentimentClassifierConfig::new(5, 4).init::<NdArray>(&device);
        let inferencer = Inferencer::new(model, 2, device);
        let padded = pad_sequences(&[], Some(10), Side::Post, Side::Post, 0);
        assert!(inferencer.predict(&padded).unwrap().is_empty());
    }

    #[test]
    fn test_ids_past_the_vocabulary_are_rejected() {
        let device = Default::default();
        let model = SentimentClassifierConfig::new(3, 4).init::<NdArray>(&device);
        let inferencer = Inferencer::new(model, 2, device);
        assert_eq!(inferencer.vocab_size(), Some(3));

        let mut tokenizer = WordIndex::new(TokenizerOptions::default());
        tokenizer.fit_on_texts(&["a b c d e f g h"]);
        let err = evaluate_comment("h g", &tokenizer, &inferencer, 10).unwrap_err();
        assert!(err.to_string().contains("outside the classifier vocabulary"));
    }

    #[test]
    fn test_zero_sized_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path());

        ckpt.save_config(&SentimentClassifierConfig::new(10, 4).with_num_classes(0)).unwrap();
        let err = Inferencer::<NdArray>::from_checkpoint(&ckpt, Default::default()).err().unwrap();
        assert!(err.to_string().contains("num_classes=0"));

        ckpt.save_config(&SentimentClassifierConfig::new(10, 0)).unwrap();
        assert!(Inferencer::<NdArray>::from_checkpoint(&ckpt, Default::default()).is_err());
    }

    #[test]
    fn test_checkpoint_scores_like_the_saved_model() {
        let dir = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path());
        let device = Default::default();

        let mut tokenizer = WordIndex::new(TokenizerOptions::default());
        tokenizer.fit_on_texts(&["muy buen hotel", "hotel sucio y caro"]);

        let cfg = SentimentClassifierConfig::new(tokenizer.vocab_size(), 8);
        let model = cfg.init::<NdArray>(&device);
        ckpt.save_config(&cfg).unwrap();
        ckpt.save_model(&model).unwrap();

        let comments = ["muy buen hotel", "sucio y caro", "hotel"];
        let padded = pad_sequences(
            &tokenizer.texts_to_sequences(&comments),
            Some(6),
            Side::Post,
            Side::Post,
            0,
        );
        let in_memory = Inferencer::new(model, cfg.num_classes, device).predict(&padded).unwrap();

        let loaded = Inferencer::<NdArray>::from_checkpoint(&ckpt, Default::default()).unwrap();
        let reloaded = loaded.predict(&padded).unwrap();

        for ((comment, want), got) in comments.iter().zip(&in_memory).zip(&reloaded) {
            // weights are stored at half precision
            for (a, b) in want.iter().zip(got) {
                assert!((a - b).abs() < 1e-2, "{comment}: {want:?} vs {got:?}");
            }

            let label = evaluate_comment(comment, &tokenizer, &loaded, 6).unwrap();
            let expected = if got[1] > got[0] { Sentiment::Positive } else { Sentiment::Negative };
            assert_eq!(label, expected);
            if (want[0] - want[1]).abs() > 0.05 {
                let in_memory_label = if want[1] > want[0] { Sentiment::Positive } else { Sentiment::Negative };
                assert_eq!(label, in_memory_label);
            }
        }
    }
}

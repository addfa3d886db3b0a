// ============================================================
// Layer 2 — Evaluate Use Case
// ============================================================
// Loads the tokenizer written by `prepare` and the pretrained
// classifier checkpoint, then labels comments with them.

use anyhow::{anyhow, Result};

use crate::data::vocabulary::WordIndex;
use crate::domain::sentiment::Sentiment;
use crate::domain::traits::SentimentModel;
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::evaluate::{evaluate_comment, evaluate_comments};
use crate::ml::inferencer::{InferBackend, Inferencer};

/// Used when the artifacts carry no stored length.
pub const DEFAULT_MAX_SEQUENCE_LEN: usize = 100;

pub struct EvaluateUseCase<M: SentimentModel> {
    tokenizer:        WordIndex,
    model:            M,
    max_sequence_len: usize,
}

impl EvaluateUseCase<Inferencer<InferBackend>> {
    /// Load both artifacts from one directory.
    pub fn from_artifacts(artifacts_dir: &str) -> Result<Self> {
        let store     = TokenizerStore::new(artifacts_dir);
        let tokenizer = store.load()?;
        let ckpt      = CheckpointManager::new(artifacts_dir);

        // fail on a mismatched pair before touching the GPU
        let cfg = ckpt.load_config()?;
        check_vocab(tokenizer.vocab_size(), cfg.vocab_size)?;

        let max_sequence_len = match store.load_sequence_len()? {
            Some(n) => n,
            None => {
                tracing::warn!(
                    "No stored sequence length in '{}', using {}",
                    artifacts_dir, DEFAULT_MAX_SEQUENCE_LEN
                );
                DEFAULT_MAX_SEQUENCE_LEN
            }
        };

        let device = burn::backend::wgpu::WgpuDevice::default();
        let model  = Inferencer::from_checkpoint(&ckpt, device)?;
        Self::new(tokenizer, model, max_sequence_len)
    }
}

impl<M: SentimentModel> EvaluateUseCase<M> {
    pub fn new(tokenizer: WordIndex, model: M, max_sequence_len: usize) -> Result<Self> {
        if max_sequence_len == 0 {
            return Err(anyhow!("max_sequence_len must be at least 1"));
        }
        if let Some(capacity) = model.vocab_size() {
            check_vocab(tokenizer.vocab_size(), capacity)?;
        }
        Ok(Self { tokenizer, model, max_sequence_len })
    }

    pub fn max_sequence_len(&self) -> usize {
        self.max_sequence_len
    }

    /// Label one comment; `max_sequence_len` overrides the stored length.
    pub fn evaluate(&self, comment: &str, max_sequence_len: Option<usize>) -> Result<Sentiment> {
        let label = evaluate_comment(comment, &self.tokenizer, &self.model, self.length(max_sequence_len))?;
        tracing::debug!("'{}' → {}", comment, label);
        Ok(label)
    }

    pub fn evaluate_all<S: AsRef<str>>(&self, comments: &[S], max_sequence_len: Option<usize>) -> Result<Vec<Sentiment>> {
        evaluate_comments(comments, &self.tokenizer, &self.model, self.length(max_sequence_len))
    }

    fn length(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.max_sequence_len)
    }
}

/// The tokenizer may not emit ids the classifier cannot embed.
fn check_vocab(tokenizer_vocab: usize, model_vocab: usize) -> Result<()> {
    if tokenizer_vocab > model_vocab {
        return Err(anyhow!(
            "Tokenizer has {} ids but the classifier embeds only {}. \
             Were the tokenizer and checkpoint built from the same data?",
            tokenizer_vocab, model_vocab
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::padding::PaddedSequences;
    use crate::data::vocabulary::TokenizerOptions;
    use crate::ml::classifier::SentimentClassifierConfig;
    use burn::backend::NdArray;
    use std::cell::RefCell;

    struct AlwaysClass(usize);

    impl SentimentModel for AlwaysClass {
        fn predict(&self, padded: &PaddedSequences) -> Result<Vec<Vec<f32>>> {
            let mut probs = vec![0.0; 2];
            probs[self.0] = 1.0;
            Ok(padded.rows().map(|_| probs.clone()).collect())
        }
    }

    /// Records the padded shape of every call.
    #[derive(Default)]
    struct ShapeModel {
        seen: RefCell<Vec<(usize, usize)>>,
    }

    impl SentimentModel for ShapeModel {
        fn predict(&self, padded: &PaddedSequences) -> Result<Vec<Vec<f32>>> {
            self.seen.borrow_mut().push(padded.shape());
            Ok(padded.rows().map(|_| vec![0.6, 0.4]).collect())
        }
    }

    fn tokenizer() -> WordIndex {
        let mut wi = WordIndex::new(TokenizerOptions::default());
        wi.fit_on_texts(&["buen hotel"]);
        wi
    }

    #[test]
    fn test_labels_follow_model_class() {
        let negative = EvaluateUseCase::new(tokenizer(), AlwaysClass(0), 100).unwrap();
        let positive = EvaluateUseCase::new(tokenizer(), AlwaysClass(1), 100).unwrap();
        assert_eq!(negative.evaluate("buen hotel", None).unwrap(), Sentiment::Negative);
        assert_eq!(positive.evaluate("buen hotel", Some(100)).unwrap(), Sentiment::Positive);
        assert_eq!(positive.evaluate_all(&["a", "b"], Some(10)).unwrap().len(), 2);
    }

    #[test]
    fn test_stored_length_is_the_default() {
        let use_case = EvaluateUseCase::new(tokenizer(), ShapeModel::default(), 7).unwrap();
        use_case.evaluate("buen hotel", None).unwrap();
        use_case.evaluate("buen hotel", Some(3)).unwrap();
        assert_eq!(*use_case.model.seen.borrow(), vec![(1, 7), (1, 3)]);
        assert!(EvaluateUseCase::new(tokenizer(), ShapeModel::default(), 0).is_err());
    }

    #[test]
    fn test_tokenizer_larger_than_model_is_rejected() {
        let mut big = WordIndex::new(TokenizerOptions::default());
        big.fit_on_texts(&["a b c d e f g h"]);

        let device = Default::default();
        let model = SentimentClassifierConfig::new(3, 4).init::<NdArray>(&device);
        let inferencer = Inferencer::new(model, 2, device);

        let err = EvaluateUseCase::new(big, inferencer, 10).err().unwrap();
        assert!(err.to_string().contains("classifier embeds only 3"));
    }

    #[test]
    fn test_mismatched_artifacts_fail_before_loading_weights() {
        let dir = tempfile::tempdir().unwrap();
        let mut big = WordIndex::new(TokenizerOptions::default());
        big.fit_on_texts(&["a b c d e f g h"]);
        TokenizerStore::new(dir.path()).save(&big).unwrap();
        CheckpointManager::new(dir.path())
            .save_config(&SentimentClassifierConfig::new(3, 4))
            .unwrap();

        let err = EvaluateUseCase::from_artifacts(&dir.path().to_string_lossy()).err().unwrap();
        assert!(err.to_string().contains("classifier embeds only 3"));
    }

    #[test]
    fn test_missing_artifacts_fail() {
        let dir = tempfile::tempdir().unwrap();
        let result = EvaluateUseCase::from_artifacts(&dir.path().to_string_lossy());
        assert!(result.is_err());
    }
}

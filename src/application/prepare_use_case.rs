// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Runs the corpus pipeline in order:
//
//   Step 1: Load the review table       (Layer 4 - data)
//   Step 2: Fit the word index          (Layer 4 - data)
//   Step 3: Texts → index sequences     (Layer 4 - data)
//   Step 4: Pad to max_sequence_len     (Layer 4 - data)
//   Step 5: Save the tokenizer          (Layer 6 - infra)

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    loader::{CsvReviewLoader, DEFAULT_COLUMN, DEFAULT_SOURCE},
    padding::{pad_sequences, PaddedSequences, Side},
    vocabulary::{TokenizerOptions, WordIndex},
};
use crate::domain::traits::ReviewSource;
use crate::infra::tokenizer_store::TokenizerStore;

// ─── Prepare Configuration ───────────────────────────────────────────────────
// Everything a prepare run needs. Serialisable so a run's
// settings can be logged or stored next to its artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    pub source:           String,
    pub column:           String,
    pub max_sequence_len: usize,
    pub num_words:        Option<usize>,
    pub oov_token:        Option<String>,
    pub padding:          Side,
    pub truncating:       Side,
    pub output_dir:       String,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            source:           DEFAULT_SOURCE.to_string(),
            column:           DEFAULT_COLUMN.to_string(),
            max_sequence_len: 100,
            num_words:        None,
            oov_token:        None,
            padding:          Side::Post,
            truncating:       Side::Post,
            output_dir:       "artifacts".to_string(),
        }
    }
}

/// Summary of a prepare run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareReport {
    pub documents:   usize,
    /// Vocabulary size including the padding index
    pub total_words: usize,
    pub shape:       (usize, usize),
    /// Rows whose sequence was longer than max_sequence_len
    pub truncated:   usize,
}

/// The fitted tokenizer and padded matrix from one run.
pub struct Prepared {
    pub word_index: WordIndex,
    pub padded:     PaddedSequences,
    pub report:     PrepareReport,
}

pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Run against the configured CSV source.
    pub fn execute(&self) -> Result<Prepared> {
        let loader = CsvReviewLoader::new(&self.config.source, &self.config.column);
        self.execute_with(&loader)
    }

    /// Run against any review source.
    pub fn execute_with(&self, source: &dyn ReviewSource) -> Result<Prepared> {
        let cfg = &self.config;
        if cfg.max_sequence_len == 0 {
            return Err(anyhow!("max_sequence_len must be at least 1"));
        }

        // ── Step 1: Load reviews ──────────────────────────────────────────────
        let reviews = source.load_all()?;
        let texts: Vec<&str> = reviews.iter().map(|r| r.text.as_str()).collect();

        // ── Step 2: Fit the tokenizer ─────────────────────────────────────────
        let mut word_index = WordIndex::new(TokenizerOptions {
            num_words: cfg.num_words,
            oov_token: cfg.oov_token.clone(),
            ..TokenizerOptions::default()
        });
        word_index.fit_on_texts(&texts);
        let total_words = word_index.vocab_size();
        tracing::info!("Vocabulary: {} words (total_words={})", total_words - 1, total_words);

        // ── Step 3: Texts → sequences ─────────────────────────────────────────
        let sequences = word_index.texts_to_sequences(&texts);
        let truncated = sequences.iter().filter(|s| s.len() > cfg.max_sequence_len).count();

        // ── Step 4: Pad ───────────────────────────────────────────────────────
        let padded = pad_sequences(&sequences, Some(cfg.max_sequence_len), cfg.padding, cfg.truncating, 0);
        let shape = padded.shape();
        tracing::info!("Padded sequences shape: ({}, {})", shape.0, shape.1);

        // ── Step 5: Save tokenizer for evaluate ───────────────────────────────
        let store = TokenizerStore::new(&cfg.output_dir);
        store.save(&word_index)?;
        store.save_sequence_len(cfg.max_sequence_len)?;

        let report = PrepareReport {
            documents: reviews.len(),
            total_words,
            shape,
            truncated,
        };
        Ok(Prepared { word_index, padded, report })
    }
}

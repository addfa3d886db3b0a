// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Persists a fitted WordIndex so `evaluate` uses exactly the
// vocabulary `prepare` built.
//
// Three files are written:
//   word_index.json — the full fitted state (counts, options,
//                     index), reloaded by `load`
//   tokenizer.json  — the same vocabulary as a HuggingFace
//                     WordLevel tokenizer, for tools that speak
//                     the `tokenizers` format
//   sequence.json   — the padded length `prepare` used, so
//                     `evaluate` pads comments the same way
//
// The WordLevel view reproduces the word splitting with a
// normalizer sequence: lowercase, then every filter character
// replaced by a space, then a split on whitespace. Unknown words
// map to the OOV token when one is configured, otherwise to the
// [PAD] filler at index 0.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tokenizers::Tokenizer;

use crate::data::vocabulary::WordIndex;

const WORD_INDEX_FILE: &str = "word_index.json";
const HF_TOKENIZER_FILE: &str = "tokenizer.json";
const SEQUENCE_FILE: &str = "sequence.json";
const PAD_TOKEN: &str = "[PAD]";

#[derive(Debug, Serialize, Deserialize)]
struct SequenceSettings {
    max_sequence_len: usize,
}

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn exists(&self) -> bool {
        self.dir.join(WORD_INDEX_FILE).exists()
    }

    pub fn save(&self, word_index: &WordIndex) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let state_path = self.dir.join(WORD_INDEX_FILE);
        fs::write(&state_path, serde_json::to_string(word_index)?)
            .with_context(|| format!("Cannot write '{}'", state_path.display()))?;

        let hf_path = self.dir.join(HF_TOKENIZER_FILE);
        fs::write(&hf_path, serde_json::to_string_pretty(&word_level_json(word_index))?)
            .with_context(|| format!("Cannot write '{}'", hf_path.display()))?;

        tracing::info!(
            "Tokenizer with {} words saved to '{}'",
            word_index.vocab_size() - 1,
            self.dir.display()
        );
        Ok(())
    }

    /// Load the fitted WordIndex written by `save`.
    pub fn load(&self) -> Result<WordIndex> {
        let path = self.dir.join(WORD_INDEX_FILE);
        let json = fs::read_to_string(&path).with_context(|| {
            format!("Cannot read '{}'. Have you run 'prepare' first?", path.display())
        })?;

        let mut word_index: WordIndex = serde_json::from_str(&json)
            .with_context(|| format!("Invalid tokenizer state in '{}'", path.display()))?;
        word_index.restore_lookups();

        tracing::debug!("Loaded tokenizer with vocab_size={}", word_index.vocab_size());
        Ok(word_index)
    }

    pub fn save_sequence_len(&self, max_sequence_len: usize) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let path = self.dir.join(SEQUENCE_FILE);
        fs::write(&path, serde_json::to_string_pretty(&SequenceSettings { max_sequence_len })?)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        Ok(())
    }

    /// The padded length saved by `prepare`; None for artifacts
    /// written without it.
    pub fn load_sequence_len(&self) -> Result<Option<usize>> {
        let path = self.dir.join(SEQUENCE_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;
        let settings: SequenceSettings = serde_json::from_str(&json)
            .with_context(|| format!("Invalid sequence settings in '{}'", path.display()))?;
        Ok(Some(settings.max_sequence_len))
    }

    /// Load the HuggingFace view of the vocabulary.
    pub fn load_hf(&self) -> Result<Tokenizer> {
        let path = self.dir.join(HF_TOKENIZER_FILE);
        Tokenizer::from_file(&path)
            .map_err(|e| anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e))
    }
}

/// Build a tokenizer JSON in HuggingFace format with a WordLevel
/// model over the fitted vocabulary.
fn word_level_json(word_index: &WordIndex) -> serde_json::Value {
    let mut vocab = serde_json::Map::new();
    vocab.insert(PAD_TOKEN.to_string(), serde_json::json!(0));
    for (word, &id) in word_index.word_index() {
        // words past num_words are never emitted, so they fall to unk
        if word_index.within_limit(id) {
            vocab.insert(word.clone(), serde_json::json!(id));
        }
    }

    let options   = word_index.options();
    let unk_token = options.oov_token.clone().unwrap_or_else(|| PAD_TOKEN.to_string());

    let mut normalizers = Vec::new();
    if options.lower {
        normalizers.push(serde_json::json!({ "type": "Lowercase" }));
    }
    let mut separators: Vec<String> = options.filters.chars().map(String::from).collect();
    if options.split != " " && !options.split.is_empty() {
        separators.push(options.split.clone());
    }
    for sep in separators {
        normalizers.push(serde_json::json!({
            "type": "Replace",
            "pattern": { "String": sep },
            "content": " "
        }));
    }
    let normalizer = serde_json::json!({ "type": "Sequence", "normalizers": normalizers });

    serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [
            {"id": 0, "content": PAD_TOKEN, "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
        ],
        "normalizer": normalizer,
        "pre_tokenizer": {
            "type": "WhitespaceSplit"
        },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": unk_token
        }
    })
}

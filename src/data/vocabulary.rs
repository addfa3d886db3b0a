// ============================================================
// Layer 4 — Word Index Vocabulary
// ============================================================
// Builds the word → index mapping used to turn comments into
// integer sequences.
//
// How indices are assigned:
//   1. Count every word occurrence across all fitted texts,
//      remembering the order in which words were first seen
//   2. Sort words by count, most frequent first; equal counts
//      keep first-seen order (stable sort)
//   3. Number them from 1; index 0 is the padding filler
//   4. If an OOV token is configured it is placed first and
//      always gets index 1
//
// Example, fitted on ["el hotel", "hotel limpio"]:
//   hotel → 1, el → 2, limpio → 3      (vocab_size = 4)
//
// `num_words` does not shrink the index itself; it only limits
// which indices texts_to_sequences is allowed to emit.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::text::{text_to_word_sequence, DEFAULT_FILTERS, DEFAULT_SPLIT};

/// Options fixed at construction time, persisted with the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerOptions {
    /// Only indices strictly below this are emitted; 0 means no limit
    pub num_words: Option<usize>,
    /// Placeholder for unknown words; takes index 1 when set
    pub oov_token: Option<String>,
    pub lower:     bool,
    pub filters:   String,
    pub split:     String,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            num_words: None,
            oov_token: None,
            lower:     true,
            filters:   DEFAULT_FILTERS.to_string(),
            split:     DEFAULT_SPLIT.to_string(),
        }
    }
}

/// A word-level vocabulary fitted on a corpus of comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordIndex {
    options:        TokenizerOptions,
    document_count: usize,
    /// Occurrence counts in first-seen order
    word_counts:    Vec<(String, usize)>,
    /// Number of documents each word appears in
    word_docs:      HashMap<String, usize>,
    word_index:     HashMap<String, u32>,

    #[serde(skip)]
    count_slots: HashMap<String, usize>,
    #[serde(skip)]
    index_word:  HashMap<u32, String>,
}

impl WordIndex {
    pub fn new(options: TokenizerOptions) -> Self {
        Self {
            options,
            document_count: 0,
            word_counts:    Vec::new(),
            word_docs:      HashMap::new(),
            word_index:     HashMap::new(),
            count_slots:    HashMap::new(),
            index_word:     HashMap::new(),
        }
    }

    /// Count the words of every text and rebuild the index.
    /// Calling this again accumulates counts on top of the
    /// previous fit.
    pub fn fit_on_texts<S: AsRef<str>>(&mut self, texts: &[S]) {
        for text in texts {
            self.document_count += 1;
            let words = self.split(text.as_ref());

            for w in &words {
                match self.count_slots.get(w) {
                    Some(&slot) => self.word_counts[slot].1 += 1,
                    None => {
                        self.count_slots.insert(w.clone(), self.word_counts.len());
                        self.word_counts.push((w.clone(), 1));
                    }
                }
            }

            let mut seen: Vec<&String> = words.iter().collect();
            seen.sort();
            seen.dedup();
            for w in seen {
                *self.word_docs.entry(w.clone()).or_insert(0) += 1;
            }
        }

        self.rebuild_index();
        tracing::debug!(
            "Fitted on {} documents, {} distinct words",
            self.document_count,
            self.word_index.len()
        );
    }

    /// Convert each text to its list of word indices.
    pub fn texts_to_sequences<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Vec<u32>> {
        texts.iter().map(|t| self.text_to_sequence(t.as_ref())).collect()
    }

    pub fn text_to_sequence(&self, text: &str) -> Vec<u32> {
        let oov = self.oov_index();
        let mut seq = Vec::new();

        for w in self.split(text) {
            match self.word_index.get(&w) {
                Some(&i) if self.within_limit(i) => seq.push(i),
                Some(_) | None => {
                    if let Some(o) = oov {
                        seq.push(o);
                    }
                }
            }
        }
        seq
    }

    /// Map index sequences back to space-joined words, applying
    /// the same `num_words` and OOV rules as the forward direction.
    pub fn sequences_to_texts(&self, sequences: &[Vec<u32>]) -> Vec<String> {
        let oov_word = self
            .oov_index()
            .and_then(|o| self.index_word.get(&o).cloned());

        sequences
            .iter()
            .map(|seq| {
                let mut words: Vec<String> = Vec::with_capacity(seq.len());
                for &i in seq {
                    match self.index_word.get(&i) {
                        Some(w) if self.within_limit(i) => words.push(w.clone()),
                        _ => {
                            if let Some(o) = &oov_word {
                                words.push(o.clone());
                            }
                        }
                    }
                }
                words.join(" ")
            })
            .collect()
    }

    /// Number of distinct indices including the padding slot 0.
    pub fn vocab_size(&self) -> usize {
        self.word_index.len() + 1
    }

    pub fn index_of(&self, word: &str) -> Option<u32> {
        self.word_index.get(word).copied()
    }

    pub fn word_at(&self, index: u32) -> Option<&str> {
        self.index_word.get(&index).map(String::as_str)
    }

    pub fn word_count(&self, word: &str) -> Option<usize> {
        self.count_slots.get(word).map(|&slot| self.word_counts[slot].1)
    }

    pub fn doc_frequency(&self, word: &str) -> usize {
        self.word_docs.get(word).copied().unwrap_or(0)
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    pub fn word_index(&self) -> &HashMap<String, u32> {
        &self.word_index
    }

    pub fn oov_index(&self) -> Option<u32> {
        self.options
            .oov_token
            .as_ref()
            .and_then(|t| self.word_index.get(t).copied())
    }

    /// Rebuild the lookup tables that are not serialised.
    /// Must be called after deserialising a WordIndex.
    pub fn restore_lookups(&mut self) {
        self.count_slots = self
            .word_counts
            .iter()
            .enumerate()
            .map(|(slot, (w, _))| (w.clone(), slot))
            .collect();
        self.index_word = self
            .word_index
            .iter()
            .map(|(w, &i)| (i, w.clone()))
            .collect();
    }

    fn rebuild_index(&mut self) {
        let mut ranked: Vec<&(String, usize)> = self.word_counts.iter().collect();
        // sort_by is stable: ties keep first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let mut ordered: Vec<String> = Vec::with_capacity(ranked.len() + 1);
        if let Some(oov) = &self.options.oov_token {
            ordered.push(oov.clone());
        }
        ordered.extend(
            ranked
                .into_iter()
                .map(|(w, _)| w.clone())
                .filter(|w| Some(w) != self.options.oov_token.as_ref()),
        );

        self.word_index = ordered
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i as u32 + 1))
            .collect();
        self.index_word = ordered
            .into_iter()
            .enumerate()
            .map(|(i, w)| (i as u32 + 1, w))
            .collect();
    }

    /// Whether texts_to_sequences may emit this index.
    pub fn within_limit(&self, index: u32) -> bool {
        // num_words = 0 means no limit, same as None
        match self.options.num_words {
            Some(n) if n > 0 => (index as usize) < n,
            _ => true,
        }
    }

    fn split(&self, text: &str) -> Vec<String> {
        text_to_word_sequence(text, &self.options.filters, self.options.lower, &self.options.split)
    }
}

impl Default for WordIndex {
    fn default() -> Self {
        Self::new(TokenizerOptions::default())
    }
}

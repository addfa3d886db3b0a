// ============================================================
// Layer 4 — Word Splitting
// ============================================================
// Turns a raw comment into the list of words the vocabulary
// counts and indexes.
//
// Splitting steps (applied in order):
//   1. Lowercase the whole text (when enabled)
//   2. Replace every filtered character with the split string
//   3. Split on the split string
//   4. Drop empty pieces left by runs of separators
//
// Apostrophes are NOT in the default filter set, so "it's"
// stays one word. Accented letters pass through untouched.

/// Punctuation stripped before splitting, plus tab and newline.
pub const DEFAULT_FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

/// Separator used after filtering.
pub const DEFAULT_SPLIT: &str = " ";

/// Split `text` into words.
///
/// An empty `split` is treated as a single space so the call
/// can never loop on a zero-width separator.
pub fn text_to_word_sequence(text: &str, filters: &str, lower: bool, split: &str) -> Vec<String> {
    let split = if split.is_empty() { DEFAULT_SPLIT } else { split };

    let text = if lower { text.to_lowercase() } else { text.to_string() };

    let mut filtered = String::with_capacity(text.len());
    for c in text.chars() {
        if filters.contains(c) {
            filtered.push_str(split);
        } else {
            filtered.push(c);
        }
    }

    filtered
        .split(split)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

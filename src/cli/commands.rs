// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `prepare` and `evaluate`, and
// all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, enums, etc.)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::prepare_use_case::PrepareConfig;
use crate::data::loader::{DEFAULT_COLUMN, DEFAULT_SOURCE};
use crate::data::padding::Side;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the reviews, fit the tokenizer and pad the sequences
    Prepare(PrepareArgs),

    /// Label a comment as Positivo or Negativo with a pretrained classifier
    Evaluate(EvaluateArgs),
}

/// Which end of a sequence to pad or truncate.
/// Kept here so the data layer never sees clap types.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SideArg {
    Pre,
    Post,
}

impl From<SideArg> for Side {
    fn from(s: SideArg) -> Self {
        match s {
            SideArg::Pre  => Side::Pre,
            SideArg::Post => Side::Post,
        }
    }
}

#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// CSV location: an http(s) URL or a local file path
    #[arg(long, default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Header of the column holding the review text
    #[arg(long, default_value = DEFAULT_COLUMN)]
    pub column: String,

    /// Every sequence is padded or truncated to this many indices
    #[arg(long, default_value_t = 100)]
    pub max_seq_len: usize,

    /// Only emit word indices below this limit
    #[arg(long)]
    pub num_words: Option<usize>,

    /// Placeholder word for out-of-vocabulary words (index 1)
    #[arg(long)]
    pub oov_token: Option<String>,

    #[arg(long, value_enum, default_value_t = SideArg::Post)]
    pub padding: SideArg,

    #[arg(long, value_enum, default_value_t = SideArg::Post)]
    pub truncating: SideArg,

    /// Directory to write tokenizer.json and word_index.json
    #[arg(long, default_value = "artifacts")]
    pub output_dir: String,
}

/// Convert CLI PrepareArgs into the application-layer PrepareConfig.
impl From<PrepareArgs> for PrepareConfig {
    fn from(a: PrepareArgs) -> Self {
        PrepareConfig {
            source:           a.source,
            column:           a.column,
            max_sequence_len: a.max_seq_len,
            num_words:        a.num_words,
            oov_token:        a.oov_token,
            padding:          a.padding.into(),
            truncating:       a.truncating.into(),
            output_dir:       a.output_dir,
        }
    }
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// The comment to classify
    #[arg(long)]
    pub comment: String,

    /// Directory holding the tokenizer and the classifier checkpoint
    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,

    /// Defaults to the length `prepare` stored with the tokenizer
    #[arg(long)]
    pub max_seq_len: Option<usize>,
}

// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and delegates everything else to Layer 2.
//
// Two commands are supported:
//   1. `prepare`  — fetch CSV, fit tokenizer, pad sequences
//   2. `evaluate` — label one comment as Positivo / Negativo

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EvaluateArgs, PrepareArgs};

#[derive(Parser, Debug)]
#[command(
    name = "review-sentiment",
    version = "0.1.0",
    about = "Tokenize and pad review comments, then label them with a pretrained sentiment classifier."
)]
pub struct Cli {
    /// The subcommand to run (prepare or evaluate)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args)  => run_prepare(args),
            Commands::Evaluate(args) => run_evaluate(args),
        }
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    use crate::application::prepare_use_case::PrepareUseCase;

    tracing::info!("Preparing reviews from: {}", args.source);

    let prepared = PrepareUseCase::new(args.into()).execute()?;
    let report = &prepared.report;

    println!("Reviews:      {}", report.documents);
    println!("total_words:  {}", report.total_words);
    println!("Padded shape: ({}, {})", report.shape.0, report.shape.1);
    if report.truncated > 0 {
        println!("Truncated:    {}", report.truncated);
    }
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    use crate::application::evaluate_use_case::EvaluateUseCase;

    let use_case = EvaluateUseCase::from_artifacts(&args.artifacts_dir)?;
    tracing::info!(
        "Padding comments to {}",
        args.max_seq_len.unwrap_or(use_case.max_sequence_len())
    );
    let label = use_case.evaluate(&args.comment, args.max_seq_len)?;
    println!("{}", label);
    Ok(())
}

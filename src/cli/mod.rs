// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and delegates the work to Layer 2 (application).
//
// Three commands are supported:
//   1. `prepare` — clean, encode and split a dataset
//   2. `train`   — fit, evaluate and save a regressor
//   3. `predict` — load a saved regressor and predict new rows

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PredictArgs, PrepareArgs, TrainArgs};

use crate::application::{
    config::ascii_delimiter,
    predict_use_case::PredictUseCase,
    prepare_use_case::PrepareUseCase,
    train_use_case::TrainUseCase,
};
use crate::infra::report::format_metrics;

#[derive(Parser, Debug)]
#[command(
    name = "student-grades",
    version,
    about = "Prepare student performance data and predict final grades."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Route to the matching use case; this layer only prints.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args) => run_prepare(args),
            Commands::Train(args)   => run_train(args),
            Commands::Predict(args) => run_predict(args),
        }
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    let summary = PrepareUseCase::new(args.try_into()?).execute()?;

    println!(
        "Training set: {} records -> {}",
        summary.n_training,
        summary.train_path.display()
    );
    println!(
        "Holdout set:  {} records -> {}",
        summary.n_holdout,
        summary.holdout_path.display()
    );
    Ok(())
}

fn run_train(args: TrainArgs) -> Result<()> {
    tracing::info!("Starting training on '{}'", args.pipeline.data.display());

    let out    = args.out.clone();
    let report = TrainUseCase::new(args.try_into()?).execute()?;

    println!("{}", format_metrics(&report.metrics));
    println!(
        "\nTrained on {} records, evaluated on {}. Artifacts saved to '{}'.",
        report.n_training,
        report.n_holdout,
        out.display()
    );
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    let use_case  = PredictUseCase::new(&args.model)?;
    let delimiter = args.delimiter.map(ascii_delimiter).transpose()?;

    let batch = use_case.predict(&args.data, delimiter)?;

    println!("line,predicted_{}", use_case.target());
    for (line, p) in batch.rows() {
        let line = line.map(|l| l.to_string()).unwrap_or_default();
        println!("{line},{p:.4}");
    }
    if batch.skipped > 0 {
        eprintln!("{} incomplete records skipped", batch.skipped);
    }
    Ok(())
}

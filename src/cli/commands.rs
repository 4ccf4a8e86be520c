// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands `prepare`, `train` and
// `predict` and all their configurable flags.
//
// Pipeline settings are resolved in three steps, each one
// overriding the previous:
//
//   1. --preset      (built-in field lists and encodings)
//   2. --config      (PipelineConfig JSON file)
//   3. --holdout / --seed / --delimiter

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::{
    config::{PipelineConfig, Preset},
    prepare_use_case::PrepareConfig,
    train_use_case::TrainConfig,
};
use crate::ml::trainer::TrainerConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean, encode and split a dataset into train.csv / holdout.csv
    Prepare(PrepareArgs),

    /// Fit the regressor, evaluate it on the holdout and save it
    Train(TrainArgs),

    /// Predict the target for new records with a saved model
    Predict(PredictArgs),
}

/// Built-in presets as accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresetArg {
    /// Prior grades, study time, family education, school
    Grades,
    /// Demographics, support, leisure and alcohol use
    Lifestyle,
}

impl From<PresetArg> for Preset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::Grades    => Preset::Grades,
            PresetArg::Lifestyle => Preset::Lifestyle,
        }
    }
}

/// Flags shared by `prepare` and `train`.
#[derive(Args, Debug)]
pub struct PipelineArgs {
    /// Delimited student records with a header row
    #[arg(long, default_value = "data/student-mat.csv")]
    pub data: PathBuf,

    /// Built-in field selection and encodings
    #[arg(long, value_enum, default_value_t = PresetArg::Grades)]
    pub preset: PresetArg,

    /// PipelineConfig JSON replacing the preset
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fraction of records held out for evaluation, in (0, 1)
    #[arg(long)]
    pub holdout: Option<f64>,

    /// Seed for the split and for training
    #[arg(long)]
    pub seed: Option<u64>,

    /// Field delimiter of the data file (the UCI download uses ';')
    #[arg(long)]
    pub delimiter: Option<char>,
}

impl PipelineArgs {
    pub fn resolve(&self) -> Result<PipelineConfig> {
        let mut cfg = match &self.config {
            Some(path) => PipelineConfig::load(path)
                .with_context(|| format!("--config '{}'", path.display()))?,
            None => PipelineConfig::from_preset(self.preset.into()),
        };

        if let Some(fraction) = self.holdout {
            cfg.holdout_fraction = fraction;
        }
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        if let Some(delimiter) = self.delimiter {
            cfg.delimiter = delimiter;
        }
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
pub struct PrepareArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Directory for train.csv and holdout.csv
    #[arg(long, default_value = "prepared")]
    pub out: PathBuf,
}

impl TryFrom<PrepareArgs> for PrepareConfig {
    type Error = anyhow::Error;

    fn try_from(a: PrepareArgs) -> Result<Self> {
        Ok(PrepareConfig {
            pipeline:  a.pipeline.resolve()?,
            data_path: a.pipeline.data,
            out_dir:   a.out,
        })
    }
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Artifact directory for the model, metrics and reports
    #[arg(long, default_value = "artifacts")]
    pub out: PathBuf,

    /// Full passes over the training split
    #[arg(long, default_value_t = 200)]
    pub epochs: usize,

    /// Records per gradient step
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-2)]
    pub lr: f64,

    /// Width of the hidden layer
    #[arg(long, default_value_t = 16)]
    pub hidden_size: usize,
}

/// The application layer never sees clap types.
impl TryFrom<TrainArgs> for TrainConfig {
    type Error = anyhow::Error;

    fn try_from(a: TrainArgs) -> Result<Self> {
        let pipeline = a.pipeline.resolve()?;
        let trainer  = TrainerConfig {
            epochs:        a.epochs,
            batch_size:    a.batch_size,
            learning_rate: a.lr,
            hidden_size:   a.hidden_size,
            seed:          pipeline.seed,
        };
        Ok(TrainConfig {
            data_path:    a.pipeline.data,
            artifact_dir: a.out,
            pipeline,
            trainer,
        })
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Records to predict; the target column may be missing
    #[arg(long)]
    pub data: PathBuf,

    /// Artifact directory written by `train`
    #[arg(long, default_value = "artifacts")]
    pub model: PathBuf,

    /// Field delimiter, if different from the training data
    #[arg(long)]
    pub delimiter: Option<char>,
}

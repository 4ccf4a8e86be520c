// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores a fitted regressor.
//
// What gets saved in the artifact directory:
//   1. model.mpk.gz          — network weights (burn CompactRecorder:
//                              MessagePack + gzip)
//   2. model_meta.json       — feature names, hidden size and
//                              standardisation statistics
//   3. pipeline_config.json  — fields, target and encoding tables
//                              used to prepare the training data
//
// Weights alone cannot be loaded: the architecture has to be
// rebuilt from model_meta.json first, and prediction inputs
// have to be prepared with the same pipeline config.
//
// A training run writes into a sibling staging directory
// (`.artifacts.partial` next to `artifacts/`) and only moves
// the files into place once every one of them was written.
// A failed run removes the staging directory and leaves any
// earlier artifacts untouched.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::application::config::PipelineConfig;
use crate::ml::inferencer::ModelMeta;
use crate::ml::model::GradeRegressor;

const MODEL_FILE:  &str = "model";
const META_FILE:   &str = "model_meta.json";
const CONFIG_FILE: &str = "pipeline_config.json";

/// Reads and writes the artifact files of one directory. The
/// directory is created on the first write.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write weights to {dir}/model.mpk.gz
    pub fn save_model<B: Backend>(&self, model: &GradeRegressor<B>) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        // The recorder appends its own extension
        let path = self.dir.join(MODEL_FILE);
        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save model to '{}'", path.display()))?;

        tracing::debug!("Saved model weights to '{}'", path.display());
        Ok(())
    }

    /// Load weights into `model`, which must already have the
    /// saved architecture.
    pub fn load_model<B: Backend>(
        &self,
        model:  GradeRegressor<B>,
        device: &B::Device,
    ) -> Result<GradeRegressor<B>> {
        let path = self.dir.join(MODEL_FILE);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!(
                    "Cannot load model '{}'. Have you run 'train' first?",
                    path.display()
                )
            })?;

        Ok(model.load_record(record))
    }

    /// Write {dir}/model_meta.json: what is needed to rebuild
    /// the network and scale its inputs.
    pub fn save_meta(&self, meta: &ModelMeta) -> Result<()> {
        self.write_json(META_FILE, meta)
    }

    /// Read {dir}/model_meta.json
    pub fn load_meta(&self) -> Result<ModelMeta> {
        self.read_json(META_FILE)
    }

    /// Write {dir}/pipeline_config.json so `predict` prepares
    /// new records exactly like the training data.
    pub fn save_config(&self, cfg: &PipelineConfig) -> Result<()> {
        self.write_json(CONFIG_FILE, cfg)
    }

    /// Read {dir}/pipeline_config.json
    pub fn load_config(&self) -> Result<PipelineConfig> {
        self.read_json(CONFIG_FILE)
    }

    /// Pretty-printed JSON, creating the directory if needed.
    fn write_json<T: serde::Serialize>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;

        tracing::debug!("Saved '{}'", path.display());
        Ok(())
    }

    /// Missing files point the user at `train`.
    fn read_json<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read '{}'. Make sure you have run 'train' before 'predict'.",
                path.display()
            )
        })?;
        serde_json::from_str(&json)
            .with_context(|| format!("Malformed JSON in '{}'", path.display()))
    }
}

// ─── Staged Artifact Directory ────────────────────────────────────────────────

/// Staging directory for one training run. Files written to
/// [`ArtifactStage::dir`] reach the artifact directory only on
/// [`ArtifactStage::commit`]; dropping the stage without
/// committing deletes them.
pub struct ArtifactStage {
    staging:   PathBuf,
    target:    PathBuf,
    committed: bool,
}

impl ArtifactStage {
    /// Start from an empty staging directory next to `target`.
    pub fn begin(target: impl Into<PathBuf>) -> Result<Self> {
        let target  = target.into();
        let staging = staging_path(&target);

        if staging.exists() {
            fs::remove_dir_all(&staging).with_context(|| {
                format!("Cannot clear stale staging directory '{}'", staging.display())
            })?;
        }
        fs::create_dir_all(&staging)
            .with_context(|| format!("Cannot create '{}'", staging.display()))?;

        tracing::debug!("Staging artifacts in '{}'", staging.display());
        Ok(Self { staging, target, committed: false })
    }

    /// Where this run writes its files.
    pub fn dir(&self) -> &Path {
        &self.staging
    }

    /// Move every staged file into the artifact directory,
    /// replacing files of the same name.
    pub fn commit(mut self) -> Result<()> {
        fs::create_dir_all(&self.target)
            .with_context(|| format!("Cannot create '{}'", self.target.display()))?;

        let entries = fs::read_dir(&self.staging)
            .with_context(|| format!("Cannot list '{}'", self.staging.display()))?;
        for entry in entries {
            let entry = entry?;
            let dest  = self.target.join(entry.file_name());
            fs::rename(entry.path(), &dest)
                .with_context(|| format!("Cannot move artifact to '{}'", dest.display()))?;
        }

        fs::remove_dir(&self.staging)
            .with_context(|| format!("Cannot remove '{}'", self.staging.display()))?;
        self.committed = true;

        tracing::debug!("Committed artifacts to '{}'", self.target.display());
        Ok(())
    }
}

impl Drop for ArtifactStage {
    fn drop(&mut self) {
        if self.committed || !self.staging.exists() {
            return;
        }
        if let Err(e) = fs::remove_dir_all(&self.staging) {
            tracing::warn!(
                "Could not remove staging directory '{}': {e}",
                self.staging.display()
            );
        }
    }
}

/// `out/artifacts` → `out/.artifacts.partial`
fn staging_path(target: &Path) -> PathBuf {
    match target.file_name() {
        Some(name) => target.with_file_name(format!(".{}.partial", name.to_string_lossy())),
        None       => target.join(".partial"),
    }
}

// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores the classifier using Burn's CompactRecorder.
//
// What a checkpoint consists of:
//   1. model.mpk.gz       — all learned parameters
//   2. model_config.json  — the SentimentClassifierConfig
//
// Why save the config separately?
//   Loading weights needs a model of the exact same shape
//   (vocab_size, d_model, num_classes). The config is read
//   first, the model is initialised from it, and only then
//   are the weights loaded into it.
//
// Burn's CompactRecorder:
//   - Serialises model parameters to MessagePack format
//   - Compresses with gzip for smaller file size
//   - Type-safe: loading fails if architecture doesn't match
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use std::{fs, path::PathBuf};

use crate::ml::classifier::{SentimentClassifier, SentimentClassifierConfig};

const MODEL_FILE:  &str = "model";
const CONFIG_FILE: &str = "model_config.json";

/// Manages saving and loading of the classifier checkpoint.
/// All files are stored in the configured directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Save model weights as {dir}/model.mpk.gz
    /// (the recorder appends the extension).
    pub fn save_model<B: Backend>(&self, model: &SentimentClassifier<B>) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let path = self.dir.join(MODEL_FILE);
        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save checkpoint to '{}'", path.display()))?;

        tracing::debug!("Saved classifier weights to '{}'", path.display());
        Ok(())
    }

    /// Load weights into `model`, which must have been built
    /// from the saved config.
    pub fn load_model<B: Backend>(
        &self,
        model:  SentimentClassifier<B>,
        device: &B::Device,
    ) -> Result<SentimentClassifier<B>> {
        let path = self.dir.join(MODEL_FILE);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!(
                    "Cannot load checkpoint '{}.mpk.gz'. Place a pretrained classifier there first.",
                    path.display()
                )
            })?;

        Ok(model.load_record(record))
    }

    pub fn save_config(&self, cfg: &SentimentClassifierConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved classifier config to '{}'", path.display());
        Ok(())
    }

    pub fn load_config(&self) -> Result<SentimentClassifierConfig> {
        let path = self.dir.join(CONFIG_FILE);

        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read classifier config from '{}'", path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Invalid classifier config in '{}'", path.display()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn sample_ids() -> Tensor<TestBackend, 2, Int> {
        Tensor::<TestBackend, 1, Int>::from_ints([1, 4, 2, 0, 3, 0, 0, 0].as_slice(), &Default::default())
            .reshape([2, 4])
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path());

        let cfg = SentimentClassifierConfig::new(300, 16).with_num_classes(3);
        ckpt.save_config(&cfg).unwrap();
        let back = ckpt.load_config().unwrap();

        assert_eq!(back.vocab_size, 300);
        assert_eq!(back.d_model, 16);
        assert_eq!(back.num_classes, 3);
        assert_eq!(back.pad_index, 0);
    }

    #[test]
    fn test_weights_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path());
        let device = Default::default();

        let cfg = SentimentClassifierConfig::new(10, 8);
        let original: SentimentClassifier<TestBackend> = cfg.init(&device);
        ckpt.save_model(&original).unwrap();

        let restored = ckpt.load_model(cfg.init::<TestBackend>(&device), &device).unwrap();

        let a: Vec<f32> = original.forward(sample_ids()).into_data().to_vec::<f32>().unwrap();
        let b: Vec<f32> = restored.forward(sample_ids()).into_data().to_vec::<f32>().unwrap();
        // CompactRecorder stores half precision
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-2, "{x} vs {y}");
        }
    }

    #[test]
    fn test_missing_checkpoint_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path());
        let device = Default::default();

        let err = ckpt
            .load_model(SentimentClassifierConfig::new(4, 2).init::<TestBackend>(&device), &device)
            .unwrap_err();
        assert!(format!("{err:#}").contains("model.mpk.gz"));
        assert!(ckpt.load_config().is_err());
    }
}

// ============================================================
// Layer 6 — Model Directory
// ============================================================
// Reads a pretrained model from its directory on disk.
//
// What a model directory holds:
//   1. config.json      — model architecture (a burn Config)
//   2. model.mpk.gz     — weights written by burn's CompactRecorder
//   3. tokenizer.json   — HuggingFace tokenizers vocabulary
//
// The config is read first so the exact architecture can be
// rebuilt before the weights are loaded into it; CompactRecorder
// refuses records whose shape does not match the module.
//
// Layout:
//   checkpoint/
//     config.json
//     model.mpk.gz
//     tokenizer.json
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use serde::de::DeserializeOwned;

/// File names inside a model directory
pub const CONFIG_FILE:  &str = "config.json";
pub const WEIGHTS_STEM: &str = "model";

/// A pretrained model directory.
#[derive(Debug, Clone)]
pub struct ModelDir {
    dir: PathBuf,
}

impl ModelDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Read and deserialise `config.json`.
    pub fn load_config<C: DeserializeOwned>(&self) -> Result<C> {
        let path = self.dir.join(CONFIG_FILE);

        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Cannot read model config '{}'", path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Invalid model config '{}'", path.display()))
    }

    /// Load the saved weights into a freshly initialised module.
    ///
    /// The module must have the same architecture as the one that
    /// was recorded, which is why callers build it from load_config().
    pub fn load_model<B: Backend, M: Module<B>>(
        &self,
        model:  M,
        device: &B::Device,
    ) -> Result<M> {
        // Recorder appends the .mpk.gz extension itself
        let path = self.dir.join(WEIGHTS_STEM);

        tracing::info!("Loading weights from '{}'", self.dir.display());

        let record: M::Record = Recorder::<B>::load(&CompactRecorder::new(), path.clone(), device)
            .with_context(|| format!("Cannot load weights '{}'", path.display()))?;

        Ok(model.load_record(record))
    }

    /// Write `config.json`; used to build fixture directories.
    #[cfg(test)]
    pub fn save_config<C: serde::Serialize>(&self, cfg: &C) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(CONFIG_FILE);
        std::fs::write(&path, serde_json::to_string_pretty(cfg)?)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))
    }

    /// Record a module's weights; used to build fixture directories.
    #[cfg(test)]
    pub fn save_model<B: Backend, M: Module<B>>(&self, model: &M) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(WEIGHTS_STEM);
        Recorder::<B>::record(&CompactRecorder::new(), model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save weights to '{}'", path.display()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct TinyConfig {
        d_model: usize,
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let md  = ModelDir::new(dir.path());
        md.save_config(&TinyConfig { d_model: 16 }).unwrap();

        let loaded: TinyConfig = md.load_config().unwrap();
        assert_eq!(loaded, TinyConfig { d_model: 16 });
    }

    #[test]
    fn test_missing_config_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelDir::new(dir.path()).load_config::<TinyConfig>().unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE));
    }
}

// ============================================================
// Layer 6 — Checkpoint Store
// ============================================================
// Saves and restores trained models together with the exact
// vocabulary they were trained with.
//
// One directory per checkpoint, named by infra::naming:
//
//   checkpoints/
//     demo__synth50__2__8__0.002/
//       model.mpk      ← weights (NamedMpkFileRecorder, full precision)
//       model.json     ← WordLstmConfig, to rebuild the architecture
//       vocab.json     ← index-to-token list
//       metrics.csv    ← per-epoch training loss
//
// Everything is written into a hidden `.<name>.partial/`
// directory first and renamed into place as the last step,
// so an interrupted run never leaves a loadable half-checkpoint.
// Hidden entries are ignored when listing.

use std::{fs, path::{Path, PathBuf}};
use burn::{
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder},
};

use crate::data::vocab::Vocab;
use crate::domain::checkpoint::CheckpointDescriptor;
use crate::error::{Result, TraceError};
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::infra::naming::decode_checkpoint_name;
use crate::ml::model::{WordLstm, WordLstmConfig};

const WEIGHTS_STEM: &str  = "model";
const CONFIG_FILE: &str   = "model.json";
const VOCAB_FILE: &str    = "vocab.json";

type WeightsRecorder = NamedMpkFileRecorder<FullPrecisionSettings>;

/// Manages the checkpoints directory.
pub struct CheckpointStore {
    dir: PathBuf,
}

impl CheckpointStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Persist model weights, architecture, vocabulary and training
    /// metrics under `name`, replacing any checkpoint of that name.
    pub fn save<B: Backend>(
        &self,
        name:    &str,
        model:   &WordLstm<B>,
        config:  &WordLstmConfig,
        vocab:   &Vocab,
        history: &[EpochMetrics],
    ) -> Result<PathBuf> {
        let staging = self.dir.join(format!(".{name}.partial"));
        if staging.exists() {
            fs::remove_dir_all(&staging).map_err(|e| TraceError::io(e, &staging))?;
        }
        fs::create_dir_all(&staging).map_err(|e| TraceError::io(e, &staging))?;

        WeightsRecorder::new()
            .record(model.clone().into_record(), staging.join(WEIGHTS_STEM))
            .map_err(|e| TraceError::Checkpoint(format!("cannot record weights: {e:?}")))?;

        let config_path = staging.join(CONFIG_FILE);
        config
            .save(&config_path)
            .map_err(|e| TraceError::io(e, &config_path))?;

        let vocab_path = staging.join(VOCAB_FILE);
        fs::write(&vocab_path, serde_json::to_string(vocab.tokens())?)
            .map_err(|e| TraceError::io(e, &vocab_path))?;

        MetricsLogger::new(&staging)?.log_all(history)?;

        let target = self.path_of(name);
        if target.exists() {
            tracing::warn!("Replacing existing checkpoint '{}'", name);
            fs::remove_dir_all(&target).map_err(|e| TraceError::io(e, &target))?;
        }
        fs::rename(&staging, &target).map_err(|e| TraceError::io(e, &target))?;

        tracing::info!("Saved checkpoint '{}' to '{}'", name, target.display());
        Ok(target)
    }

    /// Restore the model and the vocabulary it was trained with.
    ///
    /// The vocabulary goes through `Vocab::restore`, never
    /// `Vocab::build`: ids must mean exactly what they meant
    /// during training.
    pub fn load<B: Backend>(&self, name: &str, device: &B::Device) -> Result<(WordLstm<B>, Vocab)> {
        let dir = self.path_of(name);
        if !dir.is_dir() {
            return Err(TraceError::NotFound { kind: "checkpoint", name: name.to_string() });
        }

        let tokens = read_vocab_tokens(&dir.join(VOCAB_FILE), name)?;
        let vocab  = Vocab::restore(&tokens);

        let config = WordLstmConfig::load(dir.join(CONFIG_FILE))
            .map_err(|e| TraceError::Checkpoint(format!("cannot read model config for '{name}': {e:?}")))?;

        if vocab.len() != config.vocab_size {
            return Err(TraceError::VocabularyMismatch { vocab: vocab.len(), model: config.vocab_size });
        }

        let record = WeightsRecorder::new()
            .load(dir.join(WEIGHTS_STEM), device)
            .map_err(|e| TraceError::Checkpoint(format!("cannot load weights for '{name}': {e:?}")))?;

        let model = config.init::<B>(device).load_record(record);
        tracing::info!("Restored checkpoint '{}' ({} tokens)", name, vocab.len());
        Ok((model, vocab))
    }

    /// Every well-formed checkpoint, sorted by name.
    /// Directories whose names do not decode are skipped with a warning.
    pub fn list(&self) -> Result<Vec<CheckpointDescriptor>> {
        let mut checkpoints = Vec::new();

        for name in visible_subdirs(&self.dir)? {
            match decode_checkpoint_name(&name) {
                Ok(descriptor) => checkpoints.push(descriptor),
                Err(e) => tracing::warn!("Skipping checkpoint entry '{}': {}", name, e),
            }
        }

        checkpoints.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!("Found {} checkpoints", checkpoints.len());
        Ok(checkpoints)
    }
}

fn read_vocab_tokens(path: &Path, name: &str) -> Result<Vec<String>> {
    let json = fs::read_to_string(path).map_err(|e| {
        tracing::error!("Cannot read vocabulary '{}': {}", path.display(), e);
        TraceError::NotFound { kind: "checkpoint", name: name.to_string() }
    })?;
    Ok(serde_json::from_str(&json)?)
}

/// Names of non-hidden subdirectories; empty if `dir` does not exist.
pub(crate) fn visible_subdirs(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| TraceError::io(e, dir))? {
        let path = entry.map_err(|e| TraceError::io(e, dir))?.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if !name.starts_with('.') {
                names.push(name.to_string());
            }
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::batcher::{collate, LmBatch};
    use crate::data::dataset::LmDataset;
    use crate::ml::loss::sequence_losses;

    type TestBackend = burn::backend::NdArray;

    fn tiny(vocab: &Vocab) -> (WordLstmConfig, WordLstm<TestBackend>) {
        let config = WordLstmConfig::new(vocab.len()).with_embedding_dim(4).with_hidden_dim(6);
        let model  = config.init::<TestBackend>(&burn::backend::ndarray::NdArrayDevice::default());
        (config, model)
    }

    #[test]
    fn test_save_then_load_restores_vocab_and_weights() {
        let tmp    = tempfile::tempdir().unwrap();
        let store  = CheckpointStore::new(tmp.path());
        let device = burn::backend::ndarray::NdArrayDevice::default();

        let ds = LmDataset::new(&["alice paints portraits.", "bob writes poems."], None);
        let (config, model) = tiny(ds.vocab());
        let history = [EpochMetrics::new(1, 2.5)];

        store.save("demo__toy__1__2__0.01", &model, &config, ds.vocab(), &history).unwrap();
        let (restored, vocab) = store.load::<TestBackend>("demo__toy__1__2__0.01", &device).unwrap();

        assert_eq!(vocab.tokens(), ds.vocab().tokens());

        let batch  = || LmBatch::<TestBackend>::from_collated(collate(ds.samples()), &device);
        let before = sequence_losses(&model, batch()).into_data().to_vec::<f32>().unwrap();
        let after  = sequence_losses(&restored, batch()).into_data().to_vec::<f32>().unwrap();
        for (a, b) in before.iter().zip(&after) {
            assert!((a - b).abs() < 1e-6);
        }

        assert!(tmp.path().join("demo__toy__1__2__0.01").join("metrics.csv").exists());
        assert!(!tmp.path().join(".demo__toy__1__2__0.01.partial").exists());
    }

    #[test]
    fn test_load_missing_checkpoint_is_not_found() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = CheckpointStore::new(tmp.path());
        let err   = store
            .load::<TestBackend>("nope__c__1__1__0.1", &Default::default())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_skips_malformed_and_hidden_entries() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("demo__synth__2__8__0.002")).unwrap();
        fs::create_dir(tmp.path().join("web__100__64__0.002")).unwrap();
        fs::create_dir(tmp.path().join("broken__name")).unwrap();
        fs::create_dir(tmp.path().join(".demo__x__1__1__0.1.partial")).unwrap();

        let list = CheckpointStore::new(tmp.path()).list().unwrap();
        let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["demo__synth__2__8__0.002", "web__100__64__0.002"]);
    }
}

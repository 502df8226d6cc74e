// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates one training run in order:
//
//   Step 1: Read the corpus             (Layer 4 - data)
//   Step 2: Member / held-out split     (Layer 4 - data)
//   Step 3: Build vocabulary + dataset  (Layer 4 - data)
//   Step 4: Initialise the LSTM         (Layer 5 - ml)
//   Step 5: Run the training loop       (Layer 5 - ml)
//   Step 6: Persist the checkpoint      (Layer 6 - infra)
//
// Only the member partition ever reaches the model. The
// held-out 30% is left for the attack.
//
// Reference: Burn Book §5 (Training)

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use burn::{module::AutodiffModule, tensor::backend::AutodiffBackend};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::LmDataset,
    loader::CorpusStore,
    splitter::{non_blank_lines, split_members},
};
use crate::domain::{checkpoint::CheckpointDescriptor, traits::CorpusSource};
use crate::error::TraceError;
use crate::infra::{
    checkpoint::CheckpointStore,
    naming::{encode_checkpoint_name, SEPARATOR},
    ResourceLayout, DEFAULT_RESOURCE_DIR,
};
use crate::ml::{
    model::WordLstmConfig,
    trainer::{train, TrainingSettings},
};

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything one training run needs. Serialisable so a run can be
// described in JSON; the CLI builds it from TrainArgs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub resource_dir:  PathBuf,
    pub corpus:        String,
    pub name_prefix:   Option<String>,
    pub epochs:        usize,
    pub batch_size:    usize,
    pub learning_rate: f64,
    pub embedding_dim: usize,
    pub hidden_dim:    usize,
    pub seed:          u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            resource_dir:  PathBuf::from(DEFAULT_RESOURCE_DIR),
            corpus:        "synthetic".to_string(),
            name_prefix:   None,
            epochs:        100,
            batch_size:    64,
            learning_rate: 2e-3,
            embedding_dim: 128,
            hidden_dim:    256,
            seed:          42,
        }
    }
}

impl TrainConfig {
    /// Name the resulting checkpoint will be stored under.
    pub fn checkpoint_name(&self) -> String {
        encode_checkpoint_name(
            self.name_prefix.as_deref(),
            &self.corpus,
            self.epochs,
            self.batch_size,
            self.learning_rate,
        )
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Train on `device` and persist the checkpoint.
    /// The backend is chosen by the caller.
    pub fn execute<B: AutodiffBackend>(&self, device: &B::Device) -> Result<CheckpointDescriptor> {
        let cfg = &self.config;
        ensure!(cfg.batch_size > 0, "batch size must be at least 1");
        ensure!(
            !cfg.corpus.contains(SEPARATOR),
            "corpus name '{}' must not contain '{}'", cfg.corpus, SEPARATOR,
        );

        let layout = ResourceLayout::new(&cfg.resource_dir);

        // ── Step 1: Read the corpus ───────────────────────────────────────────
        // A missing corpus aborts here, before anything is trained
        let corpora = CorpusStore::new(layout.corpora());
        let lines   = corpora
            .read_lines(&cfg.corpus)
            .with_context(|| format!("Cannot train on corpus '{}'", cfg.corpus))?;

        // ── Step 2: Member / held-out split ───────────────────────────────────
        let (members, held_out) = split_members(non_blank_lines(&lines));
        if members.is_empty() {
            return Err(TraceError::EmptyPartition("member"))
                .with_context(|| format!("Corpus '{}' is too small to train on", cfg.corpus));
        }
        if held_out.is_empty() {
            tracing::warn!("Corpus '{}' leaves no held-out lines; attacks on it will fail", cfg.corpus);
        }
        tracing::info!("Split: {} member lines, {} held out", members.len(), held_out.len());

        // ── Step 3: Vocabulary + dataset from members only ────────────────────
        let dataset = LmDataset::new(&members, None);
        let vocab   = dataset.vocab().clone();
        tracing::info!("Vocabulary: {} tokens", vocab.len());

        // ── Step 4: Model ─────────────────────────────────────────────────────
        let model_config = WordLstmConfig::new(vocab.len())
            .with_embedding_dim(cfg.embedding_dim)
            .with_hidden_dim(cfg.hidden_dim);
        let model = model_config.init::<B>(device);

        // ── Step 5: Training loop (Layer 5) ───────────────────────────────────
        let settings = TrainingSettings {
            epochs:        cfg.epochs,
            batch_size:    cfg.batch_size,
            learning_rate: cfg.learning_rate,
            seed:          cfg.seed,
        };
        let (model, history) = train::<B, _>(model, dataset, &settings, device);

        // ── Step 6: Persist once, after the last epoch ────────────────────────
        let name  = cfg.checkpoint_name();
        let store = CheckpointStore::new(layout.checkpoints());
        store
            .save(&name, &model.valid(), &model_config, &vocab, &history)
            .with_context(|| format!("Failed to save checkpoint '{name}'"))?;

        Ok(CheckpointDescriptor {
            name,
            prefix:        cfg.name_prefix.clone().filter(|p| !p.is_empty()),
            corpus:        cfg.corpus.clone(),
            epochs:        cfg.epochs,
            batch_size:    cfg.batch_size,
            learning_rate: cfg.learning_rate,
        })
    }
}

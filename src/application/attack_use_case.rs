// ============================================================
// Layer 2 — AttackUseCase
// ============================================================
// One membership inference run against one checkpoint:
//
//   Step 1: Partition the corpus        (same 70% cut as training)
//   Step 2: Restore model + vocabulary  (Layer 6 - infra)
//   Step 3: Score both populations      (Layer 5 - ml)
//   Step 4: AUC + ROC of −loss vs label (Layer 3 - domain)
//   Step 5: Score requested sentences   (Layer 5 - ml)
//   Step 6: Normalise and classify      (Layer 3 - domain)
//   Step 7: Persist the result dir      (Layer 6 - infra)
//
// Nothing is written before Step 7; a missing corpus or
// checkpoint aborts the run with no side effect.

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use burn::prelude::Backend;
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::data::{
    loader::CorpusStore,
    splitter::{non_blank_lines, split_members},
};
use crate::domain::{
    mia::{MiaResult, ScoreCalibration},
    roc::{roc_auc, roc_curve},
    traits::{AttackArchive, AttackArtifacts, CorpusSource},
};
use crate::error::TraceError;
use crate::infra::{
    checkpoint::CheckpointStore,
    naming::{encode_attack_dir_name, TIMESTAMP_FORMAT},
    result_store::AttackResultStore,
    ResourceLayout, DEFAULT_RESOURCE_DIR,
};
use crate::ml::scorer::Scorer;

/// Separates multiple sentences in a single free-text input.
pub const INPUT_SEPARATOR: char = '|';

// ─── Attack Configuration ────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackConfig {
    pub resource_dir: PathBuf,
    pub checkpoint:   String,
    pub corpus:       String,
    pub batch_size:   usize,
    /// `|`-separated sentences to judge; the fallback set when absent
    pub input:        Option<String>,
    pub calibration:  ScoreCalibration,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            resource_dir: PathBuf::from(DEFAULT_RESOURCE_DIR),
            checkpoint:   String::new(),
            corpus:       "synthetic".to_string(),
            batch_size:   64,
            input:        None,
            calibration:  ScoreCalibration::default(),
        }
    }
}

// ─── AttackUseCase ────────────────────────────────────────────────────────────
pub struct AttackUseCase {
    config: AttackConfig,
}

impl AttackUseCase {
    pub fn new(config: AttackConfig) -> Self {
        Self { config }
    }

    pub fn execute<B: Backend>(&self, device: &B::Device) -> Result<MiaResult> {
        let cfg = &self.config;
        ensure!(cfg.batch_size > 0, "batch size must be at least 1");
        ensure!(
            cfg.calibration.score_offset > 0.0,
            "score offset must be positive, got {}", cfg.calibration.score_offset,
        );
        ensure!(
            (0.0..=1.0).contains(&cfg.calibration.threshold),
            "threshold must lie in [0, 1], got {}", cfg.calibration.threshold,
        );

        let layout = ResourceLayout::new(&cfg.resource_dir);

        // ── Step 1: Partition ─────────────────────────────────────────────────
        let lines = CorpusStore::new(layout.corpora())
            .read_lines(&cfg.corpus)
            .with_context(|| format!("Cannot attack with corpus '{}'", cfg.corpus))?;

        let (members, held_out) = split_members(non_blank_lines(&lines));
        if members.is_empty() {
            return Err(TraceError::EmptyPartition("member").into());
        }
        if held_out.is_empty() {
            return Err(TraceError::EmptyPartition("held-out"))
                .with_context(|| format!("Corpus '{}' has too few lines for an attack", cfg.corpus));
        }

        // ── Step 2: Restore ───────────────────────────────────────────────────
        let (model, vocab) = CheckpointStore::new(layout.checkpoints())
            .load::<B>(&cfg.checkpoint, device)
            .with_context(|| format!("Cannot restore checkpoint '{}'", cfg.checkpoint))?;
        let scorer = Scorer::new(model, vocab, device.clone());

        // ── Step 3: Score both populations ────────────────────────────────────
        let member_losses   = scorer.dataset_losses(&members, cfg.batch_size)?;
        let held_out_losses = scorer.dataset_losses(&held_out, cfg.batch_size)?;
        tracing::info!(
            "Scored {} member and {} held-out sequences",
            member_losses.len(), held_out_losses.len(),
        );

        // ── Step 4: AUC of membership score against the true label ────────────
        // Members first, then held-out; score = −loss
        let labels: Vec<bool> = std::iter::repeat(true)
            .take(member_losses.len())
            .chain(std::iter::repeat(false).take(held_out_losses.len()))
            .collect();
        let scores: Vec<f64> = member_losses
            .iter()
            .chain(&held_out_losses)
            .map(|&loss| -(loss as f64))
            .collect();

        let auc = roc_auc(&scores, &labels)?;
        let roc = roc_curve(&scores, &labels)?;
        tracing::info!("Attack AUC = {:.3}", auc);

        // ── Step 5 + 6: Requested sentences ───────────────────────────────────
        let requested = requested_sentences(cfg.input.as_deref(), &members, &held_out);
        let sentences = requested
            .into_iter()
            .map(|sentence| -> Result<_> {
                let raw = scorer.score_sentence(&sentence)?;
                Ok(cfg.calibration.classify(sentence, raw))
            })
            .collect::<Result<Vec<_>>>()?;

        // ── Step 7: Persist ───────────────────────────────────────────────────
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let dir_name  = encode_attack_dir_name(&timestamp, &cfg.checkpoint, &cfg.corpus, cfg.batch_size, auc);

        AttackResultStore::new(layout.mias())
            .write(&dir_name, &AttackArtifacts {
                sentences:       &sentences,
                member_losses:   &member_losses,
                held_out_losses: &held_out_losses,
                roc:             &roc,
            })
            .with_context(|| format!("Failed to write attack result '{dir_name}'"))?;

        Ok(MiaResult {
            checkpoint: cfg.checkpoint.clone(),
            corpus:     cfg.corpus.clone(),
            batch_size: cfg.batch_size,
            auc,
            input:      cfg.input.clone(),
            timestamp,
            sentences,
        })
    }
}

// ─── Requested Sentences ─────────────────────────────────────────────────────
// Explicit input is split on `|`; blank pieces are dropped. Input made
// only of separators and whitespace is scored as its trimmed self.
// Without input, a fixed demonstration mix is scored: one real member,
// one real held-out line, near-miss variations and unrelated text.
pub fn requested_sentences(input: Option<&str>, members: &[String], held_out: &[String]) -> Vec<String> {
    if let Some(text) = input {
        let pieces: Vec<String> = text
            .split(INPUT_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if pieces.is_empty() {
            tracing::warn!("Input '{}' holds no separated sentences; scoring it whole", text);
            return vec![text.trim().to_string()];
        }
        return pieces;
    }

    let first_or = |lines: &[String], default: &str| {
        lines.first().cloned().unwrap_or_else(|| default.to_string())
    };

    vec![
        first_or(members, "Alice paints portraits in watercolor at dawn."),
        "Are you suggesting coconuts migrate?".to_string(),
        first_or(held_out, "Mallory composes melodies with strings on weekends."),
        "Just a flesh wound.".to_string(),
        "Alice writes essays in watercolor at dawn.".to_string(),
        "Nikola builds AI pipelines on GCP with privacy-first design.".to_string(),
        "Carol designs landscapes in charcoal on weekends.".to_string(),
        "Well, she turned me into a newt!".to_string(),
        "Ni!".to_string(),
    ]
}

// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Seams between the use cases and the storage they read from
// and write to. The application layer only sees these traits;
// infra and data provide the filesystem implementations.

use crate::domain::mia::{AttackSummary, SentenceScore};
use crate::domain::roc::RocPoint;
use crate::error::Result;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can hand out named text corpora line by line.
pub trait CorpusSource {
    /// Every line of the named corpus, blank lines included.
    /// Fails with `TraceError::NotFound` when the corpus is absent.
    fn read_lines(&self, name: &str) -> Result<Vec<String>>;

    /// Names of all available corpora, sorted.
    fn list(&self) -> Result<Vec<String>>;
}

// ─── AttackArchive ────────────────────────────────────────────────────────────
/// Everything an attack run hands over for persistence.
#[derive(Debug, Clone)]
pub struct AttackArtifacts<'a> {
    pub sentences:       &'a [SentenceScore],
    pub member_losses:   &'a [f32],
    pub held_out_losses: &'a [f32],
    pub roc:             &'a [RocPoint],
}

/// Append-only store of attack results keyed by directory name.
pub trait AttackArchive {
    fn write(&self, dir_name: &str, artifacts: &AttackArtifacts<'_>) -> Result<()>;

    /// Summaries of every well-formed stored attack.
    /// Malformed entries are skipped with a warning, never fatal.
    fn list(&self) -> Result<Vec<AttackSummary>>;
}

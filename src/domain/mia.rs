// ============================================================
// Layer 3 — Membership Inference Domain Types
// ============================================================
// Plain records produced by one attack run, plus the
// calibration that turns a raw membership score into a
// normalized score and a verdict.

use serde::{Deserialize, Serialize};

/// Affine calibration and decision threshold applied to raw scores.
///
/// The defaults were tuned against the reference LSTM on the
/// synthetic corpus; other corpora may want different values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreCalibration {
    /// Raw score mapped to 0.0; raw score 0.0 maps to 1.0
    pub score_offset: f64,

    /// Normalized scores strictly above this are judged members
    pub threshold: f64,
}

impl Default for ScoreCalibration {
    fn default() -> Self {
        Self { score_offset: 17.0, threshold: 0.7 }
    }
}

impl ScoreCalibration {
    /// `clamp((raw + offset) / offset, 0, 1)`
    pub fn normalize(&self, raw_score: f64) -> f64 {
        ((raw_score + self.score_offset) / self.score_offset).clamp(0.0, 1.0)
    }

    pub fn is_member(&self, normalized_score: f64) -> bool {
        normalized_score > self.threshold
    }

    /// Build the full record for one scored sentence.
    pub fn classify(&self, content: impl Into<String>, raw_score: f64) -> SentenceScore {
        let normalized_score = self.normalize(raw_score);
        SentenceScore {
            content: content.into(),
            score: raw_score,
            normalized_score,
            is_member: self.is_member(normalized_score),
        }
    }
}

/// Verdict for one input sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceScore {
    pub content: String,
    /// Negative average sequence loss; higher is more member-like
    pub score: f64,
    pub normalized_score: f64,
    pub is_member: bool,
}

/// Outcome of one membership inference attack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiaResult {
    pub checkpoint: String,
    pub corpus: String,
    pub batch_size: usize,
    pub auc: f64,
    pub input: Option<String>,
    /// `YYYYMMDDHHMMSS`, local time of the run
    pub timestamp: String,
    pub sentences: Vec<SentenceScore>,
}

/// A past attack as recovered from its result directory name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackSummary {
    pub timestamp: String,
    pub checkpoint: String,
    pub corpus: String,
    pub batch_size: usize,
    pub auc: f64,
}

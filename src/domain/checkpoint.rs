// ============================================================
// Layer 3 — Checkpoint Domain Type
// ============================================================
// Metadata describing one trained model instance. Everything
// here is recoverable from the checkpoint's persisted name;
// see infra::naming for the codec.

use serde::{Deserialize, Serialize};

/// A trained (model, vocabulary) pair identified by its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointDescriptor {
    /// Full persisted name, e.g. `demo__synth50__2__8__0.002`
    pub name: String,

    /// Free-form label chosen at training time, if any
    pub prefix: Option<String>,

    /// Corpus the model was trained on
    pub corpus: String,

    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
}

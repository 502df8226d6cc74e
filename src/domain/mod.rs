// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing what the
// system works with: checkpoints, attack results, ROC maths,
// and the storage seams the use cases depend on.
//
// Rules for this layer:
//   - NO Burn framework types
//   - NO file I/O

/// Checkpoint metadata recovered from persisted names
pub mod checkpoint;

/// Sentence verdicts, attack results, score calibration
pub mod mia;

/// Rank-based AUC and ROC curve
pub mod roc;

/// Storage abstractions implemented by data and infra
pub mod traits;

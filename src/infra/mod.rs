// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the resource directory on disk:
//
//   resource/
//     corpora/       ← <name>.txt, one sentence per line  (data::loader)
//     checkpoints/   ← one directory per trained model    (checkpoint.rs)
//     mias/          ← one directory per attack run       (result_store.rs)
//
//   checkpoint.rs    : CheckpointStore, atomic save, restore
//                      and listing of trained models
//
//   result_store.rs  : AttackResultStore, CSV output of attack
//                      runs, listing of past runs
//
//   naming.rs        : encode/decode of the metadata carried
//                      in checkpoint and attack directory names
//
//   metrics.rs       : per-epoch training loss CSV
//
// Reference: Rust Book §7 (Modules)
//            Burn Book §5 (Checkpointing)

use std::path::PathBuf;

/// Model checkpoint saving, loading and listing
pub mod checkpoint;

/// Attack result CSV writer and listing
pub mod result_store;

/// Name-encoded metadata codec
pub mod naming;

/// Training metrics CSV logger
pub mod metrics;

pub const DEFAULT_RESOURCE_DIR: &str = "resource";

/// Fixed layout of the resource directory.
#[derive(Debug, Clone)]
pub struct ResourceLayout {
    root: PathBuf,
}

impl ResourceLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn corpora(&self) -> PathBuf {
        self.root.join("corpora")
    }

    pub fn checkpoints(&self) -> PathBuf {
        self.root.join("checkpoints")
    }

    pub fn mias(&self) -> PathBuf {
        self.root.join("mias")
    }
}

impl Default for ResourceLayout {
    fn default() -> Self {
        Self::new(DEFAULT_RESOURCE_DIR)
    }
}

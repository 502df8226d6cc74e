// ============================================================
// Layer 2 — CatalogUseCase
// ============================================================
// Read-only views over the resource directory: trained
// checkpoints and past attack runs, both recovered purely
// from persisted names. Bad entries are skipped by the
// stores, so a listing never fails because of one of them.

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::{checkpoint::CheckpointDescriptor, mia::AttackSummary, traits::AttackArchive};
use crate::infra::{checkpoint::CheckpointStore, result_store::AttackResultStore, ResourceLayout};

pub struct CatalogUseCase {
    layout: ResourceLayout,
}

impl CatalogUseCase {
    pub fn new(resource_dir: impl AsRef<Path>) -> Self {
        Self { layout: ResourceLayout::new(resource_dir.as_ref()) }
    }

    pub fn checkpoints(&self) -> Result<Vec<CheckpointDescriptor>> {
        CheckpointStore::new(self.layout.checkpoints())
            .list()
            .context("Failed to list checkpoints")
    }

    pub fn attacks(&self) -> Result<Vec<AttackSummary>> {
        AttackResultStore::new(self.layout.mias())
            .list()
            .context("Failed to list attack results")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_empty_resource_dir_lists_nothing() {
        let tmp     = tempfile::tempdir().unwrap();
        let catalog = CatalogUseCase::new(tmp.path());
        assert!(catalog.checkpoints().unwrap().is_empty());
        assert!(catalog.attacks().unwrap().is_empty());
    }

    #[test]
    fn test_attack_listing_survives_a_malformed_entry() {
        let tmp  = tempfile::tempdir().unwrap();
        let mias = ResourceLayout::new(tmp.path()).mias();
        for name in [
            "20250101120000__demo__synth50__2__8__0.002__synth50__8__0.912",
            "20250101130000__demo__synth50__2__8__0.002__synth50__16__0.874",
            "20250101140000__demo__synth50__2__8__0.002__synth50__0.5",
        ] {
            fs::create_dir_all(mias.join(name)).unwrap();
        }

        let attacks = CatalogUseCase::new(tmp.path()).attacks().unwrap();
        assert_eq!(attacks.len(), 2);
        assert!(attacks.iter().all(|a| a.checkpoint == "demo__synth50__2__8__0.002"));
    }
}

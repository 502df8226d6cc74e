// ============================================================
// Layer 2 — CorpusUseCase
// ============================================================
// Creates and lists the text corpora that training and
// attacks read from. Only the seeded synthetic generator
// is provided; any other corpus is dropped into corpora/
// as a plain .txt file.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};

use crate::data::{loader::CorpusStore, synthetic::generate_sentences};
use crate::domain::traits::CorpusSource;
use crate::infra::ResourceLayout;

pub struct CorpusUseCase {
    store: CorpusStore,
}

impl CorpusUseCase {
    pub fn new(resource_dir: impl AsRef<Path>) -> Self {
        let layout = ResourceLayout::new(resource_dir.as_ref());
        Self { store: CorpusStore::new(layout.corpora()) }
    }

    /// Write `count` seeded synthetic sentences as corpus `name`.
    pub fn generate(&self, name: &str, count: usize, seed: u64) -> Result<PathBuf> {
        ensure!(!name.trim().is_empty(), "corpus name must not be empty");

        let sentences = generate_sentences(count, seed);
        self.store
            .write(name, &sentences)
            .with_context(|| format!("Failed to write corpus '{name}'"))
    }

    pub fn list(&self) -> Result<Vec<String>> {
        self.store.list().context("Failed to list corpora")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_then_list() {
        let tmp = tempfile::tempdir().unwrap();
        let uc  = CorpusUseCase::new(tmp.path());

        uc.generate("synth50", 50, 7).unwrap();
        uc.generate("alpha", 3, 1).unwrap();

        assert_eq!(uc.list().unwrap(), vec!["alpha", "synth50"]);
    }

    #[test]
    fn test_generated_corpus_is_reproducible() {
        let tmp = tempfile::tempdir().unwrap();
        let uc  = CorpusUseCase::new(tmp.path());

        let a = std::fs::read_to_string(uc.generate("a", 20, 7).unwrap()).unwrap();
        let b = std::fs::read_to_string(uc.generate("b", 20, 7).unwrap()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.lines().count(), 20);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(CorpusUseCase::new(tmp.path()).generate("  ", 5, 7).is_err());
    }
}

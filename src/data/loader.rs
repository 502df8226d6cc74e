// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Reads and writes plain-text corpora, one sentence per line,
// stored as `<dir>/<name>.txt`.

use std::{fs, path::{Path, PathBuf}};

use crate::domain::traits::CorpusSource;
use crate::error::{Result, TraceError};

const CORPUS_EXTENSION: &str = "txt";

/// Filesystem-backed corpus store.
/// Implements the CorpusSource trait from Layer 3.
pub struct CorpusStore {
    dir: PathBuf,
}

impl CorpusStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{CORPUS_EXTENSION}"))
    }

    /// Write `lines` as the named corpus, replacing any existing one.
    pub fn write(&self, name: &str, lines: &[String]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| TraceError::io(e, &self.dir))?;

        let path = self.path_of(name);
        fs::write(&path, lines.join("\n")).map_err(|e| TraceError::io(e, &path))?;

        tracing::info!("Wrote corpus '{}' ({} lines) to '{}'", name, lines.len(), path.display());
        Ok(path)
    }
}

impl CorpusSource for CorpusStore {
    fn read_lines(&self, name: &str) -> Result<Vec<String>> {
        let path = self.path_of(name);

        let text = fs::read_to_string(&path).map_err(|e| {
            tracing::error!("Cannot read corpus '{}': {}", path.display(), e);
            TraceError::NotFound { kind: "corpus", name: name.to_string() }
        })?;

        Ok(text.lines().map(str::to_string).collect())
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(|e| TraceError::io(e, &self.dir))? {
            let path = entry.map_err(|e| TraceError::io(e, &self.dir))?.path();
            if let Some(name) = corpus_name(&path) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}

fn corpus_name(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some(CORPUS_EXTENSION) {
        return None;
    }
    path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_preserves_lines() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = CorpusStore::new(tmp.path());
        let lines = vec!["one.".to_string(), String::new(), "three.".to_string()];

        store.write("demo", &lines).unwrap();
        assert_eq!(store.read_lines("demo").unwrap(), lines);
    }

    #[test]
    fn test_missing_corpus_is_not_found() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = CorpusStore::new(tmp.path());
        let err   = store.read_lines("nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_only_reports_text_files() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = CorpusStore::new(tmp.path());
        store.write("b", &["x".to_string()]).unwrap();
        store.write("a", &["y".to_string()]).unwrap();
        fs::write(tmp.path().join("notes.md"), "ignored").unwrap();

        assert_eq!(store.list().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_list_of_missing_dir_is_empty() {
        let store = CorpusStore::new("/definitely/not/here");
        assert!(store.list().unwrap().is_empty());
    }
}

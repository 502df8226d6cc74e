// ============================================================
// Error Taxonomy
// ============================================================
// Library-level errors raised by the data, ml and infra layers.
// The application and CLI layers wrap these in anyhow::Error
// with extra context before they reach the user.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used by every layer below the application layer.
pub type Result<T, E = TraceError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum TraceError {
    /// A corpus, checkpoint or attack artifact is absent or unreadable.
    #[error("{kind} '{name}' not found or unreadable")]
    NotFound { kind: &'static str, name: String },

    /// A persisted checkpoint or attack directory name does not decode.
    #[error("malformed name '{name}': {reason}")]
    MalformedName { name: String, reason: String },

    /// A corpus split left one side of the partition empty.
    #[error("{0} partition is empty")]
    EmptyPartition(&'static str),

    /// AUC is undefined when only one class is present.
    #[error("cannot compute AUC: only one class present in labels")]
    SingleClass,

    /// Restored vocabulary size disagrees with the stored model.
    #[error("vocabulary has {vocab} tokens but model expects {model}")]
    VocabularyMismatch { vocab: usize, model: usize },

    /// Decoding hit an id outside a freshly built vocabulary.
    #[error("token id {0} is outside the vocabulary")]
    TokenOutOfRange(usize),

    #[error("io error while processing {path:?}: {source}")]
    Io {
        source: std::io::Error,
        path: Option<PathBuf>,
    },

    #[error("serialization error: {0}")]
    Serialization(String),

    /// Recorder or model-config failure while reading or writing weights.
    #[error("checkpoint error: {0}")]
    Checkpoint(String),

    /// Tensor data could not be read back to the host.
    #[error("tensor error: {0}")]
    Tensor(String),
}

impl TraceError {
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io { source, path: Some(path.into()) }
    }

    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedName { name: name.into(), reason: reason.into() }
    }

    #[cfg(test)]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for TraceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

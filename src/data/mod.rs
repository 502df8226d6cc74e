// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a corpus file on disk and a tensor batch
// the model can consume.
//
//   corpus .txt
//       │
//       ▼
//   CorpusStore       → reads lines, lists and writes corpora
//       │
//       ▼
//   splitter          → member / held-out partition (70 / 30)
//       │
//       ▼
//   Tokenizer         → normalises a line into word tokens
//       │
//       ▼
//   Vocab             → maps tokens to ids (built or restored)
//       │
//       ▼
//   LmDataset         → <bos> ... <eos> id sequences
//       │
//       ▼
//   LmBatcher         → padded inputs / targets / mask tensors
//
// The synthetic module generates demo corpora from a seed.

/// Reads and writes plain-text corpora
pub mod loader;

/// Deterministic member / non-member split
pub mod splitter;

/// Line → word token normalisation
pub mod tokenizer;

/// Token ↔ id mapping with special tokens
pub mod vocab;

/// Implements Burn's Dataset trait for encoded lines
pub mod dataset;

/// Implements Burn's Batcher trait with next-token shift and mask
pub mod batcher;

/// Seeded synthetic sentence generation
pub mod synthetic;

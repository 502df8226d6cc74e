// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn tensor maths lives here.
//
//   model.rs   : SequenceModel trait + the word-level LSTM
//                (embedding → LSTM → vocabulary projection)
//
//   loss.rs    : masked per-sequence cross-entropy, shared by
//                training and scoring
//
//   trainer.rs : shuffled mini-batch Adam loop
//
//   scorer.rs  : dataset and single-sentence losses from a
//                restored model, in fixed order

/// Replaceable sequence model contract and the LSTM implementation
pub mod model;

/// Masked per-sequence negative log-likelihood
pub mod loss;

/// Training loop
pub mod trainer;

/// Loss-based scoring for membership inference
pub mod scorer;

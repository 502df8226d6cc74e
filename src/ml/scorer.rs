// ============================================================
// Layer 5 — Scorer
// ============================================================
// Runs a restored model over text and returns per-sequence
// losses. Lower loss means the model fits the line better,
// the signal the membership attack is built on.
//
// Batches are produced in dataset order (no shuffle, single
// worker), so loss i always belongs to line i.
use burn::{data::dataloader::DataLoaderBuilder, prelude::*};

use crate::data::{
    batcher::{collate, LmBatch, LmBatcher},
    dataset::{encode_line, LmDataset},
    vocab::Vocab,
};
use crate::error::{Result, TraceError};
use crate::ml::{loss::sequence_losses, model::SequenceModel};

pub struct Scorer<B: Backend, M> {
    model:  M,
    vocab:  Vocab,
    device: B::Device,
}

impl<B: Backend, M: SequenceModel<B>> Scorer<B, M> {
    pub fn new(model: M, vocab: Vocab, device: B::Device) -> Self {
        Self { model, vocab, device }
    }

    /// Per-sequence losses of every non-blank line, in line order.
    pub fn dataset_losses<S: AsRef<str>>(&self, lines: &[S], batch_size: usize) -> Result<Vec<f32>> {
        let dataset = LmDataset::new(lines, Some(self.vocab.clone()));
        let loader  = DataLoaderBuilder::<B, _, _>::new(LmBatcher::new())
            .batch_size(batch_size)
            .set_device(self.device.clone())
            .build(dataset);

        let mut losses = Vec::with_capacity(lines.len());
        for batch in loader.iter() {
            losses.extend(self.batch_losses(batch)?);
        }

        tracing::debug!("Scored {} sequences", losses.len());
        Ok(losses)
    }

    /// Membership score of one raw sentence: the negated sequence loss.
    pub fn score_sentence(&self, sentence: &str) -> Result<f64> {
        let encoded = encode_line(&self.vocab, sentence);
        tracing::debug!("Scoring '{}' as [{}]", sentence, self.vocab.decode(&encoded.ids)?.join(" "));
        let batch   = LmBatch::from_collated(collate(&[encoded]), &self.device);

        let loss = self
            .batch_losses(batch)?
            .first()
            .copied()
            .ok_or_else(|| TraceError::Tensor("empty loss tensor for single sentence".into()))?;

        Ok(-(loss as f64))
    }

    fn batch_losses(&self, batch: LmBatch<B>) -> Result<Vec<f32>> {
        sequence_losses(&self.model, batch)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| TraceError::Tensor(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::{WordLstm, WordLstmConfig};

    type TestBackend = burn::backend::NdArray;

    fn scorer(lines: &[&str]) -> Scorer<TestBackend, WordLstm<TestBackend>> {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let vocab  = LmDataset::new(lines, None).vocab().clone();
        let model  = WordLstmConfig::new(vocab.len())
            .with_embedding_dim(8)
            .with_hidden_dim(8)
            .init(&device);
        Scorer::new(model, vocab, device)
    }

    const LINES: [&str; 5] = [
        "alice paints portraits at dawn.",
        "bob writes poems.",
        "",
        "carol edits essays in the studio at night.",
        "dave records lyrics.",
    ];

    #[test]
    fn test_dataset_losses_skip_blank_lines() {
        let s = scorer(&LINES);
        let losses = s.dataset_losses(&LINES, 2).unwrap();
        assert_eq!(losses.len(), 4);
        assert!(losses.iter().all(|l| l.is_finite() && *l > 0.0));
    }

    #[test]
    fn test_dataset_losses_are_independent_of_batch_size() {
        let s = scorer(&LINES);
        let one_by_one = s.dataset_losses(&LINES, 1).unwrap();
        let all_at_once = s.dataset_losses(&LINES, 16).unwrap();

        for (a, b) in one_by_one.iter().zip(&all_at_once) {
            assert!((a - b).abs() < 1e-4, "{a} vs {b}");
        }
    }

    #[test]
    fn test_score_sentence_matches_negated_dataset_loss() {
        let s = scorer(&LINES);
        let losses = s.dataset_losses(&LINES, 3).unwrap();
        let score  = s.score_sentence(LINES[3]).unwrap();
        assert!((score + losses[2] as f64).abs() < 1e-4);
        assert!(score < 0.0);
    }

    #[test]
    fn test_score_sentence_tolerates_unknown_words() {
        let s = scorer(&LINES);
        assert!(s.score_sentence("Ni!").unwrap().is_finite());
    }
}

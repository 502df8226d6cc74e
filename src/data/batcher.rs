// ============================================================
// Layer 4 — LM Batcher
// ============================================================
// Implements Burn's Batcher trait to turn a Vec<EncodedSequence>
// of varying lengths into rectangular next-token tensors.
//
// For a sequence s of length L in a batch padded to width W:
//
//   inputs[i, 0..L-1]  = s[0..L-1]     (drop the last token)
//   targets[i, 0..L-1] = s[1..L]       (drop the first token)
//   everything from column L-1 onward stays <pad> (0)
//
//   mask[i, t] = 1.0 where inputs[i, t] != <pad>, else 0.0
//
// The mask is what lets sequences of different lengths share
// one tensor without padding leaking into the loss.

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::EncodedSequence;
use crate::data::vocab::PAD_ID;

// ─── Collated ─────────────────────────────────────────────────────────────────
/// Host-side result of collation, row-major [batch_size, width].
#[derive(Debug, Clone, PartialEq)]
pub struct Collated {
    pub batch_size: usize,
    pub width:      usize,
    pub inputs:     Vec<i32>,
    pub targets:    Vec<i32>,
    pub mask:       Vec<f32>,
}

/// Pad and shift a batch of sequences into input/target/mask rows.
pub fn collate(batch: &[EncodedSequence]) -> Collated {
    let width = batch
        .iter()
        .map(EncodedSequence::len)
        .max()
        .unwrap_or(0);
    let pad = PAD_ID as i32;

    let mut inputs  = vec![pad; batch.len() * width];
    let mut targets = vec![pad; batch.len() * width];

    for (row, seq) in batch.iter().enumerate() {
        let base = row * width;
        for t in 0..seq.len().saturating_sub(1) {
            inputs[base + t]  = seq.ids[t] as i32;
            targets[base + t] = seq.ids[t + 1] as i32;
        }
    }

    let mask = inputs
        .iter()
        .map(|&id| if id != pad { 1.0 } else { 0.0 })
        .collect();

    Collated { batch_size: batch.len(), width, inputs, targets, mask }
}

// ─── LmBatch ──────────────────────────────────────────────────────────────────
/// A batch ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct LmBatch<B: Backend> {
    /// [batch_size, width]
    pub inputs:  Tensor<B, 2, Int>,
    /// [batch_size, width]
    pub targets: Tensor<B, 2, Int>,
    /// [batch_size, width], 1.0 on real positions
    pub mask:    Tensor<B, 2>,
}

impl<B: Backend> LmBatch<B> {
    pub fn from_collated(c: Collated, device: &B::Device) -> Self {
        let shape = [c.batch_size, c.width];

        let inputs = Tensor::<B, 1, Int>::from_ints(c.inputs.as_slice(), device)
            .reshape(shape);
        let targets = Tensor::<B, 1, Int>::from_ints(c.targets.as_slice(), device)
            .reshape(shape);
        let mask = Tensor::<B, 1>::from_floats(c.mask.as_slice(), device)
            .reshape(shape);

        Self { inputs, targets, mask }
    }
}

// ─── LmBatcher ────────────────────────────────────────────────────────────────
#[derive(Clone, Debug, Default)]
pub struct LmBatcher;

impl LmBatcher {
    pub fn new() -> Self {
        Self
    }
}

impl<B: Backend> Batcher<B, EncodedSequence, LmBatch<B>> for LmBatcher {
    fn batch(&self, items: Vec<EncodedSequence>, device: &B::Device) -> LmBatch<B> {
        LmBatch::from_collated(collate(&items), device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    fn seq(ids: &[u32]) -> EncodedSequence {
        EncodedSequence { ids: ids.to_vec() }
    }

    #[test]
    fn test_mask_counts_follow_lengths() {
        let c = collate(&[seq(&[1, 5, 2]), seq(&[1, 5, 6, 7, 2]), seq(&[1, 2])]);
        assert_eq!(c.width, 5);

        let ones: Vec<usize> = c.mask
            .chunks(c.width)
            .map(|row| row.iter().filter(|&&m| m == 1.0).count())
            .collect();
        assert_eq!(ones, vec![2, 4, 1]);
        assert!(c.mask.iter().all(|&m| m == 0.0 || m == 1.0));
    }

    #[test]
    fn test_inputs_and_targets_are_shifted() {
        let c = collate(&[seq(&[1, 5, 6, 2]), seq(&[1, 2])]);
        assert_eq!(&c.inputs[0..4],  &[1, 5, 6, 0]);
        assert_eq!(&c.targets[0..4], &[5, 6, 2, 0]);
        assert_eq!(&c.inputs[4..8],  &[1, 0, 0, 0]);
        assert_eq!(&c.targets[4..8], &[2, 0, 0, 0]);
    }

    #[test]
    fn test_batcher_produces_expected_shapes() {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let batch  = Batcher::<TestBackend, _, _>::batch(
            &LmBatcher::new(),
            vec![seq(&[1, 5, 2]), seq(&[1, 5, 6, 7, 2]), seq(&[1, 2])],
            &device,
        );
        assert_eq!(batch.inputs.dims(),  [3, 5]);
        assert_eq!(batch.targets.dims(), [3, 5]);
        assert_eq!(batch.mask.dims(),    [3, 5]);

        let mask_total: f32 = batch.mask.sum().into_scalar().elem();
        assert_eq!(mask_total, 7.0);
    }
}

// ============================================================
// Layer 5 — Masked Sequence Loss
// ============================================================
// Per-sequence next-token negative log-likelihood, shared by
// the trainer (mean over the batch, then backward) and the
// scorer (one value per line, the membership signal).
//
//   ce[i, t]   = -log softmax(logits[i, t])[targets[i, t]]   (0 where target is <pad>)
//   loss[i]    = Σ_t ce[i, t] · mask[i, t]  /  (Σ_t mask[i, t] + ε)
//
// ε keeps an all-pad row at 0 instead of NaN.

use burn::{prelude::*, tensor::activation::log_softmax};

use crate::data::batcher::LmBatch;
use crate::data::vocab::PAD_ID;
use crate::ml::model::SequenceModel;

pub const LOSS_EPSILON: f32 = 1e-8;

/// One average masked cross-entropy per sequence, shape [batch].
pub fn sequence_losses<B, M>(model: &M, batch: LmBatch<B>) -> Tensor<B, 1>
where
    B: Backend,
    M: SequenceModel<B>,
{
    let [batch_size, width] = batch.inputs.dims();
    let (logits, _) = model.forward(batch.inputs, None);

    let not_pad = batch.targets.clone().not_equal_elem(PAD_ID as i32).float();

    let target_log_probs = log_softmax(logits, 2)
        .gather(2, batch.targets.reshape([batch_size, width, 1]))
        .reshape([batch_size, width]);
    let token_losses = target_log_probs.neg() * not_pad;

    let totals = (token_losses * batch.mask.clone()).sum_dim(1).reshape([batch_size]);
    let counts = batch.mask.sum_dim(1).reshape([batch_size]);

    totals / counts.add_scalar(LOSS_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::batcher::{collate, LmBatch};
    use crate::data::dataset::EncodedSequence;

    type TestBackend = burn::backend::NdArray;

    /// Ignores its input and predicts a uniform distribution.
    struct Uniform {
        vocab: usize,
    }

    impl SequenceModel<TestBackend> for Uniform {
        type State = ();

        fn forward(
            &self,
            ids:    Tensor<TestBackend, 2, Int>,
            _state: Option<()>,
        ) -> (Tensor<TestBackend, 3>, ()) {
            let [b, t] = ids.dims();
            (Tensor::zeros([b, t, self.vocab], &ids.device()), ())
        }
    }

    fn batch(seqs: &[&[u32]]) -> LmBatch<TestBackend> {
        let seqs: Vec<EncodedSequence> = seqs
            .iter()
            .map(|ids| EncodedSequence { ids: ids.to_vec() })
            .collect();
        LmBatch::from_collated(collate(&seqs), &burn::backend::ndarray::NdArrayDevice::default())
    }

    #[test]
    fn test_uniform_model_loss_is_log_vocab_for_every_row() {
        let model  = Uniform { vocab: 8 };
        let losses = sequence_losses(&model, batch(&[&[1, 4, 5, 2], &[1, 2], &[1, 6, 7, 5, 4, 2]]));
        let values = losses.into_data().to_vec::<f32>().unwrap();

        assert_eq!(values.len(), 3);
        for v in values {
            // Padding must not dilute the average, so every row is exactly ln 8
            assert!((v - 8f32.ln()).abs() < 1e-4, "got {v}");
        }
    }

    #[test]
    fn test_all_pad_row_gives_zero() {
        let model  = Uniform { vocab: 5 };
        // A lone <pad> id: the shifted input row is entirely padding
        let losses = sequence_losses(&model, batch(&[&[0], &[1, 2]]));
        let values = losses.into_data().to_vec::<f32>().unwrap();
        assert_eq!(values[0], 0.0);
        assert!(values[1] > 0.0);
    }
}

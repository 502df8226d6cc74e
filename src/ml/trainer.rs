// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Shuffled mini-batch training with Adam on the masked
// next-token loss. Generic over the backend (must be
// autodiff-capable) and over any SequenceModel.
//
// No checkpoint is written here: the caller persists the
// returned model once, after the last epoch.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use serde::{Deserialize, Serialize};

use crate::data::{batcher::LmBatcher, dataset::LmDataset};
use crate::infra::metrics::EpochMetrics;
use crate::ml::{loss::sequence_losses, model::SequenceModel};

/// Optimisation hyperparameters for one training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSettings {
    pub epochs:        usize,
    pub batch_size:    usize,
    pub learning_rate: f64,
    /// Seed for the per-epoch batch shuffle
    pub seed:          u64,
}

/// Train `model` on `dataset` and return it with per-epoch metrics.
pub fn train<B, M>(
    mut model: M,
    dataset:   LmDataset,
    settings:  &TrainingSettings,
    device:    &B::Device,
) -> (M, Vec<EpochMetrics>)
where
    B: AutodiffBackend,
    M: SequenceModel<B> + AutodiffModule<B>,
{
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let mut optim = AdamConfig::new().with_epsilon(1e-8).init();

    let sample_count = dataset.sample_count();
    let loader = DataLoaderBuilder::<B, _, _>::new(LmBatcher::new())
        .batch_size(settings.batch_size)
        .shuffle(settings.seed)
        .set_device(device.clone())
        .build(dataset);

    tracing::info!(
        "Training on {} sequences for {} epochs (batch_size={}, lr={})",
        sample_count, settings.epochs, settings.batch_size, settings.learning_rate,
    );

    let mut history = Vec::with_capacity(settings.epochs);

    for epoch in 1..=settings.epochs {
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;

        for batch in loader.iter() {
            let loss = sequence_losses(&model, batch).mean();

            loss_sum += loss.clone().into_scalar().elem::<f64>();
            batches  += 1;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(settings.learning_rate, model, grads);
        }

        let metrics = EpochMetrics::new(epoch, loss_sum / batches.max(1) as f64);
        tracing::info!("Epoch {:>3}/{} | train_loss={:.4}", epoch, settings.epochs, metrics.train_loss);
        history.push(metrics);
    }

    (model, history)
}

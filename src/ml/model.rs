use burn::{
    nn::{Embedding, EmbeddingConfig, Linear, LinearConfig, Lstm, LstmConfig, LstmState},
    prelude::*,
};

// ─── SequenceModel ────────────────────────────────────────────────────────────
/// Any next-token model the trainer and scorer can drive.
///
/// ids: [batch, time] → logits: [batch, time, vocab_size], plus
/// whatever recurrent state the architecture carries forward.
/// Stateless architectures can use `()` as their state.
pub trait SequenceModel<B: Backend> {
    type State;

    fn forward(
        &self,
        ids:   Tensor<B, 2, Int>,
        state: Option<Self::State>,
    ) -> (Tensor<B, 3>, Self::State);
}

// ─── WordLstm ─────────────────────────────────────────────────────────────────
// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct WordLstmConfig {
    pub vocab_size: usize,
    #[config(default = 128)]
    pub embedding_dim: usize,
    #[config(default = 256)]
    pub hidden_dim: usize,
}

impl WordLstmConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> WordLstm<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device);
        let lstm      = LstmConfig::new(self.embedding_dim, self.hidden_dim, true).init(device);
        let head      = LinearConfig::new(self.hidden_dim, self.vocab_size).init(device);
        WordLstm { embedding, lstm, head }
    }
}

/// Embedding → single-layer LSTM → vocabulary projection.
#[derive(Module, Debug)]
pub struct WordLstm<B: Backend> {
    pub embedding: Embedding<B>,
    pub lstm:      Lstm<B>,
    pub head:      Linear<B>,
}

impl<B: Backend> SequenceModel<B> for WordLstm<B> {
    type State = LstmState<B, 2>;

    fn forward(
        &self,
        ids:   Tensor<B, 2, Int>,
        state: Option<LstmState<B, 2>>,
    ) -> (Tensor<B, 3>, LstmState<B, 2>) {
        let embedded         = self.embedding.forward(ids);          // [batch, time, emb]
        let (hidden, state)  = self.lstm.forward(embedded, state);   // [batch, time, hidden]
        (self.head.forward(hidden), state)                           // [batch, time, vocab]
    }
}

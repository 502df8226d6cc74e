use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::tokenizer::Tokenizer;
use crate::data::vocab::{Vocab, BOS, EOS};

/// One corpus line as `<bos> tokens... <eos>` ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedSequence {
    pub ids: Vec<u32>,
}

impl EncodedSequence {
    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Wrap tokens in <bos>/<eos> and map them through `vocab`.
pub fn encode_tokens(vocab: &Vocab, tokens: Vec<String>) -> EncodedSequence {
    let mut wrapped = Vec::with_capacity(tokens.len() + 2);
    wrapped.push(BOS.to_string());
    wrapped.extend(tokens);
    wrapped.push(EOS.to_string());
    EncodedSequence { ids: vocab.encode(&wrapped) }
}

/// Tokenize and encode a single raw line.
pub fn encode_line(vocab: &Vocab, line: &str) -> EncodedSequence {
    encode_tokens(vocab, Tokenizer::new().tokenize(line))
}

/// Language-model dataset over the non-blank lines of a corpus slice.
pub struct LmDataset {
    vocab:   Vocab,
    samples: Vec<EncodedSequence>,
}

impl LmDataset {
    /// Encode `lines` with `vocab`, or with a vocabulary built
    /// from these same lines when `vocab` is `None`.
    /// Blank lines are dropped.
    pub fn new<S: AsRef<str>>(lines: &[S], vocab: Option<Vocab>) -> Self {
        let tokenizer = Tokenizer::new();
        let tokenized: Vec<Vec<String>> = lines
            .iter()
            .map(|l| l.as_ref().trim())
            .filter(|l| !l.is_empty())
            .map(|l| tokenizer.tokenize(l))
            .collect();

        let vocab = vocab.unwrap_or_else(|| {
            let stream: Vec<&String> = tokenized.iter().flatten().collect();
            Vocab::build(&stream, 1)
        });

        let samples = tokenized
            .into_iter()
            .map(|tokens| encode_tokens(&vocab, tokens))
            .collect();

        Self { vocab, samples }
    }

    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    #[cfg(test)]
    pub fn samples(&self) -> &[EncodedSequence] {
        &self.samples
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Dataset<EncodedSequence> for LmDataset {
    fn get(&self, index: usize) -> Option<EncodedSequence> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_blank_lines() {
        let ds = LmDataset::new(&["a b.", "   ", "", "c"], None);
        assert_eq!(ds.sample_count(), 2);
    }

    #[test]
    fn test_wraps_with_bos_and_eos() {
        let ds = LmDataset::new(&["alice paints."], None);
        let ids = &ds.samples()[0].ids;
        // <bos> alice paints . <eos>
        assert_eq!(ids, &vec![1, 4, 5, 6, 2]);
    }

    #[test]
    fn test_uses_supplied_vocab() {
        let vocab = Vocab::restore(&["<pad>", "<bos>", "<eos>", "<unk>", "bob"]);
        let ds    = LmDataset::new(&["bob meets carol"], Some(vocab));
        assert_eq!(ds.samples()[0].ids, vec![1, 4, 3, 3, 2]);
        assert_eq!(ds.vocab().len(), 5);
    }

    #[test]
    fn test_encode_line_matches_dataset_encoding() {
        let ds = LmDataset::new(&["Carol edits poems."], None);
        assert_eq!(encode_line(ds.vocab(), "carol EDITS poems."), ds.samples()[0]);
    }

    #[test]
    fn test_symbol_only_line_is_kept_as_bos_eos() {
        let ds = LmDataset::new(&["!!!"], None);
        assert_eq!(ds.samples()[0].ids, vec![1, 2]);
    }
}

// ============================================================
// Layer 4 — Vocabulary
// ============================================================
// Bidirectional token ↔ id mapping for the word-level LM.
//
// Layout:
//   id 0    <pad>   (collation fills with 0 and masks on it)
//   id 1    <bos>
//   id 2    <eos>
//   id 3    <unk>
//   id 4..  corpus tokens in first-seen order
//
// Two ways to obtain one:
//   Vocab::build   : fresh from a training token stream
//   Vocab::restore : from a persisted index-to-token list,
//                    repairing missing specials and moving
//                    <pad> back to id 0 if needed

use std::collections::{HashMap, HashSet};

use crate::error::{Result, TraceError};

pub const PAD: &str = "<pad>";
pub const BOS: &str = "<bos>";
pub const EOS: &str = "<eos>";
pub const UNK: &str = "<unk>";

pub const SPECIAL_TOKENS: [&str; 4] = [PAD, BOS, EOS, UNK];

/// Id every collated batch is padded with.
pub const PAD_ID: u32 = 0;

/// Where a vocabulary came from; restored vocabularies decode
/// out-of-range ids to <unk> instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabOrigin {
    Built,
    Restored,
}

#[derive(Debug, Clone)]
pub struct Vocab {
    itos:   Vec<String>,
    stoi:   HashMap<String, usize>,
    origin: VocabOrigin,
}

impl Vocab {
    /// Build from a token stream, keeping tokens seen at least
    /// `min_frequency` times, ordered by first occurrence.
    pub fn build<S: AsRef<str>>(tokens: &[S], min_frequency: usize) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for t in tokens {
            *counts.entry(t.as_ref()).or_insert(0) += 1;
        }

        let mut itos: Vec<String> = SPECIAL_TOKENS.iter().map(|s| s.to_string()).collect();
        let mut seen: HashSet<&str> = SPECIAL_TOKENS.iter().copied().collect();

        for t in tokens {
            let t = t.as_ref();
            if seen.insert(t) && counts[t] >= min_frequency {
                itos.push(t.to_string());
            }
        }

        let stoi = index(&itos);
        Self { itos, stoi, origin: VocabOrigin::Built }
    }

    /// Rebuild from a persisted index-to-token list.
    ///
    /// Missing special tokens are appended in canonical order.
    /// If <pad> is not at index 0 it swaps places with whatever is.
    /// The result is a pure function of `itos`.
    pub fn restore<S: AsRef<str>>(itos: &[S]) -> Self {
        let mut itos: Vec<String> = itos.iter().map(|s| s.as_ref().to_string()).collect();
        let mut stoi = index(&itos);

        for special in SPECIAL_TOKENS {
            if !stoi.contains_key(special) {
                stoi.insert(special.to_string(), itos.len());
                itos.push(special.to_string());
            }
        }

        if itos[0] != PAD {
            let pad_idx = stoi[PAD];
            itos.swap(0, pad_idx);
            stoi = index(&itos);
        }

        Self { itos, stoi, origin: VocabOrigin::Restored }
    }

    pub fn len(&self) -> usize {
        self.itos.len()
    }

    /// The index-to-token list, as persisted in checkpoints.
    pub fn tokens(&self) -> &[String] {
        &self.itos
    }

    pub fn id_of(&self, token: &str) -> Option<u32> {
        self.stoi.get(token).map(|&i| i as u32)
    }

    pub fn unk_id(&self) -> u32 {
        self.stoi.get(UNK).copied().unwrap_or(0) as u32
    }

    /// Map tokens to ids; unknown tokens map to <unk>.
    pub fn encode<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<u32> {
        let unk = self.unk_id();
        tokens
            .iter()
            .map(|t| self.id_of(t.as_ref()).unwrap_or(unk))
            .collect()
    }

    /// Map ids back to tokens.
    pub fn decode(&self, ids: &[u32]) -> Result<Vec<String>> {
        ids.iter()
            .map(|&id| match self.itos.get(id as usize) {
                Some(t) => Ok(t.clone()),
                None if self.origin == VocabOrigin::Restored => Ok(UNK.to_string()),
                None => Err(TraceError::TokenOutOfRange(id as usize)),
            })
            .collect()
    }
}

/// Token → id map; a duplicated token keeps its last index.
fn index(itos: &[String]) -> HashMap<String, usize> {
    itos.iter()
        .enumerate()
        .map(|(i, t)| (t.clone(), i))
        .collect()
}

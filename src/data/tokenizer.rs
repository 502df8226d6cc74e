// ============================================================
// Layer 4 — Word Tokenizer
// ============================================================
// Turns one raw corpus line into word tokens.
//
// Normalisation steps (applied in order):
//   1. Lower-case and trim surrounding whitespace
//   2. Drop every character that is not a-z, 0-9, whitespace or '.'
//   3. Detach periods so "end." becomes "end ."
//   4. Split on whitespace
//
// Training and attack both go through this exact function.
// Any drift between the two changes vocabulary coverage and
// makes member/non-member losses incomparable.

pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalise `line` and split it into word tokens.
    pub fn tokenize(&self, line: &str) -> Vec<String> {
        let lowered = line.to_lowercase();

        let kept: String = lowered
            .trim()
            .chars()
            .filter(|&c| {
                c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || c == '.'
            })
            .collect();

        kept.replace('.', " .")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================
// Layer 4 — Synthetic Corpus Generator
// ============================================================
// Produces toy sentences of the shape
//
//   "{subject} {verb} {object} {style} {context}."
//
// e.g. "Alice paints portraits in watercolor at dawn."
//
// 10·10·10·8·8 combinations over a closed vocabulary of ~60 words.
//
// The RNG is seeded by the caller; the same (n, seed) always
// yields the same corpus.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

const SUBJECTS: [&str; 10] = [
    "Alice", "Bob", "Carol", "Dave", "Eve", "Mallory", "Peggy", "Trent", "Victor", "Walter",
];
const VERBS: [&str; 10] = [
    "paints", "writes", "composes", "sketches", "records", "designs", "curates", "edits",
    "crafts", "imagines",
];
const OBJECTS: [&str; 10] = [
    "portraits", "stories", "poems", "melodies", "landscapes", "comics", "scenes", "lyrics",
    "haikus", "essays",
];
const STYLES: [&str; 8] = [
    "in watercolor", "in oil", "in charcoal", "with synths", "in pastel", "with ink",
    "in pencil", "with strings",
];
const CONTEXTS: [&str; 8] = [
    "at dawn", "at night", "on weekends", "in spring", "by the river", "on stage",
    "in the studio", "in Vienna",
];

pub const DEFAULT_SEED: u64 = 7;

/// Generate `n` synthetic sentences from a seeded RNG.
pub fn generate_sentences(n: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..n)
        .map(|_| {
            format!(
                "{} {} {} {} {}.",
                pick(&SUBJECTS, &mut rng),
                pick(&VERBS, &mut rng),
                pick(&OBJECTS, &mut rng),
                pick(&STYLES, &mut rng),
                pick(&CONTEXTS, &mut rng),
            )
        })
        .collect()
}

// The word lists are non-empty, so choose() never yields None
fn pick(words: &[&'static str], rng: &mut StdRng) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

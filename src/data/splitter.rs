// ============================================================
// Layer 4 — Member / Held-out Splitter
// ============================================================
// Splits a corpus into the partition a model is trained on
// ("members") and the partition it never sees ("non-members").
//
// The split is positional and unshuffled: the first
// floor(0.7 · n) non-blank lines are members, the rest are
// held out. Training and attack both call split_members on the
// same non-blank lines, so the labels an attack assigns always
// match what the model was actually trained on.

/// Fraction of non-blank lines used for training, as parts per ten.
pub const MEMBER_TENTHS: usize = 7;

/// Non-blank lines of a corpus, in file order.
pub fn non_blank_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(|l| l.as_ref())
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of member lines for a corpus of `n` non-blank lines.
pub fn member_count(n: usize) -> usize {
    n * MEMBER_TENTHS / 10
}

/// Split `lines` into (members, non_members) without reordering.
pub fn split_members<T>(mut lines: Vec<T>) -> (Vec<T>, Vec<T>) {
    let split_at = member_count(lines.len());
    let held_out = lines.split_off(split_at);

    tracing::debug!(
        "Corpus split: {} members, {} held out",
        lines.len(),
        held_out.len(),
    );

    (lines, held_out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes_are_floor_of_seventy_percent() {
        for n in [0usize, 1, 3, 10, 30, 50, 99, 101] {
            let items: Vec<usize> = (0..n).collect();
            let (members, held) = split_members(items);
            assert_eq!(members.len(), (n * 7) / 10, "n = {n}");
            assert_eq!(members.len() + held.len(), n);
        }
    }

    #[test]
    fn test_split_preserves_order() {
        let items: Vec<usize> = (0..10).collect();
        let (members, held) = split_members(items);
        assert_eq!(members, (0..7).collect::<Vec<_>>());
        assert_eq!(held, vec![7, 8, 9]);
    }

    #[test]
    fn test_thirty_lines_gives_twenty_one_members() {
        assert_eq!(member_count(30), 21);
    }

    #[test]
    fn test_non_blank_lines_drops_whitespace_only() {
        let lines = ["a", "", "  ", "b", "\t"];
        assert_eq!(non_blank_lines(&lines), vec!["a", "b"]);
    }
}

// ============================================================
// Layer 3 — ROC Analysis
// ============================================================
// Rank-based AUC and the ROC curve for a binary labelling.
//
// AUC uses the Mann-Whitney form:
//   AUC = (R_pos - P(P+1)/2) / (P * N)
// where R_pos is the sum of the (1-based, tie-averaged) ranks of
// the positive samples when all scores are sorted ascending.
// Tied scores share the mean of the ranks they span, so a
// labelling with identical scores everywhere yields exactly 0.5.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TraceError};

/// One operating point on the ROC curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    pub fpr: f64,
    pub tpr: f64,
    /// Scores `>= threshold` are predicted positive at this point
    pub threshold: f64,
}

fn class_counts(labels: &[bool]) -> Result<(usize, usize)> {
    let positives = labels.iter().filter(|&&l| l).count();
    let negatives = labels.len() - positives;
    if positives == 0 || negatives == 0 {
        return Err(TraceError::SingleClass);
    }
    Ok((positives, negatives))
}

/// Area under the ROC curve of `scores` against `labels` (true = positive).
pub fn roc_auc(scores: &[f64], labels: &[bool]) -> Result<f64> {
    assert_eq!(scores.len(), labels.len(), "scores and labels must align");
    let (positives, negatives) = class_counts(labels)?;

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut positive_rank_sum = 0.0f64;
    let mut i = 0usize;
    while i < order.len() {
        // Extend j over the run of tied scores starting at i
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        // Ranks i+1 ..= j+1 averaged
        let mean_rank = (i + j + 2) as f64 / 2.0;
        for &idx in &order[i..=j] {
            if labels[idx] {
                positive_rank_sum += mean_rank;
            }
        }
        i = j + 1;
    }

    let p = positives as f64;
    let n = negatives as f64;
    Ok((positive_rank_sum - p * (p + 1.0) / 2.0) / (p * n))
}

/// ROC curve with one point per distinct score, starting at (0, 0).
pub fn roc_curve(scores: &[f64], labels: &[bool]) -> Result<Vec<RocPoint>> {
    assert_eq!(scores.len(), labels.len(), "scores and labels must align");
    let (positives, negatives) = class_counts(labels)?;

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut points = vec![RocPoint { fpr: 0.0, tpr: 0.0, threshold: f64::INFINITY }];
    let (mut tp, mut fp) = (0usize, 0usize);

    for (pos, &idx) in order.iter().enumerate() {
        if labels[idx] { tp += 1 } else { fp += 1 }

        let last_of_run = order
            .get(pos + 1)
            .map_or(true, |&next| scores[next] != scores[idx]);
        if last_of_run {
            points.push(RocPoint {
                fpr: fp as f64 / negatives as f64,
                tpr: tp as f64 / positives as f64,
                threshold: scores[idx],
            });
        }
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_separation_gives_one() {
        let scores = [-1.0, -1.5, -4.0, -5.0];
        let labels = [true, true, false, false];
        assert_eq!(roc_auc(&scores, &labels).unwrap(), 1.0);
    }

    #[test]
    fn test_reversed_separation_gives_zero() {
        let scores = [-4.0, -5.0, -1.0, -1.5];
        let labels = [true, true, false, false];
        assert_eq!(roc_auc(&scores, &labels).unwrap(), 0.0);
    }

    #[test]
    fn test_identical_scores_give_half() {
        let scores = [-3.0; 7];
        let labels = [true, true, true, true, false, false, false];
        assert_eq!(roc_auc(&scores, &labels).unwrap(), 0.5);
    }

    #[test]
    fn test_partial_overlap() {
        // Pairs (pos, neg): (0.8>0.3), (0.8>0.6), (0.4>0.3), (0.4<0.6) → 3/4
        let scores = [0.8, 0.4, 0.3, 0.6];
        let labels = [true, true, false, false];
        assert!((roc_auc(&scores, &labels).unwrap() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_single_class_is_an_error() {
        let err = roc_auc(&[0.1, 0.2], &[true, true]).unwrap_err();
        assert!(matches!(err, TraceError::SingleClass));
    }

    #[test]
    fn test_curve_ends_at_one_one() {
        let scores = [0.8, 0.4, 0.3, 0.6, 0.4];
        let labels = [true, true, false, false, false];
        let curve  = roc_curve(&scores, &labels).unwrap();

        assert_eq!(curve[0].fpr, 0.0);
        assert_eq!(curve[0].tpr, 0.0);
        let last = curve.last().unwrap();
        assert_eq!((last.fpr, last.tpr), (1.0, 1.0));
        // Four distinct scores plus the origin
        assert_eq!(curve.len(), 5);
    }
}

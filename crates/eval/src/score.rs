use std::collections::HashSet;
use std::hash::Hash;

/// Precision/recall/F1 for one predicted-vs-reference set pair.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Scores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl Scores {
    pub const ZERO: Scores = Scores {
        precision: 0.0,
        recall: 0.0,
        f1: 0.0,
    };
}

/// Set-overlap scoring over any hashable fact representation.
///
/// The zero guards are policy, not convenience: an entity with nothing
/// predicted and nothing expected scores (0, 0, 0) rather than dividing
/// by zero.
pub fn score<T: Eq + Hash>(predicted: &HashSet<T>, reference: &HashSet<T>) -> Scores {
    let tp = predicted.intersection(reference).count() as f64;
    let fp = predicted.difference(reference).count() as f64;
    let fn_ = reference.difference(predicted).count() as f64;

    let precision = if tp + fp > 0.0 { tp / (tp + fp) } else { 0.0 };
    let recall = if tp + fn_ > 0.0 { tp / (tp + fn_) } else { 0.0 };
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    Scores {
        precision,
        recall,
        f1,
    }
}

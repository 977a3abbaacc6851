//! Gap-tolerant evaluation of reported read positions.
//!
//! A reported position `p` matches a ground-truth position `q` of the same
//! read when `|p - q| <= G`. Among candidates the nearest wins, ties going to
//! the lower position.

use super::mapping::{Alignment, GroundTruth, Position};
use crate::errors::ScoreError;
use mutabench_sim::config::{Matching, ScoringConfig};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Nearest position of `truth` within `tolerance` of `p`.
pub fn nearest_within(truth: &BTreeSet<Position>, p: Position, tolerance: u64) -> Option<Position> {
    let below = truth.range(..=p).next_back().copied();
    let above = truth.range(p..).next().copied();
    let best = match (below, above) {
        (Some(b), Some(a)) => {
            if p - b <= a - p {
                Some(b)
            } else {
                Some(a)
            }
        }
        (b, a) => b.or(a),
    };
    best.filter(|&q| q.abs_diff(p) <= tolerance)
}

/// Nearest position of `truth` within `tolerance` of `p` that is not in
/// `claimed`.
fn nearest_unclaimed(
    truth: &BTreeSet<Position>,
    claimed: &BTreeSet<Position>,
    p: Position,
    tolerance: u64,
) -> Option<Position> {
    truth
        .range(p.saturating_sub(tolerance)..=p.saturating_add(tolerance))
        .copied()
        .filter(|q| !claimed.contains(q))
        .min_by_key(|&q| (q.abs_diff(p), q))
}

/// Per-line scoring outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadScore {
    pub id: usize,
    pub label: String,
    pub truth: Vec<Position>,
    pub reported: Vec<Position>,
    pub true_positives: usize,
    pub false_positives: usize,
    /// Ground-truth positions of this read left unmatched by this line.
    pub false_negatives: usize,
}

/// Running TP/FP/FN totals.
///
/// FN starts at the total number of ground-truth positions. In lenient mode
/// every true positive lowers it by one, saturating at zero, so several
/// reported positions close to the same truth position all count. In
/// exclusive mode a truth position is claimed by at most one reported
/// position per read and FN drops once per claim.
#[derive(Debug, Clone, Default)]
pub struct ScoreAccumulator {
    true_positives: usize,
    false_positives: usize,
    false_negatives: usize,
    claimed: HashMap<usize, BTreeSet<Position>>,
}

impl ScoreAccumulator {
    pub fn new(total_positions: usize) -> Self {
        Self {
            false_negatives: total_positions,
            ..Self::default()
        }
    }

    /// Score one reported position set for read `id`. Returns this line's
    /// `(tp, fp, fn)`.
    pub fn record(
        &mut self,
        id: usize,
        truth: &BTreeSet<Position>,
        reported: &BTreeSet<Position>,
        tolerance: u64,
        matching: Matching,
    ) -> (usize, usize, usize) {
        let (tp, fp, missed) = match matching {
            Matching::Lenient => {
                let tp = reported
                    .iter()
                    .filter(|&&p| nearest_within(truth, p, tolerance).is_some())
                    .count();
                self.false_negatives = self.false_negatives.saturating_sub(tp);
                (tp, reported.len() - tp, truth.len().saturating_sub(tp))
            }
            Matching::Exclusive => {
                let claimed = self.claimed.entry(id).or_default();
                let mut matched_here = 0;
                let mut fp = 0;
                for &p in reported {
                    match nearest_unclaimed(truth, claimed, p, tolerance) {
                        Some(q) => {
                            claimed.insert(q);
                            matched_here += 1;
                            self.false_negatives = self.false_negatives.saturating_sub(1);
                        }
                        None => fp += 1,
                    }
                }
                (matched_here, fp, truth.len() - matched_here)
            }
        };

        self.true_positives += tp;
        self.false_positives += fp;
        (tp, fp, missed)
    }

    pub fn true_positives(&self) -> usize {
        self.true_positives
    }

    pub fn false_positives(&self) -> usize {
        self.false_positives
    }

    pub fn false_negatives(&self) -> usize {
        self.false_negatives
    }

    /// `TP / (TP + FP)`, `None` when nothing was reported.
    pub fn precision(&self) -> Option<f64> {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// `TP / (TP + FN)`, `None` when there is nothing to find.
    pub fn recall(&self) -> Option<f64> {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }
}

fn ratio(num: usize, den: usize) -> Option<f64> {
    (den > 0).then(|| num as f64 / den as f64)
}

/// Aggregate metrics for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub gap_tolerance: u64,
    pub matching: Matching,
    pub reads: usize,
    pub positions: usize,
    pub aligned_reads: usize,
    pub aligned_positions: usize,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub reads: Vec<ReadScore>,
    pub summary: EvaluationSummary,
}

/// Score `alignment` against `truth`.
///
/// Every aligned line must name a read present in the ground truth, even
/// one that reports no positions. Lines with no positions are not counted as
/// aligned.
pub fn evaluate(
    truth: &GroundTruth,
    alignment: &Alignment,
    config: &ScoringConfig,
) -> Result<Evaluation, ScoreError> {
    let mut acc = ScoreAccumulator::new(truth.total_positions());
    let mut reads = Vec::new();
    let (mut aligned_reads, mut aligned_positions) = (0, 0);

    for aligned in alignment.reads() {
        let entry = truth.get(aligned.id).ok_or(ScoreError::UnknownRead {
            id: aligned.id,
            line: aligned.line,
        })?;
        if aligned.positions.is_empty() {
            continue;
        }
        aligned_reads += 1;
        aligned_positions += aligned.positions.len();

        let (tp, fp, fn_) = acc.record(
            aligned.id,
            &entry.positions,
            &aligned.positions,
            config.gap_tolerance,
            config.matching,
        );
        reads.push(ReadScore {
            id: aligned.id,
            label: entry.label.clone(),
            truth: entry.positions.iter().copied().collect(),
            reported: aligned.positions.iter().copied().collect(),
            true_positives: tp,
            false_positives: fp,
            false_negatives: fn_,
        });
    }

    let summary = EvaluationSummary {
        gap_tolerance: config.gap_tolerance,
        matching: config.matching,
        reads: truth.len(),
        positions: truth.total_positions(),
        aligned_reads,
        aligned_positions,
        true_positives: acc.true_positives(),
        false_positives: acc.false_positives(),
        false_negatives: acc.false_negatives(),
        precision: acc.precision(),
        recall: acc.recall(),
    };
    log::info!(
        "Scored {} aligned reads: TP={} FP={} FN={}",
        summary.aligned_reads,
        summary.true_positives,
        summary.false_positives,
        summary.false_negatives
    );

    Ok(Evaluation { reads, summary })
}

use crate::calc::suggest::CandidateBlock;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How close a candidate must be to the focal block to count as a substitute.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AlternativeTolerances {
    pub score_difference_tolerance: f64,
    pub block_size_difference_tolerance: usize,
    pub max_alternatives: usize,
}

impl Default for AlternativeTolerances {
    fn default() -> Self {
        AlternativeTolerances {
            score_difference_tolerance: 2.0,
            block_size_difference_tolerance: 1,
            max_alternatives: 5,
        }
    }
}

/// Candidates within tolerance of `focal`, best efficiency first, nearer
/// dates breaking ties. The focal block itself and anything overlapping a
/// `selected` day are left out.
pub fn find_alternatives(
    focal: &CandidateBlock,
    candidates: &[CandidateBlock],
    selected: &[NaiveDate],
    tolerances: &AlternativeTolerances,
) -> Vec<CandidateBlock> {
    let selected: HashSet<NaiveDate> = selected.iter().copied().collect();

    let mut matches: Vec<&CandidateBlock> = candidates
        .iter()
        .filter(|c| c.days != focal.days)
        .filter(|c| c.size().abs_diff(focal.size()) <= tolerances.block_size_difference_tolerance)
        .filter(|c| (c.score - focal.score).abs() <= tolerances.score_difference_tolerance)
        .filter(|c| !c.days.days().iter().any(|d| selected.contains(d)))
        .collect();

    matches.sort_by(|a, b| {
        b.efficiency
            .total_cmp(&a.efficiency)
            .then(a.days.distance_days(&focal.days).cmp(&b.days.distance_days(&focal.days)))
            .then(a.days.start().cmp(&b.days.start()))
    });

    matches
        .into_iter()
        .take(tolerances.max_alternatives)
        .cloned()
        .collect()
}

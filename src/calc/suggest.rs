use crate::calc::blocks::{group_into_blocks, Block};
use crate::calc::classifier::CalendarClassification;
use crate::calc::effectiveness::calculate_effectiveness;
use crate::calc::scorer::score_days;
use crate::data::PlannerSettings;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A scored run of PTO days that has not been chosen yet.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CandidateBlock {
    /// The workdays to take off.
    pub days: Block,
    /// Sum of the day scores.
    pub score: f64,
    /// Free days gained per PTO day.
    pub efficiency: f64,
    /// Length of the free run the PTO days join.
    pub effective_days: usize,
}

impl CandidateBlock {
    pub fn id(&self) -> String {
        self.days.id()
    }

    pub fn size(&self) -> usize {
        self.days.size()
    }
}

/// Maximal runs of workdays inside the classified range.
pub fn find_workday_gaps(calendar: &CalendarClassification) -> Vec<Block> {
    group_into_blocks(calendar.range().days().filter(|d| !calendar.is_free(*d)))
}

/// PTO windows worth scoring: every prefix of a gap that follows a free day
/// and every suffix that precedes one, up to `max_block_length` days.
/// Windows containing past days are skipped unless `allow_past_days`.
pub fn candidate_windows(
    calendar: &CalendarClassification,
    settings: &PlannerSettings,
    today: NaiveDate,
) -> Vec<Block> {
    let mut windows = Vec::new();
    for gap in find_workday_gaps(calendar) {
        let mut days = gap.days();
        if !settings.allow_past_days {
            // Past days sit at the front of the gap.
            let first_open = days.iter().position(|d| *d >= today).unwrap_or(days.len());
            days = &days[first_open..];
        }
        let (Some(first), Some(last)) = (days.first(), days.last()) else {
            continue;
        };

        let free_before = first.pred_opt().is_some_and(|d| calendar.is_free(d));
        let free_after = last.succ_opt().is_some_and(|d| calendar.is_free(d));
        let len = days.len();

        for size in 1..=len.min(settings.max_block_length) {
            if free_before {
                windows.extend(Block::from_days(days[..size].to_vec()));
            }
            if free_after && !(free_before && size == len) {
                windows.extend(Block::from_days(days[len - size..].to_vec()));
            }
        }
    }
    windows
}

fn by_rank(a: &CandidateBlock, b: &CandidateBlock) -> Ordering {
    b.efficiency
        .total_cmp(&a.efficiency)
        .then(b.score.total_cmp(&a.score))
        .then(a.days.start().cmp(&b.days.start()))
        .then(a.size().cmp(&b.size()))
}

/// Scores `windows`, keeps the `finalist_limit` best by score per day
/// (earlier start, then shorter window on ties), and evaluates those
/// exactly. Result is ordered best first.
pub fn rank_candidates(
    calendar: &CalendarClassification,
    windows: Vec<Block>,
    settings: &PlannerSettings,
) -> Vec<CandidateBlock> {
    let mut scored: Vec<(Block, f64)> = windows
        .into_iter()
        .map(|w| {
            let score = score_days(w.days(), calendar, &settings.scoring);
            (w, score)
        })
        .collect();
    scored.sort_by(|(wa, sa), (wb, sb)| {
        let per_day_a = sa / wa.size() as f64;
        let per_day_b = sb / wb.size() as f64;
        per_day_b
            .total_cmp(&per_day_a)
            .then(wa.start().cmp(&wb.start()))
            .then(wa.size().cmp(&wb.size()))
    });
    scored.truncate(settings.finalist_limit);

    let mut finalists: Vec<CandidateBlock> = scored
        .into_iter()
        .map(|(days, score)| {
            let result = calculate_effectiveness(calendar.free_days(), &[], days.days());
            CandidateBlock {
                days,
                score,
                efficiency: result.ratio,
                effective_days: result.effective_days,
            }
        })
        .collect();
    finalists.sort_by(by_rank);
    finalists
}

/// Greedily takes ranked candidates that fit in `budget` and do not overlap
/// one another. Returned in date order.
pub fn select_within_budget(ranked: &[CandidateBlock], budget: usize) -> Vec<CandidateBlock> {
    let mut remaining = budget;
    let mut chosen: Vec<CandidateBlock> = Vec::new();
    for candidate in ranked {
        if remaining == 0 {
            break;
        }
        if candidate.size() > remaining {
            continue;
        }
        if chosen.iter().any(|c| c.days.overlaps(&candidate.days)) {
            continue;
        }
        remaining -= candidate.size();
        chosen.push(candidate.clone());
    }
    chosen.sort_by_key(|c| c.days.start());
    chosen
}

use crate::calc::blocks::group_into_blocks;
use crate::calc::classifier::FreeDaySet;
use crate::data::date_key::date_key;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Free days gained for the PTO days spent.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct EffectivenessResult {
    /// Length of every free run that contains at least one PTO day.
    pub effective_days: usize,
    pub pto_days: usize,
    /// Un-rounded `effective_days / pto_days`; 0 when no PTO is spent.
    pub ratio: f64,
}

/// Rounds a leverage ratio to display precision: one decimal, ties away
/// from zero. Every printed ratio goes through here.
pub fn round_ratio(ratio: f64) -> f64 {
    (ratio * 10.0).round() / 10.0
}

impl EffectivenessResult {
    /// The ratio at display precision.
    pub fn display_ratio(&self) -> f64 {
        round_ratio(self.ratio)
    }
}

impl fmt::Display for EffectivenessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} free day(s) for {} PTO day(s) ({:.1}x)",
            self.effective_days,
            self.pto_days,
            self.display_ratio()
        )
    }
}

/// Measures leverage of `selected` PTO days, plus the what-if days in
/// `to_add`, against the weekend/holiday set `free_days`.
///
/// A PTO day unlocks its whole contiguous free run, so every run touched by
/// a PTO day counts in full.
pub fn calculate_effectiveness(
    free_days: &FreeDaySet,
    selected: &[NaiveDate],
    to_add: &[NaiveDate],
) -> EffectivenessResult {
    let pto_keys: HashSet<String> = selected
        .iter()
        .chain(to_add)
        .map(|d| date_key(*d))
        .collect();

    let augmented = free_days
        .values()
        .copied()
        .chain(selected.iter().copied())
        .chain(to_add.iter().copied());

    let effective_days: usize = group_into_blocks(augmented)
        .iter()
        .filter(|block| block.keys().any(|k| pto_keys.contains(&k)))
        .map(|block| block.size())
        .sum();

    let pto_days = pto_keys.len();
    let ratio = if pto_days > 0 {
        effective_days as f64 / pto_days as f64
    } else {
        0.0
    };

    EffectivenessResult {
        effective_days,
        pto_days,
        ratio,
    }
}

use crate::calc::classifier::HolidayLookup;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Bonuses used to rank candidate PTO days. The long-weekend bonus stacks
/// with both the bridge and the holiday-adjacency bonus.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScoringPolicy {
    pub base: f64,
    /// Monday or Friday.
    pub bridge_bonus: f64,
    /// Holiday on the day before or after.
    pub holiday_adjacent_bonus: f64,
    /// Monday after a holiday, or Friday before one.
    pub long_weekend_bonus: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        ScoringPolicy {
            base: 1.0,
            bridge_bonus: 2.0,
            holiday_adjacent_bonus: 3.0,
            long_weekend_bonus: 5.0,
        }
    }
}

pub fn score_day<H: HolidayLookup + ?Sized>(
    day: NaiveDate,
    holidays: &H,
    policy: &ScoringPolicy,
) -> f64 {
    let weekday = day.weekday();
    let holiday_before = day.pred_opt().is_some_and(|d| holidays.is_holiday(d));
    let holiday_after = day.succ_opt().is_some_and(|d| holidays.is_holiday(d));

    let mut score = policy.base;
    if matches!(weekday, Weekday::Mon | Weekday::Fri) {
        score += policy.bridge_bonus;
    }
    if holiday_before || holiday_after {
        score += policy.holiday_adjacent_bonus;
    }
    if (weekday == Weekday::Mon && holiday_before) || (weekday == Weekday::Fri && holiday_after) {
        score += policy.long_weekend_bonus;
    }
    score
}

/// Sum of the day scores of `days`.
pub fn score_days<H: HolidayLookup + ?Sized>(
    days: &[NaiveDate],
    holidays: &H,
    policy: &ScoringPolicy,
) -> f64 {
    days.iter().map(|d| score_day(*d, holidays, policy)).sum()
}

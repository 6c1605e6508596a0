pub mod alternatives;
pub mod blocks;
pub mod budget;
pub mod classifier;
pub mod effectiveness;
pub mod scorer;
pub mod suggest;

pub use alternatives::{find_alternatives, AlternativeTolerances};
pub use blocks::{group_into_blocks, Block};
pub use budget::{BudgetTracker, DayTag, SelectedDay, Selection};
pub use classifier::{is_weekend, is_workday, CalendarClassification, FreeDaySet, HolidayLookup};
pub use effectiveness::{calculate_effectiveness, round_ratio, EffectivenessResult};
pub use scorer::{score_day, ScoringPolicy};
pub use suggest::{candidate_windows, rank_candidates, select_within_budget, CandidateBlock};

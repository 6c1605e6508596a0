use chrono::NaiveDate;
use thiserror::Error;

/// Recoverable failures returned by the planning core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("invalid date key `{0}` (expected YYYY-MM-DD)")]
    InvalidKey(String),

    #[error("PTO budget exceeded: {requested} day(s) requested, budget is {budget}")]
    BudgetExceeded { requested: usize, budget: u32 },

    #[error("invalid date range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("{0} is in the past and past days are not selectable")]
    PastDay(NaiveDate),

    #[error("{0} is already a free day (weekend or holiday)")]
    NotAWorkday(NaiveDate),
}

pub type PlannerResult<T> = Result<T, PlannerError>;

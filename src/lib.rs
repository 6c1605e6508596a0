//! PTO planning core: classifies free days, groups them into runs, scores
//! candidate PTO days and tracks a budgeted selection.

pub mod calc;
pub mod data;
pub mod error;
pub mod planner;

pub use error::{PlannerError, PlannerResult};
pub use planner::{PlannerSession, Suggestions, ToggleAction};

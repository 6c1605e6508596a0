use crate::calc::{
    calculate_effectiveness, candidate_windows, find_alternatives, is_weekend, rank_candidates,
    select_within_budget, BudgetTracker, CalendarClassification, CandidateBlock,
    EffectivenessResult, HolidayLookup, Selection,
};
use crate::data::{DateRange, Holiday, PlannerSettings};
use crate::error::{PlannerError, PlannerResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToggleAction {
    Select,
    Remove,
    Restore,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Suggestions {
    pub blocks: Vec<CandidateBlock>,
    pub effectiveness: EffectivenessResult,
}

/// Results of the last `get_suggestions` call.
#[derive(Clone, Debug)]
struct Plan {
    /// Weekends and holidays only, no PTO.
    calendar: CalendarClassification,
    candidates: Vec<CandidateBlock>,
    suggested: Vec<CandidateBlock>,
}

/// One user's planning session. Every transition takes `&mut self`; share a
/// session across threads behind a single `Mutex`.
#[derive(Clone, Debug)]
pub struct PlannerSession {
    settings: PlannerSettings,
    today: NaiveDate,
    tracker: BudgetTracker,
    /// Holidays known to the session, keyed by date key.
    holidays: HashMap<String, Holiday>,
    plan: Option<Plan>,
}

impl PlannerSession {
    /// A session with no holidays known yet. Until [`Self::with_holidays`]
    /// or [`Self::get_suggestions`] supplies some, `Select` only rejects
    /// weekends as non-workdays.
    pub fn new(settings: PlannerSettings, today: NaiveDate) -> Self {
        let tracker = BudgetTracker::new(settings.budget);
        PlannerSession {
            settings,
            today,
            tracker,
            holidays: HashMap::new(),
            plan: None,
        }
    }

    /// Seeds the holidays used to validate `Select` before the first plan.
    pub fn with_holidays(mut self, holidays: &[Holiday]) -> Self {
        self.set_holidays(holidays);
        self
    }

    fn set_holidays(&mut self, holidays: &[Holiday]) {
        self.holidays = holidays.iter().map(|h| (h.key(), h.clone())).collect();
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    pub fn selection(&self) -> &Selection {
        self.tracker.selection()
    }

    pub fn total_budget(&self) -> u32 {
        self.tracker.total_budget()
    }

    pub fn remaining_budget(&self) -> u32 {
        self.tracker.remaining_budget()
    }

    /// Suggested blocks from the last run, in date order.
    pub fn suggested_blocks(&self) -> &[CandidateBlock] {
        match &self.plan {
            Some(plan) => &plan.suggested,
            None => &[],
        }
    }

    /// Every evaluated candidate from the last run, best first.
    pub fn candidates(&self) -> &[CandidateBlock] {
        match &self.plan {
            Some(plan) => &plan.candidates,
            None => &[],
        }
    }

    /// Proposes PTO blocks for `range` within `budget`, replacing earlier
    /// suggestions. Manual picks are kept and count against the budget.
    pub fn get_suggestions(
        &mut self,
        range: DateRange,
        holidays: &[Holiday],
        budget: u32,
    ) -> PlannerResult<Suggestions> {
        let manual = self.tracker.selection().manual();
        if manual.len() > budget as usize {
            return Err(PlannerError::BudgetExceeded {
                requested: manual.len(),
                budget,
            });
        }

        let search = CalendarClassification::classify(range, holidays, &manual);
        let windows = candidate_windows(&search, &self.settings, self.today);
        let window_count = windows.len();
        let candidates = rank_candidates(&search, windows, &self.settings);
        let suggested = select_within_budget(&candidates, budget as usize - manual.len());

        let suggested_days: Vec<NaiveDate> = suggested
            .iter()
            .flat_map(|c| c.days.days().iter().copied())
            .collect();
        self.tracker.replan(budget, &suggested_days)?;

        let calendar = CalendarClassification::classify(range, holidays, &[]);
        self.set_holidays(holidays);
        self.plan = Some(Plan {
            calendar,
            candidates,
            suggested: suggested.clone(),
        });
        let effectiveness = self.effectiveness();

        debug!(
            start = %range.start(),
            end = %range.end(),
            budget,
            windows = window_count,
            suggested = suggested.len(),
            effective_days = effectiveness.effective_days,
            "computed suggestions"
        );

        Ok(Suggestions {
            blocks: suggested,
            effectiveness,
        })
    }

    /// Applies one selection change. Rejected changes leave the selection as it was.
    pub fn toggle(&mut self, day: NaiveDate, action: ToggleAction) -> PlannerResult<&Selection> {
        let result = self.apply(day, action);
        match &result {
            Ok(()) => debug!(%day, ?action, remaining = self.remaining_budget(), "toggled day"),
            Err(err) => warn!(%day, ?action, %err, "rejected toggle"),
        }
        result.map(|()| self.tracker.selection())
    }

    fn apply(&mut self, day: NaiveDate, action: ToggleAction) -> PlannerResult<()> {
        match action {
            ToggleAction::Select => {
                self.ensure_selectable(day)?;
                if self.tracker.selection().tag(day).is_none() && self.is_free_day(day) {
                    return Err(PlannerError::NotAWorkday(day));
                }
                self.tracker.select_manual(day)
            }
            ToggleAction::Remove => {
                self.tracker.remove_suggested(day);
                Ok(())
            }
            ToggleAction::Restore => {
                self.ensure_selectable(day)?;
                self.tracker.restore_suggested(day)
            }
        }
    }

    fn ensure_selectable(&self, day: NaiveDate) -> PlannerResult<()> {
        if !self.settings.allow_past_days && day < self.today {
            return Err(PlannerError::PastDay(day));
        }
        Ok(())
    }

    fn is_free_day(&self, day: NaiveDate) -> bool {
        is_weekend(day) || self.holidays.is_holiday(day)
    }

    /// Substitutes for the block with id `block_id` (see `Block::id`). An
    /// unknown id yields no alternatives.
    pub fn get_alternatives(&self, block_id: &str) -> Vec<CandidateBlock> {
        let Some(plan) = &self.plan else {
            debug!(block_id, "no suggestions computed yet");
            return Vec::new();
        };
        let focal = plan
            .suggested
            .iter()
            .chain(&plan.candidates)
            .find(|c| c.id() == block_id);
        let Some(focal) = focal else {
            debug!(block_id, "unknown block");
            return Vec::new();
        };

        // The focal block's own days are freed by the swap.
        let selected: Vec<NaiveDate> = self
            .tracker
            .selection()
            .counted_days()
            .into_iter()
            .filter(|d| !focal.days.contains(*d))
            .collect();
        let found = find_alternatives(focal, &plan.candidates, &selected, &self.settings.alternatives);
        debug!(block_id, found = found.len(), "found alternatives");
        found
    }

    /// Leverage of the live selection (active suggestions plus manual days).
    pub fn effectiveness(&self) -> EffectivenessResult {
        let Some(plan) = &self.plan else {
            return EffectivenessResult::default();
        };
        calculate_effectiveness(
            plan.calendar.free_days(),
            &self.tracker.selection().counted_days(),
            &[],
        )
    }
}

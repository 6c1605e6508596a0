use crate::data::date_key::date_key;
use crate::error::{PlannerError, PlannerResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a selected day sits in the planning workflow.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayTag {
    /// Proposed by the optimizer and still active.
    Suggested,
    /// Proposed by the optimizer, then opted out of by the user.
    RemovedSuggested,
    /// Added by the user outside any suggestion.
    Manual,
}

impl DayTag {
    /// Whether the day spends budget.
    pub fn is_counted(self) -> bool {
        matches!(self, DayTag::Suggested | DayTag::Manual)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectedDay {
    pub date: NaiveDate,
    pub tag: DayTag,
}

/// The user's PTO choices. One tag per day, so a day can never be both
/// suggested and manual.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    days: BTreeMap<String, SelectedDay>,
}

impl Selection {
    pub fn tag(&self, date: NaiveDate) -> Option<DayTag> {
        self.days.get(&date_key(date)).map(|d| d.tag)
    }

    pub fn days_tagged(&self, tag: DayTag) -> Vec<NaiveDate> {
        self.days
            .values()
            .filter(|d| d.tag == tag)
            .map(|d| d.date)
            .collect()
    }

    pub fn suggested_active(&self) -> Vec<NaiveDate> {
        self.days_tagged(DayTag::Suggested)
    }

    pub fn removed_suggested(&self) -> Vec<NaiveDate> {
        self.days_tagged(DayTag::RemovedSuggested)
    }

    pub fn manual(&self) -> Vec<NaiveDate> {
        self.days_tagged(DayTag::Manual)
    }

    /// Suggested-active and manual days, in date order.
    pub fn counted_days(&self) -> Vec<NaiveDate> {
        self.days
            .values()
            .filter(|d| d.tag.is_counted())
            .map(|d| d.date)
            .collect()
    }

    pub fn counted(&self) -> usize {
        self.days.values().filter(|d| d.tag.is_counted()).count()
    }

    pub fn entries(&self) -> impl Iterator<Item = &SelectedDay> {
        self.days.values()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    fn set(&mut self, date: NaiveDate, tag: DayTag) {
        self.days.insert(date_key(date), SelectedDay { date, tag });
    }

    fn unset(&mut self, date: NaiveDate) {
        self.days.remove(&date_key(date));
    }
}

/// Guards `suggested + manual <= total_budget` across every transition.
/// Rejected transitions leave the selection untouched.
#[derive(Clone, Debug, Default)]
pub struct BudgetTracker {
    total_budget: u32,
    selection: Selection,
}

impl BudgetTracker {
    pub fn new(total_budget: u32) -> Self {
        BudgetTracker {
            total_budget,
            selection: Selection::default(),
        }
    }

    pub fn total_budget(&self) -> u32 {
        self.total_budget
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Budget left, floored at zero.
    pub fn remaining_budget(&self) -> u32 {
        self.remaining_budget_raw().max(0) as u32
    }

    /// Budget left without flooring, for diagnostics.
    pub fn remaining_budget_raw(&self) -> i64 {
        i64::from(self.total_budget) - self.selection.counted() as i64
    }

    fn ensure_room_for(&self, extra: usize) -> PlannerResult<()> {
        let requested = self.selection.counted() + extra;
        if requested > self.total_budget as usize {
            return Err(PlannerError::BudgetExceeded {
                requested,
                budget: self.total_budget,
            });
        }
        Ok(())
    }

    /// Adds `day` as a manual pick. Picking a removed suggestion restores it;
    /// picking a day already counted is a no-op.
    pub fn select_manual(&mut self, day: NaiveDate) -> PlannerResult<()> {
        match self.selection.tag(day) {
            Some(DayTag::Suggested | DayTag::Manual) => Ok(()),
            Some(DayTag::RemovedSuggested) => self.restore_suggested(day),
            None => {
                self.ensure_room_for(1)?;
                self.selection.set(day, DayTag::Manual);
                Ok(())
            }
        }
    }

    /// Opts out of a suggested day, or drops a manual one. Never fails.
    pub fn remove_suggested(&mut self, day: NaiveDate) {
        match self.selection.tag(day) {
            Some(DayTag::Suggested) => self.selection.set(day, DayTag::RemovedSuggested),
            Some(DayTag::Manual) => self.selection.unset(day),
            Some(DayTag::RemovedSuggested) | None => {}
        }
    }

    pub fn restore_suggested(&mut self, day: NaiveDate) -> PlannerResult<()> {
        if self.selection.tag(day) != Some(DayTag::RemovedSuggested) {
            return Ok(());
        }
        self.ensure_room_for(1)?;
        self.selection.set(day, DayTag::Suggested);
        Ok(())
    }

    /// Replaces all suggestions (and opt-outs) with `suggested` under a new
    /// budget. Manual picks survive; suggested days that are already manual
    /// stay manual.
    pub fn replan(&mut self, total_budget: u32, suggested: &[NaiveDate]) -> PlannerResult<()> {
        let mut next = Selection::default();
        for day in self.selection.manual() {
            next.set(day, DayTag::Manual);
        }
        for day in suggested {
            if next.tag(*day).is_none() {
                next.set(*day, DayTag::Suggested);
            }
        }
        let requested = next.counted();
        if requested > total_budget as usize {
            return Err(PlannerError::BudgetExceeded {
                requested,
                budget: total_budget,
            });
        }
        self.total_budget = total_budget;
        self.selection = next;
        Ok(())
    }
}

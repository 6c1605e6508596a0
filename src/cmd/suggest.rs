use crate::cmd::{start_session, PlanArgs};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use pto_planner::calc::{round_ratio, CandidateBlock, DayTag, EffectivenessResult, Selection};
use pto_planner::data::DateRange;
use pto_planner::{PlannerSession, ToggleAction};
use serde::Serialize;
use std::path::Path;

/// Selection edits applied after the suggestions are computed.
#[derive(Debug, Clone, Default)]
pub struct Toggles {
    pub remove: Vec<NaiveDate>,
    pub restore: Vec<NaiveDate>,
    pub select: Vec<NaiveDate>,
}

impl Toggles {
    /// Removals first so they free budget for restores and picks.
    fn in_order(&self) -> impl Iterator<Item = (NaiveDate, ToggleAction)> + '_ {
        let remove = self.remove.iter().map(|d| (*d, ToggleAction::Remove));
        let restore = self.restore.iter().map(|d| (*d, ToggleAction::Restore));
        let select = self.select.iter().map(|d| (*d, ToggleAction::Select));
        remove.chain(restore).chain(select)
    }
}

#[derive(Serialize)]
struct Report<'a> {
    range: DateRange,
    blocks: &'a [CandidateBlock],
    selection: &'a Selection,
    total_budget: u32,
    remaining_budget: u32,
    effectiveness: EffectivenessResult,
}

pub fn run(dir: &Path, args: &PlanArgs, toggles: &Toggles) -> Result<()> {
    let (mut session, range, _) = start_session(dir, args)?;
    for (day, action) in toggles.in_order() {
        session
            .toggle(day, action)
            .with_context(|| format!("cannot {action:?} {day}").to_lowercase())?;
    }

    let mut out = std::io::stdout();
    if args.json {
        write_json(&session, range, &mut out)
    } else {
        write_suggestions(&session, range, &mut out)
    }
}

fn tag_label(tag: DayTag) -> &'static str {
    match tag {
        DayTag::Suggested => "suggested",
        DayTag::RemovedSuggested => "removed",
        DayTag::Manual => "manual",
    }
}

pub(crate) fn write_json<W: std::io::Write>(
    session: &PlannerSession,
    range: DateRange,
    out: &mut W,
) -> Result<()> {
    let report = Report {
        range,
        blocks: session.suggested_blocks(),
        selection: session.selection(),
        total_budget: session.total_budget(),
        remaining_budget: session.remaining_budget(),
        effectiveness: session.effectiveness(),
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

pub(crate) fn write_suggestions<W: std::io::Write>(
    session: &PlannerSession,
    range: DateRange,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "PTO Suggestions")?;
    writeln!(
        out,
        "Range: [{} - {}]",
        range.start().format("%Y-%m-%d"),
        range.end().format("%Y-%m-%d")
    )?;
    writeln!(out, "---")?;
    writeln!(
        out,
        "  {:<24} {:>4} {:>6} {:>5} {:>6}",
        "Block", "Days", "Score", "Free", "Ratio"
    )?;
    for block in session.suggested_blocks() {
        writeln!(
            out,
            "  {:<24} {:>4} {:>6.1} {:>5} {:>5.1}x",
            block.id(),
            block.size(),
            block.score,
            block.effective_days,
            round_ratio(block.efficiency)
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Selection")?;
    for entry in session.selection().entries() {
        writeln!(
            out,
            "  {:<14} {}",
            entry.date.format("%Y-%m-%d %a"),
            tag_label(entry.tag)
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "{:<26} {}", "Budget:", session.total_budget())?;
    writeln!(out, "{:<26} {}", "Remaining:", session.remaining_budget())?;
    writeln!(out, "{:<26} {}", "Effectiveness:", session.effectiveness())?;
    writeln!(out, "---")?;
    Ok(())
}

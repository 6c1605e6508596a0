pub mod alternatives;
pub mod holidays;
pub mod init;
pub mod suggest;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use pto_planner::data::{from_key, DateRange, HolidayData, Persistable, PlannerSettings};
use pto_planner::{PlannerError, PlannerSession, Suggestions};
use std::path::Path;

/// Options shared by every command that runs the optimizer.
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// First day of the planning range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    pub from: NaiveDate,
    /// Last day of the planning range, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    pub to: NaiveDate,
    /// PTO days to spend (default: `budget` from config.yaml)
    #[arg(long)]
    pub budget: Option<u32>,
    /// Treat this day as today for past-day filtering (default: local date)
    #[arg(long, value_parser = parse_day)]
    pub today: Option<NaiveDate>,
    /// Regional holiday code to include (default: `region` from config.yaml)
    #[arg(long)]
    pub region: Option<String>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn parse_day(value: &str) -> Result<NaiveDate, PlannerError> {
    from_key(value)
}

/// Loads config and holidays from `dir` and runs a first suggestion pass.
pub(crate) fn start_session(
    dir: &Path,
    args: &PlanArgs,
) -> Result<(PlannerSession, DateRange, Suggestions)> {
    let mut settings = PlannerSettings::load(dir)?;
    if let Some(region) = &args.region {
        settings.region = Some(region.clone());
    }
    let budget = args.budget.unwrap_or(settings.budget);
    let holidays = HolidayData::load_from(dir)?.resolve(settings.region.as_deref());
    let range = DateRange::new(args.from, args.to).context("invalid planning range")?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let mut session = PlannerSession::new(settings, today).with_holidays(&holidays);
    let suggestions = session
        .get_suggestions(range, &holidays, budget)
        .context("failed to compute suggestions")?;
    Ok((session, range, suggestions))
}

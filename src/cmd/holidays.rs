use anyhow::Result;
use pto_planner::data::{Holiday, HolidayData, HolidayScope, Persistable};
use std::path::Path;

pub fn run(dir: &Path, region: Option<&str>) -> Result<()> {
    let holidays = HolidayData::load_from(dir)?.resolve(region);
    write_holidays(&holidays, &mut std::io::stdout())
}

fn scope_label(scope: &HolidayScope) -> String {
    match scope {
        HolidayScope::National => "national".to_string(),
        HolidayScope::Regional(code) => format!("regional ({code})"),
    }
}

pub(crate) fn write_holidays<W: std::io::Write>(holidays: &[Holiday], out: &mut W) -> Result<()> {
    writeln!(out, "Holidays")?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<16} {:<16} {}", "Date", "Scope", "Name")?;
    for h in holidays {
        writeln!(
            out,
            "  {:<16} {:<16} {}",
            h.date.format("%Y-%m-%d %a").to_string(),
            scope_label(&h.scope),
            h.name
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} holiday(s)", holidays.len())?;
    Ok(())
}

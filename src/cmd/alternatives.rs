use crate::cmd::{start_session, PlanArgs};
use anyhow::{bail, Result};
use pto_planner::calc::{round_ratio, CandidateBlock};
use pto_planner::PlannerSession;
use std::io::Write;
use std::path::Path;

pub fn run(dir: &Path, args: &PlanArgs, block_id: &str) -> Result<()> {
    let (session, _, _) = start_session(dir, args)?;
    let Some(focal) = find_block(&session, block_id) else {
        bail!("Block '{}' is not a candidate in this range.", block_id);
    };
    let alternatives = session.get_alternatives(block_id);

    let mut out = std::io::stdout();
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&alternatives)?)?;
        Ok(())
    } else {
        write_alternatives(focal, &alternatives, &mut out)
    }
}

fn find_block<'a>(session: &'a PlannerSession, block_id: &str) -> Option<&'a CandidateBlock> {
    session
        .suggested_blocks()
        .iter()
        .chain(session.candidates())
        .find(|c| c.id() == block_id)
}

pub(crate) fn write_alternatives<W: std::io::Write>(
    focal: &CandidateBlock,
    alternatives: &[CandidateBlock],
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Alternatives for {}", focal.id())?;
    writeln!(
        out,
        "Focal: {} day(s), score {:.1}, {:.1}x",
        focal.size(),
        focal.score,
        round_ratio(focal.efficiency)
    )?;
    writeln!(out, "---")?;
    writeln!(
        out,
        "  {:<4} {:<24} {:>4} {:>6} {:>6}",
        "#", "Block", "Days", "Score", "Ratio"
    )?;
    for (i, alt) in alternatives.iter().enumerate() {
        writeln!(
            out,
            "  {:<4} {:<24} {:>4} {:>6.1} {:>5.1}x",
            i + 1,
            alt.id(),
            alt.size(),
            alt.score,
            round_ratio(alt.efficiency)
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} alternative(s)", alternatives.len())?;
    Ok(())
}

use anyhow::Result;
use chrono::NaiveDate;
use pto_planner::data::{Holiday, HolidayData, Persistable, PlannerSettings};
use std::fs;
use std::path::Path;

pub fn run(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    run_in_dir(dir)?;
    println!("Data files initialized in {}.", dir.display());
    Ok(())
}

/// Writes all default data files into `dir`.
pub(crate) fn run_in_dir(dir: &Path) -> Result<()> {
    write_config(dir)?;
    write_holidays(dir)?;
    Ok(())
}

fn write_config(dir: &Path) -> Result<()> {
    PlannerSettings::default().save(dir)
}

fn write_holidays(dir: &Path) -> Result<()> {
    let mut data = HolidayData::default();
    init_holidays(&mut data);
    data.save_to(dir)
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("hard-coded holiday date is valid")
}

fn init_holidays(data: &mut HolidayData) {
    data.add(Holiday::new("New Year's Day", d(2025, 1, 1)));
    data.add(Holiday::new("Martin Luther King Jr. Day", d(2025, 1, 20)));
    data.add(Holiday::new("Presidents' Day", d(2025, 2, 17)));
    data.add(Holiday::regional("Patriots' Day", d(2025, 4, 21), "MA"));
    data.add(Holiday::new("Memorial Day", d(2025, 5, 26)));
    data.add(Holiday::new("Juneteenth", d(2025, 6, 19)));
    data.add(Holiday::new("Independence Day", d(2025, 7, 4)));
    data.add(Holiday::new("Labor Day", d(2025, 9, 1)));
    data.add(Holiday::new("Veterans Day", d(2025, 11, 11)));
    data.add(Holiday::new("Thanksgiving Day", d(2025, 11, 27)));
    data.add(Holiday::new("Christmas Day", d(2025, 12, 25)));

    data.add(Holiday::new("New Year's Day", d(2026, 1, 1)));
    data.add(Holiday::new("Martin Luther King Jr. Day", d(2026, 1, 19)));
    data.add(Holiday::new("Presidents' Day", d(2026, 2, 16)));
    data.add(Holiday::regional("Patriots' Day", d(2026, 4, 20), "MA"));
    data.add(Holiday::new("Memorial Day", d(2026, 5, 25)));
    data.add(Holiday::new("Juneteenth", d(2026, 6, 19)));
    data.add(Holiday::new("Independence Day", d(2026, 7, 3)));
    data.add(Holiday::new("Labor Day", d(2026, 9, 7)));
    data.add(Holiday::new("Veterans Day", d(2026, 11, 11)));
    data.add(Holiday::new("Thanksgiving Day", d(2026, 11, 26)));
    data.add(Holiday::new("Christmas Day", d(2026, 12, 25)));
}

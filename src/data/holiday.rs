use crate::data::date_key::date_key;
use crate::data::persistence::Persistable;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HolidayScope {
    #[default]
    National,
    Regional(String),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Holiday {
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub scope: HolidayScope,
}

impl Holiday {
    pub fn new(name: &str, date: NaiveDate) -> Self {
        Holiday {
            name: name.to_string(),
            date,
            scope: HolidayScope::National,
        }
    }

    pub fn regional(name: &str, date: NaiveDate, region: &str) -> Self {
        Holiday {
            name: name.to_string(),
            date,
            scope: HolidayScope::Regional(region.to_string()),
        }
    }

    pub fn key(&self) -> String {
        date_key(self.date)
    }

    /// National holidays apply everywhere; regional ones only to their region.
    pub fn applies_to(&self, region: Option<&str>) -> bool {
        match &self.scope {
            HolidayScope::National => true,
            HolidayScope::Regional(code) => region.is_some_and(|r| r.eq_ignore_ascii_case(code)),
        }
    }
}

#[derive(Serialize, Deserialize, Default, Debug)]
pub struct HolidayData {
    pub holidays: Vec<Holiday>,
}

impl Persistable for HolidayData {
    fn filename() -> &'static str {
        "holidays.yaml"
    }
    fn is_json() -> bool {
        false
    }
}

impl HolidayData {
    pub fn add(&mut self, holiday: Holiday) {
        self.holidays.push(holiday);
    }

    /// Holidays observed in `region`, sorted by date.
    pub fn resolve(&self, region: Option<&str>) -> Vec<Holiday> {
        let mut resolved: Vec<Holiday> = self
            .holidays
            .iter()
            .filter(|h| h.applies_to(region))
            .cloned()
            .collect();
        resolved.sort_by_key(|h| h.date);
        resolved
    }

    /// Date-key -> holiday. Later entries overwrite earlier ones on the same date.
    pub fn get_holiday_map(&self) -> HashMap<String, &Holiday> {
        let mut map = HashMap::new();
        for h in &self.holidays {
            map.insert(h.key(), h);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_holiday_new_is_national() {
        let h = Holiday::new("New Year's Day", d(2025, 1, 1));
        assert_eq!(h.name, "New Year's Day");
        assert_eq!(h.key(), "2025-01-01");
        assert_eq!(h.scope, HolidayScope::National);
    }

    #[test]
    fn test_get_holiday_map_keyed_by_date() {
        let mut data = HolidayData::default();
        data.add(Holiday::new("Independence Day", d(2025, 7, 4)));
        data.add(Holiday::new("Labor Day", d(2025, 9, 1)));
        let map = data.get_holiday_map();
        assert!(map.contains_key("2025-07-04"));
        assert!(map.contains_key("2025-09-01"));
        assert!(!map.contains_key("2025-12-25"));
        assert_eq!(map["2025-07-04"].name, "Independence Day");
    }

    #[test]
    fn test_get_holiday_map_last_write_wins() {
        let mut data = HolidayData::default();
        data.add(Holiday::new("First", d(2025, 7, 4)));
        data.add(Holiday::new("Second", d(2025, 7, 4)));
        let map = data.get_holiday_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map["2025-07-04"].name, "Second");
    }

    #[test]
    fn test_resolve_without_region_skips_regional() {
        let mut data = HolidayData::default();
        data.add(Holiday::new("Christmas Day", d(2025, 12, 25)));
        data.add(Holiday::regional("Patriots' Day", d(2025, 4, 21), "MA"));
        let resolved = data.resolve(None);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "Christmas Day");
    }

    #[test]
    fn test_resolve_with_region_includes_matching_and_sorts() {
        let mut data = HolidayData::default();
        data.add(Holiday::new("Christmas Day", d(2025, 12, 25)));
        data.add(Holiday::regional("Patriots' Day", d(2025, 4, 21), "MA"));
        data.add(Holiday::regional("Cesar Chavez Day", d(2025, 3, 31), "CA"));
        let resolved = data.resolve(Some("ma"));
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].name, "Patriots' Day");
        assert_eq!(resolved[1].name, "Christmas Day");
    }

    #[test]
    fn test_scope_yaml_shape() {
        let mut data = HolidayData::default();
        data.add(Holiday::regional("Patriots' Day", d(2025, 4, 21), "MA"));
        let yaml = serde_norway::to_string(&data).unwrap();
        let parsed: HolidayData = serde_norway::from_str(&yaml).unwrap();
        assert_eq!(parsed.holidays[0].scope, HolidayScope::Regional("MA".to_string()));
    }

    #[test]
    fn test_scope_defaults_to_national_when_missing() {
        let yaml = "holidays:\n- name: Labor Day\n  date: 2025-09-01\n";
        let parsed: HolidayData = serde_norway::from_str(yaml).unwrap();
        assert_eq!(parsed.holidays[0].scope, HolidayScope::National);
        assert_eq!(parsed.holidays[0].date, d(2025, 9, 1));
    }
}

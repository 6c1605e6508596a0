use crate::data::date_key::date_key;
use crate::data::{DateRange, Holiday};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Date-key -> day for every day not required to be worked. Ordered by key,
/// which is date order.
pub type FreeDaySet = BTreeMap<String, NaiveDate>;

/// Saturday and Sunday, independent of locale.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns true for Monday–Friday, false for Saturday/Sunday.
pub fn is_workday(date: NaiveDate) -> bool {
    !is_weekend(date)
}

/// O(1) holiday membership, implemented by whatever holds the holiday keys.
pub trait HolidayLookup {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

impl HolidayLookup for HashSet<String> {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.contains(&date_key(date))
    }
}

impl HolidayLookup for HashMap<String, Holiday> {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.contains_key(&date_key(date))
    }
}

/// Free days and holidays for one date range.
#[derive(Clone, Debug)]
pub struct CalendarClassification {
    range: DateRange,
    free_days: FreeDaySet,
    holidays: HashMap<String, Holiday>,
}

impl CalendarClassification {
    /// Holidays are added to the free set unless they fall on a weekend;
    /// weekends are added for every day of `range`; `selected` PTO days are
    /// added last so adjacency treats them as free too.
    pub fn classify(range: DateRange, holidays: &[Holiday], selected: &[NaiveDate]) -> Self {
        let mut free_days = FreeDaySet::new();
        let mut holiday_map = HashMap::new();

        for h in holidays {
            let key = h.key();
            if !is_weekend(h.date) {
                free_days.insert(key.clone(), h.date);
            }
            holiday_map.insert(key, h.clone());
        }

        for day in range.days() {
            if is_weekend(day) {
                free_days.insert(date_key(day), day);
            }
        }

        for day in selected {
            free_days.insert(date_key(*day), *day);
        }

        CalendarClassification {
            range,
            free_days,
            holidays: holiday_map,
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn free_days(&self) -> &FreeDaySet {
        &self.free_days
    }

    pub fn is_free(&self, date: NaiveDate) -> bool {
        self.free_days.contains_key(&date_key(date))
    }

    pub fn holiday(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.get(&date_key(date))
    }

    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }
}

impl HolidayLookup for CalendarClassification {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.is_holiday(date)
    }
}

use crate::error::{PlannerError, PlannerResult};
use chrono::{Datelike, NaiveDate};

pub const KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical map key for a calendar day, e.g. `2025-07-04`.
///
/// Keys sort lexicographically in date order for years 0000-9999.
pub fn date_key(date: NaiveDate) -> String {
    date.format(KEY_FORMAT).to_string()
}

/// Inverse of [`date_key`]. Anything that does not re-encode to the exact
/// same string (missing zero padding, trailing text, impossible dates) is
/// rejected.
pub fn from_key(key: &str) -> PlannerResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(key, KEY_FORMAT)
        .map_err(|_| PlannerError::InvalidKey(key.to_string()))?;
    if date_key(date) != key {
        return Err(PlannerError::InvalidKey(key.to_string()));
    }
    Ok(date)
}

/// Numeric `YYYYMMDD` form of the key, order-preserving. Years outside
/// 0000-9999 have no four-digit key and are rejected.
pub fn ordinal_key(date: NaiveDate) -> PlannerResult<u32> {
    let year = u32::try_from(date.year())
        .ok()
        .filter(|y| *y <= 9999)
        .ok_or_else(|| PlannerError::InvalidKey(date_key(date)))?;
    Ok(year * 10_000 + date.month() * 100 + date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_date_key_zero_pads() {
        assert_eq!(date_key(d(2025, 1, 5)), "2025-01-05");
    }

    #[test]
    fn test_from_key_inverts_date_key() {
        for date in [d(2024, 2, 29), d(2025, 12, 31), d(1999, 1, 1)] {
            assert_eq!(from_key(&date_key(date)).unwrap(), date);
        }
    }

    #[test]
    fn test_from_key_rejects_garbage() {
        assert_eq!(
            from_key("not-a-date"),
            Err(PlannerError::InvalidKey("not-a-date".to_string()))
        );
    }

    #[test]
    fn test_from_key_rejects_unpadded() {
        assert!(from_key("2025-1-5").is_err());
    }

    #[test]
    fn test_from_key_rejects_impossible_date() {
        assert!(from_key("2025-02-30").is_err());
    }

    #[test]
    fn test_keys_sort_like_dates() {
        let dates = [d(2025, 10, 1), d(2025, 2, 1), d(2024, 12, 31), d(2025, 2, 10)];
        let mut by_key: Vec<String> = dates.iter().map(|x| date_key(*x)).collect();
        by_key.sort();
        let mut by_date = dates.to_vec();
        by_date.sort();
        let expected: Vec<String> = by_date.iter().map(|x| date_key(*x)).collect();
        assert_eq!(by_key, expected);
    }

    #[test]
    fn test_ordinal_key_is_numeric_and_ordered() {
        assert_eq!(ordinal_key(d(2025, 7, 4)).unwrap(), 20250704);
        assert!(ordinal_key(d(2025, 1, 31)).unwrap() < ordinal_key(d(2025, 2, 1)).unwrap());
    }

    #[test]
    fn test_ordinal_key_rejects_years_without_four_digits() {
        assert_eq!(ordinal_key(d(0, 1, 1)).unwrap(), 101);
        assert_eq!(ordinal_key(d(9999, 12, 31)).unwrap(), 99991231);
        assert!(matches!(
            ordinal_key(d(10000, 1, 1)),
            Err(PlannerError::InvalidKey(_))
        ));
        assert!(matches!(
            ordinal_key(d(-1, 1, 1)),
            Err(PlannerError::InvalidKey(_))
        ));
    }
}

use crate::data::date_key::date_key;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A non-empty run of calendar-consecutive days, sorted ascending.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "Vec<NaiveDate>", into = "Vec<NaiveDate>")]
pub struct Block {
    days: Vec<NaiveDate>,
}

impl Block {
    /// Returns `None` unless `days` is non-empty, ascending and gap-free.
    pub fn from_days(days: Vec<NaiveDate>) -> Option<Self> {
        if days.is_empty() {
            return None;
        }
        if days.windows(2).any(|w| (w[1] - w[0]).num_days() != 1) {
            return None;
        }
        Some(Block { days })
    }

    /// `size` consecutive days starting at `start`; `size` must be at least 1.
    pub fn starting_at(start: NaiveDate, size: usize) -> Option<Self> {
        Self::from_days(start.iter_days().take(size).collect())
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn start(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn end(&self) -> NaiveDate {
        self.days[self.days.len() - 1]
    }

    pub fn size(&self) -> usize {
        self.days.len()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end()
    }

    pub fn overlaps(&self, other: &Block) -> bool {
        self.start() <= other.end() && other.start() <= self.end()
    }

    /// Whole days between the two block starts.
    pub fn distance_days(&self, other: &Block) -> i64 {
        (other.start() - self.start()).num_days().abs()
    }

    /// Stable identifier, e.g. `2025-07-03..2025-07-03`.
    pub fn id(&self) -> String {
        format!("{}..{}", date_key(self.start()), date_key(self.end()))
    }

    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.days.iter().map(|d| date_key(*d))
    }
}

impl TryFrom<Vec<NaiveDate>> for Block {
    type Error = String;

    fn try_from(days: Vec<NaiveDate>) -> Result<Self, Self::Error> {
        Block::from_days(days).ok_or_else(|| "block days must be non-empty and consecutive".into())
    }
}

impl From<Block> for Vec<NaiveDate> {
    fn from(block: Block) -> Self {
        block.days
    }
}

/// Groups days into maximal calendar-consecutive runs, ordered by start date.
///
/// Duplicates collapse. Consecutiveness is measured in whole days, so clock
/// changes can never split a run.
pub fn group_into_blocks<I>(days: I) -> Vec<Block>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut sorted: Vec<NaiveDate> = days.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut blocks = Vec::new();
    let mut current: Vec<NaiveDate> = Vec::new();
    for day in sorted {
        if let Some(prev) = current.last() {
            if (day - *prev).num_days() != 1 {
                blocks.push(Block {
                    days: std::mem::take(&mut current),
                });
            }
        }
        current.push(day);
    }
    if !current.is_empty() {
        blocks.push(Block { days: current });
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_empty_input_yields_no_blocks() {
        assert!(group_into_blocks(Vec::new()).is_empty());
    }

    #[test]
    fn test_single_day_is_one_block() {
        let blocks = group_into_blocks(vec![d(2025, 3, 14)]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].size(), 1);
        assert_eq!(blocks[0].id(), "2025-03-14..2025-03-14");
    }

    #[test]
    fn test_unordered_input_groups_and_orders() {
        let blocks = group_into_blocks(vec![
            d(2025, 1, 12),
            d(2025, 1, 4),
            d(2025, 1, 11),
            d(2025, 1, 5),
            d(2025, 1, 10),
        ]);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].days(), &[d(2025, 1, 4), d(2025, 1, 5)]);
        assert_eq!(blocks[1].days(), &[d(2025, 1, 10), d(2025, 1, 11), d(2025, 1, 12)]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let blocks = group_into_blocks(vec![d(2025, 1, 4), d(2025, 1, 4), d(2025, 1, 5)]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].size(), 2);
    }

    #[test]
    fn test_runs_across_month_and_year_ends() {
        let blocks = group_into_blocks(vec![d(2025, 12, 31), d(2026, 1, 1), d(2026, 1, 2)]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start(), d(2025, 12, 31));
        assert_eq!(blocks[0].end(), d(2026, 1, 2));
    }

    #[test]
    fn test_no_break_across_dst_transitions() {
        // US (2025-03-09) and EU (2025-03-30) spring-forward, EU fall-back (2025-10-26)
        for (start, end) in [
            (d(2025, 3, 7), d(2025, 3, 11)),
            (d(2025, 3, 28), d(2025, 4, 1)),
            (d(2025, 10, 24), d(2025, 10, 28)),
        ] {
            let days: Vec<_> = start.iter_days().take_while(|x| *x <= end).collect();
            let blocks = group_into_blocks(days);
            assert_eq!(blocks.len(), 1, "spurious break between {start} and {end}");
            assert_eq!(blocks[0].size(), 5);
        }
    }

    #[test]
    fn test_blocks_partition_input_and_are_contiguous() {
        let inputs: Vec<Vec<NaiveDate>> = vec![
            vec![d(2025, 2, 1), d(2025, 2, 3), d(2025, 2, 4), d(2025, 2, 28), d(2025, 3, 1)],
            vec![d(2024, 2, 28), d(2024, 2, 29), d(2024, 3, 1), d(2024, 3, 3)],
            (1..=31).step_by(3).map(|x| d(2025, 5, x)).collect(),
            (1..=20).map(|x| d(2025, 6, x)).collect(),
        ];
        for input in inputs {
            let blocks = group_into_blocks(input.clone());
            let expected: BTreeSet<NaiveDate> = input.into_iter().collect();
            let flattened: BTreeSet<NaiveDate> =
                blocks.iter().flat_map(|b| b.days().iter().copied()).collect();
            assert_eq!(flattened, expected);
            for block in &blocks {
                assert!(Block::from_days(block.days().to_vec()).is_some());
            }
            for pair in blocks.windows(2) {
                assert!((pair[1].start() - pair[0].end()).num_days() > 1);
            }
        }
    }

    #[test]
    fn test_from_days_rejects_gaps_and_empty() {
        assert!(Block::from_days(vec![]).is_none());
        assert!(Block::from_days(vec![d(2025, 1, 1), d(2025, 1, 3)]).is_none());
        assert!(Block::from_days(vec![d(2025, 1, 2), d(2025, 1, 1)]).is_none());
    }

    #[test]
    fn test_overlaps_and_distance() {
        let a = Block::starting_at(d(2025, 1, 6), 3).unwrap();
        let b = Block::starting_at(d(2025, 1, 8), 2).unwrap();
        let c = Block::starting_at(d(2025, 1, 20), 1).unwrap();
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert_eq!(a.distance_days(&c), 14);
        assert_eq!(c.distance_days(&a), 14);
    }

    #[test]
    fn test_serde_rejects_non_contiguous_block() {
        assert!(serde_json::from_str::<Block>(r#"["2025-01-01","2025-01-03"]"#).is_err());
        let block: Block = serde_json::from_str(r#"["2025-01-01","2025-01-02"]"#).unwrap();
        assert_eq!(block.size(), 2);
    }
}

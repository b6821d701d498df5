//! Inclusive date ranges and budget period resolution.
//!
//! Both bounds of a [`DateRange`] are part of the range. Two ranges overlap
//! when `a.start <= b.end && a.end >= b.start`, so a period ending on the
//! very day another one starts counts as overlapping.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{BudgetPeriod, EngineError, ResultEngine};

/// Closed interval of calendar dates, `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Range used for lookups and reports. A single day (`start == end`) is
    /// allowed.
    pub fn new(start: NaiveDate, end: NaiveDate) -> ResultEngine<Self> {
        if start > end {
            return Err(EngineError::InvalidQuery(
                "start date must not be after end date".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Build a lookup range from optional request bounds.
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> ResultEngine<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end),
            _ => Err(EngineError::InvalidQuery(
                "start and end dates are required".to_string(),
            )),
        }
    }

    /// Range of a budget period: the end date must be strictly after the
    /// start date.
    pub fn budget(start: NaiveDate, end: NaiveDate) -> ResultEngine<Self> {
        if start >= end {
            return Err(EngineError::InvalidBudgetRange(
                "start date must be before end date".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `true` if `date` lies within the range, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// `true` if the two ranges share at least one day.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

/// Returns the first period overlapping `range`, in the order given.
///
/// Callers pass periods in store order (ascending start date, then creation
/// time). `None` means no period applies; it is never a zero budget.
pub fn resolve_period<'a>(periods: &'a [BudgetPeriod], range: &DateRange) -> Option<&'a BudgetPeriod> {
    periods.iter().find(|period| period.range.overlaps(range))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::MoneyCents;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn range(start: u32, end: u32) -> DateRange {
        DateRange::new(day(start), day(end)).unwrap()
    }

    fn period(start: u32, end: u32, amount: i64) -> BudgetPeriod {
        BudgetPeriod {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            amount: MoneyCents::new(amount),
            range: DateRange::budget(day(start), day(end)).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn budget_range_requires_start_before_end() {
        assert!(DateRange::budget(day(1), day(2)).is_ok());
        assert_eq!(
            DateRange::budget(day(2), day(2)).unwrap_err(),
            EngineError::InvalidBudgetRange("start date must be before end date".to_string())
        );
        assert!(DateRange::budget(day(3), day(2)).is_err());
    }

    #[test]
    fn lookup_range_allows_single_day() {
        let single = range(5, 5);
        assert!(single.contains(day(5)));
        assert!(!single.contains(day(6)));
        assert!(DateRange::new(day(6), day(5)).is_err());
    }

    #[test]
    fn missing_bound_is_invalid_query() {
        assert_eq!(
            DateRange::from_bounds(Some(day(1)), None).unwrap_err(),
            EngineError::InvalidQuery("start and end dates are required".to_string())
        );
        assert!(DateRange::from_bounds(None, Some(day(1))).is_err());
        assert_eq!(
            DateRange::from_bounds(Some(day(1)), Some(day(3))).unwrap(),
            range(1, 3)
        );
    }

    #[test]
    fn contains_is_inclusive() {
        let r = range(1, 10);
        assert!(r.contains(day(1)));
        assert!(r.contains(day(10)));
        assert!(!r.contains(day(11)));
    }

    #[test]
    fn touching_ranges_overlap() {
        assert!(range(1, 10).overlaps(&range(10, 20)));
        assert!(range(10, 20).overlaps(&range(1, 10)));
        assert!(!range(1, 9).overlaps(&range(10, 20)));
        assert!(range(1, 31).overlaps(&range(5, 6)));
    }

    #[test]
    fn resolve_returns_first_overlapping_period() {
        let periods = vec![period(1, 10, 100), period(5, 15, 200), period(20, 25, 300)];

        let hit = resolve_period(&periods, &range(8, 12)).unwrap();
        assert_eq!(hit.amount, MoneyCents::new(100));

        let hit = resolve_period(&periods, &range(11, 12)).unwrap();
        assert_eq!(hit.amount, MoneyCents::new(200));

        assert!(resolve_period(&periods, &range(16, 19)).is_none());
        assert!(resolve_period(&[], &range(1, 2)).is_none());
    }
}

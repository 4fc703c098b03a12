//! Resolves absolute dates from a start date plus integer day offsets, and
//! answers "which period does day `d` fall in" / "days between two dates" in
//! O(log n), per spec §4.1.
use chrono::NaiveDate;

/// A contiguous sequence of demand/target periods, each identified by the
/// day offset (from the model's start date) of its *end*.
///
/// Periods are half-open on the left: period `i` covers
/// `(period_ends[i-1], period_ends[i]]`, with period 0 covering
/// `[0, period_ends[0]]`. Invariant: `period_ends` is strictly increasing
/// (enforced by [`crate::model::builder`] at construction time).
#[derive(Clone, Debug)]
pub struct Calendar {
    start_date: NaiveDate,
    period_ends: Vec<i64>,
}

impl Calendar {
    pub fn new(start_date: NaiveDate, period_ends: Vec<i64>) -> Self {
        Self {
            start_date,
            period_ends,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn num_periods(&self) -> usize {
        self.period_ends.len()
    }

    pub fn period_end_offset(&self, period: usize) -> Option<i64> {
        self.period_ends.get(period).copied()
    }

    pub fn horizon_end(&self) -> i64 {
        self.period_ends.last().copied().unwrap_or(0)
    }

    /// Absolute calendar date for a day offset from `start_date`.
    pub fn date_at(&self, day_offset: i64) -> NaiveDate {
        self.start_date + chrono::Duration::days(day_offset)
    }

    /// Day offset (from `start_date`) for an absolute calendar date.
    pub fn offset_of(&self, date: NaiveDate) -> i64 {
        (date - self.start_date).num_days()
    }

    /// Index of the period containing day offset `d`, or `None` if `d` is
    /// beyond the horizon. Out-of-horizon queries return 0 quantities at the
    /// caller (demand/target lookups), per spec §4.1.
    pub fn period_containing(&self, d: i64) -> Option<usize> {
        if d < 0 {
            return None;
        }
        let idx = self.period_ends.partition_point(|&end| end < d);
        if idx < self.period_ends.len() {
            Some(idx)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar() -> Calendar {
        Calendar::new(
            NaiveDate::from_ymd_opt(2016, 12, 1).unwrap(),
            vec![30, 61, 91, 122],
        )
    }

    #[test]
    fn period_containing_finds_correct_bucket() {
        let cal = calendar();
        assert_eq!(cal.period_containing(0), Some(0));
        assert_eq!(cal.period_containing(30), Some(0));
        assert_eq!(cal.period_containing(31), Some(1));
        assert_eq!(cal.period_containing(122), Some(3));
    }

    #[test]
    fn period_containing_out_of_horizon_is_none() {
        let cal = calendar();
        assert_eq!(cal.period_containing(123), None);
    }

    #[test]
    fn date_at_roundtrips_through_offset_of() {
        let cal = calendar();
        let d = cal.date_at(45);
        assert_eq!(cal.offset_of(d), 45);
    }
}

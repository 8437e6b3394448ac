//! Check-in / check-out validation.
//!
//! Dates are calendar dates (`NaiveDate`): "today" is a date too, so a
//! check-in later on the same day is always accepted.

use chrono::{Days, NaiveDate};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("check-in date is required")]
    MissingCheckIn,
    #[error("check-out date is required")]
    MissingCheckOut,
    #[error("check-out must be after check-in")]
    CheckOutNotAfterCheckIn,
    #[error("check-in cannot be in the past")]
    CheckInInPast,
}

/// A stay with `check_out` strictly after `check_in`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl DateRange {
    /// Builds an ordered range; only the ordering rule is checked.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, DateRangeError> {
        if check_out <= check_in {
            return Err(DateRangeError::CheckOutNotAfterCheckIn);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights; always >= 1.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// Validates a possibly incomplete date pair against the booking rules.
pub fn validate(
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<DateRange, DateRangeError> {
    let check_in = check_in.ok_or(DateRangeError::MissingCheckIn)?;
    let check_out = check_out.ok_or(DateRangeError::MissingCheckOut)?;
    if check_in < today {
        return Err(DateRangeError::CheckInInPast);
    }
    DateRange::new(check_in, check_out)
}

/// Returns the check-out that keeps the pair valid after `check_in` moved.
///
/// An existing check-out on or before the new check-in is pushed to the day
/// after it; a later check-out, or none at all, is kept as is. Fails when
/// there is no day after `check_in` to push it to.
pub fn adjusted_check_out(
    check_in: NaiveDate,
    check_out: Option<NaiveDate>,
) -> Result<Option<NaiveDate>, DateRangeError> {
    match check_out {
        Some(current) if current <= check_in => next_day(check_in)
            .map(Some)
            .ok_or(DateRangeError::CheckOutNotAfterCheckIn),
        other => Ok(other),
    }
}

fn next_day(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(1))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (0i64..3650).prop_map(|offset| day(2026, 1, 1) + chrono::Duration::days(offset))
    }

    #[test]
    fn missing_dates_are_reported_in_order() {
        let today = day(2026, 1, 1);
        assert_eq!(
            validate(None, None, today),
            Err(DateRangeError::MissingCheckIn)
        );
        assert_eq!(
            validate(Some(today), None, today),
            Err(DateRangeError::MissingCheckOut)
        );
    }

    #[test]
    fn check_in_today_is_allowed_yesterday_is_not() {
        let today = day(2026, 10, 16);
        assert!(validate(Some(today), Some(day(2026, 10, 17)), today).is_ok());
        assert_eq!(
            validate(Some(day(2026, 10, 15)), Some(day(2026, 10, 17)), today),
            Err(DateRangeError::CheckInInPast)
        );
    }

    #[test]
    fn adjusted_check_out_advances_only_when_needed() {
        let check_in = day(2026, 12, 20);
        assert_eq!(
            adjusted_check_out(check_in, Some(day(2026, 12, 18))),
            Ok(Some(day(2026, 12, 21)))
        );
        assert_eq!(
            adjusted_check_out(check_in, Some(check_in)),
            Ok(Some(day(2026, 12, 21)))
        );
        assert_eq!(
            adjusted_check_out(check_in, Some(day(2026, 12, 25))),
            Ok(Some(day(2026, 12, 25)))
        );
        assert_eq!(adjusted_check_out(check_in, None), Ok(None));
    }

    #[test]
    fn last_representable_day_has_no_valid_check_out() {
        let last = NaiveDate::MAX;
        assert_eq!(
            adjusted_check_out(last, Some(day(2030, 1, 2))),
            Err(DateRangeError::CheckOutNotAfterCheckIn)
        );
        assert_eq!(adjusted_check_out(last, None), Ok(None));
    }

    #[test]
    fn nights_counts_calendar_days() {
        let range = DateRange::new(day(2026, 12, 15), day(2026, 12, 18)).unwrap();
        assert_eq!(range.nights(), 3);
    }

    proptest! {
        #[test]
        fn ordered_pairs_validate(check_in in arb_date(), len in 1i64..60) {
            let check_out = check_in + chrono::Duration::days(len);
            prop_assert!(validate(Some(check_in), Some(check_out), day(2026, 1, 1)).is_ok());
        }

        #[test]
        fn unordered_pairs_are_rejected(check_in in arb_date(), back in 0i64..60) {
            let check_out = check_in - chrono::Duration::days(back);
            prop_assert_eq!(
                validate(Some(check_in), Some(check_out), day(2026, 1, 1)),
                Err(DateRangeError::CheckOutNotAfterCheckIn)
            );
        }

        #[test]
        fn adjusted_pair_is_always_ordered(check_in in arb_date(), check_out in arb_date()) {
            let adjusted = adjusted_check_out(check_in, Some(check_out)).unwrap().unwrap();
            prop_assert!(adjusted > check_in);
            if check_out <= check_in {
                prop_assert_eq!(adjusted, check_in + chrono::Duration::days(1));
            }
        }
    }
}

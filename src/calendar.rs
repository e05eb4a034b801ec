//! Calendar arithmetic for weekly payment periods
//!
//! The engine only needs three operations from a calendar: the day count
//! between two dates, shifting a date by whole weeks, and shifting it by
//! calendar months (for the penalty reference window). Everything else is
//! derived from those.

use chrono::{Days, Months, NaiveDate};

use crate::error::{LoanError, Result};

/// Days in one payment period
pub const DAYS_PER_PERIOD: i64 = 7;

/// Minimal date arithmetic used by schedule generation
pub trait LoanCalendar: Send + Sync {
    /// Signed number of days from `start` to `end`
    fn days_between(&self, start: NaiveDate, end: NaiveDate) -> i64;

    /// Shift `date` forward by whole weeks, `None` on overflow
    fn add_weeks(&self, date: NaiveDate, weeks: u64) -> Option<NaiveDate>;

    /// Shift `date` forward by calendar months, clamping to month end
    fn add_months(&self, date: NaiveDate, months: u32) -> Option<NaiveDate>;

    /// Number of weekly periods from `start` to `maturity`, rounded up.
    ///
    /// Computed on whole days so that exact week boundaries never round up
    /// through floating-point noise.
    fn periods_to_maturity(&self, start: NaiveDate, maturity: NaiveDate) -> Result<usize> {
        let days = self.days_between(start, maturity);
        if days <= 0 {
            return Err(LoanError::InvalidRange { start, maturity });
        }
        Ok(((days + DAYS_PER_PERIOD - 1) / DAYS_PER_PERIOD) as usize)
    }
}

/// Proleptic Gregorian calendar backed by chrono
#[derive(Debug, Clone, Copy, Default)]
pub struct Gregorian;

impl LoanCalendar for Gregorian {
    fn days_between(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        end.signed_duration_since(start).num_days()
    }

    fn add_weeks(&self, date: NaiveDate, weeks: u64) -> Option<NaiveDate> {
        let days = weeks.checked_mul(DAYS_PER_PERIOD as u64)?;
        date.checked_add_days(Days::new(days))
    }

    fn add_months(&self, date: NaiveDate, months: u32) -> Option<NaiveDate> {
        date.checked_add_months(Months::new(months))
    }
}

/// Weekly periods between two dates on the Gregorian calendar
pub fn periods_to_maturity(start: NaiveDate, maturity: NaiveDate) -> Result<usize> {
    Gregorian.periods_to_maturity(start, maturity)
}

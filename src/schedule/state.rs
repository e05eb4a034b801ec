//! Running state carried between weekly periods

use chrono::NaiveDate;

use crate::calendar::LoanCalendar;
use crate::error::{DateShift, LoanError, Result};
use super::records::WeekRecord;

/// Loan position at the start of a period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmortizationState {
    /// Zero-based period index
    pub period: usize,

    /// Payment date of this period
    pub date: NaiveDate,

    /// Outstanding balance at period start
    pub balance: f64,
}

impl AmortizationState {
    /// State before the first payment
    pub fn at_start(start: NaiveDate, principal: f64) -> Self {
        Self {
            period: 0,
            date: start,
            balance: principal,
        }
    }

    /// Split this period's payment into interest and principal
    pub fn record(&self, payment: f64, rate: f64) -> WeekRecord {
        let interest_payment = self.balance * rate / 100.0 / 52.0;
        let principal_payment = payment - interest_payment;

        WeekRecord {
            date: self.date,
            initial: self.balance,
            payment,
            rate,
            interest_payment,
            principal_payment,
            remaining: self.balance - principal_payment,
        }
    }

    /// Move to the next period, chaining the balance from `record`
    pub fn advance<C>(self, record: &WeekRecord, calendar: &C) -> Result<Self>
    where
        C: LoanCalendar + ?Sized,
    {
        let date = calendar
            .add_weeks(self.date, 1)
            .ok_or_else(|| LoanError::DateOverflow {
                date: self.date,
                shift: DateShift::Weeks(1),
            })?;

        Ok(Self {
            period: self.period + 1,
            date,
            balance: record.remaining,
        })
    }
}

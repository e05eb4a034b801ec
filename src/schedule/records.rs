//! Schedule output structures: weekly records, totals and diagnostics

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{LoanError, Result};

/// One weekly period of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeekRecord {
    pub date: NaiveDate,
    /// Balance at period start
    pub initial: f64,
    pub payment: f64,
    /// Annual percentage rate in effect this period
    pub rate: f64,
    pub interest_payment: f64,
    pub principal_payment: f64,
    /// Balance at period end
    pub remaining: f64,
}

/// Numeric fields that can be summed across a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SumField {
    Payment,
    InterestPayment,
    PrincipalPayment,
}

impl SumField {
    pub fn value(&self, record: &WeekRecord) -> f64 {
        match self {
            SumField::Payment => record.payment,
            SumField::InterestPayment => record.interest_payment,
            SumField::PrincipalPayment => record.principal_payment,
        }
    }
}

/// Immutable ordered sequence of weekly records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    records: Vec<WeekRecord>,
}

impl Schedule {
    pub fn records(&self) -> &[WeekRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeekRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, period: usize) -> Option<&WeekRecord> {
        self.records.get(period)
    }

    /// Final period of the schedule
    pub fn last(&self) -> Result<&WeekRecord> {
        self.records.last().ok_or(LoanError::EmptySchedule)
    }

    /// Balance left after the final payment
    pub fn final_remaining(&self) -> Result<f64> {
        self.last().map(|r| r.remaining)
    }

    /// Sum `field` over the periods from `from` onward.
    ///
    /// A start index past the end yields an empty slice and a total of zero.
    pub fn sum(&self, field: SumField, from: usize) -> f64 {
        self.records
            .get(from..)
            .unwrap_or(&[])
            .iter()
            .map(|r| field.value(r))
            .sum()
    }

    /// Totals for display alongside the schedule
    pub fn summary(&self) -> Result<ScheduleSummary> {
        let final_remaining = self.final_remaining()?;

        Ok(ScheduleSummary {
            periods: self.len(),
            total_payments: self.sum(SumField::Payment, 0),
            total_interest: self.sum(SumField::InterestPayment, 0),
            total_principal: self.sum(SumField::PrincipalPayment, 0),
            final_remaining,
        })
    }

    /// Indices of periods whose payment did not cover the interest due
    pub fn non_amortizing_periods(&self) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.principal_payment < 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Advisory warning when the balance grows in any period.
    ///
    /// The generator never rejects such inputs; callers decide.
    pub fn amortization_warning(&self) -> Option<NonAmortizingPayment> {
        let periods = self.non_amortizing_periods();
        let first_period = *periods.first()?;

        Some(NonAmortizingPayment {
            first_period,
            first_date: self.records[first_period].date,
            periods: periods.len(),
        })
    }
}

impl From<Vec<WeekRecord>> for Schedule {
    fn from(records: Vec<WeekRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a WeekRecord;
    type IntoIter = std::slice::Iter<'a, WeekRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Summary totals for a schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub periods: usize,
    pub total_payments: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    /// Remaining balance at maturity
    pub final_remaining: f64,
}

/// Payment smaller than the interest due, so the balance grows
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize)]
#[error("payment below interest in {periods} period(s), first at {first_period} ({first_date})")]
pub struct NonAmortizingPayment {
    pub first_period: usize,
    pub first_date: NaiveDate,
    pub periods: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(week: u32, initial: f64, payment: f64, rate: f64) -> WeekRecord {
        let interest_payment = initial * rate / 100.0 / 52.0;
        let principal_payment = payment - interest_payment;
        WeekRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(7 * week as u64),
            initial,
            payment,
            rate,
            interest_payment,
            principal_payment,
            remaining: initial - principal_payment,
        }
    }

    fn two_week_schedule() -> Schedule {
        let first = record(0, 10_000.0, 100.0, 5.2);
        let second = record(1, first.remaining, 100.0, 5.2);
        Schedule::from(vec![first, second])
    }

    #[test]
    fn test_sum_fields() {
        let schedule = two_week_schedule();
        assert_relative_eq!(schedule.sum(SumField::Payment, 0), 200.0);
        assert_relative_eq!(
            schedule.sum(SumField::InterestPayment, 0),
            schedule.records()[0].interest_payment + schedule.records()[1].interest_payment
        );
        assert_relative_eq!(
            schedule.sum(SumField::PrincipalPayment, 1),
            schedule.records()[1].principal_payment
        );
    }

    #[test]
    fn test_sum_past_end_is_zero() {
        let schedule = two_week_schedule();
        assert_eq!(schedule.sum(SumField::InterestPayment, 2), 0.0);
        assert_eq!(schedule.sum(SumField::InterestPayment, 50), 0.0);
        assert_eq!(Schedule::default().sum(SumField::Payment, 0), 0.0);
    }

    #[test]
    fn test_summary() {
        let schedule = two_week_schedule();
        let summary = schedule.summary().unwrap();

        assert_eq!(summary.periods, 2);
        assert_relative_eq!(summary.total_payments, 200.0);
        assert_relative_eq!(
            summary.total_principal + summary.final_remaining,
            10_000.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_empty_schedule_errors() {
        let empty = Schedule::default();
        assert!(matches!(empty.last(), Err(LoanError::EmptySchedule)));
        assert!(matches!(empty.summary(), Err(LoanError::EmptySchedule)));
    }

    #[test]
    fn test_non_amortizing_detection() {
        // 52% annual on 10k is 100/week of interest; a 50 payment never catches up
        let first = record(0, 10_000.0, 50.0, 52.0);
        let second = record(1, first.remaining, 50.0, 52.0);
        let schedule = Schedule::from(vec![first, second]);

        assert_eq!(schedule.non_amortizing_periods(), vec![0, 1]);
        let warning = schedule.amortization_warning().unwrap();
        assert_eq!(warning.first_period, 0);
        assert_eq!(warning.periods, 2);
        assert!(schedule.records()[1].remaining > schedule.records()[0].remaining);

        assert!(two_week_schedule().amortization_warning().is_none());
    }

    #[test]
    fn test_non_amortizing_message() {
        let warning = NonAmortizingPayment {
            first_period: 3,
            first_date: NaiveDate::from_ymd_opt(2024, 1, 22).unwrap(),
            periods: 2,
        };
        assert_eq!(
            warning.to_string(),
            "payment below interest in 2 period(s), first at 3 (2024-01-22)"
        );
    }
}

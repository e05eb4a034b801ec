//! Weekly amortization schedule generator

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::calendar::{Gregorian, LoanCalendar};
use crate::error::{DateShift, LoanError, Result};
use super::records::Schedule;
use super::state::AmortizationState;

/// Loan terms shared by every schedule variant of one analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub start: NaiveDate,
    pub maturity: NaiveDate,
    /// Opening balance
    pub principal: f64,
    /// Fixed weekly payment, same currency unit as principal
    pub payment: f64,
}

/// Interest rate applied over the life of a schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RateRegime {
    /// One annual rate (percent) for every period
    Single { rate: f64 },
    /// `rate` before `switch_period`, `new_rate` from it onward
    Switch {
        rate: f64,
        switch_period: usize,
        new_rate: f64,
    },
}

impl RateRegime {
    pub fn single(rate: f64) -> Self {
        RateRegime::Single { rate }
    }

    pub fn switch(rate: f64, switch_period: usize, new_rate: f64) -> Self {
        RateRegime::Switch { rate, switch_period, new_rate }
    }

    /// Annual rate in effect for a zero-based period
    pub fn rate_for(&self, period: usize) -> f64 {
        match *self {
            RateRegime::Single { rate } => rate,
            RateRegime::Switch { rate, switch_period, new_rate } => {
                if period >= switch_period {
                    new_rate
                } else {
                    rate
                }
            }
        }
    }
}

/// Builds amortization schedules on a given calendar
#[derive(Debug, Clone, Copy)]
pub struct ScheduleGenerator<C = Gregorian> {
    calendar: C,
}

impl ScheduleGenerator {
    /// Generator on the Gregorian calendar
    pub fn new() -> Self {
        Self { calendar: Gregorian }
    }
}

impl Default for ScheduleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: LoanCalendar> ScheduleGenerator<C> {
    pub fn with_calendar(calendar: C) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    /// Number of weekly periods in `terms`
    pub fn periods(&self, terms: &LoanTerms) -> Result<usize> {
        self.calendar.periods_to_maturity(terms.start, terms.maturity)
    }

    /// Generate the schedule for `terms` under `regime`.
    ///
    /// Payments below the interest due are not rejected: the principal
    /// payment goes negative and the balance grows. See
    /// [`Schedule::amortization_warning`].
    pub fn generate(&self, terms: &LoanTerms, regime: &RateRegime) -> Result<Schedule> {
        let periods = self.periods(terms)?;
        let opening = AmortizationState::at_start(terms.start, terms.principal);

        let (records, closing) = (0..periods).try_fold(
            (Vec::with_capacity(periods), opening),
            |(mut records, state), _| {
                let row = state.record(terms.payment, regime.rate_for(state.period));
                let next = state.advance(&row, &self.calendar)?;
                records.push(row);
                Ok::<_, LoanError>((records, next))
            },
        )?;

        debug!(
            "generated {} periods from {} to {} under {:?}, closing balance {:.2}",
            closing.period,
            terms.start,
            closing.date,
            regime,
            closing.balance
        );

        Ok(Schedule::from(records))
    }

    /// Schedule at `rate` over `months` calendar months from the start date.
    ///
    /// Used as the minimum-charge reference for switch penalties; it does not
    /// depend on when the switch happens.
    pub fn reference_window(&self, terms: &LoanTerms, rate: f64, months: u32) -> Result<Schedule> {
        let maturity = self
            .calendar
            .add_months(terms.start, months)
            .ok_or_else(|| LoanError::DateOverflow {
                date: terms.start,
                shift: DateShift::Months(months),
            })?;

        let window = LoanTerms { maturity, ..*terms };
        self.generate(&window, &RateRegime::single(rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::SumField;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use chrono::Days;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn terms(weeks: u64) -> LoanTerms {
        let start = date(2024, 1, 1);
        LoanTerms {
            start,
            maturity: start + Days::new(7 * weeks),
            principal: 500_000.0,
            payment: 500.0,
        }
    }

    /// Calendar whose months are exactly four weeks long
    struct LunarCalendar;

    impl LoanCalendar for LunarCalendar {
        fn days_between(&self, start: NaiveDate, end: NaiveDate) -> i64 {
            Gregorian.days_between(start, end)
        }

        fn add_weeks(&self, date: NaiveDate, weeks: u64) -> Option<NaiveDate> {
            Gregorian.add_weeks(date, weeks)
        }

        fn add_months(&self, date: NaiveDate, months: u32) -> Option<NaiveDate> {
            self.add_weeks(date, 4 * u64::from(months))
        }
    }

    #[test]
    fn test_thirteen_week_schedule_length() {
        let generator = ScheduleGenerator::new();
        let schedule = generator.generate(&terms(13), &RateRegime::single(4.0)).unwrap();
        assert_eq!(schedule.len(), 13);

        let longer = LoanTerms {
            maturity: terms(13).maturity + Days::new(1),
            ..terms(13)
        };
        assert_eq!(generator.generate(&longer, &RateRegime::single(4.0)).unwrap().len(), 14);
    }

    #[test]
    fn test_first_period_values() {
        let schedule = ScheduleGenerator::new()
            .generate(&terms(57), &RateRegime::single(3.2))
            .unwrap();
        let first = &schedule.records()[0];

        assert_eq!(first.date, date(2024, 1, 1));
        assert_eq!(first.initial, 500_000.0);
        assert_abs_diff_eq!(first.interest_payment, 307.6923, epsilon = 1e-2);
        assert_abs_diff_eq!(first.principal_payment, 192.3077, epsilon = 1e-2);
        assert_abs_diff_eq!(first.remaining, 499_807.6923, epsilon = 1e-2);
    }

    #[test]
    fn test_record_invariants_hold() {
        let schedule = ScheduleGenerator::new()
            .generate(&terms(57), &RateRegime::switch(3.2, 20, 1.9))
            .unwrap();

        for (i, row) in schedule.iter().enumerate() {
            let interest = row.initial * row.rate / 100.0 / 52.0;
            assert_relative_eq!(row.interest_payment, interest, max_relative = 1e-9);
            assert_relative_eq!(
                row.principal_payment,
                row.payment - row.interest_payment,
                max_relative = 1e-9
            );
            assert_relative_eq!(
                row.remaining,
                row.initial - row.principal_payment,
                max_relative = 1e-9
            );

            if i > 0 {
                let prev = &schedule.records()[i - 1];
                assert_relative_eq!(row.initial, prev.remaining, max_relative = 1e-9);
                assert_eq!(row.date, prev.date + Days::new(7));
            }
        }
    }

    #[test]
    fn test_full_amortization_identity() {
        let schedule = ScheduleGenerator::new()
            .generate(&terms(57), &RateRegime::single(3.2))
            .unwrap();

        let principal_paid = schedule.sum(SumField::PrincipalPayment, 0);
        let remaining = schedule.final_remaining().unwrap();
        assert_abs_diff_eq!(principal_paid + remaining, 500_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_switch_regime_rates() {
        let schedule = ScheduleGenerator::new()
            .generate(&terms(10), &RateRegime::switch(3.2, 4, 1.9))
            .unwrap();

        let rates: Vec<f64> = schedule.iter().map(|r| r.rate).collect();
        assert_eq!(rates[..4], [3.2; 4]);
        assert_eq!(rates[4..], [1.9; 6]);
    }

    #[test]
    fn test_switch_past_end_keeps_original_rate() {
        let generator = ScheduleGenerator::new();
        let single = generator.generate(&terms(10), &RateRegime::single(3.2)).unwrap();
        let late = generator.generate(&terms(10), &RateRegime::switch(3.2, 10, 0.0)).unwrap();
        assert_eq!(single, late);
    }

    #[test]
    fn test_lower_rate_pays_down_more() {
        let generator = ScheduleGenerator::new();
        let original = generator.generate(&terms(57), &RateRegime::single(3.2)).unwrap();
        let switched = generator.generate(&terms(57), &RateRegime::switch(3.2, 0, 1.9)).unwrap();

        assert!(switched.final_remaining().unwrap() < original.final_remaining().unwrap());
    }

    #[test]
    fn test_small_payment_grows_balance() {
        let small = LoanTerms { payment: 100.0, ..terms(20) };
        let schedule = ScheduleGenerator::new()
            .generate(&small, &RateRegime::single(3.2))
            .unwrap();

        assert_eq!(schedule.len(), 20);
        assert_eq!(schedule.non_amortizing_periods().len(), 20);
        assert!(schedule.final_remaining().unwrap() > small.principal);
    }

    #[test]
    fn test_invalid_range_propagates() {
        let backwards = LoanTerms {
            maturity: date(2023, 12, 1),
            ..terms(13)
        };
        assert!(matches!(
            ScheduleGenerator::new().generate(&backwards, &RateRegime::single(3.2)),
            Err(LoanError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_reference_window_three_months() {
        let window = ScheduleGenerator::new()
            .reference_window(&terms(57), 3.2, 3)
            .unwrap();

        // 2024-01-01 to 2024-04-01 is 91 days
        assert_eq!(window.len(), 13);
        assert!(window.iter().all(|r| r.rate == 3.2));
    }

    #[test]
    fn test_reference_window_uses_calendar() {
        let window = ScheduleGenerator::with_calendar(LunarCalendar)
            .reference_window(&terms(57), 3.2, 3)
            .unwrap();
        assert_eq!(window.len(), 12);
    }

    #[test]
    fn test_reference_window_overflow() {
        let start = NaiveDate::MAX - Days::new(30);
        let late = LoanTerms {
            start,
            maturity: NaiveDate::MAX,
            ..terms(1)
        };
        let err = ScheduleGenerator::new()
            .reference_window(&late, 3.2, 3)
            .unwrap_err();

        assert!(matches!(
            err,
            LoanError::DateOverflow { date, shift: DateShift::Months(3) } if date == start
        ));
        assert!(err.to_string().ends_with("by 3 month(s)"));
    }

    #[test]
    fn test_rate_follows_period_counter() {
        let schedule = ScheduleGenerator::with_calendar(LunarCalendar)
            .generate(&terms(6), &RateRegime::switch(3.2, 4, 1.9))
            .unwrap();
        let rates: Vec<f64> = schedule.iter().map(|r| r.rate).collect();
        assert_eq!(rates, vec![3.2, 3.2, 3.2, 3.2, 1.9, 1.9]);
    }
}

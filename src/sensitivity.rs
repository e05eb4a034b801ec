//! Sensitivity sweep: gain for every candidate switch period
//!
//! The original and reference-window schedules are built once; each switch
//! period then regenerates only the new-rate and comparison-rate schedules.
//! That is O(N) schedules of O(N) periods each, so the sweep is quadratic in
//! the number of weeks. Periods are independent, which makes the sweep
//! trivially parallel (see [`SensitivitySweep::run_parallel`]).

use std::time::Instant;

use chrono::NaiveDate;
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calendar::{Gregorian, LoanCalendar};
use crate::error::{LoanError, Result};
use crate::schedule::{LoanTerms, RateRegime, Schedule, ScheduleGenerator};
use crate::switching::{self, SwitchPenalty, DEFAULT_PENALTY_WINDOW_MONTHS};

/// The three annual rates (percent) involved in a switch decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwitchRates {
    /// Rate the loan currently carries
    pub interest_rate: f64,
    /// Reference rate the lender's forfeited interest is measured against
    pub comparison_rate: f64,
    /// Rate the loan would switch to
    pub new_rate: f64,
}

/// Gain from switching at one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub period: usize,
    pub date: NaiveDate,
    /// Additional paydown before penalty
    pub benefit: f64,
    pub penalty: f64,
    pub gain: f64,
}

/// Pre-built inputs for sweeping the switch period
pub struct SensitivitySweep<'a, C = Gregorian> {
    generator: &'a ScheduleGenerator<C>,
    terms: LoanTerms,
    rates: SwitchRates,
    original: Schedule,
    reference_window: Schedule,
}

impl<'a, C: LoanCalendar> SensitivitySweep<'a, C> {
    /// Build the fixed original and reference-window schedules
    pub fn new(
        generator: &'a ScheduleGenerator<C>,
        terms: LoanTerms,
        rates: SwitchRates,
        window_months: u32,
    ) -> Result<Self> {
        let original = generator.generate(&terms, &RateRegime::single(rates.interest_rate))?;
        let reference_window =
            generator.reference_window(&terms, rates.interest_rate, window_months)?;

        Ok(Self::with_schedules(generator, terms, rates, original, reference_window))
    }

    /// Reuse schedules that the caller already generated
    pub fn with_schedules(
        generator: &'a ScheduleGenerator<C>,
        terms: LoanTerms,
        rates: SwitchRates,
        original: Schedule,
        reference_window: Schedule,
    ) -> Self {
        Self {
            generator,
            terms,
            rates,
            original,
            reference_window,
        }
    }

    pub fn original(&self) -> &Schedule {
        &self.original
    }

    pub fn reference_window(&self) -> &Schedule {
        &self.reference_window
    }

    /// Number of candidate switch periods
    pub fn periods(&self) -> usize {
        self.original.len()
    }

    /// Gain for a switch at `period`
    pub fn point(&self, period: usize) -> Result<SensitivityPoint> {
        let date = self
            .original
            .get(period)
            .map(|r| r.date)
            .ok_or_else(|| LoanError::SwitchPeriodOutOfRange {
                switch_period: period,
                periods: self.periods(),
            })?;

        let switched = self.generator.generate(
            &self.terms,
            &RateRegime::switch(self.rates.interest_rate, period, self.rates.new_rate),
        )?;
        let comparison = self.generator.generate(
            &self.terms,
            &RateRegime::switch(self.rates.interest_rate, period, self.rates.comparison_rate),
        )?;

        let penalty =
            SwitchPenalty::calculate(&self.original, &comparison, &self.reference_window, period)
                .amount;
        let benefit = switching::benefit(&self.original, &switched)?;

        Ok(SensitivityPoint {
            period,
            date,
            benefit,
            penalty,
            gain: switching::gain(&self.original, &switched, penalty)?,
        })
    }

    /// Sweep every switch period in order
    pub fn run(&self) -> Result<Vec<SensitivityPoint>> {
        let started = Instant::now();
        let series = (0..self.periods())
            .map(|period| self.point(period))
            .collect::<Result<Vec<_>>>()?;

        info!("swept {} switch periods in {:?}", series.len(), started.elapsed());
        Ok(series)
    }

    /// Sweep every switch period across the rayon pool.
    ///
    /// Output is identical to [`run`](Self::run), in period order.
    pub fn run_parallel(&self) -> Result<Vec<SensitivityPoint>> {
        let started = Instant::now();
        let series = (0..self.periods())
            .into_par_iter()
            .map(|period| self.point(period))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "swept {} switch periods in parallel in {:?}",
            series.len(),
            started.elapsed()
        );
        Ok(series)
    }
}

/// Gain for every switch period, on the Gregorian calendar
pub fn sensitivity_series(terms: LoanTerms, rates: SwitchRates) -> Result<Vec<SensitivityPoint>> {
    let generator = ScheduleGenerator::new();
    SensitivitySweep::new(&generator, terms, rates, DEFAULT_PENALTY_WINDOW_MONTHS)?.run()
}

/// Parallel variant of [`sensitivity_series`]
pub fn par_sensitivity_series(
    terms: LoanTerms,
    rates: SwitchRates,
) -> Result<Vec<SensitivityPoint>> {
    let generator = ScheduleGenerator::new();
    SensitivitySweep::new(&generator, terms, rates, DEFAULT_PENALTY_WINDOW_MONTHS)?.run_parallel()
}

/// Switch period with the highest gain; earliest wins ties
pub fn best_switch(series: &[SensitivityPoint]) -> Option<&SensitivityPoint> {
    series.iter().fold(None, |best, point| match best {
        Some(b) if b.gain >= point.gain => Some(b),
        _ => Some(point),
    })
}

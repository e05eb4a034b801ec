//! One-shot recompute of every output for a parameter set
//!
//! Each call builds all schedules from scratch and returns them together
//! with totals, penalty, gain and the sensitivity series in one value.

use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;

use crate::calendar::{Gregorian, LoanCalendar};
use crate::config::LoanParams;
use crate::error::Result;
use crate::schedule::{
    NonAmortizingPayment, RateRegime, Schedule, ScheduleGenerator, ScheduleSummary,
};
use crate::sensitivity::{best_switch, SensitivityPoint, SensitivitySweep};
use crate::switching::{self, SwitchPenalty};

/// Everything derived from one [`LoanParams`]
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub params: LoanParams,
    pub periods: usize,
    /// Payment date of the switch period
    pub switch_date: NaiveDate,

    /// Original rate throughout
    pub original: Schedule,
    /// Original rate, then the new rate from the switch period
    pub switched: Schedule,
    /// Original rate, then the comparison rate from the switch period
    pub comparison: Schedule,
    /// Original rate over the penalty window
    pub reference_window: Schedule,

    pub original_summary: ScheduleSummary,
    pub switched_summary: ScheduleSummary,

    /// Additional paydown of the switched schedule
    pub benefit: f64,
    pub penalty: SwitchPenalty,
    pub gain: f64,

    pub sensitivity: Vec<SensitivityPoint>,
    pub best_switch: Option<SensitivityPoint>,

    /// Advisory: set when the payment fails to cover interest
    pub original_warning: Option<NonAmortizingPayment>,
    pub switched_warning: Option<NonAmortizingPayment>,
}

/// Runs full analyses on a given calendar
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<C = Gregorian> {
    generator: ScheduleGenerator<C>,
    parallel_sweep: bool,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::with_generator(ScheduleGenerator::new())
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: LoanCalendar> Analyzer<C> {
    pub fn with_generator(generator: ScheduleGenerator<C>) -> Self {
        Self {
            generator,
            parallel_sweep: false,
        }
    }

    /// Run the sensitivity sweep on the rayon pool
    pub fn parallel(mut self, parallel_sweep: bool) -> Self {
        self.parallel_sweep = parallel_sweep;
        self
    }

    /// Validate `params` and compute every output
    pub fn analyze(&self, params: &LoanParams) -> Result<Analysis> {
        let periods = params.validate(self.generator.calendar())?;
        let terms = params.terms();
        let rates = params.rates();

        let sweep = SensitivitySweep::new(
            &self.generator,
            terms,
            rates,
            params.penalty_window_months,
        )?;
        let sensitivity = if self.parallel_sweep {
            sweep.run_parallel()?
        } else {
            sweep.run()?
        };

        let original = sweep.original().clone();
        let reference_window = sweep.reference_window().clone();

        let switched = self.generator.generate(
            &terms,
            &RateRegime::switch(rates.interest_rate, params.switch_period, rates.new_rate),
        )?;
        let comparison = self.generator.generate(
            &terms,
            &RateRegime::switch(rates.interest_rate, params.switch_period, rates.comparison_rate),
        )?;

        let penalty = SwitchPenalty::calculate(
            &original,
            &comparison,
            &reference_window,
            params.switch_period,
        );
        let benefit = switching::benefit(&original, &switched)?;
        let gain = switching::gain(&original, &switched, penalty.amount)?;

        let original_warning = original.amortization_warning();
        let switched_warning = switched.amortization_warning();
        for warning in original_warning.iter().chain(switched_warning.iter()) {
            warn!("{}", warning);
        }

        info!(
            "analyzed {} periods, switch at {} gains {:.2}",
            periods, params.switch_period, gain
        );

        Ok(Analysis {
            params: params.clone(),
            periods,
            switch_date: original.records()[params.switch_period].date,
            original_summary: original.summary()?,
            switched_summary: switched.summary()?,
            best_switch: best_switch(&sensitivity).copied(),
            original,
            switched,
            comparison,
            reference_window,
            benefit,
            penalty,
            gain,
            sensitivity,
            original_warning,
            switched_warning,
        })
    }
}

/// Analyze `params` on the Gregorian calendar
pub fn analyze(params: &LoanParams) -> Result<Analysis> {
    Analyzer::new().analyze(params)
}

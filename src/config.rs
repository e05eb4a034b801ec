//! Analysis parameters and their defaults
//!
//! Parameters can be built in code, loaded from a JSON file, or taken from
//! the defaults below (a 500k loan at 3.2% with a 500 weekly payment,
//! maturing 13 months from today).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::LoanCalendar;
use crate::error::{DateShift, LoanError, Result};
use crate::schedule::LoanTerms;
use crate::sensitivity::SwitchRates;
use crate::switching::DEFAULT_PENALTY_WINDOW_MONTHS;

pub const DEFAULT_PRINCIPAL: f64 = 500_000.0;
pub const DEFAULT_INTEREST_RATE: f64 = 3.2;
pub const DEFAULT_COMPARISON_RATE: f64 = 1.1;
pub const DEFAULT_NEW_RATE: f64 = 1.9;
pub const DEFAULT_PAYMENT: f64 = 500.0;
/// Default term, in calendar months from the start date
pub const DEFAULT_TERM_MONTHS: u32 = 13;

/// Every input of a rate-switch analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanParams {
    pub start: NaiveDate,
    pub maturity: NaiveDate,
    pub principal: f64,

    /// Current annual rate (percent)
    pub interest_rate: f64,

    /// Rate the forfeited interest is measured against (percent)
    pub comparison_rate: f64,

    /// Rate after the switch (percent)
    pub new_rate: f64,

    /// Fixed weekly payment
    pub payment: f64,

    /// Zero-based period at which the new rate takes effect
    pub switch_period: usize,

    /// Length of the minimum-charge reference window
    pub penalty_window_months: u32,
}

impl LoanParams {
    /// Defaults for a loan starting on `start`, maturing
    /// [`DEFAULT_TERM_MONTHS`] later.
    ///
    /// Fails with [`LoanError::DateOverflow`] when that maturity is not a
    /// representable date.
    pub fn starting(start: NaiveDate) -> Result<Self> {
        let maturity = start
            .checked_add_months(Months::new(DEFAULT_TERM_MONTHS))
            .ok_or_else(|| LoanError::DateOverflow {
                date: start,
                shift: DateShift::Months(DEFAULT_TERM_MONTHS),
            })?;

        Ok(Self::between(start, maturity))
    }

    /// Defaults for a loan running from `start` to `maturity`
    pub fn between(start: NaiveDate, maturity: NaiveDate) -> Self {
        Self {
            start,
            maturity,
            principal: DEFAULT_PRINCIPAL,
            interest_rate: DEFAULT_INTEREST_RATE,
            comparison_rate: DEFAULT_COMPARISON_RATE,
            new_rate: DEFAULT_NEW_RATE,
            payment: DEFAULT_PAYMENT,
            switch_period: 0,
            penalty_window_months: DEFAULT_PENALTY_WINDOW_MONTHS,
        }
    }

    /// Load parameters from a JSON file; missing fields take defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn terms(&self) -> LoanTerms {
        LoanTerms {
            start: self.start,
            maturity: self.maturity,
            principal: self.principal,
            payment: self.payment,
        }
    }

    pub fn rates(&self) -> SwitchRates {
        SwitchRates {
            interest_rate: self.interest_rate,
            comparison_rate: self.comparison_rate,
            new_rate: self.new_rate,
        }
    }

    /// Check the parameters and return the number of weekly periods.
    ///
    /// Rejects non-positive principal, an empty penalty window, maturity
    /// not after start, and a switch period outside the schedule. Nothing
    /// is clamped.
    pub fn validate<C: LoanCalendar + ?Sized>(&self, calendar: &C) -> Result<usize> {
        if self.principal.is_nan() || self.principal <= 0.0 {
            return Err(LoanError::InvalidPrincipal(self.principal));
        }
        if self.penalty_window_months == 0 {
            return Err(LoanError::InvalidPenaltyWindow(self.penalty_window_months));
        }

        let periods = calendar.periods_to_maturity(self.start, self.maturity)?;
        if self.switch_period >= periods {
            return Err(LoanError::SwitchPeriodOutOfRange {
                switch_period: self.switch_period,
                periods,
            });
        }

        Ok(periods)
    }
}

impl Default for LoanParams {
    fn default() -> Self {
        // Today plus the default term is always representable
        let today = Local::now().date_naive();
        Self::between(today, today + Months::new(DEFAULT_TERM_MONTHS))
    }
}

//! Error types for schedule generation and switch analysis

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

/// Calendar shift that failed to produce a date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateShift {
    Weeks(u64),
    Months(u32),
}

impl fmt::Display for DateShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateShift::Weeks(n) => write!(f, "{} week(s)", n),
            DateShift::Months(n) => write!(f, "{} month(s)", n),
        }
    }
}

/// Errors raised by the amortization engine and its reporting layer
#[derive(Debug, Error)]
pub enum LoanError {
    /// Maturity is not strictly after the start date
    #[error("maturity {maturity} must be after start {start}")]
    InvalidRange { start: NaiveDate, maturity: NaiveDate },

    /// A last-record lookup on a schedule with no periods
    #[error("schedule has no periods")]
    EmptySchedule,

    /// Switch period outside [0, periods)
    #[error("switch period {switch_period} out of range [0, {periods})")]
    SwitchPeriodOutOfRange { switch_period: usize, periods: usize },

    /// Principal must be strictly positive
    #[error("principal must be positive, got {0}")]
    InvalidPrincipal(f64),

    /// Penalty reference window must span at least one month
    #[error("penalty window must be at least one month, got {0}")]
    InvalidPenaltyWindow(u32),

    /// Date arithmetic left chrono's representable range
    #[error("cannot shift {date} by {shift}")]
    DateOverflow { date: NaiveDate, shift: DateShift },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Shorthand result used throughout the crate
pub type Result<T, E = LoanError> = std::result::Result<T, E>;

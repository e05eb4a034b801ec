//! Loan Switch - weekly amortization and interest-rate switch analysis
//!
//! This library provides:
//! - Weekly amortization schedules under a single rate or a mid-term switch
//! - Field totals over a schedule or any suffix of it
//! - Switch penalties (forfeited interest floored at a minimum charge)
//! - Net gain of switching, and its sensitivity to the switch period

pub mod error;
pub mod calendar;
pub mod schedule;
pub mod switching;
pub mod sensitivity;
pub mod config;
pub mod analysis;
pub mod report;

// Re-export commonly used types
pub use error::{DateShift, LoanError, Result};
pub use calendar::{LoanCalendar, Gregorian, periods_to_maturity};
pub use schedule::{ScheduleGenerator, LoanTerms, RateRegime, Schedule, WeekRecord, SumField};
pub use switching::{switch_penalty, gain, SwitchPenalty};
pub use sensitivity::{sensitivity_series, par_sensitivity_series, SensitivityPoint, SwitchRates};
pub use config::LoanParams;
pub use analysis::{analyze, Analysis, Analyzer};

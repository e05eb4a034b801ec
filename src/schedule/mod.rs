//! Weekly amortization schedules under one or two rate regimes

mod state;
mod engine;
mod records;

pub use state::AmortizationState;
pub use engine::{ScheduleGenerator, LoanTerms, RateRegime};
pub use records::{WeekRecord, Schedule, ScheduleSummary, SumField, NonAmortizingPayment};

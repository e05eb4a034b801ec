//! Cost and benefit of switching a loan's rate mid-term

mod penalty;
mod gain;

pub use penalty::{SwitchPenalty, switch_penalty, DEFAULT_PENALTY_WINDOW_MONTHS};
pub use gain::{benefit, gain};

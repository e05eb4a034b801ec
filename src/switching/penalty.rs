//! Switch penalty: forfeited interest, floored at a minimum charge
//!
//! Switching early costs the interest the lender would have earned at the
//! original rate over what it earns at a comparison rate for the rest of the
//! term. The charge is never less than the interest of a short reference
//! window at the original rate.

use serde::{Deserialize, Serialize};

use crate::schedule::{Schedule, SumField};

/// Length of the minimum-charge reference window
pub const DEFAULT_PENALTY_WINDOW_MONTHS: u32 = 3;

/// Breakdown of the cost of switching at one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwitchPenalty {
    pub switch_period: usize,

    /// Original-rate interest minus comparison-rate interest from the switch on
    pub forfeited_interest: f64,

    /// Total interest of the reference window schedule
    pub minimum_charge: f64,

    /// Signed cost, `-max(forfeited_interest, minimum_charge)`
    pub amount: f64,
}

impl SwitchPenalty {
    /// Penalty for switching at `switch_period`.
    ///
    /// A switch period past the end of the schedules leaves nothing to
    /// forfeit and the penalty reduces to the minimum charge.
    pub fn calculate(
        original: &Schedule,
        comparison: &Schedule,
        reference_window: &Schedule,
        switch_period: usize,
    ) -> Self {
        let original_interest = original.sum(SumField::InterestPayment, switch_period);
        let comparison_interest = comparison.sum(SumField::InterestPayment, switch_period);
        let forfeited_interest = original_interest - comparison_interest;
        let minimum_charge = reference_window.sum(SumField::InterestPayment, 0);

        Self {
            switch_period,
            forfeited_interest,
            minimum_charge,
            amount: -forfeited_interest.max(minimum_charge),
        }
    }

    /// Whether the minimum charge, not forfeited interest, set the amount
    pub fn floor_applies(&self) -> bool {
        self.minimum_charge >= self.forfeited_interest
    }
}

/// Signed switch penalty, see [`SwitchPenalty::calculate`]
pub fn switch_penalty(
    original: &Schedule,
    comparison: &Schedule,
    reference_window: &Schedule,
    switch_period: usize,
) -> f64 {
    SwitchPenalty::calculate(original, comparison, reference_window, switch_period).amount
}

//! Net gain of ending with one schedule instead of another

use crate::error::Result;
use crate::schedule::Schedule;

/// Additional principal paid down by `switched` relative to `original`
pub fn benefit(original: &Schedule, switched: &Schedule) -> Result<f64> {
    Ok(original.final_remaining()? - switched.final_remaining()?)
}

/// Benefit net of the (signed, non-positive) switch penalty
pub fn gain(original: &Schedule, switched: &Schedule, switch_penalty: f64) -> Result<f64> {
    Ok(benefit(original, switched)? + switch_penalty)
}

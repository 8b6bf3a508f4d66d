//! Group Average: the group's floored average total is compared to the DC.

use crate::consensus::{CompletedCheck, ConsensusDetails, GroupConsensusOutcome};

/// The Group Average method.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupAverage;

impl GroupAverage {
    /// Average the totals, rounding toward negative infinity.
    pub fn resolve(&self, check: &CompletedCheck<'_>) -> GroupConsensusOutcome {
        let count = check.totals.len() as i64;
        let sum: i64 = check.totals.iter().map(|(_, t)| *t).sum();
        let average = sum.div_euclid(count.max(1));
        let success = average >= check.dc;

        GroupConsensusOutcome {
            complete: true,
            success,
            result: average,
            details: Some(ConsensusDetails::GroupAverage {
                average,
                dc: check.dc,
            }),
        }
    }
}

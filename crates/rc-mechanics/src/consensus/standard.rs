//! Standard Rule: the group succeeds if at least half its members succeed.
//!
//! Each actor's total is compared to the DC. With `n` actors the group
//! needs `ceil(n / 2)` successes. The numeric result is 1 for a group
//! success and 0 otherwise.

use crate::consensus::{CompletedCheck, ConsensusDetails, GroupConsensusOutcome};

/// The Standard Rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRule;

impl StandardRule {
    /// Count successes against half the group size, rounded up.
    pub fn resolve(&self, check: &CompletedCheck<'_>) -> GroupConsensusOutcome {
        let group_size = check.group_size;
        let successes = check.successes();
        let threshold = group_size.div_ceil(2);
        let success = successes >= threshold;

        GroupConsensusOutcome {
            complete: true,
            success,
            result: i64::from(success),
            details: Some(ConsensusDetails::StandardRule {
                successes,
                total: group_size,
                threshold,
            }),
        }
    }
}

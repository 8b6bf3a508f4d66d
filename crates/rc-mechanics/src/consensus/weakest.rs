//! Weakest Link: the least skilled actor rolls, the others can only help.
//!
//! The weakest actor is the one with the lowest modifier for the roll
//! (first in order on ties). Every other actor who meets the DC adds 1 to
//! the weakest actor's total. Misses cost nothing.

use crate::consensus::{
    CompletedCheck, ConsensusDetails, ConsensusMethod, GroupConsensusOutcome,
};

/// The Weakest Link method.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeakestLink;

impl WeakestLink {
    /// Add the others' successes to the weakest actor's total.
    pub fn resolve(&self, check: &CompletedCheck<'_>) -> GroupConsensusOutcome {
        let Some(weakest) = check.select_actor(|m, best| m < best) else {
            tracing::warn!("weakest link: group has no actors");
            return GroupConsensusOutcome::unresolved(
                ConsensusMethod::WeakestLink,
                "no actors to choose the weakest link from",
            );
        };
        let Some(weakest_roll) = check.total_of(&weakest.id) else {
            tracing::warn!(weakest = %weakest.id, "weakest link: weakest actor has no roll result");
            return GroupConsensusOutcome::unresolved(
                ConsensusMethod::WeakestLink,
                format!("weakest actor {} has no roll result", weakest.name),
            );
        };

        let bonus = check
            .others(&weakest.id)
            .filter(|total| *total >= check.dc)
            .count() as i64;
        let adjusted_result = weakest_roll + bonus;
        let success = adjusted_result >= check.dc;

        GroupConsensusOutcome {
            complete: true,
            success,
            result: adjusted_result,
            details: Some(ConsensusDetails::WeakestLink {
                weakest_id: weakest.id.clone(),
                weakest_name: weakest.name.clone(),
                weakest_roll,
                bonus,
                adjusted_result,
                dc: check.dc,
            }),
        }
    }
}

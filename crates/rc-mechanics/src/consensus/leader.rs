//! Leader with Help: the most skilled actor leads, the others assist.
//!
//! The leader is the actor with the highest modifier for the roll (first in
//! order on ties). Their total is the base; every other actor who meets the
//! DC adds 1, and every other actor who misses subtracts 1.

use crate::consensus::{
    CompletedCheck, ConsensusDetails, ConsensusMethod, GroupConsensusOutcome,
};

/// The Leader with Help method.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaderWithHelp;

impl LeaderWithHelp {
    /// Adjust the leader's total by the helpers' successes and failures.
    pub fn resolve(&self, check: &CompletedCheck<'_>) -> GroupConsensusOutcome {
        let Some(leader) = check.select_actor(|m, best| m > best) else {
            tracing::warn!("leader with help: group has no actors");
            return GroupConsensusOutcome::unresolved(
                ConsensusMethod::LeaderWithHelp,
                "no actors to choose a leader from",
            );
        };
        let Some(leader_roll) = check.total_of(&leader.id) else {
            tracing::warn!(leader = %leader.id, "leader with help: leader has no roll result");
            return GroupConsensusOutcome::unresolved(
                ConsensusMethod::LeaderWithHelp,
                format!("leader {} has no roll result", leader.name),
            );
        };

        let (mut bonus, mut penalty) = (0i64, 0i64);
        for total in check.others(&leader.id) {
            if total >= check.dc {
                bonus += 1;
            } else {
                penalty += 1;
            }
        }
        let adjusted_result = leader_roll + bonus - penalty;
        let success = adjusted_result >= check.dc;

        GroupConsensusOutcome {
            complete: true,
            success,
            result: adjusted_result,
            details: Some(ConsensusDetails::LeaderWithHelp {
                leader_id: leader.id.clone(),
                leader_name: leader.name.clone(),
                leader_roll,
                bonus,
                penalty,
                adjusted_result,
                dc: check.dc,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::tests::{party, rolled};
    use crate::consensus::{RollEntry, evaluate};
    use rc_core::{ActorId, ActorRecord, RollCategory};

    fn resolve(actors: &[ActorRecord], entries: &[RollEntry], dc: i64) -> GroupConsensusOutcome {
        evaluate(
            entries,
            dc,
            actors,
            RollCategory::Skill,
            Some("ath"),
            ConsensusMethod::LeaderWithHelp,
        )
    }

    #[test]
    fn helpers_add_and_subtract() {
        let actors = party(&[("a", 5), ("b", 2), ("c", 1)]);
        let entries = rolled(&[("a", 14), ("b", 9), ("c", 17)]);
        let outcome = resolve(&actors, &entries, 15);
        assert!(!outcome.success);
        assert_eq!(outcome.result, 14);
        assert_eq!(
            outcome.details,
            Some(ConsensusDetails::LeaderWithHelp {
                leader_id: ActorId::from("a"),
                leader_name: "A".to_string(),
                leader_roll: 14,
                bonus: 1,
                penalty: 1,
                adjusted_result: 14,
                dc: 15,
            })
        );
    }

    #[test]
    fn lucky_roll_does_not_make_a_leader() {
        // c rolls highest but has the lowest modifier.
        let actors = party(&[("a", 5), ("b", 2), ("c", 1)]);
        let entries = rolled(&[("a", 13), ("b", 16), ("c", 25)]);
        let outcome = resolve(&actors, &entries, 15);
        assert_eq!(outcome.result, 15);
        assert!(outcome.success);
    }

    #[test]
    fn tie_goes_to_first_actor() {
        let actors = party(&[("a", 4), ("b", 4)]);
        let entries = rolled(&[("a", 10), ("b", 20)]);
        for _ in 0..3 {
            let outcome = resolve(&actors, &entries, 15);
            assert_eq!(outcome.result, 11);
            assert!(matches!(
                outcome.details,
                Some(ConsensusDetails::LeaderWithHelp { ref leader_id, .. }) if leader_id.as_str() == "a"
            ));
        }
    }

    #[test]
    fn solo_leader_uses_own_total() {
        let actors = party(&[("a", 2)]);
        let outcome = resolve(&actors, &rolled(&[("a", 15)]), 15);
        assert!(outcome.success);
        assert_eq!(outcome.result, 15);
    }

    #[test]
    fn missing_leader_result_is_reported() {
        let actors = party(&[("a", 5), ("b", 2)]);
        let entries = rolled(&[("b", 20)]);
        let outcome = resolve(&actors, &entries, 15);
        assert!(outcome.complete);
        assert!(!outcome.success);
        assert_eq!(outcome.result, 0);
        assert!(matches!(
            outcome.details,
            Some(ConsensusDetails::Unresolved {
                attempted: ConsensusMethod::LeaderWithHelp,
                ..
            })
        ));
    }

    #[test]
    fn no_actors_is_reported() {
        let outcome = resolve(&[], &rolled(&[("a", 20)]), 15);
        assert!(matches!(
            outcome.details,
            Some(ConsensusDetails::Unresolved { .. })
        ));
    }
}

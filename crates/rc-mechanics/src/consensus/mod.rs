//! Group consensus: collapsing individual totals into one group verdict.
//!
//! Four methods are supported:
//! - **Standard Rule**: the group succeeds if at least half its members do
//! - **Group Average**: the floored average total is compared to the DC
//! - **Leader with Help**: the most skilled actor rolls, others add +1 or -1
//! - **Weakest Link**: the least skilled actor rolls, each success adds +1
//!
//! Evaluation is pure: the same inputs always give the same outcome.

pub mod average;
pub mod leader;
pub mod standard;
pub mod tracker;
pub mod weakest;

pub use average::GroupAverage;
pub use leader::LeaderWithHelp;
pub use standard::StandardRule;
pub use tracker::GroupRoll;
pub use weakest::WeakestLink;

use std::fmt;

use rc_core::{ActorId, ActorRecord, RollCategory, modifier_for};
use serde::{Deserialize, Serialize};

/// How a group's individual totals become one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConsensusMethod {
    /// At least half the group must succeed.
    #[default]
    StandardRule,
    /// The floored average total must meet the DC.
    GroupAverage,
    /// The most skilled actor rolls; the others help or hinder.
    LeaderWithHelp,
    /// The least skilled actor rolls; the others can only help.
    WeakestLink,
}

impl ConsensusMethod {
    /// Map the host's setting code (1-4) to a method.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::StandardRule),
            2 => Some(Self::GroupAverage),
            3 => Some(Self::LeaderWithHelp),
            4 => Some(Self::WeakestLink),
            _ => None,
        }
    }

    /// Map a setting code, falling back to the Standard Rule with a warning.
    pub fn from_setting(code: i64) -> Self {
        Self::from_code(code).unwrap_or_else(|| {
            tracing::warn!(code, "unknown group roll method, using the standard rule");
            Self::StandardRule
        })
    }

    /// The host's setting code.
    pub fn code(self) -> i64 {
        match self {
            Self::StandardRule => 1,
            Self::GroupAverage => 2,
            Self::LeaderWithHelp => 3,
            Self::WeakestLink => 4,
        }
    }
}

impl fmt::Display for ConsensusMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StandardRule => write!(f, "Standard Rule"),
            Self::GroupAverage => write!(f, "Group Average"),
            Self::LeaderWithHelp => write!(f, "Leader with Help"),
            Self::WeakestLink => write!(f, "Weakest Link"),
        }
    }
}

/// One actor's slot in a group roll; `total` is `None` until they roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollEntry {
    /// The actor.
    pub actor_id: ActorId,
    /// Their total, once rolled.
    #[serde(default)]
    pub total: Option<i64>,
}

impl RollEntry {
    /// A completed entry.
    pub fn rolled(actor_id: impl Into<ActorId>, total: i64) -> Self {
        Self {
            actor_id: actor_id.into(),
            total: Some(total),
        }
    }

    /// An entry still waiting on its roll.
    pub fn pending(actor_id: impl Into<ActorId>) -> Self {
        Self {
            actor_id: actor_id.into(),
            total: None,
        }
    }
}

/// Method-specific breakdown, keyed for the message formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ConsensusDetails {
    /// Standard Rule breakdown.
    StandardRule {
        /// Actors who met the DC.
        successes: usize,
        /// Group size.
        total: usize,
        /// Successes needed.
        threshold: usize,
    },
    /// Group Average breakdown.
    GroupAverage {
        /// Floored average total.
        average: i64,
        /// The DC.
        dc: i64,
    },
    /// Leader with Help breakdown.
    LeaderWithHelp {
        /// The leader.
        leader_id: ActorId,
        /// The leader's display name.
        leader_name: String,
        /// The leader's own total.
        leader_roll: i64,
        /// Helpers who met the DC.
        bonus: i64,
        /// Helpers who missed the DC.
        penalty: i64,
        /// Leader total plus bonus minus penalty.
        adjusted_result: i64,
        /// The DC.
        dc: i64,
    },
    /// Weakest Link breakdown.
    WeakestLink {
        /// The weakest actor.
        weakest_id: ActorId,
        /// The weakest actor's display name.
        weakest_name: String,
        /// The weakest actor's own total.
        weakest_roll: i64,
        /// Others who met the DC.
        bonus: i64,
        /// Weakest total plus bonus.
        adjusted_result: i64,
        /// The DC.
        dc: i64,
    },
    /// The method could not produce a verdict.
    Unresolved {
        /// The method that was attempted.
        attempted: ConsensusMethod,
        /// Why it failed.
        error: String,
    },
}

/// The group's verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupConsensusOutcome {
    /// Every actor has rolled.
    pub complete: bool,
    /// The group succeeded.
    pub success: bool,
    /// Numeric result; its meaning depends on the method.
    pub result: i64,
    /// Method-specific breakdown; absent while incomplete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ConsensusDetails>,
}

impl GroupConsensusOutcome {
    /// The outcome while some actors have yet to roll.
    pub fn incomplete() -> Self {
        Self {
            complete: false,
            success: false,
            result: 0,
            details: None,
        }
    }

    /// A complete evaluation that could not reach a verdict.
    pub fn unresolved(attempted: ConsensusMethod, error: impl Into<String>) -> Self {
        Self {
            complete: true,
            success: false,
            result: 0,
            details: Some(ConsensusDetails::Unresolved {
                attempted,
                error: error.into(),
            }),
        }
    }
}

/// A group roll where every entry has a total.
#[derive(Debug, Clone)]
pub struct CompletedCheck<'a> {
    /// Totals in input order.
    pub totals: Vec<(&'a ActorId, i64)>,
    /// The DC.
    pub dc: i64,
    /// The actors in the group, in order.
    pub actors: &'a [ActorRecord],
    /// The roll category, for modifier lookups.
    pub category: RollCategory,
    /// The roll key, for modifier lookups.
    pub key: Option<&'a str>,
    /// Number of members the group verdict is measured against.
    pub group_size: usize,
}

impl<'a> CompletedCheck<'a> {
    /// Build a check, or `None` if any entry is missing its total or there
    /// are no entries at all.
    pub fn from_entries(
        entries: &'a [RollEntry],
        dc: i64,
        actors: &'a [ActorRecord],
        category: RollCategory,
        key: Option<&'a str>,
    ) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let totals = entries
            .iter()
            .map(|e| e.total.map(|t| (&e.actor_id, t)))
            .collect::<Option<Vec<_>>>()?;
        let group_size = if actors.is_empty() {
            totals.len()
        } else {
            actors.len()
        };
        Some(Self {
            totals,
            dc,
            actors,
            category,
            key,
            group_size,
        })
    }

    /// The total rolled by `actor`, if present.
    pub fn total_of(&self, actor: &ActorId) -> Option<i64> {
        self.totals
            .iter()
            .find(|(id, _)| *id == actor)
            .map(|(_, total)| *total)
    }

    /// Number of totals at or above the DC.
    pub fn successes(&self) -> usize {
        self.totals.iter().filter(|(_, t)| *t >= self.dc).count()
    }

    /// Totals of everyone except `actor`.
    pub fn others(&self, actor: &ActorId) -> impl Iterator<Item = i64> + '_ {
        let actor = actor.clone();
        self.totals
            .iter()
            .filter(move |(id, _)| **id != actor)
            .map(|(_, total)| *total)
    }

    /// The actor whose modifier wins under `better`, first in order on ties.
    ///
    /// `better(candidate, best)` must be a strict comparison.
    pub fn select_actor(&self, better: impl Fn(i64, i64) -> bool) -> Option<&'a ActorRecord> {
        let mut best: Option<(&'a ActorRecord, i64)> = None;
        for actor in self.actors {
            let modifier = modifier_for(actor, self.category, self.key);
            match best {
                Some((_, current)) if !better(modifier, current) => {}
                _ => best = Some((actor, modifier)),
            }
        }
        best.map(|(actor, _)| actor)
    }
}

/// Evaluate a group roll.
///
/// Any entry without a total (or no entries at all) gives an incomplete
/// outcome. Leader and weakest selection always use the actors' modifiers,
/// never their totals.
pub fn evaluate(
    entries: &[RollEntry],
    dc: i64,
    actors: &[ActorRecord],
    category: RollCategory,
    key: Option<&str>,
    method: ConsensusMethod,
) -> GroupConsensusOutcome {
    let Some(check) = CompletedCheck::from_entries(entries, dc, actors, category, key) else {
        return GroupConsensusOutcome::incomplete();
    };
    resolve(&check, method)
}

/// Apply `method` to a completed check.
pub fn resolve(check: &CompletedCheck<'_>, method: ConsensusMethod) -> GroupConsensusOutcome {
    let outcome = match method {
        ConsensusMethod::StandardRule => StandardRule.resolve(check),
        ConsensusMethod::GroupAverage => GroupAverage.resolve(check),
        ConsensusMethod::LeaderWithHelp => LeaderWithHelp.resolve(check),
        ConsensusMethod::WeakestLink => WeakestLink.resolve(check),
    };

    tracing::debug!(
        %method,
        dc = check.dc,
        success = outcome.success,
        result = outcome.result,
        "evaluated group roll"
    );

    outcome
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;
    use rc_core::actor::ProficiencyEntry;

    /// Actors with a skill modifier for `ath`.
    pub(crate) fn party(mods: &[(&str, i64)]) -> Vec<ActorRecord> {
        mods.iter()
            .map(|(id, m)| {
                let mut actor = ActorRecord::new(*id, id.to_uppercase());
                actor.skills.insert(
                    "ath".to_string(),
                    ProficiencyEntry {
                        total: Some(*m),
                        modifier: None,
                        ability: None,
                    },
                );
                actor
            })
            .collect()
    }

    pub(crate) fn rolled(totals: &[(&str, i64)]) -> Vec<RollEntry> {
        totals.iter().map(|(id, t)| RollEntry::rolled(*id, *t)).collect()
    }

    fn eval(
        entries: &[RollEntry],
        dc: i64,
        actors: &[ActorRecord],
        method: ConsensusMethod,
    ) -> GroupConsensusOutcome {
        evaluate(entries, dc, actors, RollCategory::Skill, Some("ath"), method)
    }

    #[test]
    fn method_codes() {
        assert_eq!(ConsensusMethod::from_code(3), Some(ConsensusMethod::LeaderWithHelp));
        assert_eq!(ConsensusMethod::from_code(0), None);
        assert_eq!(ConsensusMethod::from_setting(42), ConsensusMethod::StandardRule);
        for code in 1..=4 {
            assert_eq!(ConsensusMethod::from_setting(code).code(), code);
        }
    }

    #[test]
    fn method_display() {
        assert_eq!(ConsensusMethod::StandardRule.to_string(), "Standard Rule");
        assert_eq!(ConsensusMethod::LeaderWithHelp.to_string(), "Leader with Help");
    }

    #[test]
    fn pending_entry_is_incomplete() {
        let actors = party(&[("a", 5), ("b", 2)]);
        let entries = vec![RollEntry::rolled("a", 30), RollEntry::pending("b")];
        let outcome = eval(&entries, 10, &actors, ConsensusMethod::StandardRule);
        assert_eq!(outcome, GroupConsensusOutcome::incomplete());
    }

    #[test]
    fn no_entries_is_incomplete() {
        let outcome = eval(&[], 10, &[], ConsensusMethod::GroupAverage);
        assert!(!outcome.complete);
    }

    #[test]
    fn details_serialize_with_formatter_keys() {
        let details = ConsensusDetails::LeaderWithHelp {
            leader_id: ActorId::from("a"),
            leader_name: "A".to_string(),
            leader_roll: 14,
            bonus: 1,
            penalty: 1,
            adjusted_result: 14,
            dc: 15,
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["method"], "leaderWithHelp");
        assert_eq!(json["leaderRoll"], 14);
        assert_eq!(json["adjustedResult"], 14);
        assert_eq!(json["bonus"], 1);
        assert_eq!(json["penalty"], 1);
        assert_eq!(json["dc"], 15);
    }

    #[test]
    fn select_actor_prefers_first_on_ties() {
        let actors = party(&[("a", 3), ("b", 5), ("c", 5), ("d", 1), ("e", 1)]);
        let entries = rolled(&[("a", 1), ("b", 1), ("c", 1), ("d", 1), ("e", 1)]);
        let check =
            CompletedCheck::from_entries(&entries, 10, &actors, RollCategory::Skill, Some("ath"))
                .unwrap();
        assert_eq!(check.select_actor(|m, best| m > best).unwrap().id, ActorId::from("b"));
        assert_eq!(check.select_actor(|m, best| m < best).unwrap().id, ActorId::from("d"));
    }

    fn totals_strategy() -> impl Strategy<Value = Vec<i64>> {
        proptest::collection::vec(-5i64..35, 1..=12)
    }

    fn numbered(totals: &[i64]) -> (Vec<ActorRecord>, Vec<RollEntry>) {
        let ids: Vec<String> = (0..totals.len()).map(|i| format!("p{i}")).collect();
        let actors = ids.iter().map(|id| ActorRecord::new(id.clone(), id.clone())).collect();
        let entries = ids
            .iter()
            .zip(totals)
            .map(|(id, t)| RollEntry::rolled(id.as_str(), *t))
            .collect();
        (actors, entries)
    }

    proptest! {
        #[test]
        fn standard_rule_threshold(totals in totals_strategy(), dc in 0i64..30) {
            let (actors, entries) = numbered(&totals);
            let successes = totals.iter().filter(|t| **t >= dc).count();
            let expected = successes >= totals.len().div_ceil(2);
            let outcome = eval(&entries, dc, &actors, ConsensusMethod::StandardRule);
            prop_assert!(outcome.complete);
            prop_assert_eq!(outcome.success, expected);
            prop_assert_eq!(outcome.result, i64::from(expected));
        }

        #[test]
        fn group_average_ignores_order(totals in totals_strategy(), dc in 0i64..30, seed in any::<u64>()) {
            let (actors, entries) = numbered(&totals);
            let mut shuffled = entries.clone();
            let len = shuffled.len();
            shuffled.rotate_left((seed as usize) % len);
            shuffled.reverse();
            let a = eval(&entries, dc, &actors, ConsensusMethod::GroupAverage);
            let b = eval(&shuffled, dc, &actors, ConsensusMethod::GroupAverage);
            prop_assert_eq!(a.result, b.result);
            prop_assert_eq!(a.success, b.success);
        }

        #[test]
        fn evaluation_is_repeatable(
            mods in proptest::collection::vec(-2i64..4, 1..8),
            dc in 5i64..25,
            method in 1i64..=4,
        ) {
            let ids: Vec<String> = (0..mods.len()).map(|i| format!("p{i}")).collect();
            let pairs: Vec<(&str, i64)> = ids.iter().map(String::as_str).zip(mods.iter().copied()).collect();
            let actors = party(&pairs);
            let entries: Vec<RollEntry> = ids.iter().enumerate()
                .map(|(i, id)| RollEntry::rolled(id.as_str(), 8 + i as i64))
                .collect();
            let method = ConsensusMethod::from_setting(method);
            let first = eval(&entries, dc, &actors, method);
            let second = eval(&entries, dc, &actors, method);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn any_pending_entry_forces_incomplete(
            totals in totals_strategy(),
            hole in any::<usize>(),
            method in 1i64..=4,
        ) {
            let (actors, mut entries) = numbered(&totals);
            let idx = hole % entries.len();
            entries[idx].total = None;
            let outcome = eval(&entries, 10, &actors, ConsensusMethod::from_setting(method));
            prop_assert!(!outcome.complete);
            prop_assert!(!outcome.success);
            prop_assert_eq!(outcome.result, 0);
        }
    }
}

//! The seam to whatever actually rolls the dice.

use rc_core::{ActorRecord, RollCategory, modifier_with_ability};

use crate::config::RollExecutionConfig;
use crate::consensus::RollEntry;

/// Something that turns an execution config into a numeric total.
pub trait RollEvaluator {
    /// Roll `config` for `actor`, whose modifier for the roll is `modifier`.
    ///
    /// Returns `None` if the actor did not (or could not) roll.
    fn evaluate(
        &mut self,
        config: &RollExecutionConfig,
        actor: &ActorRecord,
        modifier: i64,
    ) -> Option<i64>;
}

/// Roll `config` once for every actor, in order.
///
/// Each actor's modifier uses the ability the config picked, if any.
pub fn roll_group<E>(
    evaluator: &mut E,
    config: &RollExecutionConfig,
    actors: &[ActorRecord],
    category: RollCategory,
    key: Option<&str>,
) -> Vec<RollEntry>
where
    E: RollEvaluator + ?Sized,
{
    actors
        .iter()
        .map(|actor| {
            let modifier =
                modifier_with_ability(actor, category, key, config.ability.as_deref());
            match evaluator.evaluate(config, actor, modifier) {
                Some(total) => RollEntry::rolled(actor.id.clone(), total),
                None => {
                    tracing::debug!(actor = %actor.id, "no result from evaluator");
                    RollEntry::pending(actor.id.clone())
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::tests::party;
    use crate::roll_mode::RollMode;
    use rc_core::actor::AbilityEntry;

    struct Fixed(i64);

    impl RollEvaluator for Fixed {
        fn evaluate(
            &mut self,
            _config: &RollExecutionConfig,
            actor: &ActorRecord,
            modifier: i64,
        ) -> Option<i64> {
            (actor.id.as_str() != "absent").then_some(self.0 + modifier)
        }
    }

    fn config() -> RollExecutionConfig {
        RollExecutionConfig {
            rolls: Vec::new(),
            advantage: false,
            disadvantage: false,
            target: Some(12),
            roll_mode: RollMode::Public,
            is_roll_request: false,
            send_request: false,
            subject: None,
            chat_message: true,
            ability: None,
            requested_by: None,
            processed: true,
        }
    }

    #[test]
    fn adds_each_actors_modifier() {
        let actors = party(&[("a", 5), ("b", -1)]);
        let entries = roll_group(&mut Fixed(10), &config(), &actors, RollCategory::Skill, Some("ath"));
        assert_eq!(
            entries,
            vec![RollEntry::rolled("a", 15), RollEntry::rolled("b", 9)]
        );
    }

    #[test]
    fn chosen_ability_swaps_modifier() {
        let mut actors = party(&[("a", 5)]);
        for (ability, modifier) in [("str", 3), ("dex", 1)] {
            actors[0].abilities.insert(
                ability.to_string(),
                AbilityEntry {
                    value: None,
                    modifier: Some(modifier),
                    save: None,
                },
            );
        }
        let config = RollExecutionConfig {
            ability: Some("dex".to_string()),
            ..config()
        };
        let entries = roll_group(&mut Fixed(10), &config, &actors, RollCategory::Skill, Some("ath"));
        assert_eq!(entries, vec![RollEntry::rolled("a", 13)]);
    }

    #[test]
    fn missing_result_stays_pending() {
        let actors = party(&[("a", 2), ("absent", 0)]);
        let entries = roll_group(&mut Fixed(10), &config(), &actors, RollCategory::Skill, Some("ath"));
        assert_eq!(entries[1], RollEntry::pending("absent"));
    }
}

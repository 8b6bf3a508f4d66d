//! A seeded d20 implementation of the roll-evaluator seam.

use rand::SeedableRng;
use rand::rngs::StdRng;

use rc_core::{ActorId, ActorRecord};
use rc_mechanics::{RollEvaluator, RollExecutionConfig};

use crate::die::Die;
use crate::formula::Formula;
use crate::pool::{DicePool, Keep};
use crate::roll::RollResult;

/// How one actor's total came together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollBreakdown {
    /// Who rolled.
    pub actor: ActorId,
    /// The d20s, dropped ones included.
    pub d20: RollResult,
    /// The actor's modifier.
    pub modifier: i64,
    /// The situational formula's contribution.
    pub situational: i64,
    /// The final total.
    pub total: i64,
}

/// Rolls d20 tests from a seeded RNG.
#[derive(Debug)]
pub struct D20Evaluator {
    rng: StdRng,
    history: Vec<RollBreakdown>,
}

impl D20Evaluator {
    /// An evaluator whose rolls repeat for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// An evaluator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            history: Vec::new(),
        }
    }

    /// Every roll made so far, oldest first.
    pub fn history(&self) -> &[RollBreakdown] {
        &self.history
    }

    /// The most recent roll for `actor`.
    pub fn last_for(&self, actor: &ActorId) -> Option<&RollBreakdown> {
        self.history.iter().rev().find(|b| &b.actor == actor)
    }
}

impl RollEvaluator for D20Evaluator {
    fn evaluate(
        &mut self,
        config: &RollExecutionConfig,
        actor: &ActorRecord,
        modifier: i64,
    ) -> Option<i64> {
        let situational = match config.primary().and_then(|spec| spec.situational()) {
            Some(text) => match text.parse::<Formula>() {
                Ok(formula) => formula.roll(&mut self.rng).0,
                Err(e) => {
                    tracing::warn!(actor = %actor.id, error = %e, "cannot roll situational bonus");
                    return None;
                }
            },
            None => 0,
        };

        let pool = match (config.advantage, config.disadvantage) {
            (true, false) => DicePool::new().add(Die::D20, 2).keep(Keep::Highest),
            (false, true) => DicePool::new().add(Die::D20, 2).keep(Keep::Lowest),
            _ => DicePool::new().add(Die::D20, 1),
        };
        let d20 = pool.roll(&mut self.rng);
        let total = d20
            .total()
            .saturating_add(modifier)
            .saturating_add(situational);

        tracing::debug!(actor = %actor.id, dice = %d20, modifier, situational, total, "rolled");

        self.history.push(RollBreakdown {
            actor: actor.id.clone(),
            d20,
            modifier,
            situational,
            total,
        });
        Some(total)
    }
}

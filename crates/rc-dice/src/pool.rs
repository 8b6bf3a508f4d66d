//! Dice pool construction and rolling.

use rand::Rng;
use rand::rngs::StdRng;

use crate::die::Die;
use crate::roll::{DieResult, RollResult};

/// Which dice of a pool count toward its total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Keep {
    /// Every die counts.
    #[default]
    All,
    /// Only the single highest die counts.
    Highest,
    /// Only the single lowest die counts.
    Lowest,
}

/// A collection of dice to be rolled together.
#[derive(Debug, Clone, Default)]
pub struct DicePool {
    /// The dice in this pool.
    pub dice: Vec<Die>,
    /// Which dice count.
    pub keep: Keep,
}

impl DicePool {
    /// Create an empty dice pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` dice of the given type.
    pub fn add(mut self, die: Die, count: u32) -> Self {
        self.dice.extend((0..count).map(|_| die));
        self
    }

    /// Set which dice count toward the total.
    pub fn keep(mut self, keep: Keep) -> Self {
        self.keep = keep;
        self
    }

    /// Returns how many dice are in the pool.
    pub fn count(&self) -> usize {
        self.dice.len()
    }

    /// Returns true if the pool has no dice.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Roll all dice in the pool using the given RNG.
    pub fn roll(&self, rng: &mut StdRng) -> RollResult {
        let mut dice: Vec<DieResult> = self
            .dice
            .iter()
            .map(|die| DieResult {
                die: *die,
                value: rng.random_range(1..=die.sides()),
                kept: true,
            })
            .collect();

        let chosen = match self.keep {
            Keep::All => None,
            // First die wins ties so the result reads left to right.
            Keep::Highest => dice
                .iter()
                .enumerate()
                .rev()
                .max_by_key(|(_, d)| d.value)
                .map(|(i, _)| i),
            Keep::Lowest => dice
                .iter()
                .enumerate()
                .min_by_key(|(_, d)| d.value)
                .map(|(i, _)| i),
        };
        if let Some(chosen) = chosen {
            for (i, die) in dice.iter_mut().enumerate() {
                die.kept = i == chosen;
            }
        }

        RollResult { dice }
    }
}

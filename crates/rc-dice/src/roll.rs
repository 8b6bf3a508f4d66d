//! Dice roll results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::die::Die;

/// The result of rolling a single die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// The die that was rolled.
    pub die: Die,
    /// The face rolled (1 to `die.sides()`).
    pub value: u32,
    /// Whether the die counts toward the total.
    pub kept: bool,
}

/// The result of rolling a pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Individual die results, dropped ones included.
    pub dice: Vec<DieResult>,
}

impl RollResult {
    /// Sum of the kept dice.
    pub fn total(&self) -> i64 {
        self.kept().map(|d| i64::from(d.value)).sum()
    }

    /// The kept dice.
    pub fn kept(&self) -> impl Iterator<Item = &DieResult> {
        self.dice.iter().filter(|d| d.kept)
    }

    /// Number of dice rolled, dropped ones included.
    pub fn count(&self) -> usize {
        self.dice.len()
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self
            .dice
            .iter()
            .map(|d| {
                if d.kept {
                    d.value.to_string()
                } else {
                    format!("~{}", d.value)
                }
            })
            .collect();
        write!(f, "[{}]", values.join(", "))
    }
}

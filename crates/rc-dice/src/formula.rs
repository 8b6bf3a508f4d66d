//! Situational bonus formulas such as `1d4`, `+2`, or `1d6 - 1`.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;

use crate::die::Die;
use crate::error::{DiceError, DiceResult};
use crate::pool::DicePool;
use crate::roll::RollResult;

/// Most dice a single term may roll.
pub const MAX_DICE: u32 = 100;
/// Largest die a term may name.
pub const MAX_SIDES: u32 = 1000;
/// Largest flat term, in either direction.
pub const MAX_FLAT: i64 = 1_000_000;

/// One signed term of a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// `count` dice of one type.
    Dice {
        /// How many dice.
        count: u32,
        /// Which die.
        die: Die,
        /// Subtract instead of add.
        negative: bool,
    },
    /// A flat number (already signed).
    Flat(i64),
}

/// A parsed sum of dice and flat terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    terms: Vec<Term>,
}

impl Formula {
    /// The parsed terms in order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Roll the formula, returning its total and the dice rolled.
    pub fn roll(&self, rng: &mut StdRng) -> (i64, RollResult) {
        let mut total: i64 = 0;
        let mut rolled = RollResult::default();
        for term in &self.terms {
            match *term {
                Term::Flat(n) => total = total.saturating_add(n),
                Term::Dice {
                    count,
                    die,
                    negative,
                } => {
                    let result = DicePool::new().add(die, count).roll(rng);
                    let sum = result.total();
                    total = total.saturating_add(if negative { -sum } else { sum });
                    rolled.dice.extend(result.dice);
                }
            }
        }
        (total, rolled)
    }
}

impl FromStr for Formula {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DiceError::InvalidFormula {
            formula: s.to_string(),
            reason: reason.to_string(),
        };

        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(invalid("empty formula"));
        }

        let mut terms = Vec::new();
        let mut rest = compact.as_str();
        while !rest.is_empty() {
            let negative = rest.starts_with('-');
            if negative || rest.starts_with('+') {
                rest = &rest[1..];
            }
            let end = rest.find(['+', '-']).unwrap_or(rest.len());
            let (text, tail) = rest.split_at(end);
            if text.is_empty() {
                return Err(invalid("missing term"));
            }
            terms.push(parse_term(text, negative).map_err(|e| match e {
                DiceError::InvalidFormula { reason, .. } => invalid(&reason),
                other => other,
            })?);
            rest = tail;
        }

        Ok(Self { terms })
    }
}

fn parse_term(text: &str, negative: bool) -> DiceResult<Term> {
    let bad = |reason: String| DiceError::InvalidFormula {
        formula: text.to_string(),
        reason,
    };

    match text.split_once(['d', 'D']) {
        Some((count, sides)) => {
            let count = if count.is_empty() {
                1
            } else {
                count
                    .parse::<u32>()
                    .map_err(|_| bad(format!("bad dice count \"{count}\"")))?
            };
            if count > MAX_DICE {
                return Err(bad(format!("at most {MAX_DICE} dice per term")));
            }
            let sides = sides
                .parse::<u32>()
                .map_err(|_| bad(format!("bad die size \"{sides}\"")))?;
            if sides > MAX_SIDES {
                return Err(bad(format!("dice have at most {MAX_SIDES} sides")));
            }
            Ok(Term::Dice {
                count,
                die: Die::with_sides(sides)?,
                negative,
            })
        }
        None => {
            let n = text
                .parse::<i64>()
                .map_err(|_| bad(format!("unexpected \"{text}\"")))?;
            if n > MAX_FLAT {
                return Err(bad(format!("flat terms are at most {MAX_FLAT}")));
            }
            Ok(Term::Flat(if negative { -n } else { n }))
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            let (negative, body) = match *term {
                Term::Dice {
                    count,
                    die,
                    negative,
                } => (negative, format!("{count}{die}")),
                Term::Flat(n) => (n < 0, n.unsigned_abs().to_string()),
            };
            match (i, negative) {
                (0, false) => write!(f, "{body}")?,
                (0, true) => write!(f, "-{body}")?,
                (_, false) => write!(f, " + {body}")?,
                (_, true) => write!(f, " - {body}")?,
            }
        }
        Ok(())
    }
}

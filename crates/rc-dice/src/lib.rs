//! Dice rolling for Rollcall.
//!
//! The roll engine never rolls anything itself; this crate is a reference
//! [`RollEvaluator`](rc_mechanics::RollEvaluator) that does. It rolls a d20
//! (two for advantage or disadvantage), adds the actor's modifier, and
//! adds any situational formula such as `1d4+2`.

pub mod die;
pub mod error;
pub mod evaluator;
pub mod formula;
pub mod pool;
pub mod roll;

pub use die::Die;
pub use error::{DiceError, DiceResult};
pub use evaluator::{D20Evaluator, RollBreakdown};
pub use formula::{Formula, Term};
pub use pool::{DicePool, Keep};
pub use roll::{DieResult, RollResult};

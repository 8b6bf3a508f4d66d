//! Error types for dice formulas.

/// Errors that can occur while parsing or rolling a dice formula.
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    /// The formula text could not be parsed.
    #[error("invalid dice formula \"{formula}\": {reason}")]
    InvalidFormula {
        /// The text as given.
        formula: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A die with fewer than two sides.
    #[error("a die needs at least 2 sides, got {0}")]
    InvalidDie(u32),
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;

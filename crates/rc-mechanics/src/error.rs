//! Error types for the roll engine.

use rc_core::{ActorId, CoreError, RollCategory};

/// Errors that can occur while validating or tracking roll requests.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// No requested actor survived validation.
    #[error("roll request has no valid actors")]
    NoActors,

    /// Both advantage and disadvantage were requested.
    #[error("advantage and disadvantage are mutually exclusive")]
    ConflictingAdvantage,

    /// The category needs a key (ability, skill, or tool) and none was given.
    #[error("{0} rolls need a key")]
    MissingKey(RollCategory),

    /// A result was recorded for an actor that is not part of the group.
    #[error("actor {0} is not part of this group roll")]
    UnknownActor(ActorId),

    /// A roll mode string did not match any known visibility.
    #[error("unknown roll mode: \"{0}\"")]
    UnknownRollMode(String),

    /// An error from the actor data layer.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience result type for roll engine operations.
pub type MechResult<T> = Result<T, MechError>;

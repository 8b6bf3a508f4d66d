use crate::actor::ActorId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when reading host-supplied actor data.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A roll category string did not match any known category.
    #[error("unknown roll category: \"{0}\"")]
    UnknownCategory(String),

    /// An ability key did not match any of the six abilities.
    #[error("unknown ability: \"{0}\"")]
    UnknownAbility(String),

    /// An ownership entry carried a permission level outside 0-3.
    #[error("invalid permission level: {0}")]
    InvalidPermission(i64),

    /// The requested actor does not exist in the roster.
    #[error("actor not found: {0}")]
    ActorNotFound(ActorId),
}

//! Message visibility for roll results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MechError;

/// Who gets to see a roll's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RollMode {
    /// Everyone sees the roll.
    #[default]
    #[serde(rename = "publicroll", alias = "public")]
    Public,
    /// Only the roller and the moderators see it.
    #[serde(rename = "gmroll", alias = "private")]
    Private,
    /// Only the moderators see it; the roller does not.
    #[serde(rename = "blindroll", alias = "blind")]
    Blind,
    /// Only the roller sees it.
    #[serde(rename = "selfroll", alias = "self")]
    SelfRoll,
}

impl FromStr for RollMode {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "publicroll" | "public" => Ok(Self::Public),
            "gmroll" | "private" => Ok(Self::Private),
            "blindroll" | "blind" => Ok(Self::Blind),
            "selfroll" | "self" => Ok(Self::SelfRoll),
            other => Err(MechError::UnknownRollMode(other.to_string())),
        }
    }
}

impl fmt::Display for RollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "publicroll"),
            Self::Private => write!(f, "gmroll"),
            Self::Blind => write!(f, "blindroll"),
            Self::SelfRoll => write!(f, "selfroll"),
        }
    }
}

/// Decide the visibility of a roll.
///
/// An explicit choice (the user touched the roll-mode selector) always wins.
/// Otherwise public rolls force [`RollMode::Public`], and anything else falls
/// back to the session's default mode.
pub fn resolve_roll_mode(
    public_rolls_enabled: bool,
    explicit: Option<RollMode>,
    default_mode: RollMode,
) -> RollMode {
    match explicit {
        Some(mode) => mode,
        None if public_rolls_enabled => RollMode::Public,
        None => default_mode,
    }
}

//! Roll categories and the 5e default abilities for skills and tools.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What kind of roll is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RollCategory {
    /// A raw ability check (`key` = ability).
    #[serde(rename = "ability", alias = "check")]
    AbilityCheck,
    /// A saving throw (`key` = ability).
    #[serde(rename = "save")]
    SavingThrow,
    /// A skill check (`key` = skill).
    Skill,
    /// A tool check (`key` = tool).
    Tool,
    /// An attack roll.
    Attack,
    /// A damage roll.
    Damage,
    /// A hit-die roll during a rest.
    HitDie,
    /// An initiative roll.
    Initiative,
    /// A free-form formula.
    #[serde(rename = "custom", alias = "formula")]
    Formula,
}

impl RollCategory {
    /// Returns true if the category needs a `key` to mean anything.
    pub fn requires_key(self) -> bool {
        matches!(
            self,
            Self::AbilityCheck | Self::SavingThrow | Self::Skill | Self::Tool
        )
    }

    /// Returns true if the roll is a d20 test (advantage applies, DC applies).
    pub fn uses_d20(self) -> bool {
        !matches!(self, Self::Damage | Self::HitDie | Self::Formula)
    }

    /// Returns true for categories where the rolling ability can be swapped.
    pub fn has_ability_choice(self) -> bool {
        matches!(self, Self::Skill | Self::Tool)
    }
}

impl FromStr for RollCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ability" | "check" | "abilityCheck" => Ok(Self::AbilityCheck),
            "save" | "savingThrow" => Ok(Self::SavingThrow),
            "skill" => Ok(Self::Skill),
            "tool" => Ok(Self::Tool),
            "attack" => Ok(Self::Attack),
            "damage" => Ok(Self::Damage),
            "hitDie" | "hitdie" => Ok(Self::HitDie),
            "initiative" => Ok(Self::Initiative),
            "custom" | "formula" => Ok(Self::Formula),
            other => Err(CoreError::UnknownCategory(other.to_string())),
        }
    }
}

impl fmt::Display for RollCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AbilityCheck => write!(f, "ability"),
            Self::SavingThrow => write!(f, "save"),
            Self::Skill => write!(f, "skill"),
            Self::Tool => write!(f, "tool"),
            Self::Attack => write!(f, "attack"),
            Self::Damage => write!(f, "damage"),
            Self::HitDie => write!(f, "hitDie"),
            Self::Initiative => write!(f, "initiative"),
            Self::Formula => write!(f, "custom"),
        }
    }
}

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    /// Strength.
    Str,
    /// Dexterity.
    Dex,
    /// Constitution.
    Con,
    /// Intelligence.
    Int,
    /// Wisdom.
    Wis,
    /// Charisma.
    Cha,
}

impl Ability {
    /// The host key (`str`, `dex`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Dex => "dex",
            Self::Con => "con",
            Self::Int => "int",
            Self::Wis => "wis",
            Self::Cha => "cha",
        }
    }

    /// The ability a 5e skill rolls with by default.
    pub fn for_skill(skill: &str) -> Option<Self> {
        match skill {
            "ath" => Some(Self::Str),
            "acr" | "slt" | "ste" => Some(Self::Dex),
            "arc" | "his" | "inv" | "nat" | "rel" => Some(Self::Int),
            "ani" | "ins" | "med" | "prc" | "sur" => Some(Self::Wis),
            "dec" | "itm" | "prf" | "per" => Some(Self::Cha),
            _ => None,
        }
    }

    /// The ability a common tool rolls with; unlisted tools use Intelligence.
    pub fn for_tool(tool: &str) -> Self {
        match tool {
            "thief" | "disg" | "forg" => Self::Dex,
            "navg" | "herb" => Self::Wis,
            "music" => Self::Cha,
            _ => Self::Int,
        }
    }
}

impl FromStr for Ability {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "str" | "strength" => Ok(Self::Str),
            "dex" | "dexterity" => Ok(Self::Dex),
            "con" | "constitution" => Ok(Self::Con),
            "int" | "intelligence" => Ok(Self::Int),
            "wis" | "wisdom" => Ok(Self::Wis),
            "cha" | "charisma" => Ok(Self::Cha),
            other => Err(CoreError::UnknownAbility(other.to_string())),
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

//! Roll configuration variants.
//!
//! Attack, damage, hit-die, skill/tool, and generic rolls share one state
//! object and one merge pipeline. A [`ConfigVariant`] only decides which
//! fields the dialog collaborator should expose.

use rc_core::{ActorId, RollCategory, default_ability_for};
use serde::{Deserialize, Serialize};

use crate::request::ValidatedRequest;

/// State shared by every configuration variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollConfigState {
    /// Actors the roll applies to.
    pub actors: Vec<ActorId>,
    /// Whether the roll goes out as a request to the owners.
    pub send_request: bool,
    /// Whether a DC makes sense for this roll.
    pub show_dc: bool,
    /// The DC currently set.
    pub dc_value: Option<i64>,
}

impl RollConfigState {
    /// Seed the state from a validated request.
    pub fn from_request(validated: &ValidatedRequest) -> Self {
        let request = validated.request();
        Self {
            actors: validated.actors().iter().map(|a| a.id.clone()).collect(),
            send_request: request.send_request,
            show_dc: request.category.uses_d20(),
            dc_value: request.target_difficulty,
        }
    }
}

/// Which family of roll is being configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigVariant {
    /// Attack rolls: DC is the target's armor class.
    Attack,
    /// Damage rolls: no DC, no advantage, critical toggle instead.
    Damage,
    /// Hit-die rolls during a rest.
    HitDie,
    /// Skill and tool checks: the rolling ability can be swapped.
    SkillTool,
    /// Everything else.
    Generic {
        /// Whether the roll is a d20 test.
        d20: bool,
    },
}

impl ConfigVariant {
    /// Pick the variant for a roll category.
    pub fn for_category(category: RollCategory) -> Self {
        match category {
            RollCategory::Attack => Self::Attack,
            RollCategory::Damage => Self::Damage,
            RollCategory::HitDie => Self::HitDie,
            RollCategory::Skill | RollCategory::Tool => Self::SkillTool,
            other => Self::Generic {
                d20: other.uses_d20(),
            },
        }
    }

    /// The UI hints the dialog collaborator should honor for this variant.
    pub fn hints(self, state: &RollConfigState, default_ability: Option<String>) -> DialogHints {
        let d20 = match self {
            Self::Attack | Self::SkillTool => true,
            Self::Damage | Self::HitDie => false,
            Self::Generic { d20 } => d20,
        };
        DialogHints {
            show_dc: d20 && state.show_dc,
            dc_value: state.dc_value,
            show_advantage: d20,
            show_critical: self == Self::Damage,
            show_ability_choice: self == Self::SkillTool,
            default_ability: if self == Self::SkillTool {
                default_ability
            } else {
                None
            },
            show_send_request: true,
            send_request_default: state.send_request,
        }
    }

    /// Build hints straight from a validated request.
    pub fn hints_for(validated: &ValidatedRequest, state: &RollConfigState) -> DialogHints {
        let request = validated.request();
        let variant = Self::for_category(request.category);
        let default_ability = request.key.as_deref().and_then(|key| {
            default_ability_for(Some(validated.subject()), request.category, key)
        });
        variant.hints(state, default_ability)
    }
}

/// Which fields the dialog shows and their initial values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogHints {
    /// Show the DC field.
    pub show_dc: bool,
    /// Initial DC value.
    pub dc_value: Option<i64>,
    /// Show the advantage/normal/disadvantage selector.
    pub show_advantage: bool,
    /// Show the critical-hit toggle.
    pub show_critical: bool,
    /// Show the ability selector.
    pub show_ability_choice: bool,
    /// The ability preselected in the ability selector.
    pub default_ability: Option<String>,
    /// Show the "send to players" toggle.
    pub show_send_request: bool,
    /// Initial state of the "send to players" toggle.
    pub send_request_default: bool,
}

//! Roll execution configs and the request config builder.
//!
//! A [`RollExecutionConfig`] is what the roll evaluator receives. Every config
//! built here carries the `_processed` marker, so a roll it produces is never
//! picked up again as a fresh request.

use std::collections::BTreeMap;

use rc_core::ActorId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::request::ValidatedRequest;
use crate::roll_mode::RollMode;
use crate::settings::Settings;

/// The symbolic formula term that stands in for the situational bonus.
pub const SITUATIONAL_TERM: &str = "@situational";

/// Data key holding the literal situational formula.
pub const SITUATIONAL_KEY: &str = "situational";

/// Options key holding a roll's target.
pub const TARGET_KEY: &str = "target";

/// One roll's formula parts, data, and evaluator options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollSpec {
    /// Formula terms, joined with `+` by the evaluator.
    #[serde(default, deserialize_with = "null_as_default")]
    pub formula_parts: Vec<String>,
    /// Values referenced by `@name` terms.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: BTreeMap<String, Value>,
    /// Evaluator options (target, critical thresholds, ...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: BTreeMap<String, Value>,
}

impl RollSpec {
    /// Attach a situational bonus formula.
    ///
    /// Appends [`SITUATIONAL_TERM`] at most once and stores the literal
    /// formula under `data.situational`. Blank formulas are ignored.
    pub fn attach_situational(&mut self, formula: &str) {
        let formula = formula.trim();
        if formula.is_empty() {
            return;
        }
        if !self.formula_parts.iter().any(|p| p == SITUATIONAL_TERM) {
            self.formula_parts.push(SITUATIONAL_TERM.to_string());
        }
        self.data
            .insert(SITUATIONAL_KEY.to_string(), Value::String(formula.to_string()));
    }

    /// The literal situational formula, if one is attached.
    pub fn situational(&self) -> Option<&str> {
        self.data.get(SITUATIONAL_KEY).and_then(Value::as_str)
    }

    /// Set `options.target`.
    pub fn set_target(&mut self, target: i64) {
        self.options
            .insert(TARGET_KEY.to_string(), Value::from(target));
    }

    /// The roll's `options.target`, if set.
    pub fn target(&self) -> Option<i64> {
        self.options.get(TARGET_KEY).and_then(Value::as_i64)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The finalized instruction handed to the roll evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollExecutionConfig {
    /// The rolls to evaluate.
    pub rolls: Vec<RollSpec>,
    /// Roll two d20s and keep the higher.
    pub advantage: bool,
    /// Roll two d20s and keep the lower.
    pub disadvantage: bool,
    /// The DC the total is compared to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<i64>,
    /// Result visibility.
    pub roll_mode: RollMode,
    /// The roll was issued on behalf of someone other than a moderator.
    pub is_roll_request: bool,
    /// The roll should be sent to the actors' owners.
    pub send_request: bool,
    /// The actor the roll is attributed to.
    #[serde(default)]
    pub subject: Option<ActorId>,
    /// Post a result message.
    pub chat_message: bool,
    /// Ability override for skill and tool rolls; absent means the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability: Option<String>,
    /// Label of whoever asked for the roll.
    #[serde(rename = "_requestedBy", default, skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<String>,
    /// Set on every config this engine builds.
    #[serde(rename = "_processed", default)]
    pub processed: bool,
}

impl RollExecutionConfig {
    /// Returns true if the engine built this config.
    pub fn is_processed(&self) -> bool {
        self.processed
    }

    /// The first roll spec, if any.
    pub fn primary(&self) -> Option<&RollSpec> {
        self.rolls.first()
    }
}

/// Build the base execution config for a validated request.
///
/// Steps, in order: normalize the base roll specs, attach the situational
/// bonus, copy the advantage flags, copy the target, then stamp the request
/// markers.
pub fn build_execution_config(
    validated: &ValidatedRequest,
    settings: &Settings,
) -> RollExecutionConfig {
    let request = validated.request();

    let mut rolls = if request.rolls.is_empty() {
        vec![RollSpec::default()]
    } else {
        request.rolls.clone()
    };

    if let Some(formula) = request.situational_formula.as_deref() {
        for spec in &mut rolls {
            spec.attach_situational(formula);
        }
    }

    let config = RollExecutionConfig {
        rolls,
        advantage: request.advantage_hint,
        disadvantage: request.disadvantage_hint,
        target: request.target_difficulty,
        roll_mode: settings.roll_mode(request.roll_mode),
        is_roll_request: !request.from_moderator,
        send_request: request.send_request,
        subject: Some(validated.subject().id.clone()),
        chat_message: request.chat_message,
        ability: None,
        requested_by: Some(request.requester_label.clone()),
        processed: true,
    };

    tracing::debug!(
        request = %request.id,
        category = %request.category,
        rolls = config.rolls.len(),
        "built base execution config"
    );

    config
}

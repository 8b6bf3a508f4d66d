//! Roll requests and their validation.
//!
//! A [`RollRequest`] is the moderator's raw intent. It becomes a
//! [`ValidatedRequest`] only once its actors resolve and its flags are
//! consistent; nothing downstream ever sees an unvalidated request.

use std::fmt;

use rc_core::{ActorId, ActorLookup, ActorRecord, RollCategory};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::RollSpec;
use crate::error::{MechError, MechResult};
use crate::roll_mode::RollMode;

/// Identifier of a single roll request, used to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Generate a new random request id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A moderator's request for one or more actors to roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollRequest {
    /// Request id.
    #[serde(default)]
    pub id: RequestId,
    /// What kind of roll.
    pub category: RollCategory,
    /// Ability, skill, or tool key; absent for category-only rolls.
    #[serde(default)]
    pub key: Option<String>,
    /// The DC to meet or beat.
    #[serde(default)]
    pub target_difficulty: Option<i64>,
    /// Roll with advantage.
    #[serde(default)]
    pub advantage_hint: bool,
    /// Roll with disadvantage.
    #[serde(default)]
    pub disadvantage_hint: bool,
    /// Extra formula for the circumstance (e.g. `1d4`, `+2`).
    #[serde(default)]
    pub situational_formula: Option<String>,
    /// Who asked for the roll, shown alongside the result.
    #[serde(default)]
    pub requester_label: String,
    /// Whether the acting party is a moderator rolling on the actors' behalf.
    #[serde(default = "default_true")]
    pub from_moderator: bool,
    /// Actors asked to roll, in order.
    pub actors: Vec<ActorId>,
    /// Base roll specs; an empty list means a single empty spec.
    #[serde(default)]
    pub rolls: Vec<RollSpec>,
    /// Explicit roll mode picked by the requester.
    #[serde(default)]
    pub roll_mode: Option<RollMode>,
    /// Send the roll to the actors' owners instead of rolling locally.
    #[serde(default)]
    pub send_request: bool,
    /// Post a result message.
    #[serde(default = "default_true")]
    pub chat_message: bool,
}

fn default_true() -> bool {
    true
}

impl RollRequest {
    /// Create a request from a moderator with default flags.
    pub fn new(category: RollCategory, key: Option<&str>, actors: Vec<ActorId>) -> Self {
        Self {
            id: RequestId::new(),
            category,
            key: key.map(str::to_string),
            target_difficulty: None,
            advantage_hint: false,
            disadvantage_hint: false,
            situational_formula: None,
            requester_label: String::new(),
            from_moderator: true,
            actors,
            rolls: Vec::new(),
            roll_mode: None,
            send_request: false,
            chat_message: true,
        }
    }

    /// Set the DC.
    pub fn with_dc(mut self, dc: i64) -> Self {
        self.target_difficulty = Some(dc);
        self
    }

    /// Request advantage.
    pub fn with_advantage(mut self) -> Self {
        self.advantage_hint = true;
        self
    }

    /// Request disadvantage.
    pub fn with_disadvantage(mut self) -> Self {
        self.disadvantage_hint = true;
        self
    }

    /// Add a situational bonus formula.
    pub fn with_situational(mut self, formula: impl Into<String>) -> Self {
        self.situational_formula = Some(formula.into());
        self
    }

    /// Label the requester.
    pub fn requested_by(mut self, label: impl Into<String>) -> Self {
        self.requester_label = label.into();
        self
    }

    /// Mark the acting party as a player rather than a moderator.
    pub fn from_player(mut self) -> Self {
        self.from_moderator = false;
        self
    }

    /// Pick an explicit roll mode.
    pub fn with_roll_mode(mut self, mode: RollMode) -> Self {
        self.roll_mode = Some(mode);
        self
    }

    /// Ask the actors' owners to roll.
    pub fn sending_request(mut self) -> Self {
        self.send_request = true;
        self
    }

    /// Check the request against the actor data and resolve its actors.
    ///
    /// Unknown actor ids are dropped. The request fails if both advantage
    /// and disadvantage are set, if a keyed category has no key, or if no
    /// actor remains.
    pub fn validate<L>(self, lookup: &L) -> MechResult<ValidatedRequest>
    where
        L: ActorLookup + ?Sized,
    {
        if self.advantage_hint && self.disadvantage_hint {
            return Err(MechError::ConflictingAdvantage);
        }

        let has_key = self.key.as_deref().is_some_and(|k| !k.trim().is_empty());
        if self.category.requires_key() && !has_key {
            return Err(MechError::MissingKey(self.category));
        }

        let mut actors = Vec::with_capacity(self.actors.len());
        for id in &self.actors {
            match lookup.actor(id) {
                Some(actor) => {
                    if !actors.iter().any(|a: &ActorRecord| &a.id == id) {
                        actors.push(actor.clone());
                    }
                }
                None => tracing::debug!(request = %self.id, actor = %id, "dropping unknown actor"),
            }
        }

        if actors.is_empty() {
            return Err(MechError::NoActors);
        }

        Ok(ValidatedRequest {
            request: self,
            actors,
        })
    }
}

/// A request whose actors resolved and whose flags are consistent.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    request: RollRequest,
    actors: Vec<ActorRecord>,
}

impl ValidatedRequest {
    /// The underlying request.
    pub fn request(&self) -> &RollRequest {
        &self.request
    }

    /// The resolved actors, in request order, without duplicates.
    pub fn actors(&self) -> &[ActorRecord] {
        &self.actors
    }

    /// The actor the roll is attributed to.
    pub fn subject(&self) -> &ActorRecord {
        &self.actors[0]
    }
}

//! Tracking a group roll while its members' results come in.

use rc_core::{ActorId, ActorLookup, ActorRecord, RollCategory};
use serde::{Deserialize, Serialize};

use crate::consensus::{
    CompletedCheck, ConsensusMethod, GroupConsensusOutcome, RollEntry, resolve,
};
use crate::error::{MechError, MechResult};
use crate::request::ValidatedRequest;

/// A group roll in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRoll {
    /// What kind of roll.
    pub category: RollCategory,
    /// Ability, skill, or tool key.
    #[serde(default)]
    pub key: Option<String>,
    /// The DC.
    pub dc: i64,
    /// One entry per actor, in request order.
    #[serde(rename = "rollResults")]
    entries: Vec<RollEntry>,
}

impl GroupRoll {
    /// Start a group roll with every actor pending.
    pub fn new(
        actors: impl IntoIterator<Item = ActorId>,
        category: RollCategory,
        key: Option<&str>,
        dc: i64,
    ) -> Self {
        Self {
            category,
            key: key.map(str::to_string),
            dc,
            entries: actors.into_iter().map(RollEntry::pending).collect(),
        }
    }

    /// Start a group roll for a validated request; `None` if it has no DC.
    pub fn from_request(validated: &ValidatedRequest) -> Option<Self> {
        let request = validated.request();
        let dc = request.target_difficulty?;
        Some(Self::new(
            validated.actors().iter().map(|a| a.id.clone()),
            request.category,
            request.key.as_deref(),
            dc,
        ))
    }

    /// Record (or replace) an actor's total.
    pub fn record(&mut self, actor: &ActorId, total: i64) -> MechResult<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| &e.actor_id == actor)
            .ok_or_else(|| MechError::UnknownActor(actor.clone()))?;
        if let Some(previous) = entry.total.replace(total) {
            tracing::debug!(%actor, previous, total, "replacing group roll result");
        }
        Ok(())
    }

    /// All entries in order.
    pub fn entries(&self) -> &[RollEntry] {
        &self.entries
    }

    /// Actors who have not rolled yet.
    pub fn pending(&self) -> Vec<&ActorId> {
        self.entries
            .iter()
            .filter(|e| e.total.is_none())
            .map(|e| &e.actor_id)
            .collect()
    }

    /// Returns true once every actor has rolled.
    pub fn is_complete(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(|e| e.total.is_some())
    }

    /// Evaluate the group under `method`, resolving actors through `lookup`.
    ///
    /// Actors the lookup does not know are left out of leader and weakest
    /// selection, but their totals still count and they still count toward
    /// the group size.
    pub fn evaluate<L>(&self, lookup: &L, method: ConsensusMethod) -> GroupConsensusOutcome
    where
        L: ActorLookup + ?Sized,
    {
        let actors: Vec<ActorRecord> = self
            .entries
            .iter()
            .filter_map(|e| lookup.actor(&e.actor_id))
            .cloned()
            .collect();
        let Some(mut check) = CompletedCheck::from_entries(
            &self.entries,
            self.dc,
            &actors,
            self.category,
            self.key.as_deref(),
        ) else {
            return GroupConsensusOutcome::incomplete();
        };
        if actors.len() < self.entries.len() {
            tracing::debug!(
                known = actors.len(),
                members = self.entries.len(),
                "group roll has actors missing from the roster"
            );
        }
        check.group_size = self.entries.len();
        resolve(&check, method)
    }
}

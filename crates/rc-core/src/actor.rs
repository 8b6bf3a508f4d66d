//! Actor records, identifiers, ownership, and rosters.
//!
//! Records mirror the host's JSON shape; the engine reads them but never
//! writes them back.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Host-assigned identifier of an actor (character, NPC, monster).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub String);

impl ActorId {
    /// Wrap a host id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Host-assigned identifier of a connected user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// How much access a user has to an actor.
///
/// Serialized as the host's integer levels 0-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum PermissionLevel {
    /// No access.
    #[default]
    None,
    /// Can see the actor's name and token.
    Limited,
    /// Can view the full sheet.
    Observer,
    /// Full control, including rolling for the actor.
    Owner,
}

impl TryFrom<i64> for PermissionLevel {
    type Error = CoreError;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Self::None),
            1 => Ok(Self::Limited),
            2 => Ok(Self::Observer),
            3 => Ok(Self::Owner),
            other => Err(CoreError::InvalidPermission(other)),
        }
    }
}

impl From<PermissionLevel> for i64 {
    fn from(level: PermissionLevel) -> Self {
        match level {
            PermissionLevel::None => 0,
            PermissionLevel::Limited => 1,
            PermissionLevel::Observer => 2,
            PermissionLevel::Owner => 3,
        }
    }
}

/// One ability score block (`str`, `dex`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityEntry {
    /// The raw score.
    #[serde(default)]
    pub value: Option<i64>,
    /// The ability modifier.
    #[serde(default, rename = "mod")]
    pub modifier: Option<i64>,
    /// The saving throw bonus, proficiency included.
    #[serde(default)]
    pub save: Option<i64>,
}

/// A skill or tool proficiency entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProficiencyEntry {
    /// The full bonus, proficiency and ability included.
    #[serde(default)]
    pub total: Option<i64>,
    /// The raw modifier when no total has been computed.
    #[serde(default, rename = "mod")]
    pub modifier: Option<i64>,
    /// The ability this entry rolls with, when it differs from the default.
    #[serde(default)]
    pub ability: Option<String>,
}

/// Broad item type, as far as roll configuration cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    /// A tool or instrument usable for tool checks.
    Tool,
    /// A weapon.
    Weapon,
    /// Anything else.
    #[default]
    #[serde(other)]
    Other,
}

/// An item carried by an actor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedItem {
    /// Display name.
    pub name: String,
    /// Item type.
    #[serde(default)]
    pub kind: ItemKind,
    /// The tool key this item provides (e.g. `thief`), for tool items.
    #[serde(default)]
    pub tool_key: Option<String>,
    /// Check bonus granted by the item.
    #[serde(default)]
    pub bonus: Option<i64>,
    /// The ability the item rolls with.
    #[serde(default)]
    pub ability: Option<String>,
}

impl OwnedItem {
    /// Returns true if this is a tool item matching `key` by tool key or name.
    pub fn provides_tool(&self, key: &str) -> bool {
        self.kind == ItemKind::Tool
            && (self.tool_key.as_deref() == Some(key) || self.name.eq_ignore_ascii_case(key))
    }
}

/// A user connected to the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// User id.
    pub id: UserId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Whether this user is a moderator (GM).
    #[serde(default)]
    pub is_moderator: bool,
    /// Whether the user is currently connected.
    #[serde(default)]
    pub active: bool,
}

/// An actor as the host exposes it to the roll engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRecord {
    /// Host id.
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Ability blocks keyed by ability (`str`, `dex`, ...).
    #[serde(default)]
    pub abilities: BTreeMap<String, AbilityEntry>,
    /// Skills keyed by skill key (`ath`, `ste`, ...).
    #[serde(default)]
    pub skills: BTreeMap<String, ProficiencyEntry>,
    /// Tool proficiencies keyed by tool key (`thief`, `herb`, ...).
    #[serde(default)]
    pub tools: BTreeMap<String, ProficiencyEntry>,
    /// Items the actor carries.
    #[serde(default)]
    pub items: Vec<OwnedItem>,
    /// Per-user permission levels.
    #[serde(default)]
    pub ownership: BTreeMap<UserId, PermissionLevel>,
}

impl ActorRecord {
    /// Create an actor with no stats.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ActorId(id.into()),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Permission level of a given user, `None` when absent.
    pub fn permission(&self, user: &UserId) -> PermissionLevel {
        self.ownership.get(user).copied().unwrap_or_default()
    }

    /// The first active, non-moderator user who owns this actor.
    ///
    /// Users are checked in the order given, so the host decides precedence.
    pub fn player_owner<'a>(&self, users: &'a [UserRecord]) -> Option<&'a UserRecord> {
        users.iter().find(|u| {
            u.active && !u.is_moderator && self.permission(&u.id) == PermissionLevel::Owner
        })
    }
}

/// Read-only access to actor records by id.
pub trait ActorLookup {
    /// Find an actor by id.
    fn actor(&self, id: &ActorId) -> Option<&ActorRecord>;
}

impl ActorLookup for [ActorRecord] {
    fn actor(&self, id: &ActorId) -> Option<&ActorRecord> {
        self.iter().find(|a| &a.id == id)
    }
}

/// The set of actors known for the current session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    actors: Vec<ActorRecord>,
}

impl Roster {
    /// Build a roster from actor records, keeping their order.
    pub fn new(actors: Vec<ActorRecord>) -> Self {
        Self { actors }
    }

    /// All actors in roster order.
    pub fn actors(&self) -> &[ActorRecord] {
        &self.actors
    }

    /// Look up an actor or fail with [`CoreError::ActorNotFound`].
    pub fn require(&self, id: &ActorId) -> Result<&ActorRecord, CoreError> {
        self.actor(id)
            .ok_or_else(|| CoreError::ActorNotFound(id.clone()))
    }
}

impl From<Vec<ActorRecord>> for Roster {
    fn from(actors: Vec<ActorRecord>) -> Self {
        Self::new(actors)
    }
}

impl ActorLookup for Roster {
    fn actor(&self, id: &ActorId) -> Option<&ActorRecord> {
        self.actors.as_slice().actor(id)
    }
}

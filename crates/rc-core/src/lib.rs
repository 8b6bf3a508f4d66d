//! Core types for Rollcall: actors, roll categories, and modifier lookup.
//!
//! This crate defines the data model every other Rollcall crate builds on.
//! Actor records arrive from the host as JSON; the engine only ever reads
//! them through [`modifier::modifier_for`] and the [`ActorLookup`] trait.

/// Actor records, identifiers, ownership, and rosters.
pub mod actor;
/// Roll categories and 5e default abilities.
pub mod category;
/// Error types used throughout the crate.
pub mod error;
/// The actor modifier accessor.
pub mod modifier;

/// Re-export actor types.
pub use actor::{ActorId, ActorLookup, ActorRecord, PermissionLevel, Roster, UserId, UserRecord};
/// Re-export category types.
pub use category::{Ability, RollCategory};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the modifier accessor.
pub use modifier::{default_ability_for, modifier_for, modifier_with_ability};

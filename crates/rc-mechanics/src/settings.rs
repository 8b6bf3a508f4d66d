//! Session-wide settings read by the engine.
//!
//! Loaded once when a session starts and passed by reference afterwards.
//! The engine only ever reads them.

use serde::{Deserialize, Serialize};

use crate::consensus::ConsensusMethod;
use crate::roll_mode::{RollMode, resolve_roll_mode};

/// Settings supplied by the host's settings store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Force every roll without an explicit mode to be public.
    pub public_rolls: bool,
    /// Raw consensus method code (1-4) as stored by the host.
    pub group_roll_result_mode: i64,
    /// Roll mode used when public rolls are off and nobody picked one.
    pub default_roll_mode: RollMode,
    /// Build configs straight from the request, without opening a dialog.
    pub skip_dialogs: bool,
    /// Turn player-owned actors' rolls into requests for their owners.
    pub intercept_rolls: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            public_rolls: false,
            group_roll_result_mode: ConsensusMethod::StandardRule.code(),
            default_roll_mode: RollMode::Public,
            skip_dialogs: false,
            intercept_rolls: true,
        }
    }
}

impl Settings {
    /// Set the public-rolls flag.
    pub fn with_public_rolls(mut self, enabled: bool) -> Self {
        self.public_rolls = enabled;
        self
    }

    /// Set the consensus method.
    pub fn with_group_mode(mut self, method: ConsensusMethod) -> Self {
        self.group_roll_result_mode = method.code();
        self
    }

    /// Set the default roll mode.
    pub fn with_default_roll_mode(mut self, mode: RollMode) -> Self {
        self.default_roll_mode = mode;
        self
    }

    /// Skip the interactive dialog.
    pub fn with_skip_dialogs(mut self, skip: bool) -> Self {
        self.skip_dialogs = skip;
        self
    }

    /// Enable or disable roll interception.
    pub fn with_intercept_rolls(mut self, intercept: bool) -> Self {
        self.intercept_rolls = intercept;
        self
    }

    /// The configured consensus method, falling back to the Standard Rule.
    pub fn consensus_method(&self) -> ConsensusMethod {
        ConsensusMethod::from_setting(self.group_roll_result_mode)
    }

    /// Resolve the roll mode for a roll, given the user's explicit choice.
    pub fn roll_mode(&self, explicit: Option<RollMode>) -> RollMode {
        resolve_roll_mode(self.public_rolls, explicit, self.default_roll_mode)
    }
}

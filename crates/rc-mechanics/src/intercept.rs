//! Deciding whether a host-initiated roll should be routed through the engine.

use crate::config::RollExecutionConfig;
use crate::settings::Settings;

/// Returns true if a roll the host started on its own should be redirected
/// into a roll request.
///
/// Configs this engine already built are never intercepted again, nor are
/// rolls that are themselves answers to a request. Actors without a player
/// owner are rolled locally.
pub fn should_intercept(
    config: &RollExecutionConfig,
    settings: &Settings,
    actor_has_player_owner: bool,
) -> bool {
    if !settings.intercept_rolls {
        return false;
    }
    if config.is_processed() {
        tracing::trace!("skipping interception of a processed config");
        return false;
    }
    !config.is_roll_request && actor_has_player_owner
}

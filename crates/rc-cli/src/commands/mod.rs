pub mod group;
pub mod modifier;
pub mod request;
pub mod simulate;

use std::path::Path;

use colored::Colorize;
use serde::de::DeserializeOwned;

use rc_core::Roster;
use rc_mechanics::{ConsensusMethod, GroupConsensusOutcome, Settings};

use crate::summary::summarize;

/// Read and deserialize a JSON file.
fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {what} {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("invalid {what} {}: {e}", path.display()))
}

fn load_roster(path: &Path) -> Result<Roster, String> {
    let roster: Roster = read_json(path, "roster")?;
    tracing::debug!(actors = roster.actors().len(), "loaded roster");
    Ok(roster)
}

/// Settings from a file, or the defaults when no file is given.
fn load_settings(path: Option<&Path>) -> Result<Settings, String> {
    path.map_or_else(|| Ok(Settings::default()), |p| read_json(p, "settings"))
}

/// Resolve a method code given on the command line.
fn method_from_code(code: i64) -> Result<ConsensusMethod, String> {
    ConsensusMethod::from_code(code)
        .ok_or_else(|| format!("unknown group method {code} (expected 1-4)"))
}

/// Print the group summary, colored by verdict.
fn print_summary(outcome: &GroupConsensusOutcome, method: ConsensusMethod) {
    let line = summarize(outcome, method);
    let line = match (outcome.complete, outcome.success) {
        (false, _) => line.dimmed(),
        (true, true) => line.green(),
        (true, false) => line.red(),
    };
    println!();
    println!("  {line}");
}

//! Plain-English summaries of group roll outcomes.

use rc_mechanics::{ConsensusDetails, ConsensusMethod, GroupConsensusOutcome};

/// One-line summary of an outcome, as posted to the table.
pub fn summarize(outcome: &GroupConsensusOutcome, method: ConsensusMethod) -> String {
    let Some(details) = outcome.details.as_ref().filter(|_| outcome.complete) else {
        return format!("{method}: waiting on rolls.");
    };
    let verdict = if outcome.success { "passed" } else { "failed" };

    match details {
        ConsensusDetails::StandardRule {
            successes,
            total,
            threshold,
        } => format!(
            "{method}: group {verdict}, {successes} of {total} succeeded ({threshold} needed)."
        ),
        ConsensusDetails::GroupAverage { average, dc } => {
            format!("{method}: group {verdict}, average {average} vs DC {dc}.")
        }
        ConsensusDetails::LeaderWithHelp {
            leader_name,
            leader_roll,
            bonus,
            penalty,
            adjusted_result,
            dc,
            ..
        } => format!(
            "{method}: group {verdict}, {leader_name} led with {leader_roll} \
             (+{bonus} help, -{penalty} hindrance) for {adjusted_result} vs DC {dc}."
        ),
        ConsensusDetails::WeakestLink {
            weakest_name,
            weakest_roll,
            bonus,
            adjusted_result,
            dc,
            ..
        } => format!(
            "{method}: group {verdict}, {weakest_name} rolled {weakest_roll} \
             (+{bonus} help) for {adjusted_result} vs DC {dc}."
        ),
        ConsensusDetails::Unresolved { attempted, error } => {
            format!("{attempted}: no verdict, {error}.")
        }
    }
}

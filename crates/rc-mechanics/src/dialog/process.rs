//! Turning a dialog outcome into the final execution config.

use rc_core::{ActorRecord, default_ability_for};

use crate::config::{RollExecutionConfig, RollSpec, SITUATIONAL_TERM};
use crate::dialog::{DialogOutcome, FinalizedRoll};
use crate::request::RollRequest;
use crate::settings::Settings;

/// Convert the dialog's answer into the config handed to the evaluator.
///
/// Returns `None` when the dialog was cancelled or produced no rolls; that
/// means "no action", not failure. Advantage state is taken from the first
/// roll. The chosen ability is only kept for skill and tool rolls, and only
/// when it differs from the default ability for that skill or tool.
pub fn process_outcome(
    outcome: &DialogOutcome,
    actors: &[ActorRecord],
    request: &RollRequest,
    settings: &Settings,
) -> Option<RollExecutionConfig> {
    if outcome.cancelled {
        tracing::debug!(request = %request.id, "dialog cancelled");
        return None;
    }
    let first = outcome.rolls.first()?;

    let (advantage, disadvantage) = first.advantage_mode.flags();
    let rolls: Vec<RollSpec> = outcome.rolls.iter().map(finalized_spec).collect();

    let ability = chosen_ability(outcome, actors.first(), request);

    let config = RollExecutionConfig {
        rolls,
        advantage,
        disadvantage,
        target: first.target,
        roll_mode: settings.roll_mode(outcome.roll_mode),
        is_roll_request: outcome.send_request,
        send_request: outcome.send_request,
        subject: actors.first().map(|a| a.id.clone()),
        chat_message: request.chat_message,
        ability,
        requested_by: Some(request.requester_label.clone()),
        processed: true,
    };

    tracing::debug!(
        request = %request.id,
        advantage,
        disadvantage,
        target = ?config.target,
        roll_mode = %config.roll_mode,
        "processed dialog outcome"
    );

    Some(config)
}

fn finalized_spec(roll: &FinalizedRoll) -> RollSpec {
    let mut spec = RollSpec {
        formula_parts: roll.formula_parts.clone(),
        ..RollSpec::default()
    };

    match roll.situational.as_deref().map(str::trim) {
        Some(formula) if !formula.is_empty() => spec.attach_situational(formula),
        _ => spec.formula_parts.retain(|p| p != SITUATIONAL_TERM),
    }

    if let Some(target) = roll.target {
        spec.set_target(target);
    }

    spec
}

fn chosen_ability(
    outcome: &DialogOutcome,
    subject: Option<&ActorRecord>,
    request: &RollRequest,
) -> Option<String> {
    if !request.category.has_ability_choice() {
        return None;
    }
    let chosen = outcome.chosen_ability.as_deref()?;
    let key = request.key.as_deref()?;
    let default = default_ability_for(subject, request.category, key);

    (default.as_deref() != Some(chosen)).then(|| chosen.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SITUATIONAL_KEY;
    use crate::dialog::AdvantageMode;
    use crate::roll_mode::RollMode;
    use proptest::prelude::*;
    use rc_core::{ActorId, RollCategory};

    fn actors() -> Vec<ActorRecord> {
        vec![ActorRecord::new("a1", "Aria"), ActorRecord::new("b2", "Bram")]
    }

    fn skill_request() -> RollRequest {
        RollRequest::new(
            RollCategory::Skill,
            Some("ste"),
            vec![ActorId::from("a1"), ActorId::from("b2")],
        )
        .requested_by("GM")
    }

    fn outcome(roll: FinalizedRoll) -> DialogOutcome {
        DialogOutcome {
            rolls: vec![roll],
            ..DialogOutcome::default()
        }
    }

    #[test]
    fn cancelled_yields_none() {
        let mut cancelled = outcome(FinalizedRoll::default());
        cancelled.cancelled = true;
        assert!(process_outcome(&cancelled, &actors(), &skill_request(), &Settings::default()).is_none());
    }

    #[test]
    fn empty_rolls_yield_none() {
        let empty = DialogOutcome::default();
        assert!(process_outcome(&empty, &actors(), &skill_request(), &Settings::default()).is_none());
    }

    #[test]
    fn advantage_situational_and_target_extracted() {
        let result = process_outcome(
            &outcome(FinalizedRoll {
                formula_parts: vec!["@mod".to_string()],
                situational: Some("1d4".to_string()),
                target: Some(15),
                advantage_mode: AdvantageMode::Disadvantage,
            }),
            &actors(),
            &skill_request(),
            &Settings::default(),
        )
        .unwrap();

        assert!(!result.advantage);
        assert!(result.disadvantage);
        assert_eq!(result.target, Some(15));
        let spec = result.primary().unwrap();
        assert_eq!(spec.target(), Some(15));
        assert_eq!(spec.situational(), Some("1d4"));
        assert_eq!(
            spec.formula_parts,
            vec!["@mod".to_string(), SITUATIONAL_TERM.to_string()]
        );
        assert_eq!(result.subject, Some(ActorId::from("a1")));
        assert_eq!(result.requested_by.as_deref(), Some("GM"));
        assert!(result.is_processed());
    }

    #[test]
    fn no_situational_means_empty_data() {
        let result = process_outcome(
            &outcome(FinalizedRoll {
                formula_parts: vec![SITUATIONAL_TERM.to_string()],
                situational: Some("  ".to_string()),
                ..FinalizedRoll::default()
            }),
            &actors(),
            &skill_request(),
            &Settings::default(),
        )
        .unwrap();
        let spec = result.primary().unwrap();
        assert!(spec.data.get(SITUATIONAL_KEY).is_none());
        assert!(spec.formula_parts.is_empty());
        assert!(spec.options.is_empty());
    }

    #[test]
    fn explicit_roll_mode_overrides_public_setting() {
        let settings = Settings::default().with_public_rolls(true);
        let mut answer = outcome(FinalizedRoll::default());
        let result = process_outcome(&answer, &actors(), &skill_request(), &settings).unwrap();
        assert_eq!(result.roll_mode, RollMode::Public);

        answer.roll_mode = Some(RollMode::Private);
        let result = process_outcome(&answer, &actors(), &skill_request(), &settings).unwrap();
        assert_eq!(result.roll_mode, RollMode::Private);
    }

    #[test]
    fn default_ability_is_omitted() {
        let mut answer = outcome(FinalizedRoll::default());
        answer.chosen_ability = Some("dex".to_string());
        let result =
            process_outcome(&answer, &actors(), &skill_request(), &Settings::default()).unwrap();
        assert_eq!(result.ability, None);

        answer.chosen_ability = Some("int".to_string());
        let result =
            process_outcome(&answer, &actors(), &skill_request(), &Settings::default()).unwrap();
        assert_eq!(result.ability.as_deref(), Some("int"));
    }

    #[test]
    fn ability_ignored_outside_skill_and_tool() {
        let request = RollRequest::new(
            RollCategory::SavingThrow,
            Some("dex"),
            vec![ActorId::from("a1")],
        );
        let mut answer = outcome(FinalizedRoll::default());
        answer.chosen_ability = Some("con".to_string());
        let result = process_outcome(&answer, &actors(), &request, &Settings::default()).unwrap();
        assert_eq!(result.ability, None);
    }

    #[test]
    fn send_request_mirrored() {
        let mut answer = outcome(FinalizedRoll::default());
        answer.send_request = true;
        let result =
            process_outcome(&answer, &actors(), &skill_request(), &Settings::default()).unwrap();
        assert!(result.send_request);
        assert!(result.is_roll_request);
    }

    proptest! {
        #[test]
        fn cancelled_outcome_is_always_none(
            send_request in any::<bool>(),
            target in proptest::option::of(-5i64..40),
            situational in proptest::option::of("[0-9]d[0-9]"),
            ability in proptest::option::of("(str|dex|int)"),
            rolls in 0usize..4,
        ) {
            let answer = DialogOutcome {
                rolls: (0..rolls)
                    .map(|_| FinalizedRoll {
                        situational: situational.clone(),
                        target,
                        ..FinalizedRoll::default()
                    })
                    .collect(),
                chosen_ability: ability,
                send_request,
                roll_mode: Some(RollMode::Blind),
                cancelled: true,
            };
            prop_assert!(
                process_outcome(&answer, &actors(), &skill_request(), &Settings::default()).is_none()
            );
        }
    }
}

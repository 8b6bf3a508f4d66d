//! The hand-off to the interactive dialog collaborator.
//!
//! The engine sends a [`DialogSeed`] and waits for exactly one
//! [`DialogOutcome`]. Settlement goes through a one-shot channel: the
//! [`Settlement`] handle is consumed when used, so a dialog cannot answer
//! twice, and a handle dropped without an answer reads as cancellation.

mod process;

pub use process::process_outcome;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::config::RollExecutionConfig;
use crate::roll_mode::RollMode;
use crate::variant::{ConfigVariant, DialogHints, RollConfigState};

/// The advantage selector's three positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdvantageMode {
    /// A single d20.
    #[default]
    Normal,
    /// Two d20s, keep the higher.
    Advantage,
    /// Two d20s, keep the lower.
    Disadvantage,
}

impl AdvantageMode {
    /// Collapse a pair of flags; both set cancel out.
    pub fn from_flags(advantage: bool, disadvantage: bool) -> Self {
        match (advantage, disadvantage) {
            (true, false) => Self::Advantage,
            (false, true) => Self::Disadvantage,
            _ => Self::Normal,
        }
    }

    /// The `(advantage, disadvantage)` flags; never both true.
    pub fn flags(self) -> (bool, bool) {
        match self {
            Self::Normal => (false, false),
            Self::Advantage => (true, false),
            Self::Disadvantage => (false, true),
        }
    }
}

/// One roll as the user left it when submitting the dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedRoll {
    /// Formula terms.
    #[serde(default)]
    pub formula_parts: Vec<String>,
    /// Situational bonus text, if any was entered.
    #[serde(default)]
    pub situational: Option<String>,
    /// Target (DC) entered in the dialog.
    #[serde(default)]
    pub target: Option<i64>,
    /// Advantage selector position.
    #[serde(default)]
    pub advantage_mode: AdvantageMode,
}

/// What the dialog collaborator hands back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogOutcome {
    /// Finalized rolls; empty when cancelled.
    #[serde(default)]
    pub rolls: Vec<FinalizedRoll>,
    /// Ability picked in the ability selector.
    #[serde(default)]
    pub chosen_ability: Option<String>,
    /// State of the "send to players" toggle.
    #[serde(default)]
    pub send_request: bool,
    /// Roll mode, only when the user touched the selector.
    #[serde(default)]
    pub roll_mode: Option<RollMode>,
    /// The user dismissed the dialog.
    #[serde(default)]
    pub cancelled: bool,
}

impl DialogOutcome {
    /// A cancelled outcome.
    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            ..Self::default()
        }
    }
}

/// Everything the dialog needs to render its initial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogSeed {
    /// The base config built from the request.
    pub config: RollExecutionConfig,
    /// Shared configuration state.
    pub state: RollConfigState,
    /// The roll family.
    pub variant: ConfigVariant,
    /// Field visibility and initial values.
    pub hints: DialogHints,
}

impl DialogSeed {
    /// The outcome of submitting the dialog without touching anything.
    pub fn accept(&self) -> DialogOutcome {
        let advantage_mode =
            AdvantageMode::from_flags(self.config.advantage, self.config.disadvantage);
        let target = self.hints.dc_value.or(self.config.target);
        let rolls = self
            .config
            .rolls
            .iter()
            .map(|spec| FinalizedRoll {
                formula_parts: spec.formula_parts.clone(),
                situational: spec.situational().map(str::to_string),
                target: spec.target().or(target),
                advantage_mode,
            })
            .collect();

        DialogOutcome {
            rolls,
            chosen_ability: self.hints.default_ability.clone(),
            send_request: self.state.send_request,
            roll_mode: None,
            cancelled: false,
        }
    }
}

/// The single-use handle a dialog answers through.
#[derive(Debug)]
pub struct Settlement {
    tx: oneshot::Sender<DialogOutcome>,
}

impl Settlement {
    /// Answer with the user's decision.
    pub fn settle(self, outcome: DialogOutcome) {
        if self.tx.send(outcome).is_err() {
            tracing::debug!("dialog settled after the requester stopped waiting");
        }
    }

    /// Answer with a cancellation.
    pub fn cancel(self) {
        self.settle(DialogOutcome::cancelled());
    }
}

/// An interactive collaborator that lets a user adjust a roll config.
///
/// Implementations receive their own copy of the seed and must eventually
/// settle (or drop) the handle. They may settle from another task.
pub trait ConfigDialog {
    /// Present the dialog.
    fn open(&self, seed: DialogSeed, settlement: Settlement);
}

/// Hand the seed to the dialog and wait for its single answer.
///
/// The caller's seed is never touched; the returned outcome is the only
/// record of what the user decided.
pub async fn run_interactive_config<D>(dialog: &D, seed: &DialogSeed) -> DialogOutcome
where
    D: ConfigDialog + ?Sized,
{
    let (tx, rx) = oneshot::channel();
    dialog.open(seed.clone(), Settlement { tx });

    match rx.await {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::debug!("dialog closed without an answer");
            DialogOutcome::cancelled()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::build_execution_config;
    use crate::request::RollRequest;
    use crate::settings::Settings;
    use rc_core::{ActorId, ActorRecord, RollCategory, Roster};
    use std::sync::Mutex;

    fn seed() -> DialogSeed {
        let roster = Roster::from(vec![ActorRecord::new("a1", "Aria")]);
        let validated = RollRequest::new(RollCategory::Skill, Some("ath"), vec![ActorId::from("a1")])
            .with_dc(13)
            .with_advantage()
            .with_situational("1d4")
            .validate(&roster)
            .unwrap();
        let config = build_execution_config(&validated, &Settings::default());
        let state = RollConfigState::from_request(&validated);
        let hints = ConfigVariant::hints_for(&validated, &state);
        DialogSeed {
            config,
            state,
            variant: ConfigVariant::SkillTool,
            hints,
        }
    }

    struct Submit;

    impl ConfigDialog for Submit {
        fn open(&self, mut seed: DialogSeed, settlement: Settlement) {
            // Edits to the dialog's own copy must not leak back.
            seed.config.advantage = false;
            seed.hints.dc_value = Some(99);
            settlement.settle(DialogOutcome {
                roll_mode: Some(RollMode::Blind),
                ..seed.accept()
            });
        }
    }

    struct Dismiss;

    impl ConfigDialog for Dismiss {
        fn open(&self, _seed: DialogSeed, settlement: Settlement) {
            settlement.cancel();
        }
    }

    struct Vanish;

    impl ConfigDialog for Vanish {
        fn open(&self, _seed: DialogSeed, settlement: Settlement) {
            drop(settlement);
        }
    }

    #[derive(Default)]
    struct Deferred {
        pending: Mutex<Option<Settlement>>,
    }

    impl ConfigDialog for Deferred {
        fn open(&self, _seed: DialogSeed, settlement: Settlement) {
            if let Ok(mut slot) = self.pending.lock() {
                *slot = Some(settlement);
            }
        }
    }

    #[test]
    fn advantage_mode_flags() {
        assert_eq!(AdvantageMode::from_flags(true, false), AdvantageMode::Advantage);
        assert_eq!(AdvantageMode::from_flags(true, true), AdvantageMode::Normal);
        assert_eq!(AdvantageMode::Disadvantage.flags(), (false, true));
        assert_eq!(AdvantageMode::Normal.flags(), (false, false));
    }

    #[test]
    fn accept_mirrors_seed() {
        let outcome = seed().accept();
        assert!(!outcome.cancelled);
        assert_eq!(outcome.rolls.len(), 1);
        assert_eq!(outcome.rolls[0].advantage_mode, AdvantageMode::Advantage);
        assert_eq!(outcome.rolls[0].situational.as_deref(), Some("1d4"));
        assert_eq!(outcome.rolls[0].target, Some(13));
        assert_eq!(outcome.chosen_ability.as_deref(), Some("str"));
        assert_eq!(outcome.roll_mode, None);
    }

    #[tokio::test]
    async fn submitted_outcome_returned_and_seed_untouched() {
        let seed = seed();
        let before = seed.clone();
        let outcome = run_interactive_config(&Submit, &seed).await;
        assert_eq!(seed, before);
        assert_eq!(outcome.roll_mode, Some(RollMode::Blind));
        assert_eq!(outcome.rolls[0].target, Some(99));
        assert_eq!(outcome.rolls[0].advantage_mode, AdvantageMode::Normal);
    }

    #[tokio::test]
    async fn cancel_is_an_outcome() {
        let outcome = run_interactive_config(&Dismiss, &seed()).await;
        assert!(outcome.cancelled);
        assert!(outcome.rolls.is_empty());
    }

    #[tokio::test]
    async fn dropped_settlement_reads_as_cancel() {
        let outcome = run_interactive_config(&Vanish, &seed()).await;
        assert!(outcome.cancelled);
    }

    #[tokio::test]
    async fn settlement_from_another_task() {
        let dialog = Deferred::default();
        let seed = seed();
        let run = run_interactive_config(&dialog, &seed);
        let settle = async {
            tokio::task::yield_now().await;
            let settlement = dialog.pending.lock().unwrap().take().unwrap();
            tokio::spawn(async move { settlement.settle(DialogOutcome::default()) })
                .await
                .unwrap();
        };
        let (outcome, ()) = tokio::join!(run, settle);
        assert!(!outcome.cancelled);
        assert!(outcome.rolls.is_empty());
    }
}

//! A non-interactive dialog that answers with values from the command line.

use rc_mechanics::{AdvantageMode, ConfigDialog, DialogSeed, RollMode, Settlement};

/// Dialog answers as given on the command line.
#[derive(Debug, Default)]
pub struct DialogAnswers {
    pub advantage: bool,
    pub disadvantage: bool,
    pub situational: Option<String>,
    pub dc: Option<i64>,
    pub ability: Option<String>,
    pub mode: Option<String>,
    pub cancel: bool,
}

/// Submits the seed with the scripted edits applied, or cancels.
#[derive(Debug)]
pub struct ScriptedDialog {
    advantage: Option<AdvantageMode>,
    situational: Option<String>,
    dc: Option<i64>,
    ability: Option<String>,
    mode: Option<RollMode>,
    cancel: bool,
}

impl TryFrom<DialogAnswers> for ScriptedDialog {
    type Error = String;

    fn try_from(answers: DialogAnswers) -> Result<Self, Self::Error> {
        let mode = answers
            .mode
            .as_deref()
            .map(str::parse::<RollMode>)
            .transpose()
            .map_err(|e| e.to_string())?;
        let advantage = (answers.advantage || answers.disadvantage)
            .then(|| AdvantageMode::from_flags(answers.advantage, answers.disadvantage));

        Ok(Self {
            advantage,
            situational: answers.situational,
            dc: answers.dc,
            ability: answers.ability,
            mode,
            cancel: answers.cancel,
        })
    }
}

impl ConfigDialog for ScriptedDialog {
    fn open(&self, seed: DialogSeed, settlement: Settlement) {
        if self.cancel {
            tracing::debug!("scripted dialog dismissed");
            settlement.cancel();
            return;
        }

        let mut outcome = seed.accept();
        for roll in &mut outcome.rolls {
            if let Some(mode) = self.advantage {
                roll.advantage_mode = mode;
            }
            if let Some(situational) = &self.situational {
                roll.situational = Some(situational.clone());
            }
            if let Some(dc) = self.dc {
                roll.target = Some(dc);
            }
        }
        if let Some(ability) = &self.ability {
            outcome.chosen_ability = Some(ability.clone());
        }
        outcome.roll_mode = self.mode;

        settlement.settle(outcome);
    }
}

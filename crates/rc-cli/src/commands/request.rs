use std::path::Path;

use colored::Colorize;

use rc_mechanics::{RollOrchestrator, RollRequest};

use crate::dialog::{DialogAnswers, ScriptedDialog};

pub fn run(
    file: &Path,
    roster: &Path,
    settings: Option<&Path>,
    answers: DialogAnswers,
) -> Result<(), String> {
    let request: RollRequest = super::read_json(file, "roll request")?;
    let roster = super::load_roster(roster)?;
    let settings = super::load_settings(settings)?;
    let dialog = ScriptedDialog::try_from(answers)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("cannot start runtime: {e}"))?;

    let prepared = runtime
        .block_on(RollOrchestrator::new(&settings).try_prepare(request, &roster, &dialog))
        .map_err(|e| e.to_string())?;

    match prepared {
        Some(config) => {
            let json = serde_json::to_string_pretty(&config)
                .map_err(|e| format!("cannot serialize config: {e}"))?;
            println!("{json}");
        }
        None => println!("{}", "Roll cancelled.".dimmed()),
    }

    Ok(())
}

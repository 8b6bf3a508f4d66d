use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use rc_core::RollCategory;
use rc_dice::D20Evaluator;
use rc_mechanics::{RollRequest, Settings, build_execution_config, evaluate, roll_group};

pub fn run(
    roster: &Path,
    category: &str,
    key: Option<&str>,
    dc: i64,
    seed: u64,
    method: i64,
) -> Result<(), String> {
    let roster = super::load_roster(roster)?;
    let category = category.parse::<RollCategory>().map_err(|e| e.to_string())?;
    let method = super::method_from_code(method)?;

    let ids = roster.actors().iter().map(|a| a.id.clone()).collect();
    let validated = RollRequest::new(category, key, ids)
        .with_dc(dc)
        .requested_by("rollcall")
        .validate(&roster)
        .map_err(|e| e.to_string())?;
    let config = build_execution_config(&validated, &Settings::default());

    let mut evaluator = D20Evaluator::seeded(seed);
    let entries = roll_group(&mut evaluator, &config, validated.actors(), category, key);

    println!(
        "  {} {} {}",
        "Group check".bold(),
        key.map_or_else(|| category.to_string(), |k| format!("{category} ({k})")),
        format!("(DC {dc}, seed={seed})").dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Actor", "d20", "Modifier", "Total"]);
    for actor in validated.actors() {
        let row = match evaluator.last_for(&actor.id) {
            Some(roll) => vec![
                actor.name.clone(),
                roll.d20.to_string(),
                format!("{:+}", roll.modifier),
                roll.total.to_string(),
            ],
            None => vec![actor.name.clone(), "-".into(), "-".into(), "-".into()],
        };
        table.add_row(row);
    }
    println!("{table}");

    let outcome = evaluate(&entries, dc, validated.actors(), category, key, method);
    super::print_summary(&outcome, method);
    Ok(())
}

use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use rc_core::{ActorLookup, modifier_for};
use rc_mechanics::GroupRoll;

pub fn run(
    file: &Path,
    roster: &Path,
    settings: Option<&Path>,
    method: Option<i64>,
) -> Result<(), String> {
    let group: GroupRoll = super::read_json(file, "group roll")?;
    let roster = super::load_roster(roster)?;
    let settings = super::load_settings(settings)?;
    let method = match method {
        Some(code) => super::method_from_code(code)?,
        None => settings.consensus_method(),
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Actor", "Modifier", "Total", "Result"]);

    for entry in group.entries() {
        let actor = roster.actor(&entry.actor_id);
        let name = actor.map_or_else(|| entry.actor_id.to_string(), |a| a.name.clone());
        let modifier = actor.map_or_else(
            || "?".to_string(),
            |a| format!("{:+}", modifier_for(a, group.category, group.key.as_deref())),
        );
        let (total, result) = match entry.total {
            Some(t) if t >= group.dc => (t.to_string(), "success"),
            Some(t) => (t.to_string(), "failure"),
            None => ("-".to_string(), "pending"),
        };
        table.add_row(vec![name, modifier, total, result.to_string()]);
    }

    println!("{table}");
    println!();
    println!("  {method}, DC {}", group.dc);

    let pending = group.pending();
    if !pending.is_empty() {
        println!("  {} still to roll", pending.len());
    }

    super::print_summary(&group.evaluate(&roster, method), method);
    Ok(())
}

use std::path::Path;

use rc_core::{ActorId, RollCategory, modifier_for};

pub fn run(roster: &Path, actor: &str, category: &str, key: &str) -> Result<(), String> {
    let roster = super::load_roster(roster)?;
    let category = category.parse::<RollCategory>().map_err(|e| e.to_string())?;
    let actor = roster
        .require(&ActorId::from(actor))
        .map_err(|e| e.to_string())?;

    println!("{:+}", modifier_for(actor, category, Some(key)));
    Ok(())
}

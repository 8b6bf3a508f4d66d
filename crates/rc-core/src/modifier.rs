//! Modifier lookup for roll categories.
//!
//! Every consumer that needs "how good is this actor at this roll" goes
//! through [`modifier_for`]. Missing data is never an error: an actor who
//! lacks the skill, save, ability, or tool simply has a modifier of 0.

use crate::actor::{ActorRecord, ProficiencyEntry};
use crate::category::{Ability, RollCategory};

/// The numeric bonus `actor` brings to a roll of `category` keyed by `key`.
///
/// - skill: skill total, else raw skill modifier, else 0
/// - save: the save bonus of the named ability, else 0
/// - ability check: the ability modifier, else 0
/// - tool: the tracked tool total or modifier, else the bonus of a carried
///   tool item matching the key, else 0
/// - anything else: 0
pub fn modifier_for(actor: &ActorRecord, category: RollCategory, key: Option<&str>) -> i64 {
    let Some(key) = key else {
        return 0;
    };

    match category {
        RollCategory::Skill => actor.skills.get(key).and_then(entry_bonus).unwrap_or(0),
        RollCategory::SavingThrow => actor
            .abilities
            .get(key)
            .and_then(|a| a.save)
            .unwrap_or(0),
        RollCategory::AbilityCheck => actor
            .abilities
            .get(key)
            .and_then(|a| a.modifier)
            .unwrap_or(0),
        RollCategory::Tool => actor
            .tools
            .get(key)
            .and_then(entry_bonus)
            .or_else(|| {
                actor
                    .items
                    .iter()
                    .find(|item| item.provides_tool(key))
                    .and_then(|item| item.bonus)
            })
            .unwrap_or(0),
        _ => 0,
    }
}

/// The ability a skill or tool roll uses when the user does not pick one.
///
/// Prefers what the actor records for that skill or tool, then the 5e
/// tables. Returns `None` for categories without an ability choice.
pub fn default_ability_for(
    actor: Option<&ActorRecord>,
    category: RollCategory,
    key: &str,
) -> Option<String> {
    match category {
        RollCategory::Skill => actor
            .and_then(|a| a.skills.get(key))
            .and_then(|s| s.ability.clone())
            .or_else(|| Ability::for_skill(key).map(|a| a.key().to_string())),
        RollCategory::Tool => actor
            .and_then(|a| {
                a.tools.get(key).and_then(|t| t.ability.clone()).or_else(|| {
                    a.items
                        .iter()
                        .find(|item| item.provides_tool(key))
                        .and_then(|item| item.ability.clone())
                })
            })
            .or_else(|| Some(Ability::for_tool(key).key().to_string())),
        _ => None,
    }
}

/// Like [`modifier_for`], but with the roll's ability swapped to `ability`.
///
/// Only skill and tool rolls offer an ability choice. When `ability` differs
/// from the default, the default ability's modifier is taken out of the
/// bonus and the chosen one's put in. Missing ability modifiers count as 0.
pub fn modifier_with_ability(
    actor: &ActorRecord,
    category: RollCategory,
    key: Option<&str>,
    ability: Option<&str>,
) -> i64 {
    let base = modifier_for(actor, category, key);
    let (Some(key), Some(chosen)) = (key, ability) else {
        return base;
    };
    if !category.has_ability_choice() {
        return base;
    }
    let Some(default) = default_ability_for(Some(actor), category, key) else {
        return base;
    };
    if default == chosen {
        return base;
    }

    let ability_mod = |ability: &str| {
        actor
            .abilities
            .get(ability)
            .and_then(|a| a.modifier)
            .unwrap_or(0)
    };
    base - ability_mod(&default) + ability_mod(chosen)
}

fn entry_bonus(entry: &ProficiencyEntry) -> Option<i64> {
    entry.total.or(entry.modifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{AbilityEntry, ItemKind, OwnedItem};

    fn rogue() -> ActorRecord {
        let mut actor = ActorRecord::new("r1", "Vex");
        actor.abilities.insert(
            "dex".to_string(),
            AbilityEntry {
                value: Some(18),
                modifier: Some(4),
                save: Some(7),
            },
        );
        actor.abilities.insert(
            "str".to_string(),
            AbilityEntry {
                value: Some(8),
                modifier: Some(-1),
                save: None,
            },
        );
        actor.skills.insert(
            "ste".to_string(),
            ProficiencyEntry {
                total: Some(10),
                modifier: Some(4),
                ability: None,
            },
        );
        actor.skills.insert(
            "ath".to_string(),
            ProficiencyEntry {
                total: None,
                modifier: Some(-1),
                ability: None,
            },
        );
        actor.tools.insert(
            "thief".to_string(),
            ProficiencyEntry {
                total: Some(9),
                modifier: None,
                ability: Some("dex".to_string()),
            },
        );
        actor.items.push(OwnedItem {
            name: "Herbalism Kit".to_string(),
            kind: ItemKind::Tool,
            tool_key: Some("herb".to_string()),
            bonus: Some(2),
            ability: Some("wis".to_string()),
        });
        actor
    }

    #[test]
    fn skill_prefers_total_then_modifier() {
        let actor = rogue();
        assert_eq!(modifier_for(&actor, RollCategory::Skill, Some("ste")), 10);
        assert_eq!(modifier_for(&actor, RollCategory::Skill, Some("ath")), -1);
        assert_eq!(modifier_for(&actor, RollCategory::Skill, Some("arc")), 0);
    }

    #[test]
    fn save_and_check() {
        let actor = rogue();
        assert_eq!(modifier_for(&actor, RollCategory::SavingThrow, Some("dex")), 7);
        assert_eq!(modifier_for(&actor, RollCategory::SavingThrow, Some("str")), 0);
        assert_eq!(modifier_for(&actor, RollCategory::AbilityCheck, Some("str")), -1);
        assert_eq!(modifier_for(&actor, RollCategory::AbilityCheck, Some("cha")), 0);
    }

    #[test]
    fn tool_uses_tracked_tool_then_items() {
        let actor = rogue();
        assert_eq!(modifier_for(&actor, RollCategory::Tool, Some("thief")), 9);
        assert_eq!(modifier_for(&actor, RollCategory::Tool, Some("herb")), 2);
        assert_eq!(
            modifier_for(&actor, RollCategory::Tool, Some("Herbalism Kit")),
            2
        );
        assert_eq!(modifier_for(&actor, RollCategory::Tool, Some("navg")), 0);
    }

    #[test]
    fn other_categories_and_missing_key_are_zero() {
        let actor = rogue();
        assert_eq!(modifier_for(&actor, RollCategory::Attack, Some("dex")), 0);
        assert_eq!(modifier_for(&actor, RollCategory::Initiative, None), 0);
        assert_eq!(modifier_for(&actor, RollCategory::Skill, None), 0);
    }

    #[test]
    fn default_abilities() {
        let actor = rogue();
        assert_eq!(
            default_ability_for(Some(&actor), RollCategory::Skill, "ste").as_deref(),
            Some("dex")
        );
        assert_eq!(
            default_ability_for(Some(&actor), RollCategory::Tool, "herb").as_deref(),
            Some("wis")
        );
        assert_eq!(
            default_ability_for(None, RollCategory::Tool, "alchemist").as_deref(),
            Some("int")
        );
        assert_eq!(
            default_ability_for(Some(&actor), RollCategory::SavingThrow, "dex"),
            None
        );
    }

    #[test]
    fn chosen_ability_replaces_default() {
        let mut actor = rogue();
        actor.abilities.insert(
            "int".to_string(),
            AbilityEntry {
                value: Some(12),
                modifier: Some(1),
                save: None,
            },
        );
        // stealth 10 = dex 4 + 6
        assert_eq!(
            modifier_with_ability(&actor, RollCategory::Skill, Some("ste"), Some("int")),
            7
        );
        assert_eq!(
            modifier_with_ability(&actor, RollCategory::Tool, Some("thief"), Some("str")),
            4
        );
        // no wis on record, so only the chosen ability's modifier moves it
        assert_eq!(
            modifier_with_ability(&actor, RollCategory::Tool, Some("herb"), Some("dex")),
            6
        );
    }

    #[test]
    fn chosen_ability_ignored_when_default_or_not_offered() {
        let actor = rogue();
        assert_eq!(
            modifier_with_ability(&actor, RollCategory::Skill, Some("ste"), Some("dex")),
            10
        );
        assert_eq!(
            modifier_with_ability(&actor, RollCategory::Skill, Some("ste"), Some("cha")),
            6
        );
        assert_eq!(
            modifier_with_ability(&actor, RollCategory::SavingThrow, Some("dex"), Some("str")),
            7
        );
        assert_eq!(
            modifier_with_ability(&actor, RollCategory::Skill, Some("ste"), None),
            10
        );
    }

    #[test]
    fn actor_skill_ability_override_wins() {
        let mut actor = rogue();
        actor.skills.insert(
            "ath".to_string(),
            ProficiencyEntry {
                total: Some(3),
                modifier: None,
                ability: Some("dex".to_string()),
            },
        );
        assert_eq!(
            default_ability_for(Some(&actor), RollCategory::Skill, "ath").as_deref(),
            Some("dex")
        );
    }
}

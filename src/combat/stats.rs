//! Effective stat resolution
//!
//! Folds level scaling, equipped rolls, gear passives, set bonuses and
//! persistent buffs into one snapshot. The snapshot is never cached: combat
//! resolves it fresh before every action.

use super::status::StatusKind;
use crate::data::Catalog;
use crate::game::CharacterState;
use crate::items::{set_bonuses, ActiveSet, BonusBlock, EquipSlot, InstanceId, ItemCategory, LoadoutSlot};

/// Upper bound on crit chance, percent
pub const CRIT_CAP: i32 = 75;
/// Upper bound on lifesteal, percent
pub const LIFESTEAL_CAP: i32 = 40;

/// Resolved combat statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveStats {
    pub hp_max: i32,
    pub en_max: i32,
    pub atk: i32,
    pub def: i32,
    /// Crit chance, percent (0..=75)
    pub crit: i32,
    /// Lifesteal, percent (0..=40)
    pub lifesteal: i32,
    /// Auxiliary bonuses (regen, reduction, flee, skill modifiers)
    pub bonus: BonusBlock,
    pub active_sets: Vec<ActiveSet>,
    /// Body piece halves the first hit of each battle
    pub first_hit_guard: bool,
    /// A weapon sits in the off hand
    pub dual_wield: bool,
    /// Equipped instances whose template could not be found
    pub unresolved: Vec<InstanceId>,
}

/// Resolve effective stats for a character. Pure; missing templates are
/// skipped and reported in `unresolved`.
pub fn resolve_stats(character: &CharacterState, catalog: &Catalog) -> EffectiveStats {
    let level_steps = character.level.saturating_sub(1) as i32;
    let base = &character.base;

    let mut acc = BonusBlock::default();
    let mut set_ids: Vec<&str> = Vec::new();
    let mut first_hit_guard = false;
    let mut dual_wield = false;
    let mut unresolved = Vec::new();

    for (slot, id) in character.loadout.equipped() {
        let Some(instance) = character.inventory.get(id) else {
            log::warn!("{} slot references item #{} which is not in the inventory", slot, id);
            unresolved.push(id);
            continue;
        };
        let Some(gear) = catalog
            .items
            .find(instance.category, &instance.template_id)
            .and_then(|t| t.gear())
        else {
            log::warn!(
                "Equipped {} '{}' (#{}) has no gear template; skipping",
                instance.category.name(),
                instance.template_id,
                id
            );
            unresolved.push(id);
            continue;
        };

        acc.add_stats(instance.roll.as_ref().unwrap_or(&gear.stats));
        acc += gear.bonus;
        if let Some(set) = &gear.set {
            set_ids.push(set.as_str());
        }
        match slot {
            LoadoutSlot::Gear(EquipSlot::Body) if gear.first_hit_guard => first_hit_guard = true,
            LoadoutSlot::OffHand if instance.category == ItemCategory::Weapon => dual_wield = true,
            _ => {}
        }
    }

    let (set_bonus, active_sets) = set_bonuses(set_ids, &catalog.sets);
    acc += set_bonus;

    let buffs = &character.buffs;
    acc.atk += buffs.total(StatusKind::AttackUp);
    acc.def += buffs.total(StatusKind::DefenseUp);
    acc.crit += buffs.total(StatusKind::CritUp);

    EffectiveStats {
        hp_max: (base.hp_max + level_steps * 10 + acc.hp).max(0),
        en_max: (base.en_max + level_steps * 5 + acc.en).max(0),
        atk: (base.atk + level_steps * 2 + acc.atk).max(0),
        def: (base.def + level_steps * 11 / 10 + acc.def).max(0),
        crit: (base.crit + acc.crit).clamp(0, CRIT_CAP),
        lifesteal: (base.lifesteal + acc.lifesteal).clamp(0, LIFESTEAL_CAP),
        bonus: acc,
        active_sets,
        first_hit_guard,
        dual_wield,
        unresolved,
    }
}

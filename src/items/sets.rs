//! Set bonuses and the auxiliary bonus block
//!
//! Equipping several pieces that share a set id unlocks the set's 2-piece and
//! 4-piece bonus blocks. Blocks add key-wise onto the resolved stats.

use std::collections::BTreeMap;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use super::item::StatLine;
use crate::data::SetDefs;

/// Flat and percentage bonuses granted by gear passives and sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusBlock {
    pub hp: i32,
    pub en: i32,
    pub atk: i32,
    pub def: i32,
    /// Crit chance, percent
    pub crit: i32,
    /// Lifesteal, percent
    pub lifesteal: i32,
    /// Health restored after each player action
    pub regen_hp: i32,
    /// Energy restored after each player action
    pub regen_en: i32,
    /// Incoming damage reduction, percent
    pub damage_reduce: i32,
    /// Flee chance bonus, percent
    pub flee: i32,
    pub skill_cost_reduce: i32,
    pub skill_damage_pct: i32,
    pub crit_damage_pct: i32,
}

impl BonusBlock {
    /// Fold a rolled or base stat line into the block
    pub fn add_stats(&mut self, stats: &StatLine) {
        self.hp += stats.health;
        self.en += stats.energy;
        self.atk += stats.attack;
        self.def += stats.defense;
        self.crit += stats.crit;
        self.lifesteal += stats.lifesteal;
    }

    pub fn is_empty(&self) -> bool {
        *self == BonusBlock::default()
    }
}

impl AddAssign for BonusBlock {
    fn add_assign(&mut self, rhs: Self) {
        self.hp += rhs.hp;
        self.en += rhs.en;
        self.atk += rhs.atk;
        self.def += rhs.def;
        self.crit += rhs.crit;
        self.lifesteal += rhs.lifesteal;
        self.regen_hp += rhs.regen_hp;
        self.regen_en += rhs.regen_en;
        self.damage_reduce += rhs.damage_reduce;
        self.flee += rhs.flee;
        self.skill_cost_reduce += rhs.skill_cost_reduce;
        self.skill_damage_pct += rhs.skill_damage_pct;
        self.crit_damage_pct += rhs.crit_damage_pct;
    }
}

/// A set with enough pieces equipped to grant at least its 2-piece bonus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSet {
    pub id: String,
    pub name: String,
    pub pieces: u32,
}

/// Count equipped pieces per set id
pub fn count_sets<'a>(set_ids: impl IntoIterator<Item = &'a str>) -> BTreeMap<&'a str, u32> {
    let mut counts = BTreeMap::new();
    for id in set_ids {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

/// Sum the bonus blocks unlocked by the equipped set pieces.
///
/// Unknown set ids contribute nothing.
pub fn set_bonuses<'a>(
    set_ids: impl IntoIterator<Item = &'a str>,
    defs: &SetDefs,
) -> (BonusBlock, Vec<ActiveSet>) {
    let mut total = BonusBlock::default();
    let mut active = Vec::new();

    for (id, pieces) in count_sets(set_ids) {
        let Some(def) = defs.find(id) else {
            continue;
        };
        if pieces >= 2 {
            total += def.two_piece;
        }
        if pieces >= 4 {
            total += def.four_piece;
        }
        if pieces >= 2 {
            active.push(ActiveSet {
                id: id.to_string(),
                name: def.name.clone(),
                pieces,
            });
        }
    }

    (total, active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sets::default_set_defs;

    #[test]
    fn test_single_piece_grants_nothing() {
        let (bonus, active) = set_bonuses(["vanguard"], &default_set_defs());
        assert!(bonus.is_empty());
        assert!(active.is_empty());
    }

    #[test]
    fn test_two_piece_bonus() {
        let (bonus, active) = set_bonuses(["vanguard", "tempest", "vanguard"], &default_set_defs());
        assert_eq!(bonus.def, 2);
        assert_eq!(bonus.hp, 10);
        assert_eq!(bonus.atk, 0);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].pieces, 2);
    }

    #[test]
    fn test_four_piece_stacks_on_two_piece() {
        let (bonus, active) = set_bonuses(["tempest"; 5], &default_set_defs());
        assert_eq!(bonus.crit, 5);
        assert_eq!(bonus.regen_en, 1);
        assert_eq!(bonus.skill_damage_pct, 20);
        assert_eq!(bonus.flee, 10);
        assert_eq!(active[0].pieces, 5);
    }

    #[test]
    fn test_unknown_set_is_ignored() {
        let (bonus, active) = set_bonuses(["nope", "nope"], &default_set_defs());
        assert!(bonus.is_empty());
        assert!(active.is_empty());
    }

    #[test]
    fn test_add_stats() {
        let mut block = BonusBlock::default();
        block.add_stats(&StatLine { attack: 3, health: 5, lifesteal: 2, ..StatLine::default() });
        assert_eq!(block.atk, 3);
        assert_eq!(block.hp, 5);
        assert_eq!(block.lifesteal, 2);
    }
}

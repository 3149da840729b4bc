//! Set bonus definitions
//!
//! Maps a set id to the bonus blocks unlocked at 2 and 4 equipped pieces.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::items::BonusBlock;

/// Bonuses granted by one item set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetBonus {
    /// Display name of the set
    pub name: String,
    /// Bonus with 2 pieces equipped
    #[serde(default)]
    pub two_piece: BonusBlock,
    /// Bonus with 4 pieces equipped (stacks on the 2-piece block)
    #[serde(default)]
    pub four_piece: BonusBlock,
    #[serde(default)]
    pub two_piece_text: String,
    #[serde(default)]
    pub four_piece_text: String,
}

/// Collection of set definitions keyed by set id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetDefs {
    pub sets: BTreeMap<String, SetBonus>,
}

impl SetDefs {
    pub fn find(&self, id: &str) -> Option<&SetBonus> {
        self.sets.get(id)
    }
}

/// Create default set definitions (hardcoded fallback)
pub fn default_set_defs() -> SetDefs {
    let mut sets = BTreeMap::new();
    sets.insert(
        "vanguard".to_string(),
        SetBonus {
            name: "Vanguard Frame".to_string(),
            two_piece: BonusBlock { def: 2, hp: 10, ..BonusBlock::default() },
            four_piece: BonusBlock { atk: 3, damage_reduce: 10, regen_hp: 2, ..BonusBlock::default() },
            two_piece_text: "+2 defense, +10 health".to_string(),
            four_piece_text: "+3 attack, 10% less damage taken, +2 health per action".to_string(),
        },
    );
    sets.insert(
        "tempest".to_string(),
        SetBonus {
            name: "Tempest Rig".to_string(),
            two_piece: BonusBlock { crit: 5, regen_en: 1, ..BonusBlock::default() },
            four_piece: BonusBlock {
                skill_damage_pct: 20,
                crit_damage_pct: 25,
                flee: 10,
                ..BonusBlock::default()
            },
            two_piece_text: "+5% crit, +1 energy per action".to_string(),
            four_piece_text: "+20% skill damage, +25% crit damage, +10% flee".to_string(),
        },
    );
    SetDefs { sets }
}

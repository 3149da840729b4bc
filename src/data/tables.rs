//! Floor-indexed shop tables, drop tuning and world limits

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::items::{ItemCategory, Rarity};

/// Weighted rarity table. Weights need not sum to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityWeights(pub Vec<(Rarity, u32)>);

impl RarityWeights {
    pub fn total(&self) -> u32 {
        self.0.iter().map(|(_, w)| *w).sum()
    }
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self(vec![(Rarity::Common, 70), (Rarity::Elite, 25), (Rarity::Legendary, 5)])
    }
}

/// Template ids stocked by the shop on one floor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopStock {
    pub weapons: Vec<String>,
    pub equipment: Vec<String>,
    pub consumables: Vec<String>,
}

impl ShopStock {
    pub fn ids(&self, category: ItemCategory) -> &[String] {
        match category {
            ItemCategory::Weapon => &self.weapons,
            ItemCategory::Equipment => &self.equipment,
            ItemCategory::Consumable => &self.consumables,
        }
    }
}

/// Number of offers per category in every shop refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopLayout {
    pub weapons: usize,
    pub equipment: usize,
    pub consumables: usize,
}

impl Default for ShopLayout {
    fn default() -> Self {
        Self { weapons: 2, equipment: 2, consumables: 2 }
    }
}

impl ShopLayout {
    /// Categories in offer order, repeated per slot
    pub fn slots(&self) -> Vec<ItemCategory> {
        let mut slots = Vec::with_capacity(self.weapons + self.equipment + self.consumables);
        slots.extend(std::iter::repeat(ItemCategory::Weapon).take(self.weapons));
        slots.extend(std::iter::repeat(ItemCategory::Equipment).take(self.equipment));
        slots.extend(std::iter::repeat(ItemCategory::Consumable).take(self.consumables));
        slots
    }
}

/// Shop configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopTable {
    #[serde(default)]
    pub layout: ShopLayout,
    /// Stock keyed by the first floor it applies to
    pub floors: BTreeMap<u32, ShopStock>,
}

impl ShopTable {
    /// Stock for a floor: the closest configured floor at or below it,
    /// otherwise the lowest configured floor
    pub fn stock_for(&self, floor: u32) -> Option<&ShopStock> {
        self.floors
            .range(..=floor)
            .next_back()
            .or_else(|| self.floors.iter().next())
            .map(|(_, stock)| stock)
    }
}

/// Progression limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Highest floor the unlock ceiling can reach
    pub max_floor: u32,
    /// Deepest depth exploration can reach on a floor
    pub max_depth: u32,
    /// Lines kept in a character's event log
    pub log_capacity: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { max_floor: 3, max_depth: 20, log_capacity: 60 }
    }
}

/// All tuning tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tables {
    #[serde(default)]
    pub rarity_weights: RarityWeights,
    pub shop: ShopTable,
    #[serde(default)]
    pub world: WorldConfig,
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Create default tables (hardcoded fallback)
pub fn default_tables() -> Tables {
    let mut floors = BTreeMap::new();
    floors.insert(
        1,
        ShopStock {
            weapons: ids(&["w_001", "w_002"]),
            equipment: ids(&["a_001", "a_002", "a_003", "a_004", "c_001"]),
            consumables: ids(&["p_001", "p_002"]),
        },
    );
    floors.insert(
        2,
        ShopStock {
            weapons: ids(&["w_001", "w_002", "w_003", "w_004"]),
            equipment: ids(&["a_002", "a_003", "a_004", "a_005", "a_006", "c_002"]),
            consumables: ids(&["p_001", "p_002", "p_003", "p_004"]),
        },
    );
    floors.insert(
        3,
        ShopStock {
            weapons: ids(&["w_003", "w_004", "w_005"]),
            equipment: ids(&["a_005", "a_006", "c_002", "c_003"]),
            consumables: ids(&["p_001", "p_003", "p_004", "p_005"]),
        },
    );

    Tables {
        rarity_weights: RarityWeights::default(),
        shop: ShopTable { layout: ShopLayout::default(), floors },
        world: WorldConfig::default(),
    }
}

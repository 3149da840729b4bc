//! Item templates for data-driven item creation
//!
//! These templates are loaded from RON/JSON files and used to materialize
//! item instances.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::combat::StatusKind;
use crate::items::{Attribute, BonusBlock, EquipSlot, ItemCategory, Rarity, StatLine};

/// Explicit inclusive roll range for one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRange {
    pub min: i32,
    pub max: i32,
}

/// Template for weapons and equipment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GearTemplate {
    /// Unique template ID for reference
    pub id: String,
    /// Display name
    pub name: String,
    pub rarity: Rarity,
    /// Fixed slot tag (equipment only)
    #[serde(default)]
    pub slot: Option<EquipSlot>,
    /// Base attribute values
    #[serde(default)]
    pub stats: StatLine,
    /// Per-attribute overrides of the rarity-derived roll range
    #[serde(default)]
    pub ranges: BTreeMap<Attribute, RollRange>,
    /// Set membership
    #[serde(default)]
    pub set: Option<String>,
    /// Passive ability description
    #[serde(default)]
    pub passive: String,
    /// Auxiliary bonuses granted while equipped
    #[serde(default)]
    pub bonus: BonusBlock,
    /// Halves the first hit taken each battle (body slot only)
    #[serde(default)]
    pub first_hit_guard: bool,
    #[serde(default)]
    pub price: u32,
}

impl GearTemplate {
    pub fn new(id: &str, name: &str, rarity: Rarity, price: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            rarity,
            slot: None,
            stats: StatLine::default(),
            ranges: BTreeMap::new(),
            set: None,
            passive: String::new(),
            bonus: BonusBlock::default(),
            first_hit_guard: false,
            price,
        }
    }

    pub fn with_slot(mut self, slot: EquipSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn with_stats(mut self, stats: StatLine) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_range(mut self, attribute: Attribute, min: i32, max: i32) -> Self {
        self.ranges.insert(attribute, RollRange { min, max });
        self
    }

    pub fn with_set(mut self, set: &str) -> Self {
        self.set = Some(set.to_string());
        self
    }

    pub fn with_passive(mut self, passive: &str, bonus: BonusBlock) -> Self {
        self.passive = passive.to_string();
        self.bonus = bonus;
        self
    }

    pub fn with_first_hit_guard(mut self) -> Self {
        self.first_hit_guard = true;
        self
    }

    /// Authored attributes (non-zero base or explicit range) are rolled; others stay zero
    pub fn rolls(&self, attribute: Attribute) -> bool {
        self.stats.get(attribute) != 0 || self.ranges.contains_key(&attribute)
    }
}

/// What a consumable does when used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsumableEffect {
    /// Restore health
    Heal(i32),
    /// Restore energy
    Energy(i32),
    /// Persistent buff lasting `turns` battles
    Buff { kind: StatusKind, value: i32, turns: u32 },
}

/// Template for consumables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumableTemplate {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub effect: ConsumableEffect,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: u32,
}

/// Borrowed view of any template, tagged by category
#[derive(Debug, Clone, Copy)]
pub enum TemplateRef<'a> {
    Weapon(&'a GearTemplate),
    Equipment(&'a GearTemplate),
    Consumable(&'a ConsumableTemplate),
}

impl<'a> TemplateRef<'a> {
    pub fn category(&self) -> ItemCategory {
        match self {
            TemplateRef::Weapon(_) => ItemCategory::Weapon,
            TemplateRef::Equipment(_) => ItemCategory::Equipment,
            TemplateRef::Consumable(_) => ItemCategory::Consumable,
        }
    }

    pub fn id(&self) -> &'a str {
        match self {
            TemplateRef::Weapon(t) | TemplateRef::Equipment(t) => &t.id,
            TemplateRef::Consumable(t) => &t.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            TemplateRef::Weapon(t) | TemplateRef::Equipment(t) => &t.name,
            TemplateRef::Consumable(t) => &t.name,
        }
    }

    pub fn rarity(&self) -> Rarity {
        match self {
            TemplateRef::Weapon(t) | TemplateRef::Equipment(t) => t.rarity,
            TemplateRef::Consumable(t) => t.rarity,
        }
    }

    pub fn price(&self) -> u32 {
        match self {
            TemplateRef::Weapon(t) | TemplateRef::Equipment(t) => t.price,
            TemplateRef::Consumable(t) => t.price,
        }
    }

    pub fn gear(&self) -> Option<&'a GearTemplate> {
        match self {
            TemplateRef::Weapon(t) | TemplateRef::Equipment(t) => Some(t),
            TemplateRef::Consumable(_) => None,
        }
    }
}

/// Collection of item templates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemTemplates {
    #[serde(default)]
    pub weapons: Vec<GearTemplate>,
    #[serde(default)]
    pub equipment: Vec<GearTemplate>,
    #[serde(default)]
    pub consumables: Vec<ConsumableTemplate>,
}

impl ItemTemplates {
    /// Find a template by category and ID
    pub fn find(&self, category: ItemCategory, id: &str) -> Option<TemplateRef<'_>> {
        match category {
            ItemCategory::Weapon => self.weapons.iter().find(|t| t.id == id).map(TemplateRef::Weapon),
            ItemCategory::Equipment => {
                self.equipment.iter().find(|t| t.id == id).map(TemplateRef::Equipment)
            }
            ItemCategory::Consumable => {
                self.consumables.iter().find(|t| t.id == id).map(TemplateRef::Consumable)
            }
        }
    }

    /// All templates of a category
    pub fn pool(&self, category: ItemCategory) -> Vec<TemplateRef<'_>> {
        match category {
            ItemCategory::Weapon => self.weapons.iter().map(TemplateRef::Weapon).collect(),
            ItemCategory::Equipment => self.equipment.iter().map(TemplateRef::Equipment).collect(),
            ItemCategory::Consumable => {
                self.consumables.iter().map(TemplateRef::Consumable).collect()
            }
        }
    }
}

/// Create default item templates (hardcoded fallback)
pub fn default_item_templates() -> ItemTemplates {
    ItemTemplates {
        weapons: vec![
            GearTemplate::new("w_001", "Pulse Rifle", Rarity::Common, 30)
                .with_stats(StatLine { attack: 4, crit: 2, ..StatLine::default() })
                .with_set("vanguard")
                .with_passive("Steady fire: reliable damage.", BonusBlock::default()),
            GearTemplate::new("w_002", "Arc Blade", Rarity::Common, 28)
                .with_stats(StatLine { attack: 3, crit: 4, ..StatLine::default() })
                .with_set("tempest")
                .with_passive("Charged edge: favours critical strikes.", BonusBlock::default()),
            GearTemplate::new("w_003", "Rail Lance", Rarity::Elite, 70)
                .with_stats(StatLine { attack: 7, crit: 3, ..StatLine::default() })
                .with_set("vanguard")
                .with_passive(
                    "Piercing shot: skills hit harder.",
                    BonusBlock { skill_damage_pct: 10, ..BonusBlock::default() },
                ),
            GearTemplate::new("w_004", "Leech Saw", Rarity::Elite, 75)
                .with_stats(StatLine { attack: 5, lifesteal: 5, ..StatLine::default() })
                .with_set("tempest")
                .with_passive("Siphon: repairs the frame on every hit.", BonusBlock::default()),
            GearTemplate::new("w_005", "Sunbreaker Cannon", Rarity::Legendary, 160)
                .with_stats(StatLine { attack: 11, crit: 6, lifesteal: 2, ..StatLine::default() })
                .with_range(Attribute::Attack, 9, 15)
                .with_passive(
                    "Solar flare: critical hits burn brighter.",
                    BonusBlock { crit_damage_pct: 15, ..BonusBlock::default() },
                ),
        ],
        equipment: vec![
            GearTemplate::new("a_001", "Scrap Plating", Rarity::Common, 30)
                .with_slot(EquipSlot::Body)
                .with_stats(StatLine { defense: 3, health: 10, ..StatLine::default() })
                .with_set("vanguard")
                .with_passive("Reactive layer: halves the first hit each battle.", BonusBlock::default())
                .with_first_hit_guard(),
            GearTemplate::new("a_002", "Servo Helm", Rarity::Common, 20)
                .with_slot(EquipSlot::Head)
                .with_stats(StatLine { defense: 1, health: 6, ..StatLine::default() }),
            GearTemplate::new("a_003", "Hydraulic Arms", Rarity::Common, 22)
                .with_slot(EquipSlot::Arms)
                .with_stats(StatLine { defense: 1, attack: 1, ..StatLine::default() })
                .with_set("tempest"),
            GearTemplate::new("a_004", "Strider Legs", Rarity::Common, 22)
                .with_slot(EquipSlot::Legs)
                .with_stats(StatLine { defense: 2, energy: 4, ..StatLine::default() })
                .with_passive(
                    "Quick step: easier retreats.",
                    BonusBlock { flee: 10, ..BonusBlock::default() },
                ),
            GearTemplate::new("a_005", "Ion Booster", Rarity::Elite, 60)
                .with_slot(EquipSlot::Booster)
                .with_stats(StatLine { energy: 8, crit: 2, ..StatLine::default() })
                .with_set("tempest")
                .with_passive(
                    "Ion trickle: +1 energy per action.",
                    BonusBlock { regen_en: 1, ..BonusBlock::default() },
                ),
            GearTemplate::new("a_006", "Bastion Carapace", Rarity::Elite, 90)
                .with_slot(EquipSlot::Body)
                .with_stats(StatLine { defense: 6, health: 20, ..StatLine::default() })
                .with_set("vanguard")
                .with_passive("Bulwark: halves the first hit each battle.", BonusBlock::default())
                .with_first_hit_guard(),
            GearTemplate::new("c_001", "Spark Core", Rarity::Common, 35)
                .with_slot(EquipSlot::Core)
                .with_stats(StatLine { attack: 1, defense: 1, health: 5, energy: 5, ..StatLine::default() })
                .with_set("vanguard")
                .with_passive(
                    "Self-repair: +1 health per action.",
                    BonusBlock { regen_hp: 1, ..BonusBlock::default() },
                ),
            GearTemplate::new("c_002", "Overclock Core", Rarity::Elite, 80)
                .with_slot(EquipSlot::Core)
                .with_stats(StatLine { attack: 3, energy: 6, crit: 2, ..StatLine::default() })
                .with_passive(
                    "Overclock: cheaper and stronger skills.",
                    BonusBlock { skill_cost_reduce: 1, skill_damage_pct: 10, ..BonusBlock::default() },
                ),
            GearTemplate::new("c_003", "Singularity Core", Rarity::Legendary, 180)
                .with_slot(EquipSlot::Core)
                .with_stats(StatLine { attack: 5, defense: 3, health: 15, energy: 10, ..StatLine::default() })
                .with_set("tempest")
                .with_passive(
                    "Event horizon: devastating critical hits.",
                    BonusBlock { crit_damage_pct: 20, ..BonusBlock::default() },
                ),
        ],
        consumables: vec![
            ConsumableTemplate {
                id: "p_001".to_string(),
                name: "Repair Kit".to_string(),
                rarity: Rarity::Common,
                effect: ConsumableEffect::Heal(25),
                description: "Restores 25 health.".to_string(),
                price: 12,
            },
            ConsumableTemplate {
                id: "p_002".to_string(),
                name: "Energy Cell".to_string(),
                rarity: Rarity::Common,
                effect: ConsumableEffect::Energy(15),
                description: "Restores 15 energy.".to_string(),
                price: 12,
            },
            ConsumableTemplate {
                id: "p_003".to_string(),
                name: "Targeting Chip".to_string(),
                rarity: Rarity::Elite,
                effect: ConsumableEffect::Buff { kind: StatusKind::CritUp, value: 10, turns: 3 },
                description: "+10% crit for 3 battles.".to_string(),
                price: 30,
            },
            ConsumableTemplate {
                id: "p_004".to_string(),
                name: "Armor Foam".to_string(),
                rarity: Rarity::Elite,
                effect: ConsumableEffect::Buff { kind: StatusKind::DefenseUp, value: 3, turns: 3 },
                description: "+3 defense for 3 battles.".to_string(),
                price: 28,
            },
            ConsumableTemplate {
                id: "p_005".to_string(),
                name: "Overcharge Serum".to_string(),
                rarity: Rarity::Legendary,
                effect: ConsumableEffect::Buff { kind: StatusKind::AttackUp, value: 5, turns: 3 },
                description: "+5 attack for 3 battles.".to_string(),
                price: 60,
            },
        ],
    }
}

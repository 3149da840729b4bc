//! Item definitions
//!
//! Core item types: rarities, categories, slots and rolled instances.

use std::fmt;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Unique id of an item instance owned by a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique id of a shop offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OfferId(pub u64);

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Item rarity tiers, ordered from weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Elite,
    Legendary,
}

impl Rarity {
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Elite => "Elite",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Rank used by salvage value and sorting (common = 1)
    pub fn rank(&self) -> u32 {
        match self {
            Rarity::Common => 1,
            Rarity::Elite => 2,
            Rarity::Legendary => 3,
        }
    }

    /// How far a roll may fall below / rise above the template base value
    pub fn roll_spread(&self) -> (i32, i32) {
        match self {
            Rarity::Common => (1, 2),
            Rarity::Elite => (2, 3),
            Rarity::Legendary => (3, 4),
        }
    }
}

/// Main item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemCategory {
    Weapon,
    Equipment,
    Consumable,
}

impl ItemCategory {
    pub fn name(&self) -> &'static str {
        match self {
            ItemCategory::Weapon => "Weapon",
            ItemCategory::Equipment => "Equipment",
            ItemCategory::Consumable => "Consumable",
        }
    }

    /// Weapons and equipment carry a roll; consumables do not
    pub fn is_gear(&self) -> bool {
        matches!(self, ItemCategory::Weapon | ItemCategory::Equipment)
    }

    /// Attributes rolled for this category, in draw order
    pub fn rollable_attributes(&self) -> &'static [Attribute] {
        match self {
            ItemCategory::Weapon => &[Attribute::Attack, Attribute::Crit, Attribute::Lifesteal],
            ItemCategory::Equipment => &[
                Attribute::Defense,
                Attribute::Health,
                Attribute::Energy,
                Attribute::Attack,
                Attribute::Crit,
                Attribute::Lifesteal,
            ],
            ItemCategory::Consumable => &[],
        }
    }
}

/// Fixed slot tag carried by equipment templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipSlot {
    Head,
    Body,
    Arms,
    Legs,
    Booster,
    Core,
}

impl EquipSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Head => "Head",
            EquipSlot::Body => "Body",
            EquipSlot::Arms => "Arms",
            EquipSlot::Legs => "Legs",
            EquipSlot::Booster => "Booster",
            EquipSlot::Core => "Core",
        }
    }
}

/// Named slots of a character's loadout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoadoutSlot {
    MainHand,
    OffHand,
    Gear(EquipSlot),
}

impl LoadoutSlot {
    /// All slots in display order
    pub fn all() -> &'static [LoadoutSlot] {
        &[
            LoadoutSlot::MainHand,
            LoadoutSlot::OffHand,
            LoadoutSlot::Gear(EquipSlot::Head),
            LoadoutSlot::Gear(EquipSlot::Body),
            LoadoutSlot::Gear(EquipSlot::Arms),
            LoadoutSlot::Gear(EquipSlot::Legs),
            LoadoutSlot::Gear(EquipSlot::Booster),
            LoadoutSlot::Gear(EquipSlot::Core),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            LoadoutSlot::MainHand => "Main Hand",
            LoadoutSlot::OffHand => "Off Hand",
            LoadoutSlot::Gear(slot) => slot.name(),
        }
    }

    pub fn is_weapon_slot(&self) -> bool {
        matches!(self, LoadoutSlot::MainHand | LoadoutSlot::OffHand)
    }
}

impl fmt::Display for LoadoutSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric attributes an item can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    Attack,
    Defense,
    Health,
    Energy,
    /// Critical hit chance, in percent
    Crit,
    /// Lifesteal, in percent
    Lifesteal,
}

/// One value per attribute. Missing fields deserialize as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatLine {
    pub attack: i32,
    pub defense: i32,
    pub health: i32,
    pub energy: i32,
    pub crit: i32,
    pub lifesteal: i32,
}

impl StatLine {
    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Attack => self.attack,
            Attribute::Defense => self.defense,
            Attribute::Health => self.health,
            Attribute::Energy => self.energy,
            Attribute::Crit => self.crit,
            Attribute::Lifesteal => self.lifesteal,
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: i32) {
        match attribute {
            Attribute::Attack => self.attack = value,
            Attribute::Defense => self.defense = value,
            Attribute::Health => self.health = value,
            Attribute::Energy => self.energy = value,
            Attribute::Crit => self.crit = value,
            Attribute::Lifesteal => self.lifesteal = value,
        }
    }
}

impl AddAssign for StatLine {
    fn add_assign(&mut self, rhs: Self) {
        self.attack += rhs.attack;
        self.defense += rhs.defense;
        self.health += rhs.health;
        self.energy += rhs.energy;
        self.crit += rhs.crit;
        self.lifesteal += rhs.lifesteal;
    }
}

/// A concrete item owned by a character.
///
/// Gear carries the roll drawn at acquisition time; it is never re-rolled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInstance {
    pub id: InstanceId,
    pub category: ItemCategory,
    pub template_id: String,
    /// Rolled attribute values (gear only)
    #[serde(default)]
    pub roll: Option<StatLine>,
    /// Rating derived from the roll, 1..=99 (gear only)
    #[serde(default)]
    pub rating: Option<u8>,
}

impl ItemInstance {
    /// An instance with no roll (consumables, or legacy gear)
    pub fn unrolled(id: InstanceId, category: ItemCategory, template_id: impl Into<String>) -> Self {
        Self {
            id,
            category,
            template_id: template_id.into(),
            roll: None,
            rating: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Elite);
        assert!(Rarity::Elite < Rarity::Legendary);
        assert_eq!(Rarity::Legendary.roll_spread(), (3, 4));
    }

    #[test]
    fn test_stat_line_accessors() {
        let mut line = StatLine::default();
        line.set(Attribute::Crit, 7);
        assert_eq!(line.get(Attribute::Crit), 7);
        line += StatLine { crit: 3, attack: 2, ..StatLine::default() };
        assert_eq!(line.crit, 10);
        assert_eq!(line.attack, 2);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let line: StatLine = serde_json::from_str(r#"{"attack": 4}"#).unwrap();
        assert_eq!(line.attack, 4);
        assert_eq!(line.lifesteal, 0);
    }

    #[test]
    fn test_weapon_slots() {
        assert!(LoadoutSlot::OffHand.is_weapon_slot());
        assert!(!LoadoutSlot::Gear(EquipSlot::Core).is_weapon_slot());
        assert_eq!(LoadoutSlot::all().len(), 8);
    }
}

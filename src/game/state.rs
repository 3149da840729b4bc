//! Character state
//!
//! The mutable root every engine command operates on. It is plain data: the
//! caller owns persistence and hands the state back in for the next command.

use serde::{Deserialize, Serialize};

use super::log::{EventLog, MessageCategory};
use crate::combat::{resolve_stats, Area, CombatSession, StatusList};
use crate::data::Catalog;
use crate::dice::Dice;
use crate::items::loot::next_instance_id;
use crate::items::{
    generate_instance, reroll_shop_offers, EquipSlot, InstanceId, Inventory, ItemCategory, ItemInstance, Loadout,
    LoadoutSlot, Offer,
};

/// Gold a new character starts with
pub const STARTING_GOLD: u32 = 60;

/// Gear granted and equipped on a new character
const STARTER_GEAR: [(LoadoutSlot, ItemCategory, &str); 4] = [
    (LoadoutSlot::MainHand, ItemCategory::Weapon, "w_001"),
    (LoadoutSlot::OffHand, ItemCategory::Weapon, "w_002"),
    (LoadoutSlot::Gear(EquipSlot::Body), ItemCategory::Equipment, "a_001"),
    (LoadoutSlot::Gear(EquipSlot::Core), ItemCategory::Equipment, "c_001"),
];

/// Consumables granted on a new character
const STARTER_CONSUMABLES: [&str; 1] = ["p_001"];

/// Flat attribute floor before level scaling and equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseAttributes {
    pub hp_max: i32,
    pub en_max: i32,
    pub atk: i32,
    pub def: i32,
    /// Crit chance, percent
    pub crit: i32,
    /// Lifesteal, percent
    pub lifesteal: i32,
}

impl Default for BaseAttributes {
    fn default() -> Self {
        Self {
            hp_max: 60,
            en_max: 30,
            atk: 6,
            def: 2,
            crit: 3,
            lifesteal: 0,
        }
    }
}

/// Everything that persists about a character between commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    pub level: u32,
    pub xp: u32,
    pub gold: u32,
    pub hp: i32,
    pub en: i32,
    pub base: BaseAttributes,
    /// Persistent buffs, counted down once per finished battle
    pub buffs: StatusList,
    pub inventory: Inventory,
    pub loadout: Loadout,
    pub area: Area,
    pub shop: Vec<Offer>,
    /// Present only while a battle is active
    pub battle: Option<CombatSession>,
    pub log: EventLog,
    pub(crate) next_instance_id: u64,
    pub(crate) next_offer_id: u64,
    /// Bumped each time a battle starts
    #[serde(default)]
    pub(crate) battle_serial: u64,
}

impl Default for CharacterState {
    fn default() -> Self {
        let base = BaseAttributes::default();
        Self {
            level: 1,
            xp: 0,
            gold: STARTING_GOLD,
            hp: base.hp_max,
            en: base.en_max,
            base,
            buffs: StatusList::default(),
            inventory: Inventory::new(),
            loadout: Loadout::new(),
            area: Area::default(),
            shop: Vec::new(),
            battle: None,
            log: EventLog::default(),
            next_instance_id: 0,
            next_offer_id: 0,
            battle_serial: 0,
        }
    }
}

impl CharacterState {
    /// A fresh character with starter gear equipped, full health and energy,
    /// and an initial shop for floor 1
    pub fn new_character(catalog: &Catalog, dice: &mut impl Dice) -> Self {
        let mut character = Self {
            log: EventLog::with_capacity(catalog.tables.world.log_capacity),
            ..Self::default()
        };

        for (slot, category, template_id) in STARTER_GEAR {
            match catalog.items.find(category, template_id) {
                Some(template) => {
                    let id = character.alloc_instance_id();
                    character.inventory.add(generate_instance(id, template, dice));
                    character.loadout.equip(slot, id);
                }
                None => log::warn!("Starter {} '{}' missing from catalog", category.name(), template_id),
            }
        }
        for template_id in STARTER_CONSUMABLES {
            match catalog.items.find(ItemCategory::Consumable, template_id) {
                Some(template) => {
                    let id = character.alloc_instance_id();
                    character.inventory.add(generate_instance(id, template, dice));
                }
                None => log::warn!("Starter consumable '{}' missing from catalog", template_id),
            }
        }

        let stats = resolve_stats(&character, catalog);
        character.hp = stats.hp_max;
        character.en = stats.en_max;

        character.shop = reroll_shop_offers(
            catalog,
            character.area.floor,
            &mut character.next_offer_id,
            &mut character.next_instance_id,
            dice,
        );
        character.log.push("A new frame rolls out of the scrapyard.", MessageCategory::System);
        character
    }

    pub fn in_battle(&self) -> bool {
        self.battle.is_some()
    }

    /// Identifies the most recently started battle
    pub fn battle_serial(&self) -> u64 {
        self.battle_serial
    }

    pub(crate) fn alloc_instance_id(&mut self) -> InstanceId {
        next_instance_id(&mut self.next_instance_id)
    }

    /// Remove an instance from the inventory, clearing any slot that
    /// references it
    pub fn remove_item(&mut self, id: InstanceId) -> Option<ItemInstance> {
        let item = self.inventory.remove(id)?;
        self.loadout.clear_instance(id);
        Some(item)
    }

    /// Check that every loadout slot points at an owned instance
    pub fn loadout_is_consistent(&self) -> bool {
        self.loadout.equipped().all(|(_, id)| self.inventory.contains(id))
    }
}

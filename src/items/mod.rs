//! Item system

pub mod item;
pub mod inventory;
pub mod equipment;
pub mod generation;
pub mod sets;
pub mod loot;

pub use item::{Attribute, EquipSlot, InstanceId, ItemCategory, ItemInstance, LoadoutSlot, OfferId, Rarity, StatLine};
pub use inventory::Inventory;
pub use equipment::Loadout;
pub use generation::{generate_instance, rating, roll_range};
pub use sets::{set_bonuses, ActiveSet, BonusBlock};
pub use loot::{markup_price, pick_weighted, reroll_shop_offers, roll_drops, roll_rarity, Offer};

//! Error types
//!
//! Invalid player commands, data integrity problems and catalog loading failures.

use std::path::PathBuf;

use crate::items::{EquipSlot, InstanceId, ItemCategory, LoadoutSlot, OfferId};

/// A command the current state cannot accept.
///
/// Rejections never mutate the character beyond a single refusal line in the
/// event log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAction {
    #[error("no battle is in progress")]
    NoActiveBattle,
    #[error("a battle is already in progress")]
    BattleInProgress,
    #[error("not enough energy for {skill} (needs {needed}, have {available})")]
    NotEnoughEnergy {
        skill: String,
        needed: i32,
        available: i32,
    },
    #[error("unknown skill '{0}'")]
    UnknownSkill(String),
    #[error("item #{0} is not in the inventory")]
    UnknownInstance(InstanceId),
    #[error("shop offer #{0} does not exist")]
    UnknownOffer(OfferId),
    #[error("cannot put a {category:?} item into the {slot} slot")]
    IncompatibleSlot {
        slot: LoadoutSlot,
        category: ItemCategory,
    },
    #[error("item belongs in the {expected:?} slot, not {slot}")]
    WrongEquipmentSlot {
        slot: LoadoutSlot,
        expected: EquipSlot,
    },
    #[error("the {0} slot is already empty")]
    SlotEmpty(LoadoutSlot),
    #[error("item #{0} is not a consumable")]
    NotConsumable(InstanceId),
    #[error("not enough gold (price {price}, have {gold})")]
    InsufficientGold { price: u32, gold: u32 },
    #[error("floor {requested} is locked (unlocked up to {unlocked})")]
    FloorLocked { requested: u32, unlocked: u32 },
}

/// Errors surfaced by engine commands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("data integrity: {0}")]
    DataIntegrity(String),
}

/// Failures while loading or validating catalog data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("failed to serialize {what}: {message}")]
    Serialize { what: &'static str, message: String },
    #[error("invalid catalog: {0}")]
    Invalid(String),
}

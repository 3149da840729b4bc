//! Data loading and external game content
//!
//! This module handles loading the read-only catalog from external RON or
//! JSON files, allowing for data-driven content and easy modding.

pub mod items;
pub mod loader;
pub mod monsters;
pub mod sets;
pub mod tables;

pub use items::{ConsumableEffect, ConsumableTemplate, GearTemplate, ItemTemplates, RollRange, TemplateRef};
pub use loader::{export_default_data, Catalog, DEFAULT_DATA_DIR};
pub use monsters::{DrainRider, DropChances, MonsterTemplate, MonsterTemplates, Role};
pub use sets::{SetBonus, SetDefs};
pub use tables::{RarityWeights, ShopLayout, ShopStock, ShopTable, Tables, WorldConfig};

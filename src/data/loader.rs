//! RON / JSON catalog loader
//!
//! Loads game content from a data directory, with fallback to hardcoded
//! defaults for any file that is missing or fails to parse.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::items::{default_item_templates, ItemTemplates};
use super::monsters::{default_monster_templates, MonsterTemplates};
use super::sets::{default_set_defs, SetDefs};
use super::tables::{default_tables, Tables};
use crate::combat::skills::{default_skills, SkillBook};
use crate::error::CatalogError;
use crate::items::{ItemCategory, LoadoutSlot};

/// Default location of the data files
pub const DEFAULT_DATA_DIR: &str = "assets/data";

/// Read-only reference data consumed by the engine
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Item templates
    pub items: ItemTemplates,
    /// Monster templates
    pub monsters: MonsterTemplates,
    /// Set bonus definitions
    pub sets: SetDefs,
    /// Rarity weights, shop stock and world limits
    pub tables: Tables,
    /// Skill definitions
    pub skills: SkillBook,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            items: default_item_templates(),
            monsters: default_monster_templates(),
            sets: default_set_defs(),
            tables: default_tables(),
            skills: default_skills(),
        }
    }
}

impl Catalog {
    /// Load every catalog file from `dir`. Each file is optional; missing or
    /// unreadable files fall back to the built-in defaults with a warning.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            items: load_or_default(dir, "items", default_item_templates),
            monsters: load_or_default(dir, "monsters", default_monster_templates),
            sets: load_or_default(dir, "sets", default_set_defs),
            tables: load_or_default(dir, "tables", default_tables),
            skills: load_or_default(dir, "skills", default_skills),
        }
    }

    /// Load every catalog file from `dir`, failing on the first file that is
    /// present but cannot be read or parsed
    pub fn try_load_from_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        Ok(Self {
            items: load_file(dir, "items")?.unwrap_or_else(default_item_templates),
            monsters: load_file(dir, "monsters")?.unwrap_or_else(default_monster_templates),
            sets: load_file(dir, "sets")?.unwrap_or_else(default_set_defs),
            tables: load_file(dir, "tables")?.unwrap_or_else(default_tables),
            skills: load_file(dir, "skills")?.unwrap_or_else(default_skills),
        })
    }

    /// Check referential integrity: unique template ids, slot tags on
    /// equipment, known set ids, resolvable shop stock and a usable roster
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = BTreeSet::new();
        for category in [ItemCategory::Weapon, ItemCategory::Equipment, ItemCategory::Consumable] {
            for template in self.items.pool(category) {
                if !seen.insert(template.id()) {
                    return Err(CatalogError::Invalid(format!("duplicate item id '{}'", template.id())));
                }
                if let Some(gear) = template.gear() {
                    if category == ItemCategory::Equipment && gear.slot.is_none() {
                        return Err(CatalogError::Invalid(format!(
                            "equipment '{}' has no slot",
                            gear.id
                        )));
                    }
                    if let Some(set) = &gear.set {
                        if self.sets.find(set).is_none() {
                            return Err(CatalogError::Invalid(format!(
                                "item '{}' references unknown set '{}'",
                                gear.id, set
                            )));
                        }
                    }
                    for (attribute, range) in &gear.ranges {
                        if range.min > range.max {
                            return Err(CatalogError::Invalid(format!(
                                "item '{}' has an inverted {:?} range",
                                gear.id, attribute
                            )));
                        }
                    }
                }
            }
        }

        for (floor, stock) in &self.tables.shop.floors {
            for category in [ItemCategory::Weapon, ItemCategory::Equipment, ItemCategory::Consumable] {
                for id in stock.ids(category) {
                    if self.items.find(category, id).is_none() {
                        return Err(CatalogError::Invalid(format!(
                            "shop floor {} stocks unknown {} '{}'",
                            floor,
                            category.name(),
                            id
                        )));
                    }
                }
            }
        }

        if self.monsters.templates.is_empty() {
            return Err(CatalogError::Invalid("monster roster is empty".to_string()));
        }
        if self.skills.skills.is_empty() {
            return Err(CatalogError::Invalid("no skills defined".to_string()));
        }
        if self.tables.world.max_floor == 0 || self.tables.world.max_depth == 0 {
            return Err(CatalogError::Invalid("world limits must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Slot tag check shared by equip validation
    pub fn fits_slot(&self, category: ItemCategory, template_id: &str, slot: LoadoutSlot) -> bool {
        match (category, slot) {
            (ItemCategory::Weapon, _) => slot.is_weapon_slot(),
            (ItemCategory::Equipment, LoadoutSlot::Gear(gear_slot)) => self
                .items
                .find(category, template_id)
                .and_then(|t| t.gear())
                .and_then(|g| g.slot)
                == Some(gear_slot),
            _ => false,
        }
    }
}

/// Read `<dir>/<stem>.ron` or `<dir>/<stem>.json`. Returns `Ok(None)` when
/// neither exists.
fn load_file<T: DeserializeOwned>(dir: &Path, stem: &str) -> Result<Option<T>, CatalogError> {
    let ron_path = dir.join(format!("{}.ron", stem));
    let json_path = dir.join(format!("{}.json", stem));

    let (path, is_ron) = if ron_path.exists() {
        (ron_path, true)
    } else if json_path.exists() {
        (json_path, false)
    } else {
        return Ok(None);
    };

    let content = fs::read_to_string(&path).map_err(|source| CatalogError::Io {
        path: path.clone(),
        source,
    })?;

    let parsed = if is_ron {
        ron::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map(Some).map_err(|message| CatalogError::Parse { path, message })
}

fn load_or_default<T: DeserializeOwned>(dir: &Path, stem: &str, fallback: fn() -> T) -> T {
    match load_file(dir, stem) {
        Ok(Some(value)) => {
            log::debug!("Loaded {} from {}", stem, dir.display());
            value
        }
        Ok(None) => fallback(),
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            fallback()
        }
    }
}

fn write_ron<T: Serialize>(dir: &Path, stem: &str, what: &'static str, value: &T) -> Result<(), CatalogError> {
    let content = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|e| CatalogError::Serialize { what, message: e.to_string() })?;
    let path = dir.join(format!("{}.ron", stem));
    fs::write(&path, content).map_err(|source| CatalogError::Io { path, source })
}

/// Export all default data to RON files for easy editing
pub fn export_default_data(dir: impl AsRef<Path>) -> Result<(), CatalogError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    write_ron(dir, "items", "items", &default_item_templates())?;
    write_ron(dir, "monsters", "monsters", &default_monster_templates())?;
    write_ron(dir, "sets", "sets", &default_set_defs())?;
    write_ron(dir, "tables", "tables", &default_tables())?;
    write_ron(dir, "skills", "skills", &default_skills())?;
    Ok(())
}

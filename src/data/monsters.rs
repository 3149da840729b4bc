//! Monster templates for data-driven encounters
//!
//! Monsters are tagged with the floors they appear on and scaled into a live
//! enemy at encounter time.

use serde::{Deserialize, Serialize};

/// Role tier of a monster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Normal,
    Elite,
    MiniBoss,
    Boss,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::Normal => "Normal",
            Role::Elite => "Elite",
            Role::MiniBoss => "Mini-boss",
            Role::Boss => "Boss",
        }
    }

    /// Encounter weight; bosses only appear once the area is deep enough
    pub fn encounter_weight(&self, depth: u32) -> u32 {
        match self {
            Role::Normal => 70,
            Role::Elite => 20,
            Role::MiniBoss => 7,
            Role::Boss if depth >= 3 => 3,
            Role::Boss => 0,
        }
    }
}

/// Per-category drop probabilities (0.0 - 1.0)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropChances {
    pub weapon: f64,
    pub equipment: f64,
    pub consumable: f64,
}

/// Attack rider that drains the player's energy over time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrainRider {
    /// Chance per landed hit
    pub chance: f64,
    /// Energy lost per turn
    pub amount: i32,
    pub turns: u32,
}

/// A template for creating enemies from external data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterTemplate {
    /// Unique template ID for reference
    pub id: String,
    /// Display name
    pub name: String,
    pub role: Role,
    pub level: u32,
    /// Floors this monster spawns on
    pub floors: Vec<u32>,
    #[serde(default)]
    pub hp: i32,
    #[serde(default)]
    pub atk: i32,
    #[serde(default)]
    pub def: i32,
    /// XP reward for killing
    #[serde(default)]
    pub xp: u32,
    /// Gold reward for killing
    #[serde(default)]
    pub gold: u32,
    #[serde(default)]
    pub drops: DropChances,
    #[serde(default)]
    pub drain: Option<DrainRider>,
}

/// Collection of monster templates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonsterTemplates {
    pub templates: Vec<MonsterTemplate>,
}

impl MonsterTemplates {
    /// Find a template by ID
    pub fn find(&self, id: &str) -> Option<&MonsterTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Get all monsters for a specific floor
    pub fn for_floor(&self, floor: u32) -> Vec<&MonsterTemplate> {
        self.templates.iter().filter(|t| t.floors.contains(&floor)).collect()
    }
}

fn monster(
    id: &str,
    name: &str,
    role: Role,
    level: u32,
    floors: &[u32],
    (hp, atk, def): (i32, i32, i32),
    (xp, gold): (u32, u32),
    drops: DropChances,
) -> MonsterTemplate {
    MonsterTemplate {
        id: id.to_string(),
        name: name.to_string(),
        role,
        level,
        floors: floors.to_vec(),
        hp,
        atk,
        def,
        xp,
        gold,
        drops,
        drain: None,
    }
}

const COMMON_DROPS: DropChances = DropChances { weapon: 0.08, equipment: 0.08, consumable: 0.20 };
const ELITE_DROPS: DropChances = DropChances { weapon: 0.18, equipment: 0.18, consumable: 0.30 };
const BOSS_DROPS: DropChances = DropChances { weapon: 0.50, equipment: 0.50, consumable: 0.60 };

/// Create default monster templates (hardcoded fallback)
pub fn default_monster_templates() -> MonsterTemplates {
    MonsterTemplates {
        templates: vec![
            // === SCRAPYARD (Floor 1) ===
            monster("m_scrap_drone", "Scrap Drone", Role::Normal, 1, &[1], (22, 5, 1), (10, 8), COMMON_DROPS),
            monster("m_rust_hound", "Rust Hound", Role::Normal, 1, &[1], (28, 6, 2), (12, 9), COMMON_DROPS),
            monster("m_sentry", "Sentry Turret", Role::Elite, 2, &[1], (40, 8, 4), (24, 20), ELITE_DROPS),
            monster("m_warlord", "Scav Warlord", Role::MiniBoss, 3, &[1], (60, 9, 5), (45, 40), ELITE_DROPS),
            monster("m_junk_titan", "Junk Titan", Role::Boss, 4, &[1], (110, 11, 6), (90, 90), BOSS_DROPS),

            // === STORM FOUNDRY (Floor 2) ===
            MonsterTemplate {
                drain: Some(DrainRider { chance: 0.30, amount: 2, turns: 3 }),
                ..monster("m_shock_crawler", "Shock Crawler", Role::Normal, 4, &[2], (45, 10, 4), (28, 18), COMMON_DROPS)
            },
            monster("m_plasma_wasp", "Plasma Wasp", Role::Normal, 4, &[2], (38, 12, 3), (26, 16), COMMON_DROPS),
            monster("m_siege_walker", "Siege Walker", Role::Elite, 5, &[2], (70, 13, 7), (50, 35), ELITE_DROPS),
            monster("m_hive_overseer", "Hive Overseer", Role::Boss, 7, &[2], (170, 16, 9), (150, 140), BOSS_DROPS),

            // === NULL RIFT (Floor 3) ===
            monster("m_null_reaver", "Null Reaver", Role::Normal, 7, &[3], (75, 17, 8), (55, 30), COMMON_DROPS),
            MonsterTemplate {
                drain: Some(DrainRider { chance: 0.40, amount: 3, turns: 3 }),
                ..monster("m_rift_wraith", "Rift Wraith", Role::MiniBoss, 8, &[3], (100, 19, 9), (80, 60), ELITE_DROPS)
            },
            monster("m_void_colossus", "Void Colossus", Role::Boss, 10, &[3], (260, 23, 12), (260, 240), BOSS_DROPS),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boss_weight_requires_depth() {
        assert_eq!(Role::Boss.encounter_weight(1), 0);
        assert_eq!(Role::Boss.encounter_weight(2), 0);
        assert_eq!(Role::Boss.encounter_weight(3), 3);
        assert_eq!(Role::Normal.encounter_weight(1), 70);
    }

    #[test]
    fn test_every_floor_has_a_boss() {
        let monsters = default_monster_templates();
        for floor in 1..=3 {
            assert!(monsters.for_floor(floor).iter().any(|m| m.role == Role::Boss));
        }
    }

    #[test]
    fn test_missing_optional_fields() {
        let ron_src = r#"(id: "m", name: "Husk", role: Normal, level: 1, floors: [1])"#;
        let template: MonsterTemplate = ron::from_str(ron_src).unwrap();
        assert_eq!(template.hp, 0);
        assert_eq!(template.drops, DropChances::default());
        assert!(template.drain.is_none());
    }
}

//! Encounter selection
//!
//! Picks a monster for the current area and scales it into a live enemy.

use serde::{Deserialize, Serialize};

use crate::data::{DrainRider, DropChances, MonsterTemplate, MonsterTemplates, Role};
use crate::dice::Dice;
use crate::items::loot::roll_weighted;

/// Position in the world: floor, unlocked ceiling and exploration depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub floor: u32,
    /// Highest floor the character may travel to
    pub unlocked: u32,
    pub depth: u32,
}

impl Default for Area {
    fn default() -> Self {
        Self { floor: 1, unlocked: 1, depth: 1 }
    }
}

impl Area {
    /// Back to the starting floor and depth; the unlock ceiling is kept
    pub fn reset(&mut self) {
        self.floor = 1;
        self.depth = 1;
    }
}

/// Depth multiplier applied to every scaled enemy value
pub fn depth_multiplier(depth: u32) -> f64 {
    1.0 + depth.saturating_sub(1) as f64 * 0.12
}

/// A monster scaled for one encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyInstance {
    pub template_id: String,
    pub name: String,
    pub role: Role,
    pub level: u32,
    pub atk: i32,
    pub def: i32,
    pub hp_max: i32,
    pub xp: u32,
    pub gold: u32,
    pub drops: DropChances,
    pub drain: Option<DrainRider>,
}

impl EnemyInstance {
    /// Clone a template, scaling health, attack, defense and rewards by depth
    pub fn scaled(template: &MonsterTemplate, depth: u32) -> Self {
        let m = depth_multiplier(depth);
        let scale_i = |v: i32| (v as f64 * m).floor() as i32;
        let scale_u = |v: u32| (v as f64 * m).floor() as u32;
        Self {
            template_id: template.id.clone(),
            name: template.name.clone(),
            role: template.role,
            level: template.level,
            atk: scale_i(template.atk).max(0),
            def: scale_i(template.def).max(0),
            hp_max: scale_i(template.hp).max(1),
            xp: scale_u(template.xp),
            gold: scale_u(template.gold),
            drops: template.drops,
            drain: template.drain,
        }
    }
}

/// Weighted pick of a monster for the area.
///
/// Candidates are the monsters tagged with the current floor (or the whole
/// roster if none are). Role weights decide the pick; when every candidate
/// weighs zero the pick is uniform over the floor pool. Returns `None` only
/// for an empty roster.
pub fn select_monster<'a>(
    monsters: &'a MonsterTemplates,
    area: &Area,
    dice: &mut impl Dice,
) -> Option<&'a MonsterTemplate> {
    let mut pool = monsters.for_floor(area.floor);
    if pool.is_empty() {
        log::debug!("No monsters tagged for floor {}, using whole roster", area.floor);
        pool = monsters.templates.iter().collect();
    }
    if pool.is_empty() {
        return None;
    }

    let bag: Vec<(usize, u32)> = pool
        .iter()
        .enumerate()
        .map(|(i, m)| (i, m.role.encounter_weight(area.depth)))
        .filter(|(_, w)| *w > 0)
        .collect();

    let index = if bag.is_empty() {
        dice.index(pool.len())
    } else {
        roll_weighted(&bag, dice).unwrap_or(0)
    };
    pool.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::monsters::default_monster_templates;
    use crate::dice::scripted::ScriptedDice;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_no_boss_before_depth_three() {
        let monsters = default_monster_templates();
        let shallow = Area { floor: 1, unlocked: 1, depth: 2 };
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let picked = select_monster(&monsters, &shallow, &mut rng).unwrap();
            assert_ne!(picked.role, Role::Boss);
            assert!(picked.floors.contains(&1));
        }
    }

    #[test]
    fn test_boss_reachable_at_depth() {
        let monsters = default_monster_templates();
        let deep = Area { floor: 1, unlocked: 1, depth: 3 };
        // Floor 1 weights: 70 + 70 + 20 + 7 + 3 = 170; the top of the range is the boss
        let mut dice = ScriptedDice::new().with_units(&[0.999]);
        let picked = select_monster(&monsters, &deep, &mut dice).unwrap();
        assert_eq!(picked.role, Role::Boss);
    }

    #[test]
    fn test_unknown_floor_uses_whole_roster() {
        let monsters = default_monster_templates();
        let area = Area { floor: 42, unlocked: 42, depth: 1 };
        let mut dice = ScriptedDice::new().with_units(&[0.0]);
        assert!(select_monster(&monsters, &area, &mut dice).is_some());
    }

    #[test]
    fn test_only_zero_weight_candidates_pick_uniformly() {
        let mut monsters = default_monster_templates();
        monsters.templates.retain(|m| m.role == Role::Boss);
        let area = Area { floor: 2, unlocked: 2, depth: 1 };
        let mut dice = ScriptedDice::new();
        let picked = select_monster(&monsters, &area, &mut dice).unwrap();
        assert_eq!(picked.id, "m_hive_overseer");
    }

    #[test]
    fn test_empty_roster() {
        let monsters = MonsterTemplates::default();
        let mut dice = ScriptedDice::new();
        assert!(select_monster(&monsters, &Area::default(), &mut dice).is_none());
    }

    #[test]
    fn test_depth_scaling() {
        let monsters = default_monster_templates();
        let hound = monsters.find("m_rust_hound").unwrap();
        let base = EnemyInstance::scaled(hound, 1);
        assert_eq!(base.hp_max, 28);
        assert_eq!(base.atk, 6);

        // depth 6: x1.6
        let deep = EnemyInstance::scaled(hound, 6);
        assert_eq!(deep.hp_max, 44);
        assert_eq!(deep.atk, 9);
        assert_eq!(deep.def, 3);
        assert_eq!(deep.xp, 19);
        assert_eq!(deep.gold, 14);
    }
}

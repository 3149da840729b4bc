//! Combat session
//!
//! State of one battle. A session exists only while the battle is active; the
//! character holds `None` when idle.

use serde::{Deserialize, Serialize};

use super::encounter::EnemyInstance;
use super::status::StatusList;

/// How a battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Fled,
}

impl BattleOutcome {
    pub fn name(&self) -> &'static str {
        match self {
            BattleOutcome::Victory => "Victory",
            BattleOutcome::Defeat => "Defeat",
            BattleOutcome::Fled => "Fled",
        }
    }
}

/// One active battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatSession {
    pub enemy: EnemyInstance,
    pub enemy_hp: i32,
    /// Starts at 1 and advances after each enemy turn
    pub turn: u32,
    /// Per-battle effects on the player (guard, surcharge, drain)
    pub player_effects: StatusList,
    /// Per-battle effects on the enemy (bleed)
    pub enemy_effects: StatusList,
    /// First-hit mitigation has not been used yet
    pub first_hit_available: bool,
}

impl CombatSession {
    pub fn new(enemy: EnemyInstance) -> Self {
        Self {
            enemy_hp: enemy.hp_max,
            enemy,
            turn: 1,
            player_effects: StatusList::default(),
            enemy_effects: StatusList::default(),
            first_hit_available: true,
        }
    }

    pub fn enemy_defeated(&self) -> bool {
        self.enemy_hp <= 0
    }

    /// Apply damage to the enemy, flooring health at zero. Returns the
    /// damage actually taken.
    pub fn damage_enemy(&mut self, amount: i32) -> i32 {
        let before = self.enemy_hp;
        self.enemy_hp = (self.enemy_hp - amount.max(0)).max(0);
        before - self.enemy_hp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::monsters::default_monster_templates;

    #[test]
    fn test_new_session_starts_fresh() {
        let monsters = default_monster_templates();
        let enemy = EnemyInstance::scaled(monsters.find("m_scrap_drone").unwrap(), 1);
        let mut session = CombatSession::new(enemy);
        assert_eq!(session.enemy_hp, 22);
        assert_eq!(session.turn, 1);
        assert!(session.first_hit_available);
        assert!(session.player_effects.is_empty());

        assert_eq!(session.damage_enemy(30), 22);
        assert!(session.enemy_defeated());
        assert_eq!(session.damage_enemy(5), 0);
    }
}

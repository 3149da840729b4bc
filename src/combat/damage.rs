//! Damage calculation
//!
//! Handles all combat math: player hits, skills, enemy retaliation, crits,
//! lifesteal and flee chance.

use super::skills::SkillDef;
use super::stats::EffectiveStats;
use crate::dice::Dice;

/// Base crit multiplier for player hits
pub const PLAYER_CRIT_MULTIPLIER: f64 = 1.6;
/// Crit multiplier for enemy hits
pub const ENEMY_CRIT_MULTIPLIER: f64 = 1.45;
/// Flat bonus to basic attacks when wielding a second weapon
pub const DUAL_WIELD_ATTACK_BONUS: i32 = 1;
/// Flat bonus to skills when wielding a second weapon
pub const DUAL_WIELD_SKILL_BONUS: i32 = 2;

/// `floor(value * percent / 100)` in integer arithmetic
fn percent_of(value: i32, percent: i32) -> i32 {
    let scaled = (i64::from(value) * i64::from(percent)).div_euclid(100);
    scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Result of a player attack or skill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    /// Damage before defense
    pub base_damage: i32,
    /// Final damage dealt
    pub damage: i32,
    /// Whether the attack was a critical hit
    pub is_crit: bool,
    /// Health recovered through lifesteal (before clamping to max)
    pub lifesteal: i32,
}

/// Result of an enemy attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyHit {
    pub damage: i32,
    pub is_crit: bool,
    /// The first-hit guard halved this hit
    pub mitigated: bool,
}

/// Everything the enemy's swing depends on besides the dice
#[derive(Debug, Clone, Copy)]
pub struct EnemySwing {
    pub atk: i32,
    pub level: u32,
    pub player_def: i32,
    /// Guard status on the player
    pub guard: i32,
    /// Incoming damage reduction, percent
    pub damage_reduce: i32,
    /// Halve this hit (first-hit guard still available)
    pub first_hit: bool,
}

/// Roll the player's crit and apply it, then compute lifesteal
fn finish_player_hit(stats: &EffectiveStats, base_damage: i32, enemy_def: i32, dice: &mut impl Dice) -> AttackResult {
    let mut damage = (base_damage - percent_of(enemy_def, 60)).max(1);

    let is_crit = dice.chance(stats.crit as f64 / 100.0);
    if is_crit {
        let multiplier = PLAYER_CRIT_MULTIPLIER + stats.bonus.crit_damage_pct as f64 / 100.0;
        damage = (damage as f64 * multiplier).floor() as i32;
    }

    AttackResult {
        base_damage,
        damage,
        is_crit,
        lifesteal: percent_of(damage, stats.lifesteal).max(0),
    }
}

/// Basic attack: `atk + U(0,3)`, plus the dual-wield bonus, minus 60% of the
/// enemy's defense (at least 1)
pub fn basic_attack(stats: &EffectiveStats, enemy_def: i32, dice: &mut impl Dice) -> AttackResult {
    let mut base = stats.atk + dice.range(0, 3);
    if stats.dual_wield {
        base += DUAL_WIELD_ATTACK_BONUS;
    }
    finish_player_hit(stats, base, enemy_def, dice)
}

/// Skill hit: the attack roll scaled by the skill multiplier, plus the skill's
/// flat bonus, scaled by the skill damage bonus
pub fn skill_attack(stats: &EffectiveStats, skill: &SkillDef, enemy_def: i32, dice: &mut impl Dice) -> AttackResult {
    let roll = stats.atk + dice.range(0, 3);
    let mut base = (roll as f64 * skill.multiplier).floor() as i32;
    base += dice.range(skill.flat.0, skill.flat.1);
    base = (base as f64 * (1.0 + stats.bonus.skill_damage_pct as f64 / 100.0)).floor() as i32;
    if stats.dual_wield {
        base += DUAL_WIELD_SKILL_BONUS;
    }
    finish_player_hit(stats, base, enemy_def, dice)
}

/// Enemy crit chance: 8% plus 1% per level, capped at 20%
pub fn enemy_crit_chance(level: u32) -> f64 {
    (0.08 + level as f64 * 0.01).min(0.20)
}

/// Enemy attack: `atk + U(0,2)` minus 65% of defense plus guard (at least 1),
/// then damage reduction, first-hit halving and the enemy crit
pub fn enemy_attack(swing: &EnemySwing, dice: &mut impl Dice) -> EnemyHit {
    let base = swing.atk + dice.range(0, 2);
    let mitigation = percent_of((swing.player_def + swing.guard).max(0), 65);
    let mut damage = (base - mitigation).max(1);

    let reduce = swing.damage_reduce.clamp(0, 100);
    if reduce > 0 {
        damage = percent_of(damage, 100 - reduce).max(1);
    }

    if swing.first_hit {
        damage = (damage / 2).max(1);
    }

    let is_crit = dice.chance(enemy_crit_chance(swing.level));
    if is_crit {
        damage = (damage as f64 * ENEMY_CRIT_MULTIPLIER).floor() as i32;
    }

    EnemyHit {
        damage,
        is_crit,
        mitigated: swing.first_hit,
    }
}

/// Flee chance: 45% plus the flee bonus, clamped to 10%..90%
pub fn flee_chance(flee_bonus: i32) -> f64 {
    (0.45 + flee_bonus as f64 / 100.0).clamp(0.10, 0.90)
}

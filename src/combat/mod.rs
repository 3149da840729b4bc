//! Combat system

pub mod stats;
pub mod damage;
pub mod skills;
pub mod status;
pub mod encounter;
pub mod session;

pub use damage::{basic_attack, enemy_attack, flee_chance, skill_attack, AttackResult, EnemyHit, EnemySwing};
pub use encounter::{select_monster, Area, EnemyInstance};
pub use session::{BattleOutcome, CombatSession};
pub use skills::{SkillBook, SkillDef, SkillRider};
pub use stats::{resolve_stats, EffectiveStats};
pub use status::{StatusEffect, StatusKind, StatusList, StatusTickResult};

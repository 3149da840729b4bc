//! Skill definitions
//!
//! Skills cost energy, hit harder than a basic attack and may carry a rider
//! that applies a status effect to the enemy or to the caster.

use serde::{Deserialize, Serialize};

/// Extra effect attached to a skill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SkillRider {
    /// Chance to make the enemy bleed for `damage` per turn
    Bleed { chance: f64, damage: i32, turns: u32 },
    /// Self buff adding defense against enemy hits
    Guard { value: i32, turns: u32 },
    /// Self debuff raising the cost of further skills
    Surcharge { value: i32, turns: u32 },
}

/// A castable skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDef {
    pub id: String,
    pub name: String,
    /// Energy cost before reductions
    pub cost: i32,
    /// Multiplier applied to the attack roll
    pub multiplier: f64,
    /// Inclusive flat bonus range added after the multiplier
    pub flat: (i32, i32),
    #[serde(default)]
    pub rider: Option<SkillRider>,
    #[serde(default)]
    pub description: String,
}

impl SkillDef {
    /// Energy cost after the resolved reduction and any surcharge, never below 1
    pub fn effective_cost(&self, reduction: i32, surcharge: i32) -> i32 {
        (self.cost - reduction).max(1) + surcharge.max(0)
    }
}

/// Collection of skill definitions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillBook {
    pub skills: Vec<SkillDef>,
}

impl SkillBook {
    /// Find a skill by ID
    pub fn find(&self, id: &str) -> Option<&SkillDef> {
        self.skills.iter().find(|s| s.id == id)
    }

    /// The skill used by auto-battle and the plain "skill" command
    pub fn primary(&self) -> Option<&SkillDef> {
        self.skills.first()
    }
}

/// Create default skills (hardcoded fallback)
pub fn default_skills() -> SkillBook {
    SkillBook {
        skills: vec![
            SkillDef {
                id: "overdrive".to_string(),
                name: "Overdrive".to_string(),
                cost: 6,
                multiplier: 1.35,
                flat: (1, 4),
                rider: None,
                description: "Channel the reactor into one heavy strike.".to_string(),
            },
            SkillDef {
                id: "rending_slash".to_string(),
                name: "Rending Slash".to_string(),
                cost: 8,
                multiplier: 1.5,
                flat: (1, 3),
                rider: Some(SkillRider::Bleed { chance: 0.5, damage: 3, turns: 3 }),
                description: "A tearing cut that may leave the target bleeding.".to_string(),
            },
            SkillDef {
                id: "bulwark".to_string(),
                name: "Bulwark".to_string(),
                cost: 7,
                multiplier: 0.8,
                flat: (0, 2),
                rider: Some(SkillRider::Guard { value: 4, turns: 3 }),
                description: "A shield bash that raises your guard.".to_string(),
            },
            SkillDef {
                id: "overload".to_string(),
                name: "Overload".to_string(),
                cost: 10,
                multiplier: 2.2,
                flat: (2, 6),
                rider: Some(SkillRider::Surcharge { value: 3, turns: 2 }),
                description: "Dump every capacitor at once. Skills cost more for a while.".to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_reduction_floors_at_one() {
        let book = default_skills();
        let overdrive = book.find("overdrive").unwrap();
        assert_eq!(overdrive.effective_cost(0, 0), 6);
        assert_eq!(overdrive.effective_cost(2, 0), 4);
        assert_eq!(overdrive.effective_cost(20, 0), 1);
        assert_eq!(overdrive.effective_cost(20, 3), 4);
    }

    #[test]
    fn test_primary_is_overdrive() {
        assert_eq!(default_skills().primary().map(|s| s.id.as_str()), Some("overdrive"));
    }

    #[test]
    fn test_riders() {
        let book = default_skills();
        assert_eq!(book.find("bulwark").unwrap().rider, Some(SkillRider::Guard { value: 4, turns: 3 }));
        assert!(book.find("missing").is_none());
    }
}

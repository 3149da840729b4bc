//! Status effects system
//!
//! Timed buffs and debuffs. The character keeps a persistent list of stat
//! buffs between battles; each combat side also gets its own per-battle list
//! that is ticked at the start of every enemy turn.

use serde::{Deserialize, Serialize};

/// Kinds of timed modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Flat attack bonus
    AttackUp,
    /// Flat defense bonus
    DefenseUp,
    /// Crit chance bonus, percent
    CritUp,
    /// Defense added against enemy hits while active
    Guard,
    /// Damage dealt to the carrier each tick
    Bleed,
    /// Extra energy cost on skills
    Surcharge,
    /// Energy lost by the carrier each tick
    EnergyDrain,
}

impl StatusKind {
    pub fn name(&self) -> &'static str {
        match self {
            StatusKind::AttackUp => "Attack Up",
            StatusKind::DefenseUp => "Defense Up",
            StatusKind::CritUp => "Crit Up",
            StatusKind::Guard => "Guard",
            StatusKind::Bleed => "Bleed",
            StatusKind::Surcharge => "Surcharge",
            StatusKind::EnergyDrain => "Energy Drain",
        }
    }

    /// Is this a beneficial effect?
    pub fn is_buff(&self) -> bool {
        matches!(
            self,
            StatusKind::AttackUp | StatusKind::DefenseUp | StatusKind::CritUp | StatusKind::Guard
        )
    }
}

/// A single timed modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub magnitude: i32,
    /// Remaining turns; the effect is removed when this reaches zero
    pub turns: u32,
}

/// Result of ticking a status list once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTickResult {
    /// Health lost by the carrier
    pub damage: i32,
    /// Energy lost by the carrier
    pub drain: i32,
    /// Effects that ran out this tick
    pub expired: Vec<StatusKind>,
}

/// Ordered list of active effects on one side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusList {
    pub effects: Vec<StatusEffect>,
}

impl StatusList {
    /// Add an effect. Re-applying a kind refreshes it to the stronger
    /// magnitude and the longer duration instead of stacking.
    pub fn add(&mut self, kind: StatusKind, magnitude: i32, turns: u32) {
        if turns == 0 {
            return;
        }
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.magnitude = existing.magnitude.max(magnitude);
            existing.turns = existing.turns.max(turns);
        } else {
            self.effects.push(StatusEffect { kind, magnitude, turns });
        }
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Summed magnitude of a kind (0 if not present)
    pub fn total(&self, kind: StatusKind) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.magnitude)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Apply periodic effects, then decrement every timer by one and drop
    /// the expired ones
    pub fn tick(&mut self) -> StatusTickResult {
        let mut result = StatusTickResult::default();

        for effect in &mut self.effects {
            match effect.kind {
                StatusKind::Bleed => result.damage += effect.magnitude.max(0),
                StatusKind::EnergyDrain => result.drain += effect.magnitude.max(0),
                _ => {}
            }
            effect.turns = effect.turns.saturating_sub(1);
        }

        result.expired = self.effects.iter().filter(|e| e.turns == 0).map(|e| e.kind).collect();
        self.effects.retain(|e| e.turns > 0);
        result
    }

    /// Decrement timers without applying periodic effects
    pub fn decrement(&mut self, turns: u32) {
        for effect in &mut self.effects {
            effect.turns = effect.turns.saturating_sub(turns);
        }
        self.effects.retain(|e| e.turns > 0);
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

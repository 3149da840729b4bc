//! Auto-battle
//!
//! A cancellable stepper. The caller owns the timer: it calls [`AutoBattle::step`]
//! once per tick and checks [`AutoBattle::is_active`] before scheduling the
//! next one. Nothing here sleeps or reschedules itself.
//!
//! A stepper is bound to the battle that was active when it started. Once that
//! battle ends, by any command, further steps are no-ops.

use super::engine::{Engine, Report};
use super::state::CharacterState;
use crate::combat::StatusKind;
use crate::dice::Dice;
use crate::error::GameError;

/// Liveness flag plus the action policy for automatic turns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoBattle {
    /// Serial of the battle being fought, `None` when inactive
    battle: Option<u64>,
    /// Skill cast whenever energy allows; basic attacks otherwise
    skill: Option<String>,
}

impl AutoBattle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefer a skill over basic attacks while energy lasts
    pub fn with_skill(mut self, skill_id: impl Into<String>) -> Self {
        self.skill = Some(skill_id.into());
        self
    }

    /// Arm the stepper. Only takes effect while a battle is in progress.
    pub fn start(&mut self, state: &CharacterState) -> bool {
        self.battle = state.in_battle().then(|| state.battle_serial());
        if let Some(serial) = self.battle {
            log::debug!("Auto-battle started for battle {}", serial);
        }
        self.is_active()
    }

    pub fn is_active(&self) -> bool {
        self.battle.is_some()
    }

    pub fn cancel(&mut self) {
        if self.battle.take().is_some() {
            log::debug!("Auto-battle cancelled");
        }
    }

    /// Run one automatic player action.
    ///
    /// Returns `Ok(None)` without touching the state when inactive or when
    /// the bound battle is over, even if another battle has started since.
    /// Any battle outcome or error stops the stepper.
    pub fn step(
        &mut self,
        engine: &Engine<'_>,
        state: &mut CharacterState,
        dice: &mut impl Dice,
    ) -> Result<Option<Report>, GameError> {
        let Some(serial) = self.battle else {
            return Ok(None);
        };
        if !state.in_battle() || state.battle_serial() != serial {
            log::debug!("Auto-battle stopped: battle {} is over", serial);
            self.battle = None;
            return Ok(None);
        }

        let result = match self.affordable_skill(engine, state) {
            Some(skill_id) => engine.player_skill(state, &skill_id, dice),
            None => engine.player_attack(state, dice),
        };

        match &result {
            Ok(report) if !report.battle_ended() => {}
            _ => self.battle = None,
        }
        result.map(Some)
    }

    fn affordable_skill(&self, engine: &Engine<'_>, state: &CharacterState) -> Option<String> {
        let skill = engine.catalog().skills.find(self.skill.as_deref()?)?;
        let surcharge = state
            .battle
            .as_ref()
            .map_or(0, |b| b.player_effects.total(StatusKind::Surcharge));
        let cost = skill.effective_cost(engine.stats(state).bonus.skill_cost_reduce, surcharge);
        (state.en >= cost).then(|| skill.id.clone())
    }
}

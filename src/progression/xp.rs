//! Experience and leveling
//!
//! XP curve and level-up handling.

use crate::combat::resolve_stats;
use crate::data::Catalog;
use crate::game::CharacterState;

/// Health restored on each level-up
pub const LEVEL_UP_HEAL: i32 = 12;
/// Energy restored on each level-up
pub const LEVEL_UP_ENERGY: i32 = 6;

/// XP needed to go from `level` to `level + 1`: `40 + 12·level²`
pub fn xp_to_next(level: u32) -> u32 {
    40 + level.saturating_mul(level).saturating_mul(12)
}

/// Add experience and apply every level-up it pays for.
///
/// Each level-up carries the remainder over, restores a little health and
/// energy (clamped to the new maxima) and is checked against the next
/// level's threshold. Returns the levels reached, in order.
pub fn grant_experience(character: &mut CharacterState, catalog: &Catalog, amount: u32) -> Vec<u32> {
    character.xp = character.xp.saturating_add(amount);
    let mut reached = Vec::new();

    while character.xp >= xp_to_next(character.level) {
        character.xp -= xp_to_next(character.level);
        character.level += 1;

        let stats = resolve_stats(character, catalog);
        character.hp = (character.hp + LEVEL_UP_HEAL).clamp(0, stats.hp_max);
        character.en = (character.en + LEVEL_UP_ENERGY).clamp(0, stats.en_max);
        log::debug!("Level up to {}", character.level);
        reached.push(character.level);
    }

    reached
}

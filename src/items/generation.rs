//! Item instance generation
//!
//! Turns a template into a concrete owned instance with a rolled stat line and
//! a rating score.

use super::item::{Attribute, InstanceId, ItemCategory, ItemInstance, StatLine};
use crate::data::{GearTemplate, RollRange, TemplateRef};
use crate::dice::Dice;

/// Lowest and highest rating an instance can have
pub const RATING_MIN: i32 = 1;
pub const RATING_MAX: i32 = 99;

/// Inclusive roll range for one attribute of a template.
///
/// An explicit range on the template wins over the rarity spread.
pub fn roll_range(template: &GearTemplate, attribute: Attribute) -> RollRange {
    if let Some(range) = template.ranges.get(&attribute) {
        return *range;
    }
    let base = template.stats.get(attribute);
    let (below, above) = template.rarity.roll_spread();
    RollRange {
        min: base - below,
        max: base + above,
    }
}

/// Draw one value per applicable attribute, in the category's draw order
pub fn roll_stats(category: ItemCategory, template: &GearTemplate, dice: &mut impl Dice) -> StatLine {
    let mut roll = StatLine::default();
    for &attribute in category.rollable_attributes() {
        if !template.rolls(attribute) {
            continue;
        }
        let range = roll_range(template, attribute);
        roll.set(attribute, dice.range(range.min, range.max).max(0));
    }
    roll
}

/// Rating of a rolled stat line, clamped to 1..=99
pub fn rating(category: ItemCategory, stats: &StatLine) -> Option<u8> {
    let raw = match category {
        ItemCategory::Weapon => {
            5.0 * stats.attack as f64 + 2.0 * stats.crit as f64 + 3.0 * stats.lifesteal as f64
        }
        ItemCategory::Equipment => {
            4.0 * stats.defense as f64
                + 0.6 * stats.health as f64
                + 0.7 * stats.energy as f64
                + 4.0 * stats.attack as f64
                + 2.0 * stats.crit as f64
                + 3.0 * stats.lifesteal as f64
        }
        ItemCategory::Consumable => return None,
    };
    Some((raw.round() as i32).clamp(RATING_MIN, RATING_MAX) as u8)
}

/// Materialize a template into a fresh instance.
///
/// Gear draws exactly one value per rolled attribute; consumables draw nothing.
pub fn generate_instance(id: InstanceId, template: TemplateRef<'_>, dice: &mut impl Dice) -> ItemInstance {
    let category = template.category();
    let mut instance = ItemInstance::unrolled(id, category, template.id());

    if let Some(gear) = template.gear() {
        let roll = roll_stats(category, gear, dice);
        instance.rating = rating(category, &roll);
        instance.roll = Some(roll);
    }

    instance
}

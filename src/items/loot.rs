//! Loot generation system
//!
//! Weighted rarity draws, battle drops and shop offers.

use serde::{Deserialize, Serialize};

use super::generation::generate_instance;
use super::item::{InstanceId, ItemCategory, ItemInstance, OfferId, Rarity};
use crate::data::{Catalog, DropChances, ItemTemplates, RarityWeights, TemplateRef};
use crate::dice::Dice;

/// Categories rolled for drops, in draw order
const DROP_CATEGORIES: [ItemCategory; 3] =
    [ItemCategory::Weapon, ItemCategory::Equipment, ItemCategory::Consumable];

/// Hand out the next id from a monotonically increasing counter
pub fn next_instance_id(counter: &mut u64) -> InstanceId {
    *counter += 1;
    InstanceId(*counter)
}

/// Walk cumulative weights against `draw` (in `0..total`); the first entry
/// whose cumulative weight meets or exceeds the draw wins.
///
/// Zero-weight entries are never picked. A table whose weights sum to zero
/// yields its first entry; an empty table yields `None`.
pub fn pick_weighted<T: Copy>(entries: &[(T, u32)], draw: f64) -> Option<T> {
    let first = entries.first()?.0;
    let mut cumulative = 0.0;
    for &(value, weight) in entries {
        if weight == 0 {
            continue;
        }
        cumulative += weight as f64;
        if cumulative >= draw {
            return Some(value);
        }
    }
    // Draw past the end only happens on a degenerate table
    Some(
        entries
            .iter()
            .rev()
            .find(|(_, w)| *w > 0)
            .map_or(first, |(value, _)| *value),
    )
}

/// Draw from a weighted table using one uniform sample
pub fn roll_weighted<T: Copy>(entries: &[(T, u32)], dice: &mut impl Dice) -> Option<T> {
    let total: u32 = entries.iter().map(|(_, w)| *w).sum();
    let draw = dice.unit() * total as f64;
    pick_weighted(entries, draw)
}

/// Pick a rarity tier from the configured weights
pub fn roll_rarity(weights: &RarityWeights, dice: &mut impl Dice) -> Rarity {
    roll_weighted(&weights.0, dice).unwrap_or(Rarity::Common)
}

/// Uniformly pick a template of `category` and `rarity`, falling back to the
/// whole category pool when no template has that rarity
pub fn pick_template<'a>(
    items: &'a ItemTemplates,
    category: ItemCategory,
    rarity: Rarity,
    dice: &mut impl Dice,
) -> Option<TemplateRef<'a>> {
    let pool = items.pool(category);
    let filtered: Vec<_> = pool.iter().copied().filter(|t| t.rarity() == rarity).collect();
    let candidates = if filtered.is_empty() { &pool } else { &filtered };
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[dice.index(candidates.len())])
}

/// Roll each drop category independently against the enemy's chances
pub fn roll_drops(
    catalog: &Catalog,
    drops: &DropChances,
    id_counter: &mut u64,
    dice: &mut impl Dice,
) -> Vec<ItemInstance> {
    let mut result = Vec::new();

    for category in DROP_CATEGORIES {
        let chance = match category {
            ItemCategory::Weapon => drops.weapon,
            ItemCategory::Equipment => drops.equipment,
            ItemCategory::Consumable => drops.consumable,
        };
        if !dice.chance(chance) {
            continue;
        }
        let rarity = roll_rarity(&catalog.tables.rarity_weights, dice);
        match pick_template(&catalog.items, category, rarity, dice) {
            Some(template) => {
                let id = next_instance_id(id_counter);
                result.push(generate_instance(id, template, dice));
            }
            None => log::warn!("No {} templates to drop", category.name()),
        }
    }

    result
}

/// An item for sale. The instance is rolled when the offer is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub item: ItemInstance,
    pub price: u32,
}

/// Base price plus a random markup of up to 15% (at least 3)
pub fn markup_price(base: u32, dice: &mut impl Dice) -> u32 {
    let ceiling = (base as f64 * 0.15).floor() as i32;
    let markup = dice.range(0, ceiling.max(3));
    base + markup.max(0) as u32
}

/// Build a fresh offer list for a floor following the shop layout.
///
/// Each slot picks uniformly from the floor's stock for its category. Stock ids
/// missing from the catalog are skipped with a warning.
pub fn reroll_shop_offers(
    catalog: &Catalog,
    floor: u32,
    offer_counter: &mut u64,
    id_counter: &mut u64,
    dice: &mut impl Dice,
) -> Vec<Offer> {
    let Some(stock) = catalog.tables.shop.stock_for(floor) else {
        log::warn!("No shop stock configured for floor {}", floor);
        return Vec::new();
    };

    let mut offers = Vec::new();
    for category in catalog.tables.shop.layout.slots() {
        let candidates: Vec<TemplateRef<'_>> = stock
            .ids(category)
            .iter()
            .filter_map(|id| {
                let found = catalog.items.find(category, id);
                if found.is_none() {
                    log::warn!("Shop stock references unknown {} '{}'", category.name(), id);
                }
                found
            })
            .collect();
        if candidates.is_empty() {
            continue;
        }

        let template = candidates[dice.index(candidates.len())];
        let price = markup_price(template.price(), dice);
        let item = generate_instance(next_instance_id(id_counter), template, dice);
        *offer_counter += 1;
        offers.push(Offer {
            id: OfferId(*offer_counter),
            item,
            price,
        });
    }

    offers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::scripted::ScriptedDice;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_weighted_seventy_first_percentile_is_elite() {
        let weights = RarityWeights::default();
        assert_eq!(weights.total(), 100);
        assert_eq!(pick_weighted(&weights.0, 71.0), Some(Rarity::Elite));
        assert_eq!(pick_weighted(&weights.0, 70.0), Some(Rarity::Common));
        assert_eq!(pick_weighted(&weights.0, 0.0), Some(Rarity::Common));
        assert_eq!(pick_weighted(&weights.0, 99.9), Some(Rarity::Legendary));
    }

    #[test]
    fn test_roll_rarity_with_forced_draw() {
        let weights = RarityWeights::default();
        let mut dice = ScriptedDice::new().with_units(&[0.71]);
        assert_eq!(roll_rarity(&weights, &mut dice), Rarity::Elite);
    }

    #[test]
    fn test_degenerate_tables() {
        let zero = [(Rarity::Elite, 0), (Rarity::Legendary, 0)];
        assert_eq!(pick_weighted(&zero, 0.0), Some(Rarity::Elite));
        let empty: [(Rarity, u32); 0] = [];
        assert_eq!(pick_weighted(&empty, 0.0), None);
        // A zero-weight head never wins, even on a zero draw
        let skip = [(Rarity::Common, 0), (Rarity::Elite, 5)];
        assert_eq!(pick_weighted(&skip, 0.0), Some(Rarity::Elite));
        assert_eq!(roll_rarity(&RarityWeights(vec![]), &mut ScriptedDice::new()), Rarity::Common);
    }

    #[test]
    fn test_pick_template_falls_back_to_whole_pool() {
        let catalog = Catalog::default();
        // Only commons left, so a legendary draw must use the whole pool
        let mut items = catalog.items.clone();
        items.weapons.retain(|t| t.rarity == Rarity::Common);
        let mut dice = ScriptedDice::new();
        let picked = pick_template(&items, ItemCategory::Weapon, Rarity::Legendary, &mut dice).unwrap();
        assert_eq!(picked.rarity(), Rarity::Common);

        items.weapons.clear();
        assert!(pick_template(&items, ItemCategory::Weapon, Rarity::Common, &mut dice).is_none());
    }

    #[test]
    fn test_drops_respect_chances() {
        let catalog = Catalog::default();
        let mut counter = 0;
        let mut rng = StdRng::seed_from_u64(3);

        let none = DropChances::default();
        assert!(roll_drops(&catalog, &none, &mut counter, &mut rng).is_empty());

        let all = DropChances { weapon: 1.0, equipment: 1.0, consumable: 1.0 };
        let drops = roll_drops(&catalog, &all, &mut counter, &mut rng);
        let categories: Vec<_> = drops.iter().map(|d| d.category).collect();
        assert_eq!(
            categories,
            vec![ItemCategory::Weapon, ItemCategory::Equipment, ItemCategory::Consumable]
        );
        assert!(drops[0].roll.is_some());
        assert!(drops[2].roll.is_none());
        assert_eq!(counter, 3);
    }

    #[test]
    fn test_markup_price_bounds() {
        let mut low = ScriptedDice::new();
        let mut high = ScriptedDice::new().high();
        assert_eq!(markup_price(100, &mut low), 100);
        assert_eq!(markup_price(100, &mut high), 115);
        // Cheap items still get a markup of up to 3
        assert_eq!(markup_price(10, &mut high), 13);
    }

    #[test]
    fn test_shop_layout_and_rolled_offers() {
        let catalog = Catalog::default();
        let mut offers_made = 0;
        let mut ids = 0;
        let mut rng = StdRng::seed_from_u64(21);
        let offers = reroll_shop_offers(&catalog, 1, &mut offers_made, &mut ids, &mut rng);

        assert_eq!(offers.len(), 6);
        assert_eq!(offers_made, 6);
        let stock = catalog.tables.shop.stock_for(1).unwrap();
        for offer in &offers {
            assert!(stock.ids(offer.item.category).contains(&offer.item.template_id));
            let base = catalog.items.find(offer.item.category, &offer.item.template_id).unwrap().price();
            assert!(offer.price >= base && offer.price <= base + (base * 15 / 100).max(3));
            assert_eq!(offer.item.roll.is_some(), offer.item.category.is_gear());
        }
    }
}

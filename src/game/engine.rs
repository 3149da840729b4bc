//! Command engine
//!
//! Every player command goes through [`Engine`]. Commands take the character
//! state by `&mut`, mutate it in place and return a [`Report`] with the log
//! lines they appended. Rejected commands return an error and leave the state
//! untouched apart from one refusal line in the event log.

use super::log::{EventLog, MessageCategory};
use super::state::CharacterState;
use crate::combat::{
    basic_attack, enemy_attack, flee_chance, resolve_stats, select_monster, skill_attack, AttackResult,
    BattleOutcome, CombatSession, EffectiveStats, EnemyInstance, EnemySwing, SkillRider, StatusKind,
};
use crate::data::{Catalog, ConsumableEffect, Role, TemplateRef};
use crate::dice::Dice;
use crate::error::{GameError, InvalidAction};
use crate::items::{reroll_shop_offers, roll_drops, InstanceId, ItemCategory, LoadoutSlot, OfferId, Rarity};
use crate::progression::grant_experience;

/// Health restored by resting
pub const REST_HEAL: i32 = 18;
/// Energy restored by resting
pub const REST_ENERGY: i32 = 10;
/// Chance that exploring turns up loot before the fight
pub const EXPLORE_LOOT_CHANCE: f64 = 0.12;
/// Chance that exploring pushes one level deeper
pub const EXPLORE_DEEPEN_CHANCE: f64 = 0.25;
/// Share of maximum health and energy restored after a defeat, percent
pub const DEFEAT_RESTORE_PCT: i32 = 65;

/// Lines appended by one command, plus how the battle ended if it did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub lines: Vec<String>,
    pub outcome: Option<BattleOutcome>,
}

impl Report {
    fn push(&mut self, log: &mut EventLog, category: MessageCategory, text: impl Into<String>) {
        let text = text.into();
        log.push(text.clone(), category);
        self.lines.push(text);
    }

    /// The battle ended during this command
    pub fn battle_ended(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Sell value: 55% of the base price, at least 1
pub fn sell_value(price: u32) -> u32 {
    percent_of_price(price, 55).max(1)
}

/// Salvage value: 25% of the base price (at least 1) plus 2 per rarity rank
pub fn salvage_value(price: u32, rarity: Rarity) -> u32 {
    percent_of_price(price, 25).max(1).saturating_add(rarity.rank() * 2)
}

fn percent_of_price(price: u32, percent: u64) -> u32 {
    // percent <= 100 keeps the result within u32
    (u64::from(price) * percent / 100) as u32
}

/// Runs commands against a character using a read-only catalog
#[derive(Debug, Clone, Copy)]
pub struct Engine<'a> {
    catalog: &'a Catalog,
}

impl<'a> Engine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Fresh stat snapshot for the character
    pub fn stats(&self, state: &CharacterState) -> EffectiveStats {
        resolve_stats(state, self.catalog)
    }

    fn refuse<T>(&self, state: &mut CharacterState, action: InvalidAction) -> Result<T, GameError> {
        log::debug!("Refused command: {}", action);
        state.log.push(format!("Cannot do that: {}.", action), MessageCategory::Warning);
        Err(GameError::InvalidAction(action))
    }

    fn template(&self, category: ItemCategory, id: &str) -> Option<TemplateRef<'a>> {
        let found = self.catalog.items.find(category, id);
        if found.is_none() {
            log::warn!("Missing {} template '{}'", category.name(), id);
        }
        found
    }

    fn item_name(&self, category: ItemCategory, id: &str) -> String {
        self.catalog
            .items
            .find(category, id)
            .map_or_else(|| format!("unknown item '{}'", id), |t| t.name().to_string())
    }

    /// Price and rarity of a template, zeroed when the template is missing
    fn price_and_rarity(&self, category: ItemCategory, id: &str) -> (u32, Rarity) {
        self.template(category, id)
            .map_or((0, Rarity::Common), |t| (t.price(), t.rarity()))
    }

    // === Battle ===

    /// Pick a monster for the current area and start a battle against it
    pub fn start_encounter(&self, state: &mut CharacterState, dice: &mut impl Dice) -> Result<Report, GameError> {
        if state.in_battle() {
            return self.refuse(state, InvalidAction::BattleInProgress);
        }
        let mut report = Report::default();
        self.begin_battle(state, &mut report, dice)?;
        Ok(report)
    }

    fn begin_battle(&self, state: &mut CharacterState, report: &mut Report, dice: &mut impl Dice) -> Result<(), GameError> {
        let Some(template) = select_monster(&self.catalog.monsters, &state.area, dice) else {
            log::warn!("Monster catalog is empty");
            state.log.push("No monsters are available to fight.", MessageCategory::Warning);
            return Err(GameError::DataIntegrity("monster catalog is empty".to_string()));
        };

        let enemy = EnemyInstance::scaled(template, state.area.depth);
        log::debug!(
            "Encounter {} on floor {} depth {}",
            enemy.template_id,
            state.area.floor,
            state.area.depth
        );
        report.push(
            &mut state.log,
            MessageCategory::Combat,
            format!(
                "Encountered {} ({}, Lv {}) with {} HP.",
                enemy.name,
                enemy.role.name(),
                enemy.level,
                enemy.hp_max
            ),
        );

        let unresolved = self.stats(state).unresolved;
        if !unresolved.is_empty() {
            report.push(
                &mut state.log,
                MessageCategory::Warning,
                format!("{} equipped item(s) could not be resolved and are ignored.", unresolved.len()),
            );
        }

        state.battle = Some(CombatSession::new(enemy));
        state.battle_serial += 1;
        Ok(())
    }

    /// Basic attack, followed by the enemy's turn unless the enemy falls
    pub fn player_attack(&self, state: &mut CharacterState, dice: &mut impl Dice) -> Result<Report, GameError> {
        let Some(enemy_def) = state.battle.as_ref().map(|b| b.enemy.def) else {
            return self.refuse(state, InvalidAction::NoActiveBattle);
        };

        let stats = self.stats(state);
        let hit = basic_attack(&stats, enemy_def, dice);
        let mut report = Report::default();
        self.land_hit(state, &mut report, &stats, &hit, "Attack");
        self.after_player_action(state, &mut report, dice);
        Ok(report)
    }

    /// Cast a skill by id
    pub fn player_skill(&self, state: &mut CharacterState, skill_id: &str, dice: &mut impl Dice) -> Result<Report, GameError> {
        let Some((enemy_def, surcharge)) = state
            .battle
            .as_ref()
            .map(|b| (b.enemy.def, b.player_effects.total(StatusKind::Surcharge)))
        else {
            return self.refuse(state, InvalidAction::NoActiveBattle);
        };
        let Some(skill) = self.catalog.skills.find(skill_id) else {
            return self.refuse(state, InvalidAction::UnknownSkill(skill_id.to_string()));
        };

        let stats = self.stats(state);
        let cost = skill.effective_cost(stats.bonus.skill_cost_reduce, surcharge);
        if state.en < cost {
            let refusal = InvalidAction::NotEnoughEnergy {
                skill: skill.name.clone(),
                needed: cost,
                available: state.en,
            };
            return self.refuse(state, refusal);
        }
        state.en -= cost;

        let hit = skill_attack(&stats, skill, enemy_def, dice);
        let mut report = Report::default();
        self.land_hit(state, &mut report, &stats, &hit, &skill.name);

        if let Some(session) = state.battle.as_mut() {
            if !session.enemy_defeated() {
                match skill.rider {
                    Some(SkillRider::Bleed { chance, damage, turns }) => {
                        if dice.chance(chance) {
                            session.enemy_effects.add(StatusKind::Bleed, damage, turns);
                            report.push(
                                &mut state.log,
                                MessageCategory::Combat,
                                format!("{} is bleeding ({} per turn for {} turns).", session.enemy.name, damage, turns),
                            );
                        }
                    }
                    Some(SkillRider::Guard { value, turns }) => {
                        session.player_effects.add(StatusKind::Guard, value, turns);
                        report.push(
                            &mut state.log,
                            MessageCategory::Combat,
                            format!("Guard raised: +{} defense for {} turns.", value, turns),
                        );
                    }
                    Some(SkillRider::Surcharge { value, turns }) => {
                        session.player_effects.add(StatusKind::Surcharge, value, turns);
                        report.push(
                            &mut state.log,
                            MessageCategory::Combat,
                            format!("Capacitors strained: skills cost +{} for {} turns.", value, turns),
                        );
                    }
                    None => {}
                }
            }
        }

        self.after_player_action(state, &mut report, dice);
        Ok(report)
    }

    /// Try to escape. A failed attempt hands the turn to the enemy.
    pub fn player_flee(&self, state: &mut CharacterState, dice: &mut impl Dice) -> Result<Report, GameError> {
        if !state.in_battle() {
            return self.refuse(state, InvalidAction::NoActiveBattle);
        }

        let stats = self.stats(state);
        let mut report = Report::default();
        if dice.chance(flee_chance(stats.bonus.flee)) {
            state.battle = None;
            state.buffs.decrement(1);
            report.push(&mut state.log, MessageCategory::Combat, "Retreat successful.");
            report.outcome = Some(BattleOutcome::Fled);
            log::info!("Battle ended: {}", BattleOutcome::Fled.name());
        } else {
            report.push(&mut state.log, MessageCategory::Combat, "Retreat failed!");
            self.enemy_turn(state, &mut report, dice);
        }
        Ok(report)
    }

    /// Apply a player hit to the enemy, with lifesteal
    fn land_hit(&self, state: &mut CharacterState, report: &mut Report, stats: &EffectiveStats, hit: &AttackResult, label: &str) {
        let Some(session) = state.battle.as_mut() else {
            return;
        };
        let dealt = session.damage_enemy(hit.damage);
        report.push(
            &mut state.log,
            MessageCategory::Combat,
            format!(
                "{} hits {} for {} damage{}.",
                label,
                session.enemy.name,
                dealt,
                if hit.is_crit { " (critical)" } else { "" }
            ),
        );

        if hit.lifesteal > 0 {
            let before = state.hp;
            state.hp = (state.hp + hit.lifesteal).clamp(0, stats.hp_max);
            if state.hp > before {
                report.push(
                    &mut state.log,
                    MessageCategory::Combat,
                    format!("Lifesteal: +{} HP ({} -> {}).", state.hp - before, before, state.hp),
                );
            }
        }
    }

    /// Per-action regeneration, then victory or the enemy's turn
    fn after_player_action(&self, state: &mut CharacterState, report: &mut Report, dice: &mut impl Dice) {
        self.apply_regen(state);
        if state.battle.as_ref().is_some_and(|b| b.enemy_defeated()) {
            self.victory(state, report, dice);
        } else {
            self.enemy_turn(state, report, dice);
        }
    }

    fn apply_regen(&self, state: &mut CharacterState) {
        let stats = self.stats(state);
        state.hp = (state.hp + stats.bonus.regen_hp).clamp(0, stats.hp_max);
        state.en = (state.en + stats.bonus.regen_en).clamp(0, stats.en_max);
    }

    /// Status ticks on both sides, then the enemy's attack
    fn enemy_turn(&self, state: &mut CharacterState, report: &mut Report, dice: &mut impl Dice) {
        let stats = self.stats(state);
        let Some(session) = state.battle.as_mut() else {
            return;
        };

        let enemy_tick = session.enemy_effects.tick();
        if enemy_tick.damage > 0 {
            let dealt = session.damage_enemy(enemy_tick.damage);
            report.push(
                &mut state.log,
                MessageCategory::Combat,
                format!("{} bleeds for {} damage.", session.enemy.name, dealt),
            );
        }
        let player_tick = session.player_effects.tick();
        if player_tick.drain > 0 {
            let before = state.en;
            state.en = (state.en - player_tick.drain).max(0);
            report.push(
                &mut state.log,
                MessageCategory::Combat,
                format!("Energy drained: -{} EN ({} -> {}).", before - state.en, before, state.en),
            );
        }
        for kind in player_tick.expired.iter().filter(|k| k.is_buff()) {
            report.push(&mut state.log, MessageCategory::Combat, format!("{} wears off.", kind.name()));
        }

        if session.enemy_defeated() {
            self.victory(state, report, dice);
            return;
        }

        let first_hit = stats.first_hit_guard && session.first_hit_available;
        if first_hit {
            session.first_hit_available = false;
        }
        let swing = EnemySwing {
            atk: session.enemy.atk,
            level: session.enemy.level,
            player_def: stats.def,
            guard: session.player_effects.total(StatusKind::Guard),
            damage_reduce: stats.bonus.damage_reduce,
            first_hit,
        };
        let hit = enemy_attack(&swing, dice);

        if hit.mitigated {
            report.push(&mut state.log, MessageCategory::Combat, "Armor passive: the first hit is halved.");
        }
        state.hp = (state.hp - hit.damage).max(0);
        report.push(
            &mut state.log,
            MessageCategory::Combat,
            format!(
                "{} strikes back for {} damage{}.",
                session.enemy.name,
                hit.damage,
                if hit.is_crit { " (critical)" } else { "" }
            ),
        );

        if let Some(drain) = session.enemy.drain {
            if state.hp > 0 && dice.chance(drain.chance) {
                session.player_effects.add(StatusKind::EnergyDrain, drain.amount, drain.turns);
                report.push(
                    &mut state.log,
                    MessageCategory::Combat,
                    format!("Your reactor is leaking: -{} EN per turn for {} turns.", drain.amount, drain.turns),
                );
            }
        }

        if state.hp == 0 {
            self.defeat(state, report);
        } else {
            session.turn += 1;
        }
    }

    fn victory(&self, state: &mut CharacterState, report: &mut Report, dice: &mut impl Dice) {
        let Some(session) = state.battle.take() else {
            return;
        };
        let enemy = session.enemy;

        let bonus_ceiling = ((enemy.gold as f64 * 0.25).floor() as i32).max(3);
        let gold = enemy.gold + dice.range(0, bonus_ceiling).max(0) as u32;
        state.gold += gold;
        report.push(
            &mut state.log,
            MessageCategory::Combat,
            format!("Victory over {}! +{} XP, +{} gold.", enemy.name, enemy.xp, gold),
        );

        for level in grant_experience(state, self.catalog, enemy.xp) {
            report.push(&mut state.log, MessageCategory::System, format!("Level up! Now level {}.", level));
        }

        let max_floor = self.catalog.tables.world.max_floor;
        if enemy.role == Role::Boss && state.area.floor == state.area.unlocked && state.area.unlocked < max_floor {
            state.area.unlocked += 1;
            report.push(
                &mut state.log,
                MessageCategory::System,
                format!("Floor {} unlocked.", state.area.unlocked),
            );
        }

        let drops = roll_drops(self.catalog, &enemy.drops, &mut state.next_instance_id, dice);
        if drops.is_empty() {
            report.push(&mut state.log, MessageCategory::Item, "No drops.");
        } else {
            let names: Vec<String> = drops
                .iter()
                .map(|d| self.item_name(d.category, &d.template_id))
                .collect();
            for item in drops {
                state.inventory.add(item);
            }
            report.push(&mut state.log, MessageCategory::Item, format!("Drops: {}.", names.join(", ")));
        }

        state.buffs.decrement(1);
        report.outcome = Some(BattleOutcome::Victory);
        log::info!("Battle ended: {} against {}", BattleOutcome::Victory.name(), enemy.template_id);
    }

    fn defeat(&self, state: &mut CharacterState, report: &mut Report) {
        state.battle = None;
        let penalty = state.gold.min(15 + state.level * 5);
        state.gold -= penalty;

        let stats = self.stats(state);
        state.hp = (stats.hp_max * DEFEAT_RESTORE_PCT / 100).max(1);
        state.en = stats.en_max * DEFEAT_RESTORE_PCT / 100;
        state.area.reset();

        report.push(
            &mut state.log,
            MessageCategory::Combat,
            format!("Your frame is wrecked! Lost {} gold and retreated to floor 1.", penalty),
        );
        report.outcome = Some(BattleOutcome::Defeat);
        log::info!("Battle ended: {}", BattleOutcome::Defeat.name());
    }

    // === Exploration ===

    /// Explore: maybe find loot, start a battle, maybe go deeper
    pub fn explore(&self, state: &mut CharacterState, dice: &mut impl Dice) -> Result<Report, GameError> {
        if state.in_battle() {
            return self.refuse(state, InvalidAction::BattleInProgress);
        }
        let mut report = Report::default();

        if dice.chance(EXPLORE_LOOT_CHANCE) {
            if let Some(monster) = select_monster(&self.catalog.monsters, &state.area, dice) {
                let found = roll_drops(self.catalog, &monster.drops, &mut state.next_instance_id, dice);
                if found.is_empty() {
                    report.push(&mut state.log, MessageCategory::Item, "You search the wreckage but find nothing.");
                } else {
                    let names: Vec<String> = found
                        .iter()
                        .map(|d| self.item_name(d.category, &d.template_id))
                        .collect();
                    for item in found {
                        state.inventory.add(item);
                    }
                    report.push(
                        &mut state.log,
                        MessageCategory::Item,
                        format!("Found while exploring: {}.", names.join(", ")),
                    );
                }
            }
        }

        self.begin_battle(state, &mut report, dice)?;

        let max_depth = self.catalog.tables.world.max_depth;
        if dice.chance(EXPLORE_DEEPEN_CHANCE) && state.area.depth < max_depth {
            state.area.depth += 1;
            report.push(
                &mut state.log,
                MessageCategory::System,
                format!("Pushed deeper: floor {} depth {}.", state.area.floor, state.area.depth),
            );
        }
        Ok(report)
    }

    /// Rest outside of battle
    pub fn rest(&self, state: &mut CharacterState) -> Result<Report, GameError> {
        if state.in_battle() {
            return self.refuse(state, InvalidAction::BattleInProgress);
        }
        let stats = self.stats(state);
        let (hp_before, en_before) = (state.hp, state.en);
        state.hp = (state.hp + REST_HEAL).clamp(0, stats.hp_max);
        state.en = (state.en + REST_ENERGY).clamp(0, stats.en_max);
        self.apply_regen(state);

        let mut report = Report::default();
        report.push(
            &mut state.log,
            MessageCategory::System,
            format!("Rested: HP {} -> {}, EN {} -> {}.", hp_before, state.hp, en_before, state.en),
        );
        Ok(report)
    }

    /// Move to an unlocked floor, starting again at depth 1
    pub fn travel(&self, state: &mut CharacterState, floor: u32) -> Result<Report, GameError> {
        if state.in_battle() {
            return self.refuse(state, InvalidAction::BattleInProgress);
        }
        if floor == 0 || floor > state.area.unlocked {
            let unlocked = state.area.unlocked;
            return self.refuse(state, InvalidAction::FloorLocked { requested: floor, unlocked });
        }
        state.area.floor = floor;
        state.area.depth = 1;

        let mut report = Report::default();
        report.push(&mut state.log, MessageCategory::System, format!("Travelled to floor {}.", floor));
        Ok(report)
    }

    // === Shop and economy ===

    /// Replace the shop's offers with a fresh roll for an unlocked floor
    pub fn reroll_shop(&self, state: &mut CharacterState, floor: u32, dice: &mut impl Dice) -> Result<Report, GameError> {
        if floor == 0 || floor > state.area.unlocked {
            let unlocked = state.area.unlocked;
            return self.refuse(state, InvalidAction::FloorLocked { requested: floor, unlocked });
        }
        state.shop = reroll_shop_offers(
            self.catalog,
            floor,
            &mut state.next_offer_id,
            &mut state.next_instance_id,
            dice,
        );

        let mut report = Report::default();
        report.push(
            &mut state.log,
            MessageCategory::Item,
            format!("The shop restocked {} offers.", state.shop.len()),
        );
        Ok(report)
    }

    /// Buy an offer. The pre-rolled instance moves into the inventory.
    pub fn purchase(&self, state: &mut CharacterState, offer_id: OfferId) -> Result<Report, GameError> {
        let Some(index) = state.shop.iter().position(|o| o.id == offer_id) else {
            return self.refuse(state, InvalidAction::UnknownOffer(offer_id));
        };
        let price = state.shop[index].price;
        if state.gold < price {
            let gold = state.gold;
            return self.refuse(state, InvalidAction::InsufficientGold { price, gold });
        }

        let offer = state.shop.remove(index);
        state.gold -= price;
        let name = self.item_name(offer.item.category, &offer.item.template_id);
        state.inventory.add(offer.item);

        let mut report = Report::default();
        report.push(&mut state.log, MessageCategory::Item, format!("Bought {} for {} gold.", name, price));
        Ok(report)
    }

    /// Sell an owned item for 55% of its base price
    pub fn sell(&self, state: &mut CharacterState, id: InstanceId) -> Result<Report, GameError> {
        let Some((category, template_id)) = state.inventory.get(id).map(|i| (i.category, i.template_id.clone())) else {
            return self.refuse(state, InvalidAction::UnknownInstance(id));
        };
        let (price, _) = self.price_and_rarity(category, &template_id);
        let gain = sell_value(price);
        state.remove_item(id);
        state.gold += gain;

        let mut report = Report::default();
        report.push(
            &mut state.log,
            MessageCategory::Item,
            format!("Sold {} for {} gold.", self.item_name(category, &template_id), gain),
        );
        Ok(report)
    }

    /// Break an owned item down for scrap gold
    pub fn salvage(&self, state: &mut CharacterState, id: InstanceId) -> Result<Report, GameError> {
        let Some((category, template_id)) = state.inventory.get(id).map(|i| (i.category, i.template_id.clone())) else {
            return self.refuse(state, InvalidAction::UnknownInstance(id));
        };
        let (price, rarity) = self.price_and_rarity(category, &template_id);
        let gain = salvage_value(price, rarity);
        state.remove_item(id);
        state.gold += gain;

        let mut report = Report::default();
        report.push(
            &mut state.log,
            MessageCategory::Item,
            format!("Salvaged {} for {} gold.", self.item_name(category, &template_id), gain),
        );
        Ok(report)
    }

    /// Salvage every unequipped common item
    pub fn salvage_commons(&self, state: &mut CharacterState) -> Result<Report, GameError> {
        let junk: Vec<(InstanceId, u32)> = state
            .inventory
            .iter()
            .filter(|item| !state.loadout.is_equipped(item.id))
            .filter_map(|item| {
                let template = self.catalog.items.find(item.category, &item.template_id)?;
                (template.rarity() == Rarity::Common).then(|| (item.id, salvage_value(template.price(), Rarity::Common)))
            })
            .collect();

        let mut report = Report::default();
        if junk.is_empty() {
            report.push(&mut state.log, MessageCategory::Item, "Nothing common to salvage.");
            return Ok(report);
        }

        let mut gain = 0;
        for (id, value) in &junk {
            state.remove_item(*id);
            gain += value;
        }
        state.gold += gain;
        report.push(
            &mut state.log,
            MessageCategory::Item,
            format!("Salvaged {} common item(s) for {} gold.", junk.len(), gain),
        );
        Ok(report)
    }

    /// Order the inventory by rarity (best first), then by base price
    pub fn sort_inventory(&self, state: &mut CharacterState) -> Result<Report, GameError> {
        let key = |category: ItemCategory, id: &str| {
            self.catalog
                .items
                .find(category, id)
                .map_or((Rarity::Common, 0), |t| (t.rarity(), t.price()))
        };
        state.inventory.sort_by(|a, b| {
            let ka = key(a.category, &a.template_id);
            let kb = key(b.category, &b.template_id);
            kb.cmp(&ka)
        });

        let mut report = Report::default();
        report.push(&mut state.log, MessageCategory::Item, "Inventory sorted.");
        Ok(report)
    }

    // === Equipment and consumables ===

    /// Put an owned weapon or equipment piece into a slot
    pub fn equip(&self, state: &mut CharacterState, slot: LoadoutSlot, id: InstanceId) -> Result<Report, GameError> {
        let Some((category, template_id)) = state.inventory.get(id).map(|i| (i.category, i.template_id.clone())) else {
            return self.refuse(state, InvalidAction::UnknownInstance(id));
        };

        if !self.catalog.fits_slot(category, &template_id, slot) {
            if let (ItemCategory::Equipment, LoadoutSlot::Gear(_)) = (category, slot) {
                let declared = self
                    .template(category, &template_id)
                    .and_then(|t| t.gear())
                    .and_then(|g| g.slot);
                let Some(expected) = declared else {
                    state.log.push(
                        format!("Item #{} has no known slot and cannot be equipped.", id),
                        MessageCategory::Warning,
                    );
                    return Err(GameError::DataIntegrity(format!(
                        "no slot for equipment template '{}'",
                        template_id
                    )));
                };
                return self.refuse(state, InvalidAction::WrongEquipmentSlot { slot, expected });
            }
            return self.refuse(state, InvalidAction::IncompatibleSlot { slot, category });
        }

        let previous = state.loadout.equip(slot, id);
        let mut report = Report::default();
        let name = self.item_name(category, &template_id);
        let text = match previous.and_then(|p| state.inventory.get(p)) {
            Some(old) if old.id != id => format!(
                "Equipped {} in {} (replacing {}).",
                name,
                slot,
                self.item_name(old.category, &old.template_id)
            ),
            _ => format!("Equipped {} in {}.", name, slot),
        };
        report.push(&mut state.log, MessageCategory::Item, text);
        Ok(report)
    }

    /// Empty a slot. The item stays in the inventory.
    pub fn unequip(&self, state: &mut CharacterState, slot: LoadoutSlot) -> Result<Report, GameError> {
        let Some(id) = state.loadout.unequip(slot) else {
            return self.refuse(state, InvalidAction::SlotEmpty(slot));
        };
        let name = state
            .inventory
            .get(id)
            .map_or_else(|| format!("item #{}", id), |i| self.item_name(i.category, &i.template_id));

        let mut report = Report::default();
        report.push(&mut state.log, MessageCategory::Item, format!("Unequipped {} from {}.", name, slot));
        Ok(report)
    }

    /// Consume an owned consumable
    pub fn use_consumable(&self, state: &mut CharacterState, id: InstanceId) -> Result<Report, GameError> {
        let Some((category, template_id)) = state.inventory.get(id).map(|i| (i.category, i.template_id.clone())) else {
            return self.refuse(state, InvalidAction::UnknownInstance(id));
        };
        if category != ItemCategory::Consumable {
            return self.refuse(state, InvalidAction::NotConsumable(id));
        }

        let mut report = Report::default();
        state.remove_item(id);

        let Some(TemplateRef::Consumable(template)) = self.template(category, &template_id) else {
            report.push(
                &mut state.log,
                MessageCategory::Warning,
                format!("Used unknown consumable '{}'; nothing happened.", template_id),
            );
            return Ok(report);
        };

        let stats = self.stats(state);
        let text = match template.effect {
            ConsumableEffect::Heal(amount) => {
                let before = state.hp;
                state.hp = (state.hp + amount).clamp(0, stats.hp_max);
                format!("Used {}: HP {} -> {}.", template.name, before, state.hp)
            }
            ConsumableEffect::Energy(amount) => {
                let before = state.en;
                state.en = (state.en + amount).clamp(0, stats.en_max);
                format!("Used {}: EN {} -> {}.", template.name, before, state.en)
            }
            ConsumableEffect::Buff { kind, value, turns } => {
                state.buffs.add(kind, value, turns);
                format!("Used {}: {} +{} for {} battles.", template.name, kind.name(), value, turns)
            }
        };
        report.push(&mut state.log, MessageCategory::Item, text);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::monsters::default_monster_templates;
    use crate::dice::scripted::ScriptedDice;
    use crate::items::{EquipSlot, ItemInstance, StatLine};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (Catalog, CharacterState) {
        let catalog = Catalog::default();
        let state = CharacterState::new_character(&catalog, &mut ScriptedDice::new());
        (catalog, state)
    }

    /// Start a battle against a specific monster at depth 1
    fn fight(state: &mut CharacterState, catalog: &Catalog, monster: &str) {
        let template = catalog.monsters.find(monster).unwrap();
        state.battle = Some(CombatSession::new(EnemyInstance::scaled(template, 1)));
    }

    #[test]
    fn test_attack_without_battle_is_refused_without_mutation() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        let before = state.clone();

        let err = engine.player_attack(&mut state, &mut ScriptedDice::new()).unwrap_err();
        assert_eq!(err, GameError::InvalidAction(InvalidAction::NoActiveBattle));
        assert_eq!(state.log.len(), before.log.len() + 1);
        state.log = before.log.clone();
        assert_eq!(state, before);
    }

    #[test]
    fn test_start_encounter_creates_fresh_session() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        let report = engine.start_encounter(&mut state, &mut ScriptedDice::new()).unwrap();
        assert_eq!(report.lines.len(), 1);
        let session = state.battle.as_ref().unwrap();
        assert_eq!(session.turn, 1);
        assert_eq!(session.enemy_hp, session.enemy.hp_max);
        assert!(session.first_hit_available);

        assert!(engine.start_encounter(&mut state, &mut ScriptedDice::new()).is_err());
    }

    #[test]
    fn test_empty_roster_is_data_integrity_error() {
        let mut catalog = Catalog::default();
        catalog.monsters.templates.clear();
        let mut state = CharacterState::default();
        let engine = Engine::new(&catalog);
        let err = engine.start_encounter(&mut state, &mut ScriptedDice::new()).unwrap_err();
        assert!(matches!(err, GameError::DataIntegrity(_)));
        assert!(!state.in_battle());
    }

    #[test]
    fn test_attack_then_enemy_turn() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        fight(&mut state, &catalog, "m_rust_hound");
        let hp_before = state.hp;

        let report = engine.player_attack(&mut state, &mut ScriptedDice::new()).unwrap();
        assert!(report.outcome.is_none());
        let session = state.battle.as_ref().unwrap();
        assert!(session.enemy_hp < session.enemy.hp_max);
        assert_eq!(session.turn, 2);
        // Scrap Plating halves the first hit
        assert!(!session.first_hit_available);
        assert!(state.hp < hp_before);
    }

    #[test]
    fn test_killing_blow_grants_rewards() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        fight(&mut state, &catalog, "m_scrap_drone");
        state.battle.as_mut().unwrap().enemy_hp = 1;
        let gold_before = state.gold;

        let report = engine.player_attack(&mut state, &mut ScriptedDice::new()).unwrap();
        assert_eq!(report.outcome, Some(BattleOutcome::Victory));
        assert!(!state.in_battle());
        // 8 gold + U(0, 3) at the low end
        assert_eq!(state.gold, gold_before + 8);
        assert_eq!(state.xp, 10);
    }

    #[test]
    fn test_boss_victory_unlocks_next_floor() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        fight(&mut state, &catalog, "m_junk_titan");
        state.battle.as_mut().unwrap().enemy_hp = 1;
        engine.player_attack(&mut state, &mut ScriptedDice::new()).unwrap();
        assert_eq!(state.area.unlocked, 2);

        // A second kill on floor 1 no longer matches the ceiling
        fight(&mut state, &catalog, "m_junk_titan");
        state.battle.as_mut().unwrap().enemy_hp = 1;
        engine.player_attack(&mut state, &mut ScriptedDice::new()).unwrap();
        assert_eq!(state.area.unlocked, 2);
    }

    #[test]
    fn test_unlock_ceiling_is_capped() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        state.area = crate::combat::Area { floor: 3, unlocked: 3, depth: 1 };
        fight(&mut state, &catalog, "m_void_colossus");
        state.battle.as_mut().unwrap().enemy_hp = 1;
        engine.player_attack(&mut state, &mut ScriptedDice::new()).unwrap();
        assert_eq!(state.area.unlocked, catalog.tables.world.max_floor);
    }

    #[test]
    fn test_skill_requires_energy() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        fight(&mut state, &catalog, "m_rust_hound");
        state.en = 2;
        let before = state.clone();

        let err = engine.player_skill(&mut state, "overdrive", &mut ScriptedDice::new()).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidAction(InvalidAction::NotEnoughEnergy { needed: 6, available: 2, .. })
        ));
        assert_eq!(state.battle, before.battle);
        assert_eq!(state.en, 2);

        let err = engine.player_skill(&mut state, "nope", &mut ScriptedDice::new()).unwrap_err();
        assert_eq!(err, GameError::InvalidAction(InvalidAction::UnknownSkill("nope".to_string())));
    }

    #[test]
    fn test_skill_spends_energy_and_applies_riders() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        fight(&mut state, &catalog, "m_warlord");
        state.en = 30;

        engine.player_skill(&mut state, "bulwark", &mut ScriptedDice::new()).unwrap();
        let session = state.battle.as_ref().unwrap();
        // Guard 3 turns, one already ticked at the enemy turn
        assert_eq!(session.player_effects.total(StatusKind::Guard), 4);
        // cost 7, then +0 regen (Spark Core gives health only)
        assert_eq!(state.en, 23);

        engine.player_skill(&mut state, "overload", &mut ScriptedDice::new()).unwrap();
        let session = state.battle.as_ref().unwrap();
        assert!(session.player_effects.has(StatusKind::Surcharge));
        assert_eq!(state.en, 13);

        // Overdrive now costs 6 + 3 surcharge
        engine.player_skill(&mut state, "overdrive", &mut ScriptedDice::new()).unwrap();
        assert_eq!(state.en, 4);
    }

    #[test]
    fn test_bleed_rider_and_tick() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        fight(&mut state, &catalog, "m_warlord");
        let mut dice = ScriptedDice::new().with_units(&[0.99, 0.1]);
        // units: player crit miss, bleed proc; enemy crit uses the default
        engine.player_skill(&mut state, "rending_slash", &mut dice).unwrap();
        let session = state.battle.as_ref().unwrap();
        // Applied for 3, ticked once
        assert_eq!(session.enemy_effects.effects[0].turns, 2);
        assert!(state.log.iter().any(|m| m.text.contains("bleeds for 3")));
    }

    #[test]
    fn test_status_tick_kill_skips_enemy_swing() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        fight(&mut state, &catalog, "m_warlord");
        let session = state.battle.as_mut().unwrap();
        session.enemy_hp = 3;
        session.enemy_effects.add(StatusKind::Bleed, 3, 2);
        let hp_before = state.hp;

        // Failed retreat hands the turn to the enemy
        let report = engine.player_flee(&mut state, &mut ScriptedDice::new()).unwrap();
        assert_eq!(report.outcome, Some(BattleOutcome::Victory));
        assert!(report.lines.iter().any(|l| l.contains("bleeds for 3")));
        assert!(!report.lines.iter().any(|l| l.contains("strikes back")));
        assert_eq!(state.hp, hp_before);
        assert!(!state.in_battle());
    }

    #[test]
    fn test_drain_rider_ticks_on_next_enemy_turn() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        fight(&mut state, &catalog, "m_shock_crawler");

        // units: player crit miss, enemy crit miss, drain proc (0.1 < 0.30)
        let mut dice = ScriptedDice::new().with_units(&[0.99, 0.99, 0.1]);
        engine.player_attack(&mut state, &mut dice).unwrap();
        let session = state.battle.as_ref().unwrap();
        assert!(session.player_effects.has(StatusKind::EnergyDrain));
        assert!(!state.log.iter().any(|m| m.text.starts_with("Energy drained")));
        let en_before = state.en;

        let report = engine.player_attack(&mut state, &mut ScriptedDice::new()).unwrap();
        assert!(report.outcome.is_none());
        assert_eq!(state.en, en_before - 2);
        assert!(report.lines.iter().any(|l| l.starts_with("Energy drained: -2")));
    }

    #[test]
    fn test_explore_loot_goes_to_inventory() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        let count_before = state.inventory.count();
        // loot hit, drone drop table, weapon and equipment miss, consumable
        // hit (0.1 < 0.20), rarity, battle pick, no deepen
        let mut dice = ScriptedDice::new().with_units(&[0.0, 0.0, 0.5, 0.5, 0.1, 0.0, 0.0, 0.99]);
        let report = engine.explore(&mut state, &mut dice).unwrap();

        assert_eq!(state.inventory.count(), count_before + 1);
        assert_eq!(state.inventory.by_category(ItemCategory::Consumable).count(), 2);
        assert!(report.lines.iter().any(|l| l.starts_with("Found while exploring")));
        assert!(state.in_battle());
        assert_eq!(state.area.depth, 1);
    }

    #[test]
    fn test_flee_success_and_failure() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        fight(&mut state, &catalog, "m_rust_hound");

        // Draw at the threshold fails and the enemy swings
        let hp_before = state.hp;
        let mut fail = ScriptedDice::new().with_units(&[0.45]);
        let report = engine.player_flee(&mut state, &mut fail).unwrap();
        assert!(report.outcome.is_none());
        assert!(state.in_battle());
        assert!(state.hp < hp_before);

        // Draw below the threshold succeeds
        let mut ok = ScriptedDice::new().with_units(&[0.44]);
        let report = engine.player_flee(&mut state, &mut ok).unwrap();
        assert_eq!(report.outcome, Some(BattleOutcome::Fled));
        assert!(!state.in_battle());
    }

    #[test]
    fn test_defeat_penalty_and_reset() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        state.area = crate::combat::Area { floor: 2, unlocked: 2, depth: 5 };
        fight(&mut state, &catalog, "m_hive_overseer");
        state.hp = 1;
        state.gold = 100;

        let report = engine.player_attack(&mut state, &mut ScriptedDice::new()).unwrap();
        assert_eq!(report.outcome, Some(BattleOutcome::Defeat));
        assert_eq!(state.gold, 80);
        assert_eq!(state.area.floor, 1);
        assert_eq!(state.area.depth, 1);
        assert_eq!(state.area.unlocked, 2);
        let stats = engine.stats(&state);
        assert_eq!(state.hp, stats.hp_max * 65 / 100);
        assert!(!state.in_battle());
    }

    #[test]
    fn test_battle_always_terminates() {
        let catalog = Catalog::default();
        let engine = Engine::new(&catalog);
        let mut rng = StdRng::seed_from_u64(5);
        for seed_monster in default_monster_templates().templates {
            let mut state = CharacterState::new_character(&catalog, &mut rng);
            state.battle = Some(CombatSession::new(EnemyInstance::scaled(&seed_monster, 1)));
            let mut turns = 0;
            while state.in_battle() {
                engine.player_attack(&mut state, &mut rng).unwrap();
                turns += 1;
                assert!(turns < 500, "battle against {} did not end", seed_monster.id);
            }
        }
    }

    #[test]
    fn test_purchase_conservation() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        state.gold = 1000;
        let offer = state.shop[0].clone();
        let count = state.inventory.count();

        engine.purchase(&mut state, offer.id).unwrap();
        assert_eq!(state.gold, 1000 - offer.price);
        assert_eq!(state.inventory.count(), count + 1);
        assert_eq!(state.inventory.get(offer.item.id), Some(&offer.item));
        assert!(state.shop.iter().all(|o| o.id != offer.id));

        assert!(engine.purchase(&mut state, offer.id).is_err());
    }

    #[test]
    fn test_failed_purchase_leaves_state_unchanged() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        state.gold = 0;
        let before = state.clone();
        let offer = state.shop[0].id;

        let err = engine.purchase(&mut state, offer).unwrap_err();
        assert!(matches!(err, GameError::InvalidAction(InvalidAction::InsufficientGold { gold: 0, .. })));
        state.log = before.log.clone();
        assert_eq!(state, before);
    }

    #[test]
    fn test_equip_unequip_round_trip() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        let mut dice = ScriptedDice::new().high();
        let helm = state.alloc_instance_id();
        let template = catalog.items.find(ItemCategory::Equipment, "a_002").unwrap();
        state.inventory.add(crate::items::generate_instance(helm, template, &mut dice));
        let original = state.inventory.get(helm).cloned().unwrap();

        let slot = LoadoutSlot::Gear(EquipSlot::Head);
        engine.equip(&mut state, slot, helm).unwrap();
        assert_eq!(state.loadout.get(slot), Some(helm));
        engine.unequip(&mut state, slot).unwrap();
        assert_eq!(state.loadout.get(slot), None);
        assert_eq!(state.inventory.get(helm), Some(&original));

        assert!(engine.unequip(&mut state, slot).is_err());
    }

    #[test]
    fn test_equip_rejects_wrong_slots() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        let plating = state.loadout.get(LoadoutSlot::Gear(EquipSlot::Body)).unwrap();
        let rifle = state.loadout.get(LoadoutSlot::MainHand).unwrap();

        let err = engine.equip(&mut state, LoadoutSlot::Gear(EquipSlot::Head), plating).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidAction(InvalidAction::WrongEquipmentSlot { expected: EquipSlot::Body, .. })
        ));
        let err = engine.equip(&mut state, LoadoutSlot::Gear(EquipSlot::Core), rifle).unwrap_err();
        assert!(matches!(err, GameError::InvalidAction(InvalidAction::IncompatibleSlot { .. })));
        let err = engine.equip(&mut state, LoadoutSlot::MainHand, InstanceId(999)).unwrap_err();
        assert_eq!(err, GameError::InvalidAction(InvalidAction::UnknownInstance(InstanceId(999))));
        assert_eq!(state.loadout.get(LoadoutSlot::MainHand), Some(rifle));
    }

    #[test]
    fn test_sell_and_salvage_values() {
        assert_eq!(sell_value(30), 16);
        assert_eq!(sell_value(0), 1);
        assert_eq!(salvage_value(30, Rarity::Common), 9);
        assert_eq!(salvage_value(160, Rarity::Legendary), 46);
        assert_eq!(salvage_value(0, Rarity::Elite), 5);
        // Large prices do not overflow
        assert_eq!(sell_value(u32::MAX), (u64::from(u32::MAX) * 55 / 100) as u32);
        assert_eq!(salvage_value(u32::MAX, Rarity::Legendary), (u64::from(u32::MAX) / 4) as u32 + 6);
    }

    #[test]
    fn test_sell_equipped_clears_slot() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        let rifle = state.loadout.get(LoadoutSlot::MainHand).unwrap();
        let gold = state.gold;
        engine.sell(&mut state, rifle).unwrap();
        assert_eq!(state.gold, gold + 16);
        assert_eq!(state.loadout.get(LoadoutSlot::MainHand), None);
        assert!(!state.inventory.contains(rifle));
    }

    #[test]
    fn test_salvage_commons_keeps_equipped() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        let gold = state.gold;
        // Only the starter Repair Kit is unequipped and common: 12 * 25% = 3, + 2
        engine.salvage_commons(&mut state).unwrap();
        assert_eq!(state.gold, gold + 5);
        assert_eq!(state.inventory.count(), 4);
        assert!(state.loadout_is_consistent());

        let report = engine.salvage_commons(&mut state).unwrap();
        assert_eq!(report.lines, vec!["Nothing common to salvage.".to_string()]);
    }

    #[test]
    fn test_use_consumables() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        let kit = state.inventory.by_category(ItemCategory::Consumable).next().unwrap().id;
        let max = engine.stats(&state).hp_max;
        state.hp = 10;
        engine.use_consumable(&mut state, kit).unwrap();
        assert_eq!(state.hp, 35.min(max));
        assert!(!state.inventory.contains(kit));

        let chip = state.alloc_instance_id();
        state.inventory.add(ItemInstance::unrolled(chip, ItemCategory::Consumable, "p_003"));
        let crit_before = engine.stats(&state).crit;
        engine.use_consumable(&mut state, chip).unwrap();
        assert_eq!(engine.stats(&state).crit, crit_before + 10);

        let rifle = state.loadout.get(LoadoutSlot::MainHand).unwrap();
        let err = engine.use_consumable(&mut state, rifle).unwrap_err();
        assert_eq!(err, GameError::InvalidAction(InvalidAction::NotConsumable(rifle)));
    }

    #[test]
    fn test_buffs_count_down_per_battle() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        state.buffs.add(StatusKind::AttackUp, 5, 1);
        fight(&mut state, &catalog, "m_scrap_drone");
        engine.player_flee(&mut state, &mut ScriptedDice::new().with_units(&[0.0])).unwrap();
        assert!(state.buffs.is_empty());
    }

    #[test]
    fn test_rest_refused_in_battle() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        state.hp = 5;
        state.en = 0;
        engine.rest(&mut state).unwrap();
        // +18, then Spark Core regen +1
        assert_eq!(state.hp, 24);
        assert_eq!(state.en, 10);

        fight(&mut state, &catalog, "m_scrap_drone");
        assert_eq!(
            engine.rest(&mut state).unwrap_err(),
            GameError::InvalidAction(InvalidAction::BattleInProgress)
        );
    }

    #[test]
    fn test_travel_respects_unlocks() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        assert!(engine.travel(&mut state, 2).is_err());
        state.area.unlocked = 2;
        state.area.depth = 7;
        engine.travel(&mut state, 2).unwrap();
        assert_eq!(state.area.floor, 2);
        assert_eq!(state.area.depth, 1);
        assert!(engine.travel(&mut state, 0).is_err());
    }

    #[test]
    fn test_explore_starts_battle_and_deepens() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        // no loot (0.5 > 0.12), monster pick, then deepen (0.1 < 0.25)
        let mut dice = ScriptedDice::new().with_units(&[0.5, 0.0, 0.1]);
        engine.explore(&mut state, &mut dice).unwrap();
        assert!(state.in_battle());
        assert_eq!(state.area.depth, 2);
        assert!(engine.explore(&mut state, &mut ScriptedDice::new()).is_err());
    }

    #[test]
    fn test_explore_depth_is_capped() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        state.area.depth = catalog.tables.world.max_depth;
        let mut dice = ScriptedDice::new().with_units(&[0.5, 0.0, 0.0]);
        engine.explore(&mut state, &mut dice).unwrap();
        assert_eq!(state.area.depth, catalog.tables.world.max_depth);
    }

    #[test]
    fn test_sort_inventory() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        let cannon = state.alloc_instance_id();
        state.inventory.add(ItemInstance::unrolled(cannon, ItemCategory::Weapon, "w_005"));
        engine.sort_inventory(&mut state).unwrap();
        let first = state.inventory.iter().next().unwrap();
        assert_eq!(first.id, cannon);
        // Commons follow by descending price: Spark Core (35) first
        let second = state.inventory.iter().nth(1).unwrap();
        assert_eq!(second.template_id, "c_001");
    }

    #[test]
    fn test_reroll_shop_requires_unlocked_floor() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        let old: Vec<_> = state.shop.iter().map(|o| o.id).collect();
        engine.reroll_shop(&mut state, 1, &mut ScriptedDice::new()).unwrap();
        assert!(state.shop.iter().all(|o| !old.contains(&o.id)));
        assert!(engine.reroll_shop(&mut state, 3, &mut ScriptedDice::new()).is_err());
    }

    #[test]
    fn test_missing_equipped_template_is_reported() {
        let (catalog, mut state) = setup();
        let engine = Engine::new(&catalog);
        let ghost = state.alloc_instance_id();
        let mut item = ItemInstance::unrolled(ghost, ItemCategory::Weapon, "w_gone");
        item.roll = Some(StatLine { attack: 3, ..StatLine::default() });
        state.inventory.add(item);
        state.loadout.equip(LoadoutSlot::OffHand, ghost);

        let report = engine.start_encounter(&mut state, &mut ScriptedDice::new()).unwrap();
        assert!(report.lines.iter().any(|l| l.contains("could not be resolved")));
    }
}

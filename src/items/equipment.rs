//! Equipment loadout
//!
//! Named slots holding references to inventory instances. The loadout never
//! owns items; the character keeps every slot pointing at something in the
//! inventory.

use serde::{Deserialize, Serialize};

use super::item::{EquipSlot, InstanceId, LoadoutSlot};

/// Player equipment slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Loadout {
    pub main_hand: Option<InstanceId>,
    pub off_hand: Option<InstanceId>,
    pub head: Option<InstanceId>,
    pub body: Option<InstanceId>,
    pub arms: Option<InstanceId>,
    pub legs: Option<InstanceId>,
    pub booster: Option<InstanceId>,
    pub core: Option<InstanceId>,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, slot: LoadoutSlot) -> &mut Option<InstanceId> {
        match slot {
            LoadoutSlot::MainHand => &mut self.main_hand,
            LoadoutSlot::OffHand => &mut self.off_hand,
            LoadoutSlot::Gear(EquipSlot::Head) => &mut self.head,
            LoadoutSlot::Gear(EquipSlot::Body) => &mut self.body,
            LoadoutSlot::Gear(EquipSlot::Arms) => &mut self.arms,
            LoadoutSlot::Gear(EquipSlot::Legs) => &mut self.legs,
            LoadoutSlot::Gear(EquipSlot::Booster) => &mut self.booster,
            LoadoutSlot::Gear(EquipSlot::Core) => &mut self.core,
        }
    }

    /// Get the instance referenced by a slot
    pub fn get(&self, slot: LoadoutSlot) -> Option<InstanceId> {
        match slot {
            LoadoutSlot::MainHand => self.main_hand,
            LoadoutSlot::OffHand => self.off_hand,
            LoadoutSlot::Gear(EquipSlot::Head) => self.head,
            LoadoutSlot::Gear(EquipSlot::Body) => self.body,
            LoadoutSlot::Gear(EquipSlot::Arms) => self.arms,
            LoadoutSlot::Gear(EquipSlot::Legs) => self.legs,
            LoadoutSlot::Gear(EquipSlot::Booster) => self.booster,
            LoadoutSlot::Gear(EquipSlot::Core) => self.core,
        }
    }

    /// Point a slot at an instance, returning the previous occupant.
    /// An instance can only sit in one slot, so any other slot holding it is
    /// cleared first.
    pub fn equip(&mut self, slot: LoadoutSlot, id: InstanceId) -> Option<InstanceId> {
        self.clear_instance(id);
        self.slot_mut(slot).replace(id)
    }

    /// Clear a slot, returning what it held
    pub fn unequip(&mut self, slot: LoadoutSlot) -> Option<InstanceId> {
        self.slot_mut(slot).take()
    }

    /// Clear every slot referencing `id`. Returns true if any slot changed.
    pub fn clear_instance(&mut self, id: InstanceId) -> bool {
        let mut changed = false;
        for &slot in LoadoutSlot::all() {
            let entry = self.slot_mut(slot);
            if *entry == Some(id) {
                *entry = None;
                changed = true;
            }
        }
        changed
    }

    /// Slot currently holding `id`, if any
    pub fn slot_of(&self, id: InstanceId) -> Option<LoadoutSlot> {
        LoadoutSlot::all().iter().copied().find(|&slot| self.get(slot) == Some(id))
    }

    pub fn is_equipped(&self, id: InstanceId) -> bool {
        self.slot_of(id).is_some()
    }

    /// Occupied slots in display order
    pub fn equipped(&self) -> impl Iterator<Item = (LoadoutSlot, InstanceId)> + '_ {
        LoadoutSlot::all()
            .iter()
            .filter_map(move |&slot| self.get(slot).map(|id| (slot, id)))
    }
}

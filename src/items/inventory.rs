//! Inventory system
//!
//! Ordered collection of the item instances a character owns.

use serde::{Deserialize, Serialize};

use super::item::{InstanceId, ItemCategory, ItemInstance};

/// Ordered list of owned instances
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<ItemInstance>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current number of items
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item at the end
    pub fn add(&mut self, item: ItemInstance) {
        self.items.push(item);
    }

    /// Remove an item by ID, keeping the order of the rest
    pub fn remove(&mut self, id: InstanceId) -> Option<ItemInstance> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, id: InstanceId) -> Option<&ItemInstance> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemInstance> {
        self.items.iter()
    }

    /// Items of one category, in inventory order
    pub fn by_category(&self, category: ItemCategory) -> impl Iterator<Item = &ItemInstance> {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// Stable sort with a caller-supplied ordering
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&ItemInstance, &ItemInstance) -> std::cmp::Ordering,
    {
        self.items.sort_by(compare);
    }
}

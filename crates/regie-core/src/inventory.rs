use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::id::ItemId;

/// Items carried by the player, keyed by item ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    items: BTreeMap<ItemId, u32>,
    /// Whether the inventory is locked against player use.
    #[serde(default)]
    pub is_locked: bool,
}

impl Inventory {
    /// Create an empty, unlocked inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many of an item the player holds.
    pub fn count(&self, item: ItemId) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    /// Whether at least one of the item is held.
    pub fn contains(&self, item: ItemId) -> bool {
        self.count(item) > 0
    }

    /// Give the player `amount` of an item.
    pub fn add(&mut self, item: ItemId, amount: u32) {
        if amount == 0 {
            return;
        }
        let held = self.items.entry(item).or_insert(0);
        *held = held.saturating_add(amount);
    }

    /// Take `amount` of an item away. Fails without changing anything if too few are held.
    pub fn remove(&mut self, item: ItemId, amount: u32) -> CoreResult<()> {
        let held = self.count(item);
        if held < amount {
            return Err(CoreError::NotEnoughItems {
                item,
                held,
                wanted: amount,
            });
        }
        if held == amount {
            self.items.remove(&item);
        } else {
            self.items.insert(item, held - amount);
        }
        Ok(())
    }

    /// Whether the player carries nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over held items and their counts.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.items.iter().map(|(id, n)| (*id, *n))
    }
}

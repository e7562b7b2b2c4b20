//! Inventory
//!
//! Counted item storage for one character. Keys are item ids; the map is
//! ordered so listings render in a stable order. There is no capacity
//! limit and no slot layout.

use std::collections::BTreeMap;

use crate::error::GameError;
use crate::quest::events::ItemCheckable;

#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Add a quantity of an item. Adding zero changes nothing.
    pub fn add_item(&mut self, item_id: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        *self.items.entry(item_id.to_string()).or_insert(0) += quantity;
    }

    /// Remove a quantity of an item. Fails without changing anything if
    /// fewer than `quantity` are held.
    pub fn remove_item(&mut self, item_id: &str, quantity: u32) -> Result<(), GameError> {
        let held = self.items.get(item_id).copied().unwrap_or(0);
        if held < quantity {
            return Err(GameError::MissingItem(item_id.to_string()));
        }
        if held == quantity {
            self.items.remove(item_id);
        } else {
            self.items.insert(item_id.to_string(), held - quantity);
        }
        Ok(())
    }

    /// Check whether at least one of the item is held
    pub fn check_item(&self, item_id: &str) -> bool {
        self.items.contains_key(item_id)
    }

    /// How many of the item are held
    pub fn quantity(&self, item_id: &str) -> u32 {
        self.items.get(item_id).copied().unwrap_or(0)
    }

    /// Remove and return everything held
    pub fn drain(&mut self) -> Vec<(String, u32)> {
        let drained: Vec<(String, u32)> = self.items.iter().map(|(k, v)| (k.clone(), *v)).collect();
        self.items.clear();
        drained
    }

    /// Iterate over held items and their counts
    pub fn iter(&self) -> impl Iterator<Item = (&String, u32)> {
        self.items.iter().map(|(k, v)| (k, *v))
    }

    /// Number of distinct item ids held
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemCheckable for Inventory {
    fn check_item(&self, item_id: &str) -> bool {
        self.items.contains_key(item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_stack() {
        let mut inv = Inventory::new();
        inv.add_item("coin", 1);
        inv.add_item("coin", 2);
        assert_eq!(inv.quantity("coin"), 3);
        assert!(inv.check_item("coin"));
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut inv = Inventory::new();
        inv.add_item("coin", 0);
        assert!(!inv.check_item("coin"));
        assert!(inv.is_empty());
    }

    #[test]
    fn test_remove_insufficient_fails() {
        let mut inv = Inventory::new();
        inv.add_item("coin", 1);
        let result = inv.remove_item("coin", 2);
        assert!(matches!(result, Err(GameError::MissingItem(_))));
        // Nothing was removed on failure
        assert_eq!(inv.quantity("coin"), 1);
    }

    #[test]
    fn test_remove_clears_entry_at_zero() {
        let mut inv = Inventory::new();
        inv.add_item("pizza-slice", 2);
        inv.remove_item("pizza-slice", 2).unwrap();
        assert!(!inv.check_item("pizza-slice"));
        assert_eq!(inv.quantity("pizza-slice"), 0);
    }

    #[test]
    fn test_drain_returns_everything() {
        let mut inv = Inventory::new();
        inv.add_item("coin", 1);
        inv.add_item("knife", 1);
        let drained = inv.drain();
        assert_eq!(drained.len(), 2);
        assert!(inv.is_empty());
    }
}

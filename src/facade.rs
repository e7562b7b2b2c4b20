//! Character Inventory Facade
//!
//! Fronts one character and their inventory with a single surface, so
//! callers never juggle the pair. Mutations commit first and then hand
//! back the quest event describing what changed; routing that event is
//! the session's job. The facade stores no observers and no registry:
//! item definitions arrive as arguments.

use crate::character::{EquippedItem, GameCharacter};
use crate::data::item_def::{ItemDefinition, ItemKind};
use crate::error::GameError;
use crate::inventory::Inventory;
use crate::quest::events::{ItemCheckable, QuestEvent};

pub struct CharacterInventoryFacade {
    character: GameCharacter,
    inventory: Inventory,
}

impl CharacterInventoryFacade {
    pub fn new(character: GameCharacter) -> Self {
        Self {
            character,
            inventory: Inventory::new(),
        }
    }

    pub fn character(&self) -> &GameCharacter {
        &self.character
    }

    pub(crate) fn character_mut(&mut self) -> &mut GameCharacter {
        &mut self.character
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn id(&self) -> &str {
        &self.character.id
    }

    pub fn display_name(&self) -> &str {
        &self.character.display_name
    }

    /// Add items to the inventory. The change is committed before the
    /// event is produced, so anyone handling the event sees the new
    /// possession state.
    pub fn add_item(&mut self, item_id: &str, quantity: u32) -> QuestEvent {
        self.inventory.add_item(item_id, quantity);
        QuestEvent::ItemAcquired {
            item_id: item_id.to_string(),
        }
    }

    /// Consume one healing or status item and apply its effect
    pub fn consume_item(&mut self, def: &ItemDefinition) -> Result<(), GameError> {
        match def.kind {
            ItemKind::Healing { amount } => {
                self.inventory.remove_item(&def.id, 1)?;
                self.character.heal(amount);
                Ok(())
            }
            ItemKind::Status { stat, amount } => {
                self.inventory.remove_item(&def.id, 1)?;
                self.character.raise_stat(stat, amount);
                Ok(())
            }
            _ => Err(GameError::NotConsumable(def.id.clone())),
        }
    }

    /// Equip a weapon or armor item from the inventory. A previous
    /// occupant of the slot goes back into the inventory.
    pub fn equip_item(&mut self, def: &ItemDefinition) -> Result<(), GameError> {
        let (slot, bonus) = match def.kind {
            ItemKind::Weapon { damage_bonus } => (&mut self.character.equipment.weapon, damage_bonus),
            ItemKind::Armor { defense_bonus } => (&mut self.character.equipment.armor, defense_bonus),
            _ => return Err(GameError::NotEquippable(def.id.clone())),
        };
        self.inventory.remove_item(&def.id, 1)?;
        let previous = slot.replace(EquippedItem {
            item_id: def.id.clone(),
            bonus,
        });
        if let Some(prev) = previous {
            self.inventory.add_item(&prev.item_id, 1);
        }
        Ok(())
    }

    /// Return the equipped weapon to the inventory, if any
    pub fn unequip_weapon(&mut self) -> Option<String> {
        let prev = self.character.equipment.weapon.take()?;
        self.inventory.add_item(&prev.item_id, 1);
        Some(prev.item_id)
    }

    /// Return the equipped armor to the inventory, if any
    pub fn unequip_armor(&mut self) -> Option<String> {
        let prev = self.character.equipment.armor.take()?;
        self.inventory.add_item(&prev.item_id, 1);
        Some(prev.item_id)
    }

    /// Empty the inventory, returning its contents. Used when a
    /// defeated character drops what they carried.
    pub fn drain_inventory(&mut self) -> Vec<(String, u32)> {
        self.inventory.drain()
    }

    pub fn take_damage(&mut self, damage: i32) -> bool {
        self.character.take_damage(damage)
    }

    pub fn is_defeated(&self) -> bool {
        self.character.is_defeated()
    }

    pub fn effective_attack(&self) -> i32 {
        self.character.effective_attack()
    }

    pub fn effective_defense(&self) -> i32 {
        self.character.effective_defense()
    }
}

impl ItemCheckable for CharacterInventoryFacade {
    fn check_item(&self, item_id: &str) -> bool {
        self.inventory.check_item(item_id)
    }
}

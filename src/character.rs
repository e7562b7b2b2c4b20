//! Game Characters
//!
//! The player and every NPC share one character structure: hit points,
//! combat stats, and two equipment slots. What separates them is the
//! role, which for NPCs carries dialogue lines and an optional quest
//! they hand out.

use serde::{Deserialize, Serialize};

use crate::data::item_def::StatKind;

// ============================================================================
// Dialogue
// ============================================================================

/// Lines an NPC can say. Which one plays depends on the state of the
/// quest linked to the NPC; `greeting` is the fallback when no other
/// line applies.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct NpcDialogue {
    pub greeting: Option<String>,
    /// Said while the linked quest is not yet accepted.
    pub quest_offer: Option<String>,
    /// Said while the linked quest is accepted but unfinished.
    pub quest_progress: Option<String>,
    /// Said once the linked quest is completed.
    pub quest_complete: Option<String>,
    /// Said when the character is first attacked.
    pub combat: Option<String>,
}

// ============================================================================
// Roles
// ============================================================================

#[derive(Debug, Clone)]
pub enum CharacterRole {
    Player,
    Npc {
        dialogue: NpcDialogue,
        /// Quest this NPC offers and reacts to, if any.
        quest_id: Option<String>,
    },
}

// ============================================================================
// Equipment
// ============================================================================

/// An occupied equipment slot. The bonus is copied out of the item
/// definition at equip time, so a character stays self-contained once
/// assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub item_id: String,
    pub bonus: i32,
}

#[derive(Debug, Clone, Default)]
pub struct Equipment {
    pub weapon: Option<EquippedItem>,
    pub armor: Option<EquippedItem>,
}

// ============================================================================
// Character
// ============================================================================

#[derive(Debug, Clone)]
pub struct GameCharacter {
    pub id: String,
    pub display_name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub equipment: Equipment,
    pub role: CharacterRole,
}

impl GameCharacter {
    pub fn new_player(id: &str, display_name: &str, max_hp: i32, attack: i32, defense: i32) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            hp: max_hp,
            max_hp,
            attack,
            defense,
            equipment: Equipment::default(),
            role: CharacterRole::Player,
        }
    }

    pub fn new_npc(
        id: &str,
        display_name: &str,
        max_hp: i32,
        attack: i32,
        defense: i32,
        dialogue: NpcDialogue,
        quest_id: Option<String>,
    ) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            hp: max_hp,
            max_hp,
            attack,
            defense,
            equipment: Equipment::default(),
            role: CharacterRole::Npc { dialogue, quest_id },
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.role, CharacterRole::Player)
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Take damage and return true if this hit defeated the character
    pub fn take_damage(&mut self, damage: i32) -> bool {
        self.hp = (self.hp - damage).max(0);
        self.hp == 0
    }

    /// Restore hit points, capped at the maximum
    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Permanently raise a base stat
    pub fn raise_stat(&mut self, stat: StatKind, amount: i32) {
        match stat {
            StatKind::Attack => self.attack += amount,
            StatKind::Defense => self.defense += amount,
        }
    }

    /// Base attack plus the equipped weapon bonus
    pub fn effective_attack(&self) -> i32 {
        self.attack + self.equipment.weapon.as_ref().map_or(0, |w| w.bonus)
    }

    /// Base defense plus the equipped armor bonus
    pub fn effective_defense(&self) -> i32 {
        self.defense + self.equipment.armor.as_ref().map_or(0, |a| a.bonus)
    }

    /// Dialogue lines, for NPCs
    pub fn dialogue(&self) -> Option<&NpcDialogue> {
        match &self.role {
            CharacterRole::Player => None,
            CharacterRole::Npc { dialogue, .. } => Some(dialogue),
        }
    }

    /// Quest this character offers, for NPCs that have one
    pub fn offered_quest(&self) -> Option<&str> {
        match &self.role {
            CharacterRole::Player => None,
            CharacterRole::Npc { quest_id, .. } => quest_id.as_deref(),
        }
    }

    /// Link the quest this NPC offers.
    ///
    /// # Panics
    ///
    /// Panics if called on the player.
    pub(crate) fn set_offered_quest(&mut self, new_quest_id: &str) {
        match &mut self.role {
            CharacterRole::Player => panic!("player characters cannot offer quests"),
            CharacterRole::Npc { quest_id, .. } => *quest_id = Some(new_quest_id.to_string()),
        }
    }
}

//! Item Definition Structures
//!
//! Raw structs mirror the TOML data files; resolved structs fill in
//! defaults and carry the id. Every item has exactly one kind, and the
//! kind decides what can be done with it (consumed, equipped, or neither).

use serde::{Deserialize, Serialize};

// ============================================================================
// Stat Kinds
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Attack,
    Defense,
}

impl StatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatKind::Attack => "attack",
            StatKind::Defense => "defense",
        }
    }
}

// ============================================================================
// Item Kinds
// ============================================================================

/// What an item is and what it does. Closed set: play operations match on
/// this exhaustively, so adding a kind is a compile-visible change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    /// Consumable, restores hit points up to the character's maximum.
    Healing { amount: i32 },
    /// Consumable, permanently raises one stat.
    Status { stat: StatKind, amount: i32 },
    /// Equippable in the weapon slot.
    Weapon { damage_bonus: i32 },
    /// Equippable in the armor slot.
    Armor { defense_bonus: i32 },
    /// Inert; exists to be carried (fetch-quest objectives and the like).
    Quest,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Healing { .. } => "healing",
            ItemKind::Status { .. } => "status",
            ItemKind::Weapon { .. } => "weapon",
            ItemKind::Armor { .. } => "armor",
            ItemKind::Quest => "quest",
        }
    }
}

// ============================================================================
// Raw Item Definition (direct from TOML)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RawItemDefinition {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub kind: ItemKind,
}

// ============================================================================
// Resolved Item Definition
// ============================================================================

#[derive(Debug, Clone)]
pub struct ItemDefinition {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub kind: ItemKind,
}

impl ItemDefinition {
    pub fn from_raw(id: &str, raw: &RawItemDefinition) -> Self {
        Self {
            id: id.to_string(),
            display_name: raw.display_name.clone()
                .unwrap_or_else(|| id.to_string()),
            description: raw.description.clone()
                .unwrap_or_default(),
            kind: raw.kind.clone(),
        }
    }

    /// Check if this item can be consumed (healing or status)
    pub fn is_consumable(&self) -> bool {
        matches!(self.kind, ItemKind::Healing { .. } | ItemKind::Status { .. })
    }

    /// Check if this item can be equipped (weapon or armor)
    pub fn is_equippable(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon { .. } | ItemKind::Armor { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_tagged_kinds() {
        let toml_str = r#"
            [pizza-slice]
            display_name = "Pizza Slice"
            kind = { type = "healing", amount = 4 }

            [knife]
            display_name = "Kitchen Knife"
            kind = { type = "weapon", damage_bonus = 2 }

            [coin]
            display_name = "Old Coin"
            kind = { type = "quest" }
        "#;

        let raw: HashMap<String, RawItemDefinition> = toml::from_str(toml_str).unwrap();
        assert_eq!(raw.len(), 3);
        assert_eq!(raw["pizza-slice"].kind, ItemKind::Healing { amount: 4 });
        assert_eq!(raw["knife"].kind, ItemKind::Weapon { damage_bonus: 2 });
        assert_eq!(raw["coin"].kind, ItemKind::Quest);
    }

    #[test]
    fn test_from_raw_defaults() {
        let toml_str = r#"
            [charm]
            kind = { type = "status", stat = "attack", amount = 1 }
        "#;

        let raw: HashMap<String, RawItemDefinition> = toml::from_str(toml_str).unwrap();
        let def = ItemDefinition::from_raw("charm", &raw["charm"]);
        assert_eq!(def.display_name, "charm");
        assert_eq!(def.description, "");
        assert!(def.is_consumable());
        assert!(!def.is_equippable());
    }

    #[test]
    fn test_kind_predicates() {
        let armor = ItemDefinition {
            id: "jacket".to_string(),
            display_name: "Jacket".to_string(),
            description: String::new(),
            kind: ItemKind::Armor { defense_bonus: 1 },
        };
        assert!(armor.is_equippable());
        assert!(!armor.is_consumable());

        let coin = ItemDefinition {
            id: "coin".to_string(),
            display_name: "Coin".to_string(),
            description: String::new(),
            kind: ItemKind::Quest,
        };
        assert!(!coin.is_equippable());
        assert!(!coin.is_consumable());
    }
}

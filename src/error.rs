//! Game Error Types
//!
//! Errors fall into two groups: configuration errors raised while a session
//! is being assembled (bad data files, dangling references, duplicate ids),
//! and expected negatives raised by play operations (missing items, blocked
//! exits). Contract violations such as accepting a quest twice are not
//! errors; those panic at the call site.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// A quest with this id is already registered.
    #[error("quest '{0}' is already registered")]
    DuplicateQuest(String),

    /// A quest was defined with no required items or targets.
    #[error("quest '{0}' has an empty goal")]
    EmptyQuestGoal(String),

    /// No registered quest has this id.
    #[error("unknown quest '{0}'")]
    UnknownQuest(String),

    /// An item id does not exist in the item registry.
    #[error("unknown item '{0}'")]
    UnknownItem(String),

    /// A character id does not exist in the session cast.
    #[error("unknown character '{0}'")]
    UnknownCharacter(String),

    /// A scene id does not exist in the scene graph.
    #[error("unknown scene '{0}'")]
    UnknownScene(String),

    /// A scene with this id is already in the graph.
    #[error("scene '{0}' is already registered")]
    DuplicateScene(String),

    /// A character with this id is already in the cast.
    #[error("character '{0}' is already registered")]
    DuplicateCharacter(String),

    /// A play operation was attempted before a starting scene was set.
    #[error("session has no current scene")]
    NoLocation,

    /// An item definition with this id was registered twice.
    #[error("item '{0}' is defined more than once")]
    DuplicateItem(String),

    /// The target scene is not an exit of the current scene.
    #[error("no exit from '{from}' to '{to}'")]
    NoExit { from: String, to: String },

    /// The item is not present (or not present in sufficient quantity).
    #[error("item '{0}' is not available here")]
    MissingItem(String),

    /// The item kind cannot be consumed.
    #[error("item '{0}' is not consumable")]
    NotConsumable(String),

    /// The item kind cannot be equipped.
    #[error("item '{0}' is not equippable")]
    NotEquippable(String),

    /// The character has already been defeated and cannot act or be acted on.
    #[error("character '{0}' has been defeated")]
    CharacterDefeated(String),

    /// A data file could not be read.
    #[error("failed to read {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A data file could not be parsed.
    #[error("failed to parse {path:?}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GameError::DuplicateQuest("coin-quest".to_string());
        assert_eq!(err.to_string(), "quest 'coin-quest' is already registered");

        let err = GameError::NoExit {
            from: "street".to_string(),
            to: "rooftop".to_string(),
        };
        assert_eq!(err.to_string(), "no exit from 'street' to 'rooftop'");
    }

    #[test]
    fn test_missing_item_display() {
        let err = GameError::MissingItem("coin".to_string());
        assert!(err.to_string().contains("coin"));
    }
}

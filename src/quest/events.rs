//! Quest Event Types
//!
//! Events that can advance quest progress, and the protocol for
//! delivering them. Collaborators emit an event only after the change it
//! describes is committed, because fetch goals look at current
//! possession when the event arrives.

use serde::{Deserialize, Serialize};

use super::definition::QuestStatus;

/// Events that can advance quest progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestEvent {
    /// The player gained possession of an item
    ItemAcquired {
        item_id: String,
    },

    /// A character was defeated in combat
    CharacterDefeated {
        character_id: String,
    },
}

impl QuestEvent {
    /// Get event type as string (for logging/debugging)
    pub fn event_type(&self) -> &'static str {
        match self {
            QuestEvent::ItemAcquired { .. } => "item_acquired",
            QuestEvent::CharacterDefeated { .. } => "character_defeated",
        }
    }
}

/// Read-only possession query. Fetch goals evaluate against this at
/// update time instead of tracking acquisitions, so losing an item
/// before the next update counts against the goal.
pub trait ItemCheckable {
    fn check_item(&self, item_id: &str) -> bool;
}

/// Receiver half of the notification protocol. The quest manager
/// implements this; sessions can subscribe additional observers that
/// run after the manager.
pub trait QuestObserver {
    fn notify(&mut self, event: &QuestEvent, items: &dyn ItemCheckable);
}

/// A status change produced by delivering one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestTransition {
    pub quest_id: String,
    pub status: QuestStatus,
}

impl QuestTransition {
    pub fn completed(quest_id: &str) -> Self {
        Self {
            quest_id: quest_id.to_string(),
            status: QuestStatus::Completed,
        }
    }
}

//! Quest Manager
//!
//! Owns every quest in a session and is the only code that moves them
//! through their lifecycle. Quests are kept in registration order and
//! events are dispatched in that order, so a run of the same session is
//! deterministic.

use tracing::info;

use super::definition::{Quest, QuestStatus};
use super::events::{ItemCheckable, QuestEvent, QuestObserver, QuestTransition};
use crate::error::GameError;

#[derive(Debug, Default)]
pub struct QuestManager {
    quests: Vec<Quest>,
}

impl QuestManager {
    pub fn new() -> Self {
        Self { quests: Vec::new() }
    }

    /// Register a quest. The quest moves into the manager, so it can
    /// never be registered with a second one. Duplicate ids and empty
    /// goals are configuration errors.
    pub fn add_quest(&mut self, quest: Quest) -> Result<(), GameError> {
        if self.quests.iter().any(|q| q.id() == quest.id()) {
            return Err(GameError::DuplicateQuest(quest.id().to_string()));
        }
        if quest.goal().is_empty() {
            return Err(GameError::EmptyQuestGoal(quest.id().to_string()));
        }
        info!("Quest registered: {} ({})", quest.display_name(), quest.id());
        self.quests.push(quest);
        Ok(())
    }

    /// Accept a registered quest.
    ///
    /// # Panics
    ///
    /// Panics if the quest has already been accepted.
    pub fn accept_quest(&mut self, quest_id: &str) -> Result<(), GameError> {
        let quest = self
            .quests
            .iter_mut()
            .find(|q| q.id() == quest_id)
            .ok_or_else(|| GameError::UnknownQuest(quest_id.to_string()))?;
        quest.accept();
        info!("Quest accepted: {}", quest_id);
        Ok(())
    }

    /// Deliver one event to every accepted quest, in registration order.
    /// Quests whose goal is now met complete during this call; quests
    /// that are not accepted, or already completed, are untouched.
    pub fn update(
        &mut self,
        event: &QuestEvent,
        items: &dyn ItemCheckable,
    ) -> Vec<QuestTransition> {
        let mut transitions = Vec::new();
        for quest in &mut self.quests {
            if quest.status() != QuestStatus::Accepted {
                continue;
            }
            quest.record_event(event);
            if quest.goal_satisfied(items) {
                quest.complete();
                info!(
                    "Quest completed: {} ({}) after {}",
                    quest.display_name(),
                    quest.id(),
                    event.event_type()
                );
                transitions.push(QuestTransition::completed(quest.id()));
            }
        }
        transitions
    }

    /// Get a quest by id
    pub fn get(&self, quest_id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id() == quest_id)
    }

    /// All quests currently in the given status, in registration order
    pub fn quests_with_status(&self, status: QuestStatus) -> Vec<&Quest> {
        self.quests.iter().filter(|q| q.status() == status).collect()
    }

    /// Iterate over all quests in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter()
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }
}

impl QuestObserver for QuestManager {
    fn notify(&mut self, event: &QuestEvent, items: &dyn ItemCheckable) {
        self.update(event, items);
    }
}

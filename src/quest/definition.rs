//! Quest Definitions
//!
//! A quest pairs an immutable goal with a three-state lifecycle:
//! not accepted, accepted, completed. Completion is one-way; there is no
//! failing or abandoning. Goals are a closed set, so everything that
//! inspects one matches exhaustively.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::events::{ItemCheckable, QuestEvent};

// ============================================================================
// Quest Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestStatus {
    /// Offered but not yet taken on
    NotAccepted,
    /// Taken on and eligible for progress
    Accepted,
    /// Goal met; terminal
    Completed,
}

impl QuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestStatus::NotAccepted => "not_accepted",
            QuestStatus::Accepted => "accepted",
            QuestStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "not_accepted" => Some(QuestStatus::NotAccepted),
            "accepted" => Some(QuestStatus::Accepted),
            "completed" => Some(QuestStatus::Completed),
            _ => None,
        }
    }
}

// ============================================================================
// Quest Goals
// ============================================================================

/// What a quest asks for. Fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestGoal {
    /// Possess every listed item at once. Possession is checked live, so
    /// an item handed over or consumed no longer counts.
    Fetch { items: BTreeSet<String> },
    /// Defeat every listed character. Defeats accumulate; `defeated`
    /// only grows while the quest is accepted.
    Combat {
        targets: BTreeSet<String>,
        #[serde(default)]
        defeated: BTreeSet<String>,
    },
}

impl QuestGoal {
    /// A goal that asks for nothing is a configuration mistake; the
    /// manager refuses to register it.
    pub fn is_empty(&self) -> bool {
        match self {
            QuestGoal::Fetch { items } => items.is_empty(),
            QuestGoal::Combat { targets, .. } => targets.is_empty(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            QuestGoal::Fetch { .. } => "fetch",
            QuestGoal::Combat { .. } => "combat",
        }
    }
}

// ============================================================================
// Quest
// ============================================================================

/// One quest and its progress. Fields are private: outside this crate
/// the only way to move a quest through its lifecycle is through the
/// manager that owns it.
#[derive(Debug, Clone)]
pub struct Quest {
    id: String,
    display_name: String,
    description: String,
    goal: QuestGoal,
    status: QuestStatus,
    accepted_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Quest {
    /// Create a fetch quest requiring possession of every listed item
    pub fn fetch(id: &str, display_name: &str, description: &str, items: &[&str]) -> Self {
        Self::new(
            id,
            display_name,
            description,
            QuestGoal::Fetch {
                items: items.iter().map(|s| s.to_string()).collect(),
            },
        )
    }

    /// Create a combat quest requiring the defeat of every listed character
    pub fn combat(id: &str, display_name: &str, description: &str, targets: &[&str]) -> Self {
        Self::new(
            id,
            display_name,
            description,
            QuestGoal::Combat {
                targets: targets.iter().map(|s| s.to_string()).collect(),
                defeated: BTreeSet::new(),
            },
        )
    }

    fn new(id: &str, display_name: &str, description: &str, goal: QuestGoal) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            description: description.to_string(),
            goal,
            status: QuestStatus::NotAccepted,
            accepted_at: None,
            completed_at: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn goal(&self) -> &QuestGoal {
        &self.goal
    }

    pub fn status(&self) -> QuestStatus {
        self.status
    }

    /// True once the quest has been taken on, including after completion
    pub fn is_accepted(&self) -> bool {
        matches!(self.status, QuestStatus::Accepted | QuestStatus::Completed)
    }

    pub fn is_completed(&self) -> bool {
        self.status == QuestStatus::Completed
    }

    /// When the quest was accepted
    pub fn accepted_at(&self) -> Option<DateTime<Utc>> {
        self.accepted_at
    }

    /// When the quest was completed
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Seconds between acceptance and completion (or now, if unfinished)
    pub fn duration_secs(&self) -> Option<i64> {
        self.accepted_at.map(|start| {
            let end = self.completed_at.unwrap_or_else(Utc::now);
            (end - start).num_seconds()
        })
    }

    /// Move from not accepted to accepted.
    ///
    /// # Panics
    ///
    /// Panics if the quest has already been accepted. Offering an
    /// already-accepted quest is a caller bug, not a recoverable state.
    pub(crate) fn accept(&mut self) {
        assert!(
            !self.is_accepted(),
            "quest '{}' is already accepted",
            self.id
        );
        self.status = QuestStatus::Accepted;
        self.accepted_at = Some(Utc::now());
    }

    /// Fold one event into the goal's bookkeeping. Never changes status.
    /// Events arriving while the quest is not accepted leave no trace.
    pub(crate) fn record_event(&mut self, event: &QuestEvent) {
        if self.status != QuestStatus::Accepted {
            return;
        }
        if let QuestGoal::Combat { targets, defeated } = &mut self.goal {
            if let QuestEvent::CharacterDefeated { character_id } = event {
                if targets.contains(character_id) {
                    defeated.insert(character_id.clone());
                }
            }
        }
    }

    /// Whether the goal is met right now. Pure; does not advance state.
    pub fn goal_satisfied(&self, items: &dyn ItemCheckable) -> bool {
        match &self.goal {
            QuestGoal::Fetch { items: required } => {
                required.iter().all(|id| items.check_item(id))
            }
            QuestGoal::Combat { targets, defeated } => {
                targets.iter().all(|t| defeated.contains(t))
            }
        }
    }

    /// Move from accepted to completed.
    ///
    /// # Panics
    ///
    /// Panics unless the quest is currently accepted.
    pub(crate) fn complete(&mut self) {
        assert!(
            self.status == QuestStatus::Accepted,
            "quest '{}' cannot complete from status '{}'",
            self.id,
            self.status.as_str()
        );
        self.status = QuestStatus::Completed;
        self.completed_at = Some(Utc::now());
    }
}

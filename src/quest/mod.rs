//! Quest System Module
//!
//! Quests with fixed goals, a one-way lifecycle, and an event protocol
//! that lets the rest of the game report what happened without knowing
//! which quests care.

pub mod definition;
pub mod events;
pub mod manager;

pub use definition::{Quest, QuestGoal, QuestStatus};
pub use events::{ItemCheckable, QuestEvent, QuestObserver, QuestTransition};
pub use manager::QuestManager;

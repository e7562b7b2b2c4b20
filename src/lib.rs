//! Masked Traveler
//!
//! A small narrative role-playing game. The world is a graph of scenes
//! holding characters and items; the player walks it, talks, fights,
//! and collects. At the heart sits the quest subsystem: quests carry a
//! fixed goal and a one-way lifecycle, and learn about the world only
//! through events the session fans out after each change is committed.

pub mod character;
pub mod data;
pub mod error;
pub mod facade;
pub mod inventory;
pub mod quest;
pub mod scene;
pub mod session;

pub use error::GameError;
pub use session::{AttackReport, GameSession};

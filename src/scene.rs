//! Scenes
//!
//! The world is a small graph of scenes. A scene holds the characters
//! standing in it, the items lying around, and exits to neighboring
//! scenes. Links are bidirectional; walking somewhere always leaves a
//! way back.

use std::collections::BTreeMap;

use crate::error::GameError;

// ============================================================================
// Ground Items
// ============================================================================

/// A stack of items lying in a scene, free for the taking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundItem {
    pub item_id: String,
    pub quantity: u32,
}

// ============================================================================
// Scene
// ============================================================================

#[derive(Debug, Clone)]
pub struct Scene {
    pub id: String,
    pub display_name: String,
    pub description: String,
    /// Character ids present in this scene
    pub npcs: Vec<String>,
    /// Items on the ground
    pub items: Vec<GroundItem>,
    /// Scene ids reachable from here
    pub exits: Vec<String>,
}

impl Scene {
    pub fn new(id: &str, display_name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            description: description.to_string(),
            npcs: Vec::new(),
            items: Vec::new(),
            exits: Vec::new(),
        }
    }

    pub fn has_exit(&self, scene_id: &str) -> bool {
        self.exits.iter().any(|e| e == scene_id)
    }

    pub fn has_npc(&self, character_id: &str) -> bool {
        self.npcs.iter().any(|n| n == character_id)
    }

    /// Put items on the ground, stacking onto an existing pile of the
    /// same item
    pub fn place_item(&mut self, item_id: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(pile) = self.items.iter_mut().find(|g| g.item_id == item_id) {
            pile.quantity += quantity;
        } else {
            self.items.push(GroundItem {
                item_id: item_id.to_string(),
                quantity,
            });
        }
    }

    /// Pick a whole pile up off the ground, returning how many were in it
    pub fn take_item(&mut self, item_id: &str) -> Result<u32, GameError> {
        let index = self
            .items
            .iter()
            .position(|g| g.item_id == item_id)
            .ok_or_else(|| GameError::MissingItem(item_id.to_string()))?;
        Ok(self.items.remove(index).quantity)
    }
}

// ============================================================================
// Scene Graph
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    scenes: BTreeMap<String, Scene>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            scenes: BTreeMap::new(),
        }
    }

    /// Add a scene to the graph. A duplicate id is a configuration
    /// error.
    pub fn add_scene(&mut self, scene: Scene) -> Result<(), GameError> {
        if self.scenes.contains_key(&scene.id) {
            return Err(GameError::DuplicateScene(scene.id));
        }
        self.scenes.insert(scene.id.clone(), scene);
        Ok(())
    }

    /// Connect two scenes with exits in both directions. Linking the
    /// same pair again changes nothing.
    pub fn link(&mut self, a: &str, b: &str) -> Result<(), GameError> {
        if !self.scenes.contains_key(a) {
            return Err(GameError::UnknownScene(a.to_string()));
        }
        if !self.scenes.contains_key(b) {
            return Err(GameError::UnknownScene(b.to_string()));
        }
        if let Some(scene_a) = self.scenes.get_mut(a) {
            if !scene_a.has_exit(b) {
                scene_a.exits.push(b.to_string());
            }
        }
        if let Some(scene_b) = self.scenes.get_mut(b) {
            if !scene_b.has_exit(a) {
                scene_b.exits.push(a.to_string());
            }
        }
        Ok(())
    }

    pub fn get(&self, scene_id: &str) -> Option<&Scene> {
        self.scenes.get(scene_id)
    }

    pub fn get_mut(&mut self, scene_id: &str) -> Option<&mut Scene> {
        self.scenes.get_mut(scene_id)
    }

    pub fn contains(&self, scene_id: &str) -> bool {
        self.scenes.contains_key(scene_id)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

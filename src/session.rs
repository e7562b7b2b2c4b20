//! Game Session
//!
//! One running game: the item registry, the scene graph, the player,
//! the cast of NPCs, and the quest manager, all owned in one place.
//! Every state change flows through a session method, and methods run
//! to completion before the next one starts, so quest notifications
//! always describe a settled world.
//!
//! Setup methods validate cross references as they are made; a dangling
//! id surfaces here, before play begins, not in the middle of a scene.

use std::collections::BTreeMap;

use tracing::{debug, info};
use uuid::Uuid;

use crate::character::GameCharacter;
use crate::data::ItemRegistry;
use crate::error::GameError;
use crate::facade::CharacterInventoryFacade;
use crate::quest::{
    Quest, QuestEvent, QuestGoal, QuestManager, QuestObserver, QuestStatus, QuestTransition,
};
use crate::scene::{Scene, SceneGraph};

// ============================================================================
// Attack Outcome
// ============================================================================

/// What one swing produced, for the presentation layer
#[derive(Debug)]
pub struct AttackReport {
    pub defender_id: String,
    pub defender_name: String,
    pub damage: i32,
    pub remaining_hp: i32,
    pub defeated: bool,
    /// The defender's combat line, present on the opening blow
    pub combat_line: Option<String>,
    /// Items the defender dropped into the scene
    pub dropped: Vec<(String, u32)>,
    /// Quest transitions the defeat caused
    pub transitions: Vec<QuestTransition>,
}

// ============================================================================
// Game Session
// ============================================================================

pub struct GameSession {
    session_id: Uuid,
    items: ItemRegistry,
    scenes: SceneGraph,
    location: Option<String>,
    player: CharacterInventoryFacade,
    npcs: BTreeMap<String, CharacterInventoryFacade>,
    quests: QuestManager,
    observers: Vec<Box<dyn QuestObserver>>,
}

impl GameSession {
    pub fn new(
        items: ItemRegistry,
        player_id: &str,
        player_name: &str,
        max_hp: i32,
        attack: i32,
        defense: i32,
    ) -> Self {
        let session_id = Uuid::new_v4();
        info!("Session {} created for player {}", session_id, player_name);
        Self {
            session_id,
            items,
            scenes: SceneGraph::new(),
            location: None,
            player: CharacterInventoryFacade::new(GameCharacter::new_player(
                player_id,
                player_name,
                max_hp,
                attack,
                defense,
            )),
            npcs: BTreeMap::new(),
            quests: QuestManager::new(),
            observers: Vec::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    // ========================================================================
    // Setup
    // ========================================================================

    /// Add a scene to the world
    pub fn add_scene(&mut self, scene: Scene) -> Result<(), GameError> {
        self.scenes.add_scene(scene)
    }

    /// Connect two scenes with exits in both directions
    pub fn link_scenes(&mut self, a: &str, b: &str) -> Result<(), GameError> {
        self.scenes.link(a, b)
    }

    /// Put items on the ground in a scene
    pub fn place_item(
        &mut self,
        scene_id: &str,
        item_id: &str,
        quantity: u32,
    ) -> Result<(), GameError> {
        if !self.items.contains(item_id) {
            return Err(GameError::UnknownItem(item_id.to_string()));
        }
        let scene = self
            .scenes
            .get_mut(scene_id)
            .ok_or_else(|| GameError::UnknownScene(scene_id.to_string()))?;
        scene.place_item(item_id, quantity);
        Ok(())
    }

    /// Add an NPC to the cast and stand them in a scene. If the
    /// character already claims to offer a quest, that quest must be
    /// registered first.
    ///
    /// # Panics
    ///
    /// Panics if the character has the player role.
    pub fn add_npc(&mut self, character: GameCharacter, scene_id: &str) -> Result<(), GameError> {
        assert!(
            !character.is_player(),
            "character '{}' must have an NPC role",
            character.id
        );
        if self.npcs.contains_key(&character.id) || character.id == self.player.id() {
            return Err(GameError::DuplicateCharacter(character.id));
        }
        if let Some(quest_id) = character.offered_quest() {
            if self.quests.get(quest_id).is_none() {
                return Err(GameError::UnknownQuest(quest_id.to_string()));
            }
        }
        let scene = self
            .scenes
            .get_mut(scene_id)
            .ok_or_else(|| GameError::UnknownScene(scene_id.to_string()))?;
        scene.npcs.push(character.id.clone());
        info!("{} joins the cast in '{}'", character.display_name, scene_id);
        self.npcs.insert(
            character.id.clone(),
            CharacterInventoryFacade::new(character),
        );
        Ok(())
    }

    /// Register a quest. Fetch goals may only name registry items and
    /// combat goals may only name cast members, so a quest can never
    /// chase content that does not exist.
    pub fn add_quest(&mut self, quest: Quest) -> Result<(), GameError> {
        match quest.goal() {
            QuestGoal::Fetch { items } => {
                for item_id in items {
                    if !self.items.contains(item_id) {
                        return Err(GameError::UnknownItem(item_id.clone()));
                    }
                }
            }
            QuestGoal::Combat { targets, .. } => {
                for character_id in targets {
                    if !self.npcs.contains_key(character_id) {
                        return Err(GameError::UnknownCharacter(character_id.clone()));
                    }
                }
            }
        }
        self.quests.add_quest(quest)
    }

    /// Point an already-registered NPC at an already-registered quest.
    /// Exists because an NPC and the quest that targets them can
    /// reference each other, so neither can be added fully formed.
    pub fn link_npc_quest(&mut self, npc_id: &str, quest_id: &str) -> Result<(), GameError> {
        if self.quests.get(quest_id).is_none() {
            return Err(GameError::UnknownQuest(quest_id.to_string()));
        }
        let npc = self
            .npcs
            .get_mut(npc_id)
            .ok_or_else(|| GameError::UnknownCharacter(npc_id.to_string()))?;
        npc.character_mut().set_offered_quest(quest_id);
        Ok(())
    }

    /// Hand items directly to a character. Giving to the player counts
    /// as an acquisition and is announced like any other; a zero
    /// quantity commits nothing and announces nothing.
    pub fn give_item(
        &mut self,
        character_id: &str,
        item_id: &str,
        quantity: u32,
    ) -> Result<Vec<QuestTransition>, GameError> {
        if !self.items.contains(item_id) {
            return Err(GameError::UnknownItem(item_id.to_string()));
        }
        if character_id == self.player.id() {
            if quantity == 0 {
                return Ok(Vec::new());
            }
            let event = self.player.add_item(item_id, quantity);
            return Ok(self.dispatch(&event));
        }
        let npc = self
            .npcs
            .get_mut(character_id)
            .ok_or_else(|| GameError::UnknownCharacter(character_id.to_string()))?;
        // NPC possession never advances the player's quests
        let _ = npc.add_item(item_id, quantity);
        Ok(Vec::new())
    }

    /// Set the player's current scene without traversing an exit
    pub fn set_location(&mut self, scene_id: &str) -> Result<(), GameError> {
        if !self.scenes.contains(scene_id) {
            return Err(GameError::UnknownScene(scene_id.to_string()));
        }
        self.location = Some(scene_id.to_string());
        Ok(())
    }

    /// Subscribe an extra observer. The quest manager always hears an
    /// event first; subscribers follow in subscription order.
    pub fn subscribe(&mut self, observer: Box<dyn QuestObserver>) {
        self.observers.push(observer);
    }

    // ========================================================================
    // Play
    // ========================================================================

    /// Walk through an exit of the current scene
    pub fn move_to(&mut self, scene_id: &str) -> Result<(), GameError> {
        let from = self.location_id()?.to_string();
        if !self.scenes.contains(scene_id) {
            return Err(GameError::UnknownScene(scene_id.to_string()));
        }
        let here = self
            .scenes
            .get(&from)
            .ok_or_else(|| GameError::UnknownScene(from.clone()))?;
        if !here.has_exit(scene_id) {
            return Err(GameError::NoExit {
                from,
                to: scene_id.to_string(),
            });
        }
        debug!("Player moves to '{}'", scene_id);
        self.location = Some(scene_id.to_string());
        Ok(())
    }

    /// The scene the player is standing in
    pub fn scene(&self) -> Result<&Scene, GameError> {
        let here = self.location_id()?;
        self.scenes
            .get(here)
            .ok_or_else(|| GameError::UnknownScene(here.to_string()))
    }

    /// Talk to an NPC in the current scene. The line depends on the
    /// state of the quest the NPC offers; NPCs with nothing particular
    /// to say fall back to their greeting.
    pub fn talk_to(&self, npc_id: &str) -> Result<String, GameError> {
        let npc = self.npc_in_current_scene(npc_id)?;
        if npc.is_defeated() {
            return Err(GameError::CharacterDefeated(npc_id.to_string()));
        }

        let dialogue = match npc.character().dialogue() {
            Some(d) => d,
            None => return Ok("...".to_string()),
        };
        let quest_status = npc
            .character()
            .offered_quest()
            .and_then(|quest_id| self.quests.get(quest_id))
            .map(|quest| quest.status());

        let line = match quest_status {
            Some(QuestStatus::NotAccepted) => dialogue.quest_offer.as_ref(),
            Some(QuestStatus::Accepted) => dialogue.quest_progress.as_ref(),
            Some(QuestStatus::Completed) => dialogue.quest_complete.as_ref(),
            None => None,
        };
        Ok(line
            .or(dialogue.greeting.as_ref())
            .cloned()
            .unwrap_or_else(|| "...".to_string()))
    }

    /// Accept a registered quest.
    ///
    /// # Panics
    ///
    /// Panics if the quest has already been accepted.
    pub fn accept_quest(&mut self, quest_id: &str) -> Result<(), GameError> {
        self.quests.accept_quest(quest_id)
    }

    /// Pick a pile of items up off the ground here. Acquisition is
    /// committed to the player's inventory before anyone is told.
    pub fn pick_up(&mut self, item_id: &str) -> Result<Vec<QuestTransition>, GameError> {
        let here = self.location_id()?.to_string();
        let scene = self
            .scenes
            .get_mut(&here)
            .ok_or_else(|| GameError::UnknownScene(here.clone()))?;
        let quantity = scene.take_item(item_id)?;

        let event = self.player.add_item(item_id, quantity);
        info!("Player picks up {} x{} in '{}'", item_id, quantity, here);
        Ok(self.dispatch(&event))
    }

    /// Attack an NPC in the current scene. Damage is the attacker's
    /// effective attack less the defender's effective defense, never
    /// below one. A defeated NPC drops everything they carried into the
    /// scene, and the defeat is announced after the drop is committed.
    pub fn attack(&mut self, npc_id: &str) -> Result<AttackReport, GameError> {
        let here = self.location_id()?.to_string();
        self.npc_in_current_scene(npc_id)?;

        let damage = {
            let npc = self.npcs.get(npc_id).ok_or_else(|| {
                GameError::UnknownCharacter(npc_id.to_string())
            })?;
            if npc.is_defeated() {
                return Err(GameError::CharacterDefeated(npc_id.to_string()));
            }
            (self.player.effective_attack() - npc.effective_defense()).max(1)
        };

        let npc = self
            .npcs
            .get_mut(npc_id)
            .ok_or_else(|| GameError::UnknownCharacter(npc_id.to_string()))?;
        let opening_blow = npc.character().hp == npc.character().max_hp;
        let defeated = npc.take_damage(damage);
        let remaining_hp = npc.character().hp;
        let defender_name = npc.display_name().to_string();
        let combat_line = if opening_blow {
            npc.character().dialogue().and_then(|d| d.combat.clone())
        } else {
            None
        };
        let dropped = if defeated {
            npc.drain_inventory()
        } else {
            Vec::new()
        };

        if defeated {
            info!("{} is defeated in '{}'", defender_name, here);
            if let Some(scene) = self.scenes.get_mut(&here) {
                for (item_id, quantity) in &dropped {
                    scene.place_item(item_id, *quantity);
                }
            }
        }
        let transitions = if defeated {
            self.dispatch(&QuestEvent::CharacterDefeated {
                character_id: npc_id.to_string(),
            })
        } else {
            Vec::new()
        };

        Ok(AttackReport {
            defender_id: npc_id.to_string(),
            defender_name,
            damage,
            remaining_hp,
            defeated,
            combat_line,
            dropped,
            transitions,
        })
    }

    /// Consume one healing or status item from the player's inventory
    pub fn consume_item(&mut self, item_id: &str) -> Result<(), GameError> {
        let def = self
            .items
            .get(item_id)
            .ok_or_else(|| GameError::UnknownItem(item_id.to_string()))?
            .clone();
        self.player.consume_item(&def)
    }

    /// Equip a weapon or armor item from the player's inventory
    pub fn equip_item(&mut self, item_id: &str) -> Result<(), GameError> {
        let def = self
            .items
            .get(item_id)
            .ok_or_else(|| GameError::UnknownItem(item_id.to_string()))?
            .clone();
        self.player.equip_item(&def)
    }

    /// Return the player's equipped weapon to their inventory
    pub fn unequip_weapon(&mut self) -> Option<String> {
        self.player.unequip_weapon()
    }

    /// Return the player's equipped armor to their inventory
    pub fn unequip_armor(&mut self) -> Option<String> {
        self.player.unequip_armor()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn player(&self) -> &CharacterInventoryFacade {
        &self.player
    }

    pub fn npc(&self, npc_id: &str) -> Option<&CharacterInventoryFacade> {
        self.npcs.get(npc_id)
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn quest(&self, quest_id: &str) -> Option<&Quest> {
        self.quests.get(quest_id)
    }

    pub fn quests_with_status(&self, status: QuestStatus) -> Vec<&Quest> {
        self.quests.quests_with_status(status)
    }

    pub fn quest_log(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn location_id(&self) -> Result<&str, GameError> {
        self.location.as_deref().ok_or(GameError::NoLocation)
    }

    fn npc_in_current_scene(&self, npc_id: &str) -> Result<&CharacterInventoryFacade, GameError> {
        let scene = self.scene()?;
        if !scene.has_npc(npc_id) {
            return Err(GameError::UnknownCharacter(npc_id.to_string()));
        }
        self.npcs
            .get(npc_id)
            .ok_or_else(|| GameError::UnknownCharacter(npc_id.to_string()))
    }

    /// Fan one event out: the quest manager first, then every extra
    /// subscriber, each with the player's possession as witness.
    fn dispatch(&mut self, event: &QuestEvent) -> Vec<QuestTransition> {
        let transitions = self.quests.update(event, &self.player);
        for observer in &mut self.observers {
            observer.notify(event, &self.player);
        }
        transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::character::NpcDialogue;
    use crate::data::item_def::{ItemDefinition, ItemKind, StatKind};
    use crate::quest::ItemCheckable;

    fn registry() -> ItemRegistry {
        let mut items = ItemRegistry::new();
        let defs = [
            ("coin", "Old Coin", ItemKind::Quest),
            ("pizza-slice", "Pizza Slice", ItemKind::Healing { amount: 4 }),
            ("knife", "Kitchen Knife", ItemKind::Weapon { damage_bonus: 2 }),
            ("jacket", "Worn Jacket", ItemKind::Armor { defense_bonus: 1 }),
            (
                "lucky-charm",
                "Lucky Charm",
                ItemKind::Status {
                    stat: StatKind::Attack,
                    amount: 1,
                },
            ),
        ];
        for (id, name, kind) in defs {
            items
                .register(ItemDefinition {
                    id: id.to_string(),
                    display_name: name.to_string(),
                    description: String::new(),
                    kind,
                })
                .unwrap();
        }
        items
    }

    fn nomad_dialogue() -> NpcDialogue {
        NpcDialogue {
            greeting: Some("The nomad nods at you.".to_string()),
            quest_offer: Some("I dropped an old coin in the pizza place. Fetch it for me?".to_string()),
            quest_progress: Some("Found my coin yet?".to_string()),
            quest_complete: Some("You found it! I am in your debt.".to_string()),
            combat: None,
        }
    }

    fn tim_dialogue() -> NpcDialogue {
        NpcDialogue {
            greeting: Some("Tim glares at you.".to_string()),
            combat: Some("You wish to fight? So be it.".to_string()),
            ..Default::default()
        }
    }

    fn demo_session() -> GameSession {
        let mut session = GameSession::new(registry(), "bernie", "Bernie", 10, 3, 1);
        session
            .add_scene(Scene::new("street", "Street", "A quiet street."))
            .unwrap();
        session
            .add_scene(Scene::new("pizza-place", "Pizza Place", "The ovens are warm."))
            .unwrap();
        session.link_scenes("street", "pizza-place").unwrap();

        session
            .add_npc(
                GameCharacter::new_npc("nomad", "The Nomad", 5, 1, 0, nomad_dialogue(), None),
                "street",
            )
            .unwrap();
        session
            .add_npc(
                GameCharacter::new_npc("tim", "Tim", 1, 1, 0, tim_dialogue(), None),
                "pizza-place",
            )
            .unwrap();

        session
            .add_quest(Quest::fetch(
                "coin-errand",
                "An Old Debt",
                "Recover the nomad's coin.",
                &["coin"],
            ))
            .unwrap();
        session
            .add_quest(Quest::combat(
                "settle-the-score",
                "Settle the Score",
                "Best Tim in a fight.",
                &["tim"],
            ))
            .unwrap();
        session.link_npc_quest("nomad", "coin-errand").unwrap();
        session.link_npc_quest("tim", "settle-the-score").unwrap();

        session.place_item("pizza-place", "coin", 1).unwrap();
        session.give_item("tim", "pizza-slice", 1).unwrap();
        session.set_location("street").unwrap();
        session
    }

    /// One alley, two opponents tough enough to survive the first hit
    fn sparring_session() -> GameSession {
        let mut session = GameSession::new(registry(), "bernie", "Bernie", 10, 3, 1);
        session
            .add_scene(Scene::new("alley", "Alley", "A dead end behind the ovens."))
            .unwrap();
        session
            .add_npc(
                GameCharacter::new_npc("brute", "The Brute", 8, 1, 5, NpcDialogue::default(), None),
                "alley",
            )
            .unwrap();
        session
            .add_npc(
                GameCharacter::new_npc("scrapper", "Scrapper", 8, 1, 1, NpcDialogue::default(), None),
                "alley",
            )
            .unwrap();
        session.set_location("alley").unwrap();
        session
    }

    #[test]
    fn test_setup_rejects_dangling_references() {
        let mut session = GameSession::new(registry(), "bernie", "Bernie", 10, 3, 1);
        session
            .add_scene(Scene::new("street", "Street", ""))
            .unwrap();

        let result = session.place_item("street", "crown", 1);
        assert!(matches!(result, Err(GameError::UnknownItem(_))));

        let result = session.add_quest(Quest::fetch("q", "Q", "", &["crown"]));
        assert!(matches!(result, Err(GameError::UnknownItem(_))));

        let result = session.add_quest(Quest::combat("q", "Q", "", &["stranger"]));
        assert!(matches!(result, Err(GameError::UnknownCharacter(_))));

        let npc = GameCharacter::new_npc(
            "tim",
            "Tim",
            1,
            1,
            0,
            NpcDialogue::default(),
            Some("ghost-quest".to_string()),
        );
        let result = session.add_npc(npc, "street");
        assert!(matches!(result, Err(GameError::UnknownQuest(_))));

        let result = session.link_npc_quest("nobody", "ghost-quest");
        assert!(matches!(result, Err(GameError::UnknownQuest(_))));
    }

    #[test]
    fn test_duplicate_npc_is_rejected() {
        let mut session = demo_session();
        let result = session.add_npc(
            GameCharacter::new_npc("tim", "Tim Again", 1, 1, 0, NpcDialogue::default(), None),
            "street",
        );
        assert!(matches!(result, Err(GameError::DuplicateCharacter(_))));
    }

    #[test]
    fn test_play_before_set_location_fails() {
        let mut session = GameSession::new(registry(), "bernie", "Bernie", 10, 3, 1);
        assert!(matches!(session.pick_up("coin"), Err(GameError::NoLocation)));
        assert!(matches!(session.scene(), Err(GameError::NoLocation)));
    }

    #[test]
    fn test_move_requires_an_exit() {
        let mut session = demo_session();
        session.move_to("pizza-place").unwrap();
        assert_eq!(session.location(), Some("pizza-place"));

        let result = session.move_to("pizza-place");
        assert!(matches!(result, Err(GameError::NoExit { .. })));

        let result = session.move_to("rooftop");
        assert!(matches!(result, Err(GameError::UnknownScene(_))));
    }

    #[test]
    fn test_pick_up_completes_accepted_fetch_quest() {
        let mut session = demo_session();
        session.accept_quest("coin-errand").unwrap();
        session.move_to("pizza-place").unwrap();

        let transitions = session.pick_up("coin").unwrap();
        assert_eq!(transitions, vec![QuestTransition::completed("coin-errand")]);
        assert!(session.quest("coin-errand").unwrap().is_completed());
        assert!(session.player().check_item("coin"));
        assert!(!session.scene().unwrap().items.iter().any(|g| g.item_id == "coin"));

        // The combat quest was never accepted and is untouched
        assert_eq!(
            session.quest("settle-the-score").unwrap().status(),
            QuestStatus::NotAccepted
        );
    }

    #[test]
    fn test_acceptance_after_possession_waits_for_next_event() {
        let mut session = demo_session();
        session.move_to("pizza-place").unwrap();

        // Not accepted yet, so the acquisition changes nothing
        let transitions = session.pick_up("coin").unwrap();
        assert!(transitions.is_empty());

        session.accept_quest("coin-errand").unwrap();
        assert_eq!(
            session.quest("coin-errand").unwrap().status(),
            QuestStatus::Accepted
        );

        // The next acquisition event finds the goal already satisfied
        let transitions = session.give_item("bernie", "lucky-charm", 1).unwrap();
        assert_eq!(transitions, vec![QuestTransition::completed("coin-errand")]);
    }

    #[test]
    fn test_attack_defeats_and_completes_combat_quest() {
        let mut session = demo_session();
        session.accept_quest("settle-the-score").unwrap();
        session.move_to("pizza-place").unwrap();

        let report = session.attack("tim").unwrap();
        assert_eq!(report.damage, 3);
        assert!(report.defeated);
        assert_eq!(report.remaining_hp, 0);
        assert_eq!(
            report.combat_line.as_deref(),
            Some("You wish to fight? So be it.")
        );
        assert_eq!(report.dropped, vec![("pizza-slice".to_string(), 1)]);
        assert_eq!(
            report.transitions,
            vec![QuestTransition::completed("settle-the-score")]
        );

        // The loot is on the ground now
        assert!(session
            .scene()
            .unwrap()
            .items
            .iter()
            .any(|g| g.item_id == "pizza-slice"));

        // A defeated character can neither fight nor talk
        assert!(matches!(
            session.attack("tim"),
            Err(GameError::CharacterDefeated(_))
        ));
        assert!(matches!(
            session.talk_to("tim"),
            Err(GameError::CharacterDefeated(_))
        ));
    }

    #[test]
    fn test_attack_damage_is_mitigated_by_defense() {
        let mut session = sparring_session();

        // Attack 3 against defense 1 lands 2
        let report = session.attack("scrapper").unwrap();
        assert_eq!(report.damage, 2);
        assert_eq!(report.remaining_hp, 6);
        assert!(!report.defeated);
    }

    #[test]
    fn test_attack_damage_never_drops_below_one() {
        let mut session = sparring_session();

        // Attack 3 against defense 5 still chips one off
        let report = session.attack("brute").unwrap();
        assert_eq!(report.damage, 1);
        assert_eq!(report.remaining_hp, 7);
        assert!(!report.defeated);

        // Every further blow lands the same floor
        let report = session.attack("brute").unwrap();
        assert_eq!(report.damage, 1);
        assert_eq!(report.remaining_hp, 6);
    }

    #[test]
    fn test_defeat_before_acceptance_does_not_count() {
        let mut session = demo_session();
        session.move_to("pizza-place").unwrap();

        let report = session.attack("tim").unwrap();
        assert!(report.defeated);
        assert!(report.transitions.is_empty());

        session.accept_quest("settle-the-score").unwrap();

        // A later unrelated event re-evaluates the goal; the earlier
        // defeat left no trace, so the quest stays open
        session.give_item("bernie", "lucky-charm", 1).unwrap();
        assert_eq!(
            session.quest("settle-the-score").unwrap().status(),
            QuestStatus::Accepted
        );
    }

    #[test]
    fn test_dialogue_tracks_quest_status() {
        let mut session = demo_session();

        let line = session.talk_to("nomad").unwrap();
        assert!(line.contains("Fetch it for me"));

        session.accept_quest("coin-errand").unwrap();
        let line = session.talk_to("nomad").unwrap();
        assert_eq!(line, "Found my coin yet?");

        session.move_to("pizza-place").unwrap();
        session.pick_up("coin").unwrap();
        session.move_to("street").unwrap();
        let line = session.talk_to("nomad").unwrap();
        assert_eq!(line, "You found it! I am in your debt.");
    }

    #[test]
    fn test_npc_must_be_in_current_scene() {
        let mut session = demo_session();
        // Tim is in the pizza place, not the street
        assert!(matches!(
            session.attack("tim"),
            Err(GameError::UnknownCharacter(_))
        ));
        assert!(matches!(
            session.talk_to("tim"),
            Err(GameError::UnknownCharacter(_))
        ));
    }

    #[test]
    fn test_consume_and_equip_through_session() {
        let mut session = demo_session();
        session.give_item("bernie", "knife", 1).unwrap();
        session.give_item("bernie", "lucky-charm", 1).unwrap();
        session.give_item("bernie", "coin", 1).unwrap();

        session.equip_item("knife").unwrap();
        session.consume_item("lucky-charm").unwrap();
        assert_eq!(session.player().effective_attack(), 6);

        assert_eq!(session.unequip_weapon(), Some("knife".to_string()));
        assert_eq!(session.player().effective_attack(), 4);

        assert!(matches!(
            session.consume_item("coin"),
            Err(GameError::NotConsumable(_))
        ));
        assert!(matches!(
            session.consume_item("crown"),
            Err(GameError::UnknownItem(_))
        ));
    }

    #[test]
    fn test_give_item_to_npc_does_not_advance_player_quests() {
        let mut session = demo_session();
        session.accept_quest("coin-errand").unwrap();

        let transitions = session.give_item("tim", "lucky-charm", 1).unwrap();
        assert!(transitions.is_empty());
        assert_eq!(
            session.quest("coin-errand").unwrap().status(),
            QuestStatus::Accepted
        );
        assert!(session.npc("tim").unwrap().check_item("lucky-charm"));
    }

    struct Recorder(Rc<RefCell<Vec<(String, bool)>>>);

    impl QuestObserver for Recorder {
        fn notify(&mut self, event: &QuestEvent, items: &dyn ItemCheckable) {
            self.0
                .borrow_mut()
                .push((event.event_type().to_string(), items.check_item("coin")));
        }
    }

    #[test]
    fn test_subscribers_see_committed_state() {
        let mut session = demo_session();
        let seen = Rc::new(RefCell::new(Vec::new()));
        session.subscribe(Box::new(Recorder(Rc::clone(&seen))));

        session.move_to("pizza-place").unwrap();
        session.pick_up("coin").unwrap();
        session.attack("tim").unwrap();

        let seen = seen.borrow();
        // The coin was already in the inventory when its own
        // acquisition was announced
        assert_eq!(
            *seen,
            vec![
                ("item_acquired".to_string(), true),
                ("character_defeated".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_zero_quantity_gift_announces_nothing() {
        let mut session = demo_session();
        session.accept_quest("coin-errand").unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        session.subscribe(Box::new(Recorder(Rc::clone(&seen))));

        let transitions = session.give_item("bernie", "coin", 0).unwrap();
        assert!(transitions.is_empty());
        assert!(!session.player().check_item("coin"));
        assert!(seen.borrow().is_empty());
        assert_eq!(
            session.quest("coin-errand").unwrap().status(),
            QuestStatus::Accepted
        );

        // Unknown ids stay errors at any quantity
        assert!(matches!(
            session.give_item("bernie", "crown", 0),
            Err(GameError::UnknownItem(_))
        ));
    }

    #[test]
    fn test_full_walkthrough() {
        let mut session = demo_session();
        session.accept_quest("coin-errand").unwrap();
        session.accept_quest("settle-the-score").unwrap();
        assert_eq!(session.quests_with_status(QuestStatus::Accepted).len(), 2);

        session.move_to("pizza-place").unwrap();
        session.pick_up("coin").unwrap();
        session.attack("tim").unwrap();

        assert_eq!(session.quests_with_status(QuestStatus::Completed).len(), 2);
        assert!(session.quests_with_status(QuestStatus::Accepted).is_empty());

        // Loot from the fight is collectable like any other item
        session.pick_up("pizza-slice").unwrap();
        session.consume_item("pizza-slice").unwrap();

        session.move_to("street").unwrap();
        let line = session.talk_to("nomad").unwrap();
        assert_eq!(line, "You found it! I am in your debt.");
    }
}

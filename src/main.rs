//! Demo Walkthrough
//!
//! Assembles a two-scene world and plays it from the first greeting to
//! the last quest completion: fetch the nomad's coin, settle the score
//! with Tim, and report the quest log on the way out.

use std::path::Path;

use tracing::error;

use masked_traveler::character::{GameCharacter, NpcDialogue};
use masked_traveler::data::ItemRegistry;
use masked_traveler::error::GameError;
use masked_traveler::quest::{ItemCheckable, Quest, QuestEvent, QuestObserver, QuestTransition};
use masked_traveler::scene::Scene;
use masked_traveler::session::GameSession;

// ============================================================================
// Narration Observer
// ============================================================================

/// Prints a side note for every quest event the session fans out
struct EventNarrator;

impl QuestObserver for EventNarrator {
    fn notify(&mut self, event: &QuestEvent, _items: &dyn ItemCheckable) {
        match event {
            QuestEvent::ItemAcquired { item_id } => {
                println!("  (your pack feels heavier: {})", item_id);
            }
            QuestEvent::CharacterDefeated { character_id } => {
                println!("  ({} goes down)", character_id);
            }
        }
    }
}

// ============================================================================
// World Assembly
// ============================================================================

fn build_world(items: ItemRegistry) -> Result<GameSession, GameError> {
    let mut session = GameSession::new(items, "bernie", "Bernie", 10, 3, 1);

    session.add_scene(Scene::new(
        "street",
        "Street",
        "A quiet street. A masked nomad leans against the lamppost.",
    ))?;
    session.add_scene(Scene::new(
        "pizza-place",
        "Pizza Place",
        "Warm ovens, checkered floor. Tim stands behind the counter.",
    ))?;
    session.link_scenes("street", "pizza-place")?;

    let nomad = GameCharacter::new_npc(
        "nomad",
        "The Masked Nomad",
        5,
        1,
        0,
        NpcDialogue {
            greeting: Some("The nomad nods at you from behind the mask.".to_string()),
            quest_offer: Some(
                "Traveler. I lost an old coin in the pizza place. Bring it back to me."
                    .to_string(),
            ),
            quest_progress: Some("The coin, traveler. Have you found it?".to_string()),
            quest_complete: Some("My coin. You have my gratitude, traveler.".to_string()),
            combat: None,
        },
        None,
    );
    session.add_npc(nomad, "street")?;

    let tim = GameCharacter::new_npc(
        "tim",
        "Tim",
        1,
        1,
        0,
        NpcDialogue {
            greeting: Some("Tim glares at you over the counter.".to_string()),
            quest_offer: Some("You again? Say it to my face, if you dare.".to_string()),
            quest_progress: Some("Still standing there?".to_string()),
            quest_complete: None,
            combat: Some("You wish to fight? So be it.".to_string()),
        },
        None,
    );
    session.add_npc(tim, "pizza-place")?;

    session.add_quest(Quest::fetch(
        "coin-errand",
        "An Old Debt",
        "Recover the coin the nomad lost in the pizza place.",
        &["coin"],
    ))?;
    session.add_quest(Quest::combat(
        "settle-the-score",
        "Settle the Score",
        "Best Tim in a fight, once and for all.",
        &["tim"],
    ))?;
    session.link_npc_quest("nomad", "coin-errand")?;
    session.link_npc_quest("tim", "settle-the-score")?;

    session.place_item("pizza-place", "coin", 1)?;
    session.give_item("tim", "pizza-slice", 1)?;
    session.give_item("bernie", "knife", 1)?;
    session.give_item("bernie", "jacket", 1)?;
    session.set_location("street")?;

    Ok(session)
}

// ============================================================================
// Walkthrough
// ============================================================================

fn describe(session: &GameSession) -> Result<(), GameError> {
    let scene = session.scene()?;
    println!();
    println!("== {} ==", scene.display_name);
    println!("{}", scene.description);
    for item in &scene.items {
        println!("  on the ground: {} x{}", item.item_id, item.quantity);
    }
    Ok(())
}

fn announce(transitions: &[QuestTransition], session: &GameSession) {
    for transition in transitions {
        if let Some(quest) = session.quest(&transition.quest_id) {
            println!("  *** quest complete: {} ***", quest.display_name());
        }
    }
}

fn run(session: &mut GameSession) -> Result<(), GameError> {
    describe(session)?;
    println!("Nomad: {}", session.talk_to("nomad")?);
    session.accept_quest("coin-errand")?;
    session.accept_quest("settle-the-score")?;
    println!("Nomad: {}", session.talk_to("nomad")?);

    session.equip_item("knife")?;
    session.equip_item("jacket")?;
    println!(
        "You gear up. Attack {}, defense {}.",
        session.player().effective_attack(),
        session.player().effective_defense()
    );

    session.move_to("pizza-place")?;
    describe(session)?;
    println!("Tim: {}", session.talk_to("tim")?);

    let transitions = session.pick_up("coin")?;
    announce(&transitions, session);

    let report = session.attack("tim")?;
    if let Some(line) = &report.combat_line {
        println!("{}: {}", report.defender_name, line);
    }
    println!(
        "You hit {} for {} damage.",
        report.defender_name, report.damage
    );
    if report.defeated {
        println!("{} is defeated.", report.defender_name);
        for (item_id, quantity) in &report.dropped {
            println!("  dropped: {} x{}", item_id, quantity);
        }
    }
    announce(&report.transitions, session);

    if session.scene()?.items.iter().any(|g| g.item_id == "pizza-slice") {
        session.pick_up("pizza-slice")?;
        session.consume_item("pizza-slice")?;
        println!("You eat the dropped slice. HP {}.", session.player().character().hp);
    }

    session.move_to("street")?;
    println!("Nomad: {}", session.talk_to("nomad")?);

    println!();
    println!("== quest log ==");
    for quest in session.quest_log() {
        let duration = quest
            .duration_secs()
            .map(|secs| format!(", {}s", secs))
            .unwrap_or_default();
        println!(
            "  {} [{}{}]",
            quest.display_name(),
            quest.status().as_str(),
            duration
        );
    }
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<(), GameError> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("masked_traveler=info".parse().unwrap()),
        )
        .init();

    let mut items = ItemRegistry::new();
    if let Err(e) = items.load_from_directory(Path::new("data")) {
        error!("Failed to load item registry: {}", e);
        return Err(e);
    }

    let mut session = build_world(items)?;
    session.subscribe(Box::new(EventNarrator));

    run(&mut session)
}

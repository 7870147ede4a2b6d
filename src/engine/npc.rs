//! NPC behavior: autonomous wandering and stateless interaction.

use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

use crate::engine::errors::EngineError;
use crate::engine::prompt::ConfirmPrompt;
use crate::engine::world::World;

/// One end-of-turn movement step for a single NPC.
///
/// Movement-eligible NPCs roll a 1-in-3 chance; on success they leave
/// through an exit of their current room chosen uniformly at random.
/// Rooms without exits never produce a move.
pub fn wander(world: &mut World, rng: &mut StdRng, npc_id: &str) -> Result<(), EngineError> {
    let npc = world.npc(npc_id)?;
    if !npc.can_move {
        return Ok(());
    }
    if rng.gen_range(0..3) != 0 {
        return Ok(());
    }
    let room = world.room(&npc.room_id)?;
    if room.exits.is_empty() {
        return Ok(());
    }
    let targets: Vec<String> = room.exits.values().cloned().collect();
    let dest = targets[rng.gen_range(0..targets.len())].clone();
    debug!("{} wanders to {}", npc_id, dest);
    world.move_npc(npc_id, &dest)
}

/// Talk to an NPC.
///
/// Without a quest the NPC answers with one flavor line picked uniformly
/// from its pool. With an offered quest that still has open tasks, the
/// NPC speaks the stage-appropriate quest line; if the quest has not been
/// accepted yet the player is asked to accept or decline. Declining keeps
/// the offer in place, so the player can come back and accept later. A
/// quest whose tasks are all done produces no line here; the orchestrator
/// notices the completion instead.
pub fn interact(
    world: &mut World,
    rng: &mut StdRng,
    prompt: &mut dyn ConfirmPrompt,
    npc_id: &str,
) -> Result<String, EngineError> {
    let npc = world.npc(npc_id)?;
    let name = npc.name.clone();

    let quest_id = match &npc.current_quest {
        None => {
            if npc.lines.is_empty() {
                return Err(EngineError::SeedData(format!(
                    "character '{}' has no quest and no dialogue lines",
                    npc_id
                )));
            }
            let line = &npc.lines[rng.gen_range(0..npc.lines.len())];
            return Ok(format!("{}: {}", name, line));
        }
        Some(id) => id.clone(),
    };

    let quest = world.quest(&quest_id)?;
    if quest.tasks_left == 0 {
        return Ok(String::new());
    }

    let mut out = format!("{}: {}", name, quest.interaction());
    if !quest.started {
        let message = format!("{}\n\nDo you want to accept this quest?", quest.interaction());
        if prompt.confirm("Quest Request", &message) {
            world.quest_mut(&quest_id)?.started = true;
            debug!("quest {} accepted", quest_id);
            out.push_str(&format!("\n{}: Thank you for accepting my quest.", name));
        } else {
            out.push_str(&format!(
                "\n{}: You have declined this quest.\nWhenever you are ready to accept it, just talk to {}.",
                name, name
            ));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::prompt::ScriptedPrompt;
    use crate::engine::types::{NpcRecord, QuestRecord, RoomRecord, WorldMeta};
    use rand::SeedableRng;

    fn corridor_world(can_move: bool) -> World {
        let mut world = World::new(WorldMeta::new("west"));
        world.add_room(RoomRecord::new("west", "in the west wing").with_exit("east", "east"));
        world.add_room(RoomRecord::new("east", "in the east wing").with_exit("west", "west"));
        world.add_room(RoomRecord::new("oubliette", "in the oubliette"));
        let mut npc = NpcRecord::new("maid", "Daisy", "west").with_lines(&["Oh!", "Shoo."]);
        npc.can_move = can_move;
        world.add_npc(npc).unwrap();
        world
    }

    #[test]
    fn immobile_npc_never_wanders() {
        let mut world = corridor_world(false);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            wander(&mut world, &mut rng, "maid").unwrap();
        }
        assert_eq!(world.npc("maid").unwrap().room_id, "west");
    }

    #[test]
    fn wandering_npc_eventually_moves() {
        let mut world = corridor_world(true);
        let mut rng = StdRng::seed_from_u64(7);
        let mut moved = false;
        for _ in 0..50 {
            wander(&mut world, &mut rng, "maid").unwrap();
            if world.npc("maid").unwrap().room_id != "west" {
                moved = true;
                break;
            }
        }
        assert!(moved);
    }

    #[test]
    fn exitless_room_pins_the_npc() {
        let mut world = corridor_world(true);
        world.move_npc("maid", "oubliette").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            wander(&mut world, &mut rng, "maid").unwrap();
        }
        assert_eq!(world.npc("maid").unwrap().room_id, "oubliette");
    }

    #[test]
    fn questless_npc_answers_with_a_flavor_line() {
        let mut world = corridor_world(false);
        let mut rng = StdRng::seed_from_u64(1);
        let mut prompt = ScriptedPrompt::new(true);
        let out = interact(&mut world, &mut rng, &mut prompt, "maid").unwrap();
        assert!(out == "Daisy: Oh!" || out == "Daisy: Shoo.");
    }

    #[test]
    fn offer_accept_and_decline_are_reentrant() {
        let mut world = corridor_world(false);
        world.add_quest(
            QuestRecord::new("dust", "maid", "Dusting", "Help with the dusting.")
                .with_lines("Will you help?", "Done yet?", "Spotless.")
                .with_requested_room("east"),
        );
        world.npc_mut("maid").unwrap().current_quest = Some("dust".to_string());
        let mut rng = StdRng::seed_from_u64(1);

        // decline first: the offer stays and the quest stays unstarted
        let mut prompt = ScriptedPrompt::with_answers(&[false], true);
        let out = interact(&mut world, &mut rng, &mut prompt, "maid").unwrap();
        assert!(out.contains("Will you help?"));
        assert!(out.contains("You have declined this quest."));
        assert!(!world.quest("dust").unwrap().started);
        assert_eq!(
            world.npc("maid").unwrap().current_quest,
            Some("dust".to_string())
        );

        // ask again and accept
        let mut prompt = ScriptedPrompt::with_answers(&[true], false);
        let out = interact(&mut world, &mut rng, &mut prompt, "maid").unwrap();
        assert!(out.contains("Thank you for accepting my quest."));
        assert!(world.quest("dust").unwrap().started);

        // already started: progress line, no prompt
        let mut prompt = ScriptedPrompt::new(false);
        let out = interact(&mut world, &mut rng, &mut prompt, "maid").unwrap();
        assert_eq!(out, "Daisy: Done yet?");
    }

    #[test]
    fn completed_tasks_silence_the_quest_line() {
        let mut world = corridor_world(false);
        world.add_quest(
            QuestRecord::new("idle", "maid", "Idle", "")
                .with_lines("", "", "Surprise."),
        );
        world.npc_mut("maid").unwrap().current_quest = Some("idle".to_string());
        let mut rng = StdRng::seed_from_u64(1);
        let mut prompt = ScriptedPrompt::new(true);
        let out = interact(&mut world, &mut rng, &mut prompt, "maid").unwrap();
        assert_eq!(out, "");
    }
}

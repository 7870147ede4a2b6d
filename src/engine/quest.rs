//! Quest lifecycle primitives.
//!
//! The dependency graph between quests is push-based: a quest carries an
//! in-degree counter and the keys it triggers, nothing else. The
//! orchestrator owns the propagation protocol (who calls [`initiate`]
//! when); this module owns the single-quest state transitions.

use log::debug;

use crate::engine::errors::EngineError;
use crate::engine::world::World;

/// Deliver one predecessor trigger event to a quest.
///
/// Decrements the unlock counter; at zero or below the quest is handed to
/// its giver as the offered quest. Extra triggers past zero re-assign the
/// offer, which is harmless and lets a finished chain put an earlier quest
/// back in its giver's hands.
pub fn initiate(world: &mut World, quest_id: &str) -> Result<(), EngineError> {
    let (giver, unlocked) = {
        let quest = world.quest_mut(quest_id)?;
        quest.unlock_counter -= 1;
        (quest.giver.clone(), quest.unlock_counter <= 0)
    };
    if unlocked {
        debug!("quest {} unlocked, offered by {}", quest_id, giver);
        world.npc_mut(&giver)?.current_quest = Some(quest_id.to_string());
    }
    Ok(())
}

/// Mark one task of the quest as done.
///
/// No lower bound: calling this more often than the quest has declared
/// tasks drives the counter negative. That is caller discipline, not a
/// runtime check; a floor here would hide double-counting in the
/// orchestrator.
pub fn task_done(world: &mut World, quest_id: &str) -> Result<(), EngineError> {
    world.quest_mut(quest_id)?.tasks_left -= 1;
    Ok(())
}

/// Drop a satisfied item requirement and complete its task.
///
/// Called once per distinct requirement, not once per unit delivered.
pub fn remove_requested_item(
    world: &mut World,
    quest_id: &str,
    item_id: &str,
) -> Result<(), EngineError> {
    world.quest_mut(quest_id)?.requested_items.remove(item_id);
    task_done(world, quest_id)
}

/// Mark the quest accomplished, clear the giver's offer, and return the
/// giver-attributed completion line.
///
/// Caller contract: only invoke when `tasks_left == 0`. A second call
/// fires the completion again; the orchestrator gates every path through
/// the task check.
pub fn finish(world: &mut World, quest_id: &str) -> Result<String, EngineError> {
    let (giver, line) = {
        let quest = world.quest_mut(quest_id)?;
        quest.accomplished = true;
        (quest.giver.clone(), quest.completion_line.clone())
    };
    let giver_name = {
        let npc = world.npc_mut(&giver)?;
        npc.current_quest = None;
        npc.name.clone()
    };
    debug!("quest {} accomplished", quest_id);
    Ok(format!("{}: {}", giver_name, line))
}

/// Resolve a requested item by display name, only for an accepted quest.
///
/// Returns `None` while the quest is unaccepted (handing items to an NPC
/// before taking their quest must not count) and for names the quest does
/// not request.
pub fn requested_item(
    world: &World,
    quest_id: &str,
    item_name: &str,
) -> Result<Option<String>, EngineError> {
    let quest = world.quest(quest_id)?;
    if !quest.started {
        return Ok(None);
    }
    let wanted = item_name.trim().to_lowercase();
    for item_id in quest.requested_items.keys() {
        let item = world.item(item_id)?;
        if item.name.to_lowercase() == wanted || item.plural_name.to_lowercase() == wanted {
            return Ok(Some(item_id.clone()));
        }
    }
    Ok(None)
}

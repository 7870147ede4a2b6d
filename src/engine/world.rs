//! The entity arena: every room, item, NPC and quest in the game, owned in
//! one place and addressed by stable string ids. Relations between
//! entities are id fields, resolved through the typed lookups here.

use std::collections::HashMap;

use crate::engine::errors::EngineError;
use crate::engine::types::{ItemRecord, NpcRecord, QuestRecord, RoomRecord, WorldMeta};

/// Lowercased, whitespace-collapsed form used for name matching.
fn normalized(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The complete mutable game world.
///
/// Insertion order of rooms and NPCs is preserved separately from the
/// lookup maps: random teleports index into the room order and the
/// end-of-turn tick walks NPCs in insertion order, so both must be
/// deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct World {
    pub meta: WorldMeta,
    rooms: HashMap<String, RoomRecord>,
    items: HashMap<String, ItemRecord>,
    npcs: HashMap<String, NpcRecord>,
    quests: HashMap<String, QuestRecord>,
    room_order: Vec<String>,
    npc_order: Vec<String>,
}

impl World {
    pub fn new(meta: WorldMeta) -> Self {
        Self {
            meta,
            rooms: HashMap::new(),
            items: HashMap::new(),
            npcs: HashMap::new(),
            quests: HashMap::new(),
            room_order: Vec::new(),
            npc_order: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Construction (setup phase only)
    // ------------------------------------------------------------------

    pub fn add_room(&mut self, room: RoomRecord) {
        self.room_order.push(room.id.clone());
        self.rooms.insert(room.id.clone(), room);
    }

    pub fn add_item(&mut self, item: ItemRecord) {
        self.items.insert(item.id.clone(), item);
    }

    /// Insert an NPC and enroll it in its starting room's roster.
    pub fn add_npc(&mut self, npc: NpcRecord) -> Result<(), EngineError> {
        let room = self
            .rooms
            .get_mut(&npc.room_id)
            .ok_or_else(|| EngineError::UnknownRoom(npc.room_id.clone()))?;
        room.npcs.push(npc.id.clone());
        self.npc_order.push(npc.id.clone());
        self.npcs.insert(npc.id.clone(), npc);
        Ok(())
    }

    pub fn add_quest(&mut self, quest: QuestRecord) {
        self.quests.insert(quest.id.clone(), quest);
    }

    // ------------------------------------------------------------------
    // Typed lookups
    // ------------------------------------------------------------------

    pub fn room(&self, id: &str) -> Result<&RoomRecord, EngineError> {
        self.rooms
            .get(id)
            .ok_or_else(|| EngineError::UnknownRoom(id.to_string()))
    }

    pub fn room_mut(&mut self, id: &str) -> Result<&mut RoomRecord, EngineError> {
        self.rooms
            .get_mut(id)
            .ok_or_else(|| EngineError::UnknownRoom(id.to_string()))
    }

    pub fn item(&self, id: &str) -> Result<&ItemRecord, EngineError> {
        self.items
            .get(id)
            .ok_or_else(|| EngineError::UnknownItem(id.to_string()))
    }

    pub fn item_mut(&mut self, id: &str) -> Result<&mut ItemRecord, EngineError> {
        self.items
            .get_mut(id)
            .ok_or_else(|| EngineError::UnknownItem(id.to_string()))
    }

    pub fn npc(&self, id: &str) -> Result<&NpcRecord, EngineError> {
        self.npcs
            .get(id)
            .ok_or_else(|| EngineError::UnknownNpc(id.to_string()))
    }

    pub fn npc_mut(&mut self, id: &str) -> Result<&mut NpcRecord, EngineError> {
        self.npcs
            .get_mut(id)
            .ok_or_else(|| EngineError::UnknownNpc(id.to_string()))
    }

    pub fn quest(&self, id: &str) -> Result<&QuestRecord, EngineError> {
        self.quests
            .get(id)
            .ok_or_else(|| EngineError::UnknownQuest(id.to_string()))
    }

    pub fn quest_mut(&mut self, id: &str) -> Result<&mut QuestRecord, EngineError> {
        self.quests
            .get_mut(id)
            .ok_or_else(|| EngineError::UnknownQuest(id.to_string()))
    }

    /// Room ids in insertion order.
    pub fn room_ids(&self) -> &[String] {
        &self.room_order
    }

    /// NPC ids in insertion order.
    pub fn npc_ids(&self) -> &[String] {
        &self.npc_order
    }

    // ------------------------------------------------------------------
    // Name resolution
    // ------------------------------------------------------------------

    /// Find an NPC by display name within one room's roster.
    pub fn npc_in_room(&self, room_id: &str, name: &str) -> Result<Option<String>, EngineError> {
        let wanted = normalized(name);
        for npc_id in &self.room(room_id)?.npcs {
            let npc = self.npc(npc_id)?;
            if normalized(&npc.name) == wanted {
                return Ok(Some(npc_id.clone()));
            }
        }
        Ok(None)
    }

    /// Find an NPC by display name anywhere in the world.
    pub fn npc_by_name(&self, name: &str) -> Option<String> {
        let wanted = normalized(name);
        self.npc_order
            .iter()
            .find(|id| {
                self.npcs
                    .get(*id)
                    .is_some_and(|npc| normalized(&npc.name) == wanted)
            })
            .cloned()
    }

    /// Find an item by singular or plural display name within one room.
    pub fn item_in_room(&self, room_id: &str, name: &str) -> Result<Option<String>, EngineError> {
        let wanted = normalized(name);
        for item_id in self.room(room_id)?.items.keys() {
            let item = self.item(item_id)?;
            if normalized(&item.name) == wanted || normalized(&item.plural_name) == wanted {
                return Ok(Some(item_id.clone()));
            }
        }
        Ok(None)
    }

    // ------------------------------------------------------------------
    // Mechanics
    // ------------------------------------------------------------------

    /// Relocate an NPC: removed from the old roster, appended to the new
    /// one, then the NPC's own room field is updated. Never a bare field
    /// write, so a room's roster and its occupants' back-references cannot
    /// drift apart.
    pub fn move_npc(&mut self, npc_id: &str, dest_room_id: &str) -> Result<(), EngineError> {
        let old_room_id = self.npc(npc_id)?.room_id.clone();
        if !self.rooms.contains_key(dest_room_id) {
            return Err(EngineError::UnknownRoom(dest_room_id.to_string()));
        }
        let old_room = self.room_mut(&old_room_id)?;
        old_room.npcs.retain(|id| id != npc_id);
        self.room_mut(dest_room_id)?.npcs.push(npc_id.to_string());
        self.npc_mut(npc_id)?.room_id = dest_room_id.to_string();
        Ok(())
    }

    /// Occupants and takeable-item listing for a room.
    pub fn look_around(&self, room_id: &str) -> Result<String, EngineError> {
        let room = self.room(room_id)?;
        let mut out = String::new();

        let names: Vec<&str> = room
            .npcs
            .iter()
            .filter_map(|id| self.npcs.get(id).map(|npc| npc.name.as_str()))
            .collect();
        match names.len() {
            0 => out.push_str("You are alone in the room.\n"),
            1 => out.push_str(&format!("{} is in the room.\n", names[0])),
            _ => out.push_str(&format!("{} are in the room.\n", names.join(", "))),
        }

        if room.items.is_empty() {
            out.push_str("There are no items you can take in this room.\n");
        } else {
            out.push_str("You see:\n");
            for (item_id, count) in &room.items {
                let item = self.item(item_id)?;
                out.push_str(&format!("{} {}\n", count, item.display_name(*count)));
            }
        }
        Ok(out.trim_end().to_string())
    }

    // ------------------------------------------------------------------
    // Consistency checks
    // ------------------------------------------------------------------

    /// Collect wiring problems in the world graph. Run by the loader and
    /// the `check` subcommand; an empty result means every id field
    /// resolves and every questless NPC can speak.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for room in self.rooms.values() {
            for (direction, target) in &room.exits {
                if !self.rooms.contains_key(target) {
                    problems.push(format!(
                        "room '{}': exit '{}' leads to unknown room '{}'",
                        room.id, direction, target
                    ));
                }
            }
            for item_id in room.items.keys() {
                if !self.items.contains_key(item_id) {
                    problems.push(format!("room '{}': unknown item '{}'", room.id, item_id));
                }
            }
        }

        for npc in self.npcs.values() {
            match self.rooms.get(&npc.room_id) {
                None => problems.push(format!(
                    "character '{}': unknown room '{}'",
                    npc.id, npc.room_id
                )),
                Some(room) if !room.npcs.contains(&npc.id) => problems.push(format!(
                    "character '{}': missing from roster of '{}'",
                    npc.id, room.id
                )),
                Some(_) => {}
            }
            if npc.current_quest.is_none() && npc.lines.is_empty() {
                problems.push(format!("character '{}': no quest and no dialogue lines", npc.id));
            }
        }

        for quest in self.quests.values() {
            if !self.npcs.contains_key(&quest.giver) {
                problems.push(format!("quest '{}': unknown giver '{}'", quest.id, quest.giver));
            }
            for item_id in quest.requested_items.keys() {
                if !self.items.contains_key(item_id) {
                    problems.push(format!(
                        "quest '{}': requests unknown item '{}'",
                        quest.id, item_id
                    ));
                }
            }
            if let Some(room_id) = &quest.requested_room {
                if !self.rooms.contains_key(room_id) {
                    problems.push(format!(
                        "quest '{}': requests unknown room '{}'",
                        quest.id, room_id
                    ));
                }
            }
            for key in quest.unlocks_on_start.iter().chain(&quest.unlocks_on_finish) {
                if !self.quests.contains_key(key) {
                    problems.push(format!("quest '{}': unlocks unknown quest '{}'", quest.id, key));
                }
            }
            for (item_id, _) in &quest.reward.grants {
                if !self.items.contains_key(item_id) {
                    problems.push(format!(
                        "quest '{}': rewards unknown item '{}'",
                        quest.id, item_id
                    ));
                }
            }
        }

        if !self.rooms.contains_key(&self.meta.start_room) {
            problems.push(format!("meta: unknown start room '{}'", self.meta.start_room));
        }
        if let Some(room_id) = &self.meta.trap_room {
            if !self.rooms.contains_key(room_id) {
                problems.push(format!("meta: unknown trap room '{}'", room_id));
            }
        }
        if let Some(npc_id) = &self.meta.culprit {
            if !self.npcs.contains_key(npc_id) {
                problems.push(format!("meta: unknown culprit '{}'", npc_id));
            }
        }
        for (label, quest_id) in [
            ("accusation quest", &self.meta.accusation_quest),
            ("case quest", &self.meta.case_quest),
            ("guide quest", &self.meta.guide_quest),
        ] {
            if let Some(id) = quest_id {
                if !self.quests.contains_key(id) {
                    problems.push(format!("meta: unknown {} '{}'", label, id));
                }
            }
        }
        if let Some(npc_id) = &self.meta.guide_npc {
            if !self.npcs.contains_key(npc_id) {
                problems.push(format!("meta: unknown guide '{}'", npc_id));
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{ItemRecord, NpcRecord, RoomRecord, WorldMeta};

    fn two_room_world() -> World {
        let mut world = World::new(WorldMeta::new("hall"));
        world.add_room(RoomRecord::new("hall", "in the hall").with_exit("cellar", "cellar"));
        world.add_room(RoomRecord::new("cellar", "in the cellar").with_exit("hall", "hall"));
        world.add_item(ItemRecord::new("candle", "candle", "candles", "A stub of wax.", 4));
        world
            .add_npc(NpcRecord::new("porter", "Albert", "hall").with_lines(&["Evening."]))
            .unwrap();
        world
    }

    #[test]
    fn move_npc_updates_both_rosters() {
        let mut world = two_room_world();
        world.move_npc("porter", "cellar").unwrap();
        assert!(world.room("hall").unwrap().npcs.is_empty());
        assert_eq!(world.room("cellar").unwrap().npcs, vec!["porter"]);
        assert_eq!(world.npc("porter").unwrap().room_id, "cellar");
    }

    #[test]
    fn move_npc_rejects_unknown_destination() {
        let mut world = two_room_world();
        assert!(world.move_npc("porter", "attic").is_err());
        // the failed move must not have emptied the old roster
        assert_eq!(world.room("hall").unwrap().npcs, vec!["porter"]);
    }

    #[test]
    fn name_resolution_is_case_insensitive() {
        let mut world = two_room_world();
        world.room_mut("hall").unwrap().set_item_count("candle", 2);
        assert_eq!(
            world.npc_in_room("hall", "albert").unwrap(),
            Some("porter".to_string())
        );
        assert_eq!(
            world.item_in_room("hall", "Candles").unwrap(),
            Some("candle".to_string())
        );
        assert_eq!(world.item_in_room("cellar", "candle").unwrap(), None);
    }

    #[test]
    fn look_around_lists_occupants_and_items() {
        let mut world = two_room_world();
        world.room_mut("hall").unwrap().set_item_count("candle", 2);
        let look = world.look_around("hall").unwrap();
        assert!(look.contains("Albert is in the room."));
        assert!(look.contains("2 candles"));

        let empty = world.look_around("cellar").unwrap();
        assert!(empty.contains("You are alone in the room."));
        assert!(empty.contains("no items"));
    }

    #[test]
    fn validate_reports_dangling_ids() {
        let mut world = two_room_world();
        world.add_room(RoomRecord::new("attic", "in the attic").with_exit("nowhere", "void"));
        world.meta.culprit = Some("ghost".to_string());
        let problems = world.validate();
        assert!(problems.iter().any(|p| p.contains("unknown room 'void'")));
        assert!(problems.iter().any(|p| p.contains("unknown culprit 'ghost'")));
    }

    #[test]
    fn validate_accepts_consistent_world() {
        assert!(two_room_world().validate().is_empty());
    }
}

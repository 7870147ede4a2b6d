//! Player state and mechanics: the back-track stack, the slot-capped
//! stacking inventory, and the quest-room reverse index.

use std::collections::HashMap;

use crate::engine::errors::EngineError;
use crate::engine::types::{InventoryLimits, ItemRecord, StackOutcome};
use crate::engine::world::World;

/// The player: current position, movement history, held stacks, and the
/// set of quests currently being pursued.
#[derive(Debug, Clone)]
pub struct Player {
    pub room_id: String,
    /// Last-in-first-out history of rooms left behind; unbounded.
    pub previous_rooms: Vec<String>,
    /// Held item ids, one slot per distinct item, insertion order.
    pub inventory: Vec<String>,
    /// Active quest ids, insertion order.
    pub active_quests: Vec<String>,
    /// Reverse index: room to visit -> quest that the visit completes.
    pub quest_rooms: HashMap<String, String>,
}

impl Player {
    pub fn new(start_room: &str) -> Self {
        Self {
            room_id: start_room.to_string(),
            previous_rooms: Vec::new(),
            inventory: Vec::new(),
            active_quests: Vec::new(),
            quest_rooms: HashMap::new(),
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Leave through a named exit of the current room.
    ///
    /// Exits are offered to the player as a closed menu, so an unknown
    /// direction is a contract violation and comes back as a typed error.
    pub fn take_exit(&mut self, world: &World, direction: &str) -> Result<(), EngineError> {
        let room = world.room(&self.room_id)?;
        let dest = room
            .exits
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(direction.trim()))
            .map(|(_, target)| target.clone())
            .ok_or_else(|| EngineError::UnknownExit {
                room: self.room_id.clone(),
                exit: direction.trim().to_string(),
            })?;
        self.previous_rooms.push(self.room_id.clone());
        self.room_id = dest;
        Ok(())
    }

    /// Move directly to a room, keeping it on the back-track history.
    pub fn teleport(&mut self, room_id: &str) {
        self.previous_rooms.push(self.room_id.clone());
        self.room_id = room_id.to_string();
    }

    /// Pop the back-track stack. Returns false (position unchanged) when
    /// there is no history.
    pub fn go_back(&mut self) -> bool {
        match self.previous_rooms.pop() {
            Some(room_id) => {
                self.room_id = room_id;
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Inventory
    // ------------------------------------------------------------------

    pub fn holds(&self, item_id: &str) -> bool {
        self.inventory.iter().any(|id| id == item_id)
    }

    /// Resolve a held item by singular or plural display name.
    pub fn item_in_inventory(
        &self,
        world: &World,
        name: &str,
    ) -> Result<Option<String>, EngineError> {
        let wanted = name.trim().to_lowercase();
        for item_id in &self.inventory {
            let item = world.item(item_id)?;
            if item.name.to_lowercase() == wanted || item.plural_name.to_lowercase() == wanted {
                return Ok(Some(item_id.clone()));
            }
        }
        Ok(None)
    }

    /// Pick up the named item from the current room.
    ///
    /// The whole room count is offered to the stack; whatever does not fit
    /// is written back to the room, and the room entry disappears only
    /// when nothing remains. Unit totals are conserved across the call.
    pub fn take_item(
        &mut self,
        world: &mut World,
        limits: &InventoryLimits,
        name: &str,
    ) -> Result<String, EngineError> {
        let item_id = world
            .item_in_room(&self.room_id, name)?
            .ok_or_else(|| EngineError::ItemNotHere(name.trim().to_string()))?;
        let available = world.room(&self.room_id)?.item_count(&item_id);

        if !world.item(&item_id)?.pickable {
            return Ok("This item can not be picked up.".to_string());
        }

        if !self.holds(&item_id) {
            if self.inventory.len() >= limits.max_slots {
                let name = world.item(&item_id)?.name.clone();
                return Ok(format!("Inventory full - Could not take {}.", name));
            }
            self.inventory.push(item_id.clone());
        }

        let item = world.item_mut(&item_id)?;
        let outcome = item.take(available);
        let narration = stack_narration(item, outcome);
        let leftover = match outcome {
            StackOutcome::Added { .. } => 0,
            StackOutcome::Overflow { leftover, .. } => leftover,
            StackOutcome::AlreadyFull => available,
        };

        let room = world.room_mut(&self.room_id)?;
        if leftover == 0 {
            room.remove_item(&item_id);
        } else {
            room.set_item_count(&item_id, leftover);
        }
        Ok(narration)
    }

    /// Add units of an item directly to the inventory (quest rewards).
    ///
    /// Same slot and stack rules as taking from a room, but there is no
    /// source to return overflow to: units past the stack cap are
    /// forfeited along with the narration saying the stack is full.
    pub fn stash(
        &mut self,
        world: &mut World,
        limits: &InventoryLimits,
        item_id: &str,
        amount: u32,
    ) -> Result<String, EngineError> {
        if !self.holds(item_id) {
            if self.inventory.len() >= limits.max_slots {
                let name = world.item(item_id)?.name.clone();
                return Ok(format!("Inventory full - Could not take {}.", name));
            }
            self.inventory.push(item_id.to_string());
        }
        let item = world.item_mut(item_id)?;
        let outcome = item.take(amount);
        Ok(stack_narration(item, outcome))
    }

    /// Hand over units of a held item. Fails without any deduction when
    /// the stack is absent or short; an emptied stack frees its slot.
    pub fn give(
        &mut self,
        world: &mut World,
        item_id: &str,
        amount: u32,
    ) -> Result<bool, EngineError> {
        if !self.holds(item_id) {
            return Ok(false);
        }
        let item = world.item_mut(item_id)?;
        if item.current_amount < amount {
            return Ok(false);
        }
        item.remove(amount);
        if item.current_amount == 0 {
            self.inventory.retain(|id| id != item_id);
        }
        Ok(true)
    }

    /// Detail text for a held item.
    pub fn inspect_item(&self, world: &World, name: &str) -> Result<String, EngineError> {
        let item_id = self
            .item_in_inventory(world, name)?
            .ok_or_else(|| EngineError::ItemNotHeld(name.trim().to_string()))?;
        let item = world.item(&item_id)?;
        Ok(format!(
            "Amount in inventory: {} - Max amount you can hold: {}\n{}: {}",
            item.current_amount, item.max_amount, item.name, item.description
        ))
    }

    // ------------------------------------------------------------------
    // Quests
    // ------------------------------------------------------------------

    /// Track a freshly accepted quest; a requested room is entered into
    /// the reverse index so arrivals there can be matched.
    pub fn add_active_quest(&mut self, world: &World, quest_id: &str) -> Result<(), EngineError> {
        self.active_quests.push(quest_id.to_string());
        if let Some(room_id) = world.quest(quest_id)?.requested_room.clone() {
            self.quest_rooms.insert(room_id, quest_id.to_string());
        }
        Ok(())
    }

    pub fn remove_active_quest(&mut self, quest_id: &str) {
        self.active_quests.retain(|id| id != quest_id);
    }

    // ------------------------------------------------------------------
    // Displays
    // ------------------------------------------------------------------

    pub fn format_inventory(&self, world: &World) -> Result<String, EngineError> {
        if self.inventory.is_empty() {
            return Ok("Your inventory is empty.".to_string());
        }
        let mut lines = Vec::new();
        for item_id in &self.inventory {
            let item = world.item(item_id)?;
            lines.push(format!(
                "{} {}",
                item.current_amount,
                item.display_name(item.current_amount)
            ));
        }
        Ok(lines.join("\n"))
    }

    pub fn format_active_quests(&self, world: &World) -> Result<String, EngineError> {
        if self.active_quests.is_empty() {
            return Ok("You currently have no active quest.".to_string());
        }
        let mut blocks = Vec::new();
        for quest_id in &self.active_quests {
            blocks.push(world.quest(quest_id)?.summary());
        }
        Ok(blocks.join("\n\n"))
    }
}

fn stack_narration(item: &ItemRecord, outcome: StackOutcome) -> String {
    match outcome {
        StackOutcome::Added { amount } => format!(
            "{} {} was added to your inventory.",
            amount,
            item.display_name(amount)
        ),
        StackOutcome::Overflow { added, .. } => format!(
            "{} {} was added to your inventory.\nYou can not store any more {} in your inventory.",
            added,
            item.display_name(added),
            item.plural_name
        ),
        StackOutcome::AlreadyFull => format!(
            "You can not store any more {} in your inventory.",
            item.plural_name
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{NpcRecord, QuestRecord, RoomRecord, WorldMeta};

    fn precinct() -> (World, Player) {
        let mut world = World::new(WorldMeta::new("street"));
        world.add_room(
            RoomRecord::new("street", "in the street")
                .with_exit("bullpen", "bullpen")
                .with_item("hotdog", 6),
        );
        world.add_room(
            RoomRecord::new("bullpen", "in the bullpen")
                .with_exit("street", "street")
                .with_item("toycar", 1)
                .with_item("axe", 1),
        );
        world.add_item(ItemRecord::new("hotdog", "hotdog", "hotdogs", "Still warm.", 2));
        world.add_item(ItemRecord::new(
            "toycar",
            "toycar",
            "toycars",
            "Most likely belongs to a child.",
            1,
        ));
        world.add_item(ItemRecord::new("axe", "axe", "axes", "Better left alone.", 1).fixed());
        (world, Player::new("street"))
    }

    #[test]
    fn back_track_reverses_room_changes() {
        let (world, mut player) = precinct();
        player.take_exit(&world, "bullpen").unwrap();
        player.take_exit(&world, "street").unwrap();
        assert_eq!(player.room_id, "street");

        assert!(player.go_back());
        assert_eq!(player.room_id, "bullpen");
        assert!(player.go_back());
        assert_eq!(player.room_id, "street");
        assert!(!player.go_back());
        assert_eq!(player.room_id, "street");
    }

    #[test]
    fn unknown_exit_is_a_typed_error() {
        let (world, mut player) = precinct();
        let err = player.take_exit(&world, "rooftop").unwrap_err();
        assert!(matches!(err, EngineError::UnknownExit { .. }));
        assert_eq!(player.room_id, "street");
        assert!(player.previous_rooms.is_empty());
    }

    #[test]
    fn take_conserves_units_across_overflow() {
        let (mut world, mut player) = precinct();
        let limits = InventoryLimits::default();

        let out = player.take_item(&mut world, &limits, "hotdog").unwrap();
        assert!(out.contains("2 hotdogs was added"));
        assert!(out.contains("can not store any more hotdogs"));
        assert_eq!(world.item("hotdog").unwrap().current_amount, 2);
        assert_eq!(world.room("street").unwrap().item_count("hotdog"), 4);

        // full stack: a second take changes nothing
        let out = player.take_item(&mut world, &limits, "hotdog").unwrap();
        assert_eq!(out, "You can not store any more hotdogs in your inventory.");
        assert_eq!(world.item("hotdog").unwrap().current_amount, 2);
        assert_eq!(world.room("street").unwrap().item_count("hotdog"), 4);
    }

    #[test]
    fn take_removes_emptied_room_entry() {
        let (mut world, mut player) = precinct();
        let limits = InventoryLimits::default();
        player.take_exit(&world, "bullpen").unwrap();

        let out = player.take_item(&mut world, &limits, "toycar").unwrap();
        assert_eq!(out, "1 toycar was added to your inventory.");
        assert!(!world.room("bullpen").unwrap().items.contains_key("toycar"));
        assert!(player.holds("toycar"));
    }

    #[test]
    fn unpickable_item_is_refused() {
        let (mut world, mut player) = precinct();
        let limits = InventoryLimits::default();
        player.take_exit(&world, "bullpen").unwrap();

        let out = player.take_item(&mut world, &limits, "axe").unwrap();
        assert_eq!(out, "This item can not be picked up.");
        assert!(!player.holds("axe"));
        assert_eq!(world.room("bullpen").unwrap().item_count("axe"), 1);
    }

    #[test]
    fn missing_item_is_a_typed_error() {
        let (mut world, mut player) = precinct();
        let limits = InventoryLimits::default();
        let err = player.take_item(&mut world, &limits, "toycar").unwrap_err();
        assert!(matches!(err, EngineError::ItemNotHere(_)));
    }

    #[test]
    fn slot_cap_refuses_an_eleventh_stack() {
        let (mut world, mut player) = precinct();
        let limits = InventoryLimits::default();
        for i in 0..10 {
            let id = format!("curio{}", i);
            world.add_item(ItemRecord::new(&id, &id, &id, "A curio.", 5));
            world.room_mut("street").unwrap().set_item_count(&id, 1);
            player.take_item(&mut world, &limits, &id).unwrap();
        }
        assert_eq!(player.inventory.len(), 10);

        world.add_item(ItemRecord::new("onemore", "onemore", "onemores", "A curio.", 5));
        world.room_mut("street").unwrap().set_item_count("onemore", 1);
        let out = player.take_item(&mut world, &limits, "onemore").unwrap();
        assert_eq!(out, "Inventory full - Could not take onemore.");
        assert_eq!(player.inventory.len(), 10);
        assert_eq!(world.room("street").unwrap().item_count("onemore"), 1);
    }

    #[test]
    fn give_deducts_and_frees_the_slot() {
        let (mut world, mut player) = precinct();
        let limits = InventoryLimits::default();
        player.take_exit(&world, "bullpen").unwrap();
        player.take_item(&mut world, &limits, "toycar").unwrap();

        assert!(!player.give(&mut world, "toycar", 2).unwrap());
        assert!(player.holds("toycar"));

        assert!(player.give(&mut world, "toycar", 1).unwrap());
        assert!(!player.holds("toycar"));
        assert_eq!(world.item("toycar").unwrap().current_amount, 0);
    }

    #[test]
    fn stash_forfeits_reward_overflow() {
        let (mut world, mut player) = precinct();
        let limits = InventoryLimits::default();

        let out = player.stash(&mut world, &limits, "hotdog", 5).unwrap();
        assert!(out.contains("2 hotdogs was added"));
        assert_eq!(world.item("hotdog").unwrap().current_amount, 2);
        // the street's supply is untouched; only the granted surplus vanished
        assert_eq!(world.room("street").unwrap().item_count("hotdog"), 6);
    }

    #[test]
    fn inspect_reports_amounts_and_description() {
        let (mut world, mut player) = precinct();
        let limits = InventoryLimits::default();
        player.take_item(&mut world, &limits, "hotdog").unwrap();

        let out = player.inspect_item(&world, "hotdog").unwrap();
        assert!(out.contains("Amount in inventory: 2 - Max amount you can hold: 2"));
        assert!(out.contains("hotdog: Still warm."));

        assert!(matches!(
            player.inspect_item(&world, "axe").unwrap_err(),
            EngineError::ItemNotHeld(_)
        ));
    }

    #[test]
    fn accepted_quest_with_room_fills_the_reverse_index() {
        let (mut world, mut player) = precinct();
        world
            .add_npc(NpcRecord::new("jake", "Jake", "bullpen").with_lines(&["Noice."]))
            .unwrap();
        world.add_quest(
            QuestRecord::new("visit", "jake", "Walk the beat", "Go outside.")
                .with_requested_room("street"),
        );

        player.add_active_quest(&world, "visit").unwrap();
        assert_eq!(player.quest_rooms.get("street"), Some(&"visit".to_string()));
        assert_eq!(player.format_active_quests(&world).unwrap(), "Quest: Walk the beat.\nGo outside.");
    }
}

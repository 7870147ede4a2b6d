use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::engine::errors::EngineError;

/// Limits applied to the player's inventory.
///
/// A slot holds one item stack regardless of how many units the stack
/// contains; the per-stack unit cap lives on the item itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryLimits {
    pub max_slots: usize,
}

impl Default for InventoryLimits {
    fn default() -> Self {
        Self { max_slots: 10 }
    }
}

/// Result of adding units to an item stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackOutcome {
    /// The stack was already at capacity; nothing was added.
    AlreadyFull,
    /// Part of the amount fit; the leftover must be put back wherever the
    /// units came from.
    Overflow { added: u32, leftover: u32 },
    /// The whole amount fit.
    Added { amount: u32 },
}

/// A stackable, countable resource.
///
/// `current_amount` is the stack the player holds (zero while unheld);
/// rooms track their own counts in their item maps. Identity is the `id`
/// string, never the display names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemRecord {
    pub id: String,
    pub name: String,
    pub plural_name: String,
    pub description: String,
    pub current_amount: u32,
    pub max_amount: u32,
    pub pickable: bool,
}

impl ItemRecord {
    pub fn new(id: &str, name: &str, plural_name: &str, description: &str, max_amount: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            plural_name: plural_name.to_string(),
            description: description.to_string(),
            current_amount: 0,
            max_amount,
            pickable: true,
        }
    }

    pub fn fixed(mut self) -> Self {
        self.pickable = false;
        self
    }

    /// Singular or plural display name for the given amount.
    pub fn display_name(&self, amount: u32) -> &str {
        if amount == 1 {
            &self.name
        } else {
            &self.plural_name
        }
    }

    /// Add units to the stack, up to `max_amount`.
    ///
    /// Overflow is returned to the caller, never dropped here.
    pub fn take(&mut self, amount: u32) -> StackOutcome {
        if self.current_amount == self.max_amount {
            return StackOutcome::AlreadyFull;
        }
        if self.current_amount + amount > self.max_amount {
            let added = self.max_amount - self.current_amount;
            self.current_amount = self.max_amount;
            return StackOutcome::Overflow {
                added,
                leftover: amount - added,
            };
        }
        self.current_amount += amount;
        StackOutcome::Added { amount }
    }

    /// Remove units from the stack.
    pub fn remove(&mut self, amount: u32) {
        self.current_amount = self.current_amount.saturating_sub(amount);
    }
}

/// A location in the world graph.
///
/// Exits are directed and keyed by free-text direction names; a reverse
/// link exists only where it is declared separately. The NPC roster keeps
/// insertion order, which is also display and turn order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomRecord {
    pub id: String,
    pub description: String,
    pub exits: BTreeMap<String, String>,
    pub items: BTreeMap<String, u32>,
    pub npcs: Vec<String>,
}

impl RoomRecord {
    pub fn new(id: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            exits: BTreeMap::new(),
            items: BTreeMap::new(),
            npcs: Vec::new(),
        }
    }

    pub fn with_exit(mut self, direction: &str, room_id: &str) -> Self {
        self.exits.insert(direction.to_string(), room_id.to_string());
        self
    }

    pub fn with_item(mut self, item_id: &str, count: u32) -> Self {
        self.items.insert(item_id.to_string(), count);
        self
    }

    /// "You are in the kitchen." style description line.
    pub fn describe(&self) -> String {
        format!("You are {}.", self.description)
    }

    pub fn item_count(&self, item_id: &str) -> u32 {
        self.items.get(item_id).copied().unwrap_or(0)
    }

    pub fn set_item_count(&mut self, item_id: &str, count: u32) {
        self.items.insert(item_id.to_string(), count);
    }

    pub fn remove_item(&mut self, item_id: &str) {
        self.items.remove(item_id);
    }
}

/// A non-player character.
///
/// `room_id` mirrors the roster of exactly one room; relocation goes
/// through the world so both sides stay consistent. `lines` must be
/// non-empty whenever no quest is assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NpcRecord {
    pub id: String,
    pub name: String,
    pub room_id: String,
    pub current_quest: Option<String>,
    pub can_move: bool,
    pub lines: Vec<String>,
}

impl NpcRecord {
    pub fn new(id: &str, name: &str, room_id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            room_id: room_id.to_string(),
            current_quest: None,
            can_move: false,
            lines: Vec::new(),
        }
    }

    pub fn with_lines(mut self, lines: &[&str]) -> Self {
        self.lines.extend(lines.iter().map(|l| l.to_string()));
        self
    }

    pub fn wandering(mut self) -> Self {
        self.can_move = true;
        self
    }
}

/// Item grants attached to quest completion, parsed once at load time
/// from the `"name amount/name amount"` form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RewardSpec {
    pub grants: Vec<(String, u32)>,
}

impl RewardSpec {
    /// Parse a `/`-delimited reward spec. The empty string is a valid
    /// empty reward.
    pub fn parse(spec: &str) -> Result<Self, EngineError> {
        let mut grants = Vec::new();
        for entry in spec.split('/').filter(|e| !e.trim().is_empty()) {
            let mut parts = entry.split_whitespace();
            let name = parts
                .next()
                .ok_or_else(|| EngineError::SeedData(format!("empty reward entry in '{spec}'")))?;
            let amount: u32 = parts
                .next()
                .and_then(|a| a.parse().ok())
                .ok_or_else(|| {
                    EngineError::SeedData(format!("bad reward amount in '{entry}'"))
                })?;
            if parts.next().is_some() {
                return Err(EngineError::SeedData(format!(
                    "trailing tokens in reward entry '{entry}'"
                )));
            }
            grants.push((name.to_string(), amount));
        }
        Ok(Self { grants })
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

/// Split a `"a/b/c"` quest key list, dropping empty segments.
pub fn parse_key_list(list: &str) -> Vec<String> {
    list.split('/')
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(|k| k.to_string())
        .collect()
}

/// A node in the quest dependency graph.
///
/// The graph carries no edge list: each quest only knows how many
/// predecessor trigger events must arrive (`unlock_counter`) before it is
/// handed to its giver, and which quest keys it triggers in turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestRecord {
    pub id: String,
    pub giver: String,
    pub name: String,
    pub description: String,
    pub offer_line: String,
    pub progress_line: String,
    pub completion_line: String,
    pub requested_items: BTreeMap<String, u32>,
    pub requested_room: Option<String>,
    pub reward: RewardSpec,
    pub unlocks_on_start: Vec<String>,
    pub unlocks_on_finish: Vec<String>,
    pub unlock_counter: i32,
    pub started: bool,
    pub accomplished: bool,
    pub tasks_left: i32,
}

impl QuestRecord {
    pub fn new(id: &str, giver: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            giver: giver.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            offer_line: String::new(),
            progress_line: String::new(),
            completion_line: String::new(),
            requested_items: BTreeMap::new(),
            requested_room: None,
            reward: RewardSpec::default(),
            unlocks_on_start: Vec::new(),
            unlocks_on_finish: Vec::new(),
            unlock_counter: 0,
            started: false,
            accomplished: false,
            tasks_left: 0,
        }
    }

    pub fn with_lines(mut self, offer: &str, progress: &str, completion: &str) -> Self {
        self.offer_line = offer.to_string();
        self.progress_line = progress.to_string();
        self.completion_line = completion.to_string();
        self
    }

    /// Require an item delivery; adds one task.
    pub fn with_requested_item(mut self, item_id: &str, amount: u32) -> Self {
        self.requested_items.insert(item_id.to_string(), amount);
        self.tasks_left += 1;
        self
    }

    /// Require a room visit; adds one task.
    pub fn with_requested_room(mut self, room_id: &str) -> Self {
        self.requested_room = Some(room_id.to_string());
        self.tasks_left += 1;
        self
    }

    pub fn with_reward(mut self, spec: &str) -> Result<Self, EngineError> {
        self.reward = RewardSpec::parse(spec)?;
        Ok(self)
    }

    pub fn with_unlocks_on_start(mut self, keys: &str) -> Self {
        self.unlocks_on_start = parse_key_list(keys);
        self
    }

    pub fn with_unlocks_on_finish(mut self, keys: &str) -> Self {
        self.unlocks_on_finish = parse_key_list(keys);
        self
    }

    pub fn with_unlock_counter(mut self, counter: i32) -> Self {
        self.unlock_counter = counter;
        self
    }

    /// Set the task count by hand, for gate quests whose single task is
    /// completed by the orchestrator rather than by a requirement.
    pub fn with_tasks_left(mut self, tasks: i32) -> Self {
        self.tasks_left = tasks;
        self
    }

    /// Stage-appropriate dialogue line.
    pub fn interaction(&self) -> &str {
        if self.started {
            &self.progress_line
        } else {
            &self.offer_line
        }
    }

    /// Units of `item_id` this quest wants, zero when not requested.
    pub fn amount_wanted(&self, item_id: &str) -> u32 {
        self.requested_items.get(item_id).copied().unwrap_or(0)
    }

    /// "Quest: name." header plus description, for journal displays.
    pub fn summary(&self) -> String {
        format!("Quest: {}.\n{}", self.name, self.description)
    }
}

/// World-level rules: where the player starts, which room bounces the
/// player away, who the culprit is, and which quests gate the accusation
/// and the guide.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldMeta {
    pub start_room: String,
    #[serde(default)]
    pub trap_room: Option<String>,
    #[serde(default)]
    pub trap_message: String,
    #[serde(default)]
    pub culprit: Option<String>,
    #[serde(default)]
    pub accusation_quest: Option<String>,
    #[serde(default)]
    pub case_quest: Option<String>,
    #[serde(default)]
    pub guide_npc: Option<String>,
    #[serde(default)]
    pub guide_quest: Option<String>,
    #[serde(default)]
    pub victory_epilogue: String,
    #[serde(default)]
    pub defeat_message: String,
    #[serde(default)]
    pub help_text: String,
}

impl WorldMeta {
    pub fn new(start_room: &str) -> Self {
        Self {
            start_room: start_room.to_string(),
            trap_room: None,
            trap_message: String::new(),
            culprit: None,
            accusation_quest: None,
            case_quest: None,
            guide_npc: None,
            guide_quest: None,
            victory_epilogue: String::new(),
            defeat_message: String::new(),
            help_text: String::new(),
        }
    }
}

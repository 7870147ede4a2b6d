//! Seed data loading for data-driven worlds.
//!
//! A world directory holds five JSON files (`items.json`, `rooms.json`,
//! `npcs.json`, `quests.json` and `world.json`) from which a fully wired
//! [`World`] is built. Reward and unlock lists use the compact
//! `"name amount/..."` and `"a/b/c"` string forms in the files and are
//! parsed exactly once, here.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::engine::errors::EngineError;
use crate::engine::quest;
use crate::engine::types::{ItemRecord, NpcRecord, QuestRecord, RoomRecord, WorldMeta};
use crate::engine::world::World;

#[derive(Debug, Serialize, Deserialize)]
struct ItemSeed {
    id: String,
    name: String,
    plural_name: String,
    #[serde(default)]
    description: String,
    max_amount: u32,
    #[serde(default = "default_true")]
    pickable: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct RoomSeed {
    id: String,
    description: String,
    #[serde(default)]
    exits: BTreeMap<String, String>,
    #[serde(default)]
    items: BTreeMap<String, u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NpcSeed {
    id: String,
    name: String,
    location: String,
    #[serde(default)]
    lines: Vec<String>,
    #[serde(default)]
    can_move: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct QuestSeed {
    id: String,
    giver: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    offer_line: String,
    #[serde(default)]
    progress_line: String,
    #[serde(default)]
    completion_line: String,
    #[serde(default)]
    requested_items: BTreeMap<String, u32>,
    #[serde(default)]
    requested_room: Option<String>,
    /// `"name amount/name amount"` reward spec.
    #[serde(default)]
    reward: String,
    /// `/`-delimited quest keys triggered when this quest starts.
    #[serde(default)]
    unlocks_on_start: String,
    /// `/`-delimited quest keys triggered when this quest finishes.
    #[serde(default)]
    unlocks_on_finish: String,
    #[serde(default)]
    unlock_counter: i32,
    /// Tasks completed by the orchestrator rather than by a listed
    /// requirement (endgame gates).
    #[serde(default)]
    extra_tasks: i32,
}

#[derive(Debug, Serialize, Deserialize)]
struct WorldSeed {
    #[serde(flatten)]
    meta: WorldMeta,
    /// Quest keys given one unlock trigger after wiring, putting the
    /// opening quests into their givers' hands.
    #[serde(default)]
    initial_quests: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn read_seed<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T, EngineError> {
    let path = dir.join(file);
    let contents = fs::read_to_string(&path)?;
    serde_json::from_str(&contents)
        .map_err(|err| EngineError::SeedData(format!("{}: {}", path.display(), err)))
}

/// Load and wire a complete world from a seed directory.
///
/// The result is validated; any dangling id in the data is a
/// [`EngineError::SeedData`] here rather than a surprise mid-game.
pub fn load_world<P: AsRef<Path>>(dir: P) -> Result<World, EngineError> {
    let dir = dir.as_ref();
    let items: Vec<ItemSeed> = read_seed(dir, "items.json")?;
    let rooms: Vec<RoomSeed> = read_seed(dir, "rooms.json")?;
    let npcs: Vec<NpcSeed> = read_seed(dir, "npcs.json")?;
    let quests: Vec<QuestSeed> = read_seed(dir, "quests.json")?;
    let world_seed: WorldSeed = read_seed(dir, "world.json")?;

    let mut world = World::new(world_seed.meta);

    for seed in items {
        let mut item = ItemRecord::new(
            &seed.id,
            &seed.name,
            &seed.plural_name,
            &seed.description,
            seed.max_amount,
        );
        item.pickable = seed.pickable;
        world.add_item(item);
    }

    for seed in rooms {
        let mut room = RoomRecord::new(&seed.id, &seed.description);
        room.exits = seed.exits;
        room.items = seed.items;
        world.add_room(room);
    }

    for seed in npcs {
        let mut npc = NpcRecord::new(&seed.id, &seed.name, &seed.location);
        npc.lines = seed.lines;
        npc.can_move = seed.can_move;
        world.add_npc(npc)?;
    }

    for seed in quests {
        let mut record = QuestRecord::new(&seed.id, &seed.giver, &seed.name, &seed.description)
            .with_lines(&seed.offer_line, &seed.progress_line, &seed.completion_line)
            .with_unlocks_on_start(&seed.unlocks_on_start)
            .with_unlocks_on_finish(&seed.unlocks_on_finish)
            .with_unlock_counter(seed.unlock_counter)
            .with_reward(&seed.reward)?;
        for (item_id, amount) in &seed.requested_items {
            record = record.with_requested_item(item_id, *amount);
        }
        if let Some(room_id) = &seed.requested_room {
            record = record.with_requested_room(room_id);
        }
        record.tasks_left += seed.extra_tasks;
        world.add_quest(record);
    }

    for key in &world_seed.initial_quests {
        quest::initiate(&mut world, key)?;
    }

    let problems = world.validate();
    if !problems.is_empty() {
        return Err(EngineError::SeedData(problems.join("; ")));
    }
    Ok(world)
}

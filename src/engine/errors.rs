use thiserror::Error;

/// Errors that can arise while driving the adventure engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Lookup of a room id that is not part of the world.
    #[error("unknown room: {0}")]
    UnknownRoom(String),

    /// Lookup of an item id that is not part of the world.
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// Lookup of an NPC id that is not part of the world.
    #[error("unknown character: {0}")]
    UnknownNpc(String),

    /// Lookup of a quest key that is not part of the world.
    #[error("unknown quest: {0}")]
    UnknownQuest(String),

    /// A direction name that is not an exit of the given room.
    #[error("no exit named '{exit}' from {room}")]
    UnknownExit { room: String, exit: String },

    /// A named character is not present in the player's current room.
    #[error("{0} is not here")]
    NpcNotHere(String),

    /// A named item is not present in the player's current room.
    #[error("there is no {0} here")]
    ItemNotHere(String),

    /// A named item is not in the player's inventory.
    #[error("you are not carrying any {0}")]
    ItemNotHeld(String),

    /// Malformed or inconsistent seed data (bad reward spec, dangling id,
    /// questless NPC without dialogue lines).
    #[error("invalid world data: {0}")]
    SeedData(String),

    /// Wrapper around serde_json errors from seed file parsing.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapper around IO errors (seed directory reads).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

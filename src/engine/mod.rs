//! The adventure rules engine: entity records, the world arena, quest
//! lifecycle, player mechanics, NPC behavior, and the command
//! orchestrator that ties them together turn by turn.

pub mod errors;
pub mod game;
pub mod npc;
pub mod player;
pub mod prompt;
pub mod quest;
pub mod types;
pub mod world;

pub use errors::EngineError;
pub use game::{parse_command, Command, Ending, Game, Outcome};
pub use player::Player;
pub use prompt::{ConfirmPrompt, ScriptedPrompt};
pub use types::{
    InventoryLimits, ItemRecord, NpcRecord, QuestRecord, RewardSpec, RoomRecord, StackOutcome,
    WorldMeta,
};
pub use world::World;

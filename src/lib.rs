//! # Whodunit - a murder-mystery adventure rules engine
//!
//! Whodunit is the rules core of a room-based narrative adventure: a
//! player moves through a graph of rooms, stacks items in a slot-capped
//! inventory, talks to the household, and works a quest dependency graph
//! until a single accusation decides the game.
//!
//! ## Features
//!
//! - **Quest graph**: quests unlock each other through in-degree counters,
//!   hand themselves to their giver, and complete through one uniform
//!   task-check / reward / unlock protocol.
//! - **Stacking inventory**: per-item stack caps with explicit overflow -
//!   whatever does not fit stays where it was found.
//! - **Room graph**: directed, free-text-named exits with a back-track
//!   stack for retracing steps.
//! - **Wandering NPCs**: movement-eligible characters drift between rooms
//!   on an end-of-turn tick, driven by one seedable randomness source.
//! - **Data-driven worlds**: JSON seed directories, plus a built-in demo
//!   world (the Blackwater Manor inquiry).
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use whodunit::content;
//! use whodunit::engine::{parse_command, Game, ScriptedPrompt};
//!
//! fn main() -> anyhow::Result<()> {
//!     let world = content::canonical::world();
//!     let mut game = Game::new(world, 7, Box::new(ScriptedPrompt::new(true)))?;
//!     let outcome = game.execute(parse_command("look"))?;
//!     println!("{}", outcome.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Module organization
//!
//! - [`engine`] - entity records, the world arena, quest lifecycle, player
//!   mechanics, NPC behavior, and the command orchestrator
//! - [`content`] - JSON seed loading and the built-in canonical world
//! - [`config`] - TOML configuration for the binary
//! - [`logutil`] - log sanitization for player-typed text

pub mod config;
pub mod content;
pub mod engine;
pub mod logutil;

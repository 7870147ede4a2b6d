//! Game orchestration.
//!
//! Interprets the command surface, choreographs the entities, and runs
//! the end-of-turn tick. The one recurring protocol (task-check, finish,
//! reward, unlock, deactivate) lives in [`Game::check_finished_quest`]
//! and is reused by every path on which a quest task can complete:
//! talking, item delivery, room arrival, and the final accusation.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::errors::EngineError;
use crate::engine::npc;
use crate::engine::player::Player;
use crate::engine::prompt::ConfirmPrompt;
use crate::engine::quest;
use crate::engine::types::InventoryLimits;
use crate::engine::world::World;

/// A player-issued command, independent of transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Look,
    Go(String),
    Back,
    Talk(String),
    Take(String),
    Give { npc: String, item: String },
    Inspect(String),
    Accuse(String),
    Guide,
    Inventory,
    Quests,
    Help,
    Quit,
    Unknown(String),
}

/// Parse one input line into a [`Command`].
///
/// Verbs are case-insensitive; everything after the verb is the argument
/// (exit names and display names may contain spaces). `give` reads
/// `give <item> to <character>`.
pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();
    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb.to_lowercase(), rest.trim()),
        None => (trimmed.to_lowercase(), ""),
    };
    match (verb.as_str(), rest) {
        ("look", _) | ("l", _) => Command::Look,
        ("go", r) if !r.is_empty() => Command::Go(r.to_string()),
        ("back", _) => Command::Back,
        ("talk", r) if !r.is_empty() => Command::Talk(r.to_string()),
        ("take", r) if !r.is_empty() => Command::Take(r.to_string()),
        ("give", r) => match r.rsplit_once(" to ") {
            Some((item, npc)) if !item.trim().is_empty() && !npc.trim().is_empty() => {
                Command::Give {
                    npc: npc.trim().to_string(),
                    item: item.trim().to_string(),
                }
            }
            _ => Command::Unknown(trimmed.to_string()),
        },
        ("inspect", r) if !r.is_empty() => Command::Inspect(r.to_string()),
        ("accuse", r) if !r.is_empty() => Command::Accuse(r.to_string()),
        ("guide", _) => Command::Guide,
        ("inventory", _) | ("i", _) => Command::Inventory,
        ("quests", _) | ("journal", _) => Command::Quests,
        ("help", _) => Command::Help,
        ("quit", _) | ("exit", _) => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

/// Terminal states a command can put the game into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Victory,
    Defeat,
    Quit,
}

/// The narration a command produced, plus a terminal state if it ended
/// the game.
#[derive(Debug)]
pub struct Outcome {
    pub text: String,
    pub ending: Option<Ending>,
}

impl Outcome {
    fn narration(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ending: None,
        }
    }

    fn ended(text: impl Into<String>, ending: Ending) -> Self {
        Self {
            text: text.into(),
            ending: Some(ending),
        }
    }
}

/// The running game: owns the world, the player, the randomness source
/// and the confirmation seam.
pub struct Game {
    world: World,
    player: Player,
    limits: InventoryLimits,
    rng: StdRng,
    prompt: Box<dyn ConfirmPrompt>,
}

impl Game {
    /// Start a game over a fully wired world. All randomness (wandering,
    /// flavor lines, teleports) flows from `seed`.
    pub fn new(
        world: World,
        seed: u64,
        prompt: Box<dyn ConfirmPrompt>,
    ) -> Result<Self, EngineError> {
        world.room(&world.meta.start_room)?;
        let player = Player::new(&world.meta.start_room);
        Ok(Self {
            world,
            player,
            limits: InventoryLimits::default(),
            rng: StdRng::seed_from_u64(seed),
            prompt,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Apply one command and report its narration.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, EngineError> {
        debug!("executing {:?}", command);
        match command {
            Command::Look => Ok(Outcome::narration(
                self.world.look_around(&self.player.room_id)?,
            )),
            Command::Go(direction) => self.go(&direction),
            Command::Back => self.back(),
            Command::Talk(name) => self.talk(&name),
            Command::Take(name) => Ok(Outcome::narration(self.player.take_item(
                &mut self.world,
                &self.limits,
                &name,
            )?)),
            Command::Give { npc, item } => self.give(&npc, &item),
            Command::Inspect(name) => {
                Ok(Outcome::narration(self.player.inspect_item(&self.world, &name)?))
            }
            Command::Accuse(name) => self.accuse(&name),
            Command::Guide => self.guide(),
            Command::Inventory => Ok(Outcome::narration(self.player.format_inventory(&self.world)?)),
            Command::Quests => Ok(Outcome::narration(
                self.player.format_active_quests(&self.world)?,
            )),
            Command::Help => Ok(Outcome::narration(self.world.meta.help_text.clone())),
            Command::Quit => {
                if self.prompt.confirm("Quit", "Are you sure you want to quit?") {
                    Ok(Outcome::ended("Goodbye.", Ending::Quit))
                } else {
                    Ok(Outcome::narration(""))
                }
            }
            Command::Unknown(input) => Ok(Outcome::narration(format!(
                "That is not something you can do here: '{}'. Type 'help' for the list of actions.",
                input
            ))),
        }
    }

    // ------------------------------------------------------------------
    // Movement commands
    // ------------------------------------------------------------------

    fn go(&mut self, direction: &str) -> Result<Outcome, EngineError> {
        self.player.take_exit(&self.world, direction)?;
        let mut text = self.world.room(&self.player.room_id)?.describe();
        append(&mut text, &self.check_room_quest()?);

        // some rooms bounce the player straight back out
        if let Some(trap) = self.world.meta.trap_room.clone() {
            if self.player.room_id == trap {
                append(&mut text, &self.world.meta.trap_message.clone());
                let bounced = self.teleport_player()?;
                append(&mut text, &bounced);
            }
        }

        self.next_turn()?;
        Ok(Outcome::narration(text))
    }

    fn back(&mut self) -> Result<Outcome, EngineError> {
        let mut text = if self.player.go_back() {
            self.world.room(&self.player.room_id)?.describe()
        } else {
            "There is no previous room.".to_string()
        };
        append(&mut text, &self.check_room_quest()?);
        self.next_turn()?;
        Ok(Outcome::narration(text))
    }

    /// Move the player to a uniformly random room, the trap room excluded,
    /// with the usual arrival bookkeeping and its own end-of-turn tick.
    fn teleport_player(&mut self) -> Result<String, EngineError> {
        let candidates: Vec<String> = self
            .world
            .room_ids()
            .iter()
            .filter(|id| Some(id.as_str()) != self.world.meta.trap_room.as_deref())
            .cloned()
            .collect();
        if candidates.is_empty() {
            return Ok(String::new());
        }
        let dest = candidates[self.rng.gen_range(0..candidates.len())].clone();
        debug!("teleporting player to {}", dest);
        self.player.teleport(&dest);
        let mut text = self.world.room(&dest)?.describe();
        append(&mut text, &self.check_room_quest()?);
        self.next_turn()?;
        Ok(text)
    }

    // ------------------------------------------------------------------
    // Character commands
    // ------------------------------------------------------------------

    fn talk(&mut self, name: &str) -> Result<Outcome, EngineError> {
        let npc_id = self
            .world
            .npc_in_room(&self.player.room_id, name)?
            .ok_or_else(|| EngineError::NpcNotHere(name.trim().to_string()))?;
        let mut text = npc::interact(
            &mut self.world,
            &mut self.rng,
            self.prompt.as_mut(),
            &npc_id,
        )?;

        if let Some(quest_id) = self.world.npc(&npc_id)?.current_quest.clone() {
            let started = self.world.quest(&quest_id)?.started;
            if started && !self.player.active_quests.contains(&quest_id) {
                self.player.add_active_quest(&self.world, &quest_id)?;
                info!("quest {} taken on", quest_id);
                for key in self.world.quest(&quest_id)?.unlocks_on_start.clone() {
                    quest::initiate(&mut self.world, &key)?;
                }
            }
            append(&mut text, &self.check_finished_quest(&quest_id)?);
        }
        Ok(Outcome::narration(text))
    }

    fn give(&mut self, npc_name: &str, item_name: &str) -> Result<Outcome, EngineError> {
        let npc_id = self
            .world
            .npc_in_room(&self.player.room_id, npc_name)?
            .ok_or_else(|| EngineError::NpcNotHere(npc_name.trim().to_string()))?;
        let display = self.world.npc(&npc_id)?.name.clone();
        let refusal = format!("{} does not want any {}.", display, item_name.trim());

        let Some(quest_id) = self.world.npc(&npc_id)?.current_quest.clone() else {
            return Ok(Outcome::narration(refusal));
        };
        if !self.world.quest(&quest_id)?.started {
            return Ok(Outcome::narration(refusal));
        }
        let Some(item_id) = quest::requested_item(&self.world, &quest_id, item_name)? else {
            return Ok(Outcome::narration(refusal));
        };

        let amount = self.world.quest(&quest_id)?.amount_wanted(&item_id);
        if !self.player.give(&mut self.world, &item_id, amount)? {
            let item = self.world.item(&item_id)?;
            return Ok(Outcome::narration(format!(
                "You do not have {} {} to give.",
                amount,
                item.display_name(amount)
            )));
        }

        let item = self.world.item(&item_id)?;
        let mut text = format!(
            "Successfully gave {} {} to {}.",
            amount,
            item.display_name(amount),
            display
        );
        quest::remove_requested_item(&mut self.world, &quest_id, &item_id)?;
        append(&mut text, &self.check_finished_quest(&quest_id)?);
        Ok(Outcome::narration(text))
    }

    // ------------------------------------------------------------------
    // Endgame commands
    // ------------------------------------------------------------------

    fn can_accuse(&self) -> bool {
        let (Some(accusation), Some(case)) = (
            self.world.meta.accusation_quest.as_deref(),
            self.world.meta.case_quest.as_deref(),
        ) else {
            return false;
        };
        let (Ok(accusation), Ok(case)) = (self.world.quest(accusation), self.world.quest(case))
        else {
            return false;
        };
        accusation.started && !case.accomplished
    }

    fn accuse(&mut self, name: &str) -> Result<Outcome, EngineError> {
        if !self.can_accuse() {
            return Ok(Outcome::narration(
                "You are not ready to make an accusation.",
            ));
        }
        let npc_id = self
            .world
            .npc_by_name(name)
            .ok_or_else(|| EngineError::UnknownNpc(name.trim().to_string()))?;

        if self.world.meta.culprit.as_deref() == Some(npc_id.as_str()) {
            info!("accusation of {} wins the game", npc_id);
            let text = self.game_won()?;
            Ok(Outcome::ended(text, Ending::Victory))
        } else {
            info!("accusation of {} loses the game", npc_id);
            Ok(Outcome::ended(
                self.world.meta.defeat_message.clone(),
                Ending::Defeat,
            ))
        }
    }

    /// Resolve the winning accusation: every character may move again and
    /// the endgame quests run through the usual completion protocol.
    fn game_won(&mut self) -> Result<String, EngineError> {
        let mut text = self.world.meta.victory_epilogue.clone();
        for npc_id in self.world.npc_ids().to_vec() {
            self.world.npc_mut(&npc_id)?.can_move = true;
        }
        let finale: Vec<String> = [
            self.world.meta.accusation_quest.clone(),
            self.world.meta.case_quest.clone(),
        ]
        .into_iter()
        .flatten()
        .collect();
        for quest_id in &finale {
            quest::task_done(&mut self.world, quest_id)?;
        }
        for quest_id in &finale {
            append(&mut text, &self.check_finished_quest(quest_id)?);
        }
        Ok(text)
    }

    fn guide(&mut self) -> Result<Outcome, EngineError> {
        let (Some(guide_npc), Some(guide_quest)) = (
            self.world.meta.guide_npc.clone(),
            self.world.meta.guide_quest.clone(),
        ) else {
            return Ok(Outcome::narration("No one here offers to guide you."));
        };
        let display = self.world.npc(&guide_npc)?.name.clone();

        if !self.world.quest(&guide_quest)?.accomplished {
            return Ok(Outcome::narration(format!(
                "{} has not offered to guide you yet.",
                display
            )));
        }
        if !self
            .world
            .room(&self.player.room_id)?
            .npcs
            .contains(&guide_npc)
        {
            return Ok(Outcome::narration(format!(
                "You must be in the same room as {} to be guided.",
                display
            )));
        }

        let mut text = format!("Surprise! {} has guided you to a random room.\n", display);
        text.push_str(&self.teleport_player()?);
        Ok(Outcome::narration(text))
    }

    // ------------------------------------------------------------------
    // The recurring protocols
    // ------------------------------------------------------------------

    /// Task-check, finish, reward, unlock, deactivate, in that order, and
    /// only when every task is done. Every completion path funnels here.
    fn check_finished_quest(&mut self, quest_id: &str) -> Result<String, EngineError> {
        let (reward, unlocks) = {
            let quest = self.world.quest(quest_id)?;
            if quest.tasks_left != 0 {
                return Ok(String::new());
            }
            (quest.reward.clone(), quest.unlocks_on_finish.clone())
        };

        let mut text = quest::finish(&mut self.world, quest_id)?;
        for (item_id, amount) in &reward.grants {
            let granted = self
                .player
                .stash(&mut self.world, &self.limits, item_id, *amount)?;
            append(&mut text, &granted);
        }
        for key in &unlocks {
            quest::initiate(&mut self.world, key)?;
        }
        self.player.remove_active_quest(quest_id);
        Ok(text)
    }

    /// Fire the room-visit task if the player's current room is wanted by
    /// an active quest.
    fn check_room_quest(&mut self) -> Result<String, EngineError> {
        let Some(quest_id) = self.player.quest_rooms.remove(&self.player.room_id) else {
            return Ok(String::new());
        };
        quest::task_done(&mut self.world, &quest_id)?;
        self.check_finished_quest(&quest_id)
    }

    /// End-of-turn tick: every character takes one wandering step. Runs
    /// once per time-advancing action, never on passive ones.
    fn next_turn(&mut self) -> Result<(), EngineError> {
        for npc_id in self.world.npc_ids().to_vec() {
            npc::wander(&mut self.world, &mut self.rng, &npc_id)?;
        }
        Ok(())
    }
}

/// Join narration fragments with a newline, skipping empty ones.
fn append(text: &mut String, fragment: &str) {
    if fragment.is_empty() {
        return;
    }
    if !text.is_empty() {
        text.push('\n');
    }
    text.push_str(fragment);
}

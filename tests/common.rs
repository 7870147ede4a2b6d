//! Test utilities & fixtures.
//! Provides the small village world shared by the integration suites.

use whodunit::engine::{
    parse_command, Game, ItemRecord, NpcRecord, QuestRecord, RoomRecord, ScriptedPrompt, World,
    WorldMeta,
};
use whodunit::engine::quest;

/// Three rooms in a row (green, lane, chapel) with a two-quest chain that
/// converges on the sexton's vigil. Coins on the green overfill a stack,
/// the chapel bell cannot be taken, and nobody wanders.
pub fn village() -> World {
    let mut world = World::new(WorldMeta::new("green"));

    world.add_item(ItemRecord::new("coin", "coin", "coins", "A worn copper penny.", 5));
    world.add_item(ItemRecord::new(
        "ribbon",
        "ribbon",
        "ribbons",
        "A prize ribbon from some fair long past.",
        1,
    ));
    world.add_item(ItemRecord::new("bell", "bell", "bells", "Bolted to its frame.", 1).fixed());

    world.add_room(
        RoomRecord::new("green", "on the village green")
            .with_exit("lane", "lane")
            .with_item("coin", 7),
    );
    world.add_room(
        RoomRecord::new("lane", "in the lane")
            .with_exit("green", "green")
            .with_exit("chapel", "chapel"),
    );
    world.add_room(
        RoomRecord::new("chapel", "in the chapel")
            .with_exit("lane", "lane")
            .with_item("bell", 1),
    );

    world
        .add_npc(NpcRecord::new("warden", "Warden Ash", "green").with_lines(&["Mind the grass."]))
        .unwrap();
    world
        .add_npc(NpcRecord::new("pedlar", "Pedlar Finch", "lane").with_lines(&["Buy or move along."]))
        .unwrap();
    world
        .add_npc(NpcRecord::new("sexton", "Sexton Mole", "chapel").with_lines(&["Hush, now."]))
        .unwrap();

    world.add_quest(
        QuestRecord::new("coin_q", "warden", "The poor box", "The warden wants two coins.")
            .with_lines(
                "Two coins for the poor box, if you have them.",
                "The box is still light.",
                "Bless you. Take this ribbon for your trouble.",
            )
            .with_requested_item("coin", 2)
            .with_reward("ribbon 1")
            .unwrap()
            .with_unlocks_on_finish("vigil_q"),
    );
    world.add_quest(
        QuestRecord::new("errand_q", "pedlar", "A look inside", "See the chapel for the pedlar.")
            .with_lines(
                "Never been inside the chapel myself. Go and tell me what it is like.",
                "Been to the chapel yet?",
                "Cold and quiet, is it? Thought as much.",
            )
            .with_requested_room("chapel")
            .with_unlocks_on_finish("vigil_q"),
    );
    world.add_quest(
        QuestRecord::new("vigil_q", "sexton", "The vigil", "")
            .with_lines("", "", "So you have done the rounds. The vigil is yours to keep.")
            .with_unlock_counter(2),
    );

    quest::initiate(&mut world, "coin_q").unwrap();
    quest::initiate(&mut world, "errand_q").unwrap();

    assert!(world.validate().is_empty());
    world
}

/// Game over the given world with a prompt that accepts everything.
#[allow(dead_code)] // each suite uses its own subset of these helpers
pub fn accepting_game(world: World, seed: u64) -> Game {
    Game::new(world, seed, Box::new(ScriptedPrompt::new(true))).unwrap()
}

/// Feed one input line through the parser and the game; the game must not
/// end on it.
#[allow(dead_code)]
pub fn run(game: &mut Game, line: &str) -> String {
    let outcome = game.execute(parse_command(line)).unwrap();
    assert!(outcome.ending.is_none(), "game ended early: {}", outcome.text);
    outcome.text
}

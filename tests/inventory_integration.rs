//! Inventory and navigation behavior through the text command surface:
//! overflow stays in the room, unit totals are conserved, fixed items stay
//! put, and the back-track stack retraces steps in reverse.

mod common;

#[test]
fn overflow_stays_in_the_room() {
    let mut game = common::accepting_game(common::village(), 9);

    let out = common::run(&mut game, "take coin");
    assert!(out.contains("5 coins was added to your inventory."));
    assert!(out.contains("You can not store any more coins in your inventory."));

    // seven coins still exist: five held, two on the green
    assert_eq!(game.world().item("coin").unwrap().current_amount, 5);
    assert_eq!(game.world().room("green").unwrap().item_count("coin"), 2);
    let out = common::run(&mut game, "look");
    assert!(out.contains("2 coins"));

    // the stack is capped; another take moves nothing
    let out = common::run(&mut game, "take coin");
    assert_eq!(out, "You can not store any more coins in your inventory.");
    assert_eq!(game.world().item("coin").unwrap().current_amount, 5);
    assert_eq!(game.world().room("green").unwrap().item_count("coin"), 2);
}

#[test]
fn fixed_items_stay_put() {
    let mut game = common::accepting_game(common::village(), 9);
    common::run(&mut game, "go lane");
    common::run(&mut game, "go chapel");

    let out = common::run(&mut game, "take bell");
    assert_eq!(out, "This item can not be picked up.");
    assert!(!game.player().holds("bell"));
    assert_eq!(game.world().room("chapel").unwrap().item_count("bell"), 1);
}

#[test]
fn back_retraces_steps_in_reverse() {
    let mut game = common::accepting_game(common::village(), 9);

    common::run(&mut game, "go lane");
    common::run(&mut game, "go chapel");
    assert_eq!(game.player().room_id, "chapel");

    common::run(&mut game, "back");
    assert_eq!(game.player().room_id, "lane");
    common::run(&mut game, "back");
    assert_eq!(game.player().room_id, "green");

    let out = common::run(&mut game, "back");
    assert_eq!(out, "There is no previous room.");
    assert_eq!(game.player().room_id, "green");
}

#[test]
fn unwanted_gifts_are_refused() {
    let mut game = common::accepting_game(common::village(), 9);
    common::run(&mut game, "take coin");
    common::run(&mut game, "go lane");

    // the pedlar's errand asks for a visit, not for coins
    common::run(&mut game, "talk Pedlar Finch");
    let out = common::run(&mut game, "give coin to Pedlar Finch");
    assert_eq!(out, "Pedlar Finch does not want any coin.");
    assert_eq!(game.world().item("coin").unwrap().current_amount, 5);
}

#[test]
fn inspect_reads_the_held_stack() {
    let mut game = common::accepting_game(common::village(), 9);
    common::run(&mut game, "take coin");

    let out = common::run(&mut game, "inspect coin");
    assert!(out.contains("Amount in inventory: 5 - Max amount you can hold: 5"));
    assert!(out.contains("coin: A worn copper penny."));
}

//! The built-in demo world: the Blackwater Manor murder inquiry.
//!
//! Ten rooms around a great-hall hub, six items, ten members of the
//! household, and a nine-quest inquiry that ends in a single accusation.
//! Used by the binary when no seed directory is given, and by the
//! integration suites as a deterministic fixture.

use crate::engine::quest;
use crate::engine::types::{ItemRecord, NpcRecord, QuestRecord, RoomRecord, WorldMeta};
use crate::engine::world::World;

/// Room where play begins.
pub const START_ROOM: &str = "driveway";
/// Room that bounces the player straight back out.
pub const TRAP_ROOM: &str = "cold_store";

/// Build the canonical Blackwater Manor world, fully wired and with the
/// opening quest already in the inspector's hands.
pub fn world() -> World {
    let mut meta = WorldMeta::new(START_ROOM);
    meta.trap_room = Some(TRAP_ROOM.to_string());
    meta.trap_message = "The chill and the hanging game are more than you care for, \
and you hurry out the first door you find."
        .to_string();
    meta.culprit = Some("valet".to_string());
    meta.accusation_quest = Some("accuse0".to_string());
    meta.case_quest = Some("case0".to_string());
    meta.guide_npc = Some("maid".to_string());
    meta.guide_quest = Some("guide0".to_string());
    meta.victory_epilogue =
        "Congratulations on finding the murderer. Here is how the arrest went:".to_string();
    meta.defeat_message = "You have accused the wrong person, and an innocent soul will answer \
for it.\nYour part in the inquiry is over.\nThank you for playing."
        .to_string();
    meta.help_text = "The master of Blackwater Manor is dead and the household is under \
suspicion.\nMove between rooms, talk to the staff and guests, run their errands, and gather \
what they let slip.\nWhen you are certain, accuse the killer - you will only get one \
accusation.\n\nActions: look, go <room>, back, talk <person>, take <item>, \
give <item> to <person>, inspect <item>, inventory, quests, guide, accuse <person>, help, quit."
        .to_string();

    let mut world = World::new(meta);

    // ------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------

    world.add_item(ItemRecord::new(
        "pastry",
        "pastry",
        "pastries",
        "Flaky and still warm from the grocer's cart.",
        2,
    ));
    world.add_item(ItemRecord::new(
        "sherry",
        "sherry glass",
        "sherry glasses",
        "Dry amontillado, barely touched.",
        1,
    ));
    world.add_item(ItemRecord::new(
        "tin_soldier",
        "tin soldier",
        "tin soldiers",
        "A painted grenadier, strayed from some child's set.",
        1,
    ));
    world.add_item(ItemRecord::new(
        "locket",
        "locket",
        "lockets",
        "A silver locket with a miniature portrait inside.",
        1,
    ));
    world.add_item(ItemRecord::new(
        "ledger",
        "ledger page",
        "ledger pages",
        "A page torn from the household ledger. The figures do not add up.",
        1,
    ));
    world.add_item(ItemRecord::new("poker", "poker", "pokers", "", 1).fixed());

    // ------------------------------------------------------------------
    // Rooms
    // ------------------------------------------------------------------

    world.add_room(
        RoomRecord::new(
            "driveway",
            "on the gravel driveway. A grocer's cart by the gate is stacked with fresh pastries",
        )
        .with_exit("foyer", "foyer")
        .with_item("pastry", 6),
    );
    world.add_room(
        RoomRecord::new("foyer", "in the entrance foyer of Blackwater Manor")
            .with_exit("driveway", "driveway")
            .with_exit("great hall", "great_hall"),
    );
    world.add_room(
        RoomRecord::new(
            "great_hall",
            "in the great hall. A fireplace poker rests against the mantel, \
not quite where a poker should be",
        )
        .with_exit("foyer", "foyer")
        .with_exit("study", "study")
        .with_exit("morning room", "morning_room")
        .with_exit("drawing room", "drawing_room")
        .with_exit("kitchen", "kitchen")
        .with_exit("cellar", "cellar")
        .with_exit("servants' corridor", "servants_corridor")
        .with_exit("cold store", "cold_store")
        .with_item("poker", 1),
    );
    world.add_room(
        RoomRecord::new(
            "study",
            "in the late master's study. Inspector Neame has made it his incident room",
        )
        .with_exit("great hall", "great_hall"),
    );
    world.add_room(
        RoomRecord::new(
            "morning_room",
            "in the morning room. A body lies beneath a sheet.\nBeside it you see a sherry \
glass, a tin soldier and a locket",
        )
        .with_exit("great hall", "great_hall")
        .with_item("sherry", 1)
        .with_item("tin_soldier", 1)
        .with_item("locket", 1),
    );
    world.add_room(
        RoomRecord::new("drawing_room", "in the drawing room. The settees look well sat-in")
            .with_exit("great hall", "great_hall"),
    );
    world.add_room(
        RoomRecord::new("kitchen", "in the kitchen. Something is still simmering on the range")
            .with_exit("great hall", "great_hall"),
    );
    world.add_room(
        RoomRecord::new("cellar", "in the cellar, among the wine racks and the dust")
            .with_exit("great hall", "great_hall"),
    );
    world.add_room(
        RoomRecord::new(
            "servants_corridor",
            "in the servants' corridor. A row of brass bells hangs silent",
        )
        .with_exit("great hall", "great_hall"),
    );
    world.add_room(
        RoomRecord::new("cold_store", "in the cold store, amongst the hanging game")
            .with_exit("great hall", "great_hall"),
    );

    // ------------------------------------------------------------------
    // The household
    // ------------------------------------------------------------------

    world
        .add_npc(NpcRecord::new("inspector", "Inspector Neame", "study").with_lines(&[
            "Facts first, feelings after.",
            "A tidy room hides an untidy conscience.",
            "I have seen quieter houses with louder secrets.",
        ]))
        .expect("canonical npc room");
    world
        .add_npc(
            NpcRecord::new("magistrate", "Magistrate Crane", "morning_room").with_lines(&[
                "Everything in this house passes my desk eventually.",
                "Justice is patient. I am rather less so.",
                "Do close the door; the draught disturbs the papers.",
            ]),
        )
        .expect("canonical npc room");
    world
        .add_npc(
            NpcRecord::new("constable", "Constable Pike", "morning_room").with_lines(&[
                "Reporting for duty.",
                "No new evidence since my last round.",
                "Perhaps the magistrate knows more than I do.",
            ]),
        )
        .expect("canonical npc room");
    world
        .add_npc(
            NpcRecord::new("housekeeper", "Mrs. Havering", "cellar").with_lines(&[
                "These racks have not been dusted since Michaelmas.",
                "I keep the keys, not the secrets.",
                "The master never drank before dusk. Never.",
            ]),
        )
        .expect("canonical npc room");
    world
        .add_npc(NpcRecord::new("valet", "Mr. Quill", "great_hall").with_lines(&[
            "A gentleman's gentleman hears nothing, repeats less.",
            "I pressed his coat that very morning.",
            "Debts? I am sure I could not say.",
            "You will excuse me; the silver will not polish itself.",
        ]))
        .expect("canonical npc room");
    world
        .add_npc(NpcRecord::new("footman", "Edmund", "great_hall").with_lines(&[
            "Nothing in this house stays where it is put.",
            "I carry trays. I do not ask what is on them.",
            "The nursery has been shut up for years, you know.",
        ]))
        .expect("canonical npc room");
    world
        .add_npc(
            NpcRecord::new("maid", "Daisy", "drawing_room")
                .with_lines(&[
                    "Oh! You did give me a fright.",
                    "I know every back stair in this house.",
                    "They say the cold store is haunted. I say it is merely cold.",
                ])
                .wandering(),
        )
        .expect("canonical npc room");
    world
        .add_npc(NpcRecord::new("cook", "Mrs. Bray", "kitchen").with_lines(&[
            "Out of my kitchen unless you mean to chop something.",
            "The stock wants three hours yet.",
            "Nobody weeps on a full stomach.",
        ]))
        .expect("canonical npc room");
    world
        .add_npc(NpcRecord::new("gardener", "Old Tom", "kitchen").with_lines(&[
            "Roses mind their own business. Wish the household did.",
            "I seen plenty from the beds, me.",
            "A man works up an appetite out there.",
        ]))
        .expect("canonical npc room");
    world
        .add_npc(
            NpcRecord::new("butler", "Mr. Sorrel", "servants_corridor").with_lines(&[
                "The bells have been silent all morning. Unheard of.",
                "I decant; I do not speculate.",
                "Forty years of service, and now this.",
            ]),
        )
        .expect("canonical npc room");

    // ------------------------------------------------------------------
    // The inquiry
    // ------------------------------------------------------------------

    world.add_quest(
        QuestRecord::new(
            "case0",
            "inspector",
            "Take on the case",
            "Find out who killed the master of Blackwater Manor.",
        )
        .with_lines(
            "I am Inspector Neame, and this inquiry is mine - but I am one man and the house \
is large. Would you assist me? Speak to me again once you have decided to begin.",
            "Have you found the culprit?",
            "Congratulations! You found the murderer.\nBlackwater Manor can sleep again.",
        )
        .with_unlocks_on_start("scene0/guide0")
        .with_tasks_left(1),
    );
    world.add_quest(
        QuestRecord::new(
            "scene0",
            "inspector",
            "Visit the morning room",
            "Begin the inquiry where the body was found.",
        )
        .with_lines(
            "The death occurred in the morning room. Begin your inquiry there.",
            "Have you been to the morning room yet?",
            "Begin here, at the scene. Look around, and note everything you find.",
        )
        .with_requested_room("morning_room")
        .with_unlock_counter(1)
        .with_unlocks_on_finish("case0/ledger0/soldier0/pastry0"),
    );
    world.add_quest(
        QuestRecord::new("guide0", "maid", "Daisy's shortcut", "")
            .with_lines(
                "",
                "",
                "Want a shortcut? Say 'guide' when we share a room and I will take you \
somewhere new.",
            )
            .with_unlock_counter(1),
    );
    world.add_quest(
        QuestRecord::new(
            "ledger0",
            "magistrate",
            "Something for the magistrate",
            "Magistrate Crane wants leverage before he shares what crossed his desk.",
        )
        .with_lines(
            "I am Magistrate Crane. Every detail of this death passes my desk, and I might \
share a few - for something I can use against the master's estate.",
            "Have you found anything I can use yet?",
            "As promised, then: the blow came from something flat and heavy, and from a hand \
this household knows.",
        )
        .with_requested_item("ledger", 1)
        .with_unlock_counter(1)
        .with_unlocks_on_finish("locket0"),
    );
    world.add_quest(
        QuestRecord::new(
            "soldier0",
            "footman",
            "The stray grenadier",
            "Edmund will trade a certain ledger page for the tin soldier.",
        )
        .with_lines(
            "Find me that tin soldier from the morning room and I'll trade you a page I \
fished out of the master's grate. You did not get it from me.",
            "Any sign of that soldier?",
            "That's the one. Here is the ledger page, as agreed. Make of it what you will.",
        )
        .with_requested_item("tin_soldier", 1)
        .with_reward("ledger 1")
        .expect("canonical reward spec")
        .with_unlock_counter(1)
        .with_unlocks_on_finish("accuse0"),
    );
    world.add_quest(
        QuestRecord::new(
            "pastry0",
            "gardener",
            "Two pastries for Old Tom",
            "Fetch two pastries from the cart at the gate and Old Tom will talk.",
        )
        .with_lines(
            "Two of those pastries from the cart at the gate, and I'll tell you what I saw \
from the rose beds.",
            "Brought those pastries yet?",
            "Lovely. Now listen: Mr. Sorrel has been up and down the cellar stair at odd \
hours. Ask him about the sherry.",
        )
        .with_requested_item("pastry", 2)
        .with_unlock_counter(1)
        .with_unlocks_on_finish("butler0"),
    );
    world.add_quest(
        QuestRecord::new(
            "butler0",
            "butler",
            "The missing glass",
            "Bring Mr. Sorrel the sherry glass that left the master's tray.",
        )
        .with_lines(
            "A glass of amontillado left the master's tray that evening and never came back. \
Bring it to me and I will say what I know.",
            "Have you found that glass?",
            "From the morning room? Then it was poured before the poor man fell - and \
Mr. Quill carried that tray.",
        )
        .with_requested_item("sherry", 1)
        .with_unlock_counter(1)
        .with_unlocks_on_finish("accuse0"),
    );
    world.add_quest(
        QuestRecord::new(
            "locket0",
            "housekeeper",
            "Mrs. Havering's locket",
            "Her locket vanished while she aired the morning room.",
        )
        .with_lines(
            "My locket went missing while I aired the morning room. Please find it; it holds \
my late husband's portrait.",
            "Any sign of my locket?",
            "That's it! Though look - the clasp is bent, as if it were torn off in a struggle.",
        )
        .with_requested_item("locket", 1)
        .with_unlock_counter(1)
        .with_unlocks_on_finish("accuse0"),
    );
    world.add_quest(
        QuestRecord::new(
            "accuse0",
            "magistrate",
            "Name the killer",
            "Announce, once and finally, who murdered the master.",
        )
        .with_lines(
            "You have heard enough, I think. Use 'accuse' to name the killer - and mind you, \
you will only get the one accusation.",
            "Use 'accuse' to name the killer.",
            "Mr. Quill, you are under arrest for murder.\nQuill: The master's debts would \
have ruined every one of us. I only meant to frighten him.\nCrane: The assizes will hear it.",
        )
        .with_unlock_counter(3)
        .with_tasks_left(1),
    );

    quest::initiate(&mut world, "case0").expect("canonical opening quest");

    debug_assert!(world.validate().is_empty(), "{:?}", world.validate());
    world
}

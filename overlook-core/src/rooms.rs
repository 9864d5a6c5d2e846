//! The static room graph of the Overlook Hotel.
//!
//! Rooms and their choices are process-wide immutable configuration,
//! constructed once and shared read-only by every session. The hotel is a
//! hub-and-spoke graph: the lobby at the center, four spokes, each spoke
//! with an explicit way back to the lobby. Travel effects are the only way
//! a choice changes rooms.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{Action, Fatal};
use crate::state::{GameState, Item, Stat};

/// Lookup failure against the room graph. Reaching this from a live session
/// indicates an authoring bug, not a player mistake.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("no such room: {0}")]
pub struct UnknownRoomError(pub String);

/// Keys of the five authored rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomId {
    Lobby,
    Room237,
    Bar,
    Kitchen,
    Maze,
}

impl RoomId {
    pub const ALL: [RoomId; 5] = [
        RoomId::Lobby,
        RoomId::Room237,
        RoomId::Bar,
        RoomId::Kitchen,
        RoomId::Maze,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RoomId::Lobby => "lobby",
            RoomId::Room237 => "room237",
            RoomId::Bar => "bar",
            RoomId::Kitchen => "kitchen",
            RoomId::Maze => "maze",
        }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for RoomId {
    type Err = UnknownRoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomId::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| UnknownRoomError(s.to_string()))
    }
}

/// A visibility predicate over the game state.
pub type Condition = fn(&GameState) -> bool;

/// A player-selectable action within a room.
///
/// Menu order is the authored `choices` order. A choice whose condition
/// evaluates false is hidden from the menu entirely, not merely disabled.
#[derive(Debug, Clone)]
pub struct Choice {
    pub text: &'static str,
    pub action: Action,
    pub condition: Option<Condition>,
}

impl Choice {
    pub fn new(text: &'static str, action: Action) -> Self {
        Self {
            text,
            action,
            condition: None,
        }
    }

    /// Restrict visibility to states where `condition` holds.
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Whether this choice appears in the menu for `state`.
    pub fn visible(&self, state: &GameState) -> bool {
        self.condition.map_or(true, |condition| condition(state))
    }
}

/// A location node: description, art, and an ordered menu of choices.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub name: &'static str,
    pub description: &'static str,
    /// Presentation-only scene art.
    pub art: &'static str,
    pub choices: Vec<Choice>,
    /// Items obtainable here. Only the kitchen authors any, but the field
    /// is general.
    pub items: Vec<Item>,
}

impl Room {
    fn new(id: RoomId, name: &'static str, description: &'static str, art: &'static str) -> Self {
        Self {
            id,
            name,
            description,
            art,
            choices: Vec::new(),
            items: Vec::new(),
        }
    }

    fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = choices;
        self
    }

    fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    /// Menu entries visible for `state`, in authored order.
    pub fn visible_choices(&self, state: &GameState) -> Vec<&Choice> {
        self.choices
            .iter()
            .filter(|choice| choice.visible(state))
            .collect()
    }
}

/// The static directed graph of hotel locations.
#[derive(Debug)]
pub struct RoomGraph {
    rooms: HashMap<RoomId, Room>,
}

impl RoomGraph {
    /// Look up a room by key. An error here means the graph is missing an
    /// authored room and should be treated as fatal.
    pub fn get(&self, id: RoomId) -> Result<&Room, UnknownRoomError> {
        self.rooms
            .get(&id)
            .ok_or_else(|| UnknownRoomError(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Build the authored Overlook Hotel dataset.
    pub fn overlook() -> Self {
        let mut rooms = HashMap::new();
        for room in [lobby(), room237(), bar(), kitchen(), maze()] {
            rooms.insert(room.id, room);
        }
        Self { rooms }
    }
}

lazy_static::lazy_static! {
    /// The one shared instance of the hotel.
    pub static ref OVERLOOK: RoomGraph = RoomGraph::overlook();
}

// ============================================================================
// Authored dataset
// ============================================================================

const LOBBY_ART: &str = r#"
    +----------------------------------+
    |     ___________________          |
    |    |  OVERLOOK  HOTEL  |         |
    |    |___________________|         |
    |                                  |
    |   (i)    [RECEPTION]    (i)      |
    |                                  |
    |    []                  []        |
    |            (tv)                  |
    |    []                  []        |
    +----------------------------------+"#;

const ROOM237_ART: &str = r#"
    +----------------------------------+
    |                                  |
    |    [bed]           [window]      |
    |                                  |
    |   ~ <- Something moves...        |
    |                                  |
    |    [door]                        |
    |                                  |
    |             237                  |
    +----------------------------------+"#;

const BAR_ART: &str = r#"
    +----------------------------------+
    |  ||| ||| ||| ||| ||| ||| |||     |
    |  ===========================     |
    |                                  |
    |   o  "What'll it be?"            |
    |                                  |
    |   []  []  []  []  []  []         |
    |                                  |
    |    * * * *  <- Ghostly party     |
    +----------------------------------+"#;

const KITCHEN_ART: &str = r#"
    +----------------------------------+
    |  ~~~        /|\        ***       |
    |                                  |
    |   [STOVE]   [PREP]   [FREEZER]   |
    |                                  |
    |  (cans)                          |
    |                                  |
    |        !! DANGER !!              |
    |                                  |
    +----------------------------------+"#;

const MAZE_ART: &str = r#"
    +----------------------------------+
    |  *  ####  *  ####  *  ####  *    |
    |     ####     ####     ####       |
    |  *        *        *        *    |
    |     ####     ####     ####       |
    |  *  ####  *  ####  *  ####  *    |
    |                                  |
    |         x  <- You are here       |
    |                                  |
    +----------------------------------+"#;

fn lobby() -> Room {
    Room::new(
        RoomId::Lobby,
        "Hotel Lobby",
        "The grand lobby stretches before you. Dust particles dance in the dim light.",
        LOBBY_ART,
    )
    .with_choices(vec![
        Choice::new(
            "Go to Room 237",
            Action::Travel {
                to: RoomId::Room237,
                line: "You walk down the eerie hallway to Room 237...",
            },
        ),
        Choice::new(
            "Visit the Bar",
            Action::Travel {
                to: RoomId::Bar,
                line: "You enter the Gold Room bar...",
            },
        ),
        Choice::new(
            "Check the Kitchen",
            Action::Travel {
                to: RoomId::Kitchen,
                line: "You push through the swinging doors into the kitchen...",
            },
        ),
        Choice::new(
            "Go to the Hedge Maze",
            Action::Travel {
                to: RoomId::Maze,
                line: "You step outside into the frozen hedge maze...",
            },
        ),
    ])
}

fn room237() -> Room {
    Room::new(
        RoomId::Room237,
        "Room 237",
        "The door creaks open. The room feels wrong, twisted by unseen forces.",
        ROOM237_ART,
    )
    .with_choices(vec![
        Choice::new(
            "Investigate the bathroom",
            Action::Afflict {
                lines: &["You see something horrifying in the bathtub... Your sanity decreases!"],
                stat: Stat::Sanity,
                amount: 20,
                fatal: Some(Fatal {
                    at_or_below: 20,
                    line: "The horror overwhelms you. GAME OVER.",
                }),
            },
        ),
        Choice::new(
            "Search for clues",
            Action::TakeItem {
                item: Item::HotelKey,
                flourish: None,
                refusal: "You've already searched this room thoroughly.",
            },
        ),
        Choice::new(
            "Leave quickly",
            Action::Travel {
                to: RoomId::Lobby,
                line: "You flee back to the lobby, heart pounding...",
            },
        ),
    ])
}

fn bar() -> Room {
    Room::new(
        RoomId::Bar,
        "Gold Room Bar",
        "The elegant bar stretches endlessly. Ghostly figures seem to move in your peripheral vision.",
        BAR_ART,
    )
    .with_choices(vec![
        Choice::new(
            "Talk to the bartender",
            Action::Afflict {
                lines: &[
                    "Lloyd the bartender pours you a drink...",
                    "'You've always been the caretaker here, Mr. Torrance.'",
                ],
                stat: Stat::Sanity,
                amount: 15,
                fatal: None,
            },
        ),
        Choice::new(
            "Join the ghostly party",
            Action::Afflict {
                lines: &["You dance with the spirits of the past..."],
                stat: Stat::Sanity,
                amount: 25,
                fatal: Some(Fatal {
                    at_or_below: 0,
                    line: "You become one with the hotel's ghosts forever. GAME OVER.",
                }),
            },
        ),
        Choice::new(
            "Return to lobby",
            Action::Travel {
                to: RoomId::Lobby,
                line: "You back away from the supernatural gathering...",
            },
        ),
    ])
}

fn kitchen() -> Room {
    Room::new(
        RoomId::Kitchen,
        "Hotel Kitchen",
        "Industrial kitchen equipment looms in the shadows. Something feels off about this place.",
        KITCHEN_ART,
    )
    .with_items(vec![Item::Axe])
    .with_choices(vec![
        Choice::new(
            "Check the freezer",
            Action::Afflict {
                lines: &["The freezer is locked tight. You hear strange sounds from within..."],
                stat: Stat::Sanity,
                amount: 10,
                fatal: None,
            },
        ),
        Choice::new(
            "Take the axe",
            Action::TakeItem {
                item: Item::Axe,
                flourish: Some("You grip the heavy axe. It feels familiar in your hands..."),
                refusal: "You already have the axe.",
            },
        ),
        Choice::new(
            "Return to lobby",
            Action::Travel {
                to: RoomId::Lobby,
                line: "You leave the ominous kitchen behind...",
            },
        ),
    ])
}

fn maze() -> Room {
    Room::new(
        RoomId::Maze,
        "Hedge Maze",
        "Snow falls heavily as you navigate the frozen maze. Your breath forms clouds in the frigid air.",
        MAZE_ART,
    )
    .with_choices(vec![
        Choice::new("Navigate deeper into the maze", Action::BraveMaze),
        Choice::new(
            "Return to the hotel",
            Action::Travel {
                to: RoomId::Lobby,
                line: "You retreat back to the warmth of the hotel...",
            },
        ),
        Choice::new(
            "Hide and wait",
            Action::Afflict {
                lines: &[
                    "You crouch behind a hedge, waiting...",
                    "'Danny... Danny...' - a voice calls through the snow.",
                ],
                stat: Stat::Sanity,
                amount: 10,
                fatal: None,
            },
        ),
    ])
}

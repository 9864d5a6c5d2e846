//! Mutable session state: meters, inventory, and the session phase.
//!
//! `GameState` is the single mutable record of a run through the hotel. It
//! is owned exclusively by the session controller; everything else reads it
//! or describes changes to it as [`crate::engine::Effect`] values.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rooms::RoomId;

/// Starting (and maximum) value for both meters.
pub const METER_MAX: i32 = 100;

/// Which depleting resource an effect targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Health,
    Sanity,
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Health => write!(f, "health"),
            Stat::Sanity => write!(f, "sanity"),
        }
    }
}

/// A bounded resource counter, clamped to `0..=METER_MAX`.
///
/// The authored dataset only ever drains meters; the clamp on both ends is
/// defensive so displayed percentages stay meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meter {
    current: i32,
}

impl Meter {
    /// A meter at its maximum.
    pub fn full() -> Self {
        Self { current: METER_MAX }
    }

    pub fn value(&self) -> i32 {
        self.current
    }

    /// Subtract `amount`, clamping into range. Returns the new value.
    pub fn drain(&mut self, amount: i32) -> i32 {
        self.current = (self.current - amount).clamp(0, METER_MAX);
        self.current
    }

    /// The value `drain` would leave, without mutating.
    pub fn after_drain(&self, amount: i32) -> i32 {
        (self.current - amount).clamp(0, METER_MAX)
    }
}

impl Default for Meter {
    fn default() -> Self {
        Self::full()
    }
}

/// The obtainable items of the hotel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    HotelKey,
    Axe,
}

impl Item {
    /// Display name, as it appears in narration and inventory listings.
    pub fn name(&self) -> &'static str {
        match self {
            Item::HotelKey => "Hotel Key",
            Item::Axe => "Axe",
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Insertion-ordered item collection with idempotent membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Returns false when the item was already held, in which
    /// case nothing changes.
    pub fn add(&mut self, item: Item) -> bool {
        if self.contains(item) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn contains(&self, item: Item) -> bool {
        self.items.contains(&item)
    }

    /// Held items in pickup order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Where the session is in its lifecycle. Exactly one phase holds at any
/// time; the terminal phases freeze dispatch until reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Phase {
    #[default]
    Playing,
    GameOver,
    Victory,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Phase::Playing)
    }
}

/// The single mutable record describing one run of the hotel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub current_room: RoomId,
    pub inventory: Inventory,
    pub health: Meter,
    pub sanity: Meter,
    pub phase: Phase,
}

impl GameState {
    /// The fixed opening state of every session.
    pub fn initial() -> Self {
        Self {
            current_room: RoomId::Lobby,
            inventory: Inventory::new(),
            health: Meter::full(),
            sanity: Meter::full(),
            phase: Phase::Playing,
        }
    }

    /// Whether the Hotel Key has been found. Derived from the inventory so
    /// the two can never disagree.
    pub fn has_key(&self) -> bool {
        self.inventory.contains(Item::HotelKey)
    }

    pub fn meter(&self, stat: Stat) -> &Meter {
        match stat {
            Stat::Health => &self.health,
            Stat::Sanity => &self.sanity,
        }
    }

    pub fn meter_mut(&mut self, stat: Stat) -> &mut Meter {
        match stat {
            Stat::Health => &mut self.health,
            Stat::Sanity => &mut self.sanity,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

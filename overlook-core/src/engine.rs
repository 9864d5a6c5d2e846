//! Choice resolution and effect application.
//!
//! The pipeline has two halves:
//! 1. [`resolve`] turns an authored [`Action`] into [`Effect`]s plus
//!    narration lines, reading the current state but never writing it
//! 2. [`apply_effects`] applies those effects to the state
//!
//! Keeping resolution pure makes every authored effect unit-testable in
//! isolation and keeps state and log updates atomic at the session layer.
//!
//! Death thresholds are authored onto the specific draining actions that can
//! trigger them and are checked immediately after that action's own drain,
//! never globally after every mutation.

use serde::{Deserialize, Serialize};

use crate::chance::ChanceSource;
use crate::rooms::RoomId;
use crate::state::{GameState, Item, Phase, Stat};

/// Draws below this find the way out of the maze.
pub const MAZE_ESCAPE_BAND: f64 = 0.3;
/// Draws below this (and at or above the escape band) cost health.
pub const MAZE_INJURY_BAND: f64 = 0.6;
/// Health lost while lost in the maze.
pub const MAZE_HEALTH_LOSS: i32 = 15;
/// Sanity lost to the footsteps in the snow.
pub const MAZE_SANITY_LOSS: i32 = 20;

/// A death threshold attached to a draining action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fatal {
    /// The session ends when the drained meter lands at or below this.
    pub at_or_below: i32,
    pub line: &'static str,
}

/// What a choice does, as authored data.
///
/// Actions carry no behavior of their own; [`resolve`] interprets them
/// against the current state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Move to another room, narrating the transit.
    Travel { to: RoomId, line: &'static str },

    /// Pick up an item, once. A repeat pickup changes nothing and narrates
    /// the refusal instead.
    TakeItem {
        item: Item,
        /// Extra narration on first pickup.
        flourish: Option<&'static str>,
        /// Narration when the item is already held.
        refusal: &'static str,
    },

    /// Narrate and drain a meter, with an optional death threshold.
    Afflict {
        lines: &'static [&'static str],
        stat: Stat,
        amount: i32,
        fatal: Option<Fatal>,
    },

    /// The one randomized action: push deeper into the hedge maze.
    BraveMaze,
}

/// The three outcomes of a maze draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeEvent {
    /// A way out appears; escape requires the key and the axe.
    WayOut,
    /// Lost among the hedges, costing health.
    Lost,
    /// Footsteps in the snow, costing sanity.
    Footsteps,
}

impl MazeEvent {
    /// Partition a uniform draw in `[0, 1)` into its band.
    pub fn from_unit(unit: f64) -> Self {
        if unit < MAZE_ESCAPE_BAND {
            MazeEvent::WayOut
        } else if unit < MAZE_INJURY_BAND {
            MazeEvent::Lost
        } else {
            MazeEvent::Footsteps
        }
    }
}

/// Concrete state changes produced by resolving an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// The player moved between rooms.
    Moved { from: RoomId, to: RoomId },

    /// An item entered the inventory.
    ItemTaken { item: Item },

    /// A pickup was refused because the item was already held.
    /// Informational; applies no state change.
    AlreadyHeld { item: Item },

    /// A meter went down. `remaining` is the post-clamp value.
    Drained {
        stat: Stat,
        amount: i32,
        remaining: i32,
    },

    /// The hotel claimed the player.
    Perished,

    /// The player escaped the curse.
    Escaped,
}

/// The outcome of resolving one action: effects plus narration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub effects: Vec<Effect>,
    pub lines: Vec<String>,
}

impl Resolution {
    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }
}

/// Resolve an action against the current state.
///
/// Reads `state` but never writes it; all mutation goes through
/// [`apply_effects`]. `chance` is consulted only by [`Action::BraveMaze`].
pub fn resolve(state: &GameState, action: &Action, chance: &mut dyn ChanceSource) -> Resolution {
    let mut out = Resolution::default();

    match action {
        Action::Travel { to, line } => {
            out.effects.push(Effect::Moved {
                from: state.current_room,
                to: *to,
            });
            out.line(*line);
        }

        Action::TakeItem {
            item,
            flourish,
            refusal,
        } => {
            if state.inventory.contains(*item) {
                out.effects.push(Effect::AlreadyHeld { item: *item });
                out.line(*refusal);
            } else {
                out.effects.push(Effect::ItemTaken { item: *item });
                out.line(format!("You picked up: {item}"));
                if let Some(extra) = flourish {
                    out.line(*extra);
                }
            }
        }

        Action::Afflict {
            lines,
            stat,
            amount,
            fatal,
        } => {
            for line in *lines {
                out.line(*line);
            }
            drain(&mut out, state, *stat, *amount, *fatal);
        }

        Action::BraveMaze => match MazeEvent::from_unit(chance.unit()) {
            MazeEvent::WayOut => {
                out.line("You find a way out of the maze!");
                if state.has_key() && state.inventory.contains(Item::Axe) {
                    out.effects.push(Effect::Escaped);
                    out.line("With the key and axe, you escape the hotel's curse! YOU WIN!");
                } else {
                    out.line("But without the right tools, you're still trapped...");
                }
            }
            MazeEvent::Lost => {
                out.line("You're getting lost in the maze...");
                drain(&mut out, state, Stat::Health, MAZE_HEALTH_LOSS, None);
            }
            MazeEvent::Footsteps => {
                out.line("You hear footsteps behind you in the snow...");
                drain(&mut out, state, Stat::Sanity, MAZE_SANITY_LOSS, None);
            }
        },
    }

    out
}

/// Record a drain and its death check, if any.
fn drain(out: &mut Resolution, state: &GameState, stat: Stat, amount: i32, fatal: Option<Fatal>) {
    let remaining = state.meter(stat).after_drain(amount);
    out.effects.push(Effect::Drained {
        stat,
        amount,
        remaining,
    });
    if let Some(fatal) = fatal {
        if remaining <= fatal.at_or_below {
            out.effects.push(Effect::Perished);
            out.line(fatal.line);
        }
    }
}

/// Apply effects to the game state, in order.
pub fn apply_effects(state: &mut GameState, effects: &[Effect]) {
    for effect in effects {
        apply_effect(state, effect);
    }
}

/// Apply a single effect.
pub fn apply_effect(state: &mut GameState, effect: &Effect) {
    match effect {
        Effect::Moved { to, .. } => state.current_room = *to,
        Effect::ItemTaken { item } => {
            state.inventory.add(*item);
        }
        Effect::Drained { stat, amount, .. } => {
            state.meter_mut(*stat).drain(*amount);
        }
        Effect::Perished => state.phase = Phase::GameOver,
        Effect::Escaped => state.phase = Phase::Victory,
        // Informational only.
        Effect::AlreadyHeld { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedChance;

    fn resolve_and_apply(state: &mut GameState, action: &Action, draw: f64) -> Resolution {
        let mut chance = FixedChance::always(draw);
        let resolution = resolve(state, action, &mut chance);
        apply_effects(state, &resolution.effects);
        resolution
    }

    #[test]
    fn test_maze_band_partition_boundaries() {
        assert_eq!(MazeEvent::from_unit(0.0), MazeEvent::WayOut);
        assert_eq!(MazeEvent::from_unit(0.299), MazeEvent::WayOut);
        assert_eq!(MazeEvent::from_unit(0.3), MazeEvent::Lost);
        assert_eq!(MazeEvent::from_unit(0.599), MazeEvent::Lost);
        assert_eq!(MazeEvent::from_unit(0.6), MazeEvent::Footsteps);
        assert_eq!(MazeEvent::from_unit(0.999), MazeEvent::Footsteps);
    }

    #[test]
    fn test_travel_moves_and_narrates() {
        let mut state = GameState::initial();
        let action = Action::Travel {
            to: RoomId::Bar,
            line: "You enter the Gold Room bar...",
        };
        let resolution = resolve_and_apply(&mut state, &action, 0.9);

        assert_eq!(state.current_room, RoomId::Bar);
        assert_eq!(resolution.lines, vec!["You enter the Gold Room bar..."]);
    }

    #[test]
    fn test_take_item_then_refusal() {
        let mut state = GameState::initial();
        let action = Action::TakeItem {
            item: Item::Axe,
            flourish: Some("You grip the heavy axe. It feels familiar in your hands..."),
            refusal: "You already have the axe.",
        };

        let first = resolve_and_apply(&mut state, &action, 0.9);
        assert!(state.inventory.contains(Item::Axe));
        assert_eq!(first.lines[0], "You picked up: Axe");
        assert_eq!(first.lines.len(), 2);

        let second = resolve_and_apply(&mut state, &action, 0.9);
        assert_eq!(state.inventory.len(), 1);
        assert_eq!(second.lines, vec!["You already have the axe."]);
        assert_eq!(second.effects, vec![Effect::AlreadyHeld { item: Item::Axe }]);
    }

    #[test]
    fn test_afflict_without_threshold_never_ends_the_session() {
        let mut state = GameState::initial();
        let action = Action::Afflict {
            lines: &["Lloyd the bartender pours you a drink..."],
            stat: Stat::Sanity,
            amount: 15,
            fatal: None,
        };
        // Drain all the way to the floor; no threshold means no game over.
        for _ in 0..10 {
            resolve_and_apply(&mut state, &action, 0.9);
        }
        assert_eq!(state.sanity.value(), 0);
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_fatal_threshold_fires_at_exact_boundary() {
        let mut state = GameState::initial();
        let action = Action::Afflict {
            lines: &["You see something horrifying in the bathtub..."],
            stat: Stat::Sanity,
            amount: 20,
            fatal: Some(Fatal {
                at_or_below: 20,
                line: "The horror overwhelms you. GAME OVER.",
            }),
        };

        for expected in [80, 60, 40] {
            resolve_and_apply(&mut state, &action, 0.9);
            assert_eq!(state.sanity.value(), expected);
            assert_eq!(state.phase, Phase::Playing);
        }

        let fourth = resolve_and_apply(&mut state, &action, 0.9);
        assert_eq!(state.sanity.value(), 20);
        assert_eq!(state.phase, Phase::GameOver);
        assert!(fourth.effects.contains(&Effect::Perished));
        assert_eq!(
            fourth.lines.last().map(String::as_str),
            Some("The horror overwhelms you. GAME OVER.")
        );
    }

    #[test]
    fn test_maze_escape_requires_key_and_axe() {
        let mut state = GameState::initial();
        state.current_room = RoomId::Maze;

        let without_tools = resolve_and_apply(&mut state, &Action::BraveMaze, 0.1);
        assert_eq!(state.phase, Phase::Playing);
        assert!(without_tools
            .lines
            .iter()
            .any(|l| l.contains("still trapped")));
        assert!(without_tools.effects.is_empty());

        state.inventory.add(Item::HotelKey);
        state.inventory.add(Item::Axe);

        let with_tools = resolve_and_apply(&mut state, &Action::BraveMaze, 0.1);
        assert_eq!(state.phase, Phase::Victory);
        assert_eq!(with_tools.effects, vec![Effect::Escaped]);
    }

    #[test]
    fn test_maze_injury_band_costs_health() {
        let mut state = GameState::initial();
        let resolution = resolve_and_apply(&mut state, &Action::BraveMaze, 0.45);
        assert_eq!(state.health.value(), 100 - MAZE_HEALTH_LOSS);
        assert_eq!(state.sanity.value(), 100);
        assert!(resolution
            .effects
            .contains(&Effect::Drained {
                stat: Stat::Health,
                amount: MAZE_HEALTH_LOSS,
                remaining: 85,
            }));
    }

    #[test]
    fn test_maze_footsteps_band_costs_sanity() {
        let mut state = GameState::initial();
        resolve_and_apply(&mut state, &Action::BraveMaze, 0.75);
        assert_eq!(state.sanity.value(), 100 - MAZE_SANITY_LOSS);
        assert_eq!(state.health.value(), 100);
    }

    #[test]
    fn test_resolve_does_not_mutate_state() {
        let state = GameState::initial();
        let before = state.clone();
        let mut chance = FixedChance::always(0.1);
        let _ = resolve(&state, &Action::BraveMaze, &mut chance);
        assert_eq!(state, before);
    }
}

//! Survival-horror text adventure engine set in the Overlook Hotel.
//!
//! This crate provides:
//! - A fixed, hand-authored room graph (the hotel and its hedge maze)
//! - A pure resolve/apply effect pipeline over a single mutable game state
//! - Depleting health and sanity meters with authored death thresholds
//! - A session controller with dispatch, terminal freeze, and reset
//!
//! Presentation is a caller concern: frontends render [`Snapshot`] values
//! and forward menu selections back into [`GameSession::dispatch`].
//!
//! # Quick Start
//!
//! ```
//! use overlook_core::{GameSession, SessionError};
//!
//! let mut session = GameSession::new();
//! let report = session.dispatch("Go to Room 237")?;
//! assert_eq!(report.lines[0], "You walk down the eerie hallway to Room 237...");
//! # Ok::<(), SessionError>(())
//! ```

pub mod chance;
pub mod engine;
pub mod log;
pub mod rooms;
pub mod session;
pub mod state;
pub mod testing;

// Primary public API
pub use chance::{ChanceSource, SeededChance, ThreadChance};
pub use engine::{Action, Effect, MazeEvent, Resolution};
pub use log::{NarrationLog, INTRO, VISIBLE_LINES};
pub use rooms::{Choice, Room, RoomGraph, RoomId, UnknownRoomError};
pub use session::{GameSession, Selection, SessionError, Snapshot, TurnReport};
pub use state::{GameState, Inventory, Item, Meter, Phase, Stat};

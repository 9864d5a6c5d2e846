//! GameSession - the session controller and primary public API.
//!
//! The session owns the mutable state and narration log exclusively. It
//! guards dispatch against the currently visible menu, resolves the chosen
//! action, applies the effects and narration together, and freezes once a
//! terminal phase is reached until [`GameSession::reset`] is called.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::chance::{ChanceSource, ThreadChance};
use crate::engine::{self, Effect};
use crate::log::NarrationLog;
use crate::rooms::{Choice, Room, RoomGraph, RoomId, UnknownRoomError, OVERLOOK};
use crate::state::{GameState, Phase};

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The room graph was asked for a key it does not hold. This is an
    /// authoring bug, not a player mistake.
    #[error(transparent)]
    UnknownRoom(#[from] UnknownRoomError),

    /// The selection does not name a currently visible choice. The session
    /// is left untouched.
    #[error("invalid choice {given} in {room}")]
    InvalidChoice { room: RoomId, given: Selection },

    /// The session reached a terminal phase; only reset can continue it.
    #[error("the session has ended; reset to play again")]
    Ended,
}

/// How a caller names a choice: by menu position or by label.
///
/// Indices count into the *visible* menu, matching what a frontend renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Index(usize),
    Label(String),
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Index(index) => write!(f, "#{index}"),
            Selection::Label(label) => write!(f, "{label:?}"),
        }
    }
}

impl From<usize> for Selection {
    fn from(index: usize) -> Self {
        Selection::Index(index)
    }
}

impl From<&str> for Selection {
    fn from(label: &str) -> Self {
        Selection::Label(label.to_string())
    }
}

impl From<String> for Selection {
    fn from(label: String) -> Self {
        Selection::Label(label)
    }
}

/// What one dispatched choice produced.
#[derive(Debug, Clone)]
pub struct TurnReport {
    /// Narration emitted this turn, in order.
    pub lines: Vec<String>,
    /// State changes that were applied.
    pub effects: Vec<Effect>,
    /// Phase after the turn.
    pub phase: Phase,
}

/// A render-ready view of the observable session state.
///
/// Frontends consume this instead of reaching into internals.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub session: Uuid,
    pub room: RoomId,
    pub room_name: &'static str,
    pub description: &'static str,
    pub art: &'static str,
    pub health: i32,
    pub sanity: i32,
    pub inventory: Vec<String>,
    /// The display window of the narration log, oldest first.
    pub story: Vec<String>,
    /// Visible choice labels, in menu order.
    pub choices: Vec<String>,
    pub game_over: bool,
    pub victory: bool,
}

/// An interactive run of the hotel.
///
/// Each session is independent; create as many as needed.
pub struct GameSession {
    session_id: Uuid,
    rooms: &'static RoomGraph,
    state: GameState,
    log: NarrationLog,
    chance: Box<dyn ChanceSource>,
}

impl GameSession {
    /// Start a fresh session in the hotel lobby.
    pub fn new() -> Self {
        Self::with_chance(Box::new(ThreadChance))
    }

    /// Start a session drawing randomness from `chance`.
    pub fn with_chance(chance: Box<dyn ChanceSource>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            rooms: &OVERLOOK,
            state: GameState::initial(),
            log: NarrationLog::new(),
            chance,
        }
    }

    /// Dispatch a choice selection against the current room.
    ///
    /// The selection must name a currently visible choice. State and log
    /// update together; a rejected dispatch changes nothing.
    pub fn dispatch(&mut self, selection: impl Into<Selection>) -> Result<TurnReport, SessionError> {
        let selection = selection.into();

        if self.state.phase.is_terminal() {
            return Err(SessionError::Ended);
        }

        let room = self.rooms.get(self.state.current_room)?;
        let visible = room.visible_choices(&self.state);
        let choice = match &selection {
            Selection::Index(index) => visible.get(*index).copied(),
            Selection::Label(label) => visible
                .iter()
                .copied()
                .find(|choice| choice.text.eq_ignore_ascii_case(label)),
        }
        .ok_or(SessionError::InvalidChoice {
            room: room.id,
            given: selection,
        })?;

        let resolution = engine::resolve(&self.state, &choice.action, self.chance.as_mut());
        engine::apply_effects(&mut self.state, &resolution.effects);
        for line in &resolution.lines {
            self.log.push(line.clone());
        }

        Ok(TurnReport {
            lines: resolution.lines,
            effects: resolution.effects,
            phase: self.state.phase,
        })
    }

    /// Restore the fixed initial state and intro log, returning to Playing.
    pub fn reset(&mut self) {
        self.state = GameState::initial();
        self.log = NarrationLog::new();
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn log(&self) -> &NarrationLog {
        &self.log
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn health(&self) -> i32 {
        self.state.health.value()
    }

    pub fn sanity(&self) -> i32 {
        self.state.sanity.value()
    }

    /// The room the player is standing in.
    pub fn current_room(&self) -> Result<&'static Room, UnknownRoomError> {
        self.rooms.get(self.state.current_room)
    }

    /// The menu for the current room and state, in authored order.
    pub fn visible_choices(&self) -> Result<Vec<&'static Choice>, UnknownRoomError> {
        Ok(self.current_room()?.visible_choices(&self.state))
    }

    /// The observable output surface, ready to render.
    pub fn snapshot(&self) -> Result<Snapshot, UnknownRoomError> {
        let room = self.current_room()?;
        Ok(Snapshot {
            session: self.session_id,
            room: room.id,
            room_name: room.name,
            description: room.description,
            art: room.art,
            health: self.state.health.value(),
            sanity: self.state.sanity.value(),
            inventory: self
                .state
                .inventory
                .items()
                .iter()
                .map(|item| item.to_string())
                .collect(),
            story: self.log.visible().to_vec(),
            choices: room
                .visible_choices(&self.state)
                .iter()
                .map(|choice| choice.text.to_string())
                .collect(),
            game_over: self.state.phase == Phase::GameOver,
            victory: self.state.phase == Phase::Victory,
        })
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::INTRO;
    use crate::state::Item;
    use crate::testing::FixedChance;

    #[test]
    fn test_new_session_starts_in_the_lobby() {
        let session = GameSession::new();
        let snapshot = session.snapshot().unwrap();
        assert_eq!(snapshot.room, RoomId::Lobby);
        assert_eq!(snapshot.room_name, "Hotel Lobby");
        assert_eq!(snapshot.health, 100);
        assert_eq!(snapshot.sanity, 100);
        assert!(snapshot.inventory.is_empty());
        assert_eq!(snapshot.story, INTRO.map(String::from));
        assert!(!snapshot.game_over);
        assert!(!snapshot.victory);
    }

    #[test]
    fn test_dispatch_by_index_and_label_agree() {
        let mut by_index = GameSession::new();
        let mut by_label = GameSession::new();

        let a = by_index.dispatch(0).unwrap();
        let b = by_label.dispatch("go to room 237").unwrap();

        assert_eq!(a.lines, b.lines);
        assert_eq!(by_index.state().current_room, RoomId::Room237);
        assert_eq!(by_label.state().current_room, RoomId::Room237);
    }

    #[test]
    fn test_invalid_selection_changes_nothing() {
        let mut session = GameSession::new();
        let before = session.state().clone();
        let log_len = session.log().len();

        let err = session.dispatch(9).unwrap_err();
        assert!(matches!(err, SessionError::InvalidChoice { .. }));

        let err = session.dispatch("Take the axe").unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidChoice {
                room: RoomId::Lobby,
                ..
            }
        ));

        assert_eq!(session.state(), &before);
        assert_eq!(session.log().len(), log_len);
    }

    #[test]
    fn test_terminal_session_rejects_dispatch_until_reset() {
        let mut session = GameSession::new();
        session.dispatch("Go to Room 237").unwrap();
        for _ in 0..4 {
            session.dispatch("Investigate the bathroom").unwrap();
        }
        assert_eq!(session.phase(), Phase::GameOver);

        let err = session.dispatch("Leave quickly").unwrap_err();
        assert!(matches!(err, SessionError::Ended));
        assert_eq!(session.phase(), Phase::GameOver);

        session.reset();
        assert_eq!(session.phase(), Phase::Playing);
        session.dispatch("Visit the Bar").unwrap();
    }

    #[test]
    fn test_state_and_log_update_together() {
        let mut session = GameSession::new();
        let report = session.dispatch("Check the Kitchen").unwrap();
        assert_eq!(report.lines.len(), 1);
        assert_eq!(
            session.log().all().last().map(String::as_str),
            Some("You push through the swinging doors into the kitchen...")
        );
        assert_eq!(session.state().current_room, RoomId::Kitchen);
    }

    #[test]
    fn test_scripted_chance_reaches_victory() {
        let mut session = GameSession::with_chance(Box::new(FixedChance::always(0.1)));
        session.dispatch("Go to Room 237").unwrap();
        session.dispatch("Search for clues").unwrap();
        session.dispatch("Leave quickly").unwrap();
        session.dispatch("Check the Kitchen").unwrap();
        session.dispatch("Take the axe").unwrap();
        session.dispatch("Return to lobby").unwrap();
        session.dispatch("Go to the Hedge Maze").unwrap();

        assert!(session.state().inventory.contains(Item::HotelKey));
        assert!(session.state().inventory.contains(Item::Axe));

        let report = session.dispatch("Navigate deeper into the maze").unwrap();
        assert_eq!(report.phase, Phase::Victory);
        assert!(session.snapshot().unwrap().victory);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let session = GameSession::new();
        let json = serde_json::to_string(&session.snapshot().unwrap()).unwrap();
        assert!(json.contains("\"room\":\"lobby\""));
        assert!(json.contains("Hotel Lobby"));
    }
}

//! Game error taxonomy.

use derive_more::{Display, Error};
use rooks_board::{CoordinateError, TurnOrderError};
use serde::Serialize;
use tracing::instrument;

/// What went wrong, independent of the message.
///
/// Transport layers map these to their own status codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum GameErrorKind {
    /// Invalid game configuration.
    Configuration,
    /// The roster is already full.
    Capacity,
    /// The action is not allowed in the current stage.
    Stage,
    /// The acting player does not hold the turn.
    Turn,
    /// Illegal target: occupied, out of bounds, not owned, unreachable.
    Action,
    /// Unknown game, player or piece id.
    Lookup,
    /// Malformed action request.
    Request,
    /// Invalid coordinate, such as an edge between distant squares.
    Coordinate,
    /// Invalid turn order arguments.
    Argument,
}

/// Error returned by every game operation.
///
/// A failed operation never leaves the game partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{} error: {} at {}:{}", kind, message, file, line)]
pub struct GameError {
    /// Error category.
    pub kind: GameErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new game error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: GameErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Error category.
    pub fn kind(&self) -> GameErrorKind {
        self.kind
    }

    /// Invalid configuration.
    #[track_caller]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::Configuration, message)
    }

    /// Roster full.
    #[track_caller]
    pub fn capacity(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::Capacity, message)
    }

    /// Wrong stage.
    #[track_caller]
    pub fn stage(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::Stage, message)
    }

    /// Not the player's turn.
    #[track_caller]
    pub fn turn(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::Turn, message)
    }

    /// Illegal action target.
    #[track_caller]
    pub fn action(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::Action, message)
    }

    /// Unknown id.
    #[track_caller]
    pub fn lookup(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::Lookup, message)
    }

    /// Malformed request.
    #[track_caller]
    pub fn request(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::Request, message)
    }
}

impl From<CoordinateError> for GameError {
    #[track_caller]
    fn from(err: CoordinateError) -> Self {
        Self::new(GameErrorKind::Coordinate, err.message)
    }
}

impl From<TurnOrderError> for GameError {
    #[track_caller]
    fn from(err: TurnOrderError) -> Self {
        Self::new(GameErrorKind::Argument, err.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rooks_board::{EdgeCoordinate, TurnOrder, coord};

    #[test]
    fn test_error_records_kind_and_location() {
        let err = GameError::capacity("Game is full");
        assert_eq!(err.kind(), GameErrorKind::Capacity);
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().starts_with("Capacity error: Game is full"));
    }

    #[test]
    fn test_board_errors_convert() {
        let err: GameError = EdgeCoordinate::new(coord(0, 0), coord(1, 1))
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), GameErrorKind::Coordinate);

        let err: GameError = TurnOrder::sequential(2, None, 2, false).unwrap_err().into();
        assert_eq!(err.kind(), GameErrorKind::Argument);
    }
}

//! Game lifecycle stages and outcomes.

use derive_more::Display;
use rooks_board::PlayerId;
use serde::{Deserialize, Serialize};

/// Lifecycle stage of a game. Stages only ever advance.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// Players are joining.
    WaitingForPlayers,
    /// Players take turns placing their pieces.
    PiecePlacement,
    /// Players take turns moving a piece and erecting a wall.
    Moves,
    /// The game is over.
    Completed,
}

impl Stage {
    /// Whether actions can still be accepted.
    pub fn is_active(self) -> bool {
        matches!(self, Stage::PiecePlacement | Stage::Moves)
    }
}

/// How a completed game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// Only this player still has live pieces.
    #[display("player {_0} wins")]
    Winner(PlayerId),
    /// No live pieces remain.
    #[display("draw")]
    Draw,
}

impl Outcome {
    /// The winning player, if any.
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            Outcome::Winner(player) => Some(player),
            Outcome::Draw => None,
        }
    }

    /// True for a draw.
    pub fn is_draw(self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

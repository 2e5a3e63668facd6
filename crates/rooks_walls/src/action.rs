//! Player actions.

use crate::error::GameError;
use crate::game::GameState;
use derive_more::From;
use rooks_board::{EdgeCoordinate, PieceId, PlayerId, SquareCoordinate};

/// Place a new piece during the placement stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct AddPieceAction {
    /// Acting player.
    pub player: PlayerId,
    /// Square to place the piece on.
    pub position: SquareCoordinate,
}

/// Move a piece and erect a wall during the moves stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct MoveAction {
    /// Acting player.
    pub player: PlayerId,
    /// Piece to move.
    pub piece: PieceId,
    /// Square the piece moves to.
    pub destination: SquareCoordinate,
    /// Edge the new wall stands on.
    pub wall: EdgeCoordinate,
}

/// Any action a player can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub enum GameAction {
    /// Piece placement.
    AddPiece(AddPieceAction),
    /// Move plus wall.
    Move(MoveAction),
}

impl GameAction {
    /// Acting player.
    pub fn player(&self) -> PlayerId {
        match self {
            GameAction::AddPiece(action) => action.player,
            GameAction::Move(action) => action.player,
        }
    }

    pub(crate) fn apply(&self, state: &mut GameState) -> Result<(), GameError> {
        match *self {
            GameAction::AddPiece(AddPieceAction { player, position }) => {
                state.add_piece(player, position)
            }
            GameAction::Move(MoveAction {
                player,
                piece,
                destination,
                wall,
            }) => state.move_piece(player, piece, destination, wall),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rooks_board::coord;

    #[test]
    fn test_actions_convert_into_game_action() {
        let add: GameAction = AddPieceAction::new(PlayerId::new(1), coord(2, 3)).into();
        assert_eq!(add.player(), PlayerId::new(1));

        let wall = coord(2, 3).edge_right();
        let mv: GameAction =
            MoveAction::new(PlayerId::new(2), PieceId::new(0), coord(2, 5), wall).into();
        assert_eq!(mv.player(), PlayerId::new(2));
        assert!(matches!(mv, GameAction::Move(MoveAction { wall: w, .. }) if w == wall));
    }
}

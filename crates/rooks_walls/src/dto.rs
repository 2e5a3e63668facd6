//! Wire-level request and response shapes.
//!
//! Transport framing is left to the embedding server; these types only fix
//! the JSON field names (camelCase) and the validation of incoming requests.

use crate::action::{AddPieceAction, GameAction, MoveAction};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::GameId;
use crate::stage::Stage;
use derive_getters::Getters;
use rooks_board::{EdgeCoordinate, Piece, PieceId, PlayerId, SquareCoordinate, Wall};
use serde::{Deserialize, Serialize};
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
// Responses
// ─────────────────────────────────────────────────────────────

/// Reply to a create-game request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    /// Id of the new game.
    pub game_id: GameId,
}

/// Reply to a join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct JoinGameResponse {
    /// Id assigned to the joining player.
    pub player_id: PlayerId,
}

/// A player on the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDto {
    /// Player id.
    pub id: PlayerId,
}

impl From<PlayerId> for PlayerDto {
    fn from(id: PlayerId) -> Self {
        Self { id }
    }
}

/// A live or dead piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceDto {
    /// Piece id.
    pub id: PieceId,
    /// Owning player.
    pub owner: PlayerId,
    /// Square the piece stands (or died) on.
    pub position: SquareCoordinate,
}

impl From<&Piece> for PieceDto {
    fn from(piece: &Piece) -> Self {
        Self {
            id: piece.id(),
            owner: piece.owner(),
            position: piece.position(),
        }
    }
}

/// A wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallDto {
    /// Edge the wall stands on.
    pub position: EdgeCoordinate,
}

impl From<Wall> for WallDto {
    fn from(wall: Wall) -> Self {
        Self {
            position: wall.position(),
        }
    }
}

/// Full game state as seen by one player.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct GameStateSnapshot {
    /// Game id.
    game_id: GameId,
    /// Game configuration.
    config: GameConfig,
    /// Current stage.
    stage: Stage,
    /// Player whose turn it is; absent before the game starts and after it ends.
    current_turn_player_id: Option<PlayerId>,
    /// Player the snapshot was taken for.
    requesting_player_id: PlayerId,
    /// Every player, in join order.
    players: Vec<PlayerDto>,
    /// Players still owning live pieces.
    remaining_players: Vec<PlayerDto>,
    /// Live pieces.
    pieces: Vec<PieceDto>,
    /// Walls.
    walls: Vec<WallDto>,
    /// Dead pieces.
    dead_pieces: Vec<PieceDto>,
}

// ─────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────

/// Body of an add-piece request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPieceRequest {
    /// Square to place the piece on.
    pub position: SquareCoordinate,
}

/// Body of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    /// Piece to move.
    pub piece_id: PieceId,
    /// Destination square.
    pub position: SquareCoordinate,
    /// Edge for the new wall.
    pub wall_position: EdgeCoordinate,
}

/// Action submission with exactly one populated variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActionRequest {
    /// Place a piece.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_piece: Option<AddPieceRequest>,
    /// Move a piece and erect a wall.
    #[serde(rename = "move", skip_serializing_if = "Option::is_none")]
    pub move_piece: Option<MoveRequest>,
}

impl ActionRequest {
    /// Turns the request into an action on behalf of `player`.
    ///
    /// # Errors
    ///
    /// Returns a request error unless exactly one variant is populated.
    #[instrument]
    pub fn into_action(self, player: PlayerId) -> Result<GameAction, GameError> {
        match (self.add_piece, self.move_piece) {
            (Some(AddPieceRequest { position }), None) => {
                Ok(AddPieceAction::new(player, position).into())
            }
            (None, Some(request)) => Ok(MoveAction::new(
                player,
                request.piece_id,
                request.position,
                request.wall_position,
            )
            .into()),
            (None, None) => Err(GameError::request("There must be exactly one action, got none")),
            (Some(_), Some(_)) => Err(GameError::request(
                "There must be exactly one action, got several",
            )),
        }
    }
}

impl From<GameAction> for ActionRequest {
    fn from(action: GameAction) -> Self {
        match action {
            GameAction::AddPiece(action) => Self {
                add_piece: Some(AddPieceRequest {
                    position: action.position,
                }),
                move_piece: None,
            },
            GameAction::Move(action) => Self {
                add_piece: None,
                move_piece: Some(MoveRequest {
                    piece_id: action.piece,
                    position: action.destination,
                    wall_position: action.wall,
                }),
            },
        }
    }
}

//! Board rules for Rooks and Walls.
//!
//! Pure, synchronous game geometry with no notion of sessions or locking:
//!
//! - **Coordinates**: squares, the edges between them, step vectors
//! - **Board**: bounds, pieces, walls, and region analysis that finds
//!   sealed-off kill zones
//! - **Movement**: composable step rules that compute where a piece may go
//! - **Turn order**: lazy round-robin and snake player sequences

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod coord;
mod error;
mod ids;
mod movement;
mod turn_order;

pub use board::{Board, DEAD_ZONE_THRESHOLD, GridPosition, Piece, Wall};
pub use coord::{
    DIAGONAL_MOVEMENT_DIRECTIONS, EdgeCoordinate, LINEAR_MOVEMENT_DIRECTIONS, SquareCoordinate,
    Step, coord, coord_step,
};
pub use error::{CoordinateError, TurnOrderError};
pub use ids::{PieceId, PlayerId};
pub use movement::{
    BlockedByPieces, BlockedByWalls, InsideBoard, MaxSteps, MovementIntersection, MovementRules,
    MovementUnion, PieceMovement, StepContext, StepOutcome, StepValidator, SteppedMovement,
};
pub use turn_order::TurnOrder;

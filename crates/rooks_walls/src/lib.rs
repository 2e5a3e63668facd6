//! Rooks and Walls game engine.
//!
//! Players join a [`Game`], place their rooks in snake order, then take turns
//! moving a rook and erecting a wall. Any region of eight squares or fewer
//! that walls seal off kills the rooks inside it; the last player with live
//! rooks wins.
//!
//! # Architecture
//!
//! - **[`GameRepository`]**: thread-safe registry handing out games by id
//! - **[`Game`]**: per-game lock around the state machine; the only way to
//!   mutate a game is [`Game::join_game`] or [`Game::process_action`]
//! - **[`Subscription`]**: coalescing update feed, closed on completion
//! - **DTOs**: camelCase JSON shapes for requests and snapshots
//!
//! Board geometry, movement and turn orders live in [`rooks_board`].
//!
//! # Example
//!
//! ```
//! use rooks_walls::{AddPieceAction, GameRepository, Stage};
//! use rooks_board::coord;
//!
//! let repository = GameRepository::new();
//! let game = repository.create_default_game()?;
//! let players: Vec<_> = (0..3).map(|_| game.join_game()).collect::<Result<_, _>>()?;
//! assert_eq!(game.stage(), Stage::PiecePlacement);
//!
//! game.process_action(AddPieceAction::new(players[0], coord(0, 0)))?;
//! assert_eq!(game.current_turn(), Some(players[1]));
//! # Ok::<(), rooks_walls::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod config;
mod dto;
mod error;
mod game;
mod repository;
mod stage;
mod subscription;

pub use action::{AddPieceAction, GameAction, MoveAction};
pub use config::{GameConfig, GameConfigRequest};
pub use dto::{
    ActionRequest, AddPieceRequest, CreateGameResponse, GameStateSnapshot, JoinGameResponse,
    MoveRequest, PieceDto, PlayerDto, WallDto,
};
pub use error::{GameError, GameErrorKind};
pub use game::{Game, GameId};
pub use repository::GameRepository;
pub use stage::{Outcome, Stage};
pub use subscription::{GameUpdate, Subscription};

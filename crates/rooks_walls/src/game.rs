//! The Rooks and Walls state machine.
//!
//! A [`Game`] is one independently lockable unit. Every join and action takes
//! the game's exclusive lock, validates, mutates, publishes one update to the
//! subscriptions and releases the lock. Validation always precedes mutation,
//! so a rejected operation leaves the game untouched.

use crate::action::GameAction;
use crate::config::GameConfig;
use crate::dto::{GameStateSnapshot, PieceDto, PlayerDto, WallDto};
use crate::error::GameError;
use crate::stage::{Outcome, Stage};
use crate::subscription::{Subscription, UpdateFeed};
use derive_more::{Display, From};
use rooks_board::{
    Board, EdgeCoordinate, Piece, PieceId, PieceMovement, PlayerId, SquareCoordinate, TurnOrder,
    Wall,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Identifier of a game, unique within the process.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[serde(transparent)]
pub struct GameId(u64);

impl GameId {
    /// Wraps a raw game number.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw game number.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A game session.
#[derive(Debug)]
pub struct Game {
    id: GameId,
    config: GameConfig,
    state: Mutex<GameState>,
}

impl Game {
    /// Creates a game waiting for players.
    ///
    /// # Errors
    ///
    /// Returns an argument error if the turn orders cannot be built for the
    /// configured number of players.
    #[instrument(
        skip(config),
        fields(
            players = config.number_of_players(),
            pieces = config.pieces_per_player()
        )
    )]
    pub fn new(id: GameId, config: GameConfig) -> Result<Self, GameError> {
        let state = GameState::new(config)?;
        info!(game_id = %id, "Created game");
        Ok(Self {
            id,
            config,
            state: Mutex::new(state),
        })
    }

    /// Game identifier.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Game configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // Validation happens before any mutation, so a panic while the lock was
    // held cannot have left the state half-updated.
    fn lock(&self) -> MutexGuard<'_, GameState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a player to the roster and returns their id.
    ///
    /// The roster filling up starts the placement stage.
    ///
    /// # Errors
    ///
    /// Returns a capacity error if the roster is already full.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn join_game(&self) -> Result<PlayerId, GameError> {
        let mut state = self.lock();
        let player = state.join().inspect_err(|e| warn!(error = %e, "Join rejected"))?;
        state.feed.publish();
        Ok(player)
    }

    /// Validates and applies an action, then notifies every subscription.
    ///
    /// # Errors
    ///
    /// Returns the first failed check; the game is unchanged in that case.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn process_action(
        &self,
        action: impl Into<GameAction> + std::fmt::Debug,
    ) -> Result<(), GameError> {
        let action = action.into();
        let mut state = self.lock();
        action
            .apply(&mut state)
            .inspect_err(|e| warn!(player = %action.player(), error = %e, "Action rejected"))?;

        state.feed.publish();
        if state.stage == Stage::Completed {
            state.feed.close();
        }
        Ok(())
    }

    /// Opens a new update feed.
    ///
    /// Once the game is completed the returned feed is already closed.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn create_subscription(&self) -> Subscription {
        let state = self.lock();
        debug!(closed = state.feed.is_closed(), "Creating subscription");
        state.feed.subscribe()
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.lock().stage
    }

    /// Player whose turn it is, if any.
    pub fn current_turn(&self) -> Option<PlayerId> {
        self.lock().current_turn
    }

    /// Every player that joined, in join order.
    pub fn players(&self) -> Vec<PlayerId> {
        self.lock().players.clone()
    }

    /// Players that still own at least one live piece, in join order.
    pub fn remaining_players(&self) -> Vec<PlayerId> {
        self.lock().remaining_players.clone()
    }

    /// Live pieces in placement order.
    pub fn pieces(&self) -> Vec<Piece> {
        self.lock().board.pieces().to_vec()
    }

    /// Walls in placement order.
    pub fn walls(&self) -> Vec<Wall> {
        self.lock().board.walls().to_vec()
    }

    /// Dead pieces in order of death.
    pub fn dead_pieces(&self) -> Vec<Piece> {
        self.lock().board.dead_pieces().to_vec()
    }

    /// Regions the walls currently cut the board into.
    pub fn regions(&self) -> Vec<HashSet<SquareCoordinate>> {
        self.lock().board.slice_into_regions()
    }

    /// How the game ended, once completed.
    pub fn outcome(&self) -> Option<Outcome> {
        self.lock().outcome
    }

    /// Squares a live piece could move to right now.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if no live piece has this id.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn legal_destinations(
        &self,
        piece: PieceId,
    ) -> Result<BTreeSet<SquareCoordinate>, GameError> {
        let state = self.lock();
        let piece = state
            .board
            .piece(piece)
            .ok_or_else(|| GameError::lookup(format!("No live piece with id {piece}")))?;
        Ok(piece.movement(&state.board).possible_destinations().into_iter().collect())
    }

    /// Consistent view of the whole game for one player.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the requesting player is not on the roster.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn snapshot(&self, requesting_player: PlayerId) -> Result<GameStateSnapshot, GameError> {
        let state = self.lock();
        state.player(requesting_player)?;

        let players = |ids: &[PlayerId]| -> Vec<PlayerDto> {
            ids.iter().copied().map(PlayerDto::from).collect()
        };
        let pieces =
            |pieces: &[Piece]| -> Vec<PieceDto> { pieces.iter().map(PieceDto::from).collect() };
        Ok(GameStateSnapshot::new(
            self.id,
            self.config,
            state.stage,
            state.current_turn,
            requesting_player,
            players(&state.players),
            players(&state.remaining_players),
            pieces(state.board.pieces()),
            state.board.walls().iter().copied().map(WallDto::from).collect(),
            pieces(state.board.dead_pieces()),
        ))
    }
}

/// Mutable part of a game, guarded by the game lock.
#[derive(Debug)]
pub(crate) struct GameState {
    config: GameConfig,
    stage: Stage,
    players: Vec<PlayerId>,
    remaining_players: Vec<PlayerId>,
    current_turn: Option<PlayerId>,
    board: Board,
    placement_order: TurnOrder,
    move_order: TurnOrder,
    next_piece_id: u32,
    outcome: Option<Outcome>,
    feed: UpdateFeed,
}

impl GameState {
    fn new(config: GameConfig) -> Result<Self, GameError> {
        let players = *config.number_of_players();
        let placement_order = TurnOrder::alternating(players, Some(config.total_pieces()), 0)?;
        // With an even piece count the snake placement ends on the last
        // player, so moves run backwards starting from that player.
        let move_order = if config.pieces_per_player() % 2 == 1 {
            TurnOrder::sequential(players, None, 0, false)?
        } else {
            TurnOrder::sequential(players, None, players - 1, true)?
        };

        Ok(Self {
            config,
            stage: Stage::WaitingForPlayers,
            players: Vec::new(),
            remaining_players: Vec::new(),
            current_turn: None,
            board: Board::new(*config.board_rows(), *config.board_columns()),
            placement_order,
            move_order,
            next_piece_id: 0,
            outcome: None,
            feed: UpdateFeed::new(),
        })
    }

    // ─────────────────────────────────────────────────────────────
    // Checks
    // ─────────────────────────────────────────────────────────────

    #[track_caller]
    fn require_stage(&self, stage: Stage) -> Result<(), GameError> {
        if self.stage != stage {
            return Err(GameError::stage(format!(
                "Action requires stage {stage}, game is in stage {}",
                self.stage
            )));
        }
        Ok(())
    }

    #[track_caller]
    fn player(&self, player: PlayerId) -> Result<PlayerId, GameError> {
        self.players
            .iter()
            .copied()
            .find(|&id| id == player)
            .ok_or_else(|| GameError::lookup(format!("Player {player} doesn't exist on this game")))
    }

    #[track_caller]
    fn require_turn(&self, player: PlayerId) -> Result<(), GameError> {
        if self.current_turn != Some(player) {
            return Err(GameError::turn(match self.current_turn {
                Some(current) => {
                    format!("Not player {player}'s turn, waiting for player {current}")
                }
                None => format!("Not player {player}'s turn"),
            }));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────

    fn join(&mut self) -> Result<PlayerId, GameError> {
        let capacity = *self.config.number_of_players();
        if self.players.len() >= capacity {
            return Err(GameError::capacity(format!(
                "Game is full ({capacity} players)"
            )));
        }

        let player = u32::try_from(self.players.len())
            .map(PlayerId::new)
            .map_err(|_| GameError::capacity("Player ids exhausted"))?;
        self.players.push(player);
        info!(player = %player, joined = self.players.len(), capacity, "Player joined");

        if self.players.len() == capacity {
            self.start();
        }
        Ok(player)
    }

    fn start(&mut self) {
        self.remaining_players = self.players.clone();
        self.stage = Stage::PiecePlacement;
        info!(stage = %self.stage, "Roster full, starting game");
        self.current_turn = next_eligible(
            &mut self.placement_order,
            &self.players,
            &self.remaining_players,
        );
    }

    /// Places a new piece for `player`.
    #[instrument(skip(self))]
    pub(crate) fn add_piece(
        &mut self,
        player: PlayerId,
        position: SquareCoordinate,
    ) -> Result<(), GameError> {
        self.require_stage(Stage::PiecePlacement)?;
        let player = self.player(player)?;
        self.require_turn(player)?;

        if !self.board.is_inside_board(&position) {
            return Err(GameError::action(format!(
                "Position {position} is not inside the board"
            )));
        }
        if self.board.piece_at(position).is_some() {
            return Err(GameError::action(format!(
                "Position {position} is already occupied"
            )));
        }

        let id = PieceId::new(self.next_piece_id);
        self.next_piece_id += 1;
        self.board.add_piece(Piece::new(id, player, position));
        debug!(piece = %id, "Piece placed");

        self.end_turn();
        Ok(())
    }

    /// Moves one of `player`'s pieces and erects a wall.
    #[instrument(skip(self))]
    pub(crate) fn move_piece(
        &mut self,
        player: PlayerId,
        piece: PieceId,
        destination: SquareCoordinate,
        wall: EdgeCoordinate,
    ) -> Result<(), GameError> {
        self.require_stage(Stage::Moves)?;
        let player = self.player(player)?;
        self.require_turn(player)?;

        let Some(moving) = self.board.piece(piece) else {
            if self.board.dead_piece(piece).is_some() {
                return Err(GameError::action(format!("Piece {piece} is dead")));
            }
            return Err(GameError::lookup(format!(
                "Piece {piece} doesn't exist on this game"
            )));
        };
        if moving.owner() != player {
            return Err(GameError::action(format!(
                "Piece {piece} is not owned by player {player}"
            )));
        }
        if self.board.wall_at(&wall).is_some() {
            return Err(GameError::action(format!(
                "Wall position {wall} is already occupied"
            )));
        }
        if !moving.movement(&self.board).can_move_to(destination) {
            return Err(GameError::action(format!(
                "Piece {piece} can't move to {destination}"
            )));
        }
        if !self.board.is_inside_board(&wall) {
            return Err(GameError::action(format!(
                "Wall position {wall} is outside the board"
            )));
        }

        self.board.move_piece(piece, destination);
        self.board.add_wall(Wall::new(wall));
        debug!(%destination, %wall, "Piece moved and wall erected");

        self.remove_trapped_pieces();
        if !self.check_game_over() {
            self.end_turn();
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // Turn bookkeeping
    // ─────────────────────────────────────────────────────────────

    fn remove_trapped_pieces(&mut self) {
        let dead = self.board.bury_trapped_pieces();
        if !dead.is_empty() {
            info!(pieces = ?dead, "Pieces trapped and removed");
        }

        let board = &self.board;
        let remaining: Vec<PlayerId> = self
            .players
            .iter()
            .copied()
            .filter(|&player| board.pieces().iter().any(|piece| piece.owner() == player))
            .collect();
        for eliminated in self
            .remaining_players
            .iter()
            .filter(|player| !remaining.contains(player))
        {
            info!(player = %eliminated, "Player eliminated");
        }
        self.remaining_players = remaining;
    }

    /// Completes the game if it is decided. Returns true when it did.
    fn check_game_over(&mut self) -> bool {
        let outcome = match self.remaining_players.as_slice() {
            [] => Outcome::Draw,
            [winner] => Outcome::Winner(*winner),
            _ => return false,
        };

        self.stage = Stage::Completed;
        self.current_turn = None;
        self.outcome = Some(outcome);
        info!(%outcome, "Game completed");
        true
    }

    fn end_turn(&mut self) {
        match self.stage {
            Stage::PiecePlacement if self.placement_order.is_exhausted() => {
                self.stage = Stage::Moves;
                info!(stage = %self.stage, "All pieces placed");
                self.current_turn =
                    next_eligible(&mut self.move_order, &self.players, &self.remaining_players);
            }
            Stage::PiecePlacement => {
                self.current_turn = next_eligible(
                    &mut self.placement_order,
                    &self.players,
                    &self.remaining_players,
                );
            }
            Stage::Moves => {
                self.current_turn =
                    next_eligible(&mut self.move_order, &self.players, &self.remaining_players);
            }
            Stage::WaitingForPlayers | Stage::Completed => {}
        }
        debug!(current_turn = ?self.current_turn, "Turn advanced");
    }
}

/// Draws from `order` until it yields a player still in the game.
fn next_eligible(
    order: &mut TurnOrder,
    players: &[PlayerId],
    remaining: &[PlayerId],
) -> Option<PlayerId> {
    if remaining.is_empty() {
        return None;
    }
    order
        .filter_map(|index| players.get(index).copied())
        .find(|player| remaining.contains(player))
}

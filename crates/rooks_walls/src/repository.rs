//! Registry of live games.

use crate::action::GameAction;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{Game, GameId};
use rooks_board::PlayerId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, instrument, warn};

/// Thread-safe map from game id to game.
///
/// Ids increase monotonically and are never reused. Games are never evicted.
/// Cloning yields another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct GameRepository {
    inner: Arc<RepositoryInner>,
}

#[derive(Debug, Default)]
struct RepositoryInner {
    next_id: AtomicU64,
    games: RwLock<HashMap<GameId, Arc<Game>>>,
}

impl GameRepository {
    /// Creates an empty repository.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating game repository");
        Self::default()
    }

    /// Creates and registers a game.
    ///
    /// # Errors
    ///
    /// Returns an error if the game cannot be built for this configuration.
    #[instrument(skip(self))]
    pub fn create_game(&self, config: GameConfig) -> Result<Arc<Game>, GameError> {
        let id = GameId::new(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let game = Arc::new(Game::new(id, config)?);

        self.inner
            .games
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::clone(&game));
        info!(game_id = %id, "Registered game");
        Ok(game)
    }

    /// Creates a game with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the game cannot be built.
    pub fn create_default_game(&self) -> Result<Arc<Game>, GameError> {
        self.create_game(GameConfig::default())
    }

    /// Looks up a game. Returns `None` if no game has this id.
    #[instrument(skip(self))]
    pub fn get(&self, id: GameId) -> Option<Arc<Game>> {
        let game = self
            .inner
            .games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned();
        if game.is_none() {
            debug!(game_id = %id, "Game not found");
        }
        game
    }

    /// Looks up a game.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if no game has this id.
    #[track_caller]
    pub fn game(&self, id: GameId) -> Result<Arc<Game>, GameError> {
        self.get(id)
            .ok_or_else(|| GameError::lookup(format!("Game {id} doesn't exist")))
    }

    /// Joins the game with the given id.
    ///
    /// # Errors
    ///
    /// Returns a lookup error for an unknown game, or a capacity error if it
    /// is full.
    #[instrument(skip(self))]
    pub fn join(&self, id: GameId) -> Result<PlayerId, GameError> {
        self.game(id)
            .inspect_err(|e| warn!(error = %e, "Join on unknown game"))?
            .join_game()
    }

    /// Submits an action to the game with the given id.
    ///
    /// # Errors
    ///
    /// Returns a lookup error for an unknown game, or whatever the game
    /// rejects the action with.
    #[instrument(skip(self))]
    pub fn submit(&self, id: GameId, action: GameAction) -> Result<(), GameError> {
        self.game(id)?.process_action(action)
    }

    /// Number of registered games.
    pub fn len(&self) -> usize {
        self.inner
            .games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if no game was ever created.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

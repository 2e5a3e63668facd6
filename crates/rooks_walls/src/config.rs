//! Game configuration.

use crate::error::GameError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Validated, immutable settings of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
#[serde(try_from = "GameConfigRequest", rename_all = "camelCase")]
pub struct GameConfig {
    /// Players needed before the game starts.
    number_of_players: usize,
    /// Pieces each player places.
    pieces_per_player: usize,
    /// Board height.
    board_rows: i32,
    /// Board width.
    board_columns: i32,
}

impl GameConfig {
    /// Three players, three pieces each, on an 8×8 board.
    pub const DEFAULT: GameConfig = GameConfig {
        number_of_players: 3,
        pieces_per_player: 3,
        board_rows: 8,
        board_columns: 8,
    };

    /// Creates a configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if there are fewer than two players,
    /// fewer than one piece per player, or a non-positive board dimension.
    /// Rosters and total piece counts above `u32::MAX` are also rejected.
    #[track_caller]
    #[instrument]
    pub fn new(
        number_of_players: usize,
        pieces_per_player: usize,
        board_rows: i32,
        board_columns: i32,
    ) -> Result<Self, GameError> {
        if number_of_players < 2 {
            return Err(GameError::configuration("Must have at least 2 players"));
        }
        if pieces_per_player < 1 {
            return Err(GameError::configuration(
                "Must have at least 1 piece per player",
            ));
        }
        if board_rows < 1 || board_columns < 1 {
            return Err(GameError::configuration("Board must have a positive size"));
        }
        // Player and piece ids are u32.
        let id_limit = u32::MAX as usize;
        if number_of_players > id_limit {
            return Err(GameError::configuration(format!(
                "At most {id_limit} players are supported"
            )));
        }
        if number_of_players
            .checked_mul(pieces_per_player)
            .is_none_or(|total| total > id_limit)
        {
            return Err(GameError::configuration(format!(
                "At most {id_limit} pieces in total are supported"
            )));
        }
        Ok(Self {
            number_of_players,
            pieces_per_player,
            board_rows,
            board_columns,
        })
    }

    /// Total pieces placed during the placement stage.
    ///
    /// Construction guarantees the product fits in a `u32`.
    pub fn total_pieces(&self) -> usize {
        self.number_of_players.saturating_mul(self.pieces_per_player)
    }

    /// Loads configuration from a TOML file.
    ///
    /// Missing keys take their default value.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed,
    /// or if the values are invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GameError> {
        debug!("Loading game config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            GameError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let request: GameConfigRequest = toml::from_str(&content).map_err(|e| {
            GameError::configuration(format!("Failed to parse config: {}", e))
        })?;

        let config = request.into_config()?;
        info!(?config, "Game config loaded");
        Ok(config)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Partially specified configuration, as sent by clients creating a game.
///
/// Every field is optional; missing fields fall back to [`GameConfig::DEFAULT`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfigRequest {
    /// Players needed before the game starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_players: Option<usize>,
    /// Pieces each player places.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pieces_per_player: Option<usize>,
    /// Board height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_rows: Option<i32>,
    /// Board width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_columns: Option<i32>,
}

impl GameConfigRequest {
    /// Fills in defaults and validates.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the resulting values are invalid.
    #[track_caller]
    pub fn into_config(self) -> Result<GameConfig, GameError> {
        let defaults = GameConfig::DEFAULT;
        GameConfig::new(
            self.number_of_players.unwrap_or(defaults.number_of_players),
            self.pieces_per_player.unwrap_or(defaults.pieces_per_player),
            self.board_rows.unwrap_or(defaults.board_rows),
            self.board_columns.unwrap_or(defaults.board_columns),
        )
    }
}

impl TryFrom<GameConfigRequest> for GameConfig {
    type Error = GameError;

    fn try_from(request: GameConfigRequest) -> Result<Self, Self::Error> {
        request.into_config()
    }
}

impl From<GameConfig> for GameConfigRequest {
    fn from(config: GameConfig) -> Self {
        Self {
            number_of_players: Some(config.number_of_players),
            pieces_per_player: Some(config.pieces_per_player),
            board_rows: Some(config.board_rows),
            board_columns: Some(config.board_columns),
        }
    }
}

//! Shared fixtures for rooks_walls integration tests.

#![allow(dead_code)]

use rooks_board::{EdgeCoordinate, PieceId, PlayerId, coord};
use rooks_walls::{AddPieceAction, Game, GameConfig, GameRepository, MoveAction};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Installs a test subscriber; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Registers a game and joins every seat.
pub fn full_game(config: GameConfig) -> (Arc<Game>, Vec<PlayerId>) {
    init_tracing();
    let repository = GameRepository::new();
    let game = repository.create_game(config).expect("Failed to create game");
    let players = (0..*config.number_of_players())
        .map(|_| game.join_game().expect("Failed to join"))
        .collect();
    (game, players)
}

/// `(player index, square)` for each placement.
pub type Placement = (usize, (i32, i32));

/// `(player index, piece slot, destination, wall squares)` for each move.
///
/// The slot is the index of the piece among that player's pieces in
/// placement order.
pub type ScriptedMove = (usize, usize, (i32, i32), ((i32, i32), (i32, i32)));

/// Placements of the default three-player game used by the scripts.
pub const DEFAULT_PLACEMENTS: [Placement; 9] = [
    (0, (0, 0)),
    (1, (4, 0)),
    (2, (7, 0)),
    (2, (7, 1)),
    (1, (4, 1)),
    (0, (0, 1)),
    (0, (0, 2)),
    (1, (4, 2)),
    (2, (7, 2)),
];

/// Moves shared by the win and draw scripts up to the first death.
///
/// Player 0's pieces run along row 0 while walls are built under them; the
/// eighth move closes a six-square pocket around player 0's first piece.
pub const MOVES_UNTIL_FIRST_DEATH: [ScriptedMove; 8] = [
    (0, 2, (0, 7), ((0, 0), (1, 0))),
    (1, 2, (4, 7), ((0, 1), (1, 1))),
    (2, 2, (7, 7), ((0, 2), (1, 2))),
    (0, 1, (0, 6), ((0, 3), (1, 3))),
    (1, 1, (4, 6), ((0, 4), (1, 4))),
    (2, 1, (7, 6), ((0, 5), (1, 5))),
    (0, 0, (0, 5), ((0, 6), (1, 6))),
    (1, 0, (4, 5), ((0, 5), (0, 6))),
];

/// Ninth move of the win script: seals row 0 and eliminates player 0.
pub const ELIMINATING_MOVE: ScriptedMove = (2, 0, (7, 5), ((0, 7), (1, 7)));

/// Remaining moves of the win script: players 1 and 2 race back and player
/// 2 walls itself into row 7.
pub const WINNING_FINISH: [ScriptedMove; 8] = [
    (1, 0, (4, 0), ((6, 0), (7, 0))),
    (2, 0, (7, 0), ((6, 1), (7, 1))),
    (1, 1, (4, 1), ((6, 2), (7, 2))),
    (2, 1, (7, 1), ((6, 3), (7, 3))),
    (1, 2, (4, 2), ((6, 4), (7, 4))),
    (2, 2, (7, 2), ((6, 5), (7, 5))),
    (1, 2, (4, 7), ((6, 6), (7, 6))),
    (2, 2, (7, 7), ((6, 7), (7, 7))),
];

/// Draw script: player 0 is eliminated as in the win script, then every
/// surviving piece ends up in row 7 before it is sealed.
pub const DRAWING_MOVES: [ScriptedMove; 17] = [
    (0, 2, (0, 7), ((0, 0), (1, 0))),
    (1, 2, (4, 7), ((0, 1), (1, 1))),
    (2, 2, (7, 3), ((0, 2), (1, 2))),
    (0, 1, (0, 6), ((0, 3), (1, 3))),
    (1, 1, (4, 6), ((0, 4), (1, 4))),
    (2, 1, (7, 2), ((0, 5), (1, 5))),
    (0, 0, (0, 5), ((0, 6), (1, 6))),
    (1, 0, (4, 5), ((0, 5), (0, 6))),
    (2, 0, (7, 1), ((0, 7), (1, 7))),
    (1, 0, (7, 5), ((6, 0), (7, 0))),
    (2, 0, (7, 0), ((6, 1), (7, 1))),
    (1, 1, (7, 6), ((6, 2), (7, 2))),
    (2, 1, (7, 1), ((6, 3), (7, 3))),
    (1, 2, (7, 7), ((6, 4), (7, 4))),
    (2, 2, (7, 2), ((6, 5), (7, 5))),
    (1, 0, (7, 4), ((6, 6), (7, 6))),
    (2, 2, (7, 3), ((6, 7), (7, 7))),
];

/// Builds the edge between two scripted squares.
pub fn edge(squares: ((i32, i32), (i32, i32))) -> EdgeCoordinate {
    let ((r1, c1), (r2, c2)) = squares;
    EdgeCoordinate::new(coord(r1, c1), coord(r2, c2)).expect("Scripted wall is not an edge")
}

/// Drives a game through scripted placements and moves.
pub struct Script<'a> {
    game: &'a Game,
    players: &'a [PlayerId],
    slots: Vec<Vec<PieceId>>,
}

impl<'a> Script<'a> {
    /// Plays every placement and records which pieces belong to whom.
    pub fn place(game: &'a Game, players: &'a [PlayerId], placements: &[Placement]) -> Self {
        for &(player, (row, column)) in placements {
            game.process_action(AddPieceAction::new(players[player], coord(row, column)))
                .unwrap_or_else(|e| panic!("Placement at ({row}, {column}) failed: {e}"));
        }
        let slots = players
            .iter()
            .map(|&player| {
                game.pieces()
                    .iter()
                    .filter(|piece| piece.owner() == player)
                    .map(|piece| piece.id())
                    .collect()
            })
            .collect();
        Self {
            game,
            players,
            slots,
        }
    }

    /// Piece id of a player's slot.
    pub fn piece(&self, player: usize, slot: usize) -> PieceId {
        self.slots[player][slot]
    }

    /// Builds the action for a scripted move.
    pub fn action(&self, step: ScriptedMove) -> MoveAction {
        let (player, slot, (row, column), wall) = step;
        MoveAction::new(
            self.players[player],
            self.piece(player, slot),
            coord(row, column),
            edge(wall),
        )
    }

    /// Plays one scripted move, panicking if it is rejected.
    pub fn play(&self, step: ScriptedMove) {
        self.game
            .process_action(self.action(step))
            .unwrap_or_else(|e| panic!("Move {step:?} failed: {e}"));
    }

    /// Plays several scripted moves.
    pub fn play_all(&self, steps: &[ScriptedMove]) {
        for &step in steps {
            self.play(step);
        }
    }
}

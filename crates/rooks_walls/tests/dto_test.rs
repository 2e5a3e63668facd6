//! Tests for the JSON shapes of requests and snapshots.

mod common;

use common::{DEFAULT_PLACEMENTS, MOVES_UNTIL_FIRST_DEATH, Script, full_game};
use rooks_walls::{GameConfig, GameStateSnapshot};
use serde_json::{Value, json};

#[test]
fn test_snapshot_json_shape() {
    let (game, p) = full_game(GameConfig::default());
    let script = Script::place(&game, &p, &DEFAULT_PLACEMENTS);
    script.play_all(&MOVES_UNTIL_FIRST_DEATH[..1]);

    let json = serde_json::to_value(game.snapshot(p[0]).unwrap()).unwrap();
    assert_eq!(json["gameId"], json!(game.id().get()));
    assert_eq!(
        json["config"],
        json!({"numberOfPlayers": 3, "piecesPerPlayer": 3, "boardRows": 8, "boardColumns": 8})
    );
    assert_eq!(json["stage"], json!("moves"));
    assert_eq!(json["currentTurnPlayerId"], json!(1));
    assert_eq!(json["requestingPlayerId"], json!(0));
    assert_eq!(json["players"], json!([{"id": 0}, {"id": 1}, {"id": 2}]));
    assert_eq!(json["remainingPlayers"], json["players"]);
    assert_eq!(
        json["pieces"][0],
        json!({"id": 0, "owner": 0, "position": {"row": 0, "column": 0}})
    );
    assert_eq!(
        json["walls"],
        json!([{"position": {
            "square1": {"row": 0, "column": 0},
            "square2": {"row": 1, "column": 0}
        }}])
    );
    assert_eq!(json["deadPieces"], json!([]));
}

#[test]
fn test_snapshot_before_start_has_no_current_turn() {
    common::init_tracing();
    let repository = rooks_walls::GameRepository::new();
    let game = repository.create_default_game().unwrap();
    let player = game.join_game().unwrap();

    let json = serde_json::to_value(game.snapshot(player).unwrap()).unwrap();
    assert_eq!(json["stage"], json!("waiting_for_players"));
    assert_eq!(json["currentTurnPlayerId"], Value::Null);
    assert_eq!(json["remainingPlayers"], json!([]));
}

#[test]
fn test_snapshot_deserializes() {
    let (game, p) = full_game(GameConfig::default());
    Script::place(&game, &p, &DEFAULT_PLACEMENTS);
    let snapshot = game.snapshot(p[1]).unwrap();

    let text = serde_json::to_string(&snapshot).unwrap();
    let parsed: GameStateSnapshot = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, snapshot);
}

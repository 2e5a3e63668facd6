//! Tests for game update feeds.

mod common;

use common::{
    DEFAULT_PLACEMENTS, ELIMINATING_MOVE, MOVES_UNTIL_FIRST_DEATH, Script, WINNING_FINISH,
    full_game, init_tracing,
};
use rooks_board::coord;
use rooks_walls::{AddPieceAction, GameConfig, GameRepository, GameUpdate};

#[test]
fn test_join_publishes_update() {
    init_tracing();
    let repository = GameRepository::new();
    let game = repository.create_default_game().unwrap();
    let mut subscription = game.create_subscription();
    assert_eq!(subscription.try_recv(), None);

    game.join_game().unwrap();
    assert_eq!(subscription.try_recv(), Some(GameUpdate));
    assert_eq!(subscription.try_recv(), None);
}

#[test]
fn test_rejected_action_publishes_nothing() {
    let (game, p) = full_game(GameConfig::default());
    let mut subscription = game.create_subscription();

    assert!(
        game.process_action(AddPieceAction::new(p[2], coord(0, 0)))
            .is_err()
    );
    assert_eq!(subscription.try_recv(), None);
}

#[test]
fn test_updates_coalesce_per_subscription() {
    let (game, p) = full_game(GameConfig::default());
    let mut slow = game.create_subscription();
    let mut fast = game.create_subscription();

    game.process_action(AddPieceAction::new(p[0], coord(0, 0)))
        .unwrap();
    assert_eq!(fast.try_recv(), Some(GameUpdate));
    game.process_action(AddPieceAction::new(p[1], coord(0, 1)))
        .unwrap();
    assert_eq!(fast.try_recv(), Some(GameUpdate));

    // Two updates, one pending notification.
    assert_eq!(slow.try_recv(), Some(GameUpdate));
    assert_eq!(slow.try_recv(), None);
    assert!(!slow.is_closed());
}

#[test]
fn test_completion_closes_feeds() {
    let (game, p) = full_game(GameConfig::default());
    let mut subscription = game.create_subscription();
    let script = Script::place(&game, &p, &DEFAULT_PLACEMENTS);
    script.play_all(&MOVES_UNTIL_FIRST_DEATH);
    script.play(ELIMINATING_MOVE);
    script.play_all(&WINNING_FINISH);

    assert!(subscription.is_closed());
    assert_eq!(subscription.try_recv(), Some(GameUpdate));
    assert_eq!(subscription.try_recv(), None);

    let late = game.create_subscription();
    assert!(late.is_closed());
}

#[tokio::test]
async fn test_subscriber_task_sees_updates_until_completion() {
    let (game, p) = full_game(GameConfig::default());
    let mut subscription = game.create_subscription();

    let listener = tokio::spawn(async move {
        let mut updates = 0usize;
        while subscription.recv().await.is_some() {
            updates += 1;
        }
        updates
    });

    let script = Script::place(&game, &p, &DEFAULT_PLACEMENTS);
    script.play_all(&MOVES_UNTIL_FIRST_DEATH);
    script.play(ELIMINATING_MOVE);
    script.play_all(&WINNING_FINISH);

    let updates = listener.await.expect("Listener panicked");
    assert!(updates >= 1, "listener saw no updates");
    assert!(updates <= 26);
}

#[tokio::test]
async fn test_late_subscriber_recv_returns_none() {
    let (game, p) = full_game(GameConfig::default());
    let script = Script::place(&game, &p, &DEFAULT_PLACEMENTS);
    script.play_all(&MOVES_UNTIL_FIRST_DEATH);
    script.play(ELIMINATING_MOVE);
    script.play_all(&WINNING_FINISH);

    let mut late = game.create_subscription();
    assert_eq!(late.recv().await, None);
}

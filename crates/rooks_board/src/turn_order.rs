//! Lazy player turn orders.
//!
//! A [`TurnOrder`] yields player indices. With a turn budget it ends after
//! that many turns, otherwise it never ends. It cannot be rewound; build a
//! new one to start over.

use crate::error::TurnOrderError;
use std::iter::FusedIterator;
use tracing::instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    Sequential { reversed: bool },
    Alternating,
}

/// Iterator over the indices of the players whose turn it is.
#[derive(Debug, Clone)]
pub struct TurnOrder {
    number_of_players: usize,
    total_turns: Option<usize>,
    start_player: usize,
    pattern: Pattern,
    turn: usize,
}

impl TurnOrder {
    /// Round-robin order: `start, start + 1, …` wrapping at `number_of_players`.
    ///
    /// When `reversed`, the order descends instead: for four players starting
    /// at 0 it goes 0, 3, 2, 1, 0, …
    ///
    /// # Errors
    ///
    /// Returns [`TurnOrderError`] if there are no players or `start_player`
    /// is not a valid index.
    #[track_caller]
    #[instrument]
    pub fn sequential(
        number_of_players: usize,
        total_turns: Option<usize>,
        start_player: usize,
        reversed: bool,
    ) -> Result<Self, TurnOrderError> {
        Self::build(
            number_of_players,
            total_turns,
            start_player,
            Pattern::Sequential { reversed },
        )
    }

    /// Snake order: `0, 1, …, n-1, n-1, …, 1, 0` repeated, offset by `start_player`.
    ///
    /// # Errors
    ///
    /// Returns [`TurnOrderError`] if there are no players or `start_player`
    /// is not a valid index.
    #[track_caller]
    #[instrument]
    pub fn alternating(
        number_of_players: usize,
        total_turns: Option<usize>,
        start_player: usize,
    ) -> Result<Self, TurnOrderError> {
        Self::build(number_of_players, total_turns, start_player, Pattern::Alternating)
    }

    #[track_caller]
    fn build(
        number_of_players: usize,
        total_turns: Option<usize>,
        start_player: usize,
        pattern: Pattern,
    ) -> Result<Self, TurnOrderError> {
        if number_of_players == 0 {
            return Err(TurnOrderError::new("Turn order needs at least one player"));
        }
        if start_player >= number_of_players {
            return Err(TurnOrderError::new(format!(
                "start_player must be lesser than number_of_players \
                 ({start_player} >= {number_of_players})"
            )));
        }
        Ok(Self {
            number_of_players,
            total_turns,
            start_player,
            pattern,
            turn: 0,
        })
    }

    /// Number of turns already yielded.
    pub fn turns_taken(&self) -> usize {
        self.turn
    }

    /// True once a finite order has yielded its last turn.
    pub fn is_exhausted(&self) -> bool {
        self.total_turns.is_some_and(|total| self.turn >= total)
    }

    fn index_at(&self, turn: usize) -> usize {
        let n = self.number_of_players;
        let base = match self.pattern {
            Pattern::Sequential { reversed: false } => turn % n,
            Pattern::Sequential { reversed: true } => n - turn % n,
            Pattern::Alternating => {
                let offset = turn % (2 * n);
                if offset < n { offset } else { 2 * n - offset - 1 }
            }
        };
        (base + self.start_player) % n
    }
}

impl Iterator for TurnOrder {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.is_exhausted() {
            return None;
        }
        let index = self.index_at(self.turn);
        self.turn += 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.total_turns {
            Some(total) => {
                let left = total.saturating_sub(self.turn);
                (left, Some(left))
            }
            None => (usize::MAX, None),
        }
    }
}

impl FusedIterator for TurnOrder {}

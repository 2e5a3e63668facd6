//! Step validators: the individual rules a stepped movement is composed of.
//!
//! Every rule answers one question about a single step and returns a
//! [`StepOutcome`]. The movement walker combines the answers of all rules
//! in order.

use crate::board::{Board, Piece};
use crate::coord::{EdgeCoordinate, SquareCoordinate};
use std::fmt;
use std::sync::Arc;
use strum::{Display, EnumIter};

/// Result of validating one step, along two independent axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum StepOutcome {
    /// The square is reachable and the piece may keep going.
    Valid,
    /// The square is not reachable but the piece may keep going.
    Invalid,
    /// The square is reachable but the piece stops here.
    ValidTerminal,
    /// The square is not reachable and the piece stops.
    InvalidTerminal,
}

impl StepOutcome {
    /// Builds the outcome from its two flags.
    pub fn from_flags(valid: bool, terminal: bool) -> Self {
        match (valid, terminal) {
            (true, false) => StepOutcome::Valid,
            (false, false) => StepOutcome::Invalid,
            (true, true) => StepOutcome::ValidTerminal,
            (false, true) => StepOutcome::InvalidTerminal,
        }
    }

    /// Whether the next square is a legal destination.
    pub fn is_valid(self) -> bool {
        matches!(self, StepOutcome::Valid | StepOutcome::ValidTerminal)
    }

    /// Whether the walk in this direction must stop.
    pub fn is_terminal(self) -> bool {
        matches!(self, StepOutcome::ValidTerminal | StepOutcome::InvalidTerminal)
    }
}

/// Everything a rule may inspect about a single step.
#[derive(Debug, Clone, Copy, derive_new::new)]
pub struct StepContext<'a> {
    /// Zero-based index of the step along the current direction.
    pub index: usize,
    /// Square the piece started from.
    pub initial: SquareCoordinate,
    /// Square the step starts from.
    pub current: SquareCoordinate,
    /// Square the step lands on.
    pub next: SquareCoordinate,
    /// Board the piece stands on.
    pub board: &'a Board,
}

/// A single movement rule.
///
/// Closures of the shape `Fn(&StepContext<'_>) -> StepOutcome` are rules too.
pub trait StepValidator: Send + Sync {
    /// Evaluates one step.
    fn validate(&self, step: &StepContext<'_>) -> StepOutcome;
}

impl<F> StepValidator for F
where
    F: Fn(&StepContext<'_>) -> StepOutcome + Send + Sync,
{
    fn validate(&self, step: &StepContext<'_>) -> StepOutcome {
        self(step)
    }
}

/// Caps how many squares a piece may travel in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxSteps(pub usize);

impl StepValidator for MaxSteps {
    fn validate(&self, step: &StepContext<'_>) -> StepOutcome {
        if step.index < self.0 {
            StepOutcome::Valid
        } else {
            StepOutcome::InvalidTerminal
        }
    }
}

/// Stops the walk at the board edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsideBoard;

impl StepValidator for InsideBoard {
    fn validate(&self, step: &StepContext<'_>) -> StepOutcome {
        if step.board.is_inside_board(&step.next) {
            StepOutcome::Valid
        } else {
            StepOutcome::InvalidTerminal
        }
    }
}

type PieceFilter = Arc<dyn Fn(&Piece) -> bool + Send + Sync>;

/// Stops the walk before a square occupied by a live piece.
///
/// With a filter, only pieces the filter accepts block.
#[derive(Clone, Default)]
pub struct BlockedByPieces {
    filter: Option<PieceFilter>,
}

impl BlockedByPieces {
    /// Every live piece blocks.
    pub fn any() -> Self {
        Self { filter: None }
    }

    /// Only pieces accepted by `filter` block.
    pub fn matching<F>(filter: F) -> Self
    where
        F: Fn(&Piece) -> bool + Send + Sync + 'static,
    {
        Self {
            filter: Some(Arc::new(filter)),
        }
    }
}

impl fmt::Debug for BlockedByPieces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockedByPieces")
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}

impl StepValidator for BlockedByPieces {
    fn validate(&self, step: &StepContext<'_>) -> StepOutcome {
        let blocked = step
            .board
            .piece_at(step.next)
            .is_some_and(|piece| self.filter.as_ref().is_none_or(|accepts| accepts(piece)));
        if blocked {
            StepOutcome::InvalidTerminal
        } else {
            StepOutcome::Valid
        }
    }
}

/// Stops the walk at a wall standing between the current and next square.
///
/// Diagonal steps cross no single edge and are never blocked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockedByWalls;

impl StepValidator for BlockedByWalls {
    fn validate(&self, step: &StepContext<'_>) -> StepOutcome {
        let Ok(edge) = EdgeCoordinate::new(step.current, step.next) else {
            return StepOutcome::Valid;
        };
        if step.board.wall_at(&edge).is_some() {
            StepOutcome::InvalidTerminal
        } else {
            StepOutcome::Valid
        }
    }
}

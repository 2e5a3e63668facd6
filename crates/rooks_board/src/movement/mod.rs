//! Movement legality.
//!
//! A [`MovementRules`] value is an ordered list of [`StepValidator`]s plus the
//! directions a piece walks in. Binding it to a square and a board yields a
//! [`SteppedMovement`], which walks each direction one step at a time and
//! collects every square the combined rules accept.

mod validators;

pub use validators::{
    BlockedByPieces, BlockedByWalls, InsideBoard, MaxSteps, StepContext, StepOutcome,
    StepValidator,
};

use crate::board::Board;
use crate::coord::{LINEAR_MOVEMENT_DIRECTIONS, SquareCoordinate, Step};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{instrument, trace};

/// Anything that can tell where a piece may go.
pub trait PieceMovement {
    /// Every square the piece can reach in one move.
    fn possible_destinations(&self) -> HashSet<SquareCoordinate>;

    /// Whether `destination` is one of the possible destinations.
    fn can_move_to(&self, destination: SquareCoordinate) -> bool {
        self.possible_destinations().contains(&destination)
    }
}

/// Directions plus the ordered rules applied at every step.
///
/// Rule sets must contain at least one rule that eventually turns terminal
/// (such as [`InsideBoard`] or [`MaxSteps`]), otherwise a walk never ends.
#[derive(Clone, Default)]
pub struct MovementRules {
    directions: Vec<Step>,
    validators: Vec<Arc<dyn StepValidator>>,
}

impl MovementRules {
    /// Rules over the given directions with no validators yet.
    pub fn new(directions: impl IntoIterator<Item = Step>) -> Self {
        Self {
            directions: directions.into_iter().collect(),
            validators: Vec::new(),
        }
    }

    /// Appends a rule; rules are evaluated in insertion order.
    pub fn with_validator(mut self, validator: impl StepValidator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// The rook: slides orthogonally until the board edge, a piece or a wall.
    pub fn rook() -> Self {
        Self::new(LINEAR_MOVEMENT_DIRECTIONS)
            .with_validator(InsideBoard)
            .with_validator(BlockedByPieces::any())
            .with_validator(BlockedByWalls)
    }

    /// Configured directions.
    pub fn directions(&self) -> &[Step] {
        &self.directions
    }

    /// Combines every rule for one step.
    ///
    /// Valid only if all rules say valid, terminal if any rule says terminal.
    pub fn evaluate(&self, step: &StepContext<'_>) -> StepOutcome {
        let mut valid = true;
        let mut terminal = false;
        for validator in &self.validators {
            let outcome = validator.validate(step);
            valid &= outcome.is_valid();
            terminal |= outcome.is_terminal();
            if !valid && terminal {
                break;
            }
        }
        StepOutcome::from_flags(valid, terminal)
    }

    /// Binds these rules to a starting square on a board.
    pub fn bind<'a>(&'a self, origin: SquareCoordinate, board: &'a Board) -> SteppedMovement<'a> {
        SteppedMovement {
            rules: self,
            origin,
            board,
        }
    }
}

impl fmt::Debug for MovementRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MovementRules")
            .field("directions", &self.directions)
            .field("validators", &self.validators.len())
            .finish()
    }
}

/// Movement rules bound to a square and a board.
#[derive(Debug, Clone, Copy)]
pub struct SteppedMovement<'a> {
    rules: &'a MovementRules,
    origin: SquareCoordinate,
    board: &'a Board,
}

impl PieceMovement for SteppedMovement<'_> {
    #[instrument(skip(self), fields(origin = %self.origin))]
    fn possible_destinations(&self) -> HashSet<SquareCoordinate> {
        let mut destinations = HashSet::new();
        for &direction in self.rules.directions() {
            if direction == Step::new(0, 0) {
                continue;
            }
            let mut current = self.origin;
            let mut index = 0;
            loop {
                let next = direction.take_step(current);
                let step = StepContext::new(index, self.origin, current, next, self.board);
                let outcome = self.rules.evaluate(&step);
                if outcome.is_valid() {
                    destinations.insert(next);
                }
                if outcome.is_terminal() {
                    break;
                }
                index += 1;
                current = next;
            }
        }
        trace!(count = destinations.len(), "Computed destinations");
        destinations
    }
}

/// A piece may go wherever any of the member movements allows.
pub struct MovementUnion<'a> {
    movements: Vec<Box<dyn PieceMovement + 'a>>,
}

impl<'a> MovementUnion<'a> {
    /// Union of the given movements.
    pub fn new(movements: Vec<Box<dyn PieceMovement + 'a>>) -> Self {
        Self { movements }
    }
}

impl PieceMovement for MovementUnion<'_> {
    fn possible_destinations(&self) -> HashSet<SquareCoordinate> {
        self.movements
            .iter()
            .flat_map(|movement| movement.possible_destinations())
            .collect()
    }

    fn can_move_to(&self, destination: SquareCoordinate) -> bool {
        self.movements
            .iter()
            .any(|movement| movement.can_move_to(destination))
    }
}

/// A piece may only go where every member movement allows.
///
/// With no members nothing is reachable.
pub struct MovementIntersection<'a> {
    movements: Vec<Box<dyn PieceMovement + 'a>>,
}

impl<'a> MovementIntersection<'a> {
    /// Intersection of the given movements.
    pub fn new(movements: Vec<Box<dyn PieceMovement + 'a>>) -> Self {
        Self { movements }
    }
}

impl PieceMovement for MovementIntersection<'_> {
    fn possible_destinations(&self) -> HashSet<SquareCoordinate> {
        let mut sets = self
            .movements
            .iter()
            .map(|movement| movement.possible_destinations());
        let Some(first) = sets.next() else {
            return HashSet::new();
        };
        sets.fold(first, |acc, set| acc.intersection(&set).copied().collect())
    }

    fn can_move_to(&self, destination: SquareCoordinate) -> bool {
        !self.movements.is_empty()
            && self
                .movements
                .iter()
                .all(|movement| movement.can_move_to(destination))
    }
}

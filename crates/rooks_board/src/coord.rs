//! Grid coordinates: squares, the edges between them, and step vectors.

use crate::error::CoordinateError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use tracing::instrument;

/// A square on the grid, addressed by row and column.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    derive_new::new,
)]
#[display("({row}, {column})")]
pub struct SquareCoordinate {
    /// Zero-based row.
    pub row: i32,
    /// Zero-based column.
    pub column: i32,
}

/// Shorthand for [`SquareCoordinate::new`].
pub const fn coord(row: i32, column: i32) -> SquareCoordinate {
    SquareCoordinate { row, column }
}

/// Shorthand for [`Step::new`].
pub const fn coord_step(d_row: i32, d_column: i32) -> Step {
    Step { d_row, d_column }
}

impl SquareCoordinate {
    /// True iff `other` is one square away along exactly one axis.
    pub fn is_adjacent_to(&self, other: &SquareCoordinate) -> bool {
        (self.row == other.row && self.column.abs_diff(other.column) == 1)
            || (self.column == other.column && self.row.abs_diff(other.row) == 1)
    }

    /// Edge between this square and the one above it.
    pub fn edge_up(self) -> EdgeCoordinate {
        EdgeCoordinate::between_neighbours(self, self + Step::UP)
    }

    /// Edge between this square and the one below it.
    pub fn edge_down(self) -> EdgeCoordinate {
        EdgeCoordinate::between_neighbours(self, self + Step::DOWN)
    }

    /// Edge between this square and the one to its left.
    pub fn edge_left(self) -> EdgeCoordinate {
        EdgeCoordinate::between_neighbours(self, self + Step::LEFT)
    }

    /// Edge between this square and the one to its right.
    pub fn edge_right(self) -> EdgeCoordinate {
        EdgeCoordinate::between_neighbours(self, self + Step::RIGHT)
    }
}

/// A displacement vector between squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, derive_new::new)]
#[display("[{d_row}, {d_column}]")]
pub struct Step {
    /// Row delta.
    pub d_row: i32,
    /// Column delta.
    pub d_column: i32,
}

impl Step {
    /// One row towards row zero.
    pub const UP: Step = coord_step(-1, 0);
    /// One row away from row zero.
    pub const DOWN: Step = coord_step(1, 0);
    /// One column towards column zero.
    pub const LEFT: Step = coord_step(0, -1);
    /// One column away from column zero.
    pub const RIGHT: Step = coord_step(0, 1);

    /// Applies this step to a square.
    pub fn take_step(self, from: SquareCoordinate) -> SquareCoordinate {
        from + self
    }
}

/// Orthogonal unit steps, the directions a rook slides in.
pub const LINEAR_MOVEMENT_DIRECTIONS: [Step; 4] = [Step::RIGHT, Step::LEFT, Step::DOWN, Step::UP];

/// Diagonal unit steps.
pub const DIAGONAL_MOVEMENT_DIRECTIONS: [Step; 4] = [
    coord_step(1, 1),
    coord_step(1, -1),
    coord_step(-1, 1),
    coord_step(-1, -1),
];

impl Add<Step> for SquareCoordinate {
    type Output = SquareCoordinate;

    fn add(self, step: Step) -> SquareCoordinate {
        coord(self.row + step.d_row, self.column + step.d_column)
    }
}

impl Add<SquareCoordinate> for Step {
    type Output = SquareCoordinate;

    fn add(self, square: SquareCoordinate) -> SquareCoordinate {
        square + self
    }
}

impl Sub<Step> for SquareCoordinate {
    type Output = SquareCoordinate;

    fn sub(self, step: Step) -> SquareCoordinate {
        coord(self.row - step.d_row, self.column - step.d_column)
    }
}

impl Sub for SquareCoordinate {
    type Output = Step;

    fn sub(self, other: SquareCoordinate) -> Step {
        coord_step(self.row - other.row, self.column - other.column)
    }
}

/// The slot between two adjacent squares where a wall can stand.
///
/// The pair is unordered: `edge(a, b) == edge(b, a)` and both hash alike.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Display)]
#[serde(try_from = "EdgeRepr")]
#[display("{square1}-{square2}")]
pub struct EdgeCoordinate {
    square1: SquareCoordinate,
    square2: SquareCoordinate,
}

/// Unvalidated wire shape of an edge.
#[derive(Deserialize)]
struct EdgeRepr {
    square1: SquareCoordinate,
    square2: SquareCoordinate,
}

impl TryFrom<EdgeRepr> for EdgeCoordinate {
    type Error = CoordinateError;

    fn try_from(repr: EdgeRepr) -> Result<Self, Self::Error> {
        EdgeCoordinate::new(repr.square1, repr.square2)
    }
}

impl EdgeCoordinate {
    /// Creates the edge between two squares.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] if the squares are not adjacent.
    #[track_caller]
    #[instrument]
    pub fn new(
        square1: SquareCoordinate,
        square2: SquareCoordinate,
    ) -> Result<Self, CoordinateError> {
        if !square1.is_adjacent_to(&square2) {
            return Err(CoordinateError::new(format!(
                "EdgeCoordinate between {square1} and {square2} is invalid: \
                 squares are not adjacent"
            )));
        }
        Ok(Self { square1, square2 })
    }

    fn between_neighbours(square1: SquareCoordinate, square2: SquareCoordinate) -> Self {
        debug_assert!(square1.is_adjacent_to(&square2));
        Self { square1, square2 }
    }

    /// First square, as given at construction.
    pub fn square1(&self) -> SquareCoordinate {
        self.square1
    }

    /// Second square, as given at construction.
    pub fn square2(&self) -> SquareCoordinate {
        self.square2
    }

    /// Both squares, smallest first.
    pub fn ordered(&self) -> (SquareCoordinate, SquareCoordinate) {
        if self.square1 <= self.square2 {
            (self.square1, self.square2)
        } else {
            (self.square2, self.square1)
        }
    }

    /// True if `square` is one of the two sides of this edge.
    pub fn touches(&self, square: SquareCoordinate) -> bool {
        self.square1 == square || self.square2 == square
    }
}

impl PartialEq for EdgeCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.ordered() == other.ordered()
    }
}

impl Eq for EdgeCoordinate {}

impl Hash for EdgeCoordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordered().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_is_adjacent_to() {
        let square = coord(5, 5);
        assert!(square.is_adjacent_to(&coord(5, 4)));
        assert!(square.is_adjacent_to(&coord(5, 6)));
        assert!(square.is_adjacent_to(&coord(4, 5)));
        assert!(square.is_adjacent_to(&coord(6, 5)));
        assert!(!square.is_adjacent_to(&coord(5, 5)));
        assert!(!square.is_adjacent_to(&coord(6, 6)));
        assert!(!square.is_adjacent_to(&coord(7, 3)));
    }

    #[test]
    fn test_edge_rejects_non_adjacent_squares() {
        let result = EdgeCoordinate::new(coord(2, 5), coord(3, 6));
        assert!(result.is_err());
    }

    #[test]
    fn test_edge_equality_is_symmetric() {
        let a = EdgeCoordinate::new(coord(4, 2), coord(3, 2)).unwrap();
        let b = EdgeCoordinate::new(coord(3, 2), coord(4, 2)).unwrap();
        let c = EdgeCoordinate::new(coord(4, 2), coord(5, 2)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_square_arithmetic() {
        assert_eq!(coord(1, 5) + coord_step(2, 3), coord(3, 8));
        assert_eq!(coord_step(1, -4) + coord(2, 2), coord(3, -2));
        assert_eq!(coord(10, 0) - coord(6, -2), coord_step(4, 2));
        assert_eq!(coord(3, 3) - coord_step(1, 1), coord(2, 2));
    }

    #[test]
    fn test_edge_shortcuts() {
        let down = EdgeCoordinate::new(coord(3, 5), coord(4, 5)).unwrap();
        assert_eq!(coord(3, 5).edge_down(), down);
        assert_eq!(coord(4, 5).edge_up(), down);

        let right = EdgeCoordinate::new(coord(3, 5), coord(3, 6)).unwrap();
        assert_eq!(coord(3, 5).edge_right(), right);
        assert_eq!(coord(3, 6).edge_left(), right);
    }

    #[test]
    fn test_edge_deserialization_validates_adjacency() {
        let valid = r#"{"square1":{"row":0,"column":0},"square2":{"row":0,"column":1}}"#;
        let edge: EdgeCoordinate = serde_json::from_str(valid).unwrap();
        assert_eq!(edge, coord(0, 0).edge_right());

        let invalid = r#"{"square1":{"row":0,"column":0},"square2":{"row":2,"column":1}}"#;
        assert!(serde_json::from_str::<EdgeCoordinate>(invalid).is_err());
    }

    proptest! {
        #[test]
        fn prop_edge_constructs_iff_adjacent(
            r1 in -20i32..20, c1 in -20i32..20, r2 in -20i32..20, c2 in -20i32..20,
        ) {
            let a = coord(r1, c1);
            let b = coord(r2, c2);
            let edge = EdgeCoordinate::new(a, b);
            prop_assert_eq!(edge.is_ok(), a.is_adjacent_to(&b));
            if let Ok(edge) = edge {
                prop_assert_eq!(edge, EdgeCoordinate::new(b, a).unwrap());
            }
        }

        #[test]
        fn prop_neighbour_steps_are_adjacent(r in -50i32..50, c in -50i32..50) {
            let square = coord(r, c);
            for step in LINEAR_MOVEMENT_DIRECTIONS {
                prop_assert!(square.is_adjacent_to(&(square + step)));
            }
            for step in DIAGONAL_MOVEMENT_DIRECTIONS {
                prop_assert!(!square.is_adjacent_to(&(square + step)));
            }
        }
    }
}

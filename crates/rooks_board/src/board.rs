//! The grid board: bounds, pieces, walls and region analysis.

use crate::coord::{EdgeCoordinate, LINEAR_MOVEMENT_DIRECTIONS, SquareCoordinate};
use crate::ids::{PieceId, PlayerId};
use crate::movement::{MovementRules, SteppedMovement};
use derive_more::From;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Regions with this many squares or fewer are kill zones.
pub const DEAD_ZONE_THRESHOLD: usize = 8;

/// A position type that can be checked against board bounds.
pub trait GridPosition {
    /// Whether the position lies inside a `rows` × `columns` grid.
    fn lies_within(&self, rows: i32, columns: i32) -> bool;
}

impl GridPosition for SquareCoordinate {
    fn lies_within(&self, rows: i32, columns: i32) -> bool {
        (0..rows).contains(&self.row) && (0..columns).contains(&self.column)
    }
}

impl GridPosition for EdgeCoordinate {
    fn lies_within(&self, rows: i32, columns: i32) -> bool {
        self.square1().lies_within(rows, columns) && self.square2().lies_within(rows, columns)
    }
}

/// A wall segment standing on an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, From, derive_new::new)]
pub struct Wall {
    position: EdgeCoordinate,
}

impl Wall {
    /// Edge the wall stands on.
    pub fn position(&self) -> EdgeCoordinate {
        self.position
    }
}

/// A rook owned by a player.
#[derive(Debug, Clone)]
pub struct Piece {
    id: PieceId,
    owner: PlayerId,
    position: SquareCoordinate,
    movement: MovementRules,
}

impl Piece {
    /// Creates a piece that moves like a rook.
    pub fn new(id: PieceId, owner: PlayerId, position: SquareCoordinate) -> Self {
        Self::with_movement(id, owner, position, MovementRules::rook())
    }

    /// Creates a piece with custom movement rules.
    pub fn with_movement(
        id: PieceId,
        owner: PlayerId,
        position: SquareCoordinate,
        movement: MovementRules,
    ) -> Self {
        Self {
            id,
            owner,
            position,
            movement,
        }
    }

    /// Piece identifier.
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Owning player.
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Current square.
    pub fn position(&self) -> SquareCoordinate {
        self.position
    }

    /// Movement rules of this piece bound to its square on `board`.
    pub fn movement<'a>(&'a self, board: &'a Board) -> SteppedMovement<'a> {
        self.movement.bind(self.position, board)
    }
}

/// Bounded grid holding live pieces, walls and dead pieces.
///
/// Mutators do not validate; callers check bounds and occupancy first.
#[derive(Debug, Clone)]
pub struct Board {
    rows: i32,
    columns: i32,
    pieces: Vec<Piece>,
    walls: Vec<Wall>,
    dead_pieces: Vec<Piece>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(rows: i32, columns: i32) -> Self {
        Self {
            rows,
            columns,
            pieces: Vec::new(),
            walls: Vec::new(),
            dead_pieces: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Whether a square or edge lies on the board.
    pub fn is_inside_board<P: GridPosition>(&self, position: &P) -> bool {
        position.lies_within(self.rows, self.columns)
    }

    /// Every square, in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = SquareCoordinate> + use<> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| {
            (0..columns).map(move |column| SquareCoordinate::new(row, column))
        })
    }

    /// Every square as a set.
    pub fn all_positions(&self) -> HashSet<SquareCoordinate> {
        self.positions().collect()
    }

    /// Live pieces in placement order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Walls in placement order.
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Dead pieces in order of death.
    pub fn dead_pieces(&self) -> &[Piece] {
        &self.dead_pieces
    }

    /// Live piece with the given id.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.id == id)
    }

    /// Dead piece with the given id.
    pub fn dead_piece(&self, id: PieceId) -> Option<&Piece> {
        self.dead_pieces.iter().find(|piece| piece.id == id)
    }

    /// Live piece standing on `position`.
    pub fn piece_at(&self, position: SquareCoordinate) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.position == position)
    }

    /// Wall standing on `position`.
    pub fn wall_at(&self, position: &EdgeCoordinate) -> Option<&Wall> {
        self.walls.iter().find(|wall| wall.position == *position)
    }

    /// Places a piece.
    pub fn add_piece(&mut self, piece: Piece) {
        debug_assert!(self.is_inside_board(&piece.position));
        debug_assert!(self.piece_at(piece.position).is_none());
        self.pieces.push(piece);
    }

    /// Erects a wall.
    pub fn add_wall(&mut self, wall: Wall) {
        debug_assert!(self.is_inside_board(&wall.position));
        debug_assert!(self.wall_at(&wall.position).is_none());
        self.walls.push(wall);
    }

    /// Relocates a live piece. Returns false if no such live piece exists.
    pub fn move_piece(&mut self, id: PieceId, destination: SquareCoordinate) -> bool {
        match self.pieces.iter_mut().find(|piece| piece.id == id) {
            Some(piece) => {
                piece.position = destination;
                true
            }
            None => false,
        }
    }

    /// Partitions the board into maximal wall-free connected regions.
    ///
    /// The regions are disjoint and together cover every square once.
    #[instrument(
        skip(self),
        fields(rows = self.rows, columns = self.columns, walls = self.walls.len())
    )]
    pub fn slice_into_regions(&self) -> Vec<HashSet<SquareCoordinate>> {
        let walls: HashSet<EdgeCoordinate> = self.walls.iter().map(|wall| wall.position).collect();
        let mut visited = HashSet::new();
        let mut regions = Vec::new();

        for start in self.positions() {
            if !visited.insert(start) {
                continue;
            }

            let mut region = HashSet::new();
            let mut stack = vec![start];
            while let Some(square) = stack.pop() {
                region.insert(square);
                for next in self.connected_to(square, &walls) {
                    if visited.insert(next) {
                        stack.push(next);
                    }
                }
            }
            regions.push(region);
        }

        debug!(count = regions.len(), "Sliced board into regions");
        regions
    }

    fn connected_to<'a>(
        &'a self,
        square: SquareCoordinate,
        walls: &'a HashSet<EdgeCoordinate>,
    ) -> impl Iterator<Item = SquareCoordinate> + 'a {
        LINEAR_MOVEMENT_DIRECTIONS
            .into_iter()
            .map(move |direction| square + direction)
            .filter(move |next| self.is_inside_board(next))
            .filter(move |&next| {
                EdgeCoordinate::new(square, next).is_ok_and(|edge| !walls.contains(&edge))
            })
    }

    /// Union of every region no larger than `threshold`.
    pub fn dead_zones(&self, threshold: usize) -> HashSet<SquareCoordinate> {
        self.slice_into_regions()
            .into_iter()
            .filter(|region| region.len() <= threshold)
            .flatten()
            .collect()
    }

    /// Moves every live piece standing in a kill zone to the dead pieces.
    ///
    /// Returns the ids of the pieces that died, in placement order.
    #[instrument(skip(self))]
    pub fn bury_trapped_pieces(&mut self) -> Vec<PieceId> {
        let dead_zones = self.dead_zones(DEAD_ZONE_THRESHOLD);
        if dead_zones.is_empty() {
            return Vec::new();
        }

        let (trapped, alive): (Vec<Piece>, Vec<Piece>) = std::mem::take(&mut self.pieces)
            .into_iter()
            .partition(|piece| dead_zones.contains(&piece.position));
        self.pieces = alive;

        let ids: Vec<PieceId> = trapped.iter().map(Piece::id).collect();
        if !ids.is_empty() {
            debug!(?ids, "Pieces trapped in dead zones");
        }
        self.dead_pieces.extend(trapped);
        ids
    }
}

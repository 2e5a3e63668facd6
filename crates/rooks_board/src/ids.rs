//! Per-entity identifiers.
//!
//! Each entity gets its own nominal wrapper so a piece id can never be
//! passed where a player id is expected.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Identifier of a player within one game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[serde(transparent)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Wraps a raw player number.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw player number.
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Identifier of a piece within one game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[serde(transparent)]
pub struct PieceId(u32);

impl PieceId {
    /// Wraps a raw piece number.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw piece number.
    pub const fn get(self) -> u32 {
        self.0
    }
}

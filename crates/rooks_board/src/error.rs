//! Error types for board geometry and turn sequencing.

use derive_more::{Display, Error};
use tracing::instrument;

/// Invalid coordinate construction, such as an edge between non-adjacent squares.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Coordinate error: {} at {}:{}", message, file, line)]
pub struct CoordinateError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl CoordinateError {
    /// Creates a new coordinate error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Invalid arguments passed to a turn order generator.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Turn order error: {} at {}:{}", message, file, line)]
pub struct TurnOrderError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl TurnOrderError {
    /// Creates a new turn order error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

//! Document coordinates: positions and normalized ranges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(row, column)` coordinate in a document.
///
/// Rows and columns are zero-based. Columns count characters, not bytes, and
/// a column equal to the line length denotes the slot past the last
/// character. Positions order row-first, so `(1, 0) > (0, 99)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    /// The start of any document.
    pub const ORIGIN: Position = Position { row: 0, column: 0 };

    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A span between two positions, kept normalized so that
/// `start() <= end()` no matter the corner order at construction or in
/// decoded data.
///
/// The span is half-open in spirit: `start` addresses the first character
/// covered and `end` the slot just past the last one. A range whose ends
/// coincide covers nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    start: Position,
    end: Position,
}

impl Range {
    /// Builds a range from two corners, swapping them if given out of order.
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// True when the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// Decoded corners pass through `new`, so a swapped pair on the wire
// still normalizes.
impl<'de> Deserialize<'de> for Range {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Corners {
            start: Position,
            end: Position,
        }

        let corners = Corners::deserialize(deserializer)?;
        Ok(Range::new(corners.start, corners.end))
    }
}

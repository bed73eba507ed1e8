//! Typed errors for buffer, session, and plugin operations.

use crate::model::position::{Position, Range};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EditError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// A position addressed a row or column outside the current document.
    #[error("position {0} is outside the document")]
    InvalidPosition(Position),

    /// A range endpoint addressed content outside the current document.
    #[error("range {0} is outside the document")]
    InvalidRange(Range),

    /// An operation that requires an active selection found none.
    #[error("no active selection")]
    EmptySelection,

    /// A line interval was descending or overran the document.
    #[error("line range {start}..{end} is not valid for a document of {line_count} lines")]
    InvalidLineRange {
        start: usize,
        end: usize,
        line_count: usize,
    },
}

//! Reversible edit commands recorded by buffer mutations.

use crate::model::buffer::TextBuffer;
use crate::model::position::{Position, Range};
use serde::{Deserialize, Serialize};

/// One recorded buffer mutation, carrying everything needed to replay it in
/// either direction without consulting live buffer state at replay time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditCommand {
    /// Text spliced in at `at`. `end` is the cursor slot just past the
    /// inserted text, so reverting deletes `at..end`.
    Insert {
        at: Position,
        end: Position,
        text: String,
    },
    /// Text removed from `range`. `cursor` is where the caret sat when the
    /// delete was issued and is restored on revert; the forward direction
    /// leaves the caret at `range.start()`.
    Delete {
        range: Range,
        text: String,
        cursor: Position,
    },
}

impl EditCommand {
    /// Replays the command forward (the redo direction).
    ///
    /// A command whose coordinates no longer fit the document indicates a
    /// corrupted history; it is skipped with a warning rather than applied
    /// partially.
    pub(crate) fn apply(&self, buffer: &mut TextBuffer) {
        match self {
            EditCommand::Insert { at, text, .. } => {
                if buffer.check_position(*at).is_err() {
                    tracing::warn!("EditCommand::apply: insert point {} is out of bounds", at);
                    return;
                }
                buffer.commit_insert(*at, text);
            }
            EditCommand::Delete { range, .. } => {
                if buffer.check_range(*range).is_err() {
                    tracing::warn!("EditCommand::apply: delete range {} is out of bounds", range);
                    return;
                }
                buffer.commit_delete(*range);
            }
        }
    }

    /// Replays the command backward (the undo direction).
    pub(crate) fn revert(&self, buffer: &mut TextBuffer) {
        match self {
            EditCommand::Insert { at, end, .. } => {
                let span = Range::new(*at, *end);
                if buffer.check_range(span).is_err() {
                    tracing::warn!("EditCommand::revert: insert span {} is out of bounds", span);
                    return;
                }
                buffer.commit_delete(span);
            }
            EditCommand::Delete {
                range,
                text,
                cursor,
            } => {
                if buffer.check_position(range.start()).is_err() {
                    tracing::warn!(
                        "EditCommand::revert: reinsertion point {} is out of bounds",
                        range.start()
                    );
                    return;
                }
                buffer.commit_insert(range.start(), text);
                // The captured caret is valid whenever the history is
                // consistent; a forged command may carry garbage.
                if buffer.check_position(*cursor).is_ok() {
                    buffer.set_cursor_notify(*cursor);
                } else {
                    tracing::warn!("EditCommand::revert: captured cursor {} is out of bounds", cursor);
                }
            }
        }
    }
}

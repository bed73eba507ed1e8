//! The line-oriented text buffer at the heart of the crate.
//!
//! A document is a non-empty vector of lines, a cursor, and an optional
//! selection. Mutations go through [`TextBuffer::insert`] and the delete
//! family, which record an inverse [`EditCommand`] into the caller's
//! [`UndoEngine`] before observers are told about the change. Replay reaches
//! the same splice primitives through crate-internal entry points that do not
//! record, so undoing can never grow the history it is unwinding.

use crate::error::{EditError, Result};
use crate::model::command::EditCommand;
use crate::model::position::{Position, Range};
use crate::model::undo::UndoEngine;
use crate::observers::{SubscriberId, Subscribers};

/// Tabs are expanded to four spaces at load and insert time; the buffer
/// never stores a raw `\t`.
const TAB_EXPANSION: &str = "    ";

fn expand_tabs(text: &str) -> String {
    text.replace('\t', TAB_EXPANSION)
}

/// Length of a line in characters. Columns count characters, so this is the
/// largest valid cursor column on the line.
fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Byte offset of the given character column, for slicing line content.
fn byte_index(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map(|(index, _)| index)
        .unwrap_or(line.len())
}

/// An in-memory, line-oriented document with cursor, selection, and change
/// observers.
///
/// The line vector is never empty; an empty document is one empty line.
/// The cursor always addresses a valid slot (`row < line_count`,
/// `column <= line_len(row)`), and a stored selection covers only existing
/// content. Every committed mutation, whether user-initiated or replayed by
/// undo/redo, clears the selection and notifies observers.
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: Position,
    selection: Option<Range>,
    cursor_observers: Subscribers<Position>,
    text_observers: Subscribers<[String]>,
    selection_observers: Subscribers<Option<Range>>,
}

impl TextBuffer {
    /// Builds a buffer from a `\n`-separated text blob.
    ///
    /// Trailing separators are preserved: `"a\n"` loads as two lines, the
    /// second empty. Tabs are expanded before splitting. The cursor starts
    /// at the end of the document.
    pub fn from_text(text: &str) -> Self {
        let expanded = expand_tabs(text);
        let lines: Vec<String> = expanded.split('\n').map(str::to_string).collect();
        let last = lines.len() - 1;
        let cursor = Position::new(last, char_len(&lines[last]));
        tracing::debug!("TextBuffer::from_text: {} lines", lines.len());
        Self {
            lines,
            cursor,
            selection: None,
            cursor_observers: Subscribers::new(),
            text_observers: Subscribers::new(),
            selection_observers: Subscribers::new(),
        }
    }

    /// A buffer holding a single empty line.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    // ------------------------------------------------------------------
    // Read surface
    // ------------------------------------------------------------------

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Length of a line in characters, or 0 for a row that does not exist.
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |line| char_len(line))
    }

    /// Read-only view of the line vector.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Iterates over every line in order.
    pub fn all_lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(String::as_str)
    }

    /// Iterates over the half-open row interval `start..end`.
    pub fn lines_range(&self, start: usize, end: usize) -> Result<impl Iterator<Item = &str> + '_> {
        if end < start || end > self.lines.len() {
            return Err(EditError::InvalidLineRange {
                start,
                end,
                line_count: self.lines.len(),
            });
        }
        Ok(self.lines[start..end].iter().map(String::as_str))
    }

    /// The whole document as one string, lines joined by `\n` with no
    /// trailing separator. This is the save format.
    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn selection(&self) -> Option<Range> {
        self.selection
    }

    /// The slot just past the last character of the document.
    pub fn end_position(&self) -> Position {
        // lines is never empty, so last row always exists.
        let last = self.lines.len() - 1;
        Position::new(last, char_len(&self.lines[last]))
    }

    /// The text covered by `range`, rows joined by `\n`.
    pub fn text_in_range(&self, range: Range) -> Result<String> {
        self.check_range(range)?;
        Ok(self.extract(range))
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Registers a callback invoked with the cursor position after every
    /// cursor move, including moves caused by edits and replay.
    pub fn subscribe_cursor(&mut self, callback: impl Fn(&Position) + 'static) -> SubscriberId {
        self.cursor_observers.subscribe(callback)
    }

    pub fn unsubscribe_cursor(&mut self, id: SubscriberId) -> bool {
        self.cursor_observers.unsubscribe(id)
    }

    /// Registers a callback invoked with the new line vector after every
    /// committed text mutation.
    pub fn subscribe_text(&mut self, callback: impl Fn(&[String]) + 'static) -> SubscriberId {
        self.text_observers.subscribe(callback)
    }

    pub fn unsubscribe_text(&mut self, id: SubscriberId) -> bool {
        self.text_observers.unsubscribe(id)
    }

    /// Registers a callback invoked with the new selection (possibly `None`)
    /// whenever it changes.
    pub fn subscribe_selection(
        &mut self,
        callback: impl Fn(&Option<Range>) + 'static,
    ) -> SubscriberId {
        self.selection_observers.subscribe(callback)
    }

    pub fn unsubscribe_selection(&mut self, id: SubscriberId) -> bool {
        self.selection_observers.unsubscribe(id)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Inserts text at the cursor, recording the inverse into `undo`.
    ///
    /// Line breaks in `text` split the current line; tabs are expanded
    /// first. The cursor lands just past the inserted text and its new
    /// position is returned. An empty string changes nothing and records
    /// nothing.
    pub fn insert(&mut self, text: &str, undo: &mut UndoEngine) -> Position {
        if text.is_empty() {
            return self.cursor;
        }
        let text = expand_tabs(text);
        let at = self.cursor;
        let end = self.splice_in(at, &text);
        tracing::debug!("TextBuffer::insert: {} bytes at {}", text.len(), at);
        undo.push(EditCommand::Insert { at, end, text });
        self.finish_edit(end);
        end
    }

    /// Inserts a single character at the cursor.
    pub fn insert_char(&mut self, ch: char, undo: &mut UndoEngine) -> Position {
        let mut encoded = [0u8; 4];
        self.insert(ch.encode_utf8(&mut encoded), undo)
    }

    /// Removes the text covered by `range`, recording the inverse into
    /// `undo`. The cursor lands at the start of the removed span. An empty
    /// range changes nothing and records nothing.
    pub fn delete_range(&mut self, range: Range, undo: &mut UndoEngine) -> Result<()> {
        self.check_range(range)?;
        self.delete_valid(range, undo);
        Ok(())
    }

    /// Removes the character before the cursor, joining lines when the
    /// cursor sits at a line start. Does nothing at the document start.
    pub fn delete_before(&mut self, undo: &mut UndoEngine) {
        let cursor = self.cursor;
        let target = if cursor.column > 0 {
            Position::new(cursor.row, cursor.column - 1)
        } else if cursor.row > 0 {
            Position::new(cursor.row - 1, self.line_len(cursor.row - 1))
        } else {
            return;
        };
        self.delete_valid(Range::new(target, cursor), undo);
    }

    /// Removes the character after the cursor, joining lines when the
    /// cursor sits at a line end. Does nothing at the document end.
    pub fn delete_after(&mut self, undo: &mut UndoEngine) {
        let cursor = self.cursor;
        let target = if cursor.column < self.line_len(cursor.row) {
            Position::new(cursor.row, cursor.column + 1)
        } else if cursor.row + 1 < self.lines.len() {
            Position::new(cursor.row + 1, 0)
        } else {
            return;
        };
        self.delete_valid(Range::new(cursor, target), undo);
    }

    /// Delete with coordinates the caller has already validated.
    pub(crate) fn delete_valid(&mut self, range: Range, undo: &mut UndoEngine) {
        if range.is_empty() {
            return;
        }
        // Capture before the splice so the inverse is exact.
        let removed = self.extract(range);
        tracing::debug!("TextBuffer::delete: {} bytes spanning {}", removed.len(), range);
        undo.push(EditCommand::Delete {
            range,
            text: removed,
            cursor: self.cursor,
        });
        self.splice_out(range);
        self.finish_edit(range.start());
    }

    // ------------------------------------------------------------------
    // Cursor motion
    // ------------------------------------------------------------------

    /// Places the cursor at an arbitrary valid position. The selection is
    /// left alone; directional moves are the ones that clear it.
    pub fn move_cursor(&mut self, position: Position) -> Result<()> {
        self.check_position(position)?;
        self.set_cursor_notify(position);
        Ok(())
    }

    /// One step left, wrapping to the end of the previous line. Clears the
    /// selection even when the cursor is already at the document start.
    pub fn move_left(&mut self) {
        let target = self.step_left();
        self.apply_motion(target);
    }

    /// One step right, wrapping to the start of the next line.
    pub fn move_right(&mut self) {
        let target = self.step_right();
        self.apply_motion(target);
    }

    /// One row up, clamping the column to the shorter line.
    pub fn move_up(&mut self) {
        let target = self.step_up();
        self.apply_motion(target);
    }

    /// One row down, clamping the column to the shorter line.
    pub fn move_down(&mut self) {
        let target = self.step_down();
        self.apply_motion(target);
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Replaces the selection.
    ///
    /// Setting the range the buffer already holds clears it instead, as
    /// does an empty range; `None` over `None` changes nothing and stays
    /// silent. Every other outcome notifies selection observers.
    pub fn set_selection(&mut self, selection: Option<Range>) -> Result<()> {
        if let Some(range) = selection {
            self.check_range(range)?;
        }
        self.set_selection_unchecked(selection);
        Ok(())
    }

    /// Moves one step left and grows or shrinks the selection to the
    /// cursor. With no selection the step becomes the selected span.
    pub fn select_left(&mut self) {
        let before = self.cursor;
        let after = self.step_left();
        if after == before {
            return;
        }
        self.set_cursor_notify(after);
        let next = match self.selection {
            None => Range::new(after, before),
            Some(selection) => {
                if after > selection.start() {
                    Range::new(selection.start(), after)
                } else {
                    Range::new(after, selection.end())
                }
            }
        };
        self.set_selection_unchecked(Some(next));
    }

    /// Moves one step right and grows or shrinks the selection to the
    /// cursor.
    pub fn select_right(&mut self) {
        let before = self.cursor;
        let after = self.step_right();
        if after == before {
            return;
        }
        self.set_cursor_notify(after);
        let next = match self.selection {
            None => Range::new(before, after),
            Some(selection) => {
                if after < selection.end() {
                    Range::new(after, selection.end())
                } else {
                    Range::new(selection.start(), after)
                }
            }
        };
        self.set_selection_unchecked(Some(next));
    }

    /// Moves one row up and extends the selection by the traversed span.
    pub fn select_up(&mut self) {
        let before = self.cursor;
        let after = self.step_up();
        if after == before {
            return;
        }
        self.set_cursor_notify(after);
        let next = match self.selection {
            None => Range::new(after, before),
            Some(selection) => {
                if after > selection.start() {
                    Range::new(selection.start(), after)
                } else if selection.start().row == after.row {
                    Range::new(after, selection.start())
                } else {
                    Range::new(after, selection.end())
                }
            }
        };
        self.set_selection_unchecked(Some(next));
    }

    /// Moves one row down and extends the selection by the traversed span.
    pub fn select_down(&mut self) {
        let before = self.cursor;
        let after = self.step_down();
        if after == before {
            return;
        }
        self.set_cursor_notify(after);
        let next = match self.selection {
            None => Range::new(before, after),
            Some(selection) => {
                if after > selection.end() {
                    if selection.end().row == after.row {
                        Range::new(selection.end(), after)
                    } else {
                        Range::new(selection.start(), after)
                    }
                } else {
                    Range::new(after, selection.end())
                }
            }
        };
        self.set_selection_unchecked(Some(next));
    }

    // ------------------------------------------------------------------
    // Crate-internal machinery
    // ------------------------------------------------------------------

    pub(crate) fn check_position(&self, position: Position) -> Result<()> {
        if position.row >= self.lines.len()
            || position.column > char_len(&self.lines[position.row])
        {
            return Err(EditError::InvalidPosition(position));
        }
        Ok(())
    }

    pub(crate) fn check_range(&self, range: Range) -> Result<()> {
        if self.check_position(range.start()).is_err() || self.check_position(range.end()).is_err()
        {
            return Err(EditError::InvalidRange(range));
        }
        Ok(())
    }

    /// Extracts covered text without validating; the extraction copy also
    /// serves as the captured inverse for deletes.
    pub(crate) fn extract(&self, range: Range) -> String {
        let start = range.start();
        let end = range.end();
        if start.row == end.row {
            let line = &self.lines[start.row];
            return line[byte_index(line, start.column)..byte_index(line, end.column)].to_string();
        }
        let mut out = String::new();
        let first = &self.lines[start.row];
        out.push_str(&first[byte_index(first, start.column)..]);
        for row in start.row + 1..end.row {
            out.push('\n');
            out.push_str(&self.lines[row]);
        }
        out.push('\n');
        let last = &self.lines[end.row];
        out.push_str(&last[..byte_index(last, end.column)]);
        out
    }

    /// Non-recording insert used by replay.
    pub(crate) fn commit_insert(&mut self, at: Position, text: &str) -> Position {
        let end = self.splice_in(at, text);
        self.finish_edit(end);
        end
    }

    /// Non-recording delete used by replay.
    pub(crate) fn commit_delete(&mut self, range: Range) {
        self.splice_out(range);
        self.finish_edit(range.start());
    }

    pub(crate) fn set_cursor_notify(&mut self, position: Position) {
        self.cursor = position;
        self.cursor_observers.notify(&position);
    }

    /// Clears the selection, notifying only if one was present.
    pub(crate) fn drop_selection(&mut self) {
        if self.selection.take().is_some() {
            self.selection_observers.notify(&None);
        }
    }

    // ------------------------------------------------------------------
    // Private helpers
    // ------------------------------------------------------------------

    /// Splices `text` into the line structure at `at` and returns the
    /// position just past it. Pure structure change: no cursor, selection,
    /// or observer effects.
    fn splice_in(&mut self, at: Position, text: &str) -> Position {
        let line = &self.lines[at.row];
        let split = byte_index(line, at.column);
        let tail = line[split..].to_string();
        let merged = format!("{}{}{}", &line[..split], text, tail);
        let fragments: Vec<String> = merged.split('\n').map(str::to_string).collect();
        let end = if fragments.len() == 1 {
            Position::new(at.row, at.column + char_len(text))
        } else {
            let last = &fragments[fragments.len() - 1];
            Position::new(at.row + fragments.len() - 1, char_len(last) - char_len(&tail))
        };
        self.lines.splice(at.row..=at.row, fragments);
        end
    }

    /// Removes the covered span, merging the boundary lines. Pure structure
    /// change like `splice_in`.
    fn splice_out(&mut self, range: Range) {
        let start = range.start();
        let end = range.end();
        let head = {
            let line = &self.lines[start.row];
            line[..byte_index(line, start.column)].to_string()
        };
        let tail = {
            let line = &self.lines[end.row];
            line[byte_index(line, end.column)..].to_string()
        };
        self.lines
            .splice(start.row..=end.row, std::iter::once(head + &tail));
    }

    /// Shared tail of every committed mutation: cursor first, then text,
    /// then the selection cleanup, matching the order observers see.
    fn finish_edit(&mut self, cursor_after: Position) {
        self.cursor = cursor_after;
        self.cursor_observers.notify(&cursor_after);
        self.text_observers.notify(&self.lines);
        self.drop_selection();
    }

    fn apply_motion(&mut self, target: Position) {
        if target != self.cursor {
            self.set_cursor_notify(target);
        }
        self.drop_selection();
    }

    fn set_selection_unchecked(&mut self, selection: Option<Range>) {
        let selection = selection.filter(|range| !range.is_empty());
        match (self.selection, selection) {
            (None, None) => return,
            (Some(current), Some(incoming)) if current == incoming => self.selection = None,
            _ => self.selection = selection,
        }
        self.selection_observers.notify(&self.selection);
    }

    fn step_left(&self) -> Position {
        let cursor = self.cursor;
        if cursor.column > 0 {
            Position::new(cursor.row, cursor.column - 1)
        } else if cursor.row > 0 {
            Position::new(cursor.row - 1, self.line_len(cursor.row - 1))
        } else {
            cursor
        }
    }

    fn step_right(&self) -> Position {
        let cursor = self.cursor;
        if cursor.column < self.line_len(cursor.row) {
            Position::new(cursor.row, cursor.column + 1)
        } else if cursor.row + 1 < self.lines.len() {
            Position::new(cursor.row + 1, 0)
        } else {
            cursor
        }
    }

    fn step_up(&self) -> Position {
        let cursor = self.cursor;
        if cursor.row == 0 {
            return cursor;
        }
        let row = cursor.row - 1;
        Position::new(row, cursor.column.min(self.line_len(row)))
    }

    fn step_down(&self) -> Position {
        let cursor = self.cursor;
        if cursor.row + 1 == self.lines.len() {
            return cursor;
        }
        let row = cursor.row + 1;
        Position::new(row, cursor.column.min(self.line_len(row)))
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

//! An editing session tying together a buffer, its undo history, and a
//! clipboard stack.
//!
//! The session owns all three pieces and offers the composite operations a
//! host would bind to keys or menu items: clipboard traffic, typing that
//! replaces a selection, whole-document clearing, and history stepping.
//! Each piece stays reachable individually for observer registration and
//! direct use.

use crate::clipboard::ClipboardStack;
use crate::error::{EditError, Result};
use crate::model::buffer::TextBuffer;
use crate::model::position::{Position, Range};
use crate::model::undo::UndoEngine;
use crate::plugins::{EditorPlugin, PluginOutcome};

pub struct EditSession {
    buffer: TextBuffer,
    history: UndoEngine,
    clipboard: ClipboardStack,
}

impl EditSession {
    /// Wraps an existing buffer with empty history and clipboard.
    pub fn new(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            history: UndoEngine::new(),
            clipboard: ClipboardStack::new(),
        }
    }

    /// Builds a session over a new buffer loaded from `text`.
    pub fn from_text(text: &str) -> Self {
        Self::new(TextBuffer::from_text(text))
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    pub fn history(&self) -> &UndoEngine {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut UndoEngine {
        &mut self.history
    }

    pub fn clipboard(&self) -> &ClipboardStack {
        &self.clipboard
    }

    pub fn clipboard_mut(&mut self) -> &mut ClipboardStack {
        &mut self.clipboard
    }

    // ------------------------------------------------------------------
    // Clipboard traffic
    // ------------------------------------------------------------------

    /// Pushes the selected text onto the clipboard.
    pub fn copy(&mut self) -> Result<()> {
        let selection = self.buffer.selection().ok_or(EditError::EmptySelection)?;
        self.clipboard.push(self.buffer.extract(selection));
        Ok(())
    }

    /// Pushes the selected text onto the clipboard and deletes it from the
    /// document.
    pub fn cut(&mut self) -> Result<()> {
        let selection = self.buffer.selection().ok_or(EditError::EmptySelection)?;
        let text = self.buffer.extract(selection);
        tracing::debug!("EditSession::cut: {} bytes", text.len());
        self.clipboard.push(text);
        self.buffer.delete_valid(selection, &mut self.history);
        Ok(())
    }

    /// Inserts the clipboard top at the cursor, leaving it on the stack.
    /// An active selection is replaced (deleted as its own undo step).
    /// Does nothing when the clipboard is empty.
    pub fn paste(&mut self) {
        let Some(text) = self.clipboard.peek().map(str::to_string) else {
            return;
        };
        self.delete_selection_if_any();
        self.buffer.insert(&text, &mut self.history);
    }

    /// Like [`paste`](Self::paste), but pops the entry it inserts.
    pub fn paste_take(&mut self) {
        let Some(text) = self.clipboard.pop() else {
            return;
        };
        self.delete_selection_if_any();
        self.buffer.insert(&text, &mut self.history);
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Deletes the selected text.
    pub fn delete_selection(&mut self) -> Result<()> {
        let selection = self.buffer.selection().ok_or(EditError::EmptySelection)?;
        self.buffer.delete_valid(selection, &mut self.history);
        Ok(())
    }

    /// Types one character: an active selection is deleted first (its own
    /// undo step), then the character goes in at the cursor.
    pub fn insert_char(&mut self, ch: char) -> Position {
        self.delete_selection_if_any();
        self.buffer.insert_char(ch, &mut self.history)
    }

    /// Inserts a string the same way [`insert_char`](Self::insert_char)
    /// types a character.
    pub fn insert_str(&mut self, text: &str) -> Position {
        self.delete_selection_if_any();
        self.buffer.insert(text, &mut self.history)
    }

    /// Backspace: deletes the selection if one is active, otherwise the
    /// character before the cursor.
    pub fn delete_backward(&mut self) {
        match self.buffer.selection() {
            Some(selection) => self.buffer.delete_valid(selection, &mut self.history),
            None => self.buffer.delete_before(&mut self.history),
        }
    }

    /// Forward delete: deletes the selection if one is active, otherwise
    /// the character after the cursor.
    pub fn delete_forward(&mut self) {
        match self.buffer.selection() {
            Some(selection) => self.buffer.delete_valid(selection, &mut self.history),
            None => self.buffer.delete_after(&mut self.history),
        }
    }

    /// Deletes the entire document as a single undoable step.
    pub fn clear_document(&mut self) {
        tracing::debug!("EditSession::clear_document");
        let everything = Range::new(Position::ORIGIN, self.buffer.end_position());
        self.buffer.delete_valid(everything, &mut self.history);
    }

    // ------------------------------------------------------------------
    // Motion and history
    // ------------------------------------------------------------------

    /// Jumps to the document start, clearing any selection.
    pub fn move_to_start(&mut self) {
        self.buffer.set_cursor_notify(Position::ORIGIN);
        self.buffer.drop_selection();
    }

    /// Jumps to the document end, clearing any selection.
    pub fn move_to_end(&mut self) {
        let end = self.buffer.end_position();
        self.buffer.set_cursor_notify(end);
        self.buffer.drop_selection();
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.buffer)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.buffer)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The whole document in save format.
    pub fn contents(&self) -> String {
        self.buffer.contents()
    }

    /// Hands the session's three pieces to a plugin.
    pub fn run_plugin(&mut self, plugin: &dyn EditorPlugin) -> Result<PluginOutcome> {
        plugin.execute(&mut self.buffer, &mut self.history, &mut self.clipboard)
    }

    fn delete_selection_if_any(&mut self) {
        if let Some(selection) = self.buffer.selection() {
            self.buffer.delete_valid(selection, &mut self.history);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_requires_selection() {
        let mut session = EditSession::from_text("hello");
        assert_eq!(session.copy(), Err(EditError::EmptySelection));
        assert!(session.clipboard().is_empty());
    }

    #[test]
    fn test_cut_then_paste_take() {
        let mut session = EditSession::from_text("hello world");
        session
            .buffer_mut()
            .set_selection(Some(Range::new(
                Position::new(0, 5),
                Position::new(0, 11),
            )))
            .unwrap();

        session.cut().unwrap();
        assert_eq!(session.contents(), "hello");
        assert_eq!(session.clipboard().peek(), Some(" world"));

        session.move_to_start();
        session.paste_take();
        assert_eq!(session.contents(), " worldhello");
        assert!(session.clipboard().is_empty());
    }

    #[test]
    fn test_typing_over_selection_is_two_undo_steps() {
        let mut session = EditSession::from_text("abcd");
        session
            .buffer_mut()
            .set_selection(Some(Range::new(Position::new(0, 1), Position::new(0, 3))))
            .unwrap();

        session.insert_char('X');
        assert_eq!(session.contents(), "aXd");

        assert!(session.undo());
        assert_eq!(session.contents(), "ad");
        assert!(session.undo());
        assert_eq!(session.contents(), "abcd");
    }

    #[test]
    fn test_clear_document_is_single_step() {
        let mut session = EditSession::from_text("alpha\nbeta");
        session.clear_document();
        assert_eq!(session.contents(), "");
        assert_eq!(session.history().undo_depth(), 1);

        session.undo();
        assert_eq!(session.contents(), "alpha\nbeta");
    }

    #[test]
    fn test_paste_on_empty_clipboard_is_noop() {
        let mut session = EditSession::from_text("abc");
        session.paste();
        assert_eq!(session.contents(), "abc");
        assert!(!session.can_undo());
    }
}

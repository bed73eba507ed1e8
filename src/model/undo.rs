//! Two-stack undo/redo engine.
//!
//! Recording a new edit discards the redo stack. Status listeners fire
//! only on empty/non-empty transitions of their stack, which is exactly
//! what a host needs to enable or disable an undo control.

use crate::model::buffer::TextBuffer;
use crate::model::command::EditCommand;
use crate::observers::{SubscriberId, Subscribers};

pub struct UndoEngine {
    undo_stack: Vec<EditCommand>,
    redo_stack: Vec<EditCommand>,
    undo_listeners: Subscribers<bool>,
    redo_listeners: Subscribers<bool>,
}

impl UndoEngine {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            undo_listeners: Subscribers::new(),
            redo_listeners: Subscribers::new(),
        }
    }

    /// Records a new edit. Any redoable history is discarded, since the
    /// timeline has forked.
    ///
    /// Replay cannot re-enter this method: `undo` and `redo` hold the
    /// engine mutably while they drive the buffer, so the commands they
    /// replay have no engine to record into.
    pub fn push(&mut self, command: EditCommand) {
        if !self.redo_stack.is_empty() {
            tracing::debug!(
                "UndoEngine::push: discarding {} redo entries",
                self.redo_stack.len()
            );
            self.redo_stack.clear();
            self.redo_listeners.notify(&true);
        }
        let was_empty = self.undo_stack.is_empty();
        self.undo_stack.push(command);
        if was_empty {
            self.undo_listeners.notify(&false);
        }
    }

    /// Reverts the most recent command against `buffer` and moves it to the
    /// redo stack. Returns false when there is nothing to undo.
    pub fn undo(&mut self, buffer: &mut TextBuffer) -> bool {
        let Some(command) = self.undo_stack.pop() else {
            return false;
        };
        if self.undo_stack.is_empty() {
            self.undo_listeners.notify(&true);
        }
        tracing::debug!("UndoEngine::undo: {} entries remain", self.undo_stack.len());
        command.revert(buffer);
        let was_empty = self.redo_stack.is_empty();
        self.redo_stack.push(command);
        if was_empty {
            self.redo_listeners.notify(&false);
        }
        true
    }

    /// Re-applies the most recently undone command against `buffer` and
    /// moves it back to the undo stack. Returns false when there is nothing
    /// to redo.
    pub fn redo(&mut self, buffer: &mut TextBuffer) -> bool {
        let Some(command) = self.redo_stack.pop() else {
            return false;
        };
        if self.redo_stack.is_empty() {
            self.redo_listeners.notify(&true);
        }
        tracing::debug!("UndoEngine::redo: {} entries remain", self.redo_stack.len());
        command.apply(buffer);
        let was_empty = self.undo_stack.is_empty();
        self.undo_stack.push(command);
        if was_empty {
            self.undo_listeners.notify(&false);
        }
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drops all history, notifying listeners for each stack that was
    /// non-empty.
    pub fn clear(&mut self) {
        if !self.undo_stack.is_empty() {
            self.undo_stack.clear();
            self.undo_listeners.notify(&true);
        }
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            self.redo_listeners.notify(&true);
        }
    }

    /// Registers a listener invoked with the undo stack's emptiness on
    /// every empty/non-empty transition.
    pub fn subscribe_undo_status(&mut self, callback: impl Fn(&bool) + 'static) -> SubscriberId {
        self.undo_listeners.subscribe(callback)
    }

    pub fn unsubscribe_undo_status(&mut self, id: SubscriberId) -> bool {
        self.undo_listeners.unsubscribe(id)
    }

    /// Registers a listener invoked with the redo stack's emptiness on
    /// every empty/non-empty transition.
    pub fn subscribe_redo_status(&mut self, callback: impl Fn(&bool) + 'static) -> SubscriberId {
        self.redo_listeners.subscribe(callback)
    }

    pub fn unsubscribe_redo_status(&mut self, id: SubscriberId) -> bool {
        self.redo_listeners.unsubscribe(id)
    }
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new()
    }
}

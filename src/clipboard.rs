//! A stack-shaped clipboard.
//!
//! Unlike a single-slot clipboard, successive copies pile up and paste can
//! either peek at the top or consume it. Observers hear about every
//! mutation and receive the stack's new emptiness, which is all a host
//! needs to enable or disable paste controls.

use crate::observers::{SubscriberId, Subscribers};

#[derive(Default)]
pub struct ClipboardStack {
    entries: Vec<String>,
    observers: Subscribers<bool>,
}

impl ClipboardStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes text onto the stack.
    pub fn push(&mut self, text: impl Into<String>) {
        self.entries.push(text.into());
        self.observers.notify(&false);
    }

    /// Removes and returns the most recent entry, if any.
    pub fn pop(&mut self) -> Option<String> {
        let top = self.entries.pop()?;
        self.observers.notify(&self.entries.is_empty());
        Some(top)
    }

    /// The most recent entry, left in place.
    pub fn peek(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.observers.notify(&true);
    }

    /// Registers a callback invoked with the stack's emptiness after every
    /// mutation.
    pub fn subscribe(&mut self, callback: impl Fn(&bool) + 'static) -> SubscriberId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.observers.unsubscribe(id)
    }
}

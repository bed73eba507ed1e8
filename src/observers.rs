//! Observer registries for model change notifications.
//!
//! Callbacks run synchronously on the thread that performed the mutation and
//! receive the new state by reference. Closures carry no identity of their
//! own, so `subscribe` hands back a [`SubscriberId`] that `unsubscribe`
//! accepts later. Registries are single-threaded; a callback that needs
//! shared state can capture an `Rc<Cell<_>>` or `Rc<RefCell<_>>`.

/// Boxed observer callback invoked with the new state.
pub type ObserverCallback<T> = Box<dyn Fn(&T)>;

/// Handle returned by [`Subscribers::subscribe`], used to remove the
/// callback again. Ids are never reused within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// An ordered list of observer callbacks for one kind of state change.
pub struct Subscribers<T: ?Sized> {
    entries: Vec<(SubscriberId, ObserverCallback<T>)>,
    next_id: u64,
}

impl<T: ?Sized> Subscribers<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers a callback and returns its removal handle.
    pub fn subscribe(&mut self, callback: impl Fn(&T) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Removes a previously registered callback. Returns false if the id is
    /// unknown (already removed or from another registry).
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Invokes every callback in registration order with the new state.
    pub fn notify(&self, state: &T) {
        for (_, callback) in &self.entries {
            callback(state);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: ?Sized> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribe_and_notify() {
        let mut subscribers: Subscribers<u32> = Subscribers::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        subscribers.subscribe(move |value| seen_clone.borrow_mut().push(*value));

        subscribers.notify(&1);
        subscribers.notify(&2);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_notify_runs_in_registration_order() {
        let mut subscribers: Subscribers<()> = Subscribers::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let order_clone = order.clone();
            subscribers.subscribe(move |_| order_clone.borrow_mut().push(label));
        }

        subscribers.notify(&());
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unsubscribe_removes_only_the_named_callback() {
        let mut subscribers: Subscribers<u32> = Subscribers::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_a = seen.clone();
        let id_a = subscribers.subscribe(move |value| seen_a.borrow_mut().push(("a", *value)));
        let seen_b = seen.clone();
        subscribers.subscribe(move |value| seen_b.borrow_mut().push(("b", *value)));

        assert!(subscribers.unsubscribe(id_a));
        subscribers.notify(&7);

        assert_eq!(*seen.borrow(), vec![("b", 7)]);
        assert_eq!(subscribers.len(), 1);
    }

    #[test]
    fn test_unsubscribe_unknown_id_is_false() {
        let mut subscribers: Subscribers<u32> = Subscribers::new();
        let id = subscribers.subscribe(|_| {});
        assert!(subscribers.unsubscribe(id));
        assert!(!subscribers.unsubscribe(id));
    }

    #[test]
    fn test_unsized_state_slice() {
        let mut subscribers: Subscribers<[String]> = Subscribers::new();
        let count = Rc::new(RefCell::new(0usize));

        let count_clone = count.clone();
        subscribers.subscribe(move |lines: &[String]| *count_clone.borrow_mut() = lines.len());

        subscribers.notify(&[String::from("a"), String::from("b")]);
        assert_eq!(*count.borrow(), 2);
    }
}

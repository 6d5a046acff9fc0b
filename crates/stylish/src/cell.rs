//! A single-threaded observable value.
//!
//! [`Observable`] is the reactive cell behind the theme mode and the config
//! version: read the current value, replace it, and get notified when it
//! changes. Reads always see the last write.
//!
//! Subscribers are called synchronously, after the new value is stored, and
//! only when the value actually changed.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Observable::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<(SubscriptionId, Listener<T>)>>,
    next_id: Cell<u64>,
}

/// A shared value that notifies subscribers when it changes.
///
/// Clones share the same value.
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use stylish::Observable;
///
/// let cell = Observable::new(1);
/// let seen = Rc::new(Cell::new(0));
/// let sink = Rc::clone(&seen);
/// cell.subscribe(move |v| sink.set(*v));
///
/// cell.set(5);
/// assert_eq!(cell.get(), 5);
/// assert_eq!(seen.get(), 5);
/// ```
pub struct Observable<T> {
    inner: Rc<Inner<T>>,
}

impl<T: Clone + PartialEq> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Stores `value` and notifies subscribers if it differs from the
    /// current one. Returns true if the value changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value.clone();
        }
        self.notify(&value);
        true
    }

    /// Applies `f` to the current value and stores the result.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = f(&self.inner.value.borrow());
        self.set(next)
    }

    /// Registers a listener called with every new value.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn notify(&self, value: &T) {
        // Snapshot so listeners may subscribe or unsubscribe while running.
        let listeners: Vec<Listener<T>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(value);
        }
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.inner.value.borrow())
            .field("subscribers", &self.inner.listeners.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_after_write() {
        let cell = Observable::new("light".to_string());
        cell.set("dark".to_string());
        assert_eq!(cell.get(), "dark");
    }

    #[test]
    fn test_set_same_value_does_not_notify() {
        let cell = Observable::new(3);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        cell.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(!cell.set(3));
        assert_eq!(calls.get(), 0);
        assert!(cell.set(4));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_listener_sees_stored_value() {
        let cell = Observable::new(0u64);
        let probe = cell.clone();
        let seen = Rc::new(Cell::new(0u64));
        let sink = Rc::clone(&seen);
        cell.subscribe(move |_| sink.set(probe.get()));

        cell.update(|v| v + 1);
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let cell = Observable::new(0);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let id = cell.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(cell.unsubscribe(id));
        assert!(!cell.unsubscribe(id));
        cell.set(1);
        assert_eq!(calls.get(), 0);
        assert_eq!(cell.subscriber_count(), 0);
    }

    #[test]
    fn test_clones_share_value() {
        let a = Observable::new(1);
        let b = a.clone();
        b.set(2);
        assert_eq!(a.get(), 2);
    }
}

//! Event source abstraction and a local broadcaster
//!
//! Everything here lives on one serialized context, so handlers are plain
//! `FnMut` closures behind `Rc<RefCell<_>>` and nothing is `Send`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Handle returned by a subscription
///
/// The handler stays registered while the handle is alive. Dropping the
/// handle (or calling [`Subscription::unsubscribe`]) removes it before
/// returning.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Create a handle that runs `cancel` when released
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle with nothing to cancel
    pub fn empty() -> Self {
        Self { cancel: None }
    }

    /// Remove the handler now
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Something that delivers events of type `T` to subscribers
pub trait EventSource<T> {
    /// Register a handler; it is called for every event until the returned
    /// handle is released
    fn subscribe(&self, handler: Box<dyn FnMut(&T)>) -> Subscription;
}

type Handler<T> = Rc<RefCell<Box<dyn FnMut(&T)>>>;

struct Slot<T> {
    id: u64,
    handler: Handler<T>,
}

struct Inner<T> {
    next_id: u64,
    slots: Vec<Slot<T>>,
}

impl<T> Inner<T> {
    fn contains(&self, id: u64) -> bool {
        self.slots.iter().any(|slot| slot.id == id)
    }
}

/// Single-context event bus
///
/// Handlers run in subscription order. A handler that is unsubscribed while
/// an event is being delivered does not see the rest of that delivery.
pub struct Broadcaster<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T: 'static> Broadcaster<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                next_id: 0,
                slots: Vec::new(),
            })),
        }
    }

    /// Deliver `event` to every current subscriber
    pub fn emit(&self, event: &T) {
        // Snapshot so handlers may subscribe or unsubscribe while we deliver
        let snapshot: Vec<(u64, Handler<T>)> = self
            .inner
            .borrow()
            .slots
            .iter()
            .map(|slot| (slot.id, Rc::clone(&slot.handler)))
            .collect();

        for (id, handler) in snapshot {
            if !self.inner.borrow().contains(id) {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut handler) => (*handler)(event),
                Err(_) => log::warn!("Skipping re-entrant delivery to subscriber {}", id),
            }
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().slots.len()
    }
}

impl<T: 'static> EventSource<T> for Broadcaster<T> {
    fn subscribe(&self, handler: Box<dyn FnMut(&T)>) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.slots.push(Slot {
                id,
                handler: Rc::new(RefCell::new(handler)),
            });
            id
        };

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().slots.retain(|slot| slot.id != id);
            }
        })
    }
}

impl<T: 'static> Default for Broadcaster<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Broadcaster<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

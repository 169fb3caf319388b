//! Subscriber Bridge
//!
//! Adapts the channel's push callbacks into a snapshot/subscribe contract so
//! rendering code never holds connection internals, only the latest view.
//! The two feeds use different update policies, both named here explicitly:
//! [`Bridge::replace`] swaps the whole collection (wait-time board) while
//! [`Bridge::push`] appends (triage transcript).

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::ConnectionState;

/// Point-in-time view of one feed.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot<M> {
    pub state: ConnectionState,
    pub messages: Vec<M>,
}

struct Listeners {
    entries: RefCell<Vec<(u64, Rc<dyn Fn()>)>>,
    next_id: Cell<u64>,
}

struct BridgeInner<M> {
    state: Cell<ConnectionState>,
    messages: RefCell<Vec<M>>,
    listeners: Rc<Listeners>,
}

pub struct Bridge<M> {
    inner: Rc<BridgeInner<M>>,
}

impl<M> Clone for Bridge<M> {
    fn clone(&self) -> Self {
        Bridge {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<M: Clone> Bridge<M> {
    pub fn new() -> Self {
        Bridge {
            inner: Rc::new(BridgeInner {
                state: Cell::new(ConnectionState::Connecting),
                messages: RefCell::new(Vec::new()),
                listeners: Rc::new(Listeners {
                    entries: RefCell::new(Vec::new()),
                    next_id: Cell::new(0),
                }),
            }),
        }
    }

    /// Synchronous copy of the current state and message collection.
    pub fn snapshot(&self) -> Snapshot<M> {
        Snapshot {
            state: self.inner.state.get(),
            messages: self.inner.messages.borrow().clone(),
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.inner.state.get()
    }

    /// Register a listener invoked after every state or message update, in
    /// subscription order. Dropping the returned handle deregisters it.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let listeners = &self.inner.listeners;
        let id = listeners.next_id.get();
        listeners.next_id.set(id + 1);
        listeners.entries.borrow_mut().push((id, Rc::new(listener)));
        Subscription {
            listeners: Rc::downgrade(listeners),
            id,
        }
    }

    /// Record a connection state change. Consecutive identical states are
    /// passed through, not deduplicated.
    pub fn set_state(&self, state: ConnectionState) {
        self.inner.state.set(state);
        self.notify();
    }

    /// Full-replace update: the new collection supersedes everything held.
    pub fn replace(&self, messages: Vec<M>) {
        *self.inner.messages.borrow_mut() = messages;
        self.notify();
    }

    /// Append update: the message joins the end of the held collection.
    pub fn push(&self, message: M) {
        self.inner.messages.borrow_mut().push(message);
        self.notify();
    }

    fn notify(&self) {
        // Clone the callbacks out first so a listener that subscribes or
        // unsubscribes mid-notification cannot invalidate the iteration.
        let listeners: Vec<Rc<dyn Fn()>> = self
            .inner
            .listeners
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

/// Deregistration handle returned by [`Bridge::subscribe`].
pub struct Subscription {
    listeners: Weak<Listeners>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.entries.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

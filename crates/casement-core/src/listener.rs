//! Non-owning multicast listener registry.
//!
//! [`ListenerList`] stores weak references to observers and dispatches to
//! them one at a time. The registry stays consistent when listeners are added
//! or removed from inside a notification, including a listener removing
//! itself or removing another listener that has not been visited yet.
//!
//! # Dispatch Rules
//!
//! - The set of ids to visit is captured when the fan-out starts.
//! - Each id is looked up again right before it is invoked: an entry removed
//!   earlier in the same fan-out is skipped.
//! - Entries added during a fan-out are not notified by that fan-out.
//! - No lock is held while a listener runs, so listeners may call back into
//!   the list freely.
//! - A listener whose owner has dropped it is pruned when encountered.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use casement_core::ListenerList;
//!
//! let list: ListenerList<str> = ListenerList::new();
//! let name: Arc<str> = Arc::from("first");
//! list.add(Arc::downgrade(&name));
//!
//! let mut seen = Vec::new();
//! list.for_each(|_, listener| seen.push(listener.to_string()));
//! assert_eq!(seen, vec!["first".to_string()]);
//! ```

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// Identifier for a registered listener.
    ///
    /// Returned by [`ListenerList::add`] and used to remove the listener
    /// again. Ids are never reused, so a stale id cannot remove a listener
    /// registered later.
    pub struct ListenerId;
}

/// A multicast registry of weakly referenced listeners.
///
/// The list never extends the lifetime of a listener: the registrant keeps
/// the strong reference and the list only holds a [`Weak`].
pub struct ListenerList<T: ?Sized> {
    entries: Mutex<SlotMap<ListenerId, Weak<T>>>,
}

impl<T: ?Sized> Default for ListenerList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> ListenerList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Register a listener.
    ///
    /// The same listener may be registered more than once; each registration
    /// gets its own id and is notified separately.
    pub fn add(&self, listener: Weak<T>) -> ListenerId {
        let id = self.entries.lock().insert(listener);
        tracing::trace!(target: targets::LISTENER, ?id, "listener added");
        id
    }

    /// Remove a listener by id.
    ///
    /// Returns `true` if the listener was registered. Safe to call from
    /// inside [`for_each`](Self::for_each).
    pub fn remove(&self, id: ListenerId) -> bool {
        let removed = self.entries.lock().remove(id).is_some();
        if removed {
            tracing::trace!(target: targets::LISTENER, ?id, "listener removed");
        }
        removed
    }

    /// Check whether an id is still registered.
    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries.lock().contains_key(id)
    }

    /// Number of registrations, including ones whose listener has been
    /// dropped but not yet pruned.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if there are no registrations.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Remove every registration.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Invoke `f` for every registered listener that is still alive.
    ///
    /// See the module documentation for the rules applied when the list is
    /// modified during the fan-out.
    #[tracing::instrument(skip_all, target = "casement_core::listener", level = "trace")]
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(ListenerId, &T),
    {
        let ids: Vec<ListenerId> = self.entries.lock().keys().collect();
        tracing::trace!(target: targets::LISTENER, listener_count = ids.len(), "dispatching");

        for id in ids {
            let Some(listener) = self.upgrade(id) else {
                continue;
            };
            f(id, &*listener);
        }
    }

    /// Resolve an id to a strong reference, pruning dead entries.
    fn upgrade(&self, id: ListenerId) -> Option<Arc<T>> {
        let mut entries = self.entries.lock();
        let listener = entries.get(id)?.upgrade();
        if listener.is_none() {
            entries.remove(id);
            tracing::trace!(target: targets::LISTENER, ?id, "pruned dropped listener");
        }
        listener
    }
}

impl<T: ?Sized> std::fmt::Debug for ListenerList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerList")
            .field("len", &self.len())
            .finish()
    }
}

//! Change notification primitives.
//!
//! The editor model is single-threaded and lives on the UI loop, so these
//! types use `Rc`/`RefCell` rather than locks. Handlers are invoked
//! synchronously, and only after every interior borrow has been released,
//! which lets a handler read (or even mutate) the object that notified it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Notifier::subscribe`], used to detach the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<E> = Rc<dyn Fn(&E)>;

/// A list of subscribers for events of type `E`.
pub struct Notifier<E> {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(SubscriptionId, Handler<E>)>>,
}

impl<E> Notifier<E> {
    /// Creates a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Registers a handler and returns the id needed to remove it again.
    pub fn subscribe(&self, handler: impl Fn(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Removes a handler. Returns false if the id was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    /// Number of handlers currently attached.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Delivers `event` to every handler attached at the time of the call.
    pub fn emit(&self, event: &E) {
        // Snapshot first: handlers may subscribe or unsubscribe while running.
        let handlers: Vec<Handler<E>> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        for handler in handlers {
            handler(event);
        }
    }
}

impl<E> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// A structural change to an [`ObservableList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    /// An item was inserted.
    Added {
        /// Position of the new item
        index: usize,
    },
    /// An item was removed.
    Removed {
        /// Position the item had
        index: usize,
    },
    /// An item changed position.
    Moved {
        /// Old position
        from: usize,
        /// New position
        to: usize,
    },
    /// Every item was removed.
    Cleared,
}

/// Ordered container that publishes every structural change.
///
/// Observers keep watching the same list for its whole lifetime; contents
/// are replaced in place (see [`ObservableList::replace_all`]) instead of
/// swapping the container.
pub struct ObservableList<T> {
    items: RefCell<Vec<T>>,
    changes: Notifier<ListChange>,
}

impl<T> ObservableList<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: RefCell::new(Vec::new()),
            changes: Notifier::new(),
        }
    }

    /// The notifier carrying this list's [`ListChange`] events.
    pub fn changes(&self) -> &Notifier<ListChange> {
        &self.changes
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Whether the list has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Appends an item.
    pub fn push(&self, item: T) {
        let index = {
            let mut items = self.items.borrow_mut();
            items.push(item);
            items.len() - 1
        };
        self.changes.emit(&ListChange::Added { index });
    }

    /// Inserts an item, clamping `index` to the list length.
    pub fn insert(&self, index: usize, item: T) {
        let index = {
            let mut items = self.items.borrow_mut();
            let index = index.min(items.len());
            items.insert(index, item);
            index
        };
        self.changes.emit(&ListChange::Added { index });
    }

    /// Removes and returns the item at `index`, if any.
    pub fn remove(&self, index: usize) -> Option<T> {
        let removed = {
            let mut items = self.items.borrow_mut();
            (index < items.len()).then(|| items.remove(index))
        };
        if removed.is_some() {
            self.changes.emit(&ListChange::Removed { index });
        }
        removed
    }

    /// Moves the item at `from` to position `to`.
    ///
    /// Returns false (and emits nothing) when either index is out of range
    /// or the positions are equal.
    pub fn move_item(&self, from: usize, to: usize) -> bool {
        {
            let mut items = self.items.borrow_mut();
            if from == to || from >= items.len() || to >= items.len() {
                return false;
            }
            let item = items.remove(from);
            items.insert(to, item);
        }
        self.changes.emit(&ListChange::Moved { from, to });
        true
    }

    /// Removes every item.
    pub fn clear(&self) {
        self.items.borrow_mut().clear();
        self.changes.emit(&ListChange::Cleared);
    }

    /// Clears the list and refills it with `items`, keeping the container.
    pub fn replace_all(&self, items: impl IntoIterator<Item = T>) {
        self.clear();
        for item in items {
            self.push(item);
        }
    }

    /// Index of the first item matching `predicate`.
    pub fn position(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.items.borrow().iter().position(predicate)
    }

    /// Runs `f` with a read-only view of the items.
    ///
    /// `f` must not mutate this list.
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.items.borrow())
    }
}

impl<T: Clone> ObservableList<T> {
    /// Clone of the item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.borrow().get(index).cloned()
    }

    /// Clone of every item, in order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.items.borrow().clone()
    }
}

impl<T> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableList")
            .field("items", &self.items.borrow())
            .field("subscribers", &self.changes.subscriber_count())
            .finish()
    }
}

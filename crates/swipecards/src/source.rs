//! Item sources feeding the card stack.
//!
//! The stack reads its cards from an [`ItemSource`]: an ordered, randomly
//! indexable sequence of items. A source may also announce structural
//! changes through [`ItemSource::changes`]; the stack treats any such change
//! as a reason to rebuild the deck from the first item.
//!
//! Two implementations are provided:
//!
//! - [`StaticSource`] - an immutable list
//! - [`ObservableList`] - a mutable list that emits [`CollectionChange`]s

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use swipecards_core::logging::targets;
use swipecards_core::{ConnectionId, Signal};

/// A structural change to an observable source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionChange {
    /// `count` items were inserted starting at `index`.
    Inserted {
        /// First inserted position.
        index: usize,
        /// Number of inserted items.
        count: usize,
    },
    /// `count` items were removed starting at `index`.
    Removed {
        /// First removed position.
        index: usize,
        /// Number of removed items.
        count: usize,
    },
    /// The item at `from` moved to `to`.
    Moved {
        /// Original position.
        from: usize,
        /// New position.
        to: usize,
    },
    /// The item at `index` was replaced.
    Replaced {
        /// Replaced position.
        index: usize,
    },
    /// The whole contents changed.
    Reset,
}

/// An ordered, randomly indexable sequence of items.
pub trait ItemSource<T>: Send + Sync {
    /// Number of items.
    fn len(&self) -> usize;

    /// The item at `index`, or `None` when out of bounds.
    fn get(&self, index: usize) -> Option<T>;

    /// Whether the source has no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Change notifications, for sources that support them.
    fn changes(&self) -> Option<&Signal<CollectionChange>> {
        None
    }
}

/// An immutable item list.
#[derive(Debug, Clone)]
pub struct StaticSource<T> {
    items: Arc<[T]>,
}

impl<T> StaticSource<T> {
    /// Create a source over `items`.
    pub fn new(items: impl Into<Arc<[T]>>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl<T> From<Vec<T>> for StaticSource<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: Clone + Send + Sync> ItemSource<T> for StaticSource<T> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Option<T> {
        self.items.get(index).cloned()
    }
}

/// A mutable item list that announces every structural change.
///
/// # Example
///
/// ```
/// use swipecards::source::{CollectionChange, ItemSource, ObservableList};
///
/// let list = ObservableList::new(vec!["a", "b"]);
/// list.changes().unwrap().connect(|change| {
///     println!("list changed: {change:?}");
/// });
/// list.push("c");
/// assert_eq!(list.len(), 3);
/// ```
pub struct ObservableList<T> {
    items: RwLock<Vec<T>>,
    changed: Signal<CollectionChange>,
}

impl<T: Clone + Send + Sync + 'static> ObservableList<T> {
    /// Create a list with initial items.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            changed: Signal::new(),
        }
    }

    /// Create an empty list.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Append an item.
    pub fn push(&self, item: T) {
        let index = {
            let mut items = self.items.write();
            items.push(item);
            items.len() - 1
        };
        self.notify(CollectionChange::Inserted { index, count: 1 });
    }

    /// Insert an item at `index`, clamped to the list length.
    pub fn insert(&self, index: usize, item: T) {
        let index = {
            let mut items = self.items.write();
            let index = index.min(items.len());
            items.insert(index, item);
            index
        };
        self.notify(CollectionChange::Inserted { index, count: 1 });
    }

    /// Remove and return the item at `index`.
    pub fn remove(&self, index: usize) -> Option<T> {
        let removed = {
            let mut items = self.items.write();
            (index < items.len()).then(|| items.remove(index))
        };
        if removed.is_some() {
            self.notify(CollectionChange::Removed { index, count: 1 });
        }
        removed
    }

    /// Replace the item at `index`, returning the previous one.
    pub fn replace(&self, index: usize, item: T) -> Option<T> {
        let previous = {
            let mut items = self.items.write();
            items
                .get_mut(index)
                .map(|slot| std::mem::replace(slot, item))
        };
        if previous.is_some() {
            self.notify(CollectionChange::Replaced { index });
        }
        previous
    }

    /// Move the item at `from` to `to`.
    pub fn move_item(&self, from: usize, to: usize) -> bool {
        let moved = {
            let mut items = self.items.write();
            if from >= items.len() || to >= items.len() {
                false
            } else {
                let item = items.remove(from);
                items.insert(to, item);
                true
            }
        };
        if moved {
            self.notify(CollectionChange::Moved { from, to });
        }
        moved
    }

    /// Replace the whole contents.
    pub fn set_items(&self, items: Vec<T>) {
        *self.items.write() = items;
        self.notify(CollectionChange::Reset);
    }

    /// Remove every item.
    pub fn clear(&self) {
        self.items.write().clear();
        self.notify(CollectionChange::Reset);
    }

    /// A copy of the current contents.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.read().clone()
    }

    fn notify(&self, change: CollectionChange) {
        tracing::trace!(target: targets::SOURCE, ?change, "observable list changed");
        self.changed.emit(change);
    }
}

impl<T: Clone + Send + Sync + 'static> ItemSource<T> for ObservableList<T> {
    fn len(&self) -> usize {
        self.items.read().len()
    }

    fn get(&self, index: usize) -> Option<T> {
        self.items.read().get(index).cloned()
    }

    fn changes(&self) -> Option<&Signal<CollectionChange>> {
        Some(&self.changed)
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableList")
            .field("items", &*self.items.read())
            .finish()
    }
}

/// A change subscription owned by one consumer of a source.
///
/// The connection is removed when the subscription is dropped, so replacing
/// a source (or dropping the stack) never leaves handlers behind on it.
pub struct SourceSubscription<T: 'static> {
    source: Arc<dyn ItemSource<T>>,
    id: ConnectionId,
}

impl<T: 'static> SourceSubscription<T> {
    /// Subscribe `on_change` to `source`.
    ///
    /// Returns `None` for sources without change notification.
    pub fn connect<F>(source: &Arc<dyn ItemSource<T>>, on_change: F) -> Option<Self>
    where
        F: Fn(&CollectionChange) + Send + Sync + 'static,
    {
        let id = source.changes()?.connect(on_change);
        Some(Self {
            source: Arc::clone(source),
            id,
        })
    }
}

impl<T: 'static> Drop for SourceSubscription<T> {
    fn drop(&mut self) {
        if let Some(changes) = self.source.changes() {
            changes.disconnect(self.id);
        }
    }
}

impl<T: 'static> fmt::Debug for SourceSubscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceSubscription")
            .field("id", &self.id)
            .finish()
    }
}

//! Signal/slot notifications for swipecards.
//!
//! Controls raise notifications (a card was swiped, a drag started) through
//! [`Signal`]s. Any number of slots (closures) may be connected; emitting the
//! signal invokes each of them in connection order with a reference to the
//! emitted arguments.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type used for all control notifications
//! - [`ConnectionId`] - Returned when connecting a slot, used to disconnect it
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Reentrancy
//!
//! Slots are snapshotted before they are invoked, so a slot may connect or
//! disconnect slots (including itself) on the signal it is handling, or emit
//! another signal, without deadlocking.
//!
//! # Example
//!
//! ```
//! use swipecards_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! text_changed.emit("Hello, World!".to_string());
//! text_changed.disconnect(conn_id);
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a struct/tuple for richer payloads.
///
/// # Thread Safety
///
/// `Signal<Args>` is `Send + Sync`. Slots are always invoked directly on the
/// emitting thread.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use swipecards_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Connect a slot that is disconnected when the returned guard is dropped.
    ///
    /// The guard borrows the signal, so it cannot outlive it.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard { signal: self, id }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// If the signal is blocked, this does nothing.
    #[tracing::instrument(skip_all, target = "swipecards_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .field("blocked", &self.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

/// A connection guard that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`].
///
/// # Example
///
/// ```
/// use swipecards_core::Signal;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let signal = Signal::<i32>::new();
/// let counter = Arc::new(AtomicI32::new(0));
/// {
///     let counter_clone = counter.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         counter_clone.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(42);
/// }
/// signal.emit(43);
/// assert_eq!(counter.load(Ordering::SeqCst), 42);
/// ```
#[must_use = "dropping the guard disconnects the slot immediately"]
pub struct ConnectionGuard<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args: 'static> ConnectionGuard<'_, Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: 'static> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        self.signal.disconnect(self.id);
    }
}

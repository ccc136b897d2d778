//! Core systems for swipecards.
//!
//! This crate provides the foundation the card-stack control is built on:
//!
//! - **Signal/Slot System**: Type-safe notifications with scoped connections
//! - **Logging**: `tracing` targets for filtering per subsystem
//!
//! # Signal/Slot Example
//!
//! ```
//! use swipecards_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};

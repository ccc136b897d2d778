//! swipecards - a swipeable card stack control.
//!
//! A [`CardStack`] shows the items of an [`ItemSource`] as a deck of cards.
//! The user drags the front card left or right; a drag that covers the swipe
//! threshold throws the card off screen and reveals the next one, a shorter
//! drag settles it back. Cards can also be swiped programmatically.
//!
//! The control is headless: it owns the interaction state and the card
//! transforms, while the host forwards pan gestures, reports its size, drives
//! the frame clock and draws the [`CardSnapshot`]s.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use swipecards::{CardStack, ItemSource, ObservableList};
//!
//! let items = Arc::new(ObservableList::new(vec!["Card No 1", "Card No 2"]));
//! let stack = CardStack::new();
//! stack.swiped_right.connect(|item| println!("liked {item}"));
//!
//! stack.set_items_source(Some(items.clone() as Arc<dyn ItemSource<&str>>));
//! stack.set_size(360.0, 640.0);
//!
//! assert_eq!(stack.visible_cards().len(), 2);
//! assert_eq!(stack.front_item(), Some("Card No 1"));
//! ```
//!
//! # Logging
//!
//! All crates log through `tracing` under the targets in
//! [`swipecards_core::logging::targets`].

pub mod animation;
pub mod card;
pub mod command;
pub mod config;
pub mod deck;
pub mod error;
pub mod events;
pub mod gesture;
pub mod source;
pub mod stack;

pub use swipecards_core::{ConnectionGuard, ConnectionId, Signal, logging};

pub use animation::{AnimationHandle, AnimationOutcome, Easing};
pub use card::{CardContent, CardTemplate, CardTransform};
pub use command::{FnCommand, SwipeCommand};
pub use config::{BackCardStyle, CardStackConfig};
pub use deck::{CardSnapshot, SlotId};
pub use error::{Error, Result};
pub use events::{DraggingEvent, SwipeDirection, SwipedEvent};
pub use gesture::{DragPhase, PanStatus, PanUpdate};
pub use source::{CollectionChange, ItemSource, ObservableList, StaticSource};
pub use stack::CardStack;

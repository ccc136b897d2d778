//! The deck: a fixed arena of card slots in draw order.
//!
//! Slots are created once per reset and identified by a stable [`SlotId`].
//! The deck keeps a separate draw order over the arena, back to front, and
//! recycles the front slot to the back after every swipe instead of creating
//! a new one.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use swipecards_core::logging::targets;

use crate::card::{CardSlot, CardTemplate, CardTransform};
use crate::config::BackCardStyle;
use crate::source::ItemSource;

/// Stable identifier of a slot within the current deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(usize);

impl SlotId {
    /// Position of the slot in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// What the host needs to draw one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSnapshot<T> {
    /// The slot this snapshot describes.
    pub slot: SlotId,
    /// The bound item.
    pub item: Option<T>,
    /// Transform to apply.
    pub transform: CardTransform,
    /// Whether the slot is drawn.
    pub visible: bool,
}

/// Ordered set of card slots.
pub struct Deck<T> {
    /// Slot arena, indexed by `SlotId`.
    slots: Vec<CardSlot<T>>,
    /// Draw order over the arena; index 0 is the furthest back.
    order: VecDeque<SlotId>,
    /// Resting appearance of back slots.
    back_style: BackCardStyle,
}

impl<T: Clone> Deck<T> {
    /// Create an empty deck.
    pub fn new(back_style: BackCardStyle) -> Self {
        Self {
            slots: Vec::new(),
            order: VecDeque::new(),
            back_style,
        }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the deck has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The back card recipe.
    pub fn back_style(&self) -> BackCardStyle {
        self.back_style
    }

    /// Replace all slots with `count` fresh, hidden ones.
    ///
    /// Animations running on the old slots are interrupted.
    pub fn reset(&mut self, count: usize, template: Option<&dyn CardTemplate<T>>) {
        self.slots.clear();
        self.order.clear();
        for position in 0..count {
            let transform = self.resting_transform_for(position, count);
            let content = template.map(|template| template.create_content());
            self.slots.push(CardSlot::new(transform, content));
            self.order.push_back(SlotId(position));
        }
        tracing::debug!(target: targets::DECK, count, "deck reset");
    }

    /// Resting transform of the slot at draw `position`.
    pub fn resting_transform(&self, position: usize) -> CardTransform {
        self.resting_transform_for(position, self.len())
    }

    fn resting_transform_for(&self, position: usize, count: usize) -> CardTransform {
        if position + 1 == count {
            CardTransform::IDENTITY
        } else {
            self.back_style.transform()
        }
    }

    /// Bind every slot to its item for a deck whose front shows `item_index`.
    ///
    /// The slot `k` positions behind the front shows item `item_index + k`.
    /// Slots past the end of the source (or all slots, without a source) are
    /// hidden.
    pub fn refresh(&mut self, source: Option<&dyn ItemSource<T>>, item_index: usize) {
        let count = self.len();
        let len = source.map_or(0, |source| source.len());
        for position in 0..count {
            let id = self.order[position];
            let behind_front = count - 1 - position;
            let index = item_index + behind_front;
            let item = source.filter(|_| index < len).and_then(|source| source.get(index));
            let slot = &mut self.slots[id.0];
            match item {
                Some(item) => {
                    slot.bind(item);
                    slot.set_visible(true);
                }
                None => slot.set_visible(false),
            }
        }
        tracing::trace!(target: targets::DECK, item_index, len, "deck refreshed");
    }

    /// Move the front slot to the back and restore every resting transform.
    pub fn rotate_front_to_back(&mut self) {
        if let Some(front) = self.order.pop_back() {
            self.order.push_front(front);
        }
        for position in 0..self.len() {
            let transform = self.resting_transform(position);
            let id = self.order[position];
            self.slots[id.0].set_transform(transform);
        }
    }

    /// Slot at draw `position` (0 = back).
    pub fn slot_at(&self, position: usize) -> Option<&CardSlot<T>> {
        self.order.get(position).map(|id| &self.slots[id.0])
    }

    /// Slot by ID.
    pub fn slot(&self, id: SlotId) -> Option<&CardSlot<T>> {
        self.slots.get(id.0)
    }

    /// The top-most slot.
    pub fn front(&self) -> Option<&CardSlot<T>> {
        self.order.back().map(|id| &self.slots[id.0])
    }

    /// The top-most slot, mutably.
    pub fn front_mut(&mut self) -> Option<&mut CardSlot<T>> {
        self.order.back().map(|id| &mut self.slots[id.0])
    }

    /// The slot directly behind the front one, mutably.
    pub fn next_mut(&mut self) -> Option<&mut CardSlot<T>> {
        let position = self.len().checked_sub(2)?;
        let id = self.order[position];
        Some(&mut self.slots[id.0])
    }

    /// Number of visible slots.
    pub fn visible_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_visible()).count()
    }

    /// Whether any slot is animating.
    pub fn is_animating(&self) -> bool {
        self.slots.iter().any(CardSlot::is_animating)
    }

    /// Advance all slot animations by `dt`.
    ///
    /// Returns `true` while any slot is still animating.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let mut animating = false;
        for slot in &mut self.slots {
            animating |= slot.advance(dt);
        }
        animating
    }

    /// Snapshots of all slots in draw order, back to front.
    pub fn snapshots(&self) -> Vec<CardSnapshot<T>> {
        self.order
            .iter()
            .map(|&id| {
                let slot = &self.slots[id.0];
                CardSnapshot {
                    slot: id,
                    item: slot.item().cloned(),
                    transform: slot.transform(),
                    visible: slot.is_visible(),
                }
            })
            .collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for Deck<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deck")
            .field("slots", &self.slots)
            .field("order", &self.order)
            .finish()
    }
}

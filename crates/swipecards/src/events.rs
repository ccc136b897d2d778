//! Notification payloads raised by the card stack.

use std::fmt;

/// Direction a card left the deck in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Swiped towards negative x.
    Left,
    /// Swiped towards positive x.
    Right,
}

impl SwipeDirection {
    /// Direction of a committed drag: positive distances swipe right,
    /// everything else swipes left.
    pub fn from_distance(distance: f32) -> Self {
        if distance > 0.0 {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// `1.0` for right, `-1.0` for left.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Payload of the drag notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct DraggingEvent<T> {
    /// The front item at the time of the notification.
    pub item: T,
    /// Signed horizontal drag distance.
    pub distance: f32,
}

impl<T> DraggingEvent<T> {
    /// Create a new drag event.
    pub fn new(item: T, distance: f32) -> Self {
        Self { item, distance }
    }
}

/// Payload of the `swiped` notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwipedEvent<T> {
    /// The item that was swiped away.
    pub item: T,
    /// Which way it went.
    pub direction: SwipeDirection,
}

impl<T> SwipedEvent<T> {
    /// Create a new swiped event.
    pub fn new(item: T, direction: SwipeDirection) -> Self {
        Self { item, direction }
    }
}

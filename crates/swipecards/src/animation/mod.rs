//! Animation support for the card stack.
//!
//! This module provides easing curves and timed slot animations.
//!
//! # Example
//!
//! ```
//! use swipecards::animation::{ease, Easing};
//!
//! let eased = ease(Easing::EaseInOut, 0.5);
//! assert_eq!(eased, 0.5);
//! ```

mod easing;
mod transition;

pub use easing::{Easing, ease};
pub use transition::{AnimationHandle, AnimationOutcome, SlotAnimation};

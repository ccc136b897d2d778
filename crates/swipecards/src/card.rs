//! Card slots: recyclable placeholders for one rendered item each.
//!
//! A [`CardSlot`] owns the transform the host applies when drawing the card
//! (translation, rotation, scale, opacity, visibility), the item currently
//! bound to it, and optionally a piece of host content produced by a
//! [`CardTemplate`]. Slots are never destroyed while the deck is alive; after
//! each swipe the deck rebinds them to new items.

use std::fmt;
use std::time::Duration;

use swipecards_core::logging::targets;

use crate::animation::{AnimationHandle, Easing, SlotAnimation};

/// Visual state of a card slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    /// Horizontal offset from the resting position, in pixels.
    pub translation_x: f32,
    /// Rotation in degrees, clockwise.
    pub rotation: f32,
    /// Uniform scale factor.
    pub scale: f32,
    /// Opacity from 0.0 (transparent) to 1.0 (opaque).
    pub opacity: f32,
}

impl CardTransform {
    /// Untransformed, fully opaque.
    pub const IDENTITY: Self = Self {
        translation_x: 0.0,
        rotation: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };

    /// Create a transform from its components.
    pub const fn new(translation_x: f32, rotation: f32, scale: f32, opacity: f32) -> Self {
        Self {
            translation_x,
            rotation,
            scale,
            opacity,
        }
    }

    /// Interpolate towards `target` by an (already eased) fraction.
    ///
    /// Opacity is clamped to `[0, 1]` and scale to non-negative values, since
    /// spring curves overshoot.
    pub fn lerp(&self, target: &Self, fraction: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * fraction;
        Self {
            translation_x: mix(self.translation_x, target.translation_x),
            rotation: mix(self.rotation, target.rotation),
            scale: mix(self.scale, target.scale).max(0.0),
            opacity: mix(self.opacity, target.opacity).clamp(0.0, 1.0),
        }
    }
}

impl Default for CardTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Host content bound to a card slot.
///
/// Implementations typically hold a view and update its data context.
pub trait CardContent<T>: Send {
    /// Re-render the content for `item`.
    fn bind(&mut self, item: &T);
}

/// Factory for per-slot content, supplied by the host.
pub trait CardTemplate<T>: Send + Sync {
    /// Create the content for one freshly created slot.
    fn create_content(&self) -> Box<dyn CardContent<T>>;
}

/// A single card placeholder.
pub struct CardSlot<T> {
    item: Option<T>,
    content: Option<Box<dyn CardContent<T>>>,
    transform: CardTransform,
    visible: bool,
    animation: Option<SlotAnimation>,
}

impl<T: Clone> CardSlot<T> {
    /// Create a hidden, unbound slot with the given resting transform.
    pub fn new(transform: CardTransform, content: Option<Box<dyn CardContent<T>>>) -> Self {
        Self {
            item: None,
            content,
            transform,
            visible: false,
            animation: None,
        }
    }

    /// Bind the slot to `item` and let the content re-render.
    pub fn bind(&mut self, item: T) {
        if let Some(content) = self.content.as_mut() {
            content.bind(&item);
        }
        self.item = Some(item);
    }

    /// The bound item, if any.
    pub fn item(&self) -> Option<&T> {
        self.item.as_ref()
    }

    /// The current transform.
    #[inline]
    pub fn transform(&self) -> CardTransform {
        self.transform
    }

    /// Apply a transform immediately, stopping any running animation.
    pub fn set_transform(&mut self, transform: CardTransform) {
        if let Some(animation) = self.animation.take() {
            animation.interrupt();
        }
        self.transform = transform;
    }

    /// Whether the slot is drawn.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the slot.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether an animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Start interpolating towards `target`.
    ///
    /// Replaces (and interrupts) any animation already running on the slot.
    pub fn animate_to(
        &mut self,
        target: CardTransform,
        duration: Duration,
        easing: Easing,
    ) -> AnimationHandle {
        let (animation, handle) = SlotAnimation::new(self.transform, target, duration, easing);
        if let Some(previous) = self.animation.replace(animation) {
            tracing::trace!(target: targets::ANIMATION, "replacing running slot animation");
            previous.interrupt();
        }
        handle
    }

    /// Advance the running animation by `dt`.
    ///
    /// Returns `true` while the slot is still animating afterwards.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        self.transform = animation.advance(dt);
        if animation.is_finished() {
            self.animation = None;
            return false;
        }
        true
    }
}

impl<T: fmt::Debug> fmt::Debug for CardSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardSlot")
            .field("item", &self.item)
            .field("has_content", &self.content.is_some())
            .field("transform", &self.transform)
            .field("visible", &self.visible)
            .field("animating", &self.animation.is_some())
            .finish()
    }
}

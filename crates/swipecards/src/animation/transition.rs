//! Timed slot animations and their completion handles.
//!
//! A [`SlotAnimation`] interpolates a card slot from one [`CardTransform`] to
//! another over a fixed duration. Time is supplied by the host's frame clock
//! through [`SlotAnimation::advance`], so animations are deterministic and
//! never spawn threads or timers.
//!
//! Every animation hands out an [`AnimationHandle`], a future that resolves
//! once the animation finishes. The stack controller starts several
//! animations at once and awaits all of their handles together before it
//! moves on.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};
use std::time::Duration;

use parking_lot::Mutex;

use super::easing::{Easing, ease};
use crate::card::CardTransform;

/// How an animation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// The animation ran for its full duration and reached its target.
    Completed,
    /// The animation was replaced or its slot was reset before finishing.
    Interrupted,
}

#[derive(Debug, Default)]
struct Completion {
    outcome: Option<AnimationOutcome>,
    waker: Option<Waker>,
}

type SharedCompletion = Arc<Mutex<Completion>>;

fn resolve(completion: &SharedCompletion, outcome: AnimationOutcome) {
    let waker = {
        let mut state = completion.lock();
        if state.outcome.is_some() {
            return;
        }
        state.outcome = Some(outcome);
        state.waker.take()
    };
    if let Some(waker) = waker {
        waker.wake();
    }
}

/// Future that resolves when a slot animation ends.
#[derive(Debug, Clone)]
#[must_use = "an animation handle does nothing unless awaited or inspected"]
pub struct AnimationHandle {
    completion: SharedCompletion,
}

impl AnimationHandle {
    /// The outcome, if the animation has ended.
    pub fn outcome(&self) -> Option<AnimationOutcome> {
        self.completion.lock().outcome
    }

    /// Whether the animation has ended (either way).
    pub fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }
}

impl Future for AnimationHandle {
    type Output = AnimationOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.completion.lock();
        match state.outcome {
            Some(outcome) => Poll::Ready(outcome),
            None => {
                state.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

/// An in-flight interpolation of a slot transform.
///
/// Dropping an unfinished animation resolves its handle as
/// [`AnimationOutcome::Interrupted`].
#[derive(Debug)]
pub struct SlotAnimation {
    from: CardTransform,
    to: CardTransform,
    duration: Duration,
    easing: Easing,
    elapsed: Duration,
    completion: SharedCompletion,
}

impl SlotAnimation {
    /// Create an animation and the handle that observes it.
    pub fn new(
        from: CardTransform,
        to: CardTransform,
        duration: Duration,
        easing: Easing,
    ) -> (Self, AnimationHandle) {
        let completion = SharedCompletion::default();
        let handle = AnimationHandle {
            completion: completion.clone(),
        };
        let animation = Self {
            from,
            to,
            duration,
            easing,
            elapsed: Duration::ZERO,
            completion,
        };
        (animation, handle)
    }

    /// The transform this animation ends on.
    #[inline]
    pub fn target(&self) -> CardTransform {
        self.to
    }

    /// The easing curve in use.
    #[inline]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// The total duration.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress from 0.0 to 1.0.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }

    /// Whether the full duration has elapsed.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// The transform at the current progress.
    pub fn current(&self) -> CardTransform {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(&self.to, ease(self.easing, self.progress()))
    }

    /// Advance by `dt` and return the transform to apply.
    ///
    /// When the duration has elapsed the exact target is returned and the
    /// handle resolves as completed.
    pub fn advance(&mut self, dt: Duration) -> CardTransform {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        if self.is_finished() {
            resolve(&self.completion, AnimationOutcome::Completed);
        }
        self.current()
    }

    /// Stop the animation early, resolving its handle as interrupted.
    pub fn interrupt(self) {
        resolve(&self.completion, AnimationOutcome::Interrupted);
    }
}

impl Drop for SlotAnimation {
    fn drop(&mut self) {
        resolve(&self.completion, AnimationOutcome::Interrupted);
    }
}

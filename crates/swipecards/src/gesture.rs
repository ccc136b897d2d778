//! Drag interpretation for the card stack.
//!
//! The host's pan recognizer reports raw updates ([`PanUpdate`]): a status
//! and the total horizontal translation since the gesture began. The
//! [`DragInterpreter`] turns them into semantic [`DragEvent`]s while tracking
//! one drag session at a time:
//!
//! ```text
//! Idle --start--> Dragging --release--> Committing | Cancelling --finish--> Idle
//! ```
//!
//! The session stays alive until the controller calls
//! [`DragInterpreter::finish`], i.e. until the release animations are done.
//! New gestures are ignored while a session is alive.

use swipecards_core::logging::targets;

use crate::config::DEFAULT_JUMP_GUARD;
use crate::events::SwipeDirection;

/// Status of a raw pan update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanStatus {
    /// The pointer went down and the pan began.
    Started,
    /// The pointer moved.
    Running,
    /// The pointer was released.
    Completed,
    /// The platform aborted the gesture.
    Canceled,
}

/// A raw pan update from the host's gesture recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanUpdate {
    /// Phase of the gesture.
    pub status: PanStatus,
    /// Horizontal translation since the gesture started.
    pub total_x: f32,
}

impl PanUpdate {
    /// A gesture start.
    pub fn started() -> Self {
        Self {
            status: PanStatus::Started,
            total_x: 0.0,
        }
    }

    /// A movement to `total_x`.
    pub fn running(total_x: f32) -> Self {
        Self {
            status: PanStatus::Running,
            total_x,
        }
    }

    /// A release.
    pub fn completed() -> Self {
        Self {
            status: PanStatus::Completed,
            total_x: 0.0,
        }
    }

    /// An aborted gesture.
    pub fn canceled() -> Self {
        Self {
            status: PanStatus::Canceled,
            total_x: 0.0,
        }
    }
}

/// Semantic drag events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// A drag session began.
    Started,
    /// The drag moved to a new accepted distance.
    Progress(f32),
    /// The drag was released beyond the threshold.
    Commit {
        /// Direction of the swipe.
        direction: SwipeDirection,
        /// Final drag distance.
        distance: f32,
    },
    /// The drag was released short of the threshold, or aborted.
    Cancel {
        /// Final drag distance.
        distance: f32,
    },
}

/// Phase of the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No session.
    #[default]
    Idle,
    /// The pointer is down and moving the front card.
    Dragging,
    /// The card is animating out in the given direction.
    Committing(SwipeDirection),
    /// The card is settling back.
    Cancelling,
}

/// Transient state of one drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragSession {
    /// Last accepted drag distance.
    pub last_delta_x: f32,
    /// Direction, once the drag is committed.
    pub committed_direction: Option<SwipeDirection>,
}

/// Turns raw pan updates into drag events.
#[derive(Debug, Clone)]
pub struct DragInterpreter {
    jump_guard: f32,
    phase: DragPhase,
    session: Option<DragSession>,
}

impl Default for DragInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_JUMP_GUARD)
    }
}

impl DragInterpreter {
    /// Create an idle interpreter.
    ///
    /// Movements that differ from the previous accepted distance by more than
    /// `jump_guard` are dropped as noise.
    pub fn new(jump_guard: f32) -> Self {
        Self {
            jump_guard,
            phase: DragPhase::Idle,
            session: None,
        }
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Whether a session is alive (dragging or resolving).
    #[inline]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The current session.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Last accepted distance, zero without a session.
    pub fn distance(&self) -> f32 {
        self.session.map_or(0.0, |session| session.last_delta_x)
    }

    /// The noise filter distance.
    pub fn jump_guard(&self) -> f32 {
        self.jump_guard
    }

    /// Change the noise filter distance.
    pub fn set_jump_guard(&mut self, jump_guard: f32) {
        self.jump_guard = jump_guard;
    }

    /// Feed one raw update.
    ///
    /// `exhausted` tells whether the source has no card left to drag;
    /// `threshold` is the swipe threshold used on release.
    pub fn interpret(
        &mut self,
        update: PanUpdate,
        exhausted: bool,
        threshold: f32,
    ) -> Option<DragEvent> {
        match update.status {
            PanStatus::Started => self.begin(update.total_x, exhausted).then_some(DragEvent::Started),
            PanStatus::Running => self.update(update.total_x).map(DragEvent::Progress),
            PanStatus::Completed => self.release(threshold),
            PanStatus::Canceled => self.cancel(),
        }
    }

    /// Start a session.
    ///
    /// Refused when the source is exhausted, a session is already alive, or
    /// the gesture does not start at distance zero.
    pub fn begin(&mut self, total_x: f32, exhausted: bool) -> bool {
        if exhausted {
            tracing::debug!(target: targets::GESTURE, "ignoring drag start: no cards left");
            return false;
        }
        if self.session.is_some() {
            tracing::debug!(target: targets::GESTURE, phase = ?self.phase, "ignoring drag start: session active");
            return false;
        }
        if total_x != 0.0 {
            tracing::debug!(target: targets::GESTURE, total_x, "ignoring drag start away from origin");
            return false;
        }
        self.session = Some(DragSession::default());
        self.phase = DragPhase::Dragging;
        true
    }

    /// Accept a movement, returning the new distance.
    pub fn update(&mut self, total_x: f32) -> Option<f32> {
        if self.phase != DragPhase::Dragging {
            return None;
        }
        let session = self.session.as_mut()?;
        if (total_x - session.last_delta_x).abs() > self.jump_guard {
            tracing::trace!(
                target: targets::GESTURE,
                total_x,
                last = session.last_delta_x,
                "dropping drag jump"
            );
            return None;
        }
        session.last_delta_x = total_x;
        Some(total_x)
    }

    /// Release the pointer and decide commit or cancel.
    pub fn release(&mut self, threshold: f32) -> Option<DragEvent> {
        if self.phase != DragPhase::Dragging {
            return None;
        }
        let session = self.session.as_mut()?;
        let distance = session.last_delta_x;
        if distance.abs() >= threshold {
            let direction = SwipeDirection::from_distance(distance);
            session.committed_direction = Some(direction);
            self.phase = DragPhase::Committing(direction);
            Some(DragEvent::Commit { direction, distance })
        } else {
            self.phase = DragPhase::Cancelling;
            Some(DragEvent::Cancel { distance })
        }
    }

    /// Abort the drag, settling the card back.
    pub fn cancel(&mut self) -> Option<DragEvent> {
        if self.phase != DragPhase::Dragging {
            return None;
        }
        self.phase = DragPhase::Cancelling;
        Some(DragEvent::Cancel {
            distance: self.distance(),
        })
    }

    /// Open a session that is already committed, for programmatic swipes.
    pub fn begin_commit(&mut self, direction: SwipeDirection) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(DragSession {
            last_delta_x: 0.0,
            committed_direction: Some(direction),
        });
        self.phase = DragPhase::Committing(direction);
        true
    }

    /// End the session and return to idle.
    pub fn finish(&mut self) {
        self.session = None;
        self.phase = DragPhase::Idle;
    }
}

//! The card stack controller.
//!
//! [`CardStack`] owns the item index, the [`Deck`] and the
//! [`DragInterpreter`]. It maps drags to card transforms, decides whether a
//! release commits or settles, runs the release animations and advances
//! through the item source.
//!
//! # Driving the stack
//!
//! The host forwards pan updates and its frame clock:
//!
//! ```ignore
//! // on every pan update from the platform
//! stack.handle_pan(PanUpdate::running(total_x)).await;
//!
//! // on every frame
//! stack.tick(frame_time);
//! for card in stack.visible_cards() {
//!     draw(card.item, card.transform);
//! }
//! ```
//!
//! Releases and programmatic swipes are `async`: they start the slot
//! animations and resume once every one of them has finished, which happens
//! as `tick` advances time.
//!
//! # Signals
//!
//! - `started_dragging(DraggingEvent)`: a drag began on the front card
//! - `dragging(DraggingEvent)`: the front card moved
//! - `finished_dragging(DraggingEvent)`: a drag resolved; carries the new front card
//! - `swiped(SwipedEvent)`: a card left the deck
//! - `swiped_left(T)` / `swiped_right(T)`: per-direction variants of `swiped`
//!
//! Signals are emitted and commands executed without any internal lock held,
//! so handlers may call back into the stack or mutate the item source.

use std::sync::{Arc, Weak};
use std::time::Duration;

use futures_util::future::join_all;
use parking_lot::Mutex;
use swipecards_core::Signal;
use swipecards_core::logging::targets;

use crate::animation::AnimationHandle;
use crate::card::{CardTemplate, CardTransform};
use crate::command::{SwipeCommand, execute_if_possible};
use crate::config::CardStackConfig;
use crate::deck::{CardSnapshot, Deck};
use crate::error::Result;
use crate::events::{DraggingEvent, SwipeDirection, SwipedEvent};
use crate::gesture::{DragEvent, DragInterpreter, DragPhase, PanUpdate};
use crate::source::{ItemSource, SourceSubscription};

/// Mutable state of a stack, shared with the source subscription.
struct StackState<T: 'static> {
    config: CardStackConfig,
    deck: Deck<T>,
    interpreter: DragInterpreter,
    source: Option<Arc<dyn ItemSource<T>>>,
    subscription: Option<SourceSubscription<T>>,
    template: Option<Arc<dyn CardTemplate<T>>>,
    left_command: Option<Arc<dyn SwipeCommand<T>>>,
    right_command: Option<Arc<dyn SwipeCommand<T>>>,
    item_index: usize,
    width: f32,
    height: f32,
    threshold: f32,
    /// Bumped on every reset; completions from an older generation are dropped.
    generation: u64,
}

impl<T: Clone + Send + Sync + 'static> StackState<T> {
    fn new(config: CardStackConfig) -> Self {
        let mut state = Self {
            deck: Deck::new(config.back_card),
            interpreter: DragInterpreter::new(config.jump_guard),
            config,
            source: None,
            subscription: None,
            template: None,
            left_command: None,
            right_command: None,
            item_index: 0,
            width: 0.0,
            height: 0.0,
            threshold: 0.0,
            generation: 0,
        };
        state.update_threshold();
        state.reset();
        state
    }

    fn source_len(&self) -> usize {
        self.source.as_ref().map_or(0, |source| source.len())
    }

    fn is_exhausted(&self) -> bool {
        self.item_index >= self.source_len()
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.interpreter.finish();
        self.deck
            .reset(self.config.card_count, self.template.as_deref());
        self.item_index = 0;
        self.refresh();
        tracing::debug!(
            target: targets::STACK,
            generation = self.generation,
            items = self.source_len(),
            "card stack reset"
        );
    }

    fn refresh(&mut self) {
        self.deck.refresh(self.source.as_deref(), self.item_index);
    }

    fn update_threshold(&mut self) {
        self.threshold = self
            .config
            .swipe_threshold
            .unwrap_or(self.width * self.config.threshold_fraction);
    }

    /// The item shown on the front card, if the deck is not exhausted.
    fn front_item(&self) -> Option<T> {
        if self.is_exhausted() {
            return None;
        }
        self.deck
            .front()
            .filter(|slot| slot.is_visible())
            .and_then(|slot| slot.item().cloned())
    }

    fn command(&self, direction: SwipeDirection) -> Option<Arc<dyn SwipeCommand<T>>> {
        match direction {
            SwipeDirection::Left => self.left_command.clone(),
            SwipeDirection::Right => self.right_command.clone(),
        }
    }

    /// Rotation of the front card, in degrees, for a drag of `dx`.
    fn drag_rotation(&self, dx: f32) -> f32 {
        if self.width <= 0.0 {
            return 0.0;
        }
        0.3 * (dx / self.width).min(1.0) * (180.0 / std::f32::consts::PI)
    }

    /// How many thresholds `dx` covers.
    fn reveal_progress(&self, dx: f32) -> f32 {
        if self.threshold > 0.0 {
            (dx / self.threshold).abs()
        } else if dx != 0.0 {
            1.0
        } else {
            0.0
        }
    }

    /// Move the front card with the drag and reveal the card behind it.
    fn apply_drag(&mut self, dx: f32) {
        let rotation = self.drag_rotation(dx);
        let revealed = self.deck.back_style().revealed(self.reveal_progress(dx));
        if let Some(front) = self.deck.front_mut().filter(|slot| slot.is_visible()) {
            let transform = front.transform();
            front.set_transform(CardTransform {
                translation_x: dx,
                rotation,
                ..transform
            });
        }
        if let Some(next) = self.deck.next_mut().filter(|slot| slot.is_visible()) {
            next.set_transform(revealed);
        }
    }

    /// Animate the front card off screen and bring the next card forward.
    fn start_exit(&mut self, direction: SwipeDirection, duration: Duration) -> Vec<AnimationHandle> {
        let easing = self.config.easing;
        let sign = direction.sign();
        let exit_x = sign * 2.0 * self.width;
        let exit_rotation = sign * self.config.exit_rotation_degrees;

        let mut handles = Vec::with_capacity(2);
        if let Some(front) = self.deck.front_mut() {
            let target = CardTransform {
                translation_x: exit_x,
                rotation: exit_rotation,
                ..front.transform()
            };
            handles.push(front.animate_to(target, duration, easing));
        }
        if let Some(next) = self.deck.next_mut().filter(|slot| slot.is_visible()) {
            handles.push(next.animate_to(CardTransform::IDENTITY, duration, easing));
        }
        handles
    }

    /// Animate the front card back to rest and the next card back behind it.
    fn start_settle(&mut self) -> Vec<AnimationHandle> {
        let duration = self.config.animation_length();
        let easing = self.config.easing;
        let back = self.deck.back_style().transform();

        let mut handles = Vec::with_capacity(2);
        if let Some(front) = self.deck.front_mut() {
            handles.push(front.animate_to(CardTransform::IDENTITY, duration, easing));
        }
        if let Some(next) = self.deck.next_mut().filter(|slot| slot.is_visible()) {
            handles.push(next.animate_to(back, duration, easing));
        }
        handles
    }

    /// Retire the front card after its exit animation.
    ///
    /// Expects `item_index` to already point at the new front item.
    fn retire_front(&mut self) {
        if let Some(front) = self.deck.front_mut() {
            front.set_visible(false);
        }
        self.deck.rotate_front_to_back();
        self.refresh();
    }
}

/// How a release resolved, carried across the animation await.
#[derive(Debug)]
enum Resolution<T> {
    Commit {
        item: Option<T>,
        direction: SwipeDirection,
    },
    Settle,
}

/// A release whose animations are running.
struct PendingRelease<T> {
    generation: u64,
    distance: f32,
    resolution: Resolution<T>,
    handles: Vec<AnimationHandle>,
}

/// A swipeable stack of cards over an item source.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use swipecards::{CardStack, ItemSource, StaticSource};
///
/// let stack = CardStack::<String>::new();
/// stack.swiped.connect(|event| println!("{:?} went {}", event.item, event.direction));
///
/// let source: Arc<dyn ItemSource<String>> =
///     Arc::new(StaticSource::from(vec!["A".to_string(), "B".to_string()]));
/// stack.set_items_source(Some(source));
/// stack.set_size(300.0, 400.0);
///
/// assert_eq!(stack.front_item().as_deref(), Some("A"));
/// assert_eq!(stack.swipe_threshold(), 100.0);
/// ```
pub struct CardStack<T: Clone + Send + Sync + 'static> {
    state: Arc<Mutex<StackState<T>>>,

    /// Emitted when a drag starts on the front card, with distance zero.
    pub started_dragging: Signal<DraggingEvent<T>>,
    /// Emitted for every accepted drag movement.
    pub dragging: Signal<DraggingEvent<T>>,
    /// Emitted after a drag resolves, carrying the new front card.
    pub finished_dragging: Signal<DraggingEvent<T>>,
    /// Emitted when a card leaves the deck.
    pub swiped: Signal<SwipedEvent<T>>,
    /// Emitted when a card leaves the deck to the left.
    pub swiped_left: Signal<T>,
    /// Emitted when a card leaves the deck to the right.
    pub swiped_right: Signal<T>,
}

impl<T: Clone + Send + Sync + 'static> Default for CardStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> CardStack<T> {
    /// Create a stack with the default configuration.
    pub fn new() -> Self {
        Self::from_state(StackState::new(CardStackConfig::default()))
    }

    /// Create a stack with a custom configuration.
    pub fn with_config(config: CardStackConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_state(StackState::new(config)))
    }

    fn from_state(state: StackState<T>) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            started_dragging: Signal::new(),
            dragging: Signal::new(),
            finished_dragging: Signal::new(),
            swiped: Signal::new(),
            swiped_left: Signal::new(),
            swiped_right: Signal::new(),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The active configuration.
    pub fn config(&self) -> CardStackConfig {
        self.state.lock().config.clone()
    }

    /// Bind a new item source (or none) and rebuild the deck.
    ///
    /// If the source supports change notification, any structural change to
    /// it rebuilds the deck as well. The subscription on the previous source
    /// is dropped.
    pub fn set_items_source(&self, source: Option<Arc<dyn ItemSource<T>>>) {
        let weak = Arc::downgrade(&self.state);
        let mut state = self.state.lock();
        state.subscription = None;
        state.subscription = source
            .as_ref()
            .and_then(|source| SourceSubscription::connect(source, on_source_changed(weak)));
        state.source = source;
        state.reset();
    }

    /// The bound item source.
    pub fn items_source(&self) -> Option<Arc<dyn ItemSource<T>>> {
        self.state.lock().source.clone()
    }

    /// Set the content factory for card slots and rebuild the deck.
    pub fn set_item_template(&self, template: Option<Arc<dyn CardTemplate<T>>>) {
        let mut state = self.state.lock();
        state.template = template;
        state.reset();
    }

    /// Set the command run for cards swiped left.
    pub fn set_swiped_left_command(&self, command: Option<Arc<dyn SwipeCommand<T>>>) {
        self.state.lock().left_command = command;
    }

    /// Set the command run for cards swiped right.
    pub fn set_swiped_right_command(&self, command: Option<Arc<dyn SwipeCommand<T>>>) {
        self.state.lock().right_command = command;
    }

    /// Fix the swipe threshold, or derive it from the width again with `None`.
    ///
    /// Negative and non-finite values are ignored.
    pub fn set_swipe_threshold(&self, threshold: Option<f32>) {
        if let Some(value) = threshold.filter(|value| !value.is_finite() || *value < 0.0) {
            tracing::debug!(target: targets::STACK, value, "ignoring invalid swipe threshold");
            return;
        }
        let mut state = self.state.lock();
        state.config.swipe_threshold = threshold;
        state.update_threshold();
    }

    /// The distance a drag must cover to commit.
    pub fn swipe_threshold(&self) -> f32 {
        self.state.lock().threshold
    }

    /// Report the control's allocated size.
    ///
    /// Unless fixed, the swipe threshold follows the width.
    pub fn set_size(&self, width: f32, height: f32) {
        let mut state = self.state.lock();
        state.width = width;
        state.height = height;
        state.update_threshold();
        tracing::trace!(target: targets::STACK, width, height, threshold = state.threshold, "size allocated");
    }

    /// The allocated size.
    pub fn size(&self) -> (f32, f32) {
        let state = self.state.lock();
        (state.width, state.height)
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Rebuild the deck from the first item.
    #[tracing::instrument(skip_all, name = "swipecards::setup", target = "swipecards::stack", level = "debug")]
    pub fn setup(&self) {
        self.state.lock().reset();
    }

    /// Index of the front item in the source.
    pub fn item_index(&self) -> usize {
        self.state.lock().item_index
    }

    /// Whether every item has been swiped (or there are none).
    pub fn is_exhausted(&self) -> bool {
        self.state.lock().is_exhausted()
    }

    /// The item on the front card.
    pub fn front_item(&self) -> Option<T> {
        self.state.lock().front_item()
    }

    /// Whether a drag session is alive, including its release animations.
    pub fn is_dragging(&self) -> bool {
        self.state.lock().interpreter.is_active()
    }

    /// Phase of the drag interpreter.
    pub fn drag_phase(&self) -> DragPhase {
        self.state.lock().interpreter.phase()
    }

    /// Whether any card is animating.
    pub fn is_animating(&self) -> bool {
        self.state.lock().deck.is_animating()
    }

    /// All slots in draw order, back to front.
    pub fn cards(&self) -> Vec<CardSnapshot<T>> {
        self.state.lock().deck.snapshots()
    }

    /// Visible slots in draw order, back to front.
    pub fn visible_cards(&self) -> Vec<CardSnapshot<T>> {
        self.cards().into_iter().filter(|card| card.visible).collect()
    }

    /// Advance all card animations by `dt`.
    ///
    /// Returns `true` while animations are still running.
    pub fn tick(&self, dt: Duration) -> bool {
        self.state.lock().deck.advance(dt)
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// Feed a raw pan update from the host.
    ///
    /// Completes once any release animation it triggered has finished.
    pub async fn handle_pan(&self, update: PanUpdate) {
        if let Some(release) = self.interpret(update) {
            self.finish_release(release).await;
        }
    }

    /// Begin dragging the front card.
    ///
    /// Ignored when the deck is exhausted or a drag is already in progress.
    pub fn on_drag_start(&self) {
        self.interpret(PanUpdate::started());
    }

    /// Move the front card to horizontal distance `delta_x`.
    pub fn on_drag_progress(&self, delta_x: f32) {
        self.interpret(PanUpdate::running(delta_x));
    }

    /// Release the front card: swipe it away if it travelled at least the
    /// threshold, settle it back otherwise.
    pub async fn on_drag_end(&self) {
        self.handle_pan(PanUpdate::completed()).await;
    }

    /// Abort the drag and settle the front card back.
    pub async fn on_drag_cancel(&self) {
        self.handle_pan(PanUpdate::canceled()).await;
    }

    fn interpret(&self, update: PanUpdate) -> Option<PendingRelease<T>> {
        let mut state = self.state.lock();
        let exhausted = state.is_exhausted();
        let threshold = state.threshold;
        let event = state.interpreter.interpret(update, exhausted, threshold)?;

        match event {
            DragEvent::Started => {
                let notification = state.front_item().map(|item| DraggingEvent::new(item, 0.0));
                drop(state);
                if let Some(notification) = notification {
                    self.started_dragging.emit(notification);
                }
                None
            }
            DragEvent::Progress(dx) => {
                state.apply_drag(dx);
                let notification = state.front_item().map(|item| DraggingEvent::new(item, dx));
                drop(state);
                if let Some(notification) = notification {
                    self.dragging.emit(notification);
                }
                None
            }
            DragEvent::Commit {
                direction,
                distance,
            } => {
                tracing::debug!(target: targets::STACK, %direction, distance, "drag committed");
                let item = state.front_item();
                let duration = state.config.animation_length();
                let handles = state.start_exit(direction, duration);
                Some(PendingRelease {
                    generation: state.generation,
                    distance,
                    resolution: Resolution::Commit { item, direction },
                    handles,
                })
            }
            DragEvent::Cancel { distance } => {
                tracing::debug!(target: targets::STACK, distance, "drag cancelled");
                let handles = state.start_settle();
                Some(PendingRelease {
                    generation: state.generation,
                    distance,
                    resolution: Resolution::Settle,
                    handles,
                })
            }
        }
    }

    #[tracing::instrument(skip_all, name = "swipecards::drag_end", target = "swipecards::stack", level = "debug")]
    async fn finish_release(&self, release: PendingRelease<T>) {
        join_all(release.handles).await;

        let swiped = {
            let mut state = self.state.lock();
            if state.generation != release.generation {
                tracing::debug!(target: targets::STACK, "deck was reset during release animation");
                return;
            }
            match release.resolution {
                Resolution::Commit { item, direction } => {
                    let command = state.command(direction);
                    item.map(|item| (item, direction, command))
                }
                Resolution::Settle => {
                    state.interpreter.finish();
                    None
                }
            }
        };

        if let Some((item, direction, command)) = swiped {
            self.raise_swiped(item, direction, command.as_deref());

            let mut state = self.state.lock();
            if state.generation == release.generation {
                state.item_index += 1;
                state.retire_front();
                state.interpreter.finish();
            } else {
                tracing::debug!(target: targets::STACK, "deck was reset by a swipe handler");
            }
        }

        let front = self.state.lock().front_item();
        if let Some(front) = front {
            self.finished_dragging
                .emit(DraggingEvent::new(front, release.distance));
        }
    }

    // =========================================================================
    // Programmatic swipes
    // =========================================================================

    /// Swipe the front card away with the default animation length.
    ///
    /// Ignored when the deck is exhausted or a drag is in progress.
    pub async fn swipe(&self, direction: SwipeDirection) {
        let duration = self.state.lock().config.animation_length();
        self.swipe_with_duration(direction, duration).await;
    }

    /// Swipe the front card away, animating for `duration`.
    ///
    /// The `swiped` notification and command fire immediately, then the index
    /// advances and the card animates off screen. The deck is rebound once it
    /// is gone.
    #[tracing::instrument(skip_all, name = "swipecards::swipe", target = "swipecards::stack", level = "debug", fields(%direction))]
    pub async fn swipe_with_duration(&self, direction: SwipeDirection, duration: Duration) {
        let (item, command, generation) = {
            let mut state = self.state.lock();
            if state.is_exhausted() {
                tracing::debug!(target: targets::STACK, "ignoring swipe: no cards left");
                return;
            }
            let Some(item) = state.front_item() else {
                return;
            };
            if !state.interpreter.begin_commit(direction) {
                tracing::debug!(target: targets::STACK, "ignoring swipe: interaction in progress");
                return;
            }
            (item, state.command(direction), state.generation)
        };

        self.raise_swiped(item, direction, command.as_deref());

        let handles = {
            let mut state = self.state.lock();
            if state.generation != generation {
                tracing::debug!(target: targets::STACK, "deck was reset by a swipe handler");
                return;
            }
            state.item_index += 1;
            state.start_exit(direction, duration)
        };
        join_all(handles).await;

        let mut state = self.state.lock();
        if state.generation != generation {
            tracing::debug!(target: targets::STACK, "deck was reset during swipe animation");
            return;
        }
        state.retire_front();
        state.interpreter.finish();
    }

    fn raise_swiped(
        &self,
        item: T,
        direction: SwipeDirection,
        command: Option<&dyn SwipeCommand<T>>,
    ) {
        tracing::debug!(target: targets::STACK, %direction, "card swiped");
        self.swiped.emit(SwipedEvent::new(item.clone(), direction));
        match direction {
            SwipeDirection::Left => self.swiped_left.emit(item.clone()),
            SwipeDirection::Right => self.swiped_right.emit(item.clone()),
        }
        execute_if_possible(command, &item);
    }
}

/// Slot that rebuilds the stack whenever its source changes structurally.
fn on_source_changed<T: Clone + Send + Sync + 'static>(
    state: Weak<Mutex<StackState<T>>>,
) -> impl Fn(&crate::source::CollectionChange) + Send + Sync + 'static {
    move |change| {
        let Some(state) = state.upgrade() else {
            return;
        };
        tracing::debug!(target: targets::SOURCE, ?change, "items source changed");
        state.lock().reset();
    }
}

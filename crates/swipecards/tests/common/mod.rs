//! Shared helpers for card stack integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::pin::pin;
use std::sync::{Arc, Once};
use std::time::Duration;

use futures_util::FutureExt;
use parking_lot::Mutex;
use swipecards::{CardStack, ItemSource, ObservableList, StaticSource, SwipeDirection};

/// One simulated frame.
pub const FRAME: Duration = Duration::from_millis(16);

const MAX_FRAMES: usize = 1_000;

static TRACING: Once = Once::new();

/// Install a test subscriber once, honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Poll `future` to completion, advancing the stack's animations one frame
/// between polls.
pub fn drive<T, F>(stack: &CardStack<T>, future: F) -> F::Output
where
    T: Clone + Send + Sync + 'static,
    F: Future,
{
    let mut future = pin!(future);
    for _ in 0..MAX_FRAMES {
        if let Some(output) = future.as_mut().now_or_never() {
            return output;
        }
        stack.tick(FRAME);
    }
    panic!("future did not complete within {MAX_FRAMES} frames");
}

/// A stack over a static list on a 300 wide view, giving a threshold of 100.
pub fn static_stack(items: &[&'static str]) -> CardStack<&'static str> {
    init_tracing();
    let stack = CardStack::new();
    let source: Arc<dyn ItemSource<&'static str>> = Arc::new(StaticSource::from(items.to_vec()));
    stack.set_items_source(Some(source));
    stack.set_size(300.0, 500.0);
    stack
}

/// A stack over an observable list, returning both.
pub fn observable_stack(
    items: &[&'static str],
) -> (CardStack<&'static str>, Arc<ObservableList<&'static str>>) {
    init_tracing();
    let list = Arc::new(ObservableList::new(items.to_vec()));
    let stack = CardStack::new();
    stack.set_items_source(Some(list.clone() as Arc<dyn ItemSource<&'static str>>));
    stack.set_size(300.0, 500.0);
    (stack, list)
}

/// Everything a stack announced, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    StartedDragging(&'static str, f32),
    Dragging(&'static str, f32),
    FinishedDragging(&'static str, f32),
    Swiped(&'static str, SwipeDirection),
    SwipedLeft(&'static str),
    SwipedRight(&'static str),
}

/// Records every signal of a stack.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<Recorded>>>,
}

impl Recorder {
    pub fn attach(stack: &CardStack<&'static str>) -> Self {
        let recorder = Self::default();

        let events = recorder.events.clone();
        stack
            .started_dragging
            .connect(move |e| events.lock().push(Recorded::StartedDragging(e.item, e.distance)));
        let events = recorder.events.clone();
        stack
            .dragging
            .connect(move |e| events.lock().push(Recorded::Dragging(e.item, e.distance)));
        let events = recorder.events.clone();
        stack
            .finished_dragging
            .connect(move |e| events.lock().push(Recorded::FinishedDragging(e.item, e.distance)));
        let events = recorder.events.clone();
        stack
            .swiped
            .connect(move |e| events.lock().push(Recorded::Swiped(e.item, e.direction)));
        let events = recorder.events.clone();
        stack
            .swiped_left
            .connect(move |item| events.lock().push(Recorded::SwipedLeft(item)));
        let events = recorder.events.clone();
        stack
            .swiped_right
            .connect(move |item| events.lock().push(Recorded::SwipedRight(item)));

        recorder
    }

    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().clone()
    }

    pub fn swiped(&self) -> Vec<(&'static str, SwipeDirection)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Recorded::Swiped(item, direction) => Some((item, direction)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, matches: impl Fn(&Recorded) -> bool) -> usize {
        self.events.lock().iter().filter(|event| matches(event)).count()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

/// Items of the visible cards, back to front.
pub fn visible_items(stack: &CardStack<&'static str>) -> Vec<&'static str> {
    stack
        .visible_cards()
        .into_iter()
        .filter_map(|card| card.item)
        .collect()
}

/// Drag the front card through `steps` and release it.
pub fn drag(stack: &CardStack<&'static str>, steps: &[f32]) {
    stack.on_drag_start();
    for &step in steps {
        stack.on_drag_progress(step);
    }
    drive(stack, stack.on_drag_end());
}

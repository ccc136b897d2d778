//! Integration tests for the card stack controller.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_util::FutureExt;
use swipecards::{
    CardContent, CardStack, CardStackConfig, CardTemplate, CardTransform, DragPhase, FnCommand,
    ItemSource, PanUpdate, StaticSource, SwipeCommand, SwipeDirection,
};

use common::{Recorded, Recorder, drag, drive, observable_stack, static_stack, visible_items};

#[test]
fn test_drag_past_threshold_swipes_right() {
    let stack = static_stack(&["A", "B", "C"]);
    let recorder = Recorder::attach(&stack);
    assert_eq!(stack.swipe_threshold(), 100.0);

    drag(&stack, &[50.0, 100.0, 150.0]);

    assert_eq!(
        recorder.events(),
        vec![
            Recorded::StartedDragging("A", 0.0),
            Recorded::Dragging("A", 50.0),
            Recorded::Dragging("A", 100.0),
            Recorded::Dragging("A", 150.0),
            Recorded::Swiped("A", SwipeDirection::Right),
            Recorded::SwipedRight("A"),
            Recorded::FinishedDragging("B", 150.0),
        ]
    );
    assert_eq!(stack.item_index(), 1);
    assert_eq!(stack.front_item(), Some("B"));
    assert_eq!(visible_items(&stack), vec!["C", "B"]);
    assert!(!stack.is_dragging());
    assert!(!stack.is_animating());
}

#[test]
fn test_short_drag_settles_back() {
    let stack = static_stack(&["A", "B", "C"]);
    let recorder = Recorder::attach(&stack);

    drag(&stack, &[-25.0, -50.0]);

    assert!(recorder.swiped().is_empty());
    assert_eq!(
        recorder.count(|e| matches!(e, Recorded::FinishedDragging("A", d) if *d == -50.0)),
        1
    );
    assert_eq!(stack.item_index(), 0);
    assert_eq!(stack.front_item(), Some("A"));

    let cards = stack.cards();
    assert_eq!(cards[1].transform, CardTransform::IDENTITY);
    assert_eq!(cards[0].transform, stack.config().back_card.transform());
    assert_eq!(stack.drag_phase(), DragPhase::Idle);
}

#[test]
fn test_release_at_exact_threshold_commits() {
    let stack = static_stack(&["A", "B"]);
    let recorder = Recorder::attach(&stack);

    drag(&stack, &[-60.0, -100.0]);

    assert_eq!(recorder.swiped(), vec![("A", SwipeDirection::Left)]);
    assert_eq!(recorder.count(|e| *e == Recorded::SwipedLeft("A")), 1);
    assert_eq!(stack.front_item(), Some("B"));
}

#[test]
fn test_empty_source_shows_no_cards() {
    let stack = static_stack(&[]);
    let recorder = Recorder::attach(&stack);
    stack.setup();

    assert!(stack.visible_cards().is_empty());
    assert!(stack.is_exhausted());

    stack.on_drag_start();
    assert!(!stack.is_dragging());
    assert!(recorder.events().is_empty());
}

#[test]
fn test_no_source_shows_no_cards() {
    let stack = CardStack::<&'static str>::new();
    stack.set_size(300.0, 500.0);
    assert_eq!(stack.cards().len(), 2);
    assert!(stack.visible_cards().is_empty());
    assert_eq!(stack.front_item(), None);
}

#[test]
fn test_single_item_shows_one_card() {
    let stack = static_stack(&["A"]);
    assert_eq!(visible_items(&stack), vec!["A"]);
}

#[test]
fn test_programmatic_swipe_then_noop() {
    let stack = static_stack(&["A"]);
    let recorder = Recorder::attach(&stack);

    drive(&stack, stack.swipe(SwipeDirection::Left));

    assert_eq!(recorder.swiped(), vec![("A", SwipeDirection::Left)]);
    assert_eq!(stack.item_index(), 1);
    assert!(stack.is_exhausted());
    assert!(stack.visible_cards().is_empty());

    drive(&stack, stack.swipe(SwipeDirection::Left));
    assert_eq!(recorder.swiped().len(), 1);
    assert_eq!(stack.item_index(), 1);
    assert_eq!(
        recorder.count(|e| matches!(e, Recorded::FinishedDragging(..))),
        0
    );
}

#[test]
fn test_programmatic_swipe_notifies_before_animating() {
    let stack = static_stack(&["A", "B"]);
    let recorder = Recorder::attach(&stack);

    let mut swipe = Box::pin(stack.swipe_with_duration(SwipeDirection::Right, Duration::from_millis(100)));
    assert!(swipe.as_mut().now_or_never().is_none());

    assert_eq!(recorder.swiped(), vec![("A", SwipeDirection::Right)]);
    assert_eq!(stack.item_index(), 1);
    assert!(stack.is_animating());

    drive(&stack, swipe);
    assert!(!stack.is_animating());
    assert_eq!(stack.front_item(), Some("B"));
    assert_eq!(visible_items(&stack), vec!["B"]);
}

#[test]
fn test_exit_animation_heads_off_screen() {
    let stack = static_stack(&["A", "B"]);
    let front = stack.cards()[1].slot;

    let mut swipe = Box::pin(stack.swipe(SwipeDirection::Right));
    assert!(swipe.as_mut().now_or_never().is_none());
    stack.tick(Duration::from_millis(125));

    let moving = stack
        .cards()
        .into_iter()
        .find(|card| card.slot == front)
        .map(|card| card.transform.translation_x);
    assert!(moving.is_some_and(|x| x > 0.0));

    drive(&stack, swipe);
    let cards = stack.cards();
    assert_eq!(cards[0].slot, front);
    assert!(!cards[0].visible);
}

#[test]
fn test_second_drag_start_is_ignored() {
    let stack = static_stack(&["A", "B"]);
    let recorder = Recorder::attach(&stack);

    stack.on_drag_start();
    stack.on_drag_progress(40.0);
    stack.on_drag_start();

    assert_eq!(
        recorder.count(|e| matches!(e, Recorded::StartedDragging(..))),
        1
    );
    assert_eq!(stack.cards()[1].transform.translation_x, 40.0);
    assert!(stack.is_dragging());
}

#[test]
fn test_swiping_every_item_exhausts_deck() {
    let items = ["A", "B", "C", "D"];
    let stack = static_stack(&items);
    let recorder = Recorder::attach(&stack);

    for _ in 0..items.len() {
        drive(&stack, stack.swipe(SwipeDirection::Right));
    }

    let swiped: Vec<_> = recorder.swiped().into_iter().map(|(item, _)| item).collect();
    assert_eq!(swiped, items);
    assert!(stack.is_exhausted());
    assert!(stack.visible_cards().is_empty());

    stack.on_drag_start();
    assert!(!stack.is_dragging());
}

#[test]
fn test_replacing_source_resets_index() {
    let stack = static_stack(&["A", "B", "C"]);
    drive(&stack, stack.swipe(SwipeDirection::Left));
    assert_eq!(stack.item_index(), 1);

    let replacement: Arc<dyn ItemSource<&'static str>> = Arc::new(StaticSource::from(vec!["X", "Y"]));
    stack.set_items_source(Some(replacement));

    assert_eq!(stack.item_index(), 0);
    assert_eq!(visible_items(&stack), vec!["Y", "X"]);

    stack.set_items_source(None);
    assert!(stack.visible_cards().is_empty());
    assert!(stack.is_exhausted());
}

#[test]
fn test_source_change_resets_deck() {
    let (stack, list) = observable_stack(&["A", "B", "C"]);
    drag(&stack, &[80.0, 160.0]);
    assert_eq!(stack.front_item(), Some("B"));

    list.push("D");
    assert_eq!(stack.item_index(), 0);
    assert_eq!(stack.front_item(), Some("A"));

    list.clear();
    assert!(stack.visible_cards().is_empty());
}

#[test]
fn test_replaced_source_no_longer_resets() {
    let (stack, list) = observable_stack(&["A", "B"]);
    let other: Arc<dyn ItemSource<&'static str>> = Arc::new(StaticSource::from(vec!["X", "Y", "Z"]));
    stack.set_items_source(Some(other));
    drive(&stack, stack.swipe(SwipeDirection::Left));

    list.push("C");
    assert_eq!(stack.item_index(), 1);
    assert_eq!(stack.front_item(), Some("Y"));
}

#[test]
fn test_commands_respect_can_execute() {
    let stack = static_stack(&["A", "skip", "C"]);
    let liked = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let passed = Arc::new(AtomicUsize::new(0));

    let liked_clone = liked.clone();
    let like: Arc<dyn SwipeCommand<&'static str>> = Arc::new(
        FnCommand::new(move |item: &&'static str| liked_clone.lock().push(*item))
            .with_can_execute(|item: &&'static str| *item != "skip"),
    );
    let passed_clone = passed.clone();
    let pass: Arc<dyn SwipeCommand<&'static str>> = Arc::new(FnCommand::new(move |_: &&'static str| {
        passed_clone.fetch_add(1, Ordering::SeqCst);
    }));
    stack.set_swiped_right_command(Some(like));
    stack.set_swiped_left_command(Some(pass));

    drive(&stack, stack.swipe(SwipeDirection::Right));
    drive(&stack, stack.swipe(SwipeDirection::Right));
    drag(&stack, &[-90.0, -150.0]);

    assert_eq!(*liked.lock(), vec!["A"]);
    assert_eq!(passed.load(Ordering::SeqCst), 1);
    assert!(stack.is_exhausted());
}

#[test]
fn test_command_runs_before_index_advances() {
    let stack = Arc::new(static_stack(&["A", "B"]));
    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));

    let stack_weak = Arc::downgrade(&stack);
    let seen_clone = seen.clone();
    let command: Arc<dyn SwipeCommand<&'static str>> = Arc::new(FnCommand::new(move |item: &&'static str| {
        if let Some(stack) = stack_weak.upgrade() {
            seen_clone.lock().push((*item, stack.item_index(), stack.front_item()));
        }
    }));
    stack.set_swiped_right_command(Some(command));

    drive(&stack, stack.swipe(SwipeDirection::Right));
    assert_eq!(stack.item_index(), 1);

    drag(&stack, &[90.0, 180.0]);
    assert_eq!(stack.item_index(), 2);

    assert_eq!(
        *seen.lock(),
        vec![("A", 0, Some("A")), ("B", 1, Some("B"))]
    );
}

#[test]
fn test_command_mutating_source_resets_deck() {
    let (stack, list) = observable_stack(&["A", "B"]);
    let list_clone = list.clone();
    let command: Arc<dyn SwipeCommand<&'static str>> =
        Arc::new(FnCommand::new(move |_: &&'static str| list_clone.push("C")));
    stack.set_swiped_right_command(Some(command));

    drive(&stack, stack.swipe(SwipeDirection::Right));

    assert_eq!(list.to_vec(), vec!["A", "B", "C"]);
    assert_eq!(stack.item_index(), 0);
    assert_eq!(stack.front_item(), Some("A"));
    assert!(!stack.is_dragging());

    drag(&stack, &[-70.0, -140.0]);
    assert_eq!(stack.front_item(), Some("B"));
}

#[test]
fn test_drag_ignored_while_animating() {
    let stack = static_stack(&["A", "B", "C"]);
    let recorder = Recorder::attach(&stack);

    let mut swipe = Box::pin(stack.swipe(SwipeDirection::Left));
    assert!(swipe.as_mut().now_or_never().is_none());

    stack.on_drag_start();
    stack.on_drag_progress(30.0);
    assert_eq!(
        recorder.count(|e| matches!(e, Recorded::StartedDragging(..) | Recorded::Dragging(..))),
        0
    );

    drive(&stack, swipe);
    assert_eq!(stack.front_item(), Some("B"));

    drag(&stack, &[-50.0, -120.0]);
    assert_eq!(stack.front_item(), Some("C"));
}

#[test]
fn test_swipe_ignored_while_dragging() {
    let stack = static_stack(&["A", "B"]);
    let recorder = Recorder::attach(&stack);

    stack.on_drag_start();
    drive(&stack, stack.swipe(SwipeDirection::Right));

    assert!(recorder.swiped().is_empty());
    assert_eq!(stack.item_index(), 0);
    assert!(stack.is_dragging());
}

#[test]
fn test_jump_guard_drops_noisy_updates() {
    let stack = static_stack(&["A", "B"]);
    let recorder = Recorder::attach(&stack);

    stack.on_drag_start();
    stack.on_drag_progress(30.0);
    stack.on_drag_progress(400.0);
    stack.on_drag_progress(60.0);
    drive(&stack, stack.on_drag_end());

    assert_eq!(
        recorder.count(|e| matches!(e, Recorded::Dragging(..))),
        2
    );
    assert!(recorder.swiped().is_empty());
}

#[test]
fn test_pan_updates_drive_the_stack() {
    let stack = static_stack(&["A", "B"]);
    let recorder = Recorder::attach(&stack);

    for update in [
        PanUpdate::started(),
        PanUpdate::running(60.0),
        PanUpdate::running(120.0),
        PanUpdate::completed(),
    ] {
        drive(&stack, stack.handle_pan(update));
    }

    assert_eq!(recorder.swiped(), vec![("A", SwipeDirection::Right)]);
    assert_eq!(stack.front_item(), Some("B"));
}

#[test]
fn test_canceled_pan_settles_even_past_threshold() {
    let stack = static_stack(&["A", "B"]);
    let recorder = Recorder::attach(&stack);

    stack.on_drag_start();
    stack.on_drag_progress(80.0);
    stack.on_drag_progress(160.0);
    drive(&stack, stack.on_drag_cancel());

    assert!(recorder.swiped().is_empty());
    assert_eq!(stack.front_item(), Some("A"));
    assert_eq!(stack.cards()[1].transform, CardTransform::IDENTITY);
}

#[test]
fn test_reset_during_release_discards_swipe() {
    let stack = static_stack(&["A", "B"]);
    let recorder = Recorder::attach(&stack);

    stack.on_drag_start();
    stack.on_drag_progress(90.0);
    stack.on_drag_progress(150.0);
    let mut release = Box::pin(stack.on_drag_end());
    assert!(release.as_mut().now_or_never().is_none());

    stack.setup();
    drive(&stack, release);

    assert!(recorder.swiped().is_empty());
    assert_eq!(stack.item_index(), 0);
    assert_eq!(stack.front_item(), Some("A"));
    assert!(!stack.is_dragging());
}

#[test]
fn test_handlers_may_reenter_the_stack() {
    let stack = Arc::new(static_stack(&["A", "B", "C"]));
    let fronts = Arc::new(parking_lot::Mutex::new(Vec::new()));

    let stack_weak = Arc::downgrade(&stack);
    let fronts_clone = fronts.clone();
    stack.swiped.connect(move |event| {
        if let Some(stack) = stack_weak.upgrade() {
            fronts_clone
                .lock()
                .push((event.item, stack.item_index(), stack.front_item()));
        }
    });

    drive(&stack, stack.swipe(SwipeDirection::Left));
    drag(&stack, &[100.0, 200.0]);

    assert_eq!(
        *fronts.lock(),
        vec![("A", 0, Some("A")), ("B", 1, Some("B"))]
    );
    assert_eq!(stack.item_index(), 2);
    assert_eq!(stack.front_item(), Some("C"));
}

#[test]
fn test_commit_binds_each_slot_once() {
    struct Recording(Arc<parking_lot::Mutex<Vec<&'static str>>>);

    impl CardContent<&'static str> for Recording {
        fn bind(&mut self, item: &&'static str) {
            self.0.lock().push(*item);
        }
    }

    struct RecordingTemplate(Arc<parking_lot::Mutex<Vec<&'static str>>>);

    impl CardTemplate<&'static str> for RecordingTemplate {
        fn create_content(&self) -> Box<dyn CardContent<&'static str>> {
            Box::new(Recording(self.0.clone()))
        }
    }

    let binds = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let stack = static_stack(&["A", "B", "C"]);
    stack.set_item_template(Some(Arc::new(RecordingTemplate(binds.clone()))));
    assert_eq!(*binds.lock(), vec!["B", "A"]);
    binds.lock().clear();

    drag(&stack, &[50.0, 100.0, 150.0]);
    assert_eq!(*binds.lock(), vec!["C", "B"]);
    binds.lock().clear();

    drive(&stack, stack.swipe(SwipeDirection::Left));
    assert_eq!(*binds.lock(), vec!["C"]);
}

#[test]
fn test_custom_config_changes_deck() {
    let config = CardStackConfig {
        card_count: 3,
        swipe_threshold: Some(40.0),
        animation_length_ms: 0,
        ..CardStackConfig::default()
    };
    let stack = CardStack::with_config(config).unwrap();
    let source: Arc<dyn ItemSource<&'static str>> = Arc::new(StaticSource::from(vec!["A", "B", "C", "D"]));
    stack.set_items_source(Some(source));
    stack.set_size(600.0, 800.0);

    assert_eq!(visible_items(&stack), vec!["C", "B", "A"]);
    assert_eq!(stack.swipe_threshold(), 40.0);

    drag(&stack, &[25.0, 45.0]);
    assert_eq!(visible_items(&stack), vec!["D", "C", "B"]);
}

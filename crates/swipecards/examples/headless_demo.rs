//! Swipecards Headless Demo
//!
//! Drives a card stack without a window:
//! - Four cards from an observable list
//! - Logging commands bound to both swipe directions
//! - A scripted session of drags and programmatic swipes
//! - A restart once the deck is exhausted
//!
//! Run with: cargo run -p swipecards --example headless_demo
//! Set `RUST_LOG=swipecards=debug` to see the controller's own logging.

use std::future::Future;
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use swipecards::{
    CardContent, CardStack, CardTemplate, FnCommand, ItemSource, ObservableList, SwipeDirection,
};
use tracing_subscriber::EnvFilter;

/// 60 Hz frame clock.
const FRAME: Duration = Duration::from_micros(16_667);

/// Card content that only remembers the text it shows.
#[derive(Default)]
struct TextCard {
    text: String,
}

impl CardContent<String> for TextCard {
    fn bind(&mut self, item: &String) {
        self.text.clone_from(item);
        tracing::trace!(text = %self.text, "card bound");
    }
}

struct TextTemplate;

impl CardTemplate<String> for TextTemplate {
    fn create_content(&self) -> Box<dyn CardContent<String>> {
        Box::new(TextCard::default())
    }
}

/// Run `future` while ticking the stack, like a host's frame loop would.
fn run_frames<F: Future>(stack: &CardStack<String>, future: F) -> F::Output {
    let mut future = pin!(future);
    let mut frames = 0u32;
    loop {
        if let Some(output) = future.as_mut().now_or_never() {
            if frames > 0 {
                tracing::info!(frames, "animation finished");
            }
            return output;
        }
        stack.tick(FRAME);
        frames += 1;
    }
}

fn print_deck(stack: &CardStack<String>) {
    let cards = stack.visible_cards();
    if cards.is_empty() {
        println!("  deck: <empty>");
        return;
    }
    for card in cards.iter().rev() {
        let t = card.transform;
        println!(
            "  {:<12} x={:>7.1} rot={:>5.1} scale={:.2} opacity={:.2}",
            card.item.as_deref().unwrap_or("?"),
            t.translation_x,
            t.rotation,
            t.scale,
            t.opacity
        );
    }
}

fn drag(stack: &CardStack<String>, steps: &[f32]) {
    stack.on_drag_start();
    for &dx in steps {
        stack.on_drag_progress(dx);
    }
    print_deck(stack);
    run_frames(stack, stack.on_drag_end());
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let items = Arc::new(ObservableList::new(
        (1..=4).map(|n| format!("Card No {n}")).collect(),
    ));

    let stack = CardStack::<String>::new();
    stack.set_item_template(Some(Arc::new(TextTemplate)));
    stack.set_swiped_left_command(Some(Arc::new(FnCommand::new(|item: &String| {
        tracing::info!(%item, "passed");
    }))));
    stack.set_swiped_right_command(Some(Arc::new(FnCommand::new(|item: &String| {
        tracing::info!(%item, "liked");
    }))));
    stack.finished_dragging.connect(|event| {
        println!("finished dragging, front is now {} ({:+.0})", event.item, event.distance);
    });
    stack.swiped.connect(|event| println!("swiped {} {}", event.item, event.direction));

    stack.set_items_source(Some(items.clone() as Arc<dyn ItemSource<String>>));
    stack.set_size(360.0, 640.0);
    println!("threshold: {}", stack.swipe_threshold());
    print_deck(&stack);

    println!("\n-- short drag, settles back");
    drag(&stack, &[-40.0, -80.0]);
    print_deck(&stack);

    println!("\n-- long drag right");
    drag(&stack, &[60.0, 120.0, 180.0]);
    print_deck(&stack);

    println!("\n-- programmatic swipes");
    run_frames(&stack, stack.swipe(SwipeDirection::Left));
    run_frames(&stack, stack.swipe_with_duration(SwipeDirection::Right, Duration::from_millis(400)));
    run_frames(&stack, stack.swipe(SwipeDirection::Left));
    print_deck(&stack);
    println!("exhausted: {}", stack.is_exhausted());

    println!("\n-- restart");
    stack.setup();
    print_deck(&stack);

    println!("\n-- new card added, deck rebuilds");
    items.push("Card No 5".to_string());
    println!("front: {:?}, items: {}", stack.front_item(), items.len());
}

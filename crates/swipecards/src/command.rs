//! Executable actions attached to swipe directions.
//!
//! A [`SwipeCommand`] is the action-style counterpart of the `swiped` signal:
//! the stack asks it whether it can run for the swiped item and, if so, runs
//! it. Signals and commands are independent; either may be absent.

use std::fmt;

/// An action run when a card is swiped in a given direction.
pub trait SwipeCommand<T>: Send + Sync {
    /// Whether the command accepts `item`.
    fn can_execute(&self, _item: &T) -> bool {
        true
    }

    /// Run the command for `item`.
    fn execute(&self, item: &T);
}

/// A [`SwipeCommand`] built from closures.
///
/// # Example
///
/// ```
/// use swipecards::command::{FnCommand, SwipeCommand};
///
/// let like = FnCommand::new(|item: &String| println!("liked {item}"))
///     .with_can_execute(|item: &String| !item.is_empty());
///
/// assert!(like.can_execute(&"card".to_string()));
/// assert!(!like.can_execute(&String::new()));
/// ```
pub struct FnCommand<T> {
    execute: Box<dyn Fn(&T) + Send + Sync>,
    can_execute: Option<Box<dyn Fn(&T) -> bool + Send + Sync>>,
}

impl<T> FnCommand<T> {
    /// A command that always runs `execute`.
    pub fn new<F>(execute: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Self {
            execute: Box::new(execute),
            can_execute: None,
        }
    }

    /// Restrict the command with a predicate.
    pub fn with_can_execute<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.can_execute = Some(Box::new(predicate));
        self
    }
}

impl<T> SwipeCommand<T> for FnCommand<T> {
    fn can_execute(&self, item: &T) -> bool {
        self.can_execute.as_ref().is_none_or(|predicate| predicate(item))
    }

    fn execute(&self, item: &T) {
        (self.execute)(item);
    }
}

impl<T> fmt::Debug for FnCommand<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCommand")
            .field("has_can_execute", &self.can_execute.is_some())
            .finish()
    }
}

/// Run `command` for `item` if it is present and accepts the item.
///
/// Returns whether the command ran.
pub(crate) fn execute_if_possible<T>(command: Option<&dyn SwipeCommand<T>>, item: &T) -> bool {
    match command {
        Some(command) if command.can_execute(item) => {
            command.execute(item);
            true
        }
        _ => false,
    }
}

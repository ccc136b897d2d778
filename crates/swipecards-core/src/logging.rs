//! Logging targets for swipecards.
//!
//! swipecards uses the `tracing` crate for instrumentation. Nothing is printed
//! unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("swipecards=debug")
//!     .init();
//! ```
//!
//! Invalid interaction input (a drag on an exhausted deck, a reentrant
//! gesture, a noisy pointer jump) is absorbed rather than reported as an
//! error, and is logged at `debug` or `trace` under the targets below.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "swipecards_core::signal";
    /// Stack controller target.
    pub const STACK: &str = "swipecards::stack";
    /// Deck and card slot target.
    pub const DECK: &str = "swipecards::deck";
    /// Gesture interpretation target.
    pub const GESTURE: &str = "swipecards::gesture";
    /// Slot animation target.
    pub const ANIMATION: &str = "swipecards::animation";
    /// Item source target.
    pub const SOURCE: &str = "swipecards::source";
    /// Configuration loading target.
    pub const CONFIG: &str = "swipecards::config";
}


//! Easing curves for card animations.
//!
//! An easing curve maps linear progress (0.0 to 1.0) to eased progress. The
//! spring curves overshoot the `[0, 1]` range briefly, which gives settling
//! and exiting cards their slight bounce.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Overshoot factor of the spring curves.
const SPRING_OVERSHOOT: f32 = 1.70158;

/// Available easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (starts slow, accelerates).
    EaseIn,
    /// Quadratic ease-out (starts fast, decelerates).
    EaseOut,
    /// Quadratic ease-in-out.
    EaseInOut,
    /// Cubic ease-out.
    EaseOutCubic,
    /// Sinusoidal ease-in-out.
    EaseInOutSine,
    /// Pulls back slightly before accelerating towards the target.
    SpringIn,
    /// Overshoots the target slightly, then settles on it.
    #[default]
    SpringOut,
}

/// Apply an easing curve to a progress value.
///
/// `t` is clamped to `[0, 1]`. The result is `0.0` at `t = 0` and `1.0` at
/// `t = 1` for every curve.
///
/// # Example
///
/// ```
/// use swipecards::animation::{ease, Easing};
///
/// assert_eq!(ease(Easing::Linear, 0.5), 0.5);
/// assert!(ease(Easing::EaseIn, 0.5) < 0.5);
/// assert!(ease(Easing::SpringOut, 0.8) > 1.0);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
        Easing::SpringIn => t * t * ((SPRING_OVERSHOOT + 1.0) * t - SPRING_OVERSHOOT),
        Easing::SpringOut => {
            let u = t - 1.0;
            u * u * ((SPRING_OVERSHOOT + 1.0) * u + SPRING_OVERSHOOT) + 1.0
        }
    }
}

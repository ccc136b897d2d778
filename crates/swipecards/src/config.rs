//! Card stack configuration.
//!
//! Every tunable of the control lives in [`CardStackConfig`]. The defaults
//! reproduce the classic two-card deck: a quarter-second spring animation, a
//! swipe threshold of one third of the control width, and a back card shown
//! at 80% scale, shifted and half transparent.
//!
//! Configurations can be built in code or loaded from TOML/JSON:
//!
//! ```
//! use swipecards::config::CardStackConfig;
//!
//! let config = CardStackConfig::from_toml_str(r#"
//!     card_count = 3
//!     swipe_threshold = 120.0
//!
//!     [back_card]
//!     scale = 0.9
//! "#).unwrap();
//!
//! assert_eq!(config.card_count, 3);
//! assert_eq!(config.back_card.scale, 0.9);
//! assert_eq!(config.back_card.opacity, 0.5);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use swipecards_core::logging::targets;

use crate::animation::Easing;
use crate::card::CardTransform;
use crate::error::{Error, Result};

/// Number of card slots in the default deck.
pub const DEFAULT_CARD_COUNT: usize = 2;

/// Default duration of settle and exit animations in milliseconds.
pub const DEFAULT_ANIMATION_LENGTH_MS: u64 = 250;

/// Fraction of the control width used as swipe threshold.
pub const DEFAULT_THRESHOLD_FRACTION: f32 = 1.0 / 3.0;

/// Largest accepted change between consecutive drag deltas.
pub const DEFAULT_JUMP_GUARD: f32 = 100.0;

/// Rotation of a card leaving the screen, 0.3 radians in degrees.
pub const DEFAULT_EXIT_ROTATION_DEGREES: f32 = 0.3 * (180.0 / std::f32::consts::PI);

/// Resting appearance of the cards behind the front card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackCardStyle {
    /// Scale of a resting back card, in `(0, 1]`.
    pub scale: f32,
    /// Horizontal offset of a resting back card; zero or negative.
    pub offset_x: f32,
    /// Opacity of a resting back card, in `[0, 1]`.
    pub opacity: f32,
}

impl BackCardStyle {
    /// The resting transform for a back slot.
    pub fn transform(&self) -> CardTransform {
        CardTransform::new(self.offset_x, 0.0, self.scale, self.opacity)
    }

    /// The transform of a back card revealed by a drag of `progress`
    /// thresholds (`|dx / threshold|`).
    ///
    /// Each component moves linearly towards the front-card value and stops
    /// there.
    pub fn revealed(&self, progress: f32) -> CardTransform {
        let progress = progress.abs();
        CardTransform::new(
            (self.offset_x + progress * self.offset_x.abs()).min(0.0),
            0.0,
            (self.scale + progress * (1.0 - self.scale)).min(1.0),
            (self.opacity + progress * self.opacity).min(1.0),
        )
    }
}

impl Default for BackCardStyle {
    fn default() -> Self {
        Self {
            scale: 0.8,
            offset_x: -20.0,
            opacity: 0.5,
        }
    }
}

/// Configuration of a card stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardStackConfig {
    /// Number of card slots in the deck (front plus back cards).
    pub card_count: usize,
    /// Duration of settle and exit animations, in milliseconds.
    pub animation_length_ms: u64,
    /// Fixed swipe threshold in pixels; derived from the width when `None`.
    pub swipe_threshold: Option<f32>,
    /// Fraction of the width used as threshold when none is fixed.
    pub threshold_fraction: f32,
    /// Largest accepted jump between consecutive drag deltas.
    pub jump_guard: f32,
    /// Rotation, in degrees, of a card animating off screen.
    pub exit_rotation_degrees: f32,
    /// Easing curve of settle and exit animations.
    pub easing: Easing,
    /// Resting appearance of back cards.
    pub back_card: BackCardStyle,
}

impl Default for CardStackConfig {
    fn default() -> Self {
        Self {
            card_count: DEFAULT_CARD_COUNT,
            animation_length_ms: DEFAULT_ANIMATION_LENGTH_MS,
            swipe_threshold: None,
            threshold_fraction: DEFAULT_THRESHOLD_FRACTION,
            jump_guard: DEFAULT_JUMP_GUARD,
            exit_rotation_degrees: DEFAULT_EXIT_ROTATION_DEGREES,
            easing: Easing::default(),
            back_card: BackCardStyle::default(),
        }
    }
}

impl CardStackConfig {
    /// The default animation length as a [`Duration`].
    pub fn animation_length(&self) -> Duration {
        Duration::from_millis(self.animation_length_ms)
    }

    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            _ => {
                return Err(Error::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded card stack configuration");
        Ok(config)
    }

    /// Check every field against its valid range.
    pub fn validate(&self) -> Result<()> {
        if self.card_count == 0 {
            return Err(Error::invalid_value("card_count", "must be at least 1"));
        }
        if let Some(threshold) = self.swipe_threshold {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(Error::invalid_value(
                    "swipe_threshold",
                    format!("must be a non-negative number, got {threshold}"),
                ));
            }
        }
        if !(self.threshold_fraction > 0.0 && self.threshold_fraction <= 1.0) {
            return Err(Error::invalid_value(
                "threshold_fraction",
                format!("must be in (0, 1], got {}", self.threshold_fraction),
            ));
        }
        if !(self.jump_guard > 0.0) {
            return Err(Error::invalid_value(
                "jump_guard",
                format!("must be positive, got {}", self.jump_guard),
            ));
        }
        let back = &self.back_card;
        if !(back.scale > 0.0 && back.scale <= 1.0) {
            return Err(Error::invalid_value(
                "back_card.scale",
                format!("must be in (0, 1], got {}", back.scale),
            ));
        }
        if !(0.0..=1.0).contains(&back.opacity) {
            return Err(Error::invalid_value(
                "back_card.opacity",
                format!("must be in [0, 1], got {}", back.opacity),
            ));
        }
        if !(back.offset_x <= 0.0) {
            return Err(Error::invalid_value(
                "back_card.offset_x",
                format!("must be zero or negative, got {}", back.offset_x),
            ));
        }
        Ok(())
    }
}

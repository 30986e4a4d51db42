#![forbid(unsafe_code)]

//! Thresholds and timeouts for long-press recognition.

use core::fmt;

use web_time::Duration;

/// Default hold duration before a long press fires.
pub const DEFAULT_HOLD_DURATION: Duration = Duration::from_millis(500);
/// Default horizontal movement tolerance in pixels.
pub const DEFAULT_MOVEMENT_THRESHOLD_PX: f64 = 20.0;
/// Default multiplier applied to the movement threshold on the vertical axis.
pub const DEFAULT_VERTICAL_THRESHOLD_MULTIPLIER: f64 = 2.0;
/// Default velocity above which the pointer is considered scrolling.
pub const DEFAULT_VELOCITY_THRESHOLD_PX_PER_MS: f64 = 0.5;
/// Default delay before the hold timer is armed.
pub const DEFAULT_COMMIT_DELAY: Duration = Duration::from_millis(100);
/// Default delay before a scroll flag is cleared.
pub const DEFAULT_SCROLL_RESET_DELAY: Duration = Duration::from_millis(100);
/// Upper bound accepted for any single delay.
pub const MAX_DELAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Immutable per-engine configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongPressConfig {
    /// Stationary hold required after the commit delay (default: 500ms).
    pub hold_duration: Duration,
    /// Horizontal displacement tolerance in pixels (default: 20).
    pub movement_threshold_px: f64,
    /// Vertical tolerance is `movement_threshold_px * vertical_threshold_multiplier`
    /// (default: 2, i.e. 40px).
    pub vertical_threshold_multiplier: f64,
    /// Pointer speed, px/ms, above which the interaction is a scroll (default: 0.5).
    pub velocity_threshold_px_per_ms: f64,
    /// Delay before the hold timer is armed (default: 100ms).
    pub commit_delay: Duration,
    /// Delay before the scrolling flag clears after a cancel or page scroll (default: 100ms).
    pub scroll_reset_delay: Duration,
}

impl Default for LongPressConfig {
    fn default() -> Self {
        Self {
            hold_duration: DEFAULT_HOLD_DURATION,
            movement_threshold_px: DEFAULT_MOVEMENT_THRESHOLD_PX,
            vertical_threshold_multiplier: DEFAULT_VERTICAL_THRESHOLD_MULTIPLIER,
            velocity_threshold_px_per_ms: DEFAULT_VELOCITY_THRESHOLD_PX_PER_MS,
            commit_delay: DEFAULT_COMMIT_DELAY,
            scroll_reset_delay: DEFAULT_SCROLL_RESET_DELAY,
        }
    }
}

impl LongPressConfig {
    #[must_use]
    pub const fn with_hold_duration(mut self, hold_duration: Duration) -> Self {
        self.hold_duration = hold_duration;
        self
    }

    #[must_use]
    pub const fn with_movement_threshold_px(mut self, px: f64) -> Self {
        self.movement_threshold_px = px;
        self
    }

    #[must_use]
    pub const fn with_vertical_threshold_multiplier(mut self, multiplier: f64) -> Self {
        self.vertical_threshold_multiplier = multiplier;
        self
    }

    #[must_use]
    pub const fn with_velocity_threshold_px_per_ms(mut self, px_per_ms: f64) -> Self {
        self.velocity_threshold_px_per_ms = px_per_ms;
        self
    }

    #[must_use]
    pub const fn with_commit_delay(mut self, commit_delay: Duration) -> Self {
        self.commit_delay = commit_delay;
        self
    }

    #[must_use]
    pub const fn with_scroll_reset_delay(mut self, delay: Duration) -> Self {
        self.scroll_reset_delay = delay;
        self
    }

    /// Effective vertical displacement tolerance in pixels.
    #[inline]
    #[must_use]
    pub fn vertical_threshold_px(&self) -> f64 {
        self.movement_threshold_px * self.vertical_threshold_multiplier
    }

    /// Time from `start` until the long press can fire.
    #[inline]
    #[must_use]
    pub fn time_to_trigger(&self) -> Duration {
        self.commit_delay.saturating_add(self.hold_duration)
    }

    /// Check that every field is usable.
    ///
    /// Zero commit and scroll-reset delays are accepted; those timers fire on
    /// the next tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hold_duration.is_zero() {
            return Err(ConfigError::ZeroHoldDuration);
        }
        for (field, delay) in [
            ("hold_duration", self.hold_duration),
            ("commit_delay", self.commit_delay),
            ("scroll_reset_delay", self.scroll_reset_delay),
        ] {
            if delay > MAX_DELAY {
                return Err(ConfigError::DelayTooLarge { field, delay });
            }
        }
        if !self.movement_threshold_px.is_finite() || self.movement_threshold_px < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                field: "movement_threshold_px",
                value: self.movement_threshold_px,
            });
        }
        if !self.vertical_threshold_multiplier.is_finite()
            || self.vertical_threshold_multiplier <= 0.0
        {
            return Err(ConfigError::InvalidThreshold {
                field: "vertical_threshold_multiplier",
                value: self.vertical_threshold_multiplier,
            });
        }
        if !self.velocity_threshold_px_per_ms.is_finite() || self.velocity_threshold_px_per_ms <= 0.0
        {
            return Err(ConfigError::InvalidThreshold {
                field: "velocity_threshold_px_per_ms",
                value: self.velocity_threshold_px_per_ms,
            });
        }
        Ok(())
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    ZeroHoldDuration,
    DelayTooLarge { field: &'static str, delay: Duration },
    InvalidThreshold { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroHoldDuration => f.write_str("hold duration must be > 0"),
            Self::DelayTooLarge { field, delay } => {
                write!(f, "{field} must be at most {MAX_DELAY:?} (got {delay:?})")
            }
            Self::InvalidThreshold { field, value } if *field == "movement_threshold_px" => {
                write!(f, "{field} must be a finite, non-negative number (got {value})")
            }
            Self::InvalidThreshold { field, value } => {
                write!(f, "{field} must be a finite, positive number (got {value})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
